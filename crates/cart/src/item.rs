use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use cartline_core::{DomainError, DomainResult, ValueObject};

use crate::attribute::{self, Attribute};
use crate::identity::ItemId;

/// Synthetic key under which the derived identifier is readable.
pub const ID_KEY: &str = "id";

/// One configured product line in a cart.
///
/// Attributes live in a single ordered mapping. Every read, write and delete
/// (by raw key or through the typed accessors) goes through [`CartItem::get`],
/// [`CartItem::set`] and [`CartItem::remove`], so the write rules cannot be
/// bypassed. Construction is trusted and does not validate.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    attributes: Map<String, Value>,
}

/// Exported form of an item: `{"id": ..., "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemSnapshot {
    pub id: ItemId,
    pub data: Map<String, Value>,
}

impl Default for CartItem {
    fn default() -> Self {
        Self {
            attributes: attribute::defaults(),
        }
    }
}

impl ValueObject for CartItem {}

impl CartItem {
    /// Defaults overridden by `overrides`. Unknown keys are kept as-is.
    pub fn new<I, K>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut attributes = attribute::defaults();
        for (key, value) in overrides {
            attributes.insert(key.into(), value);
        }
        Self { attributes }
    }

    /// Restore an item exactly as exported (no defaults are re-applied).
    ///
    /// Fails if the snapshot's id does not match its data.
    pub fn from_snapshot(snapshot: CartItemSnapshot) -> DomainResult<Self> {
        let item = Self {
            attributes: snapshot.data,
        };
        let actual = item.id()?;
        if actual != snapshot.id {
            return Err(DomainError::invariant(format!(
                "snapshot id {} does not match its data ({actual})",
                snapshot.id
            )));
        }
        Ok(item)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn id(&self) -> DomainResult<ItemId> {
        ItemId::derive(&self.attributes)
    }

    pub fn to_snapshot(&self) -> DomainResult<CartItemSnapshot> {
        Ok(CartItemSnapshot {
            id: self.id()?,
            data: self.attributes.clone(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        key == ID_KEY || self.attributes.contains_key(key)
    }

    /// Read an attribute; `"id"` yields the derived identifier.
    pub fn get(&self, key: &str) -> DomainResult<Value> {
        if key == ID_KEY {
            return Ok(Value::String(self.id()?.into()));
        }
        self.stored(key).cloned()
    }

    /// Validate and store `value` under `key`, returning the new identifier.
    ///
    /// Nothing is stored when validation fails. `"id"` is reserved for the
    /// derived identifier: writing it is a `Validation` error, whatever the
    /// value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> DomainResult<ItemId> {
        if key == ID_KEY {
            return Err(DomainError::validation("id is derived and cannot be set"));
        }

        let value = attribute::check_write(key, Attribute::rule_for(key), value.into())
            .inspect_err(|err| tracing::debug!(key, %err, "rejected cart item write"))?;
        self.attributes.insert(key.to_owned(), value);

        let id = self.id()?;
        tracing::debug!(key, item_id = %id, "cart item attribute updated");
        Ok(id)
    }

    /// Delete a stored attribute.
    ///
    /// `"id"` is reserved and never stored, so removing it returns `None` and
    /// leaves the item unchanged.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        if key == ID_KEY {
            return None;
        }
        self.attributes.remove(key)
    }

    pub(crate) fn stored(&self, key: &str) -> DomainResult<&Value> {
        self.attributes
            .get(key)
            .ok_or_else(|| DomainError::missing_attribute(key))
    }

    /// Numeric reading used by the price accessors and the pricing math.
    /// `null` counts as zero.
    pub(crate) fn number(&self, attr: Attribute) -> DomainResult<f64> {
        let value = self.stored(attr.as_str())?;
        if value.is_null() {
            return Ok(0.0);
        }
        attribute::numeric_value(value)
            .ok_or_else(|| DomainError::validation(format!("{attr} is not numeric")))
    }

    fn text(&self, attr: Attribute) -> DomainResult<&str> {
        self.stored(attr.as_str())?
            .as_str()
            .ok_or_else(|| DomainError::invariant(format!("{attr} is not a string")))
    }

    fn optional_int(&self, attr: Attribute) -> DomainResult<Option<i64>> {
        match self.stored(attr.as_str())? {
            Value::Null => Ok(None),
            value => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| DomainError::invariant(format!("{attr} is not an integer"))),
        }
    }

    fn list(&self, attr: Attribute) -> DomainResult<&[Value]> {
        self.stored(attr.as_str())?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| DomainError::invariant(format!("{attr} is not a list")))
    }
}

// Named-field access. Thin wrappers over get/set/remove.
impl CartItem {
    pub fn attribute(&self, attr: Attribute) -> DomainResult<&Value> {
        self.stored(attr.as_str())
    }

    pub fn set_attribute(&mut self, attr: Attribute, value: impl Into<Value>) -> DomainResult<ItemId> {
        self.set(attr.as_str(), value)
    }

    pub fn remove_attribute(&mut self, attr: Attribute) -> Option<Value> {
        self.remove(attr.as_str())
    }

    pub fn quantity(&self) -> DomainResult<i64> {
        self.stored(Attribute::Quantity.as_str())?
            .as_i64()
            .ok_or_else(|| DomainError::invariant("quantity is not an integer"))
    }

    pub fn set_quantity(&mut self, quantity: i64) -> DomainResult<ItemId> {
        self.set_attribute(Attribute::Quantity, quantity)
    }

    pub fn variant(&self) -> DomainResult<&str> {
        self.text(Attribute::Variant)
    }

    pub fn set_variant(&mut self, variant: impl Into<String>) -> DomainResult<ItemId> {
        self.set_attribute(Attribute::Variant, variant.into())
    }

    pub fn name(&self) -> DomainResult<&str> {
        self.text(Attribute::Name)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<ItemId> {
        self.set_attribute(Attribute::Name, name.into())
    }

    pub fn sku(&self) -> DomainResult<&str> {
        self.text(Attribute::Sku)
    }

    pub fn set_sku(&mut self, sku: impl Into<String>) -> DomainResult<ItemId> {
        self.set_attribute(Attribute::Sku, sku.into())
    }

    pub fn thumbnail(&self) -> DomainResult<&str> {
        self.text(Attribute::Thumbnail)
    }

    pub fn set_thumbnail(&mut self, thumbnail: impl Into<String>) -> DomainResult<ItemId> {
        self.set_attribute(Attribute::Thumbnail, thumbnail.into())
    }

    pub fn price(&self) -> DomainResult<f64> {
        self.number(Attribute::Price)
    }

    /// Non-finite prices are rejected (they have no JSON number form).
    pub fn set_price(&mut self, price: f64) -> DomainResult<ItemId> {
        self.set_attribute(Attribute::Price, json!(price))
    }

    pub fn color_price(&self) -> DomainResult<f64> {
        self.number(Attribute::ColorPrice)
    }

    pub fn set_color_price(&mut self, color_price: f64) -> DomainResult<ItemId> {
        self.set_attribute(Attribute::ColorPrice, json!(color_price))
    }

    pub fn page_price(&self) -> DomainResult<f64> {
        self.number(Attribute::PagePrice)
    }

    pub fn set_page_price(&mut self, page_price: f64) -> DomainResult<ItemId> {
        self.set_attribute(Attribute::PagePrice, json!(page_price))
    }

    /// Tax rate in percent (20.0 means 20%).
    pub fn tax(&self) -> DomainResult<f64> {
        self.number(Attribute::Tax)
    }

    pub fn set_tax(&mut self, tax: f64) -> DomainResult<ItemId> {
        self.set_attribute(Attribute::Tax, json!(tax))
    }

    pub fn num_edit_page(&self) -> DomainResult<i64> {
        self.stored(Attribute::NumEditPage.as_str())?
            .as_i64()
            .ok_or_else(|| DomainError::invariant("numEditPage is not an integer"))
    }

    pub fn set_num_edit_page(&mut self, pages: i64) -> DomainResult<ItemId> {
        self.set_attribute(Attribute::NumEditPage, pages)
    }

    pub fn company_design_id(&self) -> DomainResult<Option<i64>> {
        self.optional_int(Attribute::CompanyDesignId)
    }

    pub fn pitch_print_project_id(&self) -> DomainResult<Option<i64>> {
        self.optional_int(Attribute::PitchPrintProjectId)
    }

    pub fn color_id(&self) -> DomainResult<Option<i64>> {
        self.optional_int(Attribute::ColorId)
    }

    pub fn design_attributes(&self) -> DomainResult<&[Value]> {
        self.list(Attribute::DesignAttributes)
    }

    pub fn variant_entities(&self) -> DomainResult<&[Value]> {
        self.list(Attribute::VariantEntities)
    }
}
