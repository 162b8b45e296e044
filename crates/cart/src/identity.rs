//! Content-derived identity of a cart line.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use cartline_core::{DomainError, DomainResult};

use crate::attribute::Attribute;

/// Attributes that never contribute to the identity: lines that differ only
/// in these are the same line and can have their quantities merged.
pub const IDENTITY_EXCLUDED: [Attribute; 2] = [Attribute::Quantity, Attribute::Variant];

const DIGEST_HEX_LEN: usize = 64;

/// Identifier of a cart line: lowercase hex SHA-256 of its canonical content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Derive the identifier of an attribute mapping.
    ///
    /// The mapping is serialized with sorted keys at every nesting level
    /// (`serde_json::Map` is ordered) and floats in shortest round-trip form,
    /// so equal content always yields the same digest.
    pub fn derive(attributes: &Map<String, Value>) -> DomainResult<Self> {
        let mut content = attributes.clone();
        for attr in IDENTITY_EXCLUDED {
            content.remove(attr.as_str());
        }

        let canonical = serde_json::to_vec(&content)
            .map_err(|e| DomainError::invariant(format!("item content is not serializable: {e}")))?;

        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        let id = Self(format!("{:x}", hasher.finalize()));

        tracing::trace!(item_id = %id, bytes = canonical.len(), "derived cart item id");
        Ok(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s.len() == DIGEST_HEX_LEN
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !well_formed {
            return Err(DomainError::validation(format!(
                "ItemId: expected {DIGEST_HEX_LEN} lowercase hex characters, got {s:?}"
            )));
        }
        Ok(Self(s.to_owned()))
    }
}

impl From<ItemId> for String {
    fn from(value: ItemId) -> Self {
        value.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
