//! Attribute schema of a cart line: names, defaults and write rules.

use core::str::FromStr;

use serde_json::{Map, Value, json};

use cartline_core::DomainError;

/// How a write to an attribute is checked before it is stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WriteRule {
    /// Must be a JSON integer. No coercion from floats or strings.
    Integer,
    /// Must be a JSON string.
    Text,
    /// Number or numeric string; always stored as a float.
    Numeric,
    /// Stored verbatim.
    Any,
}

/// Known attributes of a cart line.
///
/// The wire names are camelCase and must stay stable: they feed the content
/// digest and the exported snapshot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Attribute {
    CompanyDesignId,
    PitchPrintProjectId,
    Name,
    Sku,
    Quantity,
    Price,
    ColorPrice,
    PagePrice,
    Tax,
    ColorId,
    NumEditPage,
    DesignAttributes,
    VariantEntities,
    Variant,
    Thumbnail,
}

impl Attribute {
    pub const ALL: [Attribute; 15] = [
        Attribute::CompanyDesignId,
        Attribute::PitchPrintProjectId,
        Attribute::Name,
        Attribute::Sku,
        Attribute::Quantity,
        Attribute::Price,
        Attribute::ColorPrice,
        Attribute::PagePrice,
        Attribute::Tax,
        Attribute::ColorId,
        Attribute::NumEditPage,
        Attribute::DesignAttributes,
        Attribute::VariantEntities,
        Attribute::Variant,
        Attribute::Thumbnail,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::CompanyDesignId => "companyDesignId",
            Attribute::PitchPrintProjectId => "pitchPrintProjectId",
            Attribute::Name => "name",
            Attribute::Sku => "sku",
            Attribute::Quantity => "quantity",
            Attribute::Price => "price",
            Attribute::ColorPrice => "colorPrice",
            Attribute::PagePrice => "pagePrice",
            Attribute::Tax => "tax",
            Attribute::ColorId => "colorId",
            Attribute::NumEditPage => "numEditPage",
            // Historical spelling, kept for compatibility with stored carts.
            Attribute::DesignAttributes => "designAttributies",
            Attribute::VariantEntities => "variantEntities",
            Attribute::Variant => "variant",
            Attribute::Thumbnail => "thumbnail",
        }
    }

    /// Value the attribute takes when the caller does not supply one.
    pub fn default_value(self) -> Value {
        match self {
            Attribute::CompanyDesignId | Attribute::PitchPrintProjectId | Attribute::ColorId => {
                Value::Null
            }
            Attribute::Name | Attribute::Sku | Attribute::Variant | Attribute::Thumbnail => {
                json!("")
            }
            Attribute::Quantity => json!(1),
            Attribute::Price | Attribute::ColorPrice | Attribute::PagePrice | Attribute::Tax => {
                json!(0.0)
            }
            Attribute::NumEditPage => json!(0),
            Attribute::DesignAttributes | Attribute::VariantEntities => json!([]),
        }
    }

    pub fn rule(self) -> WriteRule {
        match self {
            Attribute::Quantity => WriteRule::Integer,
            Attribute::Variant => WriteRule::Text,
            Attribute::Price | Attribute::ColorPrice | Attribute::PagePrice | Attribute::Tax => {
                WriteRule::Numeric
            }
            _ => WriteRule::Any,
        }
    }

    /// Rule for an arbitrary key; unknown keys are unchecked.
    pub fn rule_for(key: &str) -> WriteRule {
        key.parse::<Attribute>()
            .map(Attribute::rule)
            .unwrap_or(WriteRule::Any)
    }
}

impl core::fmt::Display for Attribute {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .into_iter()
            .find(|attr| attr.as_str() == s)
            .ok_or_else(|| DomainError::missing_attribute(s))
    }
}

/// The full default attribute mapping.
pub fn defaults() -> Map<String, Value> {
    Attribute::ALL
        .into_iter()
        .map(|attr| (attr.as_str().to_owned(), attr.default_value()))
        .collect()
}

/// Check `value` against `rule` and return what should be stored.
///
/// `key` only feeds the error message.
pub(crate) fn check_write(key: &str, rule: WriteRule, value: Value) -> Result<Value, DomainError> {
    match rule {
        WriteRule::Integer => {
            if value.is_i64() || value.is_u64() {
                Ok(value)
            } else {
                Err(DomainError::validation(format!("{key} must be an integer")))
            }
        }
        WriteRule::Text => {
            if value.is_string() {
                Ok(value)
            } else {
                Err(DomainError::validation(format!("{key} must be a string")))
            }
        }
        WriteRule::Numeric => numeric_value(&value)
            .map(|n| json!(n))
            .ok_or_else(|| DomainError::validation(format!("{key} must be numeric"))),
        WriteRule::Any => Ok(value),
    }
}

/// Numeric reading of a JSON number or numeric string.
pub(crate) fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s),
        _ => None,
    }
}

/// Decimal/exponent notation with optional sign and surrounding whitespace.
/// Rejects `inf`, `nan`, hex and empty strings.
fn parse_numeric(s: &str) -> Option<f64> {
    let s = s.trim();
    let mut digits = 0usize;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '+' | '-' | '.' | 'e' | 'E' => {}
            _ => return None,
        }
    }
    if digits == 0 {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for attr in Attribute::ALL {
            assert_eq!(attr.as_str().parse::<Attribute>().unwrap(), attr);
        }
        assert!("designAttributes".parse::<Attribute>().is_err());
    }

    #[test]
    fn defaults_cover_every_attribute() {
        let map = defaults();
        assert_eq!(map.len(), Attribute::ALL.len());
        assert_eq!(map["quantity"], json!(1));
        assert_eq!(map["price"], json!(0.0));
        assert_eq!(map["numEditPage"], json!(0));
        assert_eq!(map["designAttributies"], json!([]));
        assert_eq!(map["colorId"], Value::Null);
        assert_eq!(map["variant"], json!(""));
    }

    #[test]
    fn only_the_validated_fields_carry_rules() {
        assert_eq!(Attribute::rule_for("quantity"), WriteRule::Integer);
        assert_eq!(Attribute::rule_for("variant"), WriteRule::Text);
        assert_eq!(Attribute::rule_for("tax"), WriteRule::Numeric);
        assert_eq!(Attribute::rule_for("numEditPage"), WriteRule::Any);
        assert_eq!(Attribute::rule_for("colorId"), WriteRule::Any);
        assert_eq!(Attribute::rule_for("giftWrap"), WriteRule::Any);
    }

    #[test]
    fn integer_rule_rejects_floats_and_strings() {
        assert!(check_write("quantity", WriteRule::Integer, json!(3)).is_ok());
        assert!(check_write("quantity", WriteRule::Integer, json!(-2)).is_ok());
        assert!(check_write("quantity", WriteRule::Integer, json!(3.0)).is_err());
        assert!(check_write("quantity", WriteRule::Integer, json!("3")).is_err());
    }

    #[test]
    fn numeric_rule_coerces_to_float() {
        let stored = check_write("price", WriteRule::Numeric, json!("12.50")).unwrap();
        assert_eq!(stored, json!(12.5));
        assert!(stored.is_f64());

        let stored = check_write("tax", WriteRule::Numeric, json!(20)).unwrap();
        assert!(stored.is_f64());
        assert_eq!(stored.as_f64(), Some(20.0));

        let err = check_write("pagePrice", WriteRule::Numeric, json!(true)).unwrap_err();
        assert_eq!(err, DomainError::validation("pagePrice must be numeric"));
    }

    #[test]
    fn numeric_strings() {
        assert_eq!(parse_numeric(" 1e3 "), Some(1000.0));
        assert_eq!(parse_numeric("-.5"), Some(-0.5));
        assert_eq!(parse_numeric("+7"), Some(7.0));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("."), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("0x1A"), None);
        assert_eq!(parse_numeric("12abc"), None);
        assert_eq!(parse_numeric("1-2"), None);
    }
}
