//! Price and tax decomposition of a cart line.
//!
//! Prices are tax-inclusive. The tax-exclusive single price is rounded to a
//! whole unit, half away from zero, and the single tax is whatever remains.
//! Totals multiply the single figures by the quantity.

use serde::{Deserialize, Serialize};

use cartline_core::DomainResult;

use crate::attribute::Attribute;
use crate::item::CartItem;

/// All price figures of a line, computed from one state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub total_page_price: f64,
    pub single_price: f64,
    pub single_price_excluding_tax: f64,
    pub single_tax: f64,
    pub total_price: f64,
    pub total_price_excluding_tax: f64,
    pub total_tax: f64,
}

/// Significant digits kept before the final rounding step.
const PRE_ROUND_DIGITS: usize = 15;

/// Remove `tax_percent` from a tax-inclusive amount and round to a whole unit.
pub fn exclude_tax(amount: f64, tax_percent: f64) -> f64 {
    round_half_away(amount / (1.0 + tax_percent / 100.0))
}

/// Round to 0 decimals, half away from zero, on the decimal value.
///
/// The quotient is first cut to 15 significant digits so that a decimal tie
/// like 6.05 / 1.1 (5.499999999999999 in binary) still rounds up.
fn round_half_away(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let pre_rounded = format!("{:.*e}", PRE_ROUND_DIGITS - 1, value)
        .parse::<f64>()
        .unwrap_or(value);
    pre_rounded.round()
}

impl CartItem {
    /// `pagePrice * numEditPage`.
    pub fn total_page_price(&self) -> DomainResult<f64> {
        Ok(self.page_price()? * self.page_count()?)
    }

    /// `price + colorPrice + total_page_price`.
    pub fn single_price(&self) -> DomainResult<f64> {
        Ok(self.price()? + self.color_price()? + self.total_page_price()?)
    }

    pub fn single_price_excluding_tax(&self) -> DomainResult<f64> {
        Ok(exclude_tax(self.single_price()?, self.tax()?))
    }

    pub fn single_tax(&self) -> DomainResult<f64> {
        Ok(self.single_price()? - self.single_price_excluding_tax()?)
    }

    pub fn total_price(&self) -> DomainResult<f64> {
        Ok(self.single_price()? * self.quantity_factor()?)
    }

    pub fn total_price_excluding_tax(&self) -> DomainResult<f64> {
        Ok(self.single_price_excluding_tax()? * self.quantity_factor()?)
    }

    pub fn total_tax(&self) -> DomainResult<f64> {
        Ok(self.single_tax()? * self.quantity_factor()?)
    }

    pub fn price_breakdown(&self) -> DomainResult<PriceBreakdown> {
        let total_page_price = self.total_page_price()?;
        let single_price = self.price()? + self.color_price()? + total_page_price;
        let single_price_excluding_tax = exclude_tax(single_price, self.tax()?);
        let single_tax = single_price - single_price_excluding_tax;
        let quantity = self.quantity_factor()?;

        Ok(PriceBreakdown {
            total_page_price,
            single_price,
            single_price_excluding_tax,
            single_tax,
            total_price: single_price * quantity,
            total_price_excluding_tax: single_price_excluding_tax * quantity,
            total_tax: single_tax * quantity,
        })
    }

    // Constructed items are not validated, so a numeric-string quantity is
    // still priced.
    fn quantity_factor(&self) -> DomainResult<f64> {
        self.number(Attribute::Quantity)
    }

    // Same leniency for the page count; `num_edit_page()` is the strict read.
    fn page_count(&self) -> DomainResult<f64> {
        self.number(Attribute::NumEditPage)
    }
}
