//! Cart line items.
//!
//! A [`CartItem`] holds one configured product line: quantity, base price,
//! option surcharges, tax rate and design metadata. Its [`ItemId`] is derived
//! from its content, and it computes the price/tax breakdown of the line.
//! Pure domain logic (no IO, no storage, no cart-level aggregation).

pub mod attribute;
pub mod identity;
pub mod item;
pub mod pricing;

pub use attribute::{Attribute, WriteRule, defaults};
pub use identity::ItemId;
pub use item::{CartItem, CartItemSnapshot, ID_KEY};
pub use pricing::PriceBreakdown;
