//! Value object trait: equality by value, not identity.
//!
//! Value objects are defined entirely by their attribute values. A cart line
//! is one of them: its identifier is derived from its content, so two lines
//! holding the same configuration are the same line.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: identity follows from the values (two equal values are
///   interchangeable)
/// - **Entity**: identity is assigned once and survives state changes
///
/// Example:
/// - a configured cart line `{ sku: "CARD-A5", price: 4.5, ... }` is a value object
/// - a customer account with an assigned account number is an entity
///
/// ## Design Constraints
///
/// The trait requires:
/// - **Clone**: values are copied, not shared
/// - **PartialEq**: values are compared by their attributes
/// - **Debug**: values show up in logs and test failures
///
/// ## Usage Pattern
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Surcharge {
///     label: String,
///     amount: f64,
/// }
///
/// impl ValueObject for Surcharge {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
