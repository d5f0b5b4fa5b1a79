//! # Pizza Menu
//!
//! Catalog, availability rules, pricing, order storage and JSON marshaling for
//! the pizza order API.
//!
//! | Concern             | Module                                   |
//! |---------------------|------------------------------------------|
//! | Data model          | [`types`]                                |
//! | Menu data           | [`definitions`]                          |
//! | Catalog builder     | [`catalog`], [`customize`]               |
//! | Availability rules  | [`availability`]                         |
//! | Pricing             | [`pricing`]                              |
//! | Order table         | [`orders`]                               |
//! | JSON shapes         | [`marshal`]                              |
//!
//! The catalog is built once, before any request is served, and is read-only
//! afterwards. The [`OrderTable`] is the only mutable state.

pub mod availability;
pub mod catalog;
pub mod customize;
pub mod definitions;
pub mod errors;
pub mod marshal;
pub mod orders;
pub mod pricing;
pub mod types;

#[cfg(test)]
mod test_catalog;
#[cfg(test)]
mod test_marshal;

pub use availability::{Rule, RuleBook};
pub use catalog::Catalog;
pub use customize::PizzaCustomization;
pub use errors::{CatalogError, OrderError, SelectionError};
pub use orders::OrderTable;
pub use rust_decimal::Decimal;
pub use types::{
    ClientData, MenuOption, OptionSet, Order, Pizza, PlacedTopping, Placement, Product,
    ProductInfo, ProductQuantity, Selection, Topping,
};
