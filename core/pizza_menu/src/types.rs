//! # Types
//!
//! Menu and order data structures shared by every module of the crate.
//!
//! ## Composition instead of inheritance
//!
//! Every sellable item carries a [`ProductInfo`]. Richer items embed the
//! simpler one rather than extending it:
//!
//! ```text
//! ProductInfo ◄── MenuOption ◄── Topping
//!      ▲
//!      └──────── Pizza (toppings + four MenuOption references)
//! ```
//!
//! An order line can hold any of these, so [`Product`] is a closed enum with one
//! variant per concrete kind. Catalog items are handed out as `Arc`s; an order
//! shares them and never copies or mutates them.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Common attributes of every sellable item.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfo {
    /// Short identifier, unique within the set the item belongs to.
    pub shortcode: String,
    pub description: String,
    pub display_name: String,
    /// Non-negative price.
    pub price: Decimal,
}

impl ProductInfo {
    pub fn new(
        shortcode: impl Into<String>,
        description: impl Into<String>,
        display_name: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            shortcode: shortcode.into(),
            description: description.into(),
            display_name: display_name.into(),
            price,
        }
    }
}

/// A product whose availability is decided by a named rule.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuOption {
    pub product: ProductInfo,
    /// Key into the [`RuleBook`](crate::availability::RuleBook).
    pub enable_function_name: String,
}

impl MenuOption {
    pub fn shortcode(&self) -> &str {
        &self.product.shortcode
    }
}

/// An option that can be placed on a pizza.
#[derive(Debug, Clone, PartialEq)]
pub struct Topping {
    pub option: MenuOption,
    /// Stable position within the topping catalog.
    pub index: u32,
    pub flavor_factor: f64,
    pub bake_factor: f64,
}

impl Topping {
    pub fn shortcode(&self) -> &str {
        self.option.shortcode()
    }
}

/// Which part of a pizza a topping covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Placement {
    None,
    Left,
    Right,
    Whole,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Whole => "WHOLE",
        }
    }

    /// `false` for [`Placement::None`]: such a topping is neither priced nor shown.
    pub fn is_placed(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTopping {
    pub placement: Placement,
    pub topping: Arc<Topping>,
}

impl PlacedTopping {
    pub fn new(placement: Placement, topping: Arc<Topping>) -> Self {
        Self { placement, topping }
    }
}

/// The four option sets a pizza draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionSet {
    CrustFlavor,
    Dough,
    Cheese,
    Sauce,
}

impl OptionSet {
    pub const ALL: [OptionSet; 4] = [
        OptionSet::CrustFlavor,
        OptionSet::Dough,
        OptionSet::Cheese,
        OptionSet::Sauce,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CrustFlavor => "crust_flavor",
            Self::Dough => "dough",
            Self::Cheese => "cheese",
            Self::Sauce => "sauce",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|set| set.as_str() == name)
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pizza {
    pub product: ProductInfo,
    pub toppings: Vec<PlacedTopping>,
    pub crust_flavor: Arc<MenuOption>,
    pub dough: Arc<MenuOption>,
    pub cheese: Arc<MenuOption>,
    pub sauce: Arc<MenuOption>,
}

impl Pizza {
    pub fn option(&self, set: OptionSet) -> &Arc<MenuOption> {
        match set {
            OptionSet::CrustFlavor => &self.crust_flavor,
            OptionSet::Dough => &self.dough,
            OptionSet::Cheese => &self.cheese,
            OptionSet::Sauce => &self.sauce,
        }
    }

    /// Toppings that actually sit on the pizza (placement other than `NONE`).
    pub fn placed_toppings(&self) -> impl Iterator<Item = &PlacedTopping> {
        self.toppings.iter().filter(|t| t.placement.is_placed())
    }

    /// Every option chosen for this pizza: placed toppings first, then the
    /// crust flavor, dough, cheese and sauce.
    pub fn selected_items(&self) -> impl Iterator<Item = &MenuOption> {
        self.placed_toppings()
            .map(|t| &t.topping.option)
            .chain(OptionSet::ALL.into_iter().map(move |set| &**self.option(set)))
    }

    pub fn selection(&self) -> Selection {
        self.selected_items().map(MenuOption::shortcode).collect()
    }
}

/// Shortcodes already chosen for an in-progress pizza.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    shortcodes: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, shortcode: &str) -> bool {
        self.shortcodes.contains(shortcode)
    }

    pub fn len(&self) -> usize {
        self.shortcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcodes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            shortcodes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Any product an order line can refer to.
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    Plain(Arc<ProductInfo>),
    MenuOption(Arc<MenuOption>),
    Topping(Arc<Topping>),
    Pizza(Arc<Pizza>),
}

impl Product {
    pub fn info(&self) -> &ProductInfo {
        match self {
            Self::Plain(p) => p,
            Self::MenuOption(o) => &o.product,
            Self::Topping(t) => &t.option.product,
            Self::Pizza(p) => &p.product,
        }
    }

    pub fn shortcode(&self) -> &str {
        &self.info().shortcode
    }

    pub fn price(&self) -> Decimal {
        self.info().price
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuantity {
    pub product: Product,
    /// At least 1.
    pub quantity: u32,
}

impl ProductQuantity {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }
}

/// Client metadata recorded for logging only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientData {
    pub load_time: Option<DateTime<Utc>>,
    pub submit_time: Option<DateTime<Utc>>,
    pub time_selection_time: Option<DateTime<Utc>>,
    pub user_agent: Option<String>,
}

/// A placed order. Owned by the [`OrderTable`](crate::orders::OrderTable).
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub products: Vec<ProductQuantity>,
    /// Free-form; no state machine is enforced.
    pub status: String,
    /// Free-form, e.g. `"delivery"`.
    pub service: String,
    pub promise_time: Option<DateTime<Utc>>,
    pub client_data: ClientData,
}
