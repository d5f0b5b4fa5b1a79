//! Pizza pricing.
//!
//! `BASE_PIZZA_PRICE` plus each of the four options plus every topping that is
//! actually placed. Half-pizza toppings (`LEFT`/`RIGHT`) cost the same as
//! `WHOLE`. Every pizza on the standard menu is listed at exactly this price.

use rust_decimal::Decimal;

use crate::types::{OptionSet, Pizza};

/// Price of a cheese pizza with no upgrades.
pub const BASE_PIZZA_PRICE: Decimal = Decimal::from_parts(19, 0, 0, false, 0);

impl Pizza {
    /// Price derived from the pizza's components rather than its listed price.
    pub fn computed_price(&self) -> Decimal {
        let options: Decimal = OptionSet::ALL
            .into_iter()
            .map(|set| self.option(set).product.price)
            .sum();
        let toppings: Decimal = self
            .placed_toppings()
            .map(|t| t.topping.option.product.price)
            .sum();
        BASE_PIZZA_PRICE + options + toppings
    }
}
