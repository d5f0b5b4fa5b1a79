//! Build-your-own changes applied to a catalog pizza.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::errors::{Result, SelectionError};
use crate::types::{MenuOption, OptionSet, Pizza, PlacedTopping, Placement};

/// Changes requested on top of a catalog pizza. Unset fields keep the base
/// pizza's choice; `toppings`, when set, replaces the whole topping list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PizzaCustomization {
    pub toppings: Option<Vec<(Placement, String)>>,
    pub crust_flavor: Option<String>,
    pub dough: Option<String>,
    pub cheese: Option<String>,
    pub sauce: Option<String>,
}

impl PizzaCustomization {
    pub fn option(&self, set: OptionSet) -> Option<&str> {
        match set {
            OptionSet::CrustFlavor => self.crust_flavor.as_deref(),
            OptionSet::Dough => self.dough.as_deref(),
            OptionSet::Cheese => self.cheese.as_deref(),
            OptionSet::Sauce => self.sauce.as_deref(),
        }
    }
}

impl Catalog {
    /// Apply `changes` to the pizza stored under `key`.
    ///
    /// A topping may appear at most once. Toppings placed as `NONE` are dropped. Every remaining item must exist
    /// in its set and be available given the rest of the pizza. The result is
    /// priced from its components.
    pub fn customize(
        &self,
        key: &str,
        changes: &PizzaCustomization,
    ) -> Result<Pizza, SelectionError> {
        let base = self
            .pizza(key)
            .ok_or_else(|| SelectionError::UnknownProduct(key.to_string()))?;

        let toppings = match &changes.toppings {
            None => base.toppings.clone(),
            Some(requested) => {
                let mut seen = HashSet::with_capacity(requested.len());
                let mut placed = Vec::with_capacity(requested.len());
                for (placement, code) in requested {
                    if !seen.insert(code.as_str()) {
                        return Err(SelectionError::DuplicateTopping(code.clone()));
                    }
                    let topping = self.topping(code).ok_or_else(|| SelectionError::UnknownItem {
                        set: "topping",
                        shortcode: code.clone(),
                    })?;
                    if placement.is_placed() {
                        placed.push(PlacedTopping::new(*placement, Arc::clone(topping)));
                    }
                }
                placed
            }
        };

        let option = |set: OptionSet| -> Result<Arc<MenuOption>, SelectionError> {
            match changes.option(set) {
                None => Ok(Arc::clone(base.option(set))),
                Some(code) => self.option(set, code).map(Arc::clone).ok_or_else(|| {
                    SelectionError::UnknownItem {
                        set: set.as_str(),
                        shortcode: code.to_string(),
                    }
                }),
            }
        };

        let mut pizza = Pizza {
            product: base.product.clone(),
            toppings,
            crust_flavor: option(OptionSet::CrustFlavor)?,
            dough: option(OptionSet::Dough)?,
            cheese: option(OptionSet::Cheese)?,
            sauce: option(OptionSet::Sauce)?,
        };

        if let Some(item) = self.rules().first_unavailable(&pizza)? {
            debug!(pizza = key, item = item.shortcode(), "customization rejected");
            return Err(SelectionError::Unavailable(item.shortcode().to_string()));
        }

        pizza.product.price = pizza.computed_price();
        Ok(pizza)
    }
}
