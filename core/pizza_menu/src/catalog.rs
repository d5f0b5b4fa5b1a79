//! # Catalog
//!
//! The read-only universe of toppings, options, pizzas and standalone
//! products. Built once from a [`CatalogDefinition`] and shared afterwards
//! without locking; there is no mutation API.
//!
//! Building fails fast with a [`CatalogError`] when the definition is
//! inconsistent:
//!
//! * a pizza names a topping or option missing from its set,
//! * an item names an availability rule the [`RuleBook`] does not know,
//! * a shortcode, topping index or pizza key appears twice,
//! * a pizza lists the same topping twice,
//! * a pizza's own selection disables one of its items.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::availability::RuleBook;
use crate::definitions::{self, CatalogDefinition, OptionDef, PizzaDef, ProductDef};
use crate::errors::{CatalogError, Result, SelectionError};
use crate::types::{
    MenuOption, OptionSet, PlacedTopping, Pizza, Product, ProductInfo, Selection, Topping,
};

#[derive(Debug, Clone)]
pub struct Catalog {
    rules: RuleBook,
    /// Sorted by topping index.
    toppings: Vec<Arc<Topping>>,
    topping_by_code: HashMap<String, usize>,
    options: HashMap<OptionSet, Vec<Arc<MenuOption>>>,
    /// Definition order.
    pizzas: Vec<(String, Arc<Pizza>)>,
    pizza_by_key: HashMap<String, usize>,
    salads: Vec<Arc<ProductInfo>>,
}

impl Catalog {
    /// The compiled-in menu with the default rule book.
    pub fn standard() -> Result<Self> {
        Self::build(&definitions::standard(), RuleBook::default())
    }

    pub fn build(def: &CatalogDefinition, rules: RuleBook) -> Result<Self> {
        let mut toppings = Vec::with_capacity(def.toppings.len());
        for t in &def.toppings {
            let option = resolve_option(&t.option, &rules)?;
            toppings.push(Arc::new(Topping {
                option,
                index: t.index,
                flavor_factor: t.flavor_factor,
                bake_factor: t.bake_factor,
            }));
        }
        toppings.sort_by_key(|t| t.index);

        let mut topping_by_code = HashMap::with_capacity(toppings.len());
        for (pos, topping) in toppings.iter().enumerate() {
            if pos > 0 && toppings[pos - 1].index == topping.index {
                return Err(CatalogError::DuplicateToppingIndex {
                    index: topping.index,
                    shortcode: topping.shortcode().to_string(),
                });
            }
            if topping_by_code
                .insert(topping.shortcode().to_string(), pos)
                .is_some()
            {
                return Err(CatalogError::DuplicateShortcode {
                    set: "topping",
                    shortcode: topping.shortcode().to_string(),
                });
            }
        }

        let mut options = HashMap::with_capacity(OptionSet::ALL.len());
        for set in OptionSet::ALL {
            let mut members: Vec<Arc<MenuOption>> = Vec::new();
            for o in def.options(set) {
                if members.iter().any(|m| m.shortcode() == o.product.shortcode) {
                    return Err(CatalogError::DuplicateShortcode {
                        set: set.as_str(),
                        shortcode: o.product.shortcode.clone(),
                    });
                }
                members.push(Arc::new(resolve_option(o, &rules)?));
            }
            options.insert(set, members);
        }

        let mut salads: Vec<Arc<ProductInfo>> = Vec::with_capacity(def.salads.len());
        for s in &def.salads {
            if salads.iter().any(|p| p.shortcode == s.shortcode) {
                return Err(CatalogError::DuplicateShortcode {
                    set: "salad",
                    shortcode: s.shortcode.clone(),
                });
            }
            salads.push(Arc::new(product_info(s)));
        }

        let mut catalog = Catalog {
            rules,
            toppings,
            topping_by_code,
            options,
            pizzas: Vec::with_capacity(def.pizzas.len()),
            pizza_by_key: HashMap::with_capacity(def.pizzas.len()),
            salads,
        };

        for p in &def.pizzas {
            if catalog.pizza_by_key.contains_key(&p.key) {
                return Err(CatalogError::DuplicatePizza(p.key.clone()));
            }
            let pizza = catalog.assemble(p)?;
            if let Some(item) = catalog.rules.first_unavailable(&pizza)? {
                return Err(CatalogError::InconsistentPizza {
                    pizza: p.key.clone(),
                    shortcode: item.shortcode().to_string(),
                });
            }
            catalog
                .pizza_by_key
                .insert(p.key.clone(), catalog.pizzas.len());
            catalog.pizzas.push((p.key.clone(), Arc::new(pizza)));
        }

        info!(
            "Catalog built: {} pizzas, {} toppings, {} standalone products",
            catalog.pizzas.len(),
            catalog.toppings.len(),
            catalog.salads.len()
        );
        Ok(catalog)
    }

    fn assemble(&self, def: &PizzaDef) -> Result<Pizza> {
        let dangling = |set: &'static str, shortcode: &str| CatalogError::UnknownReference {
            pizza: def.key.clone(),
            set,
            shortcode: shortcode.to_string(),
        };

        let mut toppings: Vec<PlacedTopping> = Vec::with_capacity(def.toppings.len());
        for (placement, code) in &def.toppings {
            let topping = self.topping(code).ok_or_else(|| dangling("topping", code.as_str()))?;
            if toppings.iter().any(|t| Arc::ptr_eq(&t.topping, topping)) {
                return Err(CatalogError::DuplicatePizzaTopping {
                    pizza: def.key.clone(),
                    shortcode: code.clone(),
                });
            }
            toppings.push(PlacedTopping::new(*placement, Arc::clone(topping)));
        }

        let option = |set: OptionSet, code: &str| {
            self.option(set, code)
                .map(Arc::clone)
                .ok_or_else(|| dangling(set.as_str(), code))
        };

        Ok(Pizza {
            product: product_info(&def.product),
            toppings,
            crust_flavor: option(OptionSet::CrustFlavor, def.crust_flavor.as_str())?,
            dough: option(OptionSet::Dough, def.dough.as_str())?,
            cheese: option(OptionSet::Cheese, def.cheese.as_str())?,
            sauce: option(OptionSet::Sauce, def.sauce.as_str())?,
        })
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    pub fn topping(&self, shortcode: &str) -> Option<&Arc<Topping>> {
        self.topping_by_code
            .get(shortcode)
            .map(|&pos| &self.toppings[pos])
    }

    /// All toppings in index order.
    pub fn toppings(&self) -> &[Arc<Topping>] {
        &self.toppings
    }

    pub fn option(&self, set: OptionSet, shortcode: &str) -> Option<&Arc<MenuOption>> {
        self.options(set).iter().find(|o| o.shortcode() == shortcode)
    }

    /// Look up an option by its set's wire name, e.g. `("sauce", "white")`.
    pub fn option_by_name(&self, set: &str, shortcode: &str) -> Option<&Arc<MenuOption>> {
        OptionSet::from_name(set).and_then(|set| self.option(set, shortcode))
    }

    /// Members of `set` in definition order.
    pub fn options(&self, set: OptionSet) -> &[Arc<MenuOption>] {
        self.options.get(&set).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn pizza(&self, key: &str) -> Option<&Arc<Pizza>> {
        self.pizza_by_key.get(key).map(|&pos| &self.pizzas[pos].1)
    }

    /// `(key, pizza)` pairs in definition order.
    pub fn pizzas(&self) -> impl Iterator<Item = (&str, &Arc<Pizza>)> {
        self.pizzas.iter().map(|(key, pizza)| (key.as_str(), pizza))
    }

    pub fn salads(&self) -> &[Arc<ProductInfo>] {
        &self.salads
    }

    pub fn salad(&self, shortcode: &str) -> Option<&Arc<ProductInfo>> {
        self.salads.iter().find(|s| s.shortcode == shortcode)
    }

    /// Resolve an order line's product name: a pizza key first, then a
    /// standalone product shortcode.
    pub fn product(&self, name: &str) -> Result<Product, SelectionError> {
        if let Some(pizza) = self.pizza(name) {
            return Ok(Product::Pizza(Arc::clone(pizza)));
        }
        self.salad(name)
            .map(|s| Product::Plain(Arc::clone(s)))
            .ok_or_else(|| SelectionError::UnknownProduct(name.to_string()))
    }

    /// Whether `option` may be added to `selection`.
    pub fn is_available(&self, option: &MenuOption, selection: &Selection) -> bool {
        // Every catalog item's rule was resolved during `build`.
        self.rules
            .is_available(option, selection)
            .unwrap_or(false)
    }
}

fn product_info(def: &ProductDef) -> ProductInfo {
    ProductInfo::new(
        def.shortcode.as_str(),
        def.description.as_str(),
        def.display_name.as_str(),
        def.price,
    )
}

fn resolve_option(def: &OptionDef, rules: &RuleBook) -> Result<MenuOption> {
    if !rules.contains(&def.enable_function_name) {
        return Err(CatalogError::UnknownRule {
            item: def.product.shortcode.clone(),
            rule: def.enable_function_name.clone(),
        });
    }
    Ok(MenuOption {
        product: product_info(&def.product),
        enable_function_name: def.enable_function_name.clone(),
    })
}
