use rust_decimal::Decimal;

use crate::availability::{Rule, RuleBook};
use crate::catalog::Catalog;
use crate::definitions::{self, PizzaDef};
use crate::errors::CatalogError;
use crate::types::{OptionSet, Placement, Product};

fn build(def: &definitions::CatalogDefinition) -> Result<Catalog, CatalogError> {
    Catalog::build(def, RuleBook::default())
}

#[test]
fn test_standard_catalog_builds() {
    let catalog = Catalog::standard().unwrap();
    assert_eq!(catalog.toppings().len(), 19);
    assert_eq!(catalog.pizzas().count(), 12);
    assert!(catalog.salads().is_empty());
    for set in OptionSet::ALL {
        assert_eq!(catalog.options(set).len(), 2, "{set}");
    }
}

#[test]
fn test_every_pizza_reference_resolves() {
    let catalog = Catalog::standard().unwrap();
    for (key, pizza) in catalog.pizzas() {
        for placed in &pizza.toppings {
            let found = catalog.topping(placed.topping.shortcode()).unwrap();
            assert_eq!(found, &placed.topping, "pizza '{key}'");
        }
        for set in OptionSet::ALL {
            let option = pizza.option(set);
            assert_eq!(
                catalog.option(set, option.shortcode()),
                Some(option),
                "pizza '{key}' {set}"
            );
        }
    }
}

#[test]
fn test_build_your_own() {
    let catalog = Catalog::standard().unwrap();
    let byo = catalog.pizza("byo").unwrap();

    assert_eq!(byo.product.shortcode, "z");
    assert_eq!(byo.product.display_name, "Build-Your-Own");
    assert_eq!(byo.product.price, Decimal::new(1900, 2));
    assert!(byo.toppings.is_empty());
    assert_eq!(byo.crust_flavor.shortcode(), "plain");
    assert_eq!(byo.dough.shortcode(), "brioche");
    assert_eq!(byo.cheese.shortcode(), "mozz");
    assert_eq!(byo.sauce.shortcode(), "red");
}

#[test]
fn test_pizzas_keep_definition_order() {
    let catalog = Catalog::standard().unwrap();
    let keys: Vec<&str> = catalog.pizzas().map(|(key, _)| key).collect();
    assert_eq!(keys.first(), Some(&"omnivore"));
    assert_eq!(keys.last(), Some(&"byo"));
}

#[test]
fn test_toppings_sorted_by_index() {
    let mut def = definitions::standard();
    def.toppings.reverse();
    let catalog = build(&def).unwrap();

    let indices: Vec<u32> = catalog.toppings().iter().map(|t| t.index).collect();
    assert_eq!(indices, (0..19).collect::<Vec<u32>>());
    assert_eq!(catalog.topping("mb").unwrap().bake_factor, 2.0);
}

#[test]
fn test_catalog_items_are_shared() {
    let catalog = Catalog::standard().unwrap();
    let garlic = catalog.option(OptionSet::CrustFlavor, "garlic").unwrap();
    let omnivore = catalog.pizza("omnivore").unwrap();
    assert!(std::sync::Arc::ptr_eq(garlic, &omnivore.crust_flavor));
}

#[test]
fn test_dangling_topping_fails_build() {
    let mut def = definitions::standard();
    def.pizzas
        .push(PizzaDef::new("anchovy", "A", "Anchovy", 21).whole(&["anch"]));

    assert_eq!(
        build(&def).unwrap_err(),
        CatalogError::UnknownReference {
            pizza: "anchovy".to_string(),
            set: "topping",
            shortcode: "anch".to_string(),
        }
    );
}

#[test]
fn test_dangling_option_fails_build() {
    let mut def = definitions::standard();
    def.pizzas.push(
        PizzaDef::new("pesto", "Q", "Pesto", 21).option(OptionSet::Sauce, "pesto"),
    );

    assert!(matches!(
        build(&def).unwrap_err(),
        CatalogError::UnknownReference { set: "sauce", .. }
    ));
}

#[test]
fn test_option_from_wrong_set_fails_build() {
    let mut def = definitions::standard();
    // A cheese cannot be used as the dough.
    def.pizzas
        .push(PizzaDef::new("odd", "X", "Odd", 19).option(OptionSet::Dough, "mozz"));

    assert!(matches!(
        build(&def).unwrap_err(),
        CatalogError::UnknownReference { set: "dough", .. }
    ));
}

#[test]
fn test_unknown_rule_fails_build() {
    let mut def = definitions::standard();
    def.toppings[0].option.enable_function_name = "disable_on_anchovy".to_string();

    assert_eq!(
        build(&def).unwrap_err(),
        CatalogError::UnknownRule {
            item: "pepp".to_string(),
            rule: "disable_on_anchovy".to_string(),
        }
    );
}

#[test]
fn test_extra_rule_makes_build_succeed() {
    let mut def = definitions::standard();
    def.toppings[0].option.enable_function_name = "disable_on_anchovy".to_string();

    let mut rules = RuleBook::default();
    rules.register("disable_on_anchovy", Rule::disable_on(["anch"]));
    assert!(Catalog::build(&def, rules).is_ok());
}

#[test]
fn test_duplicates_fail_build() {
    let mut def = definitions::standard();
    let extra = def.toppings[0].clone();
    def.toppings.push(extra);
    assert!(matches!(
        build(&def).unwrap_err(),
        CatalogError::DuplicateToppingIndex { index: 0, .. }
    ));

    let mut def = definitions::standard();
    let mut extra = def.toppings[0].clone();
    extra.index = 99;
    def.toppings.push(extra);
    assert!(matches!(
        build(&def).unwrap_err(),
        CatalogError::DuplicateShortcode { set: "topping", .. }
    ));

    let mut def = definitions::standard();
    let extra = def.cheeses[0].clone();
    def.cheeses.push(extra);
    assert!(matches!(
        build(&def).unwrap_err(),
        CatalogError::DuplicateShortcode { set: "cheese", .. }
    ));

    let mut def = definitions::standard();
    def.pizzas.push(PizzaDef::new("byo", "z", "Again", 19));
    assert_eq!(
        build(&def).unwrap_err(),
        CatalogError::DuplicatePizza("byo".to_string())
    );
}

#[test]
fn test_repeated_topping_fails_build() {
    let mut def = definitions::standard();
    def.pizzas
        .push(PizzaDef::new("double", "D", "Double Pepp", 23).whole(&["pepp", "pepp"]));

    assert_eq!(
        build(&def).unwrap_err(),
        CatalogError::DuplicatePizzaTopping {
            pizza: "double".to_string(),
            shortcode: "pepp".to_string(),
        }
    );
}

#[test]
fn test_self_conflicting_pizza_fails_build() {
    let mut def = definitions::standard();
    def.pizzas
        .push(PizzaDef::new("sprouts", "Y", "Sprouts", 21).whole(&["brussels"]));

    assert_eq!(
        build(&def).unwrap_err(),
        CatalogError::InconsistentPizza {
            pizza: "sprouts".to_string(),
            shortcode: "brussels".to_string(),
        }
    );
}

#[test]
fn test_unplaced_topping_does_not_conflict() {
    let mut def = definitions::standard();
    let mut pizza = PizzaDef::new("sprouts", "Y", "Sprouts", 19);
    pizza.toppings.push((Placement::None, "brussels".to_string()));
    def.pizzas.push(pizza);

    assert!(build(&def).is_ok());
}

#[test]
fn test_option_lookup_by_set_name() {
    let catalog = Catalog::standard().unwrap();
    let white = catalog.option_by_name("sauce", "white").unwrap();
    assert!(std::sync::Arc::ptr_eq(
        white,
        catalog.option(OptionSet::Sauce, "white").unwrap()
    ));
    assert_eq!(
        catalog.option_by_name("crust_flavor", "garlic").unwrap().shortcode(),
        "garlic"
    );
    assert!(catalog.option_by_name("dough", "white").is_none());
    assert!(catalog.option_by_name("glaze", "white").is_none());
}

#[test]
fn test_product_lookup() {
    let mut def = definitions::standard();
    def.salads.push(definitions::ProductDef {
        shortcode: "caesar".to_string(),
        description: "Romaine, parmesan, croutons".to_string(),
        display_name: "Caesar".to_string(),
        price: Decimal::from(9),
    });
    let catalog = build(&def).unwrap();

    assert!(matches!(catalog.product("veggie"), Ok(Product::Pizza(_))));
    assert!(matches!(catalog.product("caesar"), Ok(Product::Plain(_))));
    assert!(catalog.product("calzone").is_err());
}

#[test]
fn test_catalog_availability() {
    let catalog = Catalog::standard().unwrap();
    let sausage = catalog.topping("sausage").unwrap();

    let with_chx = ["chx", "mozz"].into_iter().collect();
    let without = ["pepp", "mozz"].into_iter().collect();
    assert!(!catalog.is_available(&sausage.option, &with_chx));
    assert!(catalog.is_available(&sausage.option, &without));
}
