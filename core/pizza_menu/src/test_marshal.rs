use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::catalog::Catalog;
use crate::customize::PizzaCustomization;
use crate::marshal::{self, OrderView};
use crate::orders::OrderTable;
use crate::types::{ClientData, Placement, Product, ProductInfo, ProductQuantity};

const PRODUCT_KEYS: &[&str] = &["shortcode", "description", "display_name", "price"];
const OPTION_KEYS: &[&str] = &[
    "shortcode",
    "description",
    "display_name",
    "price",
    "enable_function_name",
];
const TOPPING_KEYS: &[&str] = &[
    "shortcode",
    "description",
    "display_name",
    "price",
    "enable_function_name",
    "flavor_factor",
    "bake_factor",
    "index",
];
const PIZZA_KEYS: &[&str] = &[
    "shortcode",
    "description",
    "display_name",
    "price",
    "toppings",
    "crust_flavor",
    "dough",
    "cheese",
    "sauce",
];

fn keys(value: &Value) -> BTreeSet<&str> {
    value
        .as_object()
        .expect("expected a JSON object")
        .keys()
        .map(String::as_str)
        .collect()
}

fn expected(names: &[&'static str]) -> BTreeSet<&'static str> {
    names.iter().copied().collect()
}

fn assert_pizza_shape(pizza: &Value) {
    assert_eq!(keys(pizza), expected(PIZZA_KEYS));
    for set in ["crust_flavor", "dough", "cheese", "sauce"] {
        assert_eq!(keys(&pizza[set]), expected(OPTION_KEYS), "{set}");
    }
    for placed in pizza["toppings"].as_array().unwrap() {
        assert_eq!(keys(placed), expected(&["topping", "placement"]));
        assert_eq!(keys(&placed["topping"]), expected(TOPPING_KEYS));
    }
}

fn sample_order(table: &OrderTable, catalog: &Catalog) -> crate::types::Order {
    let salad = Arc::new(ProductInfo::new(
        "caesar",
        "Romaine, parmesan, croutons",
        "Caesar",
        Decimal::new(950, 2),
    ));
    let client_data = ClientData {
        load_time: Some(Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap()),
        submit_time: Some(Utc.with_ymd_and_hms(2024, 1, 1, 18, 5, 0).unwrap()),
        time_selection_time: None,
        user_agent: Some("curl/8.5.0".to_string()),
    };
    table.create(
        vec![
            ProductQuantity::new(Product::Pizza(Arc::clone(catalog.pizza("omnivore").unwrap())), 2),
            ProductQuantity::new(Product::Plain(salad), 1),
        ],
        "placed",
        "delivery",
        None,
        client_data,
    )
}

#[test]
fn test_order_has_exactly_the_documented_fields() {
    let catalog = Catalog::standard().unwrap();
    let table = OrderTable::new();
    let order = sample_order(&table, &catalog);

    let value = serde_json::to_value(OrderView::from(&order)).unwrap();
    assert_eq!(
        keys(&value),
        expected(&["o_id", "products", "status", "client_data"])
    );
    assert_eq!(value["o_id"], "1");
    assert_eq!(value["status"], "placed");
    assert_eq!(
        keys(&value["client_data"]),
        expected(&["load_time", "submit_time", "time_selection_time", "user_agent"])
    );
    assert_eq!(value["client_data"]["load_time"], "2024-01-01T18:00:00Z");
    assert_eq!(value["client_data"]["time_selection_time"], Value::Null);

    let lines = value["products"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    for line in lines {
        assert_eq!(keys(line), expected(&["quantity", "product"]));
    }
}

#[test]
fn test_line_product_dispatches_on_kind() {
    let catalog = Catalog::standard().unwrap();
    let table = OrderTable::new();
    let order = sample_order(&table, &catalog);

    let value = serde_json::to_value(OrderView::from(&order)).unwrap();
    let pizza_line = &value["products"][0];
    let salad_line = &value["products"][1];

    assert_eq!(pizza_line["quantity"], 2);
    assert_pizza_shape(&pizza_line["product"]);
    assert_eq!(pizza_line["product"]["shortcode"], "O");
    assert_eq!(pizza_line["product"]["price"], 29.0);

    assert_eq!(keys(&salad_line["product"]), expected(PRODUCT_KEYS));
    assert_eq!(salad_line["product"]["price"], 9.5);
}

#[test]
fn test_topping_and_option_lines() {
    let catalog = Catalog::standard().unwrap();
    let table = OrderTable::new();
    let order = table.create(
        vec![
            ProductQuantity::new(Product::Topping(Arc::clone(catalog.topping("mb").unwrap())), 1),
            ProductQuantity::new(
                Product::MenuOption(Arc::clone(
                    catalog
                        .option(crate::types::OptionSet::Cheese, "ex_mozz")
                        .unwrap(),
                )),
                1,
            ),
        ],
        "placed",
        "pickup",
        None,
        ClientData::default(),
    );

    let value = serde_json::to_value(OrderView::from(&order)).unwrap();
    let topping = &value["products"][0]["product"];
    assert_eq!(keys(topping), expected(TOPPING_KEYS));
    assert_eq!(topping["index"], 14);
    assert_eq!(topping["bake_factor"], 2.0);
    assert_eq!(topping["enable_function_name"], "disable_on_gf");

    let option = &value["products"][1]["product"];
    assert_eq!(keys(option), expected(OPTION_KEYS));
}

#[test]
fn test_unplaced_toppings_are_not_emitted() {
    let catalog = Catalog::standard().unwrap();
    let mut pizza = (**catalog.pizza("byo").unwrap()).clone();
    pizza.toppings = vec![
        crate::types::PlacedTopping::new(Placement::None, Arc::clone(catalog.topping("pepp").unwrap())),
        crate::types::PlacedTopping::new(Placement::Right, Arc::clone(catalog.topping("mush").unwrap())),
    ];

    let value = serde_json::to_value(marshal::PizzaView::from(&pizza)).unwrap();
    let toppings = value["toppings"].as_array().unwrap();
    assert_eq!(toppings.len(), 1);
    assert_eq!(toppings[0]["placement"], "RIGHT");
    assert_eq!(toppings[0]["topping"]["shortcode"], "mush");
}

#[test]
fn test_menu_lists_build_your_own() {
    let catalog = Catalog::standard().unwrap();
    let value = serde_json::to_value(marshal::menu(&catalog)).unwrap();

    assert_eq!(keys(&value), expected(&["pizza", "salad"]));
    assert_eq!(value["salad"], json!([]));

    let pizzas = value["pizza"].as_array().unwrap();
    assert_eq!(pizzas.len(), 12);
    pizzas.iter().for_each(assert_pizza_shape);

    let byo = pizzas.iter().find(|p| p["shortcode"] == "z").unwrap();
    assert_eq!(byo["display_name"], "Build-Your-Own");
    assert_eq!(byo["price"], 19.0);
    assert_eq!(byo["toppings"], json!([]));
    assert_eq!(byo["crust_flavor"]["shortcode"], "plain");
    assert_eq!(byo["dough"]["shortcode"], "brioche");
    assert_eq!(byo["cheese"]["shortcode"], "mozz");
    assert_eq!(byo["sauce"]["shortcode"], "red");
}

#[test]
fn test_menu_placement_names() {
    let catalog = Catalog::standard().unwrap();
    let value = serde_json::to_value(marshal::menu(&catalog)).unwrap();

    let omnivore = &value["pizza"][0];
    assert_eq!(omnivore["display_name"], "Omnivore");
    assert_eq!(omnivore["toppings"][0]["placement"], "WHOLE");
    assert_eq!(omnivore["toppings"][0]["topping"]["shortcode"], "pepp");
    assert_eq!(omnivore["toppings"][0]["topping"]["index"], 0);
}

#[test]
fn test_customized_pizza_line_carries_computed_price() {
    let catalog = Catalog::standard().unwrap();
    let changes = PizzaCustomization {
        toppings: Some(vec![(Placement::Left, "bacon".to_string())]),
        cheese: Some("ex_mozz".to_string()),
        ..Default::default()
    };
    let pizza = catalog.customize("byo", &changes).unwrap();
    let table = OrderTable::new();
    let order = table.create(
        vec![ProductQuantity::new(Product::Pizza(Arc::new(pizza)), 1)],
        "placed",
        "delivery",
        None,
        ClientData::default(),
    );

    let value = serde_json::to_value(OrderView::from(&order)).unwrap();
    let product = &value["products"][0]["product"];
    assert_eq!(product["price"], 23.0);
    assert_eq!(product["cheese"]["shortcode"], "ex_mozz");
    assert_eq!(product["toppings"][0]["placement"], "LEFT");
}

#[test]
fn test_options_view() {
    let catalog = Catalog::standard().unwrap();
    let value = serde_json::to_value(marshal::options(&catalog)).unwrap();

    assert_eq!(
        keys(&value),
        expected(&["toppings", "crust_flavor", "dough", "cheese", "sauce"])
    );
    let toppings = value["toppings"].as_array().unwrap();
    assert_eq!(toppings.len(), 19);
    assert_eq!(toppings[18]["shortcode"], "giard");
    assert_eq!(keys(&value["sauce"][0]), expected(OPTION_KEYS));
}

#[test]
fn test_availability_view() {
    let catalog = Catalog::standard().unwrap();
    let selection = ["chx", "gf"].into_iter().collect();
    let value = serde_json::to_value(marshal::availability(&catalog, &selection)).unwrap();

    assert_eq!(value["toppings"]["sausage"], false);
    assert_eq!(value["toppings"]["mb"], false);
    assert_eq!(value["toppings"]["pepp"], true);
    assert_eq!(value["dough"]["gf"], true);
    assert_eq!(value["sauce"]["red"], true);
}
