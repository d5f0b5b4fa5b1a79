//! Compiled-in menu data.
//!
//! Definitions refer to each other by shortcode only. [`Catalog::build`]
//! resolves those references and rejects any that dangle.
//!
//! [`Catalog::build`]: crate::catalog::Catalog::build

use rust_decimal::Decimal;

use crate::availability::ALWAYS_ENABLE;
use crate::types::{OptionSet, Placement};

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDef {
    pub shortcode: String,
    pub description: String,
    pub display_name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionDef {
    pub product: ProductDef,
    pub enable_function_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToppingDef {
    pub option: OptionDef,
    pub index: u32,
    pub flavor_factor: f64,
    pub bake_factor: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PizzaDef {
    /// Catalog lookup key, e.g. `byo`. Not the product shortcode.
    pub key: String,
    pub product: ProductDef,
    pub toppings: Vec<(Placement, String)>,
    pub crust_flavor: String,
    pub dough: String,
    pub cheese: String,
    pub sauce: String,
}

impl PizzaDef {
    /// A pizza on plain crust, brioche dough, mozzarella and red sauce, no toppings.
    pub fn new(key: &str, shortcode: &str, display_name: &str, price: i64) -> Self {
        Self {
            key: key.to_string(),
            product: product(shortcode, "", display_name, price),
            toppings: Vec::new(),
            crust_flavor: "plain".to_string(),
            dough: "brioche".to_string(),
            cheese: "mozz".to_string(),
            sauce: "red".to_string(),
        }
    }

    pub fn option(mut self, set: OptionSet, shortcode: &str) -> Self {
        let slot = match set {
            OptionSet::CrustFlavor => &mut self.crust_flavor,
            OptionSet::Dough => &mut self.dough,
            OptionSet::Cheese => &mut self.cheese,
            OptionSet::Sauce => &mut self.sauce,
        };
        *slot = shortcode.to_string();
        self
    }

    /// Cover the whole pizza with each of `toppings`, in order.
    pub fn whole(mut self, toppings: &[&str]) -> Self {
        self.toppings
            .extend(toppings.iter().map(|t| (Placement::Whole, t.to_string())));
        self
    }
}

/// Everything the catalog builder needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogDefinition {
    pub toppings: Vec<ToppingDef>,
    pub crust_flavors: Vec<OptionDef>,
    pub doughs: Vec<OptionDef>,
    pub cheeses: Vec<OptionDef>,
    pub sauces: Vec<OptionDef>,
    pub pizzas: Vec<PizzaDef>,
    /// Standalone products. Nothing is on offer yet.
    pub salads: Vec<ProductDef>,
}

impl CatalogDefinition {
    pub fn options(&self, set: OptionSet) -> &[OptionDef] {
        match set {
            OptionSet::CrustFlavor => &self.crust_flavors,
            OptionSet::Dough => &self.doughs,
            OptionSet::Cheese => &self.cheeses,
            OptionSet::Sauce => &self.sauces,
        }
    }
}

fn product(shortcode: &str, description: &str, display_name: &str, price: i64) -> ProductDef {
    ProductDef {
        shortcode: shortcode.to_string(),
        description: description.to_string(),
        display_name: display_name.to_string(),
        price: Decimal::from(price),
    }
}

fn option(rule: &str, shortcode: &str, name: &str, price: i64) -> OptionDef {
    OptionDef {
        product: product(shortcode, name, name, price),
        enable_function_name: rule.to_string(),
    }
}

fn topping(index: u32, rule: &str, shortcode: &str, description: &str, display_name: &str) -> ToppingDef {
    ToppingDef {
        option: OptionDef {
            product: product(shortcode, description, display_name, 2),
            enable_function_name: rule.to_string(),
        },
        index,
        flavor_factor: 1.0,
        bake_factor: 1.0,
    }
}

fn toppings() -> Vec<ToppingDef> {
    let plain = |index, shortcode, name| topping(index, ALWAYS_ENABLE, shortcode, name, name);

    let mut meatball = topping(14, "disable_on_gf", "mb", "Meatball", "Meatball");
    meatball.bake_factor = 2.0;
    meatball.option.product.price = Decimal::from(4);

    vec![
        plain(0, "pepp", "Pepperoni"),
        plain(1, "spin", "Wilted Spinach"),
        plain(2, "jala", "Fresh Jalapeño"),
        plain(3, "mush", "Mushroom"),
        plain(4, "castel", "Castelvetrano Olive"),
        plain(5, "kala", "Kalamata Olive"),
        plain(6, "ro", "Raw Red Onion"),
        plain(7, "co", "Caramelized Onion"),
        plain(8, "shp", "Sweet Hot Pepper"),
        plain(9, "gbp", "Green Bell Pepper"),
        plain(10, "rbp", "Roasted Red Bell Pepper"),
        plain(11, "pine", "Pineapple"),
        topping(
            12,
            "disable_on_pork_sausage",
            "chx",
            "Rosemary Chicken Sausage",
            "Rosemary Chicken Sausage",
        ),
        topping(13, "disable_on_chx", "sausage", "House Sausage (Pork)", "House Sausage"),
        meatball,
        topping(15, "disable_on_red", "brussels", "Brussels Sprout", "Brussels Sprout"),
        plain(16, "bacon", "Candied Bacon"),
        topping(17, ALWAYS_ENABLE, "bleu", "Bleu Cheese", "Bleu"),
        plain(18, "giard", "Hot Giardiniera"),
    ]
}

fn pizzas() -> Vec<PizzaDef> {
    use OptionSet::{CrustFlavor, Sauce};

    vec![
        PizzaDef::new("omnivore", "O", "Omnivore", 29)
            .option(CrustFlavor, "garlic")
            .whole(&["pepp", "sausage", "co", "spin"]),
        PizzaDef::new("four_pepper", "F", "4 Pepper", 29)
            .option(CrustFlavor, "garlic")
            .whole(&["rbp", "gbp", "shp", "jala"]),
        PizzaDef::new("veggie", "V", "Veggie", 27).whole(&["rbp", "co", "mush", "spin"]),
        PizzaDef::new("classic", "C", "Classic", 27).whole(&["sausage", "rbp", "co", "mush"]),
        PizzaDef::new("popeye", "P", "Popeye", 27).whole(&["bleu", "kala", "mush", "spin"]),
        PizzaDef::new("sweet_pete", "S", "Sweet Pete", 27)
            .whole(&["giard", "bacon", "sausage", "pine"]),
        PizzaDef::new("hot_island", "H", "Hot Island", 27)
            .option(CrustFlavor, "garlic")
            .whole(&["sausage", "pine", "jala"]),
        PizzaDef::new("meatza", "M", "Meatza", 25).whole(&["bacon", "sausage", "pepp"]),
        PizzaDef::new("tuscany_raider", "T", "Tuscany Raider", 27)
            .option(Sauce, "white")
            .whole(&["chx", "shp", "spin"]),
        PizzaDef::new("brussels_snout", "R", "Brussels Snout", 27)
            .option(Sauce, "white")
            .whole(&["bacon", "brussels", "co"]),
        PizzaDef::new("blue_pig", "B", "Blue Pig", 23).whole(&["bleu", "bacon"]),
        PizzaDef::new("byo", "z", "Build-Your-Own", 19),
    ]
}

/// The menu served by the order API.
pub fn standard() -> CatalogDefinition {
    CatalogDefinition {
        toppings: toppings(),
        crust_flavors: vec![
            option(ALWAYS_ENABLE, "plain", "Regular", 0),
            option(ALWAYS_ENABLE, "garlic", "Roasted Garlic Crust", 2),
        ],
        doughs: vec![
            option(ALWAYS_ENABLE, "brioche", "Regular", 0),
            option("disable_on_meatball", "gf", "Gluten Free Dough", 0),
        ],
        cheeses: vec![
            option(ALWAYS_ENABLE, "mozz", "Mozzarella Cheese", 0),
            option(ALWAYS_ENABLE, "ex_mozz", "Extra Mozzarella Cheese", 2),
        ],
        sauces: vec![
            option("disable_on_brussels", "red", "Red Sauce", 0),
            option(ALWAYS_ENABLE, "white", "White Sauce", 2),
        ],
        pizzas: pizzas(),
        salads: Vec::new(),
    }
}
