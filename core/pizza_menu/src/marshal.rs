//! # Marshaling
//!
//! Borrowed view structs that fix the JSON shape of every domain type. Each
//! view lists its output fields explicitly; richer views flatten the simpler
//! one they extend.
//!
//! | Entity          | Emitted fields                                                       |
//! |-----------------|----------------------------------------------------------------------|
//! | Product         | `shortcode`, `description`, `display_name`, `price`                  |
//! | Option          | Product + `enable_function_name`                                     |
//! | Topping         | Option + `flavor_factor`, `bake_factor`, `index`                     |
//! | PlacedTopping   | `topping`, `placement`                                               |
//! | Pizza           | Product + `toppings`, `crust_flavor`, `dough`, `cheese`, `sauce`     |
//! | ProductQuantity | `quantity`, `product`                                                |
//! | ClientData      | `load_time`, `submit_time`, `time_selection_time`, `user_agent`      |
//! | Order           | `o_id`, `products`, `status`, `client_data`                          |
//!
//! An order line's product is dispatched on its [`Product`] variant, so a pizza
//! line carries the pizza fields and a plain product only the base fields.
//! Toppings placed as `NONE` are left out.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::types::{
    ClientData, MenuOption, OptionSet, Order, Pizza, PlacedTopping, Product, ProductInfo,
    ProductQuantity, Selection, Topping,
};

#[derive(Debug, Serialize)]
pub struct ProductView<'a> {
    pub shortcode: &'a str,
    pub description: &'a str,
    pub display_name: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl<'a> From<&'a ProductInfo> for ProductView<'a> {
    fn from(p: &'a ProductInfo) -> Self {
        Self {
            shortcode: &p.shortcode,
            description: &p.description,
            display_name: &p.display_name,
            price: p.price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OptionView<'a> {
    #[serde(flatten)]
    pub product: ProductView<'a>,
    pub enable_function_name: &'a str,
}

impl<'a> From<&'a MenuOption> for OptionView<'a> {
    fn from(o: &'a MenuOption) -> Self {
        Self {
            product: ProductView::from(&o.product),
            enable_function_name: &o.enable_function_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToppingView<'a> {
    #[serde(flatten)]
    pub option: OptionView<'a>,
    pub flavor_factor: f64,
    pub bake_factor: f64,
    pub index: u32,
}

impl<'a> From<&'a Topping> for ToppingView<'a> {
    fn from(t: &'a Topping) -> Self {
        Self {
            option: OptionView::from(&t.option),
            flavor_factor: t.flavor_factor,
            bake_factor: t.bake_factor,
            index: t.index,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlacedToppingView<'a> {
    pub topping: ToppingView<'a>,
    pub placement: &'static str,
}

impl<'a> From<&'a PlacedTopping> for PlacedToppingView<'a> {
    fn from(t: &'a PlacedTopping) -> Self {
        Self {
            topping: ToppingView::from(&*t.topping),
            placement: t.placement.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PizzaView<'a> {
    #[serde(flatten)]
    pub product: ProductView<'a>,
    pub toppings: Vec<PlacedToppingView<'a>>,
    pub crust_flavor: OptionView<'a>,
    pub dough: OptionView<'a>,
    pub cheese: OptionView<'a>,
    pub sauce: OptionView<'a>,
}

impl<'a> From<&'a Pizza> for PizzaView<'a> {
    fn from(p: &'a Pizza) -> Self {
        Self {
            product: ProductView::from(&p.product),
            toppings: p.placed_toppings().map(PlacedToppingView::from).collect(),
            crust_flavor: OptionView::from(&*p.crust_flavor),
            dough: OptionView::from(&*p.dough),
            cheese: OptionView::from(&*p.cheese),
            sauce: OptionView::from(&*p.sauce),
        }
    }
}

/// An order line's product, shaped by its concrete kind.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnyProductView<'a> {
    Plain(ProductView<'a>),
    MenuOption(OptionView<'a>),
    Topping(ToppingView<'a>),
    Pizza(PizzaView<'a>),
}

impl<'a> From<&'a Product> for AnyProductView<'a> {
    fn from(p: &'a Product) -> Self {
        match p {
            Product::Plain(info) => Self::Plain(ProductView::from(&**info)),
            Product::MenuOption(option) => Self::MenuOption(OptionView::from(&**option)),
            Product::Topping(topping) => Self::Topping(ToppingView::from(&**topping)),
            Product::Pizza(pizza) => Self::Pizza(PizzaView::from(&**pizza)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductQuantityView<'a> {
    pub quantity: u32,
    pub product: AnyProductView<'a>,
}

impl<'a> From<&'a ProductQuantity> for ProductQuantityView<'a> {
    fn from(pq: &'a ProductQuantity) -> Self {
        Self {
            quantity: pq.quantity,
            product: AnyProductView::from(&pq.product),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClientDataView<'a> {
    pub load_time: Option<DateTime<Utc>>,
    pub submit_time: Option<DateTime<Utc>>,
    pub time_selection_time: Option<DateTime<Utc>>,
    pub user_agent: Option<&'a str>,
}

impl<'a> From<&'a ClientData> for ClientDataView<'a> {
    fn from(c: &'a ClientData) -> Self {
        Self {
            load_time: c.load_time,
            submit_time: c.submit_time,
            time_selection_time: c.time_selection_time,
            user_agent: c.user_agent.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderView<'a> {
    pub o_id: &'a str,
    pub products: Vec<ProductQuantityView<'a>>,
    pub status: &'a str,
    pub client_data: ClientDataView<'a>,
}

impl<'a> From<&'a Order> for OrderView<'a> {
    fn from(o: &'a Order) -> Self {
        Self {
            o_id: &o.id,
            products: o.products.iter().map(ProductQuantityView::from).collect(),
            status: &o.status,
            client_data: ClientDataView::from(&o.client_data),
        }
    }
}

/// Body of `GET /menu`.
#[derive(Debug, Serialize)]
pub struct MenuView<'a> {
    pub pizza: Vec<PizzaView<'a>>,
    pub salad: Vec<ProductView<'a>>,
}

pub fn menu(catalog: &Catalog) -> MenuView<'_> {
    MenuView {
        pizza: catalog.pizzas().map(|(_, p)| PizzaView::from(&**p)).collect(),
        salad: catalog.salads().iter().map(|s| ProductView::from(&**s)).collect(),
    }
}

/// Every topping and option a custom pizza can be built from.
#[derive(Debug, Serialize)]
pub struct OptionsView<'a> {
    pub toppings: Vec<ToppingView<'a>>,
    pub crust_flavor: Vec<OptionView<'a>>,
    pub dough: Vec<OptionView<'a>>,
    pub cheese: Vec<OptionView<'a>>,
    pub sauce: Vec<OptionView<'a>>,
}

pub fn options(catalog: &Catalog) -> OptionsView<'_> {
    let set = |s: OptionSet| {
        catalog
            .options(s)
            .iter()
            .map(|o| OptionView::from(&**o))
            .collect::<Vec<_>>()
    };
    OptionsView {
        toppings: catalog.toppings().iter().map(|t| ToppingView::from(&**t)).collect(),
        crust_flavor: set(OptionSet::CrustFlavor),
        dough: set(OptionSet::Dough),
        cheese: set(OptionSet::Cheese),
        sauce: set(OptionSet::Sauce),
    }
}

/// Which toppings and options may still be chosen, keyed by shortcode.
#[derive(Debug, Serialize)]
pub struct AvailabilityView<'a> {
    pub toppings: BTreeMap<&'a str, bool>,
    pub crust_flavor: BTreeMap<&'a str, bool>,
    pub dough: BTreeMap<&'a str, bool>,
    pub cheese: BTreeMap<&'a str, bool>,
    pub sauce: BTreeMap<&'a str, bool>,
}

pub fn availability<'a>(catalog: &'a Catalog, selection: &Selection) -> AvailabilityView<'a> {
    let set = |s: OptionSet| {
        catalog
            .options(s)
            .iter()
            .map(|o| (o.shortcode(), catalog.is_available(o, selection)))
            .collect::<BTreeMap<_, _>>()
    };
    AvailabilityView {
        toppings: catalog
            .toppings()
            .iter()
            .map(|t| (t.shortcode(), catalog.is_available(&t.option, selection)))
            .collect(),
        crust_flavor: set(OptionSet::CrustFlavor),
        dough: set(OptionSet::Dough),
        cheese: set(OptionSet::Cheese),
        sauce: set(OptionSet::Sauce),
    }
}
