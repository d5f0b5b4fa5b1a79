//! Request bodies accepted by the REST API and their translation into
//! domain values.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pizza_menu::{
    Catalog, ClientData, PizzaCustomization, Placement, Product, ProductQuantity, Selection,
    SelectionError,
};
use serde::Deserialize;

use crate::errors::{ApiError, Result};

pub const DEFAULT_SERVICE: &str = "delivery";

/// `POST /order`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderRequest {
    pub status: Option<String>,
    pub service: Option<String>,
    pub promise_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub products: Vec<ProductLineRequest>,
    #[serde(default)]
    pub client_data: ClientDataRequest,
}

/// `POST /order` sent as `application/x-www-form-urlencoded`. A form carries
/// the order's scalar fields only, so the order has no product lines.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderForm {
    pub status: Option<String>,
    pub service: Option<String>,
    pub promise_time: Option<DateTime<Utc>>,
}

impl From<OrderForm> for CreateOrderRequest {
    fn from(form: OrderForm) -> Self {
        CreateOrderRequest {
            status: form.status,
            service: form.service,
            promise_time: form.promise_time,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductLineRequest {
    /// Pizza key (e.g. `byo`) or standalone product shortcode.
    pub product: String,
    pub quantity: u32,
    pub customization: Option<CustomizationRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomizationRequest {
    pub toppings: Option<Vec<PlacedToppingRequest>>,
    pub crust_flavor: Option<String>,
    pub dough: Option<String>,
    pub cheese: Option<String>,
    pub sauce: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacedToppingRequest {
    pub topping: String,
    #[serde(default = "whole")]
    pub placement: Placement,
}

fn whole() -> Placement {
    Placement::Whole
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientDataRequest {
    pub load_time: Option<DateTime<Utc>>,
    pub submit_time: Option<DateTime<Utc>>,
    pub time_selection_time: Option<DateTime<Utc>>,
    pub user_agent: Option<String>,
}

/// `POST /menu/availability`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityRequest {
    #[serde(default)]
    pub selected: Vec<String>,
}

/// A validated `POST /order` body, ready for the order table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub products: Vec<ProductQuantity>,
    pub status: String,
    pub service: String,
    pub promise_time: Option<DateTime<Utc>>,
    pub client_data: ClientData,
}

impl CreateOrderRequest {
    /// Resolve every product line against `catalog`.
    pub fn into_new_order(self, catalog: &Catalog) -> Result<NewOrder> {
        let status = self
            .status
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApiError::Validation("status is required".to_string()))?;

        let products = self
            .products
            .iter()
            .map(|line| line.resolve(catalog))
            .collect::<std::result::Result<Vec<_>, SelectionError>>()?;

        Ok(NewOrder {
            products,
            status,
            service: self.service.unwrap_or_else(|| DEFAULT_SERVICE.to_string()),
            promise_time: self.promise_time,
            client_data: self.client_data.into(),
        })
    }
}

impl ProductLineRequest {
    fn resolve(&self, catalog: &Catalog) -> std::result::Result<ProductQuantity, SelectionError> {
        if self.quantity == 0 {
            return Err(SelectionError::InvalidQuantity(self.product.clone()));
        }
        let product = match &self.customization {
            None => catalog.product(&self.product)?,
            Some(changes) => {
                if catalog.pizza(&self.product).is_none() {
                    catalog.product(&self.product)?;
                    return Err(SelectionError::NotCustomizable(self.product.clone()));
                }
                let pizza = catalog.customize(&self.product, &changes.clone().into())?;
                Product::Pizza(Arc::new(pizza))
            }
        };
        Ok(ProductQuantity::new(product, self.quantity))
    }
}

impl From<CustomizationRequest> for PizzaCustomization {
    fn from(c: CustomizationRequest) -> Self {
        PizzaCustomization {
            toppings: c.toppings.map(|list| {
                list.into_iter()
                    .map(|t| (t.placement, t.topping))
                    .collect()
            }),
            crust_flavor: c.crust_flavor,
            dough: c.dough,
            cheese: c.cheese,
            sauce: c.sauce,
        }
    }
}

impl From<ClientDataRequest> for ClientData {
    fn from(c: ClientDataRequest) -> Self {
        ClientData {
            load_time: c.load_time,
            submit_time: c.submit_time,
            time_selection_time: c.time_selection_time,
            user_agent: c.user_agent,
        }
    }
}

impl AvailabilityRequest {
    pub fn selection(&self) -> Selection {
        self.selected.iter().map(String::as_str).collect()
    }
}
