//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Path, Request, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use pizza_menu::{marshal, Catalog, OrderTable};
use serde::{de::DeserializeOwned, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::errors::{ApiError, Result};
use crate::requests::{AvailabilityRequest, CreateOrderRequest, OrderForm};

pub struct ApiState {
    pub catalog: Catalog,
    pub orders: OrderTable,
}

impl ApiState {
    pub fn new(catalog: Catalog) -> Self {
        ApiState {
            catalog,
            orders: OrderTable::new(),
        }
    }
}

pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/order", post(create_order))
        .route("/order/:id", get(get_order))
        .route("/menu", get(get_menu))
        .route("/menu/options", get(get_menu_options))
        .route("/menu/availability", post(post_availability))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

// ─────────────────────────────────────────────────────────
// Request bodies
// ─────────────────────────────────────────────────────────

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

async fn json_body<T: DeserializeOwned>(request: Request) -> Result<T> {
    let Json(body) = Json::<T>::from_request(request, &()).await.map_err(|e| {
        debug!(error = %e, "rejected JSON body");
        ApiError::Validation(e.body_text())
    })?;
    Ok(body)
}

async fn form_body<T: DeserializeOwned>(request: Request) -> Result<T> {
    let Form(body) = Form::<T>::from_request(request, &()).await.map_err(|e| {
        debug!(error = %e, "rejected form body");
        ApiError::Validation(e.body_text())
    })?;
    Ok(body)
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /order/:id`
pub async fn get_order(
    State(state): State<Arc<ApiState>>,
    Path(order_id): Path<String>,
) -> Result<Response> {
    let order = state.orders.get(&order_id)?;
    Ok(Json(marshal::OrderView::from(&order)).into_response())
}

/// `POST /order`
///
/// Accepts a JSON body, or a form with `status`, `service` and
/// `promise_time`. Stores the order and echoes it back with its assigned
/// `o_id`.
pub async fn create_order(
    State(state): State<Arc<ApiState>>,
    request: Request,
) -> Result<Response> {
    let body: CreateOrderRequest = if is_form(request.headers()) {
        form_body::<OrderForm>(request).await?.into()
    } else {
        json_body(request).await?
    };

    let new_order = body
        .into_new_order(&state.catalog)
        .inspect_err(|e| debug!(error = %e, "rejected order"))?;

    let order = state.orders.create(
        new_order.products,
        new_order.status,
        new_order.service,
        new_order.promise_time,
        new_order.client_data,
    );

    Ok(Json(marshal::OrderView::from(&order)).into_response())
}

/// `GET /menu`
pub async fn get_menu(State(state): State<Arc<ApiState>>) -> Response {
    Json(marshal::menu(&state.catalog)).into_response()
}

/// `GET /menu/options`
///
/// Every topping and base option, for clients that assemble their own pizza.
pub async fn get_menu_options(State(state): State<Arc<ApiState>>) -> Response {
    Json(marshal::options(&state.catalog)).into_response()
}

/// `POST /menu/availability`
pub async fn post_availability(
    State(state): State<Arc<ApiState>>,
    request: Request,
) -> Result<Response> {
    let body: AvailabilityRequest = json_body(request).await?;
    let selection = body.selection();
    Ok(Json(marshal::availability(&state.catalog, &selection)).into_response())
}
