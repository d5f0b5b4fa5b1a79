//! Error types for catalog construction, pizza customization and order lookup.

use thiserror::Error;

/// A catalog definition that cannot be assembled into a consistent menu.
///
/// These are configuration errors: they surface while the catalog is built at
/// startup and are never produced while serving requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("pizza '{pizza}' references unknown {set} '{shortcode}'")]
    UnknownReference {
        pizza: String,
        set: &'static str,
        shortcode: String,
    },

    #[error("'{item}' uses unknown availability rule '{rule}'")]
    UnknownRule { item: String, rule: String },

    #[error("duplicate {set} shortcode '{shortcode}'")]
    DuplicateShortcode { set: &'static str, shortcode: String },

    #[error("duplicate topping index {index} ('{shortcode}')")]
    DuplicateToppingIndex { index: u32, shortcode: String },

    #[error("duplicate pizza key '{0}'")]
    DuplicatePizza(String),

    #[error("pizza '{pizza}' lists topping '{shortcode}' more than once")]
    DuplicatePizzaTopping { pizza: String, shortcode: String },

    #[error("pizza '{pizza}' selects '{shortcode}', which its own selection disables")]
    InconsistentPizza { pizza: String, shortcode: String },
}

/// A caller-supplied selection that the catalog rejects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown product '{0}'")]
    UnknownProduct(String),

    #[error("unknown {set} '{shortcode}'")]
    UnknownItem {
        set: &'static str,
        shortcode: String,
    },

    #[error("topping '{0}' is listed more than once")]
    DuplicateTopping(String),

    #[error("'{0}' is not available with the current selection")]
    Unavailable(String),

    #[error("product '{0}' cannot be customized")]
    NotCustomizable(String),

    #[error("quantity for '{0}' must be at least 1")]
    InvalidQuantity(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Order table failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("order '{0}' not found")]
    NotFound(String),
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
