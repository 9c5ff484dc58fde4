//! Storefront Pricing Engine
//!
//! Stateless derivations over loosely structured storefront catalog entries.
//!
//! ## Features
//! - Price string parsing and formatting (single amounts and ranges)
//! - Discount percentages, authored or derived from current vs. original price
//! - Facet option sets (brand, suited, properties, targets) for filter UIs
//! - Lenient catalog decoding from the storefront JSON document

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub mod catalog;
pub mod domain;

pub use catalog::parse_catalog;
pub use domain::aggregates::{build_facets, FacetOptionSet, ProductPricing};
pub use domain::services::{DiscountCalculator, PriceLabel, PriceParser};
pub use domain::value_objects::{DiscountPercent, LocaleError, ParsedMoney, PriceLocale};

// =============================================================================
// Core Types
// =============================================================================

/// A catalog entry as authored by the storefront's data source.
///
/// Every field is optional. Wrong-shaped values in the source document decode
/// to `None` rather than rejecting the product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEntity {
    #[serde(default, deserialize_with = "catalog::lenient::integer")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "catalog::lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "catalog::lenient::text")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "catalog::lenient::text")]
    pub nominal_discount: Option<String>,
    #[serde(default, deserialize_with = "catalog::lenient::text")]
    pub discount_percentage: Option<String>,
    #[serde(default, deserialize_with = "catalog::lenient::text")]
    pub suited: Option<String>,
    #[serde(default, deserialize_with = "catalog::lenient::text")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "catalog::lenient::text_list")]
    pub product_properties: Option<Vec<String>>,
    #[serde(default, deserialize_with = "catalog::lenient::text_list")]
    pub targets: Option<Vec<String>>,
    #[serde(default, deserialize_with = "catalog::lenient::text")]
    pub sales_badge: Option<String>,
}

/// The products listed under one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryEntries {
    /// Display-ordered slots; `None` marks an entry that was not a product.
    Products(Vec<Option<ProductEntity>>),
    /// The category value was not a list.
    Malformed,
}

impl CategoryEntries {
    /// Products in display order, skipping empty slots. Yields nothing for a
    /// malformed category.
    pub fn products(&self) -> impl Iterator<Item = &ProductEntity> {
        let slots: &[Option<ProductEntity>] = match self {
            Self::Products(slots) => slots,
            Self::Malformed => &[],
        };
        slots.iter().flatten()
    }

    pub fn is_malformed(&self) -> bool { matches!(self, Self::Malformed) }
}

impl From<Vec<ProductEntity>> for CategoryEntries {
    fn from(products: Vec<ProductEntity>) -> Self {
        Self::Products(products.into_iter().map(Some).collect())
    }
}

/// Category name to its products. Category order carries no meaning.
pub type CatalogMap = BTreeMap<String, CategoryEntries>;

// =============================================================================
// Error Types
// =============================================================================

/// A price string that could not be read as an amount or a range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price is empty")]
    Empty,

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Invalid price range: {0:?}")]
    InvalidRange(String),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog root must be an object keyed by category name")]
    NotAnObject,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
