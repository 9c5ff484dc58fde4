//! Aggregates module
pub mod facets;
pub mod pricing;

pub use facets::{build_facets, FacetOptionSet};
pub use pricing::ProductPricing;
