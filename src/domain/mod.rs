//! Pricing domain
pub mod value_objects;
pub mod services;
pub mod aggregates;
