//! Services module
pub mod price_parser;
pub mod discount;

pub use price_parser::{PriceLabel, PriceParser};
pub use discount::DiscountCalculator;
