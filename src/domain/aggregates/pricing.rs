//! Display-ready pricing for product cards and detail pages

use serde::Serialize;
use crate::domain::services::{DiscountCalculator, PriceLabel};
use crate::domain::value_objects::DiscountPercent;
use crate::ProductEntity;

/// Everything a product card or detail view needs to show the price block.
/// Derived fresh from the entity on every call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductPricing {
    pub product_id: Option<i64>,
    pub price: String,
    pub price_label: PriceLabel,
    pub original_price: Option<String>,
    pub original_price_label: Option<PriceLabel>,
    pub discount_percent: Option<DiscountPercent>,
    pub sales_badge: Option<String>,
}

impl ProductPricing {
    pub fn derive(product: &ProductEntity, calculator: &DiscountCalculator) -> Self {
        let parser = calculator.parser();
        let raw_price = product.price.as_deref().unwrap_or_default();
        let original = product.nominal_discount.as_deref().filter(|_| has_original_price(product));
        Self {
            product_id: product.id,
            price: parser.format(raw_price),
            price_label: parser.split_prefix(raw_price),
            original_price: original.map(|o| parser.format(o)),
            original_price_label: original.map(|o| parser.split_prefix(o)),
            discount_percent: calculator.discount_percent(product),
            sales_badge: sales_badge(product).map(str::to_string),
        }
    }
}

pub fn has_original_price(product: &ProductEntity) -> bool {
    product.nominal_discount.as_deref().is_some_and(|o| !o.trim().is_empty())
}

pub fn has_sales_badge(product: &ProductEntity) -> bool { sales_badge(product).is_some() }

fn sales_badge(product: &ProductEntity) -> Option<&str> {
    product.sales_badge.as_deref().map(str::trim).filter(|b| !b.is_empty())
}
