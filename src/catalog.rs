//! Catalog document decoding
//!
//! The storefront catalog arrives as `{ "<category>": [ {product}, ... ] }`
//! from a source that is not fully trusted. Decoding never rejects a product
//! or a category for its shape: wrong-shaped fields become `None`, non-object
//! list entries become empty slots, and non-list categories are kept as
//! [`CategoryEntries::Malformed`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use crate::{CatalogError, CatalogMap, CategoryEntries, ProductEntity, Result};

pub fn parse_catalog(json: &str) -> Result<CatalogMap> {
    match serde_json::from_str::<Value>(json)? {
        Value::Null => Ok(CatalogMap::new()),
        Value::Object(categories) => Ok(categories
            .into_iter()
            .map(|(name, value)| (name, CategoryEntries::from_value(value)))
            .collect()),
        _ => Err(CatalogError::NotAnObject),
    }
}

impl CategoryEntries {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Products(items.into_iter().map(product_from_value).collect()),
            other => {
                tracing::debug!(kind = value_kind(&other), "category value is not a list");
                Self::Malformed
            }
        }
    }
}

impl<'de> Deserialize<'de> for CategoryEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

fn product_from_value(value: Value) -> Option<ProductEntity> {
    if !value.is_object() {
        tracing::debug!(kind = value_kind(&value), "skipping catalog entry that is not a product");
        return None;
    }
    serde_json::from_value(value)
        .map_err(|e| tracing::debug!(error = %e, "skipping undecodable product"))
        .ok()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Field decoders that map wrong-shaped values to `None`.
pub(crate) mod lenient {
    use super::*;

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn text_list<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<Vec<String>>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        })
    }

    pub fn integer<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<i64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_catalog_shapes() {
        assert!(parse_catalog("null").unwrap().is_empty());
        assert!(parse_catalog("{}").unwrap().is_empty());
        assert!(matches!(parse_catalog("[]"), Err(CatalogError::NotAnObject)));
        assert!(matches!(parse_catalog("{ nope"), Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_malformed_entries_are_kept_as_gaps() {
        let catalog = parse_catalog(&json!({ "a": [ { "id": 1 }, null, "text", [1, 2] ], "b": 5 }).to_string()).unwrap();
        assert_eq!(catalog["a"], CategoryEntries::Products(vec![
            Some(ProductEntity { id: Some(1), ..Default::default() }),
            None,
            None,
            None,
        ]));
        assert!(catalog["b"].is_malformed());
    }

    #[test]
    fn test_lenient_fields() {
        let product: ProductEntity = serde_json::from_value(json!({
            "id": "17",
            "name": "Serum",
            "price": 150000,
            "nominalDiscount": null,
            "discountPercentage": { "value": 10 },
            "brand": ["not", "a", "string"],
            "productProperties": ["Vegan", 1, null, "Halal"],
            "targets": "Acne",
            "salesBadge": "10RB+ terjual",
            "gallery": ["ignored.jpg"]
        }))
        .unwrap();
        assert_eq!(product.id, Some(17));
        assert_eq!(product.name.as_deref(), Some("Serum"));
        assert_eq!(product.price.as_deref(), Some("150000"));
        assert_eq!(product.nominal_discount, None);
        assert_eq!(product.discount_percentage, None);
        assert_eq!(product.brand, None);
        assert_eq!(product.product_properties, Some(vec!["Vegan".to_string(), "Halal".to_string()]));
        assert_eq!(product.targets, None);
        assert_eq!(product.sales_badge.as_deref(), Some("10RB+ terjual"));
    }

    #[test]
    fn test_category_entries_deserialize() {
        let entries: CategoryEntries = serde_json::from_value(json!("oops")).unwrap();
        assert!(entries.is_malformed());
        let entries: CategoryEntries = serde_json::from_value(json!([{ "brand": "A" }])).unwrap();
        assert_eq!(entries.products().count(), 1);
    }
}
