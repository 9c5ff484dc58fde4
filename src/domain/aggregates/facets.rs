//! Facet option sets for the shop filter sidebar

use serde::Serialize;
use std::collections::BTreeSet;
use crate::{CatalogMap, ProductEntity};

/// Distinct filter values found across a whole catalog. Built once per catalog
/// load and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FacetOptionSet {
    #[serde(rename = "brand")]
    brands: BTreeSet<String>,
    suited: BTreeSet<String>,
    #[serde(rename = "productProperties")]
    properties: BTreeSet<String>,
    targets: BTreeSet<String>,
}

impl FacetOptionSet {
    pub fn brands(&self) -> &BTreeSet<String> { &self.brands }
    pub fn suited(&self) -> &BTreeSet<String> { &self.suited }
    pub fn properties(&self) -> &BTreeSet<String> { &self.properties }
    pub fn targets(&self) -> &BTreeSet<String> { &self.targets }
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty() && self.suited.is_empty() && self.properties.is_empty() && self.targets.is_empty()
    }
}

/// Scans every product of every category once. Malformed categories, empty
/// slots and missing or blank values are skipped.
pub fn build_facets(catalog: &CatalogMap) -> FacetOptionSet {
    let mut builder = FacetSetBuilder::default();
    for (category, entries) in catalog {
        if entries.is_malformed() {
            tracing::debug!(category = %category, "skipping category that is not a product list");
            continue;
        }
        entries.products().for_each(|product| builder.add_product(product));
    }
    let facets = builder.finish();
    tracing::debug!(
        brands = facets.brands.len(),
        suited = facets.suited.len(),
        properties = facets.properties.len(),
        targets = facets.targets.len(),
        "indexed catalog facets"
    );
    facets
}

#[derive(Default)]
struct FacetSetBuilder { facets: FacetOptionSet }

impl FacetSetBuilder {
    fn add_product(&mut self, product: &ProductEntity) {
        insert(&mut self.facets.brands, product.brand.as_deref());
        insert(&mut self.facets.suited, product.suited.as_deref());
        for property in product.product_properties.iter().flatten() {
            insert(&mut self.facets.properties, Some(property.as_str()));
        }
        for target in product.targets.iter().flatten() {
            insert(&mut self.facets.targets, Some(target.as_str()));
        }
    }

    fn finish(self) -> FacetOptionSet { self.facets }
}

fn insert(set: &mut BTreeSet<String>, value: Option<&str>) {
    match value {
        Some(v) if !v.trim().is_empty() && !set.contains(v) => { set.insert(v.to_string()); }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_catalog, CategoryEntries};
    use serde_json::json;

    fn set(values: &[&str]) -> BTreeSet<String> { values.iter().map(|v| v.to_string()).collect() }

    #[test]
    fn test_empty_catalog() {
        assert!(build_facets(&CatalogMap::new()).is_empty());
        assert!(build_facets(&parse_catalog("null").unwrap()).is_empty());
    }

    #[test]
    fn test_tolerates_malformed_catalog() {
        let catalog = parse_catalog(
            &json!({ "cat1": [ { "brand": "A" }, null, { "brand": "" } ], "cat2": "not-a-list" }).to_string(),
        )
        .unwrap();
        let facets = build_facets(&catalog);
        assert_eq!(facets.brands(), &set(&["A"]));
        assert!(facets.suited().is_empty());
        assert!(facets.properties().is_empty());
        assert!(facets.targets().is_empty());
    }

    #[test]
    fn test_dedup_across_categories() {
        let catalog = parse_catalog(
            &json!({
                "skincare": [
                    { "brand": "Somethinc", "suited": "Oily skin", "productProperties": ["Vegan", "Halal"], "targets": ["Acne"] },
                    { "brand": "Somethinc", "suited": "Dry skin", "productProperties": ["Vegan", " "], "targets": null }
                ],
                "bodycare": [
                    { "brand": "Wardah", "suited": "Oily skin", "productProperties": "Vegan", "targets": ["Acne", "Dullness", 3] },
                    { "brand": "Wardah " }
                ]
            })
            .to_string(),
        )
        .unwrap();
        let facets = build_facets(&catalog);
        assert_eq!(facets.brands(), &set(&["Somethinc", "Wardah", "Wardah "]));
        assert_eq!(facets.suited(), &set(&["Oily skin", "Dry skin"]));
        assert_eq!(facets.properties(), &set(&["Vegan", "Halal"]));
        assert_eq!(facets.targets(), &set(&["Acne", "Dullness"]));
    }

    #[test]
    fn test_built_from_constructed_catalog() {
        let mut catalog = CatalogMap::new();
        catalog.insert(
            "makeup".into(),
            CategoryEntries::from(vec![ProductEntity { brand: Some("Emina".into()), ..Default::default() }]),
        );
        catalog.insert("broken".into(), CategoryEntries::Malformed);
        assert_eq!(build_facets(&catalog).brands(), &set(&["Emina"]));
    }

    #[test]
    fn test_serializes_with_filter_keys() {
        let value = serde_json::to_value(FacetOptionSet::default()).unwrap();
        assert_eq!(value, json!({ "brand": [], "suited": [], "productProperties": [], "targets": [] }));
    }
}
