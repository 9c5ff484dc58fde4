//! Catalog report - facet options and display pricing for a storefront catalog file

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use storefront_pricing::{build_facets, parse_catalog, DiscountCalculator, FacetOptionSet, PriceLocale, PriceParser, ProductPricing};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Serialize)]
struct CatalogReport { facets: FacetOptionSet, pricing: BTreeMap<String, Vec<ProductPricing>> }

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)).init();

    let path = std::env::args().nth(1).or_else(|| std::env::var("CATALOG_PATH").ok())
        .context("usage: catalog-report <catalog.json> (or set CATALOG_PATH)")?;
    let locale = PriceLocale::from_env().context("invalid price locale configuration")?;
    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading catalog {path}"))?;
    let catalog = parse_catalog(&raw).with_context(|| format!("decoding catalog {path}"))?;

    let facets = build_facets(&catalog);
    let calculator = DiscountCalculator::new(PriceParser::new(locale));
    let pricing: BTreeMap<String, Vec<ProductPricing>> = catalog.iter()
        .filter(|(_, entries)| !entries.is_malformed())
        .map(|(name, entries)| (name.clone(), entries.products().map(|p| ProductPricing::derive(p, &calculator)).collect()))
        .collect();

    let products: usize = pricing.values().map(Vec::len).sum();
    let discounted = pricing.values().flatten().filter(|p| p.discount_percent.is_some()).count();
    tracing::info!(categories = pricing.len(), products, discounted, brands = facets.brands().len(), "📦 catalog report for {}", path);

    println!("{}", serde_json::to_string_pretty(&CatalogReport { facets, pricing })?);
    Ok(())
}
