//! Facet extraction from a product file.

use anyhow::Result;
use turbo_discovery::FacetExtractor;

use super::FacetsArgs;
use crate::context::Context;
use crate::output::format_price;

/// Run the facets command.
pub async fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let products = ctx.read_products(&args.products)?;
    ctx.output
        .debug(&format!("Loaded {} products from {}", products.len(), args.products));

    let facets = FacetExtractor::new(&ctx.config.discovery.facets).extract(&products);

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        return Ok(());
    }

    ctx.output.header("Brands");
    if facets.brands.is_empty() {
        ctx.output.info("No brands found.");
    }
    for brand in &facets.brands {
        ctx.output
            .list_item(&format!("{} [{}] ({})", brand.name, brand.slug, brand.static_count));
    }

    ctx.output.header("Specifications");
    for spec in &facets.specs {
        let values: Vec<String> = spec
            .values
            .iter()
            .map(|v| format!("{} ({})", v.value, v.static_count))
            .collect();
        ctx.output.kv(&spec.name, &values.join(", "));
    }

    ctx.output.header("Price");
    ctx.output.kv("min", &format_price(facets.price_bounds.min));
    ctx.output.kv("max", &format_price(facets.price_bounds.max));

    Ok(())
}
