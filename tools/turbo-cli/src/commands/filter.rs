//! Local filtering of a product file by a URL query.

use anyhow::{bail, Result};
use serde_json::json;
use turbo_discovery::{DiscoveryPage, FilterStateCodec};

use super::FilterArgs;
use crate::context::Context;
use crate::output::{format_price, option_label};

/// Run the filter command.
pub async fn run(args: FilterArgs, ctx: &Context) -> Result<()> {
    let products = ctx.read_products(&args.products)?;
    let query = edit_query(&args.query, &args.set, &args.remove)?;

    let mut page = DiscoveryPage::from_url(&query, ctx.config.discovery.clone());
    page.set_corpus(products);

    for slug in FilterStateCodec::ambiguous_brands(page.filter()) {
        ctx.output
            .warn(&format!("Brand '{}' contains a comma and will not round-trip", slug));
    }

    let filtered = page.filtered_products();
    let live = page.live_facets(&filtered);
    let canonical = page.query_string();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "query": canonical,
            "filter": page.filter(),
            "total": filtered.len(),
            "products": filtered.iter().take(args.limit).collect::<Vec<_>>(),
            "facets": live,
        }));
        return Ok(());
    }

    ctx.output.kv("query", if canonical.is_empty() { "(none)" } else { canonical.as_str() });
    ctx.output.kv("active filters", &page.filter().active_filter_count().to_string());

    ctx.output.header("Brands");
    for brand in &live.brands {
        ctx.output.list_item(&option_label(
            &brand.name,
            brand.count,
            brand.selected,
            brand.disabled,
        ));
    }

    for spec in &live.specs {
        ctx.output.header(&spec.name);
        for value in &spec.values {
            ctx.output.list_item(&option_label(
                &value.value,
                value.count,
                value.selected,
                value.disabled,
            ));
        }
    }

    ctx.output.header(&format!("Products ({})", filtered.len()));
    ctx.output.table_row(&["ID", "NAME", "PRICE"], &[16, 40, 10]);
    for product in filtered.iter().take(args.limit) {
        let price = format_price(product.effective_price());
        ctx.output.table_row(
            &[product.id.as_str(), product.name.as_str(), price.as_str()],
            &[16, 40, 10],
        );
    }

    Ok(())
}

/// Apply `--set` and `--remove` edits to a query string.
fn edit_query(query: &str, set: &[String], remove: &[String]) -> Result<String> {
    let mut query = query.trim_start_matches('?').to_string();
    for pair in set {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Expected KEY=VALUE, got '{}'", pair);
        };
        query = FilterStateCodec::set_param(&query, key, value);
    }
    for key in remove {
        query = FilterStateCodec::remove_param(&query, key);
    }
    Ok(query)
}
