//! One predictive search round against the catalog API.

use std::sync::Arc;

use anyhow::{bail, Result};
use serde_json::json;
use turbo_discovery::{PredictiveSearch, SearchKey, UiAction};

use super::SearchArgs;
use crate::context::Context;
use crate::output::format_price;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.discovery.search.clone();
    if args.immediate {
        config.debounce_ms = 0;
    }

    let api = Arc::new(ctx.catalog());
    ctx.output
        .debug(&format!("Searching {} for '{}'", ctx.config.api.base_url, args.text));

    let mut search = PredictiveSearch::new(api, config);
    search.input(args.text.as_str());
    search.settle().await;

    let session = search.session();
    if !session.open {
        bail!(
            "Query '{}' is shorter than {} characters",
            args.text.trim(),
            ctx.config.discovery.search.min_query_len
        );
    }
    if let Some(error) = &session.error {
        ctx.output.warn(&format!("Search failed, showing query only: {}", error));
    }

    let mut navigation = None;
    if let Some(row) = args.select {
        if row == 0 || row > session.row_count() {
            bail!("Row {} is out of range (1-{})", row, session.row_count());
        }
        for _ in 0..row {
            search.key(SearchKey::Down);
        }
        navigation = search.key(SearchKey::Enter).into_iter().find_map(|action| match action {
            UiAction::Navigate(target) => Some(target),
            UiAction::ReleaseFocus => None,
        });
    }

    let session = search.session();
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "session": session,
            "navigation": navigation.as_ref().map(|n| json!({ "target": n, "href": n.href() })),
        }));
        return Ok(());
    }

    ctx.output.header("Suggestions");
    for suggestion in &session.suggestions {
        match suggestion.count {
            Some(count) => ctx.output.list_item(&format!("{} ({})", suggestion.label, count)),
            None => ctx.output.list_item(&suggestion.label),
        }
    }

    if !session.products.is_empty() {
        ctx.output.header("Products");
        for product in &session.products {
            ctx.output.list_item(&format!(
                "{} - {}",
                product.name,
                format_price(product.effective_price())
            ));
        }
    }

    if let Some(target) = navigation {
        ctx.output.success(&format!("Navigate to {}", target.href()));
    }

    Ok(())
}
