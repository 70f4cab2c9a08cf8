//! Wishlist management over the configured file store.

use anyhow::Result;
use turbo_cache::Wishlist;
use turbo_catalog::ProductId;

use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    let wishlist = Wishlist::new(ctx.store()?);

    match args.command {
        Some(WishlistCommand::List) | None => list(&wishlist, ctx),
        Some(WishlistCommand::Add { id }) => {
            if wishlist.add(ProductId::new(id.clone()))? {
                ctx.output.success(&format!("Added {}", id));
            } else {
                ctx.output.info(&format!("{} is already in the wishlist", id));
            }
            Ok(())
        }
        Some(WishlistCommand::Remove { id }) => {
            if wishlist.remove(&ProductId::new(id.clone()))? {
                ctx.output.success(&format!("Removed {}", id));
            } else {
                ctx.output.info(&format!("{} is not in the wishlist", id));
            }
            Ok(())
        }
        Some(WishlistCommand::Toggle { id }) => {
            let added = wishlist.toggle(ProductId::new(id.clone()))?;
            ctx.output.success(&format!(
                "{} {}",
                if added { "Added" } else { "Removed" },
                id
            ));
            Ok(())
        }
        Some(WishlistCommand::Clear) => {
            wishlist.clear()?;
            ctx.output.success("Wishlist cleared");
            Ok(())
        }
    }
}

fn list<S: turbo_cache::KeyValueStore>(wishlist: &Wishlist<S>, ctx: &Context) -> Result<()> {
    let items = wishlist.items()?;

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    if items.is_empty() {
        ctx.output.info("Wishlist is empty.");
        return Ok(());
    }

    ctx.output.header(&format!("Wishlist ({})", items.len()));
    for id in &items {
        ctx.output.list_item(id.as_str());
    }
    Ok(())
}
