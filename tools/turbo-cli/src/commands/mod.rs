//! CLI command implementations.

pub mod facets;
pub mod filter;
pub mod search;
pub mod wishlist;

use clap::{Args, Subcommand};

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    /// Product JSON file (array, page, or API envelope).
    #[arg(short, long)]
    pub products: String,
}

/// Arguments for the filter command.
#[derive(Args)]
pub struct FilterArgs {
    /// Product JSON file (array, page, or API envelope).
    #[arg(short, long)]
    pub products: String,

    /// URL query string to start from.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Set a parameter (KEY=VALUE); repeatable. Resets the page.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Remove a parameter; repeatable. Resets the page.
    #[arg(long = "remove", value_name = "KEY")]
    pub remove: Vec<String>,

    /// Maximum number of matching products to list.
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Text typed into the search box.
    pub text: String,

    /// Highlight this dropdown row (1-based) and press Enter.
    #[arg(long)]
    pub select: Option<usize>,

    /// Skip the debounce delay.
    #[arg(long)]
    pub immediate: bool,
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: Option<WishlistCommand>,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// List wishlisted product ids
    List,
    /// Add a product
    Add { id: String },
    /// Remove a product
    Remove { id: String },
    /// Add the product if absent, remove it otherwise
    Toggle { id: String },
    /// Remove every product
    Clear,
}
