//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use turbo_cache::FileStore;
use turbo_catalog::{Product, ProductPage};
use turbo_data::{FetchClient, HttpCatalog};

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let config_names = ["turbo.toml", ".turbo.toml", "turbo.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Catalog client for the configured API.
    pub fn catalog(&self) -> HttpCatalog {
        let client = FetchClient::new()
            .with_base_url(self.config.api.base_url.clone())
            .with_timeout(self.config.api.timeout());
        HttpCatalog::new(client)
    }

    /// Key-value store backing the wishlist.
    pub fn store(&self) -> Result<FileStore> {
        let path = self.resolve_path(&self.config.storage.path);
        FileStore::open(path.clone())
            .with_context(|| format!("Failed to open storage: {}", path.display()))
    }

    /// Read a product file: a JSON array of products, a product page, or a
    /// full `{ success, data }` envelope.
    pub fn read_products(&self, path: &str) -> Result<Vec<Product>> {
        let path = self.resolve_path(path);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read products: {}", path.display()))?;
        parse_products(&content)
            .with_context(|| format!("Failed to parse products: {}", path.display()))
    }
}

fn parse_products(content: &str) -> Result<Vec<Product>> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum ProductFile {
        List(Vec<Product>),
        Envelope { data: ProductPage },
        Page(ProductPage),
    }

    let file: ProductFile = serde_json::from_str(content)?;
    Ok(match file {
        ProductFile::List(products) => products,
        ProductFile::Page(page) | ProductFile::Envelope { data: page } => page.products,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_products_shapes() {
        let list = r#"[{ "_id": "p1", "name": "A", "price": 10 }]"#;
        assert_eq!(parse_products(list).unwrap().len(), 1);

        let envelope = r#"{
            "success": true,
            "data": { "products": [{ "_id": "p1", "price": 1 }, { "_id": "p2", "price": 2 }] }
        }"#;
        assert_eq!(parse_products(envelope).unwrap().len(), 2);
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("turbo.toml"),
            "[api]\nbase_url = \"http://catalog.test\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = Context::find_config(&nested).unwrap();
        assert_eq!(config.api.base_url, "http://catalog.test");
    }
}
