//! Discovery error types.

use thiserror::Error;
use turbo_data::FetchError;

/// Errors surfaced by the discovery subsystem.
///
/// Most failures are absorbed at the UI boundary (stale facets are kept,
/// search degrades to a query echo); these values are what gets recorded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiscoveryError {
    /// A catalog request failed.
    #[error("Catalog request failed: {0}")]
    Fetch(#[from] FetchError),

    /// The request was superseded by a newer one.
    #[error("Request cancelled")]
    Cancelled,

    /// A value could not be used as given.
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}
