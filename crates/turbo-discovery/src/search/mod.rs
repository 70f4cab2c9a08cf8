//! Debounced, cancellable predictive search.

mod driver;
mod machine;
mod navigation;
mod suggest;

pub use driver::{PredictiveSearch, UiAction};
pub use machine::{
    RequestId, SearchEffect, SearchEvent, SearchKey, SearchMachine, SearchPhase, SearchSession,
};
pub use navigation::Navigation;
pub use suggest::{build_suggestions, Suggestion, SuggestionKind};
