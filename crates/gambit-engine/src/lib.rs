//! Search and evaluation for gambit.

pub mod error;
pub mod eval;
pub mod search;

pub use error::ConfigError;
pub use eval::{Evaluator, Material, evaluate};
pub use search::control::SearchControl;
pub use search::{IterationPolicy, SearchConfig, SearchResult, Searcher};
