//! Streaming log-template mining.
//!
//! Token sequences (already split log lines) are grouped into templates whose
//! constant positions are literals and whose varying positions are wildcards.
//! Stores are plain single-threaded data structures; [`SharedTemplateIndex`]
//! adds per-partition locking for concurrent callers.

// Core algorithm
pub mod store;

// Ambient infrastructure
pub mod conf;
pub mod error;
pub mod metrics;
pub mod index;

pub use conf::MinerConfig;
pub use error::{ConfigError, ConfigResult};
pub use index::{OwnedMatch, SharedTemplateIndex};
pub use metrics::{MetricsSnapshot, MinerMetrics};
pub use store::{
    InsertOutcome, Parameter, PartitionedTemplateStore, RecordId, Symbol, Template,
    TemplateMatch, TemplateStore,
};
