//! Store module: templates, the flat per-partition store, and the
//! key-partitioned index.
//!
//! - `symbol.rs`: literal/wildcard slots and record ids
//! - `template.rs`: scoring and generalization of one template
//! - `flat.rs`: best-match search over a partition's templates
//! - `partition.rs`: routing by partition key
//! - `dump.rs`: diagnostic snapshots

pub mod symbol;
pub mod template;
pub mod flat;
pub mod partition;
pub mod dump;

pub use symbol::{RecordId, Symbol};
pub use template::{Parameter, Template};
pub use flat::{InsertOutcome, TemplateMatch, TemplateStore};
pub use partition::PartitionedTemplateStore;
pub use dump::{IndexDump, PartitionDump, StoreDump, TemplateDump};
