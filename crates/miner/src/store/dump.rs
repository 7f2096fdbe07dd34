//! Diagnostic snapshots of template stores.
//!
//! Meant for logging and debugging only; the layout may change at any time.

use serde::Serialize;

use super::template::Template;

#[derive(Debug, Clone, Serialize)]
pub struct TemplateDump {
    /// Template rendered with `*` for wildcard slots
    pub pattern: String,
    pub records: usize,
    pub wildcard_positions: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreDump {
    pub last_record_id: u64,
    pub templates: Vec<TemplateDump>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartitionDump {
    pub key: String,
    #[serde(flatten)]
    pub store: StoreDump,
}

/// Dump of every partition, sorted by key.
#[derive(Debug, Clone, Serialize)]
pub struct IndexDump {
    pub partitions: Vec<PartitionDump>,
}

impl<T: std::fmt::Display> From<&Template<T>> for TemplateDump {
    fn from(template: &Template<T>) -> Self {
        Self {
            pattern: template.to_string(),
            records: template.count(),
            wildcard_positions: template.wildcard_positions().to_vec(),
        }
    }
}

impl StoreDump {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl IndexDump {
    pub(crate) fn sorted(mut partitions: Vec<PartitionDump>) -> Self {
        partitions.sort_by(|a, b| a.key.cmp(&b.key));
        Self { partitions }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
