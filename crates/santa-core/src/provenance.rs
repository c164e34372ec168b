//! Provenance and schema descriptors attached to serialized assignments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information attached to every serialized assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Canonical hash of the roster (ids in insertion order) the run started from.
    pub roster_hash: String,
    /// Canonical hash of the completed assignment.
    pub assignment_hash: String,
    /// Master seed from which every attempt's trajectory was derived.
    pub seed: u64,
    /// Number of attempts consumed, including the successful one.
    pub attempts: usize,
    /// Version map for the tools involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}
