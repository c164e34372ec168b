use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use santa_core::errors::{ErrorInfo, SantaError};
use santa_core::provenance::{RunProvenance, SchemaVersion};
use santa_core::{Contact, ParticipantId};

use crate::engine::AssignmentOutcome;
use crate::hash::{canonical_hash, roster_hash};
use crate::participants::ParticipantSet;

/// Schema version written into every [`AssignmentRecord`].
pub const RECORD_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// One participant's entry in an [`AssignmentRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    /// Participant id.
    pub id: ParticipantId,
    /// Email the participant's list is delivered to.
    pub email: String,
    /// Postal address shared with the participant's gifters.
    pub address: String,
    /// Receivers in assignment order.
    pub gifting_to: Vec<ParticipantId>,
}

/// Serializable snapshot of a completed assignment handed to downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Payload schema version.
    pub schema_version: SchemaVersion,
    /// Gifts given and received per participant.
    pub gift_count: usize,
    /// Seed, attempt count and hashes of the run.
    pub provenance: RunProvenance,
    /// Participants in roster order.
    pub participants: Vec<ParticipantRecord>,
}

impl AssignmentRecord {
    /// Captures a completed set; incomplete sets are rejected.
    pub fn capture(set: &ParticipantSet, outcome: &AssignmentOutcome) -> Result<Self, SantaError> {
        match set.completed_gift_count() {
            Some(gift_count) if gift_count == outcome.gift_count => {}
            other => {
                return Err(SantaError::Roster(
                    ErrorInfo::new(
                        "assignment-incomplete",
                        "only a committed assignment can be recorded",
                    )
                    .with_context("expected_gift_count", outcome.gift_count)
                    .with_context(
                        "completed_gift_count",
                        other.map_or_else(|| "none".to_string(), |k| k.to_string()),
                    ),
                ))
            }
        }
        let mut tool_versions = BTreeMap::new();
        tool_versions.insert(
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        Ok(Self {
            schema_version: RECORD_SCHEMA,
            gift_count: outcome.gift_count,
            provenance: RunProvenance {
                roster_hash: roster_hash(set),
                assignment_hash: canonical_hash(set),
                seed: outcome.seed.unwrap_or_default(),
                attempts: outcome.attempts,
                tool_versions,
            },
            participants: set
                .iter()
                .map(|p| ParticipantRecord {
                    id: p.id().clone(),
                    email: p.contact().email.clone(),
                    address: p.contact().address.clone(),
                    gifting_to: p.assigned_to().to_vec(),
                })
                .collect(),
        })
    }

    /// Rebuilds a [`ParticipantSet`] carrying the recorded links.
    ///
    /// The result does not claim completion; run the verifier to check it.
    pub fn to_participant_set(&self) -> Result<ParticipantSet, SantaError> {
        let mut set = ParticipantSet::new();
        for entry in &self.participants {
            set.insert(
                entry.id.clone(),
                Contact::new(entry.email.clone(), Some(entry.address.clone())),
            )?;
        }
        for entry in &self.participants {
            set.set_targets(&entry.id, entry.gifting_to.clone())?;
        }
        Ok(set)
    }

    /// Serializes the record as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SantaError> {
        serde_json::to_string_pretty(self).map_err(serde_error)
    }

    /// Parses a record from JSON, rejecting newer major schema versions.
    pub fn from_json(source: &str) -> Result<Self, SantaError> {
        let record: AssignmentRecord = serde_json::from_str(source).map_err(serde_error)?;
        if record.schema_version.major != RECORD_SCHEMA.major {
            return Err(SantaError::Serde(
                ErrorInfo::new("schema-mismatch", "unsupported assignment record schema")
                    .with_context("found", record.schema_version.major)
                    .with_context("supported", RECORD_SCHEMA.major),
            ));
        }
        Ok(record)
    }
}

fn serde_error(err: serde_json::Error) -> SantaError {
    SantaError::Serde(ErrorInfo::new("json", err.to_string()))
}
