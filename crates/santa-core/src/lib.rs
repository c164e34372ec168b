#![deny(missing_docs)]
#![doc = "Core identifiers, errors and seeded randomness shared by the gift assignment crates."]

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, SantaError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};

/// Address recorded for participants who did not supply one.
pub const UNKNOWN_ADDRESS: &str = "N/A";

/// Unique, run-stable identifier of a participant (their name or nickname).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Creates an identifier from the participant's name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the underlying name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ParticipantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Delivery details attached to a participant.
///
/// The assignment engine never inspects these values; they are carried through
/// unchanged so that downstream consumers can address messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Email address the participant's gift list is sent to.
    pub email: String,
    /// Postal address shared with the participant's gifters.
    pub address: String,
}

impl Contact {
    /// Creates a contact with an optional address, substituting [`UNKNOWN_ADDRESS`].
    pub fn new(email: impl Into<String>, address: Option<String>) -> Self {
        let address = address
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string());
        Self {
            email: email.into(),
            address,
        }
    }
}
