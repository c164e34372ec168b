#![deny(missing_docs)]
#![doc = "Round-based, most-constrained-first assignment of K-regular gifting graphs."]

//! The engine assigns every participant `K` distinct receivers (never itself)
//! such that every participant also receives exactly `K` gifts. The verifier
//! re-checks those invariants on any populated [`ParticipantSet`].

mod config;
mod engine;
mod hash;
mod participants;
mod record;
mod verify;

pub use config::EngineConfig;
pub use engine::{check_capacity, AssignmentEngine, AssignmentOutcome, DeadlockEvent};
pub use hash::{canonical_hash, roster_hash};
pub use participants::{Participant, ParticipantSet};
pub use record::{AssignmentRecord, ParticipantRecord, RECORD_SCHEMA};
pub use verify::{ensure_valid, verify_assignment, VerificationReport, Violation};
