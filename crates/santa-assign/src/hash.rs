use sha2::{Digest, Sha256};

use crate::participants::ParticipantSet;

/// Computes the canonical hash of a roster and its assignment links.
///
/// Ids are hashed in roster order and each `assigned_to` list in assignment
/// order, so equal hashes mean identical assignments.
pub fn canonical_hash(set: &ParticipantSet) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"santa-assignment");
    hasher.update((set.len() as u64).to_le_bytes());
    for participant in set.iter() {
        update_str(participant.id().as_str(), &mut hasher);
        hasher.update((participant.received_count() as u64).to_le_bytes());
        hasher.update((participant.assigned_to().len() as u64).to_le_bytes());
        for target in participant.assigned_to() {
            update_str(target.as_str(), &mut hasher);
        }
    }
    format!("{:x}", hasher.finalize())
}

/// Computes the hash of the roster alone (ids and emails in roster order).
pub fn roster_hash(set: &ParticipantSet) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"santa-roster");
    hasher.update((set.len() as u64).to_le_bytes());
    for participant in set.iter() {
        update_str(participant.id().as_str(), &mut hasher);
        update_str(&participant.contact().email, &mut hasher);
    }
    format!("{:x}", hasher.finalize())
}

fn update_str(value: &str, hasher: &mut Sha256) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
