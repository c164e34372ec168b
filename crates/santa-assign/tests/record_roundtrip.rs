mod common;

use santa_assign::{
    canonical_hash, roster_hash, verify_assignment, AssignmentEngine, AssignmentRecord,
    RECORD_SCHEMA,
};
use santa_core::UNKNOWN_ADDRESS;

use common::{assignment_of, roster};

#[test]
fn record_restores_an_equivalent_assignment() {
    let mut set = roster(&["Ann", "Bo", "Cy", "Di", "Ed"]);
    let outcome = AssignmentEngine::default().assign(&mut set, 2, 77).unwrap();
    let record = AssignmentRecord::capture(&set, &outcome).unwrap();

    assert_eq!(record.schema_version, RECORD_SCHEMA);
    assert_eq!(record.provenance.seed, 77);
    assert_eq!(record.provenance.attempts, outcome.attempts);
    assert_eq!(record.provenance.assignment_hash, canonical_hash(&set));
    assert_eq!(record.provenance.roster_hash, roster_hash(&set));
    assert!(record.participants.iter().all(|p| p.address == UNKNOWN_ADDRESS));

    let json = record.to_json().unwrap();
    let parsed = AssignmentRecord::from_json(&json).unwrap();
    assert_eq!(parsed, record);

    let restored = parsed.to_participant_set().unwrap();
    assert_eq!(restored.completed_gift_count(), None);
    assert_eq!(assignment_of(&restored), assignment_of(&set));
    assert_eq!(canonical_hash(&restored), canonical_hash(&set));
    assert!(verify_assignment(&restored, 2).passed());
}

#[test]
fn uncommitted_set_cannot_be_recorded() {
    let mut set = roster(&["Ann", "Bo", "Cy"]);
    let outcome = AssignmentEngine::default().assign(&mut set, 1, 3).unwrap();
    set.reset();
    let err = AssignmentRecord::capture(&set, &outcome).unwrap_err();
    assert_eq!(err.code(), "assignment-incomplete");
}

#[test]
fn newer_major_schema_is_rejected() {
    let mut set = roster(&["Ann", "Bo"]);
    let outcome = AssignmentEngine::default().assign(&mut set, 1, 3).unwrap();
    let mut record = AssignmentRecord::capture(&set, &outcome).unwrap();
    record.schema_version.major += 1;
    let json = record.to_json().unwrap();
    let err = AssignmentRecord::from_json(&json).unwrap_err();
    assert_eq!(err.code(), "schema-mismatch");
}
