mod common;

use santa_assign::{ensure_valid, verify_assignment, AssignmentEngine, Violation};
use santa_core::errors::SantaError;

use common::{id, roster, targets};

fn scenario() -> santa_assign::ParticipantSet {
    roster(&["A", "B", "C", "D"])
}

fn valid_manual(set: &mut santa_assign::ParticipantSet) {
    set.set_targets(&id("A"), targets(&["B", "C"])).unwrap();
    set.set_targets(&id("B"), targets(&["C", "D"])).unwrap();
    set.set_targets(&id("C"), targets(&["D", "A"])).unwrap();
    set.set_targets(&id("D"), targets(&["A", "B"])).unwrap();
}

#[test]
fn engine_output_passes() {
    for seed in 0..20 {
        let mut set = scenario();
        AssignmentEngine::default().assign(&mut set, 2, seed).unwrap();
        let report = verify_assignment(&set, 2);
        assert!(report.passed(), "{}", report.diagnostic());
        assert_eq!(report.participants, 4);
    }
}

#[test]
fn manual_regular_assignment_passes() {
    let mut set = scenario();
    valid_manual(&mut set);
    let report = ensure_valid(&set, 2).unwrap();
    assert_eq!(report.diagnostic(), "all gifting pairs have been correctly assigned");
}

#[test]
fn short_list_is_reported_against_its_giver() {
    let mut set = scenario();
    valid_manual(&mut set);
    set.set_targets(&id("A"), targets(&["B"])).unwrap();
    let report = verify_assignment(&set, 2);
    assert_eq!(
        report.violation,
        Some(Violation::GiftCount {
            participant: id("A"),
            expected: 2,
            actual: 1
        })
    );
    assert!(report.diagnostic().contains("'A'"));
}

#[test]
fn self_gift_is_reported() {
    let mut set = scenario();
    valid_manual(&mut set);
    // A and C gift themselves instead of each other; every count stays at 2.
    set.set_targets(&id("A"), targets(&["B", "A"])).unwrap();
    set.set_targets(&id("C"), targets(&["D", "C"])).unwrap();
    let report = verify_assignment(&set, 2);
    let violation = report.violation.clone().unwrap();
    assert_eq!(violation, Violation::SelfGift { participant: id("A") });
    assert_eq!(violation.code(), "self-gift");

    let err = ensure_valid(&set, 2).unwrap_err();
    match err {
        SantaError::VerificationFailure(info) => {
            assert_eq!(info.code, "self-gift");
            assert_eq!(info.context.get("participant"), Some(&"A".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn duplicate_target_is_reported() {
    let mut set = scenario();
    valid_manual(&mut set);
    set.set_targets(&id("B"), targets(&["C", "C"])).unwrap();
    set.set_targets(&id("A"), targets(&["B", "D"])).unwrap();
    let report = verify_assignment(&set, 2);
    assert_eq!(
        report.violation,
        Some(Violation::DuplicateTarget {
            participant: id("B"),
            target: id("C")
        })
    );
}

#[test]
fn unbalanced_receiving_is_reported() {
    let mut set = scenario();
    valid_manual(&mut set);
    // A now gives to D instead of C: C receives one gift, D three.
    set.set_targets(&id("A"), targets(&["B", "D"])).unwrap();
    let report = verify_assignment(&set, 2);
    assert_eq!(
        report.violation,
        Some(Violation::ReceivedCount {
            participant: id("C"),
            expected: 2,
            actual: 1
        })
    );
}

#[test]
fn unassigned_set_fails_for_positive_gift_count() {
    let set = scenario();
    assert!(verify_assignment(&set, 0).passed());
    assert!(!verify_assignment(&set, 1).passed());
}
