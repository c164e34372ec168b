mod common;

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use santa_assign::{canonical_hash, verify_assignment, AssignmentEngine};

use common::{assignment_of, numbered_roster};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn assignments_are_regular(seed in any::<u64>(), n in 2usize..12, k_frac in 0.0f64..1.0) {
        let k = ((n as f64) * k_frac) as usize % n;
        let mut set = numbered_roster(n);
        let engine = AssignmentEngine::default();
        let outcome = engine.assign(&mut set, k, seed).unwrap();

        prop_assert_eq!(outcome.gift_count, k);
        prop_assert_eq!(outcome.attempts, outcome.deadlocks.len() + 1);
        prop_assert_eq!(set.completed_gift_count(), Some(k));

        let mut inbound: HashMap<String, usize> = HashMap::new();
        for participant in set.iter() {
            let targets: BTreeSet<_> = participant.assigned_to().iter().collect();
            prop_assert_eq!(participant.assigned_to().len(), k);
            prop_assert_eq!(targets.len(), k);
            prop_assert!(!targets.contains(participant.id()));
            prop_assert_eq!(participant.received_count(), k);
            for target in participant.assigned_to() {
                *inbound.entry(target.to_string()).or_default() += 1;
            }
        }
        for participant in set.iter() {
            prop_assert_eq!(inbound.get(participant.id().as_str()).copied().unwrap_or(0), k);
        }
        prop_assert!(verify_assignment(&set, k).passed());
    }

    #[test]
    fn same_seed_replays_same_assignment(seed in any::<u64>(), n in 3usize..10) {
        let k = n / 2;
        let engine = AssignmentEngine::default();
        let mut first = numbered_roster(n);
        let mut second = numbered_roster(n);
        let outcome_a = engine.assign(&mut first, k, seed).unwrap();
        let outcome_b = engine.assign(&mut second, k, seed).unwrap();

        prop_assert_eq!(outcome_a, outcome_b);
        prop_assert_eq!(assignment_of(&first), assignment_of(&second));
        prop_assert_eq!(canonical_hash(&first), canonical_hash(&second));
    }
}

#[test]
fn complete_graph_when_gift_count_is_n_minus_one() {
    let mut set = numbered_roster(6);
    let outcome = AssignmentEngine::default().assign(&mut set, 5, 11).unwrap();
    assert_eq!(outcome.gift_count, 5);
    for participant in set.iter() {
        let targets: BTreeSet<_> = participant.assigned_to().iter().collect();
        let others: BTreeSet<_> = set.ids().filter(|id| *id != participant.id()).collect();
        assert_eq!(targets, others);
    }
}

#[test]
fn rerunning_replaces_previous_assignment() {
    let mut set = numbered_roster(5);
    let engine = AssignmentEngine::default();
    engine.assign(&mut set, 3, 1).unwrap();
    engine.assign(&mut set, 1, 2).unwrap();
    assert_eq!(set.completed_gift_count(), Some(1));
    assert!(verify_assignment(&set, 1).passed());
}
