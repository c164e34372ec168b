use std::collections::{HashMap, HashSet};
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use santa_core::errors::{ErrorInfo, SantaError};
use santa_core::ParticipantId;

use crate::participants::ParticipantSet;

/// First invariant violation found by [`verify_assignment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Violation {
    /// The participant gives the wrong number of gifts.
    GiftCount {
        /// Offending participant.
        participant: ParticipantId,
        /// Required gift count.
        expected: usize,
        /// Length of its `assigned_to` list.
        actual: usize,
    },
    /// The participant's received counter disagrees with the gift count.
    ReceivedCount {
        /// Offending participant.
        participant: ParticipantId,
        /// Required gift count.
        expected: usize,
        /// Recorded received count.
        actual: usize,
    },
    /// The participant gives to the same receiver more than once.
    DuplicateTarget {
        /// Offending participant.
        participant: ParticipantId,
        /// Receiver listed twice.
        target: ParticipantId,
    },
    /// The participant gives to itself.
    SelfGift {
        /// Offending participant.
        participant: ParticipantId,
    },
    /// The participant gives to someone outside the roster.
    ///
    /// `ParticipantSet` rejects such links, so this and [`Violation::InboundCount`]
    /// only fire for hand-built or corrupted sets.
    UnknownTarget {
        /// Offending participant.
        participant: ParticipantId,
        /// Receiver that is not in the roster.
        target: ParticipantId,
    },
    /// Gifts actually pointing at the participant disagree with the gift count.
    InboundCount {
        /// Offending participant.
        participant: ParticipantId,
        /// Required gift count.
        expected: usize,
        /// Number of `assigned_to` entries naming the participant.
        actual: usize,
    },
}

impl Violation {
    /// Stable code used in [`SantaError::VerificationFailure`] payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Violation::GiftCount { .. } => "gift-count",
            Violation::ReceivedCount { .. } => "received-count",
            Violation::DuplicateTarget { .. } => "duplicate-target",
            Violation::SelfGift { .. } => "self-gift",
            Violation::UnknownTarget { .. } => "unknown-target",
            Violation::InboundCount { .. } => "inbound-count",
        }
    }

    /// The participant that triggered the violation.
    pub fn participant(&self) -> &ParticipantId {
        match self {
            Violation::GiftCount { participant, .. }
            | Violation::ReceivedCount { participant, .. }
            | Violation::DuplicateTarget { participant, .. }
            | Violation::SelfGift { participant }
            | Violation::UnknownTarget { participant, .. }
            | Violation::InboundCount { participant, .. } => participant,
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::GiftCount {
                participant,
                expected,
                actual,
            } => write!(
                f,
                "participant '{participant}' gifts {actual} participants instead of {expected}"
            ),
            Violation::ReceivedCount {
                participant,
                expected,
                actual,
            } => write!(
                f,
                "participant '{participant}' has been gifted {actual} gifts instead of {expected}"
            ),
            Violation::DuplicateTarget {
                participant,
                target,
            } => write!(
                f,
                "participant '{participant}' is assigned to gift '{target}' more than once"
            ),
            Violation::SelfGift { participant } => {
                write!(f, "participant '{participant}' is assigned to gift itself")
            }
            Violation::UnknownTarget {
                participant,
                target,
            } => write!(
                f,
                "participant '{participant}' gifts '{target}', who is not in the roster"
            ),
            Violation::InboundCount {
                participant,
                expected,
                actual,
            } => write!(
                f,
                "participant '{participant}' is named by {actual} gifters instead of {expected}"
            ),
        }
    }
}

/// Outcome of checking a populated [`ParticipantSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Gift count the set was checked against.
    pub gift_count: usize,
    /// Number of participants inspected.
    pub participants: usize,
    /// First violation, if any.
    pub violation: Option<Violation>,
}

impl VerificationReport {
    /// Whether every invariant holds.
    pub fn passed(&self) -> bool {
        self.violation.is_none()
    }

    /// Human readable one-line summary.
    pub fn diagnostic(&self) -> String {
        match &self.violation {
            None => "all gifting pairs have been correctly assigned".to_string(),
            Some(violation) => format!("incorrect gifting pairs found: {violation}"),
        }
    }
}

/// Checks the regularity invariants of `set` for `gift_count` gifts per participant.
///
/// Participants are checked in roster order for gift count, received count,
/// duplicate receivers, self-gifts and unknown receivers; the inbound tally
/// derived from all lists is cross-checked afterwards.
pub fn verify_assignment(set: &ParticipantSet, gift_count: usize) -> VerificationReport {
    VerificationReport {
        gift_count,
        participants: set.len(),
        violation: first_violation(set, gift_count),
    }
}

/// Like [`verify_assignment`], but converts a failed report into an error.
pub fn ensure_valid(
    set: &ParticipantSet,
    gift_count: usize,
) -> Result<VerificationReport, SantaError> {
    let report = verify_assignment(set, gift_count);
    match &report.violation {
        None => Ok(report),
        Some(violation) => Err(SantaError::VerificationFailure(
            ErrorInfo::new(violation.code(), report.diagnostic())
                .with_context("participant", violation.participant())
                .with_context("gift_count", gift_count),
        )),
    }
}

fn first_violation(set: &ParticipantSet, gift_count: usize) -> Option<Violation> {
    let mut inbound: HashMap<&ParticipantId, usize> = HashMap::with_capacity(set.len());
    for participant in set.iter() {
        let id = participant.id();
        let targets = participant.assigned_to();
        if targets.len() != gift_count {
            return Some(Violation::GiftCount {
                participant: id.clone(),
                expected: gift_count,
                actual: targets.len(),
            });
        }
        if participant.received_count() != gift_count {
            return Some(Violation::ReceivedCount {
                participant: id.clone(),
                expected: gift_count,
                actual: participant.received_count(),
            });
        }
        let mut seen = HashSet::with_capacity(targets.len());
        for target in targets {
            if !seen.insert(target) {
                return Some(Violation::DuplicateTarget {
                    participant: id.clone(),
                    target: target.clone(),
                });
            }
        }
        if seen.contains(id) {
            return Some(Violation::SelfGift {
                participant: id.clone(),
            });
        }
        for target in targets {
            if !set.contains(target) {
                return Some(Violation::UnknownTarget {
                    participant: id.clone(),
                    target: target.clone(),
                });
            }
            *inbound.entry(target).or_default() += 1;
        }
    }
    set.iter().find_map(|participant| {
        let actual = inbound.get(participant.id()).copied().unwrap_or(0);
        (actual != gift_count).then(|| Violation::InboundCount {
            participant: participant.id().clone(),
            expected: gift_count,
            actual,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use santa_core::Contact;

    fn roster(names: &[&str]) -> ParticipantSet {
        let mut set = ParticipantSet::new();
        for name in names {
            set.insert(*name, Contact::new(format!("{name}@example.com"), None)).unwrap();
        }
        set
    }

    #[test]
    fn inbound_tally_catches_counters_out_of_sync_with_links() {
        let mut set = roster(&["A", "B", "C"]);
        // Everyone claims one gift received, but A is named twice and C never.
        set.commit(1, &[vec![1], vec![0], vec![0]], &[1, 1, 1]);
        let report = verify_assignment(&set, 1);
        assert_eq!(
            report.violation,
            Some(Violation::InboundCount {
                participant: ParticipantId::from("A"),
                expected: 1,
                actual: 2
            })
        );
        assert_eq!(ensure_valid(&set, 1).unwrap_err().code(), "inbound-count");
    }

    #[test]
    fn receivers_outside_the_roster_are_reported() {
        let mut set = roster(&["A", "B"]);
        // Counters say everyone is complete; A's only link points outside the roster.
        set.commit(1, &[vec![], vec![0]], &[1, 1]);
        let a = ParticipantId::from("A");
        set.push_target_unchecked(&a, ParticipantId::from("Z"));

        let report = verify_assignment(&set, 1);
        assert_eq!(
            report.violation,
            Some(Violation::UnknownTarget {
                participant: a,
                target: ParticipantId::from("Z")
            })
        );
        assert!(report.diagnostic().contains("not in the roster"));
    }
}
