use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use santa_core::errors::{ErrorInfo, SantaError};
use santa_core::rng::RngHandle;
use santa_core::ParticipantId;

use crate::config::EngineConfig;
use crate::participants::ParticipantSet;
use crate::verify::ensure_valid;

/// Summary of a successful engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    /// Gifts given and received by every participant.
    pub gift_count: usize,
    /// Master seed the attempts were derived from, when the engine seeded itself.
    pub seed: Option<u64>,
    /// Attempts consumed, including the successful one.
    pub attempts: usize,
    /// Deadlocked attempts that were discarded before success.
    pub deadlocks: Vec<DeadlockEvent>,
}

/// A discarded trajectory: `giver` had no eligible receiver during `round`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlockEvent {
    /// Zero-based attempt index.
    pub attempt: usize,
    /// One-based round in which the giver stalled.
    pub round: usize,
    /// The most-constrained giver that was left without candidates.
    pub giver: ParticipantId,
}

/// Round-based most-constrained-first assignment engine.
#[derive(Debug, Clone, Default)]
pub struct AssignmentEngine {
    config: EngineConfig,
}

impl AssignmentEngine {
    /// Creates an engine after validating its configuration.
    pub fn new(config: EngineConfig) -> Result<Self, SantaError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in effect.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assigns `gift_count` receivers to every participant, retrying deadlocked trajectories.
    ///
    /// Attempt `i` draws from `RngHandle::substream(seed, i)`. The set is only
    /// modified when an attempt succeeds; on any error it is returned untouched.
    ///
    /// Sparse rosters almost never stall, but the per-attempt deadlock rate
    /// climbs towards 1 as the gift count approaches the participant count
    /// (around 0.75 at 20 participants with 18 gifts, above 0.95 at 30 with 28),
    /// so the default budget is not enough for large dense rosters.
    pub fn assign(
        &self,
        set: &mut ParticipantSet,
        gift_count: usize,
        seed: u64,
    ) -> Result<AssignmentOutcome, SantaError> {
        check_capacity(set, gift_count)?;
        let ids: Vec<ParticipantId> = set.ids().cloned().collect();
        let mut deadlocks = Vec::new();

        for attempt in 0..self.config.max_attempts {
            let mut rng = RngHandle::substream(seed, attempt as u64);
            debug!(attempt, participants = ids.len(), gift_count, "starting trajectory");
            match run_trajectory(ids.len(), gift_count, &mut rng) {
                Ok(ledger) => {
                    self.commit(set, gift_count, &ledger)?;
                    info!(
                        attempts = attempt + 1,
                        participants = ids.len(),
                        gift_count,
                        "assignment complete"
                    );
                    return Ok(AssignmentOutcome {
                        gift_count,
                        seed: Some(seed),
                        attempts: attempt + 1,
                        deadlocks,
                    });
                }
                Err(stall) => {
                    let giver = &ids[stall.giver];
                    warn!(
                        attempt,
                        round = stall.round,
                        giver = %giver,
                        "trajectory deadlocked, retrying"
                    );
                    deadlocks.push(DeadlockEvent {
                        attempt,
                        round: stall.round,
                        giver: giver.clone(),
                    });
                }
            }
        }

        let mut detail = ErrorInfo::new(
            "deadlock",
            "no attempt reached a complete assignment within the retry budget",
        )
        .with_context("attempts", self.config.max_attempts)
        .with_context("participants", ids.len())
        .with_context("gift_count", gift_count)
        .with_hint(
            "dense rosters (gift count close to the participant count) stall in most \
             trajectories; lower the gift count, raise max_attempts or retry with another seed",
        );
        if let Some(event) = deadlocks.last() {
            detail = detail
                .with_context("round", event.round)
                .with_context("giver", &event.giver);
        }
        Err(SantaError::Deadlock(detail))
    }

    /// Runs a single trajectory with a caller-supplied RNG.
    ///
    /// A stalled giver surfaces immediately as [`SantaError::Deadlock`] so the
    /// caller can decide how to retry.
    pub fn assign_with_rng(
        &self,
        set: &mut ParticipantSet,
        gift_count: usize,
        rng: &mut RngHandle,
    ) -> Result<AssignmentOutcome, SantaError> {
        check_capacity(set, gift_count)?;
        let ids: Vec<ParticipantId> = set.ids().cloned().collect();
        match run_trajectory(ids.len(), gift_count, rng) {
            Ok(ledger) => {
                self.commit(set, gift_count, &ledger)?;
                Ok(AssignmentOutcome {
                    gift_count,
                    seed: None,
                    attempts: 1,
                    deadlocks: Vec::new(),
                })
            }
            Err(stall) => Err(SantaError::Deadlock(
                ErrorInfo::new("deadlock", "most-constrained giver has no eligible receiver")
                    .with_context("attempts", 1)
                    .with_context("round", stall.round)
                    .with_context("giver", &ids[stall.giver]),
            )),
        }
    }

    fn commit(
        &self,
        set: &mut ParticipantSet,
        gift_count: usize,
        ledger: &Ledger,
    ) -> Result<(), SantaError> {
        let mut candidate = set.clone();
        candidate.commit(gift_count, &ledger.assigned, &ledger.received);
        if self.config.self_check {
            ensure_valid(&candidate, gift_count)?;
        }
        *set = candidate;
        Ok(())
    }
}

/// Rejects rosters that cannot give every participant `gift_count` distinct receivers.
///
/// Requires `len > gift_count`; the error reports how many participants are missing.
pub fn check_capacity(set: &ParticipantSet, gift_count: usize) -> Result<(), SantaError> {
    let participants = set.len();
    if participants <= gift_count {
        let shortfall = gift_count - participants + 1;
        return Err(SantaError::InsufficientParticipants(
            ErrorInfo::new(
                "insufficient-participants",
                "every participant needs gift_count distinct other participants",
            )
            .with_context("participants", participants)
            .with_context("gift_count", gift_count)
            .with_context("shortfall", shortfall)
            .with_hint(format!(
                "lower the gift count below {participants} or add {shortfall} participant(s)"
            )),
        ));
    }
    Ok(())
}

/// Index-based working state for one trajectory.
#[derive(Debug)]
struct Ledger {
    assigned: Vec<Vec<usize>>,
    received: Vec<usize>,
}

impl Ledger {
    fn new(participants: usize) -> Self {
        Self {
            assigned: vec![Vec::new(); participants],
            received: vec![0; participants],
        }
    }

    fn eligible_receivers(&self, giver: usize, level: usize) -> Vec<usize> {
        (0..self.received.len())
            .filter(|&other| {
                other != giver
                    && self.received[other] == level
                    && !self.assigned[giver].contains(&other)
            })
            .collect()
    }

    fn link(&mut self, giver: usize, receiver: usize) {
        self.assigned[giver].push(receiver);
        self.received[receiver] += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stall {
    round: usize,
    giver: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Round(usize),
    Done,
}

#[derive(Debug, PartialEq, Eq)]
enum Selection {
    /// No participant is still waiting for its gift in this round.
    Exhausted,
    /// The most-constrained giver has no eligible receiver.
    Stalled(usize),
    Giver { giver: usize, candidates: Vec<usize> },
}

fn run_trajectory(
    participants: usize,
    gift_count: usize,
    rng: &mut RngHandle,
) -> Result<Ledger, Stall> {
    let mut ledger = Ledger::new(participants);
    let mut phase = if gift_count == 0 {
        Phase::Done
    } else {
        Phase::Round(1)
    };

    loop {
        match phase {
            Phase::Done => return Ok(ledger),
            Phase::Round(round) => match select_giver(&ledger, round) {
                Selection::Exhausted => {
                    debug!(round, "round complete");
                    phase = if round == gift_count {
                        Phase::Done
                    } else {
                        Phase::Round(round + 1)
                    };
                }
                Selection::Stalled(giver) => return Err(Stall { round, giver }),
                Selection::Giver { giver, candidates } => {
                    let &receiver = candidates.choose(rng).ok_or(Stall { round, giver })?;
                    ledger.link(giver, receiver);
                }
            },
        }
    }
}

/// Picks the active giver with the fewest eligible receivers; ties go to roster order.
fn select_giver(ledger: &Ledger, round: usize) -> Selection {
    let level = round - 1;
    let mut best: Option<(usize, Vec<usize>)> = None;
    for giver in 0..ledger.assigned.len() {
        if ledger.assigned[giver].len() != level {
            continue;
        }
        let candidates = ledger.eligible_receivers(giver, level);
        let tighter = match &best {
            None => true,
            Some((_, current)) => candidates.len() < current.len(),
        };
        if tighter {
            best = Some((giver, candidates));
        }
    }
    match best {
        None => Selection::Exhausted,
        Some((giver, candidates)) if candidates.is_empty() => Selection::Stalled(giver),
        Some((giver, candidates)) => Selection::Giver { giver, candidates },
    }
}
