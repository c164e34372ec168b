use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use santa_core::errors::{ErrorInfo, SantaError};
use santa_core::{Contact, ParticipantId};

/// A single participant together with its assignment progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    contact: Contact,
    assigned_to: Vec<ParticipantId>,
    received_count: usize,
}

impl Participant {
    fn new(id: ParticipantId, contact: Contact) -> Self {
        Self {
            id,
            contact,
            assigned_to: Vec::new(),
            received_count: 0,
        }
    }

    /// Unique identifier of the participant.
    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    /// Contact details carried through unchanged.
    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    /// Ordered list of participants this participant gifts.
    pub fn assigned_to(&self) -> &[ParticipantId] {
        &self.assigned_to
    }

    /// Number of gifts this participant has been assigned to receive.
    pub fn received_count(&self) -> usize {
        self.received_count
    }

    fn clear(&mut self) {
        self.assigned_to.clear();
        self.received_count = 0;
    }
}

/// Insertion-ordered roster of participants and their assignment links.
///
/// Insertion order is significant: the engine breaks ties between equally
/// constrained givers by roster position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantSet {
    participants: IndexMap<ParticipantId, Participant>,
    completed: Option<usize>,
}

impl ParticipantSet {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant, rejecting duplicate names and duplicate emails.
    ///
    /// Any existing assignment is discarded because it no longer covers the roster.
    pub fn insert(
        &mut self,
        id: impl Into<ParticipantId>,
        contact: Contact,
    ) -> Result<(), SantaError> {
        let id = id.into();
        if self.participants.contains_key(&id) {
            return Err(SantaError::Roster(
                ErrorInfo::new("duplicate-id", "participant names must be unique")
                    .with_context("participant", &id),
            ));
        }
        if let Some(existing) = self
            .participants
            .values()
            .find(|p| p.contact.email == contact.email)
        {
            return Err(SantaError::Roster(
                ErrorInfo::new("duplicate-email", "participant emails must be unique")
                    .with_context("participant", &id)
                    .with_context("existing", &existing.id)
                    .with_context("email", &contact.email),
            ));
        }
        self.reset();
        self.participants.insert(id.clone(), Participant::new(id, contact));
        Ok(())
    }

    /// Removes a participant, preserving the order of the remaining roster.
    ///
    /// All assignment links are cleared since they may reference the removed id.
    pub fn remove(&mut self, id: &ParticipantId) -> Result<Participant, SantaError> {
        let mut removed = self
            .participants
            .shift_remove(id)
            .ok_or_else(|| unknown_participant(id))?;
        removed.clear();
        self.reset();
        Ok(removed)
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Whether a participant with this id exists.
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.participants.contains_key(id)
    }

    /// Looks up a participant by id.
    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.get(id)
    }

    /// Iterates participants in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Participant> + '_ {
        self.participants.values()
    }

    /// Iterates participant ids in insertion order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = &ParticipantId> + '_ {
        self.participants.keys()
    }

    /// Gift count of the last committed engine run, if the set is complete.
    pub fn completed_gift_count(&self) -> Option<usize> {
        self.completed
    }

    /// Addresses of `giver`'s receivers, in assignment order.
    pub fn addresses_of(&self, giver: &ParticipantId) -> Result<Vec<&str>, SantaError> {
        let participant = self.get(giver).ok_or_else(|| unknown_participant(giver))?;
        participant
            .assigned_to
            .iter()
            .map(|target| {
                self.get(target)
                    .map(|p| p.contact.address.as_str())
                    .ok_or_else(|| unknown_participant(target))
            })
            .collect()
    }

    /// Clears every assignment link and received count.
    pub fn reset(&mut self) {
        for participant in self.participants.values_mut() {
            participant.clear();
        }
        self.completed = None;
    }

    /// Replaces `giver`'s receivers with `targets`, keeping received counts consistent.
    ///
    /// No regularity checks are applied here; this is the entry point for loading
    /// externally produced assignments that are then checked by the verifier. The
    /// set no longer claims completion afterwards.
    pub fn set_targets(
        &mut self,
        giver: &ParticipantId,
        targets: Vec<ParticipantId>,
    ) -> Result<(), SantaError> {
        if !self.contains(giver) {
            return Err(unknown_participant(giver));
        }
        if let Some(missing) = targets.iter().find(|t| !self.contains(t)) {
            return Err(unknown_participant(missing));
        }
        let previous = std::mem::take(
            &mut self
                .participants
                .get_mut(giver)
                .ok_or_else(|| unknown_participant(giver))?
                .assigned_to,
        );
        for target in &previous {
            if let Some(p) = self.participants.get_mut(target) {
                p.received_count = p.received_count.saturating_sub(1);
            }
        }
        for target in &targets {
            if let Some(p) = self.participants.get_mut(target) {
                p.received_count += 1;
            }
        }
        if let Some(p) = self.participants.get_mut(giver) {
            p.assigned_to = targets;
        }
        self.completed = None;
        Ok(())
    }

    /// Appends a link without roster or counter bookkeeping.
    #[cfg(test)]
    pub(crate) fn push_target_unchecked(&mut self, giver: &ParticipantId, target: ParticipantId) {
        if let Some(p) = self.participants.get_mut(giver) {
            p.assigned_to.push(target);
        }
    }

    /// Writes an index-based assignment produced by the engine into the set.
    pub(crate) fn commit(
        &mut self,
        gift_count: usize,
        assigned: &[Vec<usize>],
        received: &[usize],
    ) {
        let ids: Vec<ParticipantId> = self.participants.keys().cloned().collect();
        for (idx, participant) in self.participants.values_mut().enumerate() {
            participant.assigned_to = assigned[idx].iter().map(|&t| ids[t].clone()).collect();
            participant.received_count = received[idx];
        }
        self.completed = Some(gift_count);
    }
}

pub(crate) fn unknown_participant(id: &ParticipantId) -> SantaError {
    SantaError::Roster(
        ErrorInfo::new("unknown-participant", "participant is not in the roster")
            .with_context("participant", id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str) -> Contact {
        Contact::new(format!("{name}@example.com"), None)
    }

    #[test]
    fn set_targets_keeps_received_counts_consistent() {
        let mut set = ParticipantSet::new();
        for name in ["A", "B", "C"] {
            set.insert(name, contact(name)).unwrap();
        }
        let a = ParticipantId::from("A");
        set.set_targets(&a, vec!["B".into(), "C".into()]).unwrap();
        set.set_targets(&a, vec!["C".into()]).unwrap();

        assert_eq!(set.get(&"B".into()).unwrap().received_count(), 0);
        assert_eq!(set.get(&"C".into()).unwrap().received_count(), 1);
        assert_eq!(set.get(&a).unwrap().assigned_to(), &["C".into()]);
    }

    #[test]
    fn commit_marks_completion_and_reset_clears_it() {
        let mut set = ParticipantSet::new();
        for name in ["A", "B"] {
            set.insert(name, contact(name)).unwrap();
        }
        set.commit(1, &[vec![1], vec![0]], &[1, 1]);
        assert_eq!(set.completed_gift_count(), Some(1));
        assert_eq!(set.get(&"A".into()).unwrap().assigned_to(), &["B".into()]);

        set.reset();
        assert_eq!(set.completed_gift_count(), None);
        assert!(set.iter().all(|p| p.assigned_to().is_empty() && p.received_count() == 0));
    }
}
