//! Personalised message templates.

use santa_assign::ParticipantSet;
use santa_core::errors::{ErrorInfo, SantaError};
use santa_core::ParticipantId;

/// Replaced with the recipient of the message (the giver).
pub const GIFTER_NAME: &str = "[gifter_name]";
/// Replaced with the comma-joined names the giver gifts.
pub const RECEIVER_NAME: &str = "[receiver_name]";
/// Replaced with the comma-joined addresses of those receivers.
pub const RECEIVER_ADDRESS: &str = "[receiver_address]";

/// A validated message body containing at least [`GIFTER_NAME`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    body: String,
}

/// A message ready for delivery to one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    /// Participant the message is for.
    pub participant: ParticipantId,
    /// Delivery address.
    pub email: String,
    /// Personalised body.
    pub body: String,
}

impl MessageTemplate {
    /// Validates a template body.
    pub fn parse(body: impl Into<String>) -> Result<Self, SantaError> {
        let body = body.into();
        if !body.contains(GIFTER_NAME) {
            return Err(SantaError::Config(
                ErrorInfo::new("missing-placeholder", "message template must name the gifter")
                    .with_context("placeholder", GIFTER_NAME),
            ));
        }
        Ok(Self { body })
    }

    /// The template with placeholders shown as upper-case markers, for confirmation.
    pub fn preview(&self) -> String {
        self.body
            .replace(GIFTER_NAME, "GIFTER_NAME")
            .replace(RECEIVER_NAME, "RECEIVER_NAME")
            .replace(RECEIVER_ADDRESS, "RECEIVER_ADDRESS")
    }

    /// Renders the message for one giver.
    pub fn render(
        &self,
        set: &ParticipantSet,
        giver: &ParticipantId,
    ) -> Result<String, SantaError> {
        let participant = set.get(giver).ok_or_else(|| {
            SantaError::Roster(
                ErrorInfo::new("unknown-participant", "participant is not in the roster")
                    .with_context("participant", giver),
            )
        })?;
        let names = participant
            .assigned_to()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let addresses = set.addresses_of(giver)?.join(", ");
        Ok(self
            .body
            .replace(GIFTER_NAME, giver.as_str())
            .replace(RECEIVER_NAME, &names)
            .replace(RECEIVER_ADDRESS, &addresses))
    }

    /// Renders one message per participant, in roster order.
    pub fn render_all(&self, set: &ParticipantSet) -> Result<Vec<RenderedMessage>, SantaError> {
        set.iter()
            .map(|participant| {
                Ok(RenderedMessage {
                    participant: participant.id().clone(),
                    email: participant.contact().email.clone(),
                    body: self.render(set, participant.id())?,
                })
            })
            .collect()
    }
}
