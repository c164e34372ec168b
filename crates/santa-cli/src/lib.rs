//! Roster import, message rendering and command implementations for the `santa` binary.

pub mod commands;
pub mod logging;
pub mod message;
pub mod roster;
pub mod summary;

pub use message::{MessageTemplate, RenderedMessage};
pub use roster::{load_roster, parse_roster};
pub use summary::render_pairs;
