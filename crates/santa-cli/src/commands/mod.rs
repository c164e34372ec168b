//! Subcommand implementations. Each writes its report to the supplied writer.

pub mod assign;
pub mod check;
