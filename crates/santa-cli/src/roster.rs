//! CSV roster import: `name,email[,address]` per row, no header.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use santa_assign::ParticipantSet;
use santa_core::errors::{ErrorInfo, SantaError};
use santa_core::Contact;

/// Reads a roster file from disk.
pub fn load_roster(path: &Path) -> Result<ParticipantSet, SantaError> {
    let file = File::open(path).map_err(|err| {
        SantaError::Roster(
            ErrorInfo::new("unreadable-file", err.to_string())
                .with_context("path", path.display())
                .with_hint("check that the roster file exists and is readable"),
        )
    })?;
    parse_roster(file)
}

/// Parses roster rows, stopping at the first invalid one.
pub fn parse_roster<R: Read>(reader: R) -> Result<ParticipantSet, SantaError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut set = ParticipantSet::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let row = idx + 1;
        let record = record.map_err(|err| {
            SantaError::Roster(
                ErrorInfo::new("unreadable-csv", err.to_string()).with_context("row", row),
            )
        })?;
        let (name, email) = match (record.get(0), record.get(1)) {
            (Some(name), Some(email)) if !name.is_empty() => (name, email),
            _ => {
                return Err(SantaError::Roster(
                    ErrorInfo::new("invalid-row", "each row needs at least a name and an email")
                        .with_context("row", row),
                ))
            }
        };
        if !email.contains('@') {
            return Err(SantaError::Roster(
                ErrorInfo::new("invalid-email", "email address must contain '@'")
                    .with_context("row", row)
                    .with_context("email", email)
                    .with_hint("the email belongs in the second column"),
            ));
        }
        let address = record.get(2).map(str::to_string);
        set.insert(name, Contact::new(email, address))
            .map_err(|err| with_row(err, row))?;
    }
    Ok(set)
}

fn with_row(err: SantaError, row: usize) -> SantaError {
    match err {
        SantaError::Roster(info) => SantaError::Roster(info.with_context("row", row)),
        other => other,
    }
}
