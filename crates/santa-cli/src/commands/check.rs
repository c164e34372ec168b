use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use santa_assign::check_capacity;

use crate::roster::load_roster;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// CSV roster with `name,email[,address]` rows and no header.
    #[arg(long)]
    pub roster: PathBuf,
    /// Gifts each participant gives and receives.
    #[arg(long, default_value_t = 1)]
    pub gifts: usize,
}

/// Validates the roster and the participant/gift-count precondition without assigning.
pub fn run(args: &CheckArgs, out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    let set = load_roster(&args.roster)?;
    check_capacity(&set, args.gifts)?;
    writeln!(out, "{} participants, {} gift(s) each", set.len(), args.gifts)?;
    for (idx, participant) in set.iter().enumerate() {
        writeln!(
            out,
            "{}. Name: {}, Email: {}, Address: {}",
            idx + 1,
            participant.id(),
            participant.contact().email,
            participant.contact().address
        )?;
    }
    Ok(())
}
