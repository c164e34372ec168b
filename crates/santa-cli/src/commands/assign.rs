use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use santa_assign::{AssignmentEngine, AssignmentRecord, EngineConfig};
use tracing::info;

use crate::message::MessageTemplate;
use crate::roster::load_roster;
use crate::summary::render_pairs;

#[derive(Args, Debug, Clone)]
pub struct AssignArgs {
    /// CSV roster with `name,email[,address]` rows and no header.
    #[arg(long)]
    pub roster: PathBuf,
    /// Gifts each participant gives and receives.
    #[arg(long, default_value_t = 1)]
    pub gifts: usize,
    /// Master seed; a random one is drawn (and logged) when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// YAML engine configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Message template rendered for every participant.
    #[arg(long)]
    pub message: Option<PathBuf>,
    /// Print the assignment record as JSON instead of the text listing.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &AssignArgs, out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_yaml_str(&fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    let template = match &args.message {
        Some(path) => Some(MessageTemplate::parse(fs::read_to_string(path)?)?),
        None => None,
    };
    let mut set = load_roster(&args.roster)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(
        participants = set.len(),
        gifts = args.gifts,
        seed,
        "running assignment"
    );

    let engine = AssignmentEngine::new(config)?;
    let outcome = engine.assign(&mut set, args.gifts, seed)?;

    if args.json {
        let record = AssignmentRecord::capture(&set, &outcome)?;
        writeln!(out, "{}", record.to_json()?)?;
    } else {
        write!(out, "{}", render_pairs(&set))?;
    }

    if let Some(template) = template {
        for message in template.render_all(&set)? {
            writeln!(out)?;
            writeln!(out, "To: {} <{}>", message.participant, message.email)?;
            writeln!(out, "{}", message.body)?;
        }
    }
    Ok(())
}
