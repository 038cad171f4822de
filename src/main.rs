#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::cargo)]
#![warn(
    clippy::nursery,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::module_name_repetitions)]

use std::str::FromStr;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

use scorecard::scorecard::plate_appearance::{SummaryLabel, Translation};
use scorecard::scorecard::roster::{Player, Team};

const ABOUT: &str = "Translates plate appearance descriptions into scorecard notation.";

#[derive(Parser, Debug)]
#[command(name = "scorecard", about = ABOUT)]
struct Opt {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate a single description.
    Translate {
        description: String,
        #[command(flatten)]
        context: TranslationArgs,
    },
    /// Translate several descriptions in parallel.
    Batch {
        #[arg(required = true)]
        descriptions: Vec<String>,
        #[command(flatten)]
        context: TranslationArgs,
    },
}

#[derive(Args, Debug)]
struct TranslationArgs {
    /// Summary label from the data feed, e.g. "Single" or "Groundout".
    #[arg(short, long)]
    summary: String,

    /// Batting team roster entry as "Last,First,id". Repeatable.
    #[arg(short, long = "player", value_parser = parse_player)]
    players: Vec<Player>,

    #[arg(short, long, default_value = "Batting Team")]
    team: String,

    #[arg(short, long, default_value = "BAT")]
    abbreviation: String,
}

impl TranslationArgs {
    fn summary_label(&self) -> Result<SummaryLabel> {
        SummaryLabel::from_str(self.summary.trim())
            .with_context(|| anyhow!("Invalid summary label {}", self.summary))
    }

    fn batting_team(&self) -> Team {
        Team::with_roster(&self.team, &self.abbreviation, self.players.clone())
    }
}

fn parse_player(entry: &str) -> Result<Player> {
    let mut fields = entry.splitn(3, ',').map(str::trim);
    let (Some(last_name), Some(first_name), Some(id)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(anyhow!("Expected \"Last,First,id\", got {:?}", entry));
    };
    let id = id
        .parse::<u64>()
        .with_context(|| anyhow!("Invalid player id {:?}", id))?;
    Ok(Player::new(id, first_name, last_name))
}

fn run(opt: Opt) -> Result<()> {
    match opt.command {
        Command::Translate { description, context } => {
            let team = context.batting_team();
            let translation = Translation::new(&description, &context.summary_label()?, &team)?;
            println!("{}", serde_json::to_string_pretty(&translation)?);
        }
        Command::Batch { descriptions, context } => {
            let team = context.batting_team();
            let summary = context.summary_label()?;
            debug!("Translating {} descriptions", descriptions.len());
            let items = descriptions
                .into_iter()
                .map(|d| (d, summary.clone()))
                .collect::<Vec<_>>();
            let results = Translation::batch(&items, &team)
                .into_iter()
                .map(|result| match result {
                    Ok(translation) => serde_json::to_value(translation).map_err(anyhow::Error::from),
                    Err(e) => Ok(json!({ "error": format!("{e:#}") })),
                })
                .collect::<Result<Vec<Value>>>()?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }
    Ok(())
}

fn main() {
    let opt: Opt = Opt::parse();
    let level = if opt.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to initialize trace");

    let start = Instant::now();
    if let Err(e) = run(opt) {
        error!("{:#}", e);
        std::process::exit(1);
    }
    info!("Elapsed: {:?}", start.elapsed());
}
