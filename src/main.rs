//! duel-ai - command line front end
//!
//! Runs one decision against a board snapshot, or classifies a single
//! attacker/blocker pairing.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use duel_ai::{
    ai::{classify, AiConfig, AiPlayer, CombatStats, Decision},
    game::{AiLogger, Table, VerbosityLevel},
};
use std::path::PathBuf;

/// Verbosity level for decision output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

/// Combat stats written as `POWER/LIFE` with optional `+lethal` / `+shield`
#[derive(Debug, Clone, Copy)]
struct StatsArg(CombatStats);

impl std::str::FromStr for StatsArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split('+');
        let body = parts.next().unwrap_or_default();
        let (power, life) = body
            .split_once('/')
            .ok_or_else(|| format!("expected POWER/LIFE, got '{body}'"))?;
        let power = power.trim().parse().map_err(|_| format!("invalid power '{power}'"))?;
        let life = life.trim().parse().map_err(|_| format!("invalid life '{life}'"))?;

        let mut stats = CombatStats::new(power, life);
        for keyword in parts {
            stats = match keyword.trim().to_lowercase().as_str() {
                "lethal" => stats.with_lethal(),
                "shield" => stats.with_shield(),
                other => return Err(format!("unknown keyword '{other}' (expected: lethal, shield)")),
            };
        }
        Ok(StatsArg(stats))
    }
}

#[derive(Parser)]
#[command(name = "duel-ai")]
#[command(about = "Heuristic decision engine for a two-player card game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one decision for the phase stored in a board snapshot
    Decide {
        /// Board snapshot (JSON)
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        /// Engine configuration (JSON); defaults to the first two players in the snapshot
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Verbosity level for decision output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify one attacker/blocker exchange
    Classify {
        /// Attacker stats, e.g. 3/2+lethal
        #[arg(long)]
        attacker: StatsArg,

        /// Blocker stats, e.g. 2/2+shield
        #[arg(long)]
        blocker: StatsArg,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decide {
            snapshot,
            config,
            verbosity,
            json,
        } => run_decide(snapshot, config, verbosity.0, json),
        Commands::Classify { attacker, blocker } => {
            println!("{:?}", classify(&attacker.0, &blocker.0));
            Ok(())
        }
    }
}

fn run_decide(snapshot: PathBuf, config: Option<PathBuf>, verbosity: VerbosityLevel, json: bool) -> anyhow::Result<()> {
    let mut table = Table::load(&snapshot).with_context(|| format!("loading snapshot {}", snapshot.display()))?;

    let config = match config {
        Some(path) => AiConfig::load(&path).with_context(|| format!("loading config {}", path.display()))?,
        None => {
            let [first, second, ..] = table.players() else {
                bail!("snapshot needs at least two players");
            };
            AiConfig::new(first.id, second.id)
        }
    };

    // JSON output must not be interleaved with decision lines.
    let verbosity = if json { VerbosityLevel::Silent } else { verbosity };
    let ai = AiPlayer::with_logger(config, AiLogger::with_verbosity(verbosity));
    let decision = ai.decide(&mut table).context("decision failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
        return Ok(());
    }

    match decision {
        Decision::Actions { resource, sequence } => {
            if let Some(card) = resource {
                println!("resource: card {card}");
            }
            for action in &sequence.committed {
                println!("play: {action}");
            }
            println!("stopped after {} steps: {:?}", sequence.steps, sequence.stop);
        }
        Decision::Attack(attackers) => {
            for unit in attackers {
                println!("attack: unit {unit}");
            }
        }
        Decision::Block(blocks) => {
            for block in blocks {
                println!(
                    "block: unit {} blocks unit {} ({:?})",
                    block.blocker, block.attacker, block.outcome
                );
            }
        }
        Decision::Pass => println!("pass"),
    }
    Ok(())
}
