//! Frameseed CLI - game RNG seed search and timer frame counts.
//!
//! - `frameseed find <SEED>` - steps from state 0 needed to reach SEED
//! - `frameseed frames <SEED>` - timer durations and frame counts for SEED's sample
//! - `frameseed bounds` - min/max frame counts of each timer table

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use frameseed_core::{timers, FrameseedConfig, LogConfig, SeedFinder, TimerKind};

#[derive(Parser)]
#[command(name = "frameseed")]
#[command(about = "Locate game RNG seeds and timer frame counts", version)]
struct Cli {
    /// Project directory holding .frameseed/config.yaml
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Explicit config file (overrides --project)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find how many generator steps from state 0 reach SEED
    Find {
        /// Observed 32-bit generator state (decimal or 0x-prefixed hex)
        #[arg(value_parser = parse_seed)]
        seed: u32,
    },

    /// Show timer durations and frame counts for SEED's high 16 bits
    Frames {
        /// Generator state (decimal or 0x-prefixed hex)
        #[arg(value_parser = parse_seed)]
        seed: u32,

        /// Only show this table (timer1 or timer2to4)
        #[arg(long)]
        timer: Option<TimerKind>,
    },

    /// Show the min/max frame counts of each table
    Bounds,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match (&cli.config, &cli.project) {
        (Some(path), _) => FrameseedConfig::load(path)?,
        (None, Some(root)) => FrameseedConfig::load_from_project(root)?,
        (None, None) => {
            let root = std::env::current_dir().context("Failed to get current directory")?;
            FrameseedConfig::load_from_project(&root)?
        }
    };

    init_logging(&config.log, cli.verbose);

    match cli.command {
        Commands::Find { seed } => find_seed(&config, seed).await,
        Commands::Frames { seed, timer } => {
            show_frames(seed, timer);
            Ok(())
        }
        Commands::Bounds => {
            show_bounds();
            Ok(())
        }
    }
}

fn init_logging(log: &LogConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level))
    };

    if log.json {
        fmt().json().with_env_filter(filter).with_target(false).init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }
}

async fn find_seed(config: &FrameseedConfig, seed: u32) -> Result<()> {
    let mut finder = SeedFinder::spawn(config.finder)?;
    finder.find(seed)?;

    let result = finder
        .wait_found(|progress| {
            println!(
                "checked {:>10} states ({:5.1}%)",
                progress.checked,
                progress.progress * 100.0
            );
        })
        .await
        .with_context(|| format!("No index found for seed {seed:#010x}"))?;

    println!("Seed {:#010x} found at index {}", result.seed.state(), result.index);
    Ok(())
}

fn show_frames(seed: u32, only: Option<TimerKind>) {
    let sample = (seed >> 16) as u16;
    println!("Seed {seed:#010x} (sample {sample})");

    for kind in TimerKind::ALL {
        if only.is_some_and(|k| k != kind) {
            continue;
        }
        let entry = timers::table(kind).entry(sample);
        println!(
            "  {:<10} {:>10.6}s  {:>5} frames",
            kind.name(),
            entry.timer,
            entry.frames
        );
    }
}

fn show_bounds() {
    for kind in TimerKind::ALL {
        println!(
            "{:<10} min {:>5} frames  max {:>5} frames",
            kind.name(),
            timers::min_frames(kind),
            timers::max_frames(kind)
        );
    }
}

fn parse_seed(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => trimmed.replace('_', "").parse::<u32>(),
    };
    match parsed {
        Ok(seed) => Ok(seed),
        Err(err) => bail!("invalid seed {raw:?}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_and_hex_seeds() {
        assert_eq!(parse_seed("12345").unwrap(), 12345);
        assert_eq!(parse_seed("0x3039").unwrap(), 12345);
        assert_eq!(parse_seed("0XD3DC_167E").unwrap(), 0xD3DC_167E);
        assert_eq!(parse_seed(" 4294967295 ").unwrap(), u32::MAX);
    }

    #[test]
    fn rejects_bad_seeds() {
        assert!(parse_seed("4294967296").is_err());
        assert!(parse_seed("0xZZ").is_err());
        assert!(parse_seed("").is_err());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["frameseed", "frames", "0x80000000", "--timer", "timer1"]).unwrap();
        match cli.command {
            Commands::Frames { seed, timer } => {
                assert_eq!(seed, 0x8000_0000);
                assert_eq!(timer, Some(TimerKind::Timer1));
            }
            _ => panic!("expected frames"),
        }

        assert!(Cli::try_parse_from(["frameseed", "frames", "1", "--timer", "timer9"]).is_err());
    }
}
