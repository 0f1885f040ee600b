mod render;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use typerank_core::{
    DefenderProfile, EffectivenessTable, RankOptions, Ranker, SortMode, Type, TypeCombination,
};

use render::DetailStyle;

#[derive(Parser)]
#[command(name = "typerank", version)]
#[command(about = "Rank single and dual-type combinations by resistances per weakness")]
struct Cli {
    /// JSON chart to use instead of the built-in gen6 chart
    #[arg(long, value_name = "PATH", global = true)]
    chart: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank every combination
    Rank {
        /// ratio, res (most resistances) or weak (fewest weaknesses)
        #[arg(short, long, default_value = "ratio")]
        sort: SortMode,

        /// Only show combinations containing this type
        #[arg(short, long, value_name = "TYPE")]
        filter: Option<Type>,

        /// How to list resisted and super effective types
        #[arg(short, long, value_enum, default_value_t = DetailStyle::Codes)]
        detail: DetailStyle,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Fail if any combination has no weaknesses
        #[arg(long)]
        strict: bool,
    },

    /// Show the incoming multipliers of one type
    Profile {
        #[arg(value_name = "TYPE")]
        defender: Type,

        /// Include neutral attackers
        #[arg(long)]
        all: bool,
    },

    /// Show the merged profile of one or two types
    Combo {
        #[arg(value_name = "TYPE")]
        first: Type,

        #[arg(value_name = "TYPE")]
        second: Option<Type>,
    },

    /// Print the active chart as JSON
    Chart,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_table(path: Option<&Path>) -> Result<EffectivenessTable> {
    let table = match path {
        Some(path) => EffectivenessTable::from_path(path)
            .with_context(|| format!("Failed to load chart from {}", path.display()))?,
        None => EffectivenessTable::gen6(),
    };
    tracing::info!(
        chart = table.name(),
        entries = table.explicit_entries(),
        "Using effectiveness chart"
    );
    Ok(table)
}

fn run<W: Write>(command: &Command, table: &EffectivenessTable, out: &mut W) -> Result<()> {
    match command {
        Command::Rank {
            sort,
            filter,
            detail,
            json,
            strict,
        } => {
            let options = RankOptions {
                filter: *filter,
                sort: *sort,
            };
            let ranker = Ranker::new(table);
            let ranked = if *strict {
                ranker.rank_strict(&options).context("Strict ranking failed")?
            } else {
                ranker.rank(&options)
            };
            let written = if *json {
                render::write_json(out, &ranked)
            } else {
                render::write_table(out, &ranked, *detail)
            };
            written.context("Failed to write ranking")?;
        }
        Command::Profile { defender, all } => {
            let profile = DefenderProfile::new(table, *defender);
            render::write_profile(out, &profile, table.name(), *all)
                .context("Failed to write profile")?;
        }
        Command::Combo { first, second } => {
            let combination = TypeCombination::new(table, *first, *second);
            render::write_combination(out, &combination)
                .context("Failed to write combination")?;
        }
        Command::Chart => {
            let json = table.to_json_pretty().context("Failed to serialize chart")?;
            writeln!(out, "{json}").context("Failed to write chart")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let table = load_table(cli.chart.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli.command, &table, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let table = EffectivenessTable::gen6();
        let mut out = Vec::new();
        run(&cli.command, &table, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_rank_filtered_weak() {
        let text = run_args(&["typerank", "rank", "--sort", "weak", "--filter", "normal"]).unwrap();
        // Header, separator and 18 combinations containing Normal
        assert_eq!(text.lines().count(), 20);
        assert!(text.lines().skip(2).all(|line| line.contains("Normal")));
    }

    #[test]
    fn test_rank_json() {
        let text = run_args(&["typerank", "rank", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(171));
        assert_eq!(value[0]["position"], 1);
    }

    #[test]
    fn test_rank_strict_on_gen6() {
        assert!(run_args(&["typerank", "rank", "--strict"]).is_ok());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(Cli::try_parse_from(["typerank", "profile", "shadow"]).is_err());
        assert!(Cli::try_parse_from(["typerank", "rank", "--sort", "speed"]).is_err());
    }

    #[test]
    fn test_combo_command() {
        let text = run_args(&["typerank", "combo", "steel", "FAIRY"]).unwrap();
        assert!(text.starts_with("Fairy + Steel"));
    }

    #[test]
    fn test_chart_command_round_trips() {
        let text = run_args(&["typerank", "chart"]).unwrap();
        let reloaded = EffectivenessTable::from_json("gen6", &text).unwrap();
        assert_eq!(reloaded, EffectivenessTable::gen6());
    }

    #[test]
    fn test_load_table_from_chart_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen6-local.json");
        std::fs::write(&path, r#"{"FIRE": {"grass": 2.0}}"#).unwrap();

        let table = load_table(Some(path.as_path())).unwrap();
        assert_eq!(table.name(), "gen6-local");
        assert_eq!(table.explicit_entries(), 1);
        assert_eq!(table.lookup(Type::Fire, Type::Grass), 2.0);

        let missing = dir.path().join("missing.json");
        let err = load_table(Some(missing.as_path())).unwrap_err();
        assert!(err.to_string().contains("Failed to load chart from"));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["typerank", "rank", "-vv", "--chart", "gen7.json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.chart, Some(PathBuf::from("gen7.json")));
        assert!(Cli::try_parse_from(["typerank", "-q", "-v", "chart"]).is_err());
    }
}
