//! Terminal rendering of rankings, profiles and combinations

use std::collections::BTreeMap;
use std::io::{self, Write};

use clap::ValueEnum;
use serde_json::json;
use typerank_core::{DefenderProfile, RankedCombination, Type, TypeCombination};

/// How the detail columns list attacking types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DetailStyle {
    /// Short type codes (FIR, WTR, ...)
    #[default]
    Codes,
    /// Type names
    Names,
    /// Type names with their multiplier
    Full,
}

fn multiplier(m: f32) -> String {
    format!("{m}x")
}

fn details(entries: &BTreeMap<Type, f32>, style: DetailStyle) -> String {
    entries
        .iter()
        .map(|(t, &m)| match style {
            DetailStyle::Codes => t.code().to_string(),
            DetailStyle::Names => t.as_str().to_string(),
            DetailStyle::Full => format!("{} ({})", t, multiplier(m)),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn ratio_cell(ratio: Option<f32>) -> String {
    match ratio {
        Some(r) => format!("{r:.2}"),
        None => "inf".to_string(),
    }
}

pub fn header() -> String {
    format!(
        "{:<4} | {:<5} | {:<20} | {:<4} | {:<4} | {:<59} | {}",
        "#", "Ratio", "Type", "Res", "Weak", "Resistances Details", "Weaknesses Details"
    )
}

pub fn row(ranked: &RankedCombination, style: DetailStyle) -> String {
    let combination = &ranked.combination;
    let line = format!(
        "{:<4} | {:<5} | {:<20} | {:<4} | {:<4} | {:<59} | {}",
        ranked.position,
        ratio_cell(ranked.ratio),
        combination.name(),
        combination.resistances().len(),
        combination.weaknesses().len(),
        details(combination.resistances(), style),
        details(combination.weaknesses(), style),
    );
    line.trim_end().to_string()
}

/// The ranking as an aligned table
pub fn write_table<W: Write>(
    out: &mut W,
    ranked: &[RankedCombination],
    style: DetailStyle,
) -> io::Result<()> {
    let header = header();
    writeln!(out, "{header}")?;
    writeln!(out, "{}", "-".repeat(header.len()))?;
    for r in ranked {
        writeln!(out, "{}", row(r, style))?;
    }
    Ok(())
}

/// The ranking as a JSON array, in rank order
pub fn write_json<W: Write>(out: &mut W, ranked: &[RankedCombination]) -> io::Result<()> {
    let rows: Vec<_> = ranked
        .iter()
        .map(|r| {
            json!({
                "position": r.position,
                "name": r.combination.name(),
                "ratio": r.ratio,
                "resistances": r.combination.resistances().len(),
                "weaknesses": r.combination.weaknesses().len(),
            })
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &rows)?;
    writeln!(out)
}

fn write_group<W: Write>(out: &mut W, label: &str, entries: &BTreeMap<Type, f32>) -> io::Result<()> {
    let listed = entries
        .iter()
        .map(|(t, &m)| format!("{} {}", t, multiplier(m)))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(out, "{:<16} {}", format!("{label} ({}):", entries.len()), listed)
}

/// Incoming multipliers against one defending type
pub fn write_profile<W: Write>(
    out: &mut W,
    profile: &DefenderProfile<'_>,
    chart: &str,
    include_neutral: bool,
) -> io::Result<()> {
    writeln!(out, "{} ({chart})", profile.defender())?;

    if include_neutral {
        for (attacker, m) in profile.notable_multipliers(true) {
            writeln!(out, "  {:<10} {}", attacker.as_str(), multiplier(m))?;
        }
        return Ok(());
    }

    write_group(out, "Weaknesses", &profile.weaknesses())?;
    write_group(out, "Resistances", &profile.resistances())?;
    let immunities = profile
        .immunities()
        .iter()
        .map(Type::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(
        out,
        "{:<16} {}",
        format!("Immunities ({}):", profile.immunities().len()),
        immunities
    )
}

/// Merged profile of one combination
pub fn write_combination<W: Write>(out: &mut W, combination: &TypeCombination) -> io::Result<()> {
    match combination.ratio() {
        Ok(ratio) => writeln!(out, "{} (ratio {ratio:.2})", combination.name())?,
        Err(e) => writeln!(out, "{} ({e})", combination.name())?,
    }
    write_group(out, "Weaknesses", combination.weaknesses())?;
    write_group(out, "Resistances", combination.resistances())
}
