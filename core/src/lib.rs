//! Defensive type analysis: profiles, dual-type merging and rankings.
//!
//! # Overview
//!
//! `typerank-core` sits on top of `typerank-chart`:
//!
//! ```text
//! typerank-chart (types + effectiveness tables)
//!        │
//!        ▼
//! typerank-core (profiles, combinations, ranking) ← THIS CRATE
//!        │
//!        ▼
//! typerank-cli (tables on the terminal)
//! ```
//!
//! # Main Types
//!
//! - [`DefenderProfile`] - notable incoming multipliers for one type
//! - [`TypeCombination`] - one or two types merged into a single defensive unit
//! - [`Ranker`] - orders all 171 combinations by ratio, resistances or weaknesses
//!
//! # Example Usage
//!
//! ```
//! use typerank_core::{EffectivenessTable, RankOptions, Ranker, SortMode, Type, TypeCombination};
//!
//! let table = EffectivenessTable::gen6();
//!
//! let swampert = TypeCombination::pair(&table, Type::Water, Type::Ground);
//! assert_eq!(swampert.weaknesses().len(), 1);
//!
//! let options = RankOptions::new()
//!     .with_sort(SortMode::Weaknesses)
//!     .with_filter(Type::Normal);
//! for row in Ranker::new(&table).rank(&options).iter().take(3) {
//!     println!("{} {}", row.position, row.combination);
//! }
//! ```

use thiserror::Error;

mod combination;
mod profile;
mod ranker;

pub use combination::TypeCombination;
pub use profile::DefenderProfile;
pub use ranker::{RankOptions, RankedCombination, Ranker, SortMode};

// Re-export chart types
pub use typerank_chart::{ChartError, EffectivenessTable, Type};

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Ratio of {combination} is undefined: {resistances} resistances and no weaknesses")]
    UndefinedRatio {
        combination: String,
        resistances: usize,
    },

    #[error("Unknown sort mode: {0} (use ratio, res or weak)")]
    InvalidSortMode(String),

    #[error(transparent)]
    Chart(#[from] ChartError),
}
