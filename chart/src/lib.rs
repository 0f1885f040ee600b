//! Type registry and effectiveness charts.
//!
//! `typerank-chart` is the data layer of the workspace:
//!
//! ```text
//! typerank-chart (types + effectiveness tables) ← THIS CRATE
//!        │
//!        ▼
//! typerank-core (profiles, combinations, ranking)
//!        │
//!        ▼
//! typerank-cli (tables on the terminal)
//! ```
//!
//! # Main Types
//!
//! - [`Type`] - the closed set of 18 types with display codes
//! - [`EffectivenessTable`] - immutable attacker/defender multipliers
//! - [`RawChart`] - the JSON data asset a table is loaded from
//!
//! # Example Usage
//!
//! ```
//! use typerank_chart::{EffectivenessTable, Type};
//!
//! let table = EffectivenessTable::gen6();
//! assert_eq!(table.lookup(Type::Fire, Type::Grass), 2.0);
//!
//! let custom = EffectivenessTable::from_json("probe", r#"{"FIRE": {"grass": 2.0}}"#).unwrap();
//! assert_eq!(custom.lookup(Type::Water, Type::Fire), 1.0);
//! ```

use std::path::PathBuf;

use thiserror::Error;

mod gen6;
mod table;
mod types;

pub use gen6::{GEN6_CHART, GEN6_NAME};
pub use table::{EffectivenessTable, RawChart};
pub use types::Type;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Malformed chart entry {attacker} -> {defender}: {multiplier} is not a valid multiplier")]
    MalformedTable {
        attacker: Type,
        defender: Type,
        multiplier: f32,
    },

    #[error("Duplicate chart entry {attacker} -> {defender}")]
    DuplicateEntry { attacker: Type, defender: Type },

    #[error("Invalid chart JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read chart at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
