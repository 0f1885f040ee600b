//! Attacker/defender effectiveness tables

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::gen6::{GEN6_CHART, GEN6_NAME};
use crate::{ChartError, Type};

/// On-disk chart format: attacker name -> defender name -> multiplier.
///
/// Missing attackers and defenders are neutral (1.0). Names are parsed with
/// [`Type`]'s `FromStr`, so any casing or the short codes are accepted.
/// A key repeated verbatim at either level fails deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawChart(pub BTreeMap<String, BTreeMap<String, f32>>);

impl<'de> Deserialize<'de> for RawChart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = UniqueMap::<UniqueMap<f32>>::deserialize(deserializer)?;
        Ok(RawChart(
            rows.0
                .into_iter()
                .map(|(attacker, row)| (attacker, row.0))
                .collect(),
        ))
    }
}

/// JSON object whose keys must not repeat
struct UniqueMap<V>(BTreeMap<String, V>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for UniqueMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(UniqueMapVisitor(PhantomData))
    }
}

struct UniqueMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueMapVisitor<V> {
    type Value = UniqueMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of type names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = BTreeMap::new();
        while let Some(key) = map.next_key::<String>()? {
            match entries.entry(key) {
                Entry::Occupied(e) => {
                    return Err(de::Error::custom(format_args!(
                        "duplicate chart key {}",
                        e.key()
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(map.next_value()?);
                }
            }
        }
        Ok(UniqueMap(entries))
    }
}

/// Immutable effectiveness table.
///
/// Built once from a versioned data asset and shared by reference afterwards.
/// Cells without an explicit entry read as neutral (1.0).
#[derive(Debug, Clone, PartialEq)]
pub struct EffectivenessTable {
    name: String,
    entries: [[Option<f32>; Type::COUNT]; Type::COUNT],
}

impl EffectivenessTable {
    /// The built-in generation 6+ chart
    pub fn gen6() -> Self {
        let mut entries = [[None; Type::COUNT]; Type::COUNT];
        for (attacker, row) in GEN6_CHART.iter().enumerate() {
            for (defender, &multiplier) in row.iter().enumerate() {
                if multiplier != 1.0 {
                    entries[attacker][defender] = Some(multiplier);
                }
            }
        }
        Self::from_entries(GEN6_NAME, entries)
    }

    /// Build a table from the nested name mapping, validating every entry
    pub fn from_raw(name: impl Into<String>, raw: &RawChart) -> Result<Self, ChartError> {
        let mut entries = [[None; Type::COUNT]; Type::COUNT];

        for (attacker_name, row) in &raw.0 {
            let attacker: Type = attacker_name.parse()?;
            for (defender_name, &multiplier) in row {
                let defender: Type = defender_name.parse()?;
                if !multiplier.is_finite() || multiplier < 0.0 {
                    return Err(ChartError::MalformedTable {
                        attacker,
                        defender,
                        multiplier,
                    });
                }
                let cell = &mut entries[attacker.index()][defender.index()];
                if cell.is_some() {
                    return Err(ChartError::DuplicateEntry { attacker, defender });
                }
                *cell = Some(multiplier);
            }
        }

        Ok(Self::from_entries(name, entries))
    }

    /// Parse a JSON chart
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, ChartError> {
        let raw: RawChart = serde_json::from_str(json)?;
        Self::from_raw(name, &raw)
    }

    /// Load a JSON chart from disk, named after the file stem
    pub fn from_path(path: &Path) -> Result<Self, ChartError> {
        let json = std::fs::read_to_string(path).map_err(|source| ChartError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_json(name, &json)
    }

    fn from_entries(
        name: impl Into<String>,
        entries: [[Option<f32>; Type::COUNT]; Type::COUNT],
    ) -> Self {
        let table = Self {
            name: name.into(),
            entries,
        };
        tracing::debug!(
            chart = %table.name,
            entries = table.explicit_entries(),
            "Loaded effectiveness table"
        );
        table
    }

    /// Version label ("gen6", or the file stem of a loaded chart)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Multiplier for an attack of `attacker` type against a `defender` type
    pub fn lookup(&self, attacker: Type, defender: Type) -> f32 {
        self.explicit(attacker, defender).unwrap_or(1.0)
    }

    /// Like [`lookup`](Self::lookup), with both types given by name
    pub fn lookup_by_name(&self, attacker: &str, defender: &str) -> Result<f32, ChartError> {
        Ok(self.lookup(attacker.parse()?, defender.parse()?))
    }

    /// The supplied entry, or `None` when the cell defaulted to neutral
    pub fn explicit(&self, attacker: Type, defender: Type) -> Option<f32> {
        self.entries[attacker.index()][defender.index()]
    }

    /// Number of cells with an explicit entry
    pub fn explicit_entries(&self) -> usize {
        self.entries.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// Export the explicit entries in the on-disk format
    pub fn to_raw(&self) -> RawChart {
        let mut raw = BTreeMap::new();
        for attacker in Type::all() {
            let row: BTreeMap<String, f32> = Type::all()
                .iter()
                .filter_map(|defender| {
                    self.explicit(*attacker, *defender)
                        .map(|m| (defender.as_str().to_lowercase(), m))
                })
                .collect();
            if !row.is_empty() {
                raw.insert(attacker.as_str().to_uppercase(), row);
            }
        }
        RawChart(raw)
    }

    /// Export as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, ChartError> {
        Ok(serde_json::to_string_pretty(&self.to_raw())?)
    }
}

impl Default for EffectivenessTable {
    fn default() -> Self {
        Self::gen6()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_super_effective() {
        let table = EffectivenessTable::gen6();
        assert_eq!(table.lookup(Type::Fire, Type::Grass), 2.0);
        assert_eq!(table.lookup(Type::Water, Type::Fire), 2.0);
        assert_eq!(table.lookup(Type::Electric, Type::Water), 2.0);
        assert_eq!(table.lookup(Type::Fighting, Type::Normal), 2.0);
    }

    #[test]
    fn test_lookup_not_very_effective() {
        let table = EffectivenessTable::gen6();
        assert_eq!(table.lookup(Type::Fire, Type::Water), 0.5);
        assert_eq!(table.lookup(Type::Grass, Type::Fire), 0.5);
        assert_eq!(table.lookup(Type::Electric, Type::Grass), 0.5);
    }

    #[test]
    fn test_lookup_immune() {
        let table = EffectivenessTable::gen6();
        assert_eq!(table.lookup(Type::Normal, Type::Ghost), 0.0);
        assert_eq!(table.lookup(Type::Ghost, Type::Normal), 0.0);
        assert_eq!(table.lookup(Type::Electric, Type::Ground), 0.0);
        assert_eq!(table.lookup(Type::Ground, Type::Flying), 0.0);
        assert_eq!(table.lookup(Type::Psychic, Type::Dark), 0.0);
        assert_eq!(table.lookup(Type::Dragon, Type::Fairy), 0.0);
    }

    #[test]
    fn test_gen6_neutral_cells_are_not_explicit() {
        let table = EffectivenessTable::gen6();
        assert_eq!(table.name(), "gen6");
        assert_eq!(table.explicit(Type::Normal, Type::Normal), None);
        assert_eq!(table.lookup(Type::Normal, Type::Normal), 1.0);
        assert_eq!(table.explicit(Type::Fire, Type::Grass), Some(2.0));
    }

    #[test]
    fn test_missing_entries_default_to_neutral() {
        let table = EffectivenessTable::from_json("probe", r#"{"FIRE": {"grass": 2.0}}"#).unwrap();
        assert_eq!(table.lookup(Type::Fire, Type::Grass), 2.0);
        assert_eq!(table.lookup(Type::Fire, Type::Water), 1.0);
        assert_eq!(table.lookup(Type::Water, Type::Fire), 1.0);
        assert_eq!(table.explicit_entries(), 1);
    }

    #[test]
    fn test_lookup_by_name() {
        let table = EffectivenessTable::gen6();
        assert_eq!(table.lookup_by_name("FIRE", "grass").unwrap(), 2.0);
        assert_eq!(table.lookup_by_name("ghost", "Normal").unwrap(), 0.0);
        assert!(matches!(
            table.lookup_by_name("FIRE", "sound"),
            Err(ChartError::UnknownType(_))
        ));
    }

    #[test]
    fn test_unknown_type_rejected_at_load() {
        let err = EffectivenessTable::from_json("bad", r#"{"LIGHT": {"dark": 2.0}}"#).unwrap_err();
        assert!(matches!(err, ChartError::UnknownType(ref name) if name == "LIGHT"));
    }

    #[test]
    fn test_negative_multiplier_rejected_at_load() {
        let err = EffectivenessTable::from_json("bad", r#"{"FIRE": {"grass": -2.0}}"#).unwrap_err();
        assert!(matches!(
            err,
            ChartError::MalformedTable {
                attacker: Type::Fire,
                defender: Type::Grass,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_entry_rejected_at_load() {
        let err = EffectivenessTable::from_json(
            "bad",
            r#"{"FIRE": {"grass": 2.0}, "fire": {"Grass": 0.5}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::DuplicateEntry { .. }));
    }

    #[test]
    fn test_repeated_defender_key_rejected_at_load() {
        let err = EffectivenessTable::from_json("bad", r#"{"FIRE": {"grass": 2.0, "grass": 0.5}}"#)
            .unwrap_err();
        assert!(matches!(err, ChartError::Json(_)));
        assert!(err.to_string().contains("duplicate chart key grass"));
    }

    #[test]
    fn test_repeated_attacker_key_rejected_at_load() {
        let err = EffectivenessTable::from_json(
            "bad",
            r#"{"FIRE": {"grass": 2.0}, "FIRE": {"water": 0.5}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::Json(_)));
        assert!(err.to_string().contains("duplicate chart key FIRE"));
    }

    #[test]
    fn test_from_path_names_table_after_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen6-custom.json");
        let table = EffectivenessTable::gen6();
        std::fs::write(&path, table.to_json_pretty().unwrap()).unwrap();

        let loaded = EffectivenessTable::from_path(&path).unwrap();
        assert_eq!(loaded.name(), "gen6-custom");
        assert_eq!(loaded.to_raw(), table.to_raw());
        assert_eq!(loaded.lookup(Type::Ground, Type::Flying), 0.0);
    }

    #[test]
    fn test_invalid_json() {
        let err = EffectivenessTable::from_json("bad", "{not json").unwrap_err();
        assert!(matches!(err, ChartError::Json(_)));
    }

    #[test]
    fn test_export_round_trip() {
        let table = EffectivenessTable::gen6();
        let raw = table.to_raw();
        assert_eq!(raw.0["FIRE"]["grass"], 2.0);
        assert!(!raw.0["NORMAL"].contains_key("normal"));

        let json = table.to_json_pretty().unwrap();
        let reloaded = EffectivenessTable::from_json("gen6", &json).unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = EffectivenessTable::from_path(Path::new("/nonexistent/gen9.json")).unwrap_err();
        assert!(matches!(err, ChartError::Io { .. }));
    }
}
