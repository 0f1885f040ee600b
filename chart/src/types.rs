//! Type registry: the closed set of monster types

use std::cmp::Ordering;
use std::str::FromStr;

use crate::ChartError;

/// Monster types (18 types as of Gen 6+)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Type {
    Normal = 0,
    Fire = 1,
    Water = 2,
    Electric = 3,
    Grass = 4,
    Ice = 5,
    Fighting = 6,
    Poison = 7,
    Ground = 8,
    Flying = 9,
    Psychic = 10,
    Bug = 11,
    Rock = 12,
    Ghost = 13,
    Dragon = 14,
    Dark = 15,
    Steel = 16,
    Fairy = 17,
}

impl Type {
    /// Number of registered types
    pub const COUNT: usize = 18;

    /// All 18 types in dex order
    pub const ALL: [Type; Type::COUNT] = [
        Type::Normal,
        Type::Fire,
        Type::Water,
        Type::Electric,
        Type::Grass,
        Type::Ice,
        Type::Fighting,
        Type::Poison,
        Type::Ground,
        Type::Flying,
        Type::Psychic,
        Type::Bug,
        Type::Rock,
        Type::Ghost,
        Type::Dragon,
        Type::Dark,
        Type::Steel,
        Type::Fairy,
    ];

    /// Get all types as a slice
    pub fn all() -> &'static [Type] {
        &Self::ALL
    }

    /// Position of this type in [`Type::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Type::Normal => "Normal",
            Type::Fire => "Fire",
            Type::Water => "Water",
            Type::Electric => "Electric",
            Type::Grass => "Grass",
            Type::Ice => "Ice",
            Type::Fighting => "Fighting",
            Type::Poison => "Poison",
            Type::Ground => "Ground",
            Type::Flying => "Flying",
            Type::Psychic => "Psychic",
            Type::Bug => "Bug",
            Type::Rock => "Rock",
            Type::Ghost => "Ghost",
            Type::Dragon => "Dragon",
            Type::Dark => "Dark",
            Type::Steel => "Steel",
            Type::Fairy => "Fairy",
        }
    }

    /// Short code used in compact tables
    pub fn code(&self) -> &'static str {
        match self {
            Type::Normal => "NRM",
            Type::Fire => "FIR",
            Type::Water => "WTR",
            Type::Electric => "ELC",
            Type::Grass => "GRS",
            Type::Ice => "ICE",
            Type::Fighting => "FGT",
            Type::Poison => "PSN",
            Type::Ground => "GRD",
            Type::Flying => "FLY",
            Type::Psychic => "PSY",
            Type::Bug => "BUG",
            Type::Rock => "RCK",
            Type::Ghost => "GHT",
            Type::Dragon => "DRG",
            Type::Dark => "DRK",
            Type::Steel => "STL",
            Type::Fairy => "FRY",
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses a type name or code in any casing ("fire", "FIRE", "Fire", "FIR")
impl FromStr for Type {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Type::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s) || t.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ChartError::UnknownType(s.to_string()))
    }
}

// Types order by name so combinations built from them sort the same way
// regardless of argument order.
impl Ord for Type {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Type {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_from_str() {
        assert_eq!("Fire".parse::<Type>().unwrap(), Type::Fire);
        assert_eq!("fire".parse::<Type>().unwrap(), Type::Fire);
        assert_eq!("FIRE".parse::<Type>().unwrap(), Type::Fire);
        assert_eq!("Psychic".parse::<Type>().unwrap(), Type::Psychic);
    }

    #[test]
    fn test_type_from_code() {
        assert_eq!("FRY".parse::<Type>().unwrap(), Type::Fairy);
        assert_eq!("ght".parse::<Type>().unwrap(), Type::Ghost);
    }

    #[test]
    fn test_type_from_str_unknown() {
        let err = "shadow".parse::<Type>().unwrap_err();
        assert!(matches!(err, ChartError::UnknownType(ref name) if name == "shadow"));
    }

    #[test]
    fn test_type_as_str() {
        assert_eq!(Type::Fire.as_str(), "Fire");
        assert_eq!(Type::Psychic.as_str(), "Psychic");
        assert_eq!(Type::Normal.to_string(), "Normal");
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = Type::all().iter().map(|t| t.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), Type::COUNT);
    }

    #[test]
    fn test_all_types() {
        assert_eq!(Type::all().len(), 18);
        assert_eq!(Type::all()[0], Type::Normal);
        assert_eq!(Type::all()[17], Type::Fairy);
        for (i, t) in Type::all().iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn test_ordering_is_by_name() {
        assert!(Type::Bug < Type::Normal);
        assert!(Type::Water > Type::Steel);
        let mut sorted = Type::ALL;
        sorted.sort();
        assert_eq!(sorted[0], Type::Bug);
        assert_eq!(sorted[17], Type::Water);
    }
}
