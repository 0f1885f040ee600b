//! Single and dual-type defensive combinations

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use typerank_chart::{EffectivenessTable, Type};

use crate::profile::DefenderProfile;
use crate::AnalysisError;

/// One or two types treated as a single defensive unit.
///
/// Constituents are stored sorted by name, so `(A, B)` and `(B, A)` build the
/// same combination, and `(A, A)` collapses to the single type `A`. Equality,
/// hashing and ordering only look at the constituent types.
#[derive(Debug, Clone)]
pub struct TypeCombination {
    types: Vec<Type>,
    name: String,
    resistances: BTreeMap<Type, f32>,
    weaknesses: BTreeMap<Type, f32>,
}

impl TypeCombination {
    pub fn new(table: &EffectivenessTable, type_1: Type, type_2: Option<Type>) -> Self {
        let mut types = vec![type_1];
        if let Some(t) = type_2.filter(|&t| t != type_1) {
            types.push(t);
        }
        types.sort();

        let name = types
            .iter()
            .map(Type::as_str)
            .collect::<Vec<_>>()
            .join(" + ");

        let merged = match types.as_slice() {
            [a, b] => merge_notables(
                &DefenderProfile::new(table, *a).notable_multipliers(false),
                &DefenderProfile::new(table, *b).notable_multipliers(false),
            ),
            _ => DefenderProfile::new(table, type_1).notable_multipliers(false),
        };

        let (resistances, weaknesses): (BTreeMap<_, _>, BTreeMap<_, _>) = merged
            .into_iter()
            .filter(|&(_, m)| m != 1.0)
            .partition(|&(_, m)| m < 1.0);

        tracing::trace!(
            combination = %name,
            resistances = resistances.len(),
            weaknesses = weaknesses.len(),
            "Built type combination"
        );

        Self {
            types,
            name,
            resistances,
            weaknesses,
        }
    }

    /// A mono-type combination
    pub fn single(table: &EffectivenessTable, t: Type) -> Self {
        Self::new(table, t, None)
    }

    /// A dual-type combination (collapses to a single type when `a == b`)
    pub fn pair(table: &EffectivenessTable, a: Type, b: Type) -> Self {
        Self::new(table, a, Some(b))
    }

    /// Build from type names; unknown names are an error
    pub fn from_names(
        table: &EffectivenessTable,
        type_1: &str,
        type_2: Option<&str>,
    ) -> Result<Self, AnalysisError> {
        let type_1: Type = type_1.parse()?;
        let type_2 = type_2.map(str::parse::<Type>).transpose()?;
        Ok(Self::new(table, type_1, type_2))
    }

    /// Constituent types, sorted by name
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    /// Canonical name, e.g. "Fire + Water"
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_single(&self) -> bool {
        self.types.len() == 1
    }

    pub fn contains(&self, t: Type) -> bool {
        self.types.contains(&t)
    }

    /// Attackers dealing less than 1x
    pub fn resistances(&self) -> &BTreeMap<Type, f32> {
        &self.resistances
    }

    /// Attackers dealing more than 1x
    pub fn weaknesses(&self) -> &BTreeMap<Type, f32> {
        &self.weaknesses
    }

    /// Every non-neutral multiplier after merging
    pub fn merged_multipliers(&self) -> BTreeMap<Type, f32> {
        self.resistances
            .iter()
            .chain(&self.weaknesses)
            .map(|(&t, &m)| (t, m))
            .collect()
    }

    /// Resistance count over weakness count
    pub fn ratio(&self) -> Result<f32, AnalysisError> {
        if self.weaknesses.is_empty() {
            return Err(AnalysisError::UndefinedRatio {
                combination: self.name.clone(),
                resistances: self.resistances.len(),
            });
        }
        Ok(self.resistances.len() as f32 / self.weaknesses.len() as f32)
    }
}

/// Stack two notable-multiplier maps.
///
/// Attackers present in both maps multiply; attackers present in one keep that
/// multiplier. Attackers neutral against both constituents never appear.
fn merge_notables(
    first: &BTreeMap<Type, f32>,
    second: &BTreeMap<Type, f32>,
) -> BTreeMap<Type, f32> {
    let mut combined: BTreeMap<Type, f32> = first
        .iter()
        .map(|(&attacker, &m)| (attacker, second.get(&attacker).map_or(m, |&other| m * other)))
        .collect();

    for (&attacker, &m) in second {
        combined.entry(attacker).or_insert(m);
    }

    combined
}

impl PartialEq for TypeCombination {
    fn eq(&self, other: &Self) -> bool {
        self.types == other.types
    }
}

impl Eq for TypeCombination {}

impl Hash for TypeCombination {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.types.hash(state);
    }
}

impl Ord for TypeCombination {
    fn cmp(&self, other: &Self) -> Ordering {
        self.types.cmp(&other.types)
    }
}

impl PartialOrd for TypeCombination {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for TypeCombination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
