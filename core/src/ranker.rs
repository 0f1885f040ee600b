//! Ranking every single and dual-type combination

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;

use typerank_chart::{EffectivenessTable, Type};

use crate::combination::TypeCombination;
use crate::AnalysisError;

/// Primary sort key of a ranking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Resistance/weakness ratio, best first
    #[default]
    Ratio,
    /// Resistance count, most first
    Resistances,
    /// Weakness count, fewest first
    Weaknesses,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Ratio => "ratio",
            SortMode::Resistances => "res",
            SortMode::Weaknesses => "weak",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ratio" | "rank" => Ok(SortMode::Ratio),
            "res" | "resistances" => Ok(SortMode::Resistances),
            "weak" | "weaknesses" => Ok(SortMode::Weaknesses),
            _ => Err(AnalysisError::InvalidSortMode(s.to_string())),
        }
    }
}

/// What to rank and how
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankOptions {
    /// Keep only combinations containing this type
    pub filter: Option<Type>,
    pub sort: SortMode,
}

impl RankOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Type) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }
}

/// One row of a ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCombination {
    /// 1-based row number after filtering
    pub position: usize,
    pub combination: TypeCombination,
    /// `None` when the combination has no weaknesses
    pub ratio: Option<f32>,
}

/// Ranks combinations built from one effectiveness table
#[derive(Debug, Clone, Copy)]
pub struct Ranker<'a> {
    table: &'a EffectivenessTable,
}

impl<'a> Ranker<'a> {
    pub fn new(table: &'a EffectivenessTable) -> Self {
        Self { table }
    }

    /// Every distinct combination: each single type plus each unordered pair
    pub fn combinations(&self) -> BTreeSet<TypeCombination> {
        let mut all = BTreeSet::new();
        for &type_1 in Type::all() {
            for &type_2 in Type::all() {
                all.insert(TypeCombination::pair(self.table, type_1, type_2));
            }
        }
        all
    }

    /// Rank all combinations. Undefined ratios are kept and logged.
    pub fn rank(&self, options: &RankOptions) -> Vec<RankedCombination> {
        let scored = self
            .combinations()
            .into_iter()
            .map(|combination| {
                let ratio = match combination.ratio() {
                    Ok(ratio) => Some(ratio),
                    Err(e) => {
                        tracing::warn!(error = %e, "Ranking combination without a ratio");
                        None
                    }
                };
                (combination, ratio)
            })
            .collect();
        Self::order(scored, options)
    }

    /// Like [`rank`](Self::rank), but fails on the first undefined ratio
    pub fn rank_strict(
        &self,
        options: &RankOptions,
    ) -> Result<Vec<RankedCombination>, AnalysisError> {
        let scored = self
            .combinations()
            .into_iter()
            .map(|combination| {
                let ratio = combination.ratio()?;
                Ok((combination, Some(ratio)))
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;
        Ok(Self::order(scored, options))
    }

    fn order(
        mut scored: Vec<(TypeCombination, Option<f32>)>,
        options: &RankOptions,
    ) -> Vec<RankedCombination> {
        scored.sort_by(|a, b| compare(options.sort, a, b));

        let ranked: Vec<_> = scored
            .into_iter()
            .filter(|(combination, _)| options.filter.is_none_or(|t| combination.contains(t)))
            .enumerate()
            .map(|(i, (combination, ratio))| RankedCombination {
                position: i + 1,
                combination,
                ratio,
            })
            .collect();

        tracing::debug!(
            sort = %options.sort,
            filter = ?options.filter,
            rows = ranked.len(),
            "Ranked combinations"
        );
        ranked
    }
}

/// Primary key per sort mode, then canonical name ascending
fn compare(
    mode: SortMode,
    (a, a_ratio): &(TypeCombination, Option<f32>),
    (b, b_ratio): &(TypeCombination, Option<f32>),
) -> Ordering {
    let primary = match mode {
        SortMode::Ratio => match (a_ratio, b_ratio) {
            (Some(x), Some(y)) => y.total_cmp(x),
            // No weaknesses outranks any finite ratio
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => b.resistances().len().cmp(&a.resistances().len()),
        },
        SortMode::Resistances => b.resistances().len().cmp(&a.resistances().len()),
        SortMode::Weaknesses => a.weaknesses().len().cmp(&b.weaknesses().len()),
    };
    primary.then_with(|| a.name().cmp(b.name()))
}
