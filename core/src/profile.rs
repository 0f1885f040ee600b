//! Per-type defensive profiles

use std::collections::BTreeMap;

use typerank_chart::{EffectivenessTable, Type};

/// Incoming multipliers for a single defending type
#[derive(Debug, Clone, Copy)]
pub struct DefenderProfile<'a> {
    table: &'a EffectivenessTable,
    defender: Type,
}

impl<'a> DefenderProfile<'a> {
    pub fn new(table: &'a EffectivenessTable, defender: Type) -> Self {
        Self { table, defender }
    }

    pub fn defender(&self) -> Type {
        self.defender
    }

    /// Multiplier of every attacking type against this defender.
    ///
    /// Neutral (1.0) attackers are left out unless `include_neutral` is set.
    pub fn notable_multipliers(&self, include_neutral: bool) -> BTreeMap<Type, f32> {
        Type::all()
            .iter()
            .map(|&attacker| (attacker, self.table.lookup(attacker, self.defender)))
            .filter(|&(_, multiplier)| include_neutral || multiplier != 1.0)
            .collect()
    }

    /// Attackers this type takes reduced damage from (< 1x, immunities included)
    pub fn resistances(&self) -> BTreeMap<Type, f32> {
        self.notable_multipliers(false)
            .into_iter()
            .filter(|&(_, m)| m < 1.0)
            .collect()
    }

    /// Attackers that are super effective against this type (> 1x)
    pub fn weaknesses(&self) -> BTreeMap<Type, f32> {
        self.notable_multipliers(false)
            .into_iter()
            .filter(|&(_, m)| m > 1.0)
            .collect()
    }

    /// Attackers this type is immune to (0x)
    pub fn immunities(&self) -> Vec<Type> {
        self.notable_multipliers(false)
            .into_iter()
            .filter(|&(_, m)| m == 0.0)
            .map(|(t, _)| t)
            .collect()
    }
}
