//! One hierarchy chain (exit or entry) on the register screen.

use std::fmt;

use crate::errors::FormError;
use crate::hierarchy::{Constraints, HierarchyLevel, MovementLeg};
use crate::lookup::LookupEngine;

/// Which half of a movement a leg belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Exit,
    Entry,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Self::Exit => "exit",
            Self::Entry => "entry",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current selections for the six levels of one chain. "" means unset.
///
/// Changing a level clears every level below it, so downstream values can
/// never outlive the upstream choice they were picked under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegSelection {
    values: [String; HierarchyLevel::COUNT],
}

impl LegSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `level` to `value` (trimmed). Returns true when the value
    /// changed, in which case all descendant levels were cleared.
    pub fn select(&mut self, level: HierarchyLevel, value: impl Into<String>) -> bool {
        let value: String = value.into();
        let value = value.trim();
        let slot = &mut self.values[level.index()];
        if slot.as_str() == value {
            return false;
        }
        *slot = value.to_string();
        for descendant in level.descendants() {
            self.values[descendant.index()].clear();
        }
        true
    }

    pub fn get(&self, level: HierarchyLevel) -> &str {
        &self.values[level.index()]
    }

    pub fn clear(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
    }

    /// True when every level has a value.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|v| !v.is_empty())
    }

    /// The selections above `level`, as query constraints.
    pub fn constraints_before(&self, level: HierarchyLevel) -> Constraints {
        level
            .ancestors()
            .iter()
            .map(|l| (*l, self.get(*l)))
            .collect()
    }

    /// Options to offer for `level` given what is selected above it.
    pub fn options(&self, engine: &LookupEngine, level: HierarchyLevel) -> Vec<String> {
        engine.options_for(level, &self.constraints_before(level))
    }

    pub fn suggest(&self, engine: &LookupEngine, level: HierarchyLevel, typed: &str) -> Vec<String> {
        engine.suggest(level, &self.constraints_before(level), typed)
    }

    /// Check every level top-down; the first empty or out-of-list value wins.
    pub fn validate(&self, engine: &LookupEngine, side: Side) -> Result<(), FormError> {
        for level in HierarchyLevel::ALL {
            let field = format!("{} ({side})", level.label());
            let value = self.get(level);
            if value.is_empty() {
                return Err(FormError::FieldRequired { field });
            }
            engine
                .validate_selection(level, value, &self.constraints_before(level))
                .map_err(|source| FormError::NotInOptions { field, source })?;
        }
        Ok(())
    }

    pub fn to_leg(&self, quantity: u32) -> MovementLeg {
        MovementLeg {
            unit: self.get(HierarchyLevel::Unit).to_string(),
            cost_center: self.get(HierarchyLevel::CostCenter).to_string(),
            subprocess: self.get(HierarchyLevel::Subprocess).to_string(),
            manager: self.get(HierarchyLevel::Manager).to_string(),
            post: self.get(HierarchyLevel::Post).to_string(),
            role: self.get(HierarchyLevel::Role).to_string(),
            quantity,
        }
    }
}
