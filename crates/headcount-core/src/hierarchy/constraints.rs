//! Constraint prefixes for cascading queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{HierarchyLevel, PositionRecord};
use crate::errors::SelectionError;

/// Fixed upper-level selections, level → value. Empty values are never
/// stored, so an empty selection always means "unconstrained".
///
/// Serialized as a plain `level = "value"` map. Deserialization goes through
/// [`Constraints::set`], so blank values drop and padded values are trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<HierarchyLevel, String>",
    into = "BTreeMap<HierarchyLevel, String>"
)]
pub struct Constraints {
    values: BTreeMap<HierarchyLevel, String>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Constraints::set`].
    pub fn with(mut self, level: HierarchyLevel, value: impl Into<String>) -> Self {
        self.set(level, value);
        self
    }

    /// Set the value for `level`. The value is trimmed; an empty value
    /// removes the constraint.
    pub fn set(&mut self, level: HierarchyLevel, value: impl Into<String>) {
        let value: String = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.values.remove(&level);
        } else {
            self.values.insert(level, trimmed.to_string());
        }
    }

    pub fn remove(&mut self, level: HierarchyLevel) {
        self.values.remove(&level);
    }

    pub fn get(&self, level: HierarchyLevel) -> Option<&str> {
        self.values.get(&level).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Constraints in nesting order.
    pub fn iter(&self) -> impl Iterator<Item = (HierarchyLevel, &str)> {
        self.values.iter().map(|(level, value)| (*level, value.as_str()))
    }

    /// Only the constraints that may filter `level`.
    pub fn prefix_for(&self, level: HierarchyLevel) -> impl Iterator<Item = (HierarchyLevel, &str)> {
        self.iter().filter(move |(l, _)| *l < level)
    }

    /// Constraints at or after `level`, which queries at `level` ignore.
    pub fn out_of_order(&self, level: HierarchyLevel) -> impl Iterator<Item = HierarchyLevel> + '_ {
        self.values.keys().copied().filter(move |l| *l >= level)
    }

    /// Strict check that every constraint sits strictly before `level`.
    pub fn check_prefix(&self, level: HierarchyLevel) -> Result<(), SelectionError> {
        match self.out_of_order(level).next() {
            Some(constraint) => Err(SelectionError::ConstraintOrderViolation {
                queried: level,
                constraint,
            }),
            None => Ok(()),
        }
    }

    /// True when `record` satisfies every constraint before `level`.
    pub fn matches(&self, record: &PositionRecord, level: HierarchyLevel) -> bool {
        self.prefix_for(level)
            .all(|(l, value)| record.field(l) == value)
    }
}

impl From<BTreeMap<HierarchyLevel, String>> for Constraints {
    fn from(values: BTreeMap<HierarchyLevel, String>) -> Self {
        values.into_iter().collect()
    }
}

impl From<Constraints> for BTreeMap<HierarchyLevel, String> {
    fn from(constraints: Constraints) -> Self {
        constraints.values
    }
}

impl<S: Into<String>> FromIterator<(HierarchyLevel, S)> for Constraints {
    fn from_iter<I: IntoIterator<Item = (HierarchyLevel, S)>>(iter: I) -> Self {
        let mut constraints = Self::new();
        for (level, value) in iter {
            constraints.set(level, value);
        }
        constraints
    }
}
