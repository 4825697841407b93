//! The fixed nesting order unit → cost center → subprocess → manager → post → role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the six classification levels. The derived `Ord` follows the
/// nesting order, so `a < b` means `a` may constrain `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyLevel {
    Unit,
    CostCenter,
    Subprocess,
    Manager,
    Post,
    Role,
}

impl HierarchyLevel {
    /// All levels in nesting order.
    pub const ALL: [HierarchyLevel; 6] = [
        Self::Unit,
        Self::CostCenter,
        Self::Subprocess,
        Self::Manager,
        Self::Post,
        Self::Role,
    ];

    pub const COUNT: usize = 6;

    /// Zero-based position in the nesting order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Stable snake-case name, used in config, CLI arguments and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::CostCenter => "cost_center",
            Self::Subprocess => "subprocess",
            Self::Manager => "manager",
            Self::Post => "post",
            Self::Role => "role",
        }
    }

    /// Human-facing label for form messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unit => "Unit",
            Self::CostCenter => "Cost center",
            Self::Subprocess => "Subprocess",
            Self::Manager => "Manager",
            Self::Post => "Post",
            Self::Role => "Role",
        }
    }

    /// Levels strictly before `self`; these are the only ones allowed to
    /// constrain a query at `self`.
    pub fn ancestors(self) -> &'static [HierarchyLevel] {
        &Self::ALL[..self.index()]
    }

    /// Levels strictly after `self`; these are cleared when `self` changes.
    pub fn descendants(self) -> &'static [HierarchyLevel] {
        &Self::ALL[self.index() + 1..]
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HierarchyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|level| level.name() == normalized)
            .ok_or_else(|| format!("unknown hierarchy level: {s}"))
    }
}
