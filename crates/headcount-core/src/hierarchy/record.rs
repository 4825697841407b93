//! Reference table rows.

use super::HierarchyLevel;

/// One unparsed row of the reference table, cells in positional order
/// (unit, cost center, subprocess, manager, post, role, requester).
/// `None` stands for a null cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<Option<String>>,
}

impl RawRow {
    pub fn new(cells: Vec<Option<String>>) -> Self {
        Self { cells }
    }

    /// Trimmed cell at `index`; missing and null cells read as "".
    pub fn cell(&self, index: usize) -> &str {
        self.cells
            .get(index)
            .and_then(|c| c.as_deref())
            .map(str::trim)
            .unwrap_or("")
    }
}

impl<S: Into<String>> From<Vec<S>> for RawRow {
    fn from(cells: Vec<S>) -> Self {
        Self {
            cells: cells.into_iter().map(|c| Some(c.into())).collect(),
        }
    }
}

/// A normalized row: six trimmed hierarchy fields plus the independent
/// requester column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionRecord {
    pub unit: String,
    pub cost_center: String,
    pub subprocess: String,
    pub manager: String,
    pub post: String,
    pub role: String,
    pub requester: String,
}

impl PositionRecord {
    /// Normalize a raw row. Cells past the seventh are ignored.
    pub fn from_raw(row: &RawRow) -> Self {
        Self {
            unit: row.cell(0).to_string(),
            cost_center: row.cell(1).to_string(),
            subprocess: row.cell(2).to_string(),
            manager: row.cell(3).to_string(),
            post: row.cell(4).to_string(),
            role: row.cell(5).to_string(),
            requester: row.cell(6).to_string(),
        }
    }

    pub fn field(&self, level: HierarchyLevel) -> &str {
        match level {
            HierarchyLevel::Unit => &self.unit,
            HierarchyLevel::CostCenter => &self.cost_center,
            HierarchyLevel::Subprocess => &self.subprocess,
            HierarchyLevel::Manager => &self.manager,
            HierarchyLevel::Post => &self.post,
            HierarchyLevel::Role => &self.role,
        }
    }

    /// True when at least one of the six hierarchy fields is non-empty.
    pub fn has_hierarchy(&self) -> bool {
        HierarchyLevel::ALL
            .iter()
            .any(|level| !self.field(*level).is_empty())
    }
}
