//! LookupEngine: indexed, read-only view of the reference table.
//!
//! Retained rows are those with at least one non-empty hierarchy field.
//! Each level keeps a posting list (value → ascending row indices) so a
//! constrained query only visits rows matching its most selective
//! constraint. Results are always sorted ascending, deduplicated, and free
//! of empty strings.

use std::collections::BTreeSet;
use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::{info, warn};

use super::loader::load_reference_table;
use crate::errors::{DataSourceError, SelectionError};
use crate::hierarchy::{Constraints, HierarchyLevel, PositionRecord, RawRow};

type Postings = FxHashMap<String, Vec<usize>>;

/// Cascading option lookup. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct LookupEngine {
    rows: Vec<PositionRecord>,
    postings: [Postings; HierarchyLevel::COUNT],
    requesters: Vec<String>,
}

/// Result of [`LookupEngine::load_or_empty`]: always an engine, plus the
/// load failure when there was one.
#[derive(Debug)]
pub struct LoadOutcome {
    pub engine: LookupEngine,
    pub warning: Option<DataSourceError>,
}

impl LoadOutcome {
    pub fn is_clean(&self) -> bool {
        self.warning.is_none()
    }
}

impl LookupEngine {
    /// Build from raw rows. Missing or null cells read as "".
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawRow>,
    {
        Self::from_records(rows.into_iter().map(|row| PositionRecord::from_raw(&row)))
    }

    /// Build from already-normalized records.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = PositionRecord>,
    {
        let mut rows = Vec::new();
        let mut postings: [Postings; HierarchyLevel::COUNT] = Default::default();
        let mut requesters = BTreeSet::new();

        for record in records {
            if !record.requester.is_empty() {
                requesters.insert(record.requester.clone());
            }
            if !record.has_hierarchy() {
                continue;
            }
            let idx = rows.len();
            for level in HierarchyLevel::ALL {
                let value = record.field(level);
                if !value.is_empty() {
                    postings[level.index()]
                        .entry(value.to_string())
                        .or_default()
                        .push(idx);
                }
            }
            rows.push(record);
        }

        let engine = Self {
            rows,
            postings,
            requesters: requesters.into_iter().collect(),
        };
        info!(
            rows = engine.row_count(),
            requesters = engine.requester_count(),
            "lookup engine built"
        );
        engine
    }

    /// Load the CSV reference table at `path`.
    pub fn load(path: &Path) -> Result<Self, DataSourceError> {
        Ok(Self::build(load_reference_table(path)?))
    }

    /// Load `path`, falling back to an empty engine on any failure.
    pub fn load_or_empty(path: &Path) -> LoadOutcome {
        match Self::load(path) {
            Ok(engine) => LoadOutcome {
                engine,
                warning: None,
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "reference table unavailable, continuing with no options");
                LoadOutcome {
                    engine: Self::default(),
                    warning: Some(e),
                }
            }
        }
    }

    /// Valid values for `level` under `constraints`.
    ///
    /// Only constraints strictly before `level` filter; later ones are
    /// ignored. A constraint value absent from the data yields no options.
    pub fn options_for(&self, level: HierarchyLevel, constraints: &Constraints) -> Vec<String> {
        let ignored: Vec<HierarchyLevel> = constraints.out_of_order(level).collect();
        if !ignored.is_empty() {
            warn!(queried = %level, ignored = ?ignored, "ignoring constraints at or after the queried level");
        }

        let prefix: Vec<(HierarchyLevel, &str)> = constraints
            .prefix_for(level)
            .filter(|(_, value)| !value.is_empty())
            .collect();
        if prefix.is_empty() {
            let mut all: Vec<String> = self.postings[level.index()].keys().cloned().collect();
            all.sort_unstable();
            return all;
        }

        let mut narrowest: Option<&Vec<usize>> = None;
        for (l, value) in &prefix {
            match self.postings[l.index()].get(*value) {
                None => return Vec::new(),
                Some(list) => {
                    if narrowest.map_or(true, |n| list.len() < n.len()) {
                        narrowest = Some(list);
                    }
                }
            }
        }

        let mut values = BTreeSet::new();
        for &idx in narrowest.into_iter().flatten() {
            let row = &self.rows[idx];
            if prefix.iter().all(|(l, value)| row.field(*l) == *value) {
                let v = row.field(level);
                if !v.is_empty() {
                    values.insert(v);
                }
            }
        }
        values.into_iter().map(str::to_string).collect()
    }

    /// Sorted, deduplicated requester names from every row.
    pub fn requester_names(&self) -> Vec<String> {
        self.requesters.clone()
    }

    /// True iff `value` is non-empty and one of `options_for(level, constraints)`.
    pub fn is_valid_selection(
        &self,
        level: HierarchyLevel,
        value: &str,
        constraints: &Constraints,
    ) -> bool {
        !value.is_empty()
            && self
                .options_for(level, constraints)
                .binary_search_by(|opt| opt.as_str().cmp(value))
                .is_ok()
    }

    /// [`is_valid_selection`](Self::is_valid_selection) as a `Result`.
    pub fn validate_selection(
        &self,
        level: HierarchyLevel,
        value: &str,
        constraints: &Constraints,
    ) -> Result<(), SelectionError> {
        if self.is_valid_selection(level, value, constraints) {
            Ok(())
        } else {
            Err(SelectionError::InvalidSelection {
                level,
                value: value.to_string(),
            })
        }
    }

    pub fn is_valid_requester(&self, name: &str) -> bool {
        !name.is_empty()
            && self
                .requesters
                .binary_search_by(|r| r.as_str().cmp(name))
                .is_ok()
    }

    /// Options for `level` containing `typed`, case-insensitively.
    pub fn suggest(
        &self,
        level: HierarchyLevel,
        constraints: &Constraints,
        typed: &str,
    ) -> Vec<String> {
        filter_typed(self.options_for(level, constraints), typed)
    }

    pub fn suggest_requesters(&self, typed: &str) -> Vec<String> {
        filter_typed(self.requester_names(), typed)
    }

    /// Number of rows retained for hierarchy queries.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn requester_count(&self) -> usize {
        self.requesters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.requesters.is_empty()
    }

    /// Retained rows, in source order.
    pub fn records(&self) -> &[PositionRecord] {
        &self.rows
    }
}

fn filter_typed(options: Vec<String>, typed: &str) -> Vec<String> {
    let needle = typed.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    options
        .into_iter()
        .filter(|opt| opt.to_lowercase().contains(&needle))
        .collect()
}
