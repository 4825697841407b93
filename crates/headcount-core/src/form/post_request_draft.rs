//! "Post not found" request form.

use chrono::{DateTime, Utc};

use crate::errors::FormError;
use crate::hierarchy::{Constraints, HierarchyLevel, PostRequest};
use crate::lookup::LookupEngine;

/// Unit, cost center, subprocess and manager cascade like the register
/// screen. The role is free of the cascade: the post does not exist yet,
/// so any known role may be requested for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostRequestDraft {
    pub unit: String,
    pub cost_center: String,
    pub subprocess: String,
    pub manager: String,
    pub role: String,
}

const CASCADE: [HierarchyLevel; 4] = [
    HierarchyLevel::Unit,
    HierarchyLevel::CostCenter,
    HierarchyLevel::Subprocess,
    HierarchyLevel::Manager,
];

impl PostRequestDraft {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, level: HierarchyLevel) -> Option<&mut String> {
        match level {
            HierarchyLevel::Unit => Some(&mut self.unit),
            HierarchyLevel::CostCenter => Some(&mut self.cost_center),
            HierarchyLevel::Subprocess => Some(&mut self.subprocess),
            HierarchyLevel::Manager => Some(&mut self.manager),
            HierarchyLevel::Role => Some(&mut self.role),
            HierarchyLevel::Post => None,
        }
    }

    pub fn get(&self, level: HierarchyLevel) -> &str {
        match level {
            HierarchyLevel::Unit => &self.unit,
            HierarchyLevel::CostCenter => &self.cost_center,
            HierarchyLevel::Subprocess => &self.subprocess,
            HierarchyLevel::Manager => &self.manager,
            HierarchyLevel::Role => &self.role,
            HierarchyLevel::Post => "",
        }
    }

    /// Set a field; cascade levels clear the cascade levels below them.
    /// Setting `Post` is a no-op since the request has no post.
    pub fn select(&mut self, level: HierarchyLevel, value: impl Into<String>) {
        let value: String = value.into();
        let value = value.trim().to_string();
        let Some(slot) = self.slot_mut(level) else {
            return;
        };
        if *slot == value {
            return;
        }
        *slot = value;
        if let Some(pos) = CASCADE.iter().position(|l| *l == level) {
            for below in &CASCADE[pos + 1..] {
                if let Some(slot) = self.slot_mut(*below) {
                    slot.clear();
                }
            }
        }
    }

    fn constraints_before(&self, level: HierarchyLevel) -> Constraints {
        if level == HierarchyLevel::Role {
            return Constraints::new();
        }
        CASCADE
            .iter()
            .filter(|l| **l < level)
            .map(|l| (*l, self.get(*l)))
            .collect()
    }

    pub fn options(&self, engine: &LookupEngine, level: HierarchyLevel) -> Vec<String> {
        engine.options_for(level, &self.constraints_before(level))
    }

    /// All five fields are required before any of them is checked against
    /// the reference table.
    pub fn validate(&self, engine: &LookupEngine) -> Result<(), FormError> {
        let fields = CASCADE.iter().copied().chain([HierarchyLevel::Role]);
        for level in fields.clone() {
            if self.get(level).is_empty() {
                return Err(FormError::FieldRequired {
                    field: level.label().to_string(),
                });
            }
        }
        for level in fields {
            engine
                .validate_selection(level, self.get(level), &self.constraints_before(level))
                .map_err(|source| FormError::NotInOptions {
                    field: level.label().to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    pub fn confirm(
        &self,
        engine: &LookupEngine,
        submitted_by: &str,
        now: DateTime<Utc>,
    ) -> Result<PostRequest, FormError> {
        self.validate(engine)?;
        Ok(PostRequest {
            unit: self.unit.clone(),
            cost_center: self.cost_center.clone(),
            subprocess: self.subprocess.clone(),
            manager: self.manager.clone(),
            role: self.role.clone(),
            requested_at: now,
            submitted_by: submitted_by.to_string(),
        })
    }
}
