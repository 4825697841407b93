//! Register screen: requester, two legs, two quantities.

use chrono::{DateTime, Utc};

use super::leg::{LegSelection, Side};
use crate::constants::MIN_QUANTITY;
use crate::errors::FormError;
use crate::hierarchy::MovementRecord;
use crate::lookup::LookupEngine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementDraft {
    pub requester: String,
    pub exit: LegSelection,
    pub entry: LegSelection,
    pub exit_quantity: u32,
    pub entry_quantity: u32,
}

impl Default for MovementDraft {
    fn default() -> Self {
        Self {
            requester: String::new(),
            exit: LegSelection::new(),
            entry: LegSelection::new(),
            exit_quantity: MIN_QUANTITY,
            entry_quantity: MIN_QUANTITY,
        }
    }
}

impl MovementDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_requester(&mut self, name: impl Into<String>) {
        let name: String = name.into();
        self.requester = name.trim().to_string();
    }

    pub fn leg(&self, side: Side) -> &LegSelection {
        match side {
            Side::Exit => &self.exit,
            Side::Entry => &self.entry,
        }
    }

    pub fn leg_mut(&mut self, side: Side) -> &mut LegSelection {
        match side {
            Side::Exit => &mut self.exit,
            Side::Entry => &mut self.entry,
        }
    }

    pub fn quantity(&self, side: Side) -> u32 {
        match side {
            Side::Exit => self.exit_quantity,
            Side::Entry => self.entry_quantity,
        }
    }

    /// Set a quantity as typed. Out-of-range values are caught by `validate`.
    pub fn set_quantity(&mut self, side: Side, quantity: u32) {
        match side {
            Side::Exit => self.exit_quantity = quantity,
            Side::Entry => self.entry_quantity = quantity,
        }
    }

    /// Stepper buttons: add `delta`, refusing to go below the minimum.
    /// Returns the resulting quantity.
    pub fn adjust_quantity(&mut self, side: Side, delta: i64) -> u32 {
        let current = i64::from(self.quantity(side));
        let next = current.saturating_add(delta);
        if next >= i64::from(MIN_QUANTITY) {
            self.set_quantity(side, u32::try_from(next).unwrap_or(u32::MAX));
        }
        self.quantity(side)
    }

    /// Requester first, then the exit chain, then the entry chain, then
    /// quantities. Reports only the first problem.
    pub fn validate(&self, engine: &LookupEngine) -> Result<(), FormError> {
        if self.requester.is_empty() {
            return Err(FormError::FieldRequired {
                field: "Requester".to_string(),
            });
        }
        if !engine.is_valid_requester(&self.requester) {
            return Err(FormError::UnknownRequester {
                field: "Requester".to_string(),
                name: self.requester.clone(),
            });
        }
        self.exit.validate(engine, Side::Exit)?;
        self.entry.validate(engine, Side::Entry)?;
        for side in [Side::Exit, Side::Entry] {
            let value = self.quantity(side);
            if value < MIN_QUANTITY {
                return Err(FormError::InvalidQuantity {
                    field: format!("Quantity ({side})"),
                    value,
                    min: MIN_QUANTITY,
                });
            }
        }
        Ok(())
    }

    /// Validate and freeze into a record for the store.
    pub fn confirm(
        &self,
        engine: &LookupEngine,
        system_user: &str,
        now: DateTime<Utc>,
    ) -> Result<MovementRecord, FormError> {
        self.validate(engine)?;
        Ok(MovementRecord {
            system_user: system_user.to_string(),
            submitted_at: now,
            requester: self.requester.clone(),
            exit: self.exit.to_leg(self.exit_quantity),
            entry: self.entry.to_leg(self.entry_quantity),
        })
    }

    /// Back to a blank form after a successful save.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
