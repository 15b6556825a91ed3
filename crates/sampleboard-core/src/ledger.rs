//! Specialist workload ledger
//!
//! Owns the specialist roster and keeps each specialist's `active_tasks`
//! in lockstep with assignment and terminal resolution:
//! - one `acquire` per request entering `ASSIGNED`
//! - one `release` per request leaving its slot, floored at zero

use crate::error::BoardError;
use crate::types::{Specialist, SpecialistId};
use indexmap::IndexMap;

/// Incremental per-specialist workload counter
#[derive(Debug, Clone, Default)]
pub struct WorkloadLedger {
    /// Roster in load order
    specialists: IndexMap<SpecialistId, Specialist>,
}

impl WorkloadLedger {
    /// Create ledger from a preloaded roster
    ///
    /// Later duplicates replace earlier entries; config loading rejects
    /// duplicates before this point.
    #[must_use]
    pub fn new(roster: impl IntoIterator<Item = Specialist>) -> Self {
        Self {
            specialists: roster.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }

    /// Take one slot on a specialist
    ///
    /// # Errors
    /// - `BoardError::SpecialistNotFound` if the id is not in the roster
    pub fn acquire(&mut self, id: &SpecialistId) -> Result<u32, BoardError> {
        let specialist = self
            .specialists
            .get_mut(id)
            .ok_or_else(|| BoardError::SpecialistNotFound(id.clone()))?;
        specialist.active_tasks = specialist.active_tasks.saturating_add(1);
        tracing::debug!(
            specialist = %id,
            active_tasks = specialist.active_tasks,
            "workload acquired"
        );
        Ok(specialist.active_tasks)
    }

    /// Give back one slot, never going below zero
    ///
    /// An unknown id is ignored: requests only reference roster members,
    /// and specialists are never removed.
    pub fn release(&mut self, id: &SpecialistId) -> Option<u32> {
        let Some(specialist) = self.specialists.get_mut(id) else {
            tracing::warn!(specialist = %id, "release for specialist outside roster");
            return None;
        };
        if specialist.active_tasks == 0 {
            tracing::warn!(specialist = %id, "workload release floored at zero");
        }
        specialist.active_tasks = specialist.active_tasks.saturating_sub(1);
        tracing::debug!(
            specialist = %id,
            active_tasks = specialist.active_tasks,
            "workload released"
        );
        Some(specialist.active_tasks)
    }

    /// Current active task count
    #[inline]
    #[must_use]
    pub fn active_tasks(&self, id: &SpecialistId) -> Option<u32> {
        self.specialists.get(id).map(|s| s.active_tasks)
    }

    /// Check roster membership
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &SpecialistId) -> bool {
        self.specialists.contains_key(id)
    }

    /// Look up a specialist
    #[inline]
    #[must_use]
    pub fn get(&self, id: &SpecialistId) -> Option<&Specialist> {
        self.specialists.get(id)
    }

    /// Roster in load order
    pub fn specialists(&self) -> impl Iterator<Item = &Specialist> {
        self.specialists.values()
    }

    /// Number of specialists
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.specialists.len()
    }

    /// Whether the roster is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specialists.is_empty()
    }

    /// `(id, active_tasks)` pairs in roster order
    #[must_use]
    pub fn distribution(&self) -> Vec<(SpecialistId, u32)> {
        self.specialists
            .values()
            .map(|s| (s.id.clone(), s.active_tasks))
            .collect()
    }
}
