//! Recent calculation history
//!
//! A bounded, newest-first ring buffer. Pushing onto a full history evicts
//! the oldest entry.

use crate::result::CalculationResult;
use calc_template::{ParameterValueMap, TemplateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use ulid::Ulid;

/// Default number of retained entries
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// One successful calculation with the inputs it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationHistoryEntry {
    /// Sortable entry id
    pub id: Ulid,
    /// When the calculation finished
    pub timestamp: DateTime<Utc>,
    /// Template the calculation ran against
    pub template_id: TemplateId,
    /// Input snapshot
    pub inputs: ParameterValueMap,
    /// Successful result
    pub result: CalculationResult,
}

impl CalculationHistoryEntry {
    /// Entry stamped with the current time and a fresh id
    #[must_use]
    pub fn new(template_id: TemplateId, inputs: ParameterValueMap, result: CalculationResult) -> Self {
        Self {
            id: Ulid::new(),
            timestamp: Utc::now(),
            template_id,
            inputs,
            result,
        }
    }
}

/// Bounded newest-first history
#[derive(Debug, Clone)]
pub struct CalculationHistory {
    entries: VecDeque<CalculationHistoryEntry>,
    capacity: usize,
}

impl CalculationHistory {
    /// Create with `capacity`; zero keeps nothing
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the front, returning the evicted entry if the buffer was full
    pub fn push(&mut self, entry: CalculationHistoryEntry) -> Option<CalculationHistoryEntry> {
        if self.capacity == 0 {
            return Some(entry);
        }
        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    /// Entry by id
    #[must_use]
    pub fn get(&self, id: Ulid) -> Option<&CalculationHistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Most recent entry
    #[inline]
    #[must_use]
    pub fn latest(&self) -> Option<&CalculationHistoryEntry> {
        self.entries.front()
    }

    /// Entries, newest first
    pub fn iter(&self) -> impl Iterator<Item = &CalculationHistoryEntry> {
        self.entries.iter()
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for CalculationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
