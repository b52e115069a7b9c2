//! Outcome accumulation for one batch.

use crate::types::Outcome;
use std::sync::RwLock;

/// Concurrency-safe accumulator gathering one outcome per dispatched item.
///
/// Writers (the batch workers) append under mutual exclusion; order is
/// whatever order workers complete in. No ordering contract is offered, so
/// the storage stays a plain locked vector.
pub struct OutcomeCollector {
    outcomes: RwLock<Vec<Outcome>>,
}

impl OutcomeCollector {
    pub fn new() -> Self {
        Self {
            outcomes: RwLock::new(Vec::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    pub fn add(&self, outcome: Outcome) {
        self.outcomes.write().unwrap().push(outcome);
    }

    pub fn len(&self) -> usize {
        self.outcomes.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take all collected outcomes, leaving the collector empty.
    pub fn drain(&self) -> Vec<Outcome> {
        std::mem::take(&mut *self.outcomes.write().unwrap())
    }
}

impl Default for OutcomeCollector {
    fn default() -> Self {
        Self::new()
    }
}
