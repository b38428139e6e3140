//! Generation tokens and settle-all batches.
//!
//! Both primitives exist because responses arrive one by one as host events:
//! a [`Generation`] lets a controller recognise replies to requests it has since
//! superseded, and a [`SettledBatch`] joins a fixed set of concurrent requests,
//! recording each outcome without letting one failure abort the others.

use crate::domain::error::{BookscopeError, Result};

/// Monotonic token identifying the latest request set for one result slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    /// Advances to a fresh generation and returns it.
    pub fn advance(&mut self) -> Self {
        self.0 += 1;
        *self
    }
}

/// Outcome of one batch entry.
#[derive(Debug)]
pub enum Settled<T> {
    Fulfilled(T),
    Rejected(BookscopeError),
}

impl<T> Settled<T> {
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Fulfilled(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }
}

/// Fixed-size set of concurrent requests joined when every entry has settled.
#[derive(Debug)]
pub struct SettledBatch<T> {
    slots: Vec<Option<Settled<T>>>,
}

impl<T> SettledBatch<T> {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| None).collect(),
        }
    }

    /// Records the outcome of entry `index`.
    ///
    /// Returns `true` when this settlement completed the batch. Indices out of
    /// range and entries already settled are ignored.
    pub fn settle(&mut self, index: usize, outcome: Result<T>) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            tracing::warn!(index, "settlement for unknown batch entry");
            return false;
        };
        if slot.is_some() {
            tracing::warn!(index, "batch entry settled twice");
            return false;
        }

        *slot = Some(match outcome {
            Ok(value) => Settled::Fulfilled(value),
            Err(error) => {
                tracing::warn!(index, error = %error, "batch entry rejected");
                Settled::Rejected(error)
            }
        });

        self.is_settled()
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    #[cfg(test)]
    fn pending(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Every outcome in entry order. Unsettled entries are skipped.
    #[must_use]
    pub fn into_outcomes(self) -> Vec<Settled<T>> {
        self.slots.into_iter().flatten().collect()
    }

    /// Fulfilled values in entry order; rejections are dropped.
    #[must_use]
    pub fn into_fulfilled(self) -> Vec<T> {
        self.into_outcomes().into_iter().filter_map(Settled::ok).collect()
    }
}
