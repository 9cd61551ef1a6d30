//! Cooperative cancellation for long running computations.
//!
//! An [`Interrupt`] is a cheap, clonable handle. The caller keeps one clone and attaches another
//! one to an algorithm configuration; algorithms poll it once per outer loop iteration and
//! return [`GraphError::Interrupted`] as soon as it has been raised.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{GraphError, Result};

#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests all computations holding a clone of this handle to stop
    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Withdraws an earlier request so the handle can be reused
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Polls an optional interrupt.
pub(crate) fn check(interrupt: Option<&Interrupt>) -> Result<()> {
    match interrupt {
        Some(i) if i.is_raised() => Err(GraphError::Interrupted),
        _ => Ok(()),
    }
}
