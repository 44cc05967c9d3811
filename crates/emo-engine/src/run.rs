//! Run bookkeeping: the cancellation token and the single-run slot.
//!
//! At most one analysis is active per [`RunSlot`]. While it scans, the slot
//! holds the run's [`CancelToken`] so a cancel request can reach it; after
//! scanning (placement and reporting) the slot stays busy but no longer
//! accepts cancellation. Dropping the [`RunLease`] returns the slot to idle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Cooperative cancellation flag shared between a run and its slot.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// How an analysis run ended. The in-flight phases live in the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Completed,
    Cancelled,
}

#[derive(Debug)]
enum Slot {
    Idle,
    Scanning(CancelToken),
    Finishing,
}

/// Holder of the one active run.
#[derive(Debug)]
pub struct RunSlot {
    slot: Mutex<Slot>,
}

impl RunSlot {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Idle),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Claim the slot for a new scanning run. `None` if a run is active.
    pub fn acquire(&self) -> Option<RunLease<'_>> {
        let mut slot = self.lock();
        if !matches!(*slot, Slot::Idle) {
            return None;
        }
        let token = CancelToken::new();
        *slot = Slot::Scanning(token.clone());
        Some(RunLease { slot: self, token })
    }

    /// Flag the scanning run for cancellation. No-op (returns `false`) when
    /// nothing is scanning.
    pub fn cancel(&self) -> bool {
        match &*self.lock() {
            Slot::Scanning(token) => {
                token.cancel();
                true
            }
            _ => false,
        }
    }

    pub fn is_scanning(&self) -> bool {
        matches!(*self.lock(), Slot::Scanning(_))
    }

    pub fn is_busy(&self) -> bool {
        !matches!(*self.lock(), Slot::Idle)
    }
}

impl Default for RunSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive claim on a [`RunSlot`] for the lifetime of one run.
#[derive(Debug)]
pub struct RunLease<'a> {
    slot: &'a RunSlot,
    token: CancelToken,
}

impl RunLease<'_> {
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Scanning is over; later cancel requests become no-ops.
    pub fn finish_scanning(&self) {
        *self.slot.lock() = Slot::Finishing;
    }
}

impl Drop for RunLease<'_> {
    fn drop(&mut self) {
        *self.slot.lock() = Slot::Idle;
    }
}
