//! Busy tracking for asynchronous lookups.
//!
//! While any lookup is pending the guarded control (the place-order button)
//! stays disabled, so a form cannot be submitted against a quote that is
//! about to change.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::dom::Handle;

pub struct InFlight {
    pending: AtomicUsize,
    control: Handle,
}

impl InFlight {
    #[must_use]
    pub fn new(control: Handle) -> Self {
        Self {
            pending: AtomicUsize::new(0),
            control,
        }
    }

    /// Marks one lookup as started. The returned guard ends it on drop,
    /// including when the owning future is cancelled.
    #[must_use]
    pub fn begin(&self) -> InFlightGuard<'_> {
        if self.pending.fetch_add(1, Ordering::SeqCst) == 0 {
            self.control.set_disabled(true);
        }
        InFlightGuard { owner: self }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }
}

pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.owner.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.owner.control.set_disabled(false);
        }
    }
}
