//! Request sequencing for dashboard refreshes.
//!
//! Every refresh takes a [`Ticket`] before it starts fetching. When it
//! finishes, it offers its view to the [`LatestView`] slot, which only keeps
//! it if no newer refresh has already published. A slow, older response can
//! therefore never overwrite a newer one.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, PoisonError,
};

use crate::dashboard::Dashboard;

// ---

/// Monotonic position of one refresh in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Single owner of the most recently accepted dashboard view.
#[derive(Debug, Default)]
pub struct LatestView {
    next: AtomicU64,
    slot: Mutex<Option<(Ticket, Arc<Dashboard>)>>,
}

impl LatestView {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the ticket for a refresh that is about to start.
    pub fn begin(&self) -> Ticket {
        Ticket(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Offer a finished view. Returns `false` if a newer view is already held,
    /// in which case `view` is dropped.
    pub fn publish(&self, ticket: Ticket, view: Arc<Dashboard>) -> bool {
        // ---
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        match slot.as_ref() {
            Some((held, _)) if *held > ticket => {
                tracing::debug!(
                    "Discarding stale view #{} (holding #{})",
                    ticket.id(),
                    held.id()
                );
                false
            }
            _ => {
                *slot = Some((ticket, view));
                true
            }
        }
    }

    /// The currently held view, if any refresh has succeeded.
    pub fn current(&self) -> Option<Arc<Dashboard>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, view)| Arc::clone(view))
    }
}
