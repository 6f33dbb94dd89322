//! Mutual exclusion between merge builds and equality analysis.
//!
//! Both operations read the merged buffer of the current pair; a build also
//! replaces it. The gate lets at most one of them run at a time. A waiting
//! request blocks on a condition variable until the running one releases
//! its pass.
//!
//! Work is announced with [`MutationGate::ticket`] on the coordinating
//! thread before it is handed to a worker, so [`MutationGate::wait_idle`]
//! also covers jobs that were issued but have not started yet.
//!
//! # Example
//!
//! ```rust
//! use pairmask_ops::{MutationGate, Operation};
//! use std::thread;
//!
//! let gate = MutationGate::new();
//! let ticket = gate.ticket(Operation::MergeBuild);
//! let worker = thread::spawn(move || {
//!     let _pass = ticket.enter();
//!     // build the merged buffer
//! });
//! gate.wait_idle();
//! assert!(gate.is_idle());
//! worker.join().unwrap();
//! ```

use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use tracing::trace;

/// The kinds of work serialized by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Compositing plus overlay regeneration.
    MergeBuild,
    /// Pixel equality against the last committed merge.
    EqualityAnalysis,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MergeBuild => "merge-build",
            Self::EqualityAnalysis => "equality-analysis",
        })
    }
}

#[derive(Debug, Default)]
struct GateState {
    active: Option<Operation>,
    pending: usize,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<GateState>,
    changed: Condvar,
}

impl Shared {
    // A panicking holder cannot leave the state inconsistent: every field
    // is updated in a single step under the lock.
    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, GateState>) -> MutexGuard<'a, GateState> {
        self.changed.wait(guard).unwrap_or_else(|e| e.into_inner())
    }

    fn finish(&self, op: Operation, was_active: bool) {
        let mut st = self.lock();
        if was_active {
            st.active = None;
        }
        st.pending = st.pending.saturating_sub(1);
        trace!(%op, pending = st.pending, "gate: released");
        drop(st);
        self.changed.notify_all();
    }
}

/// Serializes merge builds and equality analysis.
///
/// Cloning yields another handle to the same gate.
#[derive(Debug, Clone, Default)]
pub struct MutationGate {
    shared: Arc<Shared>,
}

impl MutationGate {
    /// Creates an idle gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Announces an upcoming operation without blocking.
    ///
    /// The ticket counts as outstanding work until it is entered and the
    /// resulting pass dropped, or until the ticket itself is dropped.
    pub fn ticket(&self, op: Operation) -> Ticket {
        let mut st = self.shared.lock();
        st.pending += 1;
        trace!(%op, pending = st.pending, "gate: ticket issued");
        Ticket {
            shared: Arc::clone(&self.shared),
            op,
            used: false,
        }
    }

    /// Blocks until no operation is running or outstanding.
    pub fn wait_idle(&self) {
        let mut st = self.shared.lock();
        while st.active.is_some() || st.pending > 0 {
            st = self.shared.wait(st);
        }
    }

    /// Returns `true` if nothing is running or outstanding.
    pub fn is_idle(&self) -> bool {
        let st = self.shared.lock();
        st.active.is_none() && st.pending == 0
    }
}

/// A reserved slot for one operation. Enter it on the worker thread.
#[must_use = "a ticket keeps the gate busy until entered or dropped"]
#[derive(Debug)]
pub struct Ticket {
    shared: Arc<Shared>,
    op: Operation,
    used: bool,
}

impl Ticket {
    /// Blocks until the gate is free, then takes it.
    pub fn enter(mut self) -> GatePass {
        let mut st = self.shared.lock();
        while st.active.is_some() {
            trace!(op = %self.op, "gate: waiting");
            st = self.shared.wait(st);
        }
        st.active = Some(self.op);
        trace!(op = %self.op, "gate: entered");
        drop(st);

        self.used = true;
        GatePass {
            shared: Arc::clone(&self.shared),
            op: self.op,
        }
    }
}

impl Drop for Ticket {
    fn drop(&mut self) {
        if !self.used {
            self.shared.finish(self.op, false);
        }
    }
}

/// Exclusive hold on the gate; released on drop.
#[must_use = "the gate is released as soon as the pass is dropped"]
#[derive(Debug)]
pub struct GatePass {
    shared: Arc<Shared>,
    op: Operation,
}

impl Drop for GatePass {
    fn drop(&mut self) {
        self.shared.finish(self.op, true);
    }
}
