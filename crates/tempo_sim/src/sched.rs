//! Event scheduling: regions, ordering, and event payloads.

use serde::{Deserialize, Serialize};
use tempo_ir::StmtId;

use crate::kernel::{Kernel, ProcessId};

/// IEEE 1800 scheduling regions.
///
/// Only Preponed/Active/Inactive are distinguished from NBA at dequeue
/// time; regions beyond NBA are reserved and drain after the NBA FIFO at
/// the same time point.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum SchedRegion {
    /// Sampling region, before any Active event.
    Preponed,
    /// The main execution region.
    Active,
    /// Deferred zero-delay events (`#0`).
    Inactive,
    /// Non-blocking assignment updates.
    Nba,
    /// Reserved.
    Postponed,
}

impl SchedRegion {
    /// Returns `true` if events in this region run in the Active drain
    /// (before the NBA FIFO is applied).
    pub fn is_active_group(self) -> bool {
        self <= SchedRegion::Inactive
    }
}

/// What a dequeued event does.
pub(crate) enum EventAction<'d> {
    /// Enter a process at its entry point.
    Enter(ProcessId),
    /// Resume a suspended procedural thread at a statement (or at the end
    /// of its chain when `None`).
    Resume {
        /// The owning process.
        process: ProcessId,
        /// The statement to resume at.
        stmt: Option<StmtId>,
    },
    /// Run an arbitrary callback (external stimulus, tests, DPI).
    Callback(Box<dyn FnOnce(&mut Kernel<'d>) + 'd>),
}

/// An event in the Active priority queue.
///
/// Ordering is by ascending `(time, delta, region, seq)`; `seq` is a
/// monotone push counter, so events in the same bucket run in push order.
pub(crate) struct ScheduledEvent<'d> {
    pub time: u64,
    pub delta: u64,
    pub region: SchedRegion,
    pub seq: u64,
    pub action: EventAction<'d>,
}

impl ScheduledEvent<'_> {
    fn key(&self) -> (u64, u64, SchedRegion, u64) {
        (self.time, self.delta, self.region, self.seq)
    }
}

impl PartialEq for ScheduledEvent<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ScheduledEvent<'_> {}

impl PartialOrd for ScheduledEvent<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent<'_> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}
