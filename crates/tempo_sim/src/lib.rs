//! The event-driven simulation kernel.
//!
//! [`Kernel`] executes a lowered [`RtlDesign`](tempo_ir::RtlDesign): it owns
//! the signal store, the stratified event wheel (Active and NBA regions),
//! and the watcher maps that re-enter processes on level changes and edges.
//! Waveform output goes through the [`Waveform`] contract, with
//! [`VcdWriter`] as the in-repo VCD implementation.

#![warn(missing_docs)]

pub mod error;
mod eval;
pub mod kernel;
pub mod sched;
pub mod waveform;

pub use error::SimError;
pub use kernel::{Kernel, ProcessId};
pub use sched::SchedRegion;
pub use waveform::{VcdWriter, Waveform};
