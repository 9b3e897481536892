//! Simulation error types.

use std::io;

/// Errors that can occur during simulation setup or execution.
///
/// Runtime value anomalies (division by zero, reads of missing signals) do
/// not error: they degrade to 0 or X per the 4-state semantics. `$finish`
/// is a normal termination, not an error.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// An I/O error while writing waveform data.
    #[error("waveform I/O error: {0}")]
    WaveformIo(#[from] io::Error),

    /// A value change was emitted for a signal never registered with the
    /// waveform writer.
    #[error("unregistered waveform signal `{name}`")]
    UnknownWaveformSignal {
        /// The unregistered signal name.
        name: String,
    },
}
