//! Structured diagnostics for the Tempo simulator.
//!
//! Lenient pipeline stages (elaboration, IR lowering) report skipped or
//! degraded constructs as [`Diagnostic`]s accumulated in a
//! [`DiagnosticSink`], rather than aborting. The [`render`] function
//! produces `file:line:column: severity[code]: message` text.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::{Diagnostic, Label};
pub use renderer::render;
pub use severity::Severity;
pub use sink::DiagnosticSink;
