//! Source file tracking for the Tempo simulator front-end.
//!
//! Every AST node carries a [`Span`] — a byte-offset range inside a file
//! registered in the [`SourceDb`]. Diagnostics resolve spans back to
//! `file:line:column` for rendering.

#![warn(missing_docs)]

pub mod source_db;
pub mod span;

pub use source_db::{LineCol, SourceDb};
pub use span::{FileId, Span};
