//! Plain-text rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use std::fmt::Write;
use tempo_source::SourceDb;

/// Renders a diagnostic as plain text:
///
/// ```text
/// top.sv:3:9: error[E204]: malformed parameter override
///   note: overrides apply in source order
/// ```
///
/// Spans that do not resolve (dummy spans, unregistered files) render
/// without the location prefix.
pub fn render(diag: &Diagnostic, sources: &SourceDb) -> String {
    let mut out = String::new();

    let loc = sources
        .file_name(diag.primary_span.file)
        .zip(sources.line_col(diag.primary_span.file, diag.primary_span.start));
    if let Some((name, lc)) = loc {
        let _ = write!(out, "{name}:{}:{}: ", lc.line, lc.column);
    }
    let _ = writeln!(out, "{}[{}]: {}", diag.severity, diag.code, diag.message);

    for label in &diag.labels {
        if let Some((name, lc)) = sources
            .file_name(label.span.file)
            .zip(sources.line_col(label.span.file, label.span.start))
        {
            let _ = writeln!(out, "  {name}:{}:{}: {}", lc.line, lc.column, label.message);
        } else {
            let _ = writeln!(out, "  {}", label.message);
        }
    }
    for note in &diag.notes {
        let _ = writeln!(out, "  note: {note}");
    }
    out
}
