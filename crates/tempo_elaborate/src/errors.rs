//! Diagnostic codes and hard errors for elaboration.
//!
//! Error codes `E200`–`E202` cover elaboration failures; warning codes
//! `W203`–`W205` cover constructs that were skipped leniently.

use tempo_diagnostics::{Category, Diagnostic, DiagnosticCode};
use tempo_source::Span;

/// Unknown module referenced in an instantiation.
pub const E200: DiagnosticCode = DiagnosticCode::new(Category::Error, 200);

/// Parameter or override expression is not constant-evaluable.
pub const E201: DiagnosticCode = DiagnosticCode::new(Category::Error, 201);

/// Override names a parameter the target module does not declare.
pub const E202: DiagnosticCode = DiagnosticCode::new(Category::Error, 202);

/// Generate-for header outside the supported restricted form.
pub const W203: DiagnosticCode = DiagnosticCode::new(Category::Warning, 203);

/// Generate-for with a zero step; the loop produces no iterations.
pub const W204: DiagnosticCode = DiagnosticCode::new(Category::Warning, 204);

/// Generate predicate or selector is not constant; the construct was
/// dropped.
pub const W205: DiagnosticCode = DiagnosticCode::new(Category::Warning, 205);

/// A hard elaboration failure: an invariant break, not a lenient skip.
#[derive(Debug, thiserror::Error)]
pub enum ElabError {
    /// A generate-for or genvar declaration with an empty name.
    #[error("empty genvar name in module `{module}`")]
    EmptyGenvarName {
        /// The module being elaborated.
        module: String,
    },
}

/// Diagnostic for an unknown module in an instantiation.
pub fn error_unknown_module(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E200, format!("unknown module `{name}`"), span)
        .with_note("instance parameters resolve against overrides only")
}

/// Diagnostic for a parameter expression that is not constant.
pub fn error_param_not_const(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E201, format!("cannot evaluate parameter `{name}`"), span)
}

/// Diagnostic for an override naming an undeclared parameter.
pub fn error_unknown_override(param: &str, module: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E202,
        format!("module `{module}` has no parameter `{param}`"),
        span,
    )
}

/// Diagnostic for an unsupported generate-for header.
pub fn warn_generate_for_unsupported(span: Span) -> Diagnostic {
    Diagnostic::warning(W203, "unsupported generate-for form; loop skipped", span)
        .with_note("supported form: `i = C0; i < C1; i = i + C2` with constant bounds")
}

/// Diagnostic for a generate-for with a zero step.
pub fn warn_generate_for_zero_step(span: Span) -> Diagnostic {
    Diagnostic::warning(W204, "generate-for step is zero; loop not unrolled", span)
}

/// Diagnostic for a non-constant generate predicate or selector.
pub fn warn_generate_not_const(what: &str, span: Span) -> Diagnostic {
    Diagnostic::warning(W205, format!("non-constant generate {what}; dropped"), span)
}
