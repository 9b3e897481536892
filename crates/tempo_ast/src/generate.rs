//! Generate constructs: compile-time item expansion driven by genvars.

use crate::expr::{BinaryOp, Expr};
use crate::module::ModuleItem;
use serde::{Deserialize, Serialize};
use tempo_source::Span;

/// A `genvar` declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenvarDecl {
    /// The genvar name.
    pub name: String,
    /// Source span.
    pub span: Span,
}

/// A generate-for loop header and body.
///
/// The header is the restricted form `genvar = init; genvar <op> limit;
/// genvar = genvar + step`. The elaborator only unrolls loops whose header
/// const-evaluates with `cond_op == Lt` and a nonzero step; other forms are
/// skipped with a diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateFor {
    /// The loop genvar name.
    pub genvar: String,
    /// The initial genvar value (`i = init`).
    pub init: Expr,
    /// The loop comparison operator (`i <op> limit`).
    pub cond_op: BinaryOp,
    /// The loop bound (`i <op> limit`).
    pub limit: Expr,
    /// The per-iteration increment (`i = i + step`).
    pub step: Expr,
    /// The loop body.
    pub body: Box<GenerateItem>,
    /// Source span.
    pub span: Span,
}

/// One arm of a generate-case. An arm with no match expressions is the
/// `default` arm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateCaseArm {
    /// The match expressions; empty for `default`.
    pub matches: Vec<Expr>,
    /// The arm body.
    pub body: GenerateItem,
    /// Source span.
    pub span: Span,
}

/// A generate construct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GenerateItem {
    /// A generate block (`begin : label ... end`), holding module items.
    Block {
        /// The optional block label.
        label: Option<String>,
        /// The contained module items.
        items: Vec<ModuleItem>,
        /// Source span.
        span: Span,
    },
    /// A generate-if.
    If {
        /// The compile-time predicate.
        cond: Expr,
        /// The branch taken when the predicate is nonzero.
        then_item: Box<GenerateItem>,
        /// The optional branch taken when the predicate is zero.
        else_item: Option<Box<GenerateItem>>,
        /// Source span.
        span: Span,
    },
    /// A generate-for loop.
    For(GenerateFor),
    /// A generate-case.
    Case {
        /// The compile-time selector.
        subject: Expr,
        /// The arms, in source order.
        arms: Vec<GenerateCaseArm>,
        /// Source span.
        span: Span,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_header_fields() {
        let gf = GenerateFor {
            genvar: "i".into(),
            init: Expr::number("0"),
            cond_op: BinaryOp::Lt,
            limit: Expr::number("3"),
            step: Expr::number("1"),
            body: Box::new(GenerateItem::Block {
                label: Some("g".into()),
                items: vec![],
                span: Span::DUMMY,
            }),
            span: Span::DUMMY,
        };
        assert_eq!(gf.genvar, "i");
        assert_eq!(gf.cond_op, BinaryOp::Lt);
    }

    #[test]
    fn case_default_arm() {
        let arm = GenerateCaseArm {
            matches: vec![],
            body: GenerateItem::Block {
                label: None,
                items: vec![],
                span: Span::DUMMY,
            },
            span: Span::DUMMY,
        };
        assert!(arm.matches.is_empty());
    }
}
