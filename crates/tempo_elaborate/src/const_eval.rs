//! Constant expression evaluation under a parameter environment.
//!
//! Used by the elaborator for parameter resolution, generate-if predicates,
//! generate-for headers, and generate-case selectors. Semantics mirror the
//! simulation value arithmetic projected to signed 64-bit integers.

use std::collections::HashMap;

use tempo_ast::{BinaryOp, Expr, UnaryOp};

/// A mapping from parameter/genvar names to their integer values.
pub type ConstEnv = HashMap<String, i64>;

/// Evaluates an expression to a compile-time constant.
///
/// Returns `None` when the expression is not a constant in this context:
/// an identifier missing from `env`, a string literal, a concatenation or
/// replication, or a malformed literal. Division and modulo by zero yield
/// `Some(0)`. All operands are evaluated to completion; there is no
/// short-circuiting.
pub fn eval_const_expr(expr: &Expr, env: &ConstEnv) -> Option<i64> {
    match expr {
        Expr::Number { literal, .. } => parse_int_literal(literal),
        Expr::Identifier { name, .. } => env.get(name).copied(),
        Expr::StringLit { .. } => None,
        Expr::Unary { op, operand, .. } => {
            let v = eval_const_expr(operand, env)?;
            Some(match op {
                UnaryOp::Plus => v,
                UnaryOp::Minus => v.wrapping_neg(),
                UnaryOp::LogicalNot => i64::from(v == 0),
                UnaryOp::BitNot => !v,
            })
        }
        Expr::Binary { op, lhs, rhs, .. } => {
            let l = eval_const_expr(lhs, env)?;
            let r = eval_const_expr(rhs, env)?;
            apply_binop(*op, l, r)
        }
        Expr::Ternary {
            cond,
            then_expr,
            else_expr,
            ..
        } => {
            let c = eval_const_expr(cond, env)?;
            if c != 0 {
                eval_const_expr(then_expr, env)
            } else {
                eval_const_expr(else_expr, env)
            }
        }
        Expr::Concat { .. } | Expr::Replication { .. } | Expr::BitSelect { .. } => None,
    }
}

fn apply_binop(op: BinaryOp, l: i64, r: i64) -> Option<i64> {
    Some(match op {
        BinaryOp::Add => l.wrapping_add(r),
        BinaryOp::Sub => l.wrapping_sub(r),
        BinaryOp::Mul => l.wrapping_mul(r),
        BinaryOp::Div => {
            if r == 0 {
                0
            } else {
                l.wrapping_div(r)
            }
        }
        BinaryOp::Mod => {
            if r == 0 {
                0
            } else {
                l.wrapping_rem(r)
            }
        }
        BinaryOp::BitAnd => l & r,
        BinaryOp::BitOr => l | r,
        BinaryOp::BitXor => l ^ r,
        BinaryOp::LogicalAnd => i64::from(l != 0 && r != 0),
        BinaryOp::LogicalOr => i64::from(l != 0 || r != 0),
        BinaryOp::Eq | BinaryOp::CaseEq => i64::from(l == r),
        BinaryOp::Ne | BinaryOp::CaseNe => i64::from(l != r),
        BinaryOp::Lt => i64::from(l < r),
        BinaryOp::Gt => i64::from(l > r),
        BinaryOp::Le => i64::from(l <= r),
        BinaryOp::Ge => i64::from(l >= r),
        BinaryOp::Shl | BinaryOp::Ashl => l.wrapping_shl((r & 63) as u32),
        BinaryOp::Shr | BinaryOp::Ashr => l.wrapping_shr((r & 63) as u32),
    })
}

/// Parses an integer literal from its source text.
///
/// Handles plain decimal (`42`), sized/based literals (`4'b1010`, `8'hFF`,
/// `32'd100`, `'b1`, with an optional `s` marker), and `_` separators.
/// `x`/`z`/`?` digits count as 0 for constant evaluation.
pub(crate) fn parse_int_literal(text: &str) -> Option<i64> {
    let s: String = text.chars().filter(|&c| c != '_').collect();

    if let Some(tick) = s.find('\'') {
        let mut rest = &s[tick + 1..];
        if rest.starts_with('s') || rest.starts_with('S') {
            rest = &rest[1..];
        }
        let base = rest.chars().next()?;
        let digits = &rest[1..];
        if digits.is_empty() {
            return None;
        }
        let radix = match base {
            'b' | 'B' => 2,
            'o' | 'O' => 8,
            'd' | 'D' => 10,
            'h' | 'H' => 16,
            _ => return None,
        };
        let clean: String = digits
            .chars()
            .map(|c| match c {
                'x' | 'X' | 'z' | 'Z' | '?' => '0',
                other => other,
            })
            .collect();
        return i64::from_str_radix(&clean, radix).ok();
    }

    s.parse::<i64>().ok()
}
