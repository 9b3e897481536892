//! RTL expression evaluation over the kernel's signal store.

use std::collections::HashMap;

use tempo_common::Value;
use tempo_ir::{RtlBinaryOp, RtlExpr, RtlUnaryOp};

/// Evaluates an expression against the signal store.
///
/// `Ref`s read the referenced signal at its stored width; a missing signal
/// reads as 1-bit X. Malformed literals evaluate to 1-bit X. Division and
/// modulo by zero yield 0.
pub(crate) fn eval_expr(signals: &HashMap<String, Value>, e: &RtlExpr) -> Value {
    match e {
        RtlExpr::Ref(name) => signals
            .get(name)
            .cloned()
            .unwrap_or_else(|| Value::unknown(1)),
        RtlExpr::Const(literal) => {
            Value::parse_literal(literal).unwrap_or_else(|| Value::unknown(1))
        }
        RtlExpr::Unary { op, operand } => {
            let v = eval_expr(signals, operand);
            match op {
                RtlUnaryOp::Plus => v,
                RtlUnaryOp::Minus => v.neg(),
                RtlUnaryOp::LogicalNot => Value::from_bool(!v.is_nonzero()),
                RtlUnaryOp::BitNot => !&v,
            }
        }
        RtlExpr::Binary { op, lhs, rhs } => {
            let l = eval_expr(signals, lhs);
            let r = eval_expr(signals, rhs);
            match op {
                RtlBinaryOp::Add => l.add(&r),
                RtlBinaryOp::Sub => l.sub(&r),
                RtlBinaryOp::Mul => l.mul(&r),
                RtlBinaryOp::Div => l.div(&r),
                RtlBinaryOp::Mod => l.rem(&r),
                RtlBinaryOp::And => &l & &r,
                RtlBinaryOp::Or => &l | &r,
                RtlBinaryOp::Xor => &l ^ &r,
                RtlBinaryOp::LogicalAnd => Value::from_bool(l.is_nonzero() && r.is_nonzero()),
                RtlBinaryOp::LogicalOr => Value::from_bool(l.is_nonzero() || r.is_nonzero()),
                RtlBinaryOp::Eq | RtlBinaryOp::CaseEq => l.cmp_eq(&r),
                RtlBinaryOp::Ne | RtlBinaryOp::CaseNe => l.cmp_ne(&r),
                RtlBinaryOp::Lt => l.cmp_lt(&r),
                RtlBinaryOp::Gt => l.cmp_gt(&r),
                RtlBinaryOp::Le => l.cmp_le(&r),
                RtlBinaryOp::Ge => l.cmp_ge(&r),
                RtlBinaryOp::Shl | RtlBinaryOp::Ashl => l.shl(&r),
                RtlBinaryOp::Shr | RtlBinaryOp::Ashr => l.shr(&r),
            }
        }
    }
}

/// Evaluates a delay expression to a non-negative tick count.
pub(crate) fn eval_delay(signals: &HashMap<String, Value>, e: &RtlExpr) -> u64 {
    eval_expr(signals, e).to_uint()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_common::Logic;

    fn store(entries: &[(&str, Value)]) -> HashMap<String, Value> {
        entries
            .iter()
            .map(|(n, v)| (n.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn ref_reads_stored_width() {
        let signals = store(&[("data", Value::from_uint(8, 0xA5))]);
        let v = eval_expr(&signals, &RtlExpr::reference("data"));
        assert_eq!(v.width(), 8);
        assert_eq!(v.to_uint(), 0xA5);
    }

    #[test]
    fn missing_signal_reads_as_x() {
        let signals = HashMap::new();
        let v = eval_expr(&signals, &RtlExpr::reference("ghost"));
        assert_eq!(v.width(), 1);
        assert_eq!(v.get(0), Logic::X);
    }

    #[test]
    fn literals() {
        let signals = HashMap::new();
        assert_eq!(
            eval_expr(&signals, &RtlExpr::literal("4'b1010")).to_uint(),
            10
        );
        assert_eq!(eval_expr(&signals, &RtlExpr::literal("10")).to_uint(), 10);
        // A malformed literal degrades to X.
        let bad = eval_expr(&signals, &RtlExpr::literal("4'q99"));
        assert_eq!(bad.get(0), Logic::X);
    }

    #[test]
    fn arithmetic_width_is_max_of_operands() {
        let signals = store(&[
            ("a", Value::from_uint(8, 2)),
            ("b", Value::from_uint(8, 3)),
        ]);
        let sum = eval_expr(
            &signals,
            &RtlExpr::binary(
                RtlBinaryOp::Add,
                RtlExpr::reference("a"),
                RtlExpr::reference("b"),
            ),
        );
        assert_eq!(sum.width(), 8);
        assert_eq!(sum.to_uint(), 5);
    }

    #[test]
    fn division_by_zero_yields_zero() {
        let signals = store(&[("a", Value::from_uint(8, 42))]);
        let q = eval_expr(
            &signals,
            &RtlExpr::binary(RtlBinaryOp::Div, RtlExpr::reference("a"), RtlExpr::literal("0")),
        );
        assert_eq!(q.to_uint(), 0);
    }

    #[test]
    fn logical_not_reduces() {
        let signals = store(&[("a", Value::from_uint(4, 0b0100))]);
        let v = eval_expr(
            &signals,
            &RtlExpr::unary(RtlUnaryOp::LogicalNot, RtlExpr::reference("a")),
        );
        assert_eq!(v.width(), 1);
        assert_eq!(v.to_uint(), 0);
    }

    #[test]
    fn bitnot_toggles_known_bits() {
        let signals = store(&[("clk", Value::from_uint(1, 0))]);
        let v = eval_expr(
            &signals,
            &RtlExpr::unary(RtlUnaryOp::BitNot, RtlExpr::reference("clk")),
        );
        assert_eq!(v.to_uint(), 1);
    }

    #[test]
    fn comparisons_are_one_bit() {
        let signals = store(&[("a", Value::from_uint(8, 5))]);
        let v = eval_expr(
            &signals,
            &RtlExpr::binary(RtlBinaryOp::Lt, RtlExpr::reference("a"), RtlExpr::literal("9")),
        );
        assert_eq!(v.width(), 1);
        assert_eq!(v.to_uint(), 1);
    }

    #[test]
    fn case_eq_is_synonym_of_eq() {
        let signals = store(&[("a", Value::from_uint(4, 7))]);
        let eq = RtlExpr::binary(RtlBinaryOp::Eq, RtlExpr::reference("a"), RtlExpr::literal("7"));
        let ceq =
            RtlExpr::binary(RtlBinaryOp::CaseEq, RtlExpr::reference("a"), RtlExpr::literal("7"));
        assert_eq!(eval_expr(&signals, &eq), eval_expr(&signals, &ceq));
    }

    #[test]
    fn delay_projection() {
        let signals = HashMap::new();
        assert_eq!(eval_delay(&signals, &RtlExpr::literal("10")), 10);
        // X delays project to 0.
        assert_eq!(eval_delay(&signals, &RtlExpr::reference("nope")), 0);
    }
}
