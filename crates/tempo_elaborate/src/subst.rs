//! Deep cloning of AST nodes with genvar substitution.
//!
//! Generate-for unrolling clones every item in the loop body once per
//! iteration, replacing each reference to the genvar with the iteration's
//! integer literal.

use tempo_ast::{
    AlwaysConstruct, CaseItem, ContinuousAssign, Expr, GenerateCaseArm, GenerateFor, GenerateItem,
    InitialConstruct, Instance, ModuleItem, NetDecl, ParamDecl, ParamOverride, PortConn,
    SensitivityItem, Statement, VarDecl,
};

/// Clones an expression, substituting `genvar` references with `value`.
pub(crate) fn expr(e: &Expr, genvar: &str, value: i64) -> Expr {
    match e {
        Expr::Identifier { name, span } => {
            if name == genvar {
                Expr::Number {
                    literal: value.to_string(),
                    span: *span,
                }
            } else {
                e.clone()
            }
        }
        Expr::Number { .. } | Expr::StringLit { .. } => e.clone(),
        Expr::Unary { op, operand, span } => Expr::Unary {
            op: *op,
            operand: Box::new(expr(operand, genvar, value)),
            span: *span,
        },
        Expr::Binary { op, lhs, rhs, span } => Expr::Binary {
            op: *op,
            lhs: Box::new(expr(lhs, genvar, value)),
            rhs: Box::new(expr(rhs, genvar, value)),
            span: *span,
        },
        Expr::Ternary {
            cond,
            then_expr,
            else_expr,
            span,
        } => Expr::Ternary {
            cond: Box::new(expr(cond, genvar, value)),
            then_expr: Box::new(expr(then_expr, genvar, value)),
            else_expr: Box::new(expr(else_expr, genvar, value)),
            span: *span,
        },
        Expr::Concat { elems, span } => Expr::Concat {
            elems: elems.iter().map(|x| expr(x, genvar, value)).collect(),
            span: *span,
        },
        Expr::Replication { count, elems, span } => Expr::Replication {
            count: Box::new(expr(count, genvar, value)),
            elems: elems.iter().map(|x| expr(x, genvar, value)).collect(),
            span: *span,
        },
        Expr::BitSelect { base, index, span } => Expr::BitSelect {
            base: Box::new(expr(base, genvar, value)),
            index: Box::new(expr(index, genvar, value)),
            span: *span,
        },
    }
}

fn opt_expr(e: &Option<Expr>, genvar: &str, value: i64) -> Option<Expr> {
    e.as_ref().map(|x| expr(x, genvar, value))
}

/// Clones a statement, substituting genvar references.
pub(crate) fn stmt(s: &Statement, genvar: &str, value: i64) -> Statement {
    match s {
        Statement::Null { span } => Statement::Null { span: *span },
        Statement::Block { label, stmts, span } => Statement::Block {
            label: label.clone(),
            stmts: stmts.iter().map(|x| stmt(x, genvar, value)).collect(),
            span: *span,
        },
        Statement::If {
            cond,
            then_stmt,
            else_stmt,
            span,
        } => Statement::If {
            cond: expr(cond, genvar, value),
            then_stmt: Box::new(stmt(then_stmt, genvar, value)),
            else_stmt: else_stmt
                .as_ref()
                .map(|x| Box::new(stmt(x, genvar, value))),
            span: *span,
        },
        Statement::Case {
            kind,
            subject,
            items,
            span,
        } => Statement::Case {
            kind: *kind,
            subject: expr(subject, genvar, value),
            items: items
                .iter()
                .map(|item| CaseItem {
                    matches: item.matches.iter().map(|m| expr(m, genvar, value)).collect(),
                    stmt: stmt(&item.stmt, genvar, value),
                    span: item.span,
                })
                .collect(),
            span: *span,
        },
        Statement::BlockingAssign { lhs, rhs, span } => Statement::BlockingAssign {
            lhs: expr(lhs, genvar, value),
            rhs: expr(rhs, genvar, value),
            span: *span,
        },
        Statement::NonBlockingAssign { lhs, rhs, span } => Statement::NonBlockingAssign {
            lhs: expr(lhs, genvar, value),
            rhs: expr(rhs, genvar, value),
            span: *span,
        },
        Statement::DelayControl {
            delay,
            stmt: body,
            span,
        } => Statement::DelayControl {
            delay: expr(delay, genvar, value),
            stmt: body.as_ref().map(|x| Box::new(stmt(x, genvar, value))),
            span: *span,
        },
        Statement::ExprStmt { expr: e, span } => Statement::ExprStmt {
            expr: expr(e, genvar, value),
            span: *span,
        },
    }
}

fn sensitivity_item(si: &SensitivityItem, genvar: &str, value: i64) -> SensitivityItem {
    match si {
        SensitivityItem::Star { span } => SensitivityItem::Star { span: *span },
        SensitivityItem::Posedge { expr: e, span } => SensitivityItem::Posedge {
            expr: expr(e, genvar, value),
            span: *span,
        },
        SensitivityItem::Negedge { expr: e, span } => SensitivityItem::Negedge {
            expr: expr(e, genvar, value),
            span: *span,
        },
        SensitivityItem::Level { expr: e, span } => SensitivityItem::Level {
            expr: expr(e, genvar, value),
            span: *span,
        },
    }
}

/// Clones a module item, substituting genvar references.
pub(crate) fn module_item(item: &ModuleItem, genvar: &str, value: i64) -> ModuleItem {
    match item {
        ModuleItem::NetDecl(nd) => ModuleItem::NetDecl(NetDecl {
            ty: nd.ty,
            name: nd.name.clone(),
            init: opt_expr(&nd.init, genvar, value),
            span: nd.span,
        }),
        ModuleItem::VarDecl(vd) => ModuleItem::VarDecl(VarDecl {
            ty: vd.ty,
            name: vd.name.clone(),
            init: opt_expr(&vd.init, genvar, value),
            span: vd.span,
        }),
        ModuleItem::ParamDecl(pd) => ModuleItem::ParamDecl(ParamDecl {
            local: pd.local,
            name: pd.name.clone(),
            value: expr(&pd.value, genvar, value),
            span: pd.span,
        }),
        ModuleItem::ContinuousAssign(ca) => ModuleItem::ContinuousAssign(ContinuousAssign {
            lhs: expr(&ca.lhs, genvar, value),
            rhs: expr(&ca.rhs, genvar, value),
            span: ca.span,
        }),
        ModuleItem::Always(a) => ModuleItem::Always(AlwaysConstruct {
            kind: a.kind,
            sensitivity: a
                .sensitivity
                .iter()
                .map(|si| sensitivity_item(si, genvar, value))
                .collect(),
            body: stmt(&a.body, genvar, value),
            span: a.span,
        }),
        ModuleItem::Initial(i) => ModuleItem::Initial(InitialConstruct {
            body: stmt(&i.body, genvar, value),
            span: i.span,
        }),
        ModuleItem::Instance(inst) => ModuleItem::Instance(Instance {
            module_name: inst.module_name.clone(),
            instance_name: inst.instance_name.clone(),
            param_overrides: inst
                .param_overrides
                .iter()
                .map(|ov| ParamOverride {
                    name: ov.name.clone(),
                    value: expr(&ov.value, genvar, value),
                    span: ov.span,
                })
                .collect(),
            port_conns: inst
                .port_conns
                .iter()
                .map(|pc| PortConn {
                    port: pc.port.clone(),
                    expr: opt_expr(&pc.expr, genvar, value),
                    span: pc.span,
                })
                .collect(),
            span: inst.span,
        }),
        ModuleItem::Generate(gi) => ModuleItem::Generate(generate_item(gi, genvar, value)),
        ModuleItem::GenvarDecl(_) => item.clone(),
    }
}

/// Clones a generate item, substituting genvar references.
///
/// An inner generate-for shadowing the same genvar name keeps its own loop
/// variable: substitution does not descend into its header or body.
pub(crate) fn generate_item(gi: &GenerateItem, genvar: &str, value: i64) -> GenerateItem {
    match gi {
        GenerateItem::Block { label, items, span } => GenerateItem::Block {
            label: label.clone(),
            items: items.iter().map(|i| module_item(i, genvar, value)).collect(),
            span: *span,
        },
        GenerateItem::If {
            cond,
            then_item,
            else_item,
            span,
        } => GenerateItem::If {
            cond: expr(cond, genvar, value),
            then_item: Box::new(generate_item(then_item, genvar, value)),
            else_item: else_item
                .as_ref()
                .map(|e| Box::new(generate_item(e, genvar, value))),
            span: *span,
        },
        GenerateItem::For(gf) => {
            if gf.genvar == genvar {
                // Shadowed by the inner loop's own genvar.
                GenerateItem::For(gf.clone())
            } else {
                GenerateItem::For(GenerateFor {
                    genvar: gf.genvar.clone(),
                    init: expr(&gf.init, genvar, value),
                    cond_op: gf.cond_op,
                    limit: expr(&gf.limit, genvar, value),
                    step: expr(&gf.step, genvar, value),
                    body: Box::new(generate_item(&gf.body, genvar, value)),
                    span: gf.span,
                })
            }
        }
        GenerateItem::Case {
            subject,
            arms,
            span,
        } => GenerateItem::Case {
            subject: expr(subject, genvar, value),
            arms: arms
                .iter()
                .map(|arm| GenerateCaseArm {
                    matches: arm.matches.iter().map(|m| expr(m, genvar, value)).collect(),
                    body: generate_item(&arm.body, genvar, value),
                    span: arm.span,
                })
                .collect(),
            span: *span,
        },
    }
}
