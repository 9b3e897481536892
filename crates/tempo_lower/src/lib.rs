//! Lowering from the elaborated AST to the RTL IR.
//!
//! Consumes a [`Design`](tempo_ast::Design) together with its
//! [`ElaboratedDesign`](tempo_elaborate::ElaboratedDesign) and produces an
//! [`RtlDesign`]: per module, mirrored parameters/nets/instances, lowered
//! continuous assigns, and one [`RtlProcess`] per always/initial construct
//! with a reference-stable statement chain.

#![warn(missing_docs)]

pub mod expr;
mod stmt;

pub use expr::{lower_expr, lvalue_base_name};

use tempo_ast::{
    AlwaysConstruct, AlwaysKind, BinaryOp, Design, Expr, InitialConstruct, ModuleItem,
    SensitivityItem,
};
use tempo_elaborate::{ElabModule, ElaboratedDesign};
use tempo_ir::{
    RtlAssign, RtlAssignKind, RtlDesign, RtlInstance, RtlModule, RtlNet, RtlParam, RtlPortConn,
    RtlProcess, RtlProcessKind, RtlSensitivity,
};

/// Lowers an elaborated design to the RTL IR, one module per source module
/// in source order.
pub fn lower(design: &Design, elab: &ElaboratedDesign<'_>) -> RtlDesign {
    let mut out = RtlDesign::default();
    for module in &design.modules {
        let Some(em) = elab.module(&module.name) else {
            continue;
        };
        out.modules.push(lower_module(em));
    }
    out
}

fn lower_module(em: &ElabModule<'_>) -> RtlModule {
    let mut rm = RtlModule::new(em.name.clone());

    rm.params = em
        .params
        .iter()
        .map(|p| RtlParam {
            name: p.name.clone(),
            value_str: p.value_str.clone(),
        })
        .collect();

    rm.nets = em
        .nets
        .iter()
        .map(|n| RtlNet {
            name: n.name.clone(),
            ty: n.ty,
        })
        .collect();

    rm.instances = em
        .instances
        .iter()
        .map(|inst| RtlInstance {
            module_name: inst.module_name.clone(),
            instance_name: inst.instance_name.clone(),
            conns: inst
                .port_conns
                .iter()
                .map(|pc| RtlPortConn {
                    port_name: pc.port.clone(),
                    signal_name: pc.signal.clone(),
                })
                .collect(),
        })
        .collect();

    for item in &em.flat_items {
        match item.as_ref() {
            ModuleItem::ContinuousAssign(ca) => {
                rm.continuous_assigns.push(RtlAssign {
                    kind: RtlAssignKind::Continuous,
                    lhs_name: lvalue_base_name(&ca.lhs),
                    rhs: lower_expr(&ca.rhs),
                });
            }
            ModuleItem::Always(a) => rm.processes.push(lower_always(a)),
            ModuleItem::Initial(i) => rm.processes.push(lower_initial(i)),
            // A declaration initializer runs once at time 0.
            ModuleItem::NetDecl(nd) => {
                if let Some(init) = &nd.init {
                    rm.processes.push(initializer_process(&nd.name, init));
                }
            }
            ModuleItem::VarDecl(vd) => {
                if let Some(init) = &vd.init {
                    rm.processes.push(initializer_process(&vd.name, init));
                }
            }
            _ => {}
        }
    }

    rm
}

fn initializer_process(name: &str, init: &Expr) -> RtlProcess {
    let mut p = RtlProcess::new(RtlProcessKind::Initial);
    let head = p.stmts.alloc(tempo_ir::RtlStmt::blocking(
        name.to_string(),
        lower_expr(init),
        None,
    ));
    p.first_stmt = Some(head);
    p
}

fn lower_initial(i: &InitialConstruct) -> RtlProcess {
    let mut p = RtlProcess::new(RtlProcessKind::Initial);
    p.first_stmt = stmt::lower_body(&i.body, &mut p.stmts);
    p
}

fn lower_always(a: &AlwaysConstruct) -> RtlProcess {
    let mut p = RtlProcess::new(RtlProcessKind::Always);
    p.sensitivity = lower_sensitivity(a);
    p.first_stmt = stmt::lower_body(&a.body, &mut p.stmts);
    p
}

/// Lowers a sensitivity list.
///
/// - `@*` (and `always_comb`/`always_latch` without a list) becomes the
///   single synthetic `Level("*")` entry; the kernel expands it by walking
///   the body's RHS references.
/// - `@(posedge s)` / `@(negedge s)` become edge entries.
/// - `@(a or b or ...)` flattens into one `Level` entry per identifier.
/// - A plain `always` with no event control keeps an empty list: the
///   kernel treats it as free-running (e.g. `always #5 clk = ~clk;`).
fn lower_sensitivity(a: &AlwaysConstruct) -> Vec<RtlSensitivity> {
    if a.sensitivity.is_empty() {
        return match a.kind {
            AlwaysKind::AlwaysComb | AlwaysKind::AlwaysLatch => vec![RtlSensitivity::star()],
            AlwaysKind::Always | AlwaysKind::AlwaysFf => Vec::new(),
        };
    }

    let mut out = Vec::new();
    for item in &a.sensitivity {
        match item {
            SensitivityItem::Star { .. } => out.push(RtlSensitivity::star()),
            SensitivityItem::Posedge { expr, .. } => {
                if let Expr::Identifier { name, .. } = expr {
                    out.push(RtlSensitivity::posedge(name.clone()));
                }
            }
            SensitivityItem::Negedge { expr, .. } => {
                if let Expr::Identifier { name, .. } = expr {
                    out.push(RtlSensitivity::negedge(name.clone()));
                }
            }
            SensitivityItem::Level { expr, .. } => collect_level(expr, &mut out),
        }
    }
    out
}

/// Flattens a level sensitivity expression: identifiers become `Level`
/// entries, `or`-chains are walked recursively, other forms are ignored.
fn collect_level(expr: &Expr, out: &mut Vec<RtlSensitivity>) {
    match expr {
        Expr::Identifier { name, .. } => out.push(RtlSensitivity::level(name.clone())),
        Expr::Binary {
            op: BinaryOp::LogicalOr,
            lhs,
            rhs,
            ..
        } => {
            collect_level(lhs, out);
            collect_level(rhs, out);
        }
        _ => {}
    }
}
