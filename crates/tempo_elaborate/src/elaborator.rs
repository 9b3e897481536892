//! The elaborator: parameter resolution, generate expansion, flat inventory.

use std::borrow::Cow;

use tempo_ast::{BinaryOp, Design, Expr, GenerateFor, GenerateItem, ModuleDecl, ModuleItem};
use tempo_diagnostics::DiagnosticSink;

use crate::const_eval::{eval_const_expr, ConstEnv};
use crate::design::{ElabInstance, ElabModule, ElabNet, ElabParam, ElabPortConn, ElaboratedDesign};
use crate::errors::{self, ElabError};
use crate::subst;

/// Elaborates every module of a design.
///
/// Lenient by design: unsupported constructs are skipped or passed through
/// with a diagnostic in `sink`; the only hard error is an empty genvar
/// name.
pub fn elaborate<'ast>(
    design: &'ast Design,
    sink: &DiagnosticSink,
) -> Result<ElaboratedDesign<'ast>, ElabError> {
    let el = Elaborator { design, sink };
    let mut out = ElaboratedDesign::default();
    for module in &design.modules {
        let em = el.elaborate_module(module)?;
        out.modules.insert(em.name.clone(), em);
    }
    Ok(out)
}

/// How expanded items enter the flat list: borrowed from the AST, or cloned
/// (for items produced by generate-for substitution, whose source nodes are
/// per-iteration temporaries).
type Push<'ast, 'b> = fn(&'b ModuleItem, &mut Vec<Cow<'ast, ModuleItem>>);

fn push_borrowed<'ast>(item: &'ast ModuleItem, out: &mut Vec<Cow<'ast, ModuleItem>>) {
    out.push(Cow::Borrowed(item));
}

fn push_owned<'ast, 'b>(item: &'b ModuleItem, out: &mut Vec<Cow<'ast, ModuleItem>>) {
    out.push(Cow::Owned(item.clone()));
}

struct Elaborator<'ast, 's> {
    design: &'ast Design,
    sink: &'s DiagnosticSink,
}

impl<'ast> Elaborator<'ast, '_> {
    fn elaborate_module(&self, module: &'ast ModuleDecl) -> Result<ElabModule<'ast>, ElabError> {
        let mut env = ConstEnv::new();
        let mut params = Vec::new();

        for pd in &module.params {
            self.define_param(pd, &mut env, &mut params);
        }

        let mut flat: Vec<Cow<'ast, ModuleItem>> = Vec::new();
        for item in &module.items {
            match item {
                ModuleItem::ParamDecl(pd) => {
                    self.define_param(pd, &mut env, &mut params);
                    flat.push(Cow::Borrowed(item));
                }
                ModuleItem::GenvarDecl(gd) => {
                    if gd.name.is_empty() {
                        return Err(ElabError::EmptyGenvarName {
                            module: module.name.clone(),
                        });
                    }
                    flat.push(Cow::Borrowed(item));
                }
                ModuleItem::Generate(gi) => {
                    self.expand(&module.name, gi, &env, &mut flat, push_borrowed)?;
                }
                _ => flat.push(Cow::Borrowed(item)),
            }
        }

        // Ports are signals too; record them ahead of the body's nets.
        let mut nets: Vec<ElabNet> = module
            .ports
            .iter()
            .map(|port| ElabNet {
                name: port.name.clone(),
                ty: port.ty,
            })
            .collect();
        let mut instances = Vec::new();
        for item in &flat {
            match item.as_ref() {
                ModuleItem::NetDecl(nd) => nets.push(ElabNet {
                    name: nd.name.clone(),
                    ty: nd.ty,
                }),
                ModuleItem::VarDecl(vd) => nets.push(ElabNet {
                    name: vd.name.clone(),
                    ty: vd.ty,
                }),
                ModuleItem::Instance(inst) => instances.push(self.elab_instance(inst, &env)),
                _ => {}
            }
        }

        Ok(ElabModule {
            name: module.name.clone(),
            params,
            nets,
            instances,
            flat_items: flat,
        })
    }

    fn define_param(
        &self,
        pd: &tempo_ast::ParamDecl,
        env: &mut ConstEnv,
        params: &mut Vec<ElabParam>,
    ) {
        match eval_const_expr(&pd.value, env) {
            Some(v) => {
                env.insert(pd.name.clone(), v);
                params.push(ElabParam::from_int(pd.name.clone(), v));
            }
            None => {
                self.sink
                    .emit(errors::error_param_not_const(&pd.name, pd.span));
                params.push(ElabParam::opaque(pd.name.clone()));
            }
        }
    }

    /// Expands one generate construct into `out`.
    ///
    /// `push` decides how leaf items enter the list; everything below a
    /// generate-for goes through [`push_owned`] since those items are
    /// substitution clones.
    fn expand<'b>(
        &self,
        module_name: &str,
        gi: &'b GenerateItem,
        env: &ConstEnv,
        out: &mut Vec<Cow<'ast, ModuleItem>>,
        push: Push<'ast, 'b>,
    ) -> Result<(), ElabError> {
        match gi {
            GenerateItem::Block { items, .. } => {
                for item in items {
                    if let ModuleItem::Generate(nested) = item {
                        self.expand(module_name, nested, env, out, push)?;
                    } else {
                        push(item, out);
                    }
                }
                Ok(())
            }
            GenerateItem::If {
                cond,
                then_item,
                else_item,
                span,
            } => match eval_const_expr(cond, env) {
                Some(v) if v != 0 => self.expand(module_name, then_item, env, out, push),
                Some(_) => {
                    if let Some(else_item) = else_item {
                        self.expand(module_name, else_item, env, out, push)?;
                    }
                    Ok(())
                }
                None => {
                    self.sink
                        .emit(errors::warn_generate_not_const("predicate", *span));
                    Ok(())
                }
            },
            GenerateItem::For(gf) => self.unroll_for(module_name, gf, env, out),
            GenerateItem::Case {
                subject,
                arms,
                span,
            } => {
                let Some(sel) = eval_const_expr(subject, env) else {
                    self.sink
                        .emit(errors::warn_generate_not_const("case selector", *span));
                    return Ok(());
                };
                let mut chosen = None;
                'arms: for arm in arms {
                    for m in &arm.matches {
                        if eval_const_expr(m, env) == Some(sel) {
                            chosen = Some(&arm.body);
                            break 'arms;
                        }
                    }
                }
                let chosen =
                    chosen.or_else(|| arms.iter().find(|a| a.matches.is_empty()).map(|a| &a.body));
                if let Some(body) = chosen {
                    self.expand(module_name, body, env, out, push)?;
                }
                Ok(())
            }
        }
    }

    /// Unrolls a generate-for of the restricted form
    /// `i = C0; i < C1; i = i + C2`.
    fn unroll_for(
        &self,
        module_name: &str,
        gf: &GenerateFor,
        env: &ConstEnv,
        out: &mut Vec<Cow<'ast, ModuleItem>>,
    ) -> Result<(), ElabError> {
        if gf.genvar.is_empty() {
            return Err(ElabError::EmptyGenvarName {
                module: module_name.to_string(),
            });
        }
        if gf.cond_op != BinaryOp::Lt {
            self.sink.emit(errors::warn_generate_for_unsupported(gf.span));
            return Ok(());
        }
        let header = (
            eval_const_expr(&gf.init, env),
            eval_const_expr(&gf.limit, env),
            eval_const_expr(&gf.step, env),
        );
        let (Some(start), Some(limit), Some(step)) = header else {
            self.sink.emit(errors::warn_generate_for_unsupported(gf.span));
            return Ok(());
        };
        if step == 0 {
            self.sink.emit(errors::warn_generate_for_zero_step(gf.span));
            return Ok(());
        }
        if step < 0 {
            self.sink.emit(errors::warn_generate_for_unsupported(gf.span));
            return Ok(());
        }

        let mut gv = start;
        while gv < limit {
            let mut iter_env = env.clone();
            iter_env.insert(gf.genvar.clone(), gv);
            let body = subst::generate_item(&gf.body, &gf.genvar, gv);
            self.expand(module_name, &body, &iter_env, out, push_owned)?;
            gv += step;
        }
        Ok(())
    }

    fn elab_instance(&self, inst: &tempo_ast::Instance, env: &ConstEnv) -> ElabInstance {
        let target = self.design.find_module(&inst.module_name);
        let mut params = match target {
            Some(target) => self.default_params(target),
            None => {
                self.sink
                    .emit(errors::error_unknown_module(&inst.module_name, inst.span));
                Vec::new()
            }
        };

        for ov in &inst.param_overrides {
            let Some(v) = eval_const_expr(&ov.value, env) else {
                self.sink
                    .emit(errors::error_param_not_const(&ov.name, ov.span));
                continue;
            };
            let resolved = ElabParam::from_int(ov.name.clone(), v);
            match params.iter_mut().find(|p| p.name == ov.name) {
                Some(slot) => *slot = resolved,
                None => {
                    if target.is_some() {
                        self.sink.emit(errors::error_unknown_override(
                            &ov.name,
                            &inst.module_name,
                            ov.span,
                        ));
                    }
                    params.push(resolved);
                }
            }
        }

        let port_conns = inst
            .port_conns
            .iter()
            .map(|pc| ElabPortConn {
                port: pc.port.clone().unwrap_or_default(),
                signal: match &pc.expr {
                    Some(Expr::Identifier { name, .. }) => name.clone(),
                    _ => String::new(),
                },
            })
            .collect();

        ElabInstance {
            module_name: inst.module_name.clone(),
            instance_name: inst.instance_name.clone(),
            params,
            port_conns,
        }
    }

    /// Computes a module's default parameter list in declaration order,
    /// header parameters first, without emitting diagnostics (the module's
    /// own elaboration reports those).
    fn default_params(&self, target: &ModuleDecl) -> Vec<ElabParam> {
        let body_params = target.items.iter().filter_map(|i| match i {
            ModuleItem::ParamDecl(pd) => Some(pd),
            _ => None,
        });
        let mut env = ConstEnv::new();
        let mut params = Vec::new();
        for pd in target.params.iter().chain(body_params) {
            match eval_const_expr(&pd.value, &env) {
                Some(v) => {
                    env.insert(pd.name.clone(), v);
                    params.push(ElabParam::from_int(pd.name.clone(), v));
                }
                None => params.push(ElabParam::opaque(pd.name.clone())),
            }
        }
        params
    }
}
