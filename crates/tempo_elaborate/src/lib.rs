//! Elaboration: from a parsed [`Design`](tempo_ast::Design) to flat,
//! parameter-resolved module descriptions.
//!
//! Elaboration has three jobs:
//!
//! 1. **Parameter resolution** — build a default constant environment per
//!    module and resolve `.NAME(expr)` overrides per instance.
//! 2. **Generate expansion** — unroll generate-for loops (cloning body
//!    items with the genvar substituted), prune generate-if branches, and
//!    select generate-case arms, producing a flat item list per module.
//! 3. **Flat net inventory** — collect net/var/instance records from the
//!    flat item list for the IR builder.
//!
//! Elaboration is lenient: unsupported forms pass through or are skipped
//! with a diagnostic; the only hard error is an empty genvar name.

#![warn(missing_docs)]

pub mod const_eval;
pub mod design;
pub mod elaborator;
pub mod errors;
mod subst;

pub use const_eval::{eval_const_expr, ConstEnv};
pub use design::{ElabInstance, ElabModule, ElabNet, ElabParam, ElabPortConn, ElaboratedDesign};
pub use elaborator::elaborate;
pub use errors::ElabError;
