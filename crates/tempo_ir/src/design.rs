//! The root of the RTL IR.

use crate::module::RtlModule;
use serde::{Deserialize, Serialize};

/// A lowered design: all modules, in source order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RtlDesign {
    /// The modules, in source order.
    pub modules: Vec<RtlModule>,
}

impl RtlDesign {
    /// Finds a module by name.
    pub fn find_module(&self, name: &str) -> Option<&RtlModule> {
        self.modules.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_module() {
        let design = RtlDesign {
            modules: vec![RtlModule::new("top"), RtlModule::new("sub")],
        };
        assert!(design.find_module("sub").is_some());
        assert!(design.find_module("none").is_none());
    }
}
