//! The top two levels of the schema model (§3.2): a [`Tree`] of [`Module`]s,
//! each with its imports and default tagging mode.

use crate::schema::assignment::Assignment;

/// A module's default tagging environment, applied to every component that
/// doesn't explicitly say otherwise (§4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaggingMode {
    Explicit,
    Implicit,
    Automatic,
}

/// One named type or value imported from another module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Import {
    pub name: String,
    pub from_module: String,
}

/// One ASN.1 module: a name, its default tagging mode, what it imports, and
/// the ordered list of assignments it defines.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub default_tagging: TaggingMode,
    pub imports: Vec<Import>,
    pub assignments: Vec<Assignment>,
}

impl Module {
    pub fn find_assignment(&self, name: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.name() == name)
    }
}

/// The whole parsed schema: an ordered list of modules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    pub modules: Vec<Module>,
}

impl Tree {
    pub fn find_module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn find_module_mut(&mut self, name: &str) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.name == name)
    }
}
