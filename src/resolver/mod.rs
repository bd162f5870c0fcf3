//! The schema resolver (C8, §4.7-§4.9): the semantic phase of the compiler.
//!
//! Takes a raw parsed [`crate::schema::Tree`] and normalizes it — resolving
//! `Defined` references, eliminating information-object-class field
//! references, and deriving every assignment's dependency list and wire
//! identifier — producing a [`ResolvedTree`] an external emitter can
//! consume without re-deriving any of it.
//!
//! Resolver errors (§4.10) are fatal: [`resolve`] stops at the first one and
//! hands back nothing. Running it twice is a no-op (§8: resolver
//! idempotence) — the second pass finds no object classes left to
//! eliminate and recomputes the same dependencies and identifiers.

use std::collections::BTreeMap;

use crate::error::ResolveError;
use crate::schema::Tree;

pub mod dependencies;
pub mod identifier;
pub mod names;
pub mod object_class;

pub use dependencies::{
    assignment_dependencies, get_dependencies_recursive, type_dependencies, value_dependencies,
};
pub use identifier::{apply_automatic_tagging, derive_identifier, TaggingInfo};
pub use names::resolve_type;
pub use object_class::{discover_object_classes, eliminate_object_classes};

/// A module-qualified assignment name: the key of [`ResolvedTree::identifiers`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AssignmentRef {
    pub module: String,
    pub name: String,
}

/// The output of the resolve pipeline (§6): a normalized [`Tree`] — object
/// classes eliminated, automatic tagging expanded, every assignment's
/// `dependencies` populated — plus the per-assignment identifier oracle an
/// emitter uses to pick each type's wire tag.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTree {
    pub tree: Tree,
    pub identifiers: BTreeMap<AssignmentRef, TaggingInfo>,
}

/// Runs the full resolve pipeline over `tree`:
///
/// 1. Normalize automatic tagging (§4.9) so every `Prefixed` node reflects
///    its module's tagging environment.
/// 2. Eliminate information-object-class field references (§4.8).
/// 3. Populate every assignment's dependency list and verify the resulting
///    graph is acyclic within each module (§4.9).
/// 4. Derive the composite wire identifier of every assignment (§4.9).
pub fn resolve(mut tree: Tree) -> Result<ResolvedTree, ResolveError> {
    apply_automatic_tagging(&mut tree);
    eliminate_object_classes(&mut tree)?;

    for module_index in 0..tree.modules.len() {
        for assignment_index in 0..tree.modules[module_index].assignments.len() {
            let deps = assignment_dependencies(&tree.modules[module_index].assignments[assignment_index]);
            tree.modules[module_index].assignments[assignment_index].dependencies = deps;
        }
    }

    for module in &tree.modules {
        for assignment in &module.assignments {
            get_dependencies_recursive(&tree, &module.name, &assignment.name)?;
        }
    }

    let mut identifiers = BTreeMap::new();
    for module in &tree.modules {
        for assignment in &module.assignments {
            if let Some(ty) = assignment.as_type() {
                let info = derive_identifier(&tree, &module.name, ty, module.default_tagging)?;
                identifiers.insert(
                    AssignmentRef {
                        module: module.name.clone(),
                        name: assignment.name.clone(),
                    },
                    info,
                );
            }
        }
    }

    Ok(ResolvedTree { tree, identifiers })
}
