//! Dependency extraction and the recursive per-module closure (§4.9).

use std::collections::BTreeSet;

use crate::error::ResolveError;
use crate::schema::{Assignment, AssignmentKind, BuiltinType, DependencyEdge, Tree, Type, Value};

/// The direct dependency set of a type: every other assignment that must
/// exist before this type can be emitted.
pub fn type_dependencies(ty: &Type) -> Vec<DependencyEdge> {
    match ty {
        Type::Defined(defined) => vec![DependencyEdge {
            module: defined.module.clone(),
            name: defined.name.clone(),
        }],
        Type::Builtin(builtin) => builtin_dependencies(builtin),
    }
}

fn builtin_dependencies(builtin: &BuiltinType) -> Vec<DependencyEdge> {
    match builtin {
        BuiltinType::Structure { components, .. } => components
            .iter()
            .flat_map(|component| {
                let mut deps = type_dependencies(&component.component_type);
                if let Some(components_of) = &component.components_of {
                    deps.push(DependencyEdge {
                        module: components_of.module.clone(),
                        name: components_of.name.clone(),
                    });
                }
                deps
            })
            .collect(),
        BuiltinType::StructureOf { element_type, .. } => type_dependencies(element_type),
        BuiltinType::Choice { alternatives } => alternatives
            .iter()
            .flat_map(|(_, ty)| type_dependencies(ty))
            .collect(),
        BuiltinType::Prefixed { inner, .. } => type_dependencies(inner),
        BuiltinType::ObjectClassField(field) => vec![DependencyEdge {
            module: field.class_ref.module.clone(),
            name: field.class_ref.name.clone(),
        }],
        BuiltinType::Boolean
        | BuiltinType::Integer { .. }
        | BuiltinType::BitString { .. }
        | BuiltinType::OctetString
        | BuiltinType::Null
        | BuiltinType::ObjectIdentifier
        | BuiltinType::RelativeObjectIdentifier
        | BuiltinType::Enumerated { .. }
        | BuiltinType::CharacterStringType(_)
        | BuiltinType::Real
        | BuiltinType::Time(_)
        | BuiltinType::Any => Vec::new(),
    }
}

/// The defined-value references a value depends on (§4.9: "a value depends
/// on any defined values it references").
pub fn value_dependencies(value: &Value) -> Vec<DependencyEdge> {
    value
        .referenced_values()
        .into_iter()
        .map(|defined| DependencyEdge {
            module: defined.module.clone(),
            name: defined.name.clone(),
        })
        .collect()
}

/// The full direct dependency set of an assignment: its type's dependencies,
/// plus — for a value assignment — its value's dependencies too.
pub fn assignment_dependencies(assignment: &Assignment) -> Vec<DependencyEdge> {
    match &assignment.kind {
        AssignmentKind::Type(ty) => type_dependencies(ty),
        AssignmentKind::Value { value_type, value } => {
            let mut deps = type_dependencies(value_type);
            deps.extend(value_dependencies(value));
            deps
        }
        AssignmentKind::ObjectClass { .. } | AssignmentKind::ObjectSet => Vec::new(),
    }
}

/// Walks the dependency graph of `(module, name)` to its transitive closure
/// within `module`, skipping cross-module edges (§4.9). Detects cycles via
/// the current recursion path and reports [`ResolveError::DependencyCycle`]
/// at the first revisit.
pub fn get_dependencies_recursive(
    tree: &Tree,
    module: &str,
    name: &str,
) -> Result<BTreeSet<DependencyEdge>, ResolveError> {
    let mut path = BTreeSet::new();
    let mut closure = BTreeSet::new();
    walk(tree, module, name, &mut path, &mut closure)?;
    Ok(closure)
}

fn walk(
    tree: &Tree,
    module: &str,
    name: &str,
    path: &mut BTreeSet<String>,
    closure: &mut BTreeSet<DependencyEdge>,
) -> Result<(), ResolveError> {
    if path.contains(name) {
        return Err(ResolveError::DependencyCycle {
            module: module.to_owned(),
            name: name.to_owned(),
        });
    }
    path.insert(name.to_owned());

    let found_module = tree
        .find_module(module)
        .ok_or_else(|| ResolveError::UndefinedModule {
            module: module.to_owned(),
        })?;
    let assignment =
        found_module
            .find_assignment(name)
            .ok_or_else(|| ResolveError::UndefinedReference {
                module: module.to_owned(),
                name: name.to_owned(),
            })?;

    for dep in assignment_dependencies(assignment) {
        // Cross-module edges are skipped entirely, not merely left
        // unwalked: they never enter the closure (§4.9).
        let same_module = dep.module.is_none() || dep.module.as_deref() == Some(module);
        if !same_module {
            continue;
        }
        closure.insert(dep.clone());
        walk(tree, module, &dep.name, path, closure)?;
    }

    path.remove(name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DefinedType, Module, TaggingMode};

    fn module(name: &str, assignments: Vec<Assignment>) -> Module {
        Module {
            name: name.to_owned(),
            default_tagging: TaggingMode::Explicit,
            imports: Vec::new(),
            assignments,
        }
    }

    fn type_assignment(name: &str, ty: Type) -> Assignment {
        Assignment {
            name: name.to_owned(),
            kind: AssignmentKind::Type(ty),
            parameters: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    fn defined(name: &str) -> Type {
        Type::Defined(DefinedType {
            module: None,
            name: name.to_owned(),
            parameters: Vec::new(),
        })
    }

    #[test]
    fn transitive_closure_within_one_module() {
        let tree = Tree {
            modules: vec![module(
                "M",
                vec![
                    type_assignment("A", defined("B")),
                    type_assignment("B", defined("C")),
                    type_assignment("C", Type::Builtin(BuiltinType::Boolean)),
                ],
            )],
        };
        let closure = get_dependencies_recursive(&tree, "M", "A").unwrap();
        assert!(closure.contains(&DependencyEdge {
            module: None,
            name: "B".to_owned()
        }));
        assert!(closure.contains(&DependencyEdge {
            module: None,
            name: "C".to_owned()
        }));
    }

    #[test]
    fn cycle_is_reported() {
        let tree = Tree {
            modules: vec![module(
                "M",
                vec![
                    type_assignment("A", defined("B")),
                    type_assignment("B", defined("A")),
                ],
            )],
        };
        let err = get_dependencies_recursive(&tree, "M", "A").unwrap_err();
        assert!(matches!(err, ResolveError::DependencyCycle { .. }));
    }

    #[test]
    fn diamond_dependency_is_not_a_false_cycle() {
        let tree = Tree {
            modules: vec![module(
                "M",
                vec![
                    type_assignment(
                        "A",
                        Type::Builtin(BuiltinType::Structure {
                            is_set: false,
                            components: vec![
                                crate::schema::Component {
                                    name: "x".to_owned(),
                                    component_type: defined("B"),
                                    optional: false,
                                    default: None,
                                    components_of: None,
                                    storage: crate::schema::StoragePolicy::Static,
                                },
                                crate::schema::Component {
                                    name: "y".to_owned(),
                                    component_type: defined("C"),
                                    optional: false,
                                    default: None,
                                    components_of: None,
                                    storage: crate::schema::StoragePolicy::Static,
                                },
                            ],
                        }),
                    ),
                    type_assignment("B", defined("D")),
                    type_assignment("C", defined("D")),
                    type_assignment("D", Type::Builtin(BuiltinType::Boolean)),
                ],
            )],
        };
        let closure = get_dependencies_recursive(&tree, "M", "A").unwrap();
        for n in ["B", "C", "D"] {
            assert!(closure.contains(&DependencyEdge {
                module: None,
                name: n.to_owned()
            }));
        }
    }

    #[test]
    fn cross_module_edges_are_skipped_entirely() {
        let tree = Tree {
            modules: vec![
                module(
                    "M",
                    vec![type_assignment(
                        "A",
                        Type::Defined(DefinedType {
                            module: Some("Other".to_owned()),
                            name: "X".to_owned(),
                            parameters: Vec::new(),
                        }),
                    )],
                ),
                module("Other", vec![]),
            ],
        };
        let closure = get_dependencies_recursive(&tree, "M", "A").unwrap();
        assert!(closure.is_empty());
    }
}
