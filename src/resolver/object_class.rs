//! Information-object-class elimination (§4.8).
//!
//! ASN.1 information-object classes describe families of types indirectly;
//! before emission every [`ObjectClassFieldType`] must be replaced by the
//! concrete type its field names. This runs in three passes: discover which
//! names are object classes (directly, by alias, or by import), substitute
//! every field reference in the tree, then drop the now-dead assignments and
//! imports.

use std::collections::BTreeSet;

use crate::error::ResolveError;
use crate::resolver::names::find_assignment;
use crate::schema::{
    Assignment, AssignmentKind, BuiltinType, Component, DefinedType, Module, ObjectClassField,
    Tree, Type,
};

/// A module-qualified assignment name, used as the key of the object-class
/// membership set computed by [`discover_object_classes`].
type ClassKey = (String, String);

/// Fixed-point discovery of every name in `tree` that denotes an information
/// object class: declared directly, aliased by a type assignment, named as
/// the type of a value assignment, or imported from a module where the
/// exporter is itself a class (§4.8 step 1).
pub fn discover_object_classes(tree: &Tree) -> BTreeSet<ClassKey> {
    let mut classes: BTreeSet<ClassKey> = BTreeSet::new();

    loop {
        let mut changed = false;

        for module in &tree.modules {
            for assignment in &module.assignments {
                let key = (module.name.clone(), assignment.name.clone());
                if classes.contains(&key) {
                    continue;
                }
                if assignment_names_a_class(module, assignment, &classes) {
                    classes.insert(key);
                    changed = true;
                }
            }

            for import in &module.imports {
                let local_key = (module.name.clone(), import.name.clone());
                let origin_key = (import.from_module.clone(), import.name.clone());
                if !classes.contains(&local_key) && classes.contains(&origin_key) {
                    classes.insert(local_key);
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    classes
}

fn assignment_names_a_class(
    module: &Module,
    assignment: &Assignment,
    classes_so_far: &BTreeSet<ClassKey>,
) -> bool {
    match &assignment.kind {
        AssignmentKind::ObjectClass { .. } => true,
        AssignmentKind::Type(Type::Defined(defined)) => {
            defined_names_a_class(module, defined, classes_so_far)
        }
        AssignmentKind::Value {
            value_type: Type::Defined(defined),
            ..
        } => defined_names_a_class(module, defined, classes_so_far),
        _ => false,
    }
}

fn defined_names_a_class(
    module: &Module,
    defined: &DefinedType,
    classes_so_far: &BTreeSet<ClassKey>,
) -> bool {
    let target_module = defined
        .module
        .clone()
        .unwrap_or_else(|| module.name.clone());
    classes_so_far.contains(&(target_module, defined.name.clone()))
}

/// Chases a `Defined` reference, and any alias chain of type/value
/// assignments on top of it, until it reaches the object-class assignment it
/// ultimately names.
fn resolve_object_class<'a>(
    tree: &'a Tree,
    current_module: &str,
    defined: &DefinedType,
) -> Result<(&'a str, &'a [ObjectClassField]), ResolveError> {
    let (found_module, assignment) =
        find_assignment(tree, current_module, &defined.module, &defined.name)?;

    match &assignment.kind {
        AssignmentKind::ObjectClass { fields } => Ok((found_module, fields.as_slice())),
        AssignmentKind::Type(Type::Defined(next)) => {
            resolve_object_class(tree, found_module, next)
        }
        AssignmentKind::Value {
            value_type: Type::Defined(next),
            ..
        } => resolve_object_class(tree, found_module, next),
        _ => Err(ResolveError::NotAnObjectClass {
            reference: format!("{}.{}", found_module, defined.name),
        }),
    }
}

/// Replaces every [`BuiltinType::ObjectClassField`] reachable from `ty` with
/// the concrete type its field names (§4.8 step 2).
fn substitute(tree: &Tree, current_module: &str, ty: &Type) -> Result<Type, ResolveError> {
    match ty {
        Type::Defined(_) => Ok(ty.clone()),
        Type::Builtin(builtin) => Ok(Type::Builtin(substitute_builtin(
            tree,
            current_module,
            builtin,
        )?)),
    }
}

fn substitute_builtin(
    tree: &Tree,
    current_module: &str,
    builtin: &BuiltinType,
) -> Result<BuiltinType, ResolveError> {
    match builtin {
        BuiltinType::ObjectClassField(field_type) => {
            return Ok(substitute_field(tree, current_module, field_type)?);
        }
        BuiltinType::Structure {
            is_set,
            components,
        } => {
            let components = components
                .iter()
                .map(|component| substitute_component(tree, current_module, component))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(BuiltinType::Structure {
                is_set: *is_set,
                components,
            });
        }
        BuiltinType::StructureOf {
            is_set,
            element_name,
            element_type,
        } => {
            let element_type = Box::new(substitute(tree, current_module, element_type)?);
            return Ok(BuiltinType::StructureOf {
                is_set: *is_set,
                element_name: element_name.clone(),
                element_type,
            });
        }
        BuiltinType::Choice { alternatives } => {
            let alternatives = alternatives
                .iter()
                .map(|(name, ty)| Ok((name.clone(), substitute(tree, current_module, ty)?)))
                .collect::<Result<Vec<_>, ResolveError>>()?;
            return Ok(BuiltinType::Choice { alternatives });
        }
        BuiltinType::Prefixed { tag, mode, inner } => {
            let inner = Box::new(substitute(tree, current_module, inner)?);
            return Ok(BuiltinType::Prefixed {
                tag: *tag,
                mode: *mode,
                inner,
            });
        }
        other => Ok(other.clone()),
    }
}

fn substitute_field(
    tree: &Tree,
    current_module: &str,
    field_type: &crate::schema::ObjectClassFieldType,
) -> Result<Type, ResolveError> {
    match field_type.field_path.as_slice() {
        [field_name] => {
            let (class_name, fields) =
                resolve_object_class(tree, current_module, &field_type.class_ref)?;
            let field = fields
                .iter()
                .find(|f| field_name_of(f) == field_name)
                .ok_or_else(|| ResolveError::UnknownClassField {
                    class: class_name.to_owned(),
                    field: field_name.clone(),
                })?;
            match field {
                ObjectClassField::FixedTypeValueField { field_type, .. } => {
                    substitute(tree, current_module, field_type)
                }
                _ => Err(ResolveError::FieldIsNotATypeField {
                    class: class_name.to_owned(),
                    field: field_name.clone(),
                }),
            }
        }
        path => Err(ResolveError::MultiLevelFieldPath {
            path: path.to_vec(),
        }),
    }
}

fn field_name_of(field: &ObjectClassField) -> &str {
    match field {
        ObjectClassField::TypeField { name } => name,
        ObjectClassField::FixedTypeValueField { name, .. } => name,
        ObjectClassField::Other { name } => name,
    }
}

fn substitute_component(
    tree: &Tree,
    current_module: &str,
    component: &Component,
) -> Result<Component, ResolveError> {
    Ok(Component {
        name: component.name.clone(),
        component_type: substitute(tree, current_module, &component.component_type)?,
        optional: component.optional,
        default: component.default.clone(),
        components_of: component.components_of.clone(),
        storage: component.storage,
    })
}

/// Runs all three passes of §4.8 over `tree` in place: discover object-class
/// names, substitute every field reference, then drop the classes,
/// now-redundant aliases, object sets, and their imports.
pub fn eliminate_object_classes(tree: &mut Tree) -> Result<(), ResolveError> {
    let classes = discover_object_classes(tree);
    let snapshot = tree.clone();

    for module in &mut tree.modules {
        for assignment in &mut module.assignments {
            match &mut assignment.kind {
                AssignmentKind::Type(ty) => {
                    *ty = substitute(&snapshot, &module.name, ty)?;
                }
                AssignmentKind::Value { value_type, .. } => {
                    *value_type = substitute(&snapshot, &module.name, value_type)?;
                }
                _ => {}
            }
        }
    }

    for module in &mut tree.modules {
        let module_name = module.name.clone();
        module.assignments.retain(|assignment| {
            let key = (module_name.clone(), assignment.name.clone());
            !assignment.is_object_class() && !assignment.is_object_set() && !classes.contains(&key)
        });
        module
            .imports
            .retain(|import| !classes.contains(&(module_name.clone(), import.name.clone())));
    }

    Ok(())
}
