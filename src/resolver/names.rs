//! Name resolution (§4.7): chasing `Defined` type references across modules
//! until a built-in type is reached.

use crate::error::ResolveError;
use crate::schema::{Assignment, BuiltinType, Tree, Type};

/// Finds the assignment `name` in `module_ref` (or `current_module` when
/// `module_ref` is `None`), the same module-resolution rule every `Defined`
/// reference in the tree follows (§4.7).
pub fn find_assignment<'a>(
    tree: &'a Tree,
    current_module: &str,
    module_ref: &Option<String>,
    name: &str,
) -> Result<(&'a str, &'a Assignment), ResolveError> {
    let module_name = module_ref
        .clone()
        .unwrap_or_else(|| current_module.to_owned());
    let module = tree
        .find_module(&module_name)
        .ok_or_else(|| ResolveError::UndefinedModule {
            module: module_name.clone(),
        })?;
    let assignment = module
        .find_assignment(name)
        .ok_or_else(|| ResolveError::UndefinedReference {
            module: module_name.clone(),
            name: name.to_owned(),
        })?;
    Ok((module.name.as_str(), assignment))
}

/// Resolves `type_` to its underlying built-in shape, following `Defined`
/// references (optionally crossing modules) transparently. When a
/// `Prefixed` type's inner type is itself defined, the inner result is
/// substituted and the outer tag/mode is preserved.
pub fn resolve_type(tree: &Tree, current_module: &str, type_: &Type) -> Result<Type, ResolveError> {
    match type_ {
        Type::Defined(defined) => {
            let module_name = defined
                .module
                .clone()
                .unwrap_or_else(|| current_module.to_owned());
            let module = tree
                .find_module(&module_name)
                .ok_or_else(|| ResolveError::UndefinedModule {
                    module: module_name.clone(),
                })?;
            let assignment =
                module
                    .find_assignment(&defined.name)
                    .ok_or_else(|| ResolveError::UndefinedReference {
                        module: module_name.clone(),
                        name: defined.name.clone(),
                    })?;
            let inner = assignment
                .as_type()
                .ok_or_else(|| ResolveError::NotAType {
                    module: module_name.clone(),
                    name: defined.name.clone(),
                })?;
            resolve_type(tree, &module_name, inner)
        }
        Type::Builtin(BuiltinType::Prefixed { tag, mode, inner }) => {
            let resolved_inner = resolve_type(tree, current_module, inner)?;
            Ok(Type::Builtin(BuiltinType::Prefixed {
                tag: *tag,
                mode: *mode,
                inner: Box::new(resolved_inner),
            }))
        }
        other => Ok(other.clone()),
    }
}
