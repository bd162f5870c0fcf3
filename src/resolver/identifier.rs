//! Identifier derivation (§4.9): computing the composite wire identifier of
//! every resolved type, and the automatic-tagging normalization pass that
//! precedes it.

use crate::error::ResolveError;
use crate::resolver::names::find_assignment;
use crate::schema::{BuiltinType, Module, TaggingMode, Tree, Type};
use crate::tag::{Class, Tag};

/// The schema-level counterpart of [`crate::identifier::CompositeId`]: an
/// optional outer tag, an inner tag, and — for `CHOICE` — the named,
/// tagged alternatives a value of this type may present on the wire.
///
/// For every variant except `CHOICE`, `effective_tag()` (`outer_tag` if
/// present, else `inner_tag`) is the identifier a peer sees on the wire.
/// For `CHOICE`, `choice_alternatives` is authoritative and `inner_tag` is
/// simply the first alternative's tag (kept non-optional for uniformity,
/// not meaningful on its own).
#[derive(Debug, Clone, PartialEq)]
pub struct TaggingInfo {
    pub outer_tag: Option<Tag>,
    pub inner_tag: Tag,
    pub choice_alternatives: Option<Vec<(String, Tag)>>,
    pub is_default_tagged: bool,
}

impl TaggingInfo {
    fn universal(tag: Tag) -> Self {
        Self {
            outer_tag: None,
            inner_tag: tag,
            choice_alternatives: None,
            is_default_tagged: true,
        }
    }

    /// The identifier a peer sees on the wire for a plain (non-`CHOICE`)
    /// type: the outer tag if one was applied, else the inner tag.
    pub fn effective_tag(&self) -> Tag {
        self.outer_tag.unwrap_or(self.inner_tag)
    }
}

/// Computes the [`TaggingInfo`] of `ty`, resolved in the context of
/// `current_module` under `default_tagging` (the enclosing module's
/// default tagging environment, §4.9).
pub fn derive_identifier(
    tree: &Tree,
    current_module: &str,
    ty: &Type,
    default_tagging: TaggingMode,
) -> Result<TaggingInfo, ResolveError> {
    match ty {
        Type::Defined(defined) => {
            let (found_module, assignment) =
                find_assignment(tree, current_module, &defined.module, &defined.name)?;
            let inner = assignment
                .as_type()
                .ok_or_else(|| ResolveError::NotAType {
                    module: found_module.to_owned(),
                    name: defined.name.clone(),
                })?;
            let module_tagging = tree
                .find_module(found_module)
                .map(|m| m.default_tagging)
                .unwrap_or(default_tagging);
            derive_identifier(tree, found_module, inner, module_tagging)
        }
        Type::Builtin(builtin) => derive_builtin(tree, current_module, builtin, default_tagging),
    }
}

fn derive_builtin(
    tree: &Tree,
    current_module: &str,
    builtin: &BuiltinType,
    default_tagging: TaggingMode,
) -> Result<TaggingInfo, ResolveError> {
    match builtin {
        BuiltinType::Boolean => Ok(TaggingInfo::universal(Tag::BOOL)),
        BuiltinType::Integer { .. } => Ok(TaggingInfo::universal(Tag::INTEGER)),
        BuiltinType::BitString { .. } => Ok(TaggingInfo::universal(Tag::BIT_STRING)),
        BuiltinType::OctetString => Ok(TaggingInfo::universal(Tag::OCTET_STRING)),
        BuiltinType::Null => Ok(TaggingInfo::universal(Tag::NULL)),
        BuiltinType::ObjectIdentifier => Ok(TaggingInfo::universal(Tag::OBJECT_IDENTIFIER)),
        BuiltinType::RelativeObjectIdentifier => Ok(TaggingInfo::universal(Tag::RELATIVE_OID)),
        BuiltinType::Enumerated { .. } => Ok(TaggingInfo::universal(Tag::ENUMERATED)),
        BuiltinType::CharacterStringType(character_set) => {
            Ok(TaggingInfo::universal(character_set.universal_tag()))
        }
        BuiltinType::Real => Ok(TaggingInfo::universal(Tag::REAL)),
        BuiltinType::Time(crate::schema::TimeKind::UtcTime) => {
            Ok(TaggingInfo::universal(Tag::UTC_TIME))
        }
        BuiltinType::Time(crate::schema::TimeKind::GeneralizedTime) => {
            Ok(TaggingInfo::universal(Tag::GENERALIZED_TIME))
        }
        BuiltinType::Structure { is_set, .. } => {
            Ok(TaggingInfo::universal(if *is_set { Tag::SET } else { Tag::SEQUENCE }))
        }
        BuiltinType::StructureOf { is_set, .. } => {
            Ok(TaggingInfo::universal(if *is_set { Tag::SET } else { Tag::SEQUENCE }))
        }
        BuiltinType::Any => Ok(TaggingInfo {
            outer_tag: None,
            inner_tag: Tag::EOC,
            choice_alternatives: None,
            is_default_tagged: false,
        }),
        BuiltinType::ObjectClassField(field) => Err(ResolveError::NotAnObjectClass {
            reference: field.class_ref.name.clone(),
        }),
        BuiltinType::Choice { alternatives } => {
            let mut tagged = Vec::with_capacity(alternatives.len());
            for (name, alt_type) in alternatives {
                let info = derive_identifier(tree, current_module, alt_type, default_tagging)?;
                tagged.push((name.clone(), info.effective_tag()));
            }
            for i in 0..tagged.len() {
                for j in (i + 1)..tagged.len() {
                    if tagged[i].1 == tagged[j].1 {
                        return Err(ResolveError::AmbiguousChoice {
                            first: tagged[i].0.clone(),
                            second: tagged[j].0.clone(),
                        });
                    }
                }
            }
            let inner_tag = tagged
                .first()
                .map(|(_, tag)| *tag)
                .unwrap_or(Tag::new(Class::Universal, 0));
            Ok(TaggingInfo {
                outer_tag: None,
                inner_tag,
                choice_alternatives: Some(tagged),
                is_default_tagged: false,
            })
        }
        BuiltinType::Prefixed { tag, mode, inner } => {
            let inner_info = derive_identifier(tree, current_module, inner, default_tagging)?;
            let effective_mode = match mode {
                // "falls back to module default" (§4.9): a `Prefixed` node
                // only carries `Automatic` when automatic-tagging
                // normalization (`apply_automatic_tagging`) failed to
                // already rewrite it to implicit/explicit, which happens
                // when the surrounding module's own default is automatic
                // too; X.680 treats that case as explicit.
                TaggingMode::Automatic => TaggingMode::Explicit,
                other => *other,
            };
            match effective_mode {
                TaggingMode::Implicit => Ok(TaggingInfo {
                    outer_tag: None,
                    inner_tag: *tag,
                    choice_alternatives: None,
                    is_default_tagged: false,
                }),
                TaggingMode::Explicit => Ok(TaggingInfo {
                    outer_tag: Some(*tag),
                    inner_tag: inner_info.effective_tag(),
                    choice_alternatives: None,
                    is_default_tagged: false,
                }),
                TaggingMode::Automatic => unreachable!("mapped to Explicit above"),
            }
        }
    }
}

/// Normalizes automatic tagging (§4.9) before identifier derivation runs:
/// in a module whose default tagging is `Automatic`, every component of a
/// `SEQUENCE`/`SET`/`CHOICE` whose members are *all* otherwise untagged is
/// rewritten to carry a sequential `[0] IMPLICIT`, `[1] IMPLICIT`, …
/// wrapper (`[n] EXPLICIT` when the member itself is a `CHOICE`, since
/// `CHOICE` cannot be implicitly tagged).
pub fn apply_automatic_tagging(tree: &mut Tree) {
    for module in &mut tree.modules {
        if module.default_tagging != TaggingMode::Automatic {
            continue;
        }
        apply_to_module(module);
    }
}

fn apply_to_module(module: &mut Module) {
    for assignment in &mut module.assignments {
        if let Some(ty) = assignment.as_type_mut() {
            apply_to_type(ty);
        }
    }
}

fn apply_to_type(ty: &mut Type) {
    match ty {
        Type::Builtin(BuiltinType::Structure { components, .. }) => {
            if components
                .iter()
                .all(|component| !is_already_tagged(&component.component_type))
            {
                for (index, component) in components.iter_mut().enumerate() {
                    wrap_automatic(index as u32, &mut component.component_type);
                }
            }
            for component in components.iter_mut() {
                apply_to_type(&mut component.component_type);
            }
        }
        Type::Builtin(BuiltinType::Choice { alternatives }) => {
            if alternatives
                .iter()
                .all(|(_, alt_type)| !is_already_tagged(alt_type))
            {
                for (index, (_, alt_type)) in alternatives.iter_mut().enumerate() {
                    wrap_automatic(index as u32, alt_type);
                }
            }
            for (_, alt_type) in alternatives.iter_mut() {
                apply_to_type(alt_type);
            }
        }
        Type::Builtin(BuiltinType::StructureOf { element_type, .. }) => {
            apply_to_type(element_type);
        }
        Type::Builtin(BuiltinType::Prefixed { inner, .. }) => apply_to_type(inner),
        _ => {}
    }
}

fn is_already_tagged(ty: &Type) -> bool {
    matches!(ty, Type::Builtin(BuiltinType::Prefixed { .. }))
}

fn wrap_automatic(index: u32, ty: &mut Type) {
    let is_choice = matches!(ty, Type::Builtin(BuiltinType::Choice { .. }));
    let inner = std::mem::replace(ty, Type::Builtin(BuiltinType::Null));
    *ty = Type::Builtin(BuiltinType::Prefixed {
        tag: Tag::context(index),
        mode: if is_choice {
            TaggingMode::Explicit
        } else {
            TaggingMode::Implicit
        },
        inner: Box::new(inner),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Assignment, AssignmentKind, Component, StoragePolicy};

    fn tree_with(module: Module) -> Tree {
        Tree { modules: vec![module] }
    }

    fn type_assignment(name: &str, ty: Type) -> Assignment {
        Assignment {
            name: name.to_owned(),
            kind: AssignmentKind::Type(ty),
            parameters: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    #[test]
    fn primitive_gets_its_universal_tag() {
        let tree = tree_with(Module {
            name: "M".to_owned(),
            default_tagging: TaggingMode::Explicit,
            imports: Vec::new(),
            assignments: Vec::new(),
        });
        let info = derive_identifier(
            &tree,
            "M",
            &Type::Builtin(BuiltinType::Boolean),
            TaggingMode::Explicit,
        )
        .unwrap();
        assert_eq!(info.effective_tag(), Tag::BOOL);
        assert!(info.is_default_tagged);
    }

    #[test]
    fn explicit_prefix_wraps_the_inner_tag() {
        let tree = tree_with(Module {
            name: "M".to_owned(),
            default_tagging: TaggingMode::Explicit,
            imports: Vec::new(),
            assignments: Vec::new(),
        });
        let ty = Type::Builtin(BuiltinType::Prefixed {
            tag: Tag::context(0),
            mode: TaggingMode::Explicit,
            inner: Box::new(Type::Builtin(BuiltinType::Integer { named_numbers: Vec::new() })),
        });
        let info = derive_identifier(&tree, "M", &ty, TaggingMode::Explicit).unwrap();
        assert_eq!(info.outer_tag, Some(Tag::context(0)));
        assert_eq!(info.inner_tag, Tag::INTEGER);
    }

    #[test]
    fn implicit_prefix_replaces_the_tag() {
        let tree = tree_with(Module {
            name: "M".to_owned(),
            default_tagging: TaggingMode::Explicit,
            imports: Vec::new(),
            assignments: Vec::new(),
        });
        let ty = Type::Builtin(BuiltinType::Prefixed {
            tag: Tag::context(0),
            mode: TaggingMode::Implicit,
            inner: Box::new(Type::Builtin(BuiltinType::OctetString)),
        });
        let info = derive_identifier(&tree, "M", &ty, TaggingMode::Explicit).unwrap();
        assert_eq!(info.outer_tag, None);
        assert_eq!(info.inner_tag, Tag::context(0));
        assert_eq!(info.effective_tag(), Tag::context(0));
    }

    #[test]
    fn choice_collects_alternative_tags_and_rejects_overlap() {
        let tree = tree_with(Module {
            name: "M".to_owned(),
            default_tagging: TaggingMode::Explicit,
            imports: Vec::new(),
            assignments: Vec::new(),
        });
        let ok = Type::Builtin(BuiltinType::Choice {
            alternatives: vec![
                (
                    "a".to_owned(),
                    Type::Builtin(BuiltinType::Prefixed {
                        tag: Tag::context(0),
                        mode: TaggingMode::Implicit,
                        inner: Box::new(Type::Builtin(BuiltinType::Integer { named_numbers: Vec::new() })),
                    }),
                ),
                (
                    "b".to_owned(),
                    Type::Builtin(BuiltinType::Prefixed {
                        tag: Tag::context(1),
                        mode: TaggingMode::Implicit,
                        inner: Box::new(Type::Builtin(BuiltinType::OctetString)),
                    }),
                ),
            ],
        });
        let info = derive_identifier(&tree, "M", &ok, TaggingMode::Explicit).unwrap();
        assert_eq!(
            info.choice_alternatives,
            Some(vec![
                ("a".to_owned(), Tag::context(0)),
                ("b".to_owned(), Tag::context(1)),
            ])
        );

        let ambiguous = Type::Builtin(BuiltinType::Choice {
            alternatives: vec![
                ("a".to_owned(), Type::Builtin(BuiltinType::Boolean)),
                ("b".to_owned(), Type::Builtin(BuiltinType::Boolean)),
            ],
        });
        let err = derive_identifier(&tree, "M", &ambiguous, TaggingMode::Explicit).unwrap_err();
        assert!(matches!(err, ResolveError::AmbiguousChoice { .. }));
    }

    #[test]
    fn automatic_tagging_numbers_untagged_components_sequentially() {
        let structure = Type::Builtin(BuiltinType::Structure {
            is_set: false,
            components: vec![
                Component {
                    name: "a".to_owned(),
                    component_type: Type::Builtin(BuiltinType::Integer { named_numbers: Vec::new() }),
                    optional: false,
                    default: None,
                    components_of: None,
                    storage: StoragePolicy::Static,
                },
                Component {
                    name: "b".to_owned(),
                    component_type: Type::Builtin(BuiltinType::OctetString),
                    optional: false,
                    default: None,
                    components_of: None,
                    storage: StoragePolicy::Static,
                },
            ],
        });

        let mut tree = tree_with(Module {
            name: "M".to_owned(),
            default_tagging: TaggingMode::Automatic,
            imports: Vec::new(),
            assignments: vec![type_assignment("S", structure)],
        });

        apply_automatic_tagging(&mut tree);

        let info = derive_identifier(
            &tree,
            "M",
            tree.find_module("M").unwrap().find_assignment("S").unwrap().as_type().unwrap(),
            TaggingMode::Automatic,
        )
        .unwrap();
        assert_eq!(info.effective_tag(), Tag::SEQUENCE);

        let resolved_type = tree
            .find_module("M")
            .unwrap()
            .find_assignment("S")
            .unwrap()
            .as_type()
            .unwrap();
        if let Type::Builtin(BuiltinType::Structure { components, .. }) = resolved_type {
            let a_info = derive_identifier(
                &tree,
                "M",
                &components[0].component_type,
                TaggingMode::Automatic,
            )
            .unwrap();
            let b_info = derive_identifier(
                &tree,
                "M",
                &components[1].component_type,
                TaggingMode::Automatic,
            )
            .unwrap();
            assert_eq!(a_info.effective_tag(), Tag::context(0));
            assert_eq!(b_info.effective_tag(), Tag::context(1));
        } else {
            panic!("expected a structure");
        }
    }
}
