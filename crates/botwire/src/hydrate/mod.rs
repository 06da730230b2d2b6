// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolver/hydrator: raw wire values to validated typed instances.
//!
//! Given a target descriptor and a raw [`WireValue`], the hydrator resolves
//! abstract families through the registry, checks every scalar exactly (no
//! coercion), recurses through nested entities, unions and arrays, and
//! returns either a fully built value or the first error with a
//! path-qualified location. No partially built instance ever escapes.
//!
//! Recursion depth is bounded ([`DEFAULT_MAX_DEPTH`], configurable per
//! hydrator) so adversarial deeply-nested payloads fail with
//! [`DecodeError::DepthExceeded`] instead of exhausting the call stack.

mod path;
pub mod validate;

#[cfg(test)]
mod tests;

pub use path::FieldPath;

use crate::descriptor::{EntitySchema, ScalarKind, TypeDescriptor};
use crate::entity::{Entity, FieldValue};
use crate::error::DecodeError;
use crate::registry::Registry;
use crate::value::WireValue;
use log::trace;
use std::sync::Arc;

/// Default bound on payload nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Stateless decoder over a frozen registry.
///
/// Cheap to construct; multiple hydrators (or one shared across threads) may
/// decode concurrently since each call builds its own private instance
/// graph.
#[derive(Debug, Clone)]
pub struct Hydrator<'r> {
    registry: &'r Registry,
    max_depth: usize,
}

impl<'r> Hydrator<'r> {
    /// Hydrator with the default depth bound.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the nesting depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The registry this hydrator resolves against.
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Hydrate a raw value against a target descriptor.
    pub fn hydrate(
        &self,
        target: &TypeDescriptor,
        value: &WireValue,
    ) -> Result<FieldValue, DecodeError> {
        let mut path = FieldPath::new();
        self.hydrate_at(target, value, &mut path, 0)
    }

    /// Hydrate a raw object as the named entity type or family.
    pub fn hydrate_entity(&self, name: &str, value: &WireValue) -> Result<Entity, DecodeError> {
        let mut path = FieldPath::new();
        self.entity_at(name, value, &mut path, 0)
    }

    fn hydrate_at(
        &self,
        target: &TypeDescriptor,
        value: &WireValue,
        path: &mut FieldPath,
        depth: usize,
    ) -> Result<FieldValue, DecodeError> {
        if depth >= self.max_depth {
            return Err(DecodeError::DepthExceeded {
                path: path.render(),
            });
        }

        match target {
            TypeDescriptor::Scalar(kind) => match (kind, value) {
                (ScalarKind::Null, WireValue::Null) => Ok(FieldValue::Null),
                (ScalarKind::Bool, WireValue::Bool(v)) => Ok(FieldValue::Bool(*v)),
                (ScalarKind::Int, WireValue::Int(v)) => Ok(FieldValue::Int(*v)),
                (ScalarKind::Float, WireValue::Float(v)) => Ok(FieldValue::Float(*v)),
                (ScalarKind::Str, WireValue::Str(v)) => Ok(FieldValue::Str(v.clone())),
                _ => Err(DecodeError::TypeMismatch {
                    path: path.render(),
                    expected: kind.name().to_string(),
                    actual: value.kind_name().to_string(),
                }),
            },
            TypeDescriptor::Entity(name) => self
                .entity_at(name, value, path, depth)
                .map(|entity| FieldValue::Entity(Box::new(entity))),
            TypeDescriptor::Union(members) => {
                let mark = path.len();
                for member in members {
                    match self.hydrate_at(member, value, path, depth) {
                        Ok(hydrated) => return Ok(hydrated),
                        Err(_) => path.truncate(mark),
                    }
                }
                Err(DecodeError::TypeMismatch {
                    path: path.render(),
                    expected: target.to_string(),
                    actual: value.kind_name().to_string(),
                })
            }
            TypeDescriptor::Array(element) => match value {
                WireValue::List(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for (index, item) in items.iter().enumerate() {
                        path.push_index(index);
                        let hydrated = self.hydrate_at(element, item, path, depth + 1)?;
                        path.pop();
                        out.push(hydrated);
                    }
                    Ok(FieldValue::List(out))
                }
                other => Err(DecodeError::TypeMismatch {
                    path: path.render(),
                    expected: target.to_string(),
                    actual: other.kind_name().to_string(),
                }),
            },
        }
    }

    fn entity_at(
        &self,
        name: &str,
        value: &WireValue,
        path: &mut FieldPath,
        depth: usize,
    ) -> Result<Entity, DecodeError> {
        if depth >= self.max_depth {
            return Err(DecodeError::DepthExceeded {
                path: path.render(),
            });
        }

        if let Some(family) = self.registry.family(name) {
            let concrete = self.registry.resolve_variant(family.name(), value)?;
            return self.entity_at(concrete, value, path, depth + 1);
        }

        let Some(schema) = self.registry.schema(name) else {
            return Err(DecodeError::UnknownType {
                name: name.to_string(),
            });
        };
        self.fields_at(schema, value, path, depth)
    }

    fn fields_at(
        &self,
        schema: &Arc<EntitySchema>,
        value: &WireValue,
        path: &mut FieldPath,
        depth: usize,
    ) -> Result<Entity, DecodeError> {
        if !matches!(value, WireValue::Object(_)) {
            return Err(DecodeError::TypeMismatch {
                path: path.render(),
                expected: schema.name().to_string(),
                actual: value.kind_name().to_string(),
            });
        }

        let mut values = Vec::with_capacity(schema.fields().len());
        for spec in schema.fields() {
            let hydrated = match (value.get(&spec.name), &spec.default) {
                (Some(raw), _) => {
                    path.push_field(&spec.name);
                    let hydrated = self.hydrate_at(&spec.descriptor, raw, path, depth + 1)?;
                    path.pop();
                    hydrated
                }
                // A null default means "absent is allowed": the field stays
                // unset without being forced through the descriptor.
                (None, Some(default)) if default.is_null() => FieldValue::Null,
                (None, Some(default)) => {
                    path.push_field(&spec.name);
                    let hydrated = self.hydrate_at(&spec.descriptor, default, path, depth + 1)?;
                    path.pop();
                    hydrated
                }
                (None, None) => {
                    return Err(DecodeError::MissingRequiredField {
                        entity: schema.name().to_string(),
                        field: spec.name.clone(),
                    })
                }
            };
            values.push(hydrated);
        }

        let entity = Entity::from_values(schema.clone(), values);

        // Redundant safety pass over the freshly built fields. Runs for
        // every entity, not just types that opt in.
        validate::validate_arrays(self.registry, &entity)?;

        trace!("hydrated {}", schema.name());
        Ok(entity)
    }
}
