// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Array content validation over already-hydrated entities.
//!
//! The hydrator runs this pass unconditionally after an entity's fields are
//! populated, re-walking the typed values rather than the raw payload. It is
//! public so entities assembled without the hydrator (via
//! [`Entity::new`](crate::Entity::new) and setters) can be checked through
//! the same pass.
//!
//! Violations report the concrete entity's type name and the fully
//! qualified property path, nested indices included:
//! `freeform_gradient_fill.colors[2]`.

use crate::descriptor::{ScalarKind, TypeDescriptor};
use crate::entity::{Entity, FieldValue};
use crate::error::DecodeError;
use crate::hydrate::FieldPath;
use crate::registry::Registry;

/// Check every array-typed field of the entity against its declared element
/// descriptor.
///
/// A `Null` value in an array-typed slot counts as "absent" and is skipped;
/// any other non-list value is a violation.
pub fn validate_arrays(registry: &Registry, entity: &Entity) -> Result<(), DecodeError> {
    for (spec, value) in entity.schema().fields().iter().zip(entity.values()) {
        if !matches!(spec.descriptor, TypeDescriptor::Array(_)) {
            continue;
        }
        if value.is_null() {
            continue;
        }
        let mut path = FieldPath::rooted(entity.type_name());
        path.push_field(&spec.name);
        check_value(registry, &spec.descriptor, value, &mut path)?;
    }
    Ok(())
}

fn check_value(
    registry: &Registry,
    descriptor: &TypeDescriptor,
    value: &FieldValue,
    path: &mut FieldPath,
) -> Result<(), DecodeError> {
    match descriptor {
        TypeDescriptor::Scalar(kind) => {
            if scalar_matches(*kind, value) {
                Ok(())
            } else {
                Err(mismatch(descriptor, value, path))
            }
        }
        TypeDescriptor::Entity(name) => match value {
            FieldValue::Entity(entity) if satisfies_entity(registry, name, entity) => Ok(()),
            other => Err(mismatch(descriptor, other, path)),
        },
        TypeDescriptor::Union(members) => {
            let mark = path.len();
            for member in members {
                if check_value(registry, member, value, path).is_ok() {
                    return Ok(());
                }
                path.truncate(mark);
            }
            Err(mismatch(descriptor, value, path))
        }
        TypeDescriptor::Array(element) => match value {
            FieldValue::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    path.push_index(index);
                    check_value(registry, element, item, path)?;
                    path.pop();
                }
                Ok(())
            }
            other => Err(mismatch(descriptor, other, path)),
        },
    }
}

fn scalar_matches(kind: ScalarKind, value: &FieldValue) -> bool {
    matches!(
        (kind, value),
        (ScalarKind::Null, FieldValue::Null)
            | (ScalarKind::Bool, FieldValue::Bool(_))
            | (ScalarKind::Int, FieldValue::Int(_))
            | (ScalarKind::Float, FieldValue::Float(_))
            | (ScalarKind::Str, FieldValue::Str(_))
    )
}

fn satisfies_entity(registry: &Registry, name: &str, entity: &Entity) -> bool {
    if entity.type_name() == name {
        return true;
    }
    registry
        .family(name)
        .is_some_and(|family| family.contains(entity.type_name()))
}

fn mismatch(descriptor: &TypeDescriptor, value: &FieldValue, path: &FieldPath) -> DecodeError {
    let actual = match value {
        FieldValue::Entity(entity) => entity.type_name().to_string(),
        other => other.kind_name().to_string(),
    };
    DecodeError::TypeMismatch {
        path: path.render(),
        expected: descriptor.to_string(),
        actual,
    }
}
