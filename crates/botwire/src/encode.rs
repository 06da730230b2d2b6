// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serializer: typed entities back to generic wire values.
//!
//! The inverse of hydration. Produces one object entry per declared wire
//! field, in the schema's canonical (declaration) order. A field holding no
//! value serializes as an explicit `Null` entry; keys are never omitted, so
//! callers expecting "omit optional fields" must filter afterward.
//!
//! No array-content validation happens here: the serializer trusts the
//! in-memory entity.

use crate::entity::{Entity, FieldValue};
use crate::value::WireValue;

/// Encode an entity into a wire object.
pub fn encode(entity: &Entity) -> WireValue {
    let mut entries = Vec::with_capacity(entity.schema().fields().len());
    for (name, value) in entity.fields() {
        entries.push((name.to_string(), encode_value(value)));
    }
    WireValue::Object(entries)
}

fn encode_value(value: &FieldValue) -> WireValue {
    match value {
        FieldValue::Null => WireValue::Null,
        FieldValue::Bool(v) => WireValue::Bool(*v),
        FieldValue::Int(v) => WireValue::Int(*v),
        FieldValue::Float(v) => WireValue::Float(*v),
        FieldValue::Str(v) => WireValue::Str(v.clone()),
        FieldValue::List(items) => WireValue::List(items.iter().map(encode_value).collect()),
        FieldValue::Entity(entity) => encode(entity),
    }
}
