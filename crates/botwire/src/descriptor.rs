// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors and entity schemas.
//!
//! A [`TypeDescriptor`] is the declared expected shape of a single field:
//! a scalar kind, a named entity type (concrete or family), an ordered union
//! of alternatives, or an array of a nested descriptor. An [`EntitySchema`]
//! is the ordered field table of one concrete type, built once at startup
//! through [`SchemaBuilder`] and shared as `Arc<EntitySchema>` thereafter.

use crate::value::WireValue;
use std::fmt;

/// Scalar kinds a wire value can be checked against. No coercion: `Int` and
/// `Float` are different kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Int,
    Float,
    Str,
    Bool,
    Null,
}

impl ScalarKind {
    /// Name used when rendering descriptors and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "string",
            Self::Bool => "bool",
            Self::Null => "null",
        }
    }

    /// Exact tag match against a raw wire value.
    pub fn matches(&self, value: &WireValue) -> bool {
        matches!(
            (self, value),
            (Self::Int, WireValue::Int(_))
                | (Self::Float, WireValue::Float(_))
                | (Self::Str, WireValue::Str(_))
                | (Self::Bool, WireValue::Bool(_))
                | (Self::Null, WireValue::Null)
        )
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared shape of a field value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// A scalar of exactly this kind.
    Scalar(ScalarKind),
    /// A named entity type: a registered concrete schema or a family.
    Entity(String),
    /// Ordered union of alternatives; the first satisfying member wins.
    Union(Vec<TypeDescriptor>),
    /// A list whose elements all satisfy the element descriptor.
    Array(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    /// Scalar descriptor.
    pub fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }

    /// Named entity descriptor (concrete type or family).
    pub fn entity(name: impl Into<String>) -> Self {
        Self::Entity(name.into())
    }

    /// Ordered union descriptor.
    pub fn union(members: Vec<TypeDescriptor>) -> Self {
        Self::Union(members)
    }

    /// Array descriptor.
    pub fn array(element: TypeDescriptor) -> Self {
        Self::Array(Box::new(element))
    }

    /// A `kind|null` union, the common shape of optional scalar fields.
    pub fn nullable(kind: ScalarKind) -> Self {
        Self::Union(vec![Self::Scalar(kind), Self::Scalar(ScalarKind::Null)])
    }

    /// An `entity|null` union, the common shape of optional nested fields.
    pub fn nullable_entity(name: impl Into<String>) -> Self {
        Self::Union(vec![Self::entity(name), Self::Scalar(ScalarKind::Null)])
    }
}

impl fmt::Display for TypeDescriptor {
    /// Renders `int`, `user`, `int|string`, `int[]`, `int[][]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.name()),
            Self::Entity(name) => f.write_str(name),
            Self::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{}", member)?;
                }
                Ok(())
            }
            Self::Array(element) => write!(f, "{}[]", element),
        }
    }
}

/// One declared field of an entity schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Wire key, lower_snake_case, equal to the constructor parameter name.
    pub name: String,
    /// Declared shape.
    pub descriptor: TypeDescriptor,
    /// Raw default used when the key is absent from the payload. `None`
    /// means the field is required.
    pub default: Option<WireValue>,
}

/// The ordered field table of one concrete entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl EntitySchema {
    /// Type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Get field spec by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get field index by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// Fluent builder for [`EntitySchema`].
///
/// Field order is declaration order and doubles as the canonical key order
/// on encode.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    /// Start a schema for the named concrete type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a required field with an explicit descriptor.
    pub fn field(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            descriptor,
            default: None,
        });
        self
    }

    /// Add a field with a declared default, used when the key is absent.
    pub fn field_with_default(
        mut self,
        name: impl Into<String>,
        descriptor: TypeDescriptor,
        default: impl Into<WireValue>,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            descriptor,
            default: Some(default.into()),
        });
        self
    }

    /// Add a required integer field.
    pub fn int_field(self, name: impl Into<String>) -> Self {
        self.field(name, TypeDescriptor::Scalar(ScalarKind::Int))
    }

    /// Add a required float field.
    pub fn float_field(self, name: impl Into<String>) -> Self {
        self.field(name, TypeDescriptor::Scalar(ScalarKind::Float))
    }

    /// Add a required string field.
    pub fn string_field(self, name: impl Into<String>) -> Self {
        self.field(name, TypeDescriptor::Scalar(ScalarKind::Str))
    }

    /// Add a required bool field.
    pub fn bool_field(self, name: impl Into<String>) -> Self {
        self.field(name, TypeDescriptor::Scalar(ScalarKind::Bool))
    }

    /// Add a required nested entity field.
    pub fn entity_field(self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.field(name, TypeDescriptor::entity(type_name))
    }

    /// Add a required array field.
    pub fn array_field(self, name: impl Into<String>, element: TypeDescriptor) -> Self {
        self.field(name, TypeDescriptor::array(element))
    }

    /// Add an optional field: `descriptor|null` with a `null` default.
    pub fn optional_field(self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.field_with_default(
            name,
            TypeDescriptor::Union(vec![descriptor, TypeDescriptor::Scalar(ScalarKind::Null)]),
            WireValue::Null,
        )
    }

    /// Build the schema.
    pub fn build(self) -> EntitySchema {
        EntitySchema {
            name: self.name,
            fields: self.fields,
        }
    }
}
