// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Hydrated entity instances and typed field access.
//!
//! An [`Entity`] pairs a shared schema with one hydrated value per declared
//! field, stored in declaration order. Instances are produced by the
//! hydrator; they can also be assembled by hand through [`Entity::new`] and
//! [`Entity::set`] and then checked with the array validator.
//!
//! Setters do not re-validate: field contents are validated at decode time
//! only. Mutating an entity after hydration is a deliberate relaxation.

use crate::descriptor::EntitySchema;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Field access errors for typed getters and setters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// The schema declares no field with this name.
    #[error("no such field: {0}")]
    NoSuchField(String),

    /// The stored value has a different shape than requested.
    #[error("wrong field type: expected {expected}, got {actual}")]
    WrongType { expected: String, actual: String },
}

/// A hydrated field value.
///
/// Unlike [`WireValue`](crate::WireValue), nested objects have already been
/// resolved into typed [`Entity`] instances, so there is no `Object` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<FieldValue>),
    Entity(Box<Entity>),
}

impl FieldValue {
    /// Short tag name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Entity(_) => "entity",
        }
    }

    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as list elements.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get as a nested entity.
    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Self::Entity(entity) => Some(entity),
            _ => None,
        }
    }
}

/// A concrete-typed, field-named instance built from a wire payload.
#[derive(Debug, Clone)]
pub struct Entity {
    schema: Arc<EntitySchema>,
    values: Vec<FieldValue>,
}

impl Entity {
    /// Create an instance with every field unset (null).
    ///
    /// This constructor does not go through the hydrator; run the array
    /// validator over the result if the declared invariants matter.
    pub fn new(schema: &Arc<EntitySchema>) -> Self {
        Self {
            schema: schema.clone(),
            values: vec![FieldValue::Null; schema.fields().len()],
        }
    }

    /// Internal constructor for the hydrator: `values` is parallel to the
    /// schema's declared field order.
    pub(crate) fn from_values(schema: Arc<EntitySchema>, values: Vec<FieldValue>) -> Self {
        debug_assert_eq!(schema.fields().len(), values.len());
        Self { schema, values }
    }

    /// Concrete type name.
    pub fn type_name(&self) -> &str {
        self.schema.name()
    }

    /// The schema this instance was built against.
    pub fn schema(&self) -> &Arc<EntitySchema> {
        &self.schema
    }

    /// Field values in declaration order, parallel to `schema().fields()`.
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Get a field value by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.schema
            .field_index(name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a field converted to a concrete Rust type.
    pub fn get<T: FromFieldValue>(&self, name: &str) -> Result<T, FieldError> {
        let value = self
            .field(name)
            .ok_or_else(|| FieldError::NoSuchField(name.to_string()))?;
        T::from_field(value)
    }

    /// Set a field value by name. Does not re-validate array contents.
    pub fn set(&mut self, name: &str, value: impl IntoFieldValue) -> Result<(), FieldError> {
        let idx = self
            .schema
            .field_index(name)
            .ok_or_else(|| FieldError::NoSuchField(name.to_string()))?;
        self.values[idx] = value.into_field();
        Ok(())
    }

    /// Iterate `(field name, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.schema
            .fields()
            .iter()
            .map(|spec| spec.name.as_str())
            .zip(self.values.iter())
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name() == other.schema.name() && self.values == other.values
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())?;
        write!(f, "{{")?;
        for (i, (name, value)) in self.fields().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:?}", name, value)?;
        }
        write!(f, "}}")
    }
}

/// Conversion from a stored field value.
pub trait FromFieldValue: Sized {
    fn from_field(value: &FieldValue) -> Result<Self, FieldError>;
}

/// Conversion into a stored field value.
pub trait IntoFieldValue {
    fn into_field(self) -> FieldValue;
}

macro_rules! impl_from_field {
    ($ty:ty, $variant:ident, $name:expr) => {
        impl FromFieldValue for $ty {
            fn from_field(value: &FieldValue) -> Result<Self, FieldError> {
                match value {
                    FieldValue::$variant(v) => Ok(v.clone()),
                    other => Err(FieldError::WrongType {
                        expected: $name.to_string(),
                        actual: other.kind_name().to_string(),
                    }),
                }
            }
        }
    };
}

impl_from_field!(bool, Bool, "bool");
impl_from_field!(i64, Int, "int");
impl_from_field!(f64, Float, "float");
impl_from_field!(String, Str, "string");

impl FromFieldValue for Entity {
    fn from_field(value: &FieldValue) -> Result<Self, FieldError> {
        match value {
            FieldValue::Entity(entity) => Ok((**entity).clone()),
            other => Err(FieldError::WrongType {
                expected: "entity".to_string(),
                actual: other.kind_name().to_string(),
            }),
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Vec<T> {
    fn from_field(value: &FieldValue) -> Result<Self, FieldError> {
        match value {
            FieldValue::List(items) => items.iter().map(T::from_field).collect(),
            other => Err(FieldError::WrongType {
                expected: "list".to_string(),
                actual: other.kind_name().to_string(),
            }),
        }
    }
}

macro_rules! impl_into_field {
    ($ty:ty, $variant:ident) => {
        impl IntoFieldValue for $ty {
            fn into_field(self) -> FieldValue {
                FieldValue::$variant(self)
            }
        }
    };
}

impl_into_field!(bool, Bool);
impl_into_field!(i64, Int);
impl_into_field!(f64, Float);
impl_into_field!(String, Str);

impl IntoFieldValue for i32 {
    fn into_field(self) -> FieldValue {
        FieldValue::Int(i64::from(self))
    }
}

impl IntoFieldValue for &str {
    fn into_field(self) -> FieldValue {
        FieldValue::Str(self.to_string())
    }
}

impl IntoFieldValue for Entity {
    fn into_field(self) -> FieldValue {
        FieldValue::Entity(Box::new(self))
    }
}

impl IntoFieldValue for FieldValue {
    fn into_field(self) -> FieldValue {
        self
    }
}

impl<T: IntoFieldValue> IntoFieldValue for Vec<T> {
    fn into_field(self) -> FieldValue {
        FieldValue::List(self.into_iter().map(IntoFieldValue::into_field).collect())
    }
}

impl<T: IntoFieldValue> IntoFieldValue for Option<T> {
    fn into_field(self) -> FieldValue {
        match self {
            Some(inner) => inner.into_field(),
            None => FieldValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ScalarKind, SchemaBuilder, TypeDescriptor};

    fn user_schema() -> Arc<EntitySchema> {
        Arc::new(
            SchemaBuilder::new("user")
                .int_field("id")
                .bool_field("is_bot")
                .string_field("first_name")
                .optional_field("username", TypeDescriptor::scalar(ScalarKind::Str))
                .build(),
        )
    }

    #[test]
    fn test_typed_get_set() {
        let schema = user_schema();
        let mut user = Entity::new(&schema);
        user.set("id", 42i64).expect("set id");
        user.set("is_bot", false).expect("set is_bot");
        user.set("first_name", "Ada").expect("set first_name");

        assert_eq!(user.get::<i64>("id").expect("get id"), 42);
        assert_eq!(user.get::<bool>("is_bot").expect("get is_bot"), false);
        assert_eq!(user.get::<String>("first_name").expect("get name"), "Ada");
        // Untouched field stays null.
        assert!(user.field("username").expect("field").is_null());
    }

    #[test]
    fn test_unknown_field_and_wrong_type() {
        let schema = user_schema();
        let mut user = Entity::new(&schema);
        user.set("id", 42i64).expect("set id");

        assert_eq!(
            user.set("nickname", "x"),
            Err(FieldError::NoSuchField("nickname".into()))
        );
        assert_eq!(
            user.get::<String>("id"),
            Err(FieldError::WrongType {
                expected: "string".into(),
                actual: "int".into()
            })
        );
    }

    #[test]
    fn test_field_order_follows_schema() {
        let schema = user_schema();
        let user = Entity::new(&schema);
        let names: Vec<_> = user.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["id", "is_bot", "first_name", "username"]);
    }

    #[test]
    fn test_list_conversions() {
        let schema = Arc::new(
            SchemaBuilder::new("palette")
                .array_field("colors", TypeDescriptor::scalar(ScalarKind::Int))
                .build(),
        );
        let mut palette = Entity::new(&schema);
        palette.set("colors", vec![1i64, 2, 3]).expect("set");
        assert_eq!(
            palette.get::<Vec<i64>>("colors").expect("get"),
            vec![1, 2, 3]
        );
    }
}
