// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # botwire - polymorphic wire-object resolution and validation
//!
//! Client-side data modeling for JSON messaging APIs: a registry of entity
//! schemas and abstract families, a predicate-driven variant resolver, a
//! recursive hydrator with exact (coercion-free) type checking and
//! path-qualified errors, and the inverse serializer.
//!
//! ## Quick Start
//!
//! ```rust
//! use botwire::{encode, Hydrator, Predicate, Registry, SchemaBuilder, WireValue};
//!
//! // Register schemas and one family, then freeze the registry.
//! let registry = Registry::builder()
//!     .schema(
//!         SchemaBuilder::new("reaction_type_emoji")
//!             .string_field("type")
//!             .string_field("emoji")
//!             .build(),
//!     )
//!     .schema(
//!         SchemaBuilder::new("reaction_type_paid")
//!             .string_field("type")
//!             .build(),
//!     )
//!     .family(
//!         "reaction_type",
//!         vec![
//!             ("reaction_type_emoji", Predicate::field_is("type", "emoji")),
//!             ("reaction_type_paid", Predicate::field_is("type", "paid")),
//!         ],
//!     )
//!     .build()?;
//!
//! // Decode an untyped payload against the abstract family.
//! let payload = botwire::json::parse(r#"{"type":"emoji","emoji":"U"}"#)?;
//! let reaction = Hydrator::new(&registry).hydrate_entity("reaction_type", &payload)?;
//! assert_eq!(reaction.type_name(), "reaction_type_emoji");
//! assert_eq!(reaction.get::<String>("emoji")?, "U");
//!
//! // And back to the wire.
//! let wire = encode(&reaction);
//! assert_eq!(wire.get("type"), Some(&WireValue::Str("emoji".into())));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! raw payload --> Hydrator --> resolve_variant (Registry, Predicates)
//!                    |               |
//!                    v               v
//!              typed Entity <-- EntitySchema (TypeDescriptors)
//!                    |
//!                    v
//!              array validator (unconditional post-construction pass)
//!
//! typed Entity --> encode --> wire object (canonical key order)
//! ```
//!
//! Decoding flows one direction (payload to entity), encoding the reverse.
//! The only shared state is the [`Registry`], built once and frozen; any
//! number of decode calls may then run concurrently against it.

/// Standard schema catalog: representative entity families.
pub mod catalog;
/// Type descriptors, entity schemas and the schema builder.
pub mod descriptor;
/// Serializer from typed entities back to wire values.
pub mod encode;
/// Hydrated entity instances and typed field access.
pub mod entity;
/// Error taxonomy (build-time configuration vs decode-time).
pub mod error;
/// Resolver/hydrator and the array content validator.
pub mod hydrate;
/// JSON text and `serde_json::Value` boundary.
pub mod json;
/// Declarative predicates over raw payload fields.
pub mod predicate;
/// Variant registry and its builder.
pub mod registry;
/// The generic wire value model.
pub mod value;

pub use descriptor::{EntitySchema, FieldSpec, ScalarKind, SchemaBuilder, TypeDescriptor};
pub use encode::encode;
pub use entity::{Entity, FieldError, FieldValue, FromFieldValue, IntoFieldValue};
pub use error::{ConfigError, DecodeError};
pub use hydrate::{validate::validate_arrays, FieldPath, Hydrator, DEFAULT_MAX_DEPTH};
pub use predicate::{CompareOp, Predicate};
pub use registry::{Family, Registry, RegistryBuilder, Variant};
pub use value::WireValue;
