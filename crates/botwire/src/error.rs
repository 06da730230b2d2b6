// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy for registry construction and payload decoding.
//!
//! Errors split into two tiers: [`ConfigError`] covers everything that can be
//! detected while a registry is being built (malformed predicates, dangling
//! type references), [`DecodeError`] covers per-payload failures. A frozen
//! registry never produces a `ConfigError` at resolve time.

use thiserror::Error;

/// Registry construction errors. Surfaced by `RegistryBuilder::build`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A schema name was registered twice.
    #[error("duplicate type registration: {0}")]
    DuplicateType(String),

    /// A family name was registered twice.
    #[error("duplicate family registration: {0}")]
    DuplicateFamily(String),

    /// A name denotes both a concrete schema and a family.
    #[error("{0} is registered as both a type and a family")]
    NameClash(String),

    /// A family variant names a type with no registered schema.
    #[error("family {family}: variant {variant} is not a registered type")]
    UnknownVariantType { family: String, variant: String },

    /// A field descriptor references a type the registry does not know.
    #[error("type {schema}: field {field} references unknown type {target}")]
    UnresolvableReference {
        schema: String,
        field: String,
        target: String,
    },

    /// A predicate tree failed structural validation.
    #[error("family {family}, variant {variant}: {reason}")]
    MalformedPredicate {
        family: String,
        variant: String,
        reason: String,
    },

    /// A declared field default does not hydrate against its own descriptor.
    #[error("type {schema}: default for field {field} is invalid: {reason}")]
    InvalidDefault {
        schema: String,
        field: String,
        reason: String,
    },
}

/// Payload decoding errors. Fail-fast: the first error aborts the whole
/// `hydrate` call and no partially built instance is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// No variant predicate of the family accepted the payload.
    #[error("no variant of family {family} matched the payload")]
    UnresolvedVariant { family: String },

    /// A required key was absent and the field declares no default.
    #[error("{entity} is missing required field {field}")]
    MissingRequiredField { entity: String, field: String },

    /// A value did not match the declared shape. `path` is fully qualified,
    /// including array indices (`colors[2]`, `grid[1][1]`).
    #[error("type mismatch at {path}: expected {expected}, got {actual}")]
    TypeMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// The nesting guard tripped before the call stack could.
    #[error("nesting depth limit exceeded at {path}")]
    DepthExceeded { path: String },

    /// A target descriptor names a type the registry does not know. Only
    /// reachable with hand-built descriptors; the builder rejects dangling
    /// references inside registered schemas.
    #[error("unknown type {name}")]
    UnknownType { name: String },
}
