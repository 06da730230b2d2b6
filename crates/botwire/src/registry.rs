// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Variant registry: families, their ordered variants, and the schema table.
//!
//! Built once at process start through [`RegistryBuilder`] and frozen. The
//! frozen [`Registry`] is `Send + Sync` and safe to share across any number
//! of concurrent decode calls (build-then-freeze).
//!
//! Resolution commits to the first variant whose predicate accepts the
//! payload, in declaration order. The registry deliberately does not detect
//! multiple matches: precedence is declaration order, deterministically, on
//! every call.

use crate::descriptor::{EntitySchema, TypeDescriptor};
use crate::error::{ConfigError, DecodeError};
use crate::hydrate::Hydrator;
use crate::predicate::Predicate;
use crate::value::WireValue;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// One concrete candidate of a family.
#[derive(Debug, Clone)]
pub struct Variant {
    /// Name of the concrete type this candidate resolves to.
    pub concrete: String,
    /// Selection rule over the raw payload.
    pub predicate: Predicate,
}

/// An abstract entity identity with its ordered concrete candidates.
#[derive(Debug, Clone)]
pub struct Family {
    name: String,
    variants: Vec<Variant>,
}

impl Family {
    /// Family name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Candidates in declaration (= precedence) order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Whether the named concrete type belongs to this family.
    pub fn contains(&self, concrete: &str) -> bool {
        self.variants.iter().any(|v| v.concrete == concrete)
    }
}

/// Frozen registry of schemas and families.
#[derive(Debug)]
pub struct Registry {
    schemas: HashMap<String, Arc<EntitySchema>>,
    families: HashMap<String, Family>,
}

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Look up a concrete schema.
    pub fn schema(&self, name: &str) -> Option<&Arc<EntitySchema>> {
        self.schemas.get(name)
    }

    /// Look up a family.
    pub fn family(&self, name: &str) -> Option<&Family> {
        self.families.get(name)
    }

    /// Whether the name denotes a registered schema or family.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name) || self.families.contains_key(name)
    }

    /// Resolve which concrete variant of `family` the raw object is.
    ///
    /// Declaration-order scan, first accepting predicate wins. No caching,
    /// no multi-match detection.
    pub fn resolve_variant(&self, family: &str, object: &WireValue) -> Result<&str, DecodeError> {
        let fam = self
            .families
            .get(family)
            .ok_or_else(|| DecodeError::UnknownType {
                name: family.to_string(),
            })?;

        for variant in &fam.variants {
            if variant.predicate.evaluate(object) {
                debug!("family {}: resolved variant {}", family, variant.concrete);
                return Ok(&variant.concrete);
            }
        }

        debug!("family {}: no variant matched", family);
        Err(DecodeError::UnresolvedVariant {
            family: family.to_string(),
        })
    }
}

/// Builder for [`Registry`]. All configuration checks happen in [`build`],
/// so a frozen registry never reports configuration problems at resolve
/// time.
///
/// [`build`]: RegistryBuilder::build
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    schemas: Vec<EntitySchema>,
    families: Vec<(String, Vec<(String, Predicate)>)>,
}

impl RegistryBuilder {
    /// Fresh builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a concrete type's schema.
    pub fn schema(mut self, schema: EntitySchema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Register a family with its ordered `(concrete type, predicate)`
    /// candidates. Order is precedence.
    pub fn family<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        variants: Vec<(S, Predicate)>,
    ) -> Self {
        self.families.push((
            name.into(),
            variants
                .into_iter()
                .map(|(concrete, predicate)| (concrete.into(), predicate))
                .collect(),
        ));
        self
    }

    /// Validate the whole configuration and freeze it.
    pub fn build(self) -> Result<Registry, ConfigError> {
        let mut schemas: HashMap<String, Arc<EntitySchema>> = HashMap::new();
        for schema in self.schemas {
            let name = schema.name().to_string();
            if schemas.insert(name.clone(), Arc::new(schema)).is_some() {
                return Err(ConfigError::DuplicateType(name));
            }
        }

        let mut families: HashMap<String, Family> = HashMap::new();
        for (name, variants) in self.families {
            if families.contains_key(&name) {
                return Err(ConfigError::DuplicateFamily(name));
            }
            if schemas.contains_key(&name) {
                return Err(ConfigError::NameClash(name));
            }
            let mut checked = Vec::with_capacity(variants.len());
            for (concrete, predicate) in variants {
                if !schemas.contains_key(&concrete) {
                    return Err(ConfigError::UnknownVariantType {
                        family: name,
                        variant: concrete,
                    });
                }
                predicate
                    .validate()
                    .map_err(|reason| ConfigError::MalformedPredicate {
                        family: name.clone(),
                        variant: concrete.clone(),
                        reason,
                    })?;
                checked.push(Variant {
                    concrete,
                    predicate,
                });
            }
            families.insert(
                name.clone(),
                Family {
                    name,
                    variants: checked,
                },
            );
        }

        let registry = Registry { schemas, families };

        // Every entity reference inside a registered schema must resolve.
        for schema in registry.schemas.values() {
            for field in schema.fields() {
                check_references(&registry, schema.name(), &field.name, &field.descriptor)?;
            }
        }

        // Dry-run non-null defaults so a bad default is a build error, not a
        // surprise on the first payload that omits the key.
        let hydrator = Hydrator::new(&registry);
        for schema in registry.schemas.values() {
            for field in schema.fields() {
                let Some(default) = &field.default else {
                    continue;
                };
                if default.is_null() {
                    continue;
                }
                hydrator
                    .hydrate(&field.descriptor, default)
                    .map_err(|err| ConfigError::InvalidDefault {
                        schema: schema.name().to_string(),
                        field: field.name.clone(),
                        reason: err.to_string(),
                    })?;
            }
        }

        Ok(registry)
    }
}

fn check_references(
    registry: &Registry,
    schema: &str,
    field: &str,
    descriptor: &TypeDescriptor,
) -> Result<(), ConfigError> {
    match descriptor {
        TypeDescriptor::Scalar(_) => Ok(()),
        TypeDescriptor::Entity(target) => {
            if registry.contains(target) {
                Ok(())
            } else {
                Err(ConfigError::UnresolvableReference {
                    schema: schema.to_string(),
                    field: field.to_string(),
                    target: target.clone(),
                })
            }
        }
        TypeDescriptor::Union(members) => {
            for member in members {
                check_references(registry, schema, field, member)?;
            }
            Ok(())
        }
        TypeDescriptor::Array(element) => check_references(registry, schema, field, element),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ScalarKind, SchemaBuilder};
    use crate::predicate::CompareOp;

    fn solid_schema() -> EntitySchema {
        SchemaBuilder::new("fill_solid")
            .string_field("type")
            .int_field("color")
            .build()
    }

    fn gradient_schema() -> EntitySchema {
        SchemaBuilder::new("fill_gradient")
            .string_field("type")
            .int_field("top_color")
            .int_field("bottom_color")
            .build()
    }

    #[test]
    fn test_resolve_first_match_in_declaration_order() {
        let registry = Registry::builder()
            .schema(solid_schema())
            .schema(gradient_schema())
            .family(
                "fill",
                vec![
                    // Both predicates accept a payload with any "type" key
                    // present; the first-declared candidate must win, every
                    // time.
                    (
                        "fill_solid",
                        Predicate::field_compare("type", WireValue::Null, CompareOp::Neq),
                    ),
                    ("fill_gradient", Predicate::field_is("type", "gradient")),
                ],
            )
            .build()
            .expect("build");

        let payload = WireValue::object([("type", "gradient")]);
        for _ in 0..10 {
            assert_eq!(
                registry.resolve_variant("fill", &payload).expect("resolve"),
                "fill_solid"
            );
        }
    }

    #[test]
    fn test_unresolved_variant() {
        let registry = Registry::builder()
            .schema(solid_schema())
            .family(
                "fill",
                vec![("fill_solid", Predicate::field_is("type", "solid"))],
            )
            .build()
            .expect("build");

        let payload = WireValue::object([("type", "dotted")]);
        assert_eq!(
            registry.resolve_variant("fill", &payload),
            Err(DecodeError::UnresolvedVariant {
                family: "fill".into()
            })
        );
    }

    #[test]
    fn test_unknown_family() {
        let registry = Registry::builder().build().expect("build");
        assert_eq!(
            registry.resolve_variant("fill", &WireValue::Object(Vec::new())),
            Err(DecodeError::UnknownType {
                name: "fill".into()
            })
        );
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let err = Registry::builder()
            .schema(solid_schema())
            .schema(solid_schema())
            .build()
            .expect_err("duplicate");
        assert_eq!(err, ConfigError::DuplicateType("fill_solid".into()));
    }

    #[test]
    fn test_family_variant_must_be_registered() {
        let err = Registry::builder()
            .family(
                "fill",
                vec![("fill_solid", Predicate::field_is("type", "solid"))],
            )
            .build()
            .expect_err("unknown variant");
        assert_eq!(
            err,
            ConfigError::UnknownVariantType {
                family: "fill".into(),
                variant: "fill_solid".into()
            }
        );
    }

    #[test]
    fn test_malformed_predicate_rejected_at_build() {
        let err = Registry::builder()
            .schema(solid_schema())
            .family(
                "fill",
                vec![(
                    "fill_solid",
                    Predicate::field_compare("type", "solid", CompareOp::Lt),
                )],
            )
            .build()
            .expect_err("malformed predicate");
        assert!(matches!(err, ConfigError::MalformedPredicate { .. }));
    }

    #[test]
    fn test_dangling_reference_rejected_at_build() {
        let schema = SchemaBuilder::new("message")
            .entity_field("sender", "user")
            .build();
        let err = Registry::builder().schema(schema).build().expect_err("dangling");
        assert_eq!(
            err,
            ConfigError::UnresolvableReference {
                schema: "message".into(),
                field: "sender".into(),
                target: "user".into()
            }
        );
    }

    #[test]
    fn test_bad_default_rejected_at_build() {
        let schema = SchemaBuilder::new("widget")
            .field_with_default(
                "count",
                TypeDescriptor::scalar(ScalarKind::Int),
                WireValue::Str("three".into()),
            )
            .build();
        let err = Registry::builder().schema(schema).build().expect_err("bad default");
        assert!(matches!(err, ConfigError::InvalidDefault { .. }));
    }

    #[test]
    fn test_name_clash_rejected() {
        let err = Registry::builder()
            .schema(solid_schema())
            .family(
                "fill_solid",
                vec![("fill_solid", Predicate::field_is("type", "solid"))],
            )
            .build()
            .expect_err("clash");
        assert_eq!(err, ConfigError::NameClash("fill_solid".into()));
    }
}
