// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Workflow tests for the resolver/hydrator.

use super::*;
use crate::descriptor::{ScalarKind, SchemaBuilder, TypeDescriptor};
use crate::entity::Entity;
use crate::error::DecodeError;
use crate::predicate::{CompareOp, Predicate};
use crate::registry::Registry;
use crate::value::WireValue;

fn member_registry() -> Registry {
    Registry::builder()
        .schema(
            SchemaBuilder::new("user")
                .int_field("id")
                .bool_field("is_bot")
                .string_field("first_name")
                .optional_field("username", TypeDescriptor::scalar(ScalarKind::Str))
                .build(),
        )
        .schema(
            SchemaBuilder::new("chat_member_owner")
                .string_field("status")
                .entity_field("user", "user")
                .bool_field("is_anonymous")
                .optional_field("custom_title", TypeDescriptor::scalar(ScalarKind::Str))
                .build(),
        )
        .schema(
            SchemaBuilder::new("chat_member_banned")
                .string_field("status")
                .entity_field("user", "user")
                .int_field("until_date")
                .build(),
        )
        .family(
            "chat_member",
            vec![
                ("chat_member_owner", Predicate::field_is("status", "creator")),
                ("chat_member_banned", Predicate::field_is("status", "kicked")),
            ],
        )
        .build()
        .expect("registry")
}

fn owner_payload() -> WireValue {
    WireValue::object([
        ("status", WireValue::from("creator")),
        (
            "user",
            WireValue::object([
                ("id", WireValue::Int(7)),
                ("is_bot", WireValue::Bool(false)),
                ("first_name", WireValue::from("Ada")),
            ]),
        ),
        ("is_anonymous", WireValue::Bool(true)),
    ])
}

#[test]
fn test_full_workflow() {
    let registry = member_registry();
    let hydrator = Hydrator::new(&registry);

    let member = hydrator
        .hydrate_entity("chat_member", &owner_payload())
        .expect("hydrate");
    assert_eq!(member.type_name(), "chat_member_owner");
    assert_eq!(member.get::<String>("status").expect("status"), "creator");
    assert_eq!(member.get::<bool>("is_anonymous").expect("anon"), true);
    // Absent optional falls back to its null default.
    assert!(member.field("custom_title").expect("field").is_null());

    let user = member.get::<Entity>("user").expect("user");
    assert_eq!(user.type_name(), "user");
    assert_eq!(user.get::<i64>("id").expect("id"), 7);
    assert_eq!(user.get::<String>("first_name").expect("name"), "Ada");
}

#[test]
fn test_concrete_target_skips_resolution() {
    let registry = member_registry();
    let hydrator = Hydrator::new(&registry);

    let member = hydrator
        .hydrate_entity("chat_member_owner", &owner_payload())
        .expect("hydrate");
    assert_eq!(member.type_name(), "chat_member_owner");
}

#[test]
fn test_unresolved_variant_propagates() {
    let registry = member_registry();
    let hydrator = Hydrator::new(&registry);

    let payload = WireValue::object([("status", WireValue::from("left"))]);
    assert_eq!(
        hydrator.hydrate_entity("chat_member", &payload),
        Err(DecodeError::UnresolvedVariant {
            family: "chat_member".into()
        })
    );
}

#[test]
fn test_missing_required_field() {
    let registry = member_registry();
    let hydrator = Hydrator::new(&registry);

    let payload = WireValue::object([
        ("status", WireValue::from("creator")),
        ("is_anonymous", WireValue::Bool(false)),
    ]);
    assert_eq!(
        hydrator.hydrate_entity("chat_member", &payload),
        Err(DecodeError::MissingRequiredField {
            entity: "chat_member_owner".into(),
            field: "user".into()
        })
    );
}

#[test]
fn test_nested_mismatch_has_qualified_path() {
    let registry = member_registry();
    let hydrator = Hydrator::new(&registry);

    let mut payload = owner_payload();
    if let WireValue::Object(ref mut entries) = payload {
        entries[1].1 = WireValue::object([
            ("id", WireValue::from("seven")),
            ("is_bot", WireValue::Bool(false)),
            ("first_name", WireValue::from("Ada")),
        ]);
    }

    assert_eq!(
        hydrator.hydrate_entity("chat_member", &payload),
        Err(DecodeError::TypeMismatch {
            path: "user.id".into(),
            expected: "int".into(),
            actual: "string".into(),
        })
    );
}

#[test]
fn test_entity_target_requires_object() {
    let registry = member_registry();
    let hydrator = Hydrator::new(&registry);

    let err = hydrator
        .hydrate_entity("user", &WireValue::List(Vec::new()))
        .expect_err("not an object");
    assert_eq!(
        err,
        DecodeError::TypeMismatch {
            path: "<root>".into(),
            expected: "user".into(),
            actual: "list".into(),
        }
    );
}

#[test]
fn test_array_fail_fast_with_index() {
    let registry = Registry::builder()
        .schema(
            SchemaBuilder::new("palette")
                .array_field("colors", TypeDescriptor::scalar(ScalarKind::Int))
                .build(),
        )
        .build()
        .expect("registry");
    let hydrator = Hydrator::new(&registry);

    let payload = WireValue::object([(
        "colors",
        WireValue::List(vec![
            WireValue::Int(1),
            WireValue::Int(2),
            WireValue::Str("3".into()),
        ]),
    )]);

    assert_eq!(
        hydrator.hydrate_entity("palette", &payload),
        Err(DecodeError::TypeMismatch {
            path: "colors[2]".into(),
            expected: "int".into(),
            actual: "string".into(),
        })
    );
}

#[test]
fn test_two_dimensional_array_path() {
    let registry = Registry::builder()
        .schema(
            SchemaBuilder::new("board")
                .array_field(
                    "grid",
                    TypeDescriptor::array(TypeDescriptor::scalar(ScalarKind::Int)),
                )
                .build(),
        )
        .build()
        .expect("registry");
    let hydrator = Hydrator::new(&registry);

    let payload = WireValue::object([(
        "grid",
        WireValue::List(vec![
            WireValue::List(vec![WireValue::Int(1), WireValue::Int(2)]),
            WireValue::List(vec![WireValue::Int(3), WireValue::Str("x".into())]),
        ]),
    )]);

    assert_eq!(
        hydrator.hydrate_entity("board", &payload),
        Err(DecodeError::TypeMismatch {
            path: "grid[1][1]".into(),
            expected: "int".into(),
            actual: "string".into(),
        })
    );
}

#[test]
fn test_union_first_satisfying_member_wins() {
    let registry = Registry::builder()
        .schema(
            SchemaBuilder::new("message_id")
                .field(
                    "id",
                    TypeDescriptor::union(vec![
                        TypeDescriptor::scalar(ScalarKind::Int),
                        TypeDescriptor::scalar(ScalarKind::Str),
                    ]),
                )
                .build(),
        )
        .build()
        .expect("registry");
    let hydrator = Hydrator::new(&registry);

    let by_int = hydrator
        .hydrate_entity("message_id", &WireValue::object([("id", WireValue::Int(9))]))
        .expect("int id");
    assert_eq!(by_int.get::<i64>("id").expect("id"), 9);

    let by_str = hydrator
        .hydrate_entity(
            "message_id",
            &WireValue::object([("id", WireValue::from("abc"))]),
        )
        .expect("str id");
    assert_eq!(by_str.get::<String>("id").expect("id"), "abc");

    let err = hydrator
        .hydrate_entity(
            "message_id",
            &WireValue::object([("id", WireValue::Bool(true))]),
        )
        .expect_err("no member");
    assert_eq!(
        err,
        DecodeError::TypeMismatch {
            path: "id".into(),
            expected: "int|string".into(),
            actual: "bool".into(),
        }
    );
}

#[test]
fn test_non_null_default_is_hydrated() {
    let registry = Registry::builder()
        .schema(
            SchemaBuilder::new("poll_option")
                .string_field("text")
                .field_with_default(
                    "voter_count",
                    TypeDescriptor::scalar(ScalarKind::Int),
                    WireValue::Int(0),
                )
                .build(),
        )
        .build()
        .expect("registry");
    let hydrator = Hydrator::new(&registry);

    let option = hydrator
        .hydrate_entity(
            "poll_option",
            &WireValue::object([("text", WireValue::from("yes"))]),
        )
        .expect("hydrate");
    assert_eq!(option.get::<i64>("voter_count").expect("count"), 0);
}

#[test]
fn test_depth_guard() {
    let registry = Registry::builder()
        .schema(
            SchemaBuilder::new("deep")
                .field(
                    "data",
                    TypeDescriptor::array(TypeDescriptor::array(TypeDescriptor::array(
                        TypeDescriptor::array(TypeDescriptor::scalar(ScalarKind::Int)),
                    ))),
                )
                .build(),
        )
        .build()
        .expect("registry");
    let hydrator = Hydrator::new(&registry).with_max_depth(3);

    let payload = WireValue::object([(
        "data",
        WireValue::List(vec![WireValue::List(vec![WireValue::List(vec![
            WireValue::List(vec![WireValue::Int(1)]),
        ])])]),
    )]);

    let err = hydrator.hydrate_entity("deep", &payload).expect_err("deep");
    assert!(matches!(err, DecodeError::DepthExceeded { .. }));

    // The same payload is fine under the default bound.
    assert!(Hydrator::new(&registry)
        .hydrate_entity("deep", &payload)
        .is_ok());
}

#[test]
fn test_conjunction_family_with_missing_field() {
    // One candidate whose predicate requires two fields to be non-null; a
    // payload missing one of them must not resolve.
    let registry = Registry::builder()
        .schema(
            SchemaBuilder::new("contact")
                .string_field("phone_number")
                .string_field("first_name")
                .build(),
        )
        .schema(SchemaBuilder::new("location").float_field("latitude").build())
        .family(
            "reply_content",
            vec![
                (
                    "contact",
                    Predicate::all(vec![
                        Predicate::field_compare("phone_number", WireValue::Null, CompareOp::Neq),
                        Predicate::field_compare("first_name", WireValue::Null, CompareOp::Neq),
                    ]),
                ),
                (
                    "location",
                    Predicate::field_compare("latitude", WireValue::Null, CompareOp::Neq),
                ),
            ],
        )
        .build()
        .expect("registry");
    let hydrator = Hydrator::new(&registry);

    let payload = WireValue::object([("phone_number", WireValue::from("+155501"))]);
    assert_eq!(
        hydrator.hydrate_entity("reply_content", &payload),
        Err(DecodeError::UnresolvedVariant {
            family: "reply_content".into()
        })
    );
}
