// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Standard schema catalog.
//!
//! A representative subset of the messaging API's entity families, built
//! with the same registration calls the full ~300-type surface uses. Each
//! family shows a different discriminator convention: `chat_member` keys off
//! `status`, the others off `type`; `callback_game` is the classic
//! explicitly-empty-object marker.

use crate::descriptor::{ScalarKind, SchemaBuilder, TypeDescriptor};
use crate::error::ConfigError;
use crate::predicate::Predicate;
use crate::registry::{Registry, RegistryBuilder};

/// Build the standard registry: schemas plus families, frozen.
pub fn standard_registry() -> Result<Registry, ConfigError> {
    let builder = Registry::builder()
        .schema(
            SchemaBuilder::new("user")
                .int_field("id")
                .bool_field("is_bot")
                .string_field("first_name")
                .optional_field("last_name", TypeDescriptor::scalar(ScalarKind::Str))
                .optional_field("username", TypeDescriptor::scalar(ScalarKind::Str))
                .optional_field("language_code", TypeDescriptor::scalar(ScalarKind::Str))
                .build(),
        )
        .schema(
            SchemaBuilder::new("chat")
                .int_field("id")
                .string_field("type")
                .optional_field("title", TypeDescriptor::scalar(ScalarKind::Str))
                .optional_field("username", TypeDescriptor::scalar(ScalarKind::Str))
                .build(),
        )
        .schema(SchemaBuilder::new("callback_game").build());

    let builder = chat_member_schemas(builder);
    let builder = background_fill_schemas(builder);
    let builder = reaction_type_schemas(builder);
    let builder = message_origin_schemas(builder);

    builder
        .family(
            "chat_member",
            vec![
                ("chat_member_owner", Predicate::field_is("status", "creator")),
                (
                    "chat_member_administrator",
                    Predicate::field_is("status", "administrator"),
                ),
                ("chat_member_member", Predicate::field_is("status", "member")),
                (
                    "chat_member_restricted",
                    Predicate::field_is("status", "restricted"),
                ),
                ("chat_member_left", Predicate::field_is("status", "left")),
                ("chat_member_banned", Predicate::field_is("status", "kicked")),
            ],
        )
        .family(
            "background_fill",
            vec![
                ("background_fill_solid", Predicate::field_is("type", "solid")),
                (
                    "background_fill_gradient",
                    Predicate::field_is("type", "gradient"),
                ),
                (
                    "background_fill_freeform_gradient",
                    Predicate::field_is("type", "freeform_gradient"),
                ),
            ],
        )
        .family(
            "reaction_type",
            vec![
                ("reaction_type_emoji", Predicate::field_is("type", "emoji")),
                (
                    "reaction_type_custom_emoji",
                    Predicate::field_is("type", "custom_emoji"),
                ),
                ("reaction_type_paid", Predicate::field_is("type", "paid")),
            ],
        )
        .family(
            "message_origin",
            vec![
                ("message_origin_user", Predicate::field_is("type", "user")),
                (
                    "message_origin_hidden_user",
                    Predicate::field_is("type", "hidden_user"),
                ),
                ("message_origin_chat", Predicate::field_is("type", "chat")),
                (
                    "message_origin_channel",
                    Predicate::field_is("type", "channel"),
                ),
            ],
        )
        .build()
}

fn chat_member_schemas(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .schema(
            SchemaBuilder::new("chat_member_owner")
                .string_field("status")
                .entity_field("user", "user")
                .bool_field("is_anonymous")
                .optional_field("custom_title", TypeDescriptor::scalar(ScalarKind::Str))
                .build(),
        )
        .schema(
            SchemaBuilder::new("chat_member_administrator")
                .string_field("status")
                .entity_field("user", "user")
                .bool_field("can_be_edited")
                .bool_field("is_anonymous")
                .bool_field("can_manage_chat")
                .optional_field("custom_title", TypeDescriptor::scalar(ScalarKind::Str))
                .build(),
        )
        .schema(
            SchemaBuilder::new("chat_member_member")
                .string_field("status")
                .entity_field("user", "user")
                .optional_field("until_date", TypeDescriptor::scalar(ScalarKind::Int))
                .build(),
        )
        .schema(
            SchemaBuilder::new("chat_member_restricted")
                .string_field("status")
                .entity_field("user", "user")
                .bool_field("is_member")
                .bool_field("can_send_messages")
                .int_field("until_date")
                .build(),
        )
        .schema(
            SchemaBuilder::new("chat_member_left")
                .string_field("status")
                .entity_field("user", "user")
                .build(),
        )
        .schema(
            SchemaBuilder::new("chat_member_banned")
                .string_field("status")
                .entity_field("user", "user")
                .int_field("until_date")
                .build(),
        )
}

fn background_fill_schemas(
    builder: RegistryBuilder,
) -> RegistryBuilder {
    builder
        .schema(
            SchemaBuilder::new("background_fill_solid")
                .string_field("type")
                .int_field("color")
                .build(),
        )
        .schema(
            SchemaBuilder::new("background_fill_gradient")
                .string_field("type")
                .int_field("top_color")
                .int_field("bottom_color")
                .int_field("rotation_angle")
                .build(),
        )
        .schema(
            SchemaBuilder::new("background_fill_freeform_gradient")
                .string_field("type")
                .array_field("colors", TypeDescriptor::scalar(ScalarKind::Int))
                .build(),
        )
}

fn reaction_type_schemas(
    builder: RegistryBuilder,
) -> RegistryBuilder {
    builder
        .schema(
            SchemaBuilder::new("reaction_type_emoji")
                .string_field("type")
                .string_field("emoji")
                .build(),
        )
        .schema(
            SchemaBuilder::new("reaction_type_custom_emoji")
                .string_field("type")
                .string_field("custom_emoji_id")
                .build(),
        )
        .schema(
            SchemaBuilder::new("reaction_type_paid")
                .string_field("type")
                .build(),
        )
}

fn message_origin_schemas(
    builder: RegistryBuilder,
) -> RegistryBuilder {
    builder
        .schema(
            SchemaBuilder::new("message_origin_user")
                .string_field("type")
                .int_field("date")
                .entity_field("sender_user", "user")
                .build(),
        )
        .schema(
            SchemaBuilder::new("message_origin_hidden_user")
                .string_field("type")
                .int_field("date")
                .string_field("sender_user_name")
                .build(),
        )
        .schema(
            SchemaBuilder::new("message_origin_chat")
                .string_field("type")
                .int_field("date")
                .entity_field("sender_chat", "chat")
                .optional_field("author_signature", TypeDescriptor::scalar(ScalarKind::Str))
                .build(),
        )
        .schema(
            SchemaBuilder::new("message_origin_channel")
                .string_field("type")
                .int_field("date")
                .entity_field("chat", "chat")
                .int_field("message_id")
                .optional_field("author_signature", TypeDescriptor::scalar(ScalarKind::Str))
                .build(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;
    use crate::hydrate::Hydrator;
    use crate::json;

    #[test]
    fn test_standard_registry_builds() {
        let registry = standard_registry().expect("catalog");
        assert!(registry.schema("user").is_some());
        assert!(registry.family("chat_member").is_some());
        assert_eq!(
            registry.family("chat_member").map(|f| f.variants().len()),
            Some(6)
        );
    }

    #[test]
    fn test_chat_member_resolution_by_status() {
        let registry = standard_registry().expect("catalog");
        let payload = json::parse(
            r#"{"status":"creator","user":{"id":1,"is_bot":false,"first_name":"Ada"},"is_anonymous":true}"#,
        )
        .expect("parse");

        let member = Hydrator::new(&registry)
            .hydrate_entity("chat_member", &payload)
            .expect("hydrate");
        assert_eq!(member.type_name(), "chat_member_owner");
    }

    #[test]
    fn test_gradient_fill_round_trip_key_order() {
        let registry = standard_registry().expect("catalog");
        let text = r#"{"type":"gradient","top_color":1,"bottom_color":2,"rotation_angle":45}"#;
        let payload = json::parse(text).expect("parse");

        let fill = Hydrator::new(&registry)
            .hydrate_entity("background_fill", &payload)
            .expect("hydrate");
        assert_eq!(fill.type_name(), "background_fill_gradient");
        assert_eq!(json::render(&encode(&fill)), text);
    }

    #[test]
    fn test_freeform_gradient_colors_are_checked() {
        let registry = standard_registry().expect("catalog");
        let payload =
            json::parse(r#"{"type":"freeform_gradient","colors":[1,2,"3"]}"#).expect("parse");

        let err = Hydrator::new(&registry)
            .hydrate_entity("background_fill", &payload)
            .expect_err("bad colors");
        assert_eq!(
            err,
            crate::DecodeError::TypeMismatch {
                path: "colors[2]".into(),
                expected: "int".into(),
                actual: "string".into(),
            }
        );
    }

    #[test]
    fn test_callback_game_marker_round_trips_as_object() {
        let registry = standard_registry().expect("catalog");
        let payload = json::parse("{}").expect("parse");

        let marker = Hydrator::new(&registry)
            .hydrate_entity("callback_game", &payload)
            .expect("hydrate");
        let wire = encode(&marker);
        assert_eq!(json::render(&wire), "{}");
        assert_ne!(wire, crate::WireValue::List(Vec::new()));
    }
}
