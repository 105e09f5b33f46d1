//! Unit tests for payload classification.

use rstest::rstest;
use serde_json::{Value, json};

use super::{
    autocomplete_payload, command_payload, component_payload, modal_payload, ping_payload,
};
use crate::command::domain::CommandType;
use crate::interaction::domain::{ClassifiedInteraction, InteractionType};

#[rstest]
#[case::ping(ping_payload(), InteractionType::Ping)]
#[case::command(command_payload("hello"), InteractionType::ApplicationCommand)]
#[case::component(component_payload(), InteractionType::MessageComponent)]
#[case::autocomplete(autocomplete_payload(), InteractionType::ApplicationCommandAutocomplete)]
#[case::modal(modal_payload(), InteractionType::ModalSubmit)]
fn known_types_are_narrowed(#[case] payload: Value, #[case] expected: InteractionType) {
    let classified = ClassifiedInteraction::classify(&payload);

    assert_eq!(classified.kind(), Some(expected));
}

#[rstest]
#[case::missing_type(json!({"id": "1", "application_id": "1", "token": "t", "version": 1}))]
#[case::zero_type(json!({"type": 0, "id": "1", "application_id": "1", "token": "t", "version": 1}))]
#[case::unknown_type(json!({"type": 6, "id": "1", "application_id": "1", "token": "t", "version": 1}))]
#[case::oversized_type(json!({"type": 257, "id": "1", "application_id": "1", "token": "t", "version": 1}))]
#[case::string_type(json!({"type": "1", "id": "1", "application_id": "1", "token": "t", "version": 1}))]
#[case::negative_type(json!({"type": -1}))]
#[case::null(Value::Null)]
#[case::array(json!([1, 2, 3]))]
#[case::number(json!(1))]
#[case::empty_object(json!({}))]
fn unknown_shapes_are_unrecognized(#[case] payload: Value) {
    let classified = ClassifiedInteraction::classify(&payload);

    assert_eq!(classified, ClassifiedInteraction::Unrecognized);
    assert_eq!(classified.kind(), None);
    assert_eq!(classified.id(), None);
}

#[rstest]
fn command_without_data_decodes_with_defaults() {
    let mut payload = command_payload("hello");
    if let Some(fields) = payload.as_object_mut() {
        fields.remove("data");
    }

    let ClassifiedInteraction::ApplicationCommand(interaction) =
        ClassifiedInteraction::classify(&payload)
    else {
        panic!("expected an application command");
    };
    assert_eq!(interaction.data.name, "");
    assert_eq!(interaction.data.kind, None);
}

#[rstest]
#[case::component_without_custom_id(
    json!({"type": 3, "id": "1", "token": "t", "data": {"component_type": 2}}),
    InteractionType::MessageComponent
)]
#[case::command_with_unknown_command_type(
    json!({"type": 2, "id": "1", "token": "t", "data": {"name": "hello", "type": 4}}),
    InteractionType::ApplicationCommand
)]
#[case::ping_without_token(json!({"type": 1, "id": "1"}), InteractionType::Ping)]
#[case::bare_type(json!({"type": 5}), InteractionType::ModalSubmit)]
fn sparse_bodies_classify_by_type(#[case] payload: Value, #[case] expected: InteractionType) {
    assert_eq!(ClassifiedInteraction::classify(&payload).kind(), Some(expected));
}

#[rstest]
fn unknown_option_type_is_kept_as_none() {
    let payload = json!({
        "type": 2,
        "token": "t",
        "data": {"name": "hello", "type": 1, "options": [{"name": "x", "type": 99, "value": 1}]}
    });

    let ClassifiedInteraction::ApplicationCommand(interaction) =
        ClassifiedInteraction::classify(&payload)
    else {
        panic!("expected an application command");
    };
    let option = interaction.data.options.first().expect("one option");
    assert_eq!(option.kind, None);
    assert_eq!(interaction.data.kind, Some(CommandType::ChatInput));
}

#[rstest]
#[case::numeric_token(json!({"type": 1, "token": 5}), InteractionType::Ping)]
#[case::data_not_an_object(json!({"type": 2, "data": "hello"}), InteractionType::ApplicationCommand)]
fn wrongly_typed_bodies_keep_their_type(
    #[case] payload: Value,
    #[case] expected: InteractionType,
) {
    let classified = ClassifiedInteraction::classify(&payload);

    assert!(matches!(
        &classified,
        ClassifiedInteraction::Malformed { kind, .. } if *kind == expected
    ));
    assert_eq!(classified.kind(), Some(expected));
    assert_eq!(classified.id(), None);
}

#[rstest]
fn command_fields_are_typed() {
    let classified = ClassifiedInteraction::classify(&command_payload("hello"));

    let ClassifiedInteraction::ApplicationCommand(interaction) = classified else {
        panic!("expected an application command");
    };
    assert_eq!(interaction.data.name, "hello");
    assert_eq!(interaction.data.kind, Some(CommandType::ChatInput));
    assert_eq!(interaction.token, super::INTERACTION_TOKEN);
    assert_eq!(
        interaction.invoking_user().map(|user| user.username.as_str()),
        Some("alice")
    );
}

#[rstest]
fn autocomplete_exposes_focused_option() {
    let classified = ClassifiedInteraction::classify(&autocomplete_payload());

    let ClassifiedInteraction::Autocomplete(interaction) = classified else {
        panic!("expected an autocomplete interaction");
    };
    let focused = interaction
        .data
        .focused_option()
        .expect("an option is focused");
    assert_eq!(focused.as_str(), Some("ru"));
}

#[rstest]
fn ping_id_is_reported() {
    let classified = ClassifiedInteraction::classify(&ping_payload());

    assert_eq!(classified.id(), Some("1"));
}

#[rstest]
#[case(b"not json".as_slice())]
#[case(b"".as_slice())]
#[case(b"{\"type\": 1".as_slice())]
fn invalid_json_is_unrecognized(#[case] raw: &[u8]) {
    assert_eq!(
        ClassifiedInteraction::from_slice(raw),
        ClassifiedInteraction::Unrecognized
    );
}

#[rstest]
fn raw_body_is_classified() {
    let raw = br#"{"type":1,"id":"9","application_id":"1","token":"t","version":1}"#;

    assert_eq!(
        ClassifiedInteraction::from_slice(raw).kind(),
        Some(InteractionType::Ping)
    );
}
