//! Playground commands end to end.

use remoteui_playground::commands;
use remoteui_playground::PlaygroundConfig;
use remoteui_schema::NamingStyle;
use serde_json::{json, Value};

fn empty_test_object() -> Value {
    json!({
        "list_of_strings": [],
        "OverrideMe": [],
        "some_string": "",
        "list_of_objects": [],
        "some_float": 0,
        "read_only_example": {"read_only_string": "", "list_of_read_only_strings": []}
    })
}

#[test]
fn test_initial_data_uses_configured_naming() {
    let snake = commands::initial(&PlaygroundConfig::default()).unwrap();
    assert_eq!(snake["some_string"], "Sample Text");
    assert_eq!(snake["OverrideMe"], json!(["123321"]));
    assert_eq!(
        snake["read_only_example"]["list_of_read_only_strings"],
        json!([{"title": "One"}, {"title": "Two"}])
    );

    let camel = commands::initial(&PlaygroundConfig {
        naming: NamingStyle::Camel,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(camel["someString"], "Sample Text");
    assert_eq!(camel["OverrideMe"], json!(["123321"]));
}

#[test]
fn test_schema_lists_common_group() {
    let schema = commands::schema(&PlaygroundConfig::default()).unwrap();
    assert_eq!(schema["groups"][0]["name"], "Common");
    let fields = schema["groups"][0]["fields"].as_array().unwrap();
    assert_eq!(fields[1]["id"], "OverrideMe");
    assert_eq!(fields[3]["type"], "List");
    assert_eq!(fields[3]["listType"], "Test");
    assert_eq!(fields[5]["readOnly"], true);
}

#[tokio::test]
async fn test_validate_initial_data() {
    let config = PlaygroundConfig::default();
    let payload = commands::initial(&config).unwrap();
    let report = commands::validate(&config, payload).await.unwrap();

    assert_eq!(report.errors["some_string"], "Error in string");
    assert_eq!(report.data["some_string"], "Sample Text");
    assert_eq!(report.flagged, vec!["some_string"]);
    assert!(!report.valid);
}

#[tokio::test]
async fn test_validate_with_highlight_flags_invalid_fields() {
    let config = PlaygroundConfig {
        highlight_errors: true,
        ..Default::default()
    };
    let payload = commands::initial(&config).unwrap();
    let report = commands::validate(&config, payload).await.unwrap();

    assert_eq!(
        report.flagged,
        vec![
            "some_string",
            "read_only_example",
            "read_only_example.read_only_string",
        ]
    );
}

#[tokio::test]
async fn test_validate_nested_payload() {
    let mut first = empty_test_object();
    first["some_string"] = json!("first");
    let mut second = empty_test_object();
    second["list_of_strings"] = json!(["z"]);

    let payload = json!({
        "list_of_strings": ["a", "b"],
        "OverrideMe": [],
        "some_string": "x",
        "list_of_objects": [first, second],
        "some_float": 1.5,
        "read_only_example": {"read_only_string": "r", "list_of_read_only_strings": []}
    });
    let report = commands::validate(&PlaygroundConfig::default(), payload)
        .await
        .unwrap();

    assert_eq!(
        report.flagged,
        vec![
            "list_of_strings[1]",
            "some_string",
            "list_of_objects[0].some_string",
            "list_of_objects[1].list_of_strings[0]",
        ]
    );
    assert_eq!(report.data["some_float"], json!(1.5));
    assert_eq!(report.data["list_of_objects"][1]["list_of_strings"], json!(["z"]));
}

#[tokio::test]
async fn test_validate_rejects_mistyped_payload() {
    let payload = json!({"some_float": "not a number", "list_of_objects": 3});
    assert!(commands::validate(&PlaygroundConfig::default(), payload)
        .await
        .is_err());
}

#[test]
fn test_session_describes_tree() {
    let groups = commands::session(&PlaygroundConfig::default()).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "Common");
    assert!(groups[0].expanded);

    let controls: Vec<(&str, &str)> = groups[0]
        .fields
        .iter()
        .map(|f| (f.id.as_str(), f.control))
        .collect();
    assert_eq!(
        controls,
        vec![
            ("list_of_strings", "list"),
            ("OverrideMe", "list"),
            ("some_string", "text"),
            ("list_of_objects", "list"),
            ("some_float", "text"),
            ("read_only_example", "object"),
        ]
    );
    let read_only = &groups[0].fields[5];
    assert!(read_only.read_only);
    assert!(!read_only.valid);
}
