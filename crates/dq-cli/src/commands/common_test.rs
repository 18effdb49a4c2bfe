use super::*;

#[test]
fn parses_json_spelling() {
    let vars = parse_vars(r#"{"rule_binding_ids": ["rb1", "rb2"], "debug": true}"#).unwrap();
    assert_eq!(vars["rule_binding_ids"], serde_json::json!(["rb1", "rb2"]));
    assert_eq!(vars["debug"], serde_json::json!(true));
}

#[test]
fn parses_yaml_spelling() {
    let vars = parse_vars("environment: dev\nthreads: 4").unwrap();
    assert_eq!(vars["environment"], serde_json::json!("dev"));
    assert_eq!(vars["threads"], serde_json::json!(4));
}

#[test]
fn rejects_non_mapping_payloads() {
    assert!(parse_vars("- just\n- a\n- list").is_err());
    assert!(parse_vars("{not valid").is_err());
}
