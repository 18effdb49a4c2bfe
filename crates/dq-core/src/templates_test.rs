use super::*;
use tempfile::TempDir;

#[test]
fn registry_covers_all_bundled_templates() {
    for (name, _) in TEMPLATE_FILE_LOCATIONS {
        assert!(template_content(name).is_ok(), "missing content for {name}");
        assert!(template_relative_path(name).is_ok());
    }
}

#[test]
fn unknown_template_name_fails_lookup() {
    let err = template_content("nonexistent.yml").unwrap_err();
    assert!(matches!(err, CoreError::UnknownTemplate { .. }));
    let err = template_relative_path("nonexistent.yml").unwrap_err();
    assert!(err.to_string().contains("nonexistent.yml"));
}

#[test]
fn project_descriptor_carries_expiration_placeholder() {
    let text = template_content("dbt_project.yml").unwrap();
    assert!(text.contains(HOURS_TO_EXPIRATION_PLACEHOLDER));
}

#[test]
fn sql_model_paths_sit_under_engine_directory() {
    let main = template_relative_path("main.sql").unwrap();
    assert_eq!(
        main,
        PathBuf::from("models/data_quality_engine/main.sql")
    );
    let summary = template_relative_path("dq_summary.sql").unwrap();
    assert_eq!(
        summary,
        PathBuf::from("models/data_quality_engine/dq_summary.sql")
    );
}

#[test]
fn write_template_if_missing_preserves_existing_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("main.sql");

    write_template_if_missing(&path).unwrap();
    let first = fs::read_to_string(&path).unwrap();
    assert_eq!(first, template_content("main.sql").unwrap());

    fs::write(&path, "-- locally edited\n").unwrap();
    write_template_if_missing(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "-- locally edited\n");
}

#[test]
fn write_template_if_missing_rejects_unregistered_names() {
    let dir = TempDir::new().unwrap();
    let err = write_template_if_missing(&dir.path().join("rogue.sql")).unwrap_err();
    assert!(matches!(err, CoreError::UnknownTemplate { .. }));
}

#[test]
fn ensure_dir_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("models").join("rule_binding_views");
    ensure_dir(&nested).unwrap();
    assert!(nested.is_dir());
    ensure_dir(&nested).unwrap();
    assert!(nested.is_dir());
}
