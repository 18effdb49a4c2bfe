use super::*;
use tempfile::TempDir;

fn base_config() -> ConnectionConfig {
    ConnectionConfig {
        project_id: "p1".to_string(),
        dataset_id: "d1".to_string(),
        threads: 4,
        region: None,
        service_account_key_path: None,
        impersonation_credentials: None,
    }
}

#[test]
fn default_auth_method_is_oauth() {
    assert_eq!(base_config().auth_method(), AuthMethod::Oauth);
}

#[test]
fn key_file_selects_service_account_method() {
    let mut config = base_config();
    config.service_account_key_path = Some(PathBuf::from("/secrets/sa.json"));
    assert_eq!(config.auth_method(), AuthMethod::ServiceAccount);

    let rendered = config.render_profiles_yml("dev").unwrap();
    assert!(rendered.contains("method: service-account"));
    assert!(rendered.contains("keyfile: /secrets/sa.json"));
    assert!(!rendered.contains("impersonate_service_account"));
}

#[test]
fn impersonation_stays_on_oauth_method() {
    let mut config = base_config();
    config.impersonation_credentials = Some("sa@p1.iam.gserviceaccount.com".to_string());
    assert_eq!(config.auth_method(), AuthMethod::Oauth);

    let rendered = config.render_profiles_yml("dev").unwrap();
    assert!(rendered.contains("method: oauth"));
    assert!(rendered.contains("impersonate_service_account: sa@p1.iam.gserviceaccount.com"));
    assert!(!rendered.contains("keyfile:"));
}

#[test]
fn rendered_profile_targets_requested_environment() {
    let rendered = base_config().render_profiles_yml("prod").unwrap();
    assert!(rendered.contains("target: prod"));
    assert!(rendered.contains("    prod:"));
    assert!(rendered.contains("project: p1"));
    assert!(rendered.contains("dataset: d1"));
    assert!(rendered.contains("threads: 4"));
}

#[test]
fn region_renders_as_location() {
    let mut config = base_config();
    config.region = Some("EU".to_string());
    let rendered = config.render_profiles_yml("dev").unwrap();
    assert!(rendered.contains("location: EU"));

    let without_region = base_config().render_profiles_yml("dev").unwrap();
    assert!(!without_region.contains("location:"));
}

#[test]
fn profile_is_valid_yaml() {
    let rendered = base_config().render_profiles_yml("dev").unwrap();
    let parsed: serde_yaml::Value = serde_yaml::from_str(&rendered).unwrap();
    let dev = &parsed["dqflow"]["outputs"]["dev"];
    assert_eq!(dev["type"].as_str(), Some("bigquery"));
    assert_eq!(dev["project"].as_str(), Some("p1"));
    assert_eq!(dev["threads"].as_u64(), Some(4));
}

#[test]
fn to_profiles_yml_writes_to_target_directory() {
    let dir = TempDir::new().unwrap();
    let path = base_config().to_profiles_yml(dir.path(), "dev").unwrap();
    assert_eq!(path, dir.path().join("profiles.yml"));
    let on_disk = fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("dataset: d1"));
}
