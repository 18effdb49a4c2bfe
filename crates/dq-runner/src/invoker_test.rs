use super::*;
use std::path::Path;

fn invocation() -> DbtInvocation {
    DbtInvocation {
        project_dir: PathBuf::from("/work/dbt"),
        profiles_dir: PathBuf::from("/work/dbt"),
        environment_target: "dev".to_string(),
        vars: serde_json::Map::new(),
        debug: false,
        dry_run: false,
    }
}

#[test]
fn run_invocation_builds_run_args() {
    let args = invocation().to_args();
    assert_eq!(
        args,
        vec![
            "run",
            "--project-dir",
            "/work/dbt",
            "--profiles-dir",
            "/work/dbt",
            "--target",
            "dev",
        ]
    );
}

#[test]
fn debug_wins_over_dry_run() {
    let mut inv = invocation();
    inv.debug = true;
    inv.dry_run = true;
    assert_eq!(inv.subcommand(), "debug");
}

#[test]
fn dry_run_resolves_to_compile() {
    let mut inv = invocation();
    inv.dry_run = true;
    assert_eq!(inv.subcommand(), "compile");
    assert_eq!(inv.to_args()[0], "compile");
}

#[test]
fn vars_are_forwarded_as_json() {
    let mut inv = invocation();
    inv.vars.insert(
        "rule_binding_ids".to_string(),
        serde_json::json!(["rb1", "rb2"]),
    );
    let args = inv.to_args();
    let pos = args.iter().position(|a| a == "--vars").unwrap();
    let payload: serde_json::Value = serde_json::from_str(&args[pos + 1]).unwrap();
    assert_eq!(payload["rule_binding_ids"][0], "rb1");
}

#[test]
fn debug_invocation_carries_no_vars() {
    let mut inv = invocation();
    inv.debug = true;
    inv.vars
        .insert("ignored".to_string(), serde_json::json!(true));
    assert!(!inv.to_args().contains(&"--vars".to_string()));
}

#[tokio::test]
async fn spawn_failure_surfaces_as_error() {
    let cli = DbtCli::with_program(PathBuf::from("/nonexistent/dbt-binary"));
    let mut inv = invocation();
    inv.project_dir = Path::new("/tmp").to_path_buf();
    let err = cli.invoke(&inv).await.unwrap_err();
    assert!(matches!(err, RunnerError::Spawn { .. }));
}
