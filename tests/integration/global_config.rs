//! Integration tests for global configuration loading

use lifecoord::config::{ConfigResolver, EnvVars, GlobalConfig};
use lifecoord::workflow::RetryPolicy;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_env_feeds_defaults() {
    let dir = TempDir::new().unwrap();
    let resolver = ConfigResolver::new(dir.path()).with_env(EnvVars::from_pairs([
        ("API_GATEWAY_PORT", "8100"),
        ("DATABASE_URL", "postgres://db/main"),
    ]));
    let global = resolver.load_global();
    assert_eq!(global.api_gateway.port, 8100);
    assert_eq!(global.database.url, "postgres://db/main");
}

#[test]
fn test_file_overrides_env() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("global.yaml"),
        "api_gateway:\n  port: 9000\ndatabase:\n  url: sqlite:///tmp/x.db\n",
    )
    .unwrap();
    let resolver = ConfigResolver::new(dir.path()).with_env(EnvVars::from_pairs([
        ("API_GATEWAY_PORT", "8100"),
        ("DATABASE_URL", "postgres://db/main"),
    ]));
    let global = resolver.load_global();
    assert_eq!(global.api_gateway.port, 9000);
    assert_eq!(global.database.url, "sqlite:///tmp/x.db");
}

#[test]
fn test_wrong_type_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("global.yaml"),
        "api_gateway:\n  port: not-a-port\n",
    )
    .unwrap();
    let resolver = ConfigResolver::new(dir.path()).with_env(EnvVars::empty());
    assert_eq!(
        resolver.load_global(),
        GlobalConfig::defaults(resolver.env(), resolver.ports())
    );
}

#[test]
fn test_workflow_section_drives_retry_policy() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("global.yaml"),
        "workflow:\n  max_attempts: 4\n  interval_ms: 500\n",
    )
    .unwrap();
    let resolver = ConfigResolver::new(dir.path()).with_env(EnvVars::empty());
    let policy = RetryPolicy::from_settings(&resolver.load_global().workflow);
    assert_eq!(policy, RetryPolicy::fixed(4, Duration::from_millis(500)));
}
