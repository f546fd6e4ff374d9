//! Integration tests for agent configuration resolution

use super::test_utils::isolated_resolver;
use lifecoord::agent::{AgentName, KnownAgent, PortMapping};
use lifecoord::config::{
    summarize, ConfigCache, ConfigResolver, ConfigSections, EnvVars, GENERIC_AGENT_PORT,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn name(s: &str) -> AgentName {
    AgentName::new(s).unwrap()
}

fn sections(value: Value) -> ConfigSections {
    match value {
        Value::Object(map) => map,
        other => panic!("expected mapping, got {}", other),
    }
}

#[test]
fn test_known_agent_defaults_are_exact() {
    let (_dir, resolver) = isolated_resolver();
    let milo = resolver.load(&name("milo"));

    assert_eq!(
        Value::Object(milo.sections.clone()),
        json!({
            "agent": {
                "name": "milo",
                "port": 8004,
                "description": "Meal Planning & Nutrition Agent"
            },
            "database": {"url": "sqlite:///data/milo.db"},
            "tools": {
                "recipe_engine": {"enabled": true},
                "nutrition_analyzer": {"enabled": true},
                "meal_planner": {"enabled": true}
            },
            "logging": {"level": "INFO", "format": "text"}
        })
    );
}

#[test]
fn test_known_agents_have_distinct_ports() {
    let (_dir, resolver) = isolated_resolver();
    let mut ports: Vec<u64> = KnownAgent::ALL
        .into_iter()
        .map(|agent| {
            resolver
                .load(&AgentName::from(agent))
                .get_path("agent.port")
                .and_then(Value::as_u64)
                .unwrap()
        })
        .collect();
    ports.sort_unstable();
    assert_eq!(ports, vec![8001, 8002, 8003, 8004]);
}

#[test]
fn test_swapped_mapping_moves_milo_and_luna() {
    let dir = tempfile::TempDir::new().unwrap();
    let resolver = ConfigResolver::new(dir.path())
        .with_env(EnvVars::from_pairs([("AGENT_PORT_MAPPING", "swapped")]));
    assert_eq!(resolver.ports().mapping(), PortMapping::Swapped);
    assert_eq!(resolver.load(&name("milo")).get_path("agent.port"), Some(&json!(8003)));
    assert_eq!(resolver.load(&name("luna")).get_path("agent.port"), Some(&json!(8004)));
}

#[test]
fn test_unknown_agent_gets_generic_bundle() {
    let (_dir, resolver) = isolated_resolver();
    let cfg = resolver.load(&name("travel_buddy"));
    assert_eq!(cfg.get_path("agent.port"), Some(&json!(GENERIC_AGENT_PORT)));
    assert_eq!(
        cfg.get_path("agent.description"),
        Some(&json!("Travel_Buddy Agent"))
    );
    assert_eq!(cfg.get_path("tools"), Some(&json!({})));
    assert_eq!(
        cfg.get_path("database.url"),
        Some(&json!("sqlite:///data/travel_buddy.db"))
    );
}

#[test]
fn test_partial_override_is_deep_merged() {
    let (dir, resolver) = isolated_resolver();
    std::fs::write(
        dir.path().join("bucky.yaml"),
        r#"
agent:
  port: 9102
tools:
  price_comparator:
    enabled: false
    api_key: pc-123
  coupon_clipper:
    enabled: true
"#,
    )
    .unwrap();

    let merged = resolver.load(&name("bucky"));
    let default = resolver.default_for(&name("bucky"));

    assert_eq!(merged.get_path("agent.port"), Some(&json!(9102)));
    assert_eq!(merged.get_path("agent.name"), default.get_path("agent.name"));
    assert_eq!(
        merged.get_path("agent.description"),
        default.get_path("agent.description")
    );
    assert_eq!(merged.get_path("tools.price_comparator.enabled"), Some(&json!(false)));
    assert_eq!(merged.get_path("tools.price_comparator.api_key"), Some(&json!("pc-123")));
    assert_eq!(merged.get_path("tools.pantry_tracker.enabled"), Some(&json!(true)));
    assert_eq!(merged.get_path("tools.coupon_clipper.enabled"), Some(&json!(true)));
    assert_eq!(merged.section("database"), default.section("database"));
    assert_eq!(merged.section("logging"), default.section("logging"));
}

#[test]
fn test_json_override_is_read() {
    let (dir, resolver) = isolated_resolver();
    std::fs::write(
        dir.path().join("nani.json"),
        r#"{"logging": {"level": "DEBUG"}}"#,
    )
    .unwrap();
    let cfg = resolver.load(&name("nani"));
    assert_eq!(cfg.get_path("logging.level"), Some(&json!("DEBUG")));
    assert_eq!(cfg.get_path("logging.format"), Some(&json!("text")));
}

#[test]
fn test_save_then_load_returns_saved_value() {
    let (dir, resolver) = isolated_resolver();
    let before = resolver.load(&name("luna"));

    let saved = sections(json!({"agent": {"port": 9203}, "tools": {}}));
    resolver.save(&name("luna"), saved.clone()).unwrap();

    let after = resolver.load(&name("luna"));
    assert_ne!(after, before);
    assert_eq!(after.sections, saved);
    assert!(dir.path().join("luna.yaml").exists());

    // A fresh resolver merges the persisted document onto defaults.
    let fresh = ConfigResolver::new(dir.path()).with_env(EnvVars::empty());
    let reloaded = fresh.load(&name("luna"));
    assert_eq!(reloaded.get_path("agent.port"), Some(&json!(9203)));
    assert_eq!(reloaded.get_path("agent.name"), Some(&json!("luna")));
}

#[test]
fn test_save_leaves_no_temp_files() {
    let (dir, resolver) = isolated_resolver();
    resolver
        .save(&name("milo"), sections(json!({"agent": {"port": 1}})))
        .unwrap();
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_malformed_override_never_panics() {
    let (dir, resolver) = isolated_resolver();
    let documents = [
        "agent: [unclosed",
        "- just\n- a\n- list\n",
        "42",
        "agent: {port: 1",
    ];
    for (i, doc) in documents.iter().enumerate() {
        std::fs::write(dir.path().join("nani.yaml"), doc).unwrap();
        resolver.cache().clear();
        let cfg = resolver.load(&name("nani"));
        assert_eq!(cfg, resolver.default_for(&name("nani")), "document {} should fall back", i);
    }
}

#[test]
fn test_empty_override_means_defaults() {
    let (dir, resolver) = isolated_resolver();
    std::fs::write(dir.path().join("bucky.yaml"), "").unwrap();
    assert_eq!(resolver.load(&name("bucky")), resolver.default_for(&name("bucky")));
}

#[test]
fn test_shared_cache_across_resolvers() {
    let (dir, resolver) = isolated_resolver();
    let cache = Arc::new(ConfigCache::new());
    let a = resolver.clone().with_cache(cache.clone());
    let b = ConfigResolver::new(dir.path())
        .with_env(EnvVars::empty())
        .with_cache(cache.clone());

    a.save(&name("nani"), sections(json!({"agent": {"port": 7001}})))
        .unwrap();
    assert_eq!(b.load(&name("nani")).get_path("agent.port"), Some(&json!(7001)));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_isolated_caches_do_not_interfere() {
    let (dir, a) = isolated_resolver();
    let b = ConfigResolver::new(dir.path()).with_env(EnvVars::empty());

    a.save(&name("nani"), sections(json!({"agent": {"port": 7001}})))
        .unwrap();
    // `b` has never cached nani, so it reads the file and merges.
    let cfg = b.load(&name("nani"));
    assert_eq!(cfg.get_path("agent.port"), Some(&json!(7001)));
    assert_eq!(cfg.get_path("agent.name"), Some(&json!("nani")));
}

#[test]
fn test_concurrent_first_loads_converge() {
    let (dir, resolver) = isolated_resolver();
    std::fs::write(dir.path().join("milo.yaml"), "agent:\n  port: 9300\n").unwrap();

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| resolver.load(&name("milo"))))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(results[0].get_path("agent.port"), Some(&json!(9300)));
    assert_eq!(resolver.cache().len(), 1);
}

#[test]
fn test_env_substitution_and_summary() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("milo.yaml"),
        r#"
tools:
  recipe_engine:
    api_key: ${SPOONACULAR_API_KEY}
  nutrition_analyzer:
    api_key: ${USDA_API_KEY:DEMO_KEY}
  meal_planner:
    client_id: ${PLANNER_CLIENT_ID:planner-1}
"#,
    )
    .unwrap();
    let resolver = ConfigResolver::new(dir.path()).with_env(EnvVars::empty());
    let cfg = resolver.load(&name("milo"));

    assert_eq!(
        cfg.get_path("tools.recipe_engine.api_key"),
        Some(&json!("MISSING_SPOONACULAR_API_KEY"))
    );
    let summary = summarize(&cfg);
    assert_eq!(summary.total_configs, 3);
    assert_eq!(summary.configured_count, 1);
    assert_eq!(summary.missing_count, 2);
}
