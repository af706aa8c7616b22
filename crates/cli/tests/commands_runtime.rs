use std::env;
use std::sync::{Mutex, OnceLock};

use bazar_cli::commands::{migrate, seed};
use serde_json::Value;

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

const MANAGED_ENV_KEYS: &[&str] = &[
    "BAZAR_DATABASE_URL",
    "BAZAR_DATABASE_MAX_CONNECTIONS",
    "BAZAR_DATABASE_TIMEOUT_SECS",
    "BAZAR_SERVER_BIND_ADDRESS",
    "BAZAR_SERVER_PORT",
    "PORT",
    "BAZAR_LOGGING_LEVEL",
    "BAZAR_LOG_LEVEL",
    "BAZAR_LOGGING_FORMAT",
    "BAZAR_LOG_FORMAT",
];

fn with_env<F: FnOnce()>(vars: &[(&str, &str)], run: F) {
    let _guard = env_lock().lock().expect("env lock");
    for key in MANAGED_ENV_KEYS {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }
    run();
    for (key, _) in vars {
        env::remove_var(key);
    }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be JSON")
}

const MEMORY_STORE: &[(&str, &str)] = &[
    ("BAZAR_DATABASE_URL", "sqlite::memory:"),
    ("BAZAR_DATABASE_MAX_CONNECTIONS", "1"),
];

#[test]
fn migrate_returns_success_with_valid_env() {
    with_env(MEMORY_STORE, || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 0, "expected successful migrate run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "ok");
    });
}

#[test]
fn migrate_returns_config_failure_on_invalid_override() {
    with_env(&[("BAZAR_SERVER_PORT", "not-a-port")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn seed_loads_and_verifies_the_demo_catalog() {
    with_env(MEMORY_STORE, || {
        let result = seed::run();
        assert_eq!(result.exit_code, 0, "expected successful seed run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "seed");
        assert_eq!(payload["status"], "ok");
        assert!(
            payload["message"].as_str().expect("message").contains("catalog products"),
            "seed reports how many products it loaded"
        );
    });
}

#[test]
fn doctor_json_reports_passing_checks_against_a_memory_store() {
    with_env(MEMORY_STORE, || {
        let output = bazar_cli::commands::doctor::run(true);
        let payload: Value = serde_json::from_str(&output).expect("doctor output should be JSON");

        assert_eq!(payload["overall_status"], "pass");
        let checks = payload["checks"].as_array().expect("checks array");
        assert!(checks.iter().any(|check| check["name"] == "config_validation"));
        assert!(checks.iter().any(|check| check["name"] == "store_connectivity"));
    });
}
