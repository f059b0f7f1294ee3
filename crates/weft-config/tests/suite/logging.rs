use std::ffi::OsString;
use std::sync::Mutex;

use tempfile::tempdir;
use weft_config::{init_tracing, LoggingConfig};

static ENV_LOCK: Mutex<()> = Mutex::new(());

struct EnvVarGuard {
    key: &'static str,
    prev: Option<OsString>,
}

impl EnvVarGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let prev = std::env::var_os(key);
        std::env::set_var(key, value);
        Self { key, prev }
    }

    fn unset(key: &'static str) -> Self {
        let prev = std::env::var_os(key);
        std::env::remove_var(key);
        Self { key, prev }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

#[test]
fn level_aliases_are_accepted() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset("RUST_LOG");

    let config = LoggingConfig {
        level: "WARNING".to_string(),
        ..LoggingConfig::default()
    };
    let filter = config.env_filter().to_string();
    assert!(filter.contains("warn"), "{filter}");
}

#[test]
fn rust_log_is_appended_to_the_configured_level() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::set("RUST_LOG", "weft.layer=trace");

    let filter = LoggingConfig::default().env_filter().to_string();
    assert!(filter.contains("weft.layer=trace"), "{filter}");
    assert!(filter.contains("info"), "{filter}");
}

#[test]
fn invalid_directives_fall_back_to_info() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset("RUST_LOG");

    let config = LoggingConfig {
        level: "weft.layer=loud".to_string(),
        ..LoggingConfig::default()
    };
    let filter = config.env_filter().to_string();
    assert!(!filter.contains("weft.layer"), "{filter}");
    assert!(filter.contains("info"), "{filter}");
}

#[test]
fn init_tracing_can_be_called_repeatedly() {
    let dir = tempdir().unwrap();
    let config = LoggingConfig {
        stderr: false,
        file: Some(dir.path().join("weft.log")),
        ..LoggingConfig::default()
    };
    init_tracing(&config);
    init_tracing(&config);
    tracing::info!(target: "weft.config", "logging initialized");
}
