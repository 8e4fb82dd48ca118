//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use starfx::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("SFX_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("SFX_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_overrides_effect_section() {
    std::env::set_var("SFX_FIREWORKS__MAX_ROCKETS", "3");
    std::env::set_var("SFX_DEBUG__SEED", "42");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("SFX_FIREWORKS__MAX_ROCKETS");
    std::env::remove_var("SFX_DEBUG__SEED");

    assert_eq!(config.fireworks.max_rockets, 3);
    assert_eq!(config.fireworks.launch_interval_ms, 300);
    assert_eq!(config.debug.seed, Some(42));
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    std::env::remove_var("SFX_WINDOW__TITLE");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let loaded = AppConfig::load_from("config").unwrap();
    let builtin = AppConfig::default();
    assert_eq!(loaded.starfield, builtin.starfield);
    assert_eq!(loaded.cursor, builtin.cursor);
    assert_eq!(loaded.fireworks, builtin.fireworks);
    assert_eq!(loaded.window.width, builtin.window.width);
}

#[test]
#[serial]
fn test_missing_directory_falls_back_to_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.window.height, 720);
    assert_eq!(config.starfield.density_divisor, 10_000.0);
}
