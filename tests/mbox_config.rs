// CLASSIFICATION: COMMUNITY
// Filename: mbox_config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

use std::env;
use std::fs;
use std::sync::Arc;

use mifmbox::config::{load_active, load_config, ConfigError, CONFIG_ENV};
use mifmbox::{MailboxPool, PoolLayout, StaticRegion};
use serial_test::serial;

fn with_config_env<F: FnOnce()>(value: Option<&str>, f: F) {
    let prev = env::var(CONFIG_ENV).ok();
    match value {
        Some(v) => env::set_var(CONFIG_ENV, v),
        None => env::remove_var(CONFIG_ENV),
    }
    f();
    match prev {
        Some(v) => env::set_var(CONFIG_ENV, v),
        None => env::remove_var(CONFIG_ENV),
    }
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wlbt.toml");
    fs::write(&path, "platform = \"exynos7570\"\nslot_stride = 8\n").unwrap();
    let layout = load_config(&path).unwrap();
    assert_eq!(layout, PoolLayout::new(8, 8).unwrap());

    let pool = MailboxPool::new(layout, Arc::new(StaticRegion::mapped(0x100))).unwrap();
    pool.init().unwrap();
    assert_eq!(pool.mbox_ptr(7).unwrap().addr(), 0x100 + 56);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
#[serial]
fn active_config_follows_env() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pcie.toml");
    fs::write(&path, "platform = \"pcie-emulation\"\n").unwrap();

    with_config_env(path.to_str(), || {
        assert_eq!(load_active().capacity(), 8);
    });
    with_config_env(None, || {
        assert_eq!(load_active(), PoolLayout::default());
    });
}

#[test]
#[serial]
fn broken_active_config_falls_back() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "capacity = 999\n").unwrap();

    with_config_env(path.to_str(), || {
        assert_eq!(load_active(), PoolLayout::default());
    });
    with_config_env(Some("/nonexistent/mifmbox.toml"), || {
        assert_eq!(load_active().capacity(), 4);
    });
}
