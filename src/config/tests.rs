use super::load::{default_config_path, default_log_dir, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_allegro_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("ALLEGRO_CONFIG_PATH", "/tmp/allegro-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/allegro-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("allegro")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("allegro")
            .join("config.toml")
    );
}

#[test]
fn default_log_dir_falls_back_to_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_log_dir().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/allegro")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[server]
base_url = "http://music.local:8080/player"
timeout_secs = 5

[[library.folders]]
folder = "ncs"
title = "NCS"
description = "Copyright free"

[[library.folders]]
folder = "lofi"

[playback]
autoplay = true
volume = 40

[audio]
quit_fade_out_ms = 0

[controls]
scrub_seconds = 9
volume_step = 5

[ui]
header_text = "hello"
sidebar_open = false

[logging]
level = "debug"
file_name = "test.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ALLEGRO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("ALLEGRO__PLAYBACK__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.server.base_url, "http://music.local:8080/player");
    assert_eq!(s.server.timeout_secs, 5);
    assert_eq!(s.library.folders.len(), 2);
    assert_eq!(s.library.folders[0].label(), "NCS");
    assert_eq!(s.library.folders[0].description, "Copyright free");
    assert_eq!(s.library.folders[1].label(), "lofi");
    assert!(s.playback.autoplay);
    assert_eq!(s.playback.volume, 40);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.controls.volume_step, 5);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.ui.sidebar_open);
    assert_eq!(s.logging.level, "debug");
    assert_eq!(s.logging.file_name, "test.log");
    assert!(s.validate().is_ok());
    assert_eq!(
        s.base_url().unwrap().as_str(),
        "http://music.local:8080/player/"
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
volume = 80
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ALLEGRO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("ALLEGRO__PLAYBACK__VOLUME", "15");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.volume, 15);
}

#[test]
fn validate_rejects_bad_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.playback.volume = 101;
    assert!(s.validate().is_err());
    s.playback.volume = 100;

    s.controls.volume_step = 0;
    assert!(s.validate().is_err());
    s.controls.volume_step = 10;

    s.server.base_url = "not a url".to_string();
    assert!(s.validate().is_err());
    s.server.base_url = "mailto:someone@example.com".to_string();
    assert!(s.validate().is_err());
}
