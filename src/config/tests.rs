use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
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
fn resolve_config_path_prefers_vivace_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("VIVACE_CONFIG_PATH", "/tmp/vivace-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/vivace-test-config.toml")
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
            .join("vivace")
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
            .join("vivace")
            .join("config.toml")
    );
}

#[test]
fn settings_load_reads_all_sections_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
music_dir = "/tmp/tunes"

[playback]
loop_enabled = true
volume = 0.8

[library]
extensions = ["mp3", "ogg"]
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("VIVACE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("VIVACE__MUSIC_DIR");

    let s = Settings::load().unwrap();
    assert_eq!(s.music_dir, "/tmp/tunes");
    assert!(s.playback.loop_enabled);
    assert_eq!(s.playback.volume, 0.8);
    assert_eq!(
        s.library.extensions,
        vec!["mp3".to_string(), "ogg".to_string()]
    );
}

#[test]
fn settings_load_defaults_when_no_file_exists() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-config.toml");

    let _g1 = EnvGuard::set("VIVACE_CONFIG_PATH", missing.to_str().unwrap());
    let _g2 = EnvGuard::remove("VIVACE__MUSIC_DIR");

    let s = Settings::load().unwrap();
    assert_eq!(s, Settings::default());
    assert!(s.music_dir.is_empty());
    assert!(!s.playback.loop_enabled);
    assert_eq!(s.playback.volume, 0.5);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
music_dir = "/from/file"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("VIVACE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("VIVACE__MUSIC_DIR", "/from/env");

    let s = Settings::load().unwrap();
    assert_eq!(s.music_dir, "/from/env");
}

#[test]
fn save_then_load_round_trips() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("nested").join("config.toml");

    let _g1 = EnvGuard::set("VIVACE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("VIVACE__MUSIC_DIR");

    let saved = Settings {
        music_dir: "/tmp/tunes".to_string(),
        playback: PlaybackSettings {
            loop_enabled: true,
            volume: 0.25,
        },
        library: LibrarySettings {
            extensions: vec!["mp3".into()],
        },
    };
    saved.save().unwrap();

    let loaded = Settings::load().unwrap();
    assert_eq!(loaded, saved);
}

#[test]
fn save_overwrites_prior_content() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "music_dir = \"/old\"\n").unwrap();

    let _g1 = EnvGuard::set("VIVACE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("VIVACE__MUSIC_DIR");

    let settings = Settings {
        music_dir: "/new".to_string(),
        ..Settings::default()
    };
    settings.save().unwrap();

    let loaded = Settings::load().unwrap();
    assert_eq!(loaded.music_dir, "/new");
}

#[test]
fn validate_rejects_out_of_range_volume_and_empty_extensions() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.playback.volume = 1.5;
    assert!(s.validate().is_err());

    s.playback.volume = 0.5;
    s.library.extensions.clear();
    assert!(s.validate().is_err());
}
