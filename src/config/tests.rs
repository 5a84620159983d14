use super::load::{default_config_path, expand_home, resolve_config_path};
use super::schema::*;
use std::path::{Path, PathBuf};
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
fn resolve_config_path_prefers_shelfcheck_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SHELFCHECK_CONFIG_PATH", "/tmp/shelfcheck-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/shelfcheck-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("shelfcheck")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("shelfcheck")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_usual_beets_layout() {
    let s = Settings::default();
    assert_eq!(s.library.dir, PathBuf::from("~/media/Music/FLAC"));
    assert_eq!(s.library.source_subdir, "FLAC");
    assert_eq!(s.library.converted_subdir, "V2");
    assert_eq!(s.library.converted_extension, "mp3");
    assert_eq!(s.catalog.path, PathBuf::from("~/.config/beets/library.db"));
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_empty_tokens_and_extensions() {
    let mut s = Settings::default();
    s.library.converted_subdir = "  ".into();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.track_extensions = vec![".".into(), "".into()];
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
dir = "/srv/music/FLAC"
converted_dir = "/srv/music/OPUS"
converted_subdir = "OPUS"
converted_extension = "opus"
track_extensions = ["flac"]
follow_links = false

[catalog]
path = "/srv/beets/library.db"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SHELFCHECK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SHELFCHECK__CATALOG__PATH");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.dir, PathBuf::from("/srv/music/FLAC"));
    assert_eq!(s.library.converted_dir, PathBuf::from("/srv/music/OPUS"));
    assert_eq!(s.library.source_subdir, "FLAC");
    assert_eq!(s.library.converted_subdir, "OPUS");
    assert_eq!(s.library.converted_extension, "opus");
    assert_eq!(s.library.track_extensions, vec!["flac".to_string()]);
    assert!(!s.library.follow_links);
    assert_eq!(s.catalog.path, PathBuf::from("/srv/beets/library.db"));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[catalog]
path = "/from/file.db"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SHELFCHECK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SHELFCHECK__CATALOG__PATH", "/from/env.db");

    let s = Settings::load().unwrap();
    assert_eq!(s.catalog.path, PathBuf::from("/from/env.db"));
}

#[test]
fn settings_render_as_toml() {
    let rendered = toml::to_string_pretty(&Settings::default()).unwrap();
    assert!(rendered.contains("[library]"));
    assert!(rendered.contains("converted_subdir = \"V2\""));
}

#[test]
fn expand_home_only_touches_leading_tilde() {
    let _lock = env_lock();
    let _g = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        expand_home(Path::new("~/Music")),
        PathBuf::from("/tmp/home-dir/Music")
    );
    assert_eq!(expand_home(Path::new("~")), PathBuf::from("/tmp/home-dir"));
    assert_eq!(
        expand_home(Path::new("/srv/~/Music")),
        PathBuf::from("/srv/~/Music")
    );
    assert_eq!(expand_home(Path::new("Music")), PathBuf::from("Music"));
}
