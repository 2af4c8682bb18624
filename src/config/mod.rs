use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::clipboard::ClipboardBackendKind;

const APP_DIR: &str = "prompt-manager";
const APP_CONFIG_FILE: &str = "config.json";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: i32,
    pub window_height: i32,
    pub status_duration_ms: u32,
    pub clipboard_backend: ClipboardBackendKind,
    pub tray_copy_notification: bool,
}

impl AppConfig {
    /// Replaces values GTK or the status timer cannot use with defaults.
    fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |value: i32, fallback: i32| if value > 0 { value } else { fallback };
        Self {
            window_width: positive(self.window_width, defaults.window_width),
            window_height: positive(self.window_height, defaults.window_height),
            status_duration_ms: if self.status_duration_ms == 0 {
                defaults.status_duration_ms
            } else {
                self.status_duration_ms
            },
            ..self
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            status_duration_ms: 4_000,
            clipboard_backend: ClipboardBackendKind::default(),
            tray_copy_notification: true,
        }
    }
}

pub fn load_app_config() -> AppConfig {
    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let Some(path) = config_file_path(xdg_config_home, home) else {
        tracing::debug!("no config directory resolvable; using defaults");
        return AppConfig::default();
    };
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return AppConfig::default(),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            return AppConfig::default();
        }
    };
    let config: AppConfig = match serde_json::from_str(&contents) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            return AppConfig::default();
        }
    };
    config.sanitized()
}

/// `$XDG_CONFIG_HOME/prompt-manager/config.json`, else under `~/.config`.
fn config_file_path(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    let root = match xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        Some(xdg) => xdg.to_path_buf(),
        None => home?.join(".config"),
    };
    Some(root.join(APP_DIR).join(APP_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(root: &Path, body: &str) {
        let app_dir = root.join(APP_DIR);
        std::fs::create_dir_all(&app_dir).expect("mkdir");
        std::fs::write(app_dir.join(APP_CONFIG_FILE), body).expect("write");
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!((config.window_width, config.window_height), (800, 600));
        assert_eq!(config.status_duration_ms, 4_000);
        assert_eq!(config.clipboard_backend, ClipboardBackendKind::Gdk);
        assert!(config.tray_copy_notification);
    }

    #[test]
    fn xdg_config_home_wins_over_home() {
        let xdg = tempfile::tempdir().expect("tempdir");
        let home = tempfile::tempdir().expect("tempdir");
        write_config(xdg.path(), r#"{"status_duration_ms": 1500}"#);
        write_config(
            &home.path().join(".config"),
            r#"{"status_duration_ms": 9000}"#,
        );

        let config = load_app_config_with(Some(xdg.path()), Some(home.path()));
        assert_eq!(config.status_duration_ms, 1_500);
    }

    #[test]
    fn empty_xdg_value_falls_back_to_home_dot_config() {
        let home = tempfile::tempdir().expect("tempdir");
        write_config(
            &home.path().join(".config"),
            r#"{"tray_copy_notification": false}"#,
        );

        let config = load_app_config_with(Some(Path::new("")), Some(home.path()));
        assert!(!config.tray_copy_notification);
    }

    #[test]
    fn no_resolvable_directory_yields_defaults() {
        assert_eq!(load_app_config_with(None, None), AppConfig::default());
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(
            load_app_config_with(Some(dir.path()), None),
            AppConfig::default()
        );
    }

    #[test]
    fn partial_config_keeps_defaults_for_absent_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_config(
            dir.path(),
            r#"{"clipboard_backend": "wl-copy", "window_width": 1024}"#,
        );

        let config = load_app_config_with(Some(dir.path()), None);
        assert_eq!(config.clipboard_backend, ClipboardBackendKind::WlCopy);
        assert_eq!(config.window_width, 1024);
        assert_eq!(config.window_height, AppConfig::default().window_height);
        assert!(config.tray_copy_notification);
    }

    #[test]
    fn unusable_sizes_and_durations_fall_back_per_field() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_config(
            dir.path(),
            r#"{"window_width": 0, "window_height": -5, "status_duration_ms": 0, "tray_copy_notification": false}"#,
        );

        let config = load_app_config_with(Some(dir.path()), None);
        let defaults = AppConfig::default();
        assert_eq!(config.window_width, defaults.window_width);
        assert_eq!(config.window_height, defaults.window_height);
        assert_eq!(config.status_duration_ms, defaults.status_duration_ms);
        assert!(!config.tray_copy_notification);
    }

    #[test]
    fn unknown_clipboard_backend_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_config(dir.path(), r#"{"clipboard_backend": "xclip"}"#);

        assert_eq!(
            load_app_config_with(Some(dir.path()), None),
            AppConfig::default()
        );
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_config(dir.path(), "{ not json");

        assert_eq!(
            load_app_config_with(Some(dir.path()), None),
            AppConfig::default()
        );
    }
}
