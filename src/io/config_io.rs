use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

const APP_DIR: &str = "tasklist";

/// Error type for config file I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Path of the config file, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    config_path_from(
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn config_path_from(xdg_config_home: Option<String>, home: Option<String>) -> PathBuf {
    xdg_dir(xdg_config_home, home, ".config")
        .join(APP_DIR)
        .join("config.toml")
}

/// Default store directory, respecting XDG_DATA_HOME
pub fn default_data_dir() -> PathBuf {
    default_data_dir_from(
        std::env::var("XDG_DATA_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn default_data_dir_from(xdg_data_home: Option<String>, home: Option<String>) -> PathBuf {
    xdg_dir(xdg_data_home, home, ".local/share").join(APP_DIR)
}

fn xdg_dir(xdg: Option<String>, home: Option<String>, fallback: &str) -> PathBuf {
    match xdg.filter(|s| !s.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => home
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/"))
            .join(fallback),
    }
}

/// Load a config file. A missing file is `Ok(None)`.
pub fn load_config_file(path: &Path) -> Result<Option<Config>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    toml::from_str(&text)
        .map(Some)
        .map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Read config from `path`, falling back to defaults.
/// A file that fails to parse is backed up as `.bak`.
pub fn read_config_from(path: &Path) -> Config {
    match load_config_file(path) {
        Ok(config) => {
            let mut config = config.unwrap_or_default();
            if let Some(rejected) = config.ui.reset_invalid_date_format() {
                tracing::warn!(
                    format = rejected.as_str(),
                    "invalid ui.date_format in {}, using default",
                    path.display()
                );
            }
            config
        }
        Err(e @ ConfigError::ParseError { .. }) => {
            let bak = path.with_extension("toml.bak");
            let _ = fs::copy(path, &bak);
            tracing::warn!("{} (backed up as {}), using defaults", e, bak.display());
            Config::default()
        }
        Err(e) => {
            tracing::warn!("{}, using defaults", e);
            Config::default()
        }
    }
}

/// Read config from the default location.
pub fn read_config() -> Config {
    read_config_from(&config_path())
}

/// Store directory: explicit override, then config, then the XDG default.
pub fn resolve_data_dir(config: &Config, data_dir_override: Option<&Path>) -> PathBuf {
    if let Some(dir) = data_dir_override {
        return dir.to_path_buf();
    }
    match &config.store.data_dir {
        Some(dir) => PathBuf::from(dir),
        None => default_data_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_path_prefers_xdg() {
        assert_eq!(
            config_path_from(Some("/xdg".into()), Some("/home/u".into())),
            PathBuf::from("/xdg/tasklist/config.toml")
        );
        assert_eq!(
            config_path_from(None, Some("/home/u".into())),
            PathBuf::from("/home/u/.config/tasklist/config.toml")
        );
        assert_eq!(
            config_path_from(Some(String::new()), Some("/home/u".into())),
            PathBuf::from("/home/u/.config/tasklist/config.toml")
        );
    }

    #[test]
    fn test_default_data_dir() {
        assert_eq!(
            default_data_dir_from(Some("/data".into()), None),
            PathBuf::from("/data/tasklist")
        );
        assert_eq!(
            default_data_dir_from(None, Some("/home/u".into())),
            PathBuf::from("/home/u/.local/share/tasklist")
        );
        assert_eq!(
            default_data_dir_from(None, None),
            PathBuf::from("/.local/share/tasklist")
        );
    }

    #[test]
    fn test_missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        assert!(load_config_file(&path).unwrap().is_none());
        assert_eq!(read_config_from(&path).store.key, "tasks");
    }

    #[test]
    fn test_reads_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[store]\nkey = \"todo\"\n\n[ui]\nhide_completed = true\n").unwrap();
        let config = read_config_from(&path);
        assert_eq!(config.store.key, "todo");
        assert!(config.ui.hide_completed);
    }

    #[test]
    fn test_corrupt_file_backed_up() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[store\nkey = ").unwrap();

        assert!(matches!(
            load_config_file(&path),
            Err(ConfigError::ParseError { .. })
        ));
        let config = read_config_from(&path);
        assert_eq!(config.store.key, "tasks");
        assert_eq!(
            fs::read_to_string(tmp.path().join("config.toml.bak")).unwrap(),
            "[store\nkey = "
        );
    }

    #[test]
    fn test_bad_date_format_falls_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[ui]\ndate_format = \"%Q\"\nhide_completed = true\n").unwrap();

        let config = read_config_from(&path);
        assert_eq!(config.ui.date_format, "%Y-%m-%d %H:%M");
        // Other keys in the file still apply
        assert!(config.ui.hide_completed);
    }

    #[test]
    fn test_resolve_data_dir_precedence() {
        let mut config = Config::default();
        config.store.data_dir = Some("/from/config".into());
        assert_eq!(
            resolve_data_dir(&config, Some(Path::new("/override"))),
            PathBuf::from("/override")
        );
        assert_eq!(
            resolve_data_dir(&config, None),
            PathBuf::from("/from/config")
        );
    }
}
