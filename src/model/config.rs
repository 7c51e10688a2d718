use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the store files. None = XDG data dir.
    #[serde(default)]
    pub data_dir: Option<String>,
    /// Key the whole task list is stored under
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_dir: None,
            key: default_key(),
        }
    }
}

fn default_key() -> String {
    "tasks".to_string()
}

fn default_true() -> bool {
    true
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Initial state of the "only uncompleted tasks" filter
    #[serde(default)]
    pub hide_completed: bool,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// chrono format string for creation dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            hide_completed: false,
            show_key_hints: true,
            date_format: default_date_format(),
            colors: HashMap::new(),
        }
    }
}

impl UiConfig {
    /// Put back the default date format if chrono cannot format with the
    /// configured one. Returns the rejected format.
    pub fn reset_invalid_date_format(&mut self) -> Option<String> {
        if is_valid_date_format(&self.date_format) {
            return None;
        }
        Some(std::mem::replace(&mut self.date_format, default_date_format()))
    }
}

/// True when every strftime item in `format` is one chrono knows
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.store.key, "tasks");
        assert!(config.store.data_dir.is_none());
        assert!(!config.ui.hide_completed);
        assert!(config.ui.show_key_hints);
        assert_eq!(config.ui.date_format, "%Y-%m-%d %H:%M");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str(
            r##"
[store]
data_dir = "/tmp/tl"

[ui]
hide_completed = true

[ui.colors]
primary = "#112233"
"##,
        )
        .unwrap();
        assert_eq!(config.store.data_dir.as_deref(), Some("/tmp/tl"));
        assert_eq!(config.store.key, "tasks");
        assert!(config.ui.hide_completed);
        assert!(config.ui.show_key_hints);
        assert_eq!(config.ui.colors.get("primary").unwrap(), "#112233");
    }

    #[test]
    fn date_format_validity() {
        assert!(is_valid_date_format("%Y-%m-%d %H:%M"));
        assert!(is_valid_date_format("no fields"));
        assert!(!is_valid_date_format("%Q"));
        assert!(!is_valid_date_format("%Y %"));
    }

    #[test]
    fn invalid_date_format_is_reset() {
        let mut ui = UiConfig {
            date_format: "%d %Q".into(),
            ..UiConfig::default()
        };
        assert_eq!(ui.reset_invalid_date_format().as_deref(), Some("%d %Q"));
        assert_eq!(ui.date_format, "%Y-%m-%d %H:%M");
        assert_eq!(ui.reset_invalid_date_format(), None);
    }
}
