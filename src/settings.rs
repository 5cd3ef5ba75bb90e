//! Timeline settings persisted in `localStorage` as YAML.

use barline_core::TimelineConfig;

pub const CONFIG_STORAGE_KEY: &str = "barline.config";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Stored config when present and valid, defaults otherwise.
pub fn load_config() -> TimelineConfig {
    let stored = storage().and_then(|s| s.get_item(CONFIG_STORAGE_KEY).ok().flatten());
    match stored {
        Some(yaml) => parse_config(&yaml),
        None => {
            log::info!("timeline config: defaults");
            TimelineConfig::default()
        }
    }
}

pub fn parse_config(yaml: &str) -> TimelineConfig {
    match TimelineConfig::from_yaml_str(yaml) {
        Ok(config) => {
            log::info!("timeline config: loaded from localStorage");
            config
        }
        Err(e) => {
            log::warn!("ignoring stored timeline config: {e}");
            TimelineConfig::default()
        }
    }
}

pub fn save_config(config: &TimelineConfig) {
    let yaml = match yaml_serde::to_string(config) {
        Ok(y) => y,
        Err(e) => {
            log::error!("failed to serialize timeline config: {e}");
            return;
        }
    };
    let Some(storage) = storage() else { return };
    if let Err(e) = storage.set_item(CONFIG_STORAGE_KEY, &yaml) {
        log::error!("failed to store timeline config: {:?}", e);
    }
}
