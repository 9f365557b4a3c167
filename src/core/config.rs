use serde::{
    Deserialize,
    Serialize,
};

use super::LexicardError;
use crate::persistence;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gateway_url: String,
    pub request_timeout_secs: u64,
    pub word_list_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway_url: "http://localhost:8787/api/generate-flashcard".to_string(),
            request_timeout_secs: 120,
            word_list_file: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        persistence::load_json_or_default(CONFIG_FILE)
    }

    pub fn save(&self) -> Result<(), LexicardError> {
        persistence::save_json(self, CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.request_timeout_secs, 120);
        assert!(config.word_list_file.is_none());
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let config: AppConfig =
            serde_json::from_str("{\"request_timeout_secs\": 30}").unwrap();
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.gateway_url, AppConfig::default().gateway_url);
    }
}
