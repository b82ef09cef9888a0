//! Settings for tag sessions, with defaults matching the shipped app

use std::time::Duration;

use serde::{Deserialize, Serialize};
use taglink_util::ResultExt as _;

#[derive(Debug, Clone, Hash, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum ConfigError {
    #[error("unable to parse config: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct NfcConfig {
    /// Delay before polling restarts after a multi tag or no tag detection
    pub retry_interval_ms: u64,

    /// Alert shown while a scan session is polling
    pub scan_prompt: String,

    /// Alert shown while a write session is polling
    pub write_prompt: String,

    /// URI written into the well known record of outgoing messages
    pub write_uri: String,

    pub id_label: String,
    pub favorite_label: String,

    /// MIME type of the JSON media record
    pub media_type: String,
}

impl Default for NfcConfig {
    fn default() -> Self {
        Self {
            retry_interval_ms: 500,
            scan_prompt: "Get Closer to the Tag to Scan!".to_string(),
            write_prompt: "Get Closer to the Tag to Write!".to_string(),
            write_uri: "https://852b-1-21-115-205.ngrok-free.app".to_string(),
            id_label: "itsuki in ".to_string(),
            favorite_label: "Pikachu x ".to_string(),
            media_type: taglink_ndef::JSON_MEDIA_TYPE.to_string(),
        }
    }
}

impl NfcConfig {
    /// Missing fields fall back to their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err_str(ConfigError::Parse)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }
}

mod ffi {
    use super::*;

    #[uniffi::export]
    fn nfc_config_default() -> NfcConfig {
        NfcConfig::default()
    }

    #[uniffi::export]
    fn nfc_config_from_json(json: String) -> Result<NfcConfig, ConfigError> {
        NfcConfig::from_json(&json)
    }
}
