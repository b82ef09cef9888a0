use rand::Rng as _;
use serde::{Deserialize, Serialize};
use taglink_util::ResultExt as _;

use super::CodecError;
use crate::config::NfcConfig;

/// The JSON payload of the media record, snake_case on the wire in both directions
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "snake_case")]
pub struct FavoriteRecord {
    pub id: String,
    pub favorite: String,
}

impl FavoriteRecord {
    pub fn new(id: impl Into<String>, favorite: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            favorite: favorite.into(),
        }
    }

    /// Fresh record for a write: labelled timestamp and a lucky number in `1..100`
    pub fn generate(config: &NfcConfig) -> Self {
        let now = jiff::Timestamp::now();
        let lucky_number = rand::rng().random_range(1..100);

        Self::new(
            format!("{}{now}!", config.id_label),
            format!("{}{lucky_number}", config.favorite_label),
        )
    }

    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(self).map_err_str(CodecError::Encode)
    }

    pub fn decode(payload: &[u8]) -> Result<Self, CodecError> {
        serde_json::from_slice(payload).map_err_str(CodecError::Decode)
    }
}
