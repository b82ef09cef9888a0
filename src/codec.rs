//! Building the message written to tags and summarising messages read from them

mod favorite;

use tracing::{debug, warn};

use taglink_ndef::{NdefMessage, NdefRecord, NdefType, RecordError};

use crate::config::NfcConfig;

pub use favorite::FavoriteRecord;

#[derive(Debug, Clone, Hash, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum CodecError {
    #[error("unable to create record: {0}")]
    RecordCreation(#[from] RecordError),

    #[error("unable to encode json payload: {0}")]
    Encode(String),

    #[error("unable to decode json payload: {0}")]
    Decode(String),
}

pub type Error = CodecError;
type Result<T, E = Error> = std::result::Result<T, E>;

/// Build the two record message written to tags, with a freshly generated payload
pub fn build_outgoing_message(config: &NfcConfig) -> Result<NdefMessage> {
    let favorite = FavoriteRecord::generate(config);
    build_message_for(&favorite, config)
}

/// Well known URI record followed by the JSON media record
pub fn build_message_for(favorite: &FavoriteRecord, config: &NfcConfig) -> Result<NdefMessage> {
    let data = favorite.encode()?;
    debug!("outgoing payload: {}", String::from_utf8_lossy(&data));

    let payload_url = NdefRecord::well_known_uri(&config.write_uri)?;
    let payload_data = NdefRecord::mime(&config.media_type, data)?;

    Ok(NdefMessage::new(vec![payload_url, payload_data]))
}

/// Summarise every record of the message, in order
///
/// An empty string means nothing to show. A media record that does not decode
/// fails the whole message, no partial summary is returned
pub fn parse_incoming_message(message: &NdefMessage) -> Result<String> {
    let mut summary = String::new();

    for record in message {
        debug!("record: {}", record.type_name_format);

        match record.type_name_format {
            NdefType::WellKnown => {
                if let Some(url) = record.well_known_uri_payload() {
                    summary.push_str(&format!("url: {url}. "));
                }

                if let (Some(text), Some(locale)) = record.well_known_text_payload() {
                    summary.push_str(&format!("Text: {text} with Locale: {locale}. "));
                }
            }

            NdefType::AbsoluteUri => {
                if let Some(text) = record.payload_utf8() {
                    summary.push_str(&format!("absoluteURI: {text}. "));
                }
            }

            NdefType::Mime => {
                debug!("media type: {:?}", record.mime_type());

                let favorite = FavoriteRecord::decode(&record.payload)
                    .inspect_err(|error| warn!("decode failed: {error}"))?;

                summary.push_str(&format!(
                    "Json Data: {} loves {}. ",
                    favorite.id, favorite.favorite
                ));
            }

            NdefType::External
            | NdefType::Empty
            | NdefType::Unknown
            | NdefType::Unchanged
            | NdefType::Reserved => continue,
        }
    }

    Ok(summary)
}

mod ffi {
    use super::*;

    #[uniffi::export]
    fn parse_ndef_message(message: NdefMessage) -> Result<String, CodecError> {
        parse_incoming_message(&message)
    }

    #[uniffi::export]
    fn build_ndef_message(config: NfcConfig) -> Result<NdefMessage, CodecError> {
        build_outgoing_message(&config)
    }

    #[uniffi::export]
    fn ndef_type_description(ndef_type: NdefType) -> String {
        ndef_type.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn json_record(json: &str) -> NdefRecord {
        NdefRecord::mime("application/json", json.as_bytes().to_vec()).unwrap()
    }

    fn record(type_name_format: NdefType) -> NdefRecord {
        NdefRecord::new(type_name_format, b"x".to_vec(), vec![], b"payload".to_vec())
    }

    #[test]
    fn outgoing_message_has_uri_and_json_records() {
        let config = NfcConfig::default();
        let message = build_outgoing_message(&config).unwrap();
        assert_eq!(message.len(), 2);

        let uri = &message.records[0];
        assert_eq!(uri.type_name_format, NdefType::WellKnown);
        assert_eq!(uri.well_known_uri_payload(), Some(config.write_uri.clone()));

        let json = &message.records[1];
        assert_eq!(json.mime_type().as_deref(), Some("application/json"));
        assert!(json.id.is_empty());

        let favorite = FavoriteRecord::decode(&json.payload).unwrap();
        assert!(favorite.favorite.starts_with("Pikachu x "));
    }

    #[test]
    fn outgoing_message_with_bad_uri_fails() {
        let config = NfcConfig {
            write_uri: "definitely not a uri".to_string(),
            ..NfcConfig::default()
        };

        let error = build_outgoing_message(&config).unwrap_err();
        assert!(matches!(
            error,
            CodecError::RecordCreation(RecordError::InvalidUri(_))
        ));
    }

    #[test]
    fn outgoing_message_with_bad_media_type_fails() {
        let config = NfcConfig {
            media_type: "json".to_string(),
            ..NfcConfig::default()
        };

        let error = build_outgoing_message(&config).unwrap_err();
        assert!(matches!(
            error,
            CodecError::RecordCreation(RecordError::InvalidMimeType(_))
        ));
    }

    #[test]
    fn round_trip_recovers_payload() {
        let config = NfcConfig::default();
        let favorite = FavoriteRecord::new("itsuki in 2024-06-16!", "Pikachu x 42");

        let message = build_message_for(&favorite, &config).unwrap();
        let summary = parse_incoming_message(&message).unwrap();

        assert_eq!(
            summary,
            format!(
                "url: {}. Json Data: itsuki in 2024-06-16! loves Pikachu x 42. ",
                config.write_uri
            )
        );
    }

    #[test]
    fn round_trip_escapes_json() {
        let config = NfcConfig::default();
        let favorite = FavoriteRecord::new(r#"say "hi" \ later"#, "ピカチュウ ⚡ é");

        let message = build_message_for(&favorite, &config).unwrap();
        assert_eq!(FavoriteRecord::decode(&message.records[1].payload).unwrap(), favorite);

        let summary = parse_incoming_message(&message).unwrap();
        assert_eq!(
            summary,
            format!(
                r#"url: {}. Json Data: say "hi" \ later loves ピカチュウ ⚡ é. "#,
                config.write_uri
            )
        );
    }

    #[test]
    fn uri_records_that_are_not_urls_add_nothing() {
        let mut spaced = vec![0x04];
        spaced.extend_from_slice(b"a b");

        let message = NdefMessage::new(vec![
            NdefRecord::new(NdefType::WellKnown, b"U".to_vec(), vec![], vec![0x00]),
            NdefRecord::new(NdefType::WellKnown, b"U".to_vec(), vec![], spaced),
            NdefRecord::well_known_uri("https://x").unwrap(),
        ]);

        assert_eq!(parse_incoming_message(&message).unwrap(), "url: https://x. ");
    }

    #[test]
    fn empty_message_is_empty_string() {
        let summary = parse_incoming_message(&NdefMessage::default()).unwrap();
        assert_eq!(summary, "");
    }

    #[test]
    fn records_without_fragments_are_empty_string() {
        let message = NdefMessage::new(vec![
            record(NdefType::External),
            record(NdefType::Unknown),
            record(NdefType::Unchanged),
            record(NdefType::Empty),
            record(NdefType::Reserved),
        ]);

        assert_eq!(parse_incoming_message(&message).unwrap(), "");
    }

    #[test]
    fn invalid_json_fails_whole_message() {
        let message = NdefMessage::new(vec![
            NdefRecord::well_known_uri("https://x").unwrap(),
            json_record("not json"),
            NdefRecord::well_known_text("hello", "en").unwrap(),
        ]);

        let error = parse_incoming_message(&message).unwrap_err();
        assert!(matches!(error, CodecError::Decode(_)));
    }

    #[test]
    fn wrong_json_shape_fails() {
        let message = NdefMessage::new(vec![json_record(r#"{"name":"a"}"#)]);
        assert!(parse_incoming_message(&message).is_err());
    }

    #[test]
    fn scan_example_message() {
        let message = NdefMessage::new(vec![
            NdefRecord::well_known_uri("https://x").unwrap(),
            json_record(r#"{"id":"a","favorite":"b"}"#),
        ]);

        let summary = parse_incoming_message(&message).unwrap();
        assert_eq!(summary, "url: https://x. Json Data: a loves b. ");
    }

    #[test]
    fn text_and_absolute_uri_fragments_in_record_order() {
        let message = NdefMessage::new(vec![
            NdefRecord::well_known_text("hello", "en").unwrap(),
            NdefRecord::absolute_uri("https://example.com/a").unwrap(),
            record(NdefType::External),
            NdefRecord::well_known_uri("tel:123").unwrap(),
        ]);

        let summary = parse_incoming_message(&message).unwrap();
        assert_eq!(
            summary,
            "Text: hello with Locale: en. absoluteURI: https://example.com/a. url: tel:123. "
        );
    }

    #[test]
    fn absolute_uri_with_invalid_utf8_is_skipped() {
        let message = NdefMessage::new(vec![NdefRecord::new(
            NdefType::AbsoluteUri,
            vec![],
            vec![],
            vec![0xC3, 0x28],
        )]);

        assert_eq!(parse_incoming_message(&message).unwrap(), "");
    }

    #[test]
    fn well_known_record_of_other_type_contributes_nothing() {
        let message = NdefMessage::new(vec![NdefRecord::new(
            NdefType::WellKnown,
            b"Sp".to_vec(),
            vec![],
            vec![0x01, 0x02],
        )]);

        assert_eq!(parse_incoming_message(&message).unwrap(), "");
    }
}
