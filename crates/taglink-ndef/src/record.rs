use tracing::debug;

use crate::{
    error::RecordError,
    ndef_type::NdefType,
    parser,
    payload::{
        TEXT_RECORD_TYPE, TextPayload, URI_RECORD_TYPE, encode_text_payload, encode_uri_payload,
    },
};

type Result<T, E = RecordError> = std::result::Result<T, E>;

/// A single record of a NDEF message, as handed over by the platform
#[derive(Debug, Clone, Hash, PartialEq, Eq, uniffi::Record)]
pub struct NdefRecord {
    pub type_name_format: NdefType,
    pub type_: Vec<u8>,
    pub id: Vec<u8>,
    pub payload: Vec<u8>,
}

impl NdefRecord {
    pub fn new(type_name_format: NdefType, type_: Vec<u8>, id: Vec<u8>, payload: Vec<u8>) -> Self {
        Self {
            type_name_format,
            type_,
            id,
            payload,
        }
    }

    pub fn empty() -> Self {
        Self::new(NdefType::Empty, vec![], vec![], vec![])
    }

    /// Media type record, with an empty identifier
    pub fn mime(mime_type: &str, payload: Vec<u8>) -> Result<Self> {
        validate_mime_type(mime_type)?;
        Ok(Self::new(
            NdefType::Mime,
            mime_type.as_bytes().to_vec(),
            vec![],
            payload,
        ))
    }

    /// Well known URI record, the uri is validated but stored as given
    pub fn well_known_uri(uri: &str) -> Result<Self> {
        url::Url::parse(uri).map_err(|error| RecordError::InvalidUri(format!("{uri}: {error}")))?;

        Ok(Self::new(
            NdefType::WellKnown,
            URI_RECORD_TYPE.to_vec(),
            vec![],
            encode_uri_payload(uri),
        ))
    }

    /// Well known text record, UTF-8 encoded
    pub fn well_known_text(text: &str, locale: &str) -> Result<Self> {
        if locale.len() > 0b0011_1111 {
            return Err(RecordError::LanguageTooLong(locale.len() as u64));
        }

        Ok(Self::new(
            NdefType::WellKnown,
            TEXT_RECORD_TYPE.to_vec(),
            vec![],
            encode_text_payload(text, locale),
        ))
    }

    pub fn absolute_uri(uri: &str) -> Result<Self> {
        url::Url::parse(uri).map_err(|error| RecordError::InvalidUri(format!("{uri}: {error}")))?;

        if uri.len() > u8::MAX as usize {
            return Err(RecordError::TypeTooLong(uri.len() as u64));
        }

        // the uri is the record type, the payload carries it as well so readers
        // that only look at the payload still see it
        Ok(Self::new(
            NdefType::AbsoluteUri,
            uri.as_bytes().to_vec(),
            vec![],
            uri.as_bytes().to_vec(),
        ))
    }

    /// The URI of a well known URI record, `None` for any other record
    pub fn well_known_uri_payload(&self) -> Option<String> {
        if !self.is_well_known(URI_RECORD_TYPE) {
            return None;
        }

        let uri = parser::parse_uri_payload(&mut parser::new(&self.payload))
            .inspect_err(|error| debug!("unable to parse uri payload: {error:?}"))
            .ok()?;

        // kept as written on the tag, parsing would normalise it
        match url::Url::parse(&uri) {
            Ok(_) => Some(uri),
            Err(error) => {
                debug!("uri payload is not a valid url {uri:?}: {error}");
                None
            }
        }
    }

    /// The text and locale of a well known text record, `(None, None)` for any other record
    pub fn well_known_text_payload(&self) -> (Option<String>, Option<String>) {
        match self.text_payload() {
            Some(text) => (Some(text.text), Some(text.language)),
            None => (None, None),
        }
    }

    pub fn text_payload(&self) -> Option<TextPayload> {
        if !self.is_well_known(TEXT_RECORD_TYPE) {
            return None;
        }

        parser::parse_text_payload(&mut parser::new(&self.payload))
            .inspect_err(|error| debug!("unable to parse text payload: {error:?}"))
            .ok()
    }

    pub fn payload_utf8(&self) -> Option<String> {
        String::from_utf8(self.payload.clone()).ok()
    }

    pub fn mime_type(&self) -> Option<String> {
        if self.type_name_format != NdefType::Mime {
            return None;
        }

        String::from_utf8(self.type_.clone()).ok()
    }

    fn is_well_known(&self, record_type: &[u8]) -> bool {
        self.type_name_format == NdefType::WellKnown && self.type_ == record_type
    }
}

fn validate_mime_type(mime_type: &str) -> Result<()> {
    let invalid = || RecordError::InvalidMimeType(mime_type.to_string());

    if mime_type.len() > u8::MAX as usize {
        return Err(RecordError::TypeTooLong(mime_type.len() as u64));
    }

    if !mime_type.is_ascii() || mime_type.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    match mime_type.split_once('/') {
        Some((type_, subtype)) if !type_.is_empty() && !subtype.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

// only used for uniffi
mod ffi {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, uniffi::Object)]
    pub struct NdefRecordReader {
        record: NdefRecord,
    }

    #[uniffi::export]
    impl NdefRecordReader {
        #[uniffi::constructor]
        pub fn new(record: NdefRecord) -> Self {
            Self { record }
        }

        pub fn type_(&self) -> Option<String> {
            String::from_utf8(self.record.type_.clone()).ok()
        }

        pub fn id(&self) -> Option<String> {
            if self.record.id.is_empty() {
                return None;
            }

            String::from_utf8(self.record.id.clone()).ok()
        }

        pub fn uri(&self) -> Option<String> {
            self.record.well_known_uri_payload()
        }

        pub fn text(&self) -> Option<TextPayload> {
            self.record.text_payload()
        }

        pub fn description(&self) -> String {
            self.record.type_name_format.to_string()
        }
    }

    #[uniffi::export]
    fn new_uri_record(uri: String) -> Result<NdefRecord, RecordError> {
        NdefRecord::well_known_uri(&uri)
    }

    #[uniffi::export]
    fn new_text_record(text: String, locale: String) -> Result<NdefRecord, RecordError> {
        NdefRecord::well_known_text(&text, &locale)
    }

    #[uniffi::export]
    fn new_mime_record(mime_type: String, payload: Vec<u8>) -> Result<NdefRecord, RecordError> {
        NdefRecord::mime(&mime_type, payload)
    }
}
