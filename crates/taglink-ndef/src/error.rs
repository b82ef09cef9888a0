#[derive(Debug, Clone, Hash, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum RecordError {
    #[error("invalid mime type: {0}")]
    InvalidMimeType(String),

    #[error("invalid uri: {0}")]
    InvalidUri(String),

    /// Record type lengths are a single byte in the record header
    #[error("record type is too long, max 255 bytes, found {0}")]
    TypeTooLong(u64),

    /// Text records store the language length in the low 6 bits of the status byte
    #[error("language code is too long, max 63 bytes, found {0}")]
    LanguageTooLong(u64),
}
