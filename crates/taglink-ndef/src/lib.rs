uniffi::setup_scaffolding!();

pub mod error;
pub mod message;
pub mod ndef_type;
pub mod parser;
pub mod payload;
pub mod record;

pub use error::RecordError;
pub use message::NdefMessage;
pub use ndef_type::NdefType;
pub use payload::{TextPayload, TextPayloadFormat};
pub use record::NdefRecord;

/// MIME type of the JSON media record written to tags
pub const JSON_MEDIA_TYPE: &str = "application/json";
