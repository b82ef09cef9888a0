//! What the host NFC framework provides, implemented on the foreign side

use std::sync::Arc;

use taglink_ndef::NdefMessage;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, derive_more::Display, uniffi::Enum)]
pub enum NdefStatus {
    NotSupported,
    ReadOnly,
    ReadWrite,
    /// A status this build does not know about
    Unrecognized,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum PlatformError {
    #[error("unable to connect to tag: {0}")]
    Connect(String),

    #[error("unable to query ndef status: {0}")]
    QueryStatus(String),

    #[error("unable to read ndef message: {0}")]
    Read(String),

    #[error("unable to write ndef message: {0}")]
    Write(String),

    #[error("unexpected platform error: {0}")]
    Unexpected(String),
}

impl From<uniffi::UnexpectedUniFFICallbackError> for PlatformError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::Unexpected(error.reason)
    }
}

/// A tag found while polling
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait NdefTag: Send + Sync + std::fmt::Debug + 'static {
    async fn query_ndef_status(&self) -> Result<NdefStatus, PlatformError>;
    async fn read_ndef(&self) -> Result<NdefMessage, PlatformError>;
    async fn write_ndef(&self, message: NdefMessage) -> Result<(), PlatformError>;
}

/// One polling session, terminates after the first tag is handled, an error, or a cancel
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait NfcReaderSession: Send + Sync + std::fmt::Debug + 'static {
    /// Message shown on the system scanning sheet
    fn set_alert_message(&self, message: String);

    fn restart_polling(&self);

    fn invalidate(&self);

    fn invalidate_with_error(&self, message: String);

    async fn connect(&self, tag: Arc<dyn NdefTag>) -> Result<(), PlatformError>;
}

#[uniffi::export(with_foreign)]
pub trait NfcPlatform: Send + Sync + std::fmt::Debug + 'static {
    /// Whether this device can scan tags at all
    fn reading_available(&self) -> bool;

    /// Start polling, events for this session must be reported with `session_id`
    fn begin_session(&self, session_id: u64, alert_message: String) -> Arc<dyn NfcReaderSession>;
}
