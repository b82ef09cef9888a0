//! Messages delivered by the OS when a tag is tapped outside the app

use tracing::{debug, warn};

use taglink_ndef::NdefMessage;

use crate::codec;

/// Kind of user activity the message arrived with
#[derive(Debug, Clone, Hash, PartialEq, Eq, uniffi::Enum)]
pub enum ActivityKind {
    /// Universal link activation, the only kind that carries a tag message
    BrowsingWeb,
    Other(String),
}

/// Summary to show for an activation message, `None` means leave the current message alone
///
/// Parse failures are swallowed and shown as an empty summary
pub fn process_activation(message: &NdefMessage) -> Option<String> {
    if !message.has_content() {
        debug!("activation message has no usable records, ignoring");
        return None;
    }

    let summary = codec::parse_incoming_message(message)
        .inspect_err(|error| warn!("unable to parse activation message: {error}"))
        .unwrap_or_default();

    Some(summary)
}

pub fn process_user_activity(kind: &ActivityKind, message: &NdefMessage) -> Option<String> {
    match kind {
        ActivityKind::BrowsingWeb => process_activation(message),
        ActivityKind::Other(kind) => {
            debug!("ignoring activity of kind {kind}");
            None
        }
    }
}
