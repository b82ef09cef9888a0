//! Handling of a single polling session: one tag, its NDEF status, then a read or a write

pub mod platform;
pub mod state;

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    codec::{self, CodecError},
    config::NfcConfig,
};

pub use platform::{NdefStatus, NdefTag, NfcPlatform, NfcReaderSession, PlatformError};
pub use state::{
    Detection, SessionEvent, SessionIntent, SessionInvalidation, SessionOutcome, SessionState,
};

pub const MULTIPLE_TAGS_ALERT: &str =
    "More than 1 tag is detected. Please remove all tags and try again.";
pub const NO_TAG_ALERT: &str = "not able to get the first tag, please try again.";
pub const NOT_NDEF_ALERT: &str = "Tag is not NDEF compliant.";
pub const READ_ONLY_ALERT: &str = "Tag is read only.";
pub const UNKNOWN_STATUS_ALERT: &str = "Unknown NDEF tag status.";
pub const FAILED_ALERT: &str = "Failed to read/write tags.";
pub const SUPERSEDED_ERROR: &str = "A new session was started.";

#[derive(Debug, thiserror::Error)]
enum TagError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// State machine for one platform session
///
/// Cheap to clone, clones share the same state
#[derive(Debug, Clone)]
pub struct TagSessionHandler {
    session: Arc<dyn NfcReaderSession>,
    intent: SessionIntent,
    config: Arc<NfcConfig>,
    state: Arc<Mutex<SessionState>>,
}

impl TagSessionHandler {
    pub fn new(
        session: Arc<dyn NfcReaderSession>,
        intent: SessionIntent,
        config: Arc<NfcConfig>,
    ) -> Self {
        Self {
            session,
            intent,
            config,
            state: Arc::new(Mutex::new(SessionState::Idle)),
        }
    }

    pub fn intent(&self) -> SessionIntent {
        self.intent
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    pub fn is_terminated(&self) -> bool {
        self.state() == SessionState::Terminated
    }

    /// Pick the tag to work on, scheduling a polling restart when there isn't exactly one
    pub fn detect(&self, tags: Vec<Arc<dyn NdefTag>>) -> Detection {
        if self.is_terminated() {
            warn!("tags detected after session terminated, ignoring");
            return Detection::Done(SessionOutcome::Ignored);
        }

        self.set_state(SessionState::TagsDetected);

        match tags.as_slice() {
            [tag] => Detection::Single(tag.clone()),
            [] => {
                warn!("not able to get the first tag");
                Detection::Done(self.retry(NO_TAG_ALERT))
            }
            tags => {
                info!("{} tags detected, restarting polling", tags.len());
                Detection::Done(self.retry(MULTIPLE_TAGS_ALERT))
            }
        }
    }

    /// Connect, check the NDEF status, then read or write. Always ends the session
    pub async fn process_tag(&self, tag: Arc<dyn NdefTag>) -> SessionOutcome {
        let outcome = match self.run(tag).await {
            Ok(outcome) => outcome,
            Err(error) => {
                error!("failed with error: {error}");
                self.session.set_alert_message(FAILED_ALERT.to_string());
                SessionOutcome::Failed {
                    alert: FAILED_ALERT.to_string(),
                }
            }
        };

        self.session.invalidate();
        self.set_state(SessionState::Terminated);

        outcome
    }

    /// Translate the platform's invalidation into the message to show, if any
    pub fn invalidated(&self, reason: SessionInvalidation) -> SessionOutcome {
        debug!("session invalidated: {reason:?}");
        self.set_state(SessionState::Terminated);

        let message = match reason {
            SessionInvalidation::FirstTagRead | SessionInvalidation::UserCanceled => None,
            SessionInvalidation::Other(description) => {
                Some(format!("Session invalidate with error: {description}"))
            }
        };

        SessionOutcome::Invalidated { message }
    }

    /// End a session that is still live because a newer one took its place
    pub fn supersede(&self) {
        if self.is_terminated() {
            return;
        }

        info!("{} session superseded, invalidating", self.intent);
        self.session.invalidate_with_error(SUPERSEDED_ERROR.to_string());
        self.set_state(SessionState::Terminated);
    }

    async fn run(&self, tag: Arc<dyn NdefTag>) -> Result<SessionOutcome, TagError> {
        self.set_state(SessionState::Connecting);
        self.session.connect(tag.clone()).await?;

        let status = tag.query_ndef_status().await?;
        debug!("tag status: {status}, intent: {}", self.intent);

        let outcome = match (status, self.intent) {
            (NdefStatus::NotSupported, _) => self.advise(NOT_NDEF_ALERT),
            (NdefStatus::ReadOnly | NdefStatus::ReadWrite, SessionIntent::Scan) => {
                self.read(tag.as_ref()).await?
            }
            (NdefStatus::ReadOnly, SessionIntent::Write) => self.advise(READ_ONLY_ALERT),
            (NdefStatus::ReadWrite, SessionIntent::Write) => self.write(tag.as_ref()).await?,
            (NdefStatus::Unrecognized, _) => self.advise(UNKNOWN_STATUS_ALERT),
        };

        Ok(outcome)
    }

    async fn read(&self, tag: &dyn NdefTag) -> Result<SessionOutcome, TagError> {
        self.set_state(SessionState::Reading);

        let message = tag.read_ndef().await?;
        debug!("read {} records", message.len());

        let message = codec::parse_incoming_message(&message)?;
        Ok(SessionOutcome::Read { message })
    }

    async fn write(&self, tag: &dyn NdefTag) -> Result<SessionOutcome, TagError> {
        self.set_state(SessionState::Writing);

        let message = codec::build_outgoing_message(&self.config)?;
        tag.write_ndef(message).await?;

        info!("message written to tag");
        Ok(SessionOutcome::Written)
    }

    fn advise(&self, alert: &str) -> SessionOutcome {
        self.set_state(SessionState::Advising);
        self.session.set_alert_message(alert.to_string());

        SessionOutcome::Advisory {
            alert: alert.to_string(),
        }
    }

    fn retry(&self, alert: &str) -> SessionOutcome {
        self.set_state(SessionState::Retrying);
        self.session.set_alert_message(alert.to_string());

        // not kept, the restart can't be cancelled once scheduled
        let session = self.session.clone();
        taglink_tokio::task::spawn_after(self.config.retry_interval(), move || {
            session.restart_polling()
        });

        self.set_state(SessionState::Idle);
        SessionOutcome::Retry {
            alert: alert.to_string(),
        }
    }

    fn set_state(&self, state: SessionState) {
        let previous = std::mem::replace(&mut *self.state.lock(), state);
        if previous != state {
            debug!("session state: {previous} -> {state}");
        }
    }
}
