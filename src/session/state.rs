use std::sync::Arc;

use derive_more::Display;

use super::platform::NdefTag;

/// What a session was started for, fixed for the whole session
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Display, uniffi::Enum)]
pub enum SessionIntent {
    Scan,
    Write,
}

#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Display, uniffi::Enum)]
pub enum SessionState {
    #[default]
    Idle,
    TagsDetected,
    Retrying,
    Connecting,
    Reading,
    Writing,
    Advising,
    Terminated,
}

/// Why the platform invalidated a session
#[derive(Debug, Clone, Hash, PartialEq, Eq, uniffi::Enum)]
pub enum SessionInvalidation {
    /// Normal end of a session after the first tag was handled
    FirstTagRead,
    UserCanceled,
    Other(String),
}

/// The two things a platform session reports
#[derive(Debug, Clone)]
pub enum SessionEvent {
    TagsDetected(Vec<Arc<dyn NdefTag>>),
    Invalidated(SessionInvalidation),
}

/// Result of handling one event
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Event arrived after the session was terminated
    Ignored,

    /// Polling restarts after the retry interval, session stays alive
    Retry { alert: String },

    /// Nothing was read or written, the user was told why
    Advisory { alert: String },

    /// Summary of the message read from the tag
    Read { message: String },

    Written,

    Failed { alert: String },

    /// Message to publish, if any
    Invalidated { message: Option<String> },
}

/// Single tag to work on, or the outcome when there isn't one
#[derive(Debug, Clone)]
pub enum Detection {
    Single(Arc<dyn NdefTag>),
    Done(SessionOutcome),
}
