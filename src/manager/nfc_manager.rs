use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use flume::{Receiver, Sender, TrySendError};
use parking_lot::RwLock;
use taglink_ndef::NdefMessage;
use taglink_tokio::task;
use tracing::{debug, error, info, trace, warn};

use crate::{
    activation::{self, ActivityKind},
    build,
    config::NfcConfig,
    session::{
        Detection, NdefTag, NfcPlatform, SessionEvent, SessionIntent, SessionInvalidation,
        SessionOutcome, SessionState, TagSessionHandler,
    },
};

type Message = NfcManagerReconcileMessage;
type Action = NfcManagerAction;
type Reconciler = dyn NfcManagerReconciler;

#[derive(Debug, Clone, Hash, Eq, PartialEq, uniffi::Enum)]
pub enum NfcManagerReconcileMessage {
    /// Result or error of the last scan/write session
    MessageChanged(String),

    /// Summary of the last tag tap that opened the app
    ActivationMessageChanged(String),
}

#[uniffi::export(callback_interface)]
pub trait NfcManagerReconciler: Send + Sync + std::fmt::Debug + 'static {
    /// Tells the frontend to reconcile the manager changes
    fn reconcile(&self, message: Message);
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, uniffi::Enum)]
pub enum NfcManagerAction {
    BeginScan,
    BeginWrite,
}

#[derive(Debug, uniffi::Object)]
pub struct RustNfcManager {
    platform: Arc<dyn NfcPlatform>,
    config: Arc<NfcConfig>,
    next_session_id: AtomicU64,
    pub state: Arc<RwLock<NfcManagerState>>,
    pub reconciler: Sender<Message>,
    pub reconcile_receiver: Arc<Receiver<Message>>,
}

#[derive(Debug, Default)]
pub struct NfcManagerState {
    message: String,
    activation_message: String,

    /// Only one session is active, starting a new one replaces it
    session: Option<ActiveSession>,
}

#[derive(Debug, Clone)]
struct ActiveSession {
    id: u64,
    handler: TagSessionHandler,
}

#[uniffi::export(async_runtime = "tokio")]
impl RustNfcManager {
    #[uniffi::constructor(default(config = None))]
    pub fn new(platform: Arc<dyn NfcPlatform>, config: Option<NfcConfig>) -> Self {
        let (sender, receiver) = flume::bounded(1000);

        info!(
            "nfc manager starting, version {} ({}, {})",
            build::version(),
            build::git_short_hash(),
            build::profile()
        );

        Self {
            platform,
            config: Arc::new(config.unwrap_or_default()),
            next_session_id: AtomicU64::new(0),
            state: Arc::new(RwLock::new(NfcManagerState::default())),
            reconciler: sender,
            reconcile_receiver: Arc::new(receiver),
        }
    }

    /// One time setup, called by the frontend once the app launched
    ///
    /// Registers the runtime this future is polled on, so tasks spawned later from
    /// foreign threads land on it
    #[uniffi::method]
    pub async fn init_on_start(&self) {
        crate::logging::init();
        taglink_tokio::init();

        debug!("runtime registered: {}", taglink_tokio::is_tokio_initialized());
    }

    #[uniffi::method]
    pub fn message(&self) -> String {
        self.state.read().message.clone()
    }

    #[uniffi::method]
    pub fn activation_message(&self) -> String {
        self.state.read().activation_message.clone()
    }

    /// State of the current session, `None` before the first session
    #[uniffi::method]
    pub fn session_state(&self) -> Option<SessionState> {
        let state = self.state.read();
        state.session.as_ref().map(|session| session.handler.state())
    }

    /// Platform reported tags for a session
    #[uniffi::method]
    pub fn tags_detected(self: Arc<Self>, session_id: u64, tags: Vec<Arc<dyn NdefTag>>) {
        task::spawn(async move {
            self.handle_event(session_id, SessionEvent::TagsDetected(tags))
                .await;
        });
    }

    /// Platform invalidated a session
    #[uniffi::method]
    pub fn session_invalidated(self: Arc<Self>, session_id: u64, reason: SessionInvalidation) {
        task::spawn(async move {
            self.handle_event(session_id, SessionEvent::Invalidated(reason))
                .await;
        });
    }

    /// Message delivered with an app activation
    #[uniffi::method]
    pub fn process_activation(self: Arc<Self>, kind: ActivityKind, message: NdefMessage) {
        let Some(summary) = activation::process_user_activity(&kind, &message) else {
            return;
        };

        self.state.write().activation_message = summary.clone();
        self.send(Message::ActivationMessageChanged(summary));
    }

    // MARK: boilerplate

    #[uniffi::method]
    pub fn listen_for_updates(&self, reconciler: Box<Reconciler>) {
        let reconcile_receiver = self.reconcile_receiver.clone();

        task::spawn(async move {
            while let Ok(message) = reconcile_receiver.recv_async().await {
                trace!("reconcile_receiver: {message:?}");
                reconciler.reconcile(message);
            }
        });
    }

    /// Action from the frontend to change the state of the manager
    #[uniffi::method]
    pub fn dispatch(self: Arc<Self>, action: Action) {
        match action {
            Action::BeginScan => self.begin_session(SessionIntent::Scan),
            Action::BeginWrite => self.begin_session(SessionIntent::Write),
        };
    }
}

impl RustNfcManager {
    /// Start a new platform session, returns its id
    pub fn begin_session(&self, intent: SessionIntent) -> Option<u64> {
        if !self.platform.reading_available() {
            warn!("This device doesn't support tag scanning.");
            return None;
        }

        let session_id = self.next_session_id.fetch_add(1, Ordering::Relaxed) + 1;
        let prompt = match intent {
            SessionIntent::Scan => self.config.scan_prompt.clone(),
            SessionIntent::Write => self.config.write_prompt.clone(),
        };

        let session = self.platform.begin_session(session_id, prompt);
        let handler = TagSessionHandler::new(session, intent, self.config.clone());

        let active = ActiveSession {
            id: session_id,
            handler,
        };

        let previous = self.state.write().session.replace(active);
        if let Some(previous) = previous {
            debug!("session {} replaced by session {session_id}", previous.id);
            previous.handler.supersede();
        }

        info!("began {intent} session {session_id}");
        Some(session_id)
    }

    /// Feed a platform event to the session it belongs to and publish the result
    pub async fn handle_event(self: &Arc<Self>, session_id: u64, event: SessionEvent) -> SessionOutcome {
        let Some(handler) = self.handler_for(session_id) else {
            return SessionOutcome::Ignored;
        };

        let outcome = match event {
            SessionEvent::TagsDetected(tags) => match handler.detect(tags) {
                Detection::Single(tag) => {
                    self.set_message(String::new());
                    handler.process_tag(tag).await
                }
                Detection::Done(outcome) => outcome,
            },

            SessionEvent::Invalidated(reason) => handler.invalidated(reason),
        };

        debug!("session {session_id} outcome: {outcome:?}");
        match &outcome {
            SessionOutcome::Read { message } => self.set_message(message.clone()),
            SessionOutcome::Invalidated {
                message: Some(message),
            } => self.set_message(message.clone()),
            _ => {}
        }

        outcome
    }

    fn handler_for(&self, session_id: u64) -> Option<TagSessionHandler> {
        let state = self.state.read();
        match &state.session {
            Some(session) if session.id == session_id => Some(session.handler.clone()),
            Some(session) => {
                warn!(
                    "event for session {session_id}, but session {} is active, ignoring",
                    session.id
                );
                None
            }
            None => {
                warn!("event for session {session_id}, but no session is active, ignoring");
                None
            }
        }
    }

    fn set_message(self: &Arc<Self>, message: String) {
        self.state.write().message = message.clone();
        self.send(Message::MessageChanged(message));
    }

    fn send(self: &Arc<Self>, message: Message) {
        debug!("send: {message:?}");
        match self.reconciler.try_send(message) {
            Ok(_) => {}
            Err(TrySendError::Full(message)) => {
                warn!("[WARN] unable to send, queue is full, sending async");

                let me = self.clone();
                task::spawn(async move { me.send_async(message).await });
            }
            Err(e) => {
                error!("unable to send message to nfc manager: {e:?}");
            }
        }
    }

    async fn send_async(self: &Arc<Self>, message: Message) {
        debug!("send_async: {message:?}");
        if let Err(err) = self.reconciler.send_async(message).await {
            error!("unable to send message to nfc manager: {err}");
        }
    }
}
