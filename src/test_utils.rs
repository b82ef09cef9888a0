//! In-process stand-ins for the platform NFC objects

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use parking_lot::Mutex;
use taglink_ndef::NdefMessage;

use crate::session::{NdefStatus, NdefTag, NfcPlatform, NfcReaderSession, PlatformError};

#[derive(Debug, Default)]
pub struct FakeSession {
    alerts: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    restarts: AtomicUsize,
    invalidations: AtomicUsize,
    connects: AtomicUsize,
    fail_connect: AtomicBool,
}

impl FakeSession {
    pub fn fail_connect(&self) {
        self.fail_connect.store(true, Ordering::SeqCst);
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    pub fn restarts(&self) -> usize {
        self.restarts.load(Ordering::SeqCst)
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl NfcReaderSession for FakeSession {
    fn set_alert_message(&self, message: String) {
        self.alerts.lock().push(message);
    }

    fn restart_polling(&self) {
        self.restarts.fetch_add(1, Ordering::SeqCst);
    }

    fn invalidate(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
    }

    fn invalidate_with_error(&self, message: String) {
        self.errors.lock().push(message);
        self.invalidations.fetch_add(1, Ordering::SeqCst);
    }

    async fn connect(&self, _tag: Arc<dyn NdefTag>) -> Result<(), PlatformError> {
        self.connects.fetch_add(1, Ordering::SeqCst);

        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(PlatformError::Connect("tag moved out of range".to_string()));
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct FakeTag {
    status: Result<NdefStatus, PlatformError>,
    message: NdefMessage,
    fail_io: bool,
    reads: AtomicUsize,
    writes: Mutex<Vec<NdefMessage>>,
}

impl FakeTag {
    pub fn with_status(status: Result<NdefStatus, PlatformError>) -> Self {
        Self {
            status,
            message: NdefMessage::default(),
            fail_io: false,
            reads: AtomicUsize::new(0),
            writes: Mutex::new(vec![]),
        }
    }

    pub fn read_write(message: NdefMessage) -> Self {
        Self {
            message,
            ..Self::with_status(Ok(NdefStatus::ReadWrite))
        }
    }

    pub fn read_only(message: NdefMessage) -> Self {
        Self {
            message,
            ..Self::with_status(Ok(NdefStatus::ReadOnly))
        }
    }

    /// Reads and writes fail
    pub fn failing_io(self) -> Self {
        Self {
            fail_io: true,
            ..self
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> Vec<NdefMessage> {
        self.writes.lock().clone()
    }
}

#[async_trait::async_trait]
impl NdefTag for FakeTag {
    async fn query_ndef_status(&self) -> Result<NdefStatus, PlatformError> {
        self.status.clone()
    }

    async fn read_ndef(&self) -> Result<NdefMessage, PlatformError> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        if self.fail_io {
            return Err(PlatformError::Read("tag connection lost".to_string()));
        }

        Ok(self.message.clone())
    }

    async fn write_ndef(&self, message: NdefMessage) -> Result<(), PlatformError> {
        if self.fail_io {
            return Err(PlatformError::Write("tag connection lost".to_string()));
        }

        self.writes.lock().push(message);
        Ok(())
    }
}

#[derive(Debug)]
pub struct FakePlatform {
    reading_available: bool,
    sessions: Mutex<Vec<(u64, String, Arc<FakeSession>)>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            reading_available: true,
            sessions: Mutex::new(vec![]),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            reading_available: false,
            ..Self::new()
        }
    }

    /// Every session begun so far: id, alert message, session
    pub fn sessions(&self) -> Vec<(u64, String, Arc<FakeSession>)> {
        self.sessions.lock().clone()
    }

    pub fn last_session(&self) -> Option<(u64, Arc<FakeSession>)> {
        let sessions = self.sessions.lock();
        let (id, _, session) = sessions.last()?;
        Some((*id, session.clone()))
    }
}

impl NfcPlatform for FakePlatform {
    fn reading_available(&self) -> bool {
        self.reading_available
    }

    fn begin_session(&self, session_id: u64, alert_message: String) -> Arc<dyn NfcReaderSession> {
        let session = Arc::new(FakeSession::default());
        self.sessions
            .lock()
            .push((session_id, alert_message, session.clone()));

        session
    }
}
