//! Fakes shared by the session unit tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::backend::{AuthBackend, AuthResponse, Credentials, RegistrationProfile, classify_response};
use crate::error::{BackendError, StorageError};
use crate::routes::Navigator;
use crate::storage::SessionStorage;

pub(crate) type Reply = Result<AuthResponse, BackendError>;

/// Build a reply the way the HTTP backend would from a status and body.
pub(crate) fn http_reply(status: u16, body: &str) -> Reply {
    classify_response(status, body)
}

pub(crate) fn doctor_reply() -> Reply {
    http_reply(
        200,
        r#"{"_id":"1","firstName":"A","lastName":"B","email":"doctor@example.com","role":"doctor","token":"abc"}"#,
    )
}

pub(crate) fn patient_reply(token: &str, patient_id: Option<&str>) -> Reply {
    let body = serde_json::json!({
        "_id": "2",
        "firstName": "Sara",
        "lastName": "Khan",
        "email": "patient@example.com",
        "role": "patient",
        "token": token,
        "patientId": patient_id,
    });
    http_reply(200, &body.to_string())
}

// =============================================================================
// Backends
// =============================================================================

/// Answers each call with the next queued reply and counts calls.
#[derive(Clone, Default)]
pub(crate) struct ScriptedBackend {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedBackend {
    pub(crate) fn with_replies(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self { replies: Arc::new(Mutex::new(replies.into_iter().collect())), calls: Arc::default() }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, call: String) -> Reply {
        self.calls.lock().unwrap().push(call);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted reply".to_owned())))
    }
}

#[async_trait(?Send)]
impl AuthBackend for ScriptedBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, BackendError> {
        self.next(format!("login:{}", credentials.email))
    }

    async fn register(&self, profile: &RegistrationProfile) -> Result<AuthResponse, BackendError> {
        self.next(format!("register:{}", profile.email))
    }
}

/// Each call waits on the next gate; the test decides when and in which order
/// gates open.
#[derive(Clone, Default)]
pub(crate) struct GatedBackend {
    gates: Arc<Mutex<VecDeque<oneshot::Receiver<Reply>>>>,
}

impl GatedBackend {
    pub(crate) fn gate(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    async fn wait(&self) -> Reply {
        let gate = self.gates.lock().unwrap().pop_front();
        match gate {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(BackendError::Transport("gate dropped".to_owned()))),
            None => Err(BackendError::Transport("no gate".to_owned())),
        }
    }
}

#[async_trait(?Send)]
impl AuthBackend for GatedBackend {
    async fn login(&self, _credentials: &Credentials) -> Result<AuthResponse, BackendError> {
        self.wait().await
    }

    async fn register(&self, _profile: &RegistrationProfile) -> Result<AuthResponse, BackendError> {
        self.wait().await
    }
}

// =============================================================================
// Storage
// =============================================================================

/// In-memory storage; clones share the same map to simulate a page reload.
#[derive(Clone, Default)]
pub(crate) struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
    failing_keys: Arc<Mutex<HashSet<String>>>,
}

impl MemoryStorage {
    pub(crate) fn seeded(pairs: &[(&str, &str)]) -> Self {
        let storage = Self::default();
        for (key, value) in pairs {
            storage.values.lock().unwrap().insert((*key).to_owned(), (*value).to_owned());
        }
        storage
    }

    pub(crate) fn fail_writes_to(&self, key: &str) {
        self.failing_keys.lock().unwrap().insert(key.to_owned());
    }

    pub(crate) fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.value(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing_keys.lock().unwrap().contains(key) {
            return Err(StorageError::Write { key: key.to_owned(), reason: "quota exceeded".to_owned() });
        }
        self.values.lock().unwrap().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }
}

// =============================================================================
// Navigation
// =============================================================================

#[derive(Clone, Default)]
pub(crate) struct RecordingNavigator {
    visits: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub(crate) fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &str) {
        self.visits.lock().unwrap().push(target.to_owned());
    }
}
