//! Shared test harness for integration tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tempfile::TempDir;

use loglens_api::ApiClient;
use loglens_core::{Identity, RawResponse, Transport, TransportError};
use loglens_session::{SessionManager, SessionVault};
use loglens_storage::FileKvStore;

/// Base URL every harness client points at.
pub const BASE_URL: &str = "http://api.test";

/// One scripted backend reply.
#[allow(dead_code)]
pub enum Reply {
    /// HTTP 200 with a JSON body.
    Json(Value),
    /// An arbitrary status with raw body bytes.
    Raw(u16, Vec<u8>),
    /// No response reaches the client.
    Network,
}

/// One request as the mock backend saw it.
#[allow(dead_code)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
}

/// Route-keyed scripted backend.
///
/// Replies are queued per path and consumed in order; a request for a path
/// with no queued reply fails the test loudly.
pub struct MockBackend {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            routes: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Queue a reply for `path` (e.g. `"/log"`).
    pub fn on(&self, path: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Number of requests seen for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    /// The recorded request at `index`.
    pub fn request(&self, index: usize) -> (String, Vec<(String, String)>) {
        let requests = self.requests.lock().unwrap();
        (requests[index].path.clone(), requests[index].query.clone())
    }

    fn respond(
        &self,
        url: &str,
        query: Vec<(String, String)>,
        bearer: Option<&str>,
    ) -> Result<RawResponse, TransportError> {
        let path = url.strip_prefix(BASE_URL).unwrap_or(url).to_string();
        self.requests.lock().unwrap().push(RecordedRequest {
            path: path.clone(),
            query,
            bearer: bearer.map(ToOwned::to_owned),
        });

        let reply = self
            .routes
            .lock()
            .unwrap()
            .get_mut(&path)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("no scripted reply for {path}"));
        match reply {
            Reply::Json(value) => Ok(RawResponse {
                status: 200,
                body: value.to_string().into_bytes(),
            }),
            Reply::Raw(status, body) => Ok(RawResponse { status, body }),
            Reply::Network => Err(TransportError::Network("connection reset".to_string())),
        }
    }
}

#[async_trait]
impl Transport for MockBackend {
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        bearer: Option<&str>,
    ) -> Result<RawResponse, TransportError> {
        self.respond(url, query.to_vec(), bearer)
    }

    async fn post_json(
        &self,
        url: &str,
        _body: &Value,
        bearer: Option<&str>,
    ) -> Result<RawResponse, TransportError> {
        self.respond(url, Vec::new(), bearer)
    }

    async fn post_form(
        &self,
        url: &str,
        _form: &[(String, String)],
    ) -> Result<RawResponse, TransportError> {
        self.respond(url, Vec::new(), None)
    }
}

/// A fully wired client environment over a durable file store.
///
/// The tempdir is held so the store file survives for the lifetime of the
/// test, allowing "fresh process" scenarios via [`TestEnv::reopen_session`].
#[allow(dead_code)]
pub struct TestEnv {
    pub backend: Arc<MockBackend>,
    pub session: Arc<SessionManager>,
    pub api: ApiClient,
    store_dir: Arc<TempDir>,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let backend = MockBackend::new();
        let store_dir = Arc::new(TempDir::new().expect("failed to create tempdir"));
        let session = SessionManager::new(vault_at(&store_dir));
        let api = ApiClient::new(
            Arc::clone(&backend) as Arc<dyn Transport>,
            BASE_URL,
            Arc::clone(&session),
        );
        Self {
            backend,
            session,
            api,
            store_dir,
        }
    }

    /// A fresh session manager over the same durable store, as a new
    /// process would see it.
    pub fn reopen_session(&self) -> Arc<SessionManager> {
        SessionManager::new(vault_at(&self.store_dir))
    }
}

fn vault_at(dir: &TempDir) -> SessionVault {
    let store = FileKvStore::open(dir.path().join("session.json"))
        .expect("failed to open session store")
        .shared();
    SessionVault::new(store)
}

/// An identity fixture with the given token and role.
#[allow(dead_code)]
pub fn identity(token: &str, role: &str) -> Identity {
    Identity {
        token: token.to_string(),
        username: "alice".to_string(),
        display_name: "Alice A".to_string(),
        join_date: "2024-01-01".to_string(),
        phone: "000".to_string(),
        email: "a@x.com".to_string(),
        role: role.to_string(),
        permissions: Vec::new(),
    }
}

/// Initialize test logging once per binary; repeated calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
