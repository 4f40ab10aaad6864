//! Fetch execution for the TUI.
//!
//! The core crate only builds requests and parses responses; this module is
//! the host that runs the actual round-trips. Each fetch gets its own worker
//! thread and reports back over an mpsc channel, so the UI thread never
//! blocks on the network. Completions carry the generation of the screen
//! activation that issued them, letting the app drop results that arrive
//! after their screen was dismissed.

use std::sync::mpsc::Sender;
use std::thread;

use cinenow_core::{CatalogClient, Category, FetchError, HttpRequest, HttpResponse, Movie};

/// Payload of one completed fetch.
#[derive(Debug)]
pub enum FetchPayload {
    List(Category, Result<Vec<Movie>, FetchError>),
    Movie(Result<Movie, FetchError>),
}

/// A completion delivered to the UI thread.
#[derive(Debug)]
pub struct FetchMessage {
    /// Screen activation that issued the fetch.
    pub generation: u64,
    pub payload: FetchPayload,
}

/// Spawns one worker thread per request and reports completions on the
/// channel handed to `new`.
#[derive(Clone)]
pub struct Fetcher {
    client: CatalogClient,
    tx: Sender<FetchMessage>,
}

impl Fetcher {
    pub fn new(client: CatalogClient, tx: Sender<FetchMessage>) -> Self {
        Self { client, tx }
    }

    pub fn fetch_list(&self, generation: u64, category: Category) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = execute(client.build_list(category))
                .and_then(|resp| client.parse_list(resp).map_err(FetchError::from));
            // The receiver is gone during shutdown; nothing left to notify.
            let _ = tx.send(FetchMessage {
                generation,
                payload: FetchPayload::List(category, result),
            });
        });
    }

    pub fn fetch_movie(&self, generation: u64, id: u64) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = execute(client.build_movie(id))
                .and_then(|resp| client.parse_movie(resp).map_err(FetchError::from));
            let _ = tx.send(FetchMessage {
                generation,
                payload: FetchPayload::Movie(result),
            });
        });
    }
}

/// Execute an `HttpRequest` using ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data and interpreted by the core client; only
/// transport-level failures become `FetchError::Network`.
fn execute(req: HttpRequest) -> Result<HttpResponse, FetchError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut builder = agent.get(&req.url);
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    let mut response = builder
        .call()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Ok(HttpResponse { status, body })
}
