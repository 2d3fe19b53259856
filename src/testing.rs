//! Test doubles for the backend and the media element, plus a minimal
//! HTTP server for exercising `HttpBackend`.

use std::{
    collections::HashMap,
    io::Result as IoResult,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering::SeqCst},
    },
};

use {
    async_trait::async_trait,
    parking_lot::Mutex,
    tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
        spawn,
        sync::oneshot::{Receiver, Sender, channel},
        task::JoinHandle,
    },
};

use crate::{
    api::{
        Backend, ConfigureResponse, DeleteResponse, Document, HealthStatus, NetworksResponse,
        Picture, ServerConfig, Track, WifiCredentials,
    },
    error::{ApiError, PlaybackError},
    playback::MediaElement,
};

/// Backend with scripted responses and request counters.
///
/// Each response slot is returned (cloned) for every call until replaced.
pub struct FakeBackend {
    pub music: Mutex<Result<Vec<Track>, ApiError>>,
    pub pictures: Mutex<Result<Vec<Picture>, ApiError>>,
    pub documents: Mutex<Result<Vec<Document>, ApiError>>,
    pub delete: Mutex<Result<DeleteResponse, ApiError>>,
    pub refresh: Mutex<Result<(), ApiError>>,
    pub networks: Mutex<Result<NetworksResponse, ApiError>>,
    pub configure: Mutex<Result<ConfigureResponse, ApiError>>,
    pub music_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub reboot_calls: AtomicUsize,
    pub restart_calls: AtomicUsize,
    pub deleted: Mutex<Vec<String>>,
    pub configured: Mutex<Vec<WifiCredentials>>,
    /// When set, the next music call waits on this gate before answering
    /// with the response that was scripted when it started.
    music_gate: Mutex<Option<Receiver<()>>>,
    /// When set, the next delete call records its filename and then waits
    /// on this gate before answering.
    delete_gate: Mutex<Option<Receiver<()>>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            music: Mutex::new(Ok(Vec::new())),
            pictures: Mutex::new(Ok(Vec::new())),
            documents: Mutex::new(Ok(Vec::new())),
            delete: Mutex::new(Ok(DeleteResponse {
                status: "success".to_string(),
                message: None,
            })),
            refresh: Mutex::new(Ok(())),
            networks: Mutex::new(Ok(NetworksResponse::default())),
            configure: Mutex::new(Ok(ConfigureResponse {
                success: true,
                ..ConfigureResponse::default()
            })),
            music_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            reboot_calls: AtomicUsize::new(0),
            restart_calls: AtomicUsize::new(0),
            deleted: Mutex::new(Vec::new()),
            configured: Mutex::new(Vec::new()),
            music_gate: Mutex::new(None),
            delete_gate: Mutex::new(None),
        }
    }
}

impl FakeBackend {
    /// Backend whose music feed returns `tracks`.
    pub fn with_music(tracks: Vec<Track>) -> Self {
        let backend = Self::default();
        backend.set_music(Ok(tracks));
        backend
    }

    pub fn set_music(&self, response: Result<Vec<Track>, ApiError>) {
        *self.music.lock() = response;
    }

    pub fn set_pictures(&self, response: Result<Vec<Picture>, ApiError>) {
        *self.pictures.lock() = response;
    }

    pub fn set_documents(&self, response: Result<Vec<Document>, ApiError>) {
        *self.documents.lock() = response;
    }

    pub fn set_delete(&self, response: Result<DeleteResponse, ApiError>) {
        *self.delete.lock() = response;
    }

    /// Holds the next music call until the returned sender fires.
    pub fn gate_next_music(&self) -> Sender<()> {
        let (tx, rx) = channel();
        *self.music_gate.lock() = Some(rx);
        tx
    }

    /// Holds the next delete call until the returned sender fires.
    pub fn gate_next_delete(&self) -> Sender<()> {
        let (tx, rx) = channel();
        *self.delete_gate.lock() = Some(rx);
        tx
    }

    pub fn music_calls(&self) -> usize {
        self.music_calls.load(SeqCst)
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn music(&self) -> Result<Vec<Track>, ApiError> {
        self.music_calls.fetch_add(1, SeqCst);
        let response = self.music.lock().clone();
        let gate = self.music_gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        response
    }

    async fn pictures(&self) -> Result<Vec<Picture>, ApiError> {
        self.pictures.lock().clone()
    }

    async fn documents(&self) -> Result<Vec<Document>, ApiError> {
        self.documents.lock().clone()
    }

    async fn delete_track(&self, filename: &str) -> Result<DeleteResponse, ApiError> {
        self.deleted.lock().push(filename.to_string());
        let gate = self.delete_gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.delete.lock().clone()
    }

    async fn refresh(&self) -> Result<(), ApiError> {
        self.refresh_calls.fetch_add(1, SeqCst);
        self.refresh.lock().clone()
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            ..HealthStatus::default()
        })
    }

    async fn server_config(&self) -> Result<ServerConfig, ApiError> {
        Ok(ServerConfig::default())
    }

    async fn wifi_networks(&self) -> Result<NetworksResponse, ApiError> {
        self.networks.lock().clone()
    }

    async fn configure_wifi(
        &self,
        credentials: &WifiCredentials,
    ) -> Result<ConfigureResponse, ApiError> {
        self.configured.lock().push(credentials.clone());
        self.configure.lock().clone()
    }

    async fn reboot(&self) -> Result<(), ApiError> {
        self.reboot_calls.fetch_add(1, SeqCst);
        Ok(())
    }

    async fn restart(&self) -> Result<(), ApiError> {
        self.restart_calls.fetch_add(1, SeqCst);
        Ok(())
    }
}

/// Media element that records what the controller asked of it.
#[derive(Debug, Clone)]
pub struct FakeMedia {
    pub source: Option<String>,
    pub sources_assigned: usize,
    pub paused: bool,
    /// When set, every `play` call fails with this reason.
    pub fail_with: Option<String>,
}

impl Default for FakeMedia {
    fn default() -> Self {
        Self {
            source: None,
            sources_assigned: 0,
            paused: true,
            fail_with: None,
        }
    }
}

impl MediaElement for FakeMedia {
    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
        self.sources_assigned += 1;
        self.paused = true;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if let Some(reason) = &self.fail_with {
            return Err(PlaybackError::Media {
                reason: reason.clone(),
            });
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Tracks named `track_{i}.mp3` with titles `Track {i}`.
pub fn sample_tracks(count: usize) -> Vec<Track> {
    (0..count)
        .map(|i| Track {
            filename: format!("track_{i}.mp3"),
            title: format!("Track {i}"),
            artist: "Artist".to_string(),
            ..Track::default()
        })
        .collect()
}

/// A request seen by [`TestServer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Canned HTTP/1.1 server on a loopback port.
///
/// Each route answers a `(method, path)` pair with a status and a JSON body.
/// Anything else gets `404 {}`. Connections are closed after one response.
pub struct TestServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Binds `127.0.0.1:0` and starts answering `routes`.
    pub async fn start(routes: &[(&str, &str, u16, &str)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let routes: HashMap<(String, String), (u16, String)> = routes
            .iter()
            .map(|(method, path, status, body)| {
                (
                    (method.to_string(), path.to_string()),
                    (*status, body.to_string()),
                )
            })
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let task = spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let _ = serve_one(stream, &routes, &recorded).await;
            }
        });

        Self {
            base_url,
            requests,
            task,
        }
    }

    /// `http://127.0.0.1:{port}`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests answered so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve_one(
    mut stream: TcpStream,
    routes: &HashMap<(String, String), (u16, String)>,
    requests: &Mutex<Vec<RecordedRequest>>,
) -> IoResult<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Ok(());
        }
        buffer.extend_from_slice(&chunk[..read]);
        if let Some(pos) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).into_owned();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < header_end + content_length {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
    }
    let body = String::from_utf8_lossy(&buffer[header_end..]).into_owned();

    let (status, reply) = routes
        .get(&(method.clone(), path.clone()))
        .cloned()
        .unwrap_or_else(|| (404, "{}".to_string()));
    requests.lock().push(RecordedRequest { method, path, body });

    let response = format!(
        "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
        reply.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}
