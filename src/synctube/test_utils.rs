use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{
    clock::FixedClock,
    endpoints::SyncTubeEndpoints,
    errors::{ConnectionError, SocketError, TransportError},
    provisioner::RoomProvisioner,
    transport::{ConnectRequest, HttpReply, HttpTransport, RoomSocket, SocketConnector},
};

/// Builds a provisioner against the default endpoints with a frozen clock
pub fn provisioner_with(
    http: MockHttpTransport,
    connector: MockConnector,
    unix_seconds: i64,
) -> RoomProvisioner {
    RoomProvisioner::new(
        SyncTubeEndpoints::default(),
        "TestRoom".to_string(),
        Arc::new(http),
        Arc::new(connector),
        Arc::new(FixedClock::at_unix(unix_seconds)),
    )
}

/// HTTP transport that replays one canned reply
#[derive(Clone)]
pub struct MockHttpTransport {
    reply: Result<HttpReply, String>,
    requested_urls: Arc<RwLock<Vec<String>>>,
}

impl MockHttpTransport {
    pub fn ok(body: &str, set_cookies: &[&str]) -> Self {
        Self {
            reply: Ok(HttpReply {
                status: 200,
                body: body.to_string(),
                set_cookies: set_cookies.iter().map(|c| c.to_string()).collect(),
            }),
            requested_urls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            requested_urls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn requested_urls(&self) -> Vec<String> {
        self.requested_urls.read().await.clone()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn post_empty(&self, url: &str) -> Result<HttpReply, TransportError> {
        self.requested_urls.write().await.push(url.to_string());
        self.reply.clone().map_err(TransportError)
    }
}

/// Scripted socket behaviour
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketScript {
    /// Zero-based send index that fails
    pub fail_send_at: Option<usize>,
    pub fail_close: bool,
}

impl SocketScript {
    pub fn fail_on_send(index: usize) -> Self {
        Self {
            fail_send_at: Some(index),
            fail_close: false,
        }
    }

    pub fn fail_on_close() -> Self {
        Self {
            fail_send_at: None,
            fail_close: true,
        }
    }
}

#[derive(Default)]
struct SocketLog {
    requests: Vec<ConnectRequest>,
    frames: Vec<String>,
    attempted_sends: usize,
    closed: bool,
}

/// Connector handing out in-memory sockets that record every frame
#[derive(Clone)]
pub struct MockConnector {
    refusal: Option<(String, Option<String>)>,
    script: SocketScript,
    log: Arc<RwLock<SocketLog>>,
}

impl MockConnector {
    pub fn accepting() -> Self {
        Self::with_script(SocketScript::default())
    }

    pub fn with_script(script: SocketScript) -> Self {
        Self {
            refusal: None,
            script,
            log: Arc::new(RwLock::new(SocketLog::default())),
        }
    }

    pub fn refusing(reason: &str, body: Option<&str>) -> Self {
        Self {
            refusal: Some((reason.to_string(), body.map(str::to_string))),
            script: SocketScript::default(),
            log: Arc::new(RwLock::new(SocketLog::default())),
        }
    }

    pub async fn sent_frames(&self) -> Vec<String> {
        self.log.read().await.frames.clone()
    }

    pub async fn attempted_sends(&self) -> usize {
        self.log.read().await.attempted_sends
    }

    pub async fn was_closed(&self) -> bool {
        self.log.read().await.closed
    }

    pub async fn last_request(&self) -> Option<ConnectRequest> {
        self.log.read().await.requests.last().cloned()
    }
}

#[async_trait]
impl SocketConnector for MockConnector {
    async fn connect(
        &self,
        request: &ConnectRequest,
    ) -> Result<Box<dyn RoomSocket>, ConnectionError> {
        self.log.write().await.requests.push(request.clone());

        if let Some((reason, body)) = &self.refusal {
            return Err(ConnectionError::new(reason.clone()).with_body(body.clone()));
        }

        Ok(Box::new(MockSocket {
            script: self.script,
            log: Arc::clone(&self.log),
        }))
    }
}

struct MockSocket {
    script: SocketScript,
    log: Arc<RwLock<SocketLog>>,
}

#[async_trait]
impl RoomSocket for MockSocket {
    async fn send_text(&mut self, message: String) -> Result<(), SocketError> {
        let mut log = self.log.write().await;
        let index = log.attempted_sends;
        log.attempted_sends += 1;

        if self.script.fail_send_at == Some(index) {
            return Err(SocketError::SendFailed("broken pipe".to_string()));
        }

        log.frames.push(message);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.log.write().await.closed = true;
        if self.script.fail_close {
            return Err(SocketError::CloseFailed("already closed".to_string()));
        }
        Ok(())
    }
}
