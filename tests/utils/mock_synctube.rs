use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::{
        header::{COOKIE, HOST, ORIGIN, SET_COOKIE},
        HeaderMap, HeaderName, StatusCode,
    },
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures::StreamExt;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

// ============================================================================
// Mock SyncTube service
// ============================================================================

/// How the mock service misbehaves, if at all
#[derive(Debug, Clone, Copy)]
pub struct MockBehavior {
    pub issue_cookie: bool,
    pub reject_sockets: bool,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            issue_cookie: true,
            reject_sockets: false,
        }
    }
}

/// Headers seen on a socket handshake
#[derive(Debug, Clone, Default)]
pub struct HandshakeHeaders {
    pub cookie: String,
    pub host: String,
    pub origin: String,
}

#[derive(Default)]
struct RoomLog {
    owner_cookie: String,
    handshake: Option<HandshakeHeaders>,
    frames: Vec<String>,
    closed: bool,
}

#[derive(Clone)]
pub struct MockSyncTube {
    behavior: MockBehavior,
    next_room: Arc<AtomicUsize>,
    rooms: Arc<RwLock<HashMap<String, RoomLog>>>,
}

impl MockSyncTube {
    /// Starts the service on an ephemeral port and returns its base URL
    pub async fn start(behavior: MockBehavior) -> (Self, String) {
        let service = Self {
            behavior,
            next_room: Arc::new(AtomicUsize::new(1)),
            rooms: Arc::new(RwLock::new(HashMap::new())),
        };

        let app = Router::new()
            .route("/api/create", post(create_room))
            .route("/ws/:room_id/:suffix", get(room_socket))
            .with_state(service.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (service, format!("http://{}", addr))
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    pub async fn handshake(&self, room_id: &str) -> Option<HandshakeHeaders> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .and_then(|room| room.handshake.clone())
    }

    pub async fn frames(&self, room_id: &str) -> Vec<String> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .map(|room| room.frames.clone())
            .unwrap_or_default()
    }

    /// Waits until the client closed the room socket, then returns its frames
    pub async fn frames_after_close(&self, room_id: &str) -> Vec<String> {
        for _ in 0..200 {
            if let Some(room) = self.rooms.read().await.get(room_id) {
                if room.closed {
                    return room.frames.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("room socket {} was never closed", room_id);
    }

    async fn capture(self, room_id: String, mut socket: WebSocket) {
        while let Some(message) = socket.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    if let Some(room) = self.rooms.write().await.get_mut(&room_id) {
                        room.frames.push(text);
                    }
                }
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {}
            }
        }

        if let Some(room) = self.rooms.write().await.get_mut(&room_id) {
            room.closed = true;
        }
    }
}

async fn create_room(State(service): State<MockSyncTube>) -> Response {
    let n = service.next_room.fetch_add(1, Ordering::SeqCst);
    let room_id = format!("room-{}", n);
    let owner_cookie = format!("sid=owner-{}", n);

    service.rooms.write().await.insert(
        room_id.clone(),
        RoomLog {
            owner_cookie: owner_cookie.clone(),
            ..RoomLog::default()
        },
    );

    let body = Json(json!({ "id": room_id }));
    if !service.behavior.issue_cookie {
        return body.into_response();
    }

    (
        AppendHeaders([
            (SET_COOKIE, format!("{}; Path=/; HttpOnly", owner_cookie)),
            (SET_COOKIE, "theme=dark; Path=/".to_string()),
        ]),
        body,
    )
        .into_response()
}

fn header(headers: &HeaderMap, name: HeaderName) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn room_socket(
    State(service): State<MockSyncTube>,
    Path((room_id, suffix)): Path<(String, String)>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Response {
    let handshake = HandshakeHeaders {
        cookie: header(&headers, COOKIE),
        host: header(&headers, HOST),
        origin: header(&headers, ORIGIN),
    };

    {
        let mut rooms = service.rooms.write().await;
        let Some(room) = rooms.get_mut(&room_id) else {
            return (StatusCode::NOT_FOUND, "unknown room").into_response();
        };
        let is_owner = room.owner_cookie == handshake.cookie;
        room.handshake = Some(handshake);

        if service.behavior.reject_sockets || suffix != "ewB9AA==" || !is_owner {
            return (StatusCode::FORBIDDEN, "not the room owner").into_response();
        }
    }

    ws.on_upgrade(move |socket| service.capture(room_id, socket))
}
