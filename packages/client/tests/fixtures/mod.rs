//! In-process stub of the CodeArena backend.
//!
//! Serves the REST routes and the `/ws` socket on an ephemeral port. Tests
//! seed rooms, push realtime events and read back what the client sent.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
    routing::{get, post},
};
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use uuid::Uuid;

/// Password the stub accepts on login
pub const VALID_PASSWORD: &str = "secret";
/// Token the stub hands out on login
pub const ISSUED_TOKEN: &str = "stub-token";

const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

struct StubState {
    rooms: Mutex<Vec<Value>>,
    cheats: Mutex<Vec<Value>>,
    authorization: Mutex<Vec<String>>,
    events: broadcast::Sender<String>,
    sockets: watch::Sender<usize>,
}

impl StubState {
    fn record_authorization(&self, headers: &HeaderMap) {
        if let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            self.authorization.lock().unwrap().push(value.to_string());
        }
    }
}

pub struct StubBackend {
    addr: SocketAddr,
    state: Arc<StubState>,
    task: JoinHandle<()>,
}

impl StubBackend {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let addr = listener.local_addr().expect("Failed to read local address");

        let (events, _) = broadcast::channel(64);
        let (sockets, _) = watch::channel(0);
        let state = Arc::new(StubState {
            rooms: Mutex::new(Vec::new()),
            cheats: Mutex::new(Vec::new()),
            authorization: Mutex::new(Vec::new()),
            events,
            sockets,
        });

        let app = Router::new()
            .route("/api/room", get(list_rooms))
            .route("/api/room/create", post(create_room))
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/ws", get(websocket_handler))
            .with_state(state.clone());

        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state, task }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Add a room to the REST snapshot
    pub fn seed(&self, record: Value) {
        self.state.rooms.lock().unwrap().push(record);
    }

    pub fn rooms(&self) -> Vec<Value> {
        self.state.rooms.lock().unwrap().clone()
    }

    /// Broadcast `{"event": event, "data": data}` to every open socket
    pub fn push(&self, event: &str, data: Value) {
        let frame = json!({ "event": event, "data": data }).to_string();
        let _ = self.state.events.send(frame);
    }

    /// Raw text frame, for malformed-input tests
    pub fn push_raw(&self, frame: &str) {
        let _ = self.state.events.send(frame.to_string());
    }

    /// Wait until `count` sockets have been accepted
    pub async fn wait_for_sockets(&self, count: usize) {
        let mut rx = self.state.sockets.subscribe();
        tokio::time::timeout(WAIT_TIMEOUT, rx.wait_for(|n| *n >= count))
            .await
            .expect("Timed out waiting for socket")
            .expect("Stub backend stopped");
    }

    /// Wait until `count` cheat reports arrived and return them
    pub async fn wait_for_cheats(&self, count: usize) -> Vec<Value> {
        let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
        loop {
            let cheats = self.state.cheats.lock().unwrap().clone();
            if cheats.len() >= count {
                return cheats;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "Timed out waiting for cheat reports"
            );
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    /// `Authorization` header values seen so far
    pub fn authorization_headers(&self) -> Vec<String> {
        self.state.authorization.lock().unwrap().clone()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn list_rooms(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Json<Vec<Value>> {
    state.record_authorization(&headers);
    Json(state.rooms.lock().unwrap().clone())
}

async fn create_room(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.record_authorization(&headers);
    if body["name"].as_str().is_none_or(str::is_empty) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "name is required" })),
        );
    }
    let room = json!({
        "_id": Uuid::new_v4().simple().to_string(),
        "name": body["name"],
        "host": body["host"],
        "players": [body["host"]],
        "maxParticipants": body["maxParticipants"],
        "difficulty": body["difficulty"],
        "platforms": body["platforms"],
        "timer": body["timer"],
        "status": "waiting",
    });
    state.rooms.lock().unwrap().push(room.clone());
    let _ = state
        .events
        .send(json!({ "event": "roomCreated", "data": room }).to_string());
    (StatusCode::CREATED, Json(json!({ "room": room })))
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == VALID_PASSWORD {
        (
            StatusCode::OK,
            Json(json!({ "success": true, "token": ISSUED_TOKEN })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid credentials" })),
        )
    }
}

async fn register(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] != body["confirmPassword"] {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Passwords do not match" })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "User registered" })),
    )
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<StubState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<StubState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = state.events.subscribe();
    state.sockets.send_modify(|n| *n += 1);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(frame) => {
                    if sender.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            },
            frame = receiver.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if let Ok(value) = serde_json::from_str::<Value>(text.as_str()) {
                        if value["event"] == "cheat-detected" {
                            state.cheats.lock().unwrap().push(value["data"].clone());
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
}
