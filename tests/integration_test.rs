//! End-to-end tests over real HTTP and WebSocket connections.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use pairpad::common::time::SystemClock;
use pairpad::infrastructure::debounce::DebounceScheduler;
use pairpad::infrastructure::message_pusher::WebSocketMessagePusher;
use pairpad::infrastructure::repository::{InMemoryRoomRegistry, InMemorySessionStore};
use pairpad::infrastructure::sequencer::RoomSequencer;
use pairpad::runner::CodeRunner;
use pairpad::ui::{Server, state::AppState};
use pairpad::usecase::{
    ChangeLanguageUseCase, CreateSessionUseCase, DeleteSessionUseCase, DisconnectUseCase,
    EditCodeUseCase, GetRecentSessionsUseCase, GetSessionDetailUseCase, GetSessionUseCase,
    JoinRoomUseCase,
};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

struct TestApp {
    addr: SocketAddr,
}

impl TestApp {
    /// Spawn a server on an ephemeral port with shortened debounce and grace
    /// windows so the tests run fast.
    async fn spawn() -> Self {
        Self::spawn_with(Duration::from_millis(50), Duration::from_millis(100)).await
    }

    async fn spawn_with(debounce: Duration, grace: Duration) -> Self {
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let store = Arc::new(InMemorySessionStore::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let scheduler = Arc::new(DebounceScheduler::new(debounce));
        let sequencer = Arc::new(RoomSequencer::new());
        let clock = Arc::new(SystemClock);

        let app_state = AppState {
            create_session_usecase: Arc::new(CreateSessionUseCase::new(
                registry.clone(),
                store.clone(),
                clock.clone(),
            )),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                registry.clone(),
                store.clone(),
                pusher.clone(),
                clock.clone(),
            )),
            edit_code_usecase: Arc::new(EditCodeUseCase::new(
                registry.clone(),
                store.clone(),
                pusher.clone(),
                sequencer.clone(),
                scheduler.clone(),
                clock.clone(),
            )),
            change_language_usecase: Arc::new(ChangeLanguageUseCase::new(
                registry.clone(),
                store.clone(),
                pusher.clone(),
                sequencer.clone(),
                clock.clone(),
            )),
            disconnect_usecase: Arc::new(DisconnectUseCase::with_grace_period(
                registry.clone(),
                store.clone(),
                pusher.clone(),
                sequencer.clone(),
                clock.clone(),
                grace,
            )),
            get_session_usecase: Arc::new(GetSessionUseCase::new(
                registry.clone(),
                store.clone(),
            )),
            recent_sessions_usecase: Arc::new(GetRecentSessionsUseCase::new(store.clone())),
            session_detail_usecase: Arc::new(GetSessionDetailUseCase::new(store.clone())),
            delete_session_usecase: Arc::new(DeleteSessionUseCase::new(
                registry.clone(),
                store.clone(),
                sequencer.clone(),
            )),
            runner: Arc::new(CodeRunner::new(std::env::temp_dir().join("pairpad-it-scratch"))),
            base_url: "http://localhost:5173".to_string(),
        };

        let router = Server::new(app_state).router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("server failed");
        });

        TestApp { addr }
    }

    fn http(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    async fn create_session(&self, candidate_name: &str, language: &str) -> String {
        let response = reqwest::Client::new()
            .post(self.http("/api/interviews"))
            .json(&json!({"candidateName": candidate_name, "language": language}))
            .send()
            .await
            .expect("create interview");
        assert!(response.status().is_success());
        let body: Value = response.json().await.expect("create interview body");
        body["id"].as_str().expect("id").to_string()
    }

    async fn connect_ws(&self) -> WsClient {
        let (ws, _) = connect_async(self.ws_url()).await.expect("ws connect");
        ws
    }
}

async fn send_event(ws: &mut WsClient, event: Value) {
    ws.send(Message::Text(event.to_string().into()))
        .await
        .expect("ws send");
}

/// Next text frame as JSON, failing the test after a few seconds of silence.
async fn next_json(ws: &mut WsClient) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(3), ws.next())
            .await
            .expect("timed out waiting for ws message")
            .expect("ws closed")
            .expect("ws error");
        if let Message::Text(text) = frame {
            return serde_json::from_str(&text).expect("invalid json frame");
        }
    }
}

/// Asserts that nothing arrives within the given window.
async fn assert_silent(ws: &mut WsClient, window: Duration) {
    let result = tokio::time::timeout(window, ws.next()).await;
    assert!(result.is_err(), "expected silence, got {:?}", result);
}

async fn join(ws: &mut WsClient, room_id: &str, user_name: &str) -> Value {
    send_event(
        ws,
        json!({"type": "join", "roomId": room_id, "userName": user_name}),
    )
    .await;
    let msg = next_json(ws).await;
    assert_eq!(msg["type"], "room-state", "unexpected reply: {}", msg);
    msg
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::spawn().await;

    let body: Value = reqwest::get(app.http("/api/health"))
        .await
        .expect("request")
        .json()
        .await
        .expect("body");

    assert_eq!(body["status"], "OK");
}

#[tokio::test]
async fn test_cors_allows_the_frontend_origin() {
    let app = TestApp::spawn().await;

    let response = reqwest::Client::new()
        .get(app.http("/api/health"))
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .expect("request");

    let allowed = response
        .headers()
        .get("access-control-allow-origin")
        .expect("missing access-control-allow-origin header");
    assert_eq!(allowed, "http://localhost:5173");
}

#[tokio::test]
async fn test_create_and_fetch_interview() {
    let app = TestApp::spawn().await;

    let response = reqwest::Client::new()
        .post(app.http("/api/interviews"))
        .json(&json!({"candidateName": "Ada"}))
        .send()
        .await
        .expect("create");
    let body: Value = response.json().await.expect("body");
    let id = body["id"].as_str().expect("id");
    assert!(body["url"].as_str().expect("url").ends_with(&format!("/interview/{}", id)));

    let fetched: Value = reqwest::get(app.http(&format!("/api/interviews/{}", id)))
        .await
        .expect("fetch")
        .json()
        .await
        .expect("fetch body");
    assert_eq!(fetched["candidateName"], "Ada");
    // language defaults when the creator does not pick one
    assert_eq!(fetched["language"], "javascript");
    assert_eq!(fetched["userCount"], 0);
    assert_eq!(fetched["isActive"], true);
}

#[tokio::test]
async fn test_fetch_unknown_interview_is_404() {
    let app = TestApp::spawn().await;

    let response = reqwest::get(app.http("/api/interviews/doesnotexist"))
        .await
        .expect("request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_join_delivers_state_and_presence() {
    let app = TestApp::spawn().await;
    let id = app.create_session("Ada", "go").await;

    let mut alice = app.connect_ws().await;
    let state = join(&mut alice, &id, "Alice").await;
    assert_eq!(state["language"], "go");
    assert_eq!(state["code"], "");
    assert_eq!(state["userCount"], 1);

    let mut bob = app.connect_ws().await;
    let state = join(&mut bob, &id, "Bob").await;
    assert_eq!(state["userCount"], 2);

    // the existing participant learns about the newcomer
    let joined = next_json(&mut alice).await;
    assert_eq!(joined["type"], "user-joined");
    assert_eq!(joined["userName"], "Bob");
    assert_eq!(joined["userCount"], 2);
}

#[tokio::test]
async fn test_join_unknown_room_yields_error_event() {
    let app = TestApp::spawn().await;

    let mut ws = app.connect_ws().await;
    send_event(
        &mut ws,
        json!({"type": "join", "roomId": "nosuchroom", "userName": "Eve"}),
    )
    .await;

    let msg = next_json(&mut ws).await;
    assert_eq!(msg["type"], "error");
    assert_eq!(msg["message"], "Room not found");
}

#[tokio::test]
async fn test_code_change_reaches_peers_but_not_sender() {
    let app = TestApp::spawn().await;
    let id = app.create_session("Ada", "go").await;

    let mut alice = app.connect_ws().await;
    join(&mut alice, &id, "Alice").await;
    let mut bob = app.connect_ws().await;
    join(&mut bob, &id, "Bob").await;
    next_json(&mut alice).await; // user-joined for bob

    send_event(
        &mut alice,
        json!({"type": "code-change", "roomId": id, "code": "package main"}),
    )
    .await;

    let update = next_json(&mut bob).await;
    assert_eq!(update["type"], "code-update");
    assert_eq!(update["code"], "package main");

    // no self-echo: the editor's buffer is already ahead
    assert_silent(&mut alice, Duration::from_millis(200)).await;
}

#[tokio::test]
async fn test_code_updates_preserve_send_order() {
    let app = TestApp::spawn().await;
    let id = app.create_session("Ada", "go").await;

    let mut alice = app.connect_ws().await;
    join(&mut alice, &id, "Alice").await;
    let mut bob = app.connect_ws().await;
    join(&mut bob, &id, "Bob").await;
    next_json(&mut alice).await;

    for code in ["a", "ab", "abc", "abcd"] {
        send_event(
            &mut alice,
            json!({"type": "code-change", "roomId": id, "code": code}),
        )
        .await;
    }

    for expected in ["a", "ab", "abc", "abcd"] {
        let update = next_json(&mut bob).await;
        assert_eq!(update["code"], expected);
    }
}

#[tokio::test]
async fn test_language_change_reaches_whole_room() {
    let app = TestApp::spawn().await;
    let id = app.create_session("Ada", "go").await;

    let mut alice = app.connect_ws().await;
    join(&mut alice, &id, "Alice").await;
    let mut bob = app.connect_ws().await;
    join(&mut bob, &id, "Bob").await;
    next_json(&mut alice).await;

    send_event(
        &mut bob,
        json!({"type": "language-change", "roomId": id, "language": "cpp"}),
    )
    .await;

    // the initiator gets the authoritative confirmation too
    let to_bob = next_json(&mut bob).await;
    assert_eq!(to_bob["type"], "language-update");
    assert_eq!(to_bob["language"], "cpp");
    let to_alice = next_json(&mut alice).await;
    assert_eq!(to_alice["type"], "language-update");
    assert_eq!(to_alice["language"], "cpp");
}

#[tokio::test]
async fn test_disconnect_notifies_remaining_peers() {
    let app = TestApp::spawn().await;
    let id = app.create_session("Ada", "go").await;

    let mut alice = app.connect_ws().await;
    join(&mut alice, &id, "Alice").await;
    let mut bob = app.connect_ws().await;
    join(&mut bob, &id, "Bob").await;
    next_json(&mut alice).await;

    drop(bob);

    let left = next_json(&mut alice).await;
    assert_eq!(left["type"], "user-left");
    assert_eq!(left["userCount"], 1);
}

#[tokio::test]
async fn test_edit_burst_persists_once_with_final_text() {
    let app = TestApp::spawn().await;
    let id = app.create_session("Ada", "go").await;

    let mut alice = app.connect_ws().await;
    join(&mut alice, &id, "Alice").await;

    for code in ["a", "ab", "abc"] {
        send_event(
            &mut alice,
            json!({"type": "code-change", "roomId": id, "code": code}),
        )
        .await;
    }
    tokio::time::sleep(Duration::from_millis(300)).await;

    let details: Value = reqwest::get(app.http(&format!("/api/sessions/{}/details", id)))
        .await
        .expect("details")
        .json()
        .await
        .expect("details body");
    assert_eq!(details["code"], "abc");
    assert_eq!(details["codeHistory"].as_array().expect("history").len(), 1);
}

#[tokio::test]
async fn test_empty_room_ends_after_grace_period() {
    let app = TestApp::spawn().await;
    let id = app.create_session("Ada", "go").await;

    let alice = {
        let mut ws = app.connect_ws().await;
        join(&mut ws, &id, "Alice").await;
        ws
    };
    drop(alice);
    tokio::time::sleep(Duration::from_millis(400)).await;

    // the live room is gone; the persisted record serves the lookup
    let fetched: Value = reqwest::get(app.http(&format!("/api/interviews/{}", id)))
        .await
        .expect("fetch")
        .json()
        .await
        .expect("fetch body");
    assert_eq!(fetched["isActive"], false);
    assert!(fetched["endedAt"].is_string());
}

#[tokio::test]
async fn test_rejoin_within_grace_keeps_room_alive() {
    let app = TestApp::spawn_with(Duration::from_millis(50), Duration::from_millis(500)).await;
    let id = app.create_session("Ada", "go").await;

    {
        let mut ws = app.connect_ws().await;
        join(&mut ws, &id, "Alice").await;
        send_event(
            &mut ws,
            json!({"type": "code-change", "roomId": id, "code": "draft"}),
        )
        .await;
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    // a page refresh: reconnect well inside the grace window
    tokio::time::sleep(Duration::from_millis(100)).await;
    let mut ws = app.connect_ws().await;
    let state = join(&mut ws, &id, "Alice").await;
    assert_eq!(state["code"], "draft");

    // the armed teardown must not fire while someone is present
    tokio::time::sleep(Duration::from_millis(600)).await;
    let fetched: Value = reqwest::get(app.http(&format!("/api/interviews/{}", id)))
        .await
        .expect("fetch")
        .json()
        .await
        .expect("fetch body");
    assert_eq!(fetched["isActive"], true);
    assert_eq!(fetched["userCount"], 1);
}

#[tokio::test]
async fn test_sessions_list_and_delete() {
    let app = TestApp::spawn().await;
    let id = app.create_session("Ada", "go").await;
    // created_at has millisecond resolution; keep the ordering unambiguous
    tokio::time::sleep(Duration::from_millis(5)).await;
    app.create_session("Grace", "java").await;

    let list: Value = reqwest::get(app.http("/api/sessions"))
        .await
        .expect("list")
        .json()
        .await
        .expect("list body");
    assert_eq!(list["sessions"].as_array().expect("sessions").len(), 2);
    // newest first
    assert_eq!(list["sessions"][0]["candidateName"], "Grace");

    let response = reqwest::Client::new()
        .delete(app.http(&format!("/api/sessions/{}", id)))
        .send()
        .await
        .expect("delete");
    assert!(response.status().is_success());

    let response = reqwest::get(app.http(&format!("/api/interviews/{}", id)))
        .await
        .expect("fetch deleted");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_execute_rejects_empty_code() {
    let app = TestApp::spawn().await;

    let response = reqwest::Client::new()
        .post(app.http("/api/execute"))
        .json(&json!({"language": "go", "code": ""}))
        .send()
        .await
        .expect("execute");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body["output"], "Error: No code provided");
}

#[tokio::test]
async fn test_execute_reports_unsupported_language_inline() {
    let app = TestApp::spawn().await;

    let response = reqwest::Client::new()
        .post(app.http("/api/execute"))
        .json(&json!({"language": "python", "code": "print(1)"}))
        .send()
        .await
        .expect("execute");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body["output"], "Unsupported language: python");
}
