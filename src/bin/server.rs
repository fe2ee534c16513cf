//! Collaborative coding interview server.
//!
//! Serves the room synchronization engine over WebSocket and the session /
//! execution API over HTTP.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use pairpad::{
    common::{logger::setup_logger, time::SystemClock},
    infrastructure::{
        debounce::DebounceScheduler,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomRegistry, InMemorySessionStore},
        sequencer::RoomSequencer,
    },
    runner::CodeRunner,
    ui::{Server, state::AppState},
    usecase::{
        ChangeLanguageUseCase, CreateSessionUseCase, DeleteSessionUseCase, DisconnectUseCase,
        EditCodeUseCase, GetRecentSessionsUseCase, GetSessionDetailUseCase, GetSessionUseCase,
        JoinRoomUseCase, PERSIST_DEBOUNCE,
    },
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Collaborative coding interview server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "5000")]
    port: u16,

    /// Frontend origin used to build shareable interview URLs
    #[arg(long, default_value = "http://localhost:5173")]
    base_url: String,

    /// Scratch directory for runner artifacts
    #[arg(long, default_value = "./scratch")]
    scratch_dir: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher and schedulers
    // 3. UseCases
    // 4. AppState
    // 5. Server

    // 1. Create repositories (in-memory)
    let registry = Arc::new(InMemoryRoomRegistry::new());
    let store = Arc::new(InMemorySessionStore::new());

    // 2. Create MessagePusher, schedulers and clock
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let debounce = Arc::new(DebounceScheduler::new(PERSIST_DEBOUNCE));
    let sequencer = Arc::new(RoomSequencer::new());
    let clock = Arc::new(SystemClock);

    // 3. Create UseCases
    let create_session_usecase = Arc::new(CreateSessionUseCase::new(
        registry.clone(),
        store.clone(),
        clock.clone(),
    ));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        store.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let edit_code_usecase = Arc::new(EditCodeUseCase::new(
        registry.clone(),
        store.clone(),
        message_pusher.clone(),
        sequencer.clone(),
        debounce.clone(),
        clock.clone(),
    ));
    let change_language_usecase = Arc::new(ChangeLanguageUseCase::new(
        registry.clone(),
        store.clone(),
        message_pusher.clone(),
        sequencer.clone(),
        clock.clone(),
    ));
    let disconnect_usecase = Arc::new(DisconnectUseCase::new(
        registry.clone(),
        store.clone(),
        message_pusher.clone(),
        sequencer.clone(),
        clock.clone(),
    ));
    let get_session_usecase = Arc::new(GetSessionUseCase::new(registry.clone(), store.clone()));
    let recent_sessions_usecase = Arc::new(GetRecentSessionsUseCase::new(store.clone()));
    let session_detail_usecase = Arc::new(GetSessionDetailUseCase::new(store.clone()));
    let delete_session_usecase = Arc::new(DeleteSessionUseCase::new(
        registry.clone(),
        store.clone(),
        sequencer.clone(),
    ));

    // 4. Create AppState
    let app_state = AppState {
        create_session_usecase,
        join_room_usecase,
        edit_code_usecase,
        change_language_usecase,
        disconnect_usecase,
        get_session_usecase,
        recent_sessions_usecase,
        session_detail_usecase,
        delete_session_usecase,
        runner: Arc::new(CodeRunner::new(args.scratch_dir)),
        base_url: args.base_url,
    };

    // 5. Create and run the server
    let server = Server::new(app_state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
