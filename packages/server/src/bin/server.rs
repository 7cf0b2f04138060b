//! WebRTC signaling relay server.
//!
//! Brokers room membership over WebSocket and forwards SDP offers/answers
//! and ICE candidates between peers in the same room. Media never touches
//! this process; peers exchange it directly once signaling completes.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kakehashi-server
//! cargo run --bin kakehashi-server -- --host 127.0.0.1 --port 3000
//! PORT=9000 cargo run --bin kakehashi-server
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use tokio::sync::Mutex;

use kakehashi_server::{
    domain::RoomRegistry,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryRegistryRepository,
    },
    ui::Server,
    usecase::{
        DisconnectPeerUseCase, GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase,
        RelaySignalUseCase,
    },
};
use kakehashi_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kakehashi-server")]
#[command(about = "WebRTC signaling relay over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "8081")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory room registry)
    let registry = Arc::new(Mutex::new(RoomRegistry::new()));
    let repository = Arc::new(InMemoryRegistryRepository::new(registry));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients.clone()));

    // 3. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let relay_signal_usecase = Arc::new(RelaySignalUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let disconnect_peer_usecase = Arc::new(DisconnectPeerUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository.clone()));

    // 4. Create and run the server
    let server = Server::new(
        join_room_usecase,
        relay_signal_usecase,
        disconnect_peer_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
