//! Room coordination server for video-conference rooms.
//!
//! Serves the room REST API and relays signaling and chat envelopes between
//! the WebSocket connections of each room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kaigi-server
//! cargo run --bin kaigi-server -- --host 0.0.0.0 --port 3000 --signal-routing point-to-point
//! ```

use clap::Parser;

use kaigi_server::{
    config::{MediaConfig, ServerConfig, SignalRouting},
    infrastructure::{
        credential::DEFAULT_TOKEN_TTL_SECS, message_pusher::DEFAULT_OUTBOUND_QUEUE_CAPACITY,
    },
    ui::Server,
};
use kaigi_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kaigi-server")]
#[command(about = "Room coordination server with signaling relay and chat fan-out", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Capacity of each connection's outbound queue
    #[arg(long, default_value_t = DEFAULT_OUTBOUND_QUEUE_CAPACITY)]
    outbound_queue_capacity: usize,

    /// How webrtc_signal envelopes are fanned out
    #[arg(long, value_enum, default_value_t = SignalRouting::Broadcast)]
    signal_routing: SignalRouting,

    /// Media server URL handed to joining participants
    #[arg(long, env = "LIVEKIT_URL", default_value = "ws://localhost:7880")]
    livekit_url: String,

    /// API key used to sign media tokens
    #[arg(long, env = "LIVEKIT_API_KEY", default_value = "devkey")]
    livekit_api_key: String,

    /// API secret used to sign media tokens
    #[arg(long, env = "LIVEKIT_API_SECRET", default_value = "secret", hide_env_values = true)]
    livekit_api_secret: String,

    /// Lifetime of media tokens in seconds
    #[arg(long, default_value_t = DEFAULT_TOKEN_TTL_SECS)]
    token_ttl_secs: i64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            outbound_queue_capacity: args.outbound_queue_capacity,
            signal_routing: args.signal_routing,
            media: MediaConfig {
                url: args.livekit_url,
                api_key: args.livekit_api_key,
                api_secret: args.livekit_api_secret,
                token_ttl_secs: args.token_ttl_secs,
            },
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = ServerConfig::from(args);
    tracing::info!(
        "Signal routing: {:?}, outbound queue capacity: {}",
        config.signal_routing,
        config.outbound_queue_capacity
    );

    if let Err(e) = Server::new(config).run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
