//! Server configuration consumed by the library.
//!
//! The binary parses command-line flags with clap and converts them into
//! [`ServerConfig`]; tests build it directly from [`Default`].

use crate::infrastructure::{
    credential::DEFAULT_TOKEN_TTL_SECS, message_pusher::DEFAULT_OUTBOUND_QUEUE_CAPACITY,
};

/// How `webrtc_signal` envelopes are fanned out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SignalRouting {
    /// Every member of the room receives the signal; `target` is advisory.
    #[default]
    Broadcast,
    /// Only connections bound to `target` receive the signal.
    ///
    /// Falls back to broadcast when the envelope has no target.
    PointToPoint,
}

/// Media server settings used when minting join tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConfig {
    pub url: String,
    pub api_key: String,
    pub api_secret: String,
    pub token_ttl_secs: i64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            url: "ws://localhost:7880".to_string(),
            api_key: "devkey".to_string(),
            api_secret: "secret".to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Capacity of each connection's outbound queue.
    pub outbound_queue_capacity: usize,
    pub signal_routing: SignalRouting,
    pub media: MediaConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            outbound_queue_capacity: DEFAULT_OUTBOUND_QUEUE_CAPACITY,
            signal_routing: SignalRouting::default(),
            media: MediaConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
