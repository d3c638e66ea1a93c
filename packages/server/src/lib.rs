//! Room coordination server for video-conference rooms.
//!
//! The core keeps an in-memory projection of who is connected to which room
//! and relays signaling and chat envelopes between those connections. Room
//! records, chat history, attention telemetry and media credentials live
//! behind repository traits so the relay hot path never touches them.

// layers
pub mod coordination;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
