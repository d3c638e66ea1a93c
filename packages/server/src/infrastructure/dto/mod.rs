//! Data Transfer Objects (DTOs) for the room coordination server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: relayed envelope frames and their JSON codec
//! - `http`: HTTP API request / response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
