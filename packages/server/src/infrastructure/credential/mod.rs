//! Media credential issuers.

mod livekit;

pub use livekit::{DEFAULT_TOKEN_TTL_SECS, LiveKitTokenIssuer, MediaGrant, MediaTokenClaims};
