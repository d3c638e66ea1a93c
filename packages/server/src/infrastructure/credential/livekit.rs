//! LiveKit access tokens.
//!
//! Tokens are HS256 JWTs signed with the API secret. The media server only
//! needs the room grant; identity is the display name the client joined with.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use kaigi_shared::time::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::{CredentialError, CredentialIssuer, RoomId};

/// Default token lifetime in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Video grant embedded in the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaGrant {
    pub room: String,
    #[serde(rename = "roomJoin")]
    pub room_join: bool,
    #[serde(rename = "canPublish")]
    pub can_publish: bool,
    #[serde(rename = "canSubscribe")]
    pub can_subscribe: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTokenClaims {
    /// API key
    pub iss: String,
    /// Participant name
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub video: MediaGrant,
}

pub struct LiveKitTokenIssuer {
    url: String,
    api_key: String,
    api_secret: String,
    ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl LiveKitTokenIssuer {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        ttl_secs: i64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ttl_secs,
            clock,
        }
    }

    fn claims(&self, room_id: &RoomId, participant_name: &str) -> MediaTokenClaims {
        let iat = self.clock.now_millis() / 1000;
        MediaTokenClaims {
            iss: self.api_key.clone(),
            sub: participant_name.to_string(),
            iat,
            exp: iat + self.ttl_secs,
            video: MediaGrant {
                room: room_id.as_str().to_string(),
                room_join: true,
                can_publish: true,
                can_subscribe: true,
            },
        }
    }
}

impl CredentialIssuer for LiveKitTokenIssuer {
    fn mint_token(
        &self,
        room_id: &RoomId,
        participant_name: &str,
    ) -> Result<String, CredentialError> {
        let claims = self.claims(room_id, participant_name);
        let header = Header::new(Algorithm::HS256);
        let key = EncodingKey::from_secret(self.api_secret.as_bytes());

        encode(&header, &claims, &key).map_err(|e| {
            tracing::error!("Failed to sign media token for room '{}': {}", room_id, e);
            CredentialError::Signing(e.to_string())
        })
    }

    fn media_url(&self) -> String {
        self.url.clone()
    }
}
