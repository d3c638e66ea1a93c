//! Value objects.
//!
//! 値オブジェクトは生成時にバリデーションを行い、不正な値が
//! ドメイン層に入り込まないことを保証します。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

const MAX_IDENTIFIER_LENGTH: usize = 100;
const MAX_DISPLAY_NAME_LENGTH: usize = 200;
const MAX_MESSAGE_LENGTH: usize = 4000;

/// Prefix of every generated room identifier.
const ROOM_ID_PREFIX: &str = "room-";

fn validate_identifier(kind: &'static str, value: &str) -> Result<(), ValueObjectError> {
    if value.is_empty() {
        return Err(ValueObjectError::Empty(kind));
    }
    if value.trim() != value {
        return Err(ValueObjectError::SurroundingWhitespace(kind));
    }
    if value.chars().count() > MAX_IDENTIFIER_LENGTH {
        return Err(ValueObjectError::TooLong {
            kind,
            max: MAX_IDENTIFIER_LENGTH,
        });
    }
    Ok(())
}

/// Declares a validated string identifier with the common conversions.
macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: String) -> Result<Self, ValueObjectError> {
                validate_identifier($kind, &value)?;
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ValueObjectError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_identifier!(
    /// Unique room identifier (e.g. `room-1001`).
    RoomId,
    "room_id"
);

string_identifier!(
    /// User identity of a participant, unique per room.
    ///
    /// Identities are trusted input supplied by an external auth collaborator.
    ParticipantId,
    "participant_id"
);

/// Factory for room identifiers (`room-<seed>`).
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// Build a room identifier from a caller supplied seed.
    pub fn from_seed(seed: &str) -> Result<RoomId, ValueObjectError> {
        RoomId::new(format!("{}{}", ROOM_ID_PREFIX, seed.trim()))
    }

    /// Build a room identifier from a millisecond timestamp.
    pub fn from_timestamp(timestamp: Timestamp) -> Result<RoomId, ValueObjectError> {
        Self::from_seed(&timestamp.value().to_string())
    }
}

/// Human readable name of a room or participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::Empty("display_name"));
        }
        if value.chars().count() > MAX_DISPLAY_NAME_LENGTH {
            return Err(ValueObjectError::TooLong {
                kind: "display_name",
                max: MAX_DISPLAY_NAME_LENGTH,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Chat message text. Empty text is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ValueObjectError::TooLong {
                kind: "message",
                max: MAX_MESSAGE_LENGTH,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque identifier of a live transport connection.
///
/// Distinct from the participant identity: one participant may reconnect
/// and get a new handle while the old one is still being torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionHandle(Uuid);

impl ConnectionHandle {
    /// Generate a fresh random handle.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
