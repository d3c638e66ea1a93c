//! Domain entities.

use super::value_object::{DisplayName, MessageContent, ParticipantId, RoomId, Timestamp};

/// Default attention score of a participant without telemetry.
pub const DEFAULT_ATTENTION_SCORE: i32 = 100;

/// A conference room record.
///
/// Rooms are never deleted; ending a room only flips `is_active`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: DisplayName,
    pub host: ParticipantId,
    pub created_at: Timestamp,
    pub is_active: bool,
}

impl Room {
    pub fn new(id: RoomId, name: DisplayName, host: ParticipantId, created_at: Timestamp) -> Self {
        Self {
            id,
            name,
            host,
            created_at,
            is_active: true,
        }
    }

    pub fn is_hosted_by(&self, user_id: &ParticipantId) -> bool {
        &self.host == user_id
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

/// Partial update of a participant's media flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaStateUpdate {
    pub is_muted: Option<bool>,
    pub is_video_off: Option<bool>,
}

/// A participant record, unique per (room, user).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub room_id: RoomId,
    pub user_id: ParticipantId,
    pub name: DisplayName,
    pub joined_at: Timestamp,
    pub is_muted: bool,
    pub is_video_off: bool,
}

impl Participant {
    pub fn new(
        room_id: RoomId,
        user_id: ParticipantId,
        name: DisplayName,
        joined_at: Timestamp,
    ) -> Self {
        Self {
            room_id,
            user_id,
            name,
            joined_at,
            is_muted: false,
            is_video_off: false,
        }
    }

    pub fn apply_media_state(&mut self, update: MediaStateUpdate) {
        if let Some(is_muted) = update.is_muted {
            self.is_muted = is_muted;
        }
        if let Some(is_video_off) = update.is_video_off {
            self.is_video_off = is_video_off;
        }
    }
}

/// What a live connection is bound to. Immutable for the connection lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionBinding {
    pub room_id: RoomId,
    pub participant_id: ParticipantId,
}

/// A stored chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRecord {
    pub id: u64,
    pub room_id: RoomId,
    pub sender: ParticipantId,
    pub message: MessageContent,
    pub timestamp: Timestamp,
}

/// Partial attention telemetry update; `None` keeps the stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttentionUpdate {
    pub attention_score: Option<i32>,
    pub total_time: Option<i64>,
    pub focused_time: Option<i64>,
}

/// Aggregated attention telemetry of one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttentionStats {
    pub room_id: RoomId,
    pub user_id: ParticipantId,
    pub attention_score: i32,
    /// Seconds spent in the room.
    pub total_time: i64,
    /// Seconds spent focused.
    pub focused_time: i64,
    pub updated_at: Timestamp,
}

impl AttentionStats {
    /// First record of a participant: missing fields take their defaults.
    pub fn from_update(
        room_id: RoomId,
        user_id: ParticipantId,
        update: AttentionUpdate,
        now: Timestamp,
    ) -> Self {
        Self {
            room_id,
            user_id,
            attention_score: update.attention_score.unwrap_or(DEFAULT_ATTENTION_SCORE),
            total_time: update.total_time.unwrap_or(0),
            focused_time: update.focused_time.unwrap_or(0),
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: AttentionUpdate, now: Timestamp) {
        if let Some(score) = update.attention_score {
            self.attention_score = score;
        }
        if let Some(total_time) = update.total_time {
            self.total_time = total_time;
        }
        if let Some(focused_time) = update.focused_time {
            self.focused_time = focused_time;
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> ParticipantId {
        ParticipantId::new("alice".to_string()).unwrap()
    }

    fn room_id() -> RoomId {
        RoomId::new("room-1001".to_string()).unwrap()
    }

    #[test]
    fn test_room_deactivate() {
        // テスト項目: ルームを終了すると非アクティブになる
        // given (前提条件):
        let mut room = Room::new(
            room_id(),
            DisplayName::new("Standup".to_string()).unwrap(),
            alice(),
            Timestamp::new(1000),
        );
        assert!(room.is_active);

        // when (操作):
        room.deactivate();

        // then (期待する結果):
        assert!(!room.is_active);
        assert!(room.is_hosted_by(&alice()));
    }

    #[test]
    fn test_participant_apply_media_state_keeps_unset_flags() {
        // テスト項目: 指定されなかったメディアフラグは変更されない
        // given (前提条件):
        let mut participant = Participant::new(
            room_id(),
            alice(),
            DisplayName::new("Alice".to_string()).unwrap(),
            Timestamp::new(1000),
        );
        participant.is_video_off = true;

        // when (操作):
        participant.apply_media_state(MediaStateUpdate {
            is_muted: Some(true),
            is_video_off: None,
        });

        // then (期待する結果):
        assert!(participant.is_muted);
        assert!(participant.is_video_off);
    }

    #[test]
    fn test_attention_stats_defaults_and_partial_update() {
        // テスト項目: 初回は既定値で作成され、以降は指定された項目のみ更新される
        // given (前提条件):
        let mut stats = AttentionStats::from_update(
            room_id(),
            alice(),
            AttentionUpdate {
                total_time: Some(30),
                ..Default::default()
            },
            Timestamp::new(1000),
        );
        assert_eq!(stats.attention_score, DEFAULT_ATTENTION_SCORE);
        assert_eq!(stats.focused_time, 0);

        // when (操作):
        stats.apply(
            AttentionUpdate {
                attention_score: Some(72),
                ..Default::default()
            },
            Timestamp::new(2000),
        );

        // then (期待する結果):
        assert_eq!(stats.attention_score, 72);
        assert_eq!(stats.total_time, 30);
        assert_eq!(stats.updated_at, Timestamp::new(2000));
    }
}
