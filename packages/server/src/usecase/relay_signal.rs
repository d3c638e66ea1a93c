//! UseCase: シグナル中継処理
//!
//! 1 つのコネクションから届いたフレームを解釈し、同じルームの配送先に
//! エンベロープを届けます。
//!
//! ## 配送の規則
//!
//! - `chat_message`: ルームの全メンバー（送信者自身を含む）
//! - `webrtc_signal`: 既定ではルームの全メンバー。`SignalRouting::PointToPoint`
//!   では `target` に紐付いたコネクションのみ
//! - 未知の `type`: 配送もエラーもしない（`RouteOutcome::Ignored`）
//!
//! 送信者はクライアントの申告ではなく、送信元コネクションに紐付いた参加者で
//! 上書きされます。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelaySignalUseCase::route() メソッド
//! - 配送先の計算、送信者の上書き、タイムスタンプの補完
//!
//! ### なぜこのテストが必要か
//! - 各メンバーにちょうど 1 回ずつ届くことを保証
//! - 一部の宛先の失敗が中継全体を失敗させないことを確認
//! - 切断と中継が競合しても、切断後のコネクションに届かないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 人のルームでのチャット、1:1 の WebRTC シグナル、送信順の維持
//! - 異常系：未紐付けのコネクション、不正なフレーム、配送失敗、キューの溢れ
//! - エッジケース：未知の type、切断との競合

use std::sync::Arc;

use kaigi_shared::time::{Clock, timestamp_to_rfc3339};

use crate::{
    config::SignalRouting,
    coordination::{ConnectionRegistry, RoomDirectory, RoomGuard},
    domain::{
        ConnectionHandle, DeliveryFailure, EnvelopeCodec, InboundFrame, MessagePusher,
        SignalEnvelope,
    },
};

use super::{disconnect_participant::release_locked, error::RelayError};

/// 1 回の中継で実際に起きたこと
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReport {
    /// 配送したエンベロープ（送信者・タイムスタンプ補完済み）
    pub envelope: SignalEnvelope,
    /// 送信キューに積めた宛先
    pub delivered: Vec<ConnectionHandle>,
    /// 積めなかった宛先とその理由（ルームから外される）
    pub failed: Vec<DeliveryFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Delivered(DeliveryReport),
    /// 誰も扱わない `type` のフレーム
    Ignored { type_tag: String },
}

/// シグナル中継のユースケース
pub struct RelaySignalUseCase {
    registry: Arc<ConnectionRegistry>,
    directory: Arc<RoomDirectory>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    codec: Arc<dyn EnvelopeCodec>,
    clock: Arc<dyn Clock>,
    routing: SignalRouting,
}

impl RelaySignalUseCase {
    /// 新しい RelaySignalUseCase を作成
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        directory: Arc<RoomDirectory>,
        message_pusher: Arc<dyn MessagePusher>,
        codec: Arc<dyn EnvelopeCodec>,
        clock: Arc<dyn Clock>,
        routing: SignalRouting,
    ) -> Self {
        Self {
            registry,
            directory,
            message_pusher,
            codec,
            clock,
            routing,
        }
    }

    /// フレームを中継
    ///
    /// # Arguments
    ///
    /// * `origin` - フレームを受信したコネクション
    /// * `raw` - 受信したテキストフレーム
    ///
    /// # Returns
    ///
    /// * `Ok(RouteOutcome)` - 中継結果（宛先ごとの失敗を含む）
    /// * `Err(RelayError)` - 送信元が未紐付け、またはフレームが不正
    pub async fn route(
        &self,
        origin: &ConnectionHandle,
        raw: &str,
    ) -> Result<RouteOutcome, RelayError> {
        // 1. 送信元を解決
        let binding = self
            .registry
            .resolve(origin)
            .map_err(|_| RelayError::UnboundConnection(*origin))?;

        // 2. フレームを解釈
        let envelope = match self.codec.parse(raw)? {
            InboundFrame::Envelope(envelope) => envelope,
            InboundFrame::Ignored { type_tag } => {
                tracing::debug!(
                    "Ignoring '{}' frame from connection '{}'",
                    type_tag,
                    origin
                );
                return Ok(RouteOutcome::Ignored { type_tag });
            }
        };

        // 3. 送信者を上書きし、チャットのタイムスタンプを補完
        let envelope = envelope
            .with_sender(binding.participant_id.clone())
            .with_default_timestamp(|| timestamp_to_rfc3339(self.clock.now_millis()));
        let payload = self.codec.serialize(&envelope)?;

        // 4. ルームをロックしたまま配送先を計算して配送
        let Some(mut room) = self.directory.lock(&binding.room_id).await else {
            return Err(RelayError::UnboundConnection(*origin));
        };
        // ロック待ちの間に切断された
        if !room.contains(origin) {
            return Err(RelayError::UnboundConnection(*origin));
        }

        let targets = self.fan_out(&room, &envelope);
        let failed = self.message_pusher.broadcast(&targets, &payload).await;
        // 送信キューを失ったコネクションは、ソケット側の終了を待たずにルームから外す
        for failure in &failed {
            if release_locked(
                &mut room,
                &self.registry,
                self.message_pusher.as_ref(),
                &failure.handle,
            )
            .await
            .is_some()
            {
                tracing::info!(
                    "Connection '{}' released from room '{}': {}",
                    failure.handle,
                    binding.room_id,
                    failure.error
                );
            }
        }
        drop(room);

        let delivered: Vec<ConnectionHandle> = targets
            .into_iter()
            .filter(|handle| !failed.iter().any(|f| &f.handle == handle))
            .collect();

        tracing::debug!(
            "Relayed '{}' from '{}' in room '{}' to {} connection(s), {} failed",
            envelope.type_tag(),
            binding.participant_id,
            binding.room_id,
            delivered.len(),
            failed.len()
        );

        Ok(RouteOutcome::Delivered(DeliveryReport {
            envelope,
            delivered,
            failed,
        }))
    }

    /// 配送先のコネクションを計算
    fn fan_out(&self, room: &RoomGuard, envelope: &SignalEnvelope) -> Vec<ConnectionHandle> {
        let members = room.snapshot();
        match (self.routing, envelope) {
            (
                SignalRouting::PointToPoint,
                SignalEnvelope::WebRtcSignal {
                    target: Some(target),
                    ..
                },
            ) => members
                .iter()
                .copied()
                .filter(|handle| {
                    self.registry
                        .resolve(handle)
                        .is_ok_and(|binding| &binding.participant_id == target)
                })
                .collect(),
            _ => members.into_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            DisplayName, EnvelopeError, MessageContent, MessagePushError, MockMessagePusher,
            PusherReceiver, Room, RoomRepository, Timestamp,
        },
        infrastructure::dto::websocket::JsonEnvelopeCodec,
        usecase::{
            DisconnectParticipantUseCase,
            test_support::{Coordination, clock, participant, room_id},
        },
    };
    use serde_json::{Value, json};

    fn relay(fixture: &Coordination, routing: SignalRouting) -> RelaySignalUseCase {
        RelaySignalUseCase::new(
            fixture.registry.clone(),
            fixture.directory.clone(),
            fixture.pusher.clone(),
            Arc::new(JsonEnvelopeCodec::new()),
            clock(),
            routing,
        )
    }

    fn delivered(outcome: RouteOutcome) -> DeliveryReport {
        match outcome {
            RouteOutcome::Delivered(report) => report,
            other => panic!("expected delivery, got {:?}", other),
        }
    }

    /// 受信キューに溜まっているフレームを全て取り出す
    fn drain(rx: &mut PusherReceiver) -> Vec<Value> {
        let mut frames = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            frames.push(serde_json::from_str(&frame).unwrap());
        }
        frames
    }

    #[tokio::test]
    async fn test_chat_is_delivered_to_every_member_once() {
        // テスト項目: 3 人のルームでのチャットは送信者を含む全員にちょうど 1 回届く
        // given (前提条件):
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let (alice, mut alice_rx) = fixture.connect("room-1001", "alice").await;
        let (_bob, mut bob_rx) = fixture.connect("room-1001", "bob").await;
        let (_carol, mut carol_rx) = fixture.connect("room-1001", "carol").await;
        let relay = relay(&fixture, SignalRouting::Broadcast);

        // when (操作):
        let outcome = relay
            .route(
                &alice.handle,
                r#"{"type":"chat_message","message":"hello","sender":"alice","timestamp":"t1"}"#,
            )
            .await
            .unwrap();

        // then (期待する結果):
        let report = delivered(outcome);
        assert_eq!(report.delivered.len(), 3);
        assert!(report.failed.is_empty());
        let expected = json!({
            "type": "chat_message",
            "message": "hello",
            "sender": "alice",
            "timestamp": "t1"
        });
        for rx in [&mut alice_rx, &mut bob_rx, &mut carol_rx] {
            assert_eq!(drain(rx), vec![expected.clone()]);
        }
    }

    #[tokio::test]
    async fn test_unknown_type_is_ignored() {
        // テスト項目: 未知の type は配送もエラーもしない
        // given (前提条件):
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let (alice, mut alice_rx) = fixture.connect("room-1001", "alice").await;
        let (_bob, mut bob_rx) = fixture.connect("room-1001", "bob").await;
        let relay = relay(&fixture, SignalRouting::Broadcast);

        // when (操作):
        let outcome = relay.route(&alice.handle, r#"{"type":"ping"}"#).await;

        // then (期待する結果):
        assert_eq!(
            outcome,
            Ok(RouteOutcome::Ignored {
                type_tag: "ping".to_string()
            })
        );
        assert!(drain(&mut alice_rx).is_empty());
        assert!(drain(&mut bob_rx).is_empty());
    }

    #[tokio::test]
    async fn test_malformed_frame_is_reported_to_caller_only() {
        // テスト項目: 不正なフレームは呼び出し元にエラーを返し、誰にも配送されない
        // given (前提条件):
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let (alice, mut alice_rx) = fixture.connect("room-1001", "alice").await;
        let relay = relay(&fixture, SignalRouting::Broadcast);

        // when (操作):
        let outcome = relay
            .route(&alice.handle, r#"{"type":"chat_message","sender":"alice"}"#)
            .await;

        // then (期待する結果):
        assert!(matches!(outcome, Err(RelayError::MalformedEnvelope(_))));
        assert!(drain(&mut alice_rx).is_empty());
        // ルームは壊れていない
        assert!(fixture.registry.resolve(&alice.handle).is_ok());
    }

    #[tokio::test]
    async fn test_unbound_origin_fails() {
        // テスト項目: 未紐付けのコネクションからのフレームは UnboundConnection
        // given (前提条件):
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let relay = relay(&fixture, SignalRouting::Broadcast);
        let stranger = ConnectionHandle::generate();

        // when (操作):
        let outcome = relay
            .route(&stranger, r#"{"type":"chat_message","message":"x","sender":"x"}"#)
            .await;

        // then (期待する結果):
        assert_eq!(outcome, Err(RelayError::UnboundConnection(stranger)));
    }

    #[tokio::test]
    async fn test_sender_is_overwritten_and_timestamp_filled() {
        // テスト項目: 送信者は紐付いた参加者で上書きされ、欠けたタイムスタンプはサーバー時刻になる
        // given (前提条件):
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let (bob, mut bob_rx) = fixture.connect("room-1001", "bob").await;
        let relay = relay(&fixture, SignalRouting::Broadcast);

        // when (操作):
        let outcome = relay
            .route(
                &bob.handle,
                r#"{"type":"chat_message","message":"hi","sender":"mallory"}"#,
            )
            .await
            .unwrap();

        // then (期待する結果):
        let report = delivered(outcome);
        assert_eq!(report.envelope.sender(), &participant("bob"));
        assert_eq!(
            drain(&mut bob_rx),
            vec![json!({
                "type": "chat_message",
                "message": "hi",
                "sender": "bob",
                "timestamp": "2023-01-01T00:00:00.000Z"
            })]
        );
    }

    #[tokio::test]
    async fn test_webrtc_signal_broadcasts_by_default() {
        // テスト項目: 既定のルーティングでは target に関係なく全員に届く
        // given (前提条件):
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let (alice, mut alice_rx) = fixture.connect("room-1001", "alice").await;
        let (_bob, mut bob_rx) = fixture.connect("room-1001", "bob").await;
        let (_carol, mut carol_rx) = fixture.connect("room-1001", "carol").await;
        let relay = relay(&fixture, SignalRouting::Broadcast);

        // when (操作):
        relay
            .route(
                &alice.handle,
                r#"{"type":"webrtc_signal","signal":{"sdp":"v=0"},"sender":"alice","target":"bob"}"#,
            )
            .await
            .unwrap();

        // then (期待する結果):
        let expected = json!({
            "type": "webrtc_signal",
            "signal": {"sdp": "v=0"},
            "sender": "alice",
            "target": "bob"
        });
        for rx in [&mut alice_rx, &mut bob_rx, &mut carol_rx] {
            assert_eq!(drain(rx), vec![expected.clone()]);
        }
    }

    #[tokio::test]
    async fn test_webrtc_signal_point_to_point_reaches_target_only() {
        // テスト項目: PointToPoint では target に紐付いたコネクションのみに届く
        // given (前提条件):
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let (alice, mut alice_rx) = fixture.connect("room-1001", "alice").await;
        let (bob, mut bob_rx) = fixture.connect("room-1001", "bob").await;
        let (_carol, mut carol_rx) = fixture.connect("room-1001", "carol").await;
        let relay = relay(&fixture, SignalRouting::PointToPoint);

        // when (操作):
        let outcome = relay
            .route(
                &alice.handle,
                r#"{"type":"webrtc_signal","signal":{},"sender":"alice","target":"bob"}"#,
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(delivered(outcome).delivered, vec![bob.handle]);
        assert_eq!(drain(&mut bob_rx).len(), 1);
        assert!(drain(&mut alice_rx).is_empty());
        assert!(drain(&mut carol_rx).is_empty());
    }

    #[tokio::test]
    async fn test_point_to_point_without_target_broadcasts() {
        // テスト項目: PointToPoint でも target が null なら全員に届く
        // given (前提条件):
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let (alice, _alice_rx) = fixture.connect("room-1001", "alice").await;
        let (_bob, _bob_rx) = fixture.connect("room-1001", "bob").await;
        let relay = relay(&fixture, SignalRouting::PointToPoint);

        // when (操作):
        let outcome = relay
            .route(
                &alice.handle,
                r#"{"type":"webrtc_signal","signal":{},"sender":"alice","target":null}"#,
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(delivered(outcome).delivered.len(), 2);
    }

    #[tokio::test]
    async fn test_rooms_are_isolated() {
        // テスト項目: 別のルームのコネクションには届かない
        // given (前提条件):
        let fixture = Coordination::with_room("room-1001", "alice").await;
        fixture
            .repository
            .create_room(Room::new(
                room_id("room-2002"),
                DisplayName::new("Other".to_string()).unwrap(),
                participant("dave"),
                Timestamp::new(0),
            ))
            .await
            .unwrap();
        let (alice, _alice_rx) = fixture.connect("room-1001", "alice").await;
        let (_dave, mut dave_rx) = fixture.connect("room-2002", "dave").await;
        let relay = relay(&fixture, SignalRouting::Broadcast);

        // when (操作):
        relay
            .route(
                &alice.handle,
                r#"{"type":"chat_message","message":"hi","sender":"alice"}"#,
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert!(drain(&mut dave_rx).is_empty());
    }

    #[tokio::test]
    async fn test_disconnected_target_receives_nothing() {
        // テスト項目: A の切断後に B が A 宛てのシグナルを送っても成功し、A には届かない
        // given (前提条件):
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let (alice, mut alice_rx) = fixture.connect("room-1001", "alice").await;
        let (bob, _bob_rx) = fixture.connect("room-1001", "bob").await;
        let relay = relay(&fixture, SignalRouting::Broadcast);
        let disconnect = DisconnectParticipantUseCase::new(
            fixture.registry.clone(),
            fixture.directory.clone(),
            fixture.pusher.clone(),
        );

        // when (操作):
        disconnect.execute(&alice.handle).await;
        let outcome = relay
            .route(
                &bob.handle,
                r#"{"type":"webrtc_signal","signal":{},"sender":"bob","target":"alice"}"#,
            )
            .await;

        // then (期待する結果):
        let report = delivered(outcome.unwrap());
        assert_eq!(report.delivered, vec![bob.handle]);
        assert!(report.failed.is_empty());
        assert_eq!(alice_rx.recv().await, None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_relay_racing_with_disconnect_is_consistent() {
        // テスト項目: 切断と中継が競合しても、配送報告と実際の受信が一致する
        // given (前提条件):
        for _ in 0..50 {
            let fixture = Coordination::with_room("room-1001", "alice").await;
            let (alice, mut alice_rx) = fixture.connect("room-1001", "alice").await;
            let (bob, _bob_rx) = fixture.connect("room-1001", "bob").await;
            let relay = Arc::new(relay(&fixture, SignalRouting::Broadcast));
            let disconnect = Arc::new(DisconnectParticipantUseCase::new(
                fixture.registry.clone(),
                fixture.directory.clone(),
                fixture.pusher.clone(),
            ));

            // when (操作):
            let relay_task = {
                let relay = relay.clone();
                tokio::spawn(async move {
                    relay
                        .route(
                            &bob.handle,
                            r#"{"type":"webrtc_signal","signal":{},"sender":"bob","target":"alice"}"#,
                        )
                        .await
                })
            };
            let disconnect_task = {
                let disconnect = disconnect.clone();
                tokio::spawn(async move { disconnect.execute(&alice.handle).await })
            };
            let report = delivered(relay_task.await.unwrap().unwrap());
            disconnect_task.await.unwrap();

            // then (期待する結果): 配送済みと報告されたときだけ受信している
            let mut received = 0;
            while alice_rx.recv().await.is_some() {
                received += 1;
            }
            let reported = usize::from(report.delivered.contains(&alice.handle));
            assert_eq!(received, reported);
        }
    }

    #[tokio::test]
    async fn test_delivery_failure_is_isolated() {
        // テスト項目: 一部の宛先への配送失敗は報告されるだけで、中継は成功する
        // given (前提条件):
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let (alice, _alice_rx) = fixture.connect("room-1001", "alice").await;
        let (bob, _bob_rx) = fixture.connect("room-1001", "bob").await;
        let bob_handle = bob.handle;
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .times(1)
            .returning(move |_, _| {
                vec![DeliveryFailure {
                    handle: bob_handle,
                    error: MessagePushError::QueueFull(bob_handle.to_string()),
                }]
            });
        pusher
            .expect_unregister_client()
            .withf(move |handle| *handle == bob_handle)
            .times(1)
            .returning(|_| ());
        let relay = RelaySignalUseCase::new(
            fixture.registry.clone(),
            fixture.directory.clone(),
            Arc::new(pusher),
            Arc::new(JsonEnvelopeCodec::new()),
            clock(),
            SignalRouting::Broadcast,
        );

        // when (操作):
        let outcome = relay
            .route(
                &alice.handle,
                r#"{"type":"chat_message","message":"hi","sender":"alice"}"#,
            )
            .await
            .unwrap();

        // then (期待する結果):
        let report = delivered(outcome);
        assert_eq!(report.delivered, vec![alice.handle]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].handle, bob.handle);
        // 配送に失敗したコネクションはルームとレジストリから外れる
        assert!(fixture.registry.resolve(&bob.handle).is_err());
        let members = fixture.directory.members_of(&room_id("room-1001")).await;
        assert!(!members.contains(&bob.handle));
        assert!(members.contains(&alice.handle));
    }

    #[tokio::test]
    async fn test_overflowing_connection_is_released() {
        // テスト項目: 送信キューが溢れたコネクションはルームから外れ、以降は配送先にならない
        // given (前提条件): bob はキューを読まない（容量 16）
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let (alice, mut alice_rx) = fixture.connect("room-1001", "alice").await;
        let (bob, mut bob_rx) = fixture.connect("room-1001", "bob").await;
        let relay = relay(&fixture, SignalRouting::Broadcast);
        let frame = r#"{"type":"chat_message","message":"hi","sender":"alice"}"#;

        // when (操作): 17 通目で bob のキューが溢れる
        let mut reports = Vec::new();
        for _ in 0..17 {
            reports.push(delivered(relay.route(&alice.handle, frame).await.unwrap()));
            drain(&mut alice_rx);
        }
        let after = delivered(relay.route(&alice.handle, frame).await.unwrap());

        // then (期待する結果):
        let overflow = &reports[16];
        assert_eq!(overflow.failed.len(), 1);
        assert_eq!(overflow.failed[0].handle, bob.handle);
        assert!(matches!(
            overflow.failed[0].error,
            MessagePushError::QueueFull(_)
        ));
        assert!(fixture.registry.resolve(&bob.handle).is_err());
        assert!(
            !fixture
                .directory
                .members_of(&room_id("room-1001"))
                .await
                .contains(&bob.handle)
        );
        assert_eq!(after.delivered, vec![alice.handle]);
        assert!(after.failed.is_empty());
        // 溢れる前に積まれた 16 通を読み切るとキューは閉じている
        assert_eq!(drain(&mut bob_rx).len(), 16);
        assert_eq!(bob_rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_client_supplied_sender_must_be_a_valid_identifier() {
        // テスト項目: 上書きされる sender でも識別子として不正なら不正なフレームとして扱う
        // given (前提条件):
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let (alice, mut alice_rx) = fixture.connect("room-1001", "alice").await;
        let relay = relay(&fixture, SignalRouting::Broadcast);

        // when (操作):
        let padded = relay
            .route(
                &alice.handle,
                r#"{"type":"chat_message","message":"hi","sender":" alice"}"#,
            )
            .await;
        let empty = relay
            .route(
                &alice.handle,
                r#"{"type":"webrtc_signal","signal":{},"sender":"","target":null}"#,
            )
            .await;

        // then (期待する結果):
        for outcome in [padded, empty] {
            assert!(matches!(
                outcome,
                Err(RelayError::MalformedEnvelope(EnvelopeError::InvalidFields { .. }))
            ));
        }
        assert!(drain(&mut alice_rx).is_empty());
    }

    #[tokio::test]
    async fn test_envelopes_from_one_sender_arrive_in_send_order() {
        // テスト項目: 1 人の送信者のエンベロープは送った順に受信者へ届く
        // given (前提条件):
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let (alice, _alice_rx) = fixture.connect("room-1001", "alice").await;
        let (_bob, mut bob_rx) = fixture.connect("room-1001", "bob").await;
        let relay = relay(&fixture, SignalRouting::Broadcast);

        // when (操作):
        for n in 0..10 {
            let frame = json!({"type": "chat_message", "message": n.to_string(), "sender": "alice"});
            relay
                .route(&alice.handle, &frame.to_string())
                .await
                .unwrap();
        }

        // then (期待する結果):
        let received: Vec<String> = drain(&mut bob_rx)
            .iter()
            .map(|frame| frame["message"].as_str().unwrap().to_string())
            .collect();
        let expected: Vec<String> = (0..10).map(|n: i32| n.to_string()).collect();
        assert_eq!(received, expected);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_interleaved_senders_keep_per_sender_order() {
        // テスト項目: 2 人が同時に送っても、受信者から見た各送信者の順序は保たれる
        // given (前提条件): 1 コネクションにつき 1 タスクで順に中継する
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let (alice, _alice_rx) = fixture.connect("room-1001", "alice").await;
        let (bob, _bob_rx) = fixture.connect("room-1001", "bob").await;
        let (_carol, mut carol_rx) = fixture.connect("room-1001", "carol").await;
        let relay = Arc::new(relay(&fixture, SignalRouting::Broadcast));

        // when (操作):
        let tasks: Vec<_> = [(alice.handle, "alice"), (bob.handle, "bob")]
            .into_iter()
            .map(|(handle, name)| {
                let relay = relay.clone();
                tokio::spawn(async move {
                    for n in 0..7 {
                        let frame = json!({
                            "type": "chat_message",
                            "message": format!("{}-{}", name, n),
                            "sender": name
                        });
                        relay.route(&handle, &frame.to_string()).await.unwrap();
                    }
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        // then (期待する結果): 合計 14 通（キュー容量 16 以内）が各送信者の順で並ぶ
        let frames = drain(&mut carol_rx);
        assert_eq!(frames.len(), 14);
        for name in ["alice", "bob"] {
            let sequence: Vec<String> = frames
                .iter()
                .filter(|frame| frame["sender"] == name)
                .map(|frame| frame["message"].as_str().unwrap().to_string())
                .collect();
            let expected: Vec<String> = (0..7).map(|n| format!("{}-{}", name, n)).collect();
            assert_eq!(sequence, expected);
        }
    }

    #[tokio::test]
    async fn test_room_1001_scenario() {
        // テスト項目: alice がホストの room-1001 に alice と bob が入り、alice の "hi" が両方に届く
        // given (前提条件):
        let fixture = Coordination::with_room("room-1001", "alice").await;
        let (alice, mut alice_rx) = fixture.connect("room-1001", "alice").await;
        let (_bob, mut bob_rx) = fixture.connect("room-1001", "bob").await;
        let relay = relay(&fixture, SignalRouting::Broadcast);

        // when (操作):
        let outcome = relay
            .route(
                &alice.handle,
                r#"{"type":"chat_message","message":"hi","sender":"alice"}"#,
            )
            .await
            .unwrap();

        // then (期待する結果):
        let report = delivered(outcome);
        assert_eq!(
            report.envelope,
            SignalEnvelope::ChatMessage {
                message: MessageContent::new("hi".to_string()).unwrap(),
                sender: participant("alice"),
                timestamp: Some("2023-01-01T00:00:00.000Z".to_string()),
            }
        );
        for rx in [&mut alice_rx, &mut bob_rx] {
            let frames = drain(rx);
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0]["type"], "chat_message");
            assert_eq!(frames[0]["sender"], "alice");
            assert_eq!(frames[0]["message"], "hi");
        }
    }
}
