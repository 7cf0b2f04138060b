//! WebSocket wire protocol envelopes.
//!
//! One JSON object per text frame; client and relay share the same
//! envelope shape. The inner `data` payload is modeled as an internally
//! tagged enum so the fields each signaling kind requires are explicit,
//! while unrecognized kinds still pass through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// クライアント → リレーのエンベロープ
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEnvelope {
    /// ルームへの参加要求
    Join {
        room: String,
        #[serde(rename = "peerId")]
        peer_id: String,
    },
    /// シグナリングメッセージの転送要求
    Signal { data: SignalData },
    /// 未知のメッセージタイプ（黙って無視する）
    #[serde(untagged)]
    Unknown(Value),
}

/// リレー → クライアントのエンベロープ
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEnvelope {
    Signal { data: SignalData },
}

/// シグナリングペイロード
///
/// `to` があればその peerId 宛て、なければルーム内ブロードキャスト。
/// `from`・SDP・ICE candidate および未知のフィールドは転送時に
/// そのまま保持される（フィールド保存は型で保証される）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SignalData {
    Offer {
        #[serde(skip_serializing_if = "Option::is_none")]
        to: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        offer: Value,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    Answer {
        #[serde(skip_serializing_if = "Option::is_none")]
        to: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        answer: Value,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    IceCandidate {
        #[serde(skip_serializing_if = "Option::is_none")]
        to: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        candidate: Value,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    /// 新規参加のアナウンス（リレーが生成する唯一のペイロード）
    PeerJoined {
        #[serde(rename = "peerId")]
        peer_id: String,
    },
    /// 未知のシグナリング種別（`type` を含むオブジェクトをそのまま転送する）
    #[serde(untagged)]
    Custom(Map<String, Value>),
}

impl SignalData {
    /// 宛先 peerId（directed ルーティング用）
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Offer { to, .. } | Self::Answer { to, .. } | Self::IceCandidate { to, .. } => {
                to.as_deref()
            }
            Self::PeerJoined { .. } => None,
            Self::Custom(map) => map.get("to").and_then(Value::as_str),
        }
    }

    /// ログ出力用の種別名
    pub fn kind(&self) -> &str {
        match self {
            Self::Offer { .. } => "offer",
            Self::Answer { .. } => "answer",
            Self::IceCandidate { .. } => "ice-candidate",
            Self::PeerJoined { .. } => "peer-joined",
            Self::Custom(map) => map
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown"),
        }
    }
}
