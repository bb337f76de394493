use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::battle::BattleResult;

const HISTORY_REQUEST_ID: i64 = 1;
const SUBSCRIBE_REQUEST_ID: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolVariant {
    JsonRpc,
    Envelope,
}

impl ProtocolVariant {
    // Sent once right after the connection opens; the only outbound traffic.
    pub fn handshake_frames(&self) -> Vec<String> {
        match self {
            Self::JsonRpc => vec![json!([
                {"jsonrpc": "2.0", "method": "get_battle_results", "id": HISTORY_REQUEST_ID},
                {"jsonrpc": "2.0", "method": "subscribe", "id": SUBSCRIBE_REQUEST_ID},
            ])
            .to_string()],
            Self::Envelope => vec![
                json!({"messageType": "REPLAY", "payload": {}}).to_string(),
                json!({"messageType": "SUBSCRIBE", "payload": {}}).to_string(),
            ],
        }
    }

    pub fn decode_frame(&self, text: &str) -> Result<Vec<BattleResult>> {
        match self {
            Self::JsonRpc => decode_rpc_frame(text),
            Self::Envelope => decode_envelope_frame(text),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    params: Option<RpcParams>,
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    result: Option<RpcHistoryResult>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RpcParams {
    #[serde(default, rename = "battleResult")]
    battle_result: Option<BattleResult>,
}

#[derive(Debug, Default, Deserialize)]
struct RpcHistoryResult {
    #[serde(default, rename = "battleResults")]
    battle_results: Vec<BattleResult>,
}

// A frame is either a batch of response objects or a single object treated as
// a one-element batch. Extraction preserves arrival order.
fn decode_rpc_frame(text: &str) -> Result<Vec<BattleResult>> {
    let frame: Value =
        serde_json::from_str(text).context("battle feed frame is not valid json")?;
    let batch = match frame {
        Value::Array(items) => items,
        single => vec![single],
    };

    let mut results = Vec::new();
    for item in batch {
        let response: RpcResponse =
            serde_json::from_value(item).context("rpc response member has unexpected shape")?;
        if response.method.as_deref() == Some("subscription") {
            if let Some(result) = response.params.and_then(|params| params.battle_result) {
                results.push(result);
            }
            continue;
        }
        if response.id == Some(HISTORY_REQUEST_ID) {
            if let Some(reply) = response.result {
                results.extend(reply.battle_results);
                continue;
            }
        }
        if let Some(error) = response.error {
            warn!(%error, "battle feed reported an rpc error");
            continue;
        }
        debug!("ignored rpc response member");
    }
    Ok(results)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeFrame {
    message_type: String,
    #[serde(default)]
    payload: Value,
}

#[derive(Debug, Default, Deserialize)]
struct EnvelopePayload {
    #[serde(default)]
    result: Option<BattleResult>,
}

fn decode_envelope_frame(text: &str) -> Result<Vec<BattleResult>> {
    let frame: EnvelopeFrame =
        serde_json::from_str(text).context("battle feed frame is not a tagged envelope")?;
    match frame.message_type.as_str() {
        "BATTLE_RESULT" => {
            let payload: EnvelopePayload = serde_json::from_value(frame.payload)
                .context("BATTLE_RESULT payload has unexpected shape")?;
            Ok(payload.result.into_iter().collect())
        }
        "ERROR" => {
            warn!(payload = %frame.payload, "battle feed reported an error");
            Ok(Vec::new())
        }
        other => {
            debug!(message_type = other, "ignored envelope frame");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProtocolVariant;

    #[test]
    fn json_rpc_handshake_is_one_batched_frame() {
        let frames = ProtocolVariant::JsonRpc.handshake_frames();
        assert_eq!(frames.len(), 1);
        let parsed: serde_json::Value =
            serde_json::from_str(&frames[0]).expect("handshake should be json");
        assert_eq!(parsed[0]["jsonrpc"], "2.0");
        assert_eq!(parsed[0]["method"], "get_battle_results");
        assert_eq!(parsed[0]["id"], 1);
        assert_eq!(parsed[1]["method"], "subscribe");
        assert_eq!(parsed[1]["id"], 2);
    }

    #[test]
    fn envelope_handshake_is_replay_then_subscribe() {
        let frames = ProtocolVariant::Envelope.handshake_frames();
        assert_eq!(frames.len(), 2);
        let replay: serde_json::Value =
            serde_json::from_str(&frames[0]).expect("replay frame should be json");
        let subscribe: serde_json::Value =
            serde_json::from_str(&frames[1]).expect("subscribe frame should be json");
        assert_eq!(replay["messageType"], "REPLAY");
        assert_eq!(subscribe["messageType"], "SUBSCRIBE");
    }

    #[test]
    fn decodes_subscription_notification() {
        let frame = r#"{
            "jsonrpc":"2.0",
            "method":"subscription",
            "params":{"battleResult":{"common":{"bonusType":1,"winnerTeam":1},"personal":{"avatar":{"team":1}}}}
        }"#;
        let results = ProtocolVariant::JsonRpc
            .decode_frame(frame)
            .expect("frame should decode");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].common.bonus_type, Some(1));
    }

    #[test]
    fn decodes_historical_reply_preserving_order() {
        let frame = r#"[{
            "jsonrpc":"2.0",
            "id":1,
            "result":{"battleResults":[
                {"common":{"bonusType":1,"winnerTeam":1}},
                {"common":{"bonusType":24,"winnerTeam":2}}
            ]}
        }]"#;
        let results = ProtocolVariant::JsonRpc
            .decode_frame(frame)
            .expect("frame should decode");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].common.bonus_type, Some(1));
        assert_eq!(results[1].common.bonus_type, Some(24));
    }

    #[test]
    fn historical_shape_with_other_id_is_ignored() {
        let frame =
            r#"{"jsonrpc":"2.0","id":2,"result":{"battleResults":[{"common":{"bonusType":1}}]}}"#;
        let results = ProtocolVariant::JsonRpc
            .decode_frame(frame)
            .expect("frame should decode");
        assert!(results.is_empty());
    }

    #[test]
    fn rpc_errors_and_unknown_members_yield_nothing() {
        let frame = r#"[
            {"jsonrpc":"2.0","id":2,"error":{"code":-32601,"message":"nope"}},
            {"jsonrpc":"2.0","id":7},
            {"jsonrpc":"2.0","method":"subscription","params":{"battleResult":{"common":{"bonusType":1}}}}
        ]"#;
        let results = ProtocolVariant::JsonRpc
            .decode_frame(frame)
            .expect("frame should decode");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn single_object_is_a_one_element_batch() {
        let frame = r#"{"jsonrpc":"2.0","method":"subscription","params":{"battleResult":{"common":{"bonusType":24}}}}"#;
        let results = ProtocolVariant::JsonRpc
            .decode_frame(frame)
            .expect("frame should decode");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ProtocolVariant::JsonRpc.decode_frame("{not json").is_err());
        assert!(ProtocolVariant::Envelope.decode_frame("{not json").is_err());
    }

    #[test]
    fn decodes_envelope_battle_result() {
        let frame = r#"{
            "messageType":"BATTLE_RESULT",
            "payload":{"result":{"common":{"bonusType":24,"winnerTeam":2},"personal":{"avatar":{"team":1}}}}
        }"#;
        let results = ProtocolVariant::Envelope
            .decode_frame(frame)
            .expect("frame should decode");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].common.winner_team, Some(2));
    }

    #[test]
    fn envelope_without_result_yields_nothing() {
        let results = ProtocolVariant::Envelope
            .decode_frame(r#"{"messageType":"BATTLE_RESULT","payload":{}}"#)
            .expect("frame should decode");
        assert!(results.is_empty());
    }

    #[test]
    fn envelope_error_and_unknown_tags_yield_nothing() {
        let error = ProtocolVariant::Envelope
            .decode_frame(r#"{"messageType":"ERROR","payload":{"message":"boom"}}"#)
            .expect("frame should decode");
        let unknown = ProtocolVariant::Envelope
            .decode_frame(r#"{"messageType":"PING","payload":{}}"#)
            .expect("frame should decode");
        assert!(error.is_empty());
        assert!(unknown.is_empty());
    }

    #[test]
    fn envelope_without_tag_is_an_error() {
        assert!(ProtocolVariant::Envelope
            .decode_frame(r#"{"payload":{}}"#)
            .is_err());
    }
}
