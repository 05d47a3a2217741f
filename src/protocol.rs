//! Wire messages exchanged with WebSocket clients.
//!
//! Every frame is a JSON object with a `type` discriminator. Inbound frames
//! go through [`decode`], which separates three cases: a command we serve,
//! a well-formed message we don't recognise (ignored), and a malformed one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::{ASSISTANT_EXPLANATION, ASSISTANT_MOVE};

/// Client -> server commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ask the engine for a move in the given position.
    AiMove { fen: String },
    /// Ask for the canned assistant move.
    AssistantMove,
}

/// Server -> client replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    AiMove {
        bestmove: String,
    },
    AssistantMove {
        bestmove: String,
        explanation: String,
    },
    /// A compute request failed before the engine produced a move.
    Error {
        message: String,
    },
}

impl ServerMessage {
    /// The fixed reply to every `assistant_move` request.
    pub fn assistant() -> Self {
        Self::AssistantMove {
            bestmove: ASSISTANT_MOVE.to_string(),
            explanation: ASSISTANT_EXPLANATION.to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("invalid {kind} command: {source}")]
    InvalidCommand {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Discriminators [`ClientMessage`] knows how to deserialize.
const KNOWN_TYPES: &[&str] = &["ai_move", "assistant_move"];

/// Decode one inbound frame.
///
/// Returns `Ok(None)` for valid JSON that isn't a command we serve (no
/// `type`, or a `type` we don't know). Extra fields are ignored.
pub fn decode(text: &str) -> Result<Option<ClientMessage>, ProtocolError> {
    let value: Value = serde_json::from_str(text).map_err(ProtocolError::InvalidJson)?;

    let kind = match value.get("type").and_then(Value::as_str) {
        Some(kind) if KNOWN_TYPES.contains(&kind) => kind.to_string(),
        _ => return Ok(None),
    };

    serde_json::from_value(value)
        .map(Some)
        .map_err(|source| ProtocolError::InvalidCommand { kind, source })
}
