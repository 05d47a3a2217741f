pub mod mock;
pub mod uci;

use async_trait::async_trait;
use std::io;
use std::time::Duration;

use crate::consts::{DEFAULT_ENGINE, SEARCH_DEPTH};

/// Where moves come from. The relay only knows this trait.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Compute the best move for a position descriptor (FEN).
    async fn best_move(&self, fen: &str) -> Result<String, EngineError>;
}

/// Why a compute request produced no move.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("engine I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("engine {0} is not piped")]
    MissingPipe(&'static str),
    #[error("engine output ended without a bestmove line")]
    NoBestMove,
    #[error("bestmove line has no move: {0:?}")]
    MalformedBestMove(String),
    #[error("engine search timed out after {0:?}")]
    TimedOut(Duration),
}

/// How to launch and drive the external engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub program: String,
    pub args: Vec<String>,
    pub depth: u32,
    /// Upper bound on a single search. `None` waits for as long as the
    /// engine takes.
    pub search_timeout: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_ENGINE.to_string(),
            args: Vec::new(),
            depth: SEARCH_DEPTH,
            search_timeout: None,
        }
    }
}
