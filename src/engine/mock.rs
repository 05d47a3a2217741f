use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Engine, EngineError};

/// A scripted engine for tests. Returns pre-defined moves in order and
/// remembers every position it was asked about.
pub struct MockEngine {
    moves: Vec<String>,
    index: AtomicUsize,
    positions: Mutex<Vec<String>>,
}

impl MockEngine {
    pub fn new(moves: Vec<&str>) -> Self {
        Self {
            moves: moves.into_iter().map(String::from).collect(),
            index: AtomicUsize::new(0),
            positions: Mutex::new(Vec::new()),
        }
    }

    /// Number of searches requested so far.
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// Positions received, in call order.
    pub fn positions(&self) -> Vec<String> {
        self.positions
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Engine for MockEngine {
    async fn best_move(&self, fen: &str) -> Result<String, EngineError> {
        if let Ok(mut positions) = self.positions.lock() {
            positions.push(fen.to_string());
        }
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        self.moves.get(i).cloned().ok_or(EngineError::NoBestMove)
    }
}
