use async_trait::async_trait;
use log::{debug, warn};
use std::process::Stdio;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};

use super::{Engine, EngineConfig, EngineError};

/// Marker the engine prints once its search is complete.
const BEST_MOVE_MARKER: &str = "bestmove";

/// A one-shot UCI engine: every search runs in a freshly spawned process
/// that is killed as soon as it has answered.
pub struct UciEngine {
    config: EngineConfig,
}

impl UciEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    fn spawn(&self) -> Result<Child, EngineError> {
        Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: self.config.program.clone(),
                source,
            })
    }

    /// Feed the position and search directives, then wait for the answer.
    /// Stdin stays open until the answer arrives.
    async fn search(&self, child: &mut Child, fen: &str) -> Result<String, EngineError> {
        let mut stdin = child.stdin.take().ok_or(EngineError::MissingPipe("stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or(EngineError::MissingPipe("stdout"))?;

        for directive in [
            format!("position fen {fen}"),
            format!("go depth {}", self.config.depth),
        ] {
            debug!("engine <- {directive}");
            stdin.write_all(directive.as_bytes()).await?;
            stdin.write_all(b"\n").await?;
        }
        stdin.flush().await?;

        let result = read_best_move(BufReader::new(stdout)).await;
        drop(stdin);
        result
    }
}

#[async_trait]
impl Engine for UciEngine {
    async fn best_move(&self, fen: &str) -> Result<String, EngineError> {
        let mut child = self.spawn()?;
        debug!(
            "spawned engine `{}` (pid {:?})",
            self.config.program,
            child.id()
        );

        let result = match self.config.search_timeout {
            Some(limit) => tokio::time::timeout(limit, self.search(&mut child, fen))
                .await
                .unwrap_or(Err(EngineError::TimedOut(limit))),
            None => self.search(&mut child, fen).await,
        };

        terminate(&mut child).await;
        result
    }
}

/// Kill and reap the engine process.
async fn terminate(child: &mut Child) {
    let pid = child.id();
    match child.kill().await {
        Ok(()) => debug!("terminated engine (pid {pid:?})"),
        Err(e) => warn!("failed to terminate engine (pid {pid:?}): {e}"),
    }
}

/// Consume engine output in order until the first marker line and return
/// its move token. A marker is seen once its newline arrives, or at EOF
/// for an unterminated last line.
pub async fn read_best_move<R>(reader: R) -> Result<String, EngineError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        debug!("engine -> {line}");
        if is_best_move_line(&line) {
            return move_token(&line)
                .map(str::to_string)
                .ok_or(EngineError::MalformedBestMove(line));
        }
    }
    Err(EngineError::NoBestMove)
}

pub fn is_best_move_line(line: &str) -> bool {
    line.contains(BEST_MOVE_MARKER)
}

/// Second whitespace-delimited field of a marker line.
pub fn move_token(line: &str) -> Option<&str> {
    line.split_whitespace().nth(1)
}
