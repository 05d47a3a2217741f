#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chess_relay::engine::EngineConfig;

/// A throwaway UCI "engine": a `sh` script that records what it was sent
/// into a temp directory and prints scripted output.
pub struct FakeEngine {
    pub dir: tempfile::TempDir,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn directives_path(&self) -> PathBuf {
        self.dir.path().join("directives")
    }

    pub fn spawns_path(&self) -> PathBuf {
        self.dir.path().join("spawns")
    }

    pub fn pid_path(&self) -> PathBuf {
        self.dir.path().join("pid")
    }

    /// Config that runs `body` after the two directives have been read
    /// into `$position` and `$go` and logged.
    pub fn config(&self, body: &str) -> EngineConfig {
        let script = format!(
            "echo spawned >> '{spawns}'\n\
             echo $$ > '{pid}'\n\
             read position\n\
             read go\n\
             printf '%s\\n%s\\n' \"$position\" \"$go\" > '{directives}'\n\
             {body}\n",
            spawns = self.spawns_path().display(),
            pid = self.pid_path().display(),
            directives = self.directives_path().display(),
            body = body,
        );
        EngineConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script],
            ..EngineConfig::default()
        }
    }

    /// Lines the engine received, in order.
    pub fn directives(&self) -> Vec<String> {
        read_lines(&self.directives_path())
    }

    pub fn spawn_count(&self) -> usize {
        read_lines(&self.spawns_path()).len()
    }

    pub fn pid(&self) -> u32 {
        std::fs::read_to_string(self.pid_path())
            .unwrap()
            .trim()
            .parse()
            .unwrap()
    }
}

/// Prints a search trace, answers, then lingers until killed.
pub const ANSWER_E2E4: &str = "echo 'info depth 1 score cp 20 pv e2e4'\n\
                               echo 'bestmove e2e4 ponder e7e5'\n\
                               exec sleep 30";

/// Answers with the position descriptor itself as the move token, after a
/// short pause.
pub const ECHO_FEN: &str = "set -- $position\n\
                            sleep 0.3\n\
                            echo \"bestmove $3\"\n\
                            exec sleep 30";

/// Never answers.
pub const SILENT: &str = "exec sleep 30";

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(String::from)
        .collect()
}

/// Whether a process with this pid still exists (including zombies).
#[cfg(target_os = "linux")]
pub fn process_exists(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}
