//! Project-wide constants.

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");

/// Port the relay listens on when none is given.
pub const DEFAULT_PORT: u16 = 8080;

/// Interface the relay binds to when none is given.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Engine executable looked up on `PATH` when none is given.
pub const DEFAULT_ENGINE: &str = "stockfish";

/// Depth passed to `go depth`. Part of the client contract.
pub const SEARCH_DEPTH: u32 = 10;

/// Move returned for every `assistant_move` request.
pub const ASSISTANT_MOVE: &str = "e2e4";

/// Explanation returned alongside [`ASSISTANT_MOVE`].
pub const ASSISTANT_EXPLANATION: &str = "I played pawn to e4 to control the center.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consts_are_non_empty() {
        assert!(!AUTHOR.is_empty());
        assert!(!HOMEPAGE.is_empty());
        assert!(!DEFAULT_ENGINE.is_empty());
        assert!(!ASSISTANT_EXPLANATION.is_empty());
    }

    #[test]
    fn consts_from_cargo_toml() {
        assert!(AUTHOR.contains("Assaf Sapir"));
        assert!(HOMEPAGE.contains("sapir.io"));
    }

    #[test]
    fn contract_values() {
        assert_eq!(DEFAULT_PORT, 8080);
        assert_eq!(SEARCH_DEPTH, 10);
        assert_eq!(ASSISTANT_MOVE, "e2e4");
    }
}
