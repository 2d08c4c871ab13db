//! Game-tree search engine for 4x4x4 connect-four
//!
//! Two players alternate placing marks in a 4x4x4 cube. Four contiguous
//! marks along any of the 13 spatial axes win; a full board without a line
//! is a draw.
//!
//! # Architecture
//!
//! - [`board`]: coordinates, bitboards, game state, saved-game records
//! - [`rules`]: line scanning and win detection
//! - [`eval`]: quick and comprehensive static evaluation
//! - [`search`]: tactical shortcuts, alpha-beta with iterative deepening,
//!   transposition cache, killer moves, cancellation
//! - [`engine`]: [`AiPlayer`], the per-agent move request
//! - [`config`]: difficulty levels and engine configuration
//! - [`selfplay`]: engine-vs-engine experiments
//!
//! # Quick Start
//!
//! ```
//! use cubic::{AiPlayer, BoardState, Difficulty, EvaluatorKind};
//!
//! let mut board = BoardState::new();
//! let ai = AiPlayer::new(Difficulty::MIN, EvaluatorKind::Quick);
//!
//! if let Some(mv) = ai.get_move(&board) {
//!     board.apply_move(mv).unwrap();
//!     board.switch_turn();
//!     println!("AI plays at {}", mv);
//! }
//! assert_eq!(board.move_count(), 1);
//! ```
//!
//! # Search Priority
//!
//! 1. Opening book (first two plies)
//! 2. Immediate win
//! 3. Block of the opponent's immediate win
//! 4. Double threat
//! 5. Alpha-beta search within the difficulty's time budget
//! 6. Quick-evaluation fallback

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod selfplay;

// Re-export commonly used types for convenience
pub use board::{BoardState, Coord, GameRecord, GameStatus, Mark, BOARD_SIZE};
pub use config::{Difficulty, EngineConfig};
pub use engine::{AiPlayer, MoveResult, SearchType};
pub use error::{ConfigError, ExperimentError, MoveError, RestoreError};
pub use eval::EvaluatorKind;
pub use search::{CancelToken, SearchMetrics};
