//! Search module for the 4x4x4 engine
//!
//! Contains:
//! - Transposition cache with first-in-first-out eviction
//! - Killer-move table keyed by remaining depth
//! - Deadline and cancellation control
//! - One-ply tactical shortcuts (win, block, fork)
//! - Alpha-beta minimax with iterative deepening
//! - Per-request metrics

pub mod alphabeta;
pub mod control;
pub mod killer;
pub mod metrics;
pub mod threat;
pub mod tt;

pub use alphabeta::{SearchAborted, SearchOutcome, Searcher, INF};
pub use control::{CancelToken, SearchControl};
pub use killer::{KillerTable, MAX_KILLERS};
pub use metrics::{MetricsCollector, SearchMetrics};
pub use threat::{find_double_threat, find_immediate_win, find_tactical_move, Tactic};
pub use tt::{CacheKey, TTStats, TranspositionCache};
