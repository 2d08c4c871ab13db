//! Game rules for 4x4x4 connect-four
//!
//! There is no capture or forbidden-move logic: a move is legal iff its
//! cell is empty and the game is still running, and the only way to win is
//! four in a row along one of the 13 axes.

pub mod win;

// Re-exports for convenient access
pub use win::{
    count_completed_lines, count_threats_created, find_any_win, is_winning_move, line_through,
    run_length, winning_line_at,
};
