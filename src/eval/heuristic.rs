//! Heuristic evaluation functions for 4x4x4 board positions
//!
//! Two evaluators are provided:
//! - [`quick_evaluate`]: center and corner occupancy only, O(1)
//! - [`comprehensive_evaluate`]: line potential, positional control,
//!   double threats and mobility
//!
//! Both score from the perspective of `me`: positive is good for `me`.

use crate::board::{BoardState, Coord, GameStatus, Mark, AXES, CENTER_CELLS, CORNER_CELLS};
use crate::rules::count_completed_lines;

use super::patterns::{line_score, PatternScore, QuickScore, OPPONENT_WEIGHT_TENTHS};

/// Evaluate center and corner occupancy.
///
/// Opponent-held cells cost more than own cells earn, so the ranking leans
/// towards denying the opponent strong cells.
#[must_use]
pub fn quick_evaluate(board: &BoardState, me: Mark) -> i32 {
    let occupancy = |cells: &[Coord], own: i32, opp: i32| -> i32 {
        cells
            .iter()
            .map(|&c| match board.get(c) {
                Some(m) if m == me => own,
                Some(_) => opp,
                None => 0,
            })
            .sum()
    };

    occupancy(&CENTER_CELLS, QuickScore::CENTER_OWN, QuickScore::CENTER_OPPONENT)
        + occupancy(&CORNER_CELLS, QuickScore::CORNER_OWN, QuickScore::CORNER_OPPONENT)
}

/// Full positional evaluation.
///
/// Terminal positions return `±PatternScore::WIN` or 0 for a draw. Otherwise
/// the score is the sum of:
/// - own line potential minus 1.1x the opponent's
/// - center and corner control differentials
/// - double-threat cell differential
/// - mobility, positive when `me` is to move
///
/// The arithmetic is done in tenths and truncated once at the end.
#[must_use]
pub fn comprehensive_evaluate(board: &BoardState, me: Mark) -> i32 {
    match board.status() {
        GameStatus::Won { winner, .. } if winner == me => return PatternScore::WIN,
        GameStatus::Won { .. } => return -PatternScore::WIN,
        GameStatus::Draw => return 0,
        GameStatus::Ongoing => {}
    }

    let opp = me.opponent();

    let mine = line_potential(board, me);
    let theirs = line_potential(board, opp);

    let center = (count_held(board, me, &CENTER_CELLS) - count_held(board, opp, &CENTER_CELLS))
        * i64::from(PatternScore::CENTER);
    let corner = (count_held(board, me, &CORNER_CELLS) - count_held(board, opp, &CORNER_CELLS))
        * i64::from(PatternScore::CORNER);
    let double = (count_double_threats(board, me) - count_double_threats(board, opp))
        * i64::from(PatternScore::DOUBLE_THREAT);

    let mobility = board.legal_move_count() as i64 * i64::from(PatternScore::MOBILITY);
    let mobility = if board.current_player() == me {
        mobility
    } else {
        -mobility
    };

    let tenths = 10 * (mine + center + corner + double + mobility) - OPPONENT_WEIGHT_TENTHS * theirs;
    (tenths / 10).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Sum of line scores seen from every cell `mark` holds, scanning four cells
/// in each of the 26 signed directions.
fn line_potential(board: &BoardState, mark: Mark) -> i64 {
    let mut score = 0i64;
    for cell in board.stones(mark).iter_ones() {
        for &axis in &AXES {
            for sign in [1, -1] {
                score += i64::from(evaluate_line_from(board, cell, axis, sign, mark));
            }
        }
    }
    score
}

/// Score the four cells starting at `origin` going `sign` along `axis`.
/// Running off the board or meeting the opponent blocks the line.
fn evaluate_line_from(
    board: &BoardState,
    origin: Coord,
    axis: crate::board::Axis,
    sign: i32,
    mark: Mark,
) -> i32 {
    let mut own = 0;
    let mut empty = 0;
    for i in 0..4 {
        let Some(c) = origin.offset(axis, i * sign) else {
            return 0;
        };
        match board.get(c) {
            Some(m) if m == mark => own += 1,
            Some(_) => return 0,
            None => empty += 1,
        }
    }
    line_score(own, empty)
}

fn count_held(board: &BoardState, mark: Mark, cells: &[Coord]) -> i64 {
    cells.iter().filter(|&&c| board.get(c) == Some(mark)).count() as i64
}

/// Empty cells that would complete two or more lines for `mark` at once.
pub fn count_double_threats(board: &BoardState, mark: Mark) -> i64 {
    Coord::all()
        .filter(|&c| board.is_empty(c))
        .filter(|&c| count_completed_lines(board, c, mark) >= 2)
        .count() as i64
}
