//! Alpha-beta minimax with iterative deepening
//!
//! The tree walk plays and unplays moves on one board through the
//! [`Played`](crate::board::Played) guard, so every branch sees its own
//! position without cloning and the board is restored on every exit path,
//! including cutoffs.
//!
//! Scores are always from the perspective of the side that requested the
//! search. Terminal nodes score `±(WIN + depth * 1000)` so quicker wins and
//! slower losses are preferred.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use parking_lot::Mutex;
//! use cubic::board::{BoardState, Coord};
//! use cubic::eval::EvaluatorKind;
//! use cubic::search::{CancelToken, KillerTable, SearchControl, Searcher, TranspositionCache};
//!
//! let tt = Mutex::new(TranspositionCache::new(10_000));
//! let killers = Mutex::new(KillerTable::new());
//! let control = SearchControl::new(Duration::from_secs(5), CancelToken::new());
//!
//! let mut board = BoardState::from_moves([Coord::new(1, 1, 1), Coord::new(0, 0, 0)]).unwrap();
//! let me = board.current_player();
//! let mut searcher = Searcher::new(me, EvaluatorKind::Quick, &tt, &killers, &control);
//! let outcome = searcher.iterative_deepening(&mut board, 2);
//! assert!(outcome.best_move.is_some());
//! ```

use log::debug;
use parking_lot::Mutex;

use crate::board::{BoardState, Coord, GameStatus, Mark};
use crate::eval::{EvaluatorKind, PatternScore};

use super::control::SearchControl;
use super::killer::KillerTable;
use super::tt::{CacheKey, TranspositionCache};

/// Bound for alpha-beta windows
pub const INF: i32 = i32::MAX;

/// Per-ply bonus on terminal scores
const DEPTH_BONUS: i32 = 1000;

/// A root value above this is a forced win; deeper iterations stop.
const FORCED_WIN: i32 = PatternScore::WIN - 1000;

/// The root iteration ran out of time or was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchAborted;

/// Result of iterative deepening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best move of the deepest completed iteration
    pub best_move: Option<Coord>,
    pub score: i32,
    /// Deepest iteration that completed, 0 if none did
    pub completed_depth: u8,
    /// Nodes expanded across all iterations
    pub nodes: u64,
}

/// One search invocation. Borrows the agent's cache and killer table for
/// its lifetime; the locks are only held for single reads or writes, never
/// across recursion.
pub struct Searcher<'a> {
    me: Mark,
    evaluator: EvaluatorKind,
    tt: &'a Mutex<TranspositionCache>,
    killers: &'a Mutex<KillerTable>,
    control: &'a SearchControl,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(
        me: Mark,
        evaluator: EvaluatorKind,
        tt: &'a Mutex<TranspositionCache>,
        killers: &'a Mutex<KillerTable>,
        control: &'a SearchControl,
    ) -> Self {
        Self {
            me,
            evaluator,
            tt,
            killers,
            control,
            nodes: 0,
        }
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search depth 1, 2, ... up to `max_depth`, keeping the result of the
    /// deepest iteration that finished. An interrupted iteration is
    /// discarded.
    pub fn iterative_deepening(&mut self, board: &mut BoardState, max_depth: u8) -> SearchOutcome {
        let mut outcome = SearchOutcome {
            best_move: None,
            score: -INF,
            completed_depth: 0,
            nodes: 0,
        };

        for depth in 1..=max_depth {
            if self.control.should_stop() {
                break;
            }

            match self.search_root(board, depth) {
                Ok((Some(mv), score)) => {
                    outcome.best_move = Some(mv);
                    outcome.score = score;
                    outcome.completed_depth = depth;
                    debug!(
                        "depth {} done: best {} score {} nodes {} ({:?})",
                        depth,
                        mv,
                        score,
                        self.nodes,
                        self.control.elapsed()
                    );
                    if score > FORCED_WIN {
                        debug!("forced win found at depth {}", depth);
                        break;
                    }
                }
                Ok((None, _)) => break,
                Err(SearchAborted) => {
                    debug!("depth {} aborted after {:?}", depth, self.control.elapsed());
                    break;
                }
            }
        }

        outcome.nodes = self.nodes;
        outcome
    }

    /// Root of one iteration. Polls the stop condition before and after
    /// every child so a late timeout cannot leak a partial result.
    fn search_root(
        &mut self,
        board: &mut BoardState,
        depth: u8,
    ) -> Result<(Option<Coord>, i32), SearchAborted> {
        let mut alpha = -INF;
        let mut best_move = None;
        let mut best_score = -INF;

        for mv in self.ordered_moves(board, depth) {
            if self.control.should_stop() {
                return Err(SearchAborted);
            }

            let Ok(mut child) = board.play(mv) else {
                continue;
            };
            let value = self.minimax(&mut child, depth - 1, alpha, INF, false);
            drop(child);

            if self.control.should_stop() {
                return Err(SearchAborted);
            }

            if best_move.is_none() || value > best_score {
                best_score = value;
                best_move = Some(mv);
            }
            alpha = alpha.max(best_score);
        }

        Ok((best_move, best_score))
    }

    fn minimax(
        &mut self,
        board: &mut BoardState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        if self.control.should_stop() {
            return 0;
        }

        match board.status() {
            GameStatus::Won { winner, .. } => {
                let score = PatternScore::WIN + i32::from(depth) * DEPTH_BONUS;
                return if winner == self.me { score } else { -score };
            }
            GameStatus::Draw => return 0,
            GameStatus::Ongoing => {}
        }

        if depth == 0 {
            return self.evaluator.evaluate(board, self.me);
        }

        let key = CacheKey::new(board.serialize_key(), depth, maximizing);
        let cached = self.tt.lock().probe(&key);
        if let Some(score) = cached {
            return score;
        }

        let mut best = if maximizing { -INF } else { INF };

        for mv in self.ordered_moves(board, depth) {
            if self.control.should_stop() {
                break;
            }

            let Ok(mut child) = board.play(mv) else {
                continue;
            };
            let value = self.minimax(&mut child, depth - 1, alpha, beta, !maximizing);
            drop(child);

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }

            if beta <= alpha {
                self.record_cutoff(depth, mv);
                break;
            }
        }

        if !self.control.should_stop() {
            self.tt.lock().store(key, best);
        }
        best
    }

    /// Remember a cutoff move. After a stop the window may hold a child's
    /// placeholder score, so its cutoff is not trusted.
    fn record_cutoff(&self, depth: u8, mv: Coord) {
        if !self.control.should_stop() {
            self.killers.lock().store(depth, mv);
        }
    }

    /// Killer moves for this depth first, then the rest in positional order.
    fn ordered_moves(&self, board: &BoardState, depth: u8) -> Vec<Coord> {
        let mut moves = board.enumerate_moves();
        let killers: Vec<Coord> = self.killers.lock().get(depth).collect();

        let mut front = 0;
        for killer in killers {
            if let Some(pos) = moves[front..].iter().position(|&m| m == killer) {
                moves[front..=front + pos].rotate_right(1);
                front += 1;
            }
        }
        moves
    }
}
