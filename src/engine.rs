//! AI player integrating opening book, tactical shortcuts and search
//!
//! A move request walks a fixed sequence and returns at the first phase
//! that produces a move:
//!
//! 1. Terminal or full board: no move
//! 2. Opening book for the first two plies
//! 3. Tactical shortcuts: own win, block, fork
//! 4. Iterative-deepening alpha-beta within the difficulty's time budget
//! 5. Fallback: best of the first eight ordered moves by quick evaluation
//!
//! Each [`AiPlayer`] owns its transposition cache and killer table. Both sit
//! behind mutexes, so a player can be shared with a background thread and
//! a search can be cancelled from another thread through a [`CancelToken`].

use log::{debug, info};
use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{BoardState, Coord, Mark, CENTER_CELLS, CORNER_CELLS};
use crate::config::{Difficulty, EngineConfig};
use crate::error::ConfigError;
use crate::eval::{quick_evaluate, EvaluatorKind, PatternScore};
use crate::search::{
    find_tactical_move, CancelToken, KillerTable, MetricsCollector, SearchControl, SearchMetrics,
    Searcher, TTStats, Tactic, TranspositionCache,
};

/// Ordered moves the fallback ranks
const FALLBACK_CANDIDATES: usize = 8;

/// Which phase of the request produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SearchType {
    /// Random center or corner for the first two plies
    OpeningBook,
    /// Completes four in a row
    ImmediateWin,
    /// Takes the cell the opponent would win on
    Block,
    /// Creates two winning threats at once
    DoubleThreat,
    /// Regular alpha-beta search result
    AlphaBeta,
    /// Search produced nothing in time
    Fallback,
    /// Game over or board full
    NoMove,
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Coord>,
    /// Score from the requesting side's perspective
    pub score: i32,
    pub search_type: SearchType,
    pub metrics: SearchMetrics,
}

/// Computer opponent for one side of a game.
///
/// # Example
///
/// ```
/// use cubic::board::{BoardState, Coord};
/// use cubic::config::Difficulty;
/// use cubic::engine::{AiPlayer, SearchType};
/// use cubic::eval::EvaluatorKind;
///
/// let ai = AiPlayer::new(Difficulty::MIN, EvaluatorKind::Quick);
///
/// // X threatens (0, 3, 0); O to move must block
/// let board = BoardState::from_moves([
///     Coord::new(0, 0, 0), Coord::new(3, 3, 3),
///     Coord::new(0, 1, 0), Coord::new(3, 3, 2),
///     Coord::new(0, 2, 0),
/// ]).unwrap();
///
/// let result = ai.find_best_move(&board);
/// assert_eq!(result.best_move, Some(Coord::new(0, 3, 0)));
/// assert_eq!(result.search_type, SearchType::Block);
/// ```
pub struct AiPlayer {
    config: EngineConfig,
    tt: Mutex<TranspositionCache>,
    killers: Mutex<KillerTable>,
    metrics: Mutex<SearchMetrics>,
    rng: Mutex<SmallRng>,
}

impl AiPlayer {
    /// Create a player with the default cache capacity.
    #[must_use]
    pub fn new(difficulty: Difficulty, evaluator: EvaluatorKind) -> Self {
        Self::build(EngineConfig::new(difficulty, evaluator))
    }

    /// Create a player from a full configuration, validating it first.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            tt: Mutex::new(TranspositionCache::new(config.cache_capacity)),
            killers: Mutex::new(KillerTable::new()),
            metrics: Mutex::new(SearchMetrics::empty(config.difficulty, config.evaluator)),
            rng: Mutex::new(SmallRng::from_entropy()),
            config,
        }
    }

    /// Make opening-book choices reproducible.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        *self.rng.lock() = SmallRng::seed_from_u64(seed);
        self
    }

    /// Best move for the side to move, or `None` if the game is over.
    #[must_use]
    pub fn get_move(&self, board: &BoardState) -> Option<Coord> {
        self.find_best_move(board).best_move
    }

    /// Run a full move request for `board.current_player()`.
    pub fn find_best_move(&self, board: &BoardState) -> MoveResult {
        self.find_best_move_with_cancel(board, &CancelToken::new())
    }

    /// Like [`find_best_move`](Self::find_best_move), but stops early once
    /// `cancel` is set. A cancelled request still returns a move if one
    /// exists: the deepest finished iteration, or the fallback.
    pub fn find_best_move_with_cancel(&self, board: &BoardState, cancel: &CancelToken) -> MoveResult {
        let difficulty = self.config.difficulty;
        let evaluator = self.config.evaluator;
        let mut collector = MetricsCollector::start(difficulty, evaluator);
        let me = board.current_player();

        let (best_move, score, search_type) = self.choose(board, me, cancel, &mut collector);

        let metrics = collector.finish();
        *self.metrics.lock() = metrics;

        match best_move {
            Some(mv) => info!(
                "{} plays {} via {:?} in {}ms, {} nodes, difficulty {}",
                me,
                mv,
                search_type,
                metrics.elapsed_ms(),
                metrics.nodes,
                difficulty
            ),
            None => info!("{} has no move", me),
        }

        MoveResult {
            best_move,
            score,
            search_type,
            metrics,
        }
    }

    fn choose(
        &self,
        board: &BoardState,
        me: Mark,
        cancel: &CancelToken,
        collector: &mut MetricsCollector,
    ) -> (Option<Coord>, i32, SearchType) {
        if board.is_game_over() || board.is_full() {
            return (None, 0, SearchType::NoMove);
        }

        if let Some(mv) = self.opening_move(board, me) {
            return (Some(mv), 0, SearchType::OpeningBook);
        }

        if let Some(tactic) = find_tactical_move(board, me) {
            debug!("shortcut {:?}", tactic);
            return match tactic {
                Tactic::ImmediateWin(c) => (Some(c), PatternScore::WIN, SearchType::ImmediateWin),
                Tactic::Block(c) => (Some(c), 0, SearchType::Block),
                Tactic::DoubleThreat(c) => {
                    (Some(c), PatternScore::DOUBLE_THREAT, SearchType::DoubleThreat)
                }
            };
        }

        let control = SearchControl::new(self.config.difficulty.time_budget(), cancel.clone());
        let mut scratch = board.clone();
        let mut searcher = Searcher::new(me, self.config.evaluator, &self.tt, &self.killers, &control);
        let outcome = searcher.iterative_deepening(&mut scratch, self.config.difficulty.max_depth());
        collector.add_nodes(outcome.nodes);
        collector.set_completed_depth(outcome.completed_depth);

        if let Some(mv) = outcome.best_move {
            return (Some(mv), outcome.score, SearchType::AlphaBeta);
        }

        debug!("no iteration finished after {:?}, using fallback", collector.elapsed());
        match fallback_move(board, me) {
            Some((mv, score)) => (Some(mv), score, SearchType::Fallback),
            None => (None, 0, SearchType::NoMove),
        }
    }

    /// Random center cell on an empty board. On the second ply, a random
    /// corner if the opponent opened in the center, otherwise a random
    /// center cell.
    fn opening_move(&self, board: &BoardState, me: Mark) -> Option<Coord> {
        let pool: &[Coord] = match board.move_count() {
            0 => &CENTER_CELLS,
            1 => {
                let opp = me.opponent();
                if CENTER_CELLS.iter().any(|&c| board.get(c) == Some(opp)) {
                    &CORNER_CELLS
                } else {
                    &CENTER_CELLS
                }
            }
            _ => return None,
        };

        let open: Vec<Coord> = pool.iter().copied().filter(|&c| board.is_empty(c)).collect();
        open.choose(&mut *self.rng.lock()).copied()
    }

    /// Snapshot of the most recent request.
    pub fn metrics(&self) -> SearchMetrics {
        *self.metrics.lock()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
    }

    pub fn evaluator(&self) -> EvaluatorKind {
        self.config.evaluator
    }

    pub fn set_evaluator(&mut self, evaluator: EvaluatorKind) {
        self.config.evaluator = evaluator;
    }

    /// Forget cached scores and killer moves. Call when starting a new game.
    pub fn clear_cache(&self) {
        self.tt.lock().clear();
        self.killers.lock().clear();
    }

    pub fn tt_stats(&self) -> TTStats {
        self.tt.lock().stats()
    }
}

impl Default for AiPlayer {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

/// Best of the first few ordered moves by quick evaluation.
fn fallback_move(board: &BoardState, me: Mark) -> Option<(Coord, i32)> {
    let mut scratch = board.clone();
    let mut best: Option<(Coord, i32)> = None;

    for mv in board.enumerate_moves().into_iter().take(FALLBACK_CANDIDATES) {
        let Ok(child) = scratch.play(mv) else {
            continue;
        };
        let score = quick_evaluate(&child, me);
        drop(child);

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
    }
    best
}
