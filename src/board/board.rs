//! Game state: cells, turn, terminal status and move history

use std::cmp::Reverse;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::OnceLock;

use super::bitboard::Bitboard;
use super::{Coord, Mark, TOTAL_CELLS, WIN_LENGTH};
use crate::error::MoveError;
use crate::rules::winning_line_at;

/// Terminal status of a game. Exactly one variant holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Won {
        winner: Mark,
        line: [Coord; WIN_LENGTH],
    },
    Draw,
}

/// Authoritative state of one game.
///
/// Mutated only through [`apply_move`](Self::apply_move),
/// [`switch_turn`](Self::switch_turn) and
/// [`undo_last_move`](Self::undo_last_move). `Clone` is a full deep copy.
#[derive(Debug, Clone)]
pub struct BoardState {
    /// X marks bitboard
    x: Bitboard,
    /// O marks bitboard
    o: Bitboard,
    current_player: Mark,
    move_count: u8,
    status: GameStatus,
    /// Move history for undo
    history: Vec<(Coord, Mark)>,
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            x: Bitboard::new(),
            o: Bitboard::new(),
            current_player: Mark::X,
            move_count: 0,
            status: GameStatus::Ongoing,
            history: Vec::with_capacity(TOTAL_CELLS),
        }
    }

    /// Replay `moves` from the empty board, alternating turns after each.
    pub fn from_moves<I>(moves: I) -> Result<Self, MoveError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut board = Self::new();
        for coord in moves {
            board.apply_move(coord)?;
            board.switch_turn();
        }
        Ok(board)
    }

    /// Return to the empty starting position with X to move.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Get mark at a cell
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<Mark> {
        if self.x.get(coord) {
            Some(Mark::X)
        } else if self.o.get(coord) {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Check if a cell is empty
    #[inline]
    pub fn is_empty(&self, coord: Coord) -> bool {
        !self.x.get(coord) && !self.o.get(coord)
    }

    /// Bitboard of one side's marks
    #[inline]
    pub fn stones(&self, mark: Mark) -> &Bitboard {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
        }
    }

    #[inline]
    fn stones_mut(&mut self, mark: Mark) -> &mut Bitboard {
        match mark {
            Mark::X => &mut self.x,
            Mark::O => &mut self.o,
        }
    }

    #[inline]
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// Plies played so far; equals the number of occupied cells
    #[inline]
    pub fn move_count(&self) -> usize {
        self.move_count as usize
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.status != GameStatus::Ongoing
    }

    #[inline]
    pub fn winner(&self) -> Option<Mark> {
        match self.status {
            GameStatus::Won { winner, .. } => Some(winner),
            _ => None,
        }
    }

    #[inline]
    pub fn winning_line(&self) -> Option<[Coord; WIN_LENGTH]> {
        match self.status {
            GameStatus::Won { line, .. } => Some(line),
            _ => None,
        }
    }

    #[inline]
    pub fn history(&self) -> &[(Coord, Mark)] {
        &self.history
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.move_count as usize == TOTAL_CELLS
    }

    /// Whether `apply_move(coord)` would succeed
    #[inline]
    pub fn is_legal(&self, coord: Coord) -> bool {
        coord.in_bounds() && !self.is_game_over() && self.is_empty(coord)
    }

    /// Place the current player's mark.
    ///
    /// Fails without touching the board if the cell is outside the cube, is
    /// taken, or the game has ended. The turn is not switched; call
    /// [`switch_turn`](Self::switch_turn).
    pub fn apply_move(&mut self, coord: Coord) -> Result<(), MoveError> {
        if !coord.in_bounds() {
            return Err(MoveError::OutOfBounds(coord));
        }
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        if !self.is_empty(coord) {
            return Err(MoveError::Occupied(coord));
        }

        let mark = self.current_player;
        self.place_raw(coord, mark);

        if let Some(line) = winning_line_at(self, coord, mark) {
            self.status = GameStatus::Won { winner: mark, line };
        } else if self.is_full() {
            self.status = GameStatus::Draw;
        }
        Ok(())
    }

    /// Set a mark and record it, without touching turn or terminal status.
    pub(crate) fn place_raw(&mut self, coord: Coord, mark: Mark) {
        debug_assert!(self.is_empty(coord));
        self.stones_mut(mark).set(coord);
        self.history.push((coord, mark));
        self.move_count += 1;
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    pub(crate) fn set_current_player(&mut self, mark: Mark) {
        self.current_player = mark;
    }

    #[inline]
    pub fn switch_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// Take back the most recent move.
    ///
    /// The mover of the undone move becomes the current player again, so
    /// rewinding a full round takes two calls. Returns `None` when there is
    /// no history.
    pub fn undo_last_move(&mut self) -> Option<(Coord, Mark)> {
        let (coord, mark) = self.history.pop()?;
        self.stones_mut(mark).clear(coord);
        self.move_count -= 1;
        self.status = GameStatus::Ongoing;
        self.current_player = mark;
        Some((coord, mark))
    }

    /// Apply a move for the current player and pass the turn. The returned
    /// guard derefs to the board and undoes the move when dropped, so a
    /// search branch can never leak its changes, whichever way it returns.
    pub fn play(&mut self, coord: Coord) -> Result<Played<'_>, MoveError> {
        self.apply_move(coord)?;
        self.switch_turn();
        Ok(Played { board: self })
    }

    /// All empty cells, highest positional weight first. Ties keep the
    /// canonical cell order, so the result is deterministic.
    pub fn enumerate_moves(&self) -> Vec<Coord> {
        ordered_cells()
            .iter()
            .copied()
            .filter(|&c| self.is_empty(c))
            .collect()
    }

    /// Number of empty cells
    #[inline]
    pub fn legal_move_count(&self) -> usize {
        TOTAL_CELLS - self.move_count as usize
    }

    /// Cache key: one symbol per cell in canonical order plus the side to move.
    pub fn serialize_key(&self) -> StateKey {
        let mut bytes = [b'.'; TOTAL_CELLS + 1];
        for c in self.x.iter_ones() {
            bytes[c.to_index()] = Mark::X.symbol();
        }
        for c in self.o.iter_ones() {
            bytes[c.to_index()] = Mark::O.symbol();
        }
        bytes[TOTAL_CELLS] = self.current_player.symbol();
        StateKey(bytes)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

/// All 64 cells sorted by descending positional weight (stable).
fn ordered_cells() -> &'static [Coord; TOTAL_CELLS] {
    static ORDER: OnceLock<[Coord; TOTAL_CELLS]> = OnceLock::new();
    ORDER.get_or_init(|| {
        let mut cells: [Coord; TOTAL_CELLS] = std::array::from_fn(Coord::from_index);
        cells.sort_by_key(|c| Reverse(c.positional_weight()));
        cells
    })
}

/// Scoped move returned by [`BoardState::play`].
pub struct Played<'a> {
    board: &'a mut BoardState,
}

impl Deref for Played<'_> {
    type Target = BoardState;

    fn deref(&self) -> &BoardState {
        &*self.board
    }
}

impl DerefMut for Played<'_> {
    fn deref_mut(&mut self) -> &mut BoardState {
        &mut *self.board
    }
}

impl Drop for Played<'_> {
    fn drop(&mut self) {
        self.board.undo_last_move();
    }
}

/// Injective encoding of cells plus side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateKey([u8; TOTAL_CELLS + 1]);

impl StateKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}
