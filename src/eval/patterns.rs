//! Pattern scores for 4x4x4 evaluation
//!
//! These constants define the scoring weights for line patterns and
//! positional features.

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Four in a row. Also the base of the search's terminal scores.
    pub const WIN: i32 = 1_000_000;

    /// Three own marks and one empty cell on an unblocked line
    pub const THREE_IN_LINE: i32 = 10_000;
    /// Two own marks and two empty cells
    pub const TWO_IN_LINE: i32 = 200;
    /// One own mark and three empty cells
    pub const ONE_IN_LINE: i32 = Self::TWO_IN_LINE / 2;

    /// Per empty cell that would complete two lines at once
    pub const DOUBLE_THREAT: i32 = 3_000;
    /// Per occupied interior cell
    pub const CENTER: i32 = 100;
    /// Per occupied corner
    pub const CORNER: i32 = 30;
    /// Per legal move, signed by who is to move
    pub const MOBILITY: i32 = 10;
}

/// Defensive weighting: the opponent's line score counts 11/10.
pub const OPPONENT_WEIGHT_TENTHS: i64 = 11;

/// Quick evaluator weights: (own, opponent) per center and corner cell.
pub struct QuickScore;

impl QuickScore {
    pub const CENTER_OWN: i32 = 20;
    pub const CENTER_OPPONENT: i32 = -25;
    pub const CORNER_OWN: i32 = 10;
    pub const CORNER_OPPONENT: i32 = -12;
}

/// Score of one line of up to four cells given its contents.
///
/// `own` and `empty` count the cells; a line containing any opponent mark
/// or running off the board must not reach this function.
#[inline]
pub fn line_score(own: usize, empty: usize) -> i32 {
    match (own, empty) {
        (4, _) => PatternScore::WIN,
        (3, 1) => PatternScore::THREE_IN_LINE,
        (2, 2) => PatternScore::TWO_IN_LINE,
        (1, 3) => PatternScore::ONE_IN_LINE,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_score_hierarchy() {
        assert!(PatternScore::WIN > PatternScore::THREE_IN_LINE);
        assert!(PatternScore::THREE_IN_LINE > PatternScore::DOUBLE_THREAT);
        assert!(PatternScore::TWO_IN_LINE > PatternScore::ONE_IN_LINE);
        assert_eq!(PatternScore::ONE_IN_LINE, 100);
    }

    #[test]
    fn test_line_score() {
        assert_eq!(line_score(4, 0), PatternScore::WIN);
        assert_eq!(line_score(3, 1), PatternScore::THREE_IN_LINE);
        assert_eq!(line_score(2, 2), PatternScore::TWO_IN_LINE);
        assert_eq!(line_score(1, 3), PatternScore::ONE_IN_LINE);
        assert_eq!(line_score(0, 4), 0);
    }

    #[test]
    fn test_quick_penalties_outweigh_bonuses() {
        assert!(-QuickScore::CENTER_OPPONENT > QuickScore::CENTER_OWN);
        assert!(-QuickScore::CORNER_OPPONENT > QuickScore::CORNER_OWN);
    }
}
