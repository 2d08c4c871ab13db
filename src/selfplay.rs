//! Engine-vs-engine experiments
//!
//! Plays complete games between two [`AiPlayer`]s and aggregates win rates,
//! game length and search effort per side.

use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::board::{BoardState, Mark, TOTAL_CELLS};
use crate::config::Difficulty;
use crate::engine::AiPlayer;
use crate::error::{ConfigError, ExperimentError, MoveError};
use crate::eval::EvaluatorKind;

/// Outcome of a single game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    /// `None` for a draw or a game cut short by `max_plies`
    pub winner: Option<Mark>,
    pub plies: usize,
    pub x_nodes: u64,
    pub o_nodes: u64,
    pub x_time: Duration,
    pub o_time: Duration,
}

/// Play one game from the empty board, X first.
///
/// Stops when the game ends, a player has no move, or `max_plies` moves
/// have been made.
pub fn play_game(x: &AiPlayer, o: &AiPlayer, max_plies: usize) -> Result<GameSummary, MoveError> {
    let mut board = BoardState::new();
    let mut summary = GameSummary {
        winner: None,
        plies: 0,
        x_nodes: 0,
        o_nodes: 0,
        x_time: Duration::ZERO,
        o_time: Duration::ZERO,
    };

    while !board.is_game_over() && summary.plies < max_plies {
        let mover = board.current_player();
        let player = match mover {
            Mark::X => x,
            Mark::O => o,
        };

        let result = player.find_best_move(&board);
        match mover {
            Mark::X => {
                summary.x_nodes += result.metrics.nodes;
                summary.x_time += result.metrics.elapsed;
            }
            Mark::O => {
                summary.o_nodes += result.metrics.nodes;
                summary.o_time += result.metrics.elapsed;
            }
        }

        let Some(mv) = result.best_move else {
            break;
        };
        board.apply_move(mv)?;
        summary.plies += 1;
        if !board.is_game_over() {
            board.switch_turn();
        }
    }

    summary.winner = board.winner();
    Ok(summary)
}

/// Parameters for a batch of games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub games: u32,
    pub difficulty_x: Difficulty,
    pub difficulty_o: Difficulty,
    pub evaluator: EvaluatorKind,
    pub max_plies: usize,
    /// Base seed for opening-book choices; each game and side derives its own
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            games: 20,
            difficulty_x: Difficulty::default(),
            difficulty_o: Difficulty::default(),
            evaluator: EvaluatorKind::default(),
            max_plies: TOTAL_CELLS,
            seed: None,
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.games == 0 {
            return Err(ConfigError::Validation("games must be > 0".into()));
        }
        if self.max_plies == 0 {
            return Err(ConfigError::Validation("max_plies must be > 0".into()));
        }
        Ok(())
    }

    fn player(&self, difficulty: Difficulty, game: u32, side: u64) -> AiPlayer {
        let ai = AiPlayer::new(difficulty, self.evaluator);
        match self.seed {
            Some(seed) => ai.with_seed(seed.wrapping_add(u64::from(game) * 2 + side)),
            None => ai,
        }
    }
}

/// Aggregate results of an experiment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentSummary {
    pub games: u32,
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
    pub avg_plies: f64,
    pub avg_nodes_x: u64,
    pub avg_nodes_o: u64,
    /// Average seconds per game spent searching for X
    pub avg_time_x: f64,
    pub avg_time_o: f64,
}

/// Play `config.games` games with fresh players each game.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentSummary, ExperimentError> {
    config.validate()?;

    let mut x_wins = 0;
    let mut o_wins = 0;
    let mut draws = 0;
    let mut plies = 0usize;
    let mut nodes_x = 0u64;
    let mut nodes_o = 0u64;
    let mut time_x = Duration::ZERO;
    let mut time_o = Duration::ZERO;

    for game in 0..config.games {
        info!("running game {}/{}", game + 1, config.games);
        let x = config.player(config.difficulty_x, game, 0);
        let o = config.player(config.difficulty_o, game, 1);

        let summary = play_game(&x, &o, config.max_plies)?;
        debug!("game {} finished: {:?}", game + 1, summary);

        match summary.winner {
            Some(Mark::X) => x_wins += 1,
            Some(Mark::O) => o_wins += 1,
            None => draws += 1,
        }
        plies += summary.plies;
        nodes_x += summary.x_nodes;
        nodes_o += summary.o_nodes;
        time_x += summary.x_time;
        time_o += summary.o_time;
    }

    let games = config.games;
    let n = f64::from(games);
    Ok(ExperimentSummary {
        games,
        x_wins,
        o_wins,
        draws,
        avg_plies: plies as f64 / n,
        avg_nodes_x: nodes_x / u64::from(games),
        avg_nodes_o: nodes_o / u64::from(games),
        avg_time_x: time_x.as_secs_f64() / n,
        avg_time_o: time_o.as_secs_f64() / n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config(games: u32, max_plies: usize) -> ExperimentConfig {
        ExperimentConfig {
            games,
            difficulty_x: Difficulty::MIN,
            difficulty_o: Difficulty::MIN,
            evaluator: EvaluatorKind::Quick,
            max_plies,
            seed: Some(1),
        }
    }

    #[test]
    fn test_play_game_respects_ply_cap() {
        let x = AiPlayer::new(Difficulty::MIN, EvaluatorKind::Quick).with_seed(3);
        let o = AiPlayer::new(Difficulty::MIN, EvaluatorKind::Quick).with_seed(4);
        let summary = play_game(&x, &o, 6).unwrap();

        assert_eq!(summary.plies, 6);
        assert_eq!(summary.winner, None);
        assert!(summary.x_nodes > 0 || summary.o_nodes > 0);
    }

    #[test]
    fn test_run_experiment_counts_every_game() {
        let summary = run_experiment(&fast_config(2, 4)).unwrap();
        assert_eq!(summary.games, 2);
        assert_eq!(summary.x_wins + summary.o_wins + summary.draws, 2);
        assert_eq!(summary.avg_plies, 4.0);
    }

    #[test]
    fn test_experiment_validation() {
        assert!(run_experiment(&fast_config(0, 10)).is_err());
        assert!(run_experiment(&fast_config(1, 0)).is_err());
    }

    #[test]
    fn test_experiment_config_from_json() {
        let config: ExperimentConfig =
            serde_json::from_str(r#"{"games": 3, "evaluator": "quick"}"#).unwrap();
        assert_eq!(config.games, 3);
        assert_eq!(config.evaluator, EvaluatorKind::Quick);
        assert_eq!(config.max_plies, TOTAL_CELLS);
    }

    #[test]
    fn test_summary_serializes() {
        let summary = run_experiment(&fast_config(1, 2)).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["games"], 1);
        assert_eq!(json["draws"], 1);
    }
}
