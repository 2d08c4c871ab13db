//! Self-play driver for the 4x4x4 engine
//!
//! Runs a batch of engine-vs-engine games and prints the aggregate result.
//! Set `RUST_LOG=info` to see each move, `debug` for search iterations.

use clap::Parser;
use log::info;

use cubic::config::Difficulty;
use cubic::eval::EvaluatorKind;
use cubic::selfplay::{run_experiment, ExperimentConfig};

#[derive(Parser, Debug)]
#[command(name = "cubic", about = "Play engine-vs-engine games of 4x4x4 connect-four")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 20)]
    games: u32,

    /// Difficulty 1-5 for X
    #[arg(long, default_value = "3", value_parser = parse_difficulty)]
    difficulty_x: Difficulty,

    /// Difficulty 1-5 for O
    #[arg(long, default_value = "3", value_parser = parse_difficulty)]
    difficulty_o: Difficulty,

    /// Leaf evaluator: quick|comprehensive (or 1|2)
    #[arg(long, default_value = "comprehensive")]
    evaluator: EvaluatorKind,

    /// Max plies before a game is abandoned as a draw
    #[arg(long, default_value_t = 64)]
    max_plies: usize,

    /// Random seed for opening-book choices
    #[arg(long)]
    seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    let level: u8 = s.parse().map_err(|e| format!("{e}"))?;
    Difficulty::new(level).map_err(|e| e.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = ExperimentConfig {
        games: args.games,
        difficulty_x: args.difficulty_x,
        difficulty_o: args.difficulty_o,
        evaluator: args.evaluator,
        max_plies: args.max_plies,
        seed: args.seed,
    };
    info!("starting experiment: {:?}", config);

    let summary = run_experiment(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("===== EXPERIMENT RESULTS =====");
        println!("games:       {}", summary.games);
        println!("X wins:      {}", summary.x_wins);
        println!("O wins:      {}", summary.o_wins);
        println!("draws:       {}", summary.draws);
        println!("avg plies:   {:.2}", summary.avg_plies);
        println!("avg nodes X: {}", summary.avg_nodes_x);
        println!("avg nodes O: {}", summary.avg_nodes_o);
        println!("avg time X:  {:.3}s", summary.avg_time_x);
        println!("avg time O:  {:.3}s", summary.avg_time_o);
    }
    Ok(())
}
