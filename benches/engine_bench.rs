use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use cubic::board::{BoardState, Coord, Mark};
use cubic::config::Difficulty;
use cubic::engine::AiPlayer;
use cubic::eval::{comprehensive_evaluate, quick_evaluate, EvaluatorKind};
use cubic::search::find_tactical_move;

fn midgame() -> BoardState {
    BoardState::from_moves(
        [
            (1, 1, 1),
            (2, 2, 2),
            (0, 3, 1),
            (3, 0, 2),
            (1, 2, 1),
            (2, 1, 2),
        ]
        .into_iter()
        .map(|(x, y, z)| Coord::new(x, y, z)),
    )
    .unwrap()
}

fn bench_evaluate(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("quick_evaluate", |b| {
        b.iter(|| quick_evaluate(black_box(&board), black_box(Mark::X)))
    });
    c.bench_function("comprehensive_evaluate", |b| {
        b.iter(|| comprehensive_evaluate(black_box(&board), black_box(Mark::X)))
    });
}

fn bench_board(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("enumerate_moves", |b| b.iter(|| black_box(&board).enumerate_moves()));
    c.bench_function("serialize_key", |b| b.iter(|| black_box(&board).serialize_key()));
    c.bench_function("play_undo", |b| {
        let mut board = midgame();
        let mv = Coord::new(0, 0, 0);
        b.iter(|| {
            let child = board.play(black_box(mv)).unwrap();
            black_box(child.move_count())
        })
    });
}

fn bench_tactics(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("find_tactical_move", |b| {
        b.iter(|| find_tactical_move(black_box(&board), black_box(Mark::X)))
    });
}

fn bench_search(c: &mut Criterion) {
    let board = midgame();
    let mut group = c.benchmark_group("search");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    for evaluator in [EvaluatorKind::Quick, EvaluatorKind::Comprehensive] {
        group.bench_function(format!("difficulty_1_{evaluator}"), |b| {
            b.iter(|| {
                // Fresh cache each iteration so every run searches
                let ai = AiPlayer::new(Difficulty::MIN, evaluator);
                ai.find_best_move(black_box(&board))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_board, bench_tactics, bench_search);
criterion_main!(benches);
