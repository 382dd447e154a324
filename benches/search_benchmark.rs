use arena::board::Board;
use arena::games::{ReversiBoard, ReversiMove, TicTacToeBoard};
use arena::search::{search_best_move, SearchContext};

use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("tic-tac-toe full-depth search", |b| {
        b.iter(solve_tic_tac_toe_opening)
    });
    c.bench_function("reversi depth 5 midgame search", |b| {
        b.iter(search_reversi_midgame)
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn solve_tic_tac_toe_opening() {
    let mut board = TicTacToeBoard::new();
    let mut context = SearchContext::new();

    let result = search_best_move(&mut context, &mut board, 9);
    assert_eq!(result.value, 0);
}

fn search_reversi_midgame() {
    let mut board = ReversiBoard::new();
    for played in &["3,4", "3,3", "4,3", "5,3"] {
        let candidate: ReversiMove = played.parse().unwrap();
        board.apply_move(&candidate).unwrap();
    }
    let mut context = SearchContext::new();

    let result = search_best_move(&mut context, &mut board, 5);
    assert!(result.best_move.is_some());
}
