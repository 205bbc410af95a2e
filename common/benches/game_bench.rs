use criterion::{criterion_group, criterion_main, Criterion, SamplingMode};
use std::hint::black_box;
use std::time::Duration;
use common::games::tictactoe::{
    Board, Mark, SilentBroadcaster, Strategy, TicTacToeSession, TicTacToeSessionSettings,
    check_win,
};

fn drawn_board() -> Board {
    use Mark::{O, X};
    Board::from_rows([[X, O, X], [X, O, O], [O, X, X]])
}

fn bench_check_win_full_scan() {
    let board = drawn_board();
    black_box(check_win(black_box(&board), Mark::X));
    black_box(check_win(black_box(&board), Mark::O));
}

fn bench_threaded_game(player_x: Strategy, player_o: Strategy, seed: u64) {
    let settings = TicTacToeSessionSettings {
        player_x,
        player_o,
        move_delay: Duration::ZERO,
        seed,
    };
    let _ = black_box(TicTacToeSession::run(&settings, SilentBroadcaster));
}

fn win_detector_bench(c: &mut Criterion) {
    c.bench_function("check_win_drawn_board", |b| b.iter(bench_check_win_full_scan));
}

fn session_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(50)
        .measurement_time(Duration::from_secs(10));

    group.bench_function("sequential_vs_random", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            bench_threaded_game(Strategy::Sequential, Strategy::Random, seed)
        })
    });

    group.bench_function("random_vs_random", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            bench_threaded_game(Strategy::Random, Strategy::Random, seed)
        })
    });

    group.finish();
}

criterion_group!(benches, win_detector_bench, session_bench);
criterion_main!(benches);
