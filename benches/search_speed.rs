use std::str::FromStr;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crooked_ttt::core::PlayerMark;
use crooked_ttt::game::tictactoe::TTTBoard;
use crooked_ttt::player::{impossible_move, worst_position, ABAi, MinMaxAi};

fn criterion_benchmark(c: &mut Criterion) {
    let empty = TTTBoard::new();
    let midgame = TTTBoard::from_str("x   o  x ").unwrap();

    let mut group = c.benchmark_group("search-ttt");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);
    group.bench_function("alphabeta-empty", |b| {
        b.iter(|| ABAi::new(PlayerMark::Naught).best_move(black_box(&empty)))
    });
    group.bench_function("minimax-empty", |b| {
        b.iter(|| MinMaxAi::new(PlayerMark::Naught).best_move(black_box(&empty)))
    });
    group.sample_size(200);
    group.bench_function("alphabeta-midgame", |b| {
        b.iter(|| ABAi::new(PlayerMark::Naught).best_move(black_box(&midgame)))
    });
    group.bench_function("impossible-midgame", |b| {
        b.iter(|| impossible_move(black_box(&midgame)))
    });
    group.bench_function("worst-position", |b| {
        b.iter(|| worst_position(black_box(&midgame), black_box(crooked_ttt::game::tictactoe::TTTAddr(7))))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
