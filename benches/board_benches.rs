use std::hint::black_box;

use chesskit::prelude::*;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

const INITIAL_PIECES_BB: BitBoard = BitBoard(0xFFFF00000000FFFF);

fn setup_board() -> Board {
    Board::new()
}

// This is the function that contains the benchmark logic
fn make_unmake_move_cycle(c: &mut Criterion) {
    let mut board = setup_board();
    let mov: Move = "e2 e4 1".parse().unwrap();

    c.bench_function("make_unmake_move_cycle", |b| {
        // The `b.iter` closure is the code that gets timed.
        b.iter(|| {
            let move_data = board.make_move(black_box(mov)).unwrap();
            board.unmake_move(&move_data);

            black_box(&board);
        });
    });
}

fn snapshot_restore_cycle(c: &mut Criterion) {
    let mut board = Board::from_fen(KIWIPETE).unwrap();
    let mov: Move = "e1 g1 2".parse().unwrap();

    c.bench_function("snapshot_restore_cycle", |b| {
        b.iter(|| {
            let saved = board.snapshot();
            board.make_move(black_box(mov)).unwrap();
            board.restore(&saved).unwrap();

            black_box(&board);
        });
    });
}

fn record_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("record");
    let board = Board::from_fen(KIWIPETE).unwrap();

    group.bench_function("parse", |b| {
        b.iter(|| black_box(Board::from_fen(black_box(KIWIPETE)).unwrap()))
    });
    group.bench_function("export", |b| b.iter(|| black_box(board.to_fen())));
    group.finish();
}

fn bitboard_iteration(c: &mut Criterion) {
    c.bench_function("iter_bits_sum", |b| {
        b.iter_batched(
            || INITIAL_PIECES_BB,
            |bb| black_box(bb.iter_bits().sum::<usize>()),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    make_unmake_move_cycle,
    snapshot_restore_cycle,
    record_codec,
    bitboard_iteration
);
criterion_main!(benches);
