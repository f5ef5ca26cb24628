use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris_board::core::{
    apply_clear, can_place, detect_full_rows, GameEngine, Grid, Piece, PieceSource,
};
use tetris_board::types::PieceKind;

fn bench_step(c: &mut Criterion) {
    let mut engine = GameEngine::new(PieceSource::bag(12345));
    engine.new_game(10, 20, None).unwrap();

    c.bench_function("engine_step", |b| {
        b.iter(|| {
            if engine.is_game_over() {
                engine.new_game(10, 20, None).unwrap();
            }
            black_box(engine.step());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new(10, 20).unwrap();
            // Fill bottom 4 rows
            for y in 16..20 {
                let row: Vec<(i8, i8)> = (0..10).map(|x| (x, y)).collect();
                grid.lock(&row, PieceKind::I);
            }
            let rows = detect_full_rows(&grid);
            apply_clear(&mut grid, &rows)
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut engine = GameEngine::new(PieceSource::bag(12345));
    engine.new_game(10, 20, None).unwrap();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if engine.is_game_over() {
                engine.new_game(10, 20, None).unwrap();
            }
            black_box(engine.hard_drop());
        })
    });
}

fn bench_can_place(c: &mut Criterion) {
    let grid = Grid::from_rows(&[
        "..........",
        "..........",
        "..........",
        "..........",
        "##.####.##",
        "#########.",
    ])
    .unwrap();
    let piece = Piece::spawn(PieceKind::T, 10);

    c.bench_function("can_place", |b| {
        b.iter(|| can_place(black_box(&grid), black_box(&piece)))
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut engine = GameEngine::new(PieceSource::bag(12345));
    engine.new_game(10, 20, None).unwrap();

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            engine.move_left();
            engine.rotate();
            engine.move_right();
        })
    });
}

criterion_group!(
    benches,
    bench_step,
    bench_line_clear,
    bench_hard_drop,
    bench_can_place,
    bench_move_and_rotate
);
criterion_main!(benches);
