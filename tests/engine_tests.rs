//! Engine tests - end-to-end scenarios through the public command surface

use std::cell::RefCell;
use std::rc::Rc;

use tetris_board::core::{
    Change, CoreError, GameEngine, GameEvent, Grid, Piece, PieceSource, StepResult,
};
use tetris_board::types::{Command, GameStatus, PieceKind, Rotation};

fn engine_with(kinds: &[PieceKind]) -> GameEngine {
    GameEngine::new(PieceSource::sequence(kinds).unwrap())
}

fn record(engine: &mut GameEngine) -> Rc<RefCell<Vec<GameEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    engine.subscribe(move |event: &GameEvent| sink.borrow_mut().push(event.clone()));
    log
}

/// 20-row grid, empty except for `bottom` rows stacked at the floor.
fn grid_with_floor(bottom: &[&str]) -> Grid {
    let mut rows = vec![".........."; 20 - bottom.len()];
    rows.extend_from_slice(bottom);
    Grid::from_rows(&rows).unwrap()
}

// ============== Gravity and Locking ==============

#[test]
fn test_i_piece_falls_nineteen_rows_then_locks() {
    let mut engine = engine_with(&[PieceKind::I]);
    engine.new_game(10, 20, None).unwrap();

    for i in 0..19 {
        assert_eq!(engine.move_down(), StepResult::Moved, "move {} should succeed", i);
    }
    match engine.move_down() {
        StepResult::Locked(clear) => assert_eq!(clear.lines(), 0),
        other => panic!("expected lock, got {:?}", other),
    }

    for x in 3..7 {
        assert_eq!(engine.grid().is_occupied(x, 19), Ok(true));
    }
    assert_eq!(engine.grid().is_occupied(2, 19), Ok(false));
    assert_eq!(engine.grid().occupied_count(), 4);
    assert_eq!(engine.pieces_locked(), 1);
    assert_eq!(engine.active(), Some(Piece::spawn(PieceKind::I, 10)));
}

#[test]
fn test_step_is_move_down() {
    let mut engine = engine_with(&[PieceKind::T]);
    engine.new_game(10, 20, None).unwrap();

    assert_eq!(engine.step(), StepResult::Moved);
    assert_eq!(engine.active().map(|p| p.y), Some(1));
}

#[test]
fn test_hard_drop_clears_completed_row() {
    let mut engine = engine_with(&[PieceKind::I]);
    engine
        .new_game_on(grid_with_floor(&["###....###"]), None)
        .unwrap();
    let events = record(&mut engine);

    match engine.hard_drop() {
        StepResult::Locked(clear) => assert_eq!(clear.rows.as_slice(), &[19]),
        other => panic!("expected lock, got {:?}", other),
    }
    assert_eq!(engine.grid().occupied_count(), 0);
    assert_eq!(engine.lines_cleared(), 1);

    let events = events.borrow();
    let drops = events
        .iter()
        .filter(|e| **e == GameEvent::StateChanged(Change::Dropped))
        .count();
    assert_eq!(drops, 19);
    let tail: Vec<_> = events[drops..].to_vec();
    assert!(matches!(tail[0], GameEvent::Locked { ref cleared, .. } if cleared.lines() == 1));
    assert!(matches!(tail[1], GameEvent::LinesCleared(ref c) if c.rows.as_slice() == [19]));
    assert_eq!(tail[2], GameEvent::StateChanged(Change::Spawned));
    assert_eq!(tail.len(), 3);
}

#[test]
fn test_clear_removes_width_cells_per_row() {
    let mut engine = engine_with(&[PieceKind::O]);
    engine
        .new_game_on(grid_with_floor(&["T.........", "####..####"]), None)
        .unwrap();
    let before = engine.grid().occupied_count();

    let StepResult::Locked(clear) = engine.hard_drop() else {
        panic!("O should lock");
    };
    assert_eq!(clear.lines(), 1);
    assert_eq!(clear.rows.as_slice(), &[19]);
    assert_eq!(engine.grid().occupied_count(), before + 4 - 10);

    // The surviving row moved down into row 19 and kept its partial fill.
    let row: String = engine.grid().to_rows()[19].clone();
    assert_eq!(row, "T...OO....");
}

#[test]
fn test_double_clear_reports_both_rows() {
    let mut engine = engine_with(&[PieceKind::O]);
    engine
        .new_game_on(grid_with_floor(&["####..####", "####..####"]), None)
        .unwrap();
    let events = record(&mut engine);

    let StepResult::Locked(clear) = engine.hard_drop() else {
        panic!("O should lock");
    };
    assert_eq!(clear.rows.as_slice(), &[18, 19]);
    assert_eq!(engine.grid().occupied_count(), 0);
    assert!(events
        .borrow()
        .iter()
        .any(|e| matches!(e, GameEvent::LinesCleared(c) if c.lines() == 2)));
}

// ============== Rotation ==============

#[test]
fn test_rotate_blocked_by_wall_leaves_piece() {
    let mut engine = engine_with(&[PieceKind::I]);
    engine.new_game(10, 20, None).unwrap();

    engine.move_down();
    assert!(engine.rotate());
    assert_eq!(engine.active().unwrap().rotation, Rotation::East);
    while engine.move_right() {}
    let before = engine.active().unwrap();
    assert_eq!(before.x, 7);

    let events = record(&mut engine);
    assert!(!engine.rotate());
    assert_eq!(engine.active(), Some(before));
    assert!(events.borrow().is_empty());
}

#[test]
fn test_rotate_in_open_space_keeps_anchor() {
    let mut engine = engine_with(&[PieceKind::T]);
    engine.new_game(10, 20, None).unwrap();
    engine.move_down();

    let before = engine.active().unwrap();
    assert!(engine.rotate());
    let after = engine.active().unwrap();
    assert_eq!((after.x, after.y), (before.x, before.y));
    assert_eq!(after.rotation, Rotation::East);
}

#[test]
fn test_move_blocked_by_wall() {
    let mut engine = engine_with(&[PieceKind::O]);
    engine.new_game(10, 20, None).unwrap();

    let mut moves = 0;
    while engine.move_left() {
        moves += 1;
    }
    // O minos sit in box columns 1-2, so the anchor stops at x = -1.
    assert_eq!(moves, 4);
    assert_eq!(engine.active().unwrap().x, -1);
}

#[test]
fn test_side_move_blocked_leaves_piece() {
    let mut engine = engine_with(&[PieceKind::O]);
    engine.new_game(10, 20, None).unwrap();
    while engine.move_right() {}
    let before = engine.active().unwrap();
    assert_eq!(before.x, 7);

    let events = record(&mut engine);
    assert!(!engine.move_right());
    assert_eq!(engine.active(), Some(before));
    assert!(events.borrow().is_empty());

    assert!(engine.move_left());
    assert_eq!(
        *events.borrow(),
        vec![GameEvent::StateChanged(Change::Moved)]
    );
}

// ============== Game Over ==============

#[test]
fn test_new_game_on_full_board_is_game_over() {
    let rows = vec!["#########."; 20];
    let grid = Grid::from_rows(&rows).unwrap();
    let mut engine = engine_with(&[PieceKind::T]);
    let events = record(&mut engine);

    engine.new_game_on(grid.clone(), None).unwrap();

    assert!(engine.is_game_over());
    assert_eq!(engine.active(), None);
    assert_eq!(engine.grid(), &grid);
    assert_eq!(
        *events.borrow(),
        vec![GameEvent::StateChanged(Change::NewGame), GameEvent::GameOver]
    );
}

#[test]
fn test_stacking_ends_in_game_over() {
    let mut engine = engine_with(&[PieceKind::I]);
    engine.new_game(10, 20, None).unwrap();
    let events = record(&mut engine);

    let mut drops = 0;
    while !engine.is_game_over() {
        engine.hard_drop();
        drops += 1;
        assert!(drops <= 20, "game should end after 20 pieces");
    }

    assert_eq!(drops, 20);
    assert_eq!(engine.pieces_locked(), 20);
    // Only the locked pieces are on the grid; the colliding spawn never is.
    assert_eq!(engine.grid().occupied_count(), 80);
    assert_eq!(events.borrow().last(), Some(&GameEvent::GameOver));

    let grid = engine.grid().clone();
    assert_eq!(engine.hard_drop(), StepResult::Idle);
    assert!(!engine.move_left());
    assert!(!engine.rotate());
    assert!(!engine.pause());
    assert_eq!(engine.grid(), &grid);
}

#[test]
fn test_new_game_after_game_over() {
    let mut engine = engine_with(&[PieceKind::I]);
    engine
        .new_game_on(Grid::from_rows(&vec!["#########."; 20]).unwrap(), None)
        .unwrap();
    assert!(engine.is_game_over());

    engine.new_game(10, 20, None).unwrap();
    assert_eq!(engine.status(), GameStatus::Running);
    assert_eq!(engine.grid().occupied_count(), 0);
    assert_eq!(engine.games_played(), 2);
}

#[test]
fn test_new_game_on_rejects_full_rows() {
    let mut engine = GameEngine::default();
    let result = engine.new_game_on(grid_with_floor(&["##########"]), None);
    assert!(matches!(result, Err(CoreError::FullRows { ref rows }) if rows == &vec![19]));
    assert_eq!(engine.status(), GameStatus::NotStarted);
}

// ============== Lifecycle ==============

#[test]
fn test_commands_ignored_before_start() {
    let mut engine = GameEngine::default();
    let events = record(&mut engine);

    for command in Command::ALL {
        assert!(!engine.apply(command), "{:?} should be a no-op", command);
    }
    assert_eq!(engine.status(), GameStatus::NotStarted);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_pause_and_resume() {
    let mut engine = engine_with(&[PieceKind::L]);
    engine.new_game(10, 20, None).unwrap();
    let events = record(&mut engine);

    assert!(engine.apply(Command::Pause));
    assert_eq!(engine.status(), GameStatus::Paused);
    let frozen = engine.active();
    assert!(!engine.apply(Command::MoveLeft));
    assert_eq!(engine.step(), StepResult::Idle);
    assert_eq!(engine.active(), frozen);

    assert!(engine.apply(Command::Resume));
    assert!(engine.apply(Command::MoveLeft));
    assert_eq!(
        *events.borrow(),
        vec![
            GameEvent::StateChanged(Change::Paused),
            GameEvent::StateChanged(Change::Resumed),
            GameEvent::StateChanged(Change::Moved),
        ]
    );
}

#[test]
fn test_lookahead_becomes_active() {
    let mut engine = engine_with(&[PieceKind::S, PieceKind::Z, PieceKind::J]);
    engine.new_game(10, 20, None).unwrap();
    assert_eq!(engine.active().map(|p| p.kind), Some(PieceKind::S));
    assert_eq!(engine.next(), Some(PieceKind::Z));

    engine.hard_drop();
    assert_eq!(engine.active().map(|p| p.kind), Some(PieceKind::Z));
    assert_eq!(engine.next(), Some(PieceKind::J));
}

#[test]
fn test_seeded_games_repeat() {
    let mut a = GameEngine::new(PieceSource::bag(5));
    let mut b = GameEngine::new(PieceSource::bag(77));
    a.new_game(10, 20, Some(42)).unwrap();
    b.new_game(10, 20, Some(42)).unwrap();

    for _ in 0..10 {
        assert_eq!(a.active(), b.active());
        assert_eq!(a.next(), b.next());
        a.hard_drop();
        b.hard_drop();
    }
    assert_eq!(a.grid(), b.grid());
}

#[test]
fn test_ghost_matches_hard_drop() {
    let mut engine = engine_with(&[PieceKind::T]);
    engine
        .new_game_on(grid_with_floor(&["....#.....", "....#....."]), None)
        .unwrap();

    let ghost = engine.ghost_y().unwrap();
    let StepResult::Locked(_) = engine.hard_drop() else {
        panic!("T should lock");
    };
    // The flat side of a north T sits one row above the column top at row 18.
    assert_eq!(ghost, 16);
    assert_eq!(engine.grid().is_occupied(4, 17), Ok(true));
}

#[test]
fn test_snapshot_reflects_state() {
    let mut engine = engine_with(&[PieceKind::I, PieceKind::O]);
    engine.new_game(10, 20, Some(3)).unwrap();
    engine.hard_drop();

    let snap = engine.snapshot();
    assert_eq!((snap.width, snap.height), (10, 20));
    assert_eq!(snap.cell(3, 19), Some(Some(PieceKind::I)));
    assert_eq!(snap.cell(10, 19), None);
    assert_eq!(snap.active.map(|p| p.kind), Some(PieceKind::O));
    assert_eq!(snap.next, Some(PieceKind::I));
    assert_eq!(snap.pieces_locked, 1);
    assert!(snap.playable());
    assert_eq!(snap.board_codes()[19][3], PieceKind::I.index() as u8 + 1);
}

#[test]
fn test_unsubscribe_stops_events() {
    let mut engine = engine_with(&[PieceKind::T]);
    let log = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&log);
    let id = engine.subscribe(move |_: &GameEvent| *sink.borrow_mut() += 1);

    engine.new_game(10, 20, None).unwrap();
    assert_eq!(*log.borrow(), 1);

    assert!(engine.unsubscribe(id));
    engine.move_left();
    assert_eq!(*log.borrow(), 1);
    assert_eq!(engine.subscriber_count(), 0);
}
