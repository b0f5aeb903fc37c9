use blockfall::point::Point;
use blockfall::{COLUMNS, Game, Key, ROWS, RandomShapes, ShapeSequence, Status, Tetromino};

#[test]
fn three_i_pieces_clear_a_line() {
    // I pieces side by side fill a whole 12-wide row
    let mut game = Game::new(ShapeSequence::of(&[Tetromino::I]));
    for target in [0, 4, 8] {
        while game.current().pos.x() > target {
            game.handle_input(Key::Left);
        }
        while game.current().pos.x() < target {
            game.handle_input(Key::Right);
        }
        assert_eq!(target, game.current().pos.x());
        for _ in 0..ROWS {
            game.handle_input(Key::Down);
        }
    }
    assert_eq!(1, game.lines_cleared());
    assert_eq!("Lines: 1", game.score_label());
    assert!(game.grid().rows().flatten().all(Option::is_none));
    assert_eq!(Status::Running, game.status());
}

#[test]
fn stacking_without_clears_ends_the_game() {
    let mut game = Game::new(ShapeSequence::of(&[Tetromino::O]));
    let mut frames = 0;
    while game.tick() == Status::Running {
        frames += 1;
        assert!(frames < 10_000, "game never ended");
    }
    assert!(game.is_over());
    assert_eq!(0, game.lines_cleared());
    // every landed O sits in the spawn columns
    let filled = game.grid().rows().flatten().filter(|c| c.is_some()).count();
    assert_eq!(ROWS * 2, filled);
}

#[test]
fn left_wall_stack_keeps_running() {
    let mut game = Game::new(ShapeSequence::of(&[Tetromino::O, Tetromino::I]));
    for _ in 0..COLUMNS {
        game.handle_input(Key::Left);
    }
    assert_eq!(Point(0, 0), game.current().pos);
    // twenty rows of fall, then the landing press
    for _ in 0..21 {
        game.handle_input(Key::Down);
    }
    assert_eq!(Some(Tetromino::O.color()), game.grid().cell(21, 0));
    assert_eq!(Some(Tetromino::O.color()), game.grid().cell(20, 1));
    assert_eq!(Tetromino::I, game.current().tetromino);
    assert_eq!(Point(4, 0), game.current().pos);
    assert_eq!(Status::Running, game.status());
}

#[test]
fn same_seed_same_game() {
    let mut a = Game::new(RandomShapes::seeded(2024));
    let mut b = Game::new(RandomShapes::seeded(2024));
    let keys = [Key::Left, Key::Up, Key::Right, Key::Down, Key::Down, Key::Up];
    for i in 0..2000 {
        let key = keys[i % keys.len()];
        a.handle_input(key);
        b.handle_input(key);
        a.tick();
        b.tick();
        assert_eq!(a.current(), b.current());
        assert_eq!(a.next(), b.next());
    }
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.lines_cleared(), b.lines_cleared());
    assert_eq!(a.status(), b.status());
}

#[test]
fn grid_never_changes_size() {
    let mut game = Game::new(RandomShapes::seeded(9));
    while !game.is_over() {
        game.handle_input(Key::Down);
        assert_eq!(ROWS, game.grid().rows().count());
        assert!(game.grid().rows().all(|row| row.len() == COLUMNS));
    }
}
