//! The game controller: one grid, a falling piece, the piece after it, and the line count.
//!
//! Nothing here schedules itself. A driver calls [`Game::tick`] once per frame and
//! [`Game::handle_input`] for every key press, and reads the state back to draw it.

use log::{debug, info, trace};

use crate::grid::Grid;
use crate::input::Key;
use crate::piece::{Piece, PieceFactory, RandomShapes, ShapeSource};
use crate::point::{DOWN, LEFT, Point, RIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    GameOver,
}

pub struct Game<S = RandomShapes> {
    grid: Grid,
    current: Piece,
    next: Piece,
    lines: u32,
    status: Status,
    factory: PieceFactory<S>,
}

impl<S: ShapeSource> Game<S> {
    pub fn new(source: S) -> Self {
        let mut factory = PieceFactory::new(source);
        let current = factory.create_piece();
        let next = factory.create_piece();
        Self {
            grid: Grid::new(),
            current,
            next,
            lines: 0,
            status: Status::Running,
            factory,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::GameOver
    }

    pub fn score_label(&self) -> String {
        format!("Lines: {}", self.lines)
    }

    /// One frame: the current piece falls a row, or lands if it can't.
    ///
    /// Call after drawing the frame. Does nothing once the game is over.
    pub fn tick(&mut self) -> Status {
        if self.is_over() {
            return self.status;
        }
        if self.spawn_blocked() {
            self.game_over();
            return self.status;
        }
        self.fall();
        self.status
    }

    /// Applies a key press immediately. Moves that would collide are undone.
    pub fn handle_input(&mut self, key: Key) {
        if self.is_over() {
            return;
        }
        match key {
            Key::Left => self.shift(LEFT),
            Key::Right => self.shift(RIGHT),
            Key::Down => self.fall(),
            Key::Up => self.rotate(),
        }
    }

    fn shift(&mut self, delta: Point<i16>) {
        self.current.pos += delta;
        if self.grid.collides(&self.current) {
            self.current.pos -= delta;
            trace!("blocked move to {:?}", self.current.pos + delta);
        }
    }

    fn rotate(&mut self) {
        let previous = self.current.shape.clone();
        self.current.rotate();
        if self.grid.collides(&self.current) {
            self.current.shape = previous;
            trace!("blocked rotation at {:?}", self.current.pos);
        }
    }

    /// Moves down one row; on collision, locks the piece where it was.
    fn fall(&mut self) {
        self.current.pos += DOWN;
        if self.grid.collides(&self.current) {
            self.current.pos -= DOWN;
            self.land();
        }
    }

    fn land(&mut self) {
        debug!(
            "{:?} landed at {:?}",
            self.current.tetromino, self.current.pos
        );
        self.grid.merge(&self.current);

        let cleared = self.grid.clear_lines();
        if cleared > 0 {
            self.lines += cleared as u32;
            info!("cleared {cleared} line(s), {}", self.score_label());
        }

        let next = self.factory.create_piece();
        self.current = std::mem::replace(&mut self.next, next);
        if self.spawn_blocked() {
            self.game_over();
        }
    }

    /// A piece that hasn't fully entered the grid, or overlaps it, can't be played.
    fn spawn_blocked(&self) -> bool {
        self.current.pos.y() < 0 || self.grid.collides(&self.current)
    }

    fn game_over(&mut self) {
        self.status = Status::GameOver;
        info!("game over, {}", self.score_label());
    }
}
