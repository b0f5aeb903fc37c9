//! A falling-block puzzle: pieces drop into a 12×22 grid, full rows are cleared
//! and counted, and the game ends when a new piece has no room to spawn.

pub mod app;
pub mod config;
pub mod game;
pub mod grid;
pub mod input;
pub mod piece;
pub mod point;
pub mod shape;
pub mod ui;

pub use game::{Game, Status};
pub use grid::{COLUMNS, Cell, Grid, ROWS};
pub use input::Key;
pub use piece::{Piece, PieceFactory, RandomShapes, ShapeSequence, ShapeSource};
pub use shape::{Shape, Tetromino};
