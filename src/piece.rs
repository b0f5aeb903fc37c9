//! The falling piece and the factory that spawns new ones.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::style::Color;

use crate::grid::COLUMNS;
use crate::point::Point;
use crate::shape::{Shape, Tetromino};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub tetromino: Tetromino,
    pub shape: Shape,
    /// Grid position of the shape's top-left corner.
    pub pos: Point<i16>,
}

impl Piece {
    /// Spawn orientation, horizontally centered on the top row.
    pub fn spawn(tetromino: Tetromino) -> Self {
        let shape = tetromino.shape();
        let x = (COLUMNS / 2) as i16 - (shape.width() / 2) as i16;
        Self {
            tetromino,
            shape,
            pos: Point(x, 0),
        }
    }

    pub fn color(&self) -> Color {
        self.tetromino.color()
    }

    /// Grid positions covered by the piece. May lie outside the grid.
    pub fn cells(&self) -> impl Iterator<Item = Point<i16>> + '_ {
        self.shape
            .cells()
            .map(|(row, col)| self.pos.offset(row, col))
    }

    pub fn rotate(&mut self) {
        self.shape = self.shape.rotated();
    }
}

/// Picks which catalog entry the next piece is made from.
pub trait ShapeSource {
    /// An index in `0..count`.
    fn next_shape_index(&mut self, count: usize) -> usize;
}

/// Uniform choice driven by a seedable generator.
#[derive(Debug, Clone)]
pub struct RandomShapes {
    rng: StdRng,
}

impl RandomShapes {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ShapeSource for RandomShapes {
    fn next_shape_index(&mut self, count: usize) -> usize {
        self.rng.random_range(0..count)
    }
}

/// Replays a fixed list of indices, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct ShapeSequence {
    indices: Vec<usize>,
    cursor: usize,
}

impl ShapeSequence {
    /// # Panics
    ///
    /// Panics if `indices` is empty.
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        let indices: Vec<usize> = indices.into_iter().collect();
        assert!(!indices.is_empty(), "shape sequence needs at least one index");
        Self { indices, cursor: 0 }
    }

    /// # Panics
    ///
    /// Panics if `tetrominoes` is empty.
    pub fn of(tetrominoes: &[Tetromino]) -> Self {
        Self::new(tetrominoes.iter().map(|&t| {
            Tetromino::ALL
                .iter()
                .position(|&other| other == t)
                .unwrap_or_default()
        }))
    }
}

impl ShapeSource for ShapeSequence {
    fn next_shape_index(&mut self, count: usize) -> usize {
        let index = self.indices[self.cursor];
        self.cursor = (self.cursor + 1) % self.indices.len();
        index % count
    }
}

#[derive(Debug, Clone)]
pub struct PieceFactory<S> {
    source: S,
}

impl<S: ShapeSource> PieceFactory<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn create_piece(&mut self) -> Piece {
        let index = self.source.next_shape_index(Tetromino::ALL.len());
        let piece = Piece::spawn(Tetromino::ALL[index]);
        debug!("created {:?} at {:?}", piece.tetromino, piece.pos);
        piece
    }
}
