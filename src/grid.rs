//! The settled playfield: collision checks, merging landed pieces and clearing full rows.

use arrayvec::ArrayVec;
use ratatui::style::Color;

use crate::piece::Piece;
use crate::point::Point;

pub const COLUMNS: usize = 12;
pub const ROWS: usize = 22;

/// `None` when empty, otherwise the color of the block that settled there.
pub type Cell = Option<Color>;
type Row = [Cell; COLUMNS];

const EMPTY_ROW: Row = [None; COLUMNS];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [Row; ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            rows: [EMPTY_ROW; ROWS],
        }
    }
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if `row >= ROWS` or `col >= COLUMNS`.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows[row][col]
    }

    /// Like [`Grid::cell`], but `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row)?.get(col).copied()
    }

    /// # Panics
    ///
    /// Panics if `row >= ROWS` or `col >= COLUMNS`.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.rows[row][col] = cell;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows.iter().map(|row| row.as_slice())
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows[row].iter().all(Option::is_some)
    }

    /// Whether any block of `piece` sits outside the side walls, below the floor,
    /// or on a settled cell. Blocks above the top row only hit the walls.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|Point(x, y)| {
            if x < 0 || x >= COLUMNS as i16 || y >= ROWS as i16 {
                return true;
            }
            y >= 0 && self.rows[y as usize][x as usize].is_some()
        })
    }

    /// Writes the piece's color into every cell it covers.
    ///
    /// The caller must have checked [`Grid::collides`] first; settled cells under the
    /// piece are overwritten. Blocks above the top row are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        let color = piece.color();
        for p in piece.cells() {
            if let Some((row, col)) = p.to_index(ROWS, COLUMNS) {
                self.rows[row][col] = Some(color);
            }
        }
    }

    /// Removes every full row, shifting the rows above it down and refilling the
    /// top with empty rows. Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> usize {
        let full: ArrayVec<usize, ROWS> = (0..ROWS).filter(|&y| self.is_row_full(y)).collect();

        // top to bottom: removing row y only moves rows above y
        for &y in &full {
            self.rows[0..=y].rotate_right(1);
            self.rows[0] = EMPTY_ROW;
        }
        full.len()
    }
}
