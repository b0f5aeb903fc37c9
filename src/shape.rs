//! The fixed catalog of the seven tetrominoes and the bitmask shapes they are made of.

use arrayvec::ArrayVec;
use ratatui::style::Color;

/// Largest extent of any shape, in either direction.
pub const MAX_SPAN: usize = 4;

/// One row of a shape. Bit `width - 1 - col` is set when column `col` is occupied,
/// so the literals below read left to right like the pieces they draw.
type Line = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tetromino {
    I,
    T,
    O,
    S,
    Z,
    J,
    L,
}

impl Tetromino {
    /// Catalog order. Shape sources pick an index into this slice.
    pub const ALL: [Tetromino; 7] = [
        Tetromino::I,
        Tetromino::T,
        Tetromino::O,
        Tetromino::S,
        Tetromino::Z,
        Tetromino::J,
        Tetromino::L,
    ];

    pub const fn color(self) -> Color {
        match self {
            Tetromino::I => Color::Rgb(0xAD, 0xD8, 0xE6), // light blue
            Tetromino::T => Color::Rgb(0x80, 0x00, 0x80), // purple
            Tetromino::O => Color::Rgb(0xFF, 0xFF, 0x00), // yellow
            Tetromino::S => Color::Rgb(0x00, 0xFF, 0x00), // green
            Tetromino::Z => Color::Rgb(0xFF, 0x00, 0x00), // red
            Tetromino::J => Color::Rgb(0xFF, 0xA5, 0x00), // orange
            Tetromino::L => Color::Rgb(0x00, 0x00, 0x8B), // dark blue
        }
    }

    const fn template(self) -> (usize, &'static [Line]) {
        match self {
            Tetromino::I => (4, &[
                0b_1111, //####
            ]),
            Tetromino::T => (3, &[
                0b_010, // #
                0b_111, //###
            ]),
            Tetromino::O => (2, &[
                0b_11, //##
                0b_11, //##
            ]),
            Tetromino::S => (3, &[
                0b_011, // ##
                0b_110, //##
            ]),
            Tetromino::Z => (3, &[
                0b_110, //##
                0b_011, // ##
            ]),
            Tetromino::J => (3, &[
                0b_100, //#
                0b_111, //###
            ]),
            Tetromino::L => (3, &[
                0b_001, //  #
                0b_111, //###
            ]),
        }
    }

    /// A fresh copy of the spawn orientation.
    pub fn shape(self) -> Shape {
        let (width, lines) = self.template();
        Shape {
            lines: lines.iter().copied().collect(),
            width,
        }
    }
}

/// Occupancy bitmask of a piece, at most `MAX_SPAN`×`MAX_SPAN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    lines: ArrayVec<Line, MAX_SPAN>,
    width: usize,
}

impl Shape {
    /// Builds a shape from 0/1 rows.
    ///
    /// # Panics
    ///
    /// Panics if there are more than `MAX_SPAN` rows or columns, or if the rows
    /// differ in length.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let width = rows.first().map_or(0, |row| row.len());
        assert!(
            width <= MAX_SPAN && rows.len() <= MAX_SPAN,
            "shape larger than {MAX_SPAN}x{MAX_SPAN}"
        );
        assert!(
            rows.iter().all(|row| row.len() == width),
            "shape rows differ in length"
        );
        let lines = rows
            .iter()
            .map(|row| {
                row.iter()
                    .fold(0, |line: Line, &bit| (line << 1) | Line::from(bit != 0))
            })
            .collect();
        Self { lines, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        col < self.width
            && self
                .lines
                .get(row)
                .is_some_and(|line| line & (1 << (self.width - 1 - col)) != 0)
    }

    /// Occupied `(row, col)` sub-cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height())
            .flat_map(move |row| (0..self.width).map(move |col| (row, col)))
            .filter(|&(row, col)| self.is_filled(row, col))
    }

    /// Transpose, then reverse the row order: a quarter turn counter-clockwise.
    pub fn rotated(&self) -> Self {
        let (w, h) = (self.width, self.height());
        let lines = (0..w)
            .map(|row| {
                (0..h).fold(0, |line: Line, col| {
                    (line << 1) | Line::from(self.is_filled(col, w - 1 - row))
                })
            })
            .collect();
        Self { lines, width: h }
    }
}
