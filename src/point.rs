use std::ops::{Add, AddAssign, SubAssign};

/// Column/row pair. `Point(x, y)`: x grows to the right, y grows downwards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point<T>(pub T, pub T);

pub const LEFT: Point<i16> = Point(-1, 0);
pub const RIGHT: Point<i16> = Point(1, 0);
pub const DOWN: Point<i16> = Point(0, 1);

impl<T: Copy> Point<T> {
    pub fn x(&self) -> T {
        self.0
    }
    pub fn y(&self) -> T {
        self.1
    }
}

impl Point<i16> {
    /// Absolute position of a sub-cell `(row, col)` of a shape anchored here.
    pub fn offset(self, row: usize, col: usize) -> Self {
        Self(self.0 + col as i16, self.1 + row as i16)
    }

    /// `(row, column)` indices if the point lies inside a `rows`×`columns` area.
    pub fn to_index(self, rows: usize, columns: usize) -> Option<(usize, usize)> {
        let row = usize::try_from(self.1).ok().filter(|&r| r < rows)?;
        let col = usize::try_from(self.0).ok().filter(|&c| c < columns)?;
        Some((row, col))
    }
}

macro_rules! impl_point_ops {
    ($trait:ident, $method:ident) => {
        impl<T: $trait<Output = T>> $trait for Point<T> {
            type Output = Point<T>;

            fn $method(self, rhs: Self) -> Self::Output {
                let Point(x1, y1) = self;
                let Point(x2, y2) = rhs;
                Point(x1.$method(x2), y1.$method(y2))
            }
        }
    };
}
macro_rules! impl_point_assign_ops {
    ($trait:ident, $method:ident) => {
        impl<T: $trait> $trait for Point<T> {
            fn $method(&mut self, rhs: Self) {
                self.0.$method(rhs.0);
                self.1.$method(rhs.1);
            }
        }
    };
}

impl_point_ops!(Add, add);

impl_point_assign_ops!(AddAssign, add_assign);
impl_point_assign_ops!(SubAssign, sub_assign);
