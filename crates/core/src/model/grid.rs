use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of a puzzle grid: a concrete value or the one blank
/// the player has to infer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Value(i64),
    Blank,
}

impl Cell {
    #[must_use]
    pub fn is_blank(self) -> bool {
        matches!(self, Cell::Blank)
    }

    #[must_use]
    pub fn value(self) -> Option<i64> {
        match self {
            Cell::Value(v) => Some(v),
            Cell::Blank => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Value(v) => write!(f, "{v}"),
            Cell::Blank => f.write_str("?"),
        }
    }
}

/// A 3×3 puzzle grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Cell; 3]; 3],
}

impl Grid {
    #[must_use]
    pub fn new(cells: [[Cell; 3]; 3]) -> Self {
        Self { cells }
    }

    #[must_use]
    pub fn rows(&self) -> &[[Cell; 3]; 3] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Position of the first blank cell, if any.
    #[must_use]
    pub fn blank_position(&self) -> Option<(usize, usize)> {
        self.cells.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(|cell| cell.is_blank())
                .map(|c| (r, c))
        })
    }

    /// Number of blank cells in the grid.
    #[must_use]
    pub fn blank_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_blank())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_position_is_found() {
        let grid = Grid::new([
            [Cell::Value(1), Cell::Value(2), Cell::Value(3)],
            [Cell::Value(4), Cell::Value(5), Cell::Value(6)],
            [Cell::Value(7), Cell::Blank, Cell::Value(9)],
        ]);
        assert_eq!(grid.blank_position(), Some((2, 1)));
        assert_eq!(grid.blank_count(), 1);
    }

    #[test]
    fn cell_display_shows_placeholder() {
        assert_eq!(Cell::Value(12).to_string(), "12");
        assert_eq!(Cell::Blank.to_string(), "?");
    }
}
