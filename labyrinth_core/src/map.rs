use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::{Position, Tile};

/// Errors raised while reading a level layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Level text is empty")]
    Empty,
    #[error("Inconsistent width at row {row}: expected {expected}, found {found}")]
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unknown level symbol '{symbol}' at ({row}, {col})")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
    #[error("Second player marker found at ({row}, {col})")]
    MultiplePlayers { row: usize, col: usize },
}

/// A generic 2D grid structure.
///
/// Stores elements of type `T` in a flat vector using row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Builds a grid from a list of equally long rows.
    ///
    /// The first row fixes the column count; an empty list gives a 0x0 grid.
    ///
    /// # Arguments
    ///
    /// * `rows`: The cells, one `Vec` per row, top to bottom.
    ///
    /// # Returns
    ///
    /// `None` if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        let row_count = rows.len();
        Some(Grid {
            rows: row_count,
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Checks if the given position lies within the grid boundaries.
    #[inline]
    pub fn is_valid(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    #[inline]
    fn index_of(&self, pos: Position) -> Option<usize> {
        self.is_valid(pos).then(|| pos.row * self.cols + pos.col)
    }

    /// Gets a reference to the cell at `pos`, or `None` if out of bounds.
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index_of(pos).map(|index| &self.cells[index])
    }

    /// Returns an iterator over the cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    /// Returns an iterator that yields `(Position, &T)` for each cell in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (Position, &T)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (Position::new(index / cols, index % cols), cell))
    }

    /// Iterates over the rows as slices.
    pub fn row_slices(&self) -> impl Iterator<Item = &[T]> {
        // `chunks` panics on zero, and an empty grid has no rows anyway.
        self.cells.chunks(self.cols.max(1))
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, pos: Position) -> &Self::Output {
        match self.index_of(pos) {
            Some(index) => &self.cells[index],
            None => panic!(
                "Grid index ({}, {}) out of bounds for a {}x{} grid",
                pos.row, pos.col, self.rows, self.cols
            ),
        }
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        let (rows, cols) = (self.rows, self.cols);
        match self.index_of(pos) {
            Some(index) => &mut self.cells[index],
            None => panic!(
                "Grid index ({}, {}) out of bounds for a {}x{} grid",
                pos.row, pos.col, rows, cols
            ),
        }
    }
}

/// The tile layout of one maze.
///
/// The shape is fixed at parse time; only single cells change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeGrid {
    tiles: Grid<Tile>,
}

impl MazeGrid {
    /// Parses level text: one line per row, one symbol per column.
    ///
    /// Carriage returns and a single trailing newline are tolerated.
    pub fn parse(text: &str) -> Result<MazeGrid, ParseError> {
        let text = text.strip_suffix('\n').unwrap_or(text);
        if text.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        let mut rows: Vec<Vec<Tile>> = Vec::new();
        let mut seen_player = false;

        for (row, line) in text.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let mut tiles = Vec::with_capacity(line.len());
            for (col, symbol) in line.chars().enumerate() {
                let tile = Tile::from_symbol(symbol)
                    .ok_or(ParseError::UnknownSymbol { symbol, row, col })?;
                if tile == Tile::Player {
                    if seen_player {
                        return Err(ParseError::MultiplePlayers { row, col });
                    }
                    seen_player = true;
                }
                tiles.push(tile);
            }

            if let Some(first) = rows.first() {
                if tiles.len() != first.len() {
                    return Err(ParseError::InconsistentWidth {
                        row,
                        expected: first.len(),
                        found: tiles.len(),
                    });
                }
            }
            rows.push(tiles);
        }

        // Widths were checked row by row above.
        let tiles = Grid::from_rows(rows).ok_or(ParseError::Empty)?;
        Ok(MazeGrid { tiles })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.tiles.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.tiles.cols()
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.tiles.is_valid(pos)
    }

    /// Reads a cell without panicking; `None` outside the grid.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.tiles.get(pos).copied()
    }

    /// Reads a cell.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid. Movement validates bounds first.
    #[inline]
    pub fn tile(&self, pos: Position) -> Tile {
        self.tiles[pos]
    }

    /// Overwrites a cell. Same bounds contract as [`MazeGrid::tile`].
    #[inline]
    pub fn set_tile(&mut self, pos: Position, tile: Tile) {
        self.tiles[pos] = tile;
    }

    /// Number of cells matching `pred`.
    pub fn count(&self, pred: impl Fn(Tile) -> bool) -> usize {
        self.tiles.iter().filter(|tile| pred(**tile)).count()
    }

    /// Every position currently holding `tile`, in row-major order.
    pub fn positions_of(&self, tile: Tile) -> Vec<Position> {
        self.tiles
            .enumerate()
            .filter_map(|(pos, cell)| (*cell == tile).then_some(pos))
            .collect()
    }

    /// Read-only view of the underlying grid, for renderers.
    pub fn grid(&self) -> &Grid<Tile> {
        &self.tiles
    }

    /// Writes the grid back in the level text format.
    pub fn render(&self) -> String {
        self.tiles
            .row_slices()
            .map(|row| row.iter().map(|tile| tile.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
