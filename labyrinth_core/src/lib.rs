use serde::{Deserialize, Serialize};

pub mod game;
pub mod levels;
pub mod map;
pub mod placement;
pub mod player;
pub mod session;

pub use game::{GameStatus, LevelError, MazeGame, Outcome, Snapshot};
pub use levels::{CatalogError, LevelCatalog, LevelDefinition};
pub use map::{Grid, MazeGrid, ParseError};
pub use placement::{ItemPlacer, PlacementError};
pub use player::{MAX_LIFE, PlayerState, REQUIRED_ITEMS};
pub use session::{Screen, Session};

/// Represents a 2D grid coordinate, row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// The start square of every level.
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Returns the neighbouring cell in `direction`, or `None` if it would
    /// fall outside a `rows` x `cols` grid.
    pub fn step(self, direction: Direction, rows: usize, cols: usize) -> Option<Position> {
        let (drow, dcol) = direction.offset();
        let row = self.row.checked_add_signed(drow)?;
        let col = self.col.checked_add_signed(dcol)?;
        if row < rows && col < cols {
            Some(Position { row, col })
        } else {
            None
        }
    }
}

/// A discrete movement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector as `(row delta, column delta)`.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Collectible items that can be scattered on the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Armor,
    Key,
    Sword,
    LifeRefill,
}

/// Visual variant of a wall tile. Only the renderer looks at this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallStyle {
    Plain,
    /// Numbered tiling variant, `0..=9`.
    Variant(u8),
}

/// The semantic content of one maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall(WallStyle),
    Path,
    Fire,
    Exit,
    Player,
    Item(ItemKind),
}

impl Tile {
    /// Decodes one character of the level text format.
    pub fn from_symbol(symbol: char) -> Option<Tile> {
        let tile = match symbol {
            'x' => Tile::Wall(WallStyle::Plain),
            '0'..='9' => Tile::Wall(WallStyle::Variant(symbol as u8 - b'0')),
            'c' => Tile::Path,
            'f' => Tile::Fire,
            'A' => Tile::Exit,
            'P' => Tile::Player,
            'l' => Tile::Item(ItemKind::LifeRefill),
            'a' => Tile::Item(ItemKind::Armor),
            'k' => Tile::Item(ItemKind::Key),
            's' => Tile::Item(ItemKind::Sword),
            _ => return None,
        };
        Some(tile)
    }

    /// Encodes the tile back into the level text format.
    pub fn symbol(self) -> char {
        match self {
            Tile::Wall(WallStyle::Plain) => 'x',
            Tile::Wall(WallStyle::Variant(n)) => char::from(b'0' + n.min(9)),
            Tile::Path => 'c',
            Tile::Fire => 'f',
            Tile::Exit => 'A',
            Tile::Player => 'P',
            Tile::Item(ItemKind::LifeRefill) => 'l',
            Tile::Item(ItemKind::Armor) => 'a',
            Tile::Item(ItemKind::Key) => 'k',
            Tile::Item(ItemKind::Sword) => 's',
        }
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        matches!(self, Tile::Wall(_))
    }
}
