use serde::{Deserialize, Serialize};

use crate::{
    Direction, ItemKind, Position, Tile,
    levels::{CatalogError, LevelCatalog},
    map::{MazeGrid, ParseError},
    placement::{ItemPlacer, PlacementError},
    player::PlayerState,
};

/// Errors that stop a level from being built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Malformed level: {0}")]
    Malformed(#[from] ParseError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error("Start cell (0, 0) holds {0:?}; it must be a path or the player marker")]
    BlockedStart(Tile),
}

/// Lifecycle of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    Defeated,
    /// `advancing` is set while more levels remain after this one.
    Won { advancing: bool },
}

/// What a move request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Target lies outside the maze.
    OffField,
    Blocked,
    Moved,
    ItemGained(ItemKind),
    /// Fire cost a life and sent the player back to the start.
    LifeLostReset,
    Defeat,
    VictoryAdvance,
    VictoryFinal,
    /// The game had already ended; nothing changed.
    Ignored,
}

/// Read-only view of a game, handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: &'a MazeGrid,
    pub player: &'a PlayerState,
    pub status: GameStatus,
}

/// A maze and the player walking it, for one level.
#[derive(Debug, Clone)]
pub struct MazeGame {
    grid: MazeGrid,
    player: PlayerState,
    status: GameStatus,
    max_level: u32,
}

impl MazeGame {
    /// Builds a fresh game for `level`.
    ///
    /// The level text is parsed, the player marker claims the start cell and
    /// only then are the level's items scattered over the remaining path.
    ///
    /// # Arguments
    ///
    /// * `catalog`: Where the level text and item list come from.
    /// * `level`: 1-based level number.
    /// * `placer`: Randomness for item placement.
    ///
    /// # Errors
    ///
    /// Any [`LevelError`]; nothing is built on failure.
    pub fn new(
        catalog: &LevelCatalog,
        level: u32,
        placer: &mut ItemPlacer,
    ) -> Result<MazeGame, LevelError> {
        let mut grid = MazeGrid::parse(catalog.source_for(level)?)?;
        // The start cell must hold the marker before items go down, or one could land on it.
        claim_start(&mut grid)?;
        placer.place_items(&mut grid, catalog.items_for(level)?)?;
        log::debug!(
            "built level {}/{} ({}x{})",
            level,
            catalog.level_count(),
            grid.rows(),
            grid.cols()
        );
        Self::from_grid(grid, level, catalog.level_count())
    }

    /// Wraps an already prepared grid.
    ///
    /// A player marker anywhere but the start cell is turned back into path.
    ///
    /// # Errors
    ///
    /// [`LevelError::BlockedStart`] if `(0, 0)` is not a path or the player,
    /// and [`ParseError::Empty`] for a grid without cells.
    pub fn from_grid(
        mut grid: MazeGrid,
        level: u32,
        max_level: u32,
    ) -> Result<MazeGame, LevelError> {
        claim_start(&mut grid)?;
        Ok(MazeGame {
            grid,
            player: PlayerState::new(level),
            status: GameStatus::Active,
            max_level,
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn level(&self) -> u32 {
        self.player.level
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            player: &self.player,
            status: self.status,
        }
    }

    /// Resolves one step of the player in `direction`.
    pub fn request_move(&mut self, direction: Direction) -> Outcome {
        if self.status != GameStatus::Active {
            return Outcome::Ignored;
        }

        let Some(target) = self
            .player
            .position
            .step(direction, self.grid.rows(), self.grid.cols())
        else {
            return Outcome::OffField;
        };

        let outcome = match self.grid.tile(target) {
            Tile::Wall(_) => Outcome::Blocked,
            Tile::Path => {
                self.move_to(target);
                Outcome::Moved
            }
            Tile::Item(kind) => {
                self.player.apply_pickup(kind);
                self.move_to(target);
                Outcome::ItemGained(kind)
            }
            Tile::Fire => self.burn(),
            Tile::Exit => self.reach_exit(),
            // Only the current cell holds the marker, and it is never a neighbour.
            Tile::Player => Outcome::Blocked,
        };

        log::trace!(
            "{:?} -> ({}, {}): {:?}",
            direction,
            target.row,
            target.col,
            outcome
        );
        outcome
    }

    fn move_to(&mut self, target: Position) {
        self.grid.set_tile(self.player.position, Tile::Path);
        self.player.position = target;
        self.grid.set_tile(target, Tile::Player);
    }

    fn burn(&mut self) -> Outcome {
        if self.player.remaining_life <= 1 {
            log::info!("level {}: burned with no life left", self.level());
            self.status = GameStatus::Defeated;
            return Outcome::Defeat;
        }
        self.player.remaining_life -= 1;
        self.move_to(Position::ORIGIN);
        Outcome::LifeLostReset
    }

    fn reach_exit(&mut self) -> Outcome {
        if !self.player.can_exit() {
            log::info!(
                "level {}: exit reached with {} item(s)",
                self.level(),
                self.player.items_collected
            );
            self.status = GameStatus::Defeated;
            return Outcome::Defeat;
        }

        let advancing = self.level() < self.max_level;
        log::info!("level {} cleared", self.level());
        self.status = GameStatus::Won { advancing };
        if advancing {
            Outcome::VictoryAdvance
        } else {
            Outcome::VictoryFinal
        }
    }
}

/// Puts the player marker on the start cell and clears any other marker.
fn claim_start(grid: &mut MazeGrid) -> Result<(), LevelError> {
    match grid.get(Position::ORIGIN) {
        Some(Tile::Path | Tile::Player) => {}
        Some(other) => return Err(LevelError::BlockedStart(other)),
        None => return Err(ParseError::Empty.into()),
    }
    for stray in grid.positions_of(Tile::Player) {
        grid.set_tile(stray, Tile::Path);
    }
    grid.set_tile(Position::ORIGIN, Tile::Player);
    Ok(())
}
