use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{ItemKind, Position, Tile, map::MazeGrid};

/// Rejection-sampling attempts per item before falling back to a full scan.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("No free path cell left for {item:?} after placing {placed} item(s)")]
    Unplaceable { item: ItemKind, placed: usize },
}

/// Scatters collectible items over the open cells of a fresh maze.
#[derive(Debug)]
pub struct ItemPlacer {
    rng: StdRng,
    max_attempts: usize,
}

impl ItemPlacer {
    /// Creates a placer with a fixed seed.
    ///
    /// The same seed, grid and item list always produce the same layout,
    /// which is what tests and `--seed` rely on.
    ///
    /// # Arguments
    ///
    /// * `seed`: Seed for the internal `StdRng`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Creates a placer seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets how many random cells are tried per item before scanning the whole grid.
    ///
    /// # Arguments
    ///
    /// * `max_attempts`: Rejection-sampling budget per item. Zero skips
    ///   sampling and always scans.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Overwrites one random `Path` cell per item, in order.
    ///
    /// Returns where each item landed. Items placed before a failure stay on
    /// the grid; callers discard the grid on error.
    pub fn place_items(
        &mut self,
        grid: &mut MazeGrid,
        items: &[ItemKind],
    ) -> Result<Vec<Position>, PlacementError> {
        let mut placed = Vec::with_capacity(items.len());
        for &item in items {
            let pos = self
                .sample_path_cell(grid)
                .or_else(|| self.scan_path_cells(grid))
                .ok_or(PlacementError::Unplaceable {
                    item,
                    placed: placed.len(),
                })?;
            grid.set_tile(pos, Tile::Item(item));
            log::debug!("placed {:?} at ({}, {})", item, pos.row, pos.col);
            placed.push(pos);
        }
        Ok(placed)
    }

    fn sample_path_cell(&mut self, grid: &MazeGrid) -> Option<Position> {
        let (rows, cols) = (grid.rows(), grid.cols());
        if rows == 0 || cols == 0 {
            return None;
        }
        (0..self.max_attempts)
            .map(|_| {
                Position::new(
                    self.rng.random_range(0..rows),
                    self.rng.random_range(0..cols),
                )
            })
            .find(|pos| grid.tile(*pos) == Tile::Path)
    }

    fn scan_path_cells(&mut self, grid: &MazeGrid) -> Option<Position> {
        let free = grid.positions_of(Tile::Path);
        log::debug!(
            "sampling budget spent, choosing among {} free cell(s)",
            free.len()
        );
        free.choose(&mut self.rng).copied()
    }
}
