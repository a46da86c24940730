use serde::{Deserialize, Serialize};

use crate::ItemKind;

/// Number of levels in the shipped catalog.
pub const LEVELS: u32 = 2;

/// Items scattered on every shipped level.
pub const DEFAULT_ITEMS: [ItemKind; 3] = [ItemKind::Armor, ItemKind::Key, ItemKind::Sword];

const LEVEL_SOURCES: [&str; LEVELS as usize] = [
    include_str!("../levels/level-1.txt"),
    include_str!("../levels/level-2.txt"),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown level {level}; levels 1 to {available} are available")]
    UnknownLevel { level: u32, available: u32 },
}

/// One maze layout together with the items scattered on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub source: String,
    pub items: Vec<ItemKind>,
}

impl LevelDefinition {
    pub fn new(source: impl Into<String>, items: Vec<ItemKind>) -> Self {
        Self {
            source: source.into(),
            items,
        }
    }
}

/// Maps 1-based level numbers to their definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<LevelDefinition>) -> Self {
        Self { levels }
    }

    /// The levels that ship with the game.
    pub fn builtin() -> Self {
        Self::new(
            LEVEL_SOURCES
                .iter()
                .map(|source| LevelDefinition::new(*source, DEFAULT_ITEMS.to_vec()))
                .collect(),
        )
    }

    pub fn level_count(&self) -> u32 {
        u32::try_from(self.levels.len()).unwrap_or(u32::MAX)
    }

    pub fn contains(&self, level: u32) -> bool {
        (1..=self.level_count()).contains(&level)
    }

    fn definition(&self, level: u32) -> Result<&LevelDefinition, CatalogError> {
        if !self.contains(level) {
            return Err(CatalogError::UnknownLevel {
                level,
                available: self.level_count(),
            });
        }
        Ok(&self.levels[level as usize - 1])
    }

    /// Raw layout text of `level`.
    pub fn source_for(&self, level: u32) -> Result<&str, CatalogError> {
        self.definition(level).map(|def| def.source.as_str())
    }

    /// Items to scatter on `level`, in placement order.
    pub fn items_for(&self, level: u32) -> Result<&[ItemKind], CatalogError> {
        self.definition(level).map(|def| def.items.as_slice())
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
