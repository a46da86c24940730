use serde::{Deserialize, Serialize};

use crate::{ItemKind, Position};

/// Life a player starts with, and the most they can hold.
pub const MAX_LIFE: u32 = 5;

/// Pickups needed before the exit counts as a win.
pub const REQUIRED_ITEMS: u32 = 3;

/// Inventory and location of the player within one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Position,
    pub remaining_life: u32,
    pub armor: u32,
    pub key: u32,
    pub sword: u32,
    /// Every pickup, life refills included. Gates the exit.
    pub items_collected: u32,
    pub level: u32,
}

impl PlayerState {
    pub fn new(level: u32) -> Self {
        Self {
            position: Position::ORIGIN,
            remaining_life: MAX_LIFE,
            armor: 0,
            key: 0,
            sword: 0,
            items_collected: 0,
            level,
        }
    }

    /// Credits one pickup of `kind`.
    ///
    /// A life refill at full life is still consumed and still counts
    /// toward `items_collected`.
    pub fn apply_pickup(&mut self, kind: ItemKind) {
        match kind {
            ItemKind::Armor => self.armor += 1,
            ItemKind::Key => self.key += 1,
            ItemKind::Sword => self.sword += 1,
            ItemKind::LifeRefill => {
                if self.remaining_life < MAX_LIFE {
                    self.remaining_life += 1;
                }
            }
        }
        self.items_collected += 1;
    }

    /// Whether at least one `kind` is held. Life refills are never held.
    pub fn has(&self, kind: ItemKind) -> bool {
        match kind {
            ItemKind::Armor => self.armor > 0,
            ItemKind::Key => self.key > 0,
            ItemKind::Sword => self.sword > 0,
            ItemKind::LifeRefill => false,
        }
    }

    pub fn can_exit(&self) -> bool {
        self.items_collected >= REQUIRED_ITEMS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_starts_at_origin_with_full_life() {
        let player = PlayerState::new(2);
        assert_eq!(player.position, Position::ORIGIN);
        assert_eq!(player.remaining_life, MAX_LIFE);
        assert_eq!(player.items_collected, 0);
        assert_eq!(player.level, 2);
        assert!(!player.can_exit());
    }

    #[test]
    fn equipment_pickups_fill_their_slot() {
        let mut player = PlayerState::new(1);
        player.apply_pickup(ItemKind::Armor);
        player.apply_pickup(ItemKind::Sword);
        player.apply_pickup(ItemKind::Sword);

        assert_eq!((player.armor, player.key, player.sword), (1, 0, 2));
        assert_eq!(player.items_collected, 3);
        assert!(player.has(ItemKind::Armor));
        assert!(!player.has(ItemKind::Key));
        assert!(player.can_exit());
    }

    #[test]
    fn life_refill_is_capped_but_still_counts() {
        let mut player = PlayerState::new(1);
        player.apply_pickup(ItemKind::LifeRefill);
        assert_eq!(player.remaining_life, MAX_LIFE);
        assert_eq!(player.items_collected, 1);

        player.remaining_life = 3;
        player.apply_pickup(ItemKind::LifeRefill);
        assert_eq!(player.remaining_life, 4);
        assert_eq!(player.items_collected, 2);
    }
}
