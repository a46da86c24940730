use crate::{
    Direction,
    game::{LevelError, MazeGame, Outcome},
    levels::LevelCatalog,
    placement::ItemPlacer,
};

/// The screen a player is looking at.
#[derive(Debug, Clone)]
pub enum Screen {
    Home,
    Playing(MazeGame),
    /// `advancing` is set when a next level exists.
    Won { level: u32, advancing: bool },
    Defeated { level: u32 },
}

/// Owns the current screen and every transition between screens.
///
/// Each start builds a brand-new [`MazeGame`]; games are never reset in place.
#[derive(Debug)]
pub struct Session {
    catalog: LevelCatalog,
    placer: ItemPlacer,
    screen: Screen,
}

impl Session {
    pub fn new(catalog: LevelCatalog, placer: ItemPlacer) -> Self {
        Self {
            catalog,
            placer,
            screen: Screen::Home,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// Starts `level` from scratch. On error the current screen is kept.
    pub fn start(&mut self, level: u32) -> Result<(), LevelError> {
        let game = MazeGame::new(&self.catalog, level, &mut self.placer)?;
        log::info!("starting level {}", level);
        self.screen = Screen::Playing(game);
        Ok(())
    }

    /// Forwards a move to the running game and follows any screen change it causes.
    ///
    /// Returns `None` when no game is running.
    pub fn handle_move(&mut self, direction: Direction) -> Option<Outcome> {
        let Screen::Playing(game) = &mut self.screen else {
            return None;
        };
        let level = game.level();
        let outcome = game.request_move(direction);
        match outcome {
            Outcome::Defeat => self.screen = Screen::Defeated { level },
            Outcome::VictoryAdvance => {
                self.screen = Screen::Won {
                    level,
                    advancing: true,
                }
            }
            Outcome::VictoryFinal => self.screen = Screen::Home,
            _ => {}
        }
        Some(outcome)
    }

    /// Plays again: the same level while playing or after a win, level 1 after a defeat.
    ///
    /// Does nothing on the home screen.
    pub fn retry(&mut self) -> Result<(), LevelError> {
        let level = match &self.screen {
            Screen::Home => return Ok(()),
            Screen::Playing(game) => game.level(),
            Screen::Won { level, .. } => *level,
            Screen::Defeated { .. } => 1,
        };
        self.start(level)
    }

    /// Moves on after a win. Does nothing unless a next level exists.
    pub fn next_level(&mut self) -> Result<(), LevelError> {
        match self.screen {
            Screen::Won {
                level,
                advancing: true,
            } => self.start(level + 1),
            _ => Ok(()),
        }
    }

    pub fn return_home(&mut self) {
        self.screen = Screen::Home;
    }
}
