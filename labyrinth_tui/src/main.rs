mod ui;

use anyhow::{Context, Result, bail};
use clap::Parser;
use labyrinth_core::{
    Direction as Step, ItemKind, ItemPlacer, LevelCatalog, LevelDefinition, Outcome, Screen, Session,
    levels::DEFAULT_ITEMS,
};
use ratatui::{
    crossterm::{
        self,
        event::{self, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    prelude::*,
};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::{
    fs::File,
    io::{self, Stdout},
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Parser, Debug)]
#[command(version, about = "Collect three items and find the exit", long_about = None)]
struct Args {
    /// Skip the title screen and start directly at this level
    #[arg(short, long, value_name = "LEVEL")]
    level: Option<u32>,

    /// Seed for item placement; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory holding level-1.txt, level-2.txt, ... instead of the built-in levels
    #[arg(long, value_name = "DIR")]
    levels_dir: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

struct App {
    /// Screen flow and the running game.
    session: Session,
    /// Feedback for the last action, shown under the map.
    message: String,
    /// Flag to control the main loop.
    should_quit: bool,
}

impl App {
    fn new(session: Session) -> Self {
        App {
            session,
            message: String::new(),
            should_quit: false,
        }
    }

    fn start(&mut self, level: u32) {
        match self.session.start(level) {
            Ok(()) => {
                self.message = format!("Level {level}: collect 3 items, then find the exit.")
            }
            Err(err) => {
                log::error!("could not start level {}: {}", level, err);
                self.message = err.to_string();
            }
        }
    }

    fn step(&mut self, step: Step) {
        if let Some(outcome) = self.session.handle_move(step) {
            if let Some(text) = describe(outcome) {
                self.message = text.to_string();
            }
        }
    }

    fn retry(&mut self) {
        if let Err(err) = self.session.retry() {
            log::error!("retry failed: {}", err);
            self.message = err.to_string();
        } else {
            self.message.clear();
        }
    }

    fn next_level(&mut self) {
        if let Err(err) = self.session.next_level() {
            log::error!("next level failed: {}", err);
            self.message = err.to_string();
        } else {
            self.message.clear();
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }

        match Mode::of(self.session.screen()) {
            Mode::Home => {
                if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.start(1);
                }
            }
            Mode::Playing => match code {
                KeyCode::Char('r') => self.retry(),
                KeyCode::Esc => self.session.return_home(),
                code => {
                    if let Some(step) = step_for(code) {
                        self.step(step);
                    }
                }
            },
            Mode::Won => match code {
                KeyCode::Char('n') | KeyCode::Enter => self.next_level(),
                KeyCode::Char('r') => self.retry(),
                KeyCode::Esc => self.session.return_home(),
                _ => {}
            },
            Mode::Defeated => match code {
                KeyCode::Char('r') | KeyCode::Enter => self.retry(),
                KeyCode::Esc => self.session.return_home(),
                _ => {}
            },
        }
    }
}

/// Which screen is up, without borrowing the session.
#[derive(Debug, Clone, Copy)]
enum Mode {
    Home,
    Playing,
    Won,
    Defeated,
}

impl Mode {
    fn of(screen: &Screen) -> Self {
        match screen {
            Screen::Home => Mode::Home,
            Screen::Playing(_) => Mode::Playing,
            Screen::Won { .. } => Mode::Won,
            Screen::Defeated { .. } => Mode::Defeated,
        }
    }
}

/// Maps arrow keys, WASD and HJKL onto moves.
fn step_for(code: KeyCode) -> Option<Step> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Step::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Step::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(Step::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(Step::Right),
        _ => None,
    }
}

fn describe(outcome: Outcome) -> Option<&'static str> {
    let text = match outcome {
        Outcome::OffField => "You can't walk off the map.",
        Outcome::Blocked | Outcome::Moved | Outcome::Ignored => return None,
        Outcome::ItemGained(kind) => match kind {
            ItemKind::Armor => "Picked up the armor.",
            ItemKind::Key => "Picked up the key.",
            ItemKind::Sword => "Picked up the sword.",
            ItemKind::LifeRefill => "Picked up a life.",
        },
        Outcome::LifeLostReset => "Burned! Back to the start.",
        Outcome::Defeat => "Defeated.",
        Outcome::VictoryAdvance => "Level cleared!",
        Outcome::VictoryFinal => "Every level cleared. Well done!",
    };
    Some(text)
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();
    setup_logging(&args)?;

    let catalog = match &args.levels_dir {
        Some(dir) => load_catalog(dir)?,
        None => LevelCatalog::builtin(),
    };
    if let Some(level) = args.level {
        if !catalog.contains(level) {
            bail!(
                "Level {} does not exist; choose 1 to {}",
                level,
                catalog.level_count()
            );
        }
    }
    let placer = match args.seed {
        Some(seed) => ItemPlacer::seeded(seed),
        None => ItemPlacer::from_os_rng(),
    };

    let mut app = App::new(Session::new(catalog, placer));
    if let Some(level) = args.level {
        app.start(level);
    }

    // Set up the terminal
    let mut terminal = setup_terminal()?;

    // Run the main application loop, restoring the terminal even if it fails
    let result = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;

    result
}

fn setup_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(
        args.log_level,
        ConfigBuilder::new()
            .set_target_level(LevelFilter::Error)
            .build(),
        file,
    )?;
    Ok(())
}

/// Reads `level-1.txt`, `level-2.txt`, ... from `dir` until one is missing.
fn load_catalog(dir: &Path) -> Result<LevelCatalog> {
    let mut levels = Vec::new();
    loop {
        let path = dir.join(format!("level-{}.txt", levels.len() + 1));
        if !path.exists() {
            break;
        }
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read level file {}", path.display()))?;
        levels.push(LevelDefinition::new(source, DEFAULT_ITEMS.to_vec()));
    }
    if levels.is_empty() {
        bail!("No level-1.txt found in {}", dir.display());
    }
    log::info!("loaded {} level(s) from {}", levels.len(), dir.display());
    Ok(LevelCatalog::new(levels))
}

/// Configures the terminal for TUI interaction.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs the main loop of the TUI application.
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let poll_rate = Duration::from_millis(250);

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, &app.session, &app.message))?;

        if crossterm::event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }
    }
    Ok(())
}
