use labyrinth_core::{
    ItemKind, MAX_LIFE, MazeGame, PlayerState, REQUIRED_ITEMS, Screen, Session, Tile, WallStyle,
};
use ratatui::{prelude::*, widgets::*};

/// Renders whichever screen the session is on.
pub fn draw(frame: &mut Frame, session: &Session, message: &str) {
    match session.screen() {
        Screen::Home => render_banner(
            frame,
            "Labyrinth",
            vec![
                Line::from("Collect three items, avoid the fire, then reach the exit."),
                Line::from(format!("{} levels", session.catalog().level_count())),
            ],
            "Enter: start   q: quit",
            message,
        ),
        Screen::Playing(game) => render_game(frame, game, message),
        Screen::Won { level, advancing } => {
            let next = if *advancing {
                "n: next level   r: replay   Esc: home   q: quit"
            } else {
                "r: replay   Esc: home   q: quit"
            };
            render_banner(
                frame,
                "Victory",
                vec![Line::from(format!("Level {level} cleared."))],
                next,
                message,
            )
        }
        Screen::Defeated { level } => render_banner(
            frame,
            "Defeat",
            vec![Line::from(format!("You fell on level {level}."))],
            "r: start over   Esc: home   q: quit",
            message,
        ),
    }
}

/// A centred title panel used by the menu screens.
fn render_banner<'a>(
    frame: &mut Frame,
    title: &'a str,
    body: Vec<Line<'a>>,
    keys: &'a str,
    message: &'a str,
) {
    let mut lines = vec![
        Line::from(""),
        Line::styled(title, Style::default().bold()),
        Line::from(""),
    ];
    lines.extend(body);
    lines.push(Line::from(""));
    if !message.is_empty() {
        lines.push(Line::styled(message, Style::default().italic()));
        lines.push(Line::from(""));
    }
    lines.push(Line::styled(keys, Style::default().fg(Color::DarkGray)));

    let banner = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Labyrinth"));
    frame.render_widget(banner, frame.area());
}

fn render_game(frame: &mut Frame, game: &MazeGame, message: &str) {
    let maze_height = u16::try_from(game.grid().rows())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(maze_height), // Area for the maze
            Constraint::Length(4),        // Area for the HUD
            Constraint::Length(2),        // Area for help
        ])
        .split(frame.area());

    render_maze(frame, main_layout[0], game);
    render_hud(frame, main_layout[1], game.player(), game.max_level(), message);

    let help_text = Paragraph::new("Arrows/WASD/HJKL: move   r: retry   Esc: home   q: quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(help_text, main_layout[2]);
}

/// Glyph and colour of one tile. Wall variants get alternating shades.
fn tile_span(tile: Tile) -> Span<'static> {
    match tile {
        Tile::Wall(WallStyle::Plain) => Span::styled("█", Style::default().fg(Color::DarkGray)),
        Tile::Wall(WallStyle::Variant(n)) if n % 2 == 0 => {
            Span::styled("▓", Style::default().fg(Color::DarkGray))
        }
        Tile::Wall(WallStyle::Variant(_)) => Span::styled("▒", Style::default().fg(Color::Gray)),
        Tile::Path => Span::raw(" "),
        Tile::Fire => Span::styled("^", Style::default().fg(Color::Red).bold()),
        Tile::Exit => Span::styled(">", Style::default().fg(Color::Green).bold()),
        Tile::Player => Span::styled("@", Style::default().fg(Color::Yellow).bold()),
        Tile::Item(kind) => item_span(kind),
    }
}

fn item_span(kind: ItemKind) -> Span<'static> {
    match kind {
        ItemKind::Armor => Span::styled("]", Style::default().fg(Color::Cyan)),
        ItemKind::Key => Span::styled("k", Style::default().fg(Color::Yellow)),
        ItemKind::Sword => Span::styled("/", Style::default().fg(Color::White)),
        ItemKind::LifeRefill => Span::styled("♥", Style::default().fg(Color::Red)),
    }
}

/// Renders the maze, two columns per tile so cells look square.
fn render_maze(frame: &mut Frame, area: Rect, game: &MazeGame) {
    let lines: Vec<Line> = game
        .grid()
        .grid()
        .row_slices()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .flat_map(|tile| {
                    let span = tile_span(*tile);
                    // Entities sit on a path-coloured second column.
                    let filler = if tile.is_wall() {
                        span.clone()
                    } else {
                        Span::raw(" ")
                    };
                    [span, filler]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let maze = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!("Level {}", game.level()))
                .borders(Borders::ALL),
        )
        .alignment(Alignment::Center);
    frame.render_widget(maze, area);
}

/// Renders life, equipment and the last event.
fn render_hud(frame: &mut Frame, area: Rect, player: &PlayerState, max_level: u32, message: &str) {
    let hearts: String = (0..MAX_LIFE)
        .map(|i| if i < player.remaining_life { '♥' } else { '♡' })
        .collect();

    let mut status = vec![
        Span::styled(hearts, Style::default().fg(Color::Red)),
        Span::raw("  "),
    ];
    for (kind, name) in [
        (ItemKind::Armor, "armor"),
        (ItemKind::Key, "key"),
        (ItemKind::Sword, "sword"),
    ] {
        let style = if player.has(kind) {
            Style::default().fg(Color::Green).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        status.push(Span::styled(name, style));
        status.push(Span::raw(" "));
    }
    status.push(Span::raw(format!(
        " items {}/{}  level {}/{}",
        player.items_collected, REQUIRED_ITEMS, player.level, max_level
    )));

    let hud = Paragraph::new(vec![Line::from(status), Line::from(message.to_string())])
        .block(Block::default().borders(Borders::ALL).title("Inventory"));
    frame.render_widget(hud, area);
}
