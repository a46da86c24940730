use labyrinth_core::{
    Direction, GameStatus, ItemKind, MAX_LIFE, MazeGame, MazeGrid, Outcome, Position, Tile,
};

fn game(layout: &str, level: u32, max_level: u32) -> MazeGame {
    let grid = MazeGrid::parse(layout).expect("test layout parses");
    MazeGame::from_grid(grid, level, max_level).expect("test layout has an open start")
}

fn play(game: &mut MazeGame, moves: &[Direction]) -> Vec<Outcome> {
    moves.iter().map(|dir| game.request_move(*dir)).collect()
}

fn player_markers(game: &MazeGame) -> usize {
    game.grid().count(|tile| tile == Tile::Player)
}

#[test]
fn moves_off_the_edge_change_nothing() {
    for direction in Direction::ALL {
        let mut game = game("P", 1, 1);
        let grid_before = game.grid().clone();
        let player_before = game.player().clone();

        assert_eq!(game.request_move(direction), Outcome::OffField);
        assert_eq!(game.grid(), &grid_before, "{direction:?}");
        assert_eq!(game.player(), &player_before, "{direction:?}");
        assert_eq!(game.status(), GameStatus::Active);
    }
}

#[test]
fn far_edges_are_off_field_too() {
    let mut game = game("Pc\ncc", 1, 1);
    play(&mut game, &[Direction::Right, Direction::Down]);
    assert_eq!(game.player().position, Position::new(1, 1));

    assert_eq!(game.request_move(Direction::Right), Outcome::OffField);
    assert_eq!(game.request_move(Direction::Down), Outcome::OffField);
    assert_eq!(game.player().position, Position::new(1, 1));
}

#[test]
fn every_wall_variant_blocks() {
    for symbol in "x0123456789".chars() {
        let mut game = game(&format!("P{symbol}\ncc"), 1, 1);
        assert_eq!(game.request_move(Direction::Right), Outcome::Blocked, "wall '{symbol}'");
        assert_eq!(game.player().position, Position::ORIGIN);
        assert_eq!(game.grid().tile(Position::new(0, 1)).symbol(), symbol);
    }
}

#[test]
fn walking_a_path_leaves_a_single_marker() {
    let mut game = game("Pcc\nccc", 1, 1);
    let outcomes = play(&mut game, &[Direction::Right, Direction::Right, Direction::Down]);

    assert_eq!(outcomes, vec![Outcome::Moved; 3]);
    assert_eq!(game.player().position, Position::new(1, 2));
    assert_eq!(game.grid().tile(Position::new(1, 2)), Tile::Player);
    assert_eq!(game.grid().tile(Position::ORIGIN), Tile::Path);
    assert_eq!(game.grid().tile(Position::new(0, 2)), Tile::Path);
    assert_eq!(player_markers(&game), 1);
}

#[test]
fn equipment_pickups_count_and_move_the_player() {
    for (symbol, kind) in [('a', ItemKind::Armor), ('k', ItemKind::Key), ('s', ItemKind::Sword)] {
        let mut game = game(&format!("P{symbol}"), 1, 1);
        assert_eq!(game.request_move(Direction::Right), Outcome::ItemGained(kind));

        let player = game.player();
        let slot = match kind {
            ItemKind::Armor => player.armor,
            ItemKind::Key => player.key,
            ItemKind::Sword => player.sword,
            ItemKind::LifeRefill => unreachable!(),
        };
        assert_eq!(slot, 1, "{kind:?}");
        assert_eq!(player.items_collected, 1);
        assert_eq!(player.position, Position::new(0, 1));
        assert_eq!(game.grid().tile(Position::new(0, 1)), Tile::Player);
        assert_eq!(player_markers(&game), 1);
    }
}

#[test]
fn life_refill_at_full_life_still_counts() {
    let mut game = game("Pl", 1, 1);
    assert_eq!(
        game.request_move(Direction::Right),
        Outcome::ItemGained(ItemKind::LifeRefill)
    );
    assert_eq!(game.player().remaining_life, MAX_LIFE);
    assert_eq!(game.player().items_collected, 1);
}

#[test]
fn life_refill_restores_a_lost_life() {
    let mut game = game("Pcf\nlcc", 1, 1);
    play(&mut game, &[Direction::Right, Direction::Right]);
    assert_eq!(game.player().remaining_life, MAX_LIFE - 1);

    assert_eq!(
        game.request_move(Direction::Down),
        Outcome::ItemGained(ItemKind::LifeRefill)
    );
    assert_eq!(game.player().remaining_life, MAX_LIFE);
}

#[test]
fn fire_costs_a_life_and_sends_the_player_home() {
    let mut game = game("Pcc\nccf", 1, 1);
    let outcomes = play(
        &mut game,
        &[Direction::Right, Direction::Right, Direction::Down],
    );

    assert_eq!(
        outcomes,
        vec![Outcome::Moved, Outcome::Moved, Outcome::LifeLostReset]
    );
    assert_eq!(game.player().remaining_life, MAX_LIFE - 1);
    assert_eq!(game.player().position, Position::ORIGIN);
    assert_eq!(game.grid().tile(Position::ORIGIN), Tile::Player);
    assert_eq!(game.grid().tile(Position::new(0, 2)), Tile::Path);
    assert_eq!(game.grid().tile(Position::new(1, 2)), Tile::Fire);
    assert_eq!(player_markers(&game), 1);
    assert_eq!(game.status(), GameStatus::Active);
}

#[test]
fn fire_next_to_the_start_keeps_the_marker_on_the_start() {
    let mut game = game("Pf", 1, 1);
    assert_eq!(game.request_move(Direction::Right), Outcome::LifeLostReset);
    assert_eq!(game.grid().tile(Position::ORIGIN), Tile::Player);
    assert_eq!(player_markers(&game), 1);
}

#[test]
fn fire_on_the_last_life_is_a_defeat_in_place() {
    let mut game = game("Pcf", 1, 1);
    for _ in 1..MAX_LIFE {
        assert_eq!(
            play(&mut game, &[Direction::Right, Direction::Right]),
            vec![Outcome::Moved, Outcome::LifeLostReset]
        );
    }
    assert_eq!(game.player().remaining_life, 1);

    assert_eq!(game.request_move(Direction::Right), Outcome::Moved);
    assert_eq!(game.request_move(Direction::Right), Outcome::Defeat);
    assert_eq!(game.status(), GameStatus::Defeated);
    assert_eq!(game.player().position, Position::new(0, 1));
    assert_eq!(game.player().remaining_life, 1);
}

#[test]
fn exit_without_enough_items_is_a_defeat() {
    let mut game = game("PaA", 1, 2);
    play(&mut game, &[Direction::Right]);
    assert_eq!(game.player().remaining_life, MAX_LIFE);

    assert_eq!(game.request_move(Direction::Right), Outcome::Defeat);
    assert_eq!(game.status(), GameStatus::Defeated);
}

#[test]
fn refills_alone_can_open_the_exit() {
    let mut game = game("PlllA", 1, 1);
    let outcomes = play(&mut game, &[Direction::Right; 4]);
    assert_eq!(outcomes.last(), Some(&Outcome::VictoryFinal));
    assert_eq!(game.player().remaining_life, MAX_LIFE);
}

const SCENARIO: &str = "Pfc\naks\nccA";
const SCENARIO_MOVES: [Direction; 4] = [
    Direction::Down,
    Direction::Right,
    Direction::Right,
    Direction::Down,
];

#[test]
fn collecting_everything_then_exiting_advances() {
    let mut game = game(SCENARIO, 1, 2);
    let outcomes = play(&mut game, &SCENARIO_MOVES);

    assert_eq!(
        outcomes,
        vec![
            Outcome::ItemGained(ItemKind::Armor),
            Outcome::ItemGained(ItemKind::Key),
            Outcome::ItemGained(ItemKind::Sword),
            Outcome::VictoryAdvance,
        ]
    );
    assert_eq!(game.player().items_collected, 3);
    assert_eq!(game.status(), GameStatus::Won { advancing: true });
    assert_eq!(game.request_move(Direction::Left), Outcome::Ignored);
}

#[test]
fn clearing_the_last_level_is_final() {
    let mut game = game(SCENARIO, 2, 2);
    let outcomes = play(&mut game, &SCENARIO_MOVES);

    assert_eq!(outcomes.last(), Some(&Outcome::VictoryFinal));
    assert_eq!(game.status(), GameStatus::Won { advancing: false });
}

#[test]
fn snapshot_reflects_the_live_game() {
    let mut game = game(SCENARIO, 1, 2);
    game.request_move(Direction::Down);

    let snapshot = game.snapshot();
    assert_eq!(snapshot.player.position, Position::new(1, 0));
    assert_eq!(snapshot.player.armor, 1);
    assert_eq!(snapshot.grid.tile(Position::new(1, 0)), Tile::Player);
    assert_eq!(snapshot.status, GameStatus::Active);
}
