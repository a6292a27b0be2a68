mod common;

use common::{level_rules, quiet_config, SnakeBuilder, WorldBuilder};
use serpentine_data::LiveEvent;
use serpentine_lib::model::config::AppConfig;
use serpentine_lib::model::food;
use serpentine_lib::model::world::{PlayerInput, World};
use serpentine_lib::model::SnakeLogic;

#[test]
fn test_rules_scale_with_level() {
    let one = level_rules(1);
    assert_eq!(one.arena_size, 4000.0);
    assert_eq!(one.target_bots, 25);
    assert_eq!(one.score_multiplier, 1.0);
    assert_eq!(one.level_up_length(), 2500);

    let three = level_rules(3);
    assert_eq!(three.arena_size, 8000.0);
    assert_eq!(three.target_bots, 50);
    assert_eq!(three.score_multiplier, 3.0);
    assert_eq!(three.level_up_length(), 22500);
}

#[test]
fn test_level_zero_is_rejected() {
    assert!(AppConfig::default().rules_for_level(0).is_err());
    let mut world = WorldBuilder::new().build();
    assert!(world.level_up(0).is_err());
    assert_eq!(world.level(), 1);
}

#[test]
fn test_level_up_tops_up_bots() {
    let mut config = AppConfig::default();
    config.world.seed = Some(11);
    let mut world = World::new(config, "P").expect("world");
    assert_eq!(world.bots.len(), 25);

    let spawned = world.level_up(2).expect("level 2");

    assert_eq!(spawned.len(), 15);
    assert_eq!(world.bots.len(), 40);
    assert_eq!(world.level(), 2);
    assert_eq!(world.rules.arena_size, 5000.0);

    // Level-2 bots start pre-grown by 40 plus up to 60 more.
    for id in &spawned {
        let bot = world
            .snakes
            .iter()
            .find(|s| s.id == *id)
            .expect("spawned bot is in the roster");
        assert!(bot.length >= 60 && bot.length < 120, "length {}", bot.length);
    }
}

#[test]
fn test_reaching_threshold_triggers_level_up() {
    let mut world = WorldBuilder::new()
        .with_player(SnakeBuilder::new().at(2000.0, 2000.0).heading(0.0).length(2500))
        .build();

    let events = world.update(1.0 / 60.0, PlayerInput::default());

    assert_eq!(world.level(), 2);
    assert!(events
        .iter()
        .any(|e| matches!(e, LiveEvent::LevelUp { level: 2, .. })));
    let spawned = events
        .iter()
        .filter(|e| matches!(e, LiveEvent::BotSpawned { .. }))
        .count();
    assert_eq!(spawned, 40);
    // The new bots arrive after the tick was adjudicated, so none can die in it.
    assert_eq!(world.bots.len(), 40);
}

#[test]
fn test_tick_that_triggers_level_up_runs_under_old_rules() {
    let mut world = WorldBuilder::new()
        .with_config(|c| c.difficulty.level_threshold = 20)
        .with_player(SnakeBuilder::new().at(2000.0, 2000.0).heading(0.0).length(20))
        .with_bot(SnakeBuilder::new().at(3985.0, 1000.0).heading(0.0).length(20))
        .build();
    let bot_id = world.bots[0].snake;
    let level_one_edge = world.rules.arena_size - world.rules.snake.head_radius - 20.0 * 0.075;

    let events = world.update(1.0 / 60.0, PlayerInput::default());

    assert_eq!(world.level(), 2);
    assert!(events
        .iter()
        .any(|e| matches!(e, LiveEvent::LevelUp { level: 2, .. })));
    let bot = world
        .snakes
        .iter()
        .find(|s| s.id == bot_id)
        .expect("bot survives the tick");
    assert!(
        bot.position.x <= level_one_edge + 1e-9,
        "bot at x = {} was clamped by the next level's arena",
        bot.position.x
    );
}

#[test]
fn test_score_multiplier_applies_after_level_up() {
    let mut world = WorldBuilder::new()
        .with_player(SnakeBuilder::new().at(2000.0, 2000.0).heading(0.0))
        .build();
    world.level_up(3).expect("level 3");
    world.bots.clear();
    world.snakes.retain(|s| s.is_player);

    let rules = std::sync::Arc::clone(&world.rules);
    let player = world.player().expect("player");
    let mouth = player.mouth(&rules.snake);
    let ahead = mouth.offset(player.heading, 5.0);
    let rng = &mut world.rng;
    world
        .food
        .push_with(|id| food::new_standard(id, ahead, &rules, rng));

    world.update(1.0 / 60.0, PlayerInput::default());

    let player = world.player().expect("player");
    assert_eq!(player.score, 3.0);
    assert_eq!(player.target_length, 23.0);
}

#[test]
fn test_level_up_keeps_food_within_cap() {
    let mut config = quiet_config();
    config.arena.max_food_orbs = 50;
    config.world.seed = Some(3);
    let mut world = World::new(config, "P").expect("world");
    assert_eq!(world.food.len(), 50);

    world.level_up(2).expect("level 2");

    assert_eq!(world.food.len(), 50);
    let size = world.rules.arena_size;
    assert!(world
        .food
        .items()
        .iter()
        .all(|f| f.position.x <= size && f.position.y <= size));
}
