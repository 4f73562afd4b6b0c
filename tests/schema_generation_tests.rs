//! Integration tests for dungeon schema generation through the public API.

use carnage::generation::utils;
use carnage::{
    generate, generate_by_name, CarnageError, CarnageResult, DifficultyTier, Monster,
    MonsterCatalog, TierTable,
};

fn scenario_monsters() -> Vec<Monster> {
    vec![Monster::new("m1", false), Monster::new("m2", true)]
}

#[test]
fn test_easy_scenario() -> CarnageResult<()> {
    let mut rng = utils::create_rng(Some(2022));
    let schema = generate(DifficultyTier::Easy, &scenario_monsters(), &mut rng)?;

    assert_eq!(schema.level_count(), 25);
    let keys: Vec<u32> = schema.levels.keys().copied().collect();
    assert_eq!(keys, (0..25).collect::<Vec<_>>());

    let first = schema.level(0).expect("level 0");
    assert_eq!(first.previous, None);
    assert_eq!(first.next, Some(1));

    let last = schema.level(24).expect("level 24");
    assert_eq!(last.next, None);
    assert_eq!(last.previous, Some(23));

    for level in schema.levels.values() {
        assert!(
            (5..=10).contains(&level.room_count()),
            "room count {} outside 5..=10",
            level.room_count()
        );
        for room in level.rooms.values() {
            match room.monster.as_str() {
                "m1" => assert!(!room.is_boss),
                "m2" => assert!(room.is_boss),
                other => panic!("unexpected monster {other}"),
            }
        }
    }

    Ok(())
}

#[test]
fn test_nightmare_scenario() -> CarnageResult<()> {
    let mut rng = utils::create_rng(Some(150));
    let schema = generate(DifficultyTier::Nightmare, &scenario_monsters(), &mut rng)?;

    assert_eq!(schema.level_count(), 150);
    for level in schema.levels.values() {
        assert!((10..=20).contains(&level.room_count()));
    }
    Ok(())
}

#[test]
fn test_every_tier_has_one_last_room_per_level() -> CarnageResult<()> {
    let mut rng = utils::create_rng(Some(77));
    let table = TierTable::default();

    for tier in DifficultyTier::ALL {
        let schema = generate(tier, &scenario_monsters(), &mut rng)?;
        assert_eq!(schema.level_count(), table.resolve(tier)?.level_count);

        for (index, level) in &schema.levels {
            let last_rooms: Vec<u32> = level
                .rooms
                .iter()
                .filter(|(_, room)| room.last_room)
                .map(|(&room_index, _)| room_index)
                .collect();
            assert_eq!(
                last_rooms,
                vec![level.room_count() - 1],
                "level {index} of {tier}"
            );
        }
    }
    Ok(())
}

#[test]
fn test_empty_catalog_produces_no_schema() {
    let mut rng = utils::create_rng(Some(1));
    let result = generate(DifficultyTier::Easy, &[], &mut rng);
    assert!(matches!(result, Err(CarnageError::EmptyCatalog)));
}

#[test]
fn test_repeated_monster_id_rejected_up_front() {
    let monsters = vec![Monster::new("x", false), Monster::new("x", true)];
    let mut rng = utils::create_rng(Some(1));
    let result = generate(DifficultyTier::Easy, &monsters, &mut rng);
    assert!(matches!(result, Err(CarnageError::DuplicateMonster(id)) if id == "x"));
}

#[test]
fn test_unknown_tier_name() {
    let mut rng = utils::create_rng(Some(1));
    let result = generate_by_name("Apocalypse", &scenario_monsters(), &mut rng);
    assert!(matches!(result, Err(CarnageError::UnknownTier(name)) if name == "Apocalypse"));
}

#[test]
fn test_tier_name_lookup() -> CarnageResult<()> {
    let mut rng = utils::create_rng(Some(1));
    let schema = generate_by_name("medium", &scenario_monsters(), &mut rng)?;
    assert_eq!(schema.level_count(), 50);
    Ok(())
}

#[test]
fn test_different_seeds_stay_valid() -> CarnageResult<()> {
    let catalog = MonsterCatalog::new(scenario_monsters())?;
    let easy = TierTable::default().resolve(DifficultyTier::Easy)?;

    let mut first_rng = utils::create_rng(Some(1));
    let mut second_rng = utils::create_rng(Some(2));
    let first = generate(DifficultyTier::Easy, &scenario_monsters(), &mut first_rng)?;
    let second = generate(DifficultyTier::Easy, &scenario_monsters(), &mut second_rng)?;

    first.validate(&easy, &catalog)?;
    second.validate(&easy, &catalog)?;
    Ok(())
}

#[test]
fn test_unseeded_generation_is_valid() -> CarnageResult<()> {
    let catalog = MonsterCatalog::new(scenario_monsters())?;
    let hard = TierTable::default().resolve(DifficultyTier::Hard)?;
    let mut rng = utils::create_rng(None);
    let schema = generate(DifficultyTier::Hard, &scenario_monsters(), &mut rng)?;
    schema.validate(&hard, &catalog)
}

#[test]
fn test_input_monsters_untouched() -> CarnageResult<()> {
    let monsters = scenario_monsters();
    let before = monsters.clone();
    let mut rng = utils::create_rng(Some(4));
    generate(DifficultyTier::Medium, &monsters, &mut rng)?;
    assert_eq!(monsters, before);
    Ok(())
}

#[test]
fn test_json_round_trip_preserves_string_keys() -> CarnageResult<()> {
    let mut rng = utils::create_rng(Some(11));
    let schema = generate(DifficultyTier::Easy, &scenario_monsters(), &mut rng)?;

    let value: serde_json::Value = serde_json::from_str(&schema.to_json()?)?;
    let levels = value["levels"].as_object().expect("levels object");
    assert_eq!(levels.len(), 25);
    assert!(levels.contains_key("0"));
    assert!(levels.contains_key("24"));
    assert_eq!(value["levels"]["3"]["previous"], 2);

    let parsed = carnage::DungeonSchema::from_json_str(&schema.to_json()?)?;
    assert_eq!(parsed, schema);
    Ok(())
}
