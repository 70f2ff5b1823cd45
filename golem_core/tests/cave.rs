//! Plays through the cave adventure with rules loaded from `data/cave.toml`.

use golem_core::{Action, Automaton, GraphDefinition};
use golem_world::{ItemId, World};

const CAVE_RULES: &str = include_str!("data/cave.toml");

fn rules() -> Automaton<Action> {
    GraphDefinition::from_toml_str(CAVE_RULES)
        .unwrap()
        .build_actions()
        .unwrap()
}

fn world() -> World {
    let mut world = World::from_descriptions(
        "Alice+PC stone hole cavity door opening fountain treasure doorway \
         Cave Tunnel Chamber TreasureRoom",
    )
    .unwrap();
    for (location, items) in [
        ("Cave", &["Alice", "stone", "hole"][..]),
        ("Tunnel", &["cavity", "door", "opening"][..]),
        ("Chamber", &["fountain"][..]),
        ("TreasureRoom", &["treasure", "doorway"][..]),
    ] {
        let location = id(&world, location);
        for item in items {
            let item = id(&world, item);
            world.append_child(location, item).unwrap();
        }
    }
    world
}

fn id(world: &World, name: &str) -> ItemId {
    world.find_by_name(name).unwrap()
}

fn tap(automaton: &Automaton<Action>, world: &mut World, item: &str) -> bool {
    let item = id(world, item);
    automaton.apply(world, item, None)
}

fn drag(automaton: &Automaton<Action>, world: &mut World, item: &str, target: &str) -> bool {
    let item = id(world, item);
    let target = id(world, target);
    automaton.apply(world, item, Some(target))
}

#[test]
fn test_taps_show_descriptions() {
    let automaton = rules();
    let mut world = world();

    assert!(tap(&automaton, &mut world, "Alice"));
    assert_eq!(world.status(), Some("You are Alice, the famous explorer."));

    assert!(tap(&automaton, &mut world, "hole"));
    assert_eq!(world.status(), Some("There seems to be a dark tunnel below."));

    assert!(tap(&automaton, &mut world, "stone"));
    assert_eq!(world.status(), Some("A plain looking stone."));

    // Tapping Alice must not make her jump into the hole, even though that
    // rule matches too with the hole as implicit target.
    assert_eq!(world.location_of(id(&world, "Alice")), id(&world, "Cave"));
}

#[test]
fn test_unknown_action_does_nothing_special() {
    let automaton = rules();
    let mut world = world();

    assert!(drag(&automaton, &mut world, "hole", "fountain"));
    assert_eq!(world.status(), Some("Nothing happens."));

    let door = id(&world, "door");
    assert!(drag(&automaton, &mut world, "Alice", "door"));
    assert_eq!(world.status(), Some("Nothing happens."));
    assert_ne!(world.location_of(id(&world, "Alice")), id(&world, "TreasureRoom"));
    assert!(!world.get(door).unwrap().has_tag("Open"));
}

#[test]
fn test_full_playthrough() {
    let automaton = rules();
    let mut world = world();
    let alice = id(&world, "Alice");
    let stone = id(&world, "stone");

    // Pick up the stone and go down the hole.
    assert!(drag(&automaton, &mut world, "stone", "Alice"));
    assert_eq!(world.parent_of(stone), Some(alice));
    assert!(drag(&automaton, &mut world, "Alice", "hole"));
    assert_eq!(world.parent_of(alice), Some(id(&world, "Tunnel")));

    // Charge the stone at the fountain.
    assert!(drag(&automaton, &mut world, "stone", "fountain"));
    assert!(world.get(stone).unwrap().has_tag("Glowing"));
    assert_eq!(world.status(), Some("The stone now emits a warm glow."));

    // The glowing stone opens the door rather than just filling the cavity.
    assert!(drag(&automaton, &mut world, "stone", "cavity"));
    assert_eq!(world.status(), Some("The stone door opens with a mighty sound."));
    let cavity = world.get(id(&world, "cavity")).unwrap();
    assert!(cavity.has_tag("Glowing"));
    assert!(!cavity.has_tag("Filled"));
    assert!(world.get(id(&world, "door")).unwrap().has_tag("Open"));
    assert_eq!(world.parent_of(stone), None);

    // Through the door, grab the treasure.
    assert!(drag(&automaton, &mut world, "Alice", "door"));
    assert_eq!(world.parent_of(alice), Some(id(&world, "TreasureRoom")));
    assert!(drag(&automaton, &mut world, "treasure", "Alice"));
    assert_eq!(world.parent_of(id(&world, "treasure")), Some(alice));
    assert_eq!(world.status(), Some("You win!"));
}

#[test]
fn test_dull_stone_gets_stuck() {
    let automaton = rules();
    let mut world = world();
    let stone = id(&world, "stone");

    assert!(drag(&automaton, &mut world, "stone", "cavity"));
    assert_eq!(world.status(), Some("The stone is stuck in the cavity."));
    assert!(world.get(id(&world, "cavity")).unwrap().has_tag("Filled"));
    assert!(!world.get(id(&world, "door")).unwrap().has_tag("Open"));
    assert_eq!(world.parent_of(stone), None);
}

#[test]
fn test_rules_render_as_dot() {
    let dot = rules().to_dot();
    assert!(dot.contains("s0 -> s1 [label=\"Alice\"];"));
    assert!(dot.contains("s20 -> sink [label=\"/10\", color=\"#ff6a4d\"];"));
}
