use glam::Vec2;
use medieval_rpg_core::{
    ActorKind, Command, Element, Event, MapDescriptor, Ownership, Rect, SlimeKind,
    SpawnDescriptor, TileMetrics,
};
use medieval_rpg_system_enemy_ai::{Config, EnemyAi};
use medieval_rpg_world::{self as world, query, World, WorldConfig};

fn arena(spawns: Vec<SpawnDescriptor>) -> MapDescriptor {
    let mut map = MapDescriptor::new("arena", TileMetrics::new(16.0, 16.0, 60, 40));
    map.spawns = spawns;
    map
}

fn loaded(map: MapDescriptor) -> World {
    let mut world = World::new(WorldConfig {
        spawn_tile: [10, 10],
        ..WorldConfig::default()
    });
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::LoadMap {
            map,
            spawns: Vec::new(),
        },
        &mut events,
    );
    world
}

fn step(world: &mut World, ai: &mut EnemyAi) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick, &mut events);

    let mut commands = Vec::new();
    ai.handle(
        &events,
        &query::player(world),
        &query::actor_view(world),
        &mut commands,
    );
    for command in commands {
        world::apply(world, command, &mut events);
    }
    world::apply(world, Command::AdvanceProjectiles, &mut events);
    world::apply(world, Command::FinishTick, &mut events);
    events
}

#[test]
fn slime_closes_distance_and_strikes() {
    let mut world = loaded(arena(vec![SpawnDescriptor::new(
        ActorKind::Slime(SlimeKind::Red),
        Vec2::new(300.0, 160.0),
    )]));
    let mut ai = EnemyAi::new(Config::new(3));

    let mut strikes = 0;
    for _ in 0..80 {
        strikes += step(&mut world, &mut ai)
            .iter()
            .filter(|event| matches!(event, Event::PlayerDamaged { .. }))
            .count();
    }

    assert_eq!(strikes, 1, "cooldown allows a single strike in this window");
    let slime = query::actor_view(&world).into_vec()[0];
    assert!(slime.position.x < 300.0);
    assert_eq!(slime.position.y, 160.0);
    assert!(query::player(&world).health < 100.0);
}

#[test]
fn tower_fires_at_player_in_range() {
    let mut world = loaded(arena(vec![SpawnDescriptor::new(
        ActorKind::Tower(Element::Fire),
        Vec2::new(400.0, 160.0),
    )]));
    let mut ai = EnemyAi::new(Config::new(3));

    let events = step(&mut world, &mut ai);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::ProjectileFired {
            owner: Ownership::Enemy,
            ..
        }
    )));
    assert_eq!(query::projectiles(&world).len(), 1);

    let events = step(&mut world, &mut ai);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::ProjectileFired { .. })));
}

#[test]
fn wandering_slime_stays_inside_the_map() {
    let mut world = loaded(arena(vec![SpawnDescriptor::new(
        ActorKind::Slime(SlimeKind::Yellow),
        Vec2::new(900.0, 600.0),
    )]));
    let mut ai = EnemyAi::new(Config::new(11));
    let bounds = Rect::new(0.0, 0.0, 960.0, 640.0);

    for _ in 0..600 {
        let _ = step(&mut world, &mut ai);
        let slime = query::actor_view(&world).into_vec()[0];
        assert!(bounds.contains_point(slime.position));
    }
}
