use glam::Vec2;
use medieval_rpg_core::{
    ActorKind, Command, Element, Event, MapDescriptor, SpawnDescriptor, TileMetrics,
};
use medieval_rpg_system_spawning::{Config, Spawning};
use medieval_rpg_world::{self as world, query, World, WorldConfig};

fn load(world: &mut World, map: MapDescriptor, spawns: Vec<SpawnDescriptor>) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::LoadMap { map, spawns }, &mut events);
    events
}

#[test]
fn planned_spawns_join_the_declared_roster() {
    let mut map = MapDescriptor::new("meadow", TileMetrics::new(16.0, 16.0, 40, 30));
    map.spawns = vec![SpawnDescriptor::new(ActorKind::Boss, Vec2::new(64.0, 64.0))];

    let mut spawning = Spawning::new(Config::new(5, Vec::new(), 17));
    let planned = spawning.plan(&map);
    assert_eq!(planned.len(), 5 + 2);

    let mut world = World::new(WorldConfig::default());
    let events = load(&mut world, map, planned);

    assert!(events.contains(&Event::MapLoaded {
        map: "meadow".to_owned(),
        hostiles: 8,
    }));
    let kinds: Vec<_> = query::actor_view(&world)
        .iter()
        .map(|actor| actor.kind)
        .collect();
    assert!(kinds[..5]
        .iter()
        .all(|kind| matches!(kind, ActorKind::Slime(_))));
    assert_eq!(kinds[5], ActorKind::Boss);
    assert_eq!(
        &kinds[6..],
        &[
            ActorKind::Tower(Element::Fire),
            ActorKind::Tower(Element::Water)
        ]
    );
}

#[test]
fn safe_map_loads_without_hostiles() {
    let map = MapDescriptor::new("home_inn_1", TileMetrics::new(16.0, 16.0, 40, 30));
    let mut spawning = Spawning::new(Config::default());
    let planned = spawning.plan(&map);

    let mut world = World::new(WorldConfig::default());
    let _ = load(&mut world, map, planned);
    assert_eq!(query::hostiles_alive(&world), 0);
}
