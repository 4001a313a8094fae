use glam::Vec2;
use medieval_rpg_core::{
    ActorId, ActorKind, ActorState, Command, Element, Event, MapDescriptor, Ownership, Rect,
    RejectionReason, SlimeKind, SoundCue, SpawnDescriptor, TeleportZone, TileMetrics,
};
use medieval_rpg_world::{self as world, query, World, WorldConfig};

fn config() -> WorldConfig {
    WorldConfig {
        spawn_tile: [10, 10],
        ..WorldConfig::default()
    }
}

fn arena(spawns: &[SpawnDescriptor]) -> MapDescriptor {
    let mut map = MapDescriptor::new("arena", TileMetrics::new(16.0, 16.0, 40, 40));
    map.spawns = spawns.to_vec();
    map
}

fn slime(x: f32, y: f32) -> SpawnDescriptor {
    SpawnDescriptor::new(ActorKind::Slime(SlimeKind::Red), Vec2::new(x, y))
}

fn loaded(map: MapDescriptor) -> World {
    let mut world = World::new(config());
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

fn run(world: &mut World, commands: impl IntoIterator<Item = Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn idle_ticks(world: &mut World, ticks: usize) {
    let _ = run(world, std::iter::repeat(Command::Tick).take(ticks));
}

fn count(events: &[Event], predicate: impl Fn(&Event) -> bool) -> usize {
    events.iter().filter(|event| predicate(event)).count()
}

#[test]
fn player_spawns_on_configured_tile() {
    let world = loaded(arena(&[]));
    assert_eq!(query::player(&world).position, Vec2::new(160.0, 160.0));
}

#[test]
fn melee_hits_every_hostile_in_range() {
    let mut world = loaded(arena(&[
        slime(200.0, 160.0),
        slime(160.0, 220.0),
        slime(300.0, 160.0),
    ]));

    let events = run(&mut world, [Command::PlayerAttack]);

    assert_eq!(
        count(&events, |event| matches!(event, Event::ActorDamaged { .. })),
        2
    );
    assert!(events.contains(&Event::PlayerAttacked { hits: 2 }));
    assert!(events.contains(&Event::SoundRequested {
        cue: SoundCue::Attacking
    }));
    assert_eq!(query::status_message(&world), Some("Hit!"));
    assert_eq!(query::player(&world).state, ActorState::Attacking);

    let untouched = query::actor_view(&world)
        .into_vec()
        .into_iter()
        .find(|actor| actor.id == ActorId::new(3))
        .expect("third slime exists");
    assert_eq!(untouched.health, 55.0);
}

#[test]
fn melee_kills_award_experience() {
    let mut world = loaded(arena(&[slime(170.0, 160.0)]));

    let mut all_events = Vec::new();
    for _ in 0..5 {
        let events = run(&mut world, [Command::PlayerAttack]);
        let died = events
            .iter()
            .any(|event| matches!(event, Event::ActorDied { .. }));
        all_events.extend(events);
        if died {
            break;
        }
        idle_ticks(&mut world, 30);
    }

    assert!(all_events.contains(&Event::ActorDied {
        actor: ActorId::new(1),
        kind: ActorKind::Slime(SlimeKind::Red),
        xp_reward: 25,
    }));
    assert!(all_events.contains(&Event::XpGained { amount: 25 }));
    assert_eq!(query::player(&world).xp, 25);
    assert_eq!(query::hostiles_alive(&world), 0);
}

#[test]
fn failed_attacks_report_their_reason() {
    let mut world = loaded(arena(&[]));

    let events = run(&mut world, [Command::PlayerAttack]);
    assert!(events.contains(&Event::ActionRejected {
        reason: RejectionReason::NoTargetInRange
    }));
    assert_eq!(query::status_message(&world), Some("No enemy in range!"));

    let events = run(&mut world, [Command::PlayerAttack]);
    assert!(events.contains(&Event::ActionRejected {
        reason: RejectionReason::OnCooldown
    }));
    assert_eq!(query::status_message(&world), Some("Attack on cooldown!"));
}

#[test]
fn shooting_spends_stamina_and_plays_a_cue() {
    let mut world = loaded(arena(&[]));

    let events = run(
        &mut world,
        [Command::PlayerShoot {
            target: Vec2::new(400.0, 168.0),
        }],
    );

    assert!(events.iter().any(|event| matches!(
        event,
        Event::ProjectileFired {
            owner: Ownership::Player,
            ..
        }
    )));
    assert!(events.contains(&Event::SoundRequested {
        cue: SoundCue::Projectile
    }));
    assert_eq!(query::player(&world).stamina, 75.0);
    assert_eq!(query::projectiles(&world).len(), 1);
}

#[test]
fn player_projectile_strikes_exactly_one_target() {
    let mut world = loaded(arena(&[slime(240.0, 160.0), slime(240.0, 160.0)]));

    let mut events = run(
        &mut world,
        [Command::PlayerShoot {
            target: Vec2::new(250.0, 168.0),
        }],
    );
    for _ in 0..20 {
        world::apply(&mut world, Command::AdvanceProjectiles, &mut events);
    }

    assert_eq!(
        count(&events, |event| matches!(event, Event::ActorDamaged { .. })),
        1
    );
    assert!(events.iter().any(|event| matches!(
        event,
        Event::ActorDamaged {
            actor,
            ..
        } if *actor == ActorId::new(1)
    )));
    assert!(query::projectiles(&world).is_empty());
}

fn ready_to_shoot(world: &mut World) {
    loop {
        let player = query::player(world);
        if player.stamina >= 25.0 && player.attack_cooldown == 0 {
            return;
        }
        idle_ticks(world, 1);
    }
}

fn resolve_projectiles(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    while !query::projectiles(world).is_empty() {
        world::apply(world, Command::AdvanceProjectiles, &mut events);
    }
    events
}

fn health_of(world: &World, id: ActorId) -> f32 {
    query::actor_view(world)
        .iter()
        .find(|actor| actor.id == id)
        .map_or(0.0, |actor| actor.health)
}

#[test]
fn kills_landing_after_the_player_died_award_nothing() {
    let targets = [40.0, 160.0, 280.0, 400.0, 520.0];
    let mut spawns: Vec<SpawnDescriptor> = targets.iter().map(|&y| slime(400.0, y)).collect();
    spawns.extend(std::iter::repeat(slime(110.0, 160.0)).take(22));
    let mut world = loaded(arena(&spawns));

    // Wound targets until one survives with health a single hit removes.
    let mut wounded = None;
    for (index, &y) in targets.iter().enumerate() {
        let id = ActorId::new(index as u32 + 1);
        while health_of(&world, id) > 20.0 {
            ready_to_shoot(&mut world);
            let _ = run(
                &mut world,
                [Command::PlayerShoot {
                    target: Vec2::new(408.0, y + 8.0),
                }],
            );
            let _ = resolve_projectiles(&mut world);
        }
        if health_of(&world, id) > 0.0 {
            wounded = Some((id, y));
            break;
        }
    }
    let (target, y) = wounded.expect("a wounded target survives");

    ready_to_shoot(&mut world);
    let _ = run(
        &mut world,
        [Command::PlayerShoot {
            target: Vec2::new(408.0, y + 8.0),
        }],
    );
    let strikes = (6..=27).map(|id| Command::StrikePlayer {
        actor: ActorId::new(id),
    });
    let _ = run(&mut world, strikes);
    assert!(query::player_dead(&world));
    let before = query::player(&world);

    let events = resolve_projectiles(&mut world);

    assert!(events.iter().any(|event| matches!(
        event,
        Event::ActorDied { actor, .. } if *actor == target
    )));
    assert_eq!(
        count(&events, |event| matches!(
            event,
            Event::XpGained { .. } | Event::LevelUp { .. }
        )),
        0
    );
    let after = query::player(&world);
    assert_eq!(after.state, ActorState::Dead);
    assert_eq!(after.health, 0.0);
    assert_eq!(after.level, before.level);
    assert_eq!(after.xp, before.xp);
}

#[test]
fn projectiles_prioritise_slimes_over_bosses_and_towers() {
    let mut world = loaded(arena(&[
        SpawnDescriptor::new(ActorKind::Tower(Element::Fire), Vec2::new(240.0, 144.0)),
        SpawnDescriptor::new(ActorKind::Boss, Vec2::new(240.0, 136.0)),
        slime(240.0, 160.0),
    ]));

    let mut events = run(
        &mut world,
        [Command::PlayerShoot {
            target: Vec2::new(250.0, 168.0),
        }],
    );
    for _ in 0..20 {
        world::apply(&mut world, Command::AdvanceProjectiles, &mut events);
    }

    let struck: Vec<ActorId> = events
        .iter()
        .filter_map(|event| match event {
            Event::ActorDamaged { actor, .. } => Some(*actor),
            _ => None,
        })
        .collect();
    let slime_id = query::actor_view(&world)
        .iter()
        .find(|actor| matches!(actor.kind, ActorKind::Slime(_)))
        .map(|actor| actor.id)
        .expect("slime exists");
    assert_eq!(struck, vec![slime_id]);
}

#[test]
fn terrain_absorbs_projectiles() {
    let mut map = arena(&[slime(240.0, 160.0)]);
    map.collision.push(Rect::new(200.0, 140.0, 16.0, 60.0));
    let mut world = loaded(map);

    let mut events = run(
        &mut world,
        [Command::PlayerShoot {
            target: Vec2::new(300.0, 168.0),
        }],
    );
    for _ in 0..20 {
        world::apply(&mut world, Command::AdvanceProjectiles, &mut events);
    }

    assert_eq!(
        count(&events, |event| matches!(event, Event::ActorDamaged { .. })),
        0
    );
    assert!(query::projectiles(&world).is_empty());
}

#[test]
fn tower_projectiles_hit_the_player() {
    let tower = SpawnDescriptor::new(ActorKind::Tower(Element::Fire), Vec2::new(160.0, 260.0));
    let mut world = loaded(arena(&[tower]));

    let mut events = run(
        &mut world,
        [
            Command::FireProjectile {
                actor: ActorId::new(1),
            },
            Command::FireProjectile {
                actor: ActorId::new(1),
            },
        ],
    );
    assert_eq!(
        count(&events, |event| matches!(event, Event::ProjectileFired { .. })),
        1,
        "second shot is still on cooldown"
    );

    for _ in 0..20 {
        world::apply(&mut world, Command::AdvanceProjectiles, &mut events);
    }

    assert!(events.contains(&Event::PlayerDamaged {
        amount: 12.0,
        died: false
    }));
    assert!(events.contains(&Event::SoundRequested {
        cue: SoundCue::TakingDamage
    }));
    assert_eq!(query::player(&world).health, 88.0);
    let tower = query::actor_view(&world).into_vec()[0];
    assert_eq!(tower.cooldown, 90);
    assert_eq!(tower.health, 100.0);
}

#[test]
fn slime_strikes_respect_range_and_cooldown() {
    let mut world = loaded(arena(&[slime(200.0, 160.0), slime(400.0, 400.0)]));

    let events = run(
        &mut world,
        [
            Command::StrikePlayer {
                actor: ActorId::new(1),
            },
            Command::StrikePlayer {
                actor: ActorId::new(1),
            },
            Command::StrikePlayer {
                actor: ActorId::new(2),
            },
        ],
    );

    assert_eq!(
        count(&events, |event| matches!(event, Event::PlayerDamaged { .. })),
        1
    );
    assert_eq!(query::player(&world).health, 94.0);
    let striker = query::actor_view(&world).into_vec()[0];
    assert_eq!(striker.state, ActorState::Attacking);
    assert_eq!(striker.cooldown, 60);
}

#[test]
fn clearing_the_map_arms_the_teleport_marker() {
    let mut map = arena(&[slime(170.0, 160.0)]);
    let zone = Rect::new(32.0, 32.0, 32.0, 32.0);
    map.teleports
        .push(TeleportZone::new(zone, Some("next.toml".to_owned())));
    let mut world = loaded(map);

    let events = run(&mut world, [Command::FinishTick]);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::TeleportMarkerArmed { .. })));

    for _ in 0..5 {
        let _ = run(&mut world, [Command::PlayerAttack]);
        if query::hostiles_alive(&world) == 0 {
            break;
        }
        idle_ticks(&mut world, 30);
    }
    assert_eq!(query::hostiles_alive(&world), 0);

    let events = run(&mut world, [Command::FinishTick]);
    assert!(events.contains(&Event::TeleportMarkerArmed { area: zone }));
    let marker = query::frame_snapshot(&world)
        .marker
        .expect("marker is armed");
    assert_eq!(marker.area, zone);
    assert_eq!(marker.ticks_remaining, 299);

    let events = run(&mut world, std::iter::repeat(Command::FinishTick).take(299));
    assert!(events.is_empty());
    assert!(query::frame_snapshot(&world).marker.is_none());

    let events = run(&mut world, [Command::FinishTick]);
    assert!(events.contains(&Event::TeleportMarkerArmed { area: zone }));
}

#[test]
fn frame_snapshot_exposes_feedback() {
    let mut world = loaded(arena(&[slime(170.0, 160.0)]));
    let _ = run(&mut world, [Command::PlayerAttack]);

    let snapshot = query::frame_snapshot(&world);
    assert_eq!(snapshot.map_name, "arena");
    assert_eq!(snapshot.map_width, 640.0);
    assert_eq!(snapshot.actors.len(), 1);
    assert_eq!(snapshot.status_message.as_deref(), Some("Hit!"));
    assert!(snapshot.dialogue_line.is_none());
}
