#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame orchestrator that drives the world and its systems one tick at a time.
//!
//! A [`Simulation`] owns the authoritative [`World`] together with the enemy
//! AI and spawning systems. Every call to [`Simulation::step`] converts one
//! frame of input into commands, resolves teleports through a
//! [`MapProvider`], runs the fixed per-tick command order and forwards sound
//! cues to an [`AudioSink`].

mod audio;
mod provider;

use medieval_rpg_core::{
    Command, Event, FrameInput, FrameSnapshot, Key, PointerButton, TeleportZone, INTRO_DIALOGUE,
};
use medieval_rpg_system_enemy_ai::{self as enemy_ai, EnemyAi};
use medieval_rpg_system_spawning::{self as spawning, Spawning};
use medieval_rpg_world::{self as world, query, World, WorldConfig};
use tracing::{debug, info, trace, warn};

pub use audio::{AudioError, AudioSink, Silence};
pub use provider::{MapLoadError, MapProvider};

/// Configuration of the world and of every system the simulation owns.
#[derive(Clone, Debug)]
pub struct Config {
    /// Parameters of the authoritative world.
    pub world: WorldConfig,
    /// Parameters of the spawn planner.
    pub spawning: spawning::Config,
    /// Parameters of the enemy AI.
    pub enemy_ai: enemy_ai::Config,
}

impl Config {
    /// Creates the default configuration with every generator derived from one seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            world: WorldConfig {
                rng_seed: seed,
                ..WorldConfig::default()
            },
            spawning: spawning::Config::default().reseeded(seed.wrapping_add(1)),
            enemy_ai: enemy_ai::Config::new(seed.wrapping_add(2)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::seeded(WorldConfig::default().rng_seed)
    }
}

/// Owns the world, its systems and the adapters they talk to.
#[derive(Debug)]
pub struct Simulation<P, A> {
    world: World,
    enemy_ai: EnemyAi,
    spawning: Spawning,
    provider: P,
    audio: A,
    current_map: String,
}

impl<P: MapProvider, A: AudioSink> Simulation<P, A> {
    /// Creates a simulation with no map loaded.
    #[must_use]
    pub fn new(config: Config, provider: P, audio: A) -> Self {
        Self {
            world: World::new(config.world),
            enemy_ai: EnemyAi::new(config.enemy_ai),
            spawning: Spawning::new(config.spawning),
            provider,
            audio,
            current_map: String::new(),
        }
    }

    /// Loads the starting map and opens the intro dialogue.
    pub fn start(&mut self, map: &str, out_events: &mut Vec<Event>) -> Result<(), MapLoadError> {
        let descriptor = self.provider.load(map)?;
        let spawns = self.spawning.plan(&descriptor);
        info!(map, "starting session");

        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::LoadMap {
                map: descriptor,
                spawns,
            },
            &mut events,
        );
        world::apply(
            &mut self.world,
            Command::StartDialogue {
                lines: INTRO_DIALOGUE.iter().map(|line| (*line).to_owned()).collect(),
            },
            &mut events,
        );
        self.current_map = map.to_owned();
        self.finish_frame(events, out_events);
        Ok(())
    }

    /// Advances the simulation by one frame of input.
    pub fn step(&mut self, input: &FrameInput, out_events: &mut Vec<Event>) {
        let mut events = Vec::new();

        for key in &input.presses {
            if *key == Key::Attack {
                let command = if query::dialogue_active(&self.world) {
                    Command::AdvanceDialogue
                } else {
                    Command::PlayerAttack
                };
                world::apply(&mut self.world, command, &mut events);
            }
        }
        for click in &input.clicks {
            if click.button == PointerButton::Primary && !query::dialogue_active(&self.world) {
                world::apply(
                    &mut self.world,
                    Command::PlayerShoot {
                        target: click.position,
                    },
                    &mut events,
                );
            }
        }
        if input.presses.contains(&Key::Interact) {
            world::apply(&mut self.world, Command::Interact, &mut events);
        }

        let requests: Vec<(TeleportZone, String)> = events
            .iter()
            .filter_map(|event| match event {
                Event::TeleportRequested { zone, destination } => {
                    Some((zone.clone(), destination.clone()))
                }
                _ => None,
            })
            .collect();
        for (zone, destination) in requests {
            self.teleport(zone, &destination, &mut events);
        }

        world::apply(
            &mut self.world,
            Command::ApplyInput { held: input.held },
            &mut events,
        );
        world::apply(&mut self.world, Command::Tick, &mut events);

        let mut commands = Vec::new();
        self.enemy_ai.handle(
            &events,
            &query::player(&self.world),
            &query::actor_view(&self.world),
            &mut commands,
        );
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        world::apply(&mut self.world, Command::AdvanceProjectiles, &mut events);
        world::apply(&mut self.world, Command::FinishTick, &mut events);
        self.finish_frame(events, out_events);
    }

    fn teleport(&mut self, zone: TeleportZone, destination: &str, events: &mut Vec<Event>) {
        let loaded = match self.provider.resolve(&self.current_map, destination) {
            Ok(Some(reference)) => self
                .provider
                .load(&reference)
                .map(|map| Some((map, reference))),
            Ok(None) => Ok(None),
            Err(error) => Err(error),
        };

        match loaded {
            Ok(Some((map, reference))) => {
                let spawns = self.spawning.plan(&map);
                world::apply(
                    &mut self.world,
                    Command::CompleteTeleport { map, spawns, zone },
                    events,
                );
                self.current_map = reference;
            }
            Ok(None) => debug!(destination, "teleport destination not found, ignoring"),
            Err(error) => {
                warn!(%error, destination, "could not load teleport destination");
                world::apply(
                    &mut self.world,
                    Command::ReportMapLoadFailure {
                        map: destination.to_owned(),
                    },
                    events,
                );
            }
        }
    }

    fn finish_frame(&mut self, events: Vec<Event>, out_events: &mut Vec<Event>) {
        for event in &events {
            if let Event::SoundRequested { cue } = event {
                if let Err(error) = self.audio.play(*cue) {
                    trace!(%error, "audio sink rejected cue");
                }
            }
        }
        out_events.extend(events);
    }

    /// Captures everything a presentation layer needs to draw the frame.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        query::frame_snapshot(&self.world)
    }

    /// Provides read access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Provider reference of the map currently loaded.
    #[must_use]
    pub fn current_map(&self) -> &str {
        &self.current_map
    }

    /// Provides read access to the audio sink.
    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }
}
