#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy decision system that turns world snapshots into actor commands.
//!
//! Slimes chase and strike the player once it comes within their detection
//! range and wander aimlessly otherwise. Towers and the boss stay put and fire
//! whenever the player is in range and their cooldown has elapsed. The world
//! validates every emitted command, so the system only proposes intent.

use std::collections::BTreeMap;

use glam::Vec2;
use medieval_rpg_core::{
    ActorId, ActorKind, ActorSnapshot, ActorView, Command, Event, MovementMode, PlayerSnapshot, SlimeStats,
    SLIME_DETECTION_RANGE,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

const WANDER_MIN_TICKS: u32 = 60;
const WANDER_MAX_TICKS: u32 = 180;
const WANDER_SPEED_FACTOR: f32 = 0.5;

/// Configuration parameters required to construct the enemy AI system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Direction and remaining duration of a slime's current wander leg.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct WanderPlan {
    ticks: u32,
    direction: Vec2,
}

/// Pure system that proposes movement, strikes and shots for hostile actors.
#[derive(Debug)]
pub struct EnemyAi {
    rng: ChaCha8Rng,
    wander: BTreeMap<ActorId, WanderPlan>,
}

impl EnemyAi {
    /// Creates a new enemy AI system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            wander: BTreeMap::new(),
        }
    }

    /// Consumes the tick's events and immutable views to emit actor commands.
    ///
    /// Nothing is emitted unless the events contain a time advance. Wander
    /// plans are forgotten whenever a new map roster is installed.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: &PlayerSnapshot,
        actors: &ActorView,
        out: &mut Vec<Command>,
    ) {
        let roster_replaced = events
            .iter()
            .any(|event| matches!(event, Event::MapLoaded { .. }));
        if roster_replaced {
            self.wander.clear();
        }

        let ticked = events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }));
        if !ticked {
            return;
        }

        for actor in actors.iter() {
            if actor.state.is_dead() {
                continue;
            }

            if let Some(stats) = actor.kind.shooter_stats() {
                let in_range = actor.position.distance(player.position) <= stats.detection_range;
                if in_range && actor.cooldown == 0 && !player.state.is_dead() {
                    out.push(Command::FireProjectile { actor: actor.id });
                }
            } else if let ActorKind::Slime(kind) = actor.kind {
                self.plan_slime(actor, kind.stats(), player, out);
            }
        }
    }

    fn plan_slime(
        &mut self,
        actor: &ActorSnapshot,
        stats: SlimeStats,
        player: &PlayerSnapshot,
        out: &mut Vec<Command>,
    ) {
        let offset = player.position - actor.position;
        let distance = offset.length();

        if distance <= SLIME_DETECTION_RANGE && !player.state.is_dead() {
            if distance <= stats.attack_range && actor.cooldown == 0 {
                out.push(Command::StrikePlayer { actor: actor.id });
            }
            if distance > 0.0 {
                out.push(Command::MoveActor {
                    actor: actor.id,
                    delta: offset / distance * stats.speed,
                    mode: MovementMode::Chase,
                });
            }
            return;
        }

        let plan = self.wander.entry(actor.id).or_default();
        if plan.ticks == 0 {
            plan.ticks = self.rng.gen_range(WANDER_MIN_TICKS..=WANDER_MAX_TICKS);
            plan.direction = Vec2::new(
                self.rng.gen_range(-1.0..=1.0),
                self.rng.gen_range(-1.0..=1.0),
            );
            trace!(actor = actor.id.get(), ticks = plan.ticks, "new wander leg");
            return;
        }

        plan.ticks -= 1;
        out.push(Command::MoveActor {
            actor: actor.id,
            delta: plan.direction * stats.speed * WANDER_SPEED_FACTOR,
            mode: MovementMode::Wander,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medieval_rpg_core::{ActorState, AnimationKey, Element, Facing, Rect, SlimeKind};

    fn player_at(position: Vec2) -> PlayerSnapshot {
        PlayerSnapshot {
            position,
            hitbox: Rect::from_origin(position, Vec2::splat(16.0)),
            state: ActorState::Idle,
            facing: Facing::Down,
            animation: AnimationKey::Idle,
            health: 100.0,
            max_health: 100,
            stamina: 100.0,
            max_stamina: 100.0,
            level: 1,
            xp: 0,
            xp_to_next_level: 100,
            total_xp: 0,
            attack_cooldown: 0,
            hit_flash: 0,
        }
    }

    fn actor(id: u32, kind: ActorKind, position: Vec2) -> ActorSnapshot {
        ActorSnapshot {
            id: ActorId::new(id),
            kind,
            position,
            hitbox: Rect::from_origin(position, Vec2::splat(16.0)),
            footprint: Rect::from_origin(position, Vec2::splat(32.0)),
            state: ActorState::Idle,
            health: 50.0,
            max_health: 50,
            cooldown: 0,
            hit_flash: 0,
            is_crit: false,
        }
    }

    fn tick() -> Vec<Event> {
        vec![Event::TimeAdvanced { tick: 1 }]
    }

    fn red_slime_at(position: Vec2) -> ActorView {
        ActorView::from_snapshots(vec![actor(1, ActorKind::Slime(SlimeKind::Red), position)])
    }

    #[test]
    fn nothing_happens_without_a_time_advance() {
        let mut ai = EnemyAi::new(Config::new(1));
        let mut out = Vec::new();
        ai.handle(&[], &player_at(Vec2::ZERO), &red_slime_at(Vec2::new(10.0, 0.0)), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn slime_in_detection_range_chases_at_full_speed() {
        let mut ai = EnemyAi::new(Config::new(1));
        let mut out = Vec::new();
        ai.handle(
            &tick(),
            &player_at(Vec2::new(100.0, 0.0)),
            &red_slime_at(Vec2::new(250.0, 0.0)),
            &mut out,
        );
        assert_eq!(
            out,
            vec![Command::MoveActor {
                actor: ActorId::new(1),
                delta: Vec2::new(-1.3, 0.0),
                mode: MovementMode::Chase,
            }]
        );
    }

    #[test]
    fn slime_in_attack_range_strikes_before_moving() {
        let mut ai = EnemyAi::new(Config::new(1));
        let mut out = Vec::new();
        ai.handle(
            &tick(),
            &player_at(Vec2::new(100.0, 0.0)),
            &red_slime_at(Vec2::new(140.0, 0.0)),
            &mut out,
        );
        assert_eq!(out.len(), 2);
        assert_eq!(
            out[0],
            Command::StrikePlayer {
                actor: ActorId::new(1)
            }
        );
        assert!(matches!(out[1], Command::MoveActor { .. }));
    }

    #[test]
    fn slime_on_cooldown_only_moves() {
        let mut ai = EnemyAi::new(Config::new(1));
        let mut slime = actor(1, ActorKind::Slime(SlimeKind::Red), Vec2::new(140.0, 0.0));
        slime.cooldown = 12;
        let mut out = Vec::new();
        ai.handle(
            &tick(),
            &player_at(Vec2::new(100.0, 0.0)),
            &ActorView::from_snapshots(vec![slime]),
            &mut out,
        );
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Command::MoveActor { .. }));
    }

    #[test]
    fn distant_slime_pauses_then_wanders_at_half_speed() {
        let mut ai = EnemyAi::new(Config::new(42));
        let player = player_at(Vec2::ZERO);
        let slimes = red_slime_at(Vec2::new(500.0, 500.0));

        let mut out = Vec::new();
        ai.handle(&tick(), &player, &slimes, &mut out);
        assert!(out.is_empty(), "the first wander tick only picks a plan");

        ai.handle(&tick(), &player, &slimes, &mut out);
        let Some(Command::MoveActor { delta, mode, .. }) = out.first() else {
            panic!("expected a wander move, got {out:?}");
        };
        assert_eq!(*mode, MovementMode::Wander);
        assert!(delta.x.abs() <= 0.65 + f32::EPSILON);
        assert!(delta.y.abs() <= 0.65 + f32::EPSILON);

        let plan = ai.wander[&ActorId::new(1)];
        assert!((WANDER_MIN_TICKS - 1..WANDER_MAX_TICKS).contains(&plan.ticks));
    }

    #[test]
    fn map_load_forgets_wander_plans() {
        let mut ai = EnemyAi::new(Config::new(42));
        let mut out = Vec::new();
        ai.handle(
            &tick(),
            &player_at(Vec2::ZERO),
            &red_slime_at(Vec2::new(500.0, 500.0)),
            &mut out,
        );
        assert_eq!(ai.wander.len(), 1);

        ai.handle(
            &[Event::MapLoaded {
                map: "cave".to_owned(),
                hostiles: 0,
            }],
            &player_at(Vec2::ZERO),
            &ActorView::default(),
            &mut out,
        );
        assert!(ai.wander.is_empty());
    }

    #[test]
    fn towers_fire_only_when_ready_and_in_range() {
        let mut ai = EnemyAi::new(Config::new(1));
        let near = actor(1, ActorKind::Tower(Element::Fire), Vec2::new(300.0, 0.0));
        let far = actor(2, ActorKind::Tower(Element::Void), Vec2::new(390.0, 0.0));
        let mut cooling = actor(3, ActorKind::Boss, Vec2::new(10.0, 0.0));
        cooling.cooldown = 4;
        let mut dead = actor(4, ActorKind::Tower(Element::Holy), Vec2::new(10.0, 0.0));
        dead.state = ActorState::Dead;

        let mut out = Vec::new();
        ai.handle(
            &tick(),
            &player_at(Vec2::ZERO),
            &ActorView::from_snapshots(vec![near, far, cooling, dead]),
            &mut out,
        );
        assert_eq!(
            out,
            vec![Command::FireProjectile {
                actor: ActorId::new(1)
            }]
        );
    }

    #[test]
    fn dead_player_is_ignored() {
        let mut ai = EnemyAi::new(Config::new(1));
        let mut player = player_at(Vec2::ZERO);
        player.state = ActorState::Dead;
        let view = ActorView::from_snapshots(vec![actor(
            1,
            ActorKind::Tower(Element::Fire),
            Vec2::new(50.0, 0.0),
        )]);
        let mut out = Vec::new();
        ai.handle(&tick(), &player, &view, &mut out);
        assert!(out.is_empty());
    }
}
