//! Combat actor model shared by the player and every hostile kind.

use glam::Vec2;
use medieval_rpg_core::{ActorKind, ActorState, Rect, HIT_FLASH_TICKS};

/// Result of applying damage to a combat actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Whether the hit reduced the actor to zero health.
    pub died: bool,
    /// Experience the kill is worth. Zero unless `died`.
    pub xp_reward: u32,
}

impl DamageOutcome {
    /// Outcome of a hit that did not kill, including hits on the dead.
    pub const SURVIVED: Self = Self {
        died: false,
        xp_reward: 0,
    };
}

/// Capability set shared by every combat-capable actor.
pub trait CombatActor {
    /// Kind of the actor.
    fn kind(&self) -> ActorKind;

    /// Top-left position in world pixels.
    fn position(&self) -> Vec2;

    /// Current combat state.
    fn state(&self) -> ActorState;

    /// Collision box in world pixels.
    fn hitbox(&self) -> Rect;

    /// Applies damage. Once the actor is dead this is a no-op.
    fn take_damage(&mut self, amount: f32, is_crit: bool) -> DamageOutcome;

    /// Decays timers by one tick.
    fn tick(&mut self);

    /// Reports whether the actor is dead.
    fn is_dead(&self) -> bool {
        self.state().is_dead()
    }
}

/// Health, state and hit feedback common to all actors.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Vitals {
    pub(crate) health: f32,
    pub(crate) max_health: u32,
    pub(crate) state: ActorState,
    pub(crate) hit_flash: u32,
    pub(crate) is_crit: bool,
}

impl Vitals {
    pub(crate) fn new(max_health: u32) -> Self {
        Self {
            health: max_health as f32,
            max_health,
            state: ActorState::Idle,
            hit_flash: 0,
            is_crit: false,
        }
    }

    /// Returns `None` when the actor was already dead, otherwise whether it died.
    pub(crate) fn absorb(&mut self, amount: f32, is_crit: bool) -> Option<bool> {
        if self.state.is_dead() {
            return None;
        }

        self.health -= amount;
        self.hit_flash = HIT_FLASH_TICKS;
        self.is_crit = is_crit;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.state = ActorState::Dead;
            Some(true)
        } else {
            self.state = ActorState::Hurt;
            Some(false)
        }
    }

    /// Hurt returns to idle once the flash runs out.
    pub(crate) fn decay_flash(&mut self) {
        self.hit_flash = self.hit_flash.saturating_sub(1);
        if self.state == ActorState::Hurt && self.hit_flash == 0 {
            self.state = ActorState::Idle;
        }
    }

    pub(crate) fn heal(&mut self, amount: f32) {
        if self.state.is_dead() {
            return;
        }
        self.health = (self.health + amount).min(self.max_health as f32);
    }
}
