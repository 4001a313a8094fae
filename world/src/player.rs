use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;
use medieval_rpg_core::{
    xp_to_next_level, ActorKind, ActorState, AnimationKey, Facing, HeldKeys, LevelStats,
    PlayerSnapshot, Rect, RejectionReason, TileMetrics, ATTACK_FRAME_TICKS,
};

use crate::actors::{CombatActor, DamageOutcome, Vitals};

const WALK_SPEED: f32 = 1.0;
const RUN_SPEED: f32 = 3.0;
const STAMINA_REGEN: f32 = 0.3;
const ATTACK_COST: f32 = 25.0;
const ATTACK_COOLDOWN_TICKS: u32 = 30;
const ATTACK_FRAMES: u32 = 4;

/// Distance within which a melee swing connects, top-left to top-left.
pub(crate) const ATTACK_RANGE: f32 = 80.0;

/// Damage multiplier applied to critical hits.
pub(crate) const CRIT_MULTIPLIER: f32 = 2.0;

/// The player character. Persists across map loads.
#[derive(Clone, Debug)]
pub(crate) struct Player {
    position: Vec2,
    size: Vec2,
    facing: Facing,
    animation: AnimationKey,
    vitals: Vitals,
    stamina: f32,
    level: u32,
    xp: u32,
    xp_to_next_level: u32,
    total_xp: u32,
    stats: LevelStats,
    attack_cooldown: u32,
    attack_animation: u32,
}

impl Player {
    pub(crate) fn new(position: Vec2, size: Vec2) -> Self {
        let stats = LevelStats::for_level(1);
        Self {
            position,
            size,
            facing: Facing::Down,
            animation: AnimationKey::Idle,
            vitals: Vitals::new(stats.max_health),
            stamina: stats.max_stamina,
            level: 1,
            xp: 0,
            xp_to_next_level: xp_to_next_level(1),
            total_xp: 0,
            stats,
            attack_cooldown: 0,
            attack_animation: 0,
        }
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub(crate) fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub(crate) fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    pub(crate) fn size(&self) -> Vec2 {
        self.size
    }

    pub(crate) fn crit_chance(&self) -> f32 {
        self.stats.crit_chance
    }

    pub(crate) fn attack_damage(&self) -> f32 {
        self.stats.attack_damage
    }

    pub(crate) fn heal(&mut self, amount: f32) {
        self.vitals.heal(amount);
    }

    /// Moves the player from held keys. A blocked move is discarded whole.
    pub(crate) fn apply_input(&mut self, held: HeldKeys, collision: &[Rect], tiles: &TileMetrics) {
        let mut moving = false;
        if !self.vitals.state.is_dead() {
            let speed = if held.run { RUN_SPEED } else { WALK_SPEED };
            let mut delta = Vec2::ZERO;

            if held.left {
                delta.x -= speed;
                self.facing = Facing::Left;
                moving = true;
            }
            if held.right {
                delta.x += speed;
                self.facing = Facing::Right;
                moving = true;
            }
            if held.up {
                delta.y -= speed;
                if !held.horizontal() {
                    self.facing = Facing::Up;
                }
                moving = true;
            }
            if held.down {
                delta.y += speed;
                if !held.horizontal() {
                    self.facing = Facing::Down;
                }
                moving = true;
            }

            if delta.x != 0.0 && delta.y != 0.0 {
                delta *= FRAC_1_SQRT_2;
            }

            let candidate = Rect::from_origin(self.position + delta, self.size);
            if self.fits(&candidate, collision, tiles) {
                self.position += delta;
            }
        }

        self.animation = if self.vitals.state.is_dead() {
            AnimationKey::Dying
        } else if self.vitals.state == ActorState::Attacking {
            AnimationKey::Attacking
        } else if moving {
            AnimationKey::Walking
        } else {
            AnimationKey::Idle
        };
    }

    fn fits(&self, candidate: &Rect, collision: &[Rect], tiles: &TileMetrics) -> bool {
        if collision.iter().any(|blocker| candidate.overlaps(blocker)) {
            return false;
        }
        let max_x = tiles.pixel_width() - self.size.x;
        let max_y = tiles.pixel_height() - self.size.y;
        (0.0..=max_x).contains(&candidate.x) && (0.0..=max_y).contains(&candidate.y)
    }

    /// Pays for a melee swing or a shot, or reports why it cannot be paid.
    pub(crate) fn spend_attack(&mut self) -> Result<(), RejectionReason> {
        if self.vitals.state.is_dead() {
            return Err(RejectionReason::PlayerDead);
        }
        if self.stamina < ATTACK_COST {
            return Err(RejectionReason::InsufficientStamina);
        }
        if self.attack_cooldown > 0 {
            return Err(RejectionReason::OnCooldown);
        }

        self.stamina -= ATTACK_COST;
        self.attack_cooldown = ATTACK_COOLDOWN_TICKS;
        Ok(())
    }

    pub(crate) fn begin_attack_animation(&mut self) {
        self.vitals.state = ActorState::Attacking;
        self.attack_animation = ATTACK_FRAMES * ATTACK_FRAME_TICKS;
    }

    /// Adds experience and returns every level reached on the way. A dead
    /// player gains nothing.
    pub(crate) fn gain_xp(&mut self, amount: u32) -> Vec<u32> {
        if self.is_dead() {
            return Vec::new();
        }
        self.xp = self.xp.saturating_add(amount);
        self.total_xp = self.total_xp.saturating_add(amount);

        let mut reached = Vec::new();
        while self.xp >= self.xp_to_next_level {
            self.level_up();
            reached.push(self.level);
        }
        reached
    }

    fn level_up(&mut self) {
        self.xp -= self.xp_to_next_level;
        self.level += 1;
        self.xp_to_next_level = xp_to_next_level(self.level);
        self.stats = LevelStats::for_level(self.level);
        self.vitals.max_health = self.stats.max_health;
        self.vitals.health = self.stats.max_health as f32;
        self.stamina = self.stats.max_stamina;
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            hitbox: self.hitbox(),
            state: self.vitals.state,
            facing: self.facing,
            animation: self.animation,
            health: self.vitals.health,
            max_health: self.vitals.max_health,
            stamina: self.stamina,
            max_stamina: self.stats.max_stamina,
            level: self.level,
            xp: self.xp,
            xp_to_next_level: self.xp_to_next_level,
            total_xp: self.total_xp,
            attack_cooldown: self.attack_cooldown,
            hit_flash: self.vitals.hit_flash,
        }
    }
}

impl CombatActor for Player {
    fn kind(&self) -> ActorKind {
        ActorKind::Player
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn state(&self) -> ActorState {
        self.vitals.state
    }

    fn hitbox(&self) -> Rect {
        Rect::from_origin(self.position, self.size)
    }

    fn take_damage(&mut self, amount: f32, is_crit: bool) -> DamageOutcome {
        match self.vitals.absorb(amount, is_crit) {
            Some(died) => DamageOutcome {
                died,
                xp_reward: 0,
            },
            None => DamageOutcome::SURVIVED,
        }
    }

    fn tick(&mut self) {
        if self.vitals.state != ActorState::Attacking {
            self.stamina = (self.stamina + STAMINA_REGEN).min(self.stats.max_stamina);
        }
        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
        self.vitals.decay_flash();
        if self.attack_animation > 0 {
            self.attack_animation -= 1;
            if self.attack_animation == 0 && self.vitals.state == ActorState::Attacking {
                self.vitals.state = ActorState::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_field() -> TileMetrics {
        TileMetrics::new(16.0, 16.0, 20, 20)
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), Vec2::splat(16.0))
    }

    #[test]
    fn xp_gain_handles_multiple_levels_at_once() {
        let mut player = player_at(0.0, 0.0);
        assert_eq!(player.gain_xp(250), vec![2, 3]);
        let snapshot = player.snapshot();
        assert_eq!(snapshot.level, 3);
        assert_eq!(snapshot.xp, 0);
        assert_eq!(snapshot.total_xp, 250);
        assert_eq!(snapshot.xp_to_next_level, 225);
        assert_eq!(snapshot.max_health, 130);
        assert_eq!(snapshot.max_stamina, 120.0);
        assert_eq!(player.attack_damage(), 30.0);
        assert!((player.crit_chance() - 0.29).abs() < 1e-6);
    }

    #[test]
    fn large_xp_gain_lands_on_the_right_level() {
        let mut player = player_at(0.0, 0.0);
        let reached = player.gain_xp(1000);
        // 100 + 150 + 225 + 337 = 812, the next step needs 506.
        assert_eq!(reached, vec![2, 3, 4, 5]);
        let snapshot = player.snapshot();
        assert_eq!(snapshot.level, 5);
        assert_eq!(snapshot.xp, 188);
        assert_eq!(snapshot.xp_to_next_level, 506);
    }

    #[test]
    fn level_up_fully_restores_health_and_stamina() {
        let mut player = player_at(0.0, 0.0);
        let _ = player.take_damage(60.0, false);
        player.spend_attack().expect("fresh player can attack");
        let _ = player.gain_xp(100);
        let snapshot = player.snapshot();
        assert_eq!(snapshot.health, 115.0);
        assert_eq!(snapshot.stamina, 110.0);
    }

    #[test]
    fn dead_player_gains_no_xp_and_stays_at_zero_health() {
        let mut player = player_at(0.0, 0.0);
        assert!(player.take_damage(500.0, false).died);
        assert!(player.gain_xp(100).is_empty());
        let snapshot = player.snapshot();
        assert_eq!(snapshot.state, ActorState::Dead);
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.xp, 0);
        assert_eq!(snapshot.health, 0.0);
    }

    #[test]
    fn diagonal_movement_is_scaled() {
        let mut player = player_at(100.0, 100.0);
        let held = HeldKeys {
            right: true,
            down: true,
            ..HeldKeys::default()
        };
        player.apply_input(held, &[], &open_field());
        let expected = 100.0 + FRAC_1_SQRT_2;
        assert!((player.position().x - expected).abs() < 1e-4);
        assert!((player.position().y - expected).abs() < 1e-4);
        assert_eq!(player.snapshot().facing, Facing::Right);
        assert_eq!(player.snapshot().animation, AnimationKey::Walking);
    }

    #[test]
    fn blocked_move_is_discarded_without_sliding() {
        let mut player = player_at(100.0, 100.0);
        let wall = Rect::new(102.0, 80.0, 16.0, 60.0);
        let held = HeldKeys {
            right: true,
            up: true,
            run: true,
            ..HeldKeys::default()
        };
        player.apply_input(held, &[wall], &open_field());
        assert_eq!(player.position(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn moves_leaving_the_map_are_rejected() {
        let mut player = player_at(0.0, 0.0);
        let held = HeldKeys {
            left: true,
            ..HeldKeys::default()
        };
        player.apply_input(held, &[], &open_field());
        assert_eq!(player.position(), Vec2::ZERO);
        assert_eq!(player.snapshot().facing, Facing::Left);
    }

    #[test]
    fn attack_gate_reports_the_first_failing_condition() {
        let mut player = player_at(0.0, 0.0);
        assert_eq!(player.spend_attack(), Ok(()));
        assert_eq!(player.spend_attack(), Err(RejectionReason::OnCooldown));
        for _ in 0..ATTACK_COOLDOWN_TICKS {
            player.tick();
        }
        assert_eq!(player.spend_attack(), Ok(()));
        player.stamina = 10.0;
        player.attack_cooldown = 0;
        assert_eq!(
            player.spend_attack(),
            Err(RejectionReason::InsufficientStamina)
        );
    }

    #[test]
    fn stamina_does_not_regenerate_while_attacking() {
        let mut player = player_at(0.0, 0.0);
        player.spend_attack().expect("fresh player can attack");
        player.begin_attack_animation();
        player.tick();
        assert_eq!(player.snapshot().stamina, 75.0);
        for _ in 1..ATTACK_FRAMES * ATTACK_FRAME_TICKS {
            player.tick();
        }
        assert_eq!(player.state(), ActorState::Idle);
        player.tick();
        assert!((player.snapshot().stamina - 75.3).abs() < 1e-4);
    }

    #[test]
    fn dead_player_ignores_damage_and_cannot_attack() {
        let mut player = player_at(0.0, 0.0);
        let outcome = player.take_damage(500.0, false);
        assert!(outcome.died);
        assert_eq!(player.take_damage(5.0, false), DamageOutcome::SURVIVED);
        assert_eq!(player.spend_attack(), Err(RejectionReason::PlayerDead));
        player.apply_input(HeldKeys::default(), &[], &open_field());
        assert_eq!(player.snapshot().animation, AnimationKey::Dying);
    }
}
