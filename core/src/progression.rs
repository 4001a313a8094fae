use rand::Rng;

/// Maximum health of a level one player.
pub const BASE_MAX_HEALTH: u32 = 100;

/// Maximum stamina of a level one player.
pub const BASE_MAX_STAMINA: f32 = 100.0;

/// Melee and projectile damage of a level one player.
pub const BASE_ATTACK_DAMAGE: f32 = 20.0;

/// Critical hit chance of a level one player.
pub const BASE_CRIT_CHANCE: f32 = 0.25;

/// Upper bound on the player's critical hit chance.
pub const MAX_CRIT_CHANCE: f32 = 0.75;

/// Experience required to leave the provided level.
///
/// Follows `floor(100 × 1.5^(level - 1))`. Level zero is treated as level one.
#[must_use]
pub fn xp_to_next_level(level: u32) -> u32 {
    let exponent = level.saturating_sub(1);
    let exponent = i32::try_from(exponent).unwrap_or(i32::MAX);
    let required = (100.0_f64 * 1.5_f64.powi(exponent)).floor();
    if required >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        required as u32
    }
}

/// Player statistics derived purely from the level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelStats {
    /// Maximum health at the level.
    pub max_health: u32,
    /// Maximum stamina at the level.
    pub max_stamina: f32,
    /// Base attack damage at the level.
    pub attack_damage: f32,
    /// Probability that an attack lands a critical hit.
    pub crit_chance: f32,
}

impl LevelStats {
    /// Computes the derived statistics for `level`.
    #[must_use]
    pub fn for_level(level: u32) -> Self {
        let gained = level.saturating_sub(1);
        Self {
            max_health: BASE_MAX_HEALTH.saturating_add(gained.saturating_mul(15)),
            max_stamina: BASE_MAX_STAMINA + gained as f32 * 10.0,
            attack_damage: BASE_ATTACK_DAMAGE + gained as f32 * 5.0,
            crit_chance: (BASE_CRIT_CHANCE + gained as f32 * 0.02).min(MAX_CRIT_CHANCE),
        }
    }
}

/// Rolls a critical hit with the provided probability.
///
/// A chance of zero never crits and a chance of one always does.
pub fn roll_crit<R: Rng + ?Sized>(rng: &mut R, chance: f32) -> bool {
    rng.gen::<f32>() < chance
}

/// Scales `damage` by `multiplier` when the hit is critical.
#[must_use]
pub fn critical_damage(damage: f32, is_crit: bool, multiplier: f32) -> f32 {
    if is_crit {
        damage * multiplier
    } else {
        damage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn xp_curve_matches_closed_form() {
        assert_eq!(xp_to_next_level(1), 100);
        assert_eq!(xp_to_next_level(2), 150);
        assert_eq!(xp_to_next_level(3), 225);
        assert_eq!(xp_to_next_level(4), 337);
        assert_eq!(xp_to_next_level(5), 506);
        for level in 1..30 {
            let expected = (100.0_f64 * 1.5_f64.powi(level as i32 - 1)).floor() as u32;
            assert_eq!(xp_to_next_level(level), expected);
        }
    }

    #[test]
    fn level_stats_follow_linear_growth() {
        let stats = LevelStats::for_level(4);
        assert_eq!(stats.max_health, 145);
        assert_eq!(stats.max_stamina, 130.0);
        assert_eq!(stats.attack_damage, 35.0);
        assert!((stats.crit_chance - 0.31).abs() < 1e-6);
    }

    #[test]
    fn crit_chance_is_capped() {
        assert_eq!(LevelStats::for_level(100).crit_chance, MAX_CRIT_CHANCE);
    }

    #[test]
    fn crit_roll_respects_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1_000 {
            assert!(!roll_crit(&mut rng, 0.0));
            assert!(roll_crit(&mut rng, 1.0));
        }
    }

    #[test]
    fn critical_damage_applies_multiplier_only_on_crit() {
        assert_eq!(critical_damage(20.0, true, 2.0), 40.0);
        assert_eq!(critical_damage(20.0, false, 2.0), 20.0);
    }
}
