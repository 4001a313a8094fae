use serde::{Deserialize, Serialize};

/// Number of ticks a single attack animation frame stays on screen.
pub const ATTACK_FRAME_TICKS: u32 = 6;

/// Number of ticks an actor flashes after taking damage.
pub const HIT_FLASH_TICKS: u32 = 10;

/// Distance within which slimes notice the player.
pub const SLIME_DETECTION_RANGE: f32 = 200.0;

/// Ticks a slime waits between melee strikes.
pub const SLIME_ATTACK_COOLDOWN_TICKS: u32 = 60;

/// Number of frames in the slime attack animation.
pub const SLIME_ATTACK_FRAMES: u32 = 7;

/// Speed at which projectiles travel, in pixels per tick.
pub const PROJECTILE_SPEED: f32 = 8.0;

/// Edge length of the square projectile hitbox.
pub const PROJECTILE_SIZE: f32 = 20.0;

/// Fixed experience awarded for destroying a tower.
pub const TOWER_XP_REWARD: u32 = 100;

/// Fixed experience awarded for defeating the boss.
pub const BOSS_XP_REWARD: u32 = 50;

/// Unique identifier assigned to an actor on the current map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new actor identifier with the provided value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Combat state shared by every actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorState {
    /// Standing by, free to act.
    #[default]
    Idle,
    /// Playing an attack animation.
    Attacking,
    /// Recoiling from a non-lethal hit.
    Hurt,
    /// Defeated. Terminal.
    Dead,
}

impl ActorState {
    /// Reports whether the state is the terminal dead state.
    #[must_use]
    pub const fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }
}

/// Colour variants of the slime enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlimeKind {
    /// Red slime.
    Red,
    /// Blue slime.
    Blue,
    /// Yellow slime.
    Yellow,
}

impl SlimeKind {
    /// Every slime kind, in the order procedural spawning draws from.
    pub const ALL: [SlimeKind; 3] = [Self::Red, Self::Blue, Self::Yellow];

    /// Stat preset for the slime kind.
    #[must_use]
    pub const fn stats(self) -> SlimeStats {
        match self {
            Self::Red => SlimeStats {
                max_health: 55,
                speed: 1.3,
                attack_damage: 6.0,
                attack_range: 65.0,
            },
            Self::Blue => SlimeStats {
                max_health: 50,
                speed: 1.5,
                attack_damage: 5.0,
                attack_range: 60.0,
            },
            Self::Yellow => SlimeStats {
                max_health: 60,
                speed: 1.0,
                attack_damage: 7.0,
                attack_range: 70.0,
            },
        }
    }
}

/// Stat preset describing a slime kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlimeStats {
    /// Health the slime spawns with.
    pub max_health: u32,
    /// Chase speed in pixels per tick. Wandering uses half of it.
    pub speed: f32,
    /// Damage dealt to the player per strike.
    pub attack_damage: f32,
    /// Distance at which the slime can strike the player.
    pub attack_range: f32,
}

/// Elemental flavour of towers and projectiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    /// Fire.
    Fire,
    /// Water.
    Water,
    /// Void.
    Void,
    /// Ice.
    Ice,
    /// Lightning.
    Lightning,
    /// Holy.
    Holy,
}

impl Element {
    /// Stat preset for a tower of this element.
    #[must_use]
    pub const fn tower_stats(self) -> ShooterStats {
        let (max_health, attack_damage, shoot_interval, detection_range) = match self {
            Self::Fire => (100, 12.0, 90, 400.0),
            Self::Water => (120, 10.0, 100, 450.0),
            Self::Void => (80, 15.0, 80, 380.0),
            Self::Ice => (110, 11.0, 95, 420.0),
            Self::Lightning => (90, 14.0, 75, 400.0),
            Self::Holy => (130, 13.0, 110, 500.0),
        };
        ShooterStats {
            max_health,
            attack_damage,
            shoot_interval,
            detection_range,
            skin: ProjectileSkin::Elemental(self),
        }
    }
}

/// Stat preset describing a stationary shooter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShooterStats {
    /// Health the shooter spawns with.
    pub max_health: u32,
    /// Damage carried by each projectile.
    pub attack_damage: f32,
    /// Ticks between shots.
    pub shoot_interval: u32,
    /// Distance within which the shooter targets the player.
    pub detection_range: f32,
    /// Appearance of the fired projectiles.
    pub skin: ProjectileSkin,
}

/// Stat preset for the boss.
pub const BOSS_STATS: ShooterStats = ShooterStats {
    max_health: 200,
    attack_damage: 15.0,
    shoot_interval: 120,
    detection_range: 400.0,
    skin: ProjectileSkin::Elemental(Element::Void),
};

/// Appearance applied to a projectile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileSkin {
    /// Plain projectile fired by the player.
    #[default]
    Plain,
    /// Projectile tinted by an element.
    Elemental(Element),
}

/// Side that fired a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    /// Fired by the player; hits hostile actors.
    Player,
    /// Fired by a tower or boss; hits only the player.
    Enemy,
}

/// Discriminates the kinds of combat actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    /// The player character.
    Player,
    /// A wandering, chasing melee enemy.
    Slime(SlimeKind),
    /// A stationary elemental shooter.
    Tower(Element),
    /// The stationary boss shooter.
    Boss,
}

impl ActorKind {
    /// Reports whether actors of this kind fight the player.
    #[must_use]
    pub const fn is_hostile(self) -> bool {
        !matches!(self, Self::Player)
    }

    /// Edge length of the actor hitbox, measured in tiles.
    #[must_use]
    pub const fn hitbox_tiles(self) -> f32 {
        match self {
            Self::Player | Self::Slime(_) => 1.0,
            Self::Tower(_) => 3.0,
            Self::Boss => 4.0,
        }
    }

    /// Edge length of the drawn footprint, measured in tiles.
    #[must_use]
    pub const fn render_tiles(self) -> f32 {
        match self {
            Self::Player => 1.0,
            Self::Slime(_) => 2.0,
            Self::Tower(_) => 3.0,
            Self::Boss => 4.0,
        }
    }

    /// Health an actor of this kind spawns with.
    #[must_use]
    pub const fn max_health(self) -> u32 {
        match self {
            Self::Player => crate::BASE_MAX_HEALTH,
            Self::Slime(kind) => kind.stats().max_health,
            Self::Tower(element) => element.tower_stats().max_health,
            Self::Boss => BOSS_STATS.max_health,
        }
    }

    /// Experience granted to the player when an actor of this kind dies.
    ///
    /// Slimes reward `20 + max_health / 10` using integer division.
    #[must_use]
    pub const fn xp_reward(self, max_health: u32) -> u32 {
        match self {
            Self::Player => 0,
            Self::Slime(_) => 20 + max_health / 10,
            Self::Tower(_) => TOWER_XP_REWARD,
            Self::Boss => BOSS_XP_REWARD,
        }
    }

    /// Shooter preset for stationary kinds.
    #[must_use]
    pub const fn shooter_stats(self) -> Option<ShooterStats> {
        match self {
            Self::Tower(element) => Some(element.tower_stats()),
            Self::Boss => Some(BOSS_STATS),
            Self::Player | Self::Slime(_) => None,
        }
    }
}
