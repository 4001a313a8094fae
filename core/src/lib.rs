#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the medieval RPG engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that systems react to. Systems read immutable snapshots and respond
//! exclusively with new command batches.
//!
//! Alongside the messages the crate owns the data every layer agrees on:
//! geometry, actor kinds and their stat tables, the progression formulas, the
//! resolved map structure handed over by map providers, the per-frame input
//! snapshot, and the frame snapshot consumed by presentation layers.

mod actors;
mod geometry;
mod input;
mod map;
mod progression;
mod snapshot;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use actors::{
    ActorId, ActorKind, ActorState, Element, Ownership, ProjectileId, ProjectileSkin,
    ShooterStats, SlimeKind, SlimeStats, ATTACK_FRAME_TICKS, BOSS_STATS, BOSS_XP_REWARD,
    HIT_FLASH_TICKS, PROJECTILE_SIZE, PROJECTILE_SPEED, SLIME_ATTACK_COOLDOWN_TICKS,
    SLIME_ATTACK_FRAMES, SLIME_DETECTION_RANGE, TOWER_XP_REWARD,
};
pub use geometry::{Rect, TileMetrics};
pub use input::{AnimationKey, Facing, FrameInput, HeldKeys, Key, PointerButton, PointerClick};
pub use map::{
    MapDescriptor, NpcDescriptor, SpawnDescriptor, TeleportZone, INNKEEPER_DIALOGUE,
    INTRO_DIALOGUE,
};
pub use progression::{
    critical_damage, roll_crit, xp_to_next_level, LevelStats, BASE_ATTACK_DAMAGE,
    BASE_CRIT_CHANCE, BASE_MAX_HEALTH, BASE_MAX_STAMINA, MAX_CRIT_CHANCE,
};
pub use snapshot::{
    ActorSnapshot, ActorView, FloatingTextSnapshot, FloatingTextTone, FrameSnapshot,
    MarkerSnapshot, NpcSnapshot, PlayerSnapshot, ProjectileSnapshot,
};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the current map and places the player on its spawn tile.
    LoadMap {
        /// Resolved structure of the map to load.
        map: MapDescriptor,
        /// Procedurally planned actors to add to the map's own roster.
        spawns: Vec<SpawnDescriptor>,
    },
    /// Finishes a teleport by replacing the current map with its destination.
    CompleteTeleport {
        /// Resolved structure of the destination map.
        map: MapDescriptor,
        /// Procedurally planned actors to add to the destination roster.
        spawns: Vec<SpawnDescriptor>,
        /// Zone on the source map the player stepped through.
        zone: TeleportZone,
    },
    /// Reports that a teleport destination could not be loaded.
    ReportMapLoadFailure {
        /// Reference of the map that failed to load.
        map: String,
    },
    /// Opens a dialogue with the provided lines.
    StartDialogue {
        /// Lines shown one after another.
        lines: Vec<String>,
    },
    /// Moves the player according to the held movement keys.
    ApplyInput {
        /// Movement keys held this frame.
        held: HeldKeys,
    },
    /// Requests a melee attack against every hostile in range.
    PlayerAttack,
    /// Requests a projectile aimed at the provided world point.
    PlayerShoot {
        /// World-space point the projectile travels toward.
        target: Vec2,
    },
    /// Talks to the nearby character or uses the overlapped teleport zone.
    Interact,
    /// Advances the active dialogue by one line.
    AdvanceDialogue,
    /// Decays player and actor timers by one tick.
    Tick,
    /// Requests that a hostile actor move by the provided displacement.
    MoveActor {
        /// Identifier of the actor attempting to move.
        actor: ActorId,
        /// Displacement in world pixels.
        delta: Vec2,
        /// Rule set validating the move.
        mode: MovementMode,
    },
    /// Requests that a slime strike the player.
    StrikePlayer {
        /// Identifier of the attacking actor.
        actor: ActorId,
    },
    /// Requests that a stationary shooter fire at the player.
    FireProjectile {
        /// Identifier of the shooting actor.
        actor: ActorId,
    },
    /// Advances every projectile and resolves its collisions.
    AdvanceProjectiles,
    /// Recomputes derived state at the end of a tick.
    FinishTick,
}

/// Rules applied when validating an actor move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementMode {
    /// Pursuit of the player. Only collision geometry blocks the move.
    Chase,
    /// Idle wandering. Collision geometry and map bounds block the move.
    Wander,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a map finished loading.
    MapLoaded {
        /// Name of the loaded map.
        map: String,
        /// Number of hostile actors on the fresh roster.
        hostiles: usize,
    },
    /// Confirms that the player arrived on a new map through a teleport.
    Teleported {
        /// Map the player left.
        from: String,
        /// Map the player arrived on.
        to: String,
        /// Arrival position after clamping.
        position: Vec2,
    },
    /// Signals that the player used a teleport zone that needs resolving.
    TeleportRequested {
        /// Zone the player stepped through.
        zone: TeleportZone,
        /// Destination reference carried by the zone.
        destination: String,
    },
    /// Reports that a map could not be loaded.
    MapLoadFailed {
        /// Reference of the map that failed to load.
        map: String,
    },
    /// Reports that a player action was refused.
    ActionRejected {
        /// Reason the action was refused.
        reason: RejectionReason,
    },
    /// Confirms that the player swung a melee attack.
    PlayerAttacked {
        /// Number of hostiles struck by the swing.
        hits: usize,
    },
    /// Confirms that a projectile entered flight.
    ProjectileFired {
        /// Identifier allocated to the projectile.
        projectile: ProjectileId,
        /// Side that fired the projectile.
        owner: Ownership,
        /// Whether the shot rolled a critical hit.
        is_crit: bool,
    },
    /// Reports damage dealt to a hostile actor.
    ActorDamaged {
        /// Identifier of the damaged actor.
        actor: ActorId,
        /// Damage applied.
        amount: f32,
        /// Whether the hit was critical.
        is_crit: bool,
    },
    /// Reports that a hostile actor died.
    ActorDied {
        /// Identifier of the defeated actor.
        actor: ActorId,
        /// Kind of the defeated actor.
        kind: ActorKind,
        /// Experience granted for the kill.
        xp_reward: u32,
    },
    /// Reports damage dealt to the player.
    PlayerDamaged {
        /// Damage applied.
        amount: f32,
        /// Whether the hit killed the player.
        died: bool,
    },
    /// Reports experience gained by the player.
    XpGained {
        /// Experience granted.
        amount: u32,
    },
    /// Reports that the player reached a new level.
    LevelUp {
        /// Level reached.
        level: u32,
    },
    /// Requests playback of a sound effect.
    SoundRequested {
        /// Sound to play.
        cue: SoundCue,
    },
    /// Announces that a dialogue opened.
    DialogueStarted {
        /// Number of lines in the dialogue.
        lines: usize,
    },
    /// Announces that the active dialogue closed.
    DialogueEnded,
    /// Announces that every hostile on the map is dead.
    TeleportMarkerArmed {
        /// Teleport rectangle the marker highlights.
        area: Rect,
    },
    /// Indicates that the simulation clock advanced by one tick.
    TimeAdvanced {
        /// Number of ticks simulated so far.
        tick: u64,
    },
}

/// Named sound effects the presentation layer can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    /// The player fired a projectile.
    Projectile,
    /// The player landed a melee attack.
    Attacking,
    /// The player was hurt.
    TakingDamage,
    /// The player gained a level.
    LevelUp,
}

impl SoundCue {
    /// Name of the sound asset associated with the cue.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Projectile => "projectile",
            Self::Attacking => "attacking",
            Self::TakingDamage => "taking_damage",
            Self::LevelUp => "level_up",
        }
    }
}

/// Reasons a player action can be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Stamina is below the attack cost.
    InsufficientStamina,
    /// The attack cooldown has not elapsed.
    OnCooldown,
    /// The swing connected with nothing.
    NoTargetInRange,
    /// The player is dead.
    PlayerDead,
}

impl RejectionReason {
    /// Status message displayed for the rejection.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InsufficientStamina => "Not enough stamina!",
            Self::OnCooldown => "Attack on cooldown!",
            Self::NoTargetInRange | Self::PlayerDead => "No enemy in range!",
        }
    }
}
