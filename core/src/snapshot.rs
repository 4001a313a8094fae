use glam::Vec2;
use serde::Serialize;

use crate::{
    ActorId, ActorKind, ActorState, AnimationKey, Facing, Ownership, ProjectileId, ProjectileSkin,
    Rect,
};

/// Immutable representation of a hostile actor used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ActorSnapshot {
    /// Identifier allocated to the actor by the world.
    pub id: ActorId,
    /// Kind of actor.
    pub kind: ActorKind,
    /// Top-left position in world pixels.
    pub position: Vec2,
    /// Collision box in world pixels.
    pub hitbox: Rect,
    /// Drawn footprint in world pixels.
    pub footprint: Rect,
    /// Combat state.
    pub state: ActorState,
    /// Remaining health.
    pub health: f32,
    /// Health the actor spawned with.
    pub max_health: u32,
    /// Ticks until the actor may strike or shoot again.
    pub cooldown: u32,
    /// Ticks of hit flash remaining.
    pub hit_flash: u32,
    /// Whether the last hit taken was critical.
    pub is_crit: bool,
}

/// Read-only snapshot describing every hostile actor on the map.
#[derive(Clone, Debug, Default)]
pub struct ActorView {
    snapshots: Vec<ActorSnapshot>,
}

impl ActorView {
    /// Creates a new actor view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ActorSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured actor snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ActorSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ActorSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of the player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    /// Top-left position in world pixels.
    pub position: Vec2,
    /// Collision box in world pixels.
    pub hitbox: Rect,
    /// Combat state.
    pub state: ActorState,
    /// Facing direction.
    pub facing: Facing,
    /// Animation the presentation layer should play.
    pub animation: AnimationKey,
    /// Remaining health.
    pub health: f32,
    /// Maximum health at the current level.
    pub max_health: u32,
    /// Remaining stamina.
    pub stamina: f32,
    /// Maximum stamina at the current level.
    pub max_stamina: f32,
    /// Current level.
    pub level: u32,
    /// Experience accumulated toward the next level.
    pub xp: u32,
    /// Experience required to leave the current level.
    pub xp_to_next_level: u32,
    /// Experience gained over the whole session.
    pub total_xp: u32,
    /// Ticks until the player may attack again.
    pub attack_cooldown: u32,
    /// Ticks of hit flash remaining.
    pub hit_flash: u32,
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Center of the projectile in world pixels.
    pub position: Vec2,
    /// Displacement applied each tick.
    pub velocity: Vec2,
    /// Side that fired the projectile.
    pub owner: Ownership,
    /// Appearance of the projectile.
    pub skin: ProjectileSkin,
}

/// Colour family of a floating text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatingTextTone {
    /// Experience gained.
    Experience,
    /// Level reached.
    LevelUp,
    /// Critical hit.
    Critical,
}

/// Immutable representation of a floating text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FloatingTextSnapshot {
    /// Anchor of the text in world pixels.
    pub position: Vec2,
    /// Text content.
    pub text: String,
    /// Colour family.
    pub tone: FloatingTextTone,
    /// Opacity in `0..=255`.
    pub alpha: u8,
}

/// Immutable representation of a non-combat character.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NpcSnapshot {
    /// Name of the character.
    pub name: String,
    /// Drawn footprint in world pixels.
    pub footprint: Rect,
}

/// Level-clear hint drawn over the first teleport zone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MarkerSnapshot {
    /// Teleport rectangle the marker highlights.
    pub area: Rect,
    /// Ticks before the marker expires.
    pub ticks_remaining: u32,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameSnapshot {
    /// Number of ticks simulated so far.
    pub tick: u64,
    /// Name of the loaded map.
    pub map_name: String,
    /// Map width in pixels.
    pub map_width: f32,
    /// Map height in pixels.
    pub map_height: f32,
    /// Tile size in pixels.
    pub tile_size: Vec2,
    /// The player.
    pub player: PlayerSnapshot,
    /// Hostile actors in identifier order.
    pub actors: Vec<ActorSnapshot>,
    /// Non-combat characters.
    pub npcs: Vec<NpcSnapshot>,
    /// Projectiles in flight.
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Floating texts still alive.
    pub floating_texts: Vec<FloatingTextSnapshot>,
    /// Status message currently displayed.
    pub status_message: Option<String>,
    /// Dialogue line currently displayed.
    pub dialogue_line: Option<String>,
    /// Whether the player can teleport right now.
    pub teleport_ready: bool,
    /// Character the player can talk to right now.
    pub nearby_npc: Option<String>,
    /// Level-clear marker, when armed.
    pub marker: Option<MarkerSnapshot>,
}
