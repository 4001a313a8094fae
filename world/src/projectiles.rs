use glam::Vec2;
use medieval_rpg_core::{
    Ownership, ProjectileId, ProjectileSkin, ProjectileSnapshot, Rect, TileMetrics,
    PROJECTILE_SIZE, PROJECTILE_SPEED,
};

/// Straight-line projectile in flight.
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    id: ProjectileId,
    position: Vec2,
    velocity: Vec2,
    damage: f32,
    owner: Ownership,
    skin: ProjectileSkin,
    active: bool,
}

impl Projectile {
    /// Aims a projectile from `origin` toward `target`.
    ///
    /// Velocity stays zero when both points coincide.
    pub(crate) fn aimed(
        id: ProjectileId,
        origin: Vec2,
        target: Vec2,
        damage: f32,
        owner: Ownership,
        skin: ProjectileSkin,
    ) -> Self {
        let velocity = (target - origin).normalize_or_zero() * PROJECTILE_SPEED;
        Self {
            id,
            position: origin,
            velocity,
            damage,
            owner,
            skin,
            active: true,
        }
    }

    pub(crate) fn damage(&self) -> f32 {
        self.damage
    }

    pub(crate) fn owner(&self) -> Ownership {
        self.owner
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn advance(&mut self) {
        if self.active {
            self.position += self.velocity;
        }
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }

    pub(crate) fn hitbox(&self) -> Rect {
        Rect::centered_at(self.position, Vec2::splat(PROJECTILE_SIZE))
    }

    /// Active and still within the map's pixel bounds.
    pub(crate) fn is_retained(&self, tiles: &TileMetrics) -> bool {
        self.active && tiles.contains_point(self.position)
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            position: self.position,
            velocity: self.velocity,
            owner: self.owner,
            skin: self.skin,
        }
    }
}
