//! Per-map roster of hostile actors and non-combat characters.

use glam::Vec2;
use medieval_rpg_core::{
    ActorId, ActorKind, ActorSnapshot, ActorState, NpcDescriptor, NpcSnapshot, Rect,
    SpawnDescriptor, TileMetrics, ATTACK_FRAME_TICKS, SLIME_ATTACK_COOLDOWN_TICKS,
    SLIME_ATTACK_FRAMES,
};

use crate::actors::{CombatActor, DamageOutcome, Vitals};

/// Distance within which the player can talk to a character.
const NPC_INTERACTION_RANGE: f32 = 80.0;

/// Edge length of a drawn character, measured in tiles.
const NPC_RENDER_TILES: f32 = 2.0;

/// A slime, tower or boss living on the current map.
#[derive(Clone, Debug)]
pub(crate) struct Hostile {
    id: ActorId,
    kind: ActorKind,
    position: Vec2,
    tile_size: Vec2,
    vitals: Vitals,
    cooldown: u32,
    attack_animation: u32,
}

impl Hostile {
    fn new(id: ActorId, kind: ActorKind, position: Vec2, tile_size: Vec2) -> Self {
        Self {
            id,
            kind,
            position,
            tile_size,
            vitals: Vitals::new(kind.max_health()),
            cooldown: 0,
            attack_animation: 0,
        }
    }

    pub(crate) fn id(&self) -> ActorId {
        self.id
    }

    pub(crate) fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub(crate) fn footprint(&self) -> Rect {
        Rect::from_origin(self.position, self.tile_size * self.kind.render_tiles())
    }

    /// Point projectiles leave from when this actor shoots.
    pub(crate) fn muzzle(&self) -> Vec2 {
        let footprint = self.footprint();
        match self.kind {
            ActorKind::Tower(_) => Vec2::new(
                footprint.x + footprint.width * 0.5,
                footprint.y + footprint.height * 0.25,
            ),
            _ => footprint.center(),
        }
    }

    /// Starts the slime strike animation and cooldown.
    pub(crate) fn begin_strike(&mut self) {
        self.cooldown = SLIME_ATTACK_COOLDOWN_TICKS;
        self.vitals.state = ActorState::Attacking;
        self.attack_animation = SLIME_ATTACK_FRAMES * ATTACK_FRAME_TICKS;
    }

    pub(crate) fn reset_cooldown(&mut self, ticks: u32) {
        self.cooldown = ticks;
    }

    pub(crate) fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            hitbox: self.hitbox(),
            footprint: self.footprint(),
            state: self.vitals.state,
            health: self.vitals.health,
            max_health: self.vitals.max_health,
            cooldown: self.cooldown,
            hit_flash: self.vitals.hit_flash,
            is_crit: self.vitals.is_crit,
        }
    }
}

impl CombatActor for Hostile {
    fn kind(&self) -> ActorKind {
        self.kind
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn state(&self) -> ActorState {
        self.vitals.state
    }

    fn hitbox(&self) -> Rect {
        Rect::from_origin(self.position, self.tile_size * self.kind.hitbox_tiles())
    }

    fn take_damage(&mut self, amount: f32, is_crit: bool) -> DamageOutcome {
        match self.vitals.absorb(amount, is_crit) {
            Some(true) => DamageOutcome {
                died: true,
                xp_reward: self.kind.xp_reward(self.vitals.max_health),
            },
            Some(false) | None => DamageOutcome::SURVIVED,
        }
    }

    fn tick(&mut self) {
        if self.vitals.state.is_dead() {
            return;
        }

        self.cooldown = self.cooldown.saturating_sub(1);
        self.vitals.decay_flash();
        if self.attack_animation > 0 {
            self.attack_animation -= 1;
            if self.attack_animation == 0 && self.vitals.state == ActorState::Attacking {
                self.vitals.state = ActorState::Idle;
            }
        }
    }
}

/// Character the player can talk to.
#[derive(Clone, Debug)]
pub(crate) struct Npc {
    descriptor: NpcDescriptor,
    tile_size: Vec2,
}

impl Npc {
    pub(crate) fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub(crate) fn dialogue(&self) -> Vec<String> {
        self.descriptor.dialogue_lines()
    }

    pub(crate) fn can_interact(&self, player_position: Vec2) -> bool {
        self.descriptor.position.distance(player_position) <= NPC_INTERACTION_RANGE
    }

    pub(crate) fn snapshot(&self) -> NpcSnapshot {
        NpcSnapshot {
            name: self.descriptor.name.clone(),
            footprint: Rect::from_origin(
                self.descriptor.position,
                self.tile_size * NPC_RENDER_TILES,
            ),
        }
    }
}

/// Actors belonging to the loaded map. Rebuilt wholesale on every load.
#[derive(Clone, Debug, Default)]
pub(crate) struct Roster {
    hostiles: Vec<Hostile>,
    npcs: Vec<Npc>,
}

impl Roster {
    /// Builds a roster with hostiles ordered slimes, then bosses, then towers.
    ///
    /// Identifiers follow that order, so identifier order is strike priority.
    pub(crate) fn build(
        tiles: &TileMetrics,
        declared: &[SpawnDescriptor],
        planned: &[SpawnDescriptor],
        npcs: &[NpcDescriptor],
    ) -> Self {
        let tile_size = tiles.tile_size();
        let mut spawns: Vec<&SpawnDescriptor> = declared
            .iter()
            .chain(planned.iter())
            .filter(|spawn| spawn.kind.is_hostile())
            .collect();
        spawns.sort_by_key(|spawn| strike_priority(spawn.kind));

        let hostiles = spawns
            .into_iter()
            .zip(1..)
            .map(|(spawn, id)| Hostile::new(ActorId::new(id), spawn.kind, spawn.position, tile_size))
            .collect();
        let npcs = npcs
            .iter()
            .map(|descriptor| Npc {
                descriptor: descriptor.clone(),
                tile_size,
            })
            .collect();

        Self { hostiles, npcs }
    }

    pub(crate) fn hostiles(&self) -> &[Hostile] {
        &self.hostiles
    }

    pub(crate) fn hostiles_mut(&mut self) -> &mut [Hostile] {
        &mut self.hostiles
    }

    pub(crate) fn hostile_mut(&mut self, id: ActorId) -> Option<&mut Hostile> {
        self.hostiles.iter_mut().find(|hostile| hostile.id == id)
    }

    pub(crate) fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    pub(crate) fn living_hostiles(&self) -> usize {
        self.hostiles.iter().filter(|hostile| !hostile.is_dead()).count()
    }

    /// True once at least one hostile existed and every hostile is dead.
    pub(crate) fn is_cleared(&self) -> bool {
        !self.hostiles.is_empty() && self.living_hostiles() == 0
    }
}

fn strike_priority(kind: ActorKind) -> u8 {
    match kind {
        ActorKind::Slime(_) => 0,
        ActorKind::Boss => 1,
        ActorKind::Tower(_) => 2,
        ActorKind::Player => 3,
    }
}
