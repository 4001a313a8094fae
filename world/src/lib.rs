#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the medieval RPG.
//!
//! The world owns the player, the roster of the loaded map, projectiles in
//! flight, and transient feedback. It is mutated exclusively through
//! [`apply`] and read through the [`query`] module. Randomness used for
//! critical hits comes from a seeded generator owned by the world, so a
//! replayed command stream produces the same events.

mod actors;
mod feedback;
mod player;
mod projectiles;
mod roster;
mod transition;

use glam::Vec2;
use medieval_rpg_core::{
    critical_damage, roll_crit, ActorId, ActorKind, Command, Event, FloatingTextTone,
    MapDescriptor, MovementMode, Ownership, ProjectileId, ProjectileSkin, Rect, RejectionReason,
    SoundCue, SpawnDescriptor, TeleportZone, TileMetrics,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

pub use actors::{CombatActor, DamageOutcome};

use feedback::Feedback;
use player::{Player, ATTACK_RANGE, CRIT_MULTIPLIER};
use projectiles::Projectile;
use roster::Roster;

const ACTION_MESSAGE_TICKS: u32 = 30;
const LEVEL_UP_MESSAGE_TICKS: u32 = 120;
const TELEPORT_MESSAGE_TICKS: u32 = 60;
const LOAD_FAILURE_MESSAGE_TICKS: u32 = 60;

const DEFAULT_TILE_SIZE: f32 = 32.0;

/// Tunable parameters of the world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// Map that triggers the hub-to-main arrival exception when left.
    pub hub_map: String,
    /// Map that receives the hub-to-main arrival exception.
    pub main_map: String,
    /// Health restored by every successful teleport.
    pub teleport_heal: u32,
    /// Ticks before another teleport may trigger.
    pub teleport_cooldown: u32,
    /// Ticks the level-clear marker stays armed.
    pub marker_duration: u32,
    /// Tile the player is placed on when a map is loaded directly.
    pub spawn_tile: [u32; 2],
    /// Seed of the critical hit generator.
    pub rng_seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            hub_map: "home_inn_1".to_owned(),
            main_map: "main_map".to_owned(),
            teleport_heal: 20,
            teleport_cooldown: 30,
            marker_duration: 300,
            spawn_tile: [166, 57],
            rng_seed: 0x5eed_c0ff_ee00_0001,
        }
    }
}

/// Represents the authoritative world state.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    rng: ChaCha8Rng,
    map: MapDescriptor,
    collision: Vec<Rect>,
    player: Player,
    roster: Roster,
    projectiles: Vec<Projectile>,
    next_projectile: u32,
    feedback: Feedback,
    nearby_npc: Option<usize>,
    teleport_cooldown: u32,
    teleport_ready: bool,
    marker: Option<Rect>,
    marker_ticks: u32,
    tick_index: u64,
}

impl World {
    /// Creates a world with no map loaded.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let tiles = TileMetrics::new(DEFAULT_TILE_SIZE, DEFAULT_TILE_SIZE, 0, 0);
        let [column, row] = config.spawn_tile;
        let player = Player::new(tiles.tile_origin(column, row), tiles.tile_size());
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            config,
            map: MapDescriptor::new(String::new(), tiles),
            collision: Vec::new(),
            player,
            roster: Roster::default(),
            projectiles: Vec::new(),
            next_projectile: 1,
            feedback: Feedback::default(),
            nearby_npc: None,
            teleport_cooldown: 0,
            teleport_ready: false,
            marker: None,
            marker_ticks: 0,
            tick_index: 0,
        }
    }

    fn install_map(&mut self, map: MapDescriptor, planned: &[SpawnDescriptor]) {
        self.collision = map.collision_rects();
        self.roster = Roster::build(&map.tiles, &map.spawns, planned, &map.npcs);
        self.player.set_size(map.tiles.tile_size());
        self.projectiles.clear();
        self.marker = None;
        self.marker_ticks = 0;
        self.teleport_ready = false;
        debug!(
            map = %map.name,
            hostiles = self.roster.hostiles().len(),
            npcs = self.roster.npcs().len(),
            "rebuilt roster"
        );
        self.map = map;
    }

    fn place_player(&mut self, position: Vec2) {
        let clamped = self.map.tiles.clamp_origin(position, self.player.size());
        self.player.set_position(clamped);
        self.nearby_npc = self.find_nearby_npc();
    }

    fn find_nearby_npc(&self) -> Option<usize> {
        let position = self.player.position();
        self.roster
            .npcs()
            .iter()
            .position(|npc| npc.can_interact(position))
    }

    fn map_loaded_event(&self) -> Event {
        Event::MapLoaded {
            map: self.map.name.clone(),
            hostiles: self.roster.hostiles().len(),
        }
    }

    fn complete_teleport(
        &mut self,
        map: MapDescriptor,
        planned: &[SpawnDescriptor],
        zone: &TeleportZone,
        out_events: &mut Vec<Event>,
    ) {
        let source = self.map.name.clone();
        let arrival = transition::arrival_point(&self.config, &source, zone, &map);
        self.install_map(map, planned);

        let position = arrival.unwrap_or_else(|| self.player.position());
        self.place_player(position);
        self.player.heal(self.config.teleport_heal as f32);
        self.feedback.status.show(
            format!("Teleported! Health +{}", self.config.teleport_heal),
            TELEPORT_MESSAGE_TICKS,
        );
        self.teleport_cooldown = self.config.teleport_cooldown;

        let position = self.player.position();
        info!(from = %source, to = %self.map.name, x = position.x, y = position.y, "teleported");
        out_events.push(self.map_loaded_event());
        out_events.push(Event::Teleported {
            from: source,
            to: self.map.name.clone(),
            position,
        });
    }

    fn reject(&mut self, reason: RejectionReason, out_events: &mut Vec<Event>) {
        self.feedback
            .status
            .show(reason.message(), ACTION_MESSAGE_TICKS);
        out_events.push(Event::ActionRejected { reason });
    }

    fn player_attack(&mut self, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.player.spend_attack() {
            self.reject(reason, out_events);
            return;
        }
        self.player.begin_attack_animation();

        let origin = self.player.position();
        let crit_chance = self.player.crit_chance();
        let damage = self.player.attack_damage();
        let mut hits = 0;
        let mut rewards = Vec::new();
        for hostile in self.roster.hostiles_mut() {
            if hostile.is_dead() || origin.distance(hostile.position()) > ATTACK_RANGE {
                continue;
            }

            let is_crit = roll_crit(&mut self.rng, crit_chance);
            let amount = critical_damage(damage, is_crit, CRIT_MULTIPLIER);
            let outcome = hostile.take_damage(amount, is_crit);
            hits += 1;
            out_events.push(Event::ActorDamaged {
                actor: hostile.id(),
                amount,
                is_crit,
            });
            if outcome.died {
                out_events.push(Event::ActorDied {
                    actor: hostile.id(),
                    kind: hostile.kind(),
                    xp_reward: outcome.xp_reward,
                });
                rewards.push(outcome.xp_reward);
            }
        }

        if hits == 0 {
            self.reject(RejectionReason::NoTargetInRange, out_events);
            return;
        }

        self.feedback.status.show("Hit!", ACTION_MESSAGE_TICKS);
        out_events.push(Event::PlayerAttacked { hits });
        out_events.push(Event::SoundRequested {
            cue: SoundCue::Attacking,
        });
        for reward in rewards {
            award_xp(&mut self.player, &mut self.feedback, reward, out_events);
        }
    }

    fn player_shoot(&mut self, target: Vec2, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.player.spend_attack() {
            self.reject(reason, out_events);
            return;
        }

        let is_crit = roll_crit(&mut self.rng, self.player.crit_chance());
        let damage = critical_damage(self.player.attack_damage(), is_crit, CRIT_MULTIPLIER);
        let id = self.allocate_projectile();
        self.projectiles.push(Projectile::aimed(
            id,
            self.player.center(),
            target,
            damage,
            Ownership::Player,
            ProjectileSkin::Plain,
        ));
        out_events.push(Event::ProjectileFired {
            projectile: id,
            owner: Ownership::Player,
            is_crit,
        });
        out_events.push(Event::SoundRequested {
            cue: SoundCue::Projectile,
        });

        if is_crit {
            let anchor = Vec2::new(
                self.player.position().x + self.player.size().x * 0.5,
                self.player.position().y,
            );
            self.feedback
                .float(anchor, "Critical!".to_owned(), FloatingTextTone::Critical);
        }
    }

    fn allocate_projectile(&mut self) -> ProjectileId {
        let id = ProjectileId::new(self.next_projectile);
        self.next_projectile = self.next_projectile.wrapping_add(1);
        id
    }

    fn interact(&mut self, out_events: &mut Vec<Event>) {
        if self.player.is_dead() || self.feedback.dialogue.is_active() {
            return;
        }

        if let Some(npc) = self.nearby_npc.and_then(|index| self.roster.npcs().get(index)) {
            let message = format!("Talking to {}...", npc.name());
            let lines = npc.dialogue();
            self.feedback.status.show(message, ACTION_MESSAGE_TICKS);
            self.start_dialogue(lines, out_events);
            return;
        }

        if self.teleport_cooldown > 0 {
            debug!(cooldown = self.teleport_cooldown, "teleport still cooling down");
            return;
        }

        let hitbox = self.player.hitbox();
        let requested = self.map.teleports.iter().find_map(|zone| {
            let destination = zone.destination.as_ref()?;
            hitbox
                .overlaps(&zone.area)
                .then(|| (zone.clone(), destination.clone()))
        });
        if let Some((zone, destination)) = requested {
            debug!(%destination, "teleport requested");
            out_events.push(Event::TeleportRequested { zone, destination });
        }
    }

    fn start_dialogue(&mut self, lines: Vec<String>, out_events: &mut Vec<Event>) {
        let count = lines.len();
        self.feedback.dialogue.start(lines);
        if self.feedback.dialogue.is_active() {
            out_events.push(Event::DialogueStarted { lines: count });
        }
    }

    fn move_actor(&mut self, actor: ActorId, delta: Vec2, mode: MovementMode) {
        let tiles = self.map.tiles;
        let Some(hostile) = self.roster.hostile_mut(actor) else {
            return;
        };
        if hostile.is_dead() || !matches!(hostile.kind(), ActorKind::Slime(_)) {
            return;
        }

        let candidate = hostile.hitbox().translated(delta);
        if self.collision.iter().any(|blocker| candidate.overlaps(blocker)) {
            return;
        }
        if mode == MovementMode::Wander
            && !((0.0..=tiles.pixel_width()).contains(&candidate.x)
                && (0.0..=tiles.pixel_height()).contains(&candidate.y))
        {
            return;
        }

        hostile.translate(delta);
    }

    fn strike_player(&mut self, actor: ActorId, out_events: &mut Vec<Event>) {
        let player_position = self.player.position();
        if self.player.is_dead() {
            return;
        }
        let Some(hostile) = self.roster.hostile_mut(actor) else {
            return;
        };
        let ActorKind::Slime(kind) = hostile.kind() else {
            return;
        };
        let stats = kind.stats();
        if hostile.is_dead()
            || hostile.cooldown() > 0
            || hostile.position().distance(player_position) > stats.attack_range
        {
            return;
        }

        hostile.begin_strike();
        let outcome = self.player.take_damage(stats.attack_damage, false);
        out_events.push(Event::PlayerDamaged {
            amount: stats.attack_damage,
            died: outcome.died,
        });
        out_events.push(Event::SoundRequested {
            cue: SoundCue::TakingDamage,
        });
    }

    fn fire_projectile(&mut self, actor: ActorId, out_events: &mut Vec<Event>) {
        let player_position = self.player.position();
        let target = self.player.center();
        if self.player.is_dead() {
            return;
        }
        let Some(hostile) = self.roster.hostile_mut(actor) else {
            return;
        };
        let Some(stats) = hostile.kind().shooter_stats() else {
            return;
        };
        if hostile.is_dead()
            || hostile.cooldown() > 0
            || hostile.position().distance(player_position) > stats.detection_range
        {
            return;
        }

        hostile.reset_cooldown(stats.shoot_interval);
        let origin = hostile.muzzle();
        let id = self.allocate_projectile();
        self.projectiles.push(Projectile::aimed(
            id,
            origin,
            target,
            stats.attack_damage,
            Ownership::Enemy,
            stats.skin,
        ));
        out_events.push(Event::ProjectileFired {
            projectile: id,
            owner: Ownership::Enemy,
            is_crit: false,
        });
    }

    fn advance_projectiles(&mut self, out_events: &mut Vec<Event>) {
        for projectile in &mut self.projectiles {
            projectile.advance();
            if !projectile.is_active() {
                continue;
            }
            let hitbox = projectile.hitbox();

            match projectile.owner() {
                Ownership::Enemy => {
                    if !self.player.is_dead() && hitbox.overlaps(&self.player.hitbox()) {
                        let outcome = self.player.take_damage(projectile.damage(), false);
                        out_events.push(Event::PlayerDamaged {
                            amount: projectile.damage(),
                            died: outcome.died,
                        });
                        out_events.push(Event::SoundRequested {
                            cue: SoundCue::TakingDamage,
                        });
                        projectile.deactivate();
                    }
                }
                Ownership::Player => {
                    let target = self
                        .roster
                        .hostiles_mut()
                        .iter_mut()
                        .find(|hostile| !hostile.is_dead() && hitbox.overlaps(&hostile.hitbox()));
                    if let Some(hostile) = target {
                        let is_crit = roll_crit(&mut self.rng, self.player.crit_chance());
                        let amount = critical_damage(projectile.damage(), is_crit, CRIT_MULTIPLIER);
                        let outcome = hostile.take_damage(amount, is_crit);
                        out_events.push(Event::ActorDamaged {
                            actor: hostile.id(),
                            amount,
                            is_crit,
                        });
                        if is_crit {
                            let struck = hostile.hitbox();
                            self.feedback.float(
                                Vec2::new(struck.x + struck.width * 0.5, struck.y),
                                "Critical!".to_owned(),
                                FloatingTextTone::Critical,
                            );
                        }
                        if outcome.died {
                            out_events.push(Event::ActorDied {
                                actor: hostile.id(),
                                kind: hostile.kind(),
                                xp_reward: outcome.xp_reward,
                            });
                            award_xp(
                                &mut self.player,
                                &mut self.feedback,
                                outcome.xp_reward,
                                out_events,
                            );
                        }
                        projectile.deactivate();
                    }
                }
            }

            if projectile.is_active() && self.collision.iter().any(|blocker| hitbox.overlaps(blocker)) {
                projectile.deactivate();
            }
        }

        let tiles = self.map.tiles;
        self.projectiles
            .retain(|projectile| projectile.is_retained(&tiles));
    }

    fn finish_tick(&mut self, out_events: &mut Vec<Event>) {
        self.feedback.tick();

        if self.teleport_cooldown > 0 {
            self.teleport_cooldown -= 1;
            self.teleport_ready = false;
        } else {
            let hitbox = self.player.hitbox();
            self.teleport_ready = !self.player.is_dead()
                && self
                    .map
                    .teleports
                    .iter()
                    .any(|zone| zone.destination.is_some() && hitbox.overlaps(&zone.area));
        }

        self.nearby_npc = self.find_nearby_npc();

        if self.marker_ticks == 0 && self.roster.is_cleared() {
            if let Some(first) = self.map.teleports.first() {
                self.marker = Some(first.area);
                self.marker_ticks = self.config.marker_duration;
                info!(map = %self.map.name, "map cleared");
                out_events.push(Event::TeleportMarkerArmed { area: first.area });
            }
        }
        if self.marker_ticks > 0 {
            self.marker_ticks -= 1;
            if self.marker_ticks == 0 {
                self.marker = None;
            }
        }
    }
}

fn award_xp(player: &mut Player, feedback: &mut Feedback, amount: u32, out_events: &mut Vec<Event>) {
    if amount == 0 || player.is_dead() {
        return;
    }

    let levels = player.gain_xp(amount);
    out_events.push(Event::XpGained { amount });
    let anchor = Vec2::new(
        player.position().x + player.size().x * 0.5,
        player.position().y,
    );
    feedback.float(
        anchor - Vec2::new(0.0, 20.0),
        format!("+{amount} XP"),
        FloatingTextTone::Experience,
    );

    for level in levels {
        info!(level, "player levelled up");
        feedback.status.show(
            format!("LEVEL UP! Now Level {level}"),
            LEVEL_UP_MESSAGE_TICKS,
        );
        feedback.float(
            anchor - Vec2::new(0.0, 40.0),
            format!("LEVEL {level}!"),
            FloatingTextTone::LevelUp,
        );
        out_events.push(Event::LevelUp { level });
        out_events.push(Event::SoundRequested {
            cue: SoundCue::LevelUp,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadMap { map, spawns } => {
            info!(map = %map.name, "loading map");
            world.install_map(map, &spawns);
            let [column, row] = world.config.spawn_tile;
            let spawn = world.map.tiles.tile_origin(column, row);
            world.place_player(spawn);
            out_events.push(world.map_loaded_event());
        }
        Command::CompleteTeleport { map, spawns, zone } => {
            world.complete_teleport(map, &spawns, &zone, out_events);
        }
        Command::ReportMapLoadFailure { map } => {
            warn!(%map, "map transition aborted");
            world.feedback.status.show(
                format!("Failed to load map: {map}"),
                LOAD_FAILURE_MESSAGE_TICKS,
            );
            out_events.push(Event::MapLoadFailed { map });
        }
        Command::StartDialogue { lines } => world.start_dialogue(lines, out_events),
        Command::ApplyInput { held } => {
            world
                .player
                .apply_input(held, &world.collision, &world.map.tiles);
        }
        Command::PlayerAttack => world.player_attack(out_events),
        Command::PlayerShoot { target } => world.player_shoot(target, out_events),
        Command::Interact => world.interact(out_events),
        Command::AdvanceDialogue => {
            if world.feedback.dialogue.advance() {
                out_events.push(Event::DialogueEnded);
            }
        }
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
            world.player.tick();
            for hostile in world.roster.hostiles_mut() {
                hostile.tick();
            }
        }
        Command::MoveActor { actor, delta, mode } => world.move_actor(actor, delta, mode),
        Command::StrikePlayer { actor } => world.strike_player(actor, out_events),
        Command::FireProjectile { actor } => world.fire_projectile(actor, out_events),
        Command::AdvanceProjectiles => world.advance_projectiles(out_events),
        Command::FinishTick => world.finish_tick(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use medieval_rpg_core::{
        ActorView, FrameSnapshot, MapDescriptor, MarkerSnapshot, PlayerSnapshot,
        ProjectileSnapshot, Rect,
    };

    use super::{CombatActor, World};

    /// Captures everything a presentation layer needs to draw the frame.
    #[must_use]
    pub fn frame_snapshot(world: &World) -> FrameSnapshot {
        let tiles = world.map.tiles;
        FrameSnapshot {
            tick: world.tick_index,
            map_name: world.map.name.clone(),
            map_width: tiles.pixel_width(),
            map_height: tiles.pixel_height(),
            tile_size: tiles.tile_size(),
            player: world.player.snapshot(),
            actors: actor_view(world).into_vec(),
            npcs: world.roster.npcs().iter().map(|npc| npc.snapshot()).collect(),
            projectiles: projectiles(world),
            floating_texts: world
                .feedback
                .texts
                .iter()
                .map(|text| text.snapshot())
                .collect(),
            status_message: status_message(world).map(str::to_owned),
            dialogue_line: world.feedback.dialogue.current_line().map(str::to_owned),
            teleport_ready: world.teleport_ready,
            nearby_npc: world
                .nearby_npc
                .and_then(|index| world.roster.npcs().get(index))
                .map(|npc| npc.name().to_owned()),
            marker: world.marker.map(|area| MarkerSnapshot {
                area,
                ticks_remaining: world.marker_ticks,
            }),
        }
    }

    /// Captures every hostile actor on the loaded map in strike priority order.
    #[must_use]
    pub fn actor_view(world: &World) -> ActorView {
        ActorView::from_snapshots(
            world
                .roster
                .hostiles()
                .iter()
                .map(|hostile| hostile.snapshot())
                .collect(),
        )
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Captures projectiles currently in flight.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| projectile.snapshot())
            .collect()
    }

    /// Provides the descriptor of the loaded map.
    #[must_use]
    pub fn map(world: &World) -> &MapDescriptor {
        &world.map
    }

    /// Blocking rectangles of the loaded map, blocked tiles included.
    #[must_use]
    pub fn collision(world: &World) -> &[Rect] {
        &world.collision
    }

    /// Reports whether a dialogue is open.
    #[must_use]
    pub fn dialogue_active(world: &World) -> bool {
        world.feedback.dialogue.is_active()
    }

    /// Status message currently displayed, if any.
    #[must_use]
    pub fn status_message(world: &World) -> Option<&str> {
        world.feedback.status.current()
    }

    /// Reports whether the player stands on a usable teleport zone.
    #[must_use]
    pub fn teleport_ready(world: &World) -> bool {
        world.teleport_ready
    }

    /// Ticks before another teleport may trigger.
    #[must_use]
    pub fn teleport_cooldown(world: &World) -> u32 {
        world.teleport_cooldown
    }

    /// Number of hostile actors still alive on the loaded map.
    #[must_use]
    pub fn hostiles_alive(world: &World) -> usize {
        world.roster.living_hostiles()
    }

    /// Reports whether the player is dead.
    #[must_use]
    pub fn player_dead(world: &World) -> bool {
        world.player.is_dead()
    }

    /// Number of ticks simulated so far.
    #[must_use]
    pub fn tick(world: &World) -> u64 {
        world.tick_index
    }
}
