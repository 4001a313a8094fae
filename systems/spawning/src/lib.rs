#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawn planner that populates freshly loaded maps.
//!
//! The planner scatters randomly coloured slimes over open ground and places
//! a per-map tower layout when the map does not declare towers itself. Safe
//! maps, such as the starting inn, receive nothing. Plans are plain
//! [`SpawnDescriptor`] lists that the world merges into its roster.

use glam::Vec2;
use medieval_rpg_core::{
    ActorKind, Element, MapDescriptor, Rect, SlimeKind, SpawnDescriptor, TileMetrics,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

const DEFAULT_SLIME_COUNT: usize = 8;
const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 50;
const DEFAULT_TILE_MARGIN: u32 = 5;
const DEFAULT_SAFE_MAP: &str = "home_inn_1";
const SLIME_CLEARANCE_TILES: f32 = 2.0;
const TOWER_CLEARANCE_TILES: f32 = 3.0;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    slime_count: usize,
    placement_attempts: u32,
    tile_margin: u32,
    safe_maps: Vec<String>,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration with the given slime count, safe maps and seed.
    ///
    /// Placement uses 50 attempts per slime and keeps five tiles away from
    /// the map edges until changed with [`Config::with_placement`].
    #[must_use]
    pub fn new(slime_count: usize, safe_maps: Vec<String>, rng_seed: u64) -> Self {
        Self {
            slime_count,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            tile_margin: DEFAULT_TILE_MARGIN,
            safe_maps,
            rng_seed,
        }
    }

    /// Overrides how many positions are tried per slime and the edge margin in tiles.
    #[must_use]
    pub fn with_placement(mut self, attempts: u32, tile_margin: u32) -> Self {
        self.placement_attempts = attempts;
        self.tile_margin = tile_margin;
        self
    }

    /// Replaces the seed of the placement generator.
    #[must_use]
    pub fn reseeded(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            DEFAULT_SLIME_COUNT,
            vec![DEFAULT_SAFE_MAP.to_owned()],
            0x5eed_51e5_0000_0001,
        )
    }
}

/// Pure system that plans procedural spawns for each loaded map.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            config,
        }
    }

    /// Reports whether the map is exempt from procedural spawns.
    #[must_use]
    pub fn is_safe(&self, map_name: &str) -> bool {
        self.config
            .safe_maps
            .iter()
            .any(|safe| safe.eq_ignore_ascii_case(map_name))
    }

    /// Plans the slimes and preset towers to add to the given map.
    pub fn plan(&mut self, map: &MapDescriptor) -> Vec<SpawnDescriptor> {
        if self.is_safe(&map.name) {
            debug!(map = %map.name, "safe map, no procedural spawns");
            return Vec::new();
        }

        let collision = map.collision_rects();
        let mut planned = self.scatter_slimes(&map.tiles, &collision);
        let slimes = planned.len();

        if !map.declares_towers() {
            let name = map.name.to_lowercase();
            planned.extend(
                tower_layout(&name, map.tiles.columns, map.tiles.rows)
                    .into_iter()
                    .map(|(element, column, row)| {
                        SpawnDescriptor::new(
                            ActorKind::Tower(element),
                            map.tiles.tile_origin(column, row),
                        )
                    })
                    .filter(|spawn| {
                        is_clear(
                            spawn.position,
                            map.tiles.tile_size() * TOWER_CLEARANCE_TILES,
                            &collision,
                        )
                    }),
            );
        }

        debug!(
            map = %map.name,
            slimes,
            towers = planned.len() - slimes,
            "planned procedural spawns"
        );
        planned
    }

    fn scatter_slimes(&mut self, tiles: &TileMetrics, collision: &[Rect]) -> Vec<SpawnDescriptor> {
        let margin = self.config.tile_margin;
        if tiles.columns < margin * 2 || tiles.rows < margin * 2 {
            return Vec::new();
        }
        let columns = margin..=tiles.columns - margin;
        let rows = margin..=tiles.rows - margin;
        let clearance = tiles.tile_size() * SLIME_CLEARANCE_TILES;

        let mut slimes = Vec::with_capacity(self.config.slime_count);
        for _ in 0..self.config.slime_count {
            let kind = SlimeKind::ALL[self.rng.gen_range(0..SlimeKind::ALL.len())];
            for _ in 0..self.config.placement_attempts {
                let column = self.rng.gen_range(columns.clone());
                let row = self.rng.gen_range(rows.clone());
                let position = tiles.tile_origin(column, row);
                if is_clear(position, clearance, collision) {
                    slimes.push(SpawnDescriptor::new(ActorKind::Slime(kind), position));
                    break;
                }
            }
        }
        slimes
    }
}

fn is_clear(origin: Vec2, size: Vec2, collision: &[Rect]) -> bool {
    let footprint = Rect::from_origin(origin, size);
    !collision.iter().any(|blocker| footprint.overlaps(blocker))
}

/// Tower placements, in tiles, for a lower-cased map name.
fn tower_layout(name: &str, columns: u32, rows: u32) -> Vec<(Element, u32, u32)> {
    let from_right = |tiles: u32| columns.saturating_sub(tiles);
    let from_bottom = |tiles: u32| rows.saturating_sub(tiles);

    if name.contains("winter") || name.contains("boss") {
        vec![
            (Element::Ice, 5, 5),
            (Element::Ice, from_right(8), 5),
            (Element::Water, 5, from_bottom(8)),
            (Element::Water, from_right(8), from_bottom(8)),
        ]
    } else if name.contains("angel") {
        vec![
            (Element::Holy, (columns / 2).saturating_sub(3), 5),
            (Element::Holy, 5, rows / 2),
            (Element::Holy, from_right(8), rows / 2),
        ]
    } else if name.contains("fire") || name.contains("lava") {
        vec![
            (Element::Fire, 7, 7),
            (Element::Fire, from_right(10), 7),
            (Element::Void, columns / 2, from_bottom(10)),
        ]
    } else {
        vec![(Element::Fire, 10, 10), (Element::Water, from_right(13), 10)]
    }
}
