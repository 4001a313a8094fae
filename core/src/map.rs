use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{ActorKind, Rect, TileMetrics};

/// Resolved structure of a map as supplied by a map data provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapDescriptor {
    /// Map name used for rule matching, typically the file stem.
    #[serde(default)]
    pub name: String,
    /// Tile size and map extents.
    pub tiles: TileMetrics,
    /// Blocking rectangles in world pixels.
    #[serde(default)]
    pub collision: Vec<Rect>,
    /// Blocking tiles given as `[column, row]` pairs.
    #[serde(default)]
    pub blocked_tiles: Vec<[u32; 2]>,
    /// Teleport zones in declaration order. Order defines pairing.
    #[serde(default)]
    pub teleports: Vec<TeleportZone>,
    /// Actors declared by the map itself.
    #[serde(default)]
    pub spawns: Vec<SpawnDescriptor>,
    /// Non-combat characters declared by the map.
    #[serde(default)]
    pub npcs: Vec<NpcDescriptor>,
}

impl MapDescriptor {
    /// Creates an empty map with the provided name and metrics.
    #[must_use]
    pub fn new(name: impl Into<String>, tiles: TileMetrics) -> Self {
        Self {
            name: name.into(),
            tiles,
            collision: Vec::new(),
            blocked_tiles: Vec::new(),
            teleports: Vec::new(),
            spawns: Vec::new(),
            npcs: Vec::new(),
        }
    }

    /// Returns every blocking rectangle, blocked tiles included.
    #[must_use]
    pub fn collision_rects(&self) -> Vec<Rect> {
        let tile_size = self.tiles.tile_size();
        self.collision
            .iter()
            .copied()
            .chain(self.blocked_tiles.iter().map(|[column, row]| {
                Rect::from_origin(self.tiles.tile_origin(*column, *row), tile_size)
            }))
            .collect()
    }

    /// Reports whether the map declares any tower of its own.
    #[must_use]
    pub fn declares_towers(&self) -> bool {
        self.spawns
            .iter()
            .any(|spawn| matches!(spawn.kind, ActorKind::Tower(_)))
    }
}

/// Region that moves the player to another map when interacted with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeleportZone {
    /// Trigger rectangle in world pixels.
    pub area: Rect,
    /// Destination map reference. Zones without one are inert.
    #[serde(default)]
    pub destination: Option<String>,
    /// Explicit horizontal arrival coordinate on the destination map.
    #[serde(default)]
    pub destination_x: Option<f32>,
    /// Explicit vertical arrival coordinate on the destination map.
    #[serde(default)]
    pub destination_y: Option<f32>,
}

impl TeleportZone {
    /// Creates a zone leading to `destination`.
    #[must_use]
    pub fn new(area: Rect, destination: Option<String>) -> Self {
        Self {
            area,
            destination,
            destination_x: None,
            destination_y: None,
        }
    }

    /// Explicit arrival point, present only when both coordinates are set.
    #[must_use]
    pub fn explicit_arrival(&self) -> Option<Vec2> {
        match (self.destination_x, self.destination_y) {
            (Some(x), Some(y)) => Some(Vec2::new(x, y)),
            _ => None,
        }
    }
}

/// Actor placement declared by a map or produced by procedural spawning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnDescriptor {
    /// Kind of actor to create.
    pub kind: ActorKind,
    /// Top-left position in world pixels.
    pub position: Vec2,
}

impl SpawnDescriptor {
    /// Creates a spawn descriptor.
    #[must_use]
    pub const fn new(kind: ActorKind, position: Vec2) -> Self {
        Self { kind, position }
    }
}

/// Non-combat character declared by a map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NpcDescriptor {
    /// Name shown in interaction prompts.
    pub name: String,
    /// Top-left position in world pixels.
    pub position: Vec2,
    /// Custom dialogue lines. Empty selects the default script.
    #[serde(default)]
    pub dialogue: Vec<String>,
}

impl NpcDescriptor {
    /// Dialogue lines spoken by the character.
    #[must_use]
    pub fn dialogue_lines(&self) -> Vec<String> {
        if !self.dialogue.is_empty() {
            return self.dialogue.clone();
        }

        if self.name.eq_ignore_ascii_case("barman") {
            return INNKEEPER_DIALOGUE.iter().map(|line| (*line).to_owned()).collect();
        }

        vec![
            format!("Greetings, traveler! I am {}.", self.name),
            "The world is full of dangers and mysteries.".to_owned(),
            "Be careful on your journey!".to_owned(),
        ]
    }
}

/// Default script spoken by the innkeeper.
pub const INNKEEPER_DIALOGUE: [&str; 6] = [
    "Welcome to the inn, weary traveler!",
    "I've been running this establishment for many years.",
    "If you're looking for adventure, head north to the main map.",
    "But beware! Dangerous creatures lurk in those lands.",
    "The boss rooms are especially perilous. Make sure you're prepared!",
    "Come back anytime you need rest and healing. Safe travels!",
];

/// Dialogue opened when a session begins.
pub const INTRO_DIALOGUE: [&str; 7] = [
    "Welcome, brave warrior! Your journey begins here.",
    "The realm is in great danger. Dark forces threaten our land.",
    "You must defeat the monsters and face the powerful bosses.",
    "Press SPACE to attack nearby enemies, or click to shoot projectiles.",
    "Press E to interact with NPCs and teleport.",
    "Collect your strength and prepare for battle!",
    "Good luck, hero. The fate of the realm rests in your hands.",
];
