#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for medieval RPG adapters.
//!
//! [`Scene::from_snapshot`] turns a frame snapshot into plain draw primitives:
//! world primitives in map pixel space, offset by [`Scene::camera`], and HUD
//! primitives in screen space. Actors without artwork use fixed placeholder
//! shapes so every backend draws the same frame.

use anyhow::Result as AnyResult;
use glam::Vec2;
use medieval_rpg_core::{
    ActorKind, ActorSnapshot, Element, FloatingTextTone, FrameSnapshot, MarkerSnapshot,
    NpcSnapshot, PlayerSnapshot, ProjectileSkin, ProjectileSnapshot, Rect, SlimeKind,
    PROJECTILE_SIZE,
};

const HIT_FLASH_LIGHTEN: f32 = 0.4;
const DEAD_ALPHA: f32 = 100.0 / 255.0;
const DIALOGUE_ALPHA: f32 = 200.0 / 255.0;
const MARKER_LIFT: f32 = 24.0;
const CONTROLS_HINT: &str =
    "WASD: Move | SHIFT: Run | SPACE: Attack | LMB: Shoot | E: Interact/Teleport";

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with the provided opacity.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Placeholder palette.
mod palette {
    use super::Color;

    pub(super) const CLEAR: Color = Color::from_rgb_u8(0, 0, 0);
    pub(super) const PLAYER: Color = Color::from_rgb_u8(100, 150, 255);
    pub(super) const RED_SLIME: Color = Color::from_rgb_u8(255, 100, 100);
    pub(super) const BLUE_SLIME: Color = Color::from_rgb_u8(100, 100, 255);
    pub(super) const YELLOW_SLIME: Color = Color::from_rgb_u8(255, 255, 100);
    pub(super) const TURRET: Color = Color::from_rgb_u8(200, 200, 200);
    pub(super) const TURRET_DETAIL: Color = Color::from_rgb_u8(80, 80, 80);
    pub(super) const BOSS_BODY: Color = Color::from_rgb_u8(150, 0, 150);
    pub(super) const BOSS_CORE: Color = Color::from_rgb_u8(200, 0, 200);
    pub(super) const BARMAN: Color = Color::from_rgb_u8(139, 69, 19);
    pub(super) const VILLAGER: Color = Color::from_rgb_u8(100, 100, 200);
    pub(super) const SKIN: Color = Color::from_rgb_u8(255, 220, 177);
    pub(super) const PLAIN_SHOT: Color = Color::from_rgb_u8(255, 200, 0);
    pub(super) const HEALTH_BACK: Color = Color::from_rgb_u8(100, 0, 0);
    pub(super) const SLIME_HEALTH: Color = Color::from_rgb_u8(0, 255, 0);
    pub(super) const SHOOTER_HEALTH: Color = Color::from_rgb_u8(255, 0, 0);
    pub(super) const MARKER: Color = Color::from_rgb_u8(255, 215, 0);
    pub(super) const EXPERIENCE: Color = Color::from_rgb_u8(255, 255, 0);
    pub(super) const LEVEL_UP: Color = Color::from_rgb_u8(0, 255, 255);
    pub(super) const CRITICAL: Color = Color::from_rgb_u8(255, 0, 0);
    pub(super) const WHITE: Color = Color::from_rgb_u8(255, 255, 255);
    pub(super) const DIALOGUE_BACK: Color = Color::from_rgb_u8(20, 20, 40);
}

fn element_color(element: Element) -> Color {
    match element {
        Element::Fire => Color::from_rgb_u8(255, 100, 0),
        Element::Water => Color::from_rgb_u8(0, 100, 255),
        Element::Void => Color::from_rgb_u8(100, 0, 150),
        Element::Ice => Color::from_rgb_u8(150, 200, 255),
        Element::Lightning => Color::from_rgb_u8(255, 255, 100),
        Element::Holy => Color::from_rgb_u8(255, 255, 200),
    }
}

fn projectile_color(skin: ProjectileSkin) -> Color {
    match skin {
        ProjectileSkin::Plain => palette::PLAIN_SHOT,
        ProjectileSkin::Elemental(Element::Water) => Color::from_rgb_u8(0, 150, 255),
        ProjectileSkin::Elemental(Element::Void) => Color::from_rgb_u8(150, 0, 200),
        ProjectileSkin::Elemental(element) => element_color(element),
    }
}

/// Horizontal alignment of a text primitive relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// Anchor marks the top-left corner of the text.
    Left,
    /// Anchor marks the top-center of the text.
    Center,
}

/// Backend-agnostic draw instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Filled axis-aligned rectangle.
    Rectangle {
        /// Covered area.
        area: Rect,
        /// Fill color.
        color: Color,
    },
    /// Unfilled axis-aligned rectangle.
    Outline {
        /// Outlined area.
        area: Rect,
        /// Stroke width in pixels.
        thickness: f32,
        /// Stroke color.
        color: Color,
    },
    /// Filled circle.
    Circle {
        /// Circle center.
        center: Vec2,
        /// Circle radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Filled triangle.
    Triangle {
        /// Corners in drawing order.
        points: [Vec2; 3],
        /// Fill color.
        color: Color,
    },
    /// Single line of text.
    Text {
        /// Anchor point interpreted according to `align`.
        anchor: Vec2,
        /// Text content.
        content: String,
        /// Font size in pixels.
        size: f32,
        /// Text color.
        color: Color,
        /// Horizontal alignment.
        align: TextAlign,
    },
}

/// Computes the top-left corner of a view of `viewport` size that follows `target`.
///
/// The view is kept inside the map; maps smaller than the viewport pin it to the origin.
#[must_use]
pub fn follow_camera(target: Rect, viewport: Vec2, map_size: Vec2) -> Vec2 {
    let desired = target.center() - viewport * 0.5;
    desired.min(map_size - viewport).max(Vec2::ZERO)
}

/// Scene description derived from a single frame snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Solid color used to clear the frame.
    pub clear_color: Color,
    /// Top-left corner of the view in world pixels.
    pub camera: Vec2,
    /// Size of the view in screen pixels.
    pub viewport: Vec2,
    /// Primitives positioned in world pixels.
    pub world: Vec<Primitive>,
    /// Primitives positioned in screen pixels, drawn over the world.
    pub hud: Vec<Primitive>,
}

impl Scene {
    /// Builds the scene for a snapshot viewed through a viewport of the given size.
    #[must_use]
    pub fn from_snapshot(snapshot: &FrameSnapshot, viewport: Vec2) -> Self {
        let mut world = Vec::new();
        for npc in &snapshot.npcs {
            push_npc(npc, &mut world);
        }
        for actor in &snapshot.actors {
            push_actor(actor, &mut world);
        }
        push_player(&snapshot.player, &mut world);
        for projectile in &snapshot.projectiles {
            push_projectile(projectile, &mut world);
        }
        for text in &snapshot.floating_texts {
            let color = match text.tone {
                FloatingTextTone::Experience => palette::EXPERIENCE,
                FloatingTextTone::LevelUp => palette::LEVEL_UP,
                FloatingTextTone::Critical => palette::CRITICAL,
            };
            world.push(Primitive::Text {
                anchor: text.position,
                content: text.text.clone(),
                size: 24.0,
                color: color.with_alpha(f32::from(text.alpha) / 255.0),
                align: TextAlign::Center,
            });
        }
        if let Some(marker) = &snapshot.marker {
            push_marker(marker, &mut world);
        }

        let mut hud = Vec::new();
        push_hud(snapshot, viewport, &mut hud);

        Self {
            clear_color: palette::CLEAR,
            camera: follow_camera(
                snapshot.player.hitbox,
                viewport,
                Vec2::new(snapshot.map_width, snapshot.map_height),
            ),
            viewport,
            world,
            hud,
        }
    }

    /// Total number of primitives in the scene.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.world.len() + self.hud.len()
    }
}

fn shade(base: Color, hit_flash: u32, dead: bool) -> Color {
    let color = if hit_flash > 0 {
        base.lighten(HIT_FLASH_LIGHTEN)
    } else {
        base
    };
    if dead {
        color.with_alpha(DEAD_ALPHA)
    } else {
        color
    }
}

fn push_npc(npc: &NpcSnapshot, out: &mut Vec<Primitive>) {
    let area = npc.footprint;
    let body = if npc.name.to_lowercase().contains("barman") {
        palette::BARMAN
    } else {
        palette::VILLAGER
    };
    out.push(Primitive::Rectangle {
        area: Rect::new(
            area.x + 10.0,
            area.y + 10.0,
            area.width - 20.0,
            area.height - 20.0,
        ),
        color: body,
    });
    out.push(Primitive::Circle {
        center: Vec2::new(area.x + area.width * 0.5, area.y + area.height / 3.0),
        radius: 15.0,
        color: palette::SKIN,
    });
}

fn push_actor(actor: &ActorSnapshot, out: &mut Vec<Primitive>) {
    let area = actor.footprint;
    let dead = actor.state.is_dead();
    let tint = |color| shade(color, actor.hit_flash, dead);

    match actor.kind {
        ActorKind::Slime(kind) => {
            let color = match kind {
                SlimeKind::Red => palette::RED_SLIME,
                SlimeKind::Blue => palette::BLUE_SLIME,
                SlimeKind::Yellow => palette::YELLOW_SLIME,
            };
            out.push(Primitive::Circle {
                center: area.center(),
                radius: area.width / 3.0,
                color: tint(color),
            });
        }
        ActorKind::Tower(element) => {
            let turret = Vec2::new(area.x + area.width * 0.5, area.y + area.height / 3.0);
            out.push(Primitive::Rectangle {
                area: Rect::new(
                    area.x + 10.0,
                    area.y + area.height * 0.5,
                    area.width - 20.0,
                    area.height * 0.5 - 10.0,
                ),
                color: tint(element_color(element)),
            });
            out.push(Primitive::Circle {
                center: turret,
                radius: 15.0,
                color: tint(palette::TURRET),
            });
            out.push(Primitive::Rectangle {
                area: Rect::new(turret.x - 5.0, turret.y - 20.0, 10.0, 20.0),
                color: tint(palette::TURRET_DETAIL),
            });
        }
        ActorKind::Boss => {
            out.push(Primitive::Rectangle {
                area,
                color: tint(palette::BOSS_BODY),
            });
            out.push(Primitive::Circle {
                center: area.center(),
                radius: 40.0,
                color: tint(palette::BOSS_CORE),
            });
        }
        ActorKind::Player => {}
    }

    if !dead {
        push_health_bar(actor, out);
    }
}

fn push_health_bar(actor: &ActorSnapshot, out: &mut Vec<Primitive>) {
    let (height, lift, fill) = match actor.kind {
        ActorKind::Slime(_) => (5.0, 10.0, palette::SLIME_HEALTH),
        ActorKind::Tower(_) => (6.0, 12.0, palette::SHOOTER_HEALTH),
        ActorKind::Boss => (8.0, 15.0, palette::SHOOTER_HEALTH),
        ActorKind::Player => return,
    };
    let area = actor.footprint;
    let bar = Rect::new(area.x, area.y - lift, area.width, height);
    let ratio = if actor.max_health == 0 {
        0.0
    } else {
        (actor.health / actor.max_health as f32).clamp(0.0, 1.0)
    };

    out.push(Primitive::Rectangle {
        area: bar,
        color: palette::HEALTH_BACK,
    });
    out.push(Primitive::Rectangle {
        area: Rect::new(bar.x, bar.y, (ratio * bar.width).floor(), height),
        color: fill,
    });
}

fn push_player(player: &PlayerSnapshot, out: &mut Vec<Primitive>) {
    out.push(Primitive::Rectangle {
        area: player.hitbox,
        color: shade(palette::PLAYER, player.hit_flash, player.state.is_dead()),
    });
}

fn push_projectile(projectile: &ProjectileSnapshot, out: &mut Vec<Primitive>) {
    out.push(Primitive::Circle {
        center: projectile.position,
        radius: PROJECTILE_SIZE * 0.5,
        color: projectile_color(projectile.skin),
    });
}

/// Scale of the teleport marker for the remaining marker ticks.
#[must_use]
pub fn marker_pulse(ticks_remaining: u32) -> f32 {
    1.0 + 0.2 * (1.0 + (ticks_remaining as f32 * 0.2).sin())
}

fn push_marker(marker: &MarkerSnapshot, out: &mut Vec<Primitive>) {
    let pulse = marker_pulse(marker.ticks_remaining);
    let height = (16.0 * pulse).trunc();
    let half_width = (12.0 * pulse).trunc();
    let tip = Vec2::new(marker.area.center().x, marker.area.y - MARKER_LIFT);

    out.push(Primitive::Triangle {
        points: [
            tip,
            Vec2::new(tip.x - half_width, tip.y + height),
            Vec2::new(tip.x + half_width, tip.y + height),
        ],
        color: palette::MARKER,
    });
    out.push(Primitive::Text {
        anchor: Vec2::new(tip.x, tip.y - 18.0),
        content: "TELEPORT".to_owned(),
        size: 24.0,
        color: palette::MARKER,
        align: TextAlign::Center,
    });
}

struct Gauge {
    label: &'static str,
    top: f32,
    height: f32,
    value: f32,
    max: f32,
    fill: Color,
    back: Color,
}

fn push_gauge(gauge: &Gauge, out: &mut Vec<Primitive>) {
    let area = Rect::new(10.0, gauge.top, 200.0, gauge.height);
    let ratio = if gauge.max > 0.0 {
        (gauge.value / gauge.max).clamp(0.0, 1.0)
    } else {
        0.0
    };

    out.push(Primitive::Text {
        anchor: Vec2::new(area.x, area.y - 18.0),
        content: gauge.label.to_owned(),
        size: 20.0,
        color: palette::WHITE,
        align: TextAlign::Left,
    });
    out.push(Primitive::Rectangle {
        area,
        color: gauge.back,
    });
    out.push(Primitive::Rectangle {
        area: Rect::new(area.x, area.y, (ratio * area.width).trunc(), area.height),
        color: gauge.fill,
    });
    out.push(Primitive::Outline {
        area,
        thickness: 2.0,
        color: palette::CLEAR,
    });
    out.push(Primitive::Text {
        anchor: Vec2::new(area.center().x, area.y),
        content: format!("{}/{}", gauge.value.trunc(), gauge.max.trunc()),
        size: 20.0,
        color: palette::WHITE,
        align: TextAlign::Center,
    });
}

fn push_hud(snapshot: &FrameSnapshot, viewport: Vec2, out: &mut Vec<Primitive>) {
    let player = &snapshot.player;
    let gauges = [
        Gauge {
            label: "Health",
            top: 10.0,
            height: 25.0,
            value: player.health,
            max: player.max_health as f32,
            fill: Color::from_rgb_u8(46, 204, 113),
            back: Color::from_rgb_u8(34, 139, 34),
        },
        Gauge {
            label: "Stamina",
            top: 50.0,
            height: 20.0,
            value: player.stamina,
            max: player.max_stamina,
            fill: Color::from_rgb_u8(241, 196, 15),
            back: Color::from_rgb_u8(150, 100, 0),
        },
        Gauge {
            label: "XP",
            top: 85.0,
            height: 15.0,
            value: player.xp as f32,
            max: player.xp_to_next_level as f32,
            fill: Color::from_rgb_u8(138, 43, 226),
            back: Color::from_rgb_u8(75, 0, 130),
        },
    ];
    for gauge in &gauges {
        push_gauge(gauge, out);
    }

    out.push(Primitive::Text {
        anchor: Vec2::new(225.0, 12.0),
        content: format!("Level {}", player.level),
        size: 28.0,
        color: palette::WHITE,
        align: TextAlign::Left,
    });

    let center = viewport.x * 0.5;
    let mut banner = |top: f32, content: String, color: Color| {
        out.push(Primitive::Text {
            anchor: Vec2::new(center, top),
            content,
            size: 24.0,
            color,
            align: TextAlign::Center,
        });
    };
    if snapshot.teleport_ready {
        banner(70.0, "Press E to teleport".to_owned(), palette::LEVEL_UP);
    }
    if let (Some(npc), None) = (&snapshot.nearby_npc, &snapshot.dialogue_line) {
        banner(90.0, format!("Press E to talk to {npc}"), palette::YELLOW_SLIME);
    }
    if let Some(message) = &snapshot.status_message {
        banner(100.0, message.clone(), palette::EXPERIENCE);
    }
    if player.state.is_dead() {
        banner(viewport.y * 0.5, "YOU DIED!".to_owned(), palette::CRITICAL);
    }

    if let Some(line) = &snapshot.dialogue_line {
        let area = Rect::new(10.0, viewport.y - 130.0, viewport.x - 20.0, 120.0);
        out.push(Primitive::Rectangle {
            area,
            color: palette::DIALOGUE_BACK.with_alpha(DIALOGUE_ALPHA),
        });
        out.push(Primitive::Outline {
            area,
            thickness: 3.0,
            color: palette::WHITE,
        });
        out.push(Primitive::Text {
            anchor: Vec2::new(area.x + 20.0, area.y + 20.0),
            content: line.clone(),
            size: 24.0,
            color: palette::WHITE,
            align: TextAlign::Left,
        });
    }

    out.push(Primitive::Text {
        anchor: Vec2::new(10.0, viewport.y - 30.0),
        content: CONTROLS_HINT.to_owned(),
        size: 24.0,
        color: palette::WHITE,
        align: TextAlign::Left,
    });
}

/// Rendering backend capable of presenting scenes.
pub trait RenderingBackend {
    /// Presents a single frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}
