use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Movement keys held down during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeldKeys {
    /// Move left.
    #[serde(default)]
    pub left: bool,
    /// Move right.
    #[serde(default)]
    pub right: bool,
    /// Move up.
    #[serde(default)]
    pub up: bool,
    /// Move down.
    #[serde(default)]
    pub down: bool,
    /// Run modifier.
    #[serde(default)]
    pub run: bool,
}

impl HeldKeys {
    /// Reports whether any horizontal movement key is held.
    #[must_use]
    pub const fn horizontal(&self) -> bool {
        self.left || self.right
    }

    /// Reports whether any movement key is held.
    #[must_use]
    pub const fn any_movement(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Discrete key presses the simulation reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Melee attack, or advance the active dialogue.
    Attack,
    /// Talk to a nearby character or use a teleport.
    Interact,
}

/// Pointer buttons reported by the input source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Primary button. Fires projectiles.
    #[default]
    Primary,
    /// Secondary button.
    Secondary,
    /// Middle button.
    Middle,
}

/// Pointer click expressed in world pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerClick {
    /// World-space location of the click.
    pub position: Vec2,
    /// Button that was pressed.
    #[serde(default)]
    pub button: PointerButton,
}

/// Input snapshot sampled once per frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Keys held for continuous movement.
    #[serde(default)]
    pub held: HeldKeys,
    /// Keys pressed since the previous frame, in order.
    #[serde(default)]
    pub presses: Vec<Key>,
    /// Pointer clicks since the previous frame, in order.
    #[serde(default)]
    pub clicks: Vec<PointerClick>,
}

impl FrameInput {
    /// Creates an input snapshot that only holds movement keys.
    #[must_use]
    pub fn holding(held: HeldKeys) -> Self {
        Self {
            held,
            ..Self::default()
        }
    }
}

/// Direction the player faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    /// Facing up.
    Up,
    /// Facing down.
    #[default]
    Down,
    /// Facing left.
    Left,
    /// Facing right.
    Right,
}

/// Animation the presentation layer should play for the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKey {
    /// Standing still.
    #[default]
    Idle,
    /// Moving.
    Walking,
    /// Swinging a melee attack.
    Attacking,
    /// Dead.
    Dying,
}
