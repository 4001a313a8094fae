use std::{
    fs, io,
    path::{Path, PathBuf},
};

use glam::Vec2;
use medieval_rpg_core::{FrameInput, HeldKeys, Key, PointerButton, PointerClick};
use serde::Deserialize;
use thiserror::Error;

/// Failure to read or validate an input script.
#[derive(Debug, Error)]
pub(crate) enum ScriptError {
    /// The script file could not be read.
    #[error("failed to read input script {}", path.display())]
    Read {
        /// Location of the script.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The script is not valid script TOML.
    #[error("invalid input script {}", path.display())]
    Parse {
        /// Location of the script.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: toml::de::Error,
    },
    /// Frames must be listed in strictly increasing tick order.
    #[error("frame at tick {at} follows frame at tick {previous}")]
    OutOfOrder {
        /// Tick of the offending frame.
        at: u64,
        /// Tick of the frame before it.
        previous: u64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum HeldKey {
    Left,
    Right,
    Up,
    Down,
    Run,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptFrame {
    at: u64,
    #[serde(default)]
    held: Option<Vec<HeldKey>>,
    #[serde(default)]
    press: Vec<Key>,
    #[serde(default)]
    click: Option<[f32; 2]>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptFile {
    #[serde(default)]
    frame: Vec<ScriptFrame>,
}

/// Scripted input stream replayed one frame per tick.
///
/// A frame's `held` keys stay held until a later frame lists new ones.
/// Presses and clicks apply only on the frame's own tick. Ticks count from
/// zero at the first simulated frame.
#[derive(Clone, Debug, Default)]
pub(crate) struct Playback {
    frames: Vec<ScriptFrame>,
    next: usize,
    held: HeldKeys,
}

impl Playback {
    /// Reads and validates a script file.
    pub(crate) fn load(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ScriptFile = toml::from_str(&contents).map_err(|source| ScriptError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_frames(file.frame)
    }

    fn from_frames(frames: Vec<ScriptFrame>) -> Result<Self, ScriptError> {
        for pair in frames.windows(2) {
            if pair[1].at <= pair[0].at {
                return Err(ScriptError::OutOfOrder {
                    at: pair[1].at,
                    previous: pair[0].at,
                });
            }
        }
        Ok(Self {
            frames,
            ..Self::default()
        })
    }

    /// Input for the given tick. Ticks must be requested in increasing order.
    pub(crate) fn input_at(&mut self, tick: u64) -> FrameInput {
        let mut input = FrameInput::holding(self.held);
        while let Some(frame) = self.frames.get(self.next) {
            if frame.at > tick {
                break;
            }
            self.next += 1;
            if frame.at < tick {
                continue;
            }

            if let Some(keys) = &frame.held {
                self.held = held_keys(keys);
                input.held = self.held;
            }
            input.presses.extend(frame.press.iter().copied());
            if let Some([x, y]) = frame.click {
                input.clicks.push(PointerClick {
                    position: Vec2::new(x, y),
                    button: PointerButton::Primary,
                });
            }
        }
        input
    }
}

fn held_keys(keys: &[HeldKey]) -> HeldKeys {
    let mut held = HeldKeys::default();
    for key in keys {
        match key {
            HeldKey::Left => held.left = true,
            HeldKey::Right => held.right = true,
            HeldKey::Up => held.up = true,
            HeldKey::Down => held.down = true,
            HeldKey::Run => held.run = true,
        }
    }
    held
}
