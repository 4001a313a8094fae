use std::fmt;

use anyhow::{ensure, Result as AnyResult};
use medieval_rpg_core::{Event, FrameSnapshot, SoundCue};
use medieval_rpg_rendering::{RenderingBackend, Scene};
use medieval_rpg_system_simulation::{AudioError, AudioSink};
use tracing::debug;

/// Audio sink that records cues in the log instead of playing them.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LoggedAudio;

impl AudioSink for LoggedAudio {
    fn play(&mut self, cue: SoundCue) -> Result<(), AudioError> {
        debug!(cue = cue.name(), "sound");
        Ok(())
    }
}

/// Backend that builds every frame without drawing it.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct HeadlessBackend {
    frames: u64,
    primitives: usize,
}

impl RenderingBackend for HeadlessBackend {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        ensure!(
            scene.camera.is_finite(),
            "camera left the map at frame {}",
            self.frames
        );
        self.frames += 1;
        self.primitives += scene.primitive_count();
        Ok(())
    }
}

/// Running counts of the notable events of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    kills: u32,
    level_ups: u32,
    teleports: u32,
    hits_taken: u32,
    rejected: u32,
}

impl Tally {
    pub(crate) fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::ActorDied { .. } => self.kills += 1,
                Event::LevelUp { .. } => self.level_ups += 1,
                Event::Teleported { .. } => self.teleports += 1,
                Event::PlayerDamaged { .. } => self.hits_taken += 1,
                Event::ActionRejected { .. } => self.rejected += 1,
                _ => {}
            }
        }
    }
}

/// Final report printed when a session ends.
#[derive(Clone, Debug)]
pub(crate) struct Summary<'a> {
    pub(crate) snapshot: &'a FrameSnapshot,
    pub(crate) tally: Tally,
    pub(crate) backend: HeadlessBackend,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let player = &self.snapshot.player;
        let alive = self
            .snapshot
            .actors
            .iter()
            .filter(|actor| !actor.state.is_dead())
            .count();
        writeln!(f, "map:            {}", self.snapshot.map_name)?;
        writeln!(f, "ticks:          {}", self.snapshot.tick)?;
        writeln!(
            f,
            "level:          {} ({}/{} xp, {} total)",
            player.level, player.xp, player.xp_to_next_level, player.total_xp
        )?;
        writeln!(
            f,
            "health:         {}/{}",
            player.health.trunc(),
            player.max_health
        )?;
        writeln!(f, "hostiles alive: {alive}")?;
        writeln!(
            f,
            "kills:          {} (level ups {}, teleports {})",
            self.tally.kills, self.tally.level_ups, self.tally.teleports
        )?;
        writeln!(
            f,
            "hits taken:     {} (actions rejected {})",
            self.tally.hits_taken, self.tally.rejected
        )?;
        write!(
            f,
            "frames drawn:   {} ({} primitives)",
            self.backend.frames, self.backend.primitives
        )
    }
}
