//! Transient presentation state: floating texts, status message, dialogue.

use glam::Vec2;
use medieval_rpg_core::{FloatingTextSnapshot, FloatingTextTone};

const FLOATING_TEXT_LIFETIME: u32 = 60;
const FLOATING_TEXT_DRIFT: f32 = -2.0;

#[derive(Clone, Debug)]
pub(crate) struct FloatingText {
    position: Vec2,
    text: String,
    tone: FloatingTextTone,
    timer: u32,
}

impl FloatingText {
    pub(crate) fn new(position: Vec2, text: String, tone: FloatingTextTone) -> Self {
        Self {
            position,
            text,
            tone,
            timer: FLOATING_TEXT_LIFETIME,
        }
    }

    /// Drifts upward and ages by one tick. Returns whether it is still alive.
    pub(crate) fn tick(&mut self) -> bool {
        self.position.y += FLOATING_TEXT_DRIFT;
        self.timer = self.timer.saturating_sub(1);
        self.timer > 0
    }

    pub(crate) fn snapshot(&self) -> FloatingTextSnapshot {
        let alpha = self.timer as f32 / FLOATING_TEXT_LIFETIME as f32 * 255.0;
        FloatingTextSnapshot {
            position: self.position,
            text: self.text.clone(),
            tone: self.tone,
            alpha: alpha.clamp(0.0, 255.0) as u8,
        }
    }
}

/// Single status line with a countdown.
#[derive(Clone, Debug, Default)]
pub(crate) struct StatusLine {
    text: String,
    ticks: u32,
}

impl StatusLine {
    pub(crate) fn show(&mut self, text: impl Into<String>, ticks: u32) {
        self.text = text.into();
        self.ticks = ticks;
    }

    pub(crate) fn tick(&mut self) {
        self.ticks = self.ticks.saturating_sub(1);
    }

    pub(crate) fn current(&self) -> Option<&str> {
        (self.ticks > 0).then_some(self.text.as_str())
    }
}

/// Ordered lines shown one at a time.
#[derive(Clone, Debug, Default)]
pub(crate) struct Dialogue {
    lines: Vec<String>,
    index: usize,
}

impl Dialogue {
    pub(crate) fn start(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.index = 0;
    }

    pub(crate) fn is_active(&self) -> bool {
        self.index < self.lines.len()
    }

    /// Moves to the next line. Returns `true` when the dialogue just closed.
    pub(crate) fn advance(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.index += 1;
        if self.index >= self.lines.len() {
            self.lines.clear();
            self.index = 0;
            return true;
        }
        false
    }

    pub(crate) fn current_line(&self) -> Option<&str> {
        self.lines.get(self.index).map(String::as_str)
    }
}

/// Feedback owned by the world and drained by presentation each frame.
#[derive(Clone, Debug, Default)]
pub(crate) struct Feedback {
    pub(crate) texts: Vec<FloatingText>,
    pub(crate) status: StatusLine,
    pub(crate) dialogue: Dialogue,
}

impl Feedback {
    pub(crate) fn float(&mut self, position: Vec2, text: String, tone: FloatingTextTone) {
        self.texts.push(FloatingText::new(position, text, tone));
    }

    /// Ages floating texts and the status line, dropping expired texts.
    pub(crate) fn tick(&mut self) {
        self.texts.retain_mut(FloatingText::tick);
        self.status.tick();
    }
}
