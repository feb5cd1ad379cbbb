use crate::constants::*;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IntroState {
    Idle,    // Not started (or not configured)
    Playing, // Stepping from the starting extreme toward the other one
    Done,    // Terminal extreme reached, interactive control granted
}

/// One-shot startup animation. After an initial delay it steps the frame
/// index by +1 at a fixed interval, from index 0 up to `frame_count - 1`,
/// one frame per step. Dropping the sequencer cancels whatever is pending;
/// there are no timers outside this struct.
pub struct IntroSequencer {
    state: IntroState,
    timer: f32,
    delay_elapsed: bool,
    cursor: usize,
    terminal: usize,
}

impl IntroSequencer {
    pub fn new(frame_count: usize) -> Self {
        Self {
            state: IntroState::Idle,
            timer: 0.0,
            delay_elapsed: false,
            cursor: 0,
            terminal: frame_count.saturating_sub(1),
        }
    }

    pub fn start(&mut self) {
        if self.state == IntroState::Idle {
            if self.terminal == 0 {
                // Nothing to animate over a single frame
                self.state = IntroState::Done;
            } else {
                self.state = IntroState::Playing;
            }
        }
    }

    pub fn state(&self) -> IntroState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == IntroState::Playing
    }

    /// Advance the sequence by `dt` seconds. Returns the new frame index when
    /// a step fires. At most one step per call, so no frame is ever skipped;
    /// leftover time carries into the next tick.
    pub fn tick(&mut self, dt: f32) -> Option<usize> {
        if self.state != IntroState::Playing {
            return None;
        }

        self.timer += dt;

        if !self.delay_elapsed {
            if self.timer < INTRO_START_DELAY {
                return None;
            }
            self.delay_elapsed = true;
            self.timer -= INTRO_START_DELAY;
        }

        if self.timer >= INTRO_STEP_INTERVAL {
            self.timer -= INTRO_STEP_INTERVAL;
            self.cursor += 1;
            if self.cursor >= self.terminal {
                self.cursor = self.terminal;
                self.state = IntroState::Done;
            }
            return Some(self.cursor);
        }

        None
    }
}
