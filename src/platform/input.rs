//! Raw input → intent normalization
//!
//! Keyboard keys, taps and swipes become the core's intent vocabulary here,
//! so the simulation never sees device details.

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, Intent, IntentSource, QueuedIntent};
use crate::tuning::Tuning;

/// Keyboard keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Space,
    Enter,
}

/// Key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    pub jump: Key,
    pub crouch: Key,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            jump: Key::Char('a'),
            crouch: Key::Char('s'),
        }
    }
}

/// Device event delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RawInput {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer pressed at screen Y, host time in ms
    PointerDown { y: f32, time_ms: f64 },
    PointerUp { y: f32, time_ms: f64 },
    /// Pointer dragged off-screen or otherwise aborted
    PointerCancel,
}

/// What the host should do with an input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputCommand {
    Intent(QueuedIntent),
    /// Start a new run (only produced on the game-over screen)
    Restart,
}

/// Pointer gesture classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Tap,
    SwipeDown,
    SwipeUp,
    /// Too slow or too short to mean anything
    None,
}

/// Classify a pointer press/release pair
pub fn classify_gesture(dy: f32, duration_ms: f64, tuning: &Tuning) -> Gesture {
    if dy.abs() > tuning.swipe_min_distance && duration_ms < tuning.swipe_max_duration_ms {
        if dy > 0.0 {
            Gesture::SwipeDown
        } else {
            Gesture::SwipeUp
        }
    } else if duration_ms < tuning.tap_max_duration_ms && dy.abs() < tuning.tap_max_distance {
        Gesture::Tap
    } else {
        Gesture::None
    }
}

#[derive(Debug, Clone, Copy)]
struct PointerStart {
    y: f32,
    time_ms: f64,
}

/// Stateful translator from raw device events to commands
#[derive(Debug, Clone)]
pub struct InputAdapter {
    pub bindings: Bindings,
    tuning: Tuning,
    jump_held: bool,
    crouch_held: bool,
    pointer: Option<PointerStart>,
}

impl InputAdapter {
    pub fn new(tuning: &Tuning) -> Self {
        Self::with_bindings(tuning, Bindings::default())
    }

    pub fn with_bindings(tuning: &Tuning, bindings: Bindings) -> Self {
        Self {
            bindings,
            tuning: tuning.clone(),
            jump_held: false,
            crouch_held: false,
            pointer: None,
        }
    }

    /// Translate one device event
    pub fn handle(&mut self, event: RawInput, phase: GamePhase) -> Option<InputCommand> {
        if phase == GamePhase::GameOver {
            return self.handle_game_over(event);
        }

        match event {
            RawInput::KeyDown(key) if key == self.bindings.jump => {
                // Only the initial press counts, not OS key repeat
                if self.jump_held {
                    return None;
                }
                self.jump_held = true;
                Some(key_intent(Intent::Jump))
            }
            RawInput::KeyUp(key) if key == self.bindings.jump => {
                self.jump_held = false;
                None
            }
            RawInput::KeyDown(key) if key == self.bindings.crouch => {
                if self.crouch_held {
                    return None;
                }
                self.crouch_held = true;
                Some(key_intent(Intent::crouch(true)))
            }
            RawInput::KeyUp(key) if key == self.bindings.crouch => {
                self.crouch_held = false;
                Some(key_intent(Intent::crouch(false)))
            }
            RawInput::KeyDown(_) | RawInput::KeyUp(_) => None,
            RawInput::PointerDown { y, time_ms } => {
                self.pointer = Some(PointerStart { y, time_ms });
                None
            }
            RawInput::PointerUp { y, time_ms } => {
                let start = self.pointer.take()?;
                self.classify(y - start.y, time_ms - start.time_ms)
            }
            RawInput::PointerCancel => {
                self.pointer = None;
                None
            }
        }
    }

    /// Re-assert held inputs once per tick
    ///
    /// A crouch key held through a jump takes effect on landing.
    pub fn held_repeat(&self) -> Option<QueuedIntent> {
        self.crouch_held
            .then(|| QueuedIntent::repeated(Intent::crouch(true), IntentSource::Key))
    }

    /// Forget held keys and gestures (new run)
    pub fn reset(&mut self) {
        self.jump_held = false;
        self.crouch_held = false;
        self.pointer = None;
    }

    fn classify(&self, dy: f32, duration_ms: f64) -> Option<InputCommand> {
        match classify_gesture(dy, duration_ms, &self.tuning) {
            Gesture::Tap => {
                log::trace!("Tap detected");
                Some(InputCommand::Intent(QueuedIntent::new(
                    Intent::Jump,
                    IntentSource::Tap,
                )))
            }
            Gesture::SwipeDown => {
                log::trace!("Swipe down detected");
                Some(InputCommand::Intent(QueuedIntent::new(
                    Intent::Crouch {
                        active: true,
                        auto_release_ms: Some(self.tuning.swipe_crouch_ms),
                    },
                    IntentSource::Swipe,
                )))
            }
            Gesture::SwipeUp => {
                log::trace!("Swipe up ignored");
                None
            }
            Gesture::None => None,
        }
    }

    fn handle_game_over(&mut self, event: RawInput) -> Option<InputCommand> {
        match event {
            RawInput::KeyDown(Key::Space | Key::Enter) | RawInput::PointerDown { .. } => {
                self.reset();
                Some(InputCommand::Restart)
            }
            _ => None,
        }
    }
}

fn key_intent(intent: Intent) -> InputCommand {
    InputCommand::Intent(QueuedIntent::new(intent, IntentSource::Key))
}
