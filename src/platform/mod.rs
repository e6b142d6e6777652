//! Platform abstraction layer
//!
//! Translates host concerns into the core's vocabulary:
//! - Input events → intents and restart commands
//! - Physics body state → grounded/overlap signals (headless reference host)

pub mod headless;
pub mod input;

pub use headless::{Body, HeadlessRun};
pub use input::{Bindings, Gesture, InputAdapter, InputCommand, Key, RawInput, classify_gesture};
