//! Normalized player intents
//!
//! Keyboard keys, taps and swipes all reduce to the same small vocabulary.
//! The host pushes intents as they arrive; the run drains the queue once per
//! tick, in arrival order.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A player-requested action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    Jump,
    /// Enter or leave a crouch. `auto_release_ms` schedules a release after
    /// the given delay (swipe gestures).
    Crouch {
        active: bool,
        auto_release_ms: Option<f64>,
    },
}

impl Intent {
    pub fn crouch(active: bool) -> Self {
        Intent::Crouch {
            active,
            auto_release_ms: None,
        }
    }
}

/// Where an intent came from (diagnostics only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentSource {
    Key,
    Tap,
    Swipe,
    /// Internal (scheduled auto-release, demo pilot)
    Scripted,
}

/// An intent plus its origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueuedIntent {
    pub intent: Intent,
    pub source: IntentSource,
    /// Level-triggered re-assertion of a held input (kept out of history)
    pub repeat: bool,
}

impl QueuedIntent {
    pub fn new(intent: Intent, source: IntentSource) -> Self {
        Self {
            intent,
            source,
            repeat: false,
        }
    }

    pub fn repeated(intent: Intent, source: IntentSource) -> Self {
        Self {
            intent,
            source,
            repeat: true,
        }
    }

    /// Presses show up in the diagnostic history; releases and repeats don't
    pub fn is_press(&self) -> bool {
        !self.repeat
            && matches!(
                self.intent,
                Intent::Jump | Intent::Crouch { active: true, .. }
            )
    }

    /// Short HUD label
    pub fn label(&self) -> &'static str {
        match (self.source, self.intent) {
            (IntentSource::Tap, _) => "TAP",
            (IntentSource::Swipe, _) => "SWIPE DOWN",
            (_, Intent::Jump) => "KEY JUMP",
            (_, Intent::Crouch { .. }) => "KEY CROUCH",
        }
    }
}

impl fmt::Display for QueuedIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// FIFO of intents waiting for the next tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentQueue {
    queue: VecDeque<QueuedIntent>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: QueuedIntent) {
        self.queue.push_back(intent);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Drain all queued intents in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = QueuedIntent> + '_ {
        self.queue.drain(..)
    }
}

/// Most-recent-first ring of pressed intents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentHistory {
    entries: VecDeque<QueuedIntent>,
    capacity: usize,
}

impl IntentHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, intent: QueuedIntent) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(intent);
        self.entries.truncate(self.capacity);
    }

    /// Labels, newest first
    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(QueuedIntent::label).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drains_in_arrival_order() {
        let mut queue = IntentQueue::new();
        queue.push(QueuedIntent::new(Intent::Jump, IntentSource::Key));
        queue.push(QueuedIntent::new(Intent::crouch(true), IntentSource::Key));
        let drained: Vec<_> = queue.drain().map(|q| q.intent).collect();
        assert_eq!(drained, vec![Intent::Jump, Intent::crouch(true)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_history_keeps_newest_first() {
        let mut history = IntentHistory::new(3);
        history.record(QueuedIntent::new(Intent::Jump, IntentSource::Key));
        history.record(QueuedIntent::new(Intent::Jump, IntentSource::Tap));
        history.record(QueuedIntent::new(
            Intent::Crouch {
                active: true,
                auto_release_ms: Some(600.0),
            },
            IntentSource::Swipe,
        ));
        history.record(QueuedIntent::new(Intent::crouch(true), IntentSource::Key));
        assert_eq!(history.labels(), vec!["KEY CROUCH", "SWIPE DOWN", "TAP"]);
    }

    #[test]
    fn test_releases_and_repeats_are_not_presses() {
        assert!(!QueuedIntent::new(Intent::crouch(false), IntentSource::Key).is_press());
        assert!(!QueuedIntent::repeated(Intent::crouch(true), IntentSource::Key).is_press());
        assert!(QueuedIntent::new(Intent::Jump, IntentSource::Tap).is_press());
    }
}
