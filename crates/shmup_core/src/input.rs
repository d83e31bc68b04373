//! Keyboard transition capture.
//!
//! The window layer forwards every physical key event into `InputState`. Hardware
//! auto-repeat key-downs are dropped on arrival; every other edge is queued in the
//! order it happened and handed to the game once per frame via `drain_transitions()`.
//!
//! The game reacts to *edges*, not levels: a press and a release are both
//! meaningful on their own. `is_held` is still tracked for diagnostics and for
//! callers that want a level-triggered view.

use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEdge {
    Pressed,
    Released,
}

/// One discrete key edge, already filtered of auto-repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct KeyTransition {
    pub key: Key,
    pub edge: KeyEdge,
}

impl KeyTransition {
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            edge: KeyEdge::Pressed,
        }
    }

    pub fn released(key: Key) -> Self {
        Self {
            key,
            edge: KeyEdge::Released,
        }
    }
}

pub struct InputState {
    held: HashSet<Key>,
    pending: Vec<KeyTransition>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            pending: Vec::with_capacity(16),
        }
    }

    /// Record a key-down. Returns `false` when the event was an auto-repeat and
    /// therefore ignored.
    pub fn key_down(&mut self, key: Key, repeat: bool) -> bool {
        if repeat {
            return false;
        }
        self.held.insert(key);
        self.pending.push(KeyTransition::pressed(key));
        true
    }

    /// Record a key-up. Releases are queued even if no matching press was seen
    /// (e.g. the key went down before the window had focus).
    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
        self.pending.push(KeyTransition::released(key));
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Hand over every queued transition in arrival order, leaving the queue empty.
    pub fn drain_transitions(&mut self) -> std::vec::Drain<'_, KeyTransition> {
        self.pending.drain(..)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
