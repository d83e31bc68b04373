//! Keyboard edges to ship intent.
//!
//! Velocity is composed from edges, not from held-key levels: a press adds the
//! key's direction times the ship speed, the matching release subtracts it again.
//! Holding left and right together therefore cancels out, and diagonal movement is
//! simply the sum of two keys. Nothing clamps the result, so an unmatched edge
//! (e.g. a release whose press happened before the window had focus) leaves a
//! residual velocity until the opposite edge arrives.

use glam::IVec2;
use shmup_core::{Key, KeyEdge, KeyTransition};

use crate::entity::Ship;

/// Screen-space unit direction for a movement key (y grows downwards).
pub fn direction(key: Key) -> Option<IVec2> {
    match key {
        Key::Left => Some(IVec2::new(-1, 0)),
        Key::Right => Some(IVec2::new(1, 0)),
        Key::Up => Some(IVec2::new(0, -1)),
        Key::Down => Some(IVec2::new(0, 1)),
        Key::Space => None,
    }
}

pub fn handle_transition(ship: &mut Ship, transition: KeyTransition, speed_pps: i32) {
    if let Some(dir) = direction(transition.key) {
        let delta = dir * speed_pps;
        match transition.edge {
            KeyEdge::Pressed => ship.body.velocity += delta,
            KeyEdge::Released => ship.body.velocity -= delta,
        }
        return;
    }

    if transition.key == Key::Space {
        match transition.edge {
            KeyEdge::Pressed => ship.is_firing = true,
            KeyEdge::Released => {
                ship.is_firing = false;
                // Next press fires immediately.
                ship.reload_remaining_s = 0.0;
            }
        }
    }
}
