//! Recorded key-event tapes for headless runs.
//!
//! A tape is a list of frames. Each frame lists the key transitions that arrived
//! before it, then advances the game `repeat` times by `frame_dt`. The transitions
//! are applied once, before the first of those updates.

use crate::controller::handle_transition;
use crate::state::GameState;
use serde::Deserialize;
use shmup_core::KeyTransition;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayTape {
    #[serde(default = "default_dt")]
    pub frame_dt: f32,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub keys: Vec<KeyTransition>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplayTape {
    pub fn frame_count(&self) -> usize {
        self.frames.iter().map(|f| f.repeat.max(1) as usize).sum()
    }

    /// Play the whole tape into `state`.
    pub fn run(&self, state: &mut GameState) {
        let speed = state.config.ship_speed_pps;
        for frame in &self.frames {
            for transition in &frame.keys {
                handle_transition(&mut state.ship, *transition, speed);
            }
            for _ in 0..frame.repeat.max(1) {
                state.update(self.frame_dt);
            }
        }
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplayTape, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let tape: ReplayTape = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&tape)?;
    Ok(tape)
}

fn validate_replay(tape: &ReplayTape) -> Result<(), String> {
    if !(tape.frame_dt.is_finite() && tape.frame_dt >= 0.0) {
        return Err("Replay validation failed: frame_dt must be >= 0".to_string());
    }
    if tape.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_dt() -> f32 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use glam::IVec2;
    use shmup_core::Key;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "shmup_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    const STRAFE_AND_FIRE: &str = r#"{
      "frame_dt": 0.016,
      "frames": [
        { "keys": [{ "key": "left", "edge": "pressed" }], "repeat": 30 },
        { "keys": [{ "key": "space", "edge": "pressed" }], "repeat": 90 },
        {
          "keys": [
            { "key": "left", "edge": "released" },
            { "key": "up", "edge": "pressed" }
          ],
          "repeat": 20
        },
        {
          "keys": [
            { "key": "up", "edge": "released" },
            { "key": "space", "edge": "released" }
          ],
          "repeat": 10
        }
      ]
    }"#;

    #[test]
    fn replay_file_parses() {
        let path = temp_file_path("parse");
        fs::write(&path, STRAFE_AND_FIRE).expect("write replay file");

        let tape = load_replay_from_path(&path).expect("replay should load");
        assert_eq!(tape.frames.len(), 4);
        assert_eq!(tape.frame_count(), 150);
        assert_eq!(tape.frames[0].keys, vec![KeyTransition::pressed(Key::Left)]);
        assert_eq!(
            tape.frames[3].keys[1],
            KeyTransition::released(Key::Space)
        );

        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_tape_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frame_dt": 0.016, "frames": [] }"#).expect("write replay file");

        let err = load_replay_from_path(&path).expect_err("empty tape should fail");
        assert!(err.contains("frames list is empty"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn unknown_key_names_fail_to_parse() {
        let path = temp_file_path("badkey");
        fs::write(
            &path,
            r#"{ "frames": [{ "keys": [{ "key": "escape", "edge": "pressed" }] }] }"#,
        )
        .expect("write replay file");

        let err = load_replay_from_path(&path).expect_err("unknown key should fail");
        assert!(err.contains("Failed to parse replay JSON"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let path = temp_file_path("deterministic");
        fs::write(&path, STRAFE_AND_FIRE).expect("write replay file");
        let tape = load_replay_from_path(&path).expect("replay should load");

        let mut run_a = GameState::new(GameConfig::default());
        let mut run_b = GameState::new(GameConfig::default());
        tape.run(&mut run_a);
        tape.run(&mut run_b);

        assert_eq!(run_a.ship, run_b.ship);
        assert_eq!(run_a.projectiles.as_slice(), run_b.projectiles.as_slice());

        // All keys released: the ship is at rest and stopped firing.
        assert_eq!(run_a.ship.body.velocity, IVec2::ZERO);
        assert!(!run_a.ship.is_firing);
        // Strafed left and then climbed away from the bottom edge.
        assert!(run_a.ship.body.position.x < 400);
        assert!(run_a.ship.body.position.y < 575);
        assert!(!run_a.projectiles.is_empty());

        let _ = fs::remove_file(path);
    }
}
