//! Deterministic input scripts for tests.
//!
//! A script is a JSON timeline of held-key states with repeat counts.
//! Feeding the expanded per-tick states through `Player::handle_key`
//! produces exactly the press/release edges the event loop would, because
//! the input state only reacts to transitions.

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct InputScript {
    pub frames: Vec<ScriptFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScriptFrame {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl InputScript {
    /// One `(left_held, right_held)` pair per tick.
    pub fn expanded_held(&self) -> Vec<(bool, bool)> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push((frame.left, frame.right));
            }
        }
        out
    }
}

pub fn load_script_from_path(path: &Path) -> Result<InputScript, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let script: InputScript = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse input script {}: {e}", path.display()))?;
    validate_script(&script)?;
    Ok(script)
}

fn validate_script(script: &InputScript) -> Result<(), String> {
    if script.frames.is_empty() {
        return Err("Script validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{Enemy, PatrolBand};
    use crate::player::Player;
    use scroller_core::input::{InputState, Key};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "scroller_script_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    struct World {
        player: Player,
        enemy: Enemy,
        input: InputState,
    }

    impl World {
        fn new() -> Self {
            Self {
                player: Player::new(0, crate::GROUND_Y, crate::LEVEL_BOUNDS),
                enemy: Enemy::new(PatrolBand::default(), crate::ENEMY_SPAWN_Y),
                input: InputState::new(),
            }
        }

        fn run(&mut self, held: &[(bool, bool)]) {
            for &(left, right) in held {
                // Level state in, edges out: handle_key only reacts to
                // transitions, so repeating the held state is a no-op.
                self.player.handle_key(&mut self.input, Key::Left, left);
                self.player.handle_key(&mut self.input, Key::Right, right);
                self.player.tick();
                self.enemy.tick(self.player.bounding_box());
            }
        }
    }

    #[test]
    fn script_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "right": true, "repeat": 3 },
                { "left": true },
                { "repeat": 2 }
              ]
            }"#,
        )
        .expect("write script file");

        let script = load_script_from_path(&path).expect("script should load");
        let held = script.expanded_held();
        assert_eq!(held.len(), 6);
        assert_eq!(held[0], (false, true));
        assert_eq!(held[3], (true, false));
        assert_eq!(held[5], (false, false));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_script_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write script file");
        let err = load_script_from_path(&path).expect_err("empty script should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn scripted_run_is_deterministic() {
        let path = temp_file_path("deterministic");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "right": true, "repeat": 240 },
                { "repeat": 30 },
                { "left": true, "repeat": 90 },
                { "left": true, "right": true, "repeat": 60 },
                { "left": true, "repeat": 120 }
              ]
            }"#,
        )
        .expect("write script file");

        let script = load_script_from_path(&path).expect("script should load");
        let held = script.expanded_held();

        let mut run_a = World::new();
        let mut run_b = World::new();
        run_a.run(&held);
        run_b.run(&held);

        assert_eq!(run_a.player.body.pos_x, run_b.player.body.pos_x);
        assert_eq!(run_a.player.body.vel_x, run_b.player.body.vel_x);
        assert_eq!(run_a.enemy.body.pos_x, run_b.enemy.body.pos_x);
        assert_eq!(run_a.enemy.body.vel_x, run_b.enemy.body.vel_x);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn player_never_leaves_the_level_under_script() {
        // Long pushes against both edges, with an opposing-keys stretch.
        let script = InputScript {
            frames: vec![
                ScriptFrame {
                    left: true,
                    right: false,
                    repeat: 120,
                },
                ScriptFrame {
                    left: false,
                    right: true,
                    repeat: 600,
                },
                ScriptFrame {
                    left: true,
                    right: true,
                    repeat: 60,
                },
                ScriptFrame {
                    left: true,
                    right: false,
                    repeat: 120,
                },
            ],
        };

        let mut world = World::new();
        for &(left, right) in &script.expanded_held() {
            world.run(&[(left, right)]);
            assert!(crate::LEVEL_BOUNDS.contains(&world.player.bounding_box()));
        }
    }

    #[test]
    fn holding_left_at_spawn_keeps_position_zero() {
        let mut world = World::new();
        world.run(&[(true, false); 30]);
        assert_eq!(world.player.body.pos_x, 0);
    }
}
