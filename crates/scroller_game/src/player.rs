//! The player: an input-driven walker clamped to the level.
//!
//! Velocity is edge-driven. A key press adds the key's velocity
//! contribution and the matching release subtracts it, so holding both
//! arrows cancels to zero and releasing either one restores the other's
//! direction without any per-frame key polling.

use scroller_core::geom::{LevelBounds, Rect};
use scroller_core::input::{InputState, Key};

use crate::mover::{BoundaryPolicy, MovingBody};

pub const PLAYER_WIDTH: i32 = 30;
pub const PLAYER_HEIGHT: i32 = 50;

/// Axis velocity in pixels per tick while a direction key is held.
pub const PLAYER_VEL: i32 = 3;

#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub body: MovingBody,
}

impl Player {
    pub fn new(spawn_x: i32, spawn_y: i32, bounds: LevelBounds) -> Self {
        Self {
            body: MovingBody::new(
                spawn_x,
                spawn_y,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
                BoundaryPolicy::BumpAndStop(bounds),
            ),
        }
    }

    /// Route a key event through the input state and apply the velocity
    /// edge when the event is an actual transition. OS key repeat and
    /// duplicate events are filtered here.
    pub fn handle_key(&mut self, input: &mut InputState, key: Key, pressed: bool) {
        let transition = if pressed {
            input.key_down(key)
        } else {
            input.key_up(key)
        };
        if !transition {
            return;
        }

        let contribution = match key {
            Key::Right => PLAYER_VEL,
            Key::Left => -PLAYER_VEL,
        };
        if pressed {
            self.body.vel_x += contribution;
        } else {
            self.body.vel_x -= contribution;
        }
    }

    pub fn tick(&mut self) {
        self.body.advance();
    }

    pub fn bounding_box(&self) -> Rect {
        self.body.bounding_box()
    }
}
