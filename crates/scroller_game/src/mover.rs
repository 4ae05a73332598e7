//! Shared bounded movement for every entity in the level.
//!
//! The player and the enemy move the same way: integer velocity applied
//! once per tick, resolved one axis at a time. What differs is the
//! boundary policy, so the policy is data and the mover is shared instead
//! of each entity carrying its own copy of the arithmetic.
//!
//! Boundary handling is bump-and-stop, not clamp-to-edge: a move that
//! would push any part of the bounding box outside the level reverts that
//! axis entirely, leaving the body where it was on that axis for the tick.

use scroller_core::geom::{LevelBounds, Rect};

/// What happens when a tick's move would leave the level.
#[derive(Debug, Clone, Copy)]
pub enum BoundaryPolicy {
    /// Revert the offending axis; the other axis still moves.
    BumpAndStop(LevelBounds),
    /// No boundary test. The enemy's patrol band steers it instead of the
    /// level edge.
    Unbounded,
}

#[derive(Debug, Clone, Copy)]
pub struct MovingBody {
    pub pos_x: i32,
    pub pos_y: i32,
    pub vel_x: i32,
    pub vel_y: i32,
    pub width: i32,
    pub height: i32,
    pub boundary: BoundaryPolicy,
}

impl MovingBody {
    pub fn new(pos_x: i32, pos_y: i32, width: i32, height: i32, boundary: BoundaryPolicy) -> Self {
        Self {
            pos_x,
            pos_y,
            vel_x: 0,
            vel_y: 0,
            width,
            height,
            boundary,
        }
    }

    /// Bounding box derived from the current position; recomputed, never
    /// stored.
    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.pos_x, self.pos_y, self.width, self.height)
    }

    /// Apply one tick of velocity, axis by axis, under the boundary
    /// policy.
    pub fn advance(&mut self) {
        self.pos_x += self.vel_x;
        if self.out_of_bounds_x() {
            self.pos_x -= self.vel_x;
        }

        self.pos_y += self.vel_y;
        if self.out_of_bounds_y() {
            self.pos_y -= self.vel_y;
        }
    }

    /// Move one tick backward on both axes. Collision push-back; no
    /// boundary test, mirroring the forward-unbounded enemy.
    pub fn retreat(&mut self) {
        self.pos_x -= self.vel_x;
        self.pos_y -= self.vel_y;
    }

    fn out_of_bounds_x(&self) -> bool {
        match self.boundary {
            BoundaryPolicy::BumpAndStop(bounds) => {
                self.pos_x < 0 || self.pos_x + self.width > bounds.width
            }
            BoundaryPolicy::Unbounded => false,
        }
    }

    fn out_of_bounds_y(&self) -> bool {
        match self.boundary {
            BoundaryPolicy::BumpAndStop(bounds) => {
                self.pos_y < 0 || self.pos_y + self.height > bounds.height
            }
            BoundaryPolicy::Unbounded => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: LevelBounds = LevelBounds {
        width: 1513,
        height: 480,
    };

    fn bounded_body(pos_x: i32, pos_y: i32) -> MovingBody {
        MovingBody::new(pos_x, pos_y, 30, 50, BoundaryPolicy::BumpAndStop(BOUNDS))
    }

    #[test]
    fn in_bounds_move_is_taken() {
        let mut body = bounded_body(100, 390);
        body.vel_x = 3;
        body.advance();
        assert_eq!((body.pos_x, body.pos_y), (103, 390));
    }

    #[test]
    fn move_past_left_edge_reverts_x() {
        let mut body = bounded_body(0, 390);
        body.vel_x = -3;
        body.advance();
        assert_eq!(body.pos_x, 0);
    }

    #[test]
    fn move_past_right_edge_reverts_without_snapping() {
        // Two pixels of room, velocity three: bump-and-stop keeps the body
        // at 1481 instead of clamping it to 1483.
        let mut body = bounded_body(BOUNDS.width - 32, 390);
        body.vel_x = 3;
        body.advance();
        assert_eq!(body.pos_x, BOUNDS.width - 32);
    }

    #[test]
    fn axes_revert_independently() {
        let mut body = bounded_body(100, 0);
        body.vel_x = 3;
        body.vel_y = -3;
        body.advance();
        assert_eq!((body.pos_x, body.pos_y), (103, 0));
    }

    #[test]
    fn unbounded_body_ignores_level_edges() {
        let mut body = MovingBody::new(BOUNDS.width - 1, 0, 30, 50, BoundaryPolicy::Unbounded);
        body.vel_x = 5;
        body.advance();
        assert_eq!(body.pos_x, BOUNDS.width + 4);
    }

    #[test]
    fn retreat_subtracts_velocity_on_both_axes() {
        let mut body = MovingBody::new(500, 386, 30, 50, BoundaryPolicy::Unbounded);
        body.vel_x = 1;
        body.vel_y = 2;
        body.retreat();
        assert_eq!((body.pos_x, body.pos_y), (499, 384));
    }

    proptest! {
        // Per axis: an in-bounds move lands on p + v, anything else keeps
        // p; either way the box stays inside the level.
        #[test]
        fn bump_and_stop_keeps_box_inside(
            px in 0i32..=1513 - 30,
            py in 0i32..=480 - 50,
            vx in -10i32..=10,
            vy in -10i32..=10,
        ) {
            let mut body = bounded_body(px, py);
            body.vel_x = vx;
            body.vel_y = vy;
            body.advance();

            let x_fits = px + vx >= 0 && px + vx + 30 <= BOUNDS.width;
            prop_assert_eq!(body.pos_x, if x_fits { px + vx } else { px });
            let y_fits = py + vy >= 0 && py + vy + 50 <= BOUNDS.height;
            prop_assert_eq!(body.pos_y, if y_fits { py + vy } else { py });

            prop_assert!(BOUNDS.contains(&body.bounding_box()));
        }
    }
}
