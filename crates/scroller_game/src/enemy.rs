//! The enemy: a fixed-speed patroller with collision push-back.
//!
//! Direction control is a soft bias, not a bounce: each tick, after the
//! body has moved, the velocity sign is set from which side of the patrol
//! band the enemy ended up on. Inside the band the velocity is left
//! alone, so a push-back that carries the enemy past a band edge flips it
//! the same way walking past it would.
//!
//! The collision response is a plain push-back with no separating-axis
//! resolution: while the caller-supplied box overlaps, the enemy walks
//! backward instead of forward. Unequal speeds can therefore leave the
//! pair overlapping indefinitely; that is the intended behavior, not a
//! missing fix.

use scroller_core::geom::Rect;

use crate::mover::{BoundaryPolicy, MovingBody};

pub const ENEMY_WIDTH: i32 = 30;
pub const ENEMY_HEIGHT: i32 = 50;

/// Patrol velocity magnitude in pixels per tick.
pub const ENEMY_VEL: i32 = 1;

/// Center of the default patrol path in level space.
pub const CENTER_PATH: i32 = 500;

/// Half-width of the patrol band around the center.
pub const PATROL_HALF_WIDTH: i32 = 100;

#[derive(Debug, Clone, Copy)]
pub struct PatrolBand {
    pub center_x: i32,
    pub half_width: i32,
}

impl Default for PatrolBand {
    fn default() -> Self {
        Self {
            center_x: CENTER_PATH,
            half_width: PATROL_HALF_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub body: MovingBody,
    pub patrol: PatrolBand,
}

impl Enemy {
    /// Spawns at the patrol center, walking in the positive direction.
    pub fn new(patrol: PatrolBand, spawn_y: i32) -> Self {
        let mut body = MovingBody::new(
            patrol.center_x,
            spawn_y,
            ENEMY_WIDTH,
            ENEMY_HEIGHT,
            BoundaryPolicy::Unbounded,
        );
        body.vel_x = ENEMY_VEL;
        Self { body, patrol }
    }

    /// One tick against the player's current bounding box.
    pub fn tick(&mut self, player_box: Rect) {
        if self.body.bounding_box().overlaps(&player_box) {
            self.body.retreat();
        } else {
            self.body.advance();
        }

        if self.body.pos_x > self.patrol.center_x + self.patrol.half_width {
            self.body.vel_x = -ENEMY_VEL;
        } else if self.body.pos_x < self.patrol.center_x - self.patrol.half_width {
            self.body.vel_x = ENEMY_VEL;
        }
    }

    pub fn bounding_box(&self) -> Rect {
        self.body.bounding_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A player box far from the patrol path.
    const FAR_AWAY: Rect = Rect {
        x: -2000,
        y: -2000,
        w: 30,
        h: 50,
    };

    fn enemy() -> Enemy {
        Enemy::new(PatrolBand::default(), 386)
    }

    #[test]
    fn velocity_flips_on_tick_101_at_the_right_band_edge() {
        let mut enemy = enemy();
        for tick in 1..=200 {
            enemy.tick(FAR_AWAY);
            match tick {
                100 => {
                    // At the edge itself, still walking right.
                    assert_eq!(enemy.body.pos_x, 600);
                    assert_eq!(enemy.body.vel_x, ENEMY_VEL);
                }
                101 => {
                    // One step past the edge flips the sign.
                    assert_eq!(enemy.body.pos_x, 601);
                    assert_eq!(enemy.body.vel_x, -ENEMY_VEL);
                }
                102 => assert_eq!(enemy.body.pos_x, 600),
                _ => {}
            }
        }
    }

    #[test]
    fn velocity_flips_back_at_the_left_band_edge() {
        let mut enemy = enemy();
        enemy.body.pos_x = 400;
        enemy.body.vel_x = -ENEMY_VEL;

        enemy.tick(FAR_AWAY);
        assert_eq!(enemy.body.pos_x, 399);
        assert_eq!(enemy.body.vel_x, ENEMY_VEL);
    }

    #[test]
    fn velocity_holds_steady_inside_the_band() {
        let mut enemy = enemy();
        for _ in 0..100 {
            let before = enemy.body.vel_x;
            enemy.tick(FAR_AWAY);
            if enemy.body.pos_x > 400 && enemy.body.pos_x < 600 {
                assert_eq!(enemy.body.vel_x, before);
            }
        }
    }

    #[test]
    fn overlap_pushes_the_enemy_backward() {
        let mut enemy = enemy();
        enemy.body.pos_x = 110;
        enemy.body.pos_y = 120;
        let player_box = Rect::new(100, 100, 30, 50);
        assert!(enemy.bounding_box().overlaps(&player_box));

        enemy.tick(player_box);
        // Walking right, pushed left.
        assert_eq!(enemy.body.pos_x, 109);
    }

    #[test]
    fn push_back_may_leave_the_pair_overlapping() {
        let mut enemy = enemy();
        enemy.body.pos_x = 500;
        enemy.body.pos_y = 386;
        // A box wide enough that one pixel of retreat cannot escape it.
        let player_box = Rect::new(450, 386, 130, 50);

        for _ in 0..10 {
            enemy.tick(player_box);
        }
        assert!(enemy.bounding_box().overlaps(&player_box));
    }

    #[test]
    fn touching_boxes_already_count_as_collision() {
        let mut enemy = enemy();
        enemy.body.pos_x = 530;
        enemy.body.pos_y = 386;
        // Player's right edge exactly touches the enemy's left edge.
        let player_box = Rect::new(500, 386, 30, 50);

        enemy.tick(player_box);
        assert_eq!(enemy.body.pos_x, 529);
    }
}
