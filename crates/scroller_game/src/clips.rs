//! Sprite-sheet clip tables.
//!
//! The sheets are packed horizontally with uneven frame widths, so the
//! tables carry the measured rectangles rather than computing a stride.
//! All frames are 37px tall with their top row at y=0.

use scroller_core::walk::Facing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

const fn clip(x: u32, w: u32) -> ClipRect {
    ClipRect { x, y: 0, w, h: 37 }
}

pub const WALK_RIGHT_CLIPS: [ClipRect; 10] = [
    clip(0, 26),
    clip(26, 26),
    clip(56, 26),
    clip(86, 34),
    clip(120, 26),
    clip(150, 26),
    clip(175, 26),
    clip(203, 26),
    clip(236, 35),
    clip(275, 26),
];

pub const WALK_LEFT_CLIPS: [ClipRect; 10] = [
    clip(0, 34),
    clip(34, 33),
    clip(67, 33),
    clip(100, 35),
    clip(135, 25),
    clip(160, 29),
    clip(189, 31),
    clip(220, 35),
    clip(255, 34),
    clip(289, 28),
];

pub const STANDING_CLIPS: [ClipRect; 2] = [clip(0, 30), clip(30, 30)];

/// The standing sheet has two poses; only this one is ever rendered.
pub const STANDING_CLIP: usize = 1;

/// Select the clip for the current facing and walk frame. The walk frame
/// comes from `WalkCycle::frame()` and is always within the tables.
pub fn clip_for(facing: Facing, walk_frame: usize) -> ClipRect {
    match facing {
        Facing::Right => WALK_RIGHT_CLIPS[walk_frame],
        Facing::Left => WALK_LEFT_CLIPS[walk_frame],
        Facing::Standing => STANDING_CLIPS[STANDING_CLIP],
    }
}

/// Pixel clip to normalized UV rect `[u0, v0, u1, v1]` for the given
/// sheet dimensions.
pub fn uv_rect(clip: ClipRect, sheet: (u32, u32)) -> [f32; 4] {
    let (sheet_w, sheet_h) = (sheet.0 as f32, sheet.1 as f32);
    [
        clip.x as f32 / sheet_w,
        clip.y as f32 / sheet_h,
        (clip.x + clip.w) as f32 / sheet_w,
        (clip.y + clip.h) as f32 / sheet_h,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use scroller_core::walk::WALK_FRAME_COUNT;

    #[test]
    fn walk_tables_cover_every_walk_frame() {
        assert_eq!(WALK_RIGHT_CLIPS.len(), WALK_FRAME_COUNT);
        assert_eq!(WALK_LEFT_CLIPS.len(), WALK_FRAME_COUNT);
        for frame in 0..WALK_FRAME_COUNT {
            clip_for(Facing::Right, frame);
            clip_for(Facing::Left, frame);
        }
    }

    #[test]
    fn standing_ignores_the_walk_frame() {
        assert_eq!(clip_for(Facing::Standing, 0), STANDING_CLIPS[STANDING_CLIP]);
        assert_eq!(clip_for(Facing::Standing, 7), STANDING_CLIPS[STANDING_CLIP]);
    }

    #[test]
    fn no_clip_is_degenerate() {
        for table in [
            &WALK_RIGHT_CLIPS[..],
            &WALK_LEFT_CLIPS[..],
            &STANDING_CLIPS[..],
        ] {
            for clip in table {
                assert!(clip.w > 0 && clip.h > 0);
            }
        }
    }

    #[test]
    fn uv_rect_stays_normalized() {
        // Sheet sized to the right-walk table's full extent.
        let sheet = (301, 37);
        for clip in WALK_RIGHT_CLIPS {
            let [u0, v0, u1, v1] = uv_rect(clip, sheet);
            assert!(u0 >= 0.0 && u1 <= 1.0 && u0 < u1);
            assert!(v0 >= 0.0 && v1 <= 1.0 && v0 < v1);
        }
    }
}
