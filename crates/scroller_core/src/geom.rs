//! Integer level-space geometry.
//!
//! Level space has its origin at the top-left with y growing downward.
//! Bounding boxes are derived from entity position + fixed dimensions each
//! tick and never persisted, so `Rect` stays a plain value type.
//!
//! Overlap uses closed intervals: rectangles that merely touch along an
//! edge count as overlapping.

/// Axis-aligned rectangle in level space. Used both for collision tests
/// and for rendering placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// AABB overlap test. Each axis's projections must overlap; touching
    /// edges count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.x + other.w
            && other.x <= self.x + self.w
            && self.y <= other.y + other.h
            && other.y <= self.y + self.h
    }

    /// Center point, rounded toward the origin (integer division).
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// Fixed level dimensions that clamp entity movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelBounds {
    pub width: i32,
    pub height: i32,
}

impl LevelBounds {
    /// True when the box lies fully inside `[0, width] x [0, height]`.
    /// A box flush against the right or bottom edge still counts.
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.x >= 0 && rect.y >= 0 && rect.x + rect.w <= self.width && rect.y + rect.h <= self.height
    }
}

/// Camera placement: center the viewport on the focus box, then clamp each
/// axis independently so the viewport never leaves the level.
///
/// Pure function of the focus position; the caller recomputes it every
/// frame. No smoothing.
pub fn follow_camera(focus: Rect, viewport: (i32, i32), level: (i32, i32)) -> (i32, i32) {
    let (cx, cy) = focus.center();
    let max_x = (level.0 - viewport.0).max(0);
    let max_y = (level.1 - viewport.1).max(0);
    let x = (cx - viewport.0 / 2).clamp(0, max_x);
    let y = (cy - viewport.1 / 2).clamp(0, max_y);
    (x, y)
}
