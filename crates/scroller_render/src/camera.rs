//! Level-space camera.
//!
//! Level space is y-down with the origin at the top-left, so the camera
//! holds the top-left corner of the visible window and the orthographic
//! projection flips y: quads built directly from level coordinates land on
//! screen without per-sprite camera subtraction.

use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

pub struct Camera2D {
    /// Top-left corner of the viewport in level space.
    pub origin: (i32, i32),
    /// Viewport size in level-space pixels. Fixed for the life of the
    /// camera; the window is not resizable.
    pub viewport: (u32, u32),
}

impl Camera2D {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            origin: (0, 0),
            viewport: (viewport_width, viewport_height),
        }
    }

    pub fn build_uniform(&self) -> CameraUniform {
        let left = self.origin.0 as f32;
        let top = self.origin.1 as f32;
        let right = left + self.viewport.0 as f32;
        let bottom = top + self.viewport.1 as f32;

        // Passing the level-space bottom as the projection's "bottom" plane
        // maps increasing level y to decreasing NDC y, which is the y-down
        // flip.
        let proj = Mat4::orthographic_rh(left, right, bottom, top, -1.0, 1.0);

        CameraUniform {
            view_proj: proj.to_cols_array_2d(),
        }
    }
}
