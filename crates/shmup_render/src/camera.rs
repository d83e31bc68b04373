use glam::{Mat4, Vec2};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Screen-space camera: one unit is one logical pixel, origin at the top-left
/// corner of the view, y growing downwards.
pub struct Camera2D {
    /// Top-left corner of the view in world pixels.
    pub position: Vec2,
    pub viewport: (u32, u32),
}

impl Camera2D {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport: (viewport_width, viewport_height),
        }
    }

    pub fn projection(&self) -> Mat4 {
        let left = self.position.x;
        let top = self.position.y;
        let right = left + self.viewport.0 as f32;
        let bottom = top + self.viewport.1 as f32;

        Mat4::orthographic_rh(left, right, bottom, top, -1.0, 1.0)
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.projection().to_cols_array_2d(),
        }
    }
}
