// Fixed orthographic camera over the level

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Camera covering the whole level in pixel coordinates
///
/// World space is y-up with the origin at the bottom-left of the level; the
/// projection never moves, the level fits the window.
#[derive(Debug, Clone)]
pub struct Camera {
    view_proj: Mat4,
}

impl Camera {
    /// Create a camera for a level of the given pixel size
    pub fn new(level_width: f32, level_height: f32) -> Self {
        Self {
            view_proj: Mat4::orthographic_rh(0.0, level_width, 0.0, level_height, -1.0, 1.0),
        }
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Uniform buffer contents
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj.to_cols_array_2d(),
        }
    }
}

/// Camera data as laid out in the uniform buffer
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn test_level_corners_map_to_clip_corners() {
        let camera = Camera::new(960.0, 600.0);
        let matrix = camera.view_proj_matrix();

        let bottom_left = matrix.project_point3(Vec3::new(0.0, 0.0, 0.0));
        assert!((bottom_left.x + 1.0).abs() < 1e-5);
        assert!((bottom_left.y + 1.0).abs() < 1e-5);

        let top_right = matrix.project_point3(Vec3::new(960.0, 600.0, 0.0));
        assert!((top_right.x - 1.0).abs() < 1e-5);
        assert!((top_right.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_uniform_matches_matrix() {
        let camera = Camera::new(960.0, 600.0);
        let uniform = camera.uniform();
        let column = Vec4::from(uniform.view_proj[0]);
        assert_eq!(column, camera.view_proj_matrix().col(0));
    }
}
