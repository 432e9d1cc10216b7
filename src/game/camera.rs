//! Camera projection
//!
//! Pointer pixels are first normalized into the fixed virtual viewport
//! (y up), then the camera maps viewport points to world space.

use super::math::Vec2;

/// Maps a virtual-viewport point to world space.
pub trait Projection {
    fn viewport_to_world(&self, point: Vec2) -> Vec2;
}

/// Window pixels (origin top-left) to virtual viewport units (origin bottom-left).
pub fn normalize_pointer(pointer: Vec2, window: Vec2, viewport: Vec2) -> Vec2 {
    if window.x <= 0.0 || window.y <= 0.0 {
        return viewport.scale(0.5);
    }
    Vec2::new(
        viewport.x * pointer.x / window.x,
        viewport.y - viewport.y * pointer.y / window.y,
    )
}

/// Orthographic camera centered on `position`.
///
/// `zoom` is world units per viewport unit: larger values show more world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera {
    pub position: Vec2,
    pub zoom: f64,
    pub viewport: Vec2,
}

impl OrthoCamera {
    pub fn new(position: Vec2, zoom: f64, viewport: Vec2) -> Self {
        Self { position, zoom, viewport }
    }

    /// Inverse of `viewport_to_world`
    pub fn world_to_viewport(&self, world: Vec2) -> Vec2 {
        (world - self.position).scale(1.0 / self.zoom) + self.viewport.scale(0.5)
    }
}

impl Projection for OrthoCamera {
    fn viewport_to_world(&self, point: Vec2) -> Vec2 {
        self.position + (point - self.viewport.scale(0.5)).scale(self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pointer_flips_y() {
        let vp = Vec2::new(1280.0, 720.0);
        let window = Vec2::new(640.0, 360.0);
        assert_eq!(normalize_pointer(Vec2::new(0.0, 0.0), window, vp), Vec2::new(0.0, 720.0));
        assert_eq!(normalize_pointer(Vec2::new(320.0, 360.0), window, vp), Vec2::new(640.0, 0.0));
    }

    #[test]
    fn test_camera_center_maps_to_position() {
        let cam = OrthoCamera::new(Vec2::new(100.0, -50.0), 1.5, Vec2::new(1280.0, 720.0));
        assert_eq!(cam.viewport_to_world(Vec2::new(640.0, 360.0)), Vec2::new(100.0, -50.0));
        assert_eq!(cam.viewport_to_world(Vec2::new(740.0, 360.0)), Vec2::new(250.0, -50.0));
    }

    #[test]
    fn test_round_trip() {
        let cam = OrthoCamera::new(Vec2::new(10.0, 20.0), 2.0, Vec2::new(1280.0, 720.0));
        let p = Vec2::new(300.0, 200.0);
        assert_eq!(cam.world_to_viewport(cam.viewport_to_world(p)), p);
    }
}
