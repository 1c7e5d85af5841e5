use glam::Mat4;

/// Fixed orthographic camera looking down -Z.
///
/// The visible volume spans `[-half_extent, half_extent]` vertically and
/// `[-depth, depth]` along Z; horizontal extent follows the aspect ratio.
/// Points with larger z are closer to the viewer.
#[derive(Debug, Clone, Copy)]
pub struct OrthoCamera {
    pub half_extent: f32,
    pub depth: f32,
    pub aspect: f32,
}

impl Default for OrthoCamera {
    fn default() -> Self {
        Self {
            half_extent: 1.0,
            depth: 2.0,
            aspect: 800.0 / 600.0,
        }
    }
}

impl OrthoCamera {
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view_projection(&self) -> Mat4 {
        let h = self.half_extent;
        let w = h * self.aspect;
        Mat4::orthographic_rh(-w, w, -h, h, -self.depth, self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// World point to normalized device coordinates.
    fn project(cam: &OrthoCamera, point: Vec3) -> Vec3 {
        cam.view_projection().project_point3(point)
    }

    #[test]
    fn origin_maps_to_center() {
        let cam = OrthoCamera::default();
        let p = project(&cam, Vec3::ZERO);
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
        assert!((p.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn vertical_extent_fills_screen() {
        let cam = OrthoCamera::default();
        assert!((project(&cam, Vec3::new(0.0, 1.0, 0.0)).y - 1.0).abs() < 1e-6);
        assert!((project(&cam, Vec3::new(0.0, -1.0, 0.0)).y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn front_is_nearer_than_back() {
        let cam = OrthoCamera::default();
        let front = project(&cam, Vec3::new(0.0, 0.0, 1.0));
        let back = project(&cam, Vec3::new(0.0, 0.0, -1.0));
        assert!(front.z < back.z);
        assert!((0.0..=1.0).contains(&front.z) && (0.0..=1.0).contains(&back.z));
    }

    #[test]
    fn viewport_sets_aspect() {
        let mut cam = OrthoCamera::default();
        cam.set_viewport(1000, 500);
        assert_eq!(cam.aspect, 2.0);
        assert!((project(&cam, Vec3::new(2.0, 0.0, 0.0)).x - 1.0).abs() < 1e-6);
    }
}
