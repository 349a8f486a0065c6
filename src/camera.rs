// camera.rs — 固定机位透视相机

/// 相机沿 +Z 轴看向原点，只有宽高比会随窗口变化。
#[derive(Debug, Clone, Copy)]
pub struct GlobeCamera {
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub distance: f32,
}

impl Default for GlobeCamera {
    fn default() -> Self {
        Self {
            fov_y: 75f32.to_radians(),
            aspect: 1.0,
            z_near: 0.1,
            z_far: 1000.0,
            distance: 2.5,
        }
    }
}

impl GlobeCamera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut cam = Self::default();
        cam.set_viewport(width, height);
        cam
    }

    /// 窗口尺寸变化时只需要重算宽高比。
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn eye(&self) -> glam::Vec3 {
        glam::Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn view(&self) -> glam::Mat4 {
        glam::Mat4::look_at_rh(self.eye(), glam::Vec3::ZERO, glam::Vec3::Y)
    }

    pub fn proj(&self) -> glam::Mat4 {
        glam::Mat4::perspective_rh(self.fov_y, self.aspect.max(1e-3), self.z_near, self.z_far)
    }

    pub fn view_proj(&self) -> glam::Mat4 {
        self.proj() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_sets_aspect() {
        let mut cam = GlobeCamera::new(800, 600);
        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);

        cam.set_viewport(1920, 1080);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);

        // 最小化窗口给出 0 尺寸时保留旧值
        cam.set_viewport(0, 720);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn eye_sits_on_view_axis() {
        let cam = GlobeCamera::new(800, 600);
        assert_eq!(cam.eye(), glam::Vec3::new(0.0, 0.0, 2.5));

        // 原点应落在相机正前方：view 变换后 z 为负且距离不变
        let origin_view = cam.view() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin_view.z + 2.5).abs() < 1e-5);
    }

    #[test]
    fn projection_is_finite() {
        let cam = GlobeCamera::new(800, 600);
        let m = cam.view_proj().to_cols_array();
        assert!(m.iter().all(|v| v.is_finite()));
    }
}
