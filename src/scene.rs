// scene.rs — globe 场景状态（网格、粒子、灯光、逐帧旋转）

use rand::Rng;

use crate::camera::GlobeCamera;
use crate::mesh::{self, SphereMesh};
use crate::page::Page;

pub const SPHERE_RADIUS: f32 = 1.2;
pub const SPHERE_SEGMENTS: usize = 50;
pub const WIREFRAME_RADIUS: f32 = 1.21;
pub const WIREFRAME_SEGMENTS: usize = 24;

pub const PARTICLE_COUNT: usize = 300;
pub const PARTICLE_SPREAD: f32 = 4.0;
pub const PARTICLE_SIZE: f32 = 0.02;

// 逐帧固定增量（弧度），不按墙钟时间缩放，转速随刷新率走。
pub const SPHERE_SPIN: f32 = 0.002;
pub const WIREFRAME_SPIN: f32 = 0.002;
pub const PARTICLE_SPIN: f32 = -0.0005;

pub const SPHERE_COLOR: u32 = 0x34495e;
pub const SPHERE_OPACITY: f32 = 0.1;
pub const WIREFRAME_COLOR: u32 = 0x3498db;
pub const WIREFRAME_OPACITY: f32 = 0.3;
pub const PARTICLE_COLOR: u32 = 0x85c1e9;
pub const PARTICLE_OPACITY: f32 = 0.8;

/// 0xRRGGBB -> [r, g, b]，分量 0..1。
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: glam::Vec3,
}

/// 场景一次建好后物体不增不减，每帧只更新三个旋转角。
pub struct GlobeScene {
    pub sphere: SphereMesh,
    pub wireframe_lines: Vec<[f32; 3]>,
    pub particles: Vec<[f32; 3]>,

    pub sphere_angle: f32,
    pub wireframe_angle: f32,
    pub particles_angle: f32,

    pub ambient: AmbientLight,
    pub point_light: PointLight,
}

impl GlobeScene {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let sphere = mesh::build_sphere(SPHERE_RADIUS, SPHERE_SEGMENTS, SPHERE_SEGMENTS);
        let shell = mesh::build_sphere(WIREFRAME_RADIUS, WIREFRAME_SEGMENTS, WIREFRAME_SEGMENTS);
        let wireframe_lines = mesh::extract_wireframe(&shell);
        let particles = mesh::scatter_particles(rng, PARTICLE_COUNT, PARTICLE_SPREAD);

        Self {
            sphere,
            wireframe_lines,
            particles,
            sphere_angle: 0.0,
            wireframe_angle: 0.0,
            particles_angle: 0.0,
            ambient: AmbientLight {
                color: [1.0, 1.0, 1.0],
                intensity: 0.6,
            },
            point_light: PointLight {
                color: [1.0, 1.0, 1.0],
                intensity: 1.0,
                position: glam::Vec3::new(5.0, 5.0, 5.0),
            },
        }
    }

    /// 每个画面帧推进一次。球体与线框同速，粒子反向慢速，形成视差。
    pub fn advance_frame(&mut self) {
        self.sphere_angle += SPHERE_SPIN;
        self.wireframe_angle += WIREFRAME_SPIN;
        self.particles_angle += PARTICLE_SPIN;
    }

    pub fn sphere_model(&self) -> glam::Mat4 {
        glam::Mat4::from_rotation_y(self.sphere_angle)
    }

    pub fn wireframe_model(&self) -> glam::Mat4 {
        glam::Mat4::from_rotation_y(self.wireframe_angle)
    }

    pub fn particles_model(&self) -> glam::Mat4 {
        glam::Mat4::from_rotation_y(self.particles_angle)
    }
}

/// 场景 + 相机 + 动画开关。对应原页面里挂在 globe 容器上的那套句柄。
pub struct GlobeView {
    pub scene: GlobeScene,
    pub camera: GlobeCamera,
    animating: bool,
}

impl GlobeView {
    /// 页面没有 globe 挂载位时静默返回 None，其余组件不受影响。
    pub fn mount(page: &Page, width: u32, height: u32) -> Option<Self> {
        if !page.globe_slot {
            return None;
        }
        let mut rng = rand::thread_rng();
        Some(Self::with_rng(&mut rng, width, height))
    }

    pub fn with_rng<R: Rng>(rng: &mut R, width: u32, height: u32) -> Self {
        Self {
            scene: GlobeScene::new(rng),
            camera: GlobeCamera::new(width, height),
            animating: true,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// 动画句柄。当前设计不会停止动画，留作将来销毁视图用。
    pub fn set_animating(&mut self, on: bool) {
        self.animating = on;
    }

    pub fn advance_frame(&mut self) {
        if self.animating {
            self.scene.advance_frame();
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn test_scene() -> GlobeScene {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        GlobeScene::new(&mut rng)
    }

    #[test]
    fn rotation_accumulates_per_frame() {
        let mut scene = test_scene();
        for _ in 0..100 {
            scene.advance_frame();
        }
        assert!((scene.sphere_angle - 0.2).abs() < 1e-5);
        assert!((scene.particles_angle + 0.05).abs() < 1e-5);
        // 球体与线框增量相同，角度始终严格相等
        assert_eq!(scene.sphere_angle, scene.wireframe_angle);
    }

    #[test]
    fn scene_composition_is_fixed() {
        let scene = test_scene();
        assert_eq!(scene.particles.len(), PARTICLE_COUNT);
        assert_eq!(
            scene.sphere.positions.len(),
            (SPHERE_SEGMENTS + 1) * (SPHERE_SEGMENTS + 1)
        );
        assert!(!scene.wireframe_lines.is_empty());
        assert!((scene.ambient.intensity - 0.6).abs() < f32::EPSILON);
        assert_eq!(scene.point_light.position, glam::Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn mount_requires_globe_slot() {
        let page = crate::page::Page::landing().without_globe();
        assert!(GlobeView::mount(&page, 800, 600).is_none());

        let page = crate::page::Page::landing();
        let view = GlobeView::mount(&page, 800, 600).expect("globe slot present");
        assert!(view.is_animating());
        assert!((view.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn paused_view_stops_advancing() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let mut view = GlobeView::with_rng(&mut rng, 640, 480);
        view.advance_frame();
        view.set_animating(false);
        view.advance_frame();
        assert!((view.scene.sphere_angle - SPHERE_SPIN).abs() < 1e-7);
    }

    #[test]
    fn rgb_unpacks_hex() {
        let c = rgb(0x34495e);
        assert!((c[0] - 52.0 / 255.0).abs() < 1e-6);
        assert!((c[1] - 73.0 / 255.0).abs() < 1e-6);
        assert!((c[2] - 94.0 / 255.0).abs() < 1e-6);
    }
}
