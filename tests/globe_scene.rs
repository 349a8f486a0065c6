use globe_viewer::nav::NavigationController;
use globe_viewer::page::Page;
use globe_viewer::scene::{GlobeView, PARTICLE_COUNT, SPHERE_SEGMENTS, WIREFRAME_SEGMENTS};

#[test]
fn scene_construction_and_500_frames() {
    let page = Page::landing();
    let mut view = GlobeView::mount(&page, 800, 600).expect("landing page mounts the globe");

    // 场景组成：一个球体、一个线框壳、300 个粒子、两盏灯、一台相机
    let scene = &view.scene;
    assert_eq!(
        scene.sphere.positions.len(),
        (SPHERE_SEGMENTS + 1) * (SPHERE_SEGMENTS + 1)
    );
    assert!(!scene.wireframe_lines.is_empty());
    assert_eq!(scene.particles.len(), PARTICLE_COUNT);
    assert!((scene.ambient.intensity - 0.6).abs() < f32::EPSILON);
    assert!((scene.point_light.intensity - 1.0).abs() < f32::EPSILON);
    assert!((view.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    assert!((view.camera.fov_y - 75f32.to_radians()).abs() < 1e-6);
    assert_eq!(view.camera.eye().z, 2.5);

    for c in scene.particles.iter().flatten() {
        assert!((-2.0..2.0).contains(c));
    }

    // 500 帧后：球体约 1.0 弧度，粒子约 -0.25 弧度，线框与球体始终同角
    for _ in 0..500 {
        view.advance_frame();
    }
    assert!((view.scene.sphere_angle - 1.0).abs() < 1e-4);
    assert!((view.scene.particles_angle + 0.25).abs() < 1e-4);
    assert_eq!(view.scene.sphere_angle, view.scene.wireframe_angle);
}

#[test]
fn resize_recomputes_camera_aspect() {
    let page = Page::landing();
    let mut view = GlobeView::mount(&page, 800, 600).expect("globe slot present");

    view.resize(1024, 512);
    assert!((view.camera.aspect - 2.0).abs() < 1e-6);

    // resize 不影响动画推进
    view.advance_frame();
    assert!(view.scene.sphere_angle > 0.0);
}

#[test]
fn missing_globe_slot_leaves_navigation_working() {
    let page = Page::landing().without_globe();
    assert!(GlobeView::mount(&page, 800, 600).is_none());

    // globe 缺席不影响导航组件初始化和交互
    let mut nav = NavigationController::new();
    nav.toggle_menu();
    assert!(nav.menu_open());
    nav.on_scroll(120.0);
    assert!(nav.header_compact());
    nav.link_clicked();
    assert!(!nav.menu_open());
}
