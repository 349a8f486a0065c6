pub mod camera;
pub mod globe_gpu;
pub mod i18n;
pub mod mesh;
pub mod nav;
pub mod page;
pub mod renderer;
pub mod scene;
