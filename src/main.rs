// main.rs — 入口：导航页面 + 背景 globe 动画

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // 在 Release 模式下隐藏控制台窗口

use globe_viewer::i18n;
use globe_viewer::nav::NavigationController;
use globe_viewer::page::Page;
use globe_viewer::renderer::Renderer;
use globe_viewer::scene::GlobeView;

use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, WindowBuilder},
};

use std::sync::Arc;
use std::time::Instant;

fn main() {
    env_logger::init();

    // i18n
    let current_lang = i18n::resolve_lang_from_args();
    i18n::init(current_lang);

    let event_loop = EventLoop::new();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(&i18n::tr("app.title"))
            .with_inner_size(LogicalSize::new(1280, 720))
            .build(&event_loop)
            .unwrap(),
    );

    let mut renderer = pollster::block_on(Renderer::new(window.clone()));

    // 页面结构与交互组件各自独立初始化
    let page = Page::landing();
    let mut nav = NavigationController::new();

    let size = window.inner_size();
    let mut globe = GlobeView::mount(&page, size.width, size.height);
    let globe_gpu = globe.as_ref().map(|g| renderer.create_globe_gpu(g));
    match &globe {
        Some(_) => log::info!("{}", i18n::tr("log.globe_mounted")),
        None => log::info!("{}", i18n::tr("log.globe_slot_missing")),
    }

    // UI 状态
    let mut is_fullscreen = false;
    let mut show_fps = false;
    let mut scroll_offset = 0.0f32;
    let mut pending_anchor: Option<String> = None;

    // FPS 计算
    let mut last_frame_time = Instant::now();
    let mut frame_count = 0;
    let mut fps = 0.0;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => {
                // 先让 egui 处理事件
                let response = renderer.egui_state.on_event(&renderer.egui_ctx, &event);
                if response.consumed {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                    }

                    WindowEvent::Resized(new_size) => {
                        renderer.resize(new_size);
                        if let Some(g) = globe.as_mut() {
                            g.resize(new_size.width, new_size.height);
                        }
                    }

                    // 键盘快捷键
                    WindowEvent::KeyboardInput { input, .. } => {
                        if input.state == ElementState::Pressed {
                            match input.virtual_keycode {
                                Some(VirtualKeyCode::F11) => {
                                    is_fullscreen = !is_fullscreen;
                                    if is_fullscreen {
                                        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
                                    } else {
                                        window.set_fullscreen(None);
                                    }
                                }
                                Some(VirtualKeyCode::F) => {
                                    show_fps = !show_fps;
                                }
                                _ => {}
                            }
                        }
                    }

                    _ => {}
                }
            }

            Event::RedrawRequested(_) => {
                // FPS 统计
                frame_count += 1;
                let now = Instant::now();
                if now.duration_since(last_frame_time).as_secs_f32() >= 1.0 {
                    fps = frame_count as f32 / now.duration_since(last_frame_time).as_secs_f32();
                    frame_count = 0;
                    last_frame_time = now;
                }

                // 帧调度信号到达：先推进旋转，再渲染
                if let Some(g) = globe.as_mut() {
                    g.advance_frame();
                }

                let render_result = renderer.render_with_ui(
                    &window,
                    globe.as_ref().zip(globe_gpu.as_ref()),
                    |ctx| {
                        draw_ui(
                            ctx,
                            &page,
                            &mut nav,
                            &mut scroll_offset,
                            &mut pending_anchor,
                            show_fps,
                            fps,
                        );
                    },
                );

                match render_result {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => renderer.resize(renderer.size),
                    Err(wgpu::SurfaceError::OutOfMemory) => *control_flow = ControlFlow::Exit,
                    Err(e) => log::error!("Render error: {:?}", e),
                }
            }

            Event::MainEventsCleared => {
                window.request_redraw();
            }

            _ => {}
        }
    });
}

fn draw_ui(
    ctx: &egui::Context,
    page: &Page,
    nav: &mut NavigationController,
    scroll_offset: &mut f32,
    pending_anchor: &mut Option<String>,
    show_fps: bool,
    fps: f32,
) {
    // 用上一帧记录的滚动偏移判定头部形态，每帧重判，不防抖
    nav.on_scroll(*scroll_offset);

    let mut header_frame = egui::Frame::none()
        .fill(egui::Color32::from_rgb(13, 20, 33))
        .inner_margin(egui::Margin::symmetric(24.0, nav.header_padding()));
    if nav.header_has_shadow() {
        header_frame.shadow = egui::epaint::Shadow {
            extrusion: 10.0,
            color: egui::Color32::from_black_alpha(26),
        };
    }

    egui::TopBottomPanel::top("header")
        .frame(header_frame)
        .show_separator_line(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new(i18n::tr("app.title"))
                        .color(egui::Color32::WHITE)
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("☰").clicked() {
                        nav.toggle_menu();
                    }
                });
            });

            // 展开的导航菜单；点击链接后收起并滚到对应区块
            if nav.menu_open() {
                ui.separator();
                for link in &page.nav_links {
                    if ui.link(i18n::tr(&link.label_key)).clicked() {
                        nav.link_clicked();
                        *pending_anchor = Some(link.anchor.clone());
                    }
                }
            }
        });

    egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(i18n::tr("footer.note"));
            if show_fps {
                ui.label("|");
                ui.label(
                    egui::RichText::new(format!("FPS: {:.1}", fps)).color(egui::Color32::GREEN),
                );
            }
        });
    });

    // 内容面板透明，让背后的 globe 透出来
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let output = egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(24.0);
                for section in &page.sections {
                    let title = ui.heading(
                        egui::RichText::new(i18n::tr(&section.title_key))
                            .size(28.0)
                            .color(egui::Color32::WHITE),
                    );
                    if pending_anchor.as_deref() == Some(section.anchor.as_str()) {
                        title.scroll_to_me(Some(egui::Align::TOP));
                        *pending_anchor = None;
                    }
                    ui.label(i18n::tr(&section.body_key));
                    // 区块之间留出大段空白，页面才有足够的滚动距离
                    ui.add_space(320.0);
                }
            });
            *scroll_offset = output.state.offset.y;
        });
}
