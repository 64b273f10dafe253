#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
use eframe::{NativeOptions, egui};

mod app;
mod color;
mod config;
mod editor;
mod error;
mod grid;
mod image_io;
mod resolution;

/// 程序入口：基于 eframe/egui 的桌面应用
fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::EditorConfig::default();
    let title = config.title.clone();
    // 左侧工具栏 + 画布 + 边距
    let inner = [config.canvas_size + 230.0, config.canvas_size + 80.0];
    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(inner).with_resizable(false),
        ..Default::default()
    };
    log::info!("starting {title}");
    eframe::run_native(
        &title,
        native_options,
        Box::new(|cc| Box::new(app::SpriteApp::new(cc, config))),
    )
}
