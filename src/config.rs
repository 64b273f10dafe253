use eframe::egui::Color32;

use crate::color::{BLACK, Rgba};
use crate::resolution::Resolution;

/// 打开的图片尺寸与推断分辨率不一致时的处理方式
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ImportMode {
    /// 按格子坐标直接取样，不缩放
    #[default]
    Sample,
    /// 先用最近邻缩放到目标分辨率
    Rescale,
}

#[derive(Clone, Debug)]
pub struct EditorConfig {
    pub title: String,
    /// 画布边长（逻辑像素），与网格分辨率无关
    pub canvas_size: f32,
    pub default_resolution: Resolution,
    pub default_paint_color: Rgba,
    /// 画布外的背景色，让白色画布更容易辨认
    pub backdrop: Color32,
    pub import_mode: ImportMode,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            title: "Sprite Editor".into(),
            canvas_size: 512.0,
            default_resolution: Resolution::X16,
            default_paint_color: BLACK,
            backdrop: Color32::from_rgb(0xe0, 0xe0, 0xe0),
            import_mode: ImportMode::Sample,
        }
    }
}
