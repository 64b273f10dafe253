use std::path::PathBuf;

use log::{debug, error, info, warn};

use crate::color::{self, Rgba};
use crate::config::{EditorConfig, ImportMode};
use crate::error::EditorError;
use crate::grid::PixelGrid;
use crate::image_io;
use crate::resolution::Resolution;

/// 来自界面的一次用户操作
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// 按选定分辨率新建（丢弃旧网格）
    New(Resolution),
    /// 画布上的点击/拖动：位置与画布尺寸都在画布像素空间
    Paint { x: f32, y: f32, canvas_width: f32, canvas_height: f32 },
    /// None 表示用户取消了对话框
    Open(Option<PathBuf>),
    Save(Option<PathBuf>),
    /// 颜色输入框的当前文本
    ColorText(String),
}

/// 操作完成后界面需要知道的结果
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Unchanged,
    Redraw,
    Opened { path: PathBuf, resolution: Resolution },
    Saved { path: PathBuf, format: String },
}

/// 编辑会话：独占当前网格、画笔颜色与分辨率
pub struct Session {
    resolution: Resolution,
    paint_color: Rgba,
    grid: PixelGrid,
    import_mode: ImportMode,
}

impl Session {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            resolution: config.default_resolution,
            paint_color: config.default_paint_color,
            grid: PixelGrid::new(config.default_resolution),
            import_mode: config.import_mode,
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn paint_color(&self) -> Rgba {
        self.paint_color
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn import_mode(&self) -> ImportMode {
        self.import_mode
    }

    pub fn set_import_mode(&mut self, mode: ImportMode) {
        self.import_mode = mode;
    }

    /// 执行一条命令；失败时会话状态保持不变
    pub fn apply(&mut self, command: Command) -> Result<Outcome, EditorError> {
        match command {
            Command::New(resolution) => {
                self.resolution = resolution;
                self.grid = PixelGrid::new(resolution);
                info!("new {} sprite", resolution.label());
                Ok(Outcome::Redraw)
            }
            Command::Paint { x, y, canvas_width, canvas_height } => {
                let Some((cx, cy)) = self.grid.cell_at(x, y, canvas_width, canvas_height) else {
                    return Ok(Outcome::Unchanged);
                };
                if self.grid.get_pixel(cx, cy)? == self.paint_color {
                    return Ok(Outcome::Unchanged);
                }
                self.grid.set_pixel(cx, cy, self.paint_color)?;
                debug!("painted ({cx}, {cy}) with #{}", color::to_hex_rgb(self.paint_color));
                Ok(Outcome::Redraw)
            }
            Command::Open(None) | Command::Save(None) => Ok(Outcome::Unchanged),
            Command::Open(Some(path)) => {
                let source = image_io::load_rgba(&path).inspect_err(|e| error!("failed to open {}: {e}", path.display()))?;
                let (resolution, grid) = self.import(&source);
                self.resolution = resolution;
                self.grid = grid;
                info!("opened {} as {}", path.display(), resolution.label());
                Ok(Outcome::Opened { path, resolution })
            }
            Command::Save(Some(path)) => {
                let format = image_io::export(&self.grid, &path)
                    .inspect_err(|e| error!("failed to export image to {}: {e}", path.display()))?;
                let format = format.extensions_str().first().copied().unwrap_or("image").to_owned();
                info!("exported image with format {format} to {}", path.display());
                Ok(Outcome::Saved { path, format })
            }
            Command::ColorText(text) => match color::parse_hex_rgb(&text) {
                Ok(c) if c != self.paint_color => {
                    self.paint_color = c;
                    Ok(Outcome::Redraw)
                }
                Ok(_) => Ok(Outcome::Unchanged),
                Err(e) => {
                    debug!("ignoring colour text {text:?}: {e}");
                    Ok(Outcome::Unchanged)
                }
            },
        }
    }

    /// 推断最接近的分辨率后构建网格
    fn import(&self, source: &image::RgbaImage) -> (Resolution, PixelGrid) {
        let resolution = Resolution::nearest(source.width(), source.height());
        let side = resolution.side();
        if source.dimensions() == (side, side) {
            return (resolution, PixelGrid::sample_from(resolution, source));
        }
        match self.import_mode {
            ImportMode::Sample => {
                warn!(
                    "{}x{} image sampled into {} without scaling",
                    source.width(),
                    source.height(),
                    resolution.label()
                );
                (resolution, PixelGrid::sample_from(resolution, source))
            }
            ImportMode::Rescale => {
                let resized = image::imageops::resize(source, side, side, image::imageops::Nearest);
                (resolution, PixelGrid::sample_from(resolution, &resized))
            }
        }
    }
}
