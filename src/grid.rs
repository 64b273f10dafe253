use crate::color::{Rgba, WHITE};
use crate::error::GridError;
use crate::resolution::Resolution;

/// 一个格子在画布像素空间中的矩形
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// 固定尺寸的像素网格：每个坐标恰好一个颜色，按行优先存储
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelGrid {
    /// 新建网格，所有格子为不透明白色
    pub fn new(resolution: Resolution) -> Self {
        let side = resolution.side();
        Self { width: side, height: side, pixels: vec![WHITE; (side * side) as usize] }
    }

    /// 按格子坐标逐点采样外部图片，不做缩放。
    /// 图片外的格子保持白色，网格外的源像素被丢弃。
    pub fn sample_from(resolution: Resolution, source: &image::RgbaImage) -> Self {
        let mut grid = Self::new(resolution);
        let w = source.width().min(grid.width);
        let h = source.height().min(grid.height);
        for y in 0..h {
            for x in 0..w {
                let i = grid.index(x, y);
                grid.pixels[i] = *source.get_pixel(x, y);
            }
        }
        grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    fn check(&self, x: u32, y: u32) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfRange { x, y, width: self.width, height: self.height });
        }
        Ok(self.index(x, y))
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Result<Rgba, GridError> {
        let i = self.check(x, y)?;
        Ok(self.pixels[i])
    }

    /// 只覆盖一个格子
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) -> Result<(), GridError> {
        let i = self.check(x, y)?;
        self.pixels[i] = color;
        Ok(())
    }

    /// 把整个网格画到任意大小的画布上：每个格子调用一次 `draw_cell`。
    /// 格子宽高 = 画布宽高 / 网格宽高，与画布物理尺寸解耦。
    pub fn render(&self, canvas_width: f32, canvas_height: f32, mut draw_cell: impl FnMut(CellRect, Rgba)) {
        let cell_w = canvas_width / self.width as f32;
        let cell_h = canvas_height / self.height as f32;
        for y in 0..self.height {
            for x in 0..self.width {
                let rect = CellRect { x: x as f32 * cell_w, y: y as f32 * cell_h, width: cell_w, height: cell_h };
                draw_cell(rect, self.pixels[self.index(x, y)]);
            }
        }
    }

    /// 画布上的点击位置 → 格子坐标。
    /// 画布外返回 None；画布边缘的浮点误差被夹回合法范围。
    pub fn cell_at(&self, px: f32, py: f32, canvas_width: f32, canvas_height: f32) -> Option<(u32, u32)> {
        if !(canvas_width > 0.0 && canvas_height > 0.0) {
            return None;
        }
        if !(0.0..=canvas_width).contains(&px) || !(0.0..=canvas_height).contains(&py) {
            return None;
        }
        let cell_w = canvas_width / self.width as f32;
        let cell_h = canvas_height / self.height as f32;
        let x = ((px / cell_w).floor() as u32).min(self.width - 1);
        let y = ((py / cell_h).floor() as u32).min(self.height - 1);
        Some((x, y))
    }
}
