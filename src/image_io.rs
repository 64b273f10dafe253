use std::path::Path;

use image::{ImageFormat, ImageReader, RgbImage, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::color::flatten_rgb;
use crate::error::ImageIoError;
use crate::grid::PixelGrid;

/// 从磁盘加载图片为 RGBA8
/// - gif：取首帧，按逻辑屏幕尺寸铺到透明画布上（首帧可能只是子矩形）
/// - 其它：按文件内容自动识别格式
pub fn load_rgba(path: &Path) -> Result<RgbaImage, ImageIoError> {
    let io_err = |source| ImageIoError::Io { path: path.to_path_buf(), source };
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_ascii_lowercase();
    if ext == "gif" {
        let file = std::fs::File::open(path).map_err(io_err)?;
        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::RGBA);
        let mut decoder = options.read_info(file)?;
        let mut screen = RgbaImage::new(decoder.width() as u32, decoder.height() as u32);
        let frame = decoder.read_next_frame()?.ok_or(ImageIoError::NoFrames)?;
        let buf = frame.buffer.clone().into_owned();
        let sub = RgbaImage::from_raw(frame.width as u32, frame.height as u32, buf).ok_or(ImageIoError::NoFrames)?;
        image::imageops::replace(&mut screen, &sub, frame.left as i64, frame.top as i64);
        return Ok(screen);
    }
    let img = ImageReader::open(path).map_err(io_err)?.with_guessed_format().map_err(io_err)?.decode()?;
    Ok(img.to_rgba8())
}

/// 以网格原生尺寸离屏渲染（每个格子 1x1 像素）
pub fn render_native(grid: &PixelGrid) -> RgbaImage {
    let mut canvas = RgbaImage::new(grid.width(), grid.height());
    grid.render(grid.width() as f32, grid.height() as f32, |cell, color| {
        let rect = Rect::at(cell.x.round() as i32, cell.y.round() as i32)
            .of_size(cell.width.round().max(1.0) as u32, cell.height.round().max(1.0) as u32);
        draw_filled_rect_mut(&mut canvas, rect, color);
    });
    canvas
}

/// 导出网格：扩展名决定编码格式，alpha 被压平为 RGB
pub fn export(grid: &PixelGrid, path: &Path) -> Result<ImageFormat, ImageIoError> {
    let format = ImageFormat::from_path(path).map_err(|_| ImageIoError::UnsupportedExtension(path.to_path_buf()))?;
    let snapshot = render_native(grid);
    let rgb = RgbImage::from_fn(snapshot.width(), snapshot.height(), |x, y| flatten_rgb(*snapshot.get_pixel(x, y)));
    rgb.save_with_format(path, format)?;
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::Resolution;
    use test_log::test;

    fn painted_grid(resolution: Resolution) -> PixelGrid {
        let mut grid = PixelGrid::new(resolution);
        let side = resolution.side();
        for i in 0..side {
            grid.set_pixel(i, i, image::Rgba([255, 0, 0, 255])).unwrap();
            grid.set_pixel(side - 1 - i, i, image::Rgba([0, (i * 3) as u8, 200, 255])).unwrap();
        }
        grid.set_pixel(1, 0, image::Rgba([200, 100, 50, 0])).unwrap();
        grid
    }

    #[test]
    fn native_render_matches_grid() {
        let grid = painted_grid(Resolution::X32);
        let img = render_native(&grid);
        assert_eq!(img.dimensions(), (32, 32));
        for (x, y, px) in img.enumerate_pixels() {
            assert_eq!(*px, grid.get_pixel(x, y).unwrap());
        }
    }

    #[test]
    fn png_export_round_trips_at_native_resolution() {
        let grid = painted_grid(Resolution::X16);
        let path = std::env::temp_dir().join("sprite_editor_roundtrip.png");
        assert_eq!(export(&grid, &path).unwrap(), ImageFormat::Png);

        let written = image::open(&path).unwrap().to_rgb8();
        assert_eq!(written.dimensions(), (16, 16));
        for (x, y, px) in written.enumerate_pixels() {
            assert_eq!(*px, flatten_rgb(grid.get_pixel(x, y).unwrap()), "pixel ({x}, {y})");
        }
        // 透明格子压平为黑色
        assert_eq!(*written.get_pixel(1, 0), image::Rgb([0, 0, 0]));

        let reloaded = load_rgba(&path).unwrap();
        assert_eq!(reloaded.get_pixel(0, 0), &image::Rgba([255, 0, 0, 255]));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn bmp_export_uses_extension_as_format() {
        let grid = painted_grid(Resolution::X64);
        let path = std::env::temp_dir().join("sprite_editor_export.bmp");
        assert_eq!(export(&grid, &path).unwrap(), ImageFormat::Bmp);
        let written = image::open(&path).unwrap().to_rgb8();
        assert_eq!(*written.get_pixel(63, 0), flatten_rgb(grid.get_pixel(63, 0).unwrap()));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn export_rejects_unknown_extension() {
        let grid = PixelGrid::new(Resolution::X16);
        let path = std::env::temp_dir().join("sprite_editor_export.notanimage");
        assert!(matches!(export(&grid, &path), Err(ImageIoError::UnsupportedExtension(_))));
        assert!(!path.exists());

        let bare = std::env::temp_dir().join("sprite_editor_no_extension");
        assert!(matches!(export(&grid, &bare), Err(ImageIoError::UnsupportedExtension(_))));
    }

    #[test]
    fn loading_a_missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("sprite_editor_does_not_exist.png");
        assert!(matches!(load_rgba(&path), Err(ImageIoError::Io { .. })));
    }

    #[test]
    fn gif_sub_frame_is_placed_on_the_logical_screen() {
        let path = std::env::temp_dir().join("sprite_editor_subframe.gif");
        {
            let file = std::fs::File::create(&path).unwrap();
            let mut encoder = gif::Encoder::new(file, 32, 32, &[]).unwrap();
            // 32x32 逻辑屏幕上只有 (8, 8) 处的 16x16 红色子帧
            let frame = gif::Frame {
                left: 8,
                top: 8,
                width: 16,
                height: 16,
                palette: Some(vec![255, 0, 0]),
                buffer: std::borrow::Cow::Owned(vec![0u8; 16 * 16]),
                ..gif::Frame::default()
            };
            encoder.write_frame(&frame).unwrap();
        }

        let img = load_rgba(&path).unwrap();
        assert_eq!(img.dimensions(), (32, 32));
        assert_eq!(img.dimensions(), image::open(&path).unwrap().to_rgba8().dimensions());
        assert_eq!(*img.get_pixel(8, 8), image::Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(23, 23), image::Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(7, 7)[3], 0);
        assert_eq!(img.get_pixel(24, 24)[3], 0);
        assert_eq!(Resolution::nearest(img.width(), img.height()), Resolution::X32);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn gif_loads_first_frame() {
        let path = std::env::temp_dir().join("sprite_editor_frame.gif");
        image::RgbaImage::from_pixel(20, 12, image::Rgba([0, 0, 0, 255])).save(&path).unwrap();
        let img = load_rgba(&path).unwrap();
        assert_eq!(img.dimensions(), (20, 12));
        let _ = std::fs::remove_file(&path);
    }
}
