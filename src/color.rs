use eframe::egui::Color32;

use crate::error::ColorError;

/// 网格中每个格子的颜色：8-bit RGBA，非预乘
pub type Rgba = image::Rgba<u8>;

pub const WHITE: Rgba = image::Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba = image::Rgba([0, 0, 0, 255]);

/// 解析颜色输入框中的文本：恰好 6 个字符（无 `#` 前缀）才尝试解析
/// 只认十六进制 RGB，"orange" 之类的颜色名同样被拒绝
pub fn parse_hex_rgb(text: &str) -> Result<Rgba, ColorError> {
    let len = text.chars().count();
    if len != 6 {
        return Err(ColorError::Length(len));
    }
    let channel = |i: usize| {
        text.get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .ok_or_else(|| ColorError::InvalidDigits(text.to_owned()))
    };
    Ok(image::Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}

pub fn to_hex_rgb(color: Rgba) -> String {
    format!("{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// 导出前去掉 alpha：与黑色底合成（不透明颜色保持不变）
#[inline]
pub fn flatten_rgb(color: Rgba) -> image::Rgb<u8> {
    let a = color[3] as u16;
    let mix = |c: u8| ((c as u16 * a + 127) / 255) as u8;
    image::Rgb([mix(color[0]), mix(color[1]), mix(color[2])])
}

#[inline]
pub fn to_color32(color: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(color[0], color[1], color[2], color[3])
}
