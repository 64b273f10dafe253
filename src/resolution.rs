/// 编辑器支持的固定分辨率（正方形）
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Resolution {
    #[default]
    X16,
    X32,
    X64,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::X16, Resolution::X32, Resolution::X64];

    /// 每条边的像素数
    pub const fn side(self) -> u32 {
        match self {
            Resolution::X16 => 16,
            Resolution::X32 => 32,
            Resolution::X64 => 64,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Resolution::X16 => "16x16",
            Resolution::X32 => "32x32",
            Resolution::X64 => "64x64",
        }
    }

    /// 为任意尺寸的外部图片挑选最接近的分辨率。
    /// 按 16 → 32 → 64 顺序比较平均边长，平局偏向较小者。
    pub fn nearest(width: u32, height: u32) -> Self {
        let average = (width as f64 + height as f64) / 2.0;
        let mut chosen = Resolution::X16;
        if (average - 32.0).abs() < (average - 16.0).abs() {
            chosen = Resolution::X32;
        }
        if (average - 64.0).abs() < (average - 32.0).abs() {
            chosen = Resolution::X64;
        }
        chosen
    }
}
