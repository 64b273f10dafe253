use std::path::PathBuf;

use thiserror::Error;

/// 网格坐标越界：属于调用方违约，而非用户可见错误
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("pixel ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange { x: u32, y: u32, width: u32, height: u32 },
}

/// 十六进制颜色文本解析失败（编辑器会静默忽略）
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("colour text must be exactly 6 characters, got {0}")]
    Length(usize),
    #[error("colour text {0:?} is not hexadecimal RGB")]
    InvalidDigits(String),
}

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Gif(#[from] gif::DecodingError),
    #[error("GIF has no frames")]
    NoFrames,
    #[error("cannot pick an image format from {0}")]
    UnsupportedExtension(PathBuf),
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    ImageIo(#[from] ImageIoError),
}
