use crate::face::CubeFace;
use std::fmt;
use std::path::PathBuf;

/// The three coexisting representations held by an [`crate::environment::EnvironmentImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    LatLong,
    CubeCross,
    CubeFaces,
}

impl Representation {
    pub fn label(self) -> &'static str {
        match self {
            Representation::LatLong => "lat-long",
            Representation::CubeCross => "cube cross",
            Representation::CubeFaces => "cube faces",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    #[error("I/O error on '{}': {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("failed to decode '{}': {source}", .path.display())]
    Decode { path: PathBuf, source: image::ImageError },
    #[error("failed to encode '{}': {source}", .path.display())]
    Encode { path: PathBuf, source: image::ImageError },
    #[error("unsupported image format for '{}' (expected .hdr, .bmp, .jpg, .tga or .png)", .path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("{layout} source is {width}x{height}; dimensions must be non-zero multiples of {columns}x{rows}")]
    DimensionMismatch { layout: Representation, width: u32, height: u32, columns: u32, rows: u32 },
    #[error("cube face {face} is {}x{}, expected {}x{}", .found.0, .found.1, .expected.0, .expected.1)]
    FaceSizeMismatch { face: CubeFace, expected: (u32, u32), found: (u32, u32) },
    #[error("expected 6 cube faces, got {0}")]
    FaceCount(usize),
    #[error("image of {width}x{height} cannot hold {len} pixels")]
    InvalidPixelCount { width: u32, height: u32, len: usize },
    #[error("{0} representation is not loaded")]
    NotLoaded(Representation),
}

pub type Result<T> = std::result::Result<T, EnvironmentError>;
