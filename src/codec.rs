//! Image file adapters. Decoding accepts anything the `image` crate can sniff; encoding picks
//! the format from the file extension.

use crate::error::{EnvironmentError, Result};
use crate::image2d::Image2D;
use glam::Vec3;
use image::codecs::hdr::HdrEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader, Rgb, RgbImage};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// How float channels are reduced to 8 bits for LDR formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LdrConversion {
    /// `clamp(c * 255, 0, 255)`, truncated.
    #[default]
    Clamp,
    /// Truncate `c * 255` and keep the low eight bits; overexposed values wrap around.
    Wrap,
}

impl LdrConversion {
    pub fn label(self) -> &'static str {
        match self {
            LdrConversion::Clamp => "clamp",
            LdrConversion::Wrap => "wrap",
        }
    }

    pub fn to_u8(self, channel: f32) -> u8 {
        let scaled = channel * 255.0;
        match self {
            LdrConversion::Clamp => scaled.clamp(0.0, 255.0) as u8,
            LdrConversion::Wrap => ((scaled as i64) & 0xFF) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub jpeg_quality: u8,
    pub ldr_conversion: LdrConversion,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { jpeg_quality: DEFAULT_JPEG_QUALITY, ldr_conversion: LdrConversion::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Hdr,
    Bmp,
    Jpeg,
    Tga,
    Png,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|ext| ext.to_str())?.to_ascii_lowercase();
        match ext.as_str() {
            "hdr" => Some(FileFormat::Hdr),
            "bmp" => Some(FileFormat::Bmp),
            "jpg" | "jpeg" => Some(FileFormat::Jpeg),
            "tga" => Some(FileFormat::Tga),
            "png" => Some(FileFormat::Png),
            _ => None,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            FileFormat::Hdr => ImageFormat::Hdr,
            FileFormat::Bmp => ImageFormat::Bmp,
            FileFormat::Jpeg => ImageFormat::Jpeg,
            FileFormat::Tga => ImageFormat::Tga,
            FileFormat::Png => ImageFormat::Png,
        }
    }
}

pub fn is_supported_file(path: &Path) -> bool {
    FileFormat::from_path(path).is_some()
}

/// Decodes to f32 RGB. 8-bit sources map to `c / 255` with no gamma applied, so midtones come
/// out brighter than from loaders that raise LDR input to a 2.2 gamma (`stbi_loadf` does).
pub fn decode(path: &Path) -> Result<Image2D> {
    let io_err = |source| EnvironmentError::Io { path: path.to_path_buf(), source };
    let reader = ImageReader::open(path).map_err(io_err)?.with_guessed_format().map_err(io_err)?;
    let dyn_img =
        reader.decode().map_err(|source| EnvironmentError::Decode { path: path.to_path_buf(), source })?;
    convert_to_image2d(&dyn_img)
}

fn convert_to_image2d(image: &DynamicImage) -> Result<Image2D> {
    let rgb = image.to_rgb32f();
    let width = rgb.width();
    let height = rgb.height();
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for pixel in rgb.pixels() {
        let [r, g, b] = pixel.0;
        pixels.push(Vec3::new(r, g, b));
    }
    Image2D::new(width, height, pixels)
}

pub fn encode(path: &Path, image: &Image2D, options: &EncodeOptions) -> Result<()> {
    let format = FileFormat::from_path(path)
        .ok_or_else(|| EnvironmentError::UnsupportedFormat { path: path.to_path_buf() })?;
    let encode_err = |source| EnvironmentError::Encode { path: path.to_path_buf(), source };
    let io_err = |source| EnvironmentError::Io { path: path.to_path_buf(), source };

    match format {
        FileFormat::Hdr => {
            let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
            let texels: Vec<Rgb<f32>> = image.pixels().iter().map(|p| Rgb(p.to_array())).collect();
            HdrEncoder::new(&mut writer)
                .encode(&texels, image.width() as usize, image.height() as usize)
                .map_err(encode_err)?;
            writer.flush().map_err(io_err)
        }
        FileFormat::Jpeg => {
            let ldr = to_ldr(image, options.ldr_conversion)?;
            let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
            ldr.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, options.jpeg_quality))
                .map_err(encode_err)?;
            writer.flush().map_err(io_err)
        }
        FileFormat::Bmp | FileFormat::Tga | FileFormat::Png => {
            let ldr = to_ldr(image, options.ldr_conversion)?;
            ldr.save_with_format(path, format.image_format()).map_err(encode_err)
        }
    }
}

pub fn to_ldr(image: &Image2D, conversion: LdrConversion) -> Result<RgbImage> {
    let mut bytes = Vec::with_capacity(image.pixels().len() * 3);
    for pixel in image.pixels() {
        bytes.extend(pixel.to_array().map(|channel| conversion.to_u8(channel)));
    }
    let (width, height) = image.size();
    RgbImage::from_raw(width, height, bytes).ok_or(EnvironmentError::InvalidPixelCount {
        width,
        height,
        len: image.pixels().len(),
    })
}
