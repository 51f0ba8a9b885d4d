//! Headless staging for GPU upload.
//!
//! The engine never touches a graphics API. A UI layer implements [`TextureUploader`] for its
//! backend and calls [`EnvironmentImage::upload_with`] after a successful load; the texel data
//! arrives as tightly packed RGBA16F.

use crate::environment::EnvironmentImage;
use crate::image2d::Image2D;
use anyhow::{Context, Result};
use half::f16;

/// Bytes per RGBA16F texel.
pub const TEXEL_BYTES: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    LatLong,
    CubeCross,
    /// Six layers in `CubeFace` order, matching the +X, -X, +Y, -Y, +Z, -Z layer convention of
    /// cube textures.
    CubeMap,
}

impl TextureKind {
    pub fn label(self) -> &'static str {
        match self {
            TextureKind::LatLong => "Environment LatLong",
            TextureKind::CubeCross => "Environment Cube Cross",
            TextureKind::CubeMap => "Environment Cube",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StagedTexture {
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
    pub layers: u32,
    /// RGBA16F bits, layer-major then row-major.
    pub texels: Vec<u16>,
}

impl StagedTexture {
    pub fn bytes_per_row(&self) -> u32 {
        self.width * TEXEL_BYTES
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }

    /// Bytes of one layer, or `None` past the last layer.
    pub fn layer_bytes(&self, layer: u32) -> Option<&[u8]> {
        if layer >= self.layers {
            return None;
        }
        let layer_len = self.bytes_per_row() as usize * self.height as usize;
        let start = layer as usize * layer_len;
        self.as_bytes().get(start..start + layer_len)
    }
}

pub trait TextureUploader {
    type Handle;

    fn upload(&mut self, kind: TextureKind, texture: &StagedTexture) -> Result<Self::Handle>;
}

#[derive(Debug)]
pub struct UploadedTextures<H> {
    pub lat_long: H,
    pub cube_cross: H,
    pub cube_map: H,
}

fn push_rgba16f(texels: &mut Vec<u16>, image: &Image2D) {
    for pixel in image.pixels() {
        texels.extend(pixel.extend(1.0).to_array().map(|value| f16::from_f32(value).to_bits()));
    }
}

fn stage_image(kind: TextureKind, image: &Image2D) -> StagedTexture {
    let mut texels = Vec::with_capacity(image.pixels().len() * 4);
    push_rgba16f(&mut texels, image);
    StagedTexture { label: kind.label(), width: image.width(), height: image.height(), layers: 1, texels }
}

impl EnvironmentImage {
    pub fn stage(&self, kind: TextureKind) -> Option<StagedTexture> {
        match kind {
            TextureKind::LatLong => self.lat_long().map(|image| stage_image(kind, image)),
            TextureKind::CubeCross => self.cube_cross().map(|image| stage_image(kind, image)),
            TextureKind::CubeMap => self.cube_faces().map(|faces| {
                let (width, height) = faces.face_size();
                let mut texels = Vec::with_capacity(width as usize * height as usize * 4 * 6);
                for (_, image) in faces.iter() {
                    push_rgba16f(&mut texels, image);
                }
                StagedTexture { label: kind.label(), width, height, layers: 6, texels }
            }),
        }
    }

    /// Stages and uploads all three representations. Returns `Ok(None)` when nothing is loaded.
    pub fn upload_with<U: TextureUploader>(
        &self,
        uploader: &mut U,
    ) -> Result<Option<UploadedTextures<U::Handle>>> {
        if self.is_empty() {
            return Ok(None);
        }
        let mut upload = |kind: TextureKind| -> Result<U::Handle> {
            let staged = self.stage(kind).with_context(|| format!("{} is not loaded", kind.label()))?;
            uploader.upload(kind, &staged).with_context(|| format!("Failed to upload {}", kind.label()))
        };
        Ok(Some(UploadedTextures {
            lat_long: upload(TextureKind::LatLong)?,
            cube_cross: upload(TextureKind::CubeCross)?,
            cube_map: upload(TextureKind::CubeMap)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::CubeFace;
    use glam::Vec3;

    #[derive(Default)]
    struct RecordingUploader {
        calls: Vec<(TextureKind, u32, u32, u32, usize)>,
        fail_on: Option<TextureKind>,
    }

    impl TextureUploader for RecordingUploader {
        type Handle = usize;

        fn upload(&mut self, kind: TextureKind, texture: &StagedTexture) -> Result<usize> {
            if self.fail_on == Some(kind) {
                anyhow::bail!("device lost");
            }
            self.calls.push((kind, texture.width, texture.height, texture.layers, texture.as_bytes().len()));
            Ok(self.calls.len())
        }
    }

    fn loaded() -> EnvironmentImage {
        let mut env = EnvironmentImage::new();
        env.set_lat_long(Image2D::filled(8, 4, Vec3::new(0.5, 1.0, 2.0))).expect("set lat-long");
        env
    }

    #[test]
    fn staging_packs_rgba16f_with_opaque_alpha() {
        let staged = loaded().stage(TextureKind::LatLong).expect("lat-long staged");
        assert_eq!((staged.width, staged.height, staged.layers), (8, 4, 1));
        assert_eq!(staged.bytes_per_row(), 64);
        assert_eq!(staged.as_bytes().len(), 8 * 4 * 8);
        let first: Vec<f32> = staged.texels[..4].iter().map(|bits| f16::from_bits(*bits).to_f32()).collect();
        assert_eq!(first, vec![0.5, 1.0, 2.0, 1.0]);
    }

    #[test]
    fn cube_map_layers_follow_face_order() {
        let mut env = EnvironmentImage::new();
        let faces = CubeFace::ALL.map(|face| Image2D::filled(2, 2, Vec3::splat(face.index() as f32)));
        env.set_cube_faces(crate::convert::CubeFaceSet::new(faces).expect("faces"));
        let staged = env.stage(TextureKind::CubeMap).expect("cube staged");
        assert_eq!(staged.layers, 6);
        for face in CubeFace::ALL {
            let layer = staged.layer_bytes(face.index() as u32).expect("layer in range");
            let red: &[u16] = bytemuck::cast_slice(&layer[..2]);
            assert_eq!(f16::from_bits(red[0]).to_f32(), face.index() as f32);
        }
        assert!(staged.layer_bytes(6).is_none());
        let flat = loaded().stage(TextureKind::LatLong).expect("lat-long staged");
        assert_eq!(flat.layer_bytes(0).map(<[u8]>::len), Some(8 * 4 * 8));
        assert!(flat.layer_bytes(1).is_none());
    }

    #[test]
    fn upload_hands_every_representation_to_the_backend() {
        let env = loaded();
        let mut uploader = RecordingUploader::default();
        let handles = env.upload_with(&mut uploader).expect("upload").expect("loaded");
        assert_eq!((handles.lat_long, handles.cube_cross, handles.cube_map), (1, 2, 3));
        assert_eq!(uploader.calls[1], (TextureKind::CubeCross, 6, 8, 1, 6 * 8 * 8));
        assert_eq!(uploader.calls[2], (TextureKind::CubeMap, 2, 2, 6, 2 * 2 * 8 * 6));
    }

    #[test]
    fn upload_skips_empty_engine_and_reports_backend_errors() {
        let mut uploader = RecordingUploader::default();
        assert!(EnvironmentImage::new().upload_with(&mut uploader).expect("empty").is_none());
        assert!(uploader.calls.is_empty());

        uploader.fail_on = Some(TextureKind::CubeCross);
        let err = loaded().upload_with(&mut uploader).unwrap_err();
        assert!(format!("{err:?}").contains("device lost"));
    }
}
