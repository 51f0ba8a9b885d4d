use crate::codec::{self, EncodeOptions};
use crate::config::EngineConfig;
use crate::convert::{faces_to_lat_long, lat_long_to_faces, sample_lat_long, CubeFaceSet};
use crate::cross::{cross_to_faces, faces_to_cross};
use crate::error::{EnvironmentError, Representation, Result};
use crate::face::{CubeFace, CUBE_FACE_COUNT};
use crate::image2d::Image2D;
use glam::Vec3;
use std::path::{Path, PathBuf};

/// Which representation answers a direction query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSource {
    Cube,
    LatLong,
}

/// Holds one environment in all three layouts. Every successful load replaces the whole set;
/// a failed load leaves the previous set untouched.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentImage {
    config: EngineConfig,
    maps: Option<EnvironmentMaps>,
}

#[derive(Debug, Clone)]
struct EnvironmentMaps {
    lat_long: Image2D,
    cube_cross: Image2D,
    cube_faces: CubeFaceSet,
}

impl EnvironmentImage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config, maps: None }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    pub fn load_lat_long(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let image = codec::decode(path.as_ref())?;
        self.set_lat_long(image)
    }

    pub fn load_cube_cross(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let image = codec::decode(path.as_ref())?;
        self.set_cube_cross(image)
    }

    /// Decodes six face images given in [`CubeFace`] order.
    pub fn load_cube_faces<P: AsRef<Path>>(&mut self, paths: &[P; CUBE_FACE_COUNT]) -> Result<()> {
        let mut faces = Vec::with_capacity(CUBE_FACE_COUNT);
        for path in paths {
            faces.push(codec::decode(path.as_ref())?);
        }
        self.set_cube_faces(CubeFaceSet::from_vec(faces)?);
        Ok(())
    }

    /// Loads `{stem}_px{ext}` .. `{stem}_nz{ext}` next to `base`, the naming
    /// [`Self::save_cube_faces`] writes.
    pub fn load_cube_faces_from(&mut self, base: impl AsRef<Path>) -> Result<()> {
        let paths = cube_face_paths(base.as_ref());
        self.load_cube_faces(&paths)
    }

    pub fn set_lat_long(&mut self, image: Image2D) -> Result<()> {
        let cube_faces = lat_long_to_faces(&image, self.config.import.strict_dimensions)?;
        let cube_cross = faces_to_cross(&cube_faces);
        self.maps = Some(EnvironmentMaps { lat_long: image, cube_cross, cube_faces });
        Ok(())
    }

    pub fn set_cube_cross(&mut self, image: Image2D) -> Result<()> {
        let cube_faces = cross_to_faces(&image, self.config.import.strict_dimensions)?;
        let lat_long = faces_to_lat_long(&cube_faces);
        self.maps = Some(EnvironmentMaps { lat_long, cube_cross: image, cube_faces });
        Ok(())
    }

    pub fn set_cube_faces(&mut self, cube_faces: CubeFaceSet) {
        let cube_cross = faces_to_cross(&cube_faces);
        let lat_long = faces_to_lat_long(&cube_faces);
        self.maps = Some(EnvironmentMaps { lat_long, cube_cross, cube_faces });
    }

    pub fn save_lat_long(&self, path: impl AsRef<Path>) -> Result<()> {
        let image = self.lat_long().ok_or(EnvironmentError::NotLoaded(Representation::LatLong))?;
        codec::encode(path.as_ref(), image, &self.encode_options())
    }

    pub fn save_cube_cross(&self, path: impl AsRef<Path>) -> Result<()> {
        let image = self.cube_cross().ok_or(EnvironmentError::NotLoaded(Representation::CubeCross))?;
        codec::encode(path.as_ref(), image, &self.encode_options())
    }

    /// Writes one file per face with the `_px`.. `_nz` suffix. Stops at the first failure, so
    /// earlier faces may already be on disk.
    pub fn save_cube_faces(&self, path: impl AsRef<Path>) -> Result<()> {
        let faces = self.cube_faces().ok_or(EnvironmentError::NotLoaded(Representation::CubeFaces))?;
        let path = path.as_ref();
        if !codec::is_supported_file(path) {
            return Err(EnvironmentError::UnsupportedFormat { path: path.to_path_buf() });
        }
        let options = self.encode_options();
        for ((_, image), face_path) in faces.iter().zip(cube_face_paths(path)) {
            codec::encode(&face_path, image, &options)?;
        }
        Ok(())
    }

    pub fn free(&mut self) {
        self.maps = None;
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_none()
    }

    pub fn lat_long(&self) -> Option<&Image2D> {
        self.maps.as_ref().map(|maps| &maps.lat_long)
    }

    pub fn cube_cross(&self) -> Option<&Image2D> {
        self.maps.as_ref().map(|maps| &maps.cube_cross)
    }

    pub fn cube_faces(&self) -> Option<&CubeFaceSet> {
        self.maps.as_ref().map(|maps| &maps.cube_faces)
    }

    pub fn lat_long_size(&self) -> (u32, u32) {
        self.lat_long().map(Image2D::size).unwrap_or((0, 0))
    }

    pub fn cube_cross_size(&self) -> (u32, u32) {
        self.cube_cross().map(Image2D::size).unwrap_or((0, 0))
    }

    pub fn cube_face_size(&self) -> (u32, u32) {
        self.cube_faces().map(CubeFaceSet::face_size).unwrap_or((0, 0))
    }

    pub fn sample_cube(&self, dir: Vec3) -> Option<Vec3> {
        self.cube_faces().map(|faces| faces.sample(dir))
    }

    pub fn sample_lat_long(&self, dir: Vec3) -> Option<Vec3> {
        self.lat_long().map(|image| sample_lat_long(image, dir))
    }

    pub fn sample(&self, dir: Vec3, source: SampleSource) -> Option<Vec3> {
        match source {
            SampleSource::Cube => self.sample_cube(dir),
            SampleSource::LatLong => self.sample_lat_long(dir),
        }
    }

    fn encode_options(&self) -> EncodeOptions {
        self.config.export.encode_options()
    }
}

/// `dir/sky.png` -> `dir/sky_px.png`, `dir/sky_nx.png`, ... in [`CubeFace`] order.
pub fn cube_face_paths(base: &Path) -> [PathBuf; CUBE_FACE_COUNT] {
    let parent = base.parent().unwrap_or_else(|| Path::new(""));
    let stem = base.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let ext = base.extension().map(|ext| format!(".{}", ext.to_string_lossy())).unwrap_or_default();
    CubeFace::ALL.map(|face| parent.join(format!("{stem}{}{ext}", face.suffix())))
}
