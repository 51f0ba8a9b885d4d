//! Resampling between the lat-long panorama and the six cube faces.

use crate::error::{EnvironmentError, Representation, Result};
use crate::face::{CubeFace, CUBE_FACE_COUNT};
use crate::image2d::Image2D;
use crate::projection::{dir_to_equirect, dir_to_face, equirect_to_dir, face_to_dir};
use glam::{Vec2, Vec3};

pub const LAT_LONG_COLUMNS: u32 = 4;
pub const LAT_LONG_ROWS: u32 = 2;

/// Six equally sized faces in [`CubeFace`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeFaceSet {
    faces: [Image2D; CUBE_FACE_COUNT],
}

impl CubeFaceSet {
    pub fn new(faces: [Image2D; CUBE_FACE_COUNT]) -> Result<Self> {
        let expected = faces[0].size();
        if expected.0 == 0 || expected.1 == 0 {
            return Err(EnvironmentError::DimensionMismatch {
                layout: Representation::CubeFaces,
                width: expected.0,
                height: expected.1,
                columns: 1,
                rows: 1,
            });
        }
        for (face, image) in CubeFace::ALL.iter().zip(faces.iter()) {
            if image.size() != expected {
                return Err(EnvironmentError::FaceSizeMismatch { face: *face, expected, found: image.size() });
            }
        }
        Ok(Self { faces })
    }

    pub fn from_vec(faces: Vec<Image2D>) -> Result<Self> {
        let count = faces.len();
        let faces: [Image2D; CUBE_FACE_COUNT] =
            faces.try_into().map_err(|_| EnvironmentError::FaceCount(count))?;
        Self::new(faces)
    }

    pub fn face(&self, face: CubeFace) -> &Image2D {
        &self.faces[face.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (CubeFace, &Image2D)> {
        CubeFace::ALL.into_iter().zip(self.faces.iter())
    }

    pub fn face_size(&self) -> (u32, u32) {
        self.faces[0].size()
    }

    /// Bilinear lookup on the face struck by `dir`.
    pub fn sample(&self, dir: Vec3) -> Vec3 {
        let (face, uv) = dir_to_face(dir);
        self.face(face).sample(uv.x, uv.y)
    }
}

pub fn sample_lat_long(image: &Image2D, dir: Vec3) -> Vec3 {
    let uv = dir_to_equirect(dir);
    image.sample(uv.x, uv.y)
}

/// Resamples a lat-long panorama into six faces of `width/4 x height/2`. With `strict` set
/// the panorama must be a non-zero multiple of 4x2; otherwise the face size is truncated.
pub fn lat_long_to_faces(lat_long: &Image2D, strict: bool) -> Result<CubeFaceSet> {
    let (width, height) = lat_long.size();
    let face_w = width / LAT_LONG_COLUMNS;
    let face_h = height / LAT_LONG_ROWS;
    let uneven = width % LAT_LONG_COLUMNS != 0 || height % LAT_LONG_ROWS != 0;
    if face_w == 0 || face_h == 0 || (strict && uneven) {
        return Err(EnvironmentError::DimensionMismatch {
            layout: Representation::LatLong,
            width,
            height,
            columns: LAT_LONG_COLUMNS,
            rows: LAT_LONG_ROWS,
        });
    }

    let faces = CubeFace::ALL.map(|face| {
        Image2D::from_fn(face_w, face_h, |x, y| {
            let dir = face_to_dir(face, signed_coord(x, face_w), signed_coord(y, face_h));
            sample_lat_long(lat_long, dir)
        })
    });
    CubeFaceSet::new(faces)
}

/// Resamples six faces into a `4*face_w x 2*face_h` lat-long panorama.
pub fn faces_to_lat_long(faces: &CubeFaceSet) -> Image2D {
    let (face_w, face_h) = faces.face_size();
    let width = face_w * LAT_LONG_COLUMNS;
    let height = face_h * LAT_LONG_ROWS;
    Image2D::from_fn(width, height, |x, y| {
        let dir = equirect_to_dir(Vec2::new(unit_coord(x, width), unit_coord(y, height)));
        faces.sample(dir)
    })
}

/// `i / (n - 1)`, collapsing to 0 on a single-texel axis.
fn unit_coord(i: u32, n: u32) -> f32 {
    if n <= 1 {
        0.0
    } else {
        i as f32 / (n - 1) as f32
    }
}

/// `i / (n - 1) * 2 - 1`, with a single-texel axis mapped to the face centre.
fn signed_coord(i: u32, n: u32) -> f32 {
    if n <= 1 {
        0.0
    } else {
        unit_coord(i, n) * 2.0 - 1.0
    }
}
