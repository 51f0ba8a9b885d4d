//! Packing of the six cube faces into a 3x4 vertical cross and back.
//!
//! Both directions are exact pixel copies. The `-Z` tile is stored rotated by 180 degrees so
//! that it reads correctly when the cross is folded into a cube.

use crate::convert::CubeFaceSet;
use crate::error::{EnvironmentError, Representation, Result};
use crate::face::{CubeFace, CUBE_FACE_COUNT};
use crate::image2d::Image2D;
use glam::Vec3;

pub const CROSS_COLUMNS: u32 = 3;
pub const CROSS_ROWS: u32 = 4;

pub fn faces_to_cross(faces: &CubeFaceSet) -> Image2D {
    let (face_w, face_h) = faces.face_size();
    let cross_w = face_w * CROSS_COLUMNS;
    let cross_h = face_h * CROSS_ROWS;
    let mut cross = Image2D::filled(cross_w, cross_h, Vec3::ZERO);

    for face in CubeFace::ALL {
        let layout = face.layout();
        let (tile_x, tile_y) = layout.cross_tile;
        let (off_x, off_y) = (tile_x * face_w, tile_y * face_h);
        let src = faces.face(face);
        for y in 0..face_h {
            for x in 0..face_w {
                let (dx, dy) = tile_position(x, y, face_w, face_h, layout.cross_rotated);
                cross.set_pixel(off_x + dx, off_y + dy, src.pixel(x, y));
            }
        }
    }
    cross
}

/// Splits a cross image into its faces. With `strict` set the cross must be a non-zero
/// multiple of 3x4; otherwise trailing columns/rows are ignored.
pub fn cross_to_faces(cross: &Image2D, strict: bool) -> Result<CubeFaceSet> {
    let (cross_w, cross_h) = cross.size();
    let face_w = cross_w / CROSS_COLUMNS;
    let face_h = cross_h / CROSS_ROWS;
    let uneven = cross_w % CROSS_COLUMNS != 0 || cross_h % CROSS_ROWS != 0;
    if face_w == 0 || face_h == 0 || (strict && uneven) {
        return Err(EnvironmentError::DimensionMismatch {
            layout: Representation::CubeCross,
            width: cross_w,
            height: cross_h,
            columns: CROSS_COLUMNS,
            rows: CROSS_ROWS,
        });
    }

    let mut faces = Vec::with_capacity(CUBE_FACE_COUNT);
    for face in CubeFace::ALL {
        let layout = face.layout();
        let (tile_x, tile_y) = layout.cross_tile;
        let (off_x, off_y) = (tile_x * face_w, tile_y * face_h);
        let image = Image2D::from_fn(face_w, face_h, |x, y| {
            let (sx, sy) = tile_position(x, y, face_w, face_h, layout.cross_rotated);
            cross.pixel(off_x + sx, off_y + sy)
        });
        faces.push(image);
    }
    CubeFaceSet::from_vec(faces)
}

/// Position of face texel `(x, y)` inside its tile. A 180 degree turn is its own inverse,
/// so packing and unpacking share this.
fn tile_position(x: u32, y: u32, face_w: u32, face_h: u32, rotated: bool) -> (u32, u32) {
    if rotated {
        (face_w - 1 - x, face_h - 1 - y)
    } else {
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distinct_faces(size: u32) -> CubeFaceSet {
        let faces = CubeFace::ALL
            .iter()
            .map(|face| {
                Image2D::from_fn(size, size, |x, y| Vec3::new(face.index() as f32, x as f32, y as f32))
            })
            .collect();
        CubeFaceSet::from_vec(faces).expect("six faces")
    }

    #[test]
    fn pack_places_faces_on_their_tiles() {
        let faces = distinct_faces(2);
        let cross = faces_to_cross(&faces);
        assert_eq!(cross.size(), (6, 8));
        // +X at tile (2,1), unrotated.
        assert_eq!(cross.pixel(4, 2), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(cross.pixel(5, 3), Vec3::new(0.0, 1.0, 1.0));
        // +Y at tile (1,0).
        assert_eq!(cross.pixel(3, 0), Vec3::new(2.0, 1.0, 0.0));
        // Unused corners stay black.
        assert_eq!(cross.pixel(0, 0), Vec3::ZERO);
        assert_eq!(cross.pixel(5, 7), Vec3::ZERO);
    }

    #[test]
    fn back_face_is_rotated_half_a_turn() {
        let faces = distinct_faces(2);
        let cross = faces_to_cross(&faces);
        // -Z tile spans x 2..4, y 6..8; its top-left holds the face's bottom-right texel.
        assert_eq!(cross.pixel(2, 6), Vec3::new(5.0, 1.0, 1.0));
        assert_eq!(cross.pixel(3, 6), Vec3::new(5.0, 0.0, 1.0));
        assert_eq!(cross.pixel(2, 7), Vec3::new(5.0, 1.0, 0.0));
        assert_eq!(cross.pixel(3, 7), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn unpack_inverts_pack_exactly() {
        for size in [1, 2, 5] {
            let faces = distinct_faces(size);
            let cross = faces_to_cross(&faces);
            let back = cross_to_faces(&cross, true).expect("unpack");
            assert_eq!(back, faces, "size {size}");
        }
    }

    #[test]
    fn unpack_handles_non_square_faces() {
        let faces = CubeFace::ALL
            .iter()
            .map(|face| Image2D::from_fn(3, 2, |x, y| Vec3::new(face.index() as f32, x as f32, y as f32)))
            .collect();
        let faces = CubeFaceSet::from_vec(faces).expect("six faces");
        let cross = faces_to_cross(&faces);
        assert_eq!(cross.size(), (9, 8));
        assert_eq!(cross_to_faces(&cross, true).expect("unpack"), faces);
    }

    #[test]
    fn strict_unpack_rejects_uneven_cross() {
        let cross = Image2D::filled(7, 8, Vec3::ONE);
        let err = cross_to_faces(&cross, true).unwrap_err();
        assert!(matches!(
            err,
            EnvironmentError::DimensionMismatch { layout: Representation::CubeCross, width: 7, height: 8, .. }
        ));
        let faces = cross_to_faces(&cross, false).expect("lenient unpack truncates");
        assert_eq!(faces.face_size(), (2, 2));
    }

    #[test]
    fn unpack_rejects_cross_smaller_than_one_tile() {
        let cross = Image2D::filled(2, 8, Vec3::ONE);
        assert!(cross_to_faces(&cross, false).is_err());
    }
}
