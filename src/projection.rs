//! Direction <-> texture-space mappings for the equirectangular and cube layouts.
//!
//! `+Y` is the polar axis of the lat-long layout: `v = 0` is the `+Y` pole and `v = 1` the `-Y`
//! pole. The azimuth origin sits on `-Z` so that `u = 0.5` looks down `+Z`.

use crate::face::CubeFace;
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Maps a direction to lat-long `(u, v)` in `[0, 1]`. The azimuth is undefined at the poles;
/// any `u` is returned there.
pub fn dir_to_equirect(dir: Vec3) -> Vec2 {
    let phi = dir.x.atan2(dir.z);
    let theta = dir.y.clamp(-1.0, 1.0).acos();
    Vec2::new((PI + phi) / TAU, theta / PI)
}

pub fn equirect_to_dir(uv: Vec2) -> Vec3 {
    let phi = uv.x * TAU;
    let theta = uv.y * PI;
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec3::new(-sin_theta * sin_phi, cos_theta, -sin_theta * cos_phi)
}

/// Picks the face struck by `dir` and returns face-local `(u, v)` in `[0, 1]`.
///
/// Ties between axes of equal magnitude resolve to X, then Y, then Z. A zero vector lands on
/// `+X` at the face centre.
pub fn dir_to_face(dir: Vec3) -> (CubeFace, Vec2) {
    let abs = dir.abs();
    let max_axis = abs.max_element();
    let face = if max_axis == abs.x {
        if dir.x >= 0.0 { CubeFace::PosX } else { CubeFace::NegX }
    } else if max_axis == abs.y {
        if dir.y >= 0.0 { CubeFace::PosY } else { CubeFace::NegY }
    } else if dir.z >= 0.0 {
        CubeFace::PosZ
    } else {
        CubeFace::NegZ
    };
    if max_axis <= 0.0 {
        return (face, Vec2::splat(0.5));
    }

    let face_vec = dir / max_axis;
    let layout = face.layout();
    let u = (layout.u_axis.dot(face_vec) + 1.0) * 0.5;
    let v = (layout.v_axis.dot(face_vec) + 1.0) * 0.5;
    (face, Vec2::new(u, v))
}

/// Inverse of [`dir_to_face`] taking face-local coordinates already remapped to `[-1, 1]`.
pub fn face_to_dir(face: CubeFace, fu: f32, fv: f32) -> Vec3 {
    let layout = face.layout();
    (layout.u_axis * fu + layout.v_axis * fv + layout.normal).normalize()
}
