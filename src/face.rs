use glam::Vec3;
use std::fmt;

pub const CUBE_FACE_COUNT: usize = 6;

/// Cube face identifiers. The discriminant order is shared by the basis table, the cross
/// layout and the face file suffixes, so it must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

/// Static per-face geometry.
#[derive(Debug, Clone, Copy)]
pub struct FaceLayout {
    /// World direction of increasing face-local `u`.
    pub u_axis: Vec3,
    /// World direction of increasing face-local `v`.
    pub v_axis: Vec3,
    pub normal: Vec3,
    /// Tile position in the vertical cross, in face units.
    pub cross_tile: (u32, u32),
    /// Tile is stored rotated by 180 degrees inside the cross.
    pub cross_rotated: bool,
    pub suffix: &'static str,
}

// Vertical cross:
//
//      |+Y|
//   |-X|+Z|+X|
//      |-Y|
//      |-Z|
const FACE_LAYOUTS: [FaceLayout; CUBE_FACE_COUNT] = [
    FaceLayout {
        u_axis: Vec3::NEG_Z,
        v_axis: Vec3::NEG_Y,
        normal: Vec3::X,
        cross_tile: (2, 1),
        cross_rotated: false,
        suffix: "_px",
    },
    FaceLayout {
        u_axis: Vec3::Z,
        v_axis: Vec3::NEG_Y,
        normal: Vec3::NEG_X,
        cross_tile: (0, 1),
        cross_rotated: false,
        suffix: "_nx",
    },
    FaceLayout {
        u_axis: Vec3::X,
        v_axis: Vec3::Z,
        normal: Vec3::Y,
        cross_tile: (1, 0),
        cross_rotated: false,
        suffix: "_py",
    },
    FaceLayout {
        u_axis: Vec3::X,
        v_axis: Vec3::NEG_Z,
        normal: Vec3::NEG_Y,
        cross_tile: (1, 2),
        cross_rotated: false,
        suffix: "_ny",
    },
    FaceLayout {
        u_axis: Vec3::X,
        v_axis: Vec3::NEG_Y,
        normal: Vec3::Z,
        cross_tile: (1, 1),
        cross_rotated: false,
        suffix: "_pz",
    },
    FaceLayout {
        u_axis: Vec3::NEG_X,
        v_axis: Vec3::NEG_Y,
        normal: Vec3::NEG_Z,
        cross_tile: (1, 3),
        cross_rotated: true,
        suffix: "_nz",
    },
];

impl CubeFace {
    pub const ALL: [CubeFace; CUBE_FACE_COUNT] =
        [CubeFace::PosX, CubeFace::NegX, CubeFace::PosY, CubeFace::NegY, CubeFace::PosZ, CubeFace::NegZ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn layout(self) -> &'static FaceLayout {
        &FACE_LAYOUTS[self.index()]
    }

    pub fn suffix(self) -> &'static str {
        self.layout().suffix
    }

    pub fn label(self) -> &'static str {
        match self {
            CubeFace::PosX => "+X",
            CubeFace::NegX => "-X",
            CubeFace::PosY => "+Y",
            CubeFace::NegY => "-Y",
            CubeFace::PosZ => "+Z",
            CubeFace::NegZ => "-Z",
        }
    }
}

impl fmt::Display for CubeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
