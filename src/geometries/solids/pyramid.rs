use glam::{Vec2, Vec3};

use super::palette;
use crate::geometries::{Corner, Face, Geometry, Topology, VertexGroups};

/// Canonical vertex of each instance, face by face.
const CORNERS: [usize; 16] = [
    0, 1, 2, // front
    0, 2, 3, // right
    0, 4, 1, // left
    3, 4, 0, // back
    4, 3, 2, 1, // bottom
];

const CORNERS_PER_FACE: [usize; 5] = [3, 3, 3, 3, 4];

#[rustfmt::skip]
const UVS: [[f32; 2]; 16] = [
    [0.5, 1.0], [0.0, 0.0], [1.0, 0.0],
    [0.5, 1.0], [0.0, 0.0], [1.0, 0.0],
    [0.5, 1.0], [0.0, 0.0], [1.0, 0.0],
    [0.0, 0.0], [1.0, 0.0], [0.5, 1.0],
    [1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0],
];

const GROUPS: [&[u32]; 5] = [
    &[0, 3, 6, 11], // v0
    &[1, 8, 15],    // v1
    &[2, 4, 14],    // v2
    &[5, 9, 13],    // v3
    &[7, 10, 12],   // v4
];

/// Pyramid over a square base centered on the origin, apex on the +y axis.
///
/// Canonical vertices: `v0` is the apex, `v1`..`v4` run around the base
/// starting at the front left corner (`-x`, `+z`) and turning towards `+x`.
/// The four sides are red, yellow, cyan and magenta (front, right, left, back)
/// and the base is blue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquarePyramid {
    /// Edge length of the base.
    pub base: f32,
    /// Distance from the base to the apex.
    pub height: f32,
}

impl SquarePyramid {
    /// Creates a pyramid with the given base edge length and height.
    pub fn new(base: f32, height: f32) -> Self {
        Self { base, height }
    }

    fn vertices(&self) -> [Vec3; 5] {
        let h = self.base * 0.5;

        [
            Vec3::new(0.0, self.height, 0.0),
            Vec3::new(-h, 0.0, h),
            Vec3::new(h, 0.0, h),
            Vec3::new(h, 0.0, -h),
            Vec3::new(-h, 0.0, -h),
        ]
    }
}

impl Default for SquarePyramid {
    /// Unit base, unit height.
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Geometry for SquarePyramid {
    fn topology(&self) -> Topology {
        let vertices = self.vertices();
        let colors = [
            palette::RED,
            palette::YELLOW,
            palette::CYAN,
            palette::MAGENTA,
            palette::BLUE,
        ];

        let mut corners = CORNERS
            .iter()
            .zip(UVS)
            .map(|(&v, uv)| Corner::new(vertices[v], Vec2::from_array(uv)));

        let faces = CORNERS_PER_FACE
            .iter()
            .zip(colors)
            .map(|(&n, color)| Face::new(corners.by_ref().take(n).collect(), color))
            .collect();

        Topology::new(faces, VertexGroups::from_rows(&GROUPS))
    }
}
