use std::f32::consts::{FRAC_1_SQRT_2, SQRT_2};

use glam::{Vec2, Vec3};

use super::palette;
use crate::geometries::{Corner, Face, Geometry, Topology, VertexGroups};

/// Canonical vertices of each face, counter-clockwise from outside. `0` is the
/// top apex, `5` the bottom one and `1`..`4` the equator.
const FACES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [0, 2, 3],
    [0, 4, 1],
    [3, 4, 0],
    [5, 2, 1],
    [5, 3, 2],
    [5, 1, 4],
    [4, 3, 5],
];

#[rustfmt::skip]
const UVS: [[[f32; 2]; 3]; 8] = [
    [[0.5, 1.0], [0.25, 0.5], [0.5, 0.5]],
    [[0.5, 1.0], [0.5, 0.5], [0.75, 0.5]],
    [[0.5, 1.0], [0.0, 0.5], [0.25, 0.5]],
    [[0.75, 0.5], [1.0, 0.5], [0.5, 1.0]],
    [[0.5, 0.0], [0.5, 0.5], [0.25, 0.5]],
    [[0.5, 0.0], [0.75, 0.5], [0.5, 0.5]],
    [[0.5, 0.0], [0.25, 0.5], [0.0, 0.5]],
    [[1.0, 0.5], [0.75, 0.5], [0.5, 0.0]],
];

const GROUPS: [&[u32]; 6] = [
    &[0, 3, 6, 11],
    &[1, 8, 14, 19],
    &[2, 4, 13, 17],
    &[5, 9, 16, 22],
    &[7, 10, 20, 21],
    &[12, 15, 18, 23],
];

/// Regular octahedron centered on the origin with its apexes on the y axis.
///
/// Face normals are known from symmetry and are not derived from the winding:
/// with `a = 1/√3`, the faces point along `(±√2·a, ±a, 0)` and
/// `(0, ±a, ±√2·a)`. The upper faces are red, yellow, cyan and magenta (front,
/// right, left, back), and the lower faces repeat the same colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegularOctahedron {
    /// Edge length.
    pub edge: f32,
}

impl RegularOctahedron {
    /// Creates an octahedron with the given edge length.
    pub fn new(edge: f32) -> Self {
        Self { edge }
    }

    fn vertices(&self) -> [Vec3; 6] {
        let h = self.edge * 0.5;
        let apex = self.edge * FRAC_1_SQRT_2;

        [
            Vec3::new(0.0, apex, 0.0),
            Vec3::new(-h, 0.0, h),
            Vec3::new(h, 0.0, h),
            Vec3::new(h, 0.0, -h),
            Vec3::new(-h, 0.0, -h),
            Vec3::new(0.0, -apex, 0.0),
        ]
    }

    fn normals() -> [Vec3; 8] {
        let a = 1.0 / 3f32.sqrt();
        let b = SQRT_2 * a;

        [
            Vec3::new(0.0, a, b),
            Vec3::new(b, a, 0.0),
            Vec3::new(-b, a, 0.0),
            Vec3::new(0.0, a, -b),
            Vec3::new(0.0, -a, b),
            Vec3::new(b, -a, 0.0),
            Vec3::new(-b, -a, 0.0),
            Vec3::new(0.0, -a, -b),
        ]
    }
}

impl Default for RegularOctahedron {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Geometry for RegularOctahedron {
    fn topology(&self) -> Topology {
        let vertices = self.vertices();
        let colors = [palette::RED, palette::YELLOW, palette::CYAN, palette::MAGENTA];

        let faces = FACES
            .iter()
            .zip(UVS)
            .zip(Self::normals())
            .enumerate()
            .map(|(f, ((corners, uvs), normal))| {
                let corners = corners
                    .iter()
                    .zip(uvs)
                    .map(|(&v, uv)| Corner::new(vertices[v], Vec2::from_array(uv)))
                    .collect();

                Face::new(corners, colors[f % colors.len()]).with_normal(normal)
            })
            .collect();

        Topology::new(faces, VertexGroups::from_rows(&GROUPS))
    }
}
