use std::f32::consts::{FRAC_PI_2, SQRT_2, TAU};

use glam::{Vec2, Vec3};

use super::palette;
use crate::{
    geometries::{Corner, Face, Geometry, Topology, VertexGroups},
    TopologyDefect,
};

/// One face of a [`Polyhedron`], given as indices into its vertex list.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyhedronFace {
    /// Vertex indices, counter-clockwise as seen from outside.
    pub vertices: Vec<usize>,
    /// RGBA color of the face.
    pub color: [f32; 4],
    /// Texture coordinates per corner. When `None`, corners are spread evenly
    /// on the circle inscribed in the unit square, first corner at the top.
    pub uvs: Option<Vec<Vec2>>,
}

impl PolyhedronFace {
    /// Creates a face with default texture coordinates.
    pub fn new(vertices: Vec<usize>, color: [f32; 4]) -> Self {
        Self {
            vertices,
            color,
            uvs: None,
        }
    }

    /// Sets explicit per-corner texture coordinates.
    pub fn with_uvs(mut self, uvs: Vec<Vec2>) -> Self {
        self.uvs = Some(uvs);
        self
    }

    fn uv(&self, corner: usize) -> Vec2 {
        if let Some(uv) = self.uvs.as_ref().and_then(|uvs| uvs.get(corner)) {
            return *uv;
        }

        let angle = FRAC_PI_2 + TAU * corner as f32 / self.vertices.len() as f32;
        Vec2::new(0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin())
    }
}

/// Convex polyhedron described by shared vertices and indexed faces.
///
/// Unlike the hand-written solids, the canonical vertex group table is derived:
/// every vertex referenced by at least one face becomes one group holding all
/// of its face corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    vertices: Vec<Vec3>,
    faces: Vec<PolyhedronFace>,
}

impl Polyhedron {
    /// Creates a polyhedron, checking that there is at least one face, that
    /// every face has at least three corners and only references existing
    /// vertices.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<PolyhedronFace>) -> Result<Self, TopologyDefect> {
        if faces.is_empty() {
            return Err(TopologyDefect::NoFaces);
        }

        for (f, face) in faces.iter().enumerate() {
            if face.vertices.len() < 3 {
                return Err(TopologyDefect::DegenerateFace {
                    face: f,
                    corners: face.vertices.len(),
                });
            }

            if let Some(&vertex) = face.vertices.iter().find(|&&v| v >= vertices.len()) {
                return Err(TopologyDefect::UnknownVertex {
                    face: f,
                    vertex,
                    vertex_count: vertices.len(),
                });
            }
        }

        Ok(Self { vertices, faces })
    }

    /// Regular tetrahedron with the given edge length, centered on the origin.
    pub fn tetrahedron(edge: f32) -> Self {
        let s = edge / (2.0 * SQRT_2);
        let vertices = vec![
            Vec3::new(s, s, s),
            Vec3::new(s, -s, -s),
            Vec3::new(-s, s, -s),
            Vec3::new(-s, -s, s),
        ];

        let faces = [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]]
            .into_iter()
            .zip([palette::RED, palette::YELLOW, palette::CYAN, palette::MAGENTA])
            .map(|(vertices, color)| PolyhedronFace::new(vertices.to_vec(), color))
            .collect();

        Self { vertices, faces }
    }

    /// Cube with the given edge length, centered on the origin.
    ///
    /// Vertex `i` sits at `+h` on x, y and z where bits 0, 1 and 2 of `i` are
    /// set, and at `-h` otherwise.
    pub fn cube(edge: f32) -> Self {
        let h = edge * 0.5;
        let vertices = (0..8)
            .map(|i| {
                let sign = |bit: usize| if i & bit != 0 { h } else { -h };
                Vec3::new(sign(1), sign(2), sign(4))
            })
            .collect();

        let uvs = vec![Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];

        let faces = [
            ([5, 1, 3, 7], palette::RED),
            ([0, 4, 6, 2], palette::CYAN),
            ([2, 6, 7, 3], palette::GREEN),
            ([0, 1, 5, 4], palette::MAGENTA),
            ([4, 5, 7, 6], palette::BLUE),
            ([0, 2, 3, 1], palette::YELLOW),
        ]
        .into_iter()
        .map(|(vertices, color)| {
            PolyhedronFace::new(vertices.to_vec(), color).with_uvs(uvs.clone())
        })
        .collect();

        Self { vertices, faces }
    }

    /// Shared vertex positions.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Faces as vertex index lists.
    pub fn faces(&self) -> &[PolyhedronFace] {
        &self.faces
    }
}

impl Geometry for Polyhedron {
    fn topology(&self) -> Topology {
        let mut groups: Vec<Vec<u32>> = vec![Vec::new(); self.vertices.len()];
        let mut faces = Vec::with_capacity(self.faces.len());
        let mut instance = 0u32;

        for face in &self.faces {
            let mut corners = Vec::with_capacity(face.vertices.len());

            for (c, &v) in face.vertices.iter().enumerate() {
                corners.push(Corner::new(self.vertices[v], face.uv(c)));
                groups[v].push(instance);
                instance += 1;
            }

            faces.push(Face::new(corners, face.color));
        }

        groups.retain(|group| !group.is_empty());

        Topology::new(faces, VertexGroups::new(groups))
    }
}
