use glam::{Vec2, Vec3};

use crate::TopologyDefect;

/// One corner of a [`Face`]: where it is and which texel it samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    /// Position relative to the solid's origin.
    pub position: Vec3,
    /// Texture coordinates.
    pub uv: Vec2,
}

impl Corner {
    /// Creates a corner at `position` with texture coordinates `uv`.
    pub fn new(position: Vec3, uv: Vec2) -> Self {
        Self { position, uv }
    }
}

/// A planar, convex polygon of a solid.
///
/// Corners are listed counter-clockwise as seen from outside the solid. A
/// clockwise face is not rejected, its derived normal simply points inwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Ordered corners. Every corner becomes one vertex instance.
    pub corners: Vec<Corner>,
    /// RGBA color shared by every corner of the face.
    pub color: [f32; 4],
    /// Outward unit normal, if known ahead of time. When `None` the normal is
    /// derived from the first three corners.
    pub normal: Option<Vec3>,
}

impl Face {
    /// Creates a face whose normal will be derived from its winding.
    pub fn new(corners: Vec<Corner>, color: [f32; 4]) -> Self {
        Self {
            corners,
            color,
            normal: None,
        }
    }

    /// Sets a precomputed outward normal for this face.
    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = Some(normal);
        self
    }

    /// Fan triangulation of the face in local corner numbers: corner 0 is
    /// joined with every consecutive pair of the remaining corners.
    pub fn fan(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        (1..self.corners.len().saturating_sub(1)).map(|i| [0, i, i + 1])
    }
}

/// Canonical vertex group table.
///
/// Each group lists the vertex instances that sit on the same geometric corner
/// of the solid. The groups are expected to partition the whole instance range;
/// see [`VertexGroups::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexGroups {
    groups: Vec<Vec<u32>>,
}

impl VertexGroups {
    /// Creates a group table from explicit instance lists.
    pub fn new(groups: Vec<Vec<u32>>) -> Self {
        Self { groups }
    }

    /// Creates a group table from borrowed constant rows.
    pub fn from_rows(rows: &[&[u32]]) -> Self {
        Self::new(rows.iter().map(|row| row.to_vec()).collect())
    }

    /// Number of canonical vertices.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no groups at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates over the groups in table order.
    pub fn iter(&self) -> impl Iterator<Item = &[u32]> {
        self.groups.iter().map(Vec::as_slice)
    }

    /// Returns the members of group `index`.
    pub fn get(&self, index: usize) -> Option<&[u32]> {
        self.groups.get(index).map(Vec::as_slice)
    }

    /// Checks that the groups partition `0..instance_count` exactly once.
    ///
    /// Out-of-range entries are reported first, then the lowest instance that
    /// is missing or listed twice.
    pub fn validate(&self, instance_count: usize) -> Result<(), TopologyDefect> {
        let mut seen = vec![0u32; instance_count];

        for &instance in self.groups.iter().flatten() {
            let instance = instance as usize;

            match seen.get_mut(instance) {
                Some(count) => *count += 1,
                None => {
                    return Err(TopologyDefect::OutOfRange {
                        instance,
                        instance_count,
                    })
                }
            }
        }

        for (instance, count) in seen.into_iter().enumerate() {
            match count {
                1 => {}
                0 => return Err(TopologyDefect::Unassigned { instance }),
                _ => return Err(TopologyDefect::Duplicated { instance }),
            }
        }

        Ok(())
    }
}

/// Complete description of a solid: its faces and which of their corners are
/// the same geometric vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    /// Faces in instance order.
    pub faces: Vec<Face>,
    /// Canonical vertex group table over the face corners.
    pub groups: VertexGroups,
}

impl Topology {
    /// Creates a topology from faces and their group table.
    pub fn new(faces: Vec<Face>, groups: VertexGroups) -> Self {
        Self { faces, groups }
    }

    /// Number of vertex instances, which is the sum of the face corner counts.
    pub fn instance_count(&self) -> usize {
        self.faces.iter().map(|face| face.corners.len()).sum()
    }

    /// Number of triangles after fan triangulation.
    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|face| face.corners.len().saturating_sub(2))
            .sum()
    }

    /// Iterates over every corner in instance order together with the index of
    /// the face that owns it.
    pub fn corners(&self) -> impl Iterator<Item = (usize, &Corner)> {
        self.faces
            .iter()
            .enumerate()
            .flat_map(|(f, face)| face.corners.iter().map(move |corner| (f, corner)))
    }

    /// Triangulates every face and returns the triangles as instance index
    /// triples, face after face.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        let mut triangles = Vec::with_capacity(self.triangle_count());
        let mut base = 0;

        for face in &self.faces {
            triangles.extend(
                face.fan()
                    .map(|[a, b, c]| [(base + a) as u32, (base + b) as u32, (base + c) as u32]),
            );
            base += face.corners.len();
        }

        triangles
    }

    /// Validation tooling for hand-written tables.
    ///
    /// Checks that there are faces and every face is at least a triangle,
    /// that the groups partition the instance range and that all members of a
    /// group share one position.
    pub fn validate(&self) -> Result<(), TopologyDefect> {
        if self.faces.is_empty() {
            return Err(TopologyDefect::NoFaces);
        }

        if let Some((face, corners)) = self
            .faces
            .iter()
            .map(|face| face.corners.len())
            .enumerate()
            .find(|&(_, corners)| corners < 3)
        {
            return Err(TopologyDefect::DegenerateFace { face, corners });
        }

        self.groups.validate(self.instance_count())?;

        let positions: Vec<Vec3> = self.corners().map(|(_, corner)| corner.position).collect();

        for (group, members) in self.groups.iter().enumerate() {
            let Some((&first, rest)) = members.split_first() else {
                continue;
            };

            let anchor = positions[first as usize];

            if let Some(&instance) = rest
                .iter()
                .find(|&&instance| !positions[instance as usize].abs_diff_eq(anchor, 1e-5))
            {
                return Err(TopologyDefect::SplitCorner {
                    group,
                    instance: instance as usize,
                });
            }
        }

        Ok(())
    }
}
