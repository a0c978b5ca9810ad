use glam::{Vec2, Vec3, Vec4};
use log::debug;

use super::{
    normals::{averaged_normals, flat_normals},
    AttributeLayout, AttributeSlot, Geometry, Topology, VertexGroups,
};
use crate::core::ShadingMode;

/// Configures how a [`BufferGeometry`] is built.
#[derive(Debug, Clone, Default)]
pub struct GeometryOptions {
    /// Shading mode the geometry starts in. Default is
    /// [`ShadingMode::Flat`].
    pub shading: ShadingMode,
    /// If set, every vertex gets this RGBA color instead of its face color.
    pub color: Option<[f32; 4]>,
    /// If `true`, smooth normals are scaled to unit length after averaging.
    /// Default is `false`, which keeps the raw mean of the face normals.
    pub renormalize_smooth_normals: bool,
    /// Label given to the device buffers of a mesh built from this geometry.
    pub label: Option<String>,
}

/// Read-only view of one vertex instance of a [`BufferGeometry`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexInstance {
    /// Index into every attribute sub-range of the vertex buffer.
    pub index: u32,
    /// Position relative to the geometry's origin.
    pub position: Vec3,
    /// Normal of the face this instance belongs to.
    pub face_normal: Vec3,
    /// Mean normal of this instance's canonical vertex.
    pub vertex_normal: Vec3,
    /// Normal currently in the active normal attribute.
    pub normal: Vec3,
    /// RGBA color.
    pub color: Vec4,
    /// Texture coordinates.
    pub uv: Vec2,
}

/// Shape of a solid with computed attribute data, laid out by attribute.
///
/// Every vertex instance is one face corner, so corners shared by several faces
/// are stored once per face. Both normal sets are kept; the active
/// [`normal`](Self::normal) buffer is a copy of one of them.
#[derive(Debug, Clone)]
pub struct BufferGeometry {
    /// Position attribute buffer. Every consecutive triplet specifies the
    /// position of a vertex instance relative to the geometry's origin.
    pub position: Vec<f32>,
    /// Flat normals. Every consecutive triplet is the normal of the face the
    /// corresponding instance belongs to.
    pub face_normal: Vec<f32>,
    /// Averaged normals. Every consecutive triplet is the mean face normal of
    /// the corresponding instance's canonical vertex.
    pub vertex_normal: Vec<f32>,
    /// Active normal attribute buffer, the one uploaded to the device.
    pub normal: Vec<f32>,
    /// Color attribute buffer. Every consecutive quadruplet is an RGBA color.
    pub color: Vec<f32>,
    /// UV attribute buffer. Every consecutive pair of numbers specifies the UV
    /// coordinates of the corresponding vertex instance.
    pub uv: Vec<f32>,
    /// Every consecutive triplet defines a triangle formed by the vertex
    /// instances at the specified indices.
    pub indices: Vec<u32>,
    /// Canonical vertex group table the vertex normals were averaged over.
    pub groups: VertexGroups,
    /// Label given to device buffers.
    pub label: Option<String>,
    shading: ShadingMode,
}

impl BufferGeometry {
    /// Creates a 3D geometry from the given geometry builder.
    pub fn from_geometry<G: Geometry>(geometry: &G, options: &GeometryOptions) -> Self {
        Self::from_topology(geometry.topology(), options)
    }

    /// Computes every attribute buffer for `topology`.
    ///
    /// The canonical vertex group table is trusted as is; use
    /// [`Topology::validate`] to check hand-written tables.
    pub fn from_topology(topology: Topology, options: &GeometryOptions) -> Self {
        let instance_count = topology.instance_count();

        let mut position = Vec::with_capacity(instance_count * 3);
        let mut color = Vec::with_capacity(instance_count * 4);
        let mut uv = Vec::with_capacity(instance_count * 2);

        for (f, corner) in topology.corners() {
            position.extend(corner.position.to_array());
            color.extend(options.color.unwrap_or(topology.faces[f].color));
            uv.extend(corner.uv.to_array());
        }

        let flat = flat_normals(&topology);
        let mut smooth = averaged_normals(&flat, &topology.groups);

        if options.renormalize_smooth_normals {
            smooth.iter_mut().for_each(|n| *n = n.normalize_or_zero());
        }

        let face_normal: Vec<f32> = bytemuck::cast_slice(&flat).to_vec();
        let vertex_normal: Vec<f32> = bytemuck::cast_slice(&smooth).to_vec();

        let indices: Vec<u32> = topology.triangles().into_iter().flatten().collect();

        debug!(
            "built geometry {:?}: {} instances, {} triangles, {} vertex groups",
            options.label,
            instance_count,
            indices.len() / 3,
            topology.groups.len()
        );

        let mut geometry = Self {
            position,
            normal: Vec::new(),
            face_normal,
            vertex_normal,
            color,
            uv,
            indices,
            groups: topology.groups,
            label: options.label.clone(),
            shading: options.shading,
        };

        geometry.set_shading(options.shading);
        geometry
    }

    /// Number of vertex instances.
    pub fn vertex_count(&self) -> usize {
        self.position.len() / 3
    }

    /// Number of entries in the index buffer.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles to draw.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The shading mode the active normals currently reflect.
    pub fn shading(&self) -> ShadingMode {
        self.shading
    }

    /// Overwrites the active normals with the normal set of `mode`. Nothing
    /// else is touched.
    pub fn set_shading(&mut self, mode: ShadingMode) {
        let source = match mode {
            ShadingMode::Flat => &self.face_normal,
            ShadingMode::Smooth => &self.vertex_normal,
        };

        self.normal.clear();
        self.normal.extend_from_slice(source);
        self.shading = mode;
    }

    /// Layout of the combined vertex buffer for this geometry.
    pub fn layout(&self) -> AttributeLayout {
        AttributeLayout::new(self.vertex_count())
    }

    /// Raw bytes of the sub-range of `slot`.
    pub fn attribute_bytes(&self, slot: AttributeSlot) -> &[u8] {
        let data = match slot {
            AttributeSlot::Position => &self.position,
            AttributeSlot::Normal => &self.normal,
            AttributeSlot::Color => &self.color,
            AttributeSlot::TexCoord => &self.uv,
        };

        bytemuck::cast_slice(data)
    }

    /// Raw bytes of the index buffer.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// The whole combined vertex buffer as it is laid out on the device.
    pub fn packed(&self) -> Vec<u8> {
        let layout = self.layout();
        let mut bytes = Vec::with_capacity(layout.total_size() as usize);

        for slot in AttributeSlot::ALL {
            bytes.extend_from_slice(self.attribute_bytes(slot));
        }

        bytes
    }

    /// Returns the vertex instance at `index`.
    pub fn instance(&self, index: usize) -> Option<VertexInstance> {
        if index >= self.vertex_count() {
            return None;
        }

        let vec3 = |data: &[f32]| Vec3::from_slice(&data[index * 3..index * 3 + 3]);

        Some(VertexInstance {
            index: index as u32,
            position: vec3(&self.position),
            face_normal: vec3(&self.face_normal),
            vertex_normal: vec3(&self.vertex_normal),
            normal: vec3(&self.normal),
            color: Vec4::from_slice(&self.color[index * 4..index * 4 + 4]),
            uv: Vec2::from_slice(&self.uv[index * 2..index * 2 + 2]),
        })
    }
}
