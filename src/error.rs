use thiserror::Error;

/// Errors surfaced by mesh construction and device updates.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The canonical vertex group table or a face list is inconsistent.
    ///
    /// The builder itself never checks. This wraps the [`TopologyDefect`] of
    /// [`Topology::validate`](crate::Topology::validate) or
    /// [`Polyhedron::new`](crate::Polyhedron::new) so callers can propagate it
    /// with `?` next to device errors.
    #[error("malformed topology: {0}")]
    MalformedTopology(#[from] TopologyDefect),
    /// The buffer device failed to allocate or write a buffer.
    #[error("device allocation failure: {0}")]
    DeviceAllocationFailure(#[from] DeviceError),
}

/// A defect found while validating a [`Topology`](crate::Topology).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TopologyDefect {
    /// The solid has no faces at all.
    #[error("topology has no faces")]
    NoFaces,
    /// A face has fewer than three corners.
    #[error("face {face} has {corners} corners, at least 3 are required")]
    DegenerateFace {
        /// Face index.
        face: usize,
        /// Number of corners the face has.
        corners: usize,
    },
    /// A group references an instance past the end of the instance range.
    #[error("instance {instance} is out of range (instance count is {instance_count})")]
    OutOfRange {
        /// Offending instance index.
        instance: usize,
        /// Number of vertex instances in the topology.
        instance_count: usize,
    },
    /// An instance belongs to no canonical vertex group.
    #[error("instance {instance} belongs to no vertex group")]
    Unassigned {
        /// Offending instance index.
        instance: usize,
    },
    /// An instance is listed more than once across the canonical vertex groups.
    #[error("instance {instance} is listed in more than one vertex group")]
    Duplicated {
        /// Offending instance index.
        instance: usize,
    },
    /// A group member does not sit at the same position as the rest of its
    /// group.
    #[error("instance {instance} in vertex group {group} is not at the group's position")]
    SplitCorner {
        /// Group index.
        group: usize,
        /// Offending instance index.
        instance: usize,
    },
    /// A polyhedron face references a vertex that does not exist.
    #[error("face {face} references vertex {vertex}, but there are only {vertex_count} vertices")]
    UnknownVertex {
        /// Face index.
        face: usize,
        /// Referenced vertex index.
        vertex: usize,
        /// Number of vertices in the polyhedron.
        vertex_count: usize,
    },
}

/// Failures reported by a [`BufferDevice`](crate::BufferDevice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// The device cannot hold a buffer of the requested size.
    #[error("cannot allocate {size} bytes (limit is {limit} bytes)")]
    Allocation {
        /// Requested size in bytes.
        size: u64,
        /// Largest size the device accepts right now.
        limit: u64,
    },
    /// The write does not fit inside the buffer.
    #[error("write of {len} bytes at offset {offset} overflows buffer of {size} bytes")]
    OutOfBounds {
        /// Byte offset of the write.
        offset: u64,
        /// Length of the write in bytes.
        len: u64,
        /// Size of the buffer in bytes.
        size: u64,
    },
    /// The write offset or length is not a multiple of
    /// [`wgpu::COPY_BUFFER_ALIGNMENT`].
    #[error("write of {len} bytes at offset {offset} is not 4-byte aligned")]
    Misaligned {
        /// Byte offset of the write.
        offset: u64,
        /// Length of the write in bytes.
        len: u64,
    },
    /// The buffer has already been released.
    #[error("buffer has been released")]
    Released,
}
