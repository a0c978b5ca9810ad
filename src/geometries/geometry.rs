use super::Topology;

/// Generator of solid topologies. Should be implemented on all geometry
/// parameter structs.
///
/// There is an emphasis on the word "generator": the method will create a new
/// topology every time it is invoked. To compute and store the vertex
/// attributes, use
/// [`BufferGeometry::from_geometry`](super::BufferGeometry::from_geometry).
pub trait Geometry {
    /// Generates the faces of this solid together with its canonical vertex
    /// group table.
    fn topology(&self) -> Topology;
}
