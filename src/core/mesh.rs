use std::ops::Range;

use log::debug;

use super::ShadingMode;
use crate::{
    geometries::{AttributeBinding, AttributeLayout, AttributeSlot, BufferGeometry},
    wgpual::{BufferDevice, BufferUsage, Gpu},
    MeshError,
};

/// Everything the render loop needs to issue the draw call of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    /// Always a triangle list.
    pub topology: wgpu::PrimitiveTopology,
    /// Number of indices to draw.
    pub index_count: u32,
    /// Format of the index buffer.
    pub index_format: wgpu::IndexFormat,
}

/// Triangular polygon mesh living on a [`BufferDevice`].
///
/// The mesh owns its [`BufferGeometry`] and two device buffers: the combined
/// vertex buffer, laid out by attribute, and the index buffer. Both are
/// allocated once by [`Mesh::new`]. Changing the shading mode rewrites only the
/// normal sub-range of the vertex buffer.
///
/// Device buffers are not freed on drop. Call [`Mesh::release`] with the device
/// the mesh was created on.
pub struct Mesh<D: BufferDevice> {
    geometry: BufferGeometry,
    layout: AttributeLayout,
    vertex_buffer: D::Buffer,
    index_buffer: D::Buffer,
}

impl<D: BufferDevice> Mesh<D> {
    /// Allocates the device buffers for `geometry` and uploads every attribute
    /// sub-range and the indices.
    ///
    /// If any allocation or upload fails, the buffers allocated so far are
    /// released before the error is returned.
    pub fn new(device: &mut D, geometry: BufferGeometry) -> Result<Self, MeshError> {
        let layout = geometry.layout();
        let label = geometry.label.as_deref();

        let vertex_buffer = device.allocate(label, layout.total_size(), BufferUsage::Vertex)?;

        let index_size = geometry.index_bytes().len() as u64;
        let index_buffer = match device.allocate(label, index_size, BufferUsage::Index) {
            Ok(buffer) => buffer,
            Err(err) => {
                device.release(vertex_buffer);
                return Err(err.into());
            }
        };

        debug!(
            "allocated mesh {:?}: {} vertex bytes, {} index bytes",
            label,
            layout.total_size(),
            index_size
        );

        let mesh = Self {
            geometry,
            layout,
            vertex_buffer,
            index_buffer,
        };

        match mesh.upload_all(device) {
            Ok(()) => Ok(mesh),
            Err(err) => {
                mesh.release(device);
                Err(err)
            }
        }
    }

    fn upload_all(&self, device: &mut D) -> Result<(), MeshError> {
        for slot in AttributeSlot::ALL {
            self.upload_attribute(device, slot)?;
        }

        device.upload(&self.index_buffer, 0, self.geometry.index_bytes())?;

        Ok(())
    }

    fn upload_attribute(&self, device: &mut D, slot: AttributeSlot) -> Result<(), MeshError> {
        device.upload(
            &self.vertex_buffer,
            self.layout.offset(slot),
            self.geometry.attribute_bytes(slot),
        )?;

        Ok(())
    }

    /// Switches the active normals to `mode` and uploads the normal sub-range.
    /// Positions, colors, texture coordinates and indices are left alone.
    ///
    /// If the upload fails the mesh stays in its previous mode, matching what
    /// the device still holds.
    pub fn set_shading(&mut self, device: &mut D, mode: ShadingMode) -> Result<(), MeshError> {
        let previous = self.geometry.shading();
        debug!(
            "mesh {:?}: shading {:?} -> {:?}",
            self.geometry.label, previous, mode
        );

        self.geometry.set_shading(mode);

        if let Err(err) = self.upload_attribute(device, AttributeSlot::Normal) {
            self.geometry.set_shading(previous);
            return Err(err);
        }

        Ok(())
    }

    /// Switches to the other shading mode and returns it.
    pub fn toggle_shading(&mut self, device: &mut D) -> Result<ShadingMode, MeshError> {
        let mode = self.geometry.shading().toggled();
        self.set_shading(device, mode)?;

        Ok(mode)
    }

    /// The current shading mode.
    pub fn shading(&self) -> ShadingMode {
        self.geometry.shading()
    }

    /// The CPU-side attribute data.
    pub fn geometry(&self) -> &BufferGeometry {
        &self.geometry
    }

    /// Layout of the combined vertex buffer.
    pub fn layout(&self) -> &AttributeLayout {
        &self.layout
    }

    /// The combined vertex buffer.
    pub fn vertex_buffer(&self) -> &D::Buffer {
        &self.vertex_buffer
    }

    /// The index buffer.
    pub fn index_buffer(&self) -> &D::Buffer {
        &self.index_buffer
    }

    /// Every attribute binding together with the byte range of its sub-range
    /// in the vertex buffer.
    pub fn vertex_sources(&self) -> [(AttributeBinding, Range<u64>); 4] {
        self.layout
            .bindings()
            .map(|binding| (binding, self.layout.range(binding.slot)))
    }

    /// Number of indices in the index buffer.
    pub fn index_count(&self) -> u32 {
        self.geometry.index_count() as u32
    }

    /// Number of triangles, `index_count / 3`.
    pub fn triangle_count(&self) -> u32 {
        self.index_count() / 3
    }

    /// Parameters of the draw call for this mesh.
    pub fn draw_command(&self) -> DrawCommand {
        DrawCommand {
            topology: wgpu::PrimitiveTopology::TriangleList,
            index_count: self.index_count(),
            index_format: wgpu::IndexFormat::Uint32,
        }
    }

    /// Frees both device buffers. This is the only way to dispose of a mesh's
    /// device memory.
    pub fn release(self, device: &mut D) {
        debug!("releasing mesh {:?}", self.geometry.label);

        device.release(self.vertex_buffer);
        device.release(self.index_buffer);
    }
}

impl Mesh<Gpu> {
    /// Binds every attribute sub-range to the vertex buffer slot of its shader
    /// location, binds the index buffer, and draws the mesh. The pipeline must
    /// have been created with
    /// [`AttributeLayout::vertex_buffer_layouts`] and be set already.
    ///
    /// A mesh without indices draws nothing.
    pub fn draw<'pass>(&'pass self, render_pass: &mut wgpu::RenderPass<'pass>) {
        if self.index_count() == 0 {
            return;
        }

        for (binding, range) in self.vertex_sources() {
            render_pass.set_vertex_buffer(binding.shader_location, self.vertex_buffer.slice(range));
        }

        let command = self.draw_command();

        render_pass.set_index_buffer(self.index_buffer.slice(..), command.index_format);
        render_pass.draw_indexed(0..command.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometries::{GeometryOptions, SquarePyramid},
        wgpual::HostDevice,
        DeviceError,
    };

    fn pyramid() -> BufferGeometry {
        BufferGeometry::from_geometry(&SquarePyramid::default(), &GeometryOptions::default())
    }

    #[test]
    fn construction_uploads_each_sub_range_once() {
        let mut device = HostDevice::new();
        let mesh = Mesh::new(&mut device, pyramid()).unwrap();

        let offsets: Vec<u64> = device.uploads().iter().map(|upload| upload.offset).collect();
        assert_eq!(offsets, vec![0, 192, 384, 640, 0]);
        assert_eq!(
            device.contents(mesh.vertex_buffer()),
            Some(mesh.geometry().packed().as_slice())
        );
        assert_eq!(device.contents(mesh.index_buffer()).map(<[u8]>::len), Some(18 * 4));
    }

    #[test]
    fn draw_command_counts_triangles() {
        let mut device = HostDevice::new();
        let mesh = Mesh::new(&mut device, pyramid()).unwrap();

        assert_eq!(
            mesh.draw_command(),
            DrawCommand {
                topology: wgpu::PrimitiveTopology::TriangleList,
                index_count: 18,
                index_format: wgpu::IndexFormat::Uint32,
            }
        );
        assert_eq!(mesh.triangle_count(), 6);
    }

    #[test]
    fn toggle_alternates_modes() {
        let mut device = HostDevice::new();
        let mut mesh = Mesh::new(&mut device, pyramid()).unwrap();

        assert_eq!(mesh.toggle_shading(&mut device).unwrap(), ShadingMode::Smooth);
        assert_eq!(mesh.toggle_shading(&mut device).unwrap(), ShadingMode::Flat);
        assert_eq!(mesh.shading(), ShadingMode::Flat);
    }

    #[test]
    fn failed_index_allocation_releases_vertex_buffer() {
        let mut device = HostDevice::with_capacity(768);
        let result = Mesh::new(&mut device, pyramid());

        assert!(matches!(
            result,
            Err(MeshError::DeviceAllocationFailure(DeviceError::Allocation { size: 72, limit: 0 }))
        ));
        assert_eq!(device.live_buffers(), 0);
    }

    #[test]
    fn failed_shading_upload_keeps_previous_mode() {
        let mut device = HostDevice::new();
        let mut stranger = HostDevice::new();
        let mut mesh = Mesh::new(&mut device, pyramid()).unwrap();
        let before = device.contents(mesh.vertex_buffer()).unwrap().to_vec();

        assert!(matches!(
            mesh.set_shading(&mut stranger, ShadingMode::Smooth),
            Err(MeshError::DeviceAllocationFailure(DeviceError::Released))
        ));
        assert_eq!(mesh.shading(), ShadingMode::Flat);
        assert_eq!(mesh.geometry().normal, mesh.geometry().face_normal);
        assert_eq!(device.contents(mesh.vertex_buffer()), Some(before.as_slice()));

        assert_eq!(mesh.toggle_shading(&mut device).unwrap(), ShadingMode::Smooth);
    }

    #[test]
    fn release_frees_both_buffers() {
        let mut device = HostDevice::new();
        let mesh = Mesh::new(&mut device, pyramid()).unwrap();

        assert_eq!(device.live_buffers(), 2);
        mesh.release(&mut device);
        assert_eq!(device.live_buffers(), 0);
        assert_eq!(device.allocated(), 0);
    }
}
