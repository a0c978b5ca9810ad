use crate::DeviceError;

/// What a device buffer will be bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    /// Source of vertex attributes.
    Vertex,
    /// Source of triangle indices.
    Index,
}

impl From<BufferUsage> for wgpu::BufferUsages {
    fn from(usage: BufferUsage) -> Self {
        match usage {
            BufferUsage::Vertex => wgpu::BufferUsages::VERTEX,
            BufferUsage::Index => wgpu::BufferUsages::INDEX,
        }
        .union(wgpu::BufferUsages::COPY_DST)
    }
}

/// Memory on a rendering device that meshes can upload their buffers to.
///
/// Devices are passed explicitly to every call that touches them, so any number
/// of independent devices can coexist.
pub trait BufferDevice {
    /// Handle to one device buffer.
    type Buffer;

    /// Allocates a buffer of `size` bytes.
    fn allocate(
        &mut self,
        label: Option<&str>,
        size: u64,
        usage: BufferUsage,
    ) -> Result<Self::Buffer, DeviceError>;

    /// Writes `bytes` into `buffer` starting at byte `offset`.
    fn upload(
        &mut self,
        buffer: &Self::Buffer,
        offset: u64,
        bytes: &[u8],
    ) -> Result<(), DeviceError>;

    /// Frees `buffer`.
    fn release(&mut self, buffer: Self::Buffer);
}

/// Checks that a write of `len` bytes at `offset` fits a buffer of `size`
/// bytes and respects [`wgpu::COPY_BUFFER_ALIGNMENT`].
pub(crate) fn check_write(offset: u64, len: u64, size: u64) -> Result<(), DeviceError> {
    if offset.checked_add(len).map_or(true, |end| end > size) {
        return Err(DeviceError::OutOfBounds { offset, len, size });
    }

    if offset % wgpu::COPY_BUFFER_ALIGNMENT != 0 || len % wgpu::COPY_BUFFER_ALIGNMENT != 0 {
        return Err(DeviceError::Misaligned { offset, len });
    }

    Ok(())
}
