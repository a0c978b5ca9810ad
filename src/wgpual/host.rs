use log::trace;

use super::{check_write, BufferDevice, BufferUsage};
use crate::DeviceError;

/// Handle to a buffer owned by a [`HostDevice`].
#[derive(Debug, PartialEq, Eq)]
pub struct HostBuffer {
    id: usize,
}

impl HostBuffer {
    /// Identifier of the buffer within its device.
    pub fn id(&self) -> usize {
        self.id
    }
}

/// One successful [`BufferDevice::upload`] to a [`HostDevice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadRecord {
    /// Identifier of the written buffer.
    pub buffer: usize,
    /// Byte offset of the write.
    pub offset: u64,
    /// Length of the write in bytes.
    pub len: u64,
}

struct HostAllocation {
    bytes: Vec<u8>,
    usage: BufferUsage,
}

/// Buffer device backed by host memory.
///
/// Follows the same rules as the GPU (bounds and 4-byte alignment) and records
/// every upload, which makes it useful for headless runs and for checking what
/// a mesh writes.
#[derive(Default)]
pub struct HostDevice {
    buffers: Vec<Option<HostAllocation>>,
    capacity: Option<u64>,
    uploads: Vec<UploadRecord>,
}

impl HostDevice {
    /// Creates a device without a memory limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a device that refuses allocations once `capacity` bytes are in
    /// use.
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Bytes held by live buffers.
    pub fn allocated(&self) -> u64 {
        self.buffers
            .iter()
            .flatten()
            .map(|allocation| allocation.bytes.len() as u64)
            .sum()
    }

    /// Number of buffers that have not been released.
    pub fn live_buffers(&self) -> usize {
        self.buffers.iter().flatten().count()
    }

    /// Current content of `buffer`, or `None` once it has been released.
    pub fn contents(&self, buffer: &HostBuffer) -> Option<&[u8]> {
        self.allocation(buffer.id).map(|allocation| allocation.bytes.as_slice())
    }

    /// Usage `buffer` was allocated with.
    pub fn usage(&self, buffer: &HostBuffer) -> Option<BufferUsage> {
        self.allocation(buffer.id).map(|allocation| allocation.usage)
    }

    /// Every upload since creation or the last [`clear_uploads`](Self::clear_uploads).
    pub fn uploads(&self) -> &[UploadRecord] {
        &self.uploads
    }

    /// Forgets the recorded uploads.
    pub fn clear_uploads(&mut self) {
        self.uploads.clear();
    }

    fn allocation(&self, id: usize) -> Option<&HostAllocation> {
        self.buffers.get(id).and_then(Option::as_ref)
    }
}

impl BufferDevice for HostDevice {
    type Buffer = HostBuffer;

    fn allocate(
        &mut self,
        label: Option<&str>,
        size: u64,
        usage: BufferUsage,
    ) -> Result<HostBuffer, DeviceError> {
        if let Some(capacity) = self.capacity {
            let limit = capacity.saturating_sub(self.allocated());

            if size > limit {
                return Err(DeviceError::Allocation { size, limit });
            }
        }

        let id = self.buffers.len();
        trace!("allocate {label:?}: buffer {id}, {size} bytes, {usage:?}");

        self.buffers.push(Some(HostAllocation {
            bytes: vec![0; size as usize],
            usage,
        }));

        Ok(HostBuffer { id })
    }

    fn upload(
        &mut self,
        buffer: &HostBuffer,
        offset: u64,
        bytes: &[u8],
    ) -> Result<(), DeviceError> {
        let allocation = self
            .buffers
            .get_mut(buffer.id)
            .and_then(Option::as_mut)
            .ok_or(DeviceError::Released)?;

        let len = bytes.len() as u64;
        check_write(offset, len, allocation.bytes.len() as u64)?;

        let start = offset as usize;
        allocation.bytes[start..start + bytes.len()].copy_from_slice(bytes);

        trace!("upload: buffer {}, {} bytes at offset {}", buffer.id, len, offset);
        self.uploads.push(UploadRecord {
            buffer: buffer.id,
            offset,
            len,
        });

        Ok(())
    }

    fn release(&mut self, buffer: HostBuffer) {
        if let Some(slot) = self.buffers.get_mut(buffer.id) {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_writes_in_place() {
        let mut device = HostDevice::new();
        let buffer = device.allocate(None, 8, BufferUsage::Vertex).unwrap();

        device.upload(&buffer, 4, &[1, 2, 3, 4]).unwrap();

        assert_eq!(device.contents(&buffer), Some(&[0, 0, 0, 0, 1, 2, 3, 4][..]));
        assert_eq!(
            device.uploads(),
            &[UploadRecord {
                buffer: 0,
                offset: 4,
                len: 4
            }]
        );
    }

    #[test]
    fn capacity_bounds_live_allocations() {
        let mut device = HostDevice::with_capacity(16);
        let first = device.allocate(None, 12, BufferUsage::Vertex).unwrap();

        assert_eq!(
            device.allocate(None, 8, BufferUsage::Index),
            Err(DeviceError::Allocation { size: 8, limit: 4 })
        );

        device.release(first);
        assert!(device.allocate(None, 8, BufferUsage::Index).is_ok());
        assert_eq!(device.live_buffers(), 1);
    }

    #[test]
    fn rejected_writes_leave_no_trace() {
        let mut device = HostDevice::new();
        let buffer = device.allocate(Some("tiny"), 4, BufferUsage::Index).unwrap();

        assert!(device.upload(&buffer, 0, &[1; 8]).is_err());
        assert!(device.uploads().is_empty());
        assert_eq!(device.contents(&buffer), Some(&[0; 4][..]));
        assert_eq!(device.usage(&buffer), Some(BufferUsage::Index));
    }
}
