use std::error::Error;

use log::trace;

use super::{check_write, BufferDevice, BufferUsage};
use crate::DeviceError;

/// Container for the GPU objects meshes upload to.
///
/// Surface creation and presentation belong to the application; this only
/// holds what buffer management needs.
pub struct Gpu {
    /// The WGPU device.
    pub device: wgpu::Device,
    /// The WGPU queue.
    pub queue: wgpu::Queue,
}

/// Parameters for when creating a new GPU adapter.
pub struct GpuOptions {
    /// Provides a **hint** to indicate which GPU to use. `LowPower` means to
    /// use an integrated GPU, while `HighPower` means to use a dedicated GPU.
    /// Default is `None` (provides no hint).
    pub power_preference: wgpu::PowerPreference,
}

impl Default for GpuOptions {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::None,
        }
    }
}

impl Gpu {
    /// Requests an adapter and a device with the specified options.
    ///
    /// # Returns
    ///
    /// A [`Future`](std::future::Future) where the new GPU is returned, or an
    /// error if no adapter is available or the
    /// [`RequestDeviceError`](wgpu::RequestDeviceError).
    pub async fn new(options: GpuOptions) -> Result<Self, Box<dyn Error>> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: options.power_preference,
                force_fallback_adapter: false,
                compatible_surface: None,
            })
            .await
            .ok_or("no suitable GPU adapter found")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        Ok(Self::from_parts(device, queue))
    }

    /// Wraps a device and queue created elsewhere, e.g. alongside a surface.
    pub fn from_parts(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }
}

impl BufferDevice for Gpu {
    type Buffer = wgpu::Buffer;

    fn allocate(
        &mut self,
        label: Option<&str>,
        size: u64,
        usage: BufferUsage,
    ) -> Result<wgpu::Buffer, DeviceError> {
        let limit = self.device.limits().max_buffer_size;

        if size > limit {
            return Err(DeviceError::Allocation { size, limit });
        }

        Ok(self.device.create_buffer(&wgpu::BufferDescriptor {
            label,
            size,
            usage: usage.into(),
            mapped_at_creation: false,
        }))
    }

    fn upload(
        &mut self,
        buffer: &wgpu::Buffer,
        offset: u64,
        bytes: &[u8],
    ) -> Result<(), DeviceError> {
        check_write(offset, bytes.len() as u64, buffer.size())?;

        trace!("write_buffer: {} bytes at offset {}", bytes.len(), offset);
        self.queue.write_buffer(buffer, offset, bytes);

        Ok(())
    }

    fn release(&mut self, buffer: wgpu::Buffer) {
        buffer.destroy();
    }
}
