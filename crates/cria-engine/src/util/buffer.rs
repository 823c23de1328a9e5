use wgpu::util::DeviceExt;

/// Creates a buffer initialized with `data`.
///
/// `COPY_DST` is always added to `usage` so the buffer can be rewritten later with
/// `Queue::write_buffer`.
pub fn create_buffer_init<T: bytemuck::Pod>(
    device: &wgpu::Device,
    label: &str,
    data: &[T],
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(data),
        usage: with_copy_dst(usage),
    })
}

#[inline]
fn with_copy_dst(usage: wgpu::BufferUsages) -> wgpu::BufferUsages {
    usage | wgpu::BufferUsages::COPY_DST
}
