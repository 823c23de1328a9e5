/// Filters for work that only fails on bad input (shaders, pipelines, bind groups).
pub const VALIDATION: &[wgpu::ErrorFilter] = &[wgpu::ErrorFilter::Validation];

/// Filters for allocations, which can also run out of device memory.
pub const ALLOCATION: &[wgpu::ErrorFilter] = &[wgpu::ErrorFilter::OutOfMemory, wgpu::ErrorFilter::Validation];

/// Runs `f` inside wgpu error scopes and returns its value together with the first
/// error the device reported while it ran.
///
/// Errors caught here never reach the device's uncaptured-error handler.
pub fn capture_errors<T>(
    device: &wgpu::Device,
    filters: &[wgpu::ErrorFilter],
    f: impl FnOnce() -> T,
) -> (T, Option<wgpu::Error>) {
    let scopes: Vec<_> = filters.iter().map(|filter| device.push_error_scope(*filter)).collect();
    let value = f();

    let mut first = None;
    for scope in scopes.into_iter().rev() {
        if let Some(err) = pollster::block_on(scope.pop()) {
            first.get_or_insert(err);
        }
    }
    (value, first)
}
