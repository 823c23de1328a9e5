use crate::device::{CanvasConfig, SurfaceErrorAction};
use crate::pass::PassBinding;
use crate::scene::PassEncoder;
use crate::targets::{SurfaceSize, TargetAllocator};

/// GPU side of one frame iteration, as driven by `FrameScheduler`.
///
/// `GraphicsContext` is the production implementation.
pub trait FrameBackend {
    /// Texture view type shared by the surface and the offscreen targets.
    type View;

    /// Acquired presentable image.
    type Frame;

    /// Finished, not yet submitted commands.
    type Commands;

    type Allocator: TargetAllocator<View = Self::View>;

    fn canvas(&self) -> &CanvasConfig;

    /// Size the window currently asks for. May be empty while minimized.
    fn surface_size(&self) -> SurfaceSize;

    fn allocator(&mut self) -> &mut Self::Allocator;

    /// Acquires this iteration's surface image.
    ///
    /// Any recovery (reconfiguring a lost surface) has already happened when this
    /// returns an error; the action tells the caller what to do with the frame.
    fn acquire(&mut self) -> Result<Self::Frame, SurfaceErrorAction>;

    fn frame_view(frame: &Self::Frame) -> &Self::View;

    /// Opens one render pass described by `binding`, lets `record` append to it, closes
    /// it and finishes the command buffer.
    fn encode(
        &mut self,
        binding: PassBinding<'_, Self::View>,
        record: &mut dyn FnMut(&mut dyn PassEncoder),
    ) -> Self::Commands;

    /// Submits `commands` and presents `frame`.
    fn submit(&mut self, frame: Self::Frame, commands: Self::Commands);
}
