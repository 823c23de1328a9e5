use crate::error::Result;
use crate::shader::ShaderSource;

use super::{initialize, Drawable, FrameContext, SetupCtx};

/// Ordered collection of drawables. Insertion order is render order.
///
/// There is no hierarchy or transform composition; each drawable is self-contained.
#[derive(Default)]
pub struct SceneGraph {
    drawables: Vec<Box<dyn Drawable>>,
}

impl SceneGraph {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes `drawable` and appends it.
    ///
    /// On failure the drawable is dropped and the scene is unchanged.
    pub fn add<D>(&mut self, mut drawable: D, setup: &SetupCtx<'_>, source: &ShaderSource) -> Result<()>
    where
        D: Drawable + 'static,
    {
        initialize(&mut drawable, setup, source)?;
        self.push(Box::new(drawable));
        Ok(())
    }

    /// Appends an already-initialized drawable.
    #[inline]
    pub fn push(&mut self, drawable: Box<dyn Drawable>) {
        self.drawables.push(drawable);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Drops every drawable (and with them their GPU resources).
    pub fn clear(&mut self) {
        self.drawables.clear();
    }

    /// Labels in render order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.drawables.iter().map(|d| d.label())
    }

    /// Records every drawable into the open pass, strictly in insertion order.
    ///
    /// Each drawable's commands are preceded by a debug marker carrying its label.
    pub fn render_all(&self, ctx: &mut FrameContext<'_>) {
        for drawable in &self.drawables {
            ctx.pass.insert_debug_marker(drawable.label());
            drawable.render(ctx);
        }
    }
}

impl std::fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.labels()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::ops::Range;

    use super::*;
    use crate::device::{CanvasConfig, RendererSettings};
    use crate::scene::PassEncoder;
    use crate::targets::SurfaceSize;
    use crate::time::FrameClock;

    #[derive(Default)]
    struct Log(Vec<String>);

    impl PassEncoder for Log {
        fn set_pipeline(&mut self, _pipeline: &wgpu::RenderPipeline) {}
        fn set_bind_group(&mut self, _index: u32, _bind_group: &wgpu::BindGroup) {}
        fn set_vertex_buffer(&mut self, _slot: u32, _buffer: wgpu::BufferSlice<'_>) {}
        fn set_index_buffer(&mut self, _buffer: wgpu::BufferSlice<'_>, _format: wgpu::IndexFormat) {}
        fn draw(&mut self, vertices: Range<u32>, _instances: Range<u32>) {
            self.0.push(format!("draw {}", vertices.end));
        }
        fn draw_indexed(&mut self, indices: Range<u32>, _base_vertex: i32, _instances: Range<u32>) {
            self.0.push(format!("draw_indexed {}", indices.end));
        }
        fn insert_debug_marker(&mut self, label: &str) {
            self.0.push(format!("marker {label}"));
        }
    }

    struct Fixed {
        label: &'static str,
        vertices: u32,
    }

    impl Drawable for Fixed {
        fn label(&self) -> &str {
            self.label
        }
        fn init_shader_stage(&mut self, _: &SetupCtx<'_>, _: &ShaderSource) -> anyhow::Result<()> {
            Ok(())
        }
        fn init_attribute_storage(&mut self, _: &SetupCtx<'_>) -> anyhow::Result<()> {
            Ok(())
        }
        fn init_pipeline(&mut self, _: &SetupCtx<'_>) -> anyhow::Result<()> {
            Ok(())
        }
        fn render(&self, ctx: &mut FrameContext<'_>) {
            ctx.pass.draw(0..self.vertices, 0..1);
        }
    }

    #[test]
    fn renders_in_insertion_order_with_markers() {
        let mut scene = SceneGraph::new();
        scene.push(Box::new(Fixed { label: "a", vertices: 3 }));
        scene.push(Box::new(Fixed { label: "b", vertices: 6 }));
        scene.push(Box::new(Fixed { label: "c", vertices: 9 }));

        let canvas = CanvasConfig::new(wgpu::TextureFormat::Bgra8UnormSrgb, RendererSettings::default());
        let mut log = Log::default();
        let mut ctx = FrameContext {
            pass: &mut log,
            canvas: &canvas,
            size: SurfaceSize::new(10, 10),
            time: FrameClock::new().tick(),
        };
        scene.render_all(&mut ctx);

        assert_eq!(
            log.0,
            ["marker a", "draw 3", "marker b", "draw 6", "marker c", "draw 9"]
        );
        assert_eq!(scene.labels().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn clear_empties_the_scene() {
        let mut scene = SceneGraph::new();
        scene.push(Box::new(Fixed { label: "a", vertices: 3 }));
        assert_eq!(scene.len(), 1);
        scene.clear();
        assert!(scene.is_empty());
    }
}
