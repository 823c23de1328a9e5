use crate::device::CanvasConfig;

use super::PassVariant;

/// Opaque black; every frame redraws the full surface.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;
pub const CLEAR_DEPTH: f32 = 1.0;

/// Load/store operations. Fixed when the builder is created.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PassOps {
    pub color: wgpu::Operations<wgpu::Color>,
    pub depth: wgpu::Operations<f32>,
}

impl Default for PassOps {
    fn default() -> Self {
        Self {
            color: wgpu::Operations {
                load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                store: wgpu::StoreOp::Store,
            },
            depth: wgpu::Operations {
                load: wgpu::LoadOp::Clear(CLEAR_DEPTH),
                store: wgpu::StoreOp::Store,
            },
        }
    }
}

/// Holds the pass shape for the lifetime of a canvas and binds per-frame views.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderPassBuilder {
    variant: PassVariant,
    ops: PassOps,
}

impl RenderPassBuilder {
    pub fn new(canvas: &CanvasConfig) -> Self {
        Self::with_variant(PassVariant::for_canvas(canvas))
    }

    pub fn with_variant(variant: PassVariant) -> Self {
        Self {
            variant,
            ops: PassOps::default(),
        }
    }

    pub fn variant(&self) -> PassVariant {
        self.variant
    }

    pub fn ops(&self) -> PassOps {
        self.ops
    }

    /// Binds this frame's views.
    ///
    /// Without multisampling `surface` is the color attachment. With it, `msaa` is the
    /// color attachment and `surface` its resolve target. `depth` is bound only for
    /// depth variants; extra views are ignored.
    ///
    /// Returns `None` if a view the variant needs is missing.
    pub fn bind_views<'v, V>(
        &self,
        surface: &'v V,
        msaa: Option<&'v V>,
        depth: Option<&'v V>,
    ) -> Option<PassBinding<'v, V>> {
        let (color, resolve_target) = if self.variant.resolves() {
            (msaa?, Some(surface))
        } else {
            (surface, None)
        };

        let depth = if self.variant.has_depth() { Some(depth?) } else { None };

        Some(PassBinding {
            variant: self.variant,
            ops: self.ops,
            color,
            resolve_target,
            depth,
        })
    }
}

/// A pass descriptor with its per-frame views filled in.
pub struct PassBinding<'v, V> {
    pub variant: PassVariant,
    pub ops: PassOps,
    pub color: &'v V,
    pub resolve_target: Option<&'v V>,
    pub depth: Option<&'v V>,
}

impl<'v> PassBinding<'v, wgpu::TextureView> {
    pub fn color_attachment(&self) -> wgpu::RenderPassColorAttachment<'v> {
        wgpu::RenderPassColorAttachment {
            view: self.color,
            resolve_target: self.resolve_target,
            ops: self.ops.color,
            depth_slice: None,
        }
    }

    pub fn depth_attachment(&self) -> Option<wgpu::RenderPassDepthStencilAttachment<'v>> {
        self.depth.map(|view| wgpu::RenderPassDepthStencilAttachment {
            view,
            depth_ops: Some(self.ops.depth),
            stencil_ops: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: &str = "surface";
    const MSAA: &str = "msaa";
    const DEPTH: &str = "depth";

    #[test]
    fn basic_binds_surface_directly() {
        let b = RenderPassBuilder::with_variant(PassVariant::Basic);
        let bound = b.bind_views(&SURFACE, Some(&MSAA), Some(&DEPTH)).unwrap();

        assert_eq!(*bound.color, SURFACE);
        assert!(bound.resolve_target.is_none());
        assert!(bound.depth.is_none());
    }

    #[test]
    fn multisampled_resolves_into_surface() {
        let b = RenderPassBuilder::with_variant(PassVariant::Multisampled);
        let bound = b.bind_views(&SURFACE, Some(&MSAA), None).unwrap();

        assert_eq!(*bound.color, MSAA);
        assert_eq!(bound.resolve_target.copied(), Some(SURFACE));
        assert!(bound.depth.is_none());
    }

    #[test]
    fn depth_variants_bind_depth() {
        let b = RenderPassBuilder::with_variant(PassVariant::DepthMultisampled);
        let bound = b.bind_views(&SURFACE, Some(&MSAA), Some(&DEPTH)).unwrap();
        assert_eq!(bound.depth.copied(), Some(DEPTH));

        let b = RenderPassBuilder::with_variant(PassVariant::Depth);
        let bound = b.bind_views(&SURFACE, None, Some(&DEPTH)).unwrap();
        assert_eq!(*bound.color, SURFACE);
        assert!(bound.resolve_target.is_none());
        assert_eq!(bound.depth.copied(), Some(DEPTH));
    }

    #[test]
    fn missing_required_view_yields_none() {
        let b = RenderPassBuilder::with_variant(PassVariant::Multisampled);
        assert!(b.bind_views(&SURFACE, None, None).is_none());

        let b = RenderPassBuilder::with_variant(PassVariant::Depth);
        assert!(b.bind_views(&SURFACE, None, None).is_none());
    }

    #[test]
    fn ops_are_fixed_across_frames() {
        let b = RenderPassBuilder::with_variant(PassVariant::DepthMultisampled);
        let first = b.bind_views(&SURFACE, Some(&MSAA), Some(&DEPTH)).unwrap().ops;
        let second = b.bind_views(&"other", Some(&"other-msaa"), Some(&"d2")).unwrap().ops;

        assert_eq!(first, second);
        assert_eq!(first.color.load, wgpu::LoadOp::Clear(wgpu::Color::BLACK));
        assert_eq!(first.color.store, wgpu::StoreOp::Store);
        assert_eq!(first.depth.load, wgpu::LoadOp::Clear(1.0));
        assert_eq!(CLEAR_COLOR.a, 1.0);
    }
}
