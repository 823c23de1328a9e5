use std::ops::Range;

/// Commands a drawable may append to the open render pass.
///
/// Beginning or ending the pass and finishing the command buffer are not part of
/// this trait; the frame loop owns both.
pub trait PassEncoder {
    fn set_pipeline(&mut self, pipeline: &wgpu::RenderPipeline);

    fn set_bind_group(&mut self, index: u32, bind_group: &wgpu::BindGroup);

    fn set_vertex_buffer(&mut self, slot: u32, buffer: wgpu::BufferSlice<'_>);

    fn set_index_buffer(&mut self, buffer: wgpu::BufferSlice<'_>, format: wgpu::IndexFormat);

    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>);

    fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32, instances: Range<u32>);

    fn insert_debug_marker(&mut self, label: &str);
}

impl PassEncoder for wgpu::RenderPass<'_> {
    fn set_pipeline(&mut self, pipeline: &wgpu::RenderPipeline) {
        wgpu::RenderPass::set_pipeline(self, pipeline);
    }

    fn set_bind_group(&mut self, index: u32, bind_group: &wgpu::BindGroup) {
        wgpu::RenderPass::set_bind_group(self, index, bind_group, &[]);
    }

    fn set_vertex_buffer(&mut self, slot: u32, buffer: wgpu::BufferSlice<'_>) {
        wgpu::RenderPass::set_vertex_buffer(self, slot, buffer);
    }

    fn set_index_buffer(&mut self, buffer: wgpu::BufferSlice<'_>, format: wgpu::IndexFormat) {
        wgpu::RenderPass::set_index_buffer(self, buffer, format);
    }

    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>) {
        wgpu::RenderPass::draw(self, vertices, instances);
    }

    fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32, instances: Range<u32>) {
        wgpu::RenderPass::draw_indexed(self, indices, base_vertex, instances);
    }

    fn insert_debug_marker(&mut self, label: &str) {
        wgpu::RenderPass::insert_debug_marker(self, label);
    }
}
