use crate::coords::{ColorRgba, Viewport};
use crate::geometry::{DrawCall, VertexArray};
use crate::render::RenderTarget;

/// Everything one frame's render pass needs.
pub struct FramePass<'a> {
    pub clear: ColorRgba,
    pub viewport: Viewport,
    /// `None` when the bound program has no GPU pipeline.
    pub pipeline: Option<&'a wgpu::RenderPipeline>,
    pub vertex_array: &'a VertexArray,
    pub draw: Option<DrawCall>,
}

/// Clears the target and issues the frame's single draw.
pub fn record(target: &mut RenderTarget<'_>, pass: &FramePass<'_>) {
    let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("tessera frame pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(pass.clear.to_wgpu()),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    let (Some(pipeline), Some(draw)) = (pass.pipeline, pass.draw) else {
        return;
    };

    let (x, y, w, h) = pass.viewport.to_f32();
    rpass.set_viewport(x, y, w, h, 0.0, 1.0);
    rpass.set_pipeline(pipeline);

    let vao = pass.vertex_array;
    rpass.set_vertex_buffer(0, vao.vertex_buffer().buffer().slice(..));

    match draw {
        DrawCall::Arrays { first, count } => {
            rpass.draw(first..first + count, 0..1);
        }
        DrawCall::Indexed { count } => {
            let Some(index) = vao.index_buffer() else {
                return;
            };
            rpass.set_index_buffer(index.buffer().slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..count, 0, 0..1);
        }
    }
}
