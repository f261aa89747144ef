use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::render::RenderCtx;
use crate::scene::{EllipseCmd, PathCmd, ShapeStyle};

use super::common::{
    create_quad_pipeline, create_viewport_ubo, viewport_ubo_layout_entry, InstanceBuffer,
    QuadBuffers, ViewportUniform,
};

/// Extra coverage around each shape so the antialiased edge is not clipped.
const AA_MARGIN: f32 = 1.0;

const KIND_FILLED_ELLIPSE: f32 = 0.0;
const KIND_STROKED_ELLIPSE: f32 = 1.0;
const KIND_SEGMENT: f32 = 2.0;

/// Renderer for `DrawCmd::Ellipse` and `DrawCmd::Path`.
///
/// Every shape becomes one instanced quad evaluated with a signed distance
/// function in the fragment shader:
/// - ellipses (filled or stroked) cover their bounding box
/// - each path segment is a butt-capped line of the stroke width
///
/// Instances are accumulated for the whole frame with the `push_*` methods,
/// uploaded once with [`ShapeRenderer::upload`], and drawn in slices so the
/// caller can interleave them with other renderers in paint order.
pub struct ShapeRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad: Option<QuadBuffers>,

    instances: Vec<ShapeInstance>,
    instance_buffer: InstanceBuffer,

    warned_filled_path: bool,
}

impl Default for ShapeRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            quad: None,
            instances: Vec::new(),
            instance_buffer: InstanceBuffer::default(),
            warned_filled_path: false,
        }
    }
}

impl ShapeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the instances recorded for the previous frame.
    pub fn begin_frame(&mut self) {
        self.instances.clear();
    }

    /// Number of instances recorded this frame.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Records an ellipse and returns its instance range.
    pub fn push_ellipse(&mut self, cmd: &EllipseCmd) -> Range<u32> {
        let start = self.instances.len() as u32;
        if let Some(instance) = ellipse_instance(cmd) {
            self.instances.push(instance);
        }
        start..self.instances.len() as u32
    }

    /// Records every segment of a stroked path and returns the instance range.
    ///
    /// Filled paths are not supported and record nothing.
    pub fn push_path(&mut self, cmd: &PathCmd) -> Range<u32> {
        let start = self.instances.len() as u32;

        let stroke = match cmd.style {
            ShapeStyle::Stroke(stroke) => stroke,
            ShapeStyle::Fill(_) => {
                if !self.warned_filled_path {
                    log::debug!("ShapeRenderer: filled paths are not supported; skipping");
                    self.warned_filled_path = true;
                }
                return start..start;
            }
        };

        let color = stroke.color.to_array();
        self.instances.extend(
            cmd.segments()
                .filter_map(|(a, b)| segment_instance(a, b, stroke.width, color)),
        );
        start..self.instances.len() as u32
    }

    /// Uploads this frame's instances and the viewport uniform.
    pub fn upload(&mut self, ctx: &RenderCtx<'_>) {
        if self.instances.is_empty() {
            return;
        }
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx, "clockface shape"));
        }

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));
        }
        self.instance_buffer.upload(ctx, "clockface shape instance vbo", &self.instances);
    }

    /// Draws `range` of the uploaded instances into an open pass.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        if range.is_empty() {
            return;
        }
        let Some(pipeline) = self.pipeline.as_ref() else { return; };
        let Some(bind_group) = self.bind_group.as_ref() else { return; };
        let Some(quad) = self.quad.as_ref() else { return; };
        let Some(instance_vbo) = self.instance_buffer.buffer() else { return; };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, range);
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("clockface shape shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shape.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("clockface shape bgl"),
            entries: &[viewport_ubo_layout_entry()],
        });

        let pipeline =
            create_quad_pipeline(ctx, "clockface shape", &shader, &bgl, ShapeInstance::layout());

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return; };

        let viewport_ubo = create_viewport_ubo(ctx, "clockface shape viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("clockface shape bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }
}

// ── instance building ─────────────────────────────────────────────────────

fn ellipse_instance(cmd: &EllipseCmd) -> Option<ShapeInstance> {
    let rect = cmd.rect.normalized();
    if !rect.is_finite() || rect.is_empty() {
        return None;
    }

    let center = rect.center();
    let radii = Vec2::new(rect.width() / 2.0, rect.height() / 2.0);

    let (kind, stroke_width) = match cmd.style {
        ShapeStyle::Fill(_) => (KIND_FILLED_ELLIPSE, 0.0),
        ShapeStyle::Stroke(s) if s.width > 0.0 && s.width.is_finite() => {
            (KIND_STROKED_ELLIPSE, s.width)
        }
        ShapeStyle::Stroke(_) => return None,
    };

    let color = cmd.style.color();
    if !color.is_finite() {
        return None;
    }

    let margin = AA_MARGIN + stroke_width / 2.0;
    Some(ShapeInstance {
        bounds_min: [rect.min().x - margin, rect.min().y - margin],
        bounds_max: [rect.max().x + margin, rect.max().y + margin],
        p0: [center.x, center.y],
        p1: [radii.x, radii.y],
        params: [kind, stroke_width, 0.0, 0.0],
        color: color.to_array(),
    })
}

fn segment_instance(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Option<ShapeInstance> {
    if !a.is_finite() || !b.is_finite() || !width.is_finite() || width <= 0.0 {
        return None;
    }
    if a.distance(b) <= f32::EPSILON {
        return None;
    }

    let margin = AA_MARGIN + width / 2.0;
    Some(ShapeInstance {
        bounds_min: [a.x.min(b.x) - margin, a.y.min(b.y) - margin],
        bounds_max: [a.x.max(b.x) + margin, a.y.max(b.y) + margin],
        p0: [a.x, a.y],
        p1: [b.x, b.y],
        params: [KIND_SEGMENT, width, 0.0, 0.0],
        color,
    })
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (64 bytes):
///
///  offset  0  bounds_min [f32; 2]   loc 1
///  offset  8  bounds_max [f32; 2]   loc 2
///  offset 16  p0         [f32; 2]   loc 3   ellipse center | segment start
///  offset 24  p1         [f32; 2]   loc 4   ellipse radii  | segment end
///  offset 32  params     [f32; 4]   loc 5   kind, stroke width, unused, unused
///  offset 48  color      [f32; 4]   loc 6   premultiplied
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable, PartialEq)]
struct ShapeInstance {
    bounds_min: [f32; 2],
    bounds_max: [f32; 2],
    p0: [f32; 2],
    p1: [f32; 2],
    params: [f32; 4],
    color: [f32; 4],
}

impl ShapeInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        1 => Float32x2, // bounds_min
        2 => Float32x2, // bounds_max
        3 => Float32x2, // p0
        4 => Float32x2, // p1
        5 => Float32x4, // params
        6 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;
    use crate::scene::Stroke;

    fn stroked_path(points: Vec<Vec2>, width: f32) -> PathCmd {
        PathCmd::new(points, false, ShapeStyle::Stroke(Stroke::new(width, Color::white())))
    }

    #[test]
    fn instance_is_64_bytes() {
        assert_eq!(std::mem::size_of::<ShapeInstance>(), 64);
    }

    // ── ellipses ──────────────────────────────────────────────────────────

    #[test]
    fn filled_ellipse_uses_center_and_radii() {
        let cmd = EllipseCmd::new(Rect::new(10.0, 20.0, 40.0, 20.0), ShapeStyle::Fill(Color::red()));
        let inst = ellipse_instance(&cmd).expect("instance");
        assert_eq!(inst.p0, [30.0, 30.0]);
        assert_eq!(inst.p1, [20.0, 10.0]);
        assert_eq!(inst.params[0], KIND_FILLED_ELLIPSE);
        assert_eq!(inst.bounds_min, [9.0, 19.0]);
        assert_eq!(inst.bounds_max, [51.0, 41.0]);
    }

    #[test]
    fn stroked_ellipse_bounds_cover_half_the_stroke() {
        let cmd = EllipseCmd::new(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            ShapeStyle::Stroke(Stroke::new(2.0, Color::white())),
        );
        let inst = ellipse_instance(&cmd).expect("instance");
        assert_eq!(inst.params[0], KIND_STROKED_ELLIPSE);
        assert_eq!(inst.params[1], 2.0);
        assert_eq!(inst.bounds_min, [-2.0, -2.0]);
        assert_eq!(inst.bounds_max, [102.0, 102.0]);
    }

    #[test]
    fn empty_or_non_finite_ellipse_is_skipped() {
        let fill = ShapeStyle::Fill(Color::white());
        assert!(ellipse_instance(&EllipseCmd::new(Rect::new(0.0, 0.0, 0.0, 10.0), fill)).is_none());
        assert!(
            ellipse_instance(&EllipseCmd::new(Rect::new(f32::NAN, 0.0, 5.0, 5.0), fill)).is_none()
        );
    }

    #[test]
    fn zero_width_stroke_is_skipped() {
        let cmd = EllipseCmd::new(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            ShapeStyle::Stroke(Stroke::new(0.0, Color::white())),
        );
        assert!(ellipse_instance(&cmd).is_none());
    }

    // ── paths ─────────────────────────────────────────────────────────────

    #[test]
    fn stroked_path_emits_one_instance_per_segment() {
        let mut r = ShapeRenderer::new();
        let first = r.push_ellipse(&EllipseCmd::new(
            Rect::new(0.0, 0.0, 4.0, 4.0),
            ShapeStyle::Fill(Color::white()),
        ));
        let path = r.push_path(&stroked_path(
            vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)],
            3.0,
        ));
        assert_eq!(first, 0..1);
        assert_eq!(path, 1..3);
        assert_eq!(r.instance_count(), 3);
    }

    #[test]
    fn segment_keeps_endpoints_and_width() {
        let inst = segment_instance(Vec2::new(5.0, 5.0), Vec2::new(5.0, -15.0), 4.0, [1.0; 4])
            .expect("instance");
        assert_eq!(inst.p0, [5.0, 5.0]);
        assert_eq!(inst.p1, [5.0, -15.0]);
        assert_eq!(inst.params, [KIND_SEGMENT, 4.0, 0.0, 0.0]);
        assert_eq!(inst.bounds_min, [2.0, -18.0]);
        assert_eq!(inst.bounds_max, [8.0, 8.0]);
    }

    #[test]
    fn zero_length_segment_is_skipped() {
        let p = Vec2::new(3.0, 3.0);
        assert!(segment_instance(p, p, 1.0, [1.0; 4]).is_none());
    }

    #[test]
    fn filled_path_records_nothing() {
        let mut r = ShapeRenderer::new();
        let cmd = PathCmd::new(
            vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)],
            true,
            ShapeStyle::Fill(Color::white()),
        );
        assert!(r.push_path(&cmd).is_empty());
        assert_eq!(r.instance_count(), 0);
    }

    #[test]
    fn begin_frame_restarts_ranges() {
        let mut r = ShapeRenderer::new();
        r.push_path(&stroked_path(vec![Vec2::zero(), Vec2::new(1.0, 0.0)], 1.0));
        r.begin_frame();
        let range = r.push_path(&stroked_path(vec![Vec2::zero(), Vec2::new(1.0, 0.0)], 1.0));
        assert_eq!(range, 0..1);
    }
}
