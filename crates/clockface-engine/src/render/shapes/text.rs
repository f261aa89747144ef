use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::RenderCtx;
use crate::scene::TextCmd;
use crate::text::FontSystem;

use super::common::{
    create_quad_pipeline, create_viewport_ubo, viewport_ubo_layout_entry, InstanceBuffer,
    QuadBuffers, ViewportUniform,
};

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas
/// Layout sizes are snapped to this step so a continuously resized window
/// reuses rasterized glyphs instead of minting new cache keys every pixel.
const SIZE_STEP: f32 = 0.5;

/// Snaps a font size to the nearest [`SIZE_STEP`], never below one step.
fn snap_font_size(size: f32) -> f32 {
    ((size / SIZE_STEP).round() * SIZE_STEP).max(SIZE_STEP)
}

// ── cached glyph ──────────────────────────────────────────────────────────

struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Shelf packer for the glyph atlas.
///
/// Glyphs are placed left to right on rows; a new row starts when the next
/// glyph does not fit horizontally.
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    /// Reserves a `w × h` slot and returns its top-left corner.
    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > self.size || w + 2 * GLYPH_PADDING > self.size {
            self.full = true;
            return None;
        }

        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

// ── atlas bookkeeping ─────────────────────────────────────────────────────

/// CPU side of the glyph atlas: slot packing plus the glyph cache.
///
/// When the atlas runs out of room every cached glyph is evicted and packing
/// restarts from the top-left corner. This happens at most once per frame;
/// each eviction bumps `generation` so the scene renderer can replay the
/// frame's text against the fresh atlas.
struct GlyphAtlas {
    packer: ShelfPacker,
    glyphs: HashMap<GlyphRasterConfig, CachedGlyph>,
    generation: u64,
    evicted_this_frame: bool,
}

impl GlyphAtlas {
    fn new(size: u32) -> Self {
        Self {
            packer: ShelfPacker::new(size),
            glyphs: HashMap::new(),
            generation: 0,
            evicted_this_frame: false,
        }
    }

    fn begin_frame(&mut self) {
        self.evicted_this_frame = false;
    }

    fn get(&self, key: &GlyphRasterConfig) -> Option<&CachedGlyph> {
        self.glyphs.get(key)
    }

    fn insert(&mut self, key: GlyphRasterConfig, glyph: CachedGlyph) {
        self.glyphs.insert(key, glyph);
    }

    /// Reserves a `w × h` slot, evicting the whole cache once per frame when full.
    fn reserve(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if let Some(slot) = self.packer.allocate(w, h) {
            return Some(slot);
        }
        if self.evicted_this_frame {
            return None;
        }

        log::debug!("glyph atlas full, evicting {} cached glyphs", self.glyphs.len());
        self.packer = ShelfPacker::new(self.packer.size);
        self.glyphs.clear();
        self.generation += 1;
        self.evicted_this_frame = true;
        self.packer.allocate(w, h)
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Text`.
///
/// Maintains a 1024 × 1024 R8Unorm glyph atlas. Glyphs are rasterized on
/// first use via fontdue and cached, keyed by `GlyphRasterConfig` (font,
/// glyph index and snapped pixel size), until the atlas fills up.
///
/// Like the shape renderer, instances are accumulated per frame with
/// [`TextRenderer::push_text`], uploaded once and drawn in slices.
pub struct TextRenderer {
    // pipeline
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    // bindings
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    // atlas
    atlas_texture: Option<wgpu::Texture>,
    atlas_view: Option<wgpu::TextureView>,
    atlas: GlyphAtlas,
    warned_atlas_full: bool,

    // geometry
    quad: Option<QuadBuffers>,
    instances: Vec<GlyphInstance>,
    instance_buffer: InstanceBuffer,

    // reusable fontdue layout
    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            sampler: None,
            atlas_texture: None,
            atlas_view: None,
            atlas: GlyphAtlas::new(ATLAS_SIZE),
            warned_atlas_full: false,
            quad: None,
            instances: Vec::new(),
            instance_buffer: InstanceBuffer::default(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a frame: drops the previous frame's instances and re-arms the
    /// once-per-frame atlas eviction. The glyph cache is kept.
    pub fn begin_frame(&mut self) {
        self.clear_instances();
        self.atlas.begin_frame();
    }

    /// Drops recorded instances without starting a new frame.
    pub fn clear_instances(&mut self) {
        self.instances.clear();
    }

    /// Counts atlas evictions. Instances pushed before a change in this value
    /// point at glyphs that are no longer in the atlas.
    pub fn atlas_generation(&self) -> u64 {
        self.atlas.generation
    }

    /// Lays out `cmd`, rasterizes unseen glyphs into the atlas, and returns
    /// the instance range of its glyphs.
    pub fn push_text(
        &mut self,
        ctx: &RenderCtx<'_>,
        cmd: &TextCmd,
        font_system: &FontSystem,
    ) -> Range<u32> {
        let start = self.instances.len() as u32;

        if !cmd.is_drawable() {
            return start..start;
        }
        let Some(font) = cmd.font.and_then(|id| font_system.get(id)) else {
            log::warn!("TextRenderer: unknown font {:?}, skipping", cmd.font);
            return start..start;
        };

        self.ensure_atlas(ctx);

        let color = cmd.color.to_array();

        self.layout.reset(&LayoutSettings {
            x: cmd.bounds.origin.x,
            y: cmd.bounds.origin.y,
            ..LayoutSettings::default()
        });
        self.layout.append(&[font], &TextStyle::new(&cmd.text, snap_font_size(cmd.size), 0));

        // Snapshot glyph positions so the borrow on `self.layout` ends before
        // `self.place_glyph` needs `&mut self`.
        let glyphs: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.x, g.y, g.width, g.height))
            .collect();

        for (key, x, y, w, h) in glyphs {
            if self.atlas.get(&key).is_none() {
                let (metrics, bitmap) = font.rasterize_config(key);
                if metrics.width == 0 || metrics.height == 0 {
                    continue;
                }
                if let Some(entry) =
                    self.place_glyph(ctx, &bitmap, metrics.width as u32, metrics.height as u32)
                {
                    self.atlas.insert(key, entry);
                }
            }

            let Some(cached) = self.atlas.get(&key) else { continue; };

            self.instances.push(GlyphInstance {
                dst_min: [x, y],
                dst_max: [x + w as f32, y + h as f32],
                uv_min: cached.uv_min,
                uv_max: cached.uv_max,
                color,
            });
        }

        start..self.instances.len() as u32
    }

    /// Uploads this frame's glyph instances and the viewport uniform.
    pub fn upload(&mut self, ctx: &RenderCtx<'_>) {
        if self.instances.is_empty() {
            return;
        }
        self.ensure_pipeline(ctx);
        self.ensure_sampler(ctx);
        self.ensure_bindings(ctx);
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx, "clockface text"));
        }

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));
        }
        self.instance_buffer.upload(ctx, "clockface text instance vbo", &self.instances);
    }

    /// Draws `range` of the uploaded glyphs into an open pass.
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

    // ── atlas helpers ──────────────────────────────────────────────────────

    fn place_glyph(
        &mut self,
        ctx: &RenderCtx<'_>,
        bitmap: &[u8],
        w: u32,
        h: u32,
    ) -> Option<CachedGlyph> {
        let Some((gx, gy)) = self.atlas.reserve(w, h) else {
            if !self.warned_atlas_full {
                log::warn!(
                    "TextRenderer: one frame's glyphs overflow the {ATLAS_SIZE}×{ATLAS_SIZE} atlas; \
                     some glyphs will not be rendered"
                );
                self.warned_atlas_full = true;
            }
            return None;
        };

        let atlas = self.atlas_texture.as_ref()?;

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let atlas_f = ATLAS_SIZE as f32;
        Some(CachedGlyph {
            uv_min: [gx as f32 / atlas_f, gy as f32 / atlas_f],
            uv_max: [(gx + w) as f32 / atlas_f, (gy + h) as f32 / atlas_f],
        })
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("clockface text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("clockface text bgl"),
            entries: &[
                viewport_ubo_layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline =
            create_quad_pipeline(ctx, "clockface text", &shader, &bgl, GlyphInstance::layout());

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas_texture.is_some() {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("clockface text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.atlas_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.atlas_texture = Some(texture);
        self.atlas = GlyphAtlas::new(ATLAS_SIZE);
        self.bind_group = None;
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("clockface text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }

        let Some(bgl) = self.bind_group_layout.as_ref() else { return; };
        let Some(atlas_view) = self.atlas_view.as_ref() else { return; };
        let Some(sampler) = self.sampler.as_ref() else { return; };

        let viewport_ubo = create_viewport_ubo(ctx, "clockface text viewport ubo");

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("clockface text bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: viewport_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packer_fills_rows_left_to_right() {
        let mut p = ShelfPacker::new(32);
        assert_eq!(p.allocate(10, 8), Some((1, 1)));
        assert_eq!(p.allocate(10, 5), Some((12, 1)));
    }

    #[test]
    fn packer_wraps_to_next_row_below_tallest_glyph() {
        let mut p = ShelfPacker::new(32);
        p.allocate(10, 8);
        p.allocate(10, 5);
        // 23 + 10 + 1 > 32: new row at 1 + 8 + 1.
        assert_eq!(p.allocate(10, 4), Some((1, 10)));
    }

    #[test]
    fn packer_reports_full_and_stays_full() {
        let mut p = ShelfPacker::new(16);
        assert!(p.allocate(14, 14).is_some());
        assert_eq!(p.allocate(4, 4), None);
        assert_eq!(p.allocate(1, 1), None);
    }

    #[test]
    fn packer_rejects_glyph_wider_than_atlas() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.allocate(20, 2), None);
    }

    // ── atlas eviction ───────────────────────────────────────────────────

    fn key(glyph_index: u16, px: f32) -> GlyphRasterConfig {
        GlyphRasterConfig { glyph_index, px, font_hash: 7 }
    }

    fn cached() -> CachedGlyph {
        CachedGlyph { uv_min: [0.0, 0.0], uv_max: [0.0, 0.0] }
    }

    /// Places the twelve numerals' digit glyphs at `px` the way `push_text` does.
    fn place_numerals(atlas: &mut GlyphAtlas, px: f32) -> bool {
        let w = (px * 0.6).ceil() as u32;
        let h = (px * 0.75).ceil() as u32;
        (0..10u16).all(|digit| {
            let k = key(digit, px);
            if atlas.get(&k).is_some() {
                return true;
            }
            match atlas.reserve(w, h) {
                Some(_) => {
                    atlas.insert(k, cached());
                    true
                }
                None => false,
            }
        })
    }

    #[test]
    fn growing_window_keeps_placing_numerals() {
        let mut atlas = GlyphAtlas::new(ATLAS_SIZE);
        // Square windows from 300 to 2000 px, 16 px margin, 8 + w/50 font.
        for side in 300..=2000 {
            atlas.begin_frame();
            let width = side as f32 - 32.0;
            let px = snap_font_size(8.0 + width / 50.0);
            assert!(place_numerals(&mut atlas, px), "numerals lost at {side}px");
        }
    }

    #[test]
    fn unsnapped_sizes_still_place_after_eviction() {
        let mut atlas = GlyphAtlas::new(256);
        let mut px = 14.0;
        for _ in 0..500 {
            atlas.begin_frame();
            assert!(place_numerals(&mut atlas, px), "numerals lost at {px}px");
            px += 0.013;
        }
        assert!(atlas.generation > 0);
    }

    #[test]
    fn eviction_happens_at_most_once_per_frame() {
        let mut atlas = GlyphAtlas::new(16);
        atlas.begin_frame();
        assert!(atlas.reserve(14, 14).is_some());
        assert!(atlas.reserve(14, 14).is_some());
        assert_eq!(atlas.generation, 1);
        assert_eq!(atlas.reserve(14, 14), None);
        assert_eq!(atlas.generation, 1);

        atlas.begin_frame();
        assert!(atlas.reserve(14, 14).is_some());
        assert_eq!(atlas.generation, 2);
    }

    #[test]
    fn eviction_clears_cached_glyphs() {
        let mut atlas = GlyphAtlas::new(16);
        atlas.insert(key(1, 10.0), cached());
        atlas.reserve(14, 14);
        atlas.reserve(14, 14);
        assert!(atlas.get(&key(1, 10.0)).is_none());
    }

    #[test]
    fn font_sizes_snap_to_half_pixels() {
        assert_eq!(snap_font_size(11.24), 11.0);
        assert_eq!(snap_font_size(11.26), 11.5);
        assert_eq!(snap_font_size(0.01), 0.5);
    }

    #[test]
    fn glyph_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<GlyphInstance>(), 48);
    }
}
