use std::ops::Range;

use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::shapes::{ShapeRenderer, TextRenderer};
use super::{RenderCtx, RenderTarget};

/// Which renderer draws a [`Batch`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BatchKind {
    Shape,
    Text,
}

/// A run of consecutive instances drawn by one renderer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Batch {
    pub kind: BatchKind,
    pub range: Range<u32>,
}

/// Appends `range` to `batches`, merging it into the last batch when the kind
/// matches and the ranges are contiguous. Empty ranges are dropped.
pub(crate) fn extend_batches(batches: &mut Vec<Batch>, kind: BatchKind, range: Range<u32>) {
    if range.is_empty() {
        return;
    }
    if let Some(last) = batches.last_mut() {
        if last.kind == kind && last.range.end == range.start {
            last.range.end = range.end;
            return;
        }
    }
    batches.push(Batch { kind, range });
}

/// Draws a whole [`DrawList`] in paint order.
///
/// Commands are walked back-to-front; each renderer accumulates its instances
/// for the frame and uploads them once. The draw then replays the list as
/// alternating shape/text batches inside a single pass, so a shape recorded
/// after a text command still covers it.
///
/// If the glyph atlas is evicted while the list is walked, glyphs recorded
/// earlier in the frame point at overwritten atlas slots, so the walk is
/// replayed once against the fresh atlas.
#[derive(Default)]
pub struct SceneRenderer {
    shapes: ShapeRenderer,
    text: TextRenderer,
    batches: Vec<Batch>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        font_system: &FontSystem,
    ) {
        self.text.begin_frame();
        let generation = self.text.atlas_generation();
        self.record(ctx, draw_list, font_system);
        if self.text.atlas_generation() != generation {
            log::debug!("scene: glyph atlas evicted mid-frame, replaying text");
            self.record(ctx, draw_list, font_system);
        }

        if self.batches.is_empty() {
            return;
        }

        self.shapes.upload(ctx);
        self.text.upload(ctx);

        let mut rpass = target.begin_load_pass("clockface scene pass");
        for batch in &self.batches {
            match batch.kind {
                BatchKind::Shape => self.shapes.draw(&mut rpass, batch.range.clone()),
                BatchKind::Text => self.text.draw(&mut rpass, batch.range.clone()),
            }
        }
        log::trace!("scene: {} batches for {} commands", self.batches.len(), draw_list.len());
    }

    /// Walks `draw_list` in paint order, filling both renderers and the batch list.
    fn record(&mut self, ctx: &RenderCtx<'_>, draw_list: &mut DrawList, font_system: &FontSystem) {
        self.shapes.begin_frame();
        self.text.clear_instances();
        self.batches.clear();

        for item in draw_list.iter_in_paint_order() {
            match &item.cmd {
                DrawCmd::Ellipse(cmd) => {
                    let range = self.shapes.push_ellipse(cmd);
                    extend_batches(&mut self.batches, BatchKind::Shape, range);
                }
                DrawCmd::Path(cmd) => {
                    let range = self.shapes.push_path(cmd);
                    extend_batches(&mut self.batches, BatchKind::Shape, range);
                }
                DrawCmd::Text(cmd) => {
                    let range = self.text.push_text(ctx, cmd, font_system);
                    extend_batches(&mut self.batches, BatchKind::Text, range);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(kind: BatchKind, range: Range<u32>) -> Batch {
        Batch { kind, range }
    }

    #[test]
    fn contiguous_same_kind_ranges_merge() {
        let mut b = Vec::new();
        extend_batches(&mut b, BatchKind::Shape, 0..2);
        extend_batches(&mut b, BatchKind::Shape, 2..3);
        assert_eq!(b, vec![batch(BatchKind::Shape, 0..3)]);
    }

    #[test]
    fn kind_change_starts_a_new_batch() {
        let mut b = Vec::new();
        extend_batches(&mut b, BatchKind::Shape, 0..2);
        extend_batches(&mut b, BatchKind::Text, 0..5);
        extend_batches(&mut b, BatchKind::Shape, 2..4);
        assert_eq!(
            b,
            vec![
                batch(BatchKind::Shape, 0..2),
                batch(BatchKind::Text, 0..5),
                batch(BatchKind::Shape, 2..4),
            ]
        );
    }

    #[test]
    fn empty_ranges_do_not_split_runs() {
        let mut b = Vec::new();
        extend_batches(&mut b, BatchKind::Shape, 0..1);
        extend_batches(&mut b, BatchKind::Text, 0..0);
        extend_batches(&mut b, BatchKind::Shape, 1..2);
        assert_eq!(b, vec![batch(BatchKind::Shape, 0..2)]);
    }
}
