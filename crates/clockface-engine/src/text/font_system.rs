use std::fmt;

/// Line height used when no font metrics are available, as a multiple of the
/// font size. Close to what common UI sans-serif faces report.
pub const FALLBACK_LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns a collection of loaded fonts.
///
/// Fonts are immutable after loading. The system is owned by the application
/// and passed to the text renderer each frame so new glyphs can be
/// rasterized on demand.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        if bytes.is_empty() {
            return Err(FontLoadError("empty font data".to_string()));
        }
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("loaded font {:?} ({} glyphs)", id, self.fonts[id.0].glyph_count());
        Ok(id)
    }

    /// Returns a reference to the underlying `fontdue::Font`, if `id` is valid.
    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Distance between two baselines for `size`, in logical pixels.
    ///
    /// Falls back to `size * FALLBACK_LINE_HEIGHT_FACTOR` when the font is
    /// unknown or carries no horizontal metrics.
    #[must_use]
    pub fn line_height(&self, id: Option<FontId>, size: f32) -> f32 {
        id.and_then(|id| self.get(id))
            .and_then(|font| font.horizontal_line_metrics(size))
            .map(|m| m.new_line_size)
            .unwrap_or(size * FALLBACK_LINE_HEIGHT_FACTOR)
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_height_falls_back_without_font() {
        let fonts = FontSystem::new();
        assert_eq!(fonts.line_height(None, 10.0), 12.0);
        assert_eq!(fonts.line_height(Some(FontId(7)), 10.0), 12.0);
    }

    #[test]
    fn load_font_rejects_garbage() {
        let mut fonts = FontSystem::new();
        assert!(fonts.load_font(&[]).is_err());
        assert!(fonts.load_font(b"not a font").is_err());
    }
}
