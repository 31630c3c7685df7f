use crate::LayoutError;

/// Millimetres per typographic point.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Metrics driving the flow layout estimate.
///
/// Font sizes are in points, every distance is in millimetres (the unit of
/// [`folio_types::PageGeometry`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Font size for paragraphs, key/value lines and bullet items.
    pub body_font_size: f32,
    /// Font sizes for heading levels 1, 2 and 3+.
    pub heading_sizes: [f32; 3],
    /// Line height as a multiple of the font size.
    pub line_spacing: f32,
    /// Average glyph advance as a fraction of the font size, used by the
    /// characters-per-line estimate.
    ///
    /// - **Higher values**: fewer characters per line, more conservative
    ///   height estimates.
    /// - **Lower values**: denser lines; text may run past the right margin.
    ///
    /// Defaults to `0.5`.
    pub char_width_ratio: f32,
    /// Vertical gap after every placed block.
    pub block_gap: f32,
    /// Left indent added per section nesting level.
    pub section_indent: f32,
    /// Hanging indent of bullet continuation lines.
    pub bullet_indent: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            body_font_size: 10.0,
            heading_sizes: [18.0, 14.0, 12.0],
            line_spacing: 1.2,
            char_width_ratio: 0.5,
            block_gap: 3.0,
            section_indent: 5.0,
            bullet_indent: 4.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = [
            ("body_font_size", self.body_font_size),
            ("heading_sizes[0]", self.heading_sizes[0]),
            ("heading_sizes[1]", self.heading_sizes[1]),
            ("heading_sizes[2]", self.heading_sizes[2]),
            ("line_spacing", self.line_spacing),
            ("char_width_ratio", self.char_width_ratio),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidConfig { field, value });
            }
        }

        let non_negative = [
            ("block_gap", self.block_gap),
            ("section_indent", self.section_indent),
            ("bullet_indent", self.bullet_indent),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }

    /// Font size for a heading level; levels past the table reuse the last entry.
    pub fn heading_size(&self, level: u8) -> f32 {
        let index = (level.max(1) as usize - 1).min(self.heading_sizes.len() - 1);
        self.heading_sizes[index]
    }

    /// Height of one text line in millimetres.
    pub fn line_height(&self, font_size: f32) -> f32 {
        font_size * PT_TO_MM * self.line_spacing
    }

    /// Estimated width of one character in millimetres.
    pub fn char_width(&self, font_size: f32) -> f32 {
        font_size * PT_TO_MM * self.char_width_ratio
    }

    /// How many characters fit on a line `width` millimetres wide. Always at least one.
    pub fn chars_per_line(&self, font_size: f32, width: f32) -> usize {
        ((width / self.char_width(font_size)).floor() as usize).max(1)
    }
}
