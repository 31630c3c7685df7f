use crate::algorithms::pagination::{check_child_fit, EPSILON};
use crate::config::LayoutConfig;
use crate::page::{FlowLayout, Fragment, LayoutOverflow, Page};
use crate::text::wrap_text;
use crate::LayoutError;
use folio_style::FontWeight;
use folio_types::{ContentBlock, ContentModel, PageGeometry};

/// A line of a measured block, not yet positioned.
#[derive(Debug, Clone)]
struct Line {
    text: String,
    indent: f32,
}

/// The smallest unit the page-break check sees: a block, or one bullet item.
#[derive(Debug, Clone)]
struct Unit {
    kind: &'static str,
    lines: Vec<Line>,
    font_size: f32,
    weight: FontWeight,
    line_height: f32,
}

impl Unit {
    /// Empty text still reserves one line.
    fn height(&self) -> f32 {
        self.lines.len().max(1) as f32 * self.line_height
    }
}

struct Cursor {
    page: Page,
    y: f32,
}

/// Places a content tree onto fixed-size pages, top to bottom.
///
/// Heights come from a character-count wrap estimate (see
/// [`LayoutConfig::chars_per_line`]); the same input always produces the
/// same pages.
#[derive(Debug, Clone)]
pub struct FlowLayoutEngine {
    geometry: PageGeometry,
    config: LayoutConfig,
}

impl FlowLayoutEngine {
    pub fn new(geometry: PageGeometry, config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { geometry, config })
    }

    /// Builds the geometry as well; fails when the margins leave no content box.
    pub fn with_dimensions(
        width: f32,
        height: f32,
        margin: f32,
        config: LayoutConfig,
    ) -> Result<Self, LayoutError> {
        Self::new(PageGeometry::new(width, height, margin)?, config)
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layout_model(&self, model: &ContentModel) -> FlowLayout {
        self.layout(&model.blocks)
    }

    pub fn layout(&self, blocks: &[ContentBlock]) -> FlowLayout {
        let mut flow = FlowState::new(self);
        for block in blocks {
            flow.place_block(block, 0);
        }
        let layout = flow.finish();
        log::debug!(
            "Laid out {} blocks onto {} page(s), {} overflow(s)",
            blocks.len(),
            layout.pages.len(),
            layout.overflows.len()
        );
        layout
    }

    /// Estimated height of a top-level block, internal gaps included and
    /// the trailing gap excluded.
    pub fn block_height(&self, block: &ContentBlock) -> f32 {
        self.stacked_height(block, 0)
    }

    fn stacked_height(&self, block: &ContentBlock, depth: usize) -> f32 {
        match block {
            ContentBlock::Section { title, children } => {
                let mut height = self
                    .section_title_unit(block.kind_name(), title, depth)
                    .height();
                for child in children {
                    height += self.config.block_gap + self.stacked_height(child, depth + 1);
                }
                height
            }
            ContentBlock::BulletList { items } => {
                let units = self.bullet_units(block.kind_name(), items, depth);
                if units.is_empty() {
                    self.empty_list_unit(block.kind_name()).height()
                } else {
                    units.iter().map(Unit::height).sum()
                }
            }
            leaf => self.leaf_unit(leaf, depth).map_or(0.0, |u| u.height()),
        }
    }

    fn indent(&self, depth: usize) -> f32 {
        (depth as f32 * self.config.section_indent).min(self.geometry.content_width() / 2.0)
    }

    fn text_unit(
        &self,
        kind: &'static str,
        text: &str,
        font_size: f32,
        weight: FontWeight,
        depth: usize,
    ) -> Unit {
        let indent = self.indent(depth);
        let width = self.geometry.content_width() - indent;
        let lines = wrap_text(text, self.config.chars_per_line(font_size, width))
            .into_iter()
            .map(|text| Line { text, indent })
            .collect();
        Unit {
            kind,
            lines,
            font_size,
            weight,
            line_height: self.config.line_height(font_size),
        }
    }

    fn leaf_unit(&self, block: &ContentBlock, depth: usize) -> Option<Unit> {
        let body = self.config.body_font_size;
        let kind = block.kind_name();
        match block {
            ContentBlock::Heading { text, level } => Some(self.text_unit(
                kind,
                text,
                self.config.heading_size(*level),
                FontWeight::Bold,
                depth,
            )),
            ContentBlock::Paragraph { text } => {
                Some(self.text_unit(kind, text, body, FontWeight::Regular, depth))
            }
            ContentBlock::KeyValue { label, value } => Some(self.text_unit(
                kind,
                &format!("{}: {}", label, value),
                body,
                FontWeight::Regular,
                depth,
            )),
            ContentBlock::BulletList { .. } | ContentBlock::Section { .. } => None,
        }
    }

    fn section_title_unit(&self, kind: &'static str, title: &str, depth: usize) -> Unit {
        let level = (depth + 2).min(3) as u8;
        self.text_unit(
            kind,
            title,
            self.config.heading_size(level),
            FontWeight::Bold,
            depth,
        )
    }

    fn empty_list_unit(&self, kind: &'static str) -> Unit {
        let body = self.config.body_font_size;
        Unit {
            kind,
            lines: Vec::new(),
            font_size: body,
            weight: FontWeight::Regular,
            line_height: self.config.line_height(body),
        }
    }

    /// One unit per non-blank item: `• ` on the first line, continuation
    /// lines hang under the item text.
    fn bullet_units(&self, kind: &'static str, items: &[String], depth: usize) -> Vec<Unit> {
        let body = self.config.body_font_size;
        let indent = self.indent(depth);
        let hang = self.config.bullet_indent.max(2.0 * self.config.char_width(body));
        let budget = self
            .config
            .chars_per_line(body, self.geometry.content_width() - indent - hang);

        items
            .iter()
            .filter(|item| !item.trim().is_empty())
            .map(|item| {
                let lines = wrap_text(item, budget)
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| {
                        if i == 0 {
                            Line {
                                text: format!("\u{2022} {}", text),
                                indent,
                            }
                        } else {
                            Line {
                                text,
                                indent: indent + hang,
                            }
                        }
                    })
                    .collect();
                Unit {
                    kind,
                    lines,
                    font_size: body,
                    weight: FontWeight::Regular,
                    line_height: self.config.line_height(body),
                }
            })
            .collect()
    }
}

/// Mutable state of a single layout run.
struct FlowState<'a> {
    engine: &'a FlowLayoutEngine,
    cursor: Cursor,
    finished: Vec<Page>,
    overflows: Vec<LayoutOverflow>,
}

impl<'a> FlowState<'a> {
    fn new(engine: &'a FlowLayoutEngine) -> Self {
        Self {
            engine,
            cursor: Cursor {
                page: Page::new(1),
                y: engine.geometry.margin(),
            },
            finished: Vec::new(),
            overflows: Vec::new(),
        }
    }

    fn place_block(&mut self, block: &ContentBlock, depth: usize) {
        let gap = self.engine.config.block_gap;
        match block {
            ContentBlock::Section { title, children } => {
                let unit = self.engine.section_title_unit(block.kind_name(), title, depth);
                self.place(unit, gap);
                for child in children {
                    self.place_block(child, depth + 1);
                }
            }
            ContentBlock::BulletList { items } => {
                let mut units = self.engine.bullet_units(block.kind_name(), items, depth);
                if units.is_empty() {
                    let unit = self.engine.empty_list_unit(block.kind_name());
                    self.place(unit, gap);
                    return;
                }
                // A list that fits on one page moves as a whole.
                let total: f32 = units.iter().map(Unit::height).sum();
                if total <= self.engine.geometry.content_height() + EPSILON {
                    let mut merged = units.remove(0);
                    for unit in units {
                        merged.lines.extend(unit.lines);
                    }
                    self.place(merged, gap);
                    return;
                }
                let last = units.len() - 1;
                for (i, unit) in units.into_iter().enumerate() {
                    self.place(unit, if i == last { gap } else { 0.0 });
                }
            }
            leaf => {
                if let Some(unit) = self.engine.leaf_unit(leaf, depth) {
                    self.place(unit, gap);
                }
            }
        }
    }

    fn place(&mut self, unit: Unit, gap_after: f32) {
        let engine = self.engine;
        let geometry = &engine.geometry;
        let height = unit.height();
        let analysis = check_child_fit(
            self.cursor.y - geometry.margin(),
            height,
            geometry.content_rect(),
        );

        if analysis.should_break {
            if !self.is_pristine() {
                self.break_page();
            }
            if analysis.exceeds_bounds {
                let overflow = LayoutOverflow {
                    page_index: self.cursor.page.index,
                    block: unit.kind,
                    height,
                    available: geometry.content_height(),
                };
                log::warn!("Forced overflow: {}", overflow);
                self.overflows.push(overflow);
            }
        }

        let x = geometry.margin();
        let mut y = self.cursor.y;
        for line in unit.lines {
            self.cursor.page.fragments.push(Fragment {
                text: line.text,
                x: x + line.indent,
                y,
                font_size: unit.font_size,
                weight: unit.weight,
                line_height: unit.line_height,
            });
            y += unit.line_height;
        }
        self.cursor.y += height + gap_after;
    }

    /// Nothing, not even reserved space, has been placed on the current page.
    fn is_pristine(&self) -> bool {
        (self.cursor.y - self.engine.geometry.margin()).abs() < EPSILON
    }

    fn break_page(&mut self) {
        let next_index = self.cursor.page.index + 1;
        log::debug!(
            "Page {} full at y={:.2}, starting page {}",
            self.cursor.page.index,
            self.cursor.y,
            next_index
        );
        let full = std::mem::replace(&mut self.cursor.page, Page::new(next_index));
        self.finished.push(full);
        self.cursor.y = self.engine.geometry.margin();
    }

    fn finish(mut self) -> FlowLayout {
        self.finished.push(self.cursor.page);
        FlowLayout {
            pages: self.finished,
            overflows: self.overflows,
        }
    }
}
