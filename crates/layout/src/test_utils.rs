use crate::{FlowLayout, FlowLayoutEngine, LayoutConfig, Page};
use folio_types::{ContentBlock, PageGeometry};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Default engine on a custom page.
pub fn create_test_engine(width: f32, height: f32, margin: f32) -> FlowLayoutEngine {
    FlowLayoutEngine::with_dimensions(width, height, margin, LayoutConfig::default())
        .expect("test geometry is valid")
}

/// A page whose content box holds exactly `lines` lines of body text, with
/// a little slack that is less than one more line.
pub fn engine_fitting_body_lines(lines: usize) -> FlowLayoutEngine {
    let config = LayoutConfig::default();
    let line_height = config.line_height(config.body_font_size);
    let margin = 10.0;
    let height = 2.0 * margin + (lines as f32 + 0.5) * line_height;
    create_test_engine(210.0, height, margin)
}

pub fn layout_blocks(engine: &FlowLayoutEngine, blocks: Vec<ContentBlock>) -> FlowLayout {
    init_logger();
    engine.layout(&blocks)
}

/// Asserts no fragment leaves the content box.
pub fn assert_within_content_box(page: &Page, geometry: &PageGeometry, config: &LayoutConfig) {
    for fragment in &page.fragments {
        let width = fragment.text.chars().count() as f32 * config.char_width(fragment.font_size);
        assert!(
            fragment.x >= geometry.margin() - 0.01,
            "fragment '{}' starts left of the margin",
            fragment.text
        );
        assert!(
            fragment.y >= geometry.margin() - 0.01,
            "fragment '{}' starts above the margin",
            fragment.text
        );
        assert!(
            fragment.bottom() <= geometry.content_bottom() + 0.01,
            "fragment '{}' ends at {} below {}",
            fragment.text,
            fragment.bottom(),
            geometry.content_bottom()
        );
        assert!(
            fragment.x + width <= geometry.width() - geometry.margin() + 0.01,
            "fragment '{}' runs past the right margin",
            fragment.text
        );
    }
}
