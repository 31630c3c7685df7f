#![cfg(test)]

use crate::test_utils::{
    assert_within_content_box, create_test_engine, engine_fitting_body_lines, layout_blocks,
};
use crate::{FlowLayoutEngine, LayoutConfig, LayoutError};
use folio_style::FontWeight;
use folio_types::{ContentBlock, GeometryError, PageGeometry};

fn long_text(words: usize) -> String {
    vec!["estimate"; words].join(" ")
}

#[test]
fn test_heading_and_key_values_fit_one_page() {
    let engine = FlowLayoutEngine::new(PageGeometry::a4(), LayoutConfig::default()).unwrap();
    let blocks = vec![
        ContentBlock::heading("Ada Lovelace", 1),
        ContentBlock::key_value("Age", "36"),
        ContentBlock::key_value("Occupation", "Analyst"),
        ContentBlock::key_value("Location", "London"),
    ];

    let layout = layout_blocks(&engine, blocks);

    assert_eq!(layout.page_count(), 1);
    assert!(layout.overflows.is_empty());
    let page = &layout.pages[0];
    assert_eq!(page.index, 1);
    let texts: Vec<&str> = page.text().collect();
    assert_eq!(
        texts,
        vec![
            "Ada Lovelace",
            "Age: 36",
            "Occupation: Analyst",
            "Location: London"
        ]
    );
    assert!(page.fragments.windows(2).all(|w| w[0].y < w[1].y));
    assert_eq!(page.fragments[0].weight, FontWeight::Bold);
    assert_eq!(page.fragments[0].font_size, 18.0);
    assert_eq!(page.fragments[0].y, 15.0);
    assert_eq!(page.fragments[0].x, 15.0);
}

#[test]
fn test_oversized_paragraph_gets_its_own_page() {
    let engine = engine_fitting_body_lines(5);
    let blocks = vec![
        ContentBlock::heading("Report", 2),
        ContentBlock::paragraph(long_text(200)),
        ContentBlock::paragraph("After the overflow"),
    ];
    assert!(engine.block_height(&blocks[1]) > engine.geometry().content_height());

    let layout = layout_blocks(&engine, blocks);

    assert_eq!(layout.page_count(), 3);
    assert_eq!(layout.overflows.len(), 1);
    let overflow = &layout.overflows[0];
    assert_eq!(overflow.page_index, 2);
    assert_eq!(overflow.block, "Paragraph");
    assert!(overflow.height > overflow.available);

    let overflow_page = &layout.pages[1];
    assert!(overflow_page.fragments.iter().all(|f| f.text.starts_with("estimate")));
    assert_eq!(overflow_page.fragments[0].y, engine.geometry().margin());
    assert!(overflow_page.content_bottom().unwrap() > engine.geometry().content_bottom());

    assert_eq!(
        layout.pages[2].text().collect::<Vec<_>>(),
        vec!["After the overflow"]
    );
}

#[test]
fn test_oversized_first_block_does_not_leave_blank_page() {
    let engine = engine_fitting_body_lines(5);
    let layout = layout_blocks(&engine, vec![ContentBlock::paragraph(long_text(200))]);

    assert_eq!(layout.page_count(), 1);
    assert_eq!(layout.overflows.len(), 1);
    assert_eq!(layout.overflows[0].page_index, 1);
}

#[test]
fn test_blocks_break_to_next_page_when_they_do_not_fit() {
    let engine = engine_fitting_body_lines(6);
    let config = *engine.config();
    let blocks: Vec<_> = (0..6)
        .map(|i| ContentBlock::paragraph(format!("Paragraph {}", i)))
        .collect();

    let layout = layout_blocks(&engine, blocks);

    // Each one-line paragraph takes a line plus the block gap.
    let per_block = config.line_height(config.body_font_size) + config.block_gap;
    let per_page = ((engine.geometry().content_height() + config.block_gap) / per_block) as usize;
    assert_eq!(layout.pages[0].fragments.len(), per_page);
    assert_eq!(layout.fragment_count(), 6);
    assert!(layout.overflows.is_empty());
    for page in &layout.pages {
        assert_within_content_box(page, engine.geometry(), &config);
        assert_eq!(page.fragments[0].y, engine.geometry().margin());
    }
}

#[test]
fn test_section_children_are_indented_and_may_span_pages() {
    let engine = engine_fitting_body_lines(8);
    let config = *engine.config();
    let children: Vec<_> = (0..10)
        .map(|i| ContentBlock::key_value(format!("Key {}", i), "value"))
        .collect();
    let blocks = vec![ContentBlock::section("Profile", children)];

    let layout = layout_blocks(&engine, blocks);

    assert!(layout.page_count() > 1);
    let title = &layout.pages[0].fragments[0];
    assert_eq!(title.text, "Profile");
    assert_eq!(title.weight, FontWeight::Bold);
    assert_eq!(title.font_size, config.heading_size(2));
    assert_eq!(title.x, engine.geometry().margin());

    let child = &layout.pages[0].fragments[1];
    assert_eq!(child.text, "Key 0: value");
    assert_eq!(child.x, engine.geometry().margin() + config.section_indent);

    // The title is not repeated; the continuation page starts with the next child.
    let continued = &layout.pages[1].fragments[0];
    let placed_on_first = layout.pages[0].fragments.len() - 1;
    assert_eq!(continued.text, format!("Key {}: value", placed_on_first));
    assert_eq!(continued.x, child.x);
    assert_eq!(layout.fragment_count(), 11);
}

#[test]
fn test_nested_section_titles_use_smaller_headings() {
    let engine = FlowLayoutEngine::new(PageGeometry::a4(), LayoutConfig::default()).unwrap();
    let config = *engine.config();
    let blocks = vec![ContentBlock::section(
        "Segments",
        vec![ContentBlock::section(
            "Early adopters",
            vec![ContentBlock::paragraph("Eager")],
        )],
    )];

    let layout = layout_blocks(&engine, blocks);
    let fragments = &layout.pages[0].fragments;

    assert_eq!(fragments[0].font_size, config.heading_size(2));
    assert_eq!(fragments[1].font_size, config.heading_size(3));
    assert_eq!(fragments[1].x, 15.0 + config.section_indent);
    assert_eq!(fragments[2].x, 15.0 + 2.0 * config.section_indent);
}

#[test]
fn test_empty_blocks_reserve_a_line_without_fragments() {
    let engine = FlowLayoutEngine::new(PageGeometry::a4(), LayoutConfig::default()).unwrap();
    let config = *engine.config();
    let blocks = vec![
        ContentBlock::bullets(Vec::<String>::new()),
        ContentBlock::paragraph("   "),
        ContentBlock::paragraph("after"),
    ];

    let layout = layout_blocks(&engine, blocks);
    let fragments = &layout.pages[0].fragments;

    assert_eq!(fragments.len(), 1);
    let reserved = 2.0 * (config.line_height(config.body_font_size) + config.block_gap);
    assert!((fragments[0].y - (15.0 + reserved)).abs() < 0.001);
}

#[test]
fn test_fragments_stay_inside_margins_for_mixed_content() {
    init_and_check(create_test_engine(148.0, 210.0, 12.0));
    init_and_check(create_test_engine(210.0, 297.0, 15.0));
    init_and_check(engine_fitting_body_lines(12));
}

fn init_and_check(engine: FlowLayoutEngine) {
    let config = *engine.config();
    let mut blocks = vec![ContentBlock::heading("A fairly long document title that wraps", 1)];
    for i in 0..15 {
        blocks.push(ContentBlock::section(
            format!("Section {}", i),
            vec![
                ContentBlock::paragraph(long_text(10 + i * 7)),
                ContentBlock::bullets((0..i).map(|n| format!("Item {} {}", n, long_text(n)))),
                ContentBlock::key_value("Verdict", "Strong fit"),
            ],
        ));
    }

    let layout = layout_blocks(&engine, blocks.clone());

    let overflow_pages: Vec<usize> = layout.overflows.iter().map(|o| o.page_index).collect();
    for page in &layout.pages {
        if !overflow_pages.contains(&page.index) {
            assert_within_content_box(page, engine.geometry(), &config);
        }
    }
    for overflow in &layout.overflows {
        assert!(overflow.height > engine.geometry().content_height());
    }
    for (i, page) in layout.pages.iter().enumerate() {
        assert_eq!(page.index, i + 1);
    }

    // Same input, same pages.
    assert_eq!(engine.layout(&blocks), layout);
}

#[test]
fn test_rejects_invalid_configuration() {
    let config = LayoutConfig {
        char_width_ratio: f32::NAN,
        ..Default::default()
    };
    assert!(matches!(
        FlowLayoutEngine::new(PageGeometry::a4(), config),
        Err(LayoutError::InvalidConfig { .. })
    ));
    assert!(matches!(
        FlowLayoutEngine::with_dimensions(100.0, 100.0, 60.0, LayoutConfig::default()),
        Err(LayoutError::Geometry(GeometryError::NoContentWidth { .. }))
    ));
}
