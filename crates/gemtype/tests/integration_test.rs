//! End-to-end tests against the bundled DejaVu fonts

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use gemtype::prelude::*;
use gemtype::traits::FontFace;
use gemtype::types::{FontId, GlyphPlacement, LineKind};
use gemtype::PageLayout;

/// Get path to test font fixtures
fn test_font_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fonts")
        .join(name)
}

fn engine() -> Engine {
    Engine::builder()
        .primary_font(test_font_path("DejaVuSans.ttf"))
        .monospace_font(test_font_path("DejaVuSansMono.ttf"))
        .build()
        .expect("bundled fonts should load")
}

fn layout(engine: &Engine, doc: &str, width: u32) -> PageLayout {
    engine
        .layout(doc.as_bytes(), &PageRequest::new(width, 1.0))
        .unwrap()
}

fn dash_glyph(engine: &Engine) -> u32 {
    engine
        .fonts()
        .face(FontId::PRIMARY)
        .glyph_id('-')
        .unwrap()
}

fn baselines(glyphs: &[GlyphPlacement]) -> Vec<f32> {
    let mut ys: Vec<f32> = glyphs.iter().map(|g| g.y).collect();
    ys.dedup();
    ys
}

/// DejaVu Sans at 16px: (1901 + 483) / 2048 * 16
const TEXT_LINE_HEIGHT: f32 = 18.625;

#[test]
fn engine_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Engine>();
}

#[test]
fn renders_a_small_page() {
    let engine = engine();
    let doc = b"# Welcome\nSome text here.\n=> gemini://example.org/ Example\n";
    let page = engine
        .render_page(doc, &PageRequest::new(600, 1.0), &NoProgress)
        .unwrap();

    assert_eq!(page.surface.width, 600);
    assert!(page.surface.height > 0);
    assert_eq!(
        page.surface.data.len(),
        (page.surface.width * page.surface.height * 4) as usize
    );
    assert!(page.surface.inked_pixels() > 0);

    assert_eq!(page.links.len(), 1);
    let link = &page.links[0];
    assert_eq!(link.target, "gemini://example.org/");
    assert!(link.rect.width > 0 && link.rect.width <= 600);
    assert_eq!(link.rect.bottom() as u32, page.surface.height);

    let inside = (link.rect.x + 2, link.rect.y + 2);
    assert_eq!(page.link_at(inside.0, inside.1), Some(link));
    assert_eq!(page.link_at(2, 2), None);

    let link_color = engine.config().link_color;
    let link_pixels = (link.rect.y..link.rect.bottom())
        .flat_map(|y| (0..link.rect.right()).map(move |x| (x, y)))
        .filter(|(x, y)| page.surface.is_color(*x, *y, link_color))
        .count();
    assert!(link_pixels > 0);
}

#[test]
fn phases_are_reported_in_order() {
    let engine = engine();
    let seen = Mutex::new(Vec::new());
    let progress = |phase: LoadingPhase| seen.lock().unwrap().push(phase);

    engine
        .render_page(b"hello\n", &PageRequest::new(300, 1.0), &progress)
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            LoadingPhase::Layout,
            LoadingPhase::Rasterizing,
            LoadingPhase::Done
        ]
    );
}

#[test]
fn invalid_utf8_fails_the_whole_render() {
    let engine = engine();
    let seen = Mutex::new(Vec::new());
    let progress = |phase: LoadingPhase| seen.lock().unwrap().push(phase);

    let result = engine.render_page(
        b"=> gemini://a/ fine\nbroken \xFF here\n",
        &PageRequest::new(300, 1.0),
        &progress,
    );

    assert!(matches!(result, Err(GemtypeError::InvalidEncoding { .. })));
    assert!(result.unwrap_err().is_render_failure());
    assert_eq!(*seen.lock().unwrap(), vec![LoadingPhase::Layout]);
}

#[test]
fn bad_requests_are_rejected() {
    let engine = engine();
    for request in [
        PageRequest::new(100, 0.0),
        PageRequest::new(100, f32::NAN),
    ] {
        let result = engine.render_page(b"x\n", &request, &NoProgress);
        assert!(matches!(result, Err(GemtypeError::Config(_))));
    }
    assert!(matches!(
        engine.render_label("x", -1.0),
        Err(GemtypeError::Config(_))
    ));
}

#[test]
fn encoding_errors_carry_document_offsets() {
    let engine = engine();
    let result = engine.render_page(
        b"fine\nbad \xFF byte\n",
        &PageRequest::new(300, 1.0),
        &NoProgress,
    );
    assert!(matches!(
        result,
        Err(GemtypeError::InvalidEncoding { offset: 9 })
    ));
}

#[test]
fn bad_bytes_on_a_toggle_line_fail_the_render() {
    let engine = engine();
    let result = engine.render_page(
        b"```\xFF\nA\n```\n",
        &PageRequest::new(100, 1.0),
        &NoProgress,
    );
    assert!(matches!(
        result,
        Err(GemtypeError::InvalidEncoding { offset: 3 })
    ));
}

#[test]
fn zero_width_puts_each_glyph_on_its_own_line() {
    let engine = engine();
    let page = layout(&engine, "Hi", 0);

    assert_eq!(page.glyphs.len(), 2);
    assert_eq!(baselines(&page.glyphs).len(), 2);
    assert!(page.glyphs.iter().all(|g| g.glyph != dash_glyph(&engine)));

    let rendered = engine
        .render_page(b"Hi", &PageRequest::new(0, 1.0), &NoProgress)
        .unwrap();
    assert_eq!(rendered.surface.width, 0);
    assert_eq!(rendered.surface.height, page.height);
}

#[test]
fn short_paragraphs_take_one_line_each() {
    let engine = engine();
    let doc = "Short line\nAnother one\n* a list item\n> a quote\n";
    let page = layout(&engine, doc, 600);

    let dash = dash_glyph(&engine);
    assert!(!page
        .glyphs
        .iter()
        .any(|g| g.glyph == dash && g.font == FontId::PRIMARY));

    let lines = baselines(&page.glyphs);
    assert_eq!(lines.len(), 4);
    for pair in lines.windows(2) {
        assert!((pair[1] - pair[0] - TEXT_LINE_HEIGHT).abs() < 1e-3);
    }
    assert_eq!(page.height, (4.0 * TEXT_LINE_HEIGHT).round() as u32);
}

#[test]
fn long_word_breaks_with_hyphens() {
    let engine = engine();
    let page = layout(&engine, &"W".repeat(200), 300);

    let dash = dash_glyph(&engine);
    let hyphens = page.glyphs.iter().filter(|g| g.glyph == dash).count();
    let lines = baselines(&page.glyphs);

    assert!(hyphens >= 1);
    assert_eq!(hyphens, lines.len() - 1);
    for pair in lines.windows(2) {
        assert!((pair[1] - pair[0] - TEXT_LINE_HEIGHT).abs() < 1e-3);
    }
}

#[test]
fn prose_wraps_at_spaces() {
    let engine = engine();
    let words = "lorem ipsum dolor sit amet consectetur adipiscing elit ".repeat(8);
    let page = layout(&engine, &words, 800);

    let dash = dash_glyph(&engine);
    assert!(baselines(&page.glyphs).len() > 1);
    assert!(!page.glyphs.iter().any(|g| g.glyph == dash));
    assert!(page.glyphs.iter().all(|g| g.x < 800.0));
}

#[test]
fn relayout_is_deterministic() {
    let engine = engine();
    let doc = b"# Title\nA paragraph long enough to wrap a couple of times at this width.\n=> /a Link\n```\npre  formatted\n```\n";

    let a = engine.layout(doc, &PageRequest::new(250, 1.5)).unwrap();
    let b = engine.layout(doc, &PageRequest::relayout(250, 1.5)).unwrap();
    assert_eq!(a, b);

    let first = engine
        .render_page(doc, &PageRequest::new(250, 1.5), &NoProgress)
        .unwrap();
    let second = engine
        .render_page(doc, &PageRequest::relayout(250, 1.5), &NoProgress)
        .unwrap();
    assert_eq!(first, second);

    let wider = engine.layout(doc, &PageRequest::relayout(800, 1.5)).unwrap();
    assert!(wider.height < a.height);
}

#[test]
fn link_boxes_do_not_overlap() {
    let engine = engine();
    let doc = "=> /one First\n=> /two A second link with a much longer title that has to wrap\ntext\n## Heading\n=> /three\n";
    let page = layout(&engine, doc, 200);

    assert_eq!(page.links.len(), 3);
    for pair in page.links.windows(2) {
        assert!(pair[0].rect.bottom() <= pair[1].rect.y);
    }
    assert!(page.links[1].rect.height > page.links[0].rect.height);
    assert_eq!(page.links[2].target, "/three");
}

#[test]
fn headings_shrink_with_depth() {
    let engine = engine();
    let size = |doc: &str| layout(&engine, doc, 600).glyphs[0].size;

    let big = size("# A\n");
    let medium = size("## A\n");
    let small = size("### A\n");
    let text = size("A\n");
    assert!(big > medium && medium > small && small > text);
}

#[test]
fn missing_glyphs_come_from_the_monospace_font() {
    let engine = engine();
    // U+2312 ARC is only in DejaVu Sans Mono.
    let page = layout(&engine, "a\u{2312}b\n", 600);

    let fonts: Vec<FontId> = page.glyphs.iter().map(|g| g.font).collect();
    assert_eq!(
        fonts,
        vec![FontId::PRIMARY, FontId::MONOSPACE, FontId::PRIMARY]
    );
    assert_ne!(page.glyphs[1].glyph, 0);
}

#[test]
fn preformatted_lines_use_monospace() {
    let engine = engine();
    let page = layout(&engine, "```\nA  B\n```\nC\n", 600);

    assert_eq!(page.glyphs.len(), 5);
    assert!(page.glyphs[..4]
        .iter()
        .all(|g| g.font == FontId::MONOSPACE && g.kind == LineKind::Preformatted));
    assert_eq!(page.glyphs[4].kind, LineKind::Text);
}

#[test]
fn kerning_pulls_pairs_together() {
    let engine = engine();
    let kerned = layout(&engine, "AV\n", 600);

    let face = engine.fonts().face(FontId::PRIMARY);
    let a = face.glyph_id('A').unwrap();
    let natural = face.advance_width(a) * face.scale_for(16.0);
    assert!(kerned.glyphs[1].x < natural - 0.5);
}

#[test]
fn labels_are_cached_per_text_and_scale() {
    let engine = engine();

    let a = engine.render_label("Error: x", 1.0).unwrap();
    let b = engine.render_label("Error: x", 1.0).unwrap();
    let c = engine.render_label("Error: x", 2.0).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(engine.label_cache().len(), 2);

    // Medium heading: 24px with DejaVu's 2384-unit line
    assert_eq!(a.height, 28);
    assert!(a.width > 0 && a.width < 200);
    assert!(c.width > a.width);
    assert!(a.inked_pixels() > 0);
}

#[test]
fn labels_are_shared_across_threads() {
    let engine = Arc::new(engine());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let label = engine.render_label("Loading...", 1.0).unwrap();
                let page = engine
                    .render_page(
                        format!("Worker {i}\n=> /x go\n").as_bytes(),
                        &PageRequest::new(200, 1.0),
                        &NoProgress,
                    )
                    .unwrap();
                assert_eq!(page.links.len(), 1);
                label
            })
        })
        .collect();

    let labels: Vec<Arc<Surface>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for label in &labels[1..] {
        assert!(Arc::ptr_eq(&labels[0], label));
    }
    assert_eq!(engine.label_cache().len(), 1);
}

#[test]
fn builder_needs_both_fonts() {
    let result = Engine::builder()
        .primary_font(test_font_path("DejaVuSans.ttf"))
        .build();
    assert!(matches!(result, Err(GemtypeError::Config(_))));

    let result = Engine::builder()
        .primary_font(test_font_path("missing.ttf"))
        .monospace_font(test_font_path("DejaVuSansMono.ttf"))
        .build();
    assert!(matches!(result, Err(GemtypeError::FontLoad(_))));
}

#[test]
fn builder_rejects_bad_config() {
    let config = EngineConfig {
        break_threshold: 1.5,
        ..EngineConfig::default()
    };
    let result = Engine::builder()
        .primary_font(test_font_path("DejaVuSans.ttf"))
        .monospace_font(test_font_path("DejaVuSansMono.ttf"))
        .config(config)
        .build();
    assert!(matches!(result, Err(GemtypeError::Config(_))));
}

#[test]
fn custom_colors_reach_the_pixels() {
    let text = Color::rgba(10, 20, 30, 255);
    let engine = Engine::builder()
        .primary_font(test_font_path("DejaVuSans.ttf"))
        .monospace_font(test_font_path("DejaVuSansMono.ttf"))
        .text_color(text)
        .build()
        .unwrap();

    let page = engine
        .render_page(b"HHHH\n", &PageRequest::new(100, 1.0), &NoProgress)
        .unwrap();
    let inked: Vec<[u8; 4]> = page
        .surface
        .data
        .chunks_exact(4)
        .filter(|px| px[3] > 0)
        .map(|px| [px[0], px[1], px[2], px[3]])
        .collect();
    assert!(!inked.is_empty());
    assert!(inked.iter().all(|px| px[..3] == [10, 20, 30]));
}
