// Browser tests for the DOM bindings. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, window};

use tile_cascade_card::dom::{self, DomCanvas, DomPage, FIREWORKS_CANVAS_ID, GRID_ID, WELCOME_ID, WORD_COUNT_ID};
use tile_cascade_card::port::{Canvas, Page, Surface, Viewport};
use tile_cascade_card::{CardConfig, Grid, RowSet};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture() -> DomPage {
    let win = window().unwrap();
    let doc = win.document().unwrap();
    let body = doc.body().unwrap();
    body.set_inner_html(
        "<div id='welcome'></div>\
         <div id='gridWrap' class='hidden'><div id='grid'></div></div>\
         <span id='wordCount'></span>\
         <canvas id='fireworksCanvas'></canvas>",
    );
    DomPage::new(win, doc)
}

#[wasm_bindgen_test]
fn builds_tiles_with_faces_and_blank_class() {
    let page = fixture();
    Grid::build(&RowSet::sanitize(&["HI"]), &page);
    let doc = window().unwrap().document().unwrap();
    let grid = doc.get_element_by_id(GRID_ID).unwrap();
    assert_eq!(grid.children().length(), 25);
    let first = grid.children().item(0).unwrap();
    assert_eq!(first.children().length(), 2);
    assert!(!first.class_list().contains("blank"));
    assert!(grid.children().item(2).unwrap().class_list().contains("blank"));
}

#[wasm_bindgen_test]
fn flip_and_visibility_toggle_classes() {
    let page = fixture();
    Grid::build(&RowSet::sanitize(&["HI"]), &page);
    page.flip_tile(1);
    page.set_visible(Surface::Welcome, false);
    page.set_word_count("0 / 1 words");

    let doc = window().unwrap().document().unwrap();
    let grid = doc.get_element_by_id(GRID_ID).unwrap();
    assert!(grid.children().item(1).unwrap().class_list().contains("flipped"));
    assert!(doc.get_element_by_id(WELCOME_ID).unwrap().class_list().contains("hidden"));
    assert_eq!(
        doc.get_element_by_id(WORD_COUNT_ID).unwrap().text_content().as_deref(),
        Some("0 / 1 words")
    );
}

#[wasm_bindgen_test]
fn missing_surfaces_are_skipped() {
    let win = window().unwrap();
    let doc = win.document().unwrap();
    doc.body().unwrap().set_inner_html("");
    let page = DomPage::new(win, doc);
    page.set_visible(Surface::StatusRow, true);
    page.flip_tile(3);
    page.set_dimmed(true);
}

fn flip_duration_property() -> String {
    let root: HtmlElement = window()
        .unwrap()
        .document()
        .unwrap()
        .document_element()
        .unwrap()
        .dyn_into()
        .unwrap();
    root.style().get_property_value("--flip-duration").unwrap()
}

#[wasm_bindgen_test]
fn mount_publishes_flip_duration() {
    fixture();
    dom::mount(CardConfig::default()).unwrap();
    assert_eq!(flip_duration_property(), "1000ms");

    fixture();
    let config = CardConfig {
        flip_ms: 600,
        ..CardConfig::default()
    };
    dom::mount(config).unwrap();
    assert_eq!(flip_duration_property(), "600ms");
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen_test]
fn json_entry_point_applies_overrides_and_rejects_garbage() {
    fixture();
    tile_cascade_card::start_card_with_config(r#"{"flip_ms": 720}"#).unwrap();
    assert_eq!(flip_duration_property(), "720ms");
    assert!(tile_cascade_card::start_card_with_config("{flip_ms:").is_err());
}

#[wasm_bindgen_test]
fn resize_scales_backing_store_and_context() {
    fixture();
    let win = window().unwrap();
    let doc = win.document().unwrap();
    let canvas = DomCanvas::new(win, &doc).unwrap();
    canvas.resize(Viewport::new(100.0, 50.0, 2.0));

    let el: HtmlCanvasElement = doc.get_element_by_id(FIREWORKS_CANVAS_ID).unwrap().dyn_into().unwrap();
    assert_eq!((el.width(), el.height()), (200, 100));
    assert_eq!(el.style().get_property_value("width").unwrap(), "100px");
    assert_eq!(el.style().get_property_value("height").unwrap(), "50px");

    let ctx: CanvasRenderingContext2d = el.get_context("2d").unwrap().unwrap().dyn_into().unwrap();
    let m = ctx.get_transform().unwrap();
    assert_eq!((m.a(), m.b(), m.c(), m.d()), (2.0, 0.0, 0.0, 2.0));
}
