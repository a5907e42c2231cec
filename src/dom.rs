//! Browser bindings: DOM-backed [`Page`], canvas-backed [`Canvas`] and the
//! wiring of page buttons to the controllers.
//!
//! Every element is looked up by id on the pre-existing page. Missing elements
//! are skipped silently; failing DOM calls are logged and otherwise ignored.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, EventTarget, HtmlCanvasElement, HtmlElement,
    Window, window,
};

use crate::card::Gate;
use crate::card::grid::Tile;
use crate::config::CardConfig;
use crate::fireworks::Celebration;
use crate::port::{Canvas, Page, Surface, Viewport};
use crate::schedule::{BrowserScheduler, Scheduler};

pub const BEGIN_BUTTON_ID: &str = "beginBtn";
pub const WELCOME_ID: &str = "welcome";
pub const GRID_WRAP_ID: &str = "gridWrap";
pub const GRID_ID: &str = "grid";
pub const STATUS_ROW_ID: &str = "statusRow";
pub const WORD_COUNT_ID: &str = "wordCount";
pub const FIREWORKS_CANVAS_ID: &str = "fireworksCanvas";
pub const YES_BUTTON_IDS: [&str; 2] = ["yesPrimary", "yesSoft"];
pub const MAIN_SELECTOR: &str = "main#app";

const HIDDEN: &str = "hidden";
const DIMMED: &str = "dimmed";
const FLIPPED: &str = "flipped";
const TEXT_FONT: &str = "700 42px Inter, system-ui, -apple-system, Arial";
const TEXT_FILL: &str = "#e83e3e";
const TEXT_STROKE: &str = "rgba(255,255,255,0.12)";

fn warn_on_err<T>(result: Result<T, JsValue>, what: &str) {
    if let Err(e) = result {
        log::warn!("{} failed: {:?}", what, e);
    }
}

fn surface_id(surface: Surface) -> &'static str {
    match surface {
        Surface::Welcome => WELCOME_ID,
        Surface::GridWrap => GRID_WRAP_ID,
        Surface::StatusRow => STATUS_ROW_ID,
    }
}

// --- Page -------------------------------------------------------------------

pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn div(&self, class: &str) -> Result<Element, JsValue> {
        let el = self.document.create_element("div")?;
        el.set_class_name(class);
        Ok(el)
    }

    fn build_tile(&self, tile: &Tile) -> Result<Element, JsValue> {
        let el = self.div("tile")?;
        let front = self.div("front")?;
        front.set_text_content(Some(""));
        let back = self.div("back")?;
        back.set_text_content(Some(&tile.ch.to_string()));
        if tile.is_blank() {
            el.class_list().add_1("blank")?;
        }
        el.append_child(&front)?;
        el.append_child(&back)?;
        Ok(el)
    }
}

impl Page for DomPage {
    fn prompt(&self, message: &str) -> Option<String> {
        self.window.prompt_with_message(message).ok().flatten()
    }

    fn navigate(&self, url: &str) {
        warn_on_err(self.window.location().set_href(url), "navigate");
    }

    fn set_visible(&self, surface: Surface, visible: bool) {
        if let Some(el) = self.by_id(surface_id(surface)) {
            let classes = el.class_list();
            let result = if visible { classes.remove_1(HIDDEN) } else { classes.add_1(HIDDEN) };
            warn_on_err(result, "toggle hidden");
        }
    }

    fn set_word_count(&self, text: &str) {
        if let Some(el) = self.by_id(WORD_COUNT_ID) {
            el.set_text_content(Some(text));
        }
    }

    fn set_flip_duration(&self, css_value: &str) {
        let root = self
            .document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(root) = root {
            warn_on_err(
                root.style().set_property("--flip-duration", css_value),
                "set --flip-duration",
            );
        }
    }

    fn clear_grid(&self) {
        if let Some(grid) = self.by_id(GRID_ID) {
            grid.set_inner_html("");
        }
    }

    fn add_tile(&self, tile: &Tile) {
        let Some(grid) = self.by_id(GRID_ID) else { return };
        match self.build_tile(tile) {
            Ok(el) => warn_on_err(grid.append_child(&el), "append tile"),
            Err(e) => log::warn!("tile ({}, {}) not built: {:?}", tile.row, tile.col, e),
        }
    }

    fn flip_tile(&self, index: usize) {
        let tile = self
            .by_id(GRID_ID)
            .and_then(|grid| grid.children().item(index as u32));
        if let Some(tile) = tile {
            warn_on_err(tile.class_list().add_1(FLIPPED), "flip tile");
        }
    }

    fn set_dimmed(&self, dimmed: bool) {
        if let Ok(Some(main)) = self.document.query_selector(MAIN_SELECTOR) {
            let classes = main.class_list();
            let result = if dimmed { classes.add_1(DIMMED) } else { classes.remove_1(DIMMED) };
            warn_on_err(result, "toggle dimmed");
        }
    }
}

// --- Canvas -----------------------------------------------------------------

struct Surface2d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

/// Fireworks overlay canvas. Without the canvas element every call is a no-op.
pub struct DomCanvas {
    window: Window,
    surface: Option<Surface2d>,
}

impl DomCanvas {
    pub fn new(window: Window, document: &Document) -> Result<Self, JsValue> {
        let surface = match document.get_element_by_id(FIREWORKS_CANVAS_ID) {
            Some(el) => {
                let canvas: HtmlCanvasElement = el.dyn_into()?;
                let ctx: CanvasRenderingContext2d = canvas
                    .get_context("2d")?
                    .ok_or_else(|| JsValue::from_str("no 2d context"))?
                    .dyn_into()?;
                Some(Surface2d { canvas, ctx })
            }
            None => {
                log::warn!("#{} not found, fireworks disabled", FIREWORKS_CANVAS_ID);
                None
            }
        };
        Ok(Self { window, surface })
    }
}

impl Canvas for DomCanvas {
    fn viewport(&self) -> Viewport {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::new(width, height, self.window.device_pixel_ratio())
    }

    fn resize(&self, viewport: Viewport) {
        let Some(s) = &self.surface else { return };
        let (w, h) = viewport.backing_size();
        s.canvas.set_width(w);
        s.canvas.set_height(h);
        let style = s.canvas.style();
        warn_on_err(style.set_property("width", &format!("{}px", viewport.width)), "canvas width");
        warn_on_err(style.set_property("height", &format!("{}px", viewport.height)), "canvas height");
        warn_on_err(
            s.ctx.set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0),
            "canvas transform",
        );
    }

    fn clear(&self, width: f64, height: f64) {
        if let Some(s) = &self.surface {
            s.ctx.clear_rect(0.0, 0.0, width, height);
        }
    }

    fn draw_particle(&self, x: f64, y: f64, radius: f64, color: &str, alpha: f64) {
        let Some(s) = &self.surface else { return };
        s.ctx.set_global_alpha(alpha.max(0.0));
        s.ctx.set_fill_style_str(color);
        s.ctx.begin_path();
        s.ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU).ok();
        s.ctx.fill();
    }

    fn draw_text(&self, text: &str, x: f64, y: f64, alpha: f64) {
        let Some(s) = &self.surface else { return };
        s.ctx.save();
        s.ctx.set_global_alpha(alpha);
        s.ctx.set_font(TEXT_FONT);
        s.ctx.set_fill_style_str(TEXT_FILL);
        s.ctx.set_stroke_style_str(TEXT_STROKE);
        s.ctx.set_line_width(4.0);
        s.ctx.stroke_text(text, x, y).ok();
        s.ctx.fill_text(text, x, y).ok();
        s.ctx.restore();
    }
}

// --- Wiring -----------------------------------------------------------------

fn on_event<F>(target: &EventTarget, event: &str, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| handler()) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Bind the card to the current document: begin button, both "yes" buttons
/// and window resizes.
pub fn mount(config: CardConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let config = Rc::new(config);
    let page: Rc<dyn Page> = Rc::new(DomPage::new(win.clone(), doc.clone()));
    let canvas: Rc<dyn Canvas> = Rc::new(DomCanvas::new(win.clone(), &doc)?);
    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new(win.clone()));

    page.set_flip_duration(&config.flip_duration_css());

    let gate = Gate::new(config.clone(), page.clone(), scheduler.clone());
    let seed = js_sys::Date::now() as u64;
    let celebration = Celebration::new(config, page, canvas, scheduler.clone(), seed);

    if let Some(begin) = doc.get_element_by_id(BEGIN_BUTTON_ID) {
        on_event(&begin, "click", move || {
            gate.on_begin();
        })?;
    }
    for id in YES_BUTTON_IDS {
        if let Some(yes) = doc.get_element_by_id(id) {
            let celebration = celebration.clone();
            on_event(&yes, "click", move || celebration.trigger())?;
        }
    }
    {
        let celebration = celebration.clone();
        on_event(&win, "resize", move || celebration.resize())?;
    }
    // Size the overlay once the initial layout has run.
    scheduler.schedule(0, Box::new(move || celebration.resize()));

    log::info!("card mounted (seed {})", seed);
    Ok(())
}
