//! In-memory port implementations that record every call.
//! Used by the native test-suite in place of the DOM and canvas.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{Canvas, Page, Surface, Viewport};
use crate::card::grid::Tile;
use crate::schedule::VirtualClock;

#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    Prompt,
    Navigate(String),
    SetVisible(Surface, bool),
    WordCount(String),
    FlipDuration(String),
    ClearGrid,
    AddTile { row: usize, col: usize, ch: char, blank: bool },
    Flip(usize),
    Dimmed(bool),
}

/// Page fake. Events are stamped with the virtual clock time when one is attached.
#[derive(Default)]
pub struct RecordingPage {
    reply: RefCell<Option<String>>,
    clock: Option<Rc<VirtualClock>>,
    events: RefCell<Vec<(u64, PageEvent)>>,
}

impl RecordingPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Rc<VirtualClock>) -> Self {
        Self { clock: Some(clock), ..Self::default() }
    }

    /// Set what the next prompt returns (`None` = cancelled).
    pub fn reply_with(&self, reply: Option<&str>) {
        *self.reply.borrow_mut() = reply.map(str::to_string);
    }

    pub fn events(&self) -> Vec<(u64, PageEvent)> {
        self.events.borrow().clone()
    }

    /// Events other than the prompt itself.
    pub fn visible_effects(&self) -> Vec<PageEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|(_, e)| *e != PageEvent::Prompt)
            .map(|(_, e)| e.clone())
            .collect()
    }

    /// (time, index) for every flip, in call order.
    pub fn flips(&self) -> Vec<(u64, usize)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|(t, e)| match e {
                PageEvent::Flip(i) => Some((*t, *i)),
                _ => None,
            })
            .collect()
    }

    pub fn word_counts(&self) -> Vec<(u64, String)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|(t, e)| match e {
                PageEvent::WordCount(s) => Some((*t, s.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|(_, e)| match e {
                PageEvent::Navigate(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: PageEvent) {
        let t = self.clock.as_ref().map(|c| c.now()).unwrap_or(0);
        self.events.borrow_mut().push((t, event));
    }
}

impl Page for RecordingPage {
    fn prompt(&self, _message: &str) -> Option<String> {
        self.record(PageEvent::Prompt);
        self.reply.borrow().clone()
    }

    fn navigate(&self, url: &str) {
        self.record(PageEvent::Navigate(url.to_string()));
    }

    fn set_visible(&self, surface: Surface, visible: bool) {
        self.record(PageEvent::SetVisible(surface, visible));
    }

    fn set_word_count(&self, text: &str) {
        self.record(PageEvent::WordCount(text.to_string()));
    }

    fn set_flip_duration(&self, css_value: &str) {
        self.record(PageEvent::FlipDuration(css_value.to_string()));
    }

    fn clear_grid(&self) {
        self.record(PageEvent::ClearGrid);
    }

    fn add_tile(&self, tile: &Tile) {
        self.record(PageEvent::AddTile {
            row: tile.row,
            col: tile.col,
            ch: tile.ch,
            blank: tile.is_blank(),
        });
    }

    fn flip_tile(&self, index: usize) {
        self.record(PageEvent::Flip(index));
    }

    fn set_dimmed(&self, dimmed: bool) {
        self.record(PageEvent::Dimmed(dimmed));
    }
}

/// Canvas fake with a settable viewport and draw counters.
pub struct RecordingCanvas {
    viewport: Cell<Viewport>,
    resizes: RefCell<Vec<Viewport>>,
    clears: Cell<usize>,
    particle_colors: RefCell<Vec<String>>,
    texts_drawn: RefCell<Vec<String>>,
    max_alpha: Cell<f64>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            viewport: Cell::new(Viewport::new(width, height, 1.0)),
            resizes: RefCell::new(Vec::new()),
            clears: Cell::new(0),
            particle_colors: RefCell::new(Vec::new()),
            texts_drawn: RefCell::new(Vec::new()),
            max_alpha: Cell::new(0.0),
        }
    }

    /// Simulate a window resize (takes effect on the next `viewport()` call).
    pub fn set_viewport(&self, viewport: Viewport) {
        self.viewport.set(viewport);
    }

    pub fn resizes(&self) -> Vec<Viewport> {
        self.resizes.borrow().clone()
    }

    pub fn clears(&self) -> usize {
        self.clears.get()
    }

    pub fn particles_drawn(&self) -> usize {
        self.particle_colors.borrow().len()
    }

    /// Colors of every particle drawn, in draw order.
    pub fn particle_colors(&self) -> Vec<String> {
        self.particle_colors.borrow().clone()
    }

    pub fn texts_drawn(&self) -> Vec<String> {
        self.texts_drawn.borrow().clone()
    }

    /// Highest alpha passed to any draw call.
    pub fn max_alpha(&self) -> f64 {
        self.max_alpha.get()
    }

    fn note_alpha(&self, alpha: f64) {
        if alpha > self.max_alpha.get() {
            self.max_alpha.set(alpha);
        }
    }
}

impl Canvas for RecordingCanvas {
    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn resize(&self, viewport: Viewport) {
        self.resizes.borrow_mut().push(viewport);
    }

    fn clear(&self, _width: f64, _height: f64) {
        self.clears.set(self.clears.get() + 1);
    }

    fn draw_particle(&self, _x: f64, _y: f64, _radius: f64, color: &str, alpha: f64) {
        self.note_alpha(alpha);
        self.particle_colors.borrow_mut().push(color.to_string());
    }

    fn draw_text(&self, text: &str, _x: f64, _y: f64, alpha: f64) {
        self.note_alpha(alpha);
        self.texts_drawn.borrow_mut().push(text.to_string());
    }
}
