//! Presentation ports.
//!
//! The controllers never touch the DOM or the canvas directly: they talk to a
//! [`Page`] (pre-existing HTML surfaces) and a [`Canvas`] (fireworks overlay).
//! `crate::dom` implements both for the browser; `recording` (unit tests and
//! the `test-util` feature) implements both for native tests.

#[cfg(any(test, feature = "test-util"))]
pub mod recording;

use crate::card::grid::Tile;

/// Page surfaces whose visibility the gate toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    Welcome,
    GridWrap,
    StatusRow,
}

pub trait Page {
    /// Blocking single-line prompt. `None` when cancelled.
    fn prompt(&self, message: &str) -> Option<String>;
    /// Leave the page for `url`.
    fn navigate(&self, url: &str);
    fn set_visible(&self, surface: Surface, visible: bool);
    fn set_word_count(&self, text: &str);
    /// Publish the flip duration so CSS transitions match the cascade timing.
    fn set_flip_duration(&self, css_value: &str);
    /// Remove every tile visual from the grid container.
    fn clear_grid(&self);
    /// Append one tile visual (front + back face) to the grid container.
    fn add_tile(&self, tile: &Tile);
    /// Put the tile visual at row-major `index` into its flipped state.
    fn flip_tile(&self, index: usize);
    /// Dim (or undim) the main content behind the fireworks overlay.
    fn set_dimmed(&self, dimmed: bool);
}

/// CSS-pixel viewport plus device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        // devicePixelRatio can be reported as 0 by some embedders
        let dpr = if dpr > 0.0 { dpr } else { 1.0 };
        Self { width, height, dpr }
    }

    /// Backing-store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).round().max(0.0) as u32,
            (self.height * self.dpr).round().max(0.0) as u32,
        )
    }
}

pub trait Canvas {
    /// Current window viewport.
    fn viewport(&self) -> Viewport;
    /// Resize the backing store and reset the transform to `viewport.dpr`.
    fn resize(&self, viewport: Viewport);
    fn clear(&self, width: f64, height: f64);
    fn draw_particle(&self, x: f64, y: f64, radius: f64, color: &str, alpha: f64);
    fn draw_text(&self, text: &str, x: f64, y: f64, alpha: f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backing_size_scales_by_dpr() {
        let vp = Viewport::new(400.5, 300.0, 2.0);
        assert_eq!(vp.backing_size(), (801, 600));
    }

    #[test]
    fn zero_dpr_falls_back_to_one() {
        let vp = Viewport::new(100.0, 50.0, 0.0);
        assert_eq!(vp.dpr, 1.0);
        assert_eq!(vp.backing_size(), (100, 50));
    }
}
