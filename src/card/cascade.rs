//! Cascading tile reveal.
//!
//! Lettered tiles flip one after another in row-major order. The delay of each
//! flip is taken from the tile's position in the full 5x5 layout (blank cells
//! included), so gaps in the text keep the wave moving at a steady spatial pace
//! instead of bunching the remaining letters together.

use std::cell::RefCell;
use std::rc::Rc;

use super::grid::Grid;
use crate::port::Page;
use crate::schedule::{Scheduler, Task};

/// When each tile flips and when the whole cascade has visually settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadePlan {
    /// (layout index, ms after start), in firing order.
    pub reveals: Vec<(usize, u32)>,
    /// `None` when there is nothing to flip: completion is immediate.
    pub done_at_ms: Option<u32>,
}

impl CascadePlan {
    /// Times saturate at `u32::MAX` for oversized delays.
    pub fn new(flip_indices: &[usize], delay_ms: u32, flip_ms: u32) -> Self {
        let reveals: Vec<(usize, u32)> = flip_indices
            .iter()
            .map(|&idx| (idx, offset_ms(idx, delay_ms)))
            .collect();
        // Wait for the last flip's transition to finish, not just to start.
        let done_at_ms = flip_indices
            .iter()
            .max()
            .map(|&last| offset_ms(last, delay_ms).saturating_add(flip_ms));
        Self { reveals, done_at_ms }
    }
}

fn offset_ms(index: usize, delay_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(delay_ms)
}

/// Schedule every reveal of `grid` and call `on_done` once the last flip has
/// finished animating. With no lettered tiles `on_done` runs before returning.
pub fn run_cascade(
    grid: Rc<RefCell<Grid>>,
    page: Rc<dyn Page>,
    scheduler: &dyn Scheduler,
    delay_ms: u32,
    flip_ms: u32,
    on_done: Task,
) -> CascadePlan {
    let plan = CascadePlan::new(&grid.borrow().flip_indices(), delay_ms, flip_ms);
    for &(idx, at) in &plan.reveals {
        let grid = grid.clone();
        let page = page.clone();
        scheduler.schedule(
            at,
            Box::new(move || {
                if grid.borrow_mut().reveal(idx) {
                    page.flip_tile(idx);
                }
            }),
        );
    }
    match plan.done_at_ms {
        Some(at) => scheduler.schedule(at, on_done),
        None => on_done(),
    }
    plan
}
