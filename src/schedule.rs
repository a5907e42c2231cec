//! Deferred work: timers and next-frame callbacks.
//!
//! Everything time-based in the card (cascade reveals, staggered bursts, the
//! fireworks frame loop) goes through [`Scheduler`]. The browser implementation
//! maps straight onto `setTimeout` / `requestAnimationFrame`; [`VirtualClock`]
//! lets tests advance time by hand.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub type Task = Box<dyn FnOnce()>;

/// Nominal frame length used by the virtual clock for `next_frame` tasks.
pub const FRAME_MS: u64 = 16;

pub trait Scheduler {
    /// Run `task` once, `delay_ms` after now.
    fn schedule(&self, delay_ms: u32, task: Task);
    /// Run `task` once on the next animation frame.
    fn next_frame(&self, task: Task);
}

// --- Browser ----------------------------------------------------------------

/// `setTimeout` takes a signed 32-bit delay; anything larger fires immediately
/// in browsers, so clamp instead of wrapping.
fn timeout_arg(delay_ms: u32) -> i32 {
    i32::try_from(delay_ms).unwrap_or(i32::MAX)
}

pub struct BrowserScheduler {
    window: web_sys::Window,
}

impl BrowserScheduler {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) {
        let cb = Closure::once_into_js(move || task());
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), timeout_arg(delay_ms))
        {
            log::warn!("setTimeout failed: {:?}", e);
        }
    }

    fn next_frame(&self, task: Task) {
        let cb = Closure::once_into_js(move || task());
        if let Err(e) = self.window.request_animation_frame(cb.unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {:?}", e);
        }
    }
}

// --- Virtual clock ----------------------------------------------------------

struct Pending {
    due: u64,
    seq: u64,
    frame: bool,
    task: Task,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    // Reversed so the BinaryHeap pops the earliest (due, seq) first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Deterministic scheduler: tasks run in (due time, insertion order) when the
/// clock is advanced. Frame callbacks are due [`FRAME_MS`] after the request.
#[derive(Default)]
pub struct VirtualClock {
    now: Cell<u64>,
    seq: Cell<u64>,
    queue: RefCell<BinaryHeap<Pending>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Pending `next_frame` tasks (a running frame loop keeps exactly one).
    pub fn pending_frames(&self) -> usize {
        self.queue.borrow().iter().filter(|p| p.frame).count()
    }

    fn push(&self, delay: u64, frame: bool, task: Task) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.queue.borrow_mut().push(Pending {
            due: self.now.get() + delay,
            seq,
            frame,
            task,
        });
    }

    fn pop_due(&self, limit: u64) -> Option<Pending> {
        let mut queue = self.queue.borrow_mut();
        match queue.peek() {
            Some(p) if p.due <= limit => queue.pop(),
            _ => None,
        }
    }

    /// Advance the clock by `ms`, running every task that falls due (including
    /// tasks scheduled by tasks). Returns how many ran.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.now.get() + ms;
        let mut ran = 0;
        // The queue borrow is released before the task runs so tasks may reschedule.
        while let Some(p) = self.pop_due(target) {
            self.now.set(p.due);
            (p.task)();
            ran += 1;
        }
        self.now.set(target);
        ran
    }

    /// Run until nothing is pending or `limit_ms` of virtual time has passed.
    pub fn run_until_idle(&self, limit_ms: u64) -> usize {
        let limit = self.now.get() + limit_ms;
        let mut ran = 0;
        while let Some(p) = self.pop_due(limit) {
            self.now.set(p.due);
            (p.task)();
            ran += 1;
        }
        ran
    }
}

impl Scheduler for VirtualClock {
    fn schedule(&self, delay_ms: u32, task: Task) {
        self.push(delay_ms as u64, false, task);
    }

    fn next_frame(&self, task: Task) {
        self.push(FRAME_MS, true, task);
    }
}
