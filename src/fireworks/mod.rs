//! Fireworks celebration overlay.
//!
//! A trigger dims the page and schedules a volley of staggered bursts across
//! the top half of the viewport. The first burst starts a per-frame loop that
//! steps [`particles::Fireworks`]; the loop stops by itself once every particle
//! and floating text has expired, and the page is undimmed.

pub mod particles;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::CardConfig;
use crate::port::{Canvas, Page, Viewport};
use crate::schedule::Scheduler;
use particles::{Fireworks, StepOutcome, random_range};

/// Bursts keep this far from the left/right edges.
const EDGE_MARGIN: f64 = 80.0;
/// Bursts never go above this line.
const TOP_MARGIN: f64 = 100.0;
/// Floating text offset from the burst centre.
const TEXT_OFFSET: (f64, f64) = (-20.0, 10.0);

pub struct Celebration {
    config: Rc<CardConfig>,
    page: Rc<dyn Page>,
    canvas: Rc<dyn Canvas>,
    scheduler: Rc<dyn Scheduler>,
    fireworks: RefCell<Fireworks>,
    rng: RefCell<Pcg32>,
    viewport: Cell<Viewport>,
    bursts_fired: Cell<u32>,
}

impl Celebration {
    pub fn new(
        config: Rc<CardConfig>,
        page: Rc<dyn Page>,
        canvas: Rc<dyn Canvas>,
        scheduler: Rc<dyn Scheduler>,
        seed: u64,
    ) -> Rc<Self> {
        let viewport = canvas.viewport();
        Rc::new(Self {
            config,
            page,
            canvas,
            scheduler,
            fireworks: RefCell::new(Fireworks::new()),
            rng: RefCell::new(Pcg32::seed_from_u64(seed)),
            viewport: Cell::new(viewport),
            bursts_fired: Cell::new(0),
        })
    }

    /// Match the canvas backing store to the current viewport. Live particles
    /// keep their coordinates.
    pub fn resize(&self) {
        let vp = self.canvas.viewport();
        self.canvas.resize(vp);
        self.viewport.set(vp);
        log::debug!("fireworks canvas resized to {}x{} @{}x", vp.width, vp.height, vp.dpr);
    }

    /// Handle a click on either "yes" button.
    pub fn trigger(self: &Rc<Self>) {
        self.resize();
        self.page.set_dimmed(true);
        log::info!(
            "celebration: {} bursts every {}ms",
            self.config.burst_count,
            self.config.burst_stagger_ms
        );
        for i in 0..self.config.burst_count {
            let this = self.clone();
            self.scheduler
                .schedule(i * self.config.burst_stagger_ms, Box::new(move || this.burst()));
        }
    }

    fn burst(self: &Rc<Self>) {
        let vp = self.viewport.get();
        let cfg = &self.config;
        {
            let mut rng = self.rng.borrow_mut();
            let mut fw = self.fireworks.borrow_mut();
            let x = random_range(&mut *rng, EDGE_MARGIN, vp.width - EDGE_MARGIN);
            let y = random_range(&mut *rng, TOP_MARGIN, vp.height * 0.5);
            let count = random_range(&mut *rng, cfg.particles_min, cfg.particles_max)
                .round()
                .max(0.0) as usize;
            fw.spawn_burst(&mut *rng, x, y, count, &cfg.palette);

            if rng.random::<f64>() > 0.5 && !cfg.phrases.is_empty() {
                let phrase = &cfg.phrases[rng.random_range(0..cfg.phrases.len())];
                fw.spawn_text(&mut *rng, phrase, x + TEXT_OFFSET.0, y + TEXT_OFFSET.1);
            }
        }
        self.bursts_fired.set(self.bursts_fired.get() + 1);

        let start_loop = {
            let mut fw = self.fireworks.borrow_mut();
            let idle = !fw.is_running();
            if idle {
                fw.set_running(true);
            }
            idle
        };
        if start_loop {
            self.request_frame();
        }
    }

    fn request_frame(self: &Rc<Self>) {
        let this = self.clone();
        self.scheduler.next_frame(Box::new(move || this.frame()));
    }

    fn frame(self: &Rc<Self>) {
        let vp = self.viewport.get();
        let outcome = self
            .fireworks
            .borrow_mut()
            .step(self.canvas.as_ref(), vp.width, vp.height);
        match outcome {
            StepOutcome::Continue => self.request_frame(),
            StepOutcome::Finished => {
                self.fireworks.borrow_mut().set_running(false);
                self.canvas.clear(vp.width, vp.height);
                self.page.set_dimmed(false);
                log::info!("celebration finished");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.fireworks.borrow().is_running()
    }

    /// (particles, texts) currently alive.
    pub fn live_counts(&self) -> (usize, usize) {
        let fw = self.fireworks.borrow();
        (fw.particles().len(), fw.texts().len())
    }

    pub fn bursts_fired(&self) -> u32 {
        self.bursts_fired.get()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }
}
