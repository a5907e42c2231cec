// Particle / floating-text simulation for the celebration overlay.
// One `step` = one animation frame. Units are CSS pixels and frames.
use rand::Rng;

use crate::port::Canvas;

pub const GRAVITY: f64 = 0.06;
pub const TEXT_LIFE: f64 = 160.0;

const SPEED: (f64, f64) = (1.8, 6.6);
const PARTICLE_LIFE: (f64, f64) = (40.0, 90.0);
const PARTICLE_SIZE: (f64, f64) = (2.0, 5.0);
const TEXT_RISE: f64 = 0.6;
const TEXT_RISE_JITTER: f64 = 0.4;

/// Uniform in [min, max). A reversed range yields values in (max, min] instead of panicking.
pub fn random_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.random::<f64>() * (max - min) + min
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub age: f64,
    pub life: f64,
    pub size: f64,
    pub color: String,
}

impl Particle {
    pub fn spawn<R: Rng>(rng: &mut R, x: f64, y: f64, color: &str) -> Self {
        let angle = rng.random::<f64>() * std::f64::consts::TAU;
        let speed = random_range(rng, SPEED.0, SPEED.1);
        Self {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            age: 0.0,
            life: random_range(rng, PARTICLE_LIFE.0, PARTICLE_LIFE.1),
            size: random_range(rng, PARTICLE_SIZE.0, PARTICLE_SIZE.1),
            color: color.to_string(),
        }
    }

    /// Advance one frame and return the remaining life fraction.
    ///
    /// Age is bumped twice per frame (before and after integration), so a
    /// particle burns through its `life` at double speed.
    pub fn tick(&mut self) -> f64 {
        self.age += 1.0;
        self.vy += GRAVITY;
        self.x += self.vx;
        self.y += self.vy;
        self.age += 1.0;
        1.0 - self.age / self.life
    }

    pub fn radius(&self, life_frac: f64) -> f64 {
        self.size * life_frac + 0.5
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingText {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub vy: f64,
    pub alpha: f64,
    pub age: f64,
    pub life: f64,
}

impl FloatingText {
    pub fn spawn<R: Rng>(rng: &mut R, text: &str, x: f64, y: f64) -> Self {
        Self {
            text: text.to_string(),
            x,
            y,
            vy: -TEXT_RISE - rng.random::<f64>() * TEXT_RISE_JITTER,
            alpha: 1.0,
            age: 0.0,
            life: TEXT_LIFE,
        }
    }

    /// Drift up one frame and return the new opacity.
    pub fn tick(&mut self) -> f64 {
        self.y += self.vy;
        self.age += 1.0;
        self.alpha = (1.0 - self.age / self.life).max(0.0);
        self.alpha
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Finished,
}

/// Live particles and texts plus the "frame loop is running" flag.
#[derive(Debug, Default)]
pub struct Fireworks {
    particles: Vec<Particle>,
    texts: Vec<FloatingText>,
    running: bool,
}

impl Fireworks {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` particles at (x, y), colors cycling through `palette`.
    pub fn spawn_burst<R: Rng>(
        &mut self,
        rng: &mut R,
        x: f64,
        y: f64,
        count: usize,
        palette: &[String],
    ) {
        if palette.is_empty() {
            return;
        }
        self.particles.reserve(count);
        for i in 0..count {
            let color = &palette[i % palette.len()];
            self.particles.push(Particle::spawn(rng, x, y, color));
        }
    }

    pub fn spawn_text<R: Rng>(&mut self, rng: &mut R, text: &str, x: f64, y: f64) {
        self.texts.push(FloatingText::spawn(rng, text, x, y));
    }

    pub fn push_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn texts(&self) -> &[FloatingText] {
        &self.texts
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.texts.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Advance every particle and text by one frame, drop the expired ones and
    /// draw the survivors onto a freshly cleared canvas.
    pub fn step(&mut self, canvas: &dyn Canvas, width: f64, height: f64) -> StepOutcome {
        canvas.clear(width, height);

        // Newest first, so older particles end up drawn on top.
        for i in (0..self.particles.len()).rev() {
            let p = &mut self.particles[i];
            let life_frac = p.tick();
            if life_frac <= 0.0 {
                self.particles.remove(i);
                continue;
            }
            canvas.draw_particle(p.x, p.y, p.radius(life_frac), &p.color, life_frac);
        }

        for i in (0..self.texts.len()).rev() {
            let t = &mut self.texts[i];
            let alpha = t.tick();
            if alpha <= 0.0 {
                self.texts.remove(i);
                continue;
            }
            canvas.draw_text(&t.text, t.x, t.y, alpha);
        }

        if self.is_empty() {
            StepOutcome::Finished
        } else {
            StepOutcome::Continue
        }
    }
}
