//! Card configuration: every tunable constant lives here.
//!
//! `FLIP_MS` is the single source of truth for tile animation speed: it drives
//! the CSS transition (`--flip-duration`) as well as the cascade delay.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const GRID_SIZE: usize = 5;

pub const DEFAULT_ROWS: [&str; GRID_SIZE] = ["RUSHI", "WILL", "YOU", "MARRY", "ME?"];
pub const DEFAULT_FLIP_MS: u32 = 1000;
pub const DEFAULT_SETTLE_MS: u32 = 340;
pub const MIN_INTER_TILE_DELAY_MS: u32 = 40;

pub const ACCEPTED_NAME: &str = "Rushi";
pub const FALLBACK_URL: &str = "https://squaredle.app/";
pub const TOTAL_WORDS: u32 = 1;

pub const BURST_COUNT: u32 = 60;
pub const BURST_STAGGER_MS: u32 = 110;
pub const PARTICLES_PER_BURST: (f64, f64) = (18.0, 36.0);

pub const PHRASES: [&str; 5] = ["YES!!", "ILOVEYOU", "YAY", "HAHAHEHE", "WAHOO!!"];
pub const PALETTE: [&str; 5] = ["#ff4d4f", "#ff7a7a", "#ffdf5d", "#ffd166", "#ff6bcb"];

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardConfig {
    /// Raw grid rows; sanitized to 5x5 every time the grid is built.
    pub rows: Vec<String>,
    /// Duration of one tile flip transition (ms).
    pub flip_ms: u32,
    /// Layout settle pause between building the grid and starting the cascade.
    pub settle_ms: u32,
    pub accepted_name: String,
    pub fallback_url: String,
    pub total_words: u32,
    pub burst_count: u32,
    pub burst_stagger_ms: u32,
    pub particles_min: f64,
    pub particles_max: f64,
    pub phrases: Vec<String>,
    pub palette: Vec<String>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS.iter().map(|r| r.to_string()).collect(),
            flip_ms: DEFAULT_FLIP_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            accepted_name: ACCEPTED_NAME.to_string(),
            fallback_url: FALLBACK_URL.to_string(),
            total_words: TOTAL_WORDS,
            burst_count: BURST_COUNT,
            burst_stagger_ms: BURST_STAGGER_MS,
            particles_min: PARTICLES_PER_BURST.0,
            particles_max: PARTICLES_PER_BURST.1,
            phrases: PHRASES.iter().map(|p| p.to_string()).collect(),
            palette: PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl CardConfig {
    /// max(40, round(flip_ms * 0.25))
    pub fn inter_tile_delay_ms(&self) -> u32 {
        inter_tile_delay_for(self.flip_ms)
    }

    /// Value for the `--flip-duration` CSS custom property.
    pub fn flip_duration_css(&self) -> String {
        format!("{}ms", self.flip_ms)
    }

    pub fn word_count_label(&self, found: u32) -> String {
        format!("{} / {} words", found, self.total_words)
    }

    /// Parse overrides from JSON; absent fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

pub fn inter_tile_delay_for(flip_ms: u32) -> u32 {
    let quarter = (flip_ms as f64 * 0.25).round() as u32;
    quarter.max(MIN_INTER_TILE_DELAY_MS)
}
