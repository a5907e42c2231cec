//! Name gate and tile reveal flow.
//!
//! The begin button opens a name prompt. The accepted name reveals the letter
//! grid with a cascading flip; anything else leaves for the fallback site; an
//! empty or cancelled prompt does nothing. The check is an exact,
//! case-sensitive string compare: a greeting, not an access control.

pub mod cascade;
pub mod grid;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::CardConfig;
use crate::port::{Page, Surface};
use crate::schedule::Scheduler;
use cascade::run_cascade;
use grid::{Grid, RowSet};

pub const NAME_PROMPT: &str = "Please enter your name:";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    Waiting,
    Revealed,
}

/// What a single begin trigger did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    /// Prompt cancelled or empty; nothing changed.
    Aborted,
    Revealed,
    Redirected(String),
    /// The grid is already revealed; the flow is terminal.
    Ignored,
}

pub struct Gate {
    config: Rc<CardConfig>,
    page: Rc<dyn Page>,
    scheduler: Rc<dyn Scheduler>,
    state: Cell<GateState>,
    words_found: Rc<Cell<u32>>,
    grid: RefCell<Option<Rc<RefCell<Grid>>>>,
}

impl Gate {
    pub fn new(config: Rc<CardConfig>, page: Rc<dyn Page>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            config,
            page,
            scheduler,
            state: Cell::new(GateState::Waiting),
            words_found: Rc::new(Cell::new(0)),
            grid: RefCell::new(None),
        }
    }

    pub fn state(&self) -> GateState {
        self.state.get()
    }

    pub fn words_found(&self) -> u32 {
        self.words_found.get()
    }

    /// Snapshot of the built grid, if the reveal has started.
    pub fn grid(&self) -> Option<Grid> {
        self.grid.borrow().as_ref().map(|g| g.borrow().clone())
    }

    /// Handle a click on the begin button.
    pub fn on_begin(&self) -> GateOutcome {
        if self.state.get() == GateState::Revealed {
            log::debug!("begin ignored: grid already revealed");
            return GateOutcome::Ignored;
        }
        let name = match self.page.prompt(NAME_PROMPT) {
            Some(name) if !name.is_empty() => name,
            _ => return GateOutcome::Aborted,
        };
        if name == self.config.accepted_name {
            log::info!("name accepted, revealing grid");
            self.reveal();
            GateOutcome::Revealed
        } else {
            let url = self.config.fallback_url.clone();
            log::info!("name not accepted, redirecting to {}", url);
            self.page.navigate(&url);
            GateOutcome::Redirected(url)
        }
    }

    fn reveal(&self) {
        self.state.set(GateState::Revealed);
        self.page.set_visible(Surface::StatusRow, true);
        show_word_count(self.page.as_ref(), &self.words_found, &self.config, 0);
        self.page.set_visible(Surface::Welcome, false);
        self.page.set_visible(Surface::GridWrap, true);

        let rows = RowSet::sanitize(&self.config.rows);
        let grid = Rc::new(RefCell::new(Grid::build(&rows, self.page.as_ref())));
        *self.grid.borrow_mut() = Some(grid.clone());

        let page = self.page.clone();
        let scheduler = self.scheduler.clone();
        let config = self.config.clone();
        let words = self.words_found.clone();
        // Give the layout a moment to settle before the first flip.
        self.scheduler.schedule(
            self.config.settle_ms,
            Box::new(move || {
                let delay = config.inter_tile_delay_ms();
                let flip_ms = config.flip_ms;
                let done_page = page.clone();
                let on_done = Box::new(move || {
                    show_word_count(done_page.as_ref(), &words, &config, 1);
                    log::info!("reveal complete");
                });
                run_cascade(grid, page, scheduler.as_ref(), delay, flip_ms, on_done);
            }),
        );
    }
}

fn show_word_count(page: &dyn Page, words: &Cell<u32>, config: &CardConfig, found: u32) {
    words.set(found);
    page.set_word_count(&config.word_count_label(found));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::recording::{PageEvent, RecordingPage};
    use crate::schedule::VirtualClock;

    fn gate_with(reply: Option<&str>) -> (Gate, Rc<RecordingPage>, Rc<VirtualClock>) {
        let clock = Rc::new(VirtualClock::new());
        let page = Rc::new(RecordingPage::with_clock(clock.clone()));
        page.reply_with(reply);
        let gate = Gate::new(Rc::new(CardConfig::default()), page.clone(), clock.clone());
        (gate, page, clock)
    }

    #[test]
    fn accepted_name_reveals_and_counts_word() {
        let (gate, page, clock) = gate_with(Some("Rushi"));
        assert_eq!(gate.on_begin(), GateOutcome::Revealed);
        assert_eq!(gate.state(), GateState::Revealed);
        assert_eq!(gate.words_found(), 0);

        clock.run_until_idle(60_000);
        assert_eq!(gate.words_found(), 1);
        let counts: Vec<String> = page.word_counts().into_iter().map(|(_, s)| s).collect();
        assert_eq!(counts, vec!["0 / 1 words", "1 / 1 words"]);
        assert!(page.navigations().is_empty());
    }

    #[test]
    fn reveal_toggles_surfaces_before_building() {
        let (gate, page, _clock) = gate_with(Some("Rushi"));
        gate.on_begin();
        let effects = page.visible_effects();
        assert_eq!(effects[0], PageEvent::SetVisible(Surface::StatusRow, true));
        assert_eq!(effects[1], PageEvent::WordCount("0 / 1 words".into()));
        assert_eq!(effects[2], PageEvent::SetVisible(Surface::Welcome, false));
        assert_eq!(effects[3], PageEvent::SetVisible(Surface::GridWrap, true));
        assert_eq!(effects[4], PageEvent::ClearGrid);
    }

    #[test]
    fn cascade_starts_after_settle_delay() {
        let (gate, page, clock) = gate_with(Some("Rushi"));
        gate.on_begin();
        clock.run_until_idle(60_000);
        let flips = page.flips();
        // RUSHI occupies indices 0..5, so the first flip lands right after the settle pause
        assert_eq!(flips[0], (340, 0));
        assert_eq!(flips[1], (340 + 250, 1));
        let grid = gate.grid().unwrap();
        assert_eq!(grid.revealed_count(), grid.flip_indices().len());
    }

    #[test]
    fn huge_flip_duration_does_not_overflow_the_cascade() {
        let clock = Rc::new(VirtualClock::new());
        let page = Rc::new(RecordingPage::with_clock(clock.clone()));
        page.reply_with(Some("Rushi"));
        let config = CardConfig {
            flip_ms: 800_000_000,
            ..CardConfig::default()
        };
        let gate = Gate::new(Rc::new(config), page.clone(), clock.clone());
        assert_eq!(gate.on_begin(), GateOutcome::Revealed);
        clock.advance(340);
        assert_eq!(page.flips(), vec![(340, 0)]);
        // the rest of the wave saturates far in the future instead of wrapping
        clock.advance(1_000_000);
        assert_eq!(page.flips().len(), 1);
        assert_eq!(gate.words_found(), 0);
    }

    #[test]
    fn empty_or_cancelled_prompt_is_silent() {
        for reply in [Some(""), None] {
            let (gate, page, clock) = gate_with(reply);
            assert_eq!(gate.on_begin(), GateOutcome::Aborted);
            assert_eq!(gate.state(), GateState::Waiting);
            assert!(page.visible_effects().is_empty());
            assert_eq!(clock.pending(), 0);
        }
    }

    #[test]
    fn wrong_name_redirects() {
        for reply in ["rushi", "Rushi ", "someone"] {
            let (gate, page, _clock) = gate_with(Some(reply));
            assert_eq!(
                gate.on_begin(),
                GateOutcome::Redirected("https://squaredle.app/".into())
            );
            assert_eq!(page.navigations(), vec!["https://squaredle.app/".to_string()]);
            assert!(gate.grid().is_none());
        }
    }

    #[test]
    fn second_begin_after_reveal_is_ignored() {
        let (gate, page, _clock) = gate_with(Some("Rushi"));
        gate.on_begin();
        let before = page.events().len();
        assert_eq!(gate.on_begin(), GateOutcome::Ignored);
        assert_eq!(page.events().len(), before);
    }
}
