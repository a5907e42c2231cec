// Grid model: row sanitizing and tile construction.
use crate::config::GRID_SIZE;
use crate::port::Page;

pub const TILE_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Exactly five rows of exactly five characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowSet([String; GRID_SIZE]);

impl RowSet {
    /// Pad (with spaces) or truncate each row to five characters; rows past the
    /// fifth are ignored and missing rows become blank.
    pub fn sanitize<S: AsRef<str>>(rows: &[S]) -> Self {
        Self::from_optional(rows.iter().map(|r| Some(r.as_ref())))
    }

    /// Like [`RowSet::sanitize`] but tolerant of absent entries (`None` reads as "").
    pub fn from_optional<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut iter = rows.into_iter();
        Self(std::array::from_fn(|_| {
            let raw = iter.next().flatten().unwrap_or("");
            fit_row(raw)
        }))
    }

    pub fn rows(&self) -> &[String; GRID_SIZE] {
        &self.0
    }

    /// Character at (row, col). Always defined: every row holds five chars.
    pub fn char_at(&self, row: usize, col: usize) -> char {
        self.0[row].chars().nth(col).unwrap_or(' ')
    }
}

fn fit_row(raw: &str) -> String {
    let mut row: String = raw.chars().take(GRID_SIZE).collect();
    let len = row.chars().count();
    row.extend(std::iter::repeat_n(' ', GRID_SIZE - len));
    row
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
    pub ch: char,
    pub revealed: bool,
}

impl Tile {
    pub fn new(row: usize, col: usize, ch: char) -> Self {
        Self { row, col, ch, revealed: false }
    }

    /// Whitespace tiles stay grey and never flip.
    pub fn is_blank(&self) -> bool {
        self.ch.is_whitespace()
    }

    pub fn index(&self) -> usize {
        self.row * GRID_SIZE + self.col
    }
}

/// The 25 tiles of a built grid, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn from_rows(rows: &RowSet) -> Self {
        let mut tiles = Vec::with_capacity(TILE_COUNT);
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                tiles.push(Tile::new(row, col, rows.char_at(row, col)));
            }
        }
        Self { tiles }
    }

    /// Replace whatever grid the page shows with a fresh one built from `rows`.
    pub fn build(rows: &RowSet, page: &dyn Page) -> Self {
        page.clear_grid();
        let grid = Self::from_rows(rows);
        for tile in &grid.tiles {
            page.add_tile(tile);
        }
        log::debug!(
            "grid built: {} tiles, {} lettered",
            grid.tiles.len(),
            grid.flip_indices().len()
        );
        grid
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, row: usize, col: usize) -> &Tile {
        &self.tiles[row * GRID_SIZE + col]
    }

    /// Row-major layout indices of every non-blank tile.
    pub fn flip_indices(&self) -> Vec<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_blank())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Mark a tile revealed. Blank or out-of-range tiles are left alone;
    /// returns whether the tile changed.
    pub fn reveal(&mut self, index: usize) -> bool {
        match self.tiles.get_mut(index) {
            Some(t) if !t.is_blank() && !t.revealed => {
                t.revealed = true;
                true
            }
            _ => false,
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.revealed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::recording::{PageEvent, RecordingPage};

    #[test]
    fn sanitize_pads_truncates_and_fills_missing_rows() {
        let rows = RowSet::sanitize(&["AB", "", "HELLOTHERE"]);
        assert_eq!(rows.rows(), &["AB   ", "     ", "HELLO", "     ", "     "]);
    }

    #[test]
    fn sanitize_ignores_extra_rows() {
        let rows = RowSet::sanitize(&["A", "B", "C", "D", "E", "F"]);
        assert_eq!(rows.rows()[4], "E    ");
    }

    #[test]
    fn absent_entries_read_as_empty() {
        let rows = RowSet::from_optional([Some("HI"), None, Some("YOU")]);
        assert_eq!(rows.rows(), &["HI   ", "     ", "YOU  ", "     ", "     "]);
    }

    #[test]
    fn multibyte_rows_count_characters() {
        let rows = RowSet::sanitize(&["你好", "ÉÉÉÉÉÉ"]);
        assert_eq!(rows.rows()[0].chars().count(), 5);
        assert_eq!(rows.rows()[1], "ÉÉÉÉÉ");
        assert_eq!(rows.char_at(0, 1), '好');
    }

    #[test]
    fn grid_marks_whitespace_blank() {
        let grid = Grid::from_rows(&RowSet::sanitize(&["ME?"]));
        assert_eq!(grid.tiles().len(), TILE_COUNT);
        assert!(!grid.tile(0, 2).is_blank());
        assert!(grid.tile(0, 3).is_blank());
        assert!(grid.tile(4, 4).is_blank());
        assert_eq!(grid.flip_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn build_clears_then_adds_tiles_row_major() {
        let page = RecordingPage::new();
        Grid::build(&RowSet::sanitize(&["AB"]), &page);
        let events = page.visible_effects();
        assert_eq!(events[0], PageEvent::ClearGrid);
        assert_eq!(events.len(), 1 + TILE_COUNT);
        assert_eq!(events[1], PageEvent::AddTile { row: 0, col: 0, ch: 'A', blank: false });
        assert_eq!(events[6], PageEvent::AddTile { row: 1, col: 0, ch: ' ', blank: true });
    }

    #[test]
    fn blank_tiles_never_reveal() {
        let mut grid = Grid::from_rows(&RowSet::sanitize(&["A"]));
        assert!(!grid.reveal(1));
        assert!(grid.reveal(0));
        assert!(!grid.reveal(0));
        assert!(!grid.reveal(99));
        assert_eq!(grid.revealed_count(), 1);
    }
}
