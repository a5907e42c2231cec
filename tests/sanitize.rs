// Property tests for row sanitizing and grid construction (host only).
#![cfg(not(target_arch = "wasm32"))]

use proptest::prelude::*;

use tile_cascade_card::card::grid::TILE_COUNT;
use tile_cascade_card::{Grid, RowSet};

proptest! {
    #[test]
    fn always_five_rows_of_five_chars(rows in prop::collection::vec(".{0,12}", 0..8)) {
        let set = RowSet::sanitize(&rows);
        prop_assert_eq!(set.rows().len(), 5);
        for (i, row) in set.rows().iter().enumerate() {
            prop_assert_eq!(row.chars().count(), 5);
            let raw: String = rows.get(i).map(|r| r.chars().take(5).collect()).unwrap_or_default();
            prop_assert!(row.starts_with(&raw));
            prop_assert!(row[raw.len()..].chars().all(|c| c == ' '));
        }
    }

    #[test]
    fn blank_flag_matches_whitespace(rows in prop::collection::vec("[A-Z \t?]{0,6}", 0..6)) {
        let set = RowSet::sanitize(&rows);
        let grid = Grid::from_rows(&set);
        prop_assert_eq!(grid.tiles().len(), TILE_COUNT);
        for tile in grid.tiles() {
            prop_assert_eq!(tile.is_blank(), set.char_at(tile.row, tile.col).is_whitespace());
            prop_assert!(!tile.revealed);
        }
    }

    #[test]
    fn optional_entries_match_empty_strings(present in prop::collection::vec(prop::option::of("[a-z]{0,7}"), 0..5)) {
        let with_none = RowSet::from_optional(present.iter().map(|r| r.as_deref()));
        let as_strings: Vec<String> = present.iter().map(|r| r.clone().unwrap_or_default()).collect();
        prop_assert_eq!(with_none, RowSet::sanitize(&as_strings));
    }
}
