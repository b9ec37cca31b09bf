use scraper::ElementRef;

use super::text::strip_speaker;
use super::{clue, select_text, CATEGORY_COMMENTS_SEL, CATEGORY_NAME_SEL, CATEGORY_SEL, CLUE_SEL};
use crate::game::{Board, Category, ERROR_PLACEHOLDER, MISSING_CLUE_FLAG, MISSING_PLACEHOLDER};

/// Standard rounds have six categories; clue cells appear in row-major
/// reading order, so every sixth cell wraps to the next row.
const COLUMNS: usize = 6;

/// Extract a standard round: categories in document order, clue cells
/// assigned cyclically to columns 0..5.
pub fn extract(round: usize, round_el: ElementRef, multiplier: u32) -> (Board, Vec<String>) {
    let mut errors = Vec::new();

    let mut categories: Vec<Category> = Vec::new();
    for (i, category_el) in round_el.select(&CATEGORY_SEL).enumerate() {
        let name = match select_text(category_el, &CATEGORY_NAME_SEL) {
            None => {
                errors.push(format!(
                    "could not find class category_name in category {i} round {round}"
                ));
                ERROR_PLACEHOLDER.to_string()
            }
            Some(name) if name == MISSING_CLUE_FLAG => MISSING_PLACEHOLDER.to_string(),
            Some(name) => name,
        };
        let note = select_text(category_el, &CATEGORY_COMMENTS_SEL)
            .map(|note| strip_speaker(&note))
            .unwrap_or_default();
        categories.push(Category {
            name,
            note,
            clues: Vec::new(),
        });
    }

    let mut col = 0;
    let mut row = 0;
    for clue_el in round_el.select(&CLUE_SEL) {
        match categories.get_mut(col) {
            Some(category) => {
                let (clue, clue_errors) = clue::extract(clue_el, row, col, round, multiplier);
                category.clues.push(clue);
                errors.extend(clue_errors);
            }
            None => errors.push(format!(
                "clue ({row}, {col}) in round {round} has no matching category"
            )),
        }
        col += 1;
        if col >= COLUMNS {
            col = 0;
            row += 1;
        }
    }

    let board = Board {
        category_names: categories.iter().map(|cat| cat.name.clone()).collect(),
        categories,
    };
    (board, errors)
}

// ── Tests ──
