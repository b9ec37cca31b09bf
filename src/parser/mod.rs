pub mod board;
pub mod clue;
pub mod final_round;
pub mod text;

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

use crate::game::{Game, ERROR_PLACEHOLDER, GAME_AUTHOR, GAME_COPYRIGHT};

/// VALUE_DOUBLING_DATE is the day clue values were doubled.
static VALUE_DOUBLING_DATE: LazyLock<NaiveDate> =
    LazyLock::new(|| NaiveDate::from_ymd_opt(2001, 11, 26).unwrap());

/// Captures the month-day-year part of a game title.
/// Example: "Show #3966 - Monday, November 26, 2001"
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\d+ - \w+, (\w+ \d+, \d+)").unwrap());

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

selector!(GAME_TITLE_SEL, "#game_title");
selector!(GAME_COMMENTS_SEL, "#game_comments");
selector!(J_ROUND_SEL, "#jeopardy_round");
selector!(DJ_ROUND_SEL, "#double_jeopardy_round");
selector!(FJ_ROUND_SEL, "#final_jeopardy_round");
selector!(CATEGORY_SEL, ".category");
selector!(CATEGORY_NAME_SEL, ".category_name");
selector!(CATEGORY_COMMENTS_SEL, ".category_comments");
selector!(CLUE_SEL, ".clue");
selector!(CLUE_TEXT_SEL, ".clue_text");
selector!(CLUE_VALUE_SEL, ".clue_value");
selector!(CLUE_VALUE_DD_SEL, ".clue_value_daily_double");
selector!(CORRECT_RESPONSE_SEL, ".correct_response");
selector!(LINK_SEL, "a");

/// The one fatal failure: without a parseable air date there is no safe value
/// multiplier, so the whole extraction is abandoned. Everything else degrades
/// to placeholders plus diagnostics.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("could not parse date from title {0}")]
    TitleDate(String),
}

/// Best-effort extraction result. `error` carries the newline-joined field
/// diagnostics; when set, `game` is still a usable partial result.
#[derive(Debug)]
pub struct ParsedGame {
    pub game: Game,
    pub error: Option<String>,
}

/// Parse a j-archive game page into a [`Game`] plus aggregated diagnostics.
///
/// Round boards appear in [single, double, final] order. A standard round
/// whose every clue went unrecorded or unrevealed is dropped, as is any round
/// whose container is missing; the final board is kept whenever its container
/// exists.
pub fn parse_game(doc: &Html) -> Result<ParsedGame, ParseError> {
    let root = doc.root_element();
    let mut errors: Vec<String> = Vec::new();

    let title = match select_text(root, &GAME_TITLE_SEL) {
        Some(title) => title,
        None => {
            errors.push("could not find id game_title on page".to_string());
            ERROR_PLACEHOLDER.to_string()
        }
    };
    let multiplier = clue_value_multiplier(&title)?;

    let note = select_text(root, &GAME_COMMENTS_SEL).unwrap_or_default();

    let mut boards = Vec::new();
    for (round, sel) in [(0usize, &*J_ROUND_SEL), (1, &*DJ_ROUND_SEL)] {
        let Some(round_el) = root.select(sel).next() else {
            continue;
        };
        let (board, round_errors) = board::extract(round, round_el, multiplier);
        if board.is_empty() {
            debug!(round, "dropping empty round");
            continue;
        }
        boards.push(board);
        errors.extend(round_errors);
    }

    if let Some(final_el) = root.select(&FJ_ROUND_SEL).next() {
        let (board, final_errors) = final_round::extract(final_el);
        boards.push(board);
        errors.extend(final_errors);
    }

    debug!(%title, boards = boards.len(), errors = errors.len(), "parsed game");

    let game = Game {
        title,
        author: GAME_AUTHOR.to_string(),
        copyright: GAME_COPYRIGHT.to_string(),
        note,
        boards,
    };
    let error = if errors.is_empty() {
        None
    } else {
        Some(errors.join("\n"))
    };
    Ok(ParsedGame { game, error })
}

/// Whether the game aired before or on/after [`VALUE_DOUBLING_DATE`].
fn clue_value_multiplier(title: &str) -> Result<u32, ParseError> {
    let caps = TITLE_RE
        .captures(title)
        .ok_or_else(|| ParseError::TitleDate(title.to_string()))?;
    let date = NaiveDate::parse_from_str(&caps[1], "%B %d, %Y")
        .map_err(|_| ParseError::TitleDate(title.to_string()))?;
    Ok(if date < *VALUE_DOUBLING_DATE { 1 } else { 2 })
}

/// Expected clue value from board position, used when the true value is
/// unknown (wagerable or unrevealed clues would otherwise read 0).
pub(crate) fn expected_clue_value(row: usize, round: usize, multiplier: u32) -> u32 {
    100 * (row as u32 + 1) * (round as u32 + 1) * multiplier
}

/// Text content of the first descendant matching `sel`. Returns `None` for a
/// missing element and for empty text alike, matching how the archive marks
/// unrevealed fields.
pub(crate) fn select_text(el: ElementRef, sel: &Selector) -> Option<String> {
    let found = el.select(sel).next()?;
    let text: String = found.text().collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// ── Tests ──
