use scraper::ElementRef;

use super::text::{normalize_response, sanitize_url};
use super::{
    expected_clue_value, select_text, CLUE_TEXT_SEL, CLUE_VALUE_DD_SEL, CLUE_VALUE_SEL,
    CORRECT_RESPONSE_SEL, LINK_SEL,
};
use crate::game::{
    Clue, ERROR_PLACEHOLDER, MISSING_CLUE_FLAG, MISSING_PLACEHOLDER, UNREVEALED_PLACEHOLDER,
};

/// Extract one clue cell at (`row`, `col`) of `round`. Every missing or
/// malformed field degrades to a placeholder and a diagnostic; nothing here
/// aborts the surrounding round.
pub fn extract(
    clue_el: ElementRef,
    row: usize,
    col: usize,
    round: usize,
    multiplier: u32,
) -> (Clue, Vec<String>) {
    let mut errors = Vec::new();
    let mut unrevealed = false;

    let clue_text_el = clue_el.select(&CLUE_TEXT_SEL).next();
    let clue_text = clue_text_el
        .map(|el| el.text().collect::<String>())
        .filter(|t| !t.is_empty());
    let clue = match clue_text {
        None => {
            unrevealed = true;
            UNREVEALED_PLACEHOLDER.to_string()
        }
        Some(t) if t == MISSING_CLUE_FLAG => MISSING_PLACEHOLDER.to_string(),
        Some(t) => t,
    };

    let mut image_src = None;
    let image_href = clue_text_el
        .and_then(|el| el.select(&LINK_SEL).next())
        .and_then(|a| a.value().attr("href"));
    if let Some(href) = image_href {
        match sanitize_url(href) {
            Ok(url) => image_src = Some(url),
            Err(e) => errors.push(format!(
                "could not parse image URL in round {round}, clue ({row}, {col}): {e}"
            )),
        }
    }

    let mut wagerable = None;
    let value = if let Some(raw) = select_text(clue_el, &CLUE_VALUE_SEL) {
        let digits = raw.strip_prefix('$').unwrap_or(&raw);
        match parse_leading_int(digits) {
            Some(value) => value,
            None => {
                errors.push(format!(
                    "could not parse value of round {round}, clue ({row}, {col}): {raw}"
                ));
                0
            }
        }
    } else if let Some(dd_text) = select_text(clue_el, &CLUE_VALUE_DD_SEL) {
        if !dd_text.starts_with("DD: ") {
            errors.push(format!(
                "DD value of round {round}, clue ({row}, {col}) does not start with 'DD: '"
            ));
        }
        // The wager actually made is unknown from page structure; use the
        // position-based expected value.
        wagerable = Some(true);
        expected_clue_value(row, round, multiplier)
    } else {
        // Unrevealed
        expected_clue_value(row, round, multiplier)
    };

    let answer = if unrevealed {
        UNREVEALED_PLACEHOLDER.to_string()
    } else {
        match select_text(clue_el, &CORRECT_RESPONSE_SEL) {
            Some(t) if t == MISSING_CLUE_FLAG => MISSING_PLACEHOLDER.to_string(),
            Some(t) => normalize_response(&t),
            None => {
                errors.push(format!(
                    "could not find class correct_response in round {round}, clue ({row}, {col})"
                ));
                ERROR_PLACEHOLDER.to_string()
            }
        }
    };

    let clue = Clue {
        clue,
        answer,
        value,
        wagerable,
        long_form: None,
        image_src,
    };
    (clue, errors)
}

/// Leading-digits parse: `"400"` → 400, `"1,000"` → 1, no digits → `None`.
fn parse_leading_int(s: &str) -> Option<u32> {
    let digits: String = s.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

// ── Tests ──
