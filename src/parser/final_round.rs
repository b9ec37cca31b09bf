use scraper::ElementRef;

use super::text::{normalize_response, sanitize_url};
use super::{select_text, CATEGORY_NAME_SEL, CLUE_TEXT_SEL, CORRECT_RESPONSE_SEL, LINK_SEL};
use crate::game::{Board, Category, Clue, ERROR_PLACEHOLDER};

/// Extract the final round: a single category holding a single wagerable,
/// long-form clue with value 0. Final clues are always expected to be fully
/// recorded, so any absent field is an error rather than an unrevealed or
/// missing marker.
pub fn extract(round_el: ElementRef) -> (Board, Vec<String>) {
    let mut errors = Vec::new();

    let category = match select_text(round_el, &CATEGORY_NAME_SEL) {
        Some(name) => name,
        None => {
            errors.push("could not find class category_name in final round".to_string());
            ERROR_PLACEHOLDER.to_string()
        }
    };

    let clue_text_el = round_el.select(&CLUE_TEXT_SEL).next();
    let clue_text = clue_text_el
        .map(|el| el.text().collect::<String>())
        .filter(|t| !t.is_empty());
    let clue = match clue_text {
        Some(text) => text,
        None => {
            errors.push("could not find class clue_text in final round".to_string());
            ERROR_PLACEHOLDER.to_string()
        }
    };

    let mut image_src = None;
    let image_href = clue_text_el
        .and_then(|el| el.select(&LINK_SEL).next())
        .and_then(|a| a.value().attr("href"));
    if let Some(href) = image_href {
        match sanitize_url(href) {
            Ok(url) => image_src = Some(url),
            Err(e) => errors.push(format!("could not parse image URL in final round: {e}")),
        }
    }

    let answer = match select_text(round_el, &CORRECT_RESPONSE_SEL) {
        Some(text) => normalize_response(&text),
        None => {
            errors.push("could not find class correct_response in final round".to_string());
            ERROR_PLACEHOLDER.to_string()
        }
    };

    let board = Board {
        category_names: vec![category.clone()],
        categories: vec![Category {
            name: category,
            note: String::new(),
            clues: vec![Clue {
                clue,
                answer,
                value: 0,
                wagerable: Some(true),
                long_form: Some(true),
                image_src,
            }],
        }],
    };
    (board, errors)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn extract_final(body: &str) -> (Board, Vec<String>) {
        let html = format!("<div id=\"final_jeopardy_round\">{}</div>", body);
        let doc = Html::parse_fragment(&html);
        let el = doc
            .select(&scraper::Selector::parse("#final_jeopardy_round").unwrap())
            .next()
            .unwrap();
        extract(el)
    }

    #[test]
    fn complete_final_round() {
        let (board, errors) = extract_final(
            "<div class=\"category_name\">FAMOUS SHIPS</div>\
             <div class=\"clue_text\">Sunk in 1912</div>\
             <div class=\"correct_response\"><em>the <i>Titanic</i></em></div>",
        );
        assert!(errors.is_empty());
        assert_eq!(board.category_names, vec!["FAMOUS SHIPS"]);
        assert_eq!(board.categories.len(), 1);
        let clue = &board.categories[0].clues[0];
        assert_eq!(clue.clue, "Sunk in 1912");
        assert_eq!(clue.answer, "the Titanic");
        assert_eq!(clue.value, 0);
        assert_eq!(clue.wagerable, Some(true));
        assert_eq!(clue.long_form, Some(true));
        assert!(!board.is_empty());
    }

    #[test]
    fn each_missing_field_reported_independently() {
        let (board, errors) = extract_final("");
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("category_name"));
        assert!(errors[1].contains("clue_text"));
        assert!(errors[2].contains("correct_response"));
        let clue = &board.categories[0].clues[0];
        assert_eq!(board.category_names[0], ERROR_PLACEHOLDER);
        assert_eq!(clue.clue, ERROR_PLACEHOLDER);
        assert_eq!(clue.answer, ERROR_PLACEHOLDER);
    }

    #[test]
    fn final_image_link() {
        let (board, errors) = extract_final(
            "<div class=\"category_name\">ART</div>\
             <div class=\"clue_text\">This painting <a href=\"https://example.com/m.jpg\">shown here</a></div>\
             <div class=\"correct_response\">the Mona Lisa</div>",
        );
        assert!(errors.is_empty());
        assert_eq!(
            board.categories[0].clues[0].image_src.as_deref(),
            Some("https://example.com/m.jpg")
        );
    }

    #[test]
    fn bad_final_image_is_error() {
        let (board, errors) = extract_final(
            "<div class=\"category_name\">ART</div>\
             <div class=\"clue_text\"><a href=\"ftp://example.com/m.jpg\">shown here</a></div>\
             <div class=\"correct_response\">r</div>",
        );
        assert_eq!(board.categories[0].clues[0].image_src, None);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("could not parse image URL in final round"));
    }
}
