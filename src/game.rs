use serde::{Deserialize, Serialize};

/// ERROR_PLACEHOLDER is used when a field has an error.
pub const ERROR_PLACEHOLDER: &str = "***ERROR***";
/// UNREVEALED_PLACEHOLDER is used when a field was not revealed in the game playthrough.
pub const UNREVEALED_PLACEHOLDER: &str = "***Unrevealed***";
/// MISSING_PLACEHOLDER is used when a field was not recorded on j-archive.
pub const MISSING_PLACEHOLDER: &str = "***Missing***";

/// MISSING_CLUE_FLAG is used by j-archive when a clue was not recorded.
pub const MISSING_CLUE_FLAG: &str = "=";

pub const GAME_AUTHOR: &str = "J! Archive";
pub const GAME_COPYRIGHT: &str = "Jeopardy!";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub title: String,
    pub author: String,
    pub copyright: String,
    pub note: String,
    pub boards: Vec<Board>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Reading-order category names; `category_names[i]` is `categories[i].name`.
    pub category_names: Vec<String>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub note: String,
    pub clues: Vec<Clue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clue {
    pub clue: String,
    pub answer: String,
    pub value: u32,
    /// Wagerable clues let players wager on the answer and win or lose that
    /// amount instead of the clue's value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wagerable: Option<bool>,
    /// Long-form clues give all players a longer window to write down an
    /// answer instead of competing to buzz in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_form: Option<bool>,
    /// URL of an image to display with the clue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
}

impl Clue {
    /// A clue is empty when both its text and answer were never recorded or
    /// never revealed.
    pub fn is_empty(&self) -> bool {
        (self.clue == MISSING_PLACEHOLDER || self.clue == UNREVEALED_PLACEHOLDER)
            && (self.answer == MISSING_PLACEHOLDER || self.answer == UNREVEALED_PLACEHOLDER)
    }
}

impl Board {
    /// A board is empty when every clue in it is empty. Partially played and
    /// not-yet-played rounds end up here.
    pub fn is_empty(&self) -> bool {
        self.categories
            .iter()
            .all(|cat| cat.clues.iter().all(Clue::is_empty))
    }
}

/// File name for a downloaded game: non-alphanumerics become `_`, lowercased,
/// with a `.jep.json` suffix.
pub fn download_file_name(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{}.jep.json", sanitized)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_clue() -> Clue {
        Clue {
            clue: "This crate".to_string(),
            answer: "What is Rust?".to_string(),
            value: 400,
            wagerable: None,
            long_form: None,
            image_src: None,
        }
    }

    #[test]
    fn empty_clue_combinations() {
        let mut clue = sample_clue();
        assert!(!clue.is_empty());

        clue.clue = MISSING_PLACEHOLDER.to_string();
        assert!(!clue.is_empty());

        clue.answer = UNREVEALED_PLACEHOLDER.to_string();
        assert!(clue.is_empty());

        clue.clue = UNREVEALED_PLACEHOLDER.to_string();
        clue.answer = MISSING_PLACEHOLDER.to_string();
        assert!(clue.is_empty());
    }

    #[test]
    fn board_empty_only_when_all_clues_empty() {
        let empty = Clue {
            clue: UNREVEALED_PLACEHOLDER.to_string(),
            answer: UNREVEALED_PLACEHOLDER.to_string(),
            value: 200,
            wagerable: None,
            long_form: None,
            image_src: None,
        };
        let mut board = Board {
            category_names: vec!["HISTORY".to_string()],
            categories: vec![Category {
                name: "HISTORY".to_string(),
                note: String::new(),
                clues: vec![empty.clone(), empty],
            }],
        };
        assert!(board.is_empty());

        board.categories[0].clues.push(sample_clue());
        assert!(!board.is_empty());
    }

    #[test]
    fn board_with_no_clues_is_empty() {
        let board = Board {
            category_names: vec![],
            categories: vec![],
        };
        assert!(board.is_empty());
    }

    #[test]
    fn optional_fields_omitted_from_json() {
        let json = serde_json::to_string(&sample_clue()).unwrap();
        assert!(!json.contains("wagerable"));
        assert!(!json.contains("longForm"));
        assert!(!json.contains("imageSrc"));
    }

    #[test]
    fn camel_case_field_names() {
        let clue = Clue {
            wagerable: Some(true),
            long_form: Some(true),
            image_src: Some("http://example.com/a.jpg".to_string()),
            ..sample_clue()
        };
        let json = serde_json::to_string(&clue).unwrap();
        assert!(json.contains("\"longForm\":true"));
        assert!(json.contains("\"imageSrc\""));

        let board = Board {
            category_names: vec![],
            categories: vec![],
        };
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.contains("\"categoryNames\""));
    }

    #[test]
    fn game_round_trips_through_json() {
        let game = Game {
            title: "Show #4321 - Thursday, February 14, 2002".to_string(),
            author: GAME_AUTHOR.to_string(),
            copyright: GAME_COPYRIGHT.to_string(),
            note: String::new(),
            boards: vec![Board {
                category_names: vec!["WORDS".to_string()],
                categories: vec![Category {
                    name: "WORDS".to_string(),
                    note: "notes from the host".to_string(),
                    clues: vec![Clue {
                        wagerable: Some(true),
                        ..sample_clue()
                    }],
                }],
            }],
        };
        let json = serde_json::to_string(&game).unwrap();
        let back: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(game, back);
    }

    #[test]
    fn download_file_name_sanitizes_title() {
        assert_eq!(
            download_file_name("Show #4321 - Thursday, February 14, 2002"),
            "show__4321___thursday__february_14__2002.jep.json"
        );
        assert_eq!(download_file_name("ABC"), "abc.jep.json");
    }
}
