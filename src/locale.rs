//! Localized UI text
//!
//! The game ships in English and Ukrainian. All player-facing strings go
//! through [`tr`] or one of the formatting helpers below.

use serde::{Deserialize, Serialize};

/// UI language, picked on the first screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ua")]
    Ukrainian,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Ukrainian => "ua",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "ua" | "uk" | "ukrainian" => Some(Language::Ukrainian),
            _ => None,
        }
    }
}

/// Static UI strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    ChooseEnglish,
    ChooseUkrainian,
    ChooseMode,
    ModeCompetition,
    ModeStory,
    GameOver,
    GameCompleted,
    BossIncoming,
}

/// Look up a static string
pub fn tr(lang: Language, text: Text) -> &'static str {
    use Language::*;
    match (text, lang) {
        // The language prompt shows each option in its own language
        (Text::ChooseEnglish, _) => "E for English",
        (Text::ChooseUkrainian, _) => "U щоб обрати Українську",

        (Text::ChooseMode, English) => "Choose Game Mode:",
        (Text::ChooseMode, Ukrainian) => "Виберіть ігровий режим:",
        (Text::ModeCompetition, English) => "1. Competition",
        (Text::ModeCompetition, Ukrainian) => "1. Змагання",
        (Text::ModeStory, English) => "2. Story",
        (Text::ModeStory, Ukrainian) => "2. Історія",
        (Text::GameOver, English) => "Game Over. Press Enter to Restart or Escape to Exit",
        (Text::GameOver, Ukrainian) => "Гра закінчена. Enter - почати знову, Escape - вихід",
        (Text::GameCompleted, English) => "Game Completed",
        (Text::GameCompleted, Ukrainian) => "Гру пройдено",
        (Text::BossIncoming, English) => "The boss is coming",
        (Text::BossIncoming, Ukrainian) => "Наближається бос",
    }
}

/// "Level N" banner
pub fn level_banner(lang: Language, level_number: u32) -> String {
    match lang {
        Language::English => format!("Level {}", level_number),
        Language::Ukrainian => format!("Рівень {}", level_number),
    }
}

/// "Level N completed" banner
pub fn level_completed(lang: Language, level_number: u32) -> String {
    match lang {
        Language::English => format!("Level {} completed", level_number),
        Language::Ukrainian => format!("Рівень {} пройдено", level_number),
    }
}

/// "Starting level N" follow-up line
pub fn starting_level(lang: Language, level_number: u32) -> String {
    match lang {
        Language::English => format!("Starting level {}", level_number),
        Language::Ukrainian => format!("Починається рівень {}", level_number),
    }
}

/// Score/lives HUD line
pub fn hud(lang: Language, score: u32, lives: u8) -> String {
    match lang {
        Language::English => format!("Score: {}   Lives: {}", score, lives),
        Language::Ukrainian => format!("Рахунок: {}   Життя: {}", score, lives),
    }
}
