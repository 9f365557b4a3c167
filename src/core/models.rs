use std::collections::HashMap;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

/// One generated card. The wire format is the camelCase JSON the generation
/// endpoint produces; list fields deserialize to empty when the upstream
/// model leaves them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardContent {
    pub word: String,
    pub ipa: String,
    pub english_definition: String,
    #[serde(default)]
    pub english_synonyms: Vec<String>,
    #[serde(default)]
    pub english_antonyms: Vec<String>,
    #[serde(default)]
    pub english_examples: Vec<String>,
    pub persian_translation: String,
    pub persian_phonetic: String,
    #[serde(default)]
    pub persian_synonyms: Vec<String>,
    #[serde(default)]
    pub persian_antonyms: Vec<String>,
    #[serde(default)]
    pub persian_examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Good,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordStats {
    pub attempts: u32,
    pub last_difficulty: Difficulty,
    pub last_reviewed: DateTime<Utc>,
}

/// Per-word recall history, keyed by word. Entries are only ever added or
/// overwritten; nothing removes them short of deleting the stored record.
pub type StatisticsRecord = HashMap<String, WordStats>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub current_word_index: usize,
    pub last_visited: DateTime<Utc>,
    pub completed_words: usize,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self { current_word_index: 0, last_visited: Utc::now(), completed_words: 0 }
    }
}

/// Aggregate view over the statistics record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSummary {
    pub reviewed: usize,
    pub easy: usize,
    pub good: usize,
    pub hard: usize,
    pub completion_percent: u32,
}

impl StatsSummary {
    pub fn from_stats(stats: &StatisticsRecord, total_words: usize) -> Self {
        let count = |difficulty: Difficulty| {
            stats.values().filter(|s| s.last_difficulty == difficulty).count()
        };

        let reviewed = stats.len();
        let completion_percent = if total_words == 0 {
            0
        } else {
            (reviewed as f64 / total_words as f64 * 100.0).round() as u32
        };

        Self {
            reviewed,
            easy: count(Difficulty::Easy),
            good: count(Difficulty::Good),
            hard: count(Difficulty::Hard),
            completion_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_list_fields_default_to_empty() {
        let json = r#"{
            "word": "abate",
            "ipa": "/əˈbeɪt/",
            "englishDefinition": "to become less intense or widespread",
            "persianTranslation": "فروکش کردن",
            "persianPhonetic": "forukesh kardan"
        }"#;

        let content: FlashcardContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.word, "abate");
        assert!(content.english_synonyms.is_empty());
        assert!(content.persian_examples.is_empty());
        assert!(content.extra_note.is_none());
    }

    #[test]
    fn difficulty_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&Difficulty::Easy).unwrap(), "\"easy\"");
        assert_eq!(serde_json::from_str::<Difficulty>("\"hard\"").unwrap(), Difficulty::Hard);
    }

    #[test]
    fn stats_summary_counts_difficulties() {
        let mut stats = StatisticsRecord::new();
        let entry = |difficulty| WordStats {
            attempts: 1,
            last_difficulty: difficulty,
            last_reviewed: Utc::now(),
        };
        stats.insert("abate".to_string(), entry(Difficulty::Hard));
        stats.insert("brook".to_string(), entry(Difficulty::Easy));
        stats.insert("candid".to_string(), entry(Difficulty::Easy));

        let summary = StatsSummary::from_stats(&stats, 4);
        assert_eq!(summary.reviewed, 3);
        assert_eq!(summary.easy, 2);
        assert_eq!(summary.good, 0);
        assert_eq!(summary.hard, 1);
        assert_eq!(summary.completion_percent, 75);
    }

    #[test]
    fn stats_summary_handles_empty_word_list() {
        let summary = StatsSummary::from_stats(&StatisticsRecord::new(), 0);
        assert_eq!(summary.completion_percent, 0);
    }
}
