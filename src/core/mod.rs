pub mod config;
pub mod errors;
pub mod models;
pub mod word_list;

pub use errors::LexicardError;
pub use models::{
    Difficulty,
    FlashcardContent,
    ProgressRecord,
    StatisticsRecord,
    StatsSummary,
    WordStats,
};
pub use word_list::WordList;
