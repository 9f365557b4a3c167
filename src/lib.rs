pub mod cache;
pub mod core;
pub mod gateway;
pub mod persistence;
pub mod session;

pub use crate::{
    cache::ContentCache,
    core::{
        config::AppConfig,
        errors::LexicardError,
        models::{
            Difficulty,
            FlashcardContent,
            ProgressRecord,
            StatisticsRecord,
            StatsSummary,
            WordStats,
        },
        word_list::WordList,
    },
    gateway::{
        ContentGateway,
        HttpGateway,
    },
    persistence::{
        DurableStore,
        FileStore,
        MemoryStore,
    },
    session::{
        Session,
        SessionView,
    },
};
