use std::sync::{
    Arc,
    Mutex,
};

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::{
    cache::ContentCache,
    core::{
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
    gateway::ContentGateway,
    persistence::{
        DurableStore,
        RecordStore,
    },
};


/// Snapshot of everything the presentation layer renders.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub word_index: usize,
    pub word: String,
    pub content: Option<FlashcardContent>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_flipped: bool,
    pub progress_percent: f32,
    pub total_words: usize,
}

#[derive(Debug, Clone)]
struct PrefetchedCard {
    index: usize,
    content: FlashcardContent,
}

#[derive(Debug, Default)]
struct DriverState {
    current_index: usize,
    content: Option<FlashcardContent>,
    is_loading: bool,
    error: Option<String>,
    is_flipped: bool,
    progress_percent: f32,
    prefetched: Option<PrefetchedCard>,
    statistics: StatisticsRecord,
}

/// The flashcard session driver. Resolves each requested word from the
/// single prefetch slot, the durable cache, or the gateway, and warms the
/// following word in a detached background task after every load.
///
/// Clones share all state; the driver is designed to be cloned into spawned
/// tasks. The internal mutex is never held across an await.
#[derive(Clone)]
pub struct Session {
    words: Arc<WordList>,
    cache: ContentCache,
    records: RecordStore,
    gateway: Arc<dyn ContentGateway>,
    state: Arc<Mutex<DriverState>>,
    prefetch_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Session {
    pub fn new(
        words: WordList,
        gateway: Arc<dyn ContentGateway>,
        store: Arc<dyn DurableStore>,
    ) -> Self {
        let records = RecordStore::new(store);
        let cache = ContentCache::new(records.clone());

        let progress = records.load_progress();
        let statistics = records.load_stats();

        // A stored index can outlive a shrunk word list; start over in that
        // case rather than pointing past the end.
        let current_index = if progress.current_word_index < words.len() {
            progress.current_word_index
        } else {
            0
        };

        let state = DriverState {
            current_index,
            is_loading: true,
            statistics,
            ..DriverState::default()
        };

        Self {
            words: Arc::new(words),
            cache,
            records,
            gateway,
            state: Arc::new(Mutex::new(state)),
            prefetch_task: Arc::new(Mutex::new(None)),
        }
    }

    /// Loads the word the session was restored at. Call once after
    /// construction, from within the runtime.
    pub async fn start(&self) {
        let index = self.state.lock().unwrap().current_index;
        self.load_word(index).await;
    }

    pub async fn load_word(&self, index: usize) {
        let word = match self.words.get(index) {
            Some(word) => word.to_string(),
            None => {
                log::warn!("Ignoring load for out-of-range index {}", index);
                return;
            }
        };

        {
            let mut state = self.state.lock().unwrap();
            state.current_index = index;
            state.is_flipped = false;
            state.error = None;

            // Fast path: the slot already holds this word. Consume it and
            // skip the store and the gateway entirely.
            if state.prefetched.as_ref().is_some_and(|p| p.index == index) {
                let prefetched = state.prefetched.take().unwrap();
                state.content = Some(prefetched.content);
                state.is_loading = false;
                state.progress_percent = self.progress_percent(index);
                drop(state);
                self.spawn_prefetch(index);
                return;
            }

            state.is_loading = true;
            state.content = None;
        }

        if let Some(content) = self.cache.get(&word) {
            let mut state = self.state.lock().unwrap();
            state.content = Some(content);
            state.is_loading = false;
            state.progress_percent = self.progress_percent(index);
            drop(state);
            self.spawn_prefetch(index);
            return;
        }

        match self.gateway.generate(&word).await {
            Ok(content) => {
                self.cache.put(&word, &content);
                let mut state = self.state.lock().unwrap();
                state.content = Some(content);
            }
            Err(e) => {
                log::error!("Generating content for \"{}\" failed: {}", word, e);
                let mut state = self.state.lock().unwrap();
                state.error =
                    Some(format!("Failed to generate flashcard content for \"{}\".", word));
            }
        }

        {
            let mut state = self.state.lock().unwrap();
            state.is_loading = false;
            state.progress_percent = self.progress_percent(index);
        }

        // The next word is an independent target; warm it even when this
        // one just failed.
        self.spawn_prefetch(index);
    }

    /// Detached background warm-up of the word after `index`. The newest
    /// handle replaces any previous one; a superseded task keeps running
    /// and its slot write is vetted by index at consumption time.
    fn spawn_prefetch(&self, index: usize) {
        let session = self.clone();
        let handle = tokio::spawn(async move {
            session.prefetch(index).await;
        });
        *self.prefetch_task.lock().unwrap() = Some(handle);
    }

    async fn prefetch(&self, index: usize) {
        let next = self.words.next_index(index);

        {
            let state = self.state.lock().unwrap();
            if state.prefetched.as_ref().is_some_and(|p| p.index == next) {
                return;
            }
        }

        let word = match self.words.get(next) {
            Some(word) => word.to_string(),
            None => return,
        };

        if let Some(content) = self.cache.get(&word) {
            self.state.lock().unwrap().prefetched = Some(PrefetchedCard { index: next, content });
            return;
        }

        match self.gateway.generate(&word).await {
            Ok(content) => {
                self.cache.put(&word, &content);
                self.state.lock().unwrap().prefetched =
                    Some(PrefetchedCard { index: next, content });
            }
            Err(e) => {
                // The user has not reached this word; the next real
                // navigation retries in the foreground.
                log::warn!("Prefetch for \"{}\" failed: {}", word, e);
            }
        }
    }

    /// Awaits the most recently spawned prefetch task. The driver never
    /// blocks on this itself; shutdown and tests use it to reach quiescence.
    pub async fn await_prefetch(&self) {
        let handle = self.prefetch_task.lock().unwrap().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    pub async fn advance(&self) {
        let next = {
            let mut state = self.state.lock().unwrap();
            state.current_index = self.words.next_index(state.current_index);
            state.current_index
        };
        self.persist_progress();
        self.load_word(next).await;
    }

    /// Records recall feedback for the card currently shown, then moves on.
    /// With no card shown (load failed) the session still advances.
    pub async fn submit_feedback(&self, difficulty: Difficulty) {
        let stats_snapshot = {
            let mut state = self.state.lock().unwrap();
            match state.content.as_ref().map(|c| c.word.clone()) {
                Some(word) => {
                    let now = Utc::now();
                    state
                        .statistics
                        .entry(word)
                        .and_modify(|s| {
                            s.attempts += 1;
                            s.last_difficulty = difficulty;
                            s.last_reviewed = now;
                        })
                        .or_insert(WordStats {
                            attempts: 1,
                            last_difficulty: difficulty,
                            last_reviewed: now,
                        });
                    Some(state.statistics.clone())
                }
                None => None,
            }
        };

        if let Some(stats) = stats_snapshot {
            self.records.save_stats(&stats);
        }

        self.advance().await;
    }

    /// Starts the sequence over. Statistics survive; only the position is
    /// cleared.
    pub async fn reset(&self) {
        self.state.lock().unwrap().current_index = 0;
        self.persist_progress();
        self.load_word(0).await;
    }

    pub fn toggle_flip(&self) {
        let mut state = self.state.lock().unwrap();
        state.is_flipped = !state.is_flipped;
    }

    pub fn view(&self) -> SessionView {
        let state = self.state.lock().unwrap();
        SessionView {
            word_index: state.current_index,
            word: self
                .words
                .get(state.current_index)
                .unwrap_or_default()
                .to_string(),
            content: state.content.clone(),
            is_loading: state.is_loading,
            error: state.error.clone(),
            is_flipped: state.is_flipped,
            progress_percent: state.progress_percent,
            total_words: self.words.len(),
        }
    }

    pub fn statistics(&self) -> StatisticsRecord {
        self.state.lock().unwrap().statistics.clone()
    }

    pub fn stats_summary(&self) -> StatsSummary {
        let state = self.state.lock().unwrap();
        StatsSummary::from_stats(&state.statistics, self.words.len())
    }

    fn progress_percent(&self, index: usize) -> f32 {
        (index + 1) as f32 / self.words.len() as f32 * 100.0
    }

    fn persist_progress(&self) {
        let (index, completed) = {
            let state = self.state.lock().unwrap();
            (state.current_index, state.statistics.len())
        };
        self.records.save_progress(&ProgressRecord {
            current_word_index: index,
            last_visited: Utc::now(),
            completed_words: completed,
        });
    }

    #[cfg(test)]
    fn prefetched_index(&self) -> Option<usize> {
        self.state.lock().unwrap().prefetched.as_ref().map(|p| p.index)
    }
}
