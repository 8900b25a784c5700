//! Presentation state machine.
//!
//! [`Viewer`] owns the current [`ViewState`] snapshot and moves it forward
//! through named transitions. Transitions never perform I/O; they return the
//! [`Command`]s the caller must run, tagged with sequence numbers so that late
//! responses to superseded requests can be recognised and dropped.

pub mod audio;
pub mod state;

use std::sync::Arc;

use crate::app::HifzError;
use crate::domain::{InputField, Selection, Verse, VerseKey};
use crate::fetcher::VerseRequest;

pub use audio::{should_resolve, AudioKey, AudioReference, AudioState};
pub use state::{ScreenState, ViewState, FETCH_FAILED_MESSAGE};

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchVerse {
        seq: u64,
        request: VerseRequest,
    },
    ResolveAudio {
        seq: u64,
        verse_key: VerseKey,
        reciter_id: u32,
    },
}

#[derive(Debug)]
pub struct Viewer {
    state: Arc<ViewState>,
    fetch_seq: u64,
    audio_seq: u64,
}

impl Viewer {
    pub fn new(reciter_id: u32) -> Self {
        Self {
            state: Arc::new(ViewState::new(reciter_id)),
            fetch_seq: 0,
            audio_seq: 0,
        }
    }

    /// Current snapshot. Cheap to clone and safe to keep.
    pub fn state(&self) -> Arc<ViewState> {
        Arc::clone(&self.state)
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// First activation: load a random verse. Does nothing once past `Idle`.
    pub fn activate(&mut self) -> Vec<Command> {
        if self.state.screen != ScreenState::Idle || self.state.is_loading() {
            return Vec::new();
        }
        self.start_fetch(VerseRequest::Random)
    }

    /// "New Ayah": the typed reference if both inputs are usable, otherwise a
    /// random verse. Inputs are cleared as soon as the fetch is issued.
    pub fn new_verse(&mut self) -> Vec<Command> {
        let request = match self.state.selection.reference() {
            Some((chapter, verse)) => VerseRequest::ByReference { chapter, verse },
            None => VerseRequest::Random,
        };
        self.start_fetch(request)
    }

    /// Confirm-key shortcut. Only acts when both inputs hold a reference.
    pub fn confirm(&mut self) -> Vec<Command> {
        match self.state.selection.reference() {
            Some((chapter, verse)) => {
                self.start_fetch(VerseRequest::ByReference { chapter, verse })
            }
            None => Vec::new(),
        }
    }

    pub fn set_chapter_input(&mut self, value: impl Into<String>) {
        self.set_input(InputField::Chapter, value.into());
    }

    pub fn set_verse_input(&mut self, value: impl Into<String>) {
        self.set_input(InputField::Verse, value.into());
    }

    pub fn push_input_char(&mut self, field: InputField, c: char) {
        let mut value = self.state.selection.field(field).to_string();
        value.push(c);
        self.set_input(field, value);
    }

    pub fn pop_input_char(&mut self, field: InputField) {
        let mut value = self.state.selection.field(field).to_string();
        if value.pop().is_some() {
            self.set_input(field, value);
        }
    }

    fn set_input(&mut self, field: InputField, value: String) {
        let selection: Selection = self.state.selection.with_field(field, value);
        self.state = Arc::new(self.state.with_selection(selection));
    }

    pub fn select_reciter(&mut self, reciter_id: u32) -> Vec<Command> {
        if self.state.reciter_id == reciter_id {
            return Vec::new();
        }
        let next = self.state.with_reciter(reciter_id);
        self.commit(next)
    }

    /// Apply the outcome of primary fetch `seq`. Responses to anything but the
    /// pending request are dropped.
    pub fn verse_loaded(&mut self, seq: u64, result: Result<Verse, HifzError>) -> Vec<Command> {
        if self.state.pending_fetch != Some(seq) {
            tracing::debug!("Discarding stale verse response #{}", seq);
            return Vec::new();
        }

        let next = match result {
            Ok(verse) => {
                tracing::info!("Loaded verse {}", verse.verse_key);
                self.state.fetch_succeeded(verse)
            }
            Err(e) => {
                tracing::warn!("Verse fetch #{} failed: {}", seq, e);
                self.state.fetch_failed(e.to_string())
            }
        };
        self.commit(next)
    }

    /// Apply the outcome of audio resolution `seq`. Only the latest issued
    /// resolution may change the stored reference.
    pub fn audio_resolved(&mut self, seq: u64, result: Result<String, HifzError>) {
        if seq != self.state.audio.latest_seq {
            tracing::debug!("Discarding stale audio response #{}", seq);
            return;
        }
        let Some((verse_key, reciter_id)) = self.state.audio.requested else {
            return;
        };

        match result {
            Ok(url) => {
                let reference = AudioReference {
                    verse_key,
                    reciter_id,
                    url,
                };
                self.state = Arc::new(self.state.audio_resolved(reference));
            }
            Err(e) => {
                tracing::warn!(
                    "Audio for {} (reciter {}) unavailable: {}",
                    verse_key,
                    reciter_id,
                    e
                );
            }
        }
    }

    fn start_fetch(&mut self, request: VerseRequest) -> Vec<Command> {
        self.fetch_seq += 1;
        let seq = self.fetch_seq;
        tracing::debug!("Issuing verse fetch #{}: {:?}", seq, request);

        let next = self.state.begin_fetch(seq);
        let mut commands = vec![Command::FetchVerse { seq, request }];
        commands.extend(self.commit(next));
        commands
    }

    /// Install `next` and run the audio observer against it.
    fn commit(&mut self, next: ViewState) -> Vec<Command> {
        let current = next.audio_key();
        if !should_resolve(next.audio.requested, current) {
            self.state = Arc::new(next);
            return Vec::new();
        }

        let Some((verse_key, reciter_id)) = current else {
            self.state = Arc::new(next);
            return Vec::new();
        };
        self.audio_seq += 1;
        let seq = self.audio_seq;
        self.state = Arc::new(next.audio_requested((verse_key, reciter_id), seq));

        vec![Command::ResolveAudio {
            seq,
            verse_key,
            reciter_id,
        }]
    }
}
