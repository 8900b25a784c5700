use crate::domain::{Selection, Verse};
use crate::viewer::audio::{AudioKey, AudioReference, AudioState};

/// Message shown when a failed fetch carries no text of its own.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch verse";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    Idle,
    Loading,
    Error(String),
    Loaded(Verse),
}

/// Immutable snapshot of everything the screen shows.
///
/// Transitions never edit a snapshot; each returns the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub screen: ScreenState,
    pub selection: Selection,
    pub reciter_id: u32,
    pub audio: AudioState,
    /// Sequence number of the primary fetch whose response will be applied.
    pub pending_fetch: Option<u64>,
}

impl ViewState {
    pub fn new(reciter_id: u32) -> Self {
        Self {
            screen: ScreenState::Idle,
            selection: Selection::default(),
            reciter_id,
            audio: AudioState::default(),
            pending_fetch: None,
        }
    }

    pub fn verse(&self) -> Option<&Verse> {
        match &self.screen {
            ScreenState::Loaded(verse) => Some(verse),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.screen {
            ScreenState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_fetch.is_some()
    }

    /// Pair the audio control should play, present only while a verse is shown.
    pub fn audio_key(&self) -> Option<AudioKey> {
        self.verse().map(|v| (v.verse_key, self.reciter_id))
    }

    pub fn audio_url(&self) -> Option<&str> {
        self.audio.url_for(self.audio_key())
    }

    pub(crate) fn begin_fetch(&self, seq: u64) -> Self {
        Self {
            screen: ScreenState::Loading,
            selection: Selection::default(),
            pending_fetch: Some(seq),
            ..self.clone()
        }
    }

    pub(crate) fn fetch_succeeded(&self, verse: Verse) -> Self {
        Self {
            screen: ScreenState::Loaded(verse),
            pending_fetch: None,
            ..self.clone()
        }
    }

    pub(crate) fn fetch_failed(&self, message: String) -> Self {
        let message = if message.trim().is_empty() {
            FETCH_FAILED_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            screen: ScreenState::Error(message),
            pending_fetch: None,
            ..self.clone()
        }
    }

    pub(crate) fn with_selection(&self, selection: Selection) -> Self {
        Self {
            selection,
            ..self.clone()
        }
    }

    pub(crate) fn with_reciter(&self, reciter_id: u32) -> Self {
        Self {
            reciter_id,
            ..self.clone()
        }
    }

    pub(crate) fn audio_requested(&self, key: AudioKey, seq: u64) -> Self {
        Self {
            audio: AudioState {
                requested: Some(key),
                latest_seq: seq,
                reference: self.audio.reference.clone(),
            },
            ..self.clone()
        }
    }

    pub(crate) fn audio_resolved(&self, reference: AudioReference) -> Self {
        Self {
            audio: AudioState {
                reference: Some(reference),
                ..self.audio.clone()
            },
            ..self.clone()
        }
    }
}
