use crate::domain::VerseKey;

/// The (verse, recitation) pair an audio URL belongs to.
pub type AudioKey = (VerseKey, u32);

/// Last successfully resolved audio URL and the pair it was resolved for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioReference {
    pub verse_key: VerseKey,
    pub reciter_id: u32,
    pub url: String,
}

impl AudioReference {
    pub fn key(&self) -> AudioKey {
        (self.verse_key, self.reciter_id)
    }
}

/// Audio bookkeeping carried in each view snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioState {
    /// Pair of the most recently issued resolution.
    pub requested: Option<AudioKey>,
    /// Sequence number of that resolution.
    pub latest_seq: u64,
    pub reference: Option<AudioReference>,
}

impl AudioState {
    /// URL for `current`, if the stored reference was resolved for it.
    pub fn url_for(&self, current: Option<AudioKey>) -> Option<&str> {
        let current = current?;
        self.reference
            .as_ref()
            .filter(|r| r.key() == current)
            .map(|r| r.url.as_str())
    }
}

/// A new resolution is due when there is a verse to play and its pair differs
/// from the one last requested.
pub fn should_resolve(last_requested: Option<AudioKey>, current: Option<AudioKey>) -> bool {
    match current {
        Some(current) => last_requested != Some(current),
        None => false,
    }
}
