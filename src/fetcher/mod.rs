pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Verse, VerseKey};

pub use http_fetcher::HttpFetcher;

/// What the primary fetch should retrieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerseRequest {
    Random,
    ByReference { chapter: u16, verse: u16 },
}

#[async_trait]
pub trait VerseSource {
    async fn fetch_random(&self) -> Result<Verse>;

    async fn fetch_by_reference(&self, chapter: u16, verse: u16) -> Result<Verse>;

    /// Playable audio URL for one verse in one recitation.
    async fn resolve_audio(&self, verse_key: VerseKey, reciter_id: u32) -> Result<String>;

    async fn fetch(&self, request: VerseRequest) -> Result<Verse> {
        match request {
            VerseRequest::Random => self.fetch_random().await,
            VerseRequest::ByReference { chapter, verse } => {
                self.fetch_by_reference(chapter, verse).await
            }
        }
    }
}
