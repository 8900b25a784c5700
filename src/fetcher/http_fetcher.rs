use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::{HifzError, Result};
use crate::config::ApiConfig;
use crate::domain::{Verse, VerseKey, CHAPTER_COUNT};
use crate::fetcher::VerseSource;
use crate::normalizer::Normalizer;

/// quran.com v4 client.
pub struct HttpFetcher {
    client: Client,
    base_url: String,
    translation_id: u32,
    normalizer: Normalizer,
}

impl HttpFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("hifz/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let audio_base = Url::parse(&config.audio_base_url)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            translation_id: config.translation_id,
            normalizer: Normalizer::new(audio_base),
        })
    }

    fn random_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/verses/random", self.base_url))?;
        self.add_text_params(&mut url);
        Ok(url)
    }

    fn by_key_url(&self, key: VerseKey) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/verses/by_key/{}", self.base_url, key))?;
        self.add_text_params(&mut url);
        Ok(url)
    }

    fn audio_url(&self, key: VerseKey, reciter_id: u32) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/verses/by_key/{}", self.base_url, key))?;
        url.query_pairs_mut()
            .append_pair("audio", &reciter_id.to_string());
        Ok(url)
    }

    fn add_text_params(&self, url: &mut Url) {
        url.query_pairs_mut()
            .append_pair("translations", &self.translation_id.to_string())
            .append_pair("fields", "text_uthmani");
    }

    async fn get_body(&self, url: Url) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn get_verse(&self, url: Result<Url>) -> Result<Verse> {
        let result: Result<Verse> = async {
            let body = self.get_body(url?).await?;
            self.normalizer.normalize_verse(&body)
        }
        .await;

        result.map_err(|e| {
            tracing::warn!("Verse request failed: {}", e);
            HifzError::verse_fetch(e)
        })
    }
}

/// Local bounds check for by-reference requests. Verse numbers have no
/// upper bound here; the API rejects those itself.
pub fn validate_reference(chapter: u16, verse: u16) -> Result<VerseKey> {
    if !(1..=CHAPTER_COUNT).contains(&chapter) {
        return Err(HifzError::InvalidReference(format!(
            "chapter must be between 1 and {}, got {}",
            CHAPTER_COUNT, chapter
        )));
    }
    if verse == 0 {
        return Err(HifzError::InvalidReference(
            "verse number must be at least 1".to_string(),
        ));
    }
    Ok(VerseKey::new(chapter, verse))
}

#[async_trait]
impl VerseSource for HttpFetcher {
    async fn fetch_random(&self) -> Result<Verse> {
        self.get_verse(self.random_url()).await
    }

    async fn fetch_by_reference(&self, chapter: u16, verse: u16) -> Result<Verse> {
        let key = validate_reference(chapter, verse).map_err(HifzError::verse_fetch)?;
        self.get_verse(self.by_key_url(key)).await
    }

    async fn resolve_audio(&self, verse_key: VerseKey, reciter_id: u32) -> Result<String> {
        let result: Result<String> = async {
            let body = self.get_body(self.audio_url(verse_key, reciter_id)?).await?;
            self.normalizer.normalize_audio(&body)
        }
        .await;

        result.map_err(HifzError::audio_fetch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&ApiConfig::default()).unwrap()
    }

    #[test]
    fn test_random_url() {
        let url = fetcher().random_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.quran.com/api/v4/verses/random?translations=131&fields=text_uthmani"
        );
    }

    #[test]
    fn test_by_key_url() {
        let url = fetcher().by_key_url(VerseKey::new(2, 255)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.quran.com/api/v4/verses/by_key/2:255?translations=131&fields=text_uthmani"
        );
    }

    #[test]
    fn test_audio_url() {
        let url = fetcher().audio_url(VerseKey::new(1, 1), 7).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.quran.com/api/v4/verses/by_key/1:1?audio=7"
        );
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let config = ApiConfig {
            base_url: "http://localhost:8080/api/v4/".into(),
            ..ApiConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        assert!(fetcher
            .random_url()
            .unwrap()
            .as_str()
            .starts_with("http://localhost:8080/api/v4/verses/random?"));
    }

    #[test]
    fn test_validate_reference() {
        assert_eq!(validate_reference(1, 1).unwrap(), VerseKey::new(1, 1));
        assert_eq!(validate_reference(114, 6).unwrap(), VerseKey::new(114, 6));
        // No local upper bound for verses
        assert_eq!(validate_reference(1, 500).unwrap(), VerseKey::new(1, 500));
        assert!(validate_reference(0, 1).is_err());
        assert!(validate_reference(115, 1).is_err());
        assert!(validate_reference(2, 0).is_err());
    }

    #[tokio::test]
    async fn test_out_of_range_chapter_fails_without_network() {
        let err = fetcher().fetch_by_reference(200, 1).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch verse");

        let cause = std::error::Error::source(&err).expect("validation cause");
        assert!(cause.to_string().starts_with("Invalid verse reference"));
    }

    #[tokio::test]
    async fn test_unreachable_host_collapses_to_fetch_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9/api/v4".into(),
            timeout_secs: 2,
            ..ApiConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        let err = fetcher.fetch_random().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch verse");

        let err = fetcher
            .resolve_audio(VerseKey::new(1, 1), 2)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch audio");
    }
}
