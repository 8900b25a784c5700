use html_escape::decode_html_entities;
use serde::Deserialize;
use url::Url;

use crate::app::{HifzError, Result};
use crate::domain::{Verse, VerseKey};

#[derive(Debug, Deserialize)]
struct VerseEnvelope {
    verse: ApiVerse,
}

#[derive(Debug, Deserialize)]
struct ApiVerse {
    verse_key: String,
    #[serde(default)]
    text_uthmani: Option<String>,
    #[serde(default)]
    translations: Vec<ApiTranslation>,
    #[serde(default)]
    audio: Option<ApiAudio>,
}

#[derive(Debug, Deserialize)]
struct ApiTranslation {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiAudio {
    url: Option<String>,
}

/// Turns quran.com v4 response bodies into domain values.
#[derive(Debug, Clone)]
pub struct Normalizer {
    audio_base: Url,
}

impl Normalizer {
    pub fn new(audio_base: Url) -> Self {
        Self { audio_base }
    }

    pub fn normalize_verse(&self, body: &[u8]) -> Result<Verse> {
        let envelope = parse_envelope(body)?;
        let verse = envelope.verse;

        let verse_key: VerseKey = verse.verse_key.parse().map_err(|_| {
            HifzError::MalformedResponse(format!("bad verse_key {:?}", verse.verse_key))
        })?;

        let text_uthmani = verse
            .text_uthmani
            .filter(|t| !t.is_empty())
            .ok_or_else(|| HifzError::MalformedResponse("missing text_uthmani".into()))?;

        let translation = verse
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| HifzError::MalformedResponse("missing translation".into()))?;

        Ok(Verse::new(
            verse_key,
            text_uthmani,
            decode_html_entities(&translation.text).to_string(),
        ))
    }

    /// Extract the playable URL from a `?audio=` response, resolving the
    /// relative paths the API returns against the audio CDN.
    pub fn normalize_audio(&self, body: &[u8]) -> Result<String> {
        let envelope = parse_envelope(body)?;
        let path = envelope
            .verse
            .audio
            .and_then(|a| a.url)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| HifzError::MalformedResponse("missing audio url".into()))?;

        self.resolve_audio_url(&path)
    }

    fn resolve_audio_url(&self, path: &str) -> Result<String> {
        if let Some(rest) = path.strip_prefix("//") {
            return Ok(Url::parse(&format!("https://{}", rest))?.to_string());
        }
        match Url::parse(path) {
            Ok(url) => Ok(url.to_string()),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(self.audio_base.join(path.trim_start_matches('/'))?.to_string())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn parse_envelope(body: &[u8]) -> Result<VerseEnvelope> {
    serde_json::from_slice(body).map_err(|e| HifzError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSE_SAMPLE: &str = r#"{
        "verse": {
            "id": 262,
            "verse_number": 255,
            "verse_key": "2:255",
            "text_uthmani": "ٱللَّهُ لَآ إِلَـٰهَ إِلَّا هُوَ",
            "translations": [
                {
                    "id": 1,
                    "resource_id": 131,
                    "text": "Allah&#x2014;there is no god except Him<sup foot_note=\"77\">1</sup>"
                }
            ]
        }
    }"#;

    const AUDIO_SAMPLE: &str = r#"{
        "verse": {
            "id": 1,
            "verse_key": "1:1",
            "audio": {
                "url": "AbdulBaset/Murattal/mp3/001001.mp3",
                "segments": [[0, 1, 0, 630]]
            }
        }
    }"#;

    fn normalizer() -> Normalizer {
        Normalizer::new(Url::parse("https://verses.quran.com/").unwrap())
    }

    #[test]
    fn test_normalize_verse() {
        let verse = normalizer().normalize_verse(VERSE_SAMPLE.as_bytes()).unwrap();
        assert_eq!(verse.verse_key, VerseKey::new(2, 255));
        assert_eq!(verse.text_uthmani, "ٱللَّهُ لَآ إِلَـٰهَ إِلَّا هُوَ");
        assert_eq!(
            verse.text_translation,
            "Allah\u{2014}there is no god except Him<sup foot_note=\"77\">1</sup>"
        );
    }

    #[test]
    fn test_normalize_verse_missing_translation() {
        let body = r#"{"verse": {"verse_key": "1:1", "text_uthmani": "x", "translations": []}}"#;
        let err = normalizer().normalize_verse(body.as_bytes()).unwrap_err();
        assert!(matches!(err, HifzError::MalformedResponse(_)));
    }

    #[test]
    fn test_normalize_verse_bad_key() {
        let body = r#"{"verse": {"verse_key": "one", "text_uthmani": "x", "translations": [{"text": "t"}]}}"#;
        assert!(normalizer().normalize_verse(body.as_bytes()).is_err());
    }

    #[test]
    fn test_normalize_verse_not_json() {
        assert!(normalizer().normalize_verse(b"<html>502</html>").is_err());
        assert!(normalizer().normalize_verse(b"{}").is_err());
    }

    #[test]
    fn test_normalize_audio_relative() {
        let url = normalizer().normalize_audio(AUDIO_SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            url,
            "https://verses.quran.com/AbdulBaset/Murattal/mp3/001001.mp3"
        );
    }

    #[test]
    fn test_normalize_audio_absolute_and_protocol_relative() {
        let body = r#"{"verse": {"verse_key": "1:1", "audio": {"url": "https://cdn.example.com/a.mp3"}}}"#;
        assert_eq!(
            normalizer().normalize_audio(body.as_bytes()).unwrap(),
            "https://cdn.example.com/a.mp3"
        );

        let body = r#"{"verse": {"verse_key": "1:1", "audio": {"url": "//mirrors.quranicaudio.com/b.mp3"}}}"#;
        assert_eq!(
            normalizer().normalize_audio(body.as_bytes()).unwrap(),
            "https://mirrors.quranicaudio.com/b.mp3"
        );
    }

    #[test]
    fn test_normalize_audio_missing() {
        let body = r#"{"verse": {"verse_key": "1:1", "audio": null}}"#;
        assert!(normalizer().normalize_audio(body.as_bytes()).is_err());
    }
}
