use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::HifzError;

/// Number of chapters (surahs) in the Quran.
pub const CHAPTER_COUNT: u16 = 114;

/// Address of a single verse, rendered as `"chapter:verse"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerseKey {
    pub chapter: u16,
    pub verse: u16,
}

impl VerseKey {
    pub fn new(chapter: u16, verse: u16) -> Self {
        Self { chapter, verse }
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

impl FromStr for VerseKey {
    type Err = HifzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HifzError::InvalidReference(s.to_string());
        let (chapter, verse) = s.trim().split_once(':').ok_or_else(invalid)?;
        let chapter = chapter.parse::<u16>().map_err(|_| invalid())?;
        let verse = verse.parse::<u16>().map_err(|_| invalid())?;
        if chapter == 0 || verse == 0 {
            return Err(invalid());
        }
        Ok(Self { chapter, verse })
    }
}

impl TryFrom<String> for VerseKey {
    type Error = HifzError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VerseKey> for String {
    fn from(key: VerseKey) -> Self {
        key.to_string()
    }
}

/// A fetched verse. Replaced wholesale on every fetch, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub verse_key: VerseKey,
    pub text_uthmani: String,
    /// Translation as returned by the API, footnote markup included.
    pub text_translation: String,
}

impl Verse {
    pub fn new(
        verse_key: VerseKey,
        text_uthmani: impl Into<String>,
        text_translation: impl Into<String>,
    ) -> Self {
        Self {
            verse_key,
            text_uthmani: text_uthmani.into(),
            text_translation: text_translation.into(),
        }
    }

    /// Translation with footnote markers removed, as displayed and shared.
    pub fn clean_translation(&self) -> String {
        crate::share::strip_footnotes(&self.text_translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verse_key_display() {
        assert_eq!(VerseKey::new(2, 255).to_string(), "2:255");
    }

    #[test]
    fn test_verse_key_parse() {
        let key: VerseKey = "36:58".parse().unwrap();
        assert_eq!(key, VerseKey::new(36, 58));

        let key: VerseKey = " 1:1 ".parse().unwrap();
        assert_eq!(key, VerseKey::new(1, 1));
    }

    #[test]
    fn test_verse_key_parse_rejects_garbage() {
        assert!("".parse::<VerseKey>().is_err());
        assert!("2".parse::<VerseKey>().is_err());
        assert!("2:".parse::<VerseKey>().is_err());
        assert!("a:b".parse::<VerseKey>().is_err());
        assert!("0:1".parse::<VerseKey>().is_err());
        assert!("1:0".parse::<VerseKey>().is_err());
        assert!("1:-2".parse::<VerseKey>().is_err());
    }

    #[test]
    fn test_verse_key_serde_as_string() {
        let json = serde_json::to_string(&VerseKey::new(112, 4)).unwrap();
        assert_eq!(json, "\"112:4\"");
        let key: VerseKey = serde_json::from_str("\"112:4\"").unwrap();
        assert_eq!(key, VerseKey::new(112, 4));
    }

    #[test]
    fn test_clean_translation_strips_footnotes() {
        let verse = Verse::new(
            VerseKey::new(1, 1),
            "بِسْمِ",
            "In the name<sup foot_note=\"1\">1</sup> of Allah",
        );
        assert_eq!(verse.clean_translation(), "In the name of Allah");
    }
}
