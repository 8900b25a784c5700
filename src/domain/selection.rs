/// Which input field of the selection is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Chapter,
    Verse,
}

/// Raw text of the chapter and verse inputs while the user is typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub chapter: String,
    pub verse: String,
}

impl Selection {
    pub fn new(chapter: impl Into<String>, verse: impl Into<String>) -> Self {
        Self {
            chapter: chapter.into(),
            verse: verse.into(),
        }
    }

    /// Both inputs as positive integers, or `None` if either is empty or not a
    /// positive number. The chapter range is checked by the client, not here.
    /// Numbers too large for `u16` saturate so they still reach the client.
    pub fn reference(&self) -> Option<(u16, u16)> {
        let chapter = parse_positive(&self.chapter)?;
        let verse = parse_positive(&self.verse)?;
        Some((chapter, verse))
    }

    pub fn is_empty(&self) -> bool {
        self.chapter.is_empty() && self.verse.is_empty()
    }

    pub fn field(&self, field: InputField) -> &str {
        match field {
            InputField::Chapter => &self.chapter,
            InputField::Verse => &self.verse,
        }
    }

    pub fn with_field(&self, field: InputField, value: String) -> Self {
        let mut next = self.clone();
        match field {
            InputField::Chapter => next.chapter = value,
            InputField::Verse => next.verse = value,
        }
        next
    }
}

fn parse_positive(s: &str) -> Option<u16> {
    let s = s.trim();
    let digits = s.strip_prefix('+').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.bytes().all(|b| b == b'0') {
        return None;
    }
    Some(digits.parse::<u16>().unwrap_or(u16::MAX))
}
