//! Copy and share actions for the displayed verse.
//!
//! Shared text never carries footnote markup. The clipboard gets the Arabic
//! text followed by the translation; social channels only get the translation.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use regex::Regex;

use crate::app::{HifzError, Result};
use crate::domain::Verse;

static FOOTNOTE_RE: OnceLock<Regex> = OnceLock::new();

fn footnote_re() -> &'static Regex {
    FOOTNOTE_RE.get_or_init(|| Regex::new(r"<sup.*?</sup>").expect("footnote pattern is valid"))
}

/// Remove every `<sup ...>...</sup>` span.
///
/// Repeats until nothing matches, so spans that only appear after an inner
/// removal are stripped too and a second call is a no-op.
pub fn strip_footnotes(text: &str) -> String {
    let re = footnote_re();
    let mut current = text.to_string();
    while re.is_match(&current) {
        current = re.replace_all(&current, "").into_owned();
    }
    current
}

/// Text placed on the clipboard.
pub fn clipboard_text(verse: &Verse) -> String {
    format!(
        "{}\n\n{}\n\nQuran {}",
        verse.text_uthmani,
        verse.clean_translation(),
        verse.verse_key
    )
}

/// Text sent to social channels. The Arabic text is left out.
pub fn social_text(verse: &Verse) -> String {
    format!("{}\n\nQuran {}", verse.clean_translation(), verse.verse_key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareChannel {
    WhatsApp,
    X,
}

impl ShareChannel {
    pub fn name(self) -> &'static str {
        match self {
            ShareChannel::WhatsApp => "WhatsApp",
            ShareChannel::X => "X",
        }
    }

    fn endpoint(self) -> &'static str {
        match self {
            ShareChannel::WhatsApp => "https://wa.me/?text=",
            ShareChannel::X => "https://twitter.com/intent/tweet?text=",
        }
    }
}

impl std::str::FromStr for ShareChannel {
    type Err = HifzError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "whatsapp" | "wa" => Ok(ShareChannel::WhatsApp),
            "x" | "twitter" => Ok(ShareChannel::X),
            _ => Err(HifzError::Other(format!("Unknown share channel: {}", s))),
        }
    }
}

/// Deep link for `channel` carrying the percent-encoded social text.
pub fn share_url(channel: ShareChannel, verse: &Verse) -> String {
    format!(
        "{}{}",
        channel.endpoint(),
        urlencoding::encode(&social_text(verse))
    )
}

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard. A fresh handle is opened per write.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        arboard::Clipboard::new()
            .and_then(|mut cb| cb.set_text(text.to_string()))
            .map_err(|e| HifzError::Clipboard(e.to_string()))
    }
}

/// Opens URLs outside the application (browser, media player).
pub trait LinkOpener {
    fn open(&self, url: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        open::that(url)?;
        Ok(())
    }
}

/// Copy the verse. Failures are logged and reported as `false`, nothing more.
pub fn copy_to_clipboard(clipboard: &mut dyn Clipboard, verse: &Verse) -> bool {
    match clipboard.set_text(&clipboard_text(verse)) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to copy {}: {}", verse.verse_key, e);
            false
        }
    }
}

/// Open the share link for `channel`. Errors are logged only.
pub fn share_via(opener: &dyn LinkOpener, channel: ShareChannel, verse: &Verse) {
    let url = share_url(channel, verse);
    if let Err(e) = opener.open(&url) {
        tracing::warn!("Failed to open {} share link: {}", channel.name(), e);
    }
}

/// Default lifetime of the "Copied!" indicator.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// Transient confirmation shown after a successful copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyIndicator {
    visible_until: Option<Instant>,
}

impl CopyIndicator {
    pub fn show(&mut self, now: Instant, duration: Duration) {
        self.visible_until = Some(now + duration);
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.visible_until.is_some_and(|until| now < until)
    }
}
