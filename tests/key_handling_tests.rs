//! Key handling tests
//!
//! Feeds key events into the TUI app and checks the commands it emits and the
//! copy/share side effects, with the clipboard and browser replaced.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use hifz::app::{HifzError, Result};
use hifz::config::KeybindingConfig;
use hifz::domain::{InputField, ReciterRegistry, Verse, VerseKey};
use hifz::fetcher::VerseRequest;
use hifz::share::{Clipboard, LinkOpener};
use hifz::tui::app::TuiApp;
use hifz::viewer::Command;

#[derive(Default)]
struct MemoryClipboard {
    text: Option<String>,
    fail: bool,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(HifzError::Clipboard("unavailable".into()));
        }
        self.text = Some(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingOpener {
    opened: RefCell<Vec<String>>,
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

struct Harness {
    app: TuiApp,
    keys: KeybindingConfig,
    clipboard: MemoryClipboard,
    opener: RecordingOpener,
    now: Instant,
}

impl Harness {
    fn new() -> Self {
        Self {
            app: TuiApp::new(ReciterRegistry::default()),
            keys: KeybindingConfig::default(),
            clipboard: MemoryClipboard::default(),
            opener: RecordingOpener::default(),
            now: Instant::now(),
        }
    }

    /// Harness with 1:1 loaded and its first audio request answered.
    fn loaded() -> Self {
        let mut h = Self::new();
        let seq = match h.app.viewer.activate().as_slice() {
            [Command::FetchVerse { seq, .. }] => *seq,
            other => panic!("unexpected commands {:?}", other),
        };
        h.app.viewer.verse_loaded(
            seq,
            Ok(Verse::new(
                VerseKey::new(1, 1),
                "بِسْمِ",
                "In the name<sup>1</sup> of Allah",
            )),
        );
        let audio_seq = h.app.viewer.state().audio.latest_seq;
        h.app
            .viewer
            .audio_resolved(audio_seq, Ok("https://verses.quran.com/001001.mp3".into()));
        h
    }

    fn press(&mut self, code: KeyCode) -> Vec<Command> {
        self.press_with(code, KeyModifiers::NONE)
    }

    fn press_with(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Vec<Command> {
        let key = KeyEvent::new(code, modifiers);
        self.app
            .handle_key(&key, &self.keys, &mut self.clipboard, &self.opener, self.now)
    }

    fn type_digits(&mut self, digits: &str) {
        for c in digits.chars() {
            assert!(self.press(KeyCode::Char(c)).is_empty());
        }
    }
}

fn verse_request(commands: &[Command]) -> Option<VerseRequest> {
    commands.iter().find_map(|c| match c {
        Command::FetchVerse { request, .. } => Some(*request),
        _ => None,
    })
}

#[test]
fn test_digits_fill_focused_field() {
    let mut h = Harness::new();
    h.type_digits("36");
    h.press(KeyCode::Tab);
    h.type_digits("58");

    let state = h.app.viewer.state();
    assert_eq!(state.selection.chapter, "36");
    assert_eq!(state.selection.verse, "58");
    assert_eq!(h.app.focus, InputField::Verse);
}

#[test]
fn test_input_length_is_capped() {
    let mut h = Harness::new();
    h.type_digits("11456");
    assert_eq!(h.app.viewer.state().selection.chapter, "114");
}

#[test]
fn test_backspace_edits_focused_field() {
    let mut h = Harness::new();
    h.type_digits("12");
    h.press(KeyCode::Backspace);
    assert_eq!(h.app.viewer.state().selection.chapter, "1");
}

#[test]
fn test_enter_fetches_reference_and_clears() {
    let mut h = Harness::loaded();
    h.type_digits("2");
    h.press(KeyCode::Tab);
    h.type_digits("255");

    let commands = h.press(KeyCode::Enter);
    assert_eq!(
        verse_request(&commands),
        Some(VerseRequest::ByReference {
            chapter: 2,
            verse: 255
        })
    );
    assert!(h.app.viewer.state().selection.is_empty());
    assert_eq!(h.app.focus, InputField::Chapter);
}

#[test]
fn test_enter_with_one_field_does_nothing() {
    let mut h = Harness::loaded();
    h.type_digits("2");
    assert!(h.press(KeyCode::Enter).is_empty());
    assert_eq!(h.app.viewer.state().selection.chapter, "2");
}

#[test]
fn test_new_ayah_with_partial_input_is_random() {
    let mut h = Harness::loaded();
    h.type_digits("2");
    let commands = h.press(KeyCode::Char('n'));
    assert_eq!(verse_request(&commands), Some(VerseRequest::Random));
    assert!(h.app.viewer.state().selection.is_empty());
}

#[test]
fn test_reciter_keys_request_audio() {
    let mut h = Harness::loaded();
    let commands = h.press(KeyCode::Char('r'));
    assert_eq!(commands.len(), 1);
    assert!(matches!(
        commands[0],
        Command::ResolveAudio { reciter_id: 3, .. }
    ));
    assert_eq!(h.app.selected_reciter().id, 3);

    let commands = h.press_with(KeyCode::Char('R'), KeyModifiers::SHIFT);
    assert!(matches!(
        commands[0],
        Command::ResolveAudio { reciter_id: 2, .. }
    ));
}

#[test]
fn test_copy_shows_indicator() {
    let mut h = Harness::loaded();
    h.press(KeyCode::Char('c'));
    assert_eq!(
        h.clipboard.text.as_deref(),
        Some("بِسْمِ\n\nIn the name of Allah\n\nQuran 1:1")
    );
    assert!(h.app.copy_indicator.is_visible(h.now));
    assert!(!h.app.copy_indicator.is_visible(h.now + Duration::from_secs(2)));
}

#[test]
fn test_copy_failure_shows_nothing() {
    let mut h = Harness::loaded();
    h.clipboard.fail = true;
    h.press(KeyCode::Char('c'));
    assert!(!h.app.copy_indicator.is_visible(h.now));
    assert!(h.app.status_message.is_none());
}

#[test]
fn test_copy_without_verse_is_ignored() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('c'));
    assert!(h.clipboard.text.is_none());
}

#[test]
fn test_share_keys_open_deep_links() {
    let mut h = Harness::loaded();
    h.press(KeyCode::Char('w'));
    h.press(KeyCode::Char('x'));

    let opened = h.opener.opened.borrow();
    assert_eq!(opened.len(), 2);
    assert!(opened[0].starts_with("https://wa.me/?text="));
    assert!(opened[1].starts_with("https://twitter.com/intent/tweet?text="));
    // Arabic text stays out of social shares
    assert!(!opened[0].contains("%D8"));
}

#[test]
fn test_play_opens_resolved_audio() {
    let mut h = Harness::loaded();
    h.press(KeyCode::Char('p'));
    assert_eq!(
        h.opener.opened.borrow().as_slice(),
        ["https://verses.quran.com/001001.mp3".to_string()]
    );
}

#[test]
fn test_play_before_audio_resolves() {
    let mut h = Harness::loaded();
    h.press(KeyCode::Char('r'));
    h.press(KeyCode::Char('p'));
    assert!(h.opener.opened.borrow().is_empty());
    assert_eq!(
        h.app.status_message.as_deref(),
        Some("No audio available yet")
    );
}

#[test]
fn test_quit_keys() {
    let mut h = Harness::new();
    h.press_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(h.app.should_quit);
}

#[test]
fn test_ctrl_digit_is_not_input() {
    let mut h = Harness::new();
    h.press_with(KeyCode::Char('1'), KeyModifiers::CONTROL);
    assert!(h.app.viewer.state().selection.is_empty());
}
