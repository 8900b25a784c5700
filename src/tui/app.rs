use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::KeybindingConfig;
use crate::domain::{InputField, Reciter, ReciterRegistry};
use crate::share::{self, Clipboard, CopyIndicator, LinkOpener, ShareChannel, COPY_FEEDBACK};
use crate::tui::event::Action;
use crate::viewer::{Command, Viewer};

/// Longest accepted input: chapters stop at 114, verses at 286.
pub const MAX_INPUT_DIGITS: usize = 3;

/// UI-only state layered over the [`Viewer`].
pub struct TuiApp {
    pub viewer: Viewer,
    pub reciters: ReciterRegistry,
    pub focus: InputField,
    pub copy_indicator: CopyIndicator,
    pub copy_feedback: Duration,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(reciters: ReciterRegistry) -> Self {
        let viewer = Viewer::new(reciters.default_reciter().id);
        Self {
            viewer,
            reciters,
            focus: InputField::Chapter,
            copy_indicator: CopyIndicator::default(),
            copy_feedback: COPY_FEEDBACK,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn with_copy_feedback(mut self, duration: Duration) -> Self {
        self.copy_feedback = duration;
        self
    }

    pub fn selected_reciter(&self) -> &Reciter {
        let id = self.viewer.state().reciter_id;
        self.reciters
            .get(id)
            .unwrap_or_else(|| self.reciters.default_reciter())
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            InputField::Chapter => InputField::Verse,
            InputField::Verse => InputField::Chapter,
        };
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Route a key press. Digits and Backspace edit the focused field, other
    /// keys go through the keybinding table.
    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        keybindings: &KeybindingConfig,
        clipboard: &mut dyn Clipboard,
        opener: &dyn LinkOpener,
        now: Instant,
    ) -> Vec<Command> {
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key.code {
            KeyCode::Char(c) if plain && c.is_ascii_digit() => {
                if self.viewer.state().selection.field(self.focus).len() < MAX_INPUT_DIGITS {
                    self.viewer.push_input_char(self.focus, c);
                }
                Vec::new()
            }
            KeyCode::Backspace => {
                self.viewer.pop_input_char(self.focus);
                Vec::new()
            }
            _ => {
                let action = keybindings.get_action(key);
                self.handle_action(action, clipboard, opener, now)
            }
        }
    }

    pub fn handle_action(
        &mut self,
        action: Action,
        clipboard: &mut dyn Clipboard,
        opener: &dyn LinkOpener,
        now: Instant,
    ) -> Vec<Command> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Vec::new()
            }
            Action::NewVerse => {
                self.clear_status();
                self.focus = InputField::Chapter;
                self.viewer.new_verse()
            }
            Action::Confirm => {
                let commands = self.viewer.confirm();
                if !commands.is_empty() {
                    self.clear_status();
                    self.focus = InputField::Chapter;
                }
                commands
            }
            Action::NextField | Action::PrevField => {
                self.toggle_focus();
                Vec::new()
            }
            Action::NextReciter => {
                let id = self.reciters.next_after(self.viewer.state().reciter_id).id;
                self.viewer.select_reciter(id)
            }
            Action::PrevReciter => {
                let id = self.reciters.prev_before(self.viewer.state().reciter_id).id;
                self.viewer.select_reciter(id)
            }
            Action::PlayAudio => {
                let state = self.viewer.state();
                match state.audio_url() {
                    Some(url) => {
                        if let Err(e) = opener.open(url) {
                            tracing::warn!("Failed to open audio {}: {}", url, e);
                            self.set_status(format!("Failed to open audio: {}", e));
                        }
                    }
                    None if state.verse().is_some() => {
                        self.set_status("No audio available yet".to_string());
                    }
                    None => {}
                }
                Vec::new()
            }
            Action::Copy => {
                let state = self.viewer.state();
                if let Some(verse) = state.verse() {
                    if share::copy_to_clipboard(clipboard, verse) {
                        self.copy_indicator.show(now, self.copy_feedback);
                    }
                }
                Vec::new()
            }
            Action::ShareWhatsApp => {
                self.share(ShareChannel::WhatsApp, opener);
                Vec::new()
            }
            Action::ShareX => {
                self.share(ShareChannel::X, opener);
                Vec::new()
            }
            Action::None => Vec::new(),
        }
    }

    fn share(&self, channel: ShareChannel, opener: &dyn LinkOpener) {
        let state = self.viewer.state();
        if let Some(verse) = state.verse() {
            share::share_via(opener, channel, verse);
        }
    }
}
