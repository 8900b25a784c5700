//! # Hifz
//!
//! A terminal viewer for Quranic verses: Arabic text, translation,
//! recitation audio and copy/share actions, backed by the quran.com API.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Viewer → TUI / CLI
//!                          ↘ Share
//! ```
//!
//! - [`fetcher`]: HTTP client for the verse and audio endpoints
//! - [`normalizer`]: Converts API responses into domain values
//! - [`viewer`]: Presentation state machine with request sequencing
//! - [`share`]: Plain-text export, clipboard and share links
//! - [`tui`]: Terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! hifz
//!
//! # Print Ayat al-Kursi and copy it
//! hifz show 2 255 --copy
//!
//! # Audio URL for a verse by a given reciter
//! hifz audio 1:1 --reciter 7
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together configuration,
/// the verse source and the reciter registry.
pub mod app;

/// Command-line interface using clap.
///
/// - `tui` - Launch the TUI (default)
/// - `random` / `show <chapter> <verse>` - Print a verse, optionally copy or share it
/// - `audio <key>` - Resolve a recitation URL
/// - `reciters` - List reciters
pub mod cli;

/// Configuration loaded from `~/.config/hifz/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Verse`](domain::Verse) and [`VerseKey`](domain::VerseKey)
/// - [`ReciterRegistry`](domain::ReciterRegistry): static reciter table
/// - [`Selection`](domain::Selection): chapter/verse input text
pub mod domain;

/// quran.com API access.
///
/// - [`VerseSource`](fetcher::VerseSource): async trait for verse and audio lookups
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// JSON response parsing.
pub mod normalizer;

/// Copy and share actions.
pub mod share;

/// Terminal user interface.
///
/// Verse card, reciter selector with audio control, and two numeric inputs.
/// Keybindings: digits type, Tab switches field, Enter fetches the typed
/// reference, n fetches a new ayah, r/R cycle reciters, p plays, c copies,
/// w/x share, q quits.
pub mod tui;

/// Presentation state machine.
///
/// [`Viewer`](viewer::Viewer) turns user actions and network responses into
/// immutable [`ViewState`](viewer::ViewState) snapshots.
pub mod viewer;
