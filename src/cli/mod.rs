pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::share::ShareChannel;

#[derive(Parser)]
#[command(name = "hifz")]
#[command(about = "Read, hear and share Quranic verses from the terminal", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/hifz/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(short, long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default)
    Tui,
    /// Print a random verse
    Random {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print a verse by chapter and verse number
    Show {
        /// Chapter (surah) number, 1-114
        chapter: u16,
        /// Verse (ayah) number
        verse: u16,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the audio URL for a verse
    Audio {
        /// Verse key such as 2:255
        verse_key: String,
        /// Reciter id (see `hifz reciters`)
        #[arg(short, long)]
        reciter: Option<u32>,
        /// Open the audio with the system player
        #[arg(long)]
        play: bool,
    },
    /// List available reciters
    Reciters,
}

#[derive(clap::Args, Debug, Default)]
pub struct OutputArgs {
    /// Copy the verse to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Open a share link (whatsapp or x)
    #[arg(long, value_parser = parse_share_channel)]
    pub share: Option<ShareChannel>,
}

fn parse_share_channel(s: &str) -> Result<ShareChannel, String> {
    s.parse().map_err(|e: crate::app::HifzError| e.to_string())
}
