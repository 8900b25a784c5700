use crate::app::{AppContext, HifzError, Result};
use crate::cli::OutputArgs;
use crate::domain::{ReciterRegistry, Verse, VerseKey};
use crate::fetcher::VerseRequest;
use crate::share::{self, Clipboard, LinkOpener, SystemClipboard, SystemOpener};

pub async fn show_verse(ctx: &AppContext, request: VerseRequest, output: &OutputArgs) -> Result<()> {
    let verse = ctx.source.fetch(request).await?;
    println!("{}", format_verse(&verse));
    deliver(&verse, output, &mut SystemClipboard, &SystemOpener);
    Ok(())
}

pub async fn print_audio(
    ctx: &AppContext,
    verse_key: &str,
    reciter: Option<u32>,
    play: bool,
) -> Result<()> {
    let key: VerseKey = verse_key.parse()?;
    let reciter = match reciter {
        Some(id) => *ctx
            .reciters
            .get(id)
            .ok_or_else(|| HifzError::Other(format!("Unknown reciter id: {}", id)))?,
        None => *ctx.reciters.default_reciter(),
    };

    let url = ctx.source.resolve_audio(key, reciter.id).await?;
    println!("{} - {}", key, reciter.display_name());
    println!("{}", url);

    if play {
        SystemOpener.open(&url)?;
    }
    Ok(())
}

pub fn list_reciters(reciters: &ReciterRegistry) {
    let default_id = reciters.default_reciter().id;
    for reciter in reciters.all() {
        let marker = if reciter.id == default_id { "*" } else { " " };
        println!("{} {:>3}  {}", marker, reciter.id, reciter.display_name());
    }
}

/// Plain-text rendering used by the one-shot commands.
pub fn format_verse(verse: &Verse) -> String {
    format!(
        "{}\n\n{}\n\n-- Quran {}",
        verse.text_uthmani,
        verse.clean_translation(),
        verse.verse_key
    )
}

/// Run the copy/share side effects requested on the command line.
pub fn deliver(
    verse: &Verse,
    output: &OutputArgs,
    clipboard: &mut dyn Clipboard,
    opener: &dyn LinkOpener,
) {
    if output.copy {
        if share::copy_to_clipboard(clipboard, verse) {
            println!("Copied!");
        } else {
            eprintln!("Could not access the clipboard");
        }
    }
    if let Some(channel) = output.share {
        share::share_via(opener, channel, verse);
    }
}
