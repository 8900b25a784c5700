//! Runs viewer commands on the tokio runtime and reports back over a channel.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::app::Result;
use crate::domain::Verse;
use crate::fetcher::VerseSource;
use crate::viewer::Command;

pub enum NetworkEvent {
    VerseLoaded { seq: u64, result: Result<Verse> },
    AudioResolved { seq: u64, result: Result<String> },
}

/// Spawn one task per command. Nothing is cancelled; the viewer drops
/// responses it no longer wants.
pub fn dispatch(
    source: &Arc<dyn VerseSource + Send + Sync>,
    commands: Vec<Command>,
    event_tx: &mpsc::UnboundedSender<NetworkEvent>,
) {
    for command in commands {
        let source = Arc::clone(source);
        let event_tx = event_tx.clone();

        tokio::spawn(async move {
            let event = run_command(source.as_ref(), command).await;
            // Receiver is gone once the UI has quit
            let _ = event_tx.send(event);
        });
    }
}

pub async fn run_command(source: &(dyn VerseSource + Send + Sync), command: Command) -> NetworkEvent {
    match command {
        Command::FetchVerse { seq, request } => NetworkEvent::VerseLoaded {
            seq,
            result: source.fetch(request).await,
        },
        Command::ResolveAudio {
            seq,
            verse_key,
            reciter_id,
        } => NetworkEvent::AudioResolved {
            seq,
            result: source.resolve_audio(verse_key, reciter_id).await,
        },
    }
}
