use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hifz::app::AppContext;
use hifz::cli::{commands, Cli, Commands};
use hifz::fetcher::VerseRequest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    init_tracing(&cli.log, matches!(command, Commands::Tui))?;

    let ctx = AppContext::new(cli.config.as_deref())?;

    match command {
        Commands::Tui => {
            hifz::tui::run(Arc::new(ctx)).await?;
        }
        Commands::Random { output } => {
            commands::show_verse(&ctx, VerseRequest::Random, &output).await?;
        }
        Commands::Show {
            chapter,
            verse,
            output,
        } => {
            commands::show_verse(&ctx, VerseRequest::ByReference { chapter, verse }, &output)
                .await?;
        }
        Commands::Audio {
            verse_key,
            reciter,
            play,
        } => {
            commands::print_audio(&ctx, &verse_key, reciter, play).await?;
        }
        Commands::Reciters => {
            commands::list_reciters(&ctx.reciters);
        }
    }

    Ok(())
}

/// Logs go to `--log` when given. Otherwise stderr, except in the TUI where
/// they would corrupt the screen.
fn init_tracing(log: &Option<std::path::PathBuf>, tui: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env();

    match log {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
                .with(filter)
                .init();
        }
        None if !tui => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
        None => {}
    }

    Ok(())
}
