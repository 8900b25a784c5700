pub mod app;
pub mod event;
pub mod layout;
pub mod network;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{AppContext, Result};
use crate::share::{SystemClipboard, SystemOpener};

use self::app::TuiApp;
use self::event::{AppEvent, EventHandler};
use self::network::NetworkEvent;

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let config = Arc::clone(&ctx.config);
    let mut tui_app =
        TuiApp::new(ctx.reciters.clone()).with_copy_feedback(config.share.copy_feedback());
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<NetworkEvent>();

    let mut clipboard = SystemClipboard;
    let opener = SystemOpener;

    network::dispatch(&ctx.source, tui_app.viewer.activate(), &event_tx);

    loop {
        // Apply finished requests before drawing
        while let Ok(event) = event_rx.try_recv() {
            let commands = match event {
                NetworkEvent::VerseLoaded { seq, result } => {
                    tui_app.viewer.verse_loaded(seq, result)
                }
                NetworkEvent::AudioResolved { seq, result } => {
                    tui_app.viewer.audio_resolved(seq, result);
                    Vec::new()
                }
            };
            network::dispatch(&ctx.source, commands, &event_tx);
        }

        let now = Instant::now();
        terminal.draw(|frame| layout::render(frame, &tui_app, &config, now))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let commands = tui_app.handle_key(
                    &key,
                    &config.keybindings,
                    &mut clipboard,
                    &opener,
                    Instant::now(),
                );
                network::dispatch(&ctx.source, commands, &event_tx);
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}
