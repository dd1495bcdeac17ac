use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::{Backend, CrosstermBackend, Terminal};
use std::{
    io,
    time::{Duration, Instant},
};

use podcastr::audio::{AudioPlayer, MediaElement};
use podcastr::logging;
use podcastr::settings::SettingsManager;
use podcastr::tui::TuiApp;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = SettingsManager::new()?;
    let log_path = logging::init(&settings.get().log_level)?;

    // Set up panic hook so the terminal is usable after a crash
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        log::error!("PANIC: {}", panic_info);
        eprintln!("PANIC: {}", panic_info);
        std::process::exit(1);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, DisableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the application
    let result = run_app(&mut terminal, settings).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        log::error!("Application error: {:?}", err);
        eprintln!("Application error: {:?}", err);
        eprintln!("See {} for details", log_path.display());
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, settings: SettingsManager) -> Result<()> {
    let (audio_player, media_events) = AudioPlayer::new(settings.default_volume())?;

    let mut app = TuiApp::new(settings, audio_player, media_events);
    app.initialize().await?;

    run_main_app(terminal, app).await
}

async fn run_main_app<B: Backend, M: MediaElement>(
    terminal: &mut Terminal<B>,
    mut app: TuiApp<M>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();

    log::info!("Use Ctrl+C or 'q' to quit");

    loop {
        terminal.draw(|f| app.render(f))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_input(key).await?;

                    if app.should_quit() {
                        break;
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.update().await?;
            last_tick = Instant::now();
        }
    }

    Ok(())
}
