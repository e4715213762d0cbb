//! VibeCoder TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use vibe_context::Context7Mock;
use vibe_llm::{api_key_from_env, GenerationClient};
use vibe_swarm::{Swarm, SwarmEvent, EVENT_CHANNEL_CAPACITY};
use vibe_tui::config::VibeConfig;
use vibe_tui::error::TuiError;
use vibe_tui::events::TuiEvent;
use vibe_tui::keys::map_key;
use vibe_tui::state::App;
use vibe_tui::telemetry;
use vibe_tui::views::render_view;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = VibeConfig::load()?;
    telemetry::init_logging(&config.log_path)?;

    let generator = GenerationClient::from_settings(api_key_from_env(), &config.generation);
    tracing::info!(enabled = generator.is_enabled(), "Generation client ready");
    let knowledge = Context7Mock::new(&config.knowledge);
    let (mut swarm, swarm_rx) = Swarm::new(
        Arc::new(generator),
        Arc::new(knowledge),
        config.swarm_settings(),
    );
    swarm.start();
    let mut app = App::new(config, swarm);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(EVENT_CHANNEL_CAPACITY);
    spawn_input_reader(event_tx.clone());
    spawn_swarm_forwarder(swarm_rx, event_tx.clone());

    let tick_rate = Duration::from_millis(app.config.ui.tick_rate_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => handle_event(&mut app, TuiEvent::Tick),
            Some(event) = event_rx.recv() => handle_event(&mut app, event),
        }

        if app.should_quit {
            break;
        }
    }

    app.swarm.shutdown();
    tracing::info!("Shutting down");
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            let sent = match event::read() {
                Ok(CrosstermEvent::Key(key)) => sender.blocking_send(TuiEvent::Input(key)),
                Ok(CrosstermEvent::Resize(width, height)) => {
                    sender.blocking_send(TuiEvent::Resize { width, height })
                }
                _ => Ok(()),
            };
            if sent.is_err() {
                break;
            }
        }
    });
}

fn spawn_swarm_forwarder(mut swarm_rx: mpsc::Receiver<SwarmEvent>, sender: mpsc::Sender<TuiEvent>) {
    tokio::spawn(async move {
        while let Some(event) = swarm_rx.recv().await {
            if sender.send(TuiEvent::from(event)).await.is_err() {
                break;
            }
        }
    });
}

fn handle_event(app: &mut App, event: TuiEvent) {
    match event {
        TuiEvent::Input(key) => {
            if let Some(action) = map_key(key, app.focus, app.modal.is_some()) {
                app.handle_action(action);
            }
        }
        TuiEvent::Swarm(event) => app.apply_swarm_event(*event),
        TuiEvent::Tick => app.on_tick(),
        TuiEvent::Resize { width, height } => {
            tracing::debug!(width, height, "Terminal resized");
        }
    }
}
