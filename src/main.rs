use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pitstop::api::ApiClient;
use pitstop::app::{App, AppAction};
use pitstop::config::AppConfig;
use pitstop::error::{PitstopError, Result};
use pitstop::event::{Event, EventHandler};
use pitstop::ui;
use ratatui::prelude::*;
use std::io::stdout;
use std::panic;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pitstop")]
#[command(author, version, about = "Terminal booking desk for a vehicle service garage")]
struct Args {
    /// Path to config file (default: <config dir>/pitstop/config.toml)
    #[arg(long)]
    config: Option<String>,

    /// Override the API base URL from the config file
    #[arg(long)]
    base_url: Option<String>,

    /// Log file path (logging disabled if not specified)
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging only if a log file is specified; the terminal is ours
    if let Some(ref log_path) = args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .ok();

        if let Some(file) = file {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();

            info!("Starting pitstop");
        }
    }

    let mut config = match args.config {
        Some(ref path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }

    let client = ApiClient::new(&config.api)?;

    // Restore the terminal before any panic message hits the screen
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(config);

    let result = run(&mut terminal, &mut app, &client).await;

    restore_terminal()?;

    if let Err(ref e) = result {
        error!("Application error: {}", e);
    }

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().map_err(|e| PitstopError::Terminal(e.to_string()))?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| PitstopError::Terminal(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| PitstopError::Terminal(e.to_string()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().map_err(|e| PitstopError::Terminal(e.to_string()))?;
    execute!(stdout(), LeaveAlternateScreen)
        .map_err(|e| PitstopError::Terminal(e.to_string()))?;
    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    client: &ApiClient,
) -> Result<()> {
    let mut events = EventHandler::new(app.config.ui.tick_rate());

    loop {
        draw(terminal, app)?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if let Some(action) = app.handle_key(key) {
                        dispatch(terminal, app, client, action).await?;
                    }
                }
                Event::Resize => {
                    // Redrawn at the top of the loop
                }
                Event::Tick => {}
            }
        }

        if app.should_exit {
            break;
        }
    }

    Ok(())
}

fn draw(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal
        .draw(|frame| ui::draw(frame, app))
        .map_err(|e| PitstopError::Terminal(e.to_string()))?;
    Ok(())
}

/// Execute one API-backed action. Requests are awaited right here, so the
/// event loop (and with it all input) is suspended until they resolve. A
/// frame is drawn after each state flip so interim indicators show up.
async fn dispatch(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    client: &ApiClient,
    action: AppAction,
) -> Result<()> {
    match action {
        AppAction::SubmitBooking(request) => {
            app.begin_request("Saving booking...");
            draw(terminal, app)?;

            if let Some(phone) = app.submit_booking(client, &request).await {
                // Let the confirmation message sit before handing off
                draw(terminal, app)?;
                tokio::time::sleep(app.config.ui.handoff_delay()).await;

                app.open_tracker_with(&phone);
                if let Some(key) = app.tracker.begin_lookup() {
                    app.in_flight = true;
                    draw(terminal, app)?;
                    app.run_lookup(client, &key).await;
                }
            }
        }
        AppAction::Lookup(key) => {
            app.in_flight = true;
            draw(terminal, app)?;
            app.run_lookup(client, &key).await;
        }
        AppAction::Login { username, password } => {
            app.begin_request("Signing in...");
            draw(terminal, app)?;

            if app.submit_login(client, &username, &password).await {
                draw(terminal, app)?;
                tokio::time::sleep(app.config.ui.login_delay()).await;

                app.open_dashboard();
                app.in_flight = true;
                draw(terminal, app)?;
                app.load_bookings(client).await;
            }
        }
        AppAction::LoadBookings => {
            app.in_flight = true;
            draw(terminal, app)?;
            app.load_bookings(client).await;
        }
        AppAction::UpdateStatus { booking_id, status } => {
            app.begin_request("Updating status...");
            draw(terminal, app)?;

            if app.apply_status_update(client, booking_id, &status).await {
                app.in_flight = true;
                draw(terminal, app)?;
                app.load_bookings(client).await;
            }
        }
    }
    Ok(())
}
