mod app;
mod braille;
mod data;
mod map;
mod ui;

use anyhow::{Context, Result};
use app::{App, GlobeModel, ViewerSettings};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use geoframe::{Angle, Distance, GeodeticPosition};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Frame a set of positions on a terminal globe.
#[derive(Parser, Debug)]
#[command(about = "Fit GeoJSON positions into a braille globe view")]
struct ViewerArgs {
    /// GeoJSON file whose coordinates are framed (built-in track if omitted)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Ground margin added on every side of the extent, in kilometers
    #[arg(long, default_value_t = 25.0)]
    margin_km: f64,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 45.0)]
    fov_deg: f64,

    /// Reference surface for offsets and spans
    #[arg(long, value_enum, default_value_t = GlobeModel::default())]
    globe: GlobeModel,

    /// Write logs here; the terminal is owned by the UI so nothing is logged otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl ViewerArgs {
    fn settings(&self) -> Result<ViewerSettings> {
        if !self.margin_km.is_finite() || self.margin_km < 0.0 {
            anyhow::bail!("--margin-km must be a non-negative number, got {}", self.margin_km);
        }
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            anyhow::bail!("--fov-deg must be between 0 and 180, got {}", self.fov_deg);
        }
        Ok(ViewerSettings {
            margin: Distance::from_kilometers(self.margin_km),
            fov: Angle::from_degrees(self.fov_deg),
            globe: self.globe,
        })
    }
}

fn main() -> Result<()> {
    let args = ViewerArgs::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    let settings = args.settings()?;
    let positions = match &args.data {
        Some(path) => data::load_positions(path)?,
        None => data::sample_positions(),
    };

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    // Run the app
    let result = run(&mut terminal, positions, settings);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

fn init_logging(path: &Path) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
    Ok(())
}

/// Handle mouse events for panning and zooming
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_in(),
        MouseEventKind::ScrollDown => app.zoom_out(),
        // Horizontal scroll for panning (trackpad two-finger swipe)
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        // Click and drag to pan
        MouseEventKind::Down(MouseButton::Left) => {
            app.last_mouse = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.handle_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.end_drag();
        }
        _ => {}
    }
}

fn run(
    terminal: &mut DefaultTerminal,
    positions: Vec<GeodeticPosition>,
    settings: ViewerSettings,
) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(size.width as usize, size.height as usize, positions, settings)?;
    app.frame();

    // Main loop
    loop {
        // Draw
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                            // Pan with hjkl or arrow keys
                            KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                            KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                            KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
                            KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

                            // Zoom
                            KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                            KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                            // Framing
                            KeyCode::Char('f') | KeyCode::Char('0') => app.frame(),
                            KeyCode::Char(']') => app.adjust_margin(true),
                            KeyCode::Char('[') => app.adjust_margin(false),

                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse(&mut app, mouse);
                }
                Event::Resize(width, height) => {
                    app.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
