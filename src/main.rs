mod app;
mod braille;
mod card;
mod config;
mod error;
mod field;
mod palette;
mod pixel;
mod presets;
mod scheduler;
mod settings;
mod surface;
mod ui;

use app::App;
use clap::Parser;
use config::CardConfig;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use presets::Variant;
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::CardOptions;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "pixel-card")]
#[command(about = "Shimmering pixel-card hover animation in the terminal")]
struct Args {
    /// Card variant (default, blue, yellow, pink)
    #[arg(long)]
    variant: Option<String>,

    /// Spacing between pixels in Braille dots (overrides the variant)
    #[arg(short = 'g', long)]
    gap: Option<usize>,

    /// Shimmer speed 0-100 (overrides the variant)
    #[arg(short = 's', long)]
    speed: Option<f32>,

    /// Comma-separated hex colors, e.g. "#e0f2fe,#7dd3fc,#0ea5e9"
    #[arg(long)]
    colors: Option<String>,

    /// Ignore keyboard focus/blur
    #[arg(long = "no-focus", overrides_with = "focus")]
    no_focus: bool,

    /// React to keyboard focus/blur even if the variant or config turns it off
    #[arg(long, overrides_with = "no_focus")]
    focus: bool,

    /// Disable the radial reveal and the shimmer
    #[arg(long = "reduced-motion", env = "PIXEL_CARD_REDUCED_MOTION")]
    reduced_motion: bool,

    /// RNG seed for a reproducible pixel layout
    #[arg(long)]
    seed: Option<u64>,

    /// Load card options from a JSON file (default: user config dir, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the resolved options to a JSON file and exit
    #[arg(long = "export-config")]
    export_config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn card_options(&self) -> CardOptions {
        CardOptions {
            variant: self.variant.as_deref().map(Variant::from_name),
            gap: self.gap,
            speed: self.speed,
            colors: self.colors.clone(),
            no_focus: match (self.no_focus, self.focus) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
        }
    }
}

/// Logs go to a file; the terminal belongs to the UI
fn init_logging(path: &Path, verbose: u8) -> io::Result<()> {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

/// Config file from `--config`, else the default location if it exists
fn load_config(args: &Args) -> Result<CardConfig, error::CardError> {
    match &args.config {
        Some(path) => CardConfig::load_from_file(path),
        None => match CardConfig::default_path().filter(|p| p.exists()) {
            Some(path) => CardConfig::load_from_file(&path),
            None => Ok(CardConfig::default()),
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path, args.verbose)?;
    }

    // CLI flags win over the config file
    let config = load_config(&args)?;
    let options = config.card.merge(args.card_options());
    let settings = options.resolve(args.reduced_motion)?;
    let seed = args.seed.or(config.seed);

    if let Some(path) = &args.export_config {
        let export = CardConfig {
            version: config.version,
            card: settings.to_options(),
            seed,
        };
        export.save_to_file(path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let frame_rect = ratatui::layout::Rect {
        x: 0,
        y: 0,
        width: size.width,
        height: size.height,
    };
    let card_area = ui::get_canvas_area(frame_rect, false);

    let res = match App::new(settings, card_area, seed) {
        Ok(mut app) => run_app(&mut terminal, &mut app),
        Err(err) => Err(io::Error::new(io::ErrorKind::InvalidInput, err.to_string())),
    };

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(%err, "pixel card exited with an error");
        return Err(err.into());
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    // Poll faster than the animation's 60fps cap so no frame is late
    const POLL_DURATION: Duration = Duration::from_millis(8);

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(POLL_DURATION)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only process Press events
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    // Handle Ctrl+C
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }

                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Tab => app.toggle_focus(),
                        KeyCode::Esc => {
                            if app.show_help {
                                app.toggle_help();
                            } else {
                                app.blur();
                            }
                        }
                        KeyCode::Char('c') | KeyCode::Char('C') => app.cycle_variant(),
                        KeyCode::Char('x') | KeyCode::Char('X') => app.cycle_variant_prev(),
                        KeyCode::Char('+') | KeyCode::Char('=') => app.increase_speed(),
                        KeyCode::Char('-') | KeyCode::Char('_') => app.decrease_speed(),
                        KeyCode::Char('[') => app.adjust_gap(-1),
                        KeyCode::Char(']') => app.adjust_gap(1),
                        KeyCode::Char('v') | KeyCode::Char('V') => {
                            app.toggle_fullscreen();
                            let size = terminal.size()?;
                            let frame_rect = ratatui::layout::Rect::new(0, 0, size.width, size.height);
                            app.resize(ui::get_canvas_area(frame_rect, app.fullscreen_mode));
                        }
                        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => app.toggle_help(),
                        KeyCode::Char('j') | KeyCode::Char('J') => {
                            if app.show_help {
                                app.scroll_help_down(ui::HELP_CONTENT_LINES);
                            }
                        }
                        KeyCode::Char('k') | KeyCode::Char('K') => {
                            if app.show_help {
                                app.scroll_help_up();
                            }
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                        app.pointer_moved(mouse.column, mouse.row);
                    }
                    _ => {}
                },
                Event::FocusLost => app.pointer_gone(),
                Event::Resize(width, height) => {
                    let frame_rect = ratatui::layout::Rect::new(0, 0, width, height);
                    app.resize(ui::get_canvas_area(frame_rect, app.fullscreen_mode));
                }
                _ => {}
            }
        }

        // Advance the animation if a frame is due
        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_flags_override_each_other() {
        let args = Args::try_parse_from(["pixel-card"]).unwrap();
        assert_eq!(args.card_options().no_focus, None);

        let args = Args::try_parse_from(["pixel-card", "--no-focus"]).unwrap();
        assert_eq!(args.card_options().no_focus, Some(true));

        let args = Args::try_parse_from(["pixel-card", "--focus"]).unwrap();
        assert_eq!(args.card_options().no_focus, Some(false));

        // Last one wins
        let args = Args::try_parse_from(["pixel-card", "--focus", "--no-focus"]).unwrap();
        assert_eq!(args.card_options().no_focus, Some(true));
        let args = Args::try_parse_from(["pixel-card", "--no-focus", "--focus"]).unwrap();
        assert_eq!(args.card_options().no_focus, Some(false));
    }

    #[test]
    fn test_focus_override_beats_config() {
        let config = CardOptions {
            variant: Some(Variant::Pink),
            no_focus: Some(true),
            ..Default::default()
        };
        let args = Args::try_parse_from(["pixel-card", "--focus"]).unwrap();
        let settings = config.merge(args.card_options()).resolve(false).unwrap();
        assert!(!settings.no_focus);
    }
}
