//! Hikari - Kingdom of Light
//!
//! Main entry point for the game.

use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use hk_core::GameRng;
use hk_core::player::{Player, Variant};
use hk_core::session::Session;
use hk_save::{default_save_path, load_snapshot, save_exists, save_snapshot};
use hk_tui::{App, Theme, TracingAudio};

/// Hikari - a tiny turn-based field RPG
#[derive(Parser, Debug)]
#[command(name = "hikari")]
#[command(author, version, about = "Hikari - Kingdom of Light", long_about = None)]
struct Args {
    /// Player name
    #[arg(short = 'u', long = "name")]
    name: Option<String>,

    /// Avatar variant (boy/girl)
    #[arg(short = 'g', long = "variant")]
    variant: Option<String>,

    /// RNG seed for a reproducible run
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Start a fresh game, ignoring any existing save
    #[arg(long = "new")]
    new_game: bool,

    /// BGM and cue volume percentage
    #[arg(long = "volume", default_value_t = 50)]
    volume: u8,

    /// Force the light terminal theme
    #[arg(long = "light")]
    light: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging();

    let name = args.name.clone().unwrap_or_else(|| "Kakeru".to_string());
    let variant = match args.variant.as_deref() {
        Some("girl") => Variant::Girl,
        _ => Variant::Boy,
    };

    // Pick up the previous snapshot unless a fresh game was asked for;
    // load failures fall back to a new player, never to an error.
    let save_path = default_save_path(&name);
    let player = if !args.new_game && save_exists(&save_path) {
        match load_snapshot(&save_path) {
            Ok(player) => player,
            Err(err) => {
                tracing::warn!(%err, "could not load save, starting fresh");
                Player::new(name, variant)
            }
        }
    } else {
        Player::new(name, variant)
    };

    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    let session = Session::new(player, rng);

    let theme = if args.light {
        Theme::light()
    } else {
        Theme::detect()
    };
    let audio = TracingAudio::new(args.volume);
    let mut app = App::new(session, theme, Box::new(audio));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop: draw, poll for input, advance the logical clock
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.tick(last_tick.elapsed().as_millis() as u64);
        last_tick = Instant::now();

        if app.should_quit() {
            break;
        }
    }

    // Save on the way out; best-effort like every persistence call.
    let player = app.session().player();
    if let Err(err) = save_snapshot(player, default_save_path(&player.name)) {
        tracing::warn!(%err, "save on exit failed");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Log to a file when HK_LOG is set; stderr would tear the TUI.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    if std::env::var_os("HK_LOG").is_none() {
        return;
    }
    let Ok(file) = std::fs::File::create("hikari.log") else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("HK_LOG"))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}
