mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use pinpoint::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    controls::{command_for_key, Command, Flow, Play},
    history::{HistoryRecord, HistoryStore, MemoryHistoryStore, SqliteHistoryStore},
    logging::init_logging,
    random::RngSource,
    runtime::{CrosstermEventSource, GameEvent, Runner},
    session_log, Phase, Session, SessionSettings,
};
use rand::rngs::StdRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::{Path, PathBuf},
};

/// find the cell closest to every target
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A grid game: each round scatters targets over the board and you pick the free cell with the smallest total distance to all of them. Your score is how far off the best cell you were, summed over the session."
)]
pub struct Cli {
    /// number of rounds per session
    #[clap(short = 'r', long)]
    rounds: Option<usize>,

    /// board width in cells
    #[clap(long)]
    cols: Option<usize>,

    /// board height in cells
    #[clap(long)]
    rows: Option<usize>,

    /// fix the RNG seed for reproducible boards
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// history database to use instead of the default location
    #[clap(long)]
    db: Option<PathBuf>,

    /// config file to use instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// print the stored results and exit
    #[clap(long)]
    history: bool,

    /// store the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command line flags take precedence over the stored config
    fn apply_overrides(&self, mut cfg: Config) -> Config {
        if let Some(rounds) = self.rounds {
            cfg.total_rounds = rounds;
        }
        if let Some(cols) = self.cols {
            cfg.cols = cols;
        }
        if let Some(rows) = self.rows {
            cfg.rows = rows;
        }
        cfg
    }
}

pub type GameRandom = RngSource<StdRng>;
pub type GameStore = Box<dyn HistoryStore>;

pub struct App {
    pub play: Play<GameRandom, GameStore>,
    /// CSV log finished sessions are appended to
    pub session_log: Option<PathBuf>,
}

impl App {
    pub fn new(settings: SessionSettings, random: GameRandom, store: GameStore) -> Self {
        let mut session = Session::new(settings, random, store);
        session.start_session();
        Self {
            play: Play::new(session),
            session_log: AppDirs::session_log_path(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.play.session.phase()
    }

    pub fn apply(&mut self, cmd: Command) -> Flow {
        let before = self.phase();
        let flow = self.play.handle(cmd);

        if before != Phase::Ended && self.phase() == Phase::Ended {
            if let Some(path) = &self.session_log {
                if let Err(e) = session_log::append_session(path, self.play.session.stats()) {
                    log::warn!("could not append to {}: {}", path.display(), e);
                }
            }
        }
        flow
    }
}

fn open_store(cli: &Cli) -> GameStore {
    let opened = match &cli.db {
        Some(path) => SqliteHistoryStore::open(path),
        None => SqliteHistoryStore::new(),
    };
    match opened {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("history database unavailable, results will not persist: {}", e);
            Box::new(MemoryHistoryStore::default())
        }
    }
}

fn format_history(history: &[HistoryRecord]) -> String {
    if history.is_empty() {
        return "No sessions recorded yet.\n".to_string();
    }
    let mut out = format!("{:>3}  {:>10}  {:>5}\n", "#", "difference", "hits");
    for (idx, rec) in history.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}  {:>10}  {:>5}\n",
            idx + 1,
            rec.difference,
            rec.hits
        ));
    }
    out
}

/// Install the debug log, returning a warning line when it cannot be opened.
/// The game runs without it.
fn start_logging(path: &Path) -> Option<String> {
    init_logging(path)
        .err()
        .map(|e| format!("pinpoint: debug log disabled ({}): {}", path.display(), e))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = AppDirs::debug_log_path() {
        if let Some(warning) = start_logging(&path) {
            eprintln!("{}", warning);
        }
    }

    let config_store = cli
        .config
        .as_ref()
        .map(FileConfigStore::with_path)
        .unwrap_or_default();
    let config = cli.apply_overrides(config_store.load());
    if let Err(e) = config.validate() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, e).exit();
    }
    if cli.save_config {
        config_store.save(&config)?;
    }

    let store = open_store(&cli);
    if cli.history {
        print!("{}", format_history(&store.load()));
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let random = match cli.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };
    let mut app = App::new(SessionSettings::from(&config), random, store);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new());

    terminal.draw(|f| ui(app, f))?;

    while let Some(batch) = runner.next_batch() {
        for event in batch {
            let GameEvent::Key(key) = event else {
                continue;
            };
            if let Some(cmd) = command_for_key(key) {
                if app.apply(cmd) == Flow::Quit {
                    return Ok(());
                }
            }
        }
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    ui::screen::current_screen(app.phase()).render(app, f);
}
