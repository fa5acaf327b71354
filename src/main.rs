use anyhow::Context;
use brainscreen::{
    app::{App, Control},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    cues::{BellCues, CueSink, SilentCues},
    game::Game,
    logging,
    motion::SensorStatus,
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    tilt::{self, Axis, TiltMapping},
    timer::Clock,
    ui,
    words::{DirWordSource, EmbeddedWords, WordSource},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// heads-up word guessing for the terminal: hold it up, tilt to score
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A heads-up style party game. Pick a category, hold the screen to your forehead and let your friends describe the word. Tilt down (or press up) for correct, tilt up (or press down) to skip."
)]
pub struct Cli {
    /// length of a round in seconds
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    secs: Option<u32>,

    /// acceleration in m/s² on the tilt axis that counts as a tilt
    #[clap(long, value_parser = parse_threshold)]
    threshold: Option<f64>,

    /// milliseconds after a tilt during which further tilts are ignored
    #[clap(long)]
    cooldown_ms: Option<u64>,

    /// accelerometer axis that points through the screen
    #[clap(long, value_enum)]
    axis: Option<Axis>,

    /// swap which tilt direction counts as correct
    #[clap(long)]
    invert_tilt: bool,

    /// file or FIFO streaming JSON accelerometer samples, one per line
    #[clap(short = 'm', long)]
    motion: Option<PathBuf>,

    /// directory of <category>.json word lists to use instead of the built-in ones
    #[clap(short = 'd', long)]
    words_dir: Option<PathBuf>,

    /// disable sound cues
    #[clap(long)]
    mute: bool,

    /// store the resulting settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if tilt::is_valid_threshold(value) {
        Ok(value)
    } else {
        Err("must be a finite number above zero".to_string())
    }
}

impl Cli {
    /// Layer command line flags over the stored configuration
    fn apply(&self, mut config: Config) -> Config {
        if let Some(secs) = self.secs {
            config.game_duration_secs = secs;
        }
        if let Some(threshold) = self.threshold {
            config.tilt_threshold = threshold;
        }
        if let Some(cooldown_ms) = self.cooldown_ms {
            config.tilt_cooldown_ms = cooldown_ms;
        }
        if let Some(axis) = self.axis {
            config.tilt_axis = axis;
        }
        if self.invert_tilt {
            config.tilt_mapping = TiltMapping::Inverted;
        }
        if let Some(dir) = &self.words_dir {
            config.words_dir = Some(dir.clone());
        }
        if self.mute {
            config.sound = false;
        }
        config
    }
}

fn word_source(config: &Config) -> Box<dyn WordSource> {
    match &config.words_dir {
        Some(dir) => Box::new(DirWordSource::new(dir)),
        None => Box::new(EmbeddedWords),
    }
}

fn cue_sink(config: &Config) -> Box<dyn CueSink> {
    if !config.sound {
        return Box::new(SilentCues);
    }
    audio_sink().unwrap_or_else(|| Box::new(BellCues::new(io::stdout())))
}

#[cfg(feature = "audio")]
fn audio_sink() -> Option<Box<dyn CueSink>> {
    match brainscreen::cues::ToneCues::new() {
        Ok(tones) => Some(Box::new(tones)),
        Err(e) => {
            log::warn!("no audio output, falling back to the terminal bell: {e}");
            None
        }
    }
}

#[cfg(not(feature = "audio"))]
fn audio_sink() -> Option<Box<dyn CueSink>> {
    None
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        if let Err(e) = logging::init(&path) {
            eprintln!("logging disabled: {e:#}");
        }
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        store
            .save(&config)
            .with_context(|| format!("saving config to {}", store.path().display()))?;
        log::info!("settings saved to {}", store.path().display());
    }

    let clock = Clock::start();
    let events = CrosstermEventSource::new();
    let sensor = match &cli.motion {
        Some(path) => events.attach_motion_feed(path, clock),
        None => SensorStatus::Unavailable("no motion feed".to_string()),
    };
    log::info!("starting, {}", sensor.label());

    let game = Game::new(config.game_config(), word_source(&config));
    let mut app = App::new(game, cue_sink(&config), sensor);
    let runner = Runner::new(events, FixedTicker::new(Duration::from_millis(TICK_RATE_MS)));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, &runner, &clock);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
    clock: &Clock,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step() {
            AppEvent::Tick => app.on_tick(clock.now()),
            AppEvent::Resize => {}
            AppEvent::Motion(sample) => app.on_motion(sample),
            AppEvent::Key(key) => {
                if app.on_key(key, clock.now()) == Control::Quit {
                    break;
                }
            }
        }
    }

    log::info!("quitting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainscreen::{
        game::ScreenId,
        runtime::TestEventSource,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::sync::mpsc;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["brainscreen"]);

        assert_eq!(cli.secs, None);
        assert_eq!(cli.threshold, None);
        assert_eq!(cli.cooldown_ms, None);
        assert_eq!(cli.axis, None);
        assert!(!cli.invert_tilt);
        assert_eq!(cli.motion, None);
        assert!(!cli.mute);
        assert!(!cli.save_config);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "brainscreen",
            "-s",
            "90",
            "--threshold",
            "3.5",
            "--cooldown-ms",
            "600",
            "--axis",
            "y",
            "--invert-tilt",
            "-m",
            "/tmp/motion",
            "--words-dir",
            "/tmp/words",
            "--mute",
        ]);

        assert_eq!(cli.secs, Some(90));
        assert_eq!(cli.threshold, Some(3.5));
        assert_eq!(cli.cooldown_ms, Some(600));
        assert_eq!(cli.axis, Some(Axis::Y));
        assert!(cli.invert_tilt);
        assert_eq!(cli.motion, Some(PathBuf::from("/tmp/motion")));
        assert_eq!(cli.words_dir, Some(PathBuf::from("/tmp/words")));
        assert!(cli.mute);
    }

    #[test]
    fn test_cli_rejects_zero_second_round() {
        assert!(Cli::try_parse_from(["brainscreen", "-s", "0"]).is_err());
        assert!(Cli::try_parse_from(["brainscreen", "-s", "1"]).is_ok());
    }

    #[test]
    fn test_cli_rejects_bad_threshold() {
        for bad in ["-1", "0", "NaN", "inf", "abc"] {
            assert!(
                Cli::try_parse_from(["brainscreen", "--threshold", bad]).is_err(),
                "accepted {bad}"
            );
        }
        let cli = Cli::try_parse_from(["brainscreen", "--threshold", "0.5"]).unwrap();
        assert_eq!(cli.threshold, Some(0.5));
    }

    #[test]
    fn test_cli_rejects_unknown_axis() {
        assert!(Cli::try_parse_from(["brainscreen", "--axis", "w"]).is_err());
    }

    #[test]
    fn test_apply_overrides_only_given_flags() {
        let stored = Config {
            game_duration_secs: 30,
            tilt_threshold: 5.0,
            ..Config::default()
        };

        let cli = Cli::parse_from(["brainscreen", "-s", "45", "--mute"]);
        let merged = cli.apply(stored.clone());

        assert_eq!(merged.game_duration_secs, 45);
        assert_eq!(merged.tilt_threshold, 5.0);
        assert!(!merged.sound);
        assert_eq!(merged.tilt_mapping, TiltMapping::Standard);

        let untouched = Cli::parse_from(["brainscreen"]).apply(stored.clone());
        assert_eq!(untouched, stored);
    }

    #[test]
    fn test_apply_invert_and_words_dir() {
        let cli = Cli::parse_from(["brainscreen", "--invert-tilt", "-d", "/w"]);
        let merged = cli.apply(Config::default());
        assert_eq!(merged.tilt_mapping, TiltMapping::Inverted);
        assert_eq!(merged.words_dir, Some(PathBuf::from("/w")));
    }

    #[test]
    fn test_tick_rate_constant() {
        assert_eq!(TICK_RATE_MS, 100);
    }

    #[test]
    fn test_start_tui_quits_on_escape() {
        let (tx, rx) = mpsc::channel();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );
        let config = Config::default();
        let mut app = App::new(
            Game::new(config.game_config(), word_source(&config)),
            Box::new(SilentCues),
            SensorStatus::Unavailable("test".into()),
        );
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
            .unwrap();
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();

        start_tui(&mut terminal, &mut app, &runner, &Clock::start()).unwrap();
        assert_eq!(app.screen, ScreenId::Countdown);
    }
}
