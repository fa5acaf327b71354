use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    cues::CueSink,
    game::{Game, GameEvent, ScreenId},
    motion::SensorStatus,
    session::Results,
    tilt::{Action, MotionSample},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Screen controller: mirrors game events into what the views draw and
/// forwards cues to the sound sink.
pub struct App {
    pub game: Game,
    cues: Box<dyn CueSink>,
    pub screen: ScreenId,
    pub categories: Vec<String>,
    pub selected: usize,
    pub countdown_step: usize,
    pub word: Option<String>,
    pub time_remaining: u32,
    pub results: Option<Results>,
    pub notice: Option<String>,
    pub last_sample: Option<MotionSample>,
    pub sensor: SensorStatus,
}

impl App {
    pub fn new(game: Game, cues: Box<dyn CueSink>, sensor: SensorStatus) -> Self {
        let categories = game.categories();
        let time_remaining = game.config().session.game_duration_secs;

        Self {
            game,
            cues,
            screen: ScreenId::Menu,
            categories,
            selected: 0,
            countdown_step: 0,
            word: None,
            time_remaining,
            results: None,
            notice: None,
            last_sample: None,
            sensor,
        }
    }

    pub fn show(&mut self, screen: ScreenId) {
        log::debug!("showing {screen}");
        self.screen = screen;
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.categories.get(self.selected).map(String::as_str)
    }

    pub fn on_tick(&mut self, now: Duration) {
        self.game.advance(now);
        self.sync();
    }

    pub fn on_motion(&mut self, sample: MotionSample) {
        self.last_sample = Some(sample);
        self.game.on_motion(sample);
        self.sync();
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Duration) -> Control {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Control::Quit;
        }

        match self.screen {
            ScreenId::Menu => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.selected = self.selected.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.selected + 1 < self.categories.len() {
                        self.selected += 1;
                    }
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.start_selected(now);
                }
                _ => {}
            },
            ScreenId::Countdown => {}
            ScreenId::Game => match key.code {
                KeyCode::Up | KeyCode::Char('c') => {
                    self.game.dispatch(Action::Correct, now);
                }
                KeyCode::Down | KeyCode::Char('s') => {
                    self.game.dispatch(Action::Skip, now);
                }
                _ => {}
            },
            ScreenId::Results => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char('m')) {
                    self.game.return_to_menu();
                }
            }
        }

        self.sync();
        Control::Continue
    }

    pub fn start_selected(&mut self, now: Duration) -> bool {
        let Some(category) = self.selected_category().map(str::to_string) else {
            return false;
        };
        self.notice = None;
        let started = self.game.select_category(&category, now);
        self.sync();
        started
    }

    fn sync(&mut self) {
        for event in self.game.drain_events() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::Show(screen) => {
                if screen == ScreenId::Menu {
                    self.word = None;
                    self.results = None;
                }
                self.show(screen);
            }
            GameEvent::Countdown(step) => self.countdown_step = step,
            GameEvent::Word(word) => self.word = Some(word),
            GameEvent::Timer(secs) => self.time_remaining = secs,
            GameEvent::Cue(cue) => self.cues.play(cue),
            GameEvent::Results(results) => {
                self.word = None;
                self.results = Some(results);
            }
            GameEvent::StartFailed(message) => self.notice = Some(message),
        }
    }
}
