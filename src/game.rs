//! Round state machine: `Idle -> Countdown -> Active -> Ended -> Idle`.
//!
//! Time never flows on its own here. Callers pass the current app time into
//! [`Game::advance`] (or into an action, which advances first), and the game
//! reports what changed through [`GameEvent`]s drained by the front end.

use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    cues::Cue,
    session::{Results, Session, SessionConfig},
    tilt::{Action, MotionSample, TiltConfig, TiltDetector},
    timer::Interval,
    util::shuffle_with,
    words::{WordSource, WordSourceError},
};

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTone {
    Danger,
    Warning,
    Success,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownStep {
    pub label: &'static str,
    pub tone: StepTone,
}

pub const COUNTDOWN_STEPS: [CountdownStep; 4] = [
    CountdownStep {
        label: "3",
        tone: StepTone::Danger,
    },
    CountdownStep {
        label: "2",
        tone: StepTone::Warning,
    },
    CountdownStep {
        label: "1",
        tone: StepTone::Success,
    },
    CountdownStep {
        label: "Go!",
        tone: StepTone::Plain,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ScreenId {
    Menu,
    Countdown,
    Game,
    Results,
}

/// Everything the front end needs to mirror the game.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Show(ScreenId),
    /// Index into [`COUNTDOWN_STEPS`].
    Countdown(usize),
    Word(String),
    Timer(u32),
    Cue(Cue),
    Results(Results),
    StartFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    Countdown,
    Active,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub session: SessionConfig,
    pub tilt: TiltConfig,
    pub tick: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            tilt: TiltConfig::default(),
            tick: TICK_INTERVAL,
        }
    }
}

struct CountdownRound {
    category: String,
    step: usize,
    ticker: Interval,
}

/// The live round. Its 1 Hz ticker and the tilt cooldown live and die with it.
struct ActiveRound {
    session: Session,
    ticker: Interval,
    tilt: TiltDetector,
}

enum Phase {
    Idle,
    Countdown(CountdownRound),
    Active(ActiveRound),
    Ended(Results),
}

pub struct Game {
    config: GameConfig,
    source: Box<dyn WordSource>,
    rng: StdRng,
    phase: Phase,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: GameConfig, source: Box<dyn WordSource>) -> Self {
        Self::with_rng(config, source, StdRng::from_entropy())
    }

    pub fn with_rng(config: GameConfig, source: Box<dyn WordSource>, rng: StdRng) -> Self {
        Self {
            config,
            source,
            rng,
            phase: Phase::Idle,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn categories(&self) -> Vec<String> {
        self.source.categories()
    }

    pub fn phase(&self) -> PhaseKind {
        match self.phase {
            Phase::Idle => PhaseKind::Idle,
            Phase::Countdown(_) => PhaseKind::Countdown,
            Phase::Active(_) => PhaseKind::Active,
            Phase::Ended(_) => PhaseKind::Ended,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            Phase::Active(round) => Some(&round.session),
            _ => None,
        }
    }

    pub fn results(&self) -> Option<&Results> {
        match &self.phase {
            Phase::Ended(results) => Some(results),
            _ => None,
        }
    }

    pub fn countdown_step(&self) -> Option<usize> {
        match &self.phase {
            Phase::Countdown(round) => Some(round.step),
            _ => None,
        }
    }

    pub fn is_tilt_cooling_down(&self, now: Duration) -> bool {
        match &self.phase {
            Phase::Active(round) => round.tilt.is_cooling_down(now),
            _ => false,
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Starts the countdown for `category`. Only valid from `Idle`.
    pub fn select_category(&mut self, category: &str, now: Duration) -> bool {
        if !matches!(self.phase, Phase::Idle) {
            return false;
        }

        log::info!("category '{category}' selected, counting down");
        self.phase = Phase::Countdown(CountdownRound {
            category: category.to_string(),
            step: 0,
            ticker: Interval::starting_at(now, self.config.tick),
        });
        self.emit(GameEvent::Show(ScreenId::Countdown));
        self.emit(GameEvent::Countdown(0));
        self.emit(GameEvent::Cue(Cue::CountdownTick));
        true
    }

    /// Runs every timer tick due at or before `now`, in order.
    pub fn advance(&mut self, now: Duration) {
        loop {
            let phase = std::mem::replace(&mut self.phase, Phase::Idle);
            let (next, settled) = match phase {
                Phase::Countdown(round) => self.advance_countdown(round, now),
                Phase::Active(round) => (self.advance_round(round, now), true),
                other => (other, true),
            };
            self.phase = next;
            if settled {
                break;
            }
        }
    }

    fn advance_countdown(&mut self, mut round: CountdownRound, now: Duration) -> (Phase, bool) {
        while let Some(due) = round.ticker.poll(now) {
            round.step += 1;
            if round.step < COUNTDOWN_STEPS.len() {
                self.emit(GameEvent::Countdown(round.step));
                self.emit(GameEvent::Cue(Cue::CountdownTick));
            } else {
                // The new round may already owe ticks for `now`
                return (self.start_round(&round.category, due), false);
            }
        }
        (Phase::Countdown(round), true)
    }

    fn start_round(&mut self, category: &str, at: Duration) -> Phase {
        let fetched = self.source.fetch(category).and_then(|words| {
            if words.is_empty() {
                Err(WordSourceError::Empty(category.to_string()))
            } else {
                Ok(words)
            }
        });

        let words = match fetched {
            Ok(words) => words,
            Err(e) => {
                log::warn!("could not start a round of '{category}': {e}");
                self.emit(GameEvent::StartFailed(e.to_string()));
                self.emit(GameEvent::Show(ScreenId::Menu));
                return Phase::Idle;
            }
        };

        let words = shuffle_with(&words, &mut self.rng);
        let session = Session::new(words, &self.config.session, at);
        log::info!(
            "round of '{category}' started with {} words, {}s",
            session.words().len(),
            session.time_remaining()
        );

        self.emit(GameEvent::Show(ScreenId::Game));
        self.emit(GameEvent::Timer(session.time_remaining()));
        if let Some(word) = session.current_word() {
            self.emit(GameEvent::Word(word.to_string()));
        }

        Phase::Active(ActiveRound {
            session,
            ticker: Interval::starting_at(at, self.config.tick),
            tilt: TiltDetector::new(self.config.tilt),
        })
    }

    fn advance_round(&mut self, mut round: ActiveRound, now: Duration) -> Phase {
        while round.ticker.poll(now).is_some() {
            let remaining = round.session.tick();
            self.emit(GameEvent::Timer(remaining));

            if round.session.take_warning() {
                self.emit(GameEvent::Cue(Cue::Warning));
            }
            if round.session.is_out_of_time() {
                return self.finish(round);
            }
        }
        Phase::Active(round)
    }

    fn finish(&mut self, round: ActiveRound) -> Phase {
        let results = round.session.finish();
        log::info!("round over: {}", results.summary());

        self.emit(GameEvent::Cue(Cue::GameOver));
        self.emit(GameEvent::Results(results.clone()));
        self.emit(GameEvent::Show(ScreenId::Results));
        Phase::Ended(results)
    }

    /// Judges the word on screen. Timer ticks due by `now` run first, so an
    /// action landing on the expiry tick is dropped. Running out of words ends
    /// the round immediately.
    pub fn dispatch(&mut self, action: Action, now: Duration) -> bool {
        self.advance(now);

        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Active(mut round) => {
                let applied = self.apply(&mut round, action);
                self.phase = if round.session.is_exhausted() {
                    self.finish(round)
                } else {
                    Phase::Active(round)
                };
                applied
            }
            other => {
                self.phase = other;
                false
            }
        }
    }

    fn apply(&mut self, round: &mut ActiveRound, action: Action) -> bool {
        let Some(word) = round.session.classify(action).map(str::to_string) else {
            return false;
        };
        log::debug!("'{word}' judged {action}");

        self.emit(GameEvent::Cue(match action {
            Action::Correct => Cue::Correct,
            Action::Skip => Cue::Skip,
        }));
        if let Some(next) = round.session.current_word() {
            self.emit(GameEvent::Word(next.to_string()));
        }
        true
    }

    /// Feeds one accelerometer sample through the active round's detector.
    /// Outside an active round samples are ignored.
    pub fn on_motion(&mut self, sample: MotionSample) -> Option<Action> {
        self.advance(sample.at);

        let action = match &mut self.phase {
            Phase::Active(round) => round.tilt.on_sample(&sample),
            _ => None,
        }?;

        self.dispatch(action, sample.at).then_some(action)
    }

    /// Leaves the results screen and forgets the finished round.
    pub fn return_to_menu(&mut self) -> bool {
        if !matches!(self.phase, Phase::Ended(_)) {
            return false;
        }

        log::info!("back to menu");
        self.phase = Phase::Idle;
        self.emit(GameEvent::Show(ScreenId::Menu));
        true
    }
}
