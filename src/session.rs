use std::time::Duration;

use crate::tilt::Action;

pub const DEFAULT_GAME_DURATION_SECS: u32 = 60;
pub const WARNING_AT_SECS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub game_duration_secs: u32,
    pub warning_at_secs: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_duration_secs: DEFAULT_GAME_DURATION_SECS,
            warning_at_secs: WARNING_AT_SECS,
        }
    }
}

/// One play-through: the shuffled words, how far through them the player got,
/// and how each passed word was judged.
///
/// Every word before `index` sits in exactly one of `correct` or `skipped`.
#[derive(Debug, Clone)]
pub struct Session {
    words: Vec<String>,
    index: usize,
    correct: Vec<String>,
    skipped: Vec<String>,
    time_remaining: u32,
    warning_at: u32,
    warned: bool,
    started_at: Duration,
}

impl Session {
    pub fn new(words: Vec<String>, config: &SessionConfig, started_at: Duration) -> Self {
        Self {
            words,
            index: 0,
            correct: Vec::new(),
            skipped: Vec::new(),
            time_remaining: config.game_duration_secs,
            warning_at: config.warning_at_secs,
            warned: false,
            started_at,
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn correct(&self) -> &[String] {
        &self.correct
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.index).map(String::as_str)
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.words.len()
    }

    /// Files the current word under `action` and moves on. Returns the judged
    /// word, or `None` when no word is left.
    pub fn classify(&mut self, action: Action) -> Option<&str> {
        let word = self.words.get(self.index)?.clone();
        let tally = match action {
            Action::Correct => &mut self.correct,
            Action::Skip => &mut self.skipped,
        };
        tally.push(word);
        self.index += 1;
        tally.last().map(String::as_str)
    }

    /// Counts down one second and returns what is left.
    pub fn tick(&mut self) -> u32 {
        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.time_remaining
    }

    pub fn is_out_of_time(&self) -> bool {
        self.time_remaining == 0
    }

    /// True the first time the countdown sits on the warning second.
    pub fn take_warning(&mut self) -> bool {
        if self.warned || self.time_remaining != self.warning_at {
            return false;
        }
        self.warned = true;
        true
    }

    /// Closes the session. A word still on screen counts as skipped.
    pub fn finish(mut self) -> Results {
        if self.index < self.words.len() {
            let current = self.words.swap_remove(self.index);
            self.skipped.push(current);
        }

        Results {
            correct: self.correct,
            skipped: self.skipped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Results {
    pub correct: Vec<String>,
    pub skipped: Vec<String>,
}

impl Results {
    pub fn summary(&self) -> String {
        format!(
            "{} Correct, {} Skipped",
            self.correct.len(),
            self.skipped.len()
        )
    }

    /// Correct words first, then skipped, each tagged with whether it was correct.
    pub fn entries(&self) -> impl Iterator<Item = (&str, bool)> {
        self.correct
            .iter()
            .map(|w| (w.as_str(), true))
            .chain(self.skipped.iter().map(|w| (w.as_str(), false)))
    }
}
