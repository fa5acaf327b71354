use std::io::Write;
use std::time::Duration;

#[cfg(feature = "audio")]
mod audio;

#[cfg(feature = "audio")]
pub use audio::ToneCues;

/// One-shot audio cues. Playback is fire-and-forget and never blocks the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Cue {
    CountdownTick,
    Warning,
    Correct,
    Skip,
    GameOver,
}

impl Cue {
    pub const ALL: [Cue; 5] = [
        Cue::CountdownTick,
        Cue::Warning,
        Cue::Correct,
        Cue::Skip,
        Cue::GameOver,
    ];
}

pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCues;

impl CueSink for SilentCues {
    fn play(&mut self, _cue: Cue) {}
}

/// A short sine beep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    pub duration: Duration,
}

pub fn tone_for(cue: Cue) -> Tone {
    let (freq_hz, ms) = match cue {
        Cue::CountdownTick => (660.0, 120),
        Cue::Warning => (880.0, 400),
        Cue::Correct => (1046.5, 160),
        Cue::Skip => (311.1, 220),
        Cue::GameOver => (220.0, 800),
    };
    Tone {
        freq_hz,
        duration: Duration::from_millis(ms),
    }
}

impl Tone {
    /// Mono samples in [-1, 1] with a linear fade at both ends so the beep
    /// doesn't click.
    pub fn samples(&self, sample_rate: u32) -> Vec<f32> {
        let len = (self.duration.as_secs_f64() * sample_rate as f64).round() as usize;
        let fade = (len / 10).max(1);
        (0..len)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                let envelope = (i.min(len - 1 - i) as f32 / fade as f32).min(1.0);
                0.5 * envelope * (std::f32::consts::TAU * self.freq_hz * t).sin()
            })
            .collect()
    }
}

/// Terminal bell fallback. Each cue rings a different number of times so a
/// player who can't see the screen still hears which judgment registered.
pub struct BellCues<W: Write> {
    out: W,
}

impl<W: Write> BellCues<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn bells_for(cue: Cue) -> usize {
        match cue {
            Cue::CountdownTick | Cue::Correct => 1,
            Cue::Skip | Cue::Warning => 2,
            Cue::GameOver => 3,
        }
    }
}

impl<W: Write> CueSink for BellCues<W> {
    fn play(&mut self, cue: Cue) {
        let bells = vec![0x07u8; Self::bells_for(cue)];
        if let Err(e) = self.out.write_all(&bells).and_then(|_| self.out.flush()) {
            log::debug!("bell for {cue} failed: {e}");
        }
    }
}
