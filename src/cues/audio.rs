//! Synthesized beeps played through the default output device.

use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;

use kira::sound::static_sound::{StaticSoundData, StaticSoundSettings};
use kira::{AudioManager, AudioManagerSettings, DefaultBackend, Frame};

use super::{tone_for, Cue, CueSink};

const SAMPLE_RATE: u32 = 44_100;

pub struct ToneCues {
    manager: AudioManager<DefaultBackend>,
    sounds: HashMap<Cue, StaticSoundData>,
}

impl ToneCues {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())?;

        let sounds = Cue::ALL
            .into_iter()
            .map(|cue| (cue, sound_data(cue)))
            .collect();

        Ok(Self { manager, sounds })
    }
}

fn sound_data(cue: Cue) -> StaticSoundData {
    let frames: Arc<[Frame]> = tone_for(cue)
        .samples(SAMPLE_RATE)
        .into_iter()
        .map(Frame::from_mono)
        .collect();

    StaticSoundData {
        sample_rate: SAMPLE_RATE,
        frames,
        settings: StaticSoundSettings::default(),
        slice: None,
    }
}

impl CueSink for ToneCues {
    fn play(&mut self, cue: Cue) {
        let Some(data) = self.sounds.get(&cue) else {
            return;
        };
        if let Err(e) = self.manager.play(data.clone()) {
            log::debug!("playing {cue} failed: {e}");
        }
    }
}
