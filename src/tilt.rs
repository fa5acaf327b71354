//! Tilt gesture detection from raw acceleration samples.
//!
//! A sample whose component on the tilt axis exceeds the threshold is a spike.
//! Every accepted spike opens a cooldown window during which further spikes are
//! dropped, so one physical nod registers once.

use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: f64 = 4.0;
pub const DEFAULT_COOLDOWN_MS: u64 = 1000;

/// A threshold at or below zero would turn a device at rest into a stream of
/// spikes.
pub fn is_valid_threshold(threshold: f64) -> bool {
    threshold.is_finite() && threshold > 0.0
}

/// Judgment for the word on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Action {
    Correct,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    #[default]
    Z,
}

/// Which action each spike direction produces.
///
/// `Standard` matches a device worn on the forehead with the screen facing
/// out: nodding down gives a negative spike (correct), looking up a positive
/// one (skip). Devices that report the opposite sign want `Inverted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TiltMapping {
    #[default]
    Standard,
    Inverted,
}

impl TiltMapping {
    pub fn on_positive(self) -> Action {
        match self {
            TiltMapping::Standard => Action::Skip,
            TiltMapping::Inverted => Action::Correct,
        }
    }

    pub fn on_negative(self) -> Action {
        match self {
            TiltMapping::Standard => Action::Correct,
            TiltMapping::Inverted => Action::Skip,
        }
    }
}

/// One accelerometer reading in m/s², stamped with app time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub at: Duration,
}

impl MotionSample {
    pub fn new(x: f64, y: f64, z: f64, at: Duration) -> Self {
        Self { x, y, z, at }
    }

    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltConfig {
    pub threshold: f64,
    pub cooldown: Duration,
    pub axis: Axis,
    pub mapping: TiltMapping,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            cooldown: Duration::from_millis(DEFAULT_COOLDOWN_MS),
            axis: Axis::Z,
            mapping: TiltMapping::Standard,
        }
    }
}

/// Debounced spike detector. The cooldown is a single-shot deadline owned by
/// the detector, so it goes away with the round that owns the detector.
#[derive(Debug, Clone)]
pub struct TiltDetector {
    config: TiltConfig,
    cooldown_until: Option<Duration>,
}

impl TiltDetector {
    pub fn new(config: TiltConfig) -> Self {
        Self {
            config,
            cooldown_until: None,
        }
    }

    pub fn is_cooling_down(&self, now: Duration) -> bool {
        matches!(self.cooldown_until, Some(until) if now < until)
    }

    pub fn on_sample(&mut self, sample: &MotionSample) -> Option<Action> {
        if self.is_cooling_down(sample.at) {
            return None;
        }

        let value = sample.component(self.config.axis);
        let action = if value > self.config.threshold {
            self.config.mapping.on_positive()
        } else if value < -self.config.threshold {
            self.config.mapping.on_negative()
        } else {
            return None;
        };

        self.cooldown_until = Some(sample.at + self.config.cooldown);
        log::debug!(
            "tilt spike {:.1} on {:?} -> {}",
            value,
            self.config.axis,
            action
        );

        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z_at(z: f64, ms: u64) -> MotionSample {
        MotionSample::new(0.0, 0.0, z, Duration::from_millis(ms))
    }

    #[test]
    fn test_negative_spike_is_correct() {
        let mut detector = TiltDetector::new(TiltConfig::default());
        assert_eq!(detector.on_sample(&z_at(-5.0, 0)), Some(Action::Correct));
    }

    #[test]
    fn test_positive_spike_is_skip() {
        let mut detector = TiltDetector::new(TiltConfig::default());
        assert_eq!(detector.on_sample(&z_at(5.0, 0)), Some(Action::Skip));
    }

    #[test]
    fn test_below_threshold_is_ignored() {
        let mut detector = TiltDetector::new(TiltConfig::default());
        assert_eq!(detector.on_sample(&z_at(3.9, 0)), None);
        assert_eq!(detector.on_sample(&z_at(-4.0, 10)), None);
        assert_eq!(detector.on_sample(&z_at(4.0, 20)), None);
        // A quiet sample never opens the cooldown window
        assert!(!detector.is_cooling_down(Duration::from_millis(21)));
    }

    #[test]
    fn test_cooldown_swallows_second_spike() {
        let mut detector = TiltDetector::new(TiltConfig::default());
        assert_eq!(detector.on_sample(&z_at(-5.0, 0)), Some(Action::Correct));
        assert_eq!(detector.on_sample(&z_at(-5.0, 200)), None);
        assert_eq!(detector.on_sample(&z_at(-5.0, 1100)), Some(Action::Correct));
    }

    #[test]
    fn test_cooldown_ends_exactly_at_window() {
        let mut detector = TiltDetector::new(TiltConfig::default());
        detector.on_sample(&z_at(5.0, 0));
        assert!(detector.is_cooling_down(Duration::from_millis(999)));
        assert!(!detector.is_cooling_down(Duration::from_millis(1000)));
    }

    #[test]
    fn test_opposite_spike_during_cooldown_is_ignored() {
        let mut detector = TiltDetector::new(TiltConfig::default());
        assert_eq!(detector.on_sample(&z_at(-6.0, 0)), Some(Action::Correct));
        // The rebound of the same nod comes with the opposite sign
        assert_eq!(detector.on_sample(&z_at(6.0, 150)), None);
    }

    #[test]
    fn test_threshold_validity() {
        assert!(is_valid_threshold(DEFAULT_THRESHOLD));
        assert!(is_valid_threshold(0.1));
        assert!(!is_valid_threshold(0.0));
        assert!(!is_valid_threshold(-1.0));
        assert!(!is_valid_threshold(f64::NAN));
        assert!(!is_valid_threshold(f64::INFINITY));
    }

    #[test]
    fn test_inverted_mapping() {
        let config = TiltConfig {
            mapping: TiltMapping::Inverted,
            ..TiltConfig::default()
        };
        let mut detector = TiltDetector::new(config);
        assert_eq!(detector.on_sample(&z_at(5.0, 0)), Some(Action::Correct));
        assert_eq!(detector.on_sample(&z_at(-5.0, 5000)), Some(Action::Skip));
    }

    #[test]
    fn test_configured_axis() {
        let config = TiltConfig {
            axis: Axis::Y,
            ..TiltConfig::default()
        };
        let mut detector = TiltDetector::new(config);
        // Large z is irrelevant when watching y
        let sample = MotionSample::new(0.0, -4.5, 9.0, Duration::ZERO);
        assert_eq!(detector.on_sample(&sample), Some(Action::Correct));
    }

    #[test]
    fn test_nan_sample_is_ignored() {
        let mut detector = TiltDetector::new(TiltConfig::default());
        assert_eq!(detector.on_sample(&z_at(f64::NAN, 0)), None);
    }

    #[test]
    fn test_custom_threshold_and_cooldown() {
        let config = TiltConfig {
            threshold: 2.0,
            cooldown: Duration::from_millis(300),
            ..TiltConfig::default()
        };
        let mut detector = TiltDetector::new(config);
        assert_eq!(detector.on_sample(&z_at(-2.5, 0)), Some(Action::Correct));
        assert_eq!(detector.on_sample(&z_at(-2.5, 299)), None);
        assert_eq!(detector.on_sample(&z_at(2.5, 300)), Some(Action::Skip));
    }
}
