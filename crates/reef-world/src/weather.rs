//! Stochastic weather controller.
//!
//! The driver re-rolls the weather every eight ticks. The distribution is
//! fixed: one uniform draw in [0, 100) classified against literal
//! thresholds.

use rand::Rng;
use reef_core::WeatherKind;

/// Holds the weather condition currently in force.
#[derive(Debug, Clone)]
pub struct Weather {
    current: WeatherKind,
}

impl Default for Weather {
    fn default() -> Self {
        Self::new()
    }
}

impl Weather {
    pub fn new() -> Self {
        Self {
            current: WeatherKind::Clear,
        }
    }

    /// Re-roll the weather from one uniform draw.
    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        let roll = rng.gen_range(0..100);
        self.current = Self::classify(roll);
    }

    /// Map a draw in [0, 100) to a weather condition:
    /// 0-49 clear, 50-63 rain, 64-73 storm, 74-99 cloudy.
    pub fn classify(roll: u32) -> WeatherKind {
        if roll < 50 {
            WeatherKind::Clear
        } else if roll < 64 {
            WeatherKind::Rain
        } else if roll < 74 {
            WeatherKind::Storm
        } else {
            WeatherKind::Cloudy
        }
    }

    pub fn current(&self) -> WeatherKind {
        self.current
    }

    /// Back to the default state, used when the simulation resets.
    pub fn reset(&mut self) {
        self.current = WeatherKind::Clear;
    }
}
