//! Step counter and day-cycle clock.

use reef_core::TimeOfDay;

/// Tracks elapsed ticks and the current phase of the day.
#[derive(Debug, Clone)]
pub struct Clock {
    step_count: u64,
    time: TimeOfDay,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            step_count: 0,
            time: TimeOfDay::Midnight,
        }
    }

    pub fn reset(&mut self) {
        self.step_count = 0;
        self.time = TimeOfDay::Midnight;
    }

    /// Advance one tick: bump the step count and move to the next phase.
    pub fn tick(&mut self) {
        self.step_count += 1;
        self.time = self.time.next();
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    pub fn time_label(&self) -> &'static str {
        self.time.label()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
