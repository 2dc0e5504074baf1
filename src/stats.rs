use std::time::{Duration, Instant};

/// Shot counters and survival time for the current run.
#[derive(Clone, Debug)]
pub struct PlayerStatsTracker {
    start_time: Instant,
    shots_fired: u32,
    shots_hit: u32,
}

impl PlayerStatsTracker {
    pub fn new() -> Self {
        Self::with_start_time(Instant::now())
    }

    pub fn with_start_time(start_time: Instant) -> Self {
        PlayerStatsTracker { start_time, shots_fired: 0, shots_hit: 0 }
    }

    pub fn record_shot_fired(&mut self) {
        self.shots_fired += 1;
    }

    pub fn record_shot_hit(&mut self) {
        self.shots_hit += 1;
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    pub fn shots_hit(&self) -> u32 {
        self.shots_hit
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed().as_secs()
    }

    /// Hits over shots fired, or 0 before the first shot.
    pub fn accuracy(&self) -> f64 {
        if self.shots_fired == 0 {
            return 0.0;
        }
        self.shots_hit as f64 / self.shots_fired as f64
    }
}

impl Default for PlayerStatsTracker {
    fn default() -> Self {
        PlayerStatsTracker::new()
    }
}
