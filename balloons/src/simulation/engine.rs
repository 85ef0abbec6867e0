//! Headless run settings
//!
//! How long a scenario runs, how big each step is and how often the
//! runner reports progress

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub dt_ms: f64, // wall-clock milliseconds per step
    pub steps: usize, // number of steps to run
    pub log_every: usize, // progress report period in steps, 0 = never
}

impl Engine {
    /// Whether the runner should report after finishing `step` (0-based)
    pub fn should_log(&self, step: usize) -> bool {
        self.log_every != 0 && (step + 1) % self.log_every == 0
    }

    /// Simulated time covered by the whole run, in milliseconds
    pub fn duration_ms(&self) -> f64 {
        self.dt_ms * self.steps as f64
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            dt_ms: crate::simulation::params::FRAME_MS,
            steps: 600,
            log_every: 60,
        }
    }
}
