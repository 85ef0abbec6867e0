//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the tuned runtime constants:
//! - the shared force constant and the two force-law exponents,
//! - the per-step force cap,
//! - the wall's induced-charge attraction rule,
//! - frame length and the elapsed-time cap used by the integrator
//!
//! The constants are empirical, tuned against what the charges look like on
//! screen rather than against physical units.

/// Largest number of charges a balloon can pick up from the sweater
pub const MAX_BALLOON_CHARGE: i32 = 57;

pub const FORCE_CONSTANT: f64 = 10000.0;
pub const WALL_FORCE_EXPONENT: f64 = 2.35;
pub const BALLOON_FORCE_EXPONENT: f64 = 2.0;
pub const MAX_FORCE: f64 = 2.0;

pub const WALL_ATTRACTION_MIN_CHARGE: i32 = 5;
pub const WALL_ATTRACTION_RANGE: f64 = 40.0;
pub const WALL_ATTRACTION_FALLOFF: f64 = 8.0;
pub const WALL_ATTRACTION_STRENGTH: f64 = 0.003;
pub const WALL_ATTRACTION_DIVISOR: f64 = 20.0;

pub const FRAME_MS: f64 = 1000.0 / 60.0;
pub const MAX_DT_MS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub force_constant: f64, // k in F = k q1 q2 / r^p
    pub wall_force_exponent: f64, // p for balloon -> wall charge displacement
    pub balloon_force_exponent: f64, // p for sweater and balloon-balloon forces
    pub max_force: f64, // cap on the summed force per step
    pub wall_attraction_min_charge: i32, // |charge| a balloon needs before the wall pulls it
    pub wall_attraction_range: f64, // base gap (px) within which the wall pulls
    pub wall_attraction_falloff: f64, // extra range is |charge| / falloff
    pub wall_attraction_strength: f64,
    pub wall_attraction_divisor: f64,
    pub frame_ms: f64, // one integration time unit in milliseconds
    pub max_dt_ms: f64, // elapsed-time cap, guards against long pauses
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            force_constant: FORCE_CONSTANT,
            wall_force_exponent: WALL_FORCE_EXPONENT,
            balloon_force_exponent: BALLOON_FORCE_EXPONENT,
            max_force: MAX_FORCE,
            wall_attraction_min_charge: WALL_ATTRACTION_MIN_CHARGE,
            wall_attraction_range: WALL_ATTRACTION_RANGE,
            wall_attraction_falloff: WALL_ATTRACTION_FALLOFF,
            wall_attraction_strength: WALL_ATTRACTION_STRENGTH,
            wall_attraction_divisor: WALL_ATTRACTION_DIVISOR,
            frame_ms: FRAME_MS,
            max_dt_ms: MAX_DT_MS,
        }
    }
}

impl Parameters {
    /// Convert elapsed milliseconds into capped frame units
    pub fn frames(&self, dt_ms: f64) -> f64 {
        dt_ms.clamp(0.0, self.max_dt_ms) / self.frame_ms
    }

    /// Gap between a balloon's right edge and the wall inside which the wall's
    /// induced charge takes over, for a balloon carrying `charge`
    pub fn wall_attraction_gap(&self, charge: i32) -> f64 {
        self.wall_attraction_range + (charge.unsigned_abs() as f64) / self.wall_attraction_falloff
    }
}
