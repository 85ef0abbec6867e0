//! Force contributors acting on a balloon
//!
//! Defines the point-charge force law and the three terms summed into a
//! balloon's net force: sweater attraction, induced wall attraction and
//! balloon-balloon repulsion

use crate::simulation::model::SimulationModel;
use crate::simulation::states::{BalloonId, NVec2};

/// Force on a charge at `p1` from a charge at `p2`, with `kqq = k q1 q2`.
///
/// Magnitude is `kqq / r^power` along `p1 - p2`, so a positive `kqq` (like
/// charges) pushes `p1` away from `p2`. Coincident points give zero.
pub fn coulomb_force(p1: NVec2, p2: NVec2, kqq: f64, power: f64) -> NVec2 {
    let diff = p1 - p2;
    let r = diff.norm();
    if r == 0.0 {
        return NVec2::zeros();
    }
    let magnitude = kqq / r.powf(power);
    diff * (magnitude / r)
}

/// Trait for force sources acting on one balloon of a [`SimulationModel`]
pub trait BalloonForce {
    fn force(&self, id: BalloonId, model: &SimulationModel) -> NVec2;

    /// When a term dominates, the other terms are ignored for this balloon
    fn dominates(&self, _id: BalloonId, _model: &SimulationModel) -> bool {
        false
    }
}

/// Collection of balloon force terms.
/// Contributions are summed and the total is capped at `max_force`
pub struct ForceSet {
    terms: Vec<Box<dyn BalloonForce + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: BalloonForce + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Net force on balloon `id`
    pub fn net_force(&self, id: BalloonId, model: &SimulationModel) -> NVec2 {
        let total = match self.terms.iter().find(|t| t.dominates(id, model)) {
            Some(term) => term.force(id, model),
            None => self.terms.iter().fold(NVec2::zeros(), |acc, t| acc + t.force(id, model)),
        };

        let max_force = model.parameters().max_force;
        let magnitude = total.norm();
        if magnitude > max_force {
            total * (max_force / magnitude)
        } else {
            total
        }
    }
}

impl Default for ForceSet {
    /// Sweater, wall and other-balloon terms
    fn default() -> Self {
        Self::new()
            .with(SweaterAttraction)
            .with(WallAttraction)
            .with(BalloonRepulsion)
    }
}

/// Pull from the sweater's aggregate charge, located at the sweater center.
/// The sweater is positive once it has given charge away and the balloon is
/// negative, so the product is negative and the force points at the sweater
pub struct SweaterAttraction;

impl BalloonForce for SweaterAttraction {
    fn force(&self, id: BalloonId, model: &SimulationModel) -> NVec2 {
        let balloon = model.balloon(id);
        if balloon.is_dragged() {
            return NVec2::zeros();
        }
        let params = model.parameters();
        let sweater = model.sweater();
        let kqq = params.force_constant * sweater.net_charge() as f64 * balloon.charge() as f64;
        coulomb_force(balloon.center(), sweater.center(), kqq, params.balloon_force_exponent)
    }
}

/// Attraction to the charge a balloon induces in the wall.
///
/// Only active once the balloon carries more than `wall_attraction_min_charge`
/// and its right edge is within `Parameters::wall_attraction_gap` of a visible
/// wall. Inside that range the wall dominates.
pub struct WallAttraction;

impl WallAttraction {
    fn active(id: BalloonId, model: &SimulationModel) -> bool {
        let balloon = model.balloon(id);
        let params = model.parameters();
        if !model.wall().is_visible() || balloon.charge() >= -params.wall_attraction_min_charge {
            return false;
        }
        let gap = model.wall().x() - (balloon.position().x + balloon.width());
        gap <= params.wall_attraction_gap(balloon.charge())
    }
}

impl BalloonForce for WallAttraction {
    fn force(&self, id: BalloonId, model: &SimulationModel) -> NVec2 {
        if !Self::active(id, model) {
            return NVec2::zeros();
        }
        let params = model.parameters();
        let charge = model.balloon(id).charge().unsigned_abs() as f64;
        NVec2::new(params.wall_attraction_strength * charge / params.wall_attraction_divisor, 0.0)
    }

    fn dominates(&self, id: BalloonId, model: &SimulationModel) -> bool {
        Self::active(id, model)
    }
}

/// Like-charge repulsion between the two balloons.
/// Zero if either balloon is hidden or this one is being dragged
pub struct BalloonRepulsion;

impl BalloonForce for BalloonRepulsion {
    fn force(&self, id: BalloonId, model: &SimulationModel) -> NVec2 {
        let balloon = model.balloon(id);
        let other = model.balloon(id.other());
        if balloon.is_dragged() || !balloon.is_visible() || !other.is_visible() {
            return NVec2::zeros();
        }
        let params = model.parameters();
        let kqq = params.force_constant * balloon.charge() as f64 * other.charge() as f64;
        coulomb_force(balloon.center(), other.center(), kqq, params.balloon_force_exponent)
    }
}
