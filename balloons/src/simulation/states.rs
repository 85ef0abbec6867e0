//! Core state types for the balloon simulation.
//!
//! Defines the value types shared by every entity:
//! - `NVec2` positions and velocities (screen coordinates, y grows downward)
//! - `Rect` axis-aligned bounds
//! - `PointCharge` a single discrete charge carrier
//! - `BalloonId` handle into the model's two-balloon arena
//! - `ShowCharges` the charge display mode exposed to the view layer

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

pub type NVec2 = Vector2<f64>;

/// Radius of a drawn point charge
pub const POINT_CHARGE_RADIUS: f64 = 8.0;

/// Charge carried by one point charge. 57 of these on a balloon stand for the
/// same net charge as the legacy 100 sweater charges.
pub const POINT_CHARGE_MAGNITUDE: f64 = -100.0 / 57.0;

/// Axis-aligned rectangle, `min` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: NVec2, // top-left
    pub max: NVec2, // bottom-right
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: NVec2::new(x, y),
            max: NVec2::new(x + width, y + height),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> NVec2 {
        (self.min + self.max) * 0.5
    }

    /// Edges included
    pub fn contains(&self, p: &NVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Edges excluded
    pub fn contains_strict(&self, p: &NVec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Grow (or shrink, for negative `margin`) every edge by `margin`
    pub fn dilated(&self, margin: f64) -> Rect {
        Rect {
            min: self.min - NVec2::new(margin, margin),
            max: self.max + NVec2::new(margin, margin),
        }
    }
}

/// A single discrete charge carrier.
///
/// `default_position` is fixed at construction. `position` only ever differs
/// from it for wall minus charges, which are pushed around by nearby balloons.
/// `moved` is only used by sweater minus charges and marks a charge that has
/// been rubbed off onto a balloon.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCharge {
    default_position: NVec2,
    pub(crate) position: NVec2,
    pub(crate) moved: bool,
}

impl PointCharge {
    pub fn new(position: NVec2) -> Self {
        Self {
            default_position: position,
            position,
            moved: false,
        }
    }

    pub fn default_position(&self) -> NVec2 {
        self.default_position
    }

    pub fn position(&self) -> NVec2 {
        self.position
    }

    pub fn moved(&self) -> bool {
        self.moved
    }

    pub fn reset(&mut self) {
        self.position = self.default_position;
        self.moved = false;
    }
}

/// Which balloon; doubles as the index into `SimulationModel::balloons`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalloonId {
    Yellow,
    Green,
}

impl BalloonId {
    pub const ALL: [BalloonId; 2] = [BalloonId::Yellow, BalloonId::Green];

    pub fn index(self) -> usize {
        match self {
            BalloonId::Yellow => 0,
            BalloonId::Green => 1,
        }
    }

    pub fn other(self) -> BalloonId {
        match self {
            BalloonId::Yellow => BalloonId::Green,
            BalloonId::Green => BalloonId::Yellow,
        }
    }
}

/// Which charges the view should draw. Has no effect on the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowCharges {
    #[default]
    All,  // neutral pairs and excess charge
    None, // nothing
    Diff, // only the excess (transferred) charge
}

impl ShowCharges {
    pub fn shows_neutral_pairs(self) -> bool {
        self == ShowCharges::All
    }

    pub fn shows_excess_charge(self) -> bool {
        self != ShowCharges::None
    }
}
