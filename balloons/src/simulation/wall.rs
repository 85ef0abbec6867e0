//! The wall: a neutral slab on the right of the play area.
//!
//! Plus charges are fixed. Minus charges are pushed away from nearby charged
//! balloons, which is how the view shows induced charge.

use crate::simulation::balloon::Balloon;
use crate::simulation::forces::coulomb_force;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, PointCharge, Rect, POINT_CHARGE_MAGNITUDE, POINT_CHARGE_RADIUS};

// 3 x 18 grid of charge pairs, relative to the wall's top-left corner
const GRID_COLUMNS: usize = 3;
const GRID_ROWS: usize = 18;
const GRID_LEFT: f64 = 16.0;
const GRID_COLUMN_SPACING: f64 = 24.0;
const GRID_MARGIN_Y: f64 = 14.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    bounds: Rect,
    plus_charges: Vec<PointCharge>,
    minus_charges: Vec<PointCharge>,
    pub(crate) is_visible: bool,
    default_visible: bool,
}

impl Wall {
    /// Wall occupying `[x, x + width] x [0, height]`
    pub fn new(x: f64, width: f64, height: f64) -> Self {
        let bounds = Rect::new(x, 0.0, width, height);
        let dy = (height - 2.0 * GRID_MARGIN_Y) / (GRID_ROWS - 1) as f64;

        let mut plus_charges = Vec::with_capacity(GRID_COLUMNS * GRID_ROWS);
        let mut minus_charges = Vec::with_capacity(GRID_COLUMNS * GRID_ROWS);
        for i in 0..GRID_COLUMNS {
            for k in 0..GRID_ROWS {
                let p = NVec2::new(
                    x + GRID_LEFT + i as f64 * GRID_COLUMN_SPACING,
                    GRID_MARGIN_Y + k as f64 * dy,
                );
                plus_charges.push(PointCharge::new(p));
                minus_charges.push(PointCharge::new(p + NVec2::new(-POINT_CHARGE_RADIUS, POINT_CHARGE_RADIUS)));
            }
        }

        Self {
            bounds,
            plus_charges,
            minus_charges,
            is_visible: true,
            default_visible: true,
        }
    }

    /// Same wall, starting (and resetting to) `visible`
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self.default_visible = visible;
        self
    }

    pub fn x(&self) -> f64 {
        self.bounds.min.x
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn plus_charges(&self) -> &[PointCharge] {
        &self.plus_charges
    }

    pub fn minus_charges(&self) -> &[PointCharge] {
        &self.minus_charges
    }

    /// Displace every minus charge away from the visible balloons.
    ///
    /// Each balloon pushes a charge by `k q_point q_balloon / r^p` measured
    /// from the charge's default position, so displacements never accumulate
    /// across steps. A hidden wall keeps its charges at rest.
    pub fn step(&mut self, balloons: &[Balloon], params: &Parameters) {
        if !self.is_visible {
            for c in &mut self.minus_charges {
                c.reset();
            }
            return;
        }

        for c in &mut self.minus_charges {
            let origin = c.default_position();
            let mut displacement = NVec2::zeros();
            for b in balloons.iter().filter(|b| b.is_visible()) {
                let kqq = params.force_constant * POINT_CHARGE_MAGNITUDE * b.charge() as f64;
                displacement += coulomb_force(origin, b.center(), kqq, params.wall_force_exponent);
            }
            c.position = origin + displacement;
        }
    }

    pub fn reset(&mut self) {
        for c in &mut self.minus_charges {
            c.reset();
        }
        self.is_visible = self.default_visible;
    }
}
