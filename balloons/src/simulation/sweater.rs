//! The sweater: a fixed grid of neutral charge pairs whose minus charges can be
//! rubbed off onto a balloon.
//!
//! Sweater charges never move on screen. Transferring a charge only flips its
//! `moved` flag; the sweater's `net_charge` counts how many have left.

use tracing::debug;

use crate::simulation::balloon::Balloon;
use crate::simulation::params::MAX_BALLOON_CHARGE;
use crate::simulation::states::{NVec2, PointCharge, Rect, POINT_CHARGE_RADIUS};

pub const SWEATER_X: f64 = 0.0;
pub const SWEATER_Y: f64 = -50.0;
pub const SWEATER_WIDTH: f64 = 340.0;
pub const SWEATER_HEIGHT: f64 = 600.0;

/// Charge pairs on the sweater. Matches the balloon's maximum charge so a
/// balloon can strip the sweater bare.
pub const SWEATER_CHARGE_COUNT: usize = MAX_BALLOON_CHARGE as usize;

// staggered 19 x 3 grid over the sweater body, relative to the sweater corner
const GRID_ROWS: usize = 19;
const GRID_COLUMNS: [f64; 3] = [95.0, 165.0, 235.0];
const GRID_STAGGER: f64 = -35.0;
const GRID_TOP: f64 = 90.0;
const GRID_ROW_SPACING: f64 = 24.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Sweater {
    bounds: Rect,
    plus_charges: Vec<PointCharge>,
    minus_charges: Vec<PointCharge>,
    net_charge: i32, // number of minus charges given away
}

impl Sweater {
    /// Sweater at `bounds` with the standard 57-pair layout
    pub fn new(bounds: Rect) -> Self {
        let mut positions = Vec::with_capacity(SWEATER_CHARGE_COUNT);
        for row in 0..GRID_ROWS {
            let y = bounds.min.y + GRID_TOP + row as f64 * GRID_ROW_SPACING;
            let stagger = if row % 2 == 1 { GRID_STAGGER } else { 0.0 };
            for column in GRID_COLUMNS {
                positions.push(NVec2::new(bounds.min.x + column + stagger, y));
            }
        }
        Self::with_charge_positions(bounds, positions)
    }

    /// Sweater with one neutral pair per entry of `plus_positions`. Each minus
    /// charge sits one radius down and to the right of its plus partner.
    pub fn with_charge_positions(bounds: Rect, plus_positions: Vec<NVec2>) -> Self {
        let offset = NVec2::new(POINT_CHARGE_RADIUS, POINT_CHARGE_RADIUS);
        let minus_charges = plus_positions.iter().map(|p| PointCharge::new(*p + offset)).collect();
        let plus_charges = plus_positions.into_iter().map(PointCharge::new).collect();

        Self {
            bounds,
            plus_charges,
            minus_charges,
            net_charge: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn center(&self) -> NVec2 {
        self.bounds.center()
    }

    pub fn net_charge(&self) -> i32 {
        self.net_charge
    }

    pub fn plus_charges(&self) -> &[PointCharge] {
        &self.plus_charges
    }

    pub fn minus_charges(&self) -> &[PointCharge] {
        &self.minus_charges
    }

    pub fn moved_count(&self) -> usize {
        self.minus_charges.iter().filter(|c| c.moved).count()
    }

    /// Transfer the first unmoved minus charge inside the balloon's activation
    /// rectangle. At most one charge per call, so rubbing strips the sweater
    /// one charge at a time. Returns whether a charge moved.
    pub fn find_intersection(&mut self, balloon: &mut Balloon) -> bool {
        if balloon.charge() <= -MAX_BALLOON_CHARGE {
            return false;
        }

        let area = balloon.activation_rect();
        let found = self
            .minus_charges
            .iter()
            .position(|c| !c.moved && area.contains_strict(&c.position));

        match found {
            Some(index) => {
                self.transfer_charge_to(index, balloon);
                true
            }
            None => false,
        }
    }

    /// Move minus charge `index` onto `balloon`
    pub fn transfer_charge_to(&mut self, index: usize, balloon: &mut Balloon) {
        let charge = &mut self.minus_charges[index];
        debug_assert!(!charge.moved, "sweater charge {index} transferred twice");

        charge.moved = true;
        balloon.add_charge(-1);
        self.net_charge += 1;

        debug!(
            balloon = ?balloon.id(),
            index,
            balloon_charge = balloon.charge(),
            sweater_charge = self.net_charge,
            "charge rubbed off the sweater"
        );
    }

    pub fn reset(&mut self) {
        for c in self.plus_charges.iter_mut().chain(self.minus_charges.iter_mut()) {
            c.reset();
        }
        self.net_charge = 0;
    }
}

impl Default for Sweater {
    fn default() -> Self {
        Self::new(Rect::new(SWEATER_X, SWEATER_Y, SWEATER_WIDTH, SWEATER_HEIGHT))
    }
}
