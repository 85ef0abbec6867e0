//! Balloon state and its per-step motion.
//!
//! A balloon is either owned by the input layer (`is_dragged`) or by the
//! physics (free drift). While dragged it never integrates and its velocity
//! stays zero. A charged balloon that drifts flush against the visible wall
//! sticks there (`is_stopped`) until something frees it: a drag, a wall
//! toggle, or a reset.

use std::f64::consts::PI;

use tracing::debug;

use crate::simulation::integrator::{clamp_to_rect, euler_integrator, stop_at_edges};
use crate::simulation::params::MAX_BALLOON_CHARGE;
use crate::simulation::play_area::BalloonDirection;
use crate::simulation::states::{BalloonId, NVec2, Rect};
use crate::simulation::wall::Wall;

pub const BALLOON_WIDTH: f64 = 134.0;
pub const BALLOON_HEIGHT: f64 = 222.0;

/// Pickup area relative to the balloon's top-left corner. Only the left side
/// of the balloon rubs the sweater.
pub const ACTIVATION_LEFT: f64 = -5.0;
pub const ACTIVATION_RIGHT: f64 = 50.0;
pub const ACTIVATION_MARGIN_Y: f64 = 10.0;

pub const YELLOW_DEFAULT_POSITION: [f64; 2] = [440.0, 100.0];
pub const GREEN_DEFAULT_POSITION: [f64; 2] = [380.0, 130.0];

// neutral plus/minus pairs drawn on an uncharged balloon, relative to its corner
const NEUTRAL_PAIRS: [[f64; 2]; 8] = [
    [44.0, 50.0],
    [88.0, 50.0],
    [30.0, 95.0],
    [100.0, 95.0],
    [44.0, 140.0],
    [88.0, 140.0],
    [67.0, 175.0],
    [67.0, 25.0],
];
const NEUTRAL_PAIR_OFFSET: f64 = 10.0;

// excess charges fill a sunflower pattern inside the balloon body
const BODY_CENTER: [f64; 2] = [67.0, 100.0];
const BODY_RADII: [f64; 2] = [52.0, 84.0];

#[derive(Debug, Clone, PartialEq)]
pub struct Balloon {
    id: BalloonId,
    pub(crate) position: NVec2, // top-left corner
    pub(crate) velocity: NVec2, // px per frame
    pub(crate) charge: i32, // 0 ..= -MAX_BALLOON_CHARGE
    pub(crate) is_dragged: bool,
    pub(crate) is_visible: bool,
    pub(crate) is_stopped: bool,
    pub(crate) direction: Option<BalloonDirection>, // last drag direction
    pub(crate) last_step_position: NVec2, // where the previous step left it
    default_position: NVec2,
    default_visible: bool,
}

impl Balloon {
    pub fn new(id: BalloonId, default_position: NVec2, default_visible: bool) -> Self {
        Self {
            id,
            position: default_position,
            velocity: NVec2::zeros(),
            charge: 0,
            is_dragged: false,
            is_visible: default_visible,
            is_stopped: false,
            direction: None,
            last_step_position: default_position,
            default_position,
            default_visible,
        }
    }

    /// The yellow balloon starts visible, the green one hidden
    pub fn with_defaults(id: BalloonId) -> Self {
        match id {
            BalloonId::Yellow => Self::new(id, YELLOW_DEFAULT_POSITION.into(), true),
            BalloonId::Green => Self::new(id, GREEN_DEFAULT_POSITION.into(), false),
        }
    }

    pub fn id(&self) -> BalloonId {
        self.id
    }

    pub fn position(&self) -> NVec2 {
        self.position
    }

    pub fn velocity(&self) -> NVec2 {
        self.velocity
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn is_dragged(&self) -> bool {
        self.is_dragged
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn is_stopped(&self) -> bool {
        self.is_stopped
    }

    pub fn direction(&self) -> Option<BalloonDirection> {
        self.direction
    }

    pub fn default_position(&self) -> NVec2 {
        self.default_position
    }

    pub fn width(&self) -> f64 {
        BALLOON_WIDTH
    }

    pub fn height(&self) -> f64 {
        BALLOON_HEIGHT
    }

    pub fn center(&self) -> NVec2 {
        self.position + NVec2::new(BALLOON_WIDTH / 2.0, BALLOON_HEIGHT / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, BALLOON_WIDTH, BALLOON_HEIGHT)
    }

    /// Area whose sweater charges this balloon picks up when rubbed
    pub fn activation_rect(&self) -> Rect {
        Rect {
            min: self.position + NVec2::new(ACTIVATION_LEFT, -ACTIVATION_MARGIN_Y),
            max: self.position + NVec2::new(ACTIVATION_RIGHT, BALLOON_HEIGHT + ACTIVATION_MARGIN_Y),
        }
    }

    /// Right edge flush with a wall standing at `wall_x`
    pub fn touching_wall(&self, wall_x: f64) -> bool {
        (self.position.x + BALLOON_WIDTH - wall_x).abs() < 1e-6
    }

    /// Hand the balloon to (or take it back from) the input layer. Either way
    /// it starts from rest, and grabbing unsticks it from the wall.
    pub fn set_dragged(&mut self, dragged: bool) {
        if dragged {
            self.is_stopped = false;
        }
        self.is_dragged = dragged;
        self.velocity = NVec2::zeros();
    }

    /// Place the balloon without any bounds check; callers go through
    /// `SimulationModel::set_balloon_position` to stay inside the play area
    pub(crate) fn set_position(&mut self, position: NVec2) {
        self.position = position;
    }

    pub(crate) fn add_charge(&mut self, delta: i32) {
        self.charge += delta;
        debug_assert!(
            (-MAX_BALLOON_CHARGE..=0).contains(&self.charge),
            "balloon charge {} out of range",
            self.charge
        );
    }

    /// Integrate one step of `dt` frames under `force` and restrict the result
    /// to `bounds`. Does nothing while dragged or stopped.
    pub fn step(&mut self, force: NVec2, dt: f64, bounds: &Rect, wall: &Wall) {
        if self.is_dragged || self.is_stopped {
            return;
        }

        let mut position = self.position;
        let mut velocity = self.velocity;
        euler_integrator(&mut position, &mut velocity, force, dt);

        let clamped = clamp_to_rect(bounds, &mut position, BALLOON_WIDTH, BALLOON_HEIGHT);
        stop_at_edges(&mut velocity, clamped);

        self.position = position;
        self.velocity = velocity;

        if clamped.right && wall.is_visible() && self.charge < 0 && self.touching_wall(wall.x()) {
            self.is_stopped = true;
            self.velocity = NVec2::zeros();
            debug!(balloon = ?self.id, charge = self.charge, "balloon stuck to the wall");
        }

        debug_assert!(
            position.x >= bounds.min.x && position.x + BALLOON_WIDTH <= bounds.max.x + 1e-9,
            "balloon left the play area"
        );
    }

    /// Plus/minus positions of the neutral pairs, in play-area coordinates
    pub fn neutral_pairs(&self) -> impl Iterator<Item = (NVec2, NVec2)> + '_ {
        NEUTRAL_PAIRS.iter().map(move |&[x, y]| {
            let plus = self.position + NVec2::new(x, y);
            (plus, plus + NVec2::new(NEUTRAL_PAIR_OFFSET, NEUTRAL_PAIR_OFFSET))
        })
    }

    /// Positions of the excess minus charges this balloon carries, in the
    /// order they were picked up
    pub fn excess_charge_positions(&self) -> impl Iterator<Item = NVec2> + '_ {
        let count = self.charge.unsigned_abs() as usize;
        (0..count).map(move |i| self.position + excess_charge_offset(i))
    }

    pub fn reset(&mut self) {
        self.position = self.default_position;
        self.last_step_position = self.default_position;
        self.velocity = NVec2::zeros();
        self.charge = 0;
        self.is_dragged = false;
        self.is_stopped = false;
        self.is_visible = self.default_visible;
        self.direction = None;
    }
}

/// Offset of the `i`th excess charge slot from the balloon corner.
/// Golden-angle spiral scaled to the balloon body.
fn excess_charge_offset(i: usize) -> NVec2 {
    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
    let r = ((i as f64 + 0.5) / MAX_BALLOON_CHARGE as f64).sqrt();
    let theta = i as f64 * golden_angle;
    NVec2::new(
        BODY_CENTER[0] + BODY_RADII[0] * r * theta.cos(),
        BODY_CENTER[1] + BODY_RADII[1] * r * theta.sin(),
    )
}
