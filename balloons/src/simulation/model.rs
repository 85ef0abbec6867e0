//! The simulation model: one sweater, one wall, two balloons.
//!
//! Owns every entity in a single arena. Balloons refer to each other and to
//! the sweater and wall through `BalloonId` lookups on this struct rather than
//! through stored references. All mutation happens synchronously inside the
//! methods below; the view layer reads state back through plain getters or a
//! [`ModelSnapshot`].

use tracing::{debug, info, trace};

use crate::simulation::balloon::{Balloon, BALLOON_HEIGHT, BALLOON_WIDTH};
use crate::simulation::forces::{BalloonForce, ForceSet, SweaterAttraction};
use crate::simulation::integrator::{clamp_to_rect, stop_at_edges};
use crate::simulation::params::Parameters;
use crate::simulation::play_area::{Landmark, PlayAreaMap, Region};
use crate::simulation::states::{BalloonId, NVec2, Rect, ShowCharges};
use crate::simulation::sweater::Sweater;
use crate::simulation::wall::Wall;

pub const DEFAULT_WIDTH: f64 = 768.0;
pub const DEFAULT_HEIGHT: f64 = 504.0;
pub const DEFAULT_WALL_GAP_WIDTH: f64 = 80.0;

/// Two balloons closer than this count as side by side
pub const ADJACENT_MARGIN: f64 = 10.0;

pub struct SimulationModel {
    width: f64,
    height: f64,
    wall_gap_width: f64, // horizontal space the wall takes when visible
    show_charges: ShowCharges,
    sweater: Sweater,
    wall: Wall,
    balloons: [Balloon; 2], // indexed by BalloonId
    parameters: Parameters,
    forces: ForceSet,
    play_area_map: PlayAreaMap,
}

/// Everything the view can observe, captured at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSnapshot {
    pub balloons: [Balloon; 2],
    pub sweater: Sweater,
    pub wall: Wall,
    pub show_charges: ShowCharges,
}

impl SimulationModel {
    pub fn new(width: f64, height: f64, wall_gap_width: f64) -> Self {
        Self {
            width,
            height,
            wall_gap_width,
            show_charges: ShowCharges::default(),
            sweater: Sweater::default(),
            wall: Wall::new(width - wall_gap_width, wall_gap_width, height),
            balloons: [
                Balloon::with_defaults(BalloonId::Yellow),
                Balloon::with_defaults(BalloonId::Green),
            ],
            parameters: Parameters::default(),
            forces: ForceSet::default(),
            play_area_map: PlayAreaMap::new(width, height, wall_gap_width, BALLOON_WIDTH),
        }
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_sweater(mut self, sweater: Sweater) -> Self {
        self.sweater = sweater;
        self
    }

    pub fn with_forces(mut self, forces: ForceSet) -> Self {
        self.forces = forces;
        self
    }

    /// Start with the wall up or down. `reset` restores this choice.
    pub fn with_wall_visible(mut self, visible: bool) -> Self {
        self.wall = self.wall.with_visible(visible);
        self
    }

    /// Replace a balloon's resting state (position and visibility), e.g. from
    /// a scenario file. The new values are also what `reset` restores.
    pub fn with_balloon(mut self, id: BalloonId, default_position: NVec2, visible: bool) -> Self {
        self.balloons[id.index()] = Balloon::new(id, default_position, visible);
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn wall_gap_width(&self) -> f64 {
        self.wall_gap_width
    }

    pub fn show_charges(&self) -> ShowCharges {
        self.show_charges
    }

    pub fn sweater(&self) -> &Sweater {
        &self.sweater
    }

    pub fn wall(&self) -> &Wall {
        &self.wall
    }

    pub fn balloon(&self, id: BalloonId) -> &Balloon {
        &self.balloons[id.index()]
    }

    pub fn balloons(&self) -> &[Balloon; 2] {
        &self.balloons
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn play_area_map(&self) -> &PlayAreaMap {
        &self.play_area_map
    }

    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            balloons: self.balloons.clone(),
            sweater: self.sweater.clone(),
            wall: self.wall.clone(),
            show_charges: self.show_charges,
        }
    }

    /// Play area minus the wall gap while the wall is up
    pub fn bounds(&self) -> Rect {
        let max_x = if self.wall.is_visible() {
            self.width - self.wall_gap_width
        } else {
            self.width
        };
        Rect::new(0.0, 0.0, max_x, self.height)
    }

    /// Clamp the top-left `position` of a `width` x `height` object into the
    /// current bounds. Returns true if the position had to be corrected.
    pub fn clamp_to_bounds(&self, position: &mut NVec2, width: f64, height: f64) -> bool {
        clamp_to_rect(&self.bounds(), position, width, height).any()
    }

    /// Advance the model by `dt_ms` milliseconds.
    ///
    /// The wall reacts first, to where the balloons were at the end of the
    /// previous step. Then each visible balloon either rubs the sweater (when
    /// dragged and moved since the last step), rests (when its center is over
    /// the sweater) or drifts under its net force.
    pub fn step(&mut self, dt_ms: f64) {
        let dt = self.parameters.frames(dt_ms);

        self.wall.step(&self.balloons, &self.parameters);

        for id in BalloonId::ALL {
            let i = id.index();
            if !self.balloons[i].is_visible {
                continue;
            }

            if self.balloons[i].is_dragged {
                if self.balloons[i].position != self.balloons[i].last_step_position {
                    self.sweater.find_intersection(&mut self.balloons[i]);
                }
            } else if self.sweater.bounds().contains(&self.balloons[i].center()) {
                // a released balloon comes to rest over the sweater
                self.balloons[i].velocity = NVec2::zeros();
            } else if !self.balloons[i].is_stopped {
                let force = self.forces.net_force(id, self);
                let bounds = self.bounds();
                self.balloons[i].step(force, dt, &bounds, &self.wall);
            }

            self.balloons[i].last_step_position = self.balloons[i].position;
        }

        trace!(
            dt_ms,
            yellow = ?self.balloons[0].position,
            green = ?self.balloons[1].position,
            sweater_charge = self.sweater.net_charge(),
            "step"
        );

        debug_assert_eq!(
            self.sweater.net_charge() + self.balloons[0].charge + self.balloons[1].charge,
            0,
            "charge was created or destroyed"
        );
    }

    /// Reset sweater, wall, balloons (in that order) and the display mode.
    /// The wall goes back to its starting visibility.
    pub fn reset(&mut self) {
        self.sweater.reset();
        self.wall.reset();
        for b in &mut self.balloons {
            b.reset();
        }
        self.show_charges = ShowCharges::All;
        info!("model reset");
    }

    /// Show or remove the wall.
    ///
    /// Any change frees balloons stuck to the wall. When the wall comes back,
    /// balloons left inside the wall gap are pushed out of it.
    pub fn set_wall_visible(&mut self, visible: bool) {
        if self.wall.is_visible == visible {
            return;
        }
        self.wall.is_visible = visible;

        let bounds = self.bounds();
        for b in &mut self.balloons {
            b.is_stopped = false;
            if visible {
                let clamped = clamp_to_rect(&bounds, &mut b.position, BALLOON_WIDTH, BALLOON_HEIGHT);
                stop_at_edges(&mut b.velocity, clamped);
            }
        }

        debug!(visible, "wall visibility changed");
    }

    /// Hiding a balloon also drops it from the input layer. Its charge stays.
    pub fn set_balloon_visible(&mut self, id: BalloonId, visible: bool) {
        let balloon = &mut self.balloons[id.index()];
        balloon.is_visible = visible;
        if !visible && balloon.is_dragged {
            balloon.set_dragged(false);
        }
        debug!(balloon = ?id, visible, "balloon visibility changed");
    }

    pub fn set_show_charges(&mut self, show_charges: ShowCharges) {
        self.show_charges = show_charges;
    }

    pub fn set_dragged(&mut self, id: BalloonId, dragged: bool) {
        self.balloons[id.index()].set_dragged(dragged);
    }

    /// Move a balloon under user control, grabbing it first if needed.
    /// The target is clamped into bounds and the drag direction recorded.
    /// Returns true if the target was out of bounds.
    pub fn drag_balloon(&mut self, id: BalloonId, target: NVec2) -> bool {
        let mut position = target;
        let out_of_bounds = self.clamp_to_bounds(&mut position, BALLOON_WIDTH, BALLOON_HEIGHT);

        let balloon = &mut self.balloons[id.index()];
        if !balloon.is_dragged {
            balloon.set_dragged(true);
        }
        if let Some(direction) = PlayAreaMap::direction(position - balloon.position) {
            balloon.direction = Some(direction);
        }
        balloon.set_position(position);

        out_of_bounds
    }

    /// Place a balloon directly (keyboard jumps and the like), clamped into
    /// bounds. Returns true if the target was out of bounds.
    pub fn set_balloon_position(&mut self, id: BalloonId, target: NVec2) -> bool {
        let mut position = target;
        let out_of_bounds = self.clamp_to_bounds(&mut position, BALLOON_WIDTH, BALLOON_HEIGHT);
        self.balloons[id.index()].set_position(position);
        out_of_bounds
    }

    /// Rub balloon `id` against the sweater once, regardless of drag state
    pub fn rub_sweater(&mut self, id: BalloonId) -> bool {
        self.sweater.find_intersection(&mut self.balloons[id.index()])
    }

    /// Net force the balloon would feel if it drifted this step
    pub fn net_force(&self, id: BalloonId) -> NVec2 {
        self.forces.net_force(id, self)
    }

    /// The sweater's contribution alone
    pub fn sweater_force(&self, id: BalloonId) -> NVec2 {
        SweaterAttraction.force(id, self)
    }

    pub fn touching_wall(&self, id: BalloonId) -> bool {
        self.balloon(id).touching_wall(self.wall.x())
    }

    pub fn any_charged_balloon_touching_wall(&self) -> bool {
        BalloonId::ALL
            .iter()
            .any(|&id| self.touching_wall(id) && self.balloon(id).charge() < 0)
    }

    /// The balloon's rubbing side overlaps the sweater
    pub fn on_sweater(&self, id: BalloonId) -> bool {
        self.balloon(id).activation_rect().intersects(&self.sweater.bounds())
    }

    /// A charged balloon close enough to the visible wall to polarize it
    pub fn inducing_charge(&self, id: BalloonId) -> bool {
        let balloon = self.balloon(id);
        if !balloon.is_visible() || balloon.charge() >= 0 || !self.wall.is_visible() {
            return false;
        }
        let gap = self.wall.x() - (balloon.position().x + balloon.width());
        gap <= self.parameters.wall_attraction_gap(balloon.charge())
    }

    /// Both balloons visible and within `ADJACENT_MARGIN` of each other
    pub fn balloons_adjacent(&self) -> bool {
        let [yellow, green] = &self.balloons;
        yellow.is_visible()
            && green.is_visible()
            && yellow.bounds().dilated(ADJACENT_MARGIN).intersects(&green.bounds())
    }

    pub fn balloon_region(&self, id: BalloonId) -> Region {
        self.play_area_map.region(self.balloon(id).center())
    }

    pub fn balloon_landmark(&self, id: BalloonId) -> Option<Landmark> {
        self.play_area_map
            .landmark(self.balloon(id).center().x, self.wall.is_visible())
    }
}

impl Default for SimulationModel {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_WALL_GAP_WIDTH)
    }
}
