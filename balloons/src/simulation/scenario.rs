//! Build and run scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - the model in its starting layout (`SimulationModel`)
//! - the scripted user actions, expanded and ordered by step
//!
//! `Scenario::run` then replays the script headlessly, the same way a user
//! dragging balloons around would drive the model frame by frame

use tracing::{debug, info};

use crate::configuration::config::{ActionKind, ScenarioConfig};
use crate::error::ScenarioError;
use crate::simulation::engine::Engine;
use crate::simulation::model::SimulationModel;
use crate::simulation::states::{BalloonId, NVec2, ShowCharges};

/// Vertical travel of one rubbing stroke, in px
pub const RUB_STROKE: f64 = 20.0;

/// A user action applied to the model between steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Grab(BalloonId),
    DragTo(BalloonId, NVec2),
    DragBy(BalloonId, NVec2), // relative to wherever the balloon is when it fires
    Release(BalloonId),
    SetWallVisible(bool),
    SetBalloonVisible(BalloonId, bool),
    SetShowCharges(ShowCharges),
    Reset,
}

impl Action {
    pub fn apply(&self, model: &mut SimulationModel) {
        match *self {
            Action::Grab(id) => model.set_dragged(id, true),
            Action::DragTo(id, target) => {
                model.drag_balloon(id, target);
            }
            Action::DragBy(id, delta) => {
                let target = model.balloon(id).position() + delta;
                model.drag_balloon(id, target);
            }
            Action::Release(id) => model.set_dragged(id, false),
            Action::SetWallVisible(visible) => model.set_wall_visible(visible),
            Action::SetBalloonVisible(id, visible) => model.set_balloon_visible(id, visible),
            Action::SetShowCharges(show) => model.set_show_charges(show),
            Action::Reset => model.reset(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledAction {
    pub step: usize,
    pub action: Action,
}

/// Final state report of a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub sweater_charge: i32,
    pub charges: [i32; 2], // indexed by BalloonId
    pub positions: [NVec2; 2],
    pub stuck_to_wall: [bool; 2],
}

/// Runtime bundle built from a [`ScenarioConfig`]
pub struct Scenario {
    pub engine: Engine,
    pub model: SimulationModel,
    pub actions: Vec<ScheduledAction>, // sorted by step, file order within a step
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ScenarioError> {
        cfg.validate()?;

        let area = &cfg.play_area;
        let mut model = SimulationModel::new(area.width, area.height, area.wall_gap_width)
            .with_parameters(cfg.parameters.to_parameters())
            .with_wall_visible(cfg.wall_visible);
        for id in BalloonId::ALL {
            model = model.with_balloon(id, cfg.balloons.position(id), cfg.balloons.visible(id));
        }
        model.set_show_charges(cfg.show_charges);

        let engine = Engine {
            dt_ms: cfg.engine.dt_ms,
            steps: cfg.engine.steps,
            log_every: cfg.engine.log_every,
        };

        let mut actions: Vec<ScheduledAction> = cfg
            .actions
            .iter()
            .flat_map(|a| expand(a.step, &a.action))
            .collect();
        // stable, so same-step actions keep file order
        actions.sort_by_key(|a| a.step);

        debug!(actions = actions.len(), steps = engine.steps, "scenario built");

        Ok(Self {
            engine,
            model,
            actions,
        })
    }

    /// Replay the script for `engine.steps` steps
    pub fn run(&mut self) -> RunSummary {
        let mut pending = self.actions.iter().peekable();

        for step in 0..self.engine.steps {
            while let Some(scheduled) = pending.next_if(|a| a.step <= step) {
                debug!(step, action = ?scheduled.action, "applying action");
                scheduled.action.apply(&mut self.model);
            }

            self.model.step(self.engine.dt_ms);

            if self.engine.should_log(step) {
                let yellow = self.model.balloon(BalloonId::Yellow);
                let green = self.model.balloon(BalloonId::Green);
                info!(
                    step = step + 1,
                    sweater = self.model.sweater().net_charge(),
                    yellow_charge = yellow.charge(),
                    yellow_x = yellow.position().x,
                    green_charge = green.charge(),
                    green_x = green.position().x,
                    "progress"
                );
            }
        }

        let summary = self.summary();
        info!(
            steps = summary.steps,
            simulated_ms = self.engine.duration_ms(),
            sweater = summary.sweater_charge,
            yellow_charge = summary.charges[0],
            green_charge = summary.charges[1],
            yellow_stuck = summary.stuck_to_wall[0],
            green_stuck = summary.stuck_to_wall[1],
            "run finished"
        );
        summary
    }

    pub fn summary(&self) -> RunSummary {
        let m = &self.model;
        RunSummary {
            steps: self.engine.steps,
            sweater_charge: m.sweater().net_charge(),
            charges: BalloonId::ALL.map(|id| m.balloon(id).charge()),
            positions: BalloonId::ALL.map(|id| m.balloon(id).position()),
            stuck_to_wall: BalloonId::ALL.map(|id| m.balloon(id).is_stopped()),
        }
    }
}

/// Turn one configured action into runtime actions. A rub becomes one drag
/// stroke per step, alternating down and up.
fn expand(step: usize, kind: &ActionKind) -> Vec<ScheduledAction> {
    let at = |step, action| ScheduledAction { step, action };
    match *kind {
        ActionKind::Grab { balloon } => vec![at(step, Action::Grab(balloon))],
        ActionKind::DragTo { balloon, position } => {
            vec![at(step, Action::DragTo(balloon, position.into()))]
        }
        ActionKind::Rub { balloon, strokes } => (0..strokes)
            .map(|k| {
                let dy = if k % 2 == 0 { RUB_STROKE } else { -RUB_STROKE };
                at(step + k, Action::DragBy(balloon, NVec2::new(0.0, dy)))
            })
            .collect(),
        ActionKind::Release { balloon } => vec![at(step, Action::Release(balloon))],
        ActionKind::SetWallVisible { visible } => vec![at(step, Action::SetWallVisible(visible))],
        ActionKind::SetBalloonVisible { balloon, visible } => {
            vec![at(step, Action::SetBalloonVisible(balloon, visible))]
        }
        ActionKind::SetShowCharges { show_charges } => {
            vec![at(step, Action::SetShowCharges(show_charges))]
        }
        ActionKind::Reset => vec![at(step, Action::Reset)],
    }
}
