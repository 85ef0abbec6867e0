//! Configuration types for loading balloon scenarios from YAML.
//!
//! A scenario file describes the starting layout and a script of user
//! actions to replay headlessly:
//!
//! - [`PlayAreaConfig`]   – play area size and wall gap
//! - [`EngineConfig`]     – step size, run length and report period
//! - [`ParametersConfig`] – optional overrides of the physics tunables
//! - [`BalloonsConfig`]   – starting position and visibility per balloon
//! - [`ActionConfig`]     – one scripted action and the step it fires before
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! Every section may be omitted and falls back to the default layout.
//!
//! # YAML format
//!
//! ```yaml
//! play_area:
//!   width: 768.0
//!   height: 504.0
//!   wall_gap_width: 80.0
//!
//! engine:
//!   dt_ms: 16.667           # milliseconds per step
//!   steps: 600
//!   log_every: 60           # 0 disables progress reports
//!
//! parameters:
//!   max_force: 2.0          # any tunable may be overridden
//!
//! wall_visible: true
//! show_charges: all         # all | none | diff
//!
//! balloons:
//!   yellow: { position: [440.0, 100.0], visible: true }
//!   green:  { visible: false }
//!
//! actions:
//!   - { step: 0,   action: drag_to, balloon: yellow, position: [150.0, 120.0] }
//!   - { step: 5,   action: rub, balloon: yellow, strokes: 30 }
//!   - { step: 40,  action: release, balloon: yellow }
//!   - { step: 300, action: set_wall_visible, visible: false }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ScenarioError;
use crate::simulation::balloon::{
    BALLOON_HEIGHT, BALLOON_WIDTH, GREEN_DEFAULT_POSITION, YELLOW_DEFAULT_POSITION,
};
use crate::simulation::engine::Engine;
use crate::simulation::model::{DEFAULT_HEIGHT, DEFAULT_WALL_GAP_WIDTH, DEFAULT_WIDTH};
use crate::simulation::params::Parameters;
use crate::simulation::states::{BalloonId, NVec2, ShowCharges};

/// Play area geometry
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlayAreaConfig {
    pub width: f64,
    pub height: f64,
    pub wall_gap_width: f64, // space reserved on the right for the wall
}

impl Default for PlayAreaConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            wall_gap_width: DEFAULT_WALL_GAP_WIDTH,
        }
    }
}

/// How the headless runner drives the model
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub dt_ms: f64,
    pub steps: usize,
    pub log_every: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let engine = Engine::default();
        Self {
            dt_ms: engine.dt_ms,
            steps: engine.steps,
            log_every: engine.log_every,
        }
    }
}

/// Overrides for the physics tunables. Anything left out keeps its default.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ParametersConfig {
    pub force_constant: Option<f64>,
    pub wall_force_exponent: Option<f64>,
    pub balloon_force_exponent: Option<f64>,
    pub max_force: Option<f64>,
    pub wall_attraction_min_charge: Option<i32>,
    pub wall_attraction_range: Option<f64>,
    pub wall_attraction_falloff: Option<f64>,
    pub wall_attraction_strength: Option<f64>,
    pub wall_attraction_divisor: Option<f64>,
    pub frame_ms: Option<f64>,
    pub max_dt_ms: Option<f64>,
}

impl ParametersConfig {
    pub fn to_parameters(&self) -> Parameters {
        let d = Parameters::default();
        Parameters {
            force_constant: self.force_constant.unwrap_or(d.force_constant),
            wall_force_exponent: self.wall_force_exponent.unwrap_or(d.wall_force_exponent),
            balloon_force_exponent: self.balloon_force_exponent.unwrap_or(d.balloon_force_exponent),
            max_force: self.max_force.unwrap_or(d.max_force),
            wall_attraction_min_charge: self
                .wall_attraction_min_charge
                .unwrap_or(d.wall_attraction_min_charge),
            wall_attraction_range: self.wall_attraction_range.unwrap_or(d.wall_attraction_range),
            wall_attraction_falloff: self.wall_attraction_falloff.unwrap_or(d.wall_attraction_falloff),
            wall_attraction_strength: self.wall_attraction_strength.unwrap_or(d.wall_attraction_strength),
            wall_attraction_divisor: self.wall_attraction_divisor.unwrap_or(d.wall_attraction_divisor),
            frame_ms: self.frame_ms.unwrap_or(d.frame_ms),
            max_dt_ms: self.max_dt_ms.unwrap_or(d.max_dt_ms),
        }
    }
}

/// Starting state of one balloon
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BalloonConfig {
    pub position: Option<[f64; 2]>, // top-left corner
    pub visible: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BalloonsConfig {
    pub yellow: BalloonConfig,
    pub green: BalloonConfig,
}

impl BalloonsConfig {
    pub fn get(&self, id: BalloonId) -> &BalloonConfig {
        match id {
            BalloonId::Yellow => &self.yellow,
            BalloonId::Green => &self.green,
        }
    }

    /// Starting position, falling back to the default layout
    pub fn position(&self, id: BalloonId) -> NVec2 {
        let default = match id {
            BalloonId::Yellow => YELLOW_DEFAULT_POSITION,
            BalloonId::Green => GREEN_DEFAULT_POSITION,
        };
        self.get(id).position.unwrap_or(default).into()
    }

    /// Starting visibility; only the yellow balloon is out by default
    pub fn visible(&self, id: BalloonId) -> bool {
        self.get(id).visible.unwrap_or(id == BalloonId::Yellow)
    }
}

fn default_strokes() -> usize {
    1
}

/// A user action as written in the scenario file
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionKind {
    Grab { balloon: BalloonId },
    DragTo { balloon: BalloonId, position: [f64; 2] },
    /// Scrub the balloon up and down in place, one stroke per step
    Rub {
        balloon: BalloonId,
        #[serde(default = "default_strokes")]
        strokes: usize,
    },
    Release { balloon: BalloonId },
    SetWallVisible { visible: bool },
    SetBalloonVisible { balloon: BalloonId, visible: bool },
    SetShowCharges { show_charges: ShowCharges },
    Reset,
}

/// `action` fires right before step `step` (0-based) runs
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ActionConfig {
    pub step: usize,
    #[serde(flatten)]
    pub action: ActionKind,
}

impl ActionConfig {
    /// Last step this action touches once expanded
    pub fn last_step(&self) -> usize {
        match self.action {
            ActionKind::Rub { strokes, .. } => self.step + strokes.saturating_sub(1),
            _ => self.step,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub play_area: PlayAreaConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default = "default_true")]
    pub wall_visible: bool,
    #[serde(default)]
    pub show_charges: ShowCharges,
    #[serde(default)]
    pub balloons: BalloonsConfig,
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            play_area: PlayAreaConfig::default(),
            engine: EngineConfig::default(),
            parameters: ParametersConfig::default(),
            wall_visible: true,
            show_charges: ShowCharges::default(),
            balloons: BalloonsConfig::default(),
            actions: Vec::new(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Check the config describes a runnable scenario. Reports the first problem found.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let area = &self.play_area;
        if !(area.width > 0.0 && area.height >= BALLOON_HEIGHT) {
            return Err(ScenarioError::InvalidDimensions {
                width: area.width,
                height: area.height,
            });
        }
        if !(area.wall_gap_width >= 0.0 && area.width - area.wall_gap_width >= BALLOON_WIDTH) {
            return Err(ScenarioError::WallGapTooWide {
                wall_gap_width: area.wall_gap_width,
                width: area.width,
            });
        }

        if !(self.engine.dt_ms > 0.0) {
            return Err(ScenarioError::NonPositiveTimeStep(self.engine.dt_ms));
        }

        let params = self.parameters.to_parameters();
        let checks = [
            ("frame_ms", params.frame_ms, params.frame_ms > 0.0),
            ("max_dt_ms", params.max_dt_ms, params.max_dt_ms >= 0.0),
            ("max_force", params.max_force, params.max_force >= 0.0),
            ("wall_attraction_divisor", params.wall_attraction_divisor, params.wall_attraction_divisor > 0.0),
            ("wall_attraction_falloff", params.wall_attraction_falloff, params.wall_attraction_falloff > 0.0),
        ];
        if let Some(&(name, value, _)) = checks.iter().find(|(_, _, ok)| !ok) {
            return Err(ScenarioError::InvalidParameter { name, value });
        }

        let max_x = if self.wall_visible {
            area.width - area.wall_gap_width
        } else {
            area.width
        };
        for id in BalloonId::ALL {
            let p = self.balloons.position(id);
            let fits = p.x >= 0.0
                && p.y >= 0.0
                && p.x + BALLOON_WIDTH <= max_x
                && p.y + BALLOON_HEIGHT <= area.height;
            if !fits {
                return Err(ScenarioError::BalloonOutOfBounds {
                    balloon: format!("{id:?}").to_lowercase(),
                    x: p.x,
                    y: p.y,
                });
            }
        }

        if let Some(action) = self.actions.iter().find(|a| a.last_step() >= self.engine.steps) {
            return Err(ScenarioError::ActionBeyondRun {
                step: action.last_step(),
                steps: self.engine.steps,
            });
        }

        Ok(())
    }
}
