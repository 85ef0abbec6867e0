pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use simulation::states::{NVec2, Rect, PointCharge, BalloonId, ShowCharges};
pub use simulation::params::Parameters;
pub use simulation::forces::{coulomb_force, BalloonForce, ForceSet, SweaterAttraction, WallAttraction, BalloonRepulsion};
pub use simulation::integrator::euler_integrator;
pub use simulation::balloon::Balloon;
pub use simulation::sweater::Sweater;
pub use simulation::wall::Wall;
pub use simulation::play_area::{PlayAreaMap, Region, Column, Row, Landmark, BalloonDirection};
pub use simulation::model::{SimulationModel, ModelSnapshot};
pub use simulation::engine::Engine;
pub use simulation::scenario::{Scenario, Action, ScheduledAction, RunSummary};

pub use configuration::config::{ScenarioConfig, PlayAreaConfig, EngineConfig, ParametersConfig, BalloonsConfig, BalloonConfig, ActionConfig, ActionKind};

pub use error::ScenarioError;

pub use benchmark::benchmark::bench_step;
