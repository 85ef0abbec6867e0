pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod scenario;
pub mod sweater;
pub mod wall;
pub mod balloon;
pub mod play_area;
pub mod model;
