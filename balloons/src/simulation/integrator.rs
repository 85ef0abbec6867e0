//! Time integration and bounds restriction for balloons
//!
//! Provides the semi-implicit Euler step used by free-drifting balloons and
//! the rectangle clamp shared by the integrator and the drag handler

use super::states::{NVec2, Rect};

/// Advance `position`/`velocity` by `dt` frames under `force`.
/// Velocity first, then position from the new velocity (mass is 1)
pub fn euler_integrator(position: &mut NVec2, velocity: &mut NVec2, force: NVec2, dt: f64) {
    // v_n+1 = v_n + F dt
    *velocity += force * dt;

    // x_n+1 = x_n + v_n+1 dt
    *position += *velocity * dt;
}

/// Which edges a clamp pushed an object back from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clamped {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Clamped {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Clamp the top-left `position` of a `width` x `height` object so the whole
/// object stays inside `bounds`
pub fn clamp_to_rect(bounds: &Rect, position: &mut NVec2, width: f64, height: f64) -> Clamped {
    let mut clamped = Clamped::default();

    let max_x = bounds.max.x - width;
    let max_y = bounds.max.y - height;

    if position.x > max_x {
        position.x = max_x;
        clamped.right = true;
    }
    if position.y > max_y {
        position.y = max_y;
        clamped.bottom = true;
    }
    if position.x < bounds.min.x {
        position.x = bounds.min.x;
        clamped.left = true;
    }
    if position.y < bounds.min.y {
        position.y = bounds.min.y;
        clamped.top = true;
    }

    clamped
}

/// Zero the velocity components that point into an edge the object was
/// clamped against
pub fn stop_at_edges(velocity: &mut NVec2, clamped: Clamped) {
    if (clamped.left && velocity.x < 0.0) || (clamped.right && velocity.x > 0.0) {
        velocity.x = 0.0;
    }
    if (clamped.top && velocity.y < 0.0) || (clamped.bottom && velocity.y > 0.0) {
        velocity.y = 0.0;
    }
}
