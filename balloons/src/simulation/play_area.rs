//! Region map of the play area.
//!
//! Splits the play area into named bands so the layers above the physics can
//! say where a balloon is ("over the right arm of the sweater, upper row")
//! and which way it is moving. All classification is by the balloon's
//! **center**, and the map never changes after construction.
//!
//! Column and row boundaries are tuned for a 768 x 504 play area and scale
//! linearly with the actual size. Positions tied to the wall and to the right
//! edge are computed exactly, because balloons come to rest on them.

use std::f64::consts::PI;

use crate::simulation::balloon::BALLOON_WIDTH;
use crate::simulation::model::DEFAULT_WALL_GAP_WIDTH;
use crate::simulation::states::NVec2;

pub const REFERENCE_WIDTH: f64 = 768.0;
pub const REFERENCE_HEIGHT: f64 = 504.0;

// column upper bounds for the reference width, left to right
const COLUMN_BOUNDS: [(Column, f64); 7] = [
    (Column::LeftArm, 150.0),
    (Column::LeftSideOfSweater, 215.0),
    (Column::RightSideOfSweater, 265.0),
    (Column::RightArm, 325.0),
    (Column::LeftPlayArea, 415.0),
    (Column::CenterPlayArea, 501.0),
    (Column::RightPlayArea, 595.0),
];

const ROW_BOUNDS: [(Row, f64); 2] = [(Row::Upper, 167.0), (Row::Center, 335.0)];

// x ranges for the reference width
const VERY_CLOSE_TO_SWEATER: (f64, f64) = (325.0, 345.0);
const NEAR_SWEATER: (f64, f64) = (345.0, 375.0);
const CENTER_PLAY_AREA: (f64, f64) = (445.0, 475.0);

// distances back from the wall / right edge
const VERY_CLOSE_DISTANCE: f64 = 26.0;
const NEAR_DISTANCE: f64 = 56.0;

// tolerance for "resting exactly on" a boundary
const EDGE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    LeftArm,
    LeftSideOfSweater,
    RightSideOfSweater,
    RightArm,
    LeftPlayArea,
    CenterPlayArea,
    RightPlayArea,
    Wall,
    RightEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Row {
    Upper,
    Center,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    LeftEdge,
    VeryCloseToSweater,
    NearSweater,
    CenterPlayArea,
    NearWall,
    VeryCloseToWall,
    AtWall,
    NearRightEdge,
    VeryCloseToRightEdge,
    RightEdge,
}

/// 8-way movement direction in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BalloonDirection {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub column: Column,
    pub row: Row,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayAreaMap {
    columns: Vec<(Column, f64)>,
    wall_x: f64,       // balloon center x when flush against the wall
    left_edge_x: f64,  // balloon center x when flush against the left edge
    right_edge_x: f64, // balloon center x when flush against the right edge
    rows: Vec<(Row, f64)>,
    very_close_to_sweater: (f64, f64),
    near_sweater: (f64, f64),
    center_play_area: (f64, f64),
}

impl PlayAreaMap {
    /// Map for a `width` x `height` play area with a wall of `wall_gap_width`
    /// and balloons `balloon_width` wide
    pub fn new(width: f64, height: f64, wall_gap_width: f64, balloon_width: f64) -> Self {
        let sx = width / REFERENCE_WIDTH;
        let sy = height / REFERENCE_HEIGHT;
        let half = balloon_width / 2.0;
        let scale = |(a, b): (f64, f64)| (a * sx, b * sx);

        Self {
            columns: COLUMN_BOUNDS.iter().map(|&(c, x)| (c, x * sx)).collect(),
            wall_x: width - wall_gap_width - half,
            left_edge_x: half,
            right_edge_x: width - half,
            rows: ROW_BOUNDS.iter().map(|&(r, y)| (r, y * sy)).collect(),
            very_close_to_sweater: scale(VERY_CLOSE_TO_SWEATER),
            near_sweater: scale(NEAR_SWEATER),
            center_play_area: scale(CENTER_PLAY_AREA),
        }
    }

    pub fn column(&self, x: f64) -> Column {
        if let Some(&(column, _)) = self.columns.iter().find(|&&(_, upper)| x < upper) {
            return column;
        }
        if x <= self.wall_x + EDGE_EPSILON {
            Column::Wall
        } else {
            Column::RightEdge
        }
    }

    pub fn row(&self, y: f64) -> Row {
        self.rows
            .iter()
            .find(|&&(_, upper)| y < upper)
            .map(|&(row, _)| row)
            .unwrap_or(Row::Lower)
    }

    pub fn region(&self, center: NVec2) -> Region {
        Region {
            column: self.column(center.x),
            row: self.row(center.y),
        }
    }

    /// Landmark at balloon center `x`, if any. Wall landmarks only exist while
    /// the wall is up, right-edge landmarks only while it is down.
    pub fn landmark(&self, x: f64, wall_visible: bool) -> Option<Landmark> {
        let within = |(lo, hi): (f64, f64)| x >= lo && x < hi;

        if x <= self.left_edge_x + EDGE_EPSILON {
            return Some(Landmark::LeftEdge);
        }
        if within(self.very_close_to_sweater) {
            return Some(Landmark::VeryCloseToSweater);
        }
        if within(self.near_sweater) {
            return Some(Landmark::NearSweater);
        }
        if within(self.center_play_area) {
            return Some(Landmark::CenterPlayArea);
        }

        let (edge, at, very_close, near) = if wall_visible {
            (self.wall_x, Landmark::AtWall, Landmark::VeryCloseToWall, Landmark::NearWall)
        } else {
            (self.right_edge_x, Landmark::RightEdge, Landmark::VeryCloseToRightEdge, Landmark::NearRightEdge)
        };

        if (x - edge).abs() <= EDGE_EPSILON {
            Some(at)
        } else if within((edge - VERY_CLOSE_DISTANCE, edge)) {
            Some(very_close)
        } else if within((edge - NEAR_DISTANCE, edge - VERY_CLOSE_DISTANCE)) {
            Some(near)
        } else {
            None
        }
    }

    /// Direction of a displacement. `None` for no movement.
    pub fn direction(delta: NVec2) -> Option<BalloonDirection> {
        if delta.x == 0.0 && delta.y == 0.0 {
            return None;
        }

        // y grows downward, so a positive angle is a downward movement
        let angle = delta.y.atan2(delta.x);
        let eighth = PI / 8.0;

        let direction = if angle.abs() <= eighth {
            BalloonDirection::Right
        } else if angle.abs() >= 7.0 * eighth {
            BalloonDirection::Left
        } else if angle > 0.0 {
            if angle <= 3.0 * eighth {
                BalloonDirection::DownRight
            } else if angle <= 5.0 * eighth {
                BalloonDirection::Down
            } else {
                BalloonDirection::DownLeft
            }
        } else if angle >= -3.0 * eighth {
            BalloonDirection::UpRight
        } else if angle >= -5.0 * eighth {
            BalloonDirection::Up
        } else {
            BalloonDirection::UpLeft
        };

        Some(direction)
    }
}

impl Default for PlayAreaMap {
    fn default() -> Self {
        Self::new(REFERENCE_WIDTH, REFERENCE_HEIGHT, DEFAULT_WALL_GAP_WIDTH, BALLOON_WIDTH)
    }
}
