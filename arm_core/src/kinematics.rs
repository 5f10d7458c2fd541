//! Forward kinematics for the two-link arm figure.
//!
//! The renderer owns the drawing; the core only chains two projections per
//! tick (shoulder → elbow, then elbow → wrist).

/// A point in the renderer's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Project a segment endpoint from its pivot, angle and length.
pub fn project(origin: Point, angle_deg: i32, length: f64) -> Point {
    let theta = f64::from(angle_deg).to_radians();
    Point {
        x: origin.x + length * theta.cos(),
        y: origin.y + length * theta.sin(),
    }
}
