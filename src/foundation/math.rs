use crate::foundation::core::Point;

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Linear interpolation between two points (unclamped `t`).
#[inline]
pub(crate) fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Euclidean distance `sqrt(dx² + dy²)`.
#[inline]
pub(crate) fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Angle of the vector `a -> b` via `atan2(dy, dx)`.
#[inline]
pub(crate) fn edge_angle(a: Point, b: Point) -> f64 {
    let d = b - a;
    d.y.atan2(d.x)
}

/// Z component of `(b - a) x (c - b)`.
#[inline]
pub(crate) fn turn(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - b)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
