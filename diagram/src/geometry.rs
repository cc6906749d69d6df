//! Plane geometry for the reflection diagrams.
//!
//! Everything here is a pure function over finite `f64` inputs. Angles are in
//! degrees measured from the positive x axis; in screen space y grows
//! downward, so positive angles turn clockwise.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// A point in diagram space (the translated drawing group).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round both coordinates to the nearest whole unit.
    #[must_use]
    pub fn round(self) -> Self {
        Self { x: self.x.round(), y: self.y.round() }
    }
}

/// A closed line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Offset `origin` by `distance` along `angle_deg`.
#[must_use]
pub fn translate_point(origin: Point, angle_deg: f64, distance: f64) -> Point {
    let r = angle_deg.to_radians();
    Point {
        x: origin.x + distance * r.cos(),
        y: origin.y + distance * r.sin(),
    }
}

/// Mirror `incident_deg` about a surface oriented at `surface_deg`.
///
/// The result is normalized into `[0, 360)`.
#[must_use]
pub fn reflect_angle(incident_deg: f64, surface_deg: f64) -> f64 {
    let a = (surface_deg * 2.0 - incident_deg).rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.
    if a >= 360.0 { 0.0 } else { a }
}

/// Euclidean distance between two points.
#[must_use]
pub fn line_length(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Direction from `a` to `b` in degrees, in `(-180, 180]`.
///
/// Coincident points yield `0`.
#[must_use]
pub fn line_angle(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x).to_degrees()
}

/// Clamp `p` component-wise into the box spanned by `min` and `max`.
///
/// When the box is inverted (`min > max` on an axis) the `min` bound wins
/// for coordinates below it.
#[must_use]
pub fn clamp_point(p: Point, min: Point, max: Point) -> Point {
    Point {
        x: clamp_axis(p.x, min.x, max.x),
        y: clamp_axis(p.y, min.y, max.y),
    }
}

fn clamp_axis(v: f64, min: f64, max: f64) -> f64 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

/// Whether two closed segments share at least one point.
///
/// Touching endpoints and collinear overlap count as intersections. No
/// tolerance is applied.
#[must_use]
pub fn segments_intersect(a: Segment, b: Segment) -> bool {
    let d1 = cross(b.start, b.end, a.start);
    let d2 = cross(b.start, b.end, a.end);
    let d3 = cross(a.start, a.end, b.start);
    let d4 = cross(a.start, a.end, b.end);

    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }

    (is_zero(d1) && within_bounds(b, a.start))
        || (is_zero(d2) && within_bounds(b, a.end))
        || (is_zero(d3) && within_bounds(a, b.start))
        || (is_zero(d4) && within_bounds(a, b.end))
}

/// Z component of `(a - o) × (b - o)`.
fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn straddles(d1: f64, d2: f64) -> bool {
    (d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0)
}

#[allow(clippy::float_cmp)]
fn is_zero(v: f64) -> bool {
    v == 0.0
}

/// `p` is assumed collinear with `seg`; check it lies between the endpoints.
fn within_bounds(seg: Segment, p: Point) -> bool {
    p.x >= seg.start.x.min(seg.end.x)
        && p.x <= seg.start.x.max(seg.end.x)
        && p.y >= seg.start.y.min(seg.end.y)
        && p.y <= seg.start.y.max(seg.end.y)
}
