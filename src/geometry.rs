//! Screen-space vector helpers.
//!
//! The simulation works in a y-down pixel space with the origin at the
//! top-left corner.  Rotation 0 points at the top of the screen and grows
//! clockwise, so the unit heading of rotation `r` is `(sin r, -cos r)`.
//! Conversion to Bevy's centred y-up world happens only in
//! [`crate::rendering`].

use bevy::math::Vec2;

/// Heading used when a direction is requested from a zero-length vector.
pub const DEFAULT_HEADING: Vec2 = Vec2::new(0.0, -1.0);

/// Unit vector pointing along `v`, or `fallback` when `v` has zero (or
/// non-finite) length.
pub fn direction_or(v: Vec2, fallback: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(fallback)
}

/// Unit heading for a rotation in radians.
pub fn heading(rotation: f32) -> Vec2 {
    let (sin, cos) = rotation.sin_cos();
    Vec2::new(sin, -cos)
}

/// Rotation whose heading points from `from` towards `to`.
///
/// Coincident points yield rotation 0.
pub fn rotation_towards(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    if delta == Vec2::ZERO {
        0.0
    } else {
        delta.x.atan2(-delta.y)
    }
}

/// Wraps a position onto the torus `[0, size.x) × [0, size.y)`.
///
/// Uses Euclidean remainder, so `x == width` maps to `0`, `x == -1` maps to
/// `width - 1`, and wrapping an already wrapped position is a no-op.
pub fn wrap_position(position: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(position.x, size.x), wrap_axis(position.y, size.y))
}

fn wrap_axis(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs.
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// `true` when `position` lies inside the screen rectangle.
pub fn is_on_screen(position: Vec2, size: Vec2) -> bool {
    position.x >= 0.0 && position.y >= 0.0 && position.x < size.x && position.y < size.y
}

/// `true` when `position` is more than `margin` pixels outside the screen.
pub fn is_beyond_margin(position: Vec2, size: Vec2, margin: f32) -> bool {
    position.x < -margin
        || position.y < -margin
        || position.x > size.x + margin
        || position.y > size.y + margin
}
