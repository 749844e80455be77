//! Point sampling for the circles and the hypocycloid.
//!
//! Every curve is sampled in its own local frame; placement in the scene is
//! left to the transform attached to the curve.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

/// Angular distance between two consecutive samples, in radians.
pub const ANGLE_STEP: f32 = 0.01;

/// Upper bound of the hypocycloid parameter for `cycles` turns.
pub fn angle_bound(cycles: u32) -> f32 {
    TAU * cycles as f32
}

/// Number of hypocycloid samples for `cycles` turns, `ceil(2π·n / step)`.
///
/// Full sampling and the animation cursor both go through this, so an
/// animation that runs to the end holds exactly as many points as a curve
/// sampled up front.
pub fn sample_count(cycles: u32) -> usize {
    (angle_bound(cycles) / ANGLE_STEP).ceil() as usize
}

/// Point of the hypocycloid traced by a circle of radius `small_radius`
/// rolling inside a circle of radius `big_radius`, at parameter `theta`.
pub fn hypocycloid_point(big_radius: f32, small_radius: f32, theta: f32) -> Vec2 {
    assert!(
        small_radius > 0.0,
        "small circle radius must be positive, got {}",
        small_radius
    );

    let diff = big_radius - small_radius;
    let inner = diff * theta / small_radius;
    let (sin, cos) = theta.sin_cos();
    let (inner_sin, inner_cos) = inner.sin_cos();

    Vec2::new(
        diff * cos + small_radius * inner_cos,
        diff * sin - small_radius * inner_sin,
    )
}

/// Samples the whole hypocycloid for `cycles` turns, starting at `theta = 0`.
pub fn sample_hypocycloid(big_radius: f32, small_radius: f32, cycles: u32) -> Vec<Vec2> {
    (0..sample_count(cycles))
        .map(|i| hypocycloid_point(big_radius, small_radius, i as f32 * ANGLE_STEP))
        .collect()
}

/// Samples a circle centered on the local origin.
///
/// The first point is the origin itself, followed by the circle from
/// `π/2` through `2π + π/2` inclusive. The last sample slightly overshoots
/// the first one so the line strip closes.
pub fn sample_circle(radius: f32) -> Vec<Vec2> {
    let steps = (TAU / ANGLE_STEP).floor() as usize;

    let mut points = Vec::with_capacity(steps + 2);
    points.push(Vec2::ZERO);
    points.extend((0..=steps).map(|i| {
        let (sin, cos) = (FRAC_PI_2 + i as f32 * ANGLE_STEP).sin_cos();
        Vec2::new(radius * sin, radius * cos)
    }));
    points
}
