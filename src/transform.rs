//! Model transforms for the curves.

use glam::{Mat4, Vec2, Vec3};

use crate::geometry::ANGLE_STEP;

/// Builds the placement transform of a curve.
///
/// The composition is `rotate · scale · translate`, applied one after the
/// other to the running matrix, so a local point is translated first, then
/// scaled, then rotated about the world origin. Changing the order changes
/// the picture.
pub fn placement(rotation_degrees: f32, scale: f32, translation: Vec2) -> Mat4 {
    let mut matrix = Mat4::from_rotation_z(rotation_degrees.to_radians());
    matrix = matrix * Mat4::from_scale(Vec3::new(scale, scale, 1.0));
    matrix = matrix * Mat4::from_translation(translation.extend(0.0));
    matrix
}

/// Advances the small circle by one animation step.
///
/// The circle is carried around the world origin by `ANGLE_STEP` and spun
/// backwards about its own center by `ANGLE_STEP · R / r`. The factor is an
/// empirical approximation of rolling without slipping and is applied to the
/// existing matrix each frame; recomputing it from the cursor angle would
/// drift differently.
pub fn roll(transform: Mat4, big_radius: f32, small_radius: f32) -> Mat4 {
    Mat4::from_rotation_z(ANGLE_STEP)
        * transform
        * Mat4::from_rotation_z(-(ANGLE_STEP * big_radius / small_radius))
}

/// Applies `transform` to a curve point lying in the z = 0 plane.
pub fn apply(transform: &Mat4, point: Vec2) -> Vec2 {
    transform.transform_point3(point.extend(0.0)).truncate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_1_SQRT_2;

    #[test]
    fn placement_order() {
        let matrix = placement(45.0, 2.0, Vec2::new(1.0, 0.0));
        let expected = Vec2::new(2.0 * FRAC_1_SQRT_2, 2.0 * FRAC_1_SQRT_2);
        assert!(apply(&matrix, Vec2::ZERO).abs_diff_eq(expected, 1e-5));

        // translating last leaves the offset unrotated and unscaled
        let reordered = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0))
            * Mat4::from_rotation_z(45f32.to_radians())
            * Mat4::from_scale(Vec3::new(2.0, 2.0, 1.0));
        let moved = apply(&reordered, Vec2::ZERO);
        assert!(moved.abs_diff_eq(Vec2::new(1.0, 0.0), 1e-5));
        assert!(!moved.abs_diff_eq(expected, 1e-3));
    }

    #[test]
    fn placement_leaves_z_alone() {
        let matrix = placement(30.0, 0.5, Vec2::new(3.0, -2.0));
        let point = matrix.transform_point3(Vec3::new(1.0, 1.0, 7.0));
        assert!((point.z - 7.0).abs() < 1e-6);
    }

    #[test]
    fn zero_scale_collapses_to_origin() {
        let matrix = placement(90.0, 0.0, Vec2::new(14.0, 0.0));
        assert!(apply(&matrix, Vec2::new(5.0, 5.0)).abs_diff_eq(Vec2::ZERO, 1e-6));
    }

    #[test]
    fn roll_carries_center_around_origin() {
        let start = placement(0.0, 1.0, Vec2::new(14.0, 0.0));
        let rolled = roll(start, 19.0, 5.0);

        let center = apply(&rolled, Vec2::ZERO);
        let (sin, cos) = ANGLE_STEP.sin_cos();
        assert!(center.abs_diff_eq(Vec2::new(14.0 * cos, 14.0 * sin), 1e-4));
    }

    #[test]
    fn roll_spins_rim_backwards() {
        let start = placement(0.0, 1.0, Vec2::new(14.0, 0.0));
        let rolled = roll(start, 19.0, 5.0);

        let expected = Mat4::from_rotation_z(ANGLE_STEP)
            * start
            * Mat4::from_rotation_z(-ANGLE_STEP * 19.0 / 5.0);
        assert!(rolled.abs_diff_eq(expected, 1e-6));

        // the rim point relative to the center turns by step - step * R / r
        let rim = apply(&rolled, Vec2::new(5.0, 0.0)) - apply(&rolled, Vec2::ZERO);
        let turned = ANGLE_STEP - ANGLE_STEP * 19.0 / 5.0;
        let (sin, cos) = turned.sin_cos();
        assert!(rim.abs_diff_eq(Vec2::new(5.0 * cos, 5.0 * sin), 1e-4));
    }
}
