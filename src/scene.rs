//! The displayed shapes and the animation that grows the hypocycloid.

use bitflags::bitflags;
use glam::{Mat4, Vec2, Vec3};

use crate::geometry::{self, ANGLE_STEP};
use crate::params::ShapeParameters;
use crate::transform;

pub const HYPOCYCLOID_COLOR: Vec3 = Vec3::X;
pub const CIRCLE_COLOR: Vec3 = Vec3::ZERO;

bitflags! {
    /// Slots that are part of the displayed curve list.
    pub struct Shapes: u8 {
        const HYPOCYCLOID = 1 << 0;
        const LARGE_CIRCLE = 1 << 1;
        const SMALL_CIRCLE = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Hypocycloid = 0,
    LargeCircle = 1,
    SmallCircle = 2,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [
        ShapeKind::Hypocycloid,
        ShapeKind::LargeCircle,
        ShapeKind::SmallCircle,
    ];

    fn flag(self) -> Shapes {
        match self {
            ShapeKind::Hypocycloid => Shapes::HYPOCYCLOID,
            ShapeKind::LargeCircle => Shapes::LARGE_CIRCLE,
            ShapeKind::SmallCircle => Shapes::SMALL_CIRCLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    LineStrip,
    /// Unconnected samples. The generators only build line strips; the
    /// renderer still maps this kind.
    Points,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Samples in the curve's local frame.
    pub points: Vec<Vec2>,
    /// RGB, each component in `0.0..=1.0`.
    pub color: Vec3,
    pub transform: Mat4,
    pub primitive: Primitive,
}

impl Curve {
    fn line_strip(points: Vec<Vec2>, color: Vec3, transform: Mat4) -> Curve {
        Curve {
            points,
            color,
            transform,
            primitive: Primitive::LineStrip,
        }
    }

    /// Points after the curve transform, in world units.
    pub fn world_points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points
            .iter()
            .map(move |&point| transform::apply(&self.transform, point))
    }
}

/// Progress of the animation along the hypocycloid parameter.
///
/// Counts whole steps so that a finished animation always holds
/// [`geometry::sample_count`] points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationCursor {
    steps: usize,
    bound_steps: usize,
    cycles: u32,
}

impl AnimationCursor {
    pub fn new(cycles: u32) -> AnimationCursor {
        AnimationCursor {
            steps: 0,
            bound_steps: geometry::sample_count(cycles),
            cycles,
        }
    }

    pub fn angle(&self) -> f32 {
        self.steps as f32 * ANGLE_STEP
    }

    pub fn bound(&self) -> f32 {
        geometry::angle_bound(self.cycles)
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_complete(&self) -> bool {
        self.steps >= self.bound_steps
    }

    /// Fraction of the animation already played, `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.bound_steps == 0 {
            return 1.0;
        }
        (self.steps as f32 / self.bound_steps as f32).min(1.0)
    }

    fn advance(&mut self) {
        self.steps += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing generated yet.
    Idle,
    /// All three curves, hypocycloid fully sampled.
    Static,
    /// All three curves, hypocycloid growing by one point per step.
    Animating,
    /// Animation reached its bound; geometry is frozen.
    AnimationDone,
    /// Only the fully sampled hypocycloid is displayed.
    Collapsed,
}

#[derive(Debug, Clone)]
pub struct Scene {
    slots: [Option<Curve>; 3],
    visible: Shapes,
    cursor: AnimationCursor,
    phase: Phase,
    animate: bool,
    params: ShapeParameters,
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new()
    }
}

impl Scene {
    pub fn new() -> Scene {
        Scene {
            slots: [None, None, None],
            visible: Shapes::empty(),
            cursor: AnimationCursor::default(),
            phase: Phase::Idle,
            animate: false,
            params: ShapeParameters::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn animate(&self) -> bool {
        self.animate
    }

    pub fn cursor(&self) -> &AnimationCursor {
        &self.cursor
    }

    /// Parameters the current curves were generated from.
    pub fn parameters(&self) -> &ShapeParameters {
        &self.params
    }

    /// Displayed curves, hypocycloid first, then the large and small circles.
    pub fn curves(&self) -> impl Iterator<Item = &Curve> + '_ {
        ShapeKind::ALL
            .into_iter()
            .filter(move |kind| self.visible.contains(kind.flag()))
            .filter_map(move |kind| self.slots[kind as usize].as_ref())
    }

    /// Curve stored in `kind`'s slot, displayed or not.
    pub fn curve(&self, kind: ShapeKind) -> Option<&Curve> {
        self.slots[kind as usize].as_ref()
    }

    pub fn curve_count(&self) -> usize {
        self.curves().count()
    }

    /// Regenerates every curve from `params`.
    ///
    /// With `animate` set the hypocycloid starts empty and the cursor at
    /// zero; each [`Scene::step`] then adds one point.
    ///
    /// # Panics
    /// Panics if `params` does not validate; the control panel keeps the
    /// values in range.
    pub fn draw(&mut self, params: &ShapeParameters, animate: bool) {
        if let Err(error) = params.validate() {
            panic!("invalid shape parameters: {}", error);
        }

        self.clear();
        self.params = *params;
        self.animate = animate;
        self.cursor = AnimationCursor::new(params.cycles);

        log::debug!(
            "regenerating scene: R = {}, r = {}, n = {}, rotation = {}, scale = {}, animate = {}",
            params.big_radius,
            params.small_radius,
            params.cycles,
            params.rotation,
            params.scale,
            animate
        );

        let hypocycloid_points = if animate {
            Vec::with_capacity(geometry::sample_count(params.cycles))
        } else {
            geometry::sample_hypocycloid(params.big_radius, params.small_radius, params.cycles)
        };
        self.slots[ShapeKind::Hypocycloid as usize] =
            Some(Self::hypocycloid(params, hypocycloid_points));
        self.slots[ShapeKind::LargeCircle as usize] = Some(Curve::line_strip(
            geometry::sample_circle(params.big_radius),
            CIRCLE_COLOR,
            transform::placement(params.rotation, params.scale, Vec2::ZERO),
        ));
        self.slots[ShapeKind::SmallCircle as usize] = Some(Curve::line_strip(
            geometry::sample_circle(params.small_radius),
            CIRCLE_COLOR,
            transform::placement(
                params.rotation,
                params.scale,
                Vec2::new(params.big_radius - params.small_radius, 0.0),
            ),
        ));
        self.visible = Shapes::all();

        self.phase = if animate {
            Phase::Animating
        } else {
            Phase::Static
        };
    }

    /// Updates the animate flag, applying the implicit transitions.
    ///
    /// Turning animation on while only the hypocycloid is displayed
    /// regenerates everything and starts animating. Turning it off while all
    /// three curves are displayed swaps in a fully sampled hypocycloid and
    /// hides the circles. Otherwise only the flag changes and takes effect on
    /// the next [`Scene::draw`].
    pub fn set_animate(&mut self, animate: bool, params: &ShapeParameters) {
        if animate == self.animate {
            return;
        }
        self.animate = animate;

        let displayed = self.curve_count();
        if animate && displayed == 1 {
            self.draw(params, true);
        } else if !animate && displayed == 3 {
            self.collapse(params);
        }
    }

    /// Advances the animation by one angular step.
    ///
    /// Returns `true` when geometry changed.
    pub fn step(&mut self) -> bool {
        if self.phase != Phase::Animating {
            return false;
        }
        if self.cursor.is_complete() {
            self.finish();
            return false;
        }

        let params = self.params;
        let point = geometry::hypocycloid_point(
            params.big_radius,
            params.small_radius,
            self.cursor.angle(),
        );
        if let Some(hypocycloid) = &mut self.slots[ShapeKind::Hypocycloid as usize] {
            hypocycloid.points.push(point);
        }
        if let Some(circle) = &mut self.slots[ShapeKind::SmallCircle as usize] {
            circle.transform =
                transform::roll(circle.transform, params.big_radius, params.small_radius);
        }
        self.cursor.advance();

        if self.cursor.is_complete() {
            self.finish();
        }
        true
    }

    fn finish(&mut self) {
        self.phase = Phase::AnimationDone;
        log::info!(
            "animation finished after {} steps (theta = {:.3})",
            self.cursor.steps(),
            self.cursor.angle()
        );
    }

    fn collapse(&mut self, params: &ShapeParameters) {
        if let Err(error) = params.validate() {
            panic!("invalid shape parameters: {}", error);
        }

        log::debug!("collapsing scene to a fully sampled hypocycloid");
        self.params = *params;
        let points =
            geometry::sample_hypocycloid(params.big_radius, params.small_radius, params.cycles);
        self.slots[ShapeKind::Hypocycloid as usize] = Some(Self::hypocycloid(params, points));
        self.visible = Shapes::HYPOCYCLOID;
        self.phase = Phase::Collapsed;
    }

    fn clear(&mut self) {
        self.slots = [None, None, None];
        self.visible = Shapes::empty();
        self.phase = Phase::Idle;
    }

    fn hypocycloid(params: &ShapeParameters, points: Vec<Vec2>) -> Curve {
        Curve::line_strip(
            points,
            HYPOCYCLOID_COLOR,
            transform::placement(params.rotation, params.scale, Vec2::ZERO),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(cycles: u32) -> ShapeParameters {
        ShapeParameters {
            cycles,
            ..Default::default()
        }
    }

    #[test]
    fn starts_idle() {
        let scene = Scene::new();
        assert_eq!(scene.phase(), Phase::Idle);
        assert_eq!(scene.curve_count(), 0);
        assert!(scene.curve(ShapeKind::Hypocycloid).is_none());
    }

    #[test]
    fn curve_order_and_colors() {
        let mut scene = Scene::new();
        scene.draw(&params(1), false);

        let colors: Vec<Vec3> = scene.curves().map(|curve| curve.color).collect();
        assert_eq!(colors, vec![HYPOCYCLOID_COLOR, CIRCLE_COLOR, CIRCLE_COLOR]);
        assert!(scene
            .curves()
            .all(|curve| curve.primitive == Primitive::LineStrip));
    }

    #[test]
    fn circles_are_placed_by_transform() {
        let mut scene = Scene::new();
        let params = ShapeParameters {
            rotation: 90.0,
            scale: 0.5,
            ..params(1)
        };
        scene.draw(&params, false);

        let small = scene.curve(ShapeKind::SmallCircle).unwrap();
        // the leading origin point marks the circle center
        assert_eq!(small.points[0], Vec2::ZERO);
        let center = transform::apply(&small.transform, small.points[0]);
        assert!(center.abs_diff_eq(Vec2::new(0.0, 7.0), 1e-4));

        let large = scene.curve(ShapeKind::LargeCircle).unwrap();
        assert!(transform::apply(&large.transform, Vec2::ZERO).abs_diff_eq(Vec2::ZERO, 1e-6));
    }

    #[test]
    fn step_is_noop_outside_animation() {
        let mut scene = Scene::new();
        assert!(!scene.step());

        scene.draw(&params(1), false);
        let before = scene.curve(ShapeKind::Hypocycloid).unwrap().points.len();
        assert!(!scene.step());
        assert_eq!(scene.curve(ShapeKind::Hypocycloid).unwrap().points.len(), before);
        assert_eq!(scene.phase(), Phase::Static);
    }

    #[test]
    fn small_circle_rolls_each_step() {
        let mut scene = Scene::new();
        scene.draw(&params(1), true);

        let before = scene.curve(ShapeKind::SmallCircle).unwrap().transform;
        assert!(scene.step());
        let after = scene.curve(ShapeKind::SmallCircle).unwrap().transform;
        assert!(after.abs_diff_eq(transform::roll(before, 19.0, 5.0), 1e-6));

        let large = scene.curve(ShapeKind::LargeCircle).unwrap().transform;
        assert!(large.abs_diff_eq(transform::placement(0.0, 0.4, Vec2::ZERO), 1e-6));
    }

    #[test]
    fn toggle_without_change_does_nothing() {
        let mut scene = Scene::new();
        scene.draw(&params(1), false);
        scene.set_animate(false, &params(1));
        assert_eq!(scene.phase(), Phase::Static);

        // turning animation on with every curve displayed waits for a draw
        scene.set_animate(true, &params(1));
        assert!(scene.animate());
        assert_eq!(scene.phase(), Phase::Static);
    }

    #[test]
    fn idle_toggle_keeps_scene_empty() {
        let mut scene = Scene::new();
        scene.set_animate(true, &params(1));
        scene.set_animate(false, &params(1));
        assert_eq!(scene.phase(), Phase::Idle);
        assert_eq!(scene.curve_count(), 0);
    }

    #[test]
    #[should_panic(expected = "invalid shape parameters")]
    fn draw_rejects_invalid_parameters() {
        let mut scene = Scene::new();
        let params = ShapeParameters {
            small_radius: 0.0,
            ..Default::default()
        };
        scene.draw(&params, false);
    }

    #[test]
    fn cursor_progress() {
        let mut cursor = AnimationCursor::new(1);
        assert_eq!(cursor.progress(), 0.0);
        for _ in 0..geometry::sample_count(1) {
            cursor.advance();
        }
        assert!(cursor.is_complete());
        assert_eq!(cursor.progress(), 1.0);
        assert!(cursor.angle() >= cursor.bound());
    }
}
