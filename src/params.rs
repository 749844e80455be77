use std::fmt;
use std::ops::RangeInclusive;

/// Radius range offered by the control panel, for both circles.
pub const RADIUS_RANGE: RangeInclusive<f32> = 1.0..=20.0;
pub const ROTATION_RANGE: RangeInclusive<f32> = -180.0..=180.0;
pub const SCALE_RANGE: RangeInclusive<f32> = 0.0..=2.0;
pub const CYCLES_RANGE: RangeInclusive<u32> = 1..=100;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("{0} must be positive, got {1}")]
    NonPositiveRadius(Parameter, f32),
    #[error("scale must not be negative, got {0}")]
    NegativeScale(f32),
    #[error("cycle count must be at least 1")]
    NoCycles,
    #[error("{0} is not a finite number")]
    NotFinite(Parameter),
}

/// Inputs of the hypocycloid and its two generating circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParameters {
    /// Radius of the fixed circle (R).
    pub big_radius: f32,
    /// Radius of the rolling circle (r).
    pub small_radius: f32,
    /// Number of turns of the hypocycloid parameter (n).
    pub cycles: u32,
    /// Rotation about the world origin, in degrees.
    pub rotation: f32,
    pub scale: f32,
}

impl Default for ShapeParameters {
    fn default() -> Self {
        ShapeParameters {
            big_radius: 19.0,
            small_radius: 5.0,
            cycles: 5,
            rotation: 0.0,
            scale: 0.4,
        }
    }
}

impl ShapeParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (parameter, value) in [
            (Parameter::BigRadius, self.big_radius),
            (Parameter::SmallRadius, self.small_radius),
            (Parameter::Rotation, self.rotation),
            (Parameter::Scale, self.scale),
        ] {
            if !value.is_finite() {
                return Err(ParameterError::NotFinite(parameter));
            }
        }

        if self.big_radius <= 0.0 {
            return Err(ParameterError::NonPositiveRadius(
                Parameter::BigRadius,
                self.big_radius,
            ));
        }
        if self.small_radius <= 0.0 {
            return Err(ParameterError::NonPositiveRadius(
                Parameter::SmallRadius,
                self.small_radius,
            ));
        }
        if self.scale < 0.0 {
            return Err(ParameterError::NegativeScale(self.scale));
        }
        if self.cycles == 0 {
            return Err(ParameterError::NoCycles);
        }

        Ok(())
    }

    /// Copy of the parameters pulled into the control panel ranges.
    ///
    /// Non-finite values fall back to the defaults.
    pub fn clamped(&self) -> ShapeParameters {
        let defaults = ShapeParameters::default();
        let clamp = |value: f32, fallback: f32, range: &RangeInclusive<f32>| {
            if value.is_finite() {
                clamp_to(value, range)
            } else {
                fallback
            }
        };

        ShapeParameters {
            big_radius: clamp(self.big_radius, defaults.big_radius, &RADIUS_RANGE),
            small_radius: clamp(self.small_radius, defaults.small_radius, &RADIUS_RANGE),
            cycles: self.cycles.clamp(*CYCLES_RANGE.start(), *CYCLES_RANGE.end()),
            rotation: clamp(self.rotation, defaults.rotation, &ROTATION_RANGE),
            scale: clamp(self.scale, defaults.scale, &SCALE_RANGE),
        }
    }

    /// Moves `parameter` by `steps` increments, staying inside its range.
    pub fn nudge(&mut self, parameter: Parameter, steps: i32) {
        let delta = parameter.increment() * steps as f32;
        match parameter {
            Parameter::BigRadius => {
                self.big_radius = clamp_to(self.big_radius + delta, &RADIUS_RANGE)
            }
            Parameter::SmallRadius => {
                self.small_radius = clamp_to(self.small_radius + delta, &RADIUS_RANGE)
            }
            Parameter::Rotation => self.rotation = clamp_to(self.rotation + delta, &ROTATION_RANGE),
            Parameter::Scale => self.scale = clamp_to(self.scale + delta, &SCALE_RANGE),
            Parameter::Cycles => {
                let cycles = (self.cycles as i64 + steps as i64)
                    .clamp(*CYCLES_RANGE.start() as i64, *CYCLES_RANGE.end() as i64);
                self.cycles = cycles as u32;
            }
        }
    }
}

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

/// One editable field of [`ShapeParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    BigRadius,
    SmallRadius,
    Rotation,
    Scale,
    Cycles,
}

impl Parameter {
    /// Amount a single control panel step changes the field by.
    pub fn increment(self) -> f32 {
        match self {
            Parameter::BigRadius | Parameter::SmallRadius => 0.5,
            Parameter::Rotation => 5.0,
            Parameter::Scale => 0.05,
            Parameter::Cycles => 1.0,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Parameter::BigRadius => "R (radius of larger circle)",
            Parameter::SmallRadius => "r (radius of smaller circle)",
            Parameter::Rotation => "rotation (degree)",
            Parameter::Scale => "scale",
            Parameter::Cycles => "n (number of cycles)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = ShapeParameters::default();
        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.clamped(), params);
    }

    #[test]
    fn validation_errors() {
        let params = ShapeParameters {
            small_radius: 0.0,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParameterError::NonPositiveRadius(Parameter::SmallRadius, 0.0))
        );

        let params = ShapeParameters {
            scale: -1.0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParameterError::NegativeScale(-1.0)));

        let params = ShapeParameters {
            cycles: 0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParameterError::NoCycles));

        let params = ShapeParameters {
            rotation: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParameterError::NotFinite(Parameter::Rotation))
        );
    }

    #[test]
    fn error_messages() {
        let error = ParameterError::NonPositiveRadius(Parameter::SmallRadius, 0.0);
        assert_eq!(
            error.to_string(),
            "r (radius of smaller circle) must be positive, got 0"
        );
    }

    #[test]
    fn clamping_repairs_invalid_values() {
        let params = ShapeParameters {
            big_radius: 42.0,
            small_radius: 0.0,
            cycles: 0,
            rotation: f32::INFINITY,
            scale: -3.0,
        }
        .clamped();

        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.big_radius, 20.0);
        assert_eq!(params.small_radius, 1.0);
        assert_eq!(params.cycles, 1);
        assert_eq!(params.rotation, 0.0);
        assert_eq!(params.scale, 0.0);
    }

    #[test]
    fn nudging_respects_ranges() {
        let mut params = ShapeParameters::default();

        params.nudge(Parameter::BigRadius, 1);
        assert_eq!(params.big_radius, 19.5);
        params.nudge(Parameter::BigRadius, 10);
        assert_eq!(params.big_radius, 20.0);

        params.nudge(Parameter::Cycles, -10);
        assert_eq!(params.cycles, 1);
        params.nudge(Parameter::Cycles, 3);
        assert_eq!(params.cycles, 4);

        params.nudge(Parameter::Rotation, -40);
        assert_eq!(params.rotation, -180.0);

        params.nudge(Parameter::Scale, -100);
        assert_eq!(params.scale, 0.0);
    }
}
