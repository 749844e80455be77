//! Hypocycloid generation and animation: the curve sampler, the placement
//! transforms and the scene state driven by the viewer's frame loop.

pub mod config;
pub mod geometry;
pub mod params;
pub mod scene;
pub mod transform;

pub use config::{ColorChannel, ViewerConfig};
pub use params::{Parameter, ParameterError, ShapeParameters};
pub use scene::{AnimationCursor, Curve, Phase, Primitive, Scene, ShapeKind, Shapes};
