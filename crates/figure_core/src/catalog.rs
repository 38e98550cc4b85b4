//! Static control-point tables for every figure the endpoint can select.
//!
//! Points are in normalized units on the z = 0 plane. Shapes with fewer than
//! six vertices repeat their first vertex (or, for the line, its far end) so
//! the polyline closes and the sequence length never changes.

use shared::domain::{ShapeId, Vec3, POINT_COUNT};

pub type ControlPoints = [Vec3; POINT_COUNT];

const LINE: ControlPoints = [
    Vec3::new(-0.01, 0.0, 0.0),
    Vec3::new(0.01, 0.0, 0.0),
    Vec3::new(0.01, 0.0, 0.0),
    Vec3::new(0.01, 0.0, 0.0),
    Vec3::new(0.01, 0.0, 0.0),
    Vec3::new(0.01, 0.0, 0.0),
];

const TRIANGLE: ControlPoints = [
    Vec3::new(0.0, 0.01, 0.0),
    Vec3::new(-0.008_660_254, -0.005, 0.0),
    Vec3::new(0.008_660_254, -0.005, 0.0),
    Vec3::new(0.0, 0.01, 0.0),
    Vec3::new(0.0, 0.01, 0.0),
    Vec3::new(0.0, 0.01, 0.0),
];

const SQUARE: ControlPoints = [
    Vec3::new(-0.01, 0.01, 0.0),
    Vec3::new(0.01, 0.01, 0.0),
    Vec3::new(0.01, -0.01, 0.0),
    Vec3::new(-0.01, -0.01, 0.0),
    Vec3::new(-0.01, 0.01, 0.0),
    Vec3::new(-0.01, 0.01, 0.0),
];

const PENTAGON: ControlPoints = [
    Vec3::new(0.0, 0.01, 0.0),
    Vec3::new(-0.009_510_565, 0.003_090_17, 0.0),
    Vec3::new(-0.005_877_853, -0.008_090_17, 0.0),
    Vec3::new(0.005_877_853, -0.008_090_17, 0.0),
    Vec3::new(0.009_510_565, 0.003_090_17, 0.0),
    Vec3::new(0.0, 0.01, 0.0),
];

pub fn coordinates_for(shape: ShapeId) -> Option<ControlPoints> {
    match shape {
        ShapeId::None => None,
        ShapeId::Line => Some(LINE),
        ShapeId::Triangle => Some(TRIANGLE),
        ShapeId::Square => Some(SQUARE),
        ShapeId::Pentagon => Some(PENTAGON),
    }
}

pub fn scaled(points: &ControlPoints, factor: f32) -> ControlPoints {
    points.map(|point| point * factor)
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
