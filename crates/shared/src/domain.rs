use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn approx_eq(&self, other: &Vec3, tolerance: f32) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, factor: f32) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, factor: f32) -> Vec3 {
        Vec3::new(self.x / factor, self.y / factor, self.z / factor)
    }
}

/// Named control-point slot shared by the haptic and geometry sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointSlot {
    Point0,
    Point1,
    Point2,
    Point3,
    Point4,
    Point5,
}

pub const POINT_COUNT: usize = 6;

impl PointSlot {
    pub const ALL: [PointSlot; POINT_COUNT] = [
        PointSlot::Point0,
        PointSlot::Point1,
        PointSlot::Point2,
        PointSlot::Point3,
        PointSlot::Point4,
        PointSlot::Point5,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            PointSlot::Point0 => "point0",
            PointSlot::Point1 => "point1",
            PointSlot::Point2 => "point2",
            PointSlot::Point3 => "point3",
            PointSlot::Point4 => "point4",
            PointSlot::Point5 => "point5",
        }
    }
}

/// Which wire field carries the figure code, and which codes it understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentVariant {
    /// `state`: 1 plays the line, anything else stops.
    #[default]
    State,
    /// `figures`: 1..=4 select a shape and also drive the geometry slots.
    Figures,
}

impl DeploymentVariant {
    pub fn code_field(self) -> &'static str {
        match self {
            DeploymentVariant::State => "state",
            DeploymentVariant::Figures => "figures",
        }
    }

    pub fn drives_geometry(self) -> bool {
        matches!(self, DeploymentVariant::Figures)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeId {
    #[default]
    None,
    Line,
    Triangle,
    Square,
    Pentagon,
}

impl ShapeId {
    /// `Figures` codes: 1 line, 2 pentagon, 3 triangle, 4 square.
    pub fn from_code(variant: DeploymentVariant, code: i64) -> Self {
        match (variant, code) {
            (DeploymentVariant::State, 1) => ShapeId::Line,
            (DeploymentVariant::State, _) => ShapeId::None,
            (DeploymentVariant::Figures, 1) => ShapeId::Line,
            (DeploymentVariant::Figures, 2) => ShapeId::Pentagon,
            (DeploymentVariant::Figures, 3) => ShapeId::Triangle,
            (DeploymentVariant::Figures, 4) => ShapeId::Square,
            (DeploymentVariant::Figures, _) => ShapeId::None,
        }
    }

    pub fn is_none(self) -> bool {
        self == ShapeId::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub id: i64,
    pub temperature: String,
    pub state_code: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActiveFigureState {
    pub current_shape: ShapeId,
    pub haptic_enabled: bool,
}

impl ActiveFigureState {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn playing(shape: ShapeId) -> Self {
        Self {
            current_shape: shape,
            haptic_enabled: !shape.is_none(),
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
