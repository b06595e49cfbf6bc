//! Geometry value types and pure helpers for gesture classification.
//!
//! All sensor-space quantities are in meters; screen-space quantities are in
//! pixels. Rects may have inverted axis directions (right < left, bottom < top)
//! to express coordinate-flip mappings, so signed deltas and absolute
//! width/height are kept separate.

use crate::constants::{TAN_30_DEGREES, TAN_60_DEGREES};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A 3D point in sensor space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A 3D displacement between two points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Drop the z component
    pub const fn project_xy(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn magnitude(self) -> f64 {
        let sq = self.x * self.x + self.y * self.y + self.z * self.z;
        // Identical points must compare as exactly zero distance.
        if sq == 0.0 {
            0.0
        } else {
            sq.sqrt()
        }
    }
}

/// Component-wise `to - from`
pub fn relative(from: Point3, to: Point3) -> Vector3 {
    Vector3::new(to.x - from.x, to.y - from.y, to.z - from.z)
}

/// Euclidean distance between two points
pub fn distance(a: Point3, b: Point3) -> f64 {
    relative(a, b).magnitude()
}

/// A 2D value type used for all screen and plane-projected quantities
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn magnitude(self) -> f64 {
        let sq = self.x * self.x + self.y * self.y;
        if sq == 0.0 {
            0.0
        } else {
            sq.sqrt()
        }
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul for Vector2 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;
    fn mul(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self * rhs.x, self * rhs.y)
    }
}

impl Div for Vector2 {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// A rectangle given by its edges. Axis directions may be inverted
/// (right < left, bottom < top) to flip the mapped coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Signed horizontal extent (negative when the axis is inverted)
    pub fn delta_x(&self) -> f64 {
        self.right - self.left
    }

    /// Signed vertical extent (negative when the axis is inverted)
    pub fn delta_y(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn width(&self) -> f64 {
        self.delta_x().abs()
    }

    pub fn height(&self) -> f64 {
        self.delta_y().abs()
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(
            self.left + self.delta_x() * 0.5,
            self.top + self.delta_y() * 0.5,
        )
    }
}

/// Coarse direction bucket for a 2D vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleClass {
    Horizontal,
    Diagonal,
    Vertical,
}

/// Bucket a vector by its |y|/|x| tangent against the 30°/60° thresholds,
/// without computing `atan`. A vector with either component exactly zero is
/// never diagonal; the zero vector classifies as horizontal.
pub fn classify_xy(x: f64, y: f64) -> AngleClass {
    if y == 0.0 {
        return AngleClass::Horizontal;
    }
    if x == 0.0 {
        return AngleClass::Vertical;
    }
    let tangent = y.abs() / x.abs();
    if tangent <= TAN_30_DEGREES {
        AngleClass::Horizontal
    } else if tangent >= TAN_60_DEGREES {
        AngleClass::Vertical
    } else {
        AngleClass::Diagonal
    }
}

/// 3D vertical test: |y| must dominate both |x| and |z| scaled by `tolerance`.
/// Independent from [`classify_xy`]; certain gestures require both to hold.
pub fn is_vertical_3d(v: Vector3, tolerance: f64) -> bool {
    let y = v.y.abs() * tolerance;
    y > v.x.abs() && y > v.z.abs()
}
