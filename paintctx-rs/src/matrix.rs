//! Matrix2D type for 2D affine transformations.

use crate::geometry::Point;

/// Matrix2D represents a 2D affine transformation.
///
/// Points are treated as row vectors, so a point maps as:
/// ```text
/// x' = x * m00 + y * m10 + m20
/// y' = x * m01 + y * m11 + m21
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2D {
    pub m00: f64,
    pub m01: f64,
    pub m10: f64,
    pub m11: f64,
    /// Translate X component.
    pub m20: f64,
    /// Translate Y component.
    pub m21: f64,
}

impl Matrix2D {
    pub const IDENTITY: Matrix2D = Matrix2D::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Create a new Matrix2D with the specified components.
    pub const fn new(m00: f64, m01: f64, m10: f64, m11: f64, m20: f64, m21: f64) -> Self {
        Self {
            m00,
            m01,
            m10,
            m11,
            m20,
            m21,
        }
    }

    /// Create an identity matrix.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    pub const fn translation(x: f64, y: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    pub const fn scaling(x: f64, y: f64) -> Self {
        Self::new(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    /// Rotation by `angle` radians about the origin.
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Rotation by `angle` radians about `(x, y)`.
    pub fn rotation_around(angle: f64, x: f64, y: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            cos,
            sin,
            -sin,
            cos,
            x - x * cos + y * sin,
            y - x * sin - y * cos,
        )
    }

    /// Skew by angles `x` and `y` (radians).
    pub fn skewing(x: f64, y: f64) -> Self {
        Self::new(1.0, y.tan(), x.tan(), 1.0, 0.0, 0.0)
    }

    /// Compose so that `self` is applied first and `other` second.
    pub fn then(&self, other: &Matrix2D) -> Matrix2D {
        Matrix2D {
            m00: self.m00 * other.m00 + self.m01 * other.m10,
            m01: self.m00 * other.m01 + self.m01 * other.m11,
            m10: self.m10 * other.m00 + self.m11 * other.m10,
            m11: self.m10 * other.m01 + self.m11 * other.m11,
            m20: self.m20 * other.m00 + self.m21 * other.m10 + other.m20,
            m21: self.m20 * other.m01 + self.m21 * other.m11 + other.m21,
        }
    }

    pub fn map_point(&self, pt: Point) -> Point {
        Point::new(
            pt.x * self.m00 + pt.y * self.m10 + self.m20,
            pt.x * self.m01 + pt.y * self.m11 + self.m21,
        )
    }

    pub fn is_finite(&self) -> bool {
        [self.m00, self.m01, self.m10, self.m11, self.m20, self.m21]
            .iter()
            .all(|v| v.is_finite())
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Matrix2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<tiny_skia::Transform> for Matrix2D {
    fn from(t: tiny_skia::Transform) -> Self {
        Matrix2D::new(
            t.sx as f64,
            t.ky as f64,
            t.kx as f64,
            t.sy as f64,
            t.tx as f64,
            t.ty as f64,
        )
    }
}

impl From<Matrix2D> for tiny_skia::Transform {
    fn from(m: Matrix2D) -> Self {
        tiny_skia::Transform::from_row(
            m.m00 as f32,
            m.m01 as f32,
            m.m10 as f32,
            m.m11 as f32,
            m.m20 as f32,
            m.m21 as f32,
        )
    }
}
