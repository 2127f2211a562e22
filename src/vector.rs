use std::f64::consts::TAU;
use std::ops::{Add, Mul, Neg, Sub};

/// Immutable 2D vector stored in polar form: direction cosines plus magnitude.
///
/// A zero-length vector is always `cos = 1, sin = 0, len = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    cos: f64,
    sin: f64,
    len: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector {
        cos: 1.0,
        sin: 0.0,
        len: 0.0,
    };

    /// Builds a vector from Cartesian components.
    pub fn new(x: f64, y: f64) -> Self {
        let len = x.hypot(y);
        if len == 0.0 {
            return Self::ZERO;
        }
        Self {
            cos: x / len,
            sin: y / len,
            len,
        }
    }

    pub fn cos(&self) -> f64 {
        self.cos
    }

    pub fn sin(&self) -> f64 {
        self.sin
    }

    pub fn len(&self) -> f64 {
        self.len
    }

    pub fn x(&self) -> f64 {
        self.cos() * self.len
    }

    pub fn y(&self) -> f64 {
        self.sin() * self.len
    }

    /// Same direction, new magnitude. A negative magnitude points the other way.
    pub fn with_len(&self, len: f64) -> Self {
        Self::new(self.cos() * len, self.sin() * len)
    }

    /// Direction in `[0, 2π)`; zero vectors map to `0`.
    pub fn radians(&self) -> f64 {
        if self.len == 0.0 {
            return 0.0;
        }
        let mut angle = self.y().atan2(self.x());
        if angle < 0.0 {
            angle += TAU;
        }
        // -0.0 + TAU and tiny negatives can round up to exactly TAU
        if angle >= TAU { 0.0 } else { angle }
    }

    pub fn degrees(&self) -> f64 {
        self.radians().to_degrees()
    }
}

impl Default for Vector {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x() + rhs.x(), self.y() + rhs.y())
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x() - rhs.x(), self.y() - rhs.y())
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self * -1.0
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, scalar: f64) -> Vector {
        Vector::new(self.x() * scalar, self.y() * scalar)
    }
}

impl std::iter::Sum for Vector {
    fn sum<I: Iterator<Item = Vector>>(iter: I) -> Vector {
        iter.fold(Vector::ZERO, |acc, v| acc + v)
    }
}
