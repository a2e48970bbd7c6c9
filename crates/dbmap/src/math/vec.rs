pub use glam::DVec3 as Vec3;

use crate::error::{DomainError, Result};

pub trait ReflVecExt {
    fn reflect(self, normal: Vec3) -> Vec3;
}

impl ReflVecExt for Vec3 {
    /// Mirror `self` about the plane of normal `normal`
    fn reflect(self, normal: Vec3) -> Vec3 {
        -((2.0 * self.dot(normal)) * normal - self)
    }
}

pub trait Vec3NormalizeExt: Sized {
    /// Like `normalize`, but a zero-length (or non finite) vector is a [DomainError] instead of NaNs.
    fn normalize_checked(self) -> Result<Self>;
}

impl Vec3NormalizeExt for Vec3 {
    fn normalize_checked(self) -> Result<Self> {
        self.try_normalize().ok_or(DomainError::ZeroLengthVector)
    }
}

pub trait Vec3SameSideExt {
    fn same_side(self, normal: Vec3, side: f64) -> Self;
}

impl Vec3SameSideExt for Vec3 {
    /// Returns self if `sign(normal . self) == sign(side)`, else -self
    ///
    /// Signs are taken in {-1, 0, 1}, so a vector lying exactly in the plane only stays unchanged
    /// when `side` is 0 too.
    fn same_side(self, normal: Vec3, side: f64) -> Self {
        if sign(normal.dot(self)) != sign(side) {
            -self
        } else {
            self
        }
    }
}

fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}
