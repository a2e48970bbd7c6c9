use glam::DQuat;

use super::vec::Vec3;

/// Represents a transformation as translation + scale + rot
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub translation: Vec3,
    pub scale: Vec3,
    pub rot: DQuat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

pub trait Transformer<T> {
    fn apply(&self, v: T) -> T;
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        scale: Vec3::ONE,
        rot: DQuat::IDENTITY,
    };

    pub fn scaled(scale: f64) -> Self {
        Self {
            scale: Vec3::splat(scale),
            ..Self::IDENTITY
        }
    }

    /// A transform with a negative scale determinant flips the winding of every triangle
    pub fn flips_winding(&self) -> bool {
        self.scale.x * self.scale.y * self.scale.z < 0.0
    }
}

/// Points: rotation then scale then translation
pub struct Position(pub Vec3);
/// Normals: rotation then inverse scale, renormalized
pub struct Direction(pub Vec3);

impl Transformer<Position> for Transform {
    fn apply(&self, Position(v): Position) -> Position {
        let rotated = self.rot.mul_vec3(v);
        Position(self.scale * rotated + self.translation)
    }
}

impl Transformer<Direction> for Transform {
    fn apply(&self, Direction(v): Direction) -> Direction {
        let rotated = self.rot.mul_vec3(v);
        Direction((rotated / self.scale).normalize_or_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let Position(q) = Transform::default().apply(Position(p));
        assert_eq!(p, q);
    }

    #[test]
    fn scale_then_translate() {
        let t = Transform {
            translation: Vec3::new(1.0, 0.0, 0.0),
            scale: Vec3::splat(2.0),
            rot: DQuat::IDENTITY,
        };
        let Position(q) = t.apply(Position(Vec3::new(1.0, 1.0, 1.0)));
        assert_eq!(q, Vec3::new(3.0, 2.0, 2.0));

        let Direction(n) = t.apply(Direction(Vec3::Z));
        assert!((n - Vec3::Z).length() < 1e-12);
        assert!(!t.flips_winding());
    }

    #[test]
    fn mirrors_flip_the_winding() {
        assert!(Transform::scaled(-1.0).flips_winding());
        let t = Transform {
            scale: Vec3::new(-1.0, -2.0, 1.0),
            ..Transform::IDENTITY
        };
        assert!(!t.flips_winding());
    }
}
