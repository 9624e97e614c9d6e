use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Barycentric hit on a triangle. `t` is measured in units of the ray direction.
#[derive(Debug, Clone, Copy)]
pub struct TriangleHit {
    pub t: f32,
    pub u: f32,
    pub v: f32,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Direction is not renormalized, so distances stay comparable after mapping back.
    pub fn transformed(&self, matrix: &Mat4) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }

    // Möller–Trumbore, double sided
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<TriangleHit> {
        const EPSILON: f32 = 1e-7;

        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);

        if det.abs() < EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        if t <= EPSILON {
            return None;
        }

        Some(TriangleHit { t, u, v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_triangle_facing_the_ray() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::NEG_Z);
        let hit = ray
            .intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Y)
            .unwrap();

        assert!((hit.t - 1.0).abs() < 1e-5);
        assert!((hit.u - 0.25).abs() < 1e-5);
        assert!((hit.v - 0.25).abs() < 1e-5);
    }

    #[test]
    fn misses_outside_triangle() {
        let ray = Ray::new(Vec3::new(0.9, 0.9, 1.0), Vec3::NEG_Z);
        assert!(ray
            .intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Y)
            .is_none());
    }

    #[test]
    fn ignores_triangles_behind_origin() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, -1.0), Vec3::NEG_Z);
        assert!(ray
            .intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Y)
            .is_none());
    }
}
