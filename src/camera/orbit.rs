//! Orbit controls
//!
//! Rotates the camera around a target point with mouse drags and zooms
//! with the wheel. The camera coordinator disables them during scripted
//! moves.

use std::f32::consts::PI;

use glam::Vec3;

use crate::camera::{look_rotation, Camera};

#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Point the camera orbits around
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar limits measured from +Y (radians)
    pub min_polar: f32,
    pub max_polar: f32,
    /// Radians per pixel of drag
    pub rotate_speed: f32,
    /// Fraction of the distance per wheel line
    pub zoom_speed: f32,

    enabled: bool,
    radius: f32,
    azimuth: f32,
    polar: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            min_distance: 4.0,
            max_distance: 40.0,
            min_polar: 0.15,
            max_polar: PI * 0.48,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            enabled: true,
            radius: 10.0,
            azimuth: 0.0,
            polar: PI * 0.25,
        }
    }
}

impl OrbitControls {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Re-derives the spherical coordinates after the camera was moved by something else.
    pub fn sync_from(&mut self, camera: &Camera, target: Vec3) {
        self.target = target;

        let offset = camera.position - target;
        self.radius = offset.length().max(1e-4);
        self.polar = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        self.azimuth = offset.x.atan2(offset.z);
    }

    /// Returns false when disabled and the camera was left alone.
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32, camera: &mut Camera) -> bool {
        if !self.enabled {
            return false;
        }

        self.azimuth -= delta_x * self.rotate_speed;
        self.polar -= delta_y * self.rotate_speed;
        self.apply(camera);
        true
    }

    pub fn zoom(&mut self, lines: f32, camera: &mut Camera) -> bool {
        if !self.enabled {
            return false;
        }

        self.radius *= 1.0 - lines * self.zoom_speed;
        self.apply(camera);
        true
    }

    fn apply(&mut self, camera: &mut Camera) {
        self.polar = self.polar.clamp(self.min_polar, self.max_polar);
        self.radius = self.radius.clamp(self.min_distance, self.max_distance);

        let offset = Vec3::new(
            self.polar.sin() * self.azimuth.sin(),
            self.polar.cos(),
            self.polar.sin() * self.azimuth.cos(),
        ) * self.radius;

        camera.position = self.target + offset;
        if let Some(rotation) = look_rotation(camera.position, self.target) {
            camera.rotation = rotation;
        }
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(position: Vec3) -> Camera {
        let mut camera = Camera {
            position,
            ..Default::default()
        };
        camera.look_at(Vec3::ZERO);
        camera
    }

    #[test]
    fn sync_then_rotate_keeps_distance() {
        let mut camera = camera_at(Vec3::new(0.0, 5.0, 10.0));
        let mut controls = OrbitControls::default();
        controls.sync_from(&camera, Vec3::ZERO);
        let before = camera.position.length();

        assert!(controls.rotate(40.0, 0.0, &mut camera));

        assert!((camera.position.length() - before).abs() < 1e-3);
        assert!(camera.position.x.abs() > 0.1);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut camera = camera_at(Vec3::new(0.0, 5.0, 10.0));
        let mut controls = OrbitControls::default();
        controls.sync_from(&camera, Vec3::ZERO);

        controls.rotate(0.0, 10_000.0, &mut camera);
        assert!((controls.polar() - controls.min_polar).abs() < 1e-5);

        controls.rotate(0.0, -10_000.0, &mut camera);
        assert!((controls.polar() - controls.max_polar).abs() < 1e-5);
    }

    #[test]
    fn disabled_controls_leave_camera_alone() {
        let mut camera = camera_at(Vec3::new(0.0, 5.0, 10.0));
        let mut controls = OrbitControls::default();
        controls.sync_from(&camera, Vec3::ZERO);
        controls.set_enabled(false);

        assert!(!controls.rotate(50.0, 50.0, &mut camera));
        assert!(!controls.zoom(3.0, &mut camera));
        assert_eq!(camera.position, Vec3::new(0.0, 5.0, 10.0));
    }

    #[test]
    fn zoom_respects_distance_limits() {
        let mut camera = camera_at(Vec3::new(0.0, 5.0, 10.0));
        let mut controls = OrbitControls::default();
        controls.sync_from(&camera, Vec3::ZERO);

        for _ in 0..100 {
            controls.zoom(5.0, &mut camera);
        }

        assert!((controls.distance() - controls.min_distance).abs() < 1e-4);
    }
}
