pub mod coordinator;
pub mod orbit;

use std::collections::BTreeMap;

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use serde::Deserialize;

use crate::math::Ray;

pub use coordinator::{CameraCoordinator, CameraState};
pub use orbit::OrbitControls;

pub const DEFAULT_POSE: &str = "default";
pub const INTRO_POSE: &str = "intro";
pub const WHITEBOARD_POSE: &str = "whiteboard";

/// Perspective camera. Right handed, looking down its local -Z like glTF cameras.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            rotation: Quat::IDENTITY,
            fov_y: 35.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 200.0,
        }
    }
}

impl Camera {
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn look_at(&mut self, target: Vec3) {
        if let Some(rotation) = look_rotation(self.position, target) {
            self.rotation = rotation;
        }
    }

    pub fn set_resolution(&mut self, resolution: Vec2) {
        if resolution.x > 0.0 && resolution.y > 0.0 {
            self.aspect = resolution.x / resolution.y;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));

        Ray::new(near, (far - near).normalize_or_zero())
    }
}

/// Rotation that points -Z from `eye` toward `target`. None when they coincide.
pub fn look_rotation(eye: Vec3, target: Vec3) -> Option<Quat> {
    let forward = (target - eye).normalize_or_zero();
    if forward == Vec3::ZERO {
        return None;
    }

    let up = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
        Vec3::Z
    } else {
        Vec3::Y
    };

    let view = Mat4::look_at_rh(eye, target, up);
    Some(Quat::from_mat4(&view.inverse()).normalize())
}

/// Named camera placement. Orientation (XYZ Euler radians) wins over `look_at`.
#[derive(Debug, Clone, Deserialize)]
pub struct Pose {
    pub position: [f32; 3],
    #[serde(default)]
    pub orientation: Option<[f32; 3]>,
    #[serde(default)]
    pub look_at: Option<[f32; 3]>,
}

#[derive(Debug, Clone, Copy)]
pub struct ResolvedPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub target: Vec3,
}

impl Pose {
    pub fn looking_at(position: [f32; 3], look_at: [f32; 3]) -> Self {
        Self {
            position,
            orientation: None,
            look_at: Some(look_at),
        }
    }

    /// Fills in whatever the pose leaves open from the camera's live state.
    pub fn resolve(&self, camera: &Camera, current_target: Vec3) -> ResolvedPose {
        let position = Vec3::from_array(self.position);
        let look_at = self.look_at.map(Vec3::from_array);

        let rotation = match (self.orientation, look_at) {
            (Some([x, y, z]), _) => Quat::from_euler(EulerRot::XYZ, x, y, z),
            (None, Some(target)) => look_rotation(position, target).unwrap_or(camera.rotation),
            (None, None) => camera.rotation,
        };

        let target = look_at.unwrap_or_else(|| {
            let distance = current_target.distance(camera.position).max(1.0);
            position + rotation * Vec3::NEG_Z * distance
        });

        ResolvedPose {
            position,
            rotation,
            target,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PoseTable(BTreeMap<String, Pose>);

impl PoseTable {
    pub fn new(poses: BTreeMap<String, Pose>) -> Self {
        Self(poses)
    }

    pub fn get(&self, name: &str) -> Option<&Pose> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, pose: Pose) {
        self.0.insert(name.into(), pose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_rotation_points_forward_at_target() {
        let eye = Vec3::new(5.0, 5.0, 5.0);
        let rotation = look_rotation(eye, Vec3::ZERO).unwrap();

        let forward = rotation * Vec3::NEG_Z;
        assert!((forward - (-eye).normalize()).length() < 1e-4);
    }

    #[test]
    fn look_rotation_handles_straight_down() {
        let rotation = look_rotation(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO).unwrap();
        let forward = rotation * Vec3::NEG_Z;

        assert!((forward - Vec3::NEG_Y).length() < 1e-4);
    }

    #[test]
    fn center_ray_follows_camera_forward() {
        let mut camera = Camera {
            position: Vec3::new(0.0, 2.0, 8.0),
            ..Default::default()
        };
        camera.look_at(Vec3::new(0.0, 2.0, 0.0));

        let ray = camera.ray_from_ndc(Vec2::ZERO);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-3);
        assert!((ray.origin.z - (8.0 - camera.near)).abs() < 1e-2);
    }

    #[test]
    fn pose_orientation_overrides_look_at() {
        let pose = Pose {
            position: [0.0, 0.0, 0.0],
            orientation: Some([0.0, std::f32::consts::FRAC_PI_2, 0.0]),
            look_at: Some([0.0, 0.0, -10.0]),
        };

        let resolved = pose.resolve(&Camera::default(), Vec3::ZERO);
        let forward = resolved.rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_X).length() < 1e-4);
    }
}
