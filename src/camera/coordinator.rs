use glam::{Quat, Vec3};

use crate::camera::{Camera, OrbitControls, PoseTable, ResolvedPose, DEFAULT_POSE};
use crate::tween::{Easing, Tween};

pub type OnComplete = Box<dyn FnOnce()>;

pub struct Transition {
    position: Tween<Vec3>,
    rotation: Tween<Quat>,
    target: Tween<Vec3>,
}

impl Transition {
    fn new(camera: &Camera, current_target: Vec3, to: ResolvedPose, duration: f32) -> Self {
        Self {
            position: Tween::new(camera.position, to.position, duration, Easing::CubicInOut),
            rotation: Tween::new(camera.rotation, to.rotation, duration, Easing::CubicInOut),
            target: Tween::new(current_target, to.target, duration, Easing::CubicInOut),
        }
    }

    fn advance(&mut self, dt: f32, camera: &mut Camera) -> Vec3 {
        camera.position = self.position.advance(dt);
        camera.rotation = self.rotation.advance(dt).normalize();
        self.target.advance(dt)
    }

    fn is_finished(&self) -> bool {
        self.position.is_finished()
    }
}

pub enum CameraState {
    Idle {
        pose: Option<String>,
    },
    Transitioning {
        from: Option<String>,
        to: String,
        transition: Transition,
        on_complete: Option<OnComplete>,
    },
}

/// Drives scripted flights between named poses. One flight at a time; a new
/// request replaces the running one and its completion callback is dropped.
pub struct CameraCoordinator {
    poses: PoseTable,
    state: CameraState,
}

impl CameraCoordinator {
    pub fn new(poses: PoseTable) -> Self {
        Self {
            poses,
            state: CameraState::Idle { pose: None },
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, CameraState::Transitioning { .. })
    }

    /// Name of the pose the camera rests at, or is flying to.
    pub fn current_pose(&self) -> Option<&str> {
        match &self.state {
            CameraState::Idle { pose } => pose.as_deref(),
            CameraState::Transitioning { to, .. } => Some(to),
        }
    }

    /// Places the camera at a pose without animating. Cancels any flight.
    pub fn snap_to(&mut self, name: &str, camera: &mut Camera, controls: &mut OrbitControls) -> bool {
        let Some(pose) = self.poses.get(name) else {
            log::warn!("Unknown camera pose {:?}", name);
            return false;
        };

        let resolved = pose.resolve(camera, controls.target);
        camera.position = resolved.position;
        camera.rotation = resolved.rotation;
        controls.sync_from(camera, resolved.target);
        controls.set_enabled(name == DEFAULT_POSE);

        self.state = CameraState::Idle {
            pose: Some(name.to_string()),
        };
        true
    }

    /// Starts a flight from the live camera to `name`. Unknown names are a
    /// logged no-op and leave any running flight untouched.
    pub fn zoom_to(
        &mut self,
        name: &str,
        duration: f32,
        on_complete: Option<OnComplete>,
        camera: &Camera,
        controls: &mut OrbitControls,
    ) -> bool {
        let Some(pose) = self.poses.get(name) else {
            log::warn!("Unknown camera pose {:?}; staying put", name);
            return false;
        };

        let resolved = pose.resolve(camera, controls.target);
        let transition = Transition::new(camera, controls.target, resolved, duration);

        let from = match &self.state {
            CameraState::Idle { pose } => pose.clone(),
            CameraState::Transitioning { to, .. } => {
                log::debug!("Camera flight to {:?} superseded by {:?}", to, name);
                None
            }
        };

        controls.set_enabled(false);
        self.state = CameraState::Transitioning {
            from,
            to: name.to_string(),
            transition,
            on_complete,
        };
        true
    }

    pub fn reset_to_default(
        &mut self,
        duration: f32,
        on_complete: Option<OnComplete>,
        camera: &Camera,
        controls: &mut OrbitControls,
    ) -> bool {
        self.zoom_to(DEFAULT_POSE, duration, on_complete, camera, controls)
    }

    /// Advances the running flight. Returns the pose name on arrival.
    pub fn update(
        &mut self,
        dt: f32,
        camera: &mut Camera,
        controls: &mut OrbitControls,
    ) -> Option<String> {
        let CameraState::Transitioning { transition, .. } = &mut self.state else {
            return None;
        };

        let target = transition.advance(dt, camera);
        controls.target = target;

        if !transition.is_finished() {
            return None;
        }

        let previous = std::mem::replace(&mut self.state, CameraState::Idle { pose: None });
        let CameraState::Transitioning {
            from,
            to,
            on_complete,
            ..
        } = previous
        else {
            return None;
        };

        log::debug!("Camera arrived at {:?} (from {:?})", to, from);

        controls.sync_from(camera, target);
        controls.set_enabled(to == DEFAULT_POSE);
        self.state = CameraState::Idle {
            pose: Some(to.clone()),
        };

        if let Some(on_complete) = on_complete {
            on_complete();
        }

        Some(to)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::camera::{Pose, WHITEBOARD_POSE};

    fn setup() -> (CameraCoordinator, Camera, OrbitControls) {
        let mut poses = PoseTable::default();
        poses.insert(DEFAULT_POSE, Pose::looking_at([10.0, 6.0, 10.0], [0.0, 2.0, 0.0]));
        poses.insert(WHITEBOARD_POSE, Pose::looking_at([-1.0, 4.0, 1.0], [-1.0, 4.0, -3.0]));

        let mut coordinator = CameraCoordinator::new(poses);
        let mut camera = Camera::default();
        let mut controls = OrbitControls::default();
        coordinator.snap_to(DEFAULT_POSE, &mut camera, &mut controls);

        (coordinator, camera, controls)
    }

    fn flag() -> (Rc<Cell<bool>>, OnComplete) {
        let fired = Rc::new(Cell::new(false));
        let setter = fired.clone();
        (fired, Box::new(move || setter.set(true)))
    }

    #[test]
    fn superseded_flight_never_completes() {
        let (mut coordinator, mut camera, mut controls) = setup();
        coordinator.zoom_to(WHITEBOARD_POSE, 1.0, None, &camera, &mut controls);
        coordinator.update(0.5, &mut camera, &mut controls);

        let (whiteboard_fired, on_whiteboard) = flag();
        let (default_fired, on_default) = flag();

        coordinator.zoom_to(WHITEBOARD_POSE, 1.0, Some(on_whiteboard), &camera, &mut controls);
        coordinator.zoom_to(DEFAULT_POSE, 1.0, Some(on_default), &camera, &mut controls);

        let mut arrivals = Vec::new();
        for _ in 0..40 {
            if let Some(arrived) = coordinator.update(0.05, &mut camera, &mut controls) {
                arrivals.push(arrived);
            }
        }

        assert_eq!(arrivals, vec![DEFAULT_POSE.to_string()]);
        assert!(!whiteboard_fired.get());
        assert!(default_fired.get());
        assert!((camera.position - Vec3::new(10.0, 6.0, 10.0)).length() < 1e-4);
        assert!(!coordinator.is_transitioning());
    }

    #[test]
    fn special_pose_keeps_manual_input_disabled() {
        let (mut coordinator, mut camera, mut controls) = setup();
        assert!(controls.is_enabled());

        coordinator.zoom_to(WHITEBOARD_POSE, 0.5, None, &camera, &mut controls);
        assert!(!controls.is_enabled());

        coordinator.update(1.0, &mut camera, &mut controls);
        assert_eq!(coordinator.current_pose(), Some(WHITEBOARD_POSE));
        assert!(!controls.is_enabled());

        coordinator.reset_to_default(0.5, None, &camera, &mut controls);
        coordinator.update(1.0, &mut camera, &mut controls);
        assert!(controls.is_enabled());
    }

    #[test]
    fn unknown_pose_is_a_no_op() {
        let (mut coordinator, mut camera, mut controls) = setup();
        coordinator.zoom_to(WHITEBOARD_POSE, 1.0, None, &camera, &mut controls);
        coordinator.update(0.25, &mut camera, &mut controls);
        let position = camera.position;

        assert!(!coordinator.zoom_to("attic", 1.0, None, &camera, &mut controls));

        assert_eq!(camera.position, position);
        assert_eq!(coordinator.current_pose(), Some(WHITEBOARD_POSE));
        assert!(coordinator.is_transitioning());
    }

    #[test]
    fn flight_ends_looking_at_pose_target() {
        let (mut coordinator, mut camera, mut controls) = setup();
        coordinator.zoom_to(WHITEBOARD_POSE, 0.8, None, &camera, &mut controls);
        coordinator.update(2.0, &mut camera, &mut controls);

        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-3);
        assert!((controls.target - Vec3::new(-1.0, 4.0, -3.0)).length() < 1e-4);
    }
}
