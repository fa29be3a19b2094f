//! Camera projection and orbit controls
//!
//! The eye orbits `target` at a fixed distance (no zoom). Dragging queues a
//! rotation that is applied a fraction at a time, one fraction per simulation
//! step, so the view eases to a stop after the pointer is released.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec2, Vec3};

use crate::settings::Settings;

/// Radians of orbit per dragged pixel
const ROTATE_SPEED: f32 = 0.005;
/// Share of the queued rotation applied per step
const DAMPING: f32 = 0.05;
/// Queued rotation below this is dropped
const REST: f32 = 1e-5;
/// Pitch limit, short of straight up or down where `look_at` degenerates
const MAX_PITCH: f32 = FRAC_PI_2 - 0.05;
/// Pointer travel (pixels) beyond which a press is a drag, not a tap
const TAP_SLOP: f32 = 5.0;

/// Perspective camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn from_settings(settings: &Settings, width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::from_array(settings.camera_eye),
            target: Vec3::from_array(settings.camera_target),
            fov_y: settings.camera_fov_degrees.to_radians(),
            aspect: aspect_ratio(width, height),
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far);
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        proj * view
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// Damped yaw/pitch orbit around a fixed target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    radius: f32,
    /// Angle around Y, measured from +Z toward +X
    yaw: f32,
    /// Elevation above the target's horizontal plane
    pitch: f32,
    pending_yaw: f32,
    pending_pitch: f32,
}

impl OrbitControls {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(f32::EPSILON);
        Self {
            target,
            radius,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius)
                .clamp(-1.0, 1.0)
                .asin()
                .clamp(-MAX_PITCH, MAX_PITCH),
            pending_yaw: 0.0,
            pending_pitch: 0.0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Vec3::from_array(settings.camera_eye),
            Vec3::from_array(settings.camera_target),
        )
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.radius * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Queue a rotation for a pointer drag of `(dx, dy)` pixels.
    ///
    /// Dragging right swings the eye left around the target; dragging down
    /// raises it.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.pending_yaw -= dx * ROTATE_SPEED;
        self.pending_pitch += dy * ROTATE_SPEED;
    }

    /// Apply one damped step of the queued rotation. Returns true if the eye moved.
    pub fn update(&mut self) -> bool {
        if self.pending_yaw.abs() < REST && self.pending_pitch.abs() < REST {
            self.pending_yaw = 0.0;
            self.pending_pitch = 0.0;
            return false;
        }

        self.yaw += self.pending_yaw * DAMPING;
        self.pitch = (self.pitch + self.pending_pitch * DAMPING).clamp(-MAX_PITCH, MAX_PITCH);
        self.pending_yaw *= 1.0 - DAMPING;
        self.pending_pitch *= 1.0 - DAMPING;
        true
    }
}

/// Tells a tap (placement) apart from an orbit drag
#[derive(Debug, Default, Clone, Copy)]
pub struct DragGesture {
    last: Option<Vec2>,
    travelled: f32,
}

impl DragGesture {
    pub fn press(&mut self, x: f32, y: f32) {
        self.last = Some(Vec2::new(x, y));
        self.travelled = 0.0;
    }

    /// Movement since the previous pointer position, while pressed
    pub fn move_to(&mut self, x: f32, y: f32) -> Option<Vec2> {
        let last = self.last.as_mut()?;
        let pos = Vec2::new(x, y);
        let delta = pos - *last;
        *last = pos;
        self.travelled += delta.length();
        Some(delta)
    }

    /// End the press. True when the pointer stayed within the tap slop.
    pub fn release(&mut self) -> bool {
        let was_pressed = self.last.take().is_some();
        was_pressed && self.travelled <= TAP_SLOP
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some() && self.travelled > TAP_SLOP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use proptest::prelude::*;

    fn camera() -> Camera {
        Camera::from_settings(&Settings::default(), 800, 600)
    }

    fn settle(orbit: &mut OrbitControls) -> usize {
        let mut steps = 0;
        while orbit.update() {
            steps += 1;
            assert!(steps < 10_000, "orbit never came to rest");
        }
        steps
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = camera();
        let clip = camera.view_proj() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.w > 0.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth));
    }

    #[test]
    fn test_viewport_updates_aspect() {
        let mut camera = camera();
        camera.set_viewport(1000, 500);
        assert_eq!(camera.aspect, 2.0);
        camera.set_viewport(10, 0);
        assert_eq!(camera.aspect, 1.0);
    }

    #[test]
    fn test_orbit_starts_at_configured_eye() {
        let orbit = OrbitControls::from_settings(&Settings::default());
        assert!(orbit.eye().distance(Vec3::new(4.0, 10.0, 10.0)) < 1e-4);
    }

    #[test]
    fn test_orbit_idle_without_input() {
        let mut orbit = OrbitControls::from_settings(&Settings::default());
        let eye = orbit.eye();
        assert!(!orbit.update());
        assert_eq!(orbit.eye(), eye);
    }

    #[test]
    fn test_orbit_eases_to_full_drag_rotation() {
        let mut orbit = OrbitControls::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        // Dragging left swings the eye toward +X
        orbit.rotate(-100.0, 0.0);

        assert!(orbit.update());
        let first = orbit.eye();
        assert!(first.x > 0.0);
        // Only a fraction of the rotation lands on the first step
        assert!(first.x.atan2(first.z) < 0.5 * 100.0 * ROTATE_SPEED);

        let steps = settle(&mut orbit);
        assert!(steps > 10);
        let eye = orbit.eye();
        assert!((eye.x.atan2(eye.z) - 100.0 * ROTATE_SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_orbit_pitch_is_clamped() {
        let mut orbit = OrbitControls::new(Vec3::new(0.0, 5.0, 5.0), Vec3::ZERO);
        orbit.rotate(0.0, 100_000.0);
        settle(&mut orbit);
        let eye = orbit.eye();
        assert!(eye.y < orbit.radius());
        assert!(eye.y > 0.99 * orbit.radius());
        // Still a usable view
        let camera = Camera {
            eye,
            ..camera()
        };
        assert!(camera.view_proj().is_finite());
    }

    #[test]
    fn test_gesture_tap_without_movement() {
        let mut gesture = DragGesture::default();
        gesture.press(10.0, 10.0);
        assert_eq!(gesture.move_to(12.0, 11.0), Some(Vec2::new(2.0, 1.0)));
        assert!(!gesture.is_dragging());
        assert!(gesture.release());
    }

    #[test]
    fn test_gesture_drag_is_not_a_tap() {
        let mut gesture = DragGesture::default();
        gesture.press(0.0, 0.0);
        gesture.move_to(30.0, 0.0);
        assert!(gesture.is_dragging());
        assert!(!gesture.release());

        // A new press starts fresh
        gesture.press(30.0, 0.0);
        assert!(gesture.release());
    }

    #[test]
    fn test_gesture_ignores_unpressed_pointer() {
        let mut gesture = DragGesture::default();
        assert_eq!(gesture.move_to(5.0, 5.0), None);
        assert!(!gesture.release());
    }

    proptest! {
        #[test]
        fn prop_orbit_keeps_distance_to_target(
            dx in -2000.0f32..2000.0,
            dy in -2000.0f32..2000.0,
            steps in 0usize..200,
        ) {
            let settings = Settings::default();
            let mut orbit = OrbitControls::from_settings(&settings);
            let radius = orbit.radius();
            orbit.rotate(dx, dy);
            for _ in 0..steps {
                orbit.update();
            }
            let distance = orbit.eye().distance(orbit.target);
            prop_assert!((distance - radius).abs() < 1e-3 * radius);
        }
    }
}
