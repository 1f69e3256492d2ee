use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use crate::api::config::CameraConfig;
use crate::api::world::Ray;
use crate::core::math::{chase_factor, lerp};
use crate::input::bindings::MoveFlags;

/// Tactical orbit camera, Z-up.
///
/// The camera circles a goal point on the ground at `distance`, looking down
/// with a clamped pitch. Zoom, goal panning and orbit are each smoothed
/// toward a desired value every frame. Matrices are cached by `apply`, so
/// rays cast before `apply` use the previous frame's view.
pub struct CameraRig {
    config: CameraConfig,
    desired_goal: Vec3,
    current_goal: Vec3,
    desired_distance: f32,
    current_distance: f32,
    yaw: f32,
    pitch: f32,
    look_active: bool,
    pending_look: Vec2,
    pending_scroll: f32,
    view: Mat4,
    projection: Mat4,
    inverse_view_projection: Mat4,
}

impl CameraRig {
    pub fn new(config: CameraConfig, goal: Vec3) -> Self {
        let goal = Vec3::new(goal.x, goal.y, 0.0);
        let distance = (config.min_distance + config.max_distance) / 2.0;
        let mut rig = Self {
            config,
            desired_goal: goal,
            current_goal: goal,
            desired_distance: distance,
            current_distance: distance,
            yaw: 0.0,
            pitch: (config.min_pitch + config.max_pitch) / 2.0,
            look_active: false,
            pending_look: Vec2::ZERO,
            pending_scroll: 0.0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            inverse_view_projection: Mat4::IDENTITY,
        };
        rig.apply(1.0);
        rig
    }

    // -- Input --

    /// Queue wheel steps; applied by the next `update_zoom`.
    pub fn scroll(&mut self, steps: f32) {
        self.pending_scroll += steps * self.config.scroll_multiplier;
    }

    /// Queue pointer motion; applied by the next `update_view`.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.pending_look -= Vec2::new(dx, dy);
    }

    /// Orbit only happens while look is held.
    pub fn set_look_active(&mut self, active: bool) {
        self.look_active = active;
    }

    pub fn is_look_active(&self) -> bool {
        self.look_active
    }

    // -- Per-frame updates, in frame order --

    pub fn update_zoom(&mut self, dt: f32) {
        self.desired_distance = (self.desired_distance + self.pending_scroll)
            .clamp(self.config.min_distance, self.config.max_distance);
        self.current_distance = lerp(
            self.current_distance,
            self.desired_distance,
            chase_factor(dt, 1.0),
        );
        self.pending_scroll = 0.0;
    }

    /// Pan the goal with the held movement keys, then chase it.
    pub fn update_goal(&mut self, dt: f32, held: MoveFlags) {
        let dir = self.pan_direction(held);
        if dir != Vec3::ZERO {
            let speed = self.current_distance / (self.config.min_distance + self.config.max_distance);
            self.desired_goal += dir * speed * self.config.pan_sensitivity * dt;
        }
        self.desired_goal.z = 0.0;
        let t = chase_factor(dt, self.config.goal_tension);
        self.current_goal = self.current_goal.lerp(self.desired_goal, t);
    }

    /// Apply queued pointer motion to yaw and pitch.
    pub fn update_view(&mut self) {
        if self.pending_look == Vec2::ZERO {
            return;
        }
        if self.look_active {
            self.yaw += self.pending_look.x * self.config.rotation_sensitivity;
            self.pitch += self.pending_look.y * self.config.rotation_sensitivity;
        }
        self.pitch = self.pitch.clamp(self.config.min_pitch, self.config.max_pitch);
        self.pending_look = Vec2::ZERO;
    }

    /// Rebuild and cache the view and projection matrices.
    pub fn apply(&mut self, aspect: f32) {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        self.view = Mat4::look_to_rh(self.eye(), self.forward(), Vec3::Z);
        self.projection = Mat4::perspective_rh_gl(
            self.config.fov_degrees.to_radians(),
            aspect,
            self.config.near,
            self.config.far,
        );
        self.inverse_view_projection = (self.projection * self.view).inverse();
    }

    // -- Queries --

    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_z(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Viewing direction.
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::Y
    }

    pub fn eye(&self) -> Vec3 {
        self.current_goal - self.forward() * self.current_distance
    }

    pub fn goal(&self) -> Vec3 {
        self.current_goal
    }

    pub fn distance(&self) -> f32 {
        self.current_distance
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Ray from the near plane through a viewport pixel (origin top-left).
    pub fn screen_ray(&self, pointer: Vec2, viewport: Vec2) -> Ray {
        if !(viewport.x > 0.0 && viewport.y > 0.0) {
            return Ray::new(self.eye(), self.forward());
        }

        // Screen → NDC
        let ndc_x = pointer.x / viewport.x * 2.0 - 1.0;
        let ndc_y = 1.0 - pointer.y / viewport.y * 2.0;

        let near = self.inverse_view_projection * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far = self.inverse_view_projection * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        let dir = (far - near).normalize_or_zero();
        if dir == Vec3::ZERO {
            return Ray::new(self.eye(), self.forward());
        }
        Ray::new(near, dir)
    }

    fn pan_direction(&self, held: MoveFlags) -> Vec3 {
        let heading = Quat::from_rotation_z(self.yaw);
        let right = heading * Vec3::X;
        let ahead = heading * Vec3::Y;
        let mut dir = Vec3::ZERO;
        if held.contains(MoveFlags::LEFT) {
            dir -= right;
        }
        if held.contains(MoveFlags::RIGHT) {
            dir += right;
        }
        if held.contains(MoveFlags::FORWARD) {
            dir += ahead;
        }
        if held.contains(MoveFlags::BACK) {
            dir -= ahead;
        }
        dir
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraConfig::default(), Vec3::ZERO)
    }
}
