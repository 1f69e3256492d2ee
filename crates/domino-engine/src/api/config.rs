use serde::{Deserialize, Serialize};

use crate::input::bindings::KeyBindings;

/// Configuration for a player session, provided by the host.
/// Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for domino face randomization.
    pub seed: u64,
    /// Length of the pointer ray in world units.
    pub max_ray_distance: f32,
    pub placement: PlacementConfig,
    pub camera: CameraConfig,
    pub bindings: KeyBindings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_ray_distance: 1000.0,
            placement: PlacementConfig::default(),
            camera: CameraConfig::default(),
            bindings: KeyBindings::default(),
        }
    }
}

/// Placement chain tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Distance between consecutive pieces in a chain.
    pub spacing: f32,
    /// How fast the placement goal chases the pointer target.
    /// The per-frame lerp factor is `dt * chase_rate`, clamped to [0, 1].
    pub chase_rate: f32,
    /// Drop spawned pieces onto the first surface below them.
    pub snap_to_ground: bool,
    /// Height above the spawn point the snap ray starts from.
    pub snap_height: f32,
    /// How far below the spawn point the snap ray reaches.
    pub snap_depth: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            spacing: 0.3,
            chase_rate: 1.0,
            snap_to_ground: true,
            snap_height: 1.0,
            snap_depth: 100.0,
        }
    }
}

/// Orbit camera tuning. Angles in radians, distances in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Rate at which the camera goal chases the desired goal.
    pub goal_tension: f32,
    pub pan_sensitivity: f32,
    /// Radians per pointer-delta pixel.
    pub rotation_sensitivity: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub scroll_multiplier: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_distance: 1.0,
            max_distance: 12.0,
            goal_tension: 2.0,
            pan_sensitivity: 70.0,
            rotation_sensitivity: 0.002,
            min_pitch: -1.2,
            max_pitch: -0.4,
            scroll_multiplier: 0.2,
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl SessionConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Replace values the session cannot work with by their defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !(self.placement.spacing > 0.0) {
            log::warn!(
                "spacing {} is not positive, using {}",
                self.placement.spacing,
                defaults.placement.spacing
            );
            self.placement.spacing = defaults.placement.spacing;
        }
        if !(self.placement.chase_rate > 0.0) {
            log::warn!("chase_rate {} is not positive, using default", self.placement.chase_rate);
            self.placement.chase_rate = defaults.placement.chase_rate;
        }
        if !(self.max_ray_distance > 0.0) {
            log::warn!("max_ray_distance {} is not positive, using default", self.max_ray_distance);
            self.max_ray_distance = defaults.max_ray_distance;
        }

        let cam = &mut self.camera;
        if !(cam.min_distance > 0.0 && cam.min_distance <= cam.max_distance) {
            log::warn!(
                "camera distance range [{}, {}] is invalid, using default",
                cam.min_distance,
                cam.max_distance
            );
            cam.min_distance = defaults.camera.min_distance;
            cam.max_distance = defaults.camera.max_distance;
        }
        if !(cam.min_pitch <= cam.max_pitch) {
            log::warn!("camera pitch range is inverted, using default");
            cam.min_pitch = defaults.camera.min_pitch;
            cam.max_pitch = defaults.camera.max_pitch;
        }
        if !(cam.near > 0.0 && cam.near < cam.far) {
            log::warn!("camera clip planes are invalid, using default");
            cam.near = defaults.camera.near;
            cam.far = defaults.camera.far;
        }

        self
    }
}
