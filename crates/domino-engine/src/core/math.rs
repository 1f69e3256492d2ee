//! Small vector helpers shared by the placement chain and the camera rig.
//! Z is up; a piece's forward axis is +Y.

use glam::{Quat, Vec3};

const DEGENERATE_LENGTH_SQ: f32 = 1e-12;

/// Frame-rate dependent chase factor: `dt * rate`, clamped to [0, 1].
#[inline]
pub fn chase_factor(dt: f32, rate: f32) -> f32 {
    (dt * rate).clamp(0.0, 1.0)
}

/// Move `current` toward `target` by `t` of the remaining distance.
#[inline]
pub fn lerp(current: f32, target: f32, t: f32) -> f32 {
    current + (target - current) * t
}

/// Rotation whose forward (+Y) axis points along `dir`, with no roll.
/// Returns `None` for a zero-length direction.
pub fn facing(dir: Vec3) -> Option<Quat> {
    if dir.length_squared() < DEGENERATE_LENGTH_SQ {
        return None;
    }
    let d = dir.normalize();
    let yaw = (-d.x).atan2(d.y);
    let pitch = d.z.clamp(-1.0, 1.0).asin();
    Some(Quat::from_rotation_z(yaw) * Quat::from_rotation_x(pitch))
}

/// Like `facing`, but ignores the vertical component so pieces stand upright.
pub fn flat_facing(dir: Vec3) -> Option<Quat> {
    facing(Vec3::new(dir.x, dir.y, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn facing_points_forward_axis_along_direction() {
        for dir in [
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-2.0, 0.5, 1.0),
        ] {
            let q = facing(dir).unwrap();
            assert_vec_close(q * Vec3::Y, dir.normalize());
        }
    }

    #[test]
    fn facing_keeps_up_axis_without_pitch() {
        let q = facing(Vec3::new(3.0, -1.0, 0.0)).unwrap();
        assert_vec_close(q * Vec3::Z, Vec3::Z);
    }

    #[test]
    fn zero_direction_is_degenerate() {
        assert!(facing(Vec3::ZERO).is_none());
        assert!(flat_facing(Vec3::new(0.0, 0.0, 4.0)).is_none());
    }

    #[test]
    fn chase_factor_is_clamped() {
        assert_eq!(chase_factor(0.5, 4.0), 1.0);
        assert_eq!(chase_factor(-1.0, 1.0), 0.0);
        assert!((chase_factor(0.016, 2.0) - 0.032).abs() < 1e-6);
        assert!((lerp(0.0, 10.0, 0.25) - 2.5).abs() < 1e-6);
    }
}
