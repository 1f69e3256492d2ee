use glam::Vec3;

use crate::api::world::{Ray, RayCaster};

/// Turns pointer rays into world points.
///
/// The only reader of the ray-cast service during placement. When a ray
/// misses, the last good hit is returned so the chain never sees a gap.
#[derive(Debug, Clone)]
pub struct PointerProjector {
    last_good: Vec3,
    max_distance: f32,
}

impl PointerProjector {
    pub fn new(max_distance: f32) -> Self {
        Self {
            last_good: Vec3::ZERO,
            max_distance,
        }
    }

    pub fn project<C: RayCaster + ?Sized>(&mut self, ray: &Ray, caster: &C) -> Vec3 {
        match caster.cast_ray(ray, self.max_distance) {
            Some(hit) => {
                self.last_good = hit;
                hit
            }
            None => {
                log::debug!("projector: ray from {:?} missed, keeping {:?}", ray.origin, self.last_good);
                self.last_good
            }
        }
    }

    pub fn last_good(&self) -> Vec3 {
        self.last_good
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::MemoryWorld;

    #[test]
    fn hit_updates_last_good() {
        let world = MemoryWorld::new();
        let mut proj = PointerProjector::new(100.0);
        let ray = Ray::new(Vec3::new(2.0, 3.0, 5.0), Vec3::NEG_Z);
        assert_eq!(proj.project(&ray, &world), Vec3::new(2.0, 3.0, 0.0));
        assert_eq!(proj.last_good(), Vec3::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn miss_falls_back_to_last_good() {
        let world = MemoryWorld::new();
        let mut proj = PointerProjector::new(100.0);
        // Nothing hit yet: origin
        let up = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert_eq!(proj.project(&up, &world), Vec3::ZERO);

        let down = Ray::new(Vec3::new(1.0, 1.0, 5.0), Vec3::NEG_Z);
        proj.project(&down, &world);
        assert_eq!(proj.project(&up, &world), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn rays_beyond_max_distance_miss() {
        let world = MemoryWorld::new();
        let mut proj = PointerProjector::new(1.0);
        let ray = Ray::new(Vec3::new(4.0, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(proj.project(&ray, &world), Vec3::ZERO);
    }
}
