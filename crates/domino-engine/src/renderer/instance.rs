use bytemuck::{Pod, Zeroable};

use crate::api::types::Pose;
use crate::components::domino::DominoFaces;

/// Per-piece render data read by the host renderer.
/// Must match the host protocol: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PieceInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rotation quaternion (x, y, z, w).
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
    /// Pip counts of the four face slots.
    pub faces: [f32; 4],
    /// 1.0 for the placement preview, 0.0 for committed pieces.
    pub ghost: f32,
}

impl PieceInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn piece(pose: Pose, faces: DominoFaces) -> Self {
        let mut inst = Self::from_pose(pose);
        for (slot, &pips) in inst.faces.iter_mut().zip(faces.0.iter()) {
            *slot = pips as f32;
        }
        inst
    }

    pub fn ghost(pose: Pose) -> Self {
        Self {
            ghost: 1.0,
            ..Self::from_pose(pose)
        }
    }

    fn from_pose(pose: Pose) -> Self {
        let p = pose.position;
        let q = pose.rotation;
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
            qx: q.x,
            qy: q.y,
            qz: q.z,
            qw: q.w,
            faces: [0.0; 4],
            ghost: 0.0,
        }
    }
}

/// Instances for one frame: committed pieces first, the ghost (if any) last.
pub struct InstanceBuffer {
    pub instances: Vec<PieceInstance>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(512),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: PieceInstance) {
        self.instances.push(instance);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Raw float view for handing to the host.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}
