use crate::api::types::{ObjectId, PieceId, Pose};
use crate::components::domino::DominoFaces;

/// One committed domino piece.
///
/// The world owns the physical object; this record keeps what the session
/// needs to undo, redo and reset it.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeable {
    /// Arena handle.
    pub id: PieceId,
    /// Handle of the backing world object.
    pub object: ObjectId,
    /// Whether the piece is shown. Hidden pieces are undone, not destroyed.
    pub visible: bool,
    /// Pip values on the piece's four face slots.
    pub faces: DominoFaces,
    /// Rest pose captured at spawn. Never changes after creation.
    original_pose: Pose,
}

impl Placeable {
    pub fn new(id: PieceId, object: ObjectId, original_pose: Pose) -> Self {
        Self {
            id,
            object,
            visible: true,
            faces: DominoFaces::default(),
            original_pose,
        }
    }

    // -- Builder pattern --

    pub fn with_faces(mut self, faces: DominoFaces) -> Self {
        self.faces = faces;
        self
    }

    /// The pose the piece was spawned with; simulation resets to this.
    pub fn original_pose(&self) -> Pose {
        self.original_pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn new_piece_is_visible_with_rest_pose() {
        let pose = Pose::at(Vec3::new(1.0, 2.0, 0.0));
        let p = Placeable::new(PieceId(3), ObjectId(9), pose);
        assert!(p.visible);
        assert_eq!(p.original_pose(), pose);
        assert_eq!(p.object, ObjectId(9));
    }

    #[test]
    fn builder_sets_faces() {
        let faces = DominoFaces([1, 2, 3, 4]);
        let p = Placeable::new(PieceId(0), ObjectId(0), Pose::IDENTITY).with_faces(faces);
        assert!(p.visible);
        assert_eq!(p.faces, faces);
    }
}
