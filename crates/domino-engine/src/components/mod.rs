pub mod domino;
pub mod placeable;
