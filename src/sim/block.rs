//! Block geometry
//!
//! A block is an axis-aligned cuboid of fixed height, described by its center,
//! its footprint (width along X, depth along Z) and the axis it sweeps along.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Horizontal travel axis of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Axis {
    /// Static block (the base, or a fragment)
    #[default]
    None,
    X,
    Z,
}

impl Axis {
    /// Axis used for overlap resolution.
    ///
    /// Anything that is not `Z` resolves to `X`, including `None`. Only a
    /// malformed stack can ask a static block to resolve.
    pub fn resolved(self) -> Axis {
        match self {
            Axis::Z => Axis::Z,
            Axis::X | Axis::None => Axis::X,
        }
    }

    /// The orthogonal horizontal axis (X <-> Z)
    pub fn other(self) -> Axis {
        match self.resolved() {
            Axis::Z => Axis::X,
            _ => Axis::Z,
        }
    }

    pub fn is_moving(self) -> bool {
        self != Axis::None
    }
}

/// One stacked layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    /// Center of the block
    pub position: Vec3,
    /// Extent along X
    pub width: f32,
    /// Extent along Z
    pub depth: f32,
    pub axis: Axis,
    /// Linear RGB
    pub color: [f32; 3],
}

impl Block {
    pub fn new(id: u32, position: Vec3, width: f32, depth: f32, axis: Axis) -> Self {
        Self {
            id,
            position,
            width,
            depth,
            axis,
            color: [1.0, 1.0, 1.0],
        }
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Coordinate of the center along a horizontal axis (`None` reads as X)
    pub fn coord(&self, axis: Axis) -> f32 {
        match axis.resolved() {
            Axis::Z => self.position.z,
            _ => self.position.x,
        }
    }

    pub fn coord_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis.resolved() {
            Axis::Z => &mut self.position.z,
            _ => &mut self.position.x,
        }
    }

    /// Extent along a horizontal axis: width for X, depth for Z
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis.resolved() {
            Axis::Z => self.depth,
            _ => self.width,
        }
    }

    pub fn set_extent(&mut self, axis: Axis, extent: f32) {
        match axis.resolved() {
            Axis::Z => self.depth = extent,
            _ => self.width = extent,
        }
    }
}

/// Trimmed-off piece of a block, falling out of the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overhang {
    pub block: Block,
    /// Downward speed in units per step
    pub fall_speed: f32,
}

impl Overhang {
    pub fn new(block: Block) -> Self {
        Self {
            block,
            fall_speed: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_resolution_collapses_to_x() {
        assert_eq!(Axis::None.resolved(), Axis::X);
        assert_eq!(Axis::X.resolved(), Axis::X);
        assert_eq!(Axis::Z.resolved(), Axis::Z);
    }

    #[test]
    fn test_axis_other_alternates() {
        assert_eq!(Axis::X.other(), Axis::Z);
        assert_eq!(Axis::Z.other(), Axis::X);
        // Static blocks resolve to X first
        assert_eq!(Axis::None.other(), Axis::Z);
    }

    #[test]
    fn test_extent_follows_axis() {
        let mut block = Block::new(1, Vec3::new(1.0, 2.0, -1.0), 3.0, 2.0, Axis::Z);
        assert_eq!(block.extent(Axis::X), 3.0);
        assert_eq!(block.extent(Axis::Z), 2.0);
        assert_eq!(block.coord(Axis::Z), -1.0);

        block.set_extent(Axis::Z, 1.5);
        *block.coord_mut(Axis::Z) += 0.5;
        assert_eq!(block.depth, 1.5);
        assert_eq!(block.width, 3.0);
        assert_eq!(block.position.z, -0.5);
        assert_eq!(block.position.y, 2.0);
    }
}
