//! Blocks are the smallest thing found in the world

use bevy::reflect::Reflect;
use derive_more::{Add, Display, Sub};
use serde::{Deserialize, Serialize};

pub mod block_face;
pub mod block_state;

pub use block_face::BlockFace;
pub use block_state::{BlockKind, NbtTag};

/// The integer type each axis of a [`BlockPos`] uses
pub type CoordinateType = i32;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize, Display, Add, Sub)]
#[display("({x}, {y}, {z})")]
/// The position of a single block in the world.
///
/// Unlike structure coordinates these are unbound - any axis may be negative.
pub struct BlockPos {
    /// East (+) / West (-)
    pub x: CoordinateType,
    /// Up (+) / Down (-)
    pub y: CoordinateType,
    /// South (+) / North (-)
    pub z: CoordinateType,
}

impl BlockPos {
    /// Creates a new block position
    pub const fn new(x: CoordinateType, y: CoordinateType, z: CoordinateType) -> Self {
        Self { x, y, z }
    }

    /// The block directly above this one
    pub const fn above(&self) -> Self {
        Self::new(self.x, self.y + 1, self.z)
    }

    /// The block directly below this one
    pub const fn below(&self) -> Self {
        Self::new(self.x, self.y - 1, self.z)
    }
}

impl From<(CoordinateType, CoordinateType, CoordinateType)> for BlockPos {
    #[inline(always)]
    fn from((x, y, z): (CoordinateType, CoordinateType, CoordinateType)) -> Self {
        Self { x, y, z }
    }
}
