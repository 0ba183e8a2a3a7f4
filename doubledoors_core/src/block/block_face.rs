//! The 6 faces of a block, numbered the way the host's interaction packets number them.

use std::fmt::Display;

use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

#[derive(Default, PartialEq, Eq, Debug, Reflect, Copy, Clone, Hash, Serialize, Deserialize)]
/// A face of a block the player can interact with
pub enum BlockFace {
    #[default]
    /// -Y
    Down,
    /// +Y
    Up,
    /// -Z
    North,
    /// +Z
    South,
    /// -X
    West,
    /// +X
    East,
}

/// Contains each face, in the order their `index` method returns.
pub const ALL_BLOCK_FACES: [BlockFace; 6] = [
    BlockFace::Down,
    BlockFace::Up,
    BlockFace::North,
    BlockFace::South,
    BlockFace::West,
    BlockFace::East,
];

impl BlockFace {
    /// Returns the face id the host uses for this face [0, 5].
    pub const fn index(&self) -> usize {
        match *self {
            Self::Down => 0,
            Self::Up => 1,
            Self::North => 2,
            Self::South => 3,
            Self::West => 4,
            Self::East => 5,
        }
    }

    /// Gets a face from the host's face id.
    ///
    /// Returns `None` if the index is not between 0 and 5 inclusive.
    pub fn from_index(index: usize) -> Option<Self> {
        ALL_BLOCK_FACES.get(index).copied()
    }
}

impl Display for BlockFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match *self {
            Self::Down => "down",
            Self::Up => "up",
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
        })
    }
}
