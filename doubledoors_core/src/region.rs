//! Looking up block states by position.

use bevy::{platform::collections::HashMap, prelude::*};

use crate::block::{BlockPos, NbtTag};

/// Anything that can hand out the block state at a position.
///
/// Blocks the region doesn't know about (unloaded or air) return `None`, which every consumer treats
/// the same as "not a door".
pub trait BlockRegion {
    /// The block state at this position, if there is one
    fn block_state(&self, position: BlockPos) -> Option<&NbtTag>;
}

#[derive(Resource, Debug, Default, Clone)]
/// The blocks the client currently has loaded.
///
/// The host is responsible for keeping this mirrored with its own world.
pub struct LoadedRegion {
    blocks: HashMap<BlockPos, NbtTag>,
}

impl LoadedRegion {
    /// Sets the block state at this position, returning the previous one
    pub fn set_block_state(&mut self, position: BlockPos, block_state: NbtTag) -> Option<NbtTag> {
        self.blocks.insert(position, block_state)
    }

    /// Removes the block at this position, returning it
    pub fn remove_block(&mut self, position: BlockPos) -> Option<NbtTag> {
        self.blocks.remove(&position)
    }

    /// The block state at this position, mutably
    pub fn block_state_mut(&mut self, position: BlockPos) -> Option<&mut NbtTag> {
        self.blocks.get_mut(&position)
    }

    /// The number of loaded blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// If no blocks are loaded
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl BlockRegion for LoadedRegion {
    fn block_state(&self, position: BlockPos) -> Option<&NbtTag> {
        self.blocks.get(&position)
    }
}
