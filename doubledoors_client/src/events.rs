//! The events double doors shares with the host.
//!
//! These are observer events - they run synchronously inside `World::trigger`, so the host gets
//! the answer (such as [`SoundPlayedInWorld::suppressed`]) as soon as the trigger returns.

use bevy::prelude::*;
use doubledoors_core::block::{BlockFace, BlockPos};

/// Triggered by the host when the local player interacts with a block.
///
/// This must be triggered *before* the host changes the block, since the twin door is compared against
/// the state the door is in before the interaction.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerBuildBlock {
    /// The block interacted with
    pub position: BlockPos,
    /// The face the player clicked
    pub face: BlockFace,
}

/// Triggered by double doors when a twin door needs toggling.
///
/// The host should handle this exactly like the local player interacting with that block, including
/// triggering [`PlayerBuildBlock`] for it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildBlockRequest {
    /// The block to interact with
    pub position: BlockPos,
    /// The face to interact with
    pub face: BlockFace,
}

/// Triggered by the host right before a sound is played in the world.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SoundPlayedInWorld {
    /// The sound's identifier
    pub sound: String,
    /// Where the sound is coming from
    pub position: Vec3,
    /// The sound's volume
    pub volume: f32,
    /// The sound's pitch
    pub pitch: f32,
    /// If this is true after triggering, the host should not play this sound
    pub suppressed: bool,
}

impl SoundPlayedInWorld {
    /// Creates a sound event that hasn't been suppressed yet
    pub fn new(sound: impl Into<String>, position: Vec3, volume: f32, pitch: f32) -> Self {
        Self {
            sound: sound.into(),
            position,
            volume,
            pitch,
            suppressed: false,
        }
    }
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
/// The set double doors does its per-frame work in
pub enum DoubleDoorsSet {
    /// Twin doors queued since last frame are toggled here
    ApplyPending,
}

pub(super) fn register(app: &mut App) {
    app.configure_sets(Update, DoubleDoorsSet::ApplyPending);
}
