//! Makes both halves of a double door open and close together.
//!
//! Add [`DoubleDoorsPlugin`] to the client app. The host is expected to:
//!
//! - keep [`doubledoors_core::region::LoadedRegion`] mirrored with its world,
//! - trigger [`events::PlayerBuildBlock`] whenever the player interacts with a block, before applying it,
//! - observe [`events::BuildBlockRequest`] and treat it exactly like a player interaction,
//! - trigger [`events::SoundPlayedInWorld`] before playing a world sound, and skip it if it comes back suppressed.

use std::path::PathBuf;

use bevy::prelude::*;
use doubledoors_core::{
    block::{BlockFace, BlockPos},
    region::LoadedRegion,
    settings::DoubleDoorsSettings,
    sync::DoubleDoorSync,
};

mod door_sync;
pub mod events;
pub mod lifecycle;
pub mod settings;

/// Where the settings are stored unless told otherwise
pub const DEFAULT_SETTINGS_FILE: &str = "settings/double_doors.toml";

/// Synchronizes double doors for the local player
pub struct DoubleDoorsPlugin {
    /// The TOML file settings are loaded from and saved to.
    ///
    /// If this is `None`, settings are never read from or written to disk.
    pub settings_file: Option<PathBuf>,
}

impl Default for DoubleDoorsPlugin {
    fn default() -> Self {
        Self {
            settings_file: Some(PathBuf::from(DEFAULT_SETTINGS_FILE)),
        }
    }
}

impl Plugin for DoubleDoorsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadedRegion>()
            .register_type::<BlockPos>()
            .register_type::<BlockFace>()
            .register_type::<DoubleDoorsSettings>()
            .register_type::<DoubleDoorSync>();

        events::register(app);
        settings::register(app, self.settings_file.clone());
        door_sync::register(app);

        lifecycle::attach(app.world_mut());
    }
}
