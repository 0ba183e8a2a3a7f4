//! The user-facing toggles that control which blocks get synchronized.

use bevy::prelude::*;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::block::BlockKind;

#[derive(Debug, Display, Error, PartialEq, Eq, Clone, Copy)]
/// A setting was given a value it can never hold
pub enum SettingsError {
    #[display("recursive opening distance must be between 1 and 20 (got {distance})")]
    /// [`RecursiveOpeningDistance`] was outside of [1, 20]
    DistanceOutOfBounds {
        /// The rejected value
        distance: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
/// How far recursive opening may reach, always within [1, 20]
pub struct RecursiveOpeningDistance(u8);

impl RecursiveOpeningDistance {
    /// The smallest allowed distance
    pub const MIN: u32 = 1;
    /// The largest allowed distance
    pub const MAX: u32 = 20;

    /// The distance in blocks
    pub fn get(&self) -> u32 {
        self.0 as u32
    }
}

impl Default for RecursiveOpeningDistance {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u32> for RecursiveOpeningDistance {
    type Error = SettingsError;

    fn try_from(distance: u32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&distance) {
            Ok(Self(distance as u8))
        } else {
            Err(SettingsError::DistanceOutOfBounds { distance })
        }
    }
}

impl From<RecursiveOpeningDistance> for u32 {
    fn from(value: RecursiveOpeningDistance) -> Self {
        value.get()
    }
}

#[derive(Resource, Reflect, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Which kinds of paired blocks get synchronized.
///
/// Recursive opening and the mod incompatibility check are stored and saved, but nothing acts on them yet.
pub struct DoubleDoorsSettings {
    /// Synchronize double doors
    pub enable_doors: bool,
    /// Synchronize paired trapdoors
    pub enable_trapdoors: bool,
    /// Synchronize paired fence gates
    pub enable_fence_gates: bool,
    /// Open whole rows of doors instead of just the twin
    pub enable_recursive_opening: bool,
    /// How far recursive opening reaches
    pub recursive_opening_max_distance: RecursiveOpeningDistance,
    /// Turn off when another mod already synchronizes doors
    pub enable_mod_incompatibility_check: bool,
}

impl Default for DoubleDoorsSettings {
    fn default() -> Self {
        Self {
            enable_doors: true,
            enable_trapdoors: true,
            enable_fence_gates: true,
            enable_recursive_opening: true,
            recursive_opening_max_distance: RecursiveOpeningDistance::default(),
            enable_mod_incompatibility_check: true,
        }
    }
}

impl DoubleDoorsSettings {
    /// If blocks of this kind should be synchronized at all
    pub fn is_enabled(&self, kind: BlockKind) -> bool {
        match kind {
            BlockKind::Door => self.enable_doors,
            BlockKind::Trapdoor => self.enable_trapdoors,
            BlockKind::FenceGate => self.enable_fence_gates,
            BlockKind::Other => false,
        }
    }
}
