//! Shared logic for keeping both halves of a double door in sync.
//!
//! Nothing in here talks to the host game directly. The host hands block states over through a
//! [`region::BlockRegion`], and the [`sync::DoubleDoorSync`] state machine decides which twin doors
//! need toggling next frame.

#![warn(missing_docs)]

pub mod block;
pub mod door;
pub mod region;
pub mod settings;
pub mod sync;
