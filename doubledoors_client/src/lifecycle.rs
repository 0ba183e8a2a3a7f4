//! Attaching to and detaching from the host's events.
//!
//! [`crate::DoubleDoorsPlugin`] attaches on build. Detaching despawns the observers and throws away all
//! pending state, which also stops the per-frame system from running.

use bevy::prelude::*;
use doubledoors_core::{region::LoadedRegion, settings::DoubleDoorsSettings, sync::DoubleDoorSync};

use crate::door_sync;

#[derive(Resource, Debug)]
/// The observers spawned by [`attach`], so [`detach`] can remove them again
pub struct DoubleDoorsObservers(Vec<Entity>);

/// Starts listening to block interactions and sounds.
///
/// Does nothing if already attached. Inserts an empty [`LoadedRegion`] and the default settings if the
/// world doesn't have them yet.
pub fn attach(world: &mut World) {
    if world.contains_resource::<DoubleDoorsObservers>() {
        warn!("Double doors are already attached - ignoring.");
        return;
    }

    world.init_resource::<LoadedRegion>();
    world.init_resource::<DoubleDoorsSettings>();
    world.insert_resource(DoubleDoorSync::default());

    let observers = vec![
        world.add_observer(door_sync::schedule_twin_door).id(),
        world.add_observer(door_sync::gate_door_sound).id(),
    ];

    world.insert_resource(DoubleDoorsObservers(observers));

    info!("Double doors attached");
}

/// Stops listening to the host and drops anything still queued.
///
/// Does nothing if not attached.
pub fn detach(world: &mut World) {
    let Some(DoubleDoorsObservers(observers)) = world.remove_resource::<DoubleDoorsObservers>() else {
        return;
    };

    for observer in observers {
        world.despawn(observer);
    }

    if let Some(sync) = world.remove_resource::<DoubleDoorSync>()
        && !sync.pending().is_empty()
    {
        debug!("Dropped {} twin door(s) that were still waiting", sync.pending().len());
    }

    info!("Double doors detached");
}

#[cfg(test)]
mod tests {
    use doubledoors_core::{
        block::{BlockFace, BlockPos},
        door::{CardinalDirection, DoorHinge, door_block_states},
    };

    use super::*;
    use crate::events::PlayerBuildBlock;

    #[test]
    fn attach_twice_keeps_one_set_of_observers() {
        let mut world = World::new();

        attach(&mut world);
        let first = world.resource::<DoubleDoorsObservers>().0.clone();
        attach(&mut world);

        assert_eq!(world.resource::<DoubleDoorsObservers>().0, first);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn detach_removes_everything() {
        let mut world = World::new();

        attach(&mut world);
        let observers = world.resource::<DoubleDoorsObservers>().0.clone();

        detach(&mut world);

        assert!(!world.contains_resource::<DoubleDoorSync>());
        assert!(!world.contains_resource::<DoubleDoorsObservers>());
        for observer in observers {
            assert!(world.get_entity(observer).is_err());
        }

        // Detaching again is harmless
        detach(&mut world);
    }

    #[test]
    fn attach_to_bare_world() {
        let mut world = World::new();
        attach(&mut world);

        world.trigger(PlayerBuildBlock {
            position: BlockPos::new(0, 0, 0),
            face: BlockFace::Down,
        });
        assert!(world.resource::<DoubleDoorSync>().pending().is_empty());

        let twin = BlockPos::new(1, 0, 0);
        let mut region = world.resource_mut::<LoadedRegion>();
        for (lower, hinge) in [(BlockPos::new(0, 0, 0), DoorHinge::Left), (twin, DoorHinge::Right)] {
            let (lower_state, upper_state) = door_block_states("minecraft:wooden_door", CardinalDirection::East, hinge, false);
            region.set_block_state(lower, lower_state);
            region.set_block_state(lower.above(), upper_state);
        }

        world.trigger(PlayerBuildBlock {
            position: BlockPos::new(0, 0, 0),
            face: BlockFace::Down,
        });
        assert_eq!(world.resource::<DoubleDoorSync>().pending(), &[twin]);
    }

    #[test]
    fn attach_keeps_existing_settings() {
        let mut world = World::new();
        world.insert_resource(DoubleDoorsSettings {
            enable_doors: false,
            ..Default::default()
        });

        attach(&mut world);

        assert!(!world.resource::<DoubleDoorsSettings>().enable_doors);
    }
}
