//! Hooks [`DoubleDoorSync`] up to the host's events.

use bevy::prelude::*;
use doubledoors_core::{block::BlockFace, region::LoadedRegion, settings::DoubleDoorsSettings, sync::DoubleDoorSync};

use crate::events::{BuildBlockRequest, DoubleDoorsSet, PlayerBuildBlock, SoundPlayedInWorld};

pub(crate) fn schedule_twin_door(
    ev: On<PlayerBuildBlock>,
    region: Res<LoadedRegion>,
    settings: Res<DoubleDoorsSettings>,
    mut sync: ResMut<DoubleDoorSync>,
) {
    let outcome = sync.on_build_block(&*region, &settings, ev.position, ev.face);

    trace!("Interaction at {}: {outcome:?}", ev.position);
}

pub(crate) fn gate_door_sound(mut ev: On<SoundPlayedInWorld>, mut sync: ResMut<DoubleDoorSync>) {
    if sync.on_sound_played(&ev.sound) {
        debug!("Suppressing {} - the twin door already played it", ev.sound);
        ev.suppressed = true;
    }
}

/// Toggles every twin door queued since the last frame.
///
/// The host handles each [`BuildBlockRequest`] while we are still applying, so the interactions it
/// reports for them are ignored instead of queueing more twins.
fn apply_pending_twin_doors(world: &mut World) {
    let Some(batch) = world.resource_mut::<DoubleDoorSync>().begin_applying() else {
        return;
    };

    for position in batch {
        world.trigger(BuildBlockRequest {
            position,
            face: BlockFace::Down,
        });
        // Anything the host queued while handling the request has to run before we stop applying
        world.flush();
    }

    world.resource_mut::<DoubleDoorSync>().finish_applying();
}

pub(super) fn register(app: &mut App) {
    app.add_systems(
        Update,
        apply_pending_twin_doors
            .in_set(DoubleDoorsSet::ApplyPending)
            .run_if(resource_exists::<DoubleDoorSync>),
    );
}
