//! Schedules the twin of a toggled door to be toggled next frame.
//!
//! The host calls into [`DoubleDoorSync`] from three places that never overlap:
//!
//! - When the player interacts with a block: [`DoubleDoorSync::on_build_block`] may only enqueue.
//! - Once per frame: [`DoubleDoorSync::begin_applying`] drains the queue, the host toggles every
//!   returned position, then [`DoubleDoorSync::finish_applying`] is called.
//! - When a sound plays: [`DoubleDoorSync::on_sound_played`] swallows one door sound after a batch was applied.
//!
//! While a batch is being applied the toggles it causes come back through `on_build_block`, and are ignored.

use bevy::prelude::*;

use crate::{
    block::{BlockFace, BlockKind, BlockPos},
    door::{pairing, read_door_state_at},
    region::BlockRegion,
    settings::DoubleDoorsSettings,
};

/// Every sound id containing this is considered a door sound
pub const DOOR_SOUND_FAMILY: &str = "wooden_door";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What [`DoubleDoorSync::on_build_block`] decided to do with an interaction
pub enum ScheduleOutcome {
    /// A batch is being applied, so this interaction came from us
    Reentrant,
    /// The block interacted with is not a readable door
    NotADoor,
    /// Synchronizing this kind of block is turned off
    Disabled(BlockKind),
    /// The door faces a direction that has no twin position
    NoTwinPosition,
    /// There is no readable door where the twin would be
    TwinUnreadable(BlockPos),
    /// The door next to this one isn't its mirrored twin
    NotAPair(BlockPos),
    /// The twin is already in the state this door is about to be in
    AlreadySynchronized(BlockPos),
    /// The twin at this position will be toggled next frame
    Scheduled(BlockPos),
}

#[derive(Resource, Reflect, Debug, Default)]
/// The only state double doors keep, all of which is thrown away once used.
pub struct DoubleDoorSync {
    pending: Vec<BlockPos>,
    batch_armed: bool,
    applying: bool,
    suppress_next_door_sound: bool,
}

impl DoubleDoorSync {
    /// Called when the player interacts with a block, *before* the interaction changes anything.
    ///
    /// This never cancels the interaction itself - it only decides whether the twin door should follow.
    pub fn on_build_block<R: BlockRegion + ?Sized>(
        &mut self,
        region: &R,
        settings: &DoubleDoorsSettings,
        position: BlockPos,
        face: BlockFace,
    ) -> ScheduleOutcome {
        if self.applying {
            return ScheduleOutcome::Reentrant;
        }

        let Some(block_state) = region.block_state(position) else {
            return ScheduleOutcome::NotADoor;
        };

        let kind = BlockKind::of(block_state);
        if !settings.is_enabled(kind) {
            return if kind == BlockKind::Other {
                ScheduleOutcome::NotADoor
            } else {
                ScheduleOutcome::Disabled(kind)
            };
        }

        let Some(door) = read_door_state_at(region, position) else {
            return ScheduleOutcome::NotADoor;
        };

        let lower_position = door.lower_position(position);

        let Some(twin_position) = pairing::adjacent_door_position(lower_position, &door.direction, door.hinge) else {
            return ScheduleOutcome::NoTwinPosition;
        };

        let Some(twin) = read_door_state_at(region, twin_position) else {
            return ScheduleOutcome::TwinUnreadable(twin_position);
        };

        if !pairing::is_valid_pair(region, twin_position, &door) {
            return ScheduleOutcome::NotAPair(twin_position);
        }

        // The interaction hasn't happened yet, so this door is about to flip
        let will_be_open = !door.open;

        if twin.open == will_be_open {
            return ScheduleOutcome::AlreadySynchronized(twin_position);
        }

        debug!("Door at {position} (face {face}) will also toggle its twin at {twin_position}");

        self.pending.push(twin_position);
        self.batch_armed = true;

        ScheduleOutcome::Scheduled(twin_position)
    }

    /// Takes every queued twin position and enters the reentrant state.
    ///
    /// Returns `None` (and changes nothing) if there is nothing to apply. If this returns `Some`,
    /// [`Self::finish_applying`] must be called once the host has toggled every position.
    pub fn begin_applying(&mut self) -> Option<Vec<BlockPos>> {
        if !self.batch_armed || self.pending.is_empty() {
            return None;
        }

        let batch = std::mem::take(&mut self.pending);
        self.batch_armed = false;
        self.applying = true;

        Some(batch)
    }

    /// Leaves the reentrant state and arms the sound gate for the next door sound.
    pub fn finish_applying(&mut self) {
        self.applying = false;
        self.suppress_next_door_sound = true;
    }

    /// Called whenever a sound plays in the world.
    ///
    /// Returns true if this sound should be suppressed, which only happens for the first door sound
    /// after a batch was applied.
    pub fn on_sound_played(&mut self, sound: &str) -> bool {
        if self.suppress_next_door_sound && sound.contains(DOOR_SOUND_FAMILY) {
            self.suppress_next_door_sound = false;
            return true;
        }

        false
    }

    /// The twin positions waiting for the next frame
    pub fn pending(&self) -> &[BlockPos] {
        &self.pending
    }

    /// If a batch is currently being applied
    pub fn is_applying(&self) -> bool {
        self.applying
    }

    /// If the next door sound will be suppressed
    pub fn is_sound_suppression_armed(&self) -> bool {
        self.suppress_next_door_sound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        block::NbtTag,
        door::{ALL_CARDINAL_DIRECTIONS, CardinalDirection, DoorHinge, door_block_states, set_open_bit},
        region::LoadedRegion,
    };

    const HINGES: [DoorHinge; 2] = [DoorHinge::Left, DoorHinge::Right];
    const OAK_DOOR: &str = "minecraft:wooden_door";

    fn place_door(region: &mut LoadedRegion, name: &str, lower: BlockPos, direction: CardinalDirection, hinge: DoorHinge, open: bool) {
        let (lower_state, upper_state) = door_block_states(name, direction, hinge, open);
        region.set_block_state(lower, lower_state);
        region.set_block_state(lower.above(), upper_state);
    }

    /// Places a double door with the origin's lower half at (0, 0, 0), returning the twin's lower half.
    fn place_double_door(
        region: &mut LoadedRegion,
        direction: CardinalDirection,
        hinge: DoorHinge,
        origin_open: bool,
        twin_open: bool,
    ) -> BlockPos {
        let origin = BlockPos::new(0, 0, 0);
        let twin = origin + direction.twin_offset(hinge);

        place_door(region, OAK_DOOR, origin, direction, hinge, origin_open);
        place_door(region, OAK_DOOR, twin, direction, hinge.flipped(), twin_open);

        twin
    }

    /// What the host does to a door when it is interacted with
    fn toggle(region: &mut LoadedRegion, lower: BlockPos) {
        let open = read_door_state_at(&*region, lower).expect("Is a door").open;
        let block_state = region.block_state_mut(lower).expect("Door exists");
        assert!(set_open_bit(block_state, !open));
    }

    fn interact(sync: &mut DoubleDoorSync, region: &LoadedRegion, position: BlockPos) -> ScheduleOutcome {
        sync.on_build_block(region, &DoubleDoorsSettings::default(), position, BlockFace::Down)
    }

    #[test]
    fn closed_east_left_door_schedules_twin() {
        let mut region = LoadedRegion::default();
        let twin = place_double_door(&mut region, CardinalDirection::East, DoorHinge::Left, false, false);
        assert_eq!(twin, BlockPos::new(1, 0, 0));

        let mut sync = DoubleDoorSync::default();

        assert_eq!(interact(&mut sync, &region, BlockPos::new(0, 0, 0)), ScheduleOutcome::Scheduled(twin));
        assert_eq!(sync.pending(), &[twin]);
    }

    #[test]
    fn already_open_twin_is_left_alone() {
        let mut region = LoadedRegion::default();
        let twin = place_double_door(&mut region, CardinalDirection::East, DoorHinge::Left, false, true);

        let mut sync = DoubleDoorSync::default();

        assert_eq!(
            interact(&mut sync, &region, BlockPos::new(0, 0, 0)),
            ScheduleOutcome::AlreadySynchronized(twin)
        );
        assert!(sync.pending().is_empty());
        assert_eq!(sync.begin_applying(), None);
    }

    #[test]
    fn every_orientation_schedules_exactly_one_twin() {
        for direction in ALL_CARDINAL_DIRECTIONS {
            for hinge in HINGES {
                for open in [false, true] {
                    let mut region = LoadedRegion::default();
                    let twin = place_double_door(&mut region, direction, hinge, open, open);

                    for clicked in [BlockPos::new(0, 0, 0), BlockPos::new(0, 1, 0)] {
                        let mut sync = DoubleDoorSync::default();

                        assert_eq!(
                            interact(&mut sync, &region, clicked),
                            ScheduleOutcome::Scheduled(twin),
                            "{direction} {hinge:?} open: {open}"
                        );
                        assert_eq!(sync.pending(), &[twin]);
                    }
                }
            }
        }
    }

    #[test]
    fn synchronized_target_state_is_idempotent() {
        for direction in ALL_CARDINAL_DIRECTIONS {
            for hinge in HINGES {
                for open in [false, true] {
                    let mut region = LoadedRegion::default();
                    // The twin already matches what the origin is about to become
                    place_double_door(&mut region, direction, hinge, open, !open);

                    let mut sync = DoubleDoorSync::default();

                    assert!(
                        matches!(
                            interact(&mut sync, &region, BlockPos::new(0, 0, 0)),
                            ScheduleOutcome::AlreadySynchronized(_)
                        ),
                        "{direction} {hinge:?} open: {open}"
                    );
                    assert!(sync.pending().is_empty());
                }
            }
        }
    }

    #[test]
    fn lone_door_does_nothing() {
        let mut region = LoadedRegion::default();
        place_door(
            &mut region,
            OAK_DOOR,
            BlockPos::new(0, 0, 0),
            CardinalDirection::North,
            DoorHinge::Left,
            false,
        );

        let mut sync = DoubleDoorSync::default();

        assert_eq!(
            interact(&mut sync, &region, BlockPos::new(0, 0, 0)),
            ScheduleOutcome::TwinUnreadable(BlockPos::new(0, 0, -1))
        );
        assert!(sync.pending().is_empty());
    }

    #[test]
    fn same_hinge_neighbour_is_not_a_pair() {
        let mut region = LoadedRegion::default();
        place_door(
            &mut region,
            OAK_DOOR,
            BlockPos::new(0, 0, 0),
            CardinalDirection::North,
            DoorHinge::Left,
            false,
        );
        place_door(
            &mut region,
            OAK_DOOR,
            BlockPos::new(0, 0, -1),
            CardinalDirection::North,
            DoorHinge::Left,
            false,
        );

        let mut sync = DoubleDoorSync::default();

        assert_eq!(
            interact(&mut sync, &region, BlockPos::new(0, 0, 0)),
            ScheduleOutcome::NotAPair(BlockPos::new(0, 0, -1))
        );
        assert!(sync.pending().is_empty());
    }

    #[test]
    fn non_doors_do_nothing() {
        let mut region = LoadedRegion::default();
        let mut sync = DoubleDoorSync::default();

        assert_eq!(interact(&mut sync, &region, BlockPos::new(0, 0, 0)), ScheduleOutcome::NotADoor);

        region.set_block_state(BlockPos::new(0, 0, 0), NbtTag::compound().with("name", "minecraft:stone".into()));
        assert_eq!(interact(&mut sync, &region, BlockPos::new(0, 0, 0)), ScheduleOutcome::NotADoor);

        // States, but no direction
        region.set_block_state(
            BlockPos::new(0, 0, 0),
            NbtTag::compound().with("states", NbtTag::compound().with("open_bit", NbtTag::bit(false))),
        );
        assert_eq!(interact(&mut sync, &region, BlockPos::new(0, 0, 0)), ScheduleOutcome::NotADoor);

        assert!(sync.pending().is_empty());
    }

    #[test]
    fn unknown_direction_does_nothing() {
        let mut region = LoadedRegion::default();
        let door = |upper: bool| {
            NbtTag::compound().with(
                "states",
                NbtTag::compound()
                    .with("minecraft:cardinal_direction", "up".into())
                    .with("upper_block_bit", NbtTag::bit(upper)),
            )
        };
        region.set_block_state(BlockPos::new(0, 0, 0), door(false));
        region.set_block_state(BlockPos::new(0, 1, 0), door(true));

        let mut sync = DoubleDoorSync::default();

        assert_eq!(
            interact(&mut sync, &region, BlockPos::new(0, 0, 0)),
            ScheduleOutcome::NoTwinPosition
        );
        assert!(sync.pending().is_empty());
    }

    #[test]
    fn disabled_doors_do_nothing() {
        let mut region = LoadedRegion::default();
        place_double_door(&mut region, CardinalDirection::South, DoorHinge::Right, false, false);

        let settings = DoubleDoorsSettings {
            enable_doors: false,
            ..Default::default()
        };
        let mut sync = DoubleDoorSync::default();

        assert_eq!(
            sync.on_build_block(&region, &settings, BlockPos::new(0, 0, 0), BlockFace::Down),
            ScheduleOutcome::Disabled(BlockKind::Door)
        );
        assert!(sync.pending().is_empty());
    }

    #[test]
    fn trapdoors_are_gated_by_their_own_setting() {
        let mut region = LoadedRegion::default();
        region.set_block_state(
            BlockPos::new(0, 0, 0),
            NbtTag::compound()
                .with("name", "minecraft:trapdoor".into())
                .with("states", NbtTag::compound().with("open_bit", NbtTag::bit(false))),
        );

        let mut sync = DoubleDoorSync::default();
        let settings = DoubleDoorsSettings {
            enable_trapdoors: false,
            ..Default::default()
        };

        assert_eq!(
            sync.on_build_block(&region, &settings, BlockPos::new(0, 0, 0), BlockFace::Up),
            ScheduleOutcome::Disabled(BlockKind::Trapdoor)
        );
        // Trapdoors don't carry door fields, so even when enabled they never pair
        assert_eq!(interact(&mut sync, &region, BlockPos::new(0, 0, 0)), ScheduleOutcome::NotADoor);
    }

    #[test]
    fn draining_clears_the_batch() {
        let mut region = LoadedRegion::default();
        let twin = place_double_door(&mut region, CardinalDirection::West, DoorHinge::Left, false, false);

        let mut sync = DoubleDoorSync::default();
        interact(&mut sync, &region, BlockPos::new(0, 0, 0));

        assert_eq!(sync.begin_applying(), Some(vec![twin]));
        assert!(sync.is_applying());
        assert!(sync.pending().is_empty());

        sync.finish_applying();
        assert!(!sync.is_applying());
        assert_eq!(sync.begin_applying(), None);
    }

    #[test]
    fn toggles_while_applying_are_ignored() {
        let mut region = LoadedRegion::default();
        let twin = place_double_door(&mut region, CardinalDirection::North, DoorHinge::Right, false, false);
        let origin = BlockPos::new(0, 0, 0);

        let mut sync = DoubleDoorSync::default();
        assert_eq!(interact(&mut sync, &region, origin), ScheduleOutcome::Scheduled(twin));
        toggle(&mut region, origin);

        let batch = sync.begin_applying().expect("Twin was queued");
        for position in batch {
            // The host reports our own toggle as an interaction before applying it
            assert_eq!(interact(&mut sync, &region, position), ScheduleOutcome::Reentrant);
            toggle(&mut region, position);
        }
        sync.finish_applying();

        assert!(sync.pending().is_empty());
        assert_eq!(sync.begin_applying(), None);

        assert!(read_door_state_at(&region, origin).expect("Door").open);
        assert!(read_door_state_at(&region, twin).expect("Door").open);
    }

    #[test]
    fn closing_an_open_pair() {
        let mut region = LoadedRegion::default();
        let twin = place_double_door(&mut region, CardinalDirection::South, DoorHinge::Left, true, true);

        let mut sync = DoubleDoorSync::default();
        assert_eq!(interact(&mut sync, &region, twin.above()), ScheduleOutcome::Scheduled(BlockPos::new(0, 0, 0)));
    }

    #[test]
    fn one_door_sound_is_suppressed_per_batch() {
        let mut sync = DoubleDoorSync::default();

        assert!(!sync.on_sound_played("random.door_open.wooden_door"));

        sync.finish_applying();
        assert!(sync.is_sound_suppression_armed());

        assert!(!sync.on_sound_played("random.click"));
        assert!(sync.on_sound_played("random.wooden_door_open"));
        assert!(!sync.on_sound_played("random.wooden_door_open"));
        assert!(!sync.is_sound_suppression_armed());
    }
}
