//! Finding the other half of a double door.
//!
//! Two doors make a double door when they sit side by side, face the same way, and have their
//! hinges on opposite sides so they swing apart from the middle.

use crate::{block::BlockPos, region::BlockRegion};

use super::{CardinalDirection, DoorDescriptor, DoorHinge, read_door_state_at};

impl CardinalDirection {
    /// The offset from a door's lower half to where its twin's lower half would be.
    pub const fn twin_offset(self, hinge: DoorHinge) -> BlockPos {
        let (x, z) = match (self, hinge) {
            (Self::East, DoorHinge::Right) => (-1, 0),
            (Self::East, DoorHinge::Left) => (1, 0),
            (Self::West, DoorHinge::Right) => (1, 0),
            (Self::West, DoorHinge::Left) => (-1, 0),
            (Self::South, DoorHinge::Right) => (0, -1),
            (Self::South, DoorHinge::Left) => (0, 1),
            (Self::North, DoorHinge::Right) => (0, 1),
            (Self::North, DoorHinge::Left) => (0, -1),
        };

        BlockPos::new(x, 0, z)
    }
}

/// Computes where the lower half of this door's twin would be.
///
/// `direction` is the direction exactly as the host stored it. Returns `None` if that isn't one of the
/// four cardinal directions.
pub fn adjacent_door_position(lower_position: BlockPos, direction: &str, hinge: DoorHinge) -> Option<BlockPos> {
    let direction = direction.parse::<CardinalDirection>().ok()?;

    Some(lower_position + direction.twin_offset(hinge))
}

/// Checks if the door at `candidate` is the twin of the `origin` door.
///
/// The candidate must be a readable door facing the same direction with its hinge on the other side.
pub fn is_valid_pair<R: BlockRegion + ?Sized>(region: &R, candidate: BlockPos, origin: &DoorDescriptor) -> bool {
    let Some(candidate) = read_door_state_at(region, candidate) else {
        return false;
    };

    candidate.direction == origin.direction && candidate.hinge != origin.hinge
}
