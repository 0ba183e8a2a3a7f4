//! Reading door block states.
//!
//! A door is two blocks tall and each half only stores part of the door's state:
//! the lower half is authoritative for the facing direction and whether the door is open,
//! while the upper half is authoritative for the hinge side. [`read_door_state_at`] merges both.

use std::{fmt::Display, str::FromStr};

use derive_more::{Display as DeriveDisplay, Error};

use crate::{
    block::{
        BlockPos, NbtTag,
        block_state::{NAME_KEY, STATES_KEY},
    },
    region::BlockRegion,
};

pub mod pairing;

/// `1` if the hinge is on the right side of the door
pub const HINGE_KEY: &str = "door_hinge_bit";
/// The direction the door faces
pub const DIRECTION_KEY: &str = "minecraft:cardinal_direction";
/// `1` if the door is open
pub const OPEN_KEY: &str = "open_bit";
/// `1` if this is the top block of the door
pub const UPPER_KEY: &str = "upper_block_bit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The 4 horizontal directions a door can face
pub enum CardinalDirection {
    /// -Z
    North,
    /// +Z
    South,
    /// +X
    East,
    /// -X
    West,
}

/// Contains every cardinal direction
pub const ALL_CARDINAL_DIRECTIONS: [CardinalDirection; 4] = [
    CardinalDirection::North,
    CardinalDirection::South,
    CardinalDirection::East,
    CardinalDirection::West,
];

impl CardinalDirection {
    /// The name the host stores this direction as
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

impl Display for CardinalDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, DeriveDisplay, Error, PartialEq, Eq)]
#[display("\"{name}\" is not a cardinal direction")]
/// The string wasn't one of `north`, `south`, `east`, or `west`
pub struct UnknownDirection {
    /// What was parsed
    pub name: String,
}

impl FromStr for CardinalDirection {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Self::North),
            "south" => Ok(Self::South),
            "east" => Ok(Self::East),
            "west" => Ok(Self::West),
            _ => Err(UnknownDirection { name: s.to_owned() }),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
/// Which side of the door the hinge is on, looking along the direction it faces
pub enum DoorHinge {
    #[default]
    /// `door_hinge_bit` is 0
    Left,
    /// `door_hinge_bit` is 1
    Right,
}

impl DoorHinge {
    /// The other side
    pub const fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Creates a hinge from the stored hinge bit
    pub const fn from_right_bit(right: bool) -> Self {
        if right { Self::Right } else { Self::Left }
    }

    /// If this is the right hinge
    pub const fn is_right(self) -> bool {
        matches!(self, Self::Right)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
/// Which of the door's two blocks this is
pub enum DoorHalf {
    #[default]
    /// The bottom block - stores direction + open state
    Lower,
    /// The top block - stores the hinge
    Upper,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// The raw door fields of a single block state.
///
/// Each field is `None` if the block state didn't contain it (or it had the wrong tag type).
pub struct DoorStates {
    /// `door_hinge_bit`
    pub right_hinge: Option<bool>,
    /// `minecraft:cardinal_direction`
    pub direction: Option<String>,
    /// `open_bit`
    pub open: Option<bool>,
    /// `upper_block_bit`
    pub upper_block: Option<bool>,
}

impl DoorStates {
    /// Fills in missing fields with their defaults (closed, left hinge, lower half).
    ///
    /// Returns `None` unless a non-empty direction is present - without one, this block isn't a door.
    pub fn descriptor(&self) -> Option<DoorDescriptor> {
        let direction = self.direction.as_ref().filter(|d| !d.is_empty())?;

        Some(DoorDescriptor {
            half: if self.upper_block.unwrap_or(false) {
                DoorHalf::Upper
            } else {
                DoorHalf::Lower
            },
            open: self.open.unwrap_or(false),
            direction: direction.clone(),
            hinge: DoorHinge::from_right_bit(self.right_hinge.unwrap_or(false)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The state of a whole door
pub struct DoorDescriptor {
    /// The half that was looked at
    pub half: DoorHalf,
    /// If the door is open
    pub open: bool,
    /// The direction the door faces, exactly as the host stored it.
    ///
    /// This is not guaranteed to be a valid [`CardinalDirection`].
    pub direction: String,
    /// The side the hinge is on
    pub hinge: DoorHinge,
}

impl DoorDescriptor {
    /// The position of the lower half of this door, given the position of the half this descriptor was read from
    pub fn lower_position(&self, position: BlockPos) -> BlockPos {
        match self.half {
            DoorHalf::Lower => position,
            DoorHalf::Upper => position.below(),
        }
    }

    /// The direction this door faces, if the host gave a recognized one
    pub fn cardinal_direction(&self) -> Option<CardinalDirection> {
        self.direction.parse().ok()
    }
}

/// Reads the door fields out of a block state.
///
/// Returns `None` only if there is no `states` compound at all. Any individual field may still be missing,
/// so use [`DoorStates::descriptor`] to find out if this is actually a door.
pub fn read_door_state(block_state: &NbtTag) -> Option<DoorStates> {
    let states = block_state.get(STATES_KEY)?;
    states.as_compound()?;

    Some(DoorStates {
        right_hinge: states.get(HINGE_KEY).and_then(NbtTag::as_bit),
        direction: states.get(DIRECTION_KEY).and_then(NbtTag::as_str).map(str::to_owned),
        open: states.get(OPEN_KEY).and_then(NbtTag::as_bit),
        upper_block: states.get(UPPER_KEY).and_then(NbtTag::as_bit),
    })
}

fn door_descriptor_of<R: BlockRegion + ?Sized>(region: &R, position: BlockPos) -> Option<DoorDescriptor> {
    read_door_state(region.block_state(position)?)?.descriptor()
}

/// Reads the full state of the door that has a half at this position.
///
/// Both halves must be present and parse as doors. The direction and open state come from the lower
/// half, and the hinge comes from the upper half.
pub fn read_door_state_at<R: BlockRegion + ?Sized>(region: &R, position: BlockPos) -> Option<DoorDescriptor> {
    let looked_at = door_descriptor_of(region, position)?;

    let (lower_position, upper_position) = match looked_at.half {
        DoorHalf::Lower => (position, position.above()),
        DoorHalf::Upper => (position.below(), position),
    };

    let lower = door_descriptor_of(region, lower_position)?;
    let upper = door_descriptor_of(region, upper_position)?;

    Some(DoorDescriptor {
        half: looked_at.half,
        open: lower.open,
        direction: lower.direction,
        hinge: upper.hinge,
    })
}

/// Creates the block states of both halves of a door, as `(lower, upper)`.
///
/// Both halves carry every field, the same way the host writes them when a door is placed.
pub fn door_block_states(name: &str, direction: CardinalDirection, hinge: DoorHinge, open: bool) -> (NbtTag, NbtTag) {
    let half = |upper: bool| {
        NbtTag::compound().with(NAME_KEY, name.into()).with(
            STATES_KEY,
            NbtTag::compound()
                .with(HINGE_KEY, NbtTag::bit(hinge.is_right()))
                .with(DIRECTION_KEY, direction.as_str().into())
                .with(OPEN_KEY, NbtTag::bit(open))
                .with(UPPER_KEY, NbtTag::bit(upper)),
        )
    };

    (half(false), half(true))
}

/// Sets the `open_bit` of this block state.
///
/// Returns false if this block state has no `states` compound to write into.
pub fn set_open_bit(block_state: &mut NbtTag, open: bool) -> bool {
    let Some(states) = block_state.get_mut(STATES_KEY) else {
        return false;
    };

    if states.as_compound().is_none() {
        return false;
    }

    states.insert(OPEN_KEY, NbtTag::bit(open));
    true
}
