//! The tag tree the host describes every block's state with.
//!
//! A block state looks like
//! ```text
//! {
//!     name: "minecraft:oak_door",
//!     states: {
//!         door_hinge_bit: 0b,
//!         "minecraft:cardinal_direction": "east",
//!         open_bit: 0b,
//!         upper_block_bit: 0b,
//!     },
//! }
//! ```

use bevy::platform::collections::HashMap;

/// The key the block's identifier is stored under
pub const NAME_KEY: &str = "name";
/// The key the block's state values are stored under
pub const STATES_KEY: &str = "states";

#[derive(Debug, Clone, PartialEq)]
/// A single node of the host's block state tree
pub enum NbtTag {
    /// Used for all the `*_bit` flags
    Byte(i8),
    /// 16 bit integer
    Short(i16),
    /// 32 bit integer
    Int(i32),
    /// 64 bit integer
    Long(i64),
    /// 32 bit float
    Float(f32),
    /// 64 bit float
    Double(f64),
    /// Text, such as a direction or a block name
    String(String),
    /// An ordered list of tags
    List(Vec<NbtTag>),
    /// Named children
    Compound(HashMap<String, NbtTag>),
}

impl NbtTag {
    /// Creates an empty compound tag
    pub fn compound() -> Self {
        Self::Compound(HashMap::default())
    }

    /// Adds (or replaces) a child of this compound and returns it for chaining.
    ///
    /// Does nothing if this is not a compound.
    pub fn with(mut self, key: impl Into<String>, value: NbtTag) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a child into this compound, returning the tag it replaced.
    ///
    /// Returns `None` without inserting if this is not a compound.
    pub fn insert(&mut self, key: impl Into<String>, value: NbtTag) -> Option<NbtTag> {
        match self {
            Self::Compound(children) => children.insert(key.into(), value),
            _ => None,
        }
    }

    /// Gets a child of this compound
    pub fn get(&self, key: &str) -> Option<&NbtTag> {
        self.as_compound().and_then(|children| children.get(key))
    }

    /// Gets a child of this compound mutably
    pub fn get_mut(&mut self, key: &str) -> Option<&mut NbtTag> {
        match self {
            Self::Compound(children) => children.get_mut(key),
            _ => None,
        }
    }

    /// Returns the children if this is a compound
    pub fn as_compound(&self) -> Option<&HashMap<String, NbtTag>> {
        match self {
            Self::Compound(children) => Some(children),
            _ => None,
        }
    }

    /// Returns the value if this is a byte tag
    pub fn as_byte(&self) -> Option<i8> {
        match self {
            Self::Byte(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text if this is a string tag
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Creates a byte tag holding 1 or 0
    pub fn bit(value: bool) -> Self {
        Self::Byte(value as i8)
    }

    /// `Some(true)` for a byte tag holding 1, `Some(false)` for any other byte value.
    ///
    /// `None` if this isn't a byte tag at all.
    pub fn as_bit(&self) -> Option<bool> {
        self.as_byte().map(|b| b == 1)
    }
}

impl From<&str> for NbtTag {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for NbtTag {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The families of interactable blocks that can come in pairs
pub enum BlockKind {
    /// Two block tall doors
    Door,
    /// Trapdoors
    Trapdoor,
    /// Fence gates
    FenceGate,
    /// Anything that should never be paired
    Other,
}

impl BlockKind {
    /// Classifies a block state by its `name`.
    ///
    /// States without a name are treated as doors, since the door fields alone decide whether
    /// they can be paired.
    pub fn of(block_state: &NbtTag) -> Self {
        let Some(name) = block_state.get(NAME_KEY).and_then(|n| n.as_str()) else {
            return Self::Door;
        };

        if name.ends_with("_trapdoor") || name.ends_with(":trapdoor") {
            Self::Trapdoor
        } else if name.contains("fence_gate") {
            Self::FenceGate
        } else if name.contains("door") {
            Self::Door
        } else {
            Self::Other
        }
    }
}
