//! Arena index for ingested nodes.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Index into a [`NodeArena`](crate::NodeArena).
///
/// One per distinct front-end node identity. Two parents that reference the
/// same front-end node hold the same `NodeId`.
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Sentinel for "no node".
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Raw index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl Hash for NodeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "NodeId::INVALID")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}
