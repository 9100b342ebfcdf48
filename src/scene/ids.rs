//! Newtype identifiers for scene elements and staves.
//!
//! Staves are keyed by the stable `(system, staff index)` pair rather than by
//! the identity of any rendered object, so accumulation does not depend on
//! the order or address of the fragments it sees.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for an element in a scene.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Creates a new ElementId.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ElementId {
    fn from(id: u64) -> Self {
        ElementId::new(id)
    }
}

/// Identifies one physical staff: a staff index within a rendered system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StaffKey {
    /// The enclosing system element.
    pub system: ElementId,
    /// Zero-based staff index within the system.
    pub staff_idx: usize,
}

impl StaffKey {
    /// Creates a new staff key.
    #[inline]
    pub fn new(system: impl Into<ElementId>, staff_idx: usize) -> Self {
        Self {
            system: system.into(),
            staff_idx,
        }
    }
}

impl fmt::Display for StaffKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "system {} staff {}", self.system, self.staff_idx)
    }
}
