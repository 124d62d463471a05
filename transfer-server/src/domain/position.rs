//! Positional indexes used by patterns and the stop index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 0-based index of a stop within a pattern's fixed stop sequence.
///
/// Used instead of a stop id because a pattern may visit the same stop more
/// than once (loops).
///
/// # Examples
///
/// ```
/// use transfer_server::domain::StopPosition;
///
/// let pos = StopPosition(1);
/// assert_eq!(pos.next(), StopPosition(2));
/// assert_eq!(pos.prev(), Some(StopPosition(0)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StopPosition(pub usize);

impl StopPosition {
    /// Returns the next position.
    pub fn next(self) -> Self {
        StopPosition(self.0 + 1)
    }

    /// Returns the previous position, if any.
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(StopPosition)
    }
}

impl fmt::Display for StopPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StopPosition {
    fn from(value: usize) -> Self {
        StopPosition(value)
    }
}

/// Dense global index of a stop, assigned by the stop index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopOrdinal(pub usize);

impl fmt::Display for StopOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
