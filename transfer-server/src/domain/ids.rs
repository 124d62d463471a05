//! Opaque identifiers for transit entities.
//!
//! Every identifier wraps a non-empty string. The wrappers exist so that a
//! stop id can never be passed where a trip id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing an identifier from an invalid string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id: {reason}")]
pub struct InvalidId {
    kind: &'static str,
    reason: &'static str,
}

macro_rules! transit_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier.
            ///
            /// Returns an error if the string is empty.
            pub fn new(s: impl Into<String>) -> Result<Self, InvalidId> {
                let s = s.into();
                if s.is_empty() {
                    return Err(InvalidId {
                        kind: $kind,
                        reason: "cannot be empty",
                    });
                }
                Ok(Self(s))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidId;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

transit_id!(
    /// Identifier of a single boarding location (a platform, a bus pole).
    ///
    /// # Examples
    ///
    /// ```
    /// use transfer_server::domain::StopId;
    ///
    /// let stop = StopId::new("B").unwrap();
    /// assert_eq!(stop.as_str(), "B");
    ///
    /// // Empty strings are rejected
    /// assert!(StopId::new("").is_err());
    /// ```
    StopId,
    "stop"
);

transit_id!(
    /// Identifier of a station: a group of stops sharing a transfer area.
    StationId,
    "station"
);

transit_id!(
    /// Identifier of a route.
    RouteId,
    "route"
);

transit_id!(
    /// Identifier of one scheduled trip.
    TripId,
    "trip"
);

transit_id!(
    /// Identifier of a trip pattern.
    PatternId,
    "pattern"
);

transit_id!(
    /// Identifier of a constrained transfer record.
    TransferId,
    "transfer"
);


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any non-empty string can be used as an identifier
        #[test]
        fn nonempty_always_valid(s in ".+") {
            prop_assert!(TripId::new(s).is_ok());
        }

        /// Roundtrip: new then as_str returns the original
        #[test]
        fn roundtrip(s in ".+") {
            let id = StopId::new(s.clone()).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }
    }
}
