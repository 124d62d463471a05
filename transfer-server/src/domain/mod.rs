//! Domain types for constrained transfer resolution.
//!
//! This module contains the value types that describe where a transfer rule
//! applies and what it permits. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod constrained_transfer;
mod error;
mod ids;
mod position;
mod time;
mod transfer_constraint;
mod transfer_point;

pub use constrained_transfer::ConstrainedTransfer;
pub use error::DomainError;
pub use ids::{InvalidId, PatternId, RouteId, StationId, StopId, TransferId, TripId};
pub use position::{StopOrdinal, StopPosition};
pub use time::{TimeError, TransitTime};
pub use transfer_constraint::TransferConstraint;
pub use transfer_point::{Specificity, TransferPoint};
