//! Constrained transfer resolution.
//!
//! Operator-supplied transfer rules (guaranteed connections, stay-seated,
//! forbidden connections, minimum transfer times) override the default
//! minimum-connection-time logic of the journey search. This module indexes
//! those rules per trip pattern at load time and answers, at search time,
//! which trip a rider may board (or alight from, searching backwards) when
//! transferring at a given stop position.
//!
//! The flow is one-way: `TransferIndexGenerator` turns raw
//! `ConstrainedTransfer` records into a forward and a reverse
//! `ConstrainedTransferSearch` per pattern, which are then queried read-only.

mod config;
mod direction;
mod entry;
mod generator;
mod index;
mod issue;
mod search;


pub use config::{ABORT_SEARCH_AFTER_N_NORMAL_TRIPS, TransferSearchConfig};
pub use direction::SearchDirection;
pub use entry::{TransferForPattern, TripMatcher};
pub use generator::{GeneratedTransfers, TransferIndexGenerator};
pub use index::TransferIndex;
pub use issue::{TransferIssue, TransferSide};
pub use search::{BoardingRequest, ConstrainedBoarding, ConstrainedTransferSearch, PatternTransfers};
