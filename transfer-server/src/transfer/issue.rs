//! Diagnostics reported while indexing constrained transfers.
//!
//! Issues never abort generation; the affected transfer (or entry) is left
//! out and indexing carries on with the rest of the data set.

use std::fmt;

use serde::Serialize;

use crate::domain::{PatternId, StopPosition, TransferId, TransferPoint};

use super::SearchDirection;

/// Which side of a transfer an issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferSide {
    From,
    To,
}

impl fmt::Display for TransferSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferSide::From => f.write_str("from"),
            TransferSide::To => f.write_str("to"),
        }
    }
}

/// A problem found while indexing a constrained transfer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransferIssue {
    /// A transfer point matched no pattern location; the transfer is dropped.
    #[error("transfer {transfer} dropped: {side} point {point} matches no pattern location")]
    Unresolvable {
        transfer: TransferId,
        side: TransferSide,
        point: TransferPoint,
    },

    /// Two transfers resolved to the same keys in the same slot.
    #[error(
        "transfer {transfer} conflicts with {kept} at {pattern} position {stop_position} \
         ({direction}); keeping {kept}"
    )]
    Conflict {
        transfer: TransferId,
        kept: TransferId,
        pattern: PatternId,
        stop_position: StopPosition,
        direction: SearchDirection,
    },
}

impl TransferIssue {
    /// The transfer the issue is about.
    pub fn transfer(&self) -> &TransferId {
        match self {
            TransferIssue::Unresolvable { transfer, .. }
            | TransferIssue::Conflict { transfer, .. } => transfer,
        }
    }
}
