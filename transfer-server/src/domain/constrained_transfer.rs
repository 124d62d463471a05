//! Constrained transfer records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{TransferConstraint, TransferId, TransferPoint};

/// An operator-supplied rule for moving between two trips.
///
/// Created once when the data set is loaded and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstrainedTransfer {
    /// Identifier of the rule, used in diagnostics
    pub id: TransferId,
    /// Where the rider alights
    pub from: TransferPoint,
    /// Where the rider boards
    pub to: TransferPoint,
    /// What the rule permits
    pub constraint: TransferConstraint,
}

impl ConstrainedTransfer {
    /// Creates a new constrained transfer.
    pub fn new(
        id: TransferId,
        from: TransferPoint,
        to: TransferPoint,
        constraint: TransferConstraint,
    ) -> Self {
        Self {
            id,
            from,
            to,
            constraint,
        }
    }
}

impl fmt::Display for ConstrainedTransfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} -> {}, {})",
            self.id, self.from, self.to, self.constraint
        )
    }
}
