//! What a transfer rule permits.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The rule attached to a constrained transfer.
///
/// `Regular` defers to the default minimum-connection-time logic of the
/// outer search. `MinTransferTime` is interpreted together with the
/// `definitive_min_time` search setting: either a floor combined with the
/// ordinary slack, or an exact override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransferConstraint {
    #[default]
    Regular,
    Guaranteed,
    StaySeated,
    NotAllowed,
    MinTransferTime { seconds: u32 },
}

impl TransferConstraint {
    /// Returns true if no special rule applies.
    pub fn is_regular(&self) -> bool {
        matches!(self, TransferConstraint::Regular)
    }

    /// Returns true for guaranteed and stay-seated transfers, which may be
    /// made with zero connection time.
    pub fn is_facilitated(&self) -> bool {
        matches!(
            self,
            TransferConstraint::Guaranteed | TransferConstraint::StaySeated
        )
    }

    /// Returns true if the transfer is forbidden.
    pub fn is_not_allowed(&self) -> bool {
        matches!(self, TransferConstraint::NotAllowed)
    }

    /// Returns the minimum transfer time in seconds, if set.
    pub fn min_transfer_time(&self) -> Option<u32> {
        match self {
            TransferConstraint::MinTransferTime { seconds } => Some(*seconds),
            TransferConstraint::Regular
            | TransferConstraint::Guaranteed
            | TransferConstraint::StaySeated
            | TransferConstraint::NotAllowed => None,
        }
    }
}

impl fmt::Display for TransferConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferConstraint::Regular => f.write_str("regular"),
            TransferConstraint::Guaranteed => f.write_str("guaranteed"),
            TransferConstraint::StaySeated => f.write_str("stay-seated"),
            TransferConstraint::NotAllowed => f.write_str("not-allowed"),
            TransferConstraint::MinTransferTime { seconds } => {
                write!(f, "min-transfer-time({seconds}s)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        assert!(TransferConstraint::Regular.is_regular());
        assert!(TransferConstraint::Guaranteed.is_facilitated());
        assert!(TransferConstraint::StaySeated.is_facilitated());
        assert!(!TransferConstraint::NotAllowed.is_facilitated());
        assert!(TransferConstraint::NotAllowed.is_not_allowed());
        assert_eq!(
            TransferConstraint::MinTransferTime { seconds: 600 }.min_transfer_time(),
            Some(600)
        );
        assert_eq!(TransferConstraint::Guaranteed.min_transfer_time(), None);
    }

    #[test]
    fn default_is_regular() {
        assert_eq!(TransferConstraint::default(), TransferConstraint::Regular);
    }

    #[test]
    fn structural_equality() {
        assert_eq!(
            TransferConstraint::MinTransferTime { seconds: 0 },
            TransferConstraint::MinTransferTime { seconds: 0 }
        );
        assert_ne!(
            TransferConstraint::MinTransferTime { seconds: 0 },
            TransferConstraint::MinTransferTime { seconds: 60 }
        );
    }

    #[test]
    fn serde_tagged() {
        let json = serde_json::to_string(&TransferConstraint::StaySeated).unwrap();
        assert_eq!(json, r#"{"type":"stay_seated"}"#);

        let parsed: TransferConstraint =
            serde_json::from_str(r#"{"type":"min_transfer_time","seconds":600}"#).unwrap();
        assert_eq!(parsed, TransferConstraint::MinTransferTime { seconds: 600 });

        assert!(
            serde_json::from_str::<TransferConstraint>(
                r#"{"type":"min_transfer_time","seconds":-1}"#
            )
            .is_err()
        );
    }

    #[test]
    fn display() {
        assert_eq!(TransferConstraint::NotAllowed.to_string(), "not-allowed");
        assert_eq!(
            TransferConstraint::MinTransferTime { seconds: 90 }.to_string(),
            "min-transfer-time(90s)"
        );
    }
}
