use serde::{Deserialize, Serialize};
use std::fmt;

/// Loan lifecycle state as stored in the contract's `status` variable.
///
/// The numeric values mirror the Solidity enum declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
    Repaid,
    /// Anything outside the declared enum range.
    Unknown,
}

impl LoanStatus {
    pub fn from_raw(value: u8) -> Self {
        match value {
            0 => LoanStatus::Pending,
            1 => LoanStatus::Approved,
            2 => LoanStatus::Rejected,
            3 => LoanStatus::Repaid,
            _ => LoanStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "Pending",
            LoanStatus::Approved => "Approved",
            LoanStatus::Rejected => "Rejected",
            LoanStatus::Repaid => "Repaid",
            LoanStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_declared_values() {
        assert_eq!(LoanStatus::from_raw(0), LoanStatus::Pending);
        assert_eq!(LoanStatus::from_raw(1), LoanStatus::Approved);
        assert_eq!(LoanStatus::from_raw(2), LoanStatus::Rejected);
        assert_eq!(LoanStatus::from_raw(3), LoanStatus::Repaid);
    }

    #[test]
    fn out_of_range_is_unknown() {
        assert_eq!(LoanStatus::from_raw(4), LoanStatus::Unknown);
        assert_eq!(LoanStatus::from_raw(255), LoanStatus::Unknown);
    }

    #[test]
    fn displays_readable_names() {
        assert_eq!(LoanStatus::Approved.to_string(), "Approved");
        assert_eq!(LoanStatus::Unknown.to_string(), "Unknown");
    }
}
