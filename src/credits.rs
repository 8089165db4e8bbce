/// Credit-metered operations
///
/// Certain wizard transitions consume credits from the user's balance. The
/// flow checks the balance through `CreditLedger` and asks for explicit
/// confirmation through `CreditPrompt` before advancing.
use serde::{Deserialize, Serialize};

/// Operation identifier for credit metering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditOp {
    /// Automated analysis of the intraoral photo
    CaseAnalysis,

    /// Digital smile design simulation
    DsdSimulation,
}

impl CreditOp {
    /// Wire name of the operation, as the billing backend knows it
    pub fn name(&self) -> &'static str {
        match self {
            CreditOp::CaseAnalysis => "case_analysis",
            CreditOp::DsdSimulation => "dsd_simulation",
        }
    }

    /// Human-readable label for confirmation dialogs
    pub fn label(&self) -> &'static str {
        match self {
            CreditOp::CaseAnalysis => "Case analysis",
            CreditOp::DsdSimulation => "Smile simulation",
        }
    }

    /// Default credit cost, used when the ledger has no override
    pub fn default_cost(&self) -> u32 {
        match self {
            CreditOp::CaseAnalysis => 1,
            CreditOp::DsdSimulation => 2,
        }
    }

    /// All metered operations
    pub fn all() -> Vec<CreditOp> {
        vec![CreditOp::CaseAnalysis, CreditOp::DsdSimulation]
    }
}

impl std::fmt::Display for CreditOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Read access to the user's credit balance and per-operation pricing
pub trait CreditLedger {
    /// Credits remaining on the account
    fn remaining(&self) -> u32;

    /// Cost of a single operation
    fn cost_of(&self, op: CreditOp) -> u32 {
        op.default_cost()
    }
}

/// User-facing confirmation for credit-consuming transitions.
///
/// Implementations typically show a dialog and block until the user
/// answers. Returning `false` leaves the wizard state unchanged.
pub trait CreditPrompt {
    fn confirm(&self, op: CreditOp, label: &str, cost: u32) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names() {
        assert_eq!(CreditOp::CaseAnalysis.name(), "case_analysis");
        assert_eq!(CreditOp::DsdSimulation.name(), "dsd_simulation");
    }

    #[test]
    fn test_default_costs() {
        assert_eq!(CreditOp::CaseAnalysis.default_cost(), 1);
        assert_eq!(CreditOp::DsdSimulation.default_cost(), 2);

        let combined: u32 = CreditOp::all().iter().map(|op| op.default_cost()).sum();
        assert_eq!(combined, 3);
    }

    #[test]
    fn test_ledger_default_cost_passthrough() {
        struct FlatLedger;
        impl CreditLedger for FlatLedger {
            fn remaining(&self) -> u32 {
                10
            }
        }

        let ledger = FlatLedger;
        assert_eq!(ledger.cost_of(CreditOp::DsdSimulation), 2);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&CreditOp::CaseAnalysis).unwrap();
        let back: CreditOp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CreditOp::CaseAnalysis);
    }
}
