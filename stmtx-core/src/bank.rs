use std::fmt;

use serde::{Deserialize, Serialize};

/// Which institution's layout a document uses. Set once per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BankTag {
    WellsFargo,
    ChaseCreditCard,
    ChaseBank,
    BankOfAmerica,
    #[serde(rename = "BMO")]
    Bmo,
    CreditCard,
    Unknown,
}

impl BankTag {
    /// Label written to the `bank` output column.
    pub fn label(&self) -> &'static str {
        match self {
            BankTag::WellsFargo => "Wells Fargo",
            BankTag::ChaseCreditCard => "Chase Credit Card",
            BankTag::ChaseBank => "Chase",
            BankTag::BankOfAmerica => "Bank of America",
            BankTag::Bmo => "BMO",
            BankTag::CreditCard => "Credit Card",
            BankTag::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BankTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
