//! Bank detector: ordered keyword rules over the full document text.
//!
//! First matching rule wins. Order matters: a Chase checking marker is
//! checked before the Chase credit-card combination, and "CHASE" on its own
//! never beats the generic "CREDIT CARD STATEMENT" rule.

use stmtx_core::BankTag;

#[derive(Debug, Clone, Copy)]
pub struct DetectionRule {
    pub tag: BankTag,
    /// Every keyword must appear.
    pub all_of: &'static [&'static str],
    /// At least one must appear (ignored when empty).
    pub any_of: &'static [&'static str],
}

impl DetectionRule {
    fn matches(&self, upper: &str) -> bool {
        self.all_of.iter().all(|k| upper.contains(k))
            && (self.any_of.is_empty() || self.any_of.iter().any(|k| upper.contains(k)))
    }
}

/// Priority order, highest first.
pub const DETECTION_RULES: [DetectionRule; 6] = [
    DetectionRule {
        tag: BankTag::WellsFargo,
        all_of: &["WELLS FARGO"],
        any_of: &[],
    },
    DetectionRule {
        tag: BankTag::Bmo,
        all_of: &["BMO"],
        any_of: &[],
    },
    DetectionRule {
        tag: BankTag::ChaseBank,
        all_of: &["CHASE"],
        any_of: &["CHECKING SUMMARY", "TOTAL CHECKING"],
    },
    DetectionRule {
        tag: BankTag::BankOfAmerica,
        all_of: &["BANK OF AMERICA"],
        any_of: &[],
    },
    DetectionRule {
        tag: BankTag::ChaseCreditCard,
        all_of: &["CHASE", "CREDIT CARD STATEMENT"],
        any_of: &[],
    },
    DetectionRule {
        tag: BankTag::CreditCard,
        all_of: &["CREDIT CARD STATEMENT"],
        any_of: &[],
    },
];

pub fn detect_bank(text: &str) -> BankTag {
    let upper = text.to_uppercase();
    DETECTION_RULES
        .iter()
        .find(|rule| rule.matches(&upper))
        .map(|rule| rule.tag)
        .unwrap_or(BankTag::Unknown)
}
