//! Independent risk detectors. Each reads one or two text fields and returns
//! a category plus the penalty (zero or negative) taken from the policy.

use crate::domain::constants::{
    CUSTODIAN_KEYWORDS, HOUSING_PHRASES, INFRASTRUCTURE_PHRASES, INHERITANCE_MARKER,
    LEGAL_DISPUTE_KEYWORDS, PENDING_MARKER, PENDING_STATUSES, STATUS_ACTIVE, STATUS_PENDING,
    UNCULTIVABLE_MARKERS,
};
use crate::domain::models::{LandCategory, MutationCategory};
use crate::services::policy::PenaltyTable;

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Custodian/evacuee property scan. The flag, not the penalty, is what keeps
/// such records out of the green channel.
pub fn detect_custodian(remarks: &str, penalties: &PenaltyTable) -> (bool, f64) {
    let remarks = remarks.to_lowercase();
    if contains_any(&remarks, CUSTODIAN_KEYWORDS) {
        (true, penalties.custodian)
    } else {
        (false, 0.0)
    }
}

/// Plain substring scan, so "stayed" and "courtyard" also match.
pub fn detect_legal_dispute(remarks: &str, penalties: &PenaltyTable) -> (bool, f64) {
    let remarks = remarks.to_lowercase();
    if contains_any(&remarks, LEGAL_DISPUTE_KEYWORDS) {
        (true, penalties.legal_dispute)
    } else {
        (false, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandVerdict {
    pub category: LandCategory,
    pub penalty: f64,
    pub hard_block: bool,
}

/// Splits "gair mumkin" land into housing (permissible collateral), state
/// infrastructure (hard block) and the general remainder. First rule wins.
pub fn classify_land(land_type: &str, penalties: &PenaltyTable) -> LandVerdict {
    let lt = land_type.to_lowercase();
    let (category, penalty) = if !contains_any(&lt, UNCULTIVABLE_MARKERS) {
        (LandCategory::Agri, 0.0)
    } else if contains_any(&lt, HOUSING_PHRASES) {
        (LandCategory::Housing, penalties.land_housing)
    } else if contains_any(&lt, INFRASTRUCTURE_PHRASES) {
        (LandCategory::Blocked, penalties.land_blocked)
    } else {
        (LandCategory::General, penalties.land_general)
    };
    LandVerdict {
        category,
        penalty,
        hard_block: category == LandCategory::Blocked,
    }
}

/// Infers a mutation status from remarks when the sheet has no status column.
///
/// A pending marker wins; a digit run reads as a mutation number, i.e. a
/// completed transaction. With neither, `default_status` applies.
pub fn derive_mutation_status(remarks: &str, default_status: &str) -> String {
    let rem = remarks.to_lowercase();
    if rem.contains(PENDING_MARKER) {
        return STATUS_PENDING.to_string();
    }
    if rem.chars().any(|c| c.is_ascii_digit()) {
        return STATUS_ACTIVE.to_string();
    }
    default_status.to_string()
}

/// Pending inheritance (varasat) is an administrative delay, not a title
/// defect: it is waived and becomes a grey-channel candidate.
pub fn classify_mutation(
    status: &str,
    remarks: &str,
    penalties: &PenaltyTable,
) -> (MutationCategory, f64) {
    let status = status.trim().to_lowercase();
    if !PENDING_STATUSES.contains(&status.as_str()) {
        return (MutationCategory::Active, 0.0);
    }
    if remarks.to_lowercase().contains(INHERITANCE_MARKER) {
        (MutationCategory::GreyCandidate, 0.0)
    } else {
        (MutationCategory::BrokenChain, penalties.broken_chain)
    }
}
