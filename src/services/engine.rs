//! Master governance protocol: detectors → bounded trust score → channel.
//!
//! Every record is scored on its own. Nothing here reads or writes state shared
//! between rows, which is what lets `evaluate_batch` fan out over rayon.

use crate::domain::constants::{COL_KHASRA, COL_OWNER, UNKNOWN_KHASRA, UNKNOWN_OWNER};
use crate::domain::models::{
    AuditResult, Channel, ChannelSummary, LandCategory, LandRecord, MutationCategory,
};
use crate::services::detectors::{
    classify_land, classify_mutation, derive_mutation_status, detect_custodian,
    detect_legal_dispute,
};
use crate::services::identity::{generate_id, similarity};
use crate::services::policy::{Policy, Thresholds};
use rayon::prelude::*;

/// What channel resolution gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct ChannelInput {
    pub land: LandCategory,
    pub mutation: MutationCategory,
    pub custodian: bool,
    pub score: f64,
}

pub struct ChannelRule {
    pub name: &'static str,
    pub applies: fn(&ChannelInput, &Thresholds) -> bool,
    pub channel: Channel,
    pub action: &'static str,
}

fn hard_block(i: &ChannelInput, _: &Thresholds) -> bool {
    i.land == LandCategory::Blocked
}

fn inheritance_amnesty(i: &ChannelInput, t: &Thresholds) -> bool {
    i.mutation == MutationCategory::GreyCandidate && i.score >= t.grey
}

fn custodian_ceiling(i: &ChannelInput, t: &Thresholds) -> bool {
    i.custodian && i.score >= t.custodian_floor
}

fn auto_approve(i: &ChannelInput, t: &Thresholds) -> bool {
    i.score >= t.green
}

fn provisional(i: &ChannelInput, t: &Thresholds) -> bool {
    i.score >= t.amber
}

fn always(_: &ChannelInput, _: &Thresholds) -> bool {
    true
}

/// Evaluated top to bottom; the first rule that applies decides. The order is
/// the policy: hard block > amnesty > custodian ceiling > score thresholds.
pub const CHANNEL_RULES: &[ChannelRule] = &[
    ChannelRule {
        name: "hard_block",
        applies: hard_block,
        channel: Channel::Red,
        action: "Ineligible Land (Road/River)",
    },
    ChannelRule {
        name: "inheritance_amnesty",
        applies: inheritance_amnesty,
        channel: Channel::Grey,
        action: "Deemed Verified (24 Mo. Grace)",
    },
    ChannelRule {
        name: "custodian_ceiling",
        applies: custodian_ceiling,
        channel: Channel::Amber,
        action: "Issue CRC (Crop Loan Only)",
    },
    ChannelRule {
        name: "auto_approve",
        applies: auto_approve,
        channel: Channel::Green,
        action: "Auto-Approve KCC",
    },
    ChannelRule {
        name: "provisional",
        applies: provisional,
        channel: Channel::Amber,
        action: "Provisional Review",
    },
    ChannelRule {
        name: "score_too_low",
        applies: always,
        channel: Channel::Red,
        action: "Score Too Low",
    },
];

pub fn resolve_channel(input: &ChannelInput, thresholds: &Thresholds) -> &'static ChannelRule {
    CHANNEL_RULES
        .iter()
        .find(|rule| (rule.applies)(input, thresholds))
        .unwrap_or(&CHANNEL_RULES[CHANNEL_RULES.len() - 1])
}

fn round2(score: f64) -> f64 {
    let rounded = (score * 100.0).round() / 100.0;
    if rounded <= 0.0 {
        0.0
    } else {
        rounded.min(1.0)
    }
}

pub fn evaluate(record: &LandRecord, policy: &Policy) -> AuditResult {
    let penalties = &policy.penalties;
    let remarks = record.remarks_text();
    let mut score = 1.0;
    let mut trace = Vec::new();

    let (custodian, penalty) = detect_custodian(remarks, penalties);
    if custodian {
        score += penalty;
        trace.push(format!("Custodian Land ({:.2})", penalty));
    }

    let (dispute, penalty) = detect_legal_dispute(remarks, penalties);
    if dispute {
        score += penalty;
        trace.push(format!("Legal Dispute ({:.2})", penalty));
    }

    let land = classify_land(record.land_type_text(), penalties);
    if land.penalty != 0.0 {
        score += land.penalty;
        trace.push(format!(
            "Land Type: {} ({:.2})",
            land.category.as_str(),
            land.penalty
        ));
    }

    let status = match &record.mutation_status {
        Some(s) => s.clone(),
        None => derive_mutation_status(remarks, &policy.mutation.default_status),
    };
    let (mutation, penalty) = classify_mutation(&status, remarks, penalties);
    if penalty != 0.0 {
        score += penalty;
        trace.push(format!("Broken Title Chain ({:.2})", penalty));
    } else if mutation == MutationCategory::GreyCandidate {
        trace.push("Varasat Exemption (Penalty Waived)".to_string());
    }

    let identity_score = similarity(
        record.owner_name.as_deref(),
        record.resolved_verified_name(),
    );
    if identity_score < policy.thresholds.identity_match {
        score += penalties.identity_mismatch;
        trace.push(format!(
            "Identity Mismatch {:.1}% ({:.2})",
            identity_score, penalties.identity_mismatch
        ));
    }

    let mut degraded = false;
    if record.owner_name.is_none() {
        degraded = true;
        trace.push(format!("{} missing (ID uses '{}')", COL_OWNER, UNKNOWN_OWNER));
    }
    if record.khasra_no.is_none() {
        degraded = true;
        trace.push(format!(
            "{} missing (ID uses '{}')",
            COL_KHASRA, UNKNOWN_KHASRA
        ));
    }

    let identity = &policy.identity;
    let record_id = generate_id(
        record.owner_name.as_deref().unwrap_or(UNKNOWN_OWNER),
        record.khasra_no.as_deref().unwrap_or(UNKNOWN_KHASRA),
        &identity.village_code,
        &identity.device_id,
        identity.digest_len,
    );

    let trust_score = round2(score);
    let rule = resolve_channel(
        &ChannelInput {
            land: land.category,
            mutation,
            custodian,
            score: trust_score,
        },
        &policy.thresholds,
    );
    tracing::trace!(
        record_id = %record_id,
        trust_score,
        rule = rule.name,
        "record evaluated"
    );

    AuditResult {
        record_id,
        trust_score,
        channel: rule.channel,
        action: rule.action,
        audit_trace: trace,
        land_category: land.category,
        mutation_category: mutation,
        identity_score,
        custodian,
        degraded,
        record: record.clone(),
    }
}

/// Order-preserving parallel map of `evaluate` over a batch.
pub fn evaluate_batch(records: &[LandRecord], policy: &Policy) -> Vec<AuditResult> {
    let results: Vec<AuditResult> = records.par_iter().map(|r| evaluate(r, policy)).collect();
    tracing::debug!(records = results.len(), "batch evaluated");
    results
}

pub fn summarize(results: &[AuditResult]) -> ChannelSummary {
    let mut s = ChannelSummary {
        total: results.len(),
        ..ChannelSummary::default()
    };
    for r in results {
        match r.channel {
            Channel::Green => s.green += 1,
            Channel::Grey => s.grey += 1,
            Channel::Amber => s.amber += 1,
            Channel::Red => s.red += 1,
        }
        if r.degraded {
            s.degraded += 1;
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::policy::Profile;

    fn record(owner: &str, verified: &str, land_type: &str, remarks: &str) -> LandRecord {
        LandRecord {
            owner_name: Some(owner.to_string()),
            verified_name: Some(verified.to_string()),
            khasra_no: Some("401".to_string()),
            land_type: Some(land_type.to_string()),
            remarks: Some(remarks.to_string()),
            ..LandRecord::default()
        }
    }

    fn input(land: LandCategory, mutation: MutationCategory, custodian: bool, score: f64) -> ChannelInput {
        ChannelInput {
            land,
            mutation,
            custodian,
            score,
        }
    }

    #[test]
    fn clean_record_is_auto_approved() {
        let r = evaluate(
            &record("Pawan Kumar", "Pawan Kumar", "Agricultural", "Clean"),
            &Policy::default(),
        );
        assert_eq!(r.trust_score, 1.0);
        assert_eq!(r.channel, Channel::Green);
        assert_eq!(r.action, "Auto-Approve KCC");
        assert!(r.audit_trace.is_empty());
        assert_eq!(r.trace_text(), "Clean Record");
        assert!(!r.degraded);
    }

    #[test]
    fn blocked_infrastructure_is_red_regardless_of_score() {
        let r = evaluate(
            &record("State Govt PWD", "State Govt PWD", "Gair Mumkin Sarak", "Road Infra"),
            &Policy::default(),
        );
        assert_eq!(r.land_category, LandCategory::Blocked);
        assert_eq!(r.trust_score, 0.6);
        assert_eq!(r.channel, Channel::Red);
        assert_eq!(r.action, "Ineligible Land (Road/River)");
    }

    #[test]
    fn hard_block_beats_high_score_when_penalty_waived() {
        let mut policy = Policy::default();
        policy.penalties.land_blocked = 0.0;
        let r = evaluate(
            &record("Harbans Lal", "Harbans Lal", "Gair Mumkin Nallah", "Canal"),
            &policy,
        );
        assert_eq!(r.trust_score, 1.0);
        assert_eq!(r.channel, Channel::Red);
    }

    #[test]
    fn inheritance_amnesty_routes_grey_at_full_score() {
        let r = evaluate(
            &record("Late Ghulam Rasool", "Late Ghulam Rasool", "Agri", "Varasat Pending"),
            &Policy::default(),
        );
        assert_eq!(r.mutation_category, MutationCategory::GreyCandidate);
        assert_eq!(r.trust_score, 1.0);
        assert_eq!(r.channel, Channel::Grey);
        assert_eq!(r.action, "Deemed Verified (24 Mo. Grace)");
        assert_eq!(r.audit_trace, vec!["Varasat Exemption (Penalty Waived)"]);
    }

    #[test]
    fn custodian_never_reaches_green() {
        let r = evaluate(
            &record("Refugee Alloc", "Refugee Alloc", "Agri", "Custodian Land"),
            &Policy::default(),
        );
        assert!(r.custodian);
        assert_eq!(r.trust_score, 0.75);
        assert_eq!(r.channel, Channel::Amber);
        assert_eq!(r.action, "Issue CRC (Crop Loan Only)");

        let mut lenient = Policy::default();
        lenient.penalties.custodian = 0.0;
        let r = evaluate(
            &record("Refugee Alloc", "Refugee Alloc", "Agri", "Evacuee"),
            &lenient,
        );
        assert_eq!(r.trust_score, 1.0);
        assert_ne!(r.channel, Channel::Green);
    }

    #[test]
    fn identity_mismatch_records_literal_score() {
        let r = evaluate(
            &record("Ram Kumar", "Totally Different Person", "Agricultural", "Clean"),
            &Policy::default(),
        );
        assert!(r.identity_score < 50.0);
        assert_eq!(r.trust_score, 0.7);
        assert_eq!(r.channel, Channel::Amber);
        assert_eq!(r.audit_trace, vec!["Identity Mismatch 18.2% (-0.30)"]);
    }

    #[test]
    fn strict_profile_doubles_down_on_mismatch() {
        let r = evaluate(
            &record("Ram Kumar", "Totally Different Person", "Agricultural", "Clean"),
            &Policy::for_profile(Profile::Strict),
        );
        assert_eq!(r.trust_score, 0.5);
        assert_eq!(r.audit_trace, vec!["Identity Mismatch 18.2% (-0.50)"]);
    }

    #[test]
    fn trace_follows_fixed_evaluation_order() {
        let r = evaluate(
            &record(
                "Ram Kumar",
                "Totally Different Person",
                "Gair Mumkin Makan",
                "Custodian, court stay, sale pending",
            ),
            &Policy::default(),
        );
        assert_eq!(
            r.audit_trace,
            vec![
                "Custodian Land (-0.25)",
                "Legal Dispute (-0.30)",
                "Land Type: HOUSING (-0.10)",
                "Broken Title Chain (-0.20)",
                "Identity Mismatch 18.2% (-0.30)",
            ]
        );
        assert_eq!(r.trust_score, 0.0);
        assert_eq!(r.channel, Channel::Red);
        assert_eq!(r.action, "Score Too Low");
    }

    #[test]
    fn explicit_mutation_status_overrides_derivation() {
        let mut rec = record("Pawan Kumar", "Pawan Kumar", "Agri", "Mutation 505");
        rec.mutation_status = Some("No".to_string());
        let r = evaluate(&rec, &Policy::default());
        assert_eq!(r.mutation_category, MutationCategory::BrokenChain);
        assert_eq!(r.trust_score, 0.8);
        assert_eq!(r.channel, Channel::Green);
    }

    #[test]
    fn configurable_default_status_penalizes_silent_remarks() {
        let mut policy = Policy::default();
        policy.mutation.default_status = "Pending".to_string();
        let r = evaluate(
            &record("Pawan Kumar", "Pawan Kumar", "Agri", "Clean"),
            &policy,
        );
        assert_eq!(r.mutation_category, MutationCategory::BrokenChain);
        assert_eq!(r.trust_score, 0.8);
    }

    #[test]
    fn missing_identity_fields_use_sentinels_and_flag() {
        let rec = LandRecord {
            remarks: Some("Clean".to_string()),
            ..LandRecord::default()
        };
        let r = evaluate(&rec, &Policy::default());
        assert!(r.degraded);
        assert_eq!(r.record_id, "JK-C2B8615D8E");
        assert_eq!(r.identity_score, 0.0);
        assert_eq!(
            r.audit_trace,
            vec![
                "Identity Mismatch 0.0% (-0.30)",
                "Owner_Name missing (ID uses 'Unknown')",
                "Khasra_No missing (ID uses '000')",
            ]
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let rec = record("Sardar Karnail Singh", "Karnail Singh", "Gair Mumkin", "Stay 12");
        let policy = Policy::default();
        assert_eq!(evaluate(&rec, &policy), evaluate(&rec, &policy));
    }

    #[test]
    fn score_stays_within_bounds() {
        let policy = Policy::for_profile(Profile::Strict);
        for (land, remarks) in [
            ("Gair Mumkin Darya", "custodian stay court pending"),
            ("Agri", ""),
            ("Gair Mumkin", "evacuee sale pending"),
        ] {
            let r = evaluate(&record("A", "Zzzz", land, remarks), &policy);
            assert!((0.0..=1.0).contains(&r.trust_score), "{}", r.trust_score);
        }
    }

    #[test]
    fn rule_table_precedence() {
        let t = Thresholds::default();
        let names = |i: ChannelInput| resolve_channel(&i, &t).name;
        assert_eq!(
            names(input(LandCategory::Blocked, MutationCategory::GreyCandidate, true, 1.0)),
            "hard_block"
        );
        assert_eq!(
            names(input(LandCategory::Agri, MutationCategory::GreyCandidate, true, 0.9)),
            "inheritance_amnesty"
        );
        assert_eq!(
            names(input(LandCategory::Agri, MutationCategory::GreyCandidate, true, 0.7)),
            "custodian_ceiling"
        );
        assert_eq!(
            names(input(LandCategory::Housing, MutationCategory::Active, false, 0.8)),
            "auto_approve"
        );
        assert_eq!(
            names(input(LandCategory::General, MutationCategory::Active, true, 0.45)),
            "score_too_low"
        );
        assert_eq!(
            names(input(LandCategory::Agri, MutationCategory::Active, false, 0.5)),
            "provisional"
        );
    }

    #[test]
    fn batch_preserves_order_and_counts_channels() {
        let records: Vec<LandRecord> = (0..64)
            .map(|i| {
                let land = if i % 2 == 0 { "Agri" } else { "Gair Mumkin Sarak" };
                let mut r = record("Pawan Kumar", "Pawan Kumar", land, "Clean");
                r.khasra_no = Some(i.to_string());
                r
            })
            .collect();
        let policy = Policy::default();
        let results = evaluate_batch(&records, &policy);
        assert_eq!(results.len(), records.len());
        for (rec, res) in records.iter().zip(&results) {
            assert_eq!(&res.record, rec);
            assert_eq!(res, &evaluate(rec, &policy));
        }
        let summary = summarize(&results);
        assert_eq!(summary.total, 64);
        assert_eq!(summary.green, 32);
        assert_eq!(summary.red, 32);
        assert_eq!(summary.degraded, 0);
    }
}
