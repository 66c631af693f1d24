use crate::domain::constants::{
    DEFAULT_DEVICE_ID, DEFAULT_DIGEST_LEN, DEFAULT_VILLAGE_CODE, STATUS_ACTIVE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PolicyError {
    #[error("penalty `{0}` must be zero or negative, got {1}")]
    PositivePenalty(&'static str, f64),
    #[error("threshold `{0}` must lie in [{1}, {2}], got {3}")]
    ThresholdOutOfRange(&'static str, f64, f64, f64),
    #[error("digest_len must lie in [4, 64], got {0}")]
    DigestLength(usize),
    #[error("default mutation status must not be empty")]
    EmptyDefaultStatus,
}

/// Published policy variants. They differ only in the identity-mismatch penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Standard,
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PenaltyTable {
    pub custodian: f64,
    pub legal_dispute: f64,
    pub land_housing: f64,
    pub land_general: f64,
    pub land_blocked: f64,
    pub broken_chain: f64,
    pub identity_mismatch: f64,
}

impl PenaltyTable {
    pub fn for_profile(profile: Profile) -> Self {
        let identity_mismatch = match profile {
            Profile::Standard => -0.30,
            Profile::Strict => -0.50,
        };
        PenaltyTable {
            custodian: -0.25,
            legal_dispute: -0.30,
            land_housing: -0.10,
            land_general: -0.15,
            land_blocked: -0.40,
            broken_chain: -0.20,
            identity_mismatch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thresholds {
    pub green: f64,
    pub grey: f64,
    pub custodian_floor: f64,
    pub amber: f64,
    /// Similarity percentage (0-100) below which names count as mismatched.
    pub identity_match: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            green: 0.80,
            grey: 0.80,
            custodian_floor: 0.50,
            amber: 0.50,
            identity_match: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityConfig {
    pub village_code: String,
    pub device_id: String,
    pub digest_len: usize,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        IdentityConfig {
            village_code: DEFAULT_VILLAGE_CODE.to_string(),
            device_id: DEFAULT_DEVICE_ID.to_string(),
            digest_len: DEFAULT_DIGEST_LEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationDefaults {
    /// Status assumed when remarks carry neither a pending marker nor a
    /// mutation number. "Active" deliberately favors no penalty.
    pub default_status: String,
}

impl Default for MutationDefaults {
    fn default() -> Self {
        MutationDefaults {
            default_status: STATUS_ACTIVE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Policy {
    pub profile: Profile,
    pub penalties: PenaltyTable,
    pub thresholds: Thresholds,
    pub identity: IdentityConfig,
    pub mutation: MutationDefaults,
}

impl Default for Policy {
    fn default() -> Self {
        Policy::for_profile(Profile::Standard)
    }
}

impl Policy {
    pub fn for_profile(profile: Profile) -> Self {
        Policy {
            profile,
            penalties: PenaltyTable::for_profile(profile),
            thresholds: Thresholds::default(),
            identity: IdentityConfig::default(),
            mutation: MutationDefaults::default(),
        }
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        let p = &self.penalties;
        for (name, value) in [
            ("custodian", p.custodian),
            ("legal_dispute", p.legal_dispute),
            ("land_housing", p.land_housing),
            ("land_general", p.land_general),
            ("land_blocked", p.land_blocked),
            ("broken_chain", p.broken_chain),
            ("identity_mismatch", p.identity_mismatch),
        ] {
            if value > 0.0 || value.is_nan() {
                return Err(PolicyError::PositivePenalty(name, value));
            }
        }

        let t = &self.thresholds;
        for (name, value) in [
            ("green", t.green),
            ("grey", t.grey),
            ("custodian_floor", t.custodian_floor),
            ("amber", t.amber),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PolicyError::ThresholdOutOfRange(name, 0.0, 1.0, value));
            }
        }
        if !(0.0..=100.0).contains(&t.identity_match) {
            return Err(PolicyError::ThresholdOutOfRange(
                "identity_match",
                0.0,
                100.0,
                t.identity_match,
            ));
        }

        if !(4..=64).contains(&self.identity.digest_len) {
            return Err(PolicyError::DigestLength(self.identity.digest_len));
        }
        if self.mutation.default_status.trim().is_empty() {
            return Err(PolicyError::EmptyDefaultStatus);
        }
        Ok(())
    }
}

/// On-disk shape: a profile plus optional per-value overrides.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub penalties: PenaltyOverrides,
    #[serde(default)]
    pub thresholds: ThresholdOverrides,
    #[serde(default)]
    pub identity: IdentityOverrides,
    #[serde(default)]
    pub mutation: MutationOverrides,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PenaltyOverrides {
    pub custodian: Option<f64>,
    pub legal_dispute: Option<f64>,
    pub land_housing: Option<f64>,
    pub land_general: Option<f64>,
    pub land_blocked: Option<f64>,
    pub broken_chain: Option<f64>,
    pub identity_mismatch: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ThresholdOverrides {
    pub green: Option<f64>,
    pub grey: Option<f64>,
    pub custodian_floor: Option<f64>,
    pub amber: Option<f64>,
    pub identity_match: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IdentityOverrides {
    pub village_code: Option<String>,
    pub device_id: Option<String>,
    pub digest_len: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MutationOverrides {
    pub default_status: Option<String>,
}

fn apply<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl PolicyFile {
    pub fn resolve(self) -> Result<Policy, PolicyError> {
        let mut policy = Policy::for_profile(self.profile);

        let p = &mut policy.penalties;
        apply(&mut p.custodian, self.penalties.custodian);
        apply(&mut p.legal_dispute, self.penalties.legal_dispute);
        apply(&mut p.land_housing, self.penalties.land_housing);
        apply(&mut p.land_general, self.penalties.land_general);
        apply(&mut p.land_blocked, self.penalties.land_blocked);
        apply(&mut p.broken_chain, self.penalties.broken_chain);
        apply(&mut p.identity_mismatch, self.penalties.identity_mismatch);

        let t = &mut policy.thresholds;
        apply(&mut t.green, self.thresholds.green);
        apply(&mut t.grey, self.thresholds.grey);
        apply(&mut t.custodian_floor, self.thresholds.custodian_floor);
        apply(&mut t.amber, self.thresholds.amber);
        apply(&mut t.identity_match, self.thresholds.identity_match);

        let i = &mut policy.identity;
        apply(&mut i.village_code, self.identity.village_code);
        apply(&mut i.device_id, self.identity.device_id);
        apply(&mut i.digest_len, self.identity.digest_len);

        apply(
            &mut policy.mutation.default_status,
            self.mutation.default_status,
        );

        policy.validate()?;
        Ok(policy)
    }
}

pub fn parse_policy(raw: &str) -> anyhow::Result<Policy> {
    let file: PolicyFile = toml::from_str(raw)?;
    Ok(file.resolve()?)
}

fn default_policy_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/agrigov/policy.toml"))
}

/// Explicit path, then `~/.config/agrigov/policy.toml`, then built-in defaults.
pub fn load_policy(explicit: Option<&Path>) -> anyhow::Result<Policy> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("policy file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => match default_policy_path() {
            Some(p) if p.exists() => p,
            _ => {
                tracing::debug!("no policy file found, using built-in standard profile");
                return Ok(Policy::default());
            }
        },
    };
    let raw = std::fs::read_to_string(&path)?;
    let policy = parse_policy(&raw)
        .map_err(|e| anyhow::anyhow!("invalid policy {}: {}", path.display(), e))?;
    tracing::info!(path = %path.display(), profile = ?policy.profile, "loaded policy");
    Ok(policy)
}
