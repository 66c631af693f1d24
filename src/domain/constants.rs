//! Stable phrase tables and sentinels used by the detectors.
//!
//! All phrases are lower-case; callers lower-case the text they scan.

/// Remarks keywords denoting state-vested (custodian/evacuee) property.
pub const CUSTODIAN_KEYWORDS: &[&str] = &["custodian", "evacuee", "muhajireen", "state land", "auqaf"];

/// Remarks keywords denoting an active legal dispute.
pub const LEGAL_DISPUTE_KEYWORDS: &[&str] = &["stay", "court"];

/// "Gair Mumkin" (uncultivable) markers, including the common misspelling.
pub const UNCULTIVABLE_MARKERS: &[&str] = &["gair mumkin", "gair mumakin"];

/// Dwelling / habitation sub-phrases of uncultivable land.
pub const HOUSING_PHRASES: &[&str] = &["makan", "abadi"];

/// Road, waterway, river and forest sub-phrases of uncultivable land.
pub const INFRASTRUCTURE_PHRASES: &[&str] = &["sarak", "nallah", "darya", "jangal"];

/// Honorifics removed before identity comparison. Removal is a literal
/// substring replace, so "shriram" loses its "shri".
pub const HONORIFICS: &[&str] = &["sardar", "shri", "mr."];

pub const INHERITANCE_MARKER: &str = "varasat";
pub const PENDING_MARKER: &str = "pending";

/// Normalized mutation statuses that mean "not yet mutated".
pub const PENDING_STATUSES: &[&str] = &["pending", "no"];

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_ACTIVE: &str = "Active";

pub const UNKNOWN_OWNER: &str = "Unknown";
pub const UNKNOWN_KHASRA: &str = "000";
pub const DEFAULT_LAND_TYPE: &str = "Agricultural";
pub const CLEAN_RECORD: &str = "Clean Record";

pub const ID_PREFIX: &str = "JK-";
pub const DEFAULT_VILLAGE_CODE: &str = "VIL001";
pub const DEFAULT_DEVICE_ID: &str = "TAB-09";
pub const DEFAULT_DIGEST_LEN: usize = 10;

/// Legacy Jamabandi headers, in registry order.
pub const COL_KHEVAT: &str = "Khevat_No";
pub const COL_KHATA: &str = "Khata_No";
pub const COL_OWNER: &str = "Owner_Name";
pub const COL_CULTIVATOR: &str = "Cultivator_Name";
pub const COL_KHASRA: &str = "Khasra_No";
pub const COL_LAND_TYPE: &str = "Land_Type";
pub const COL_AREA_KANAL: &str = "Area_Kanal";
pub const COL_AREA_MARLA: &str = "Area_Marla";
pub const COL_REMARKS: &str = "Remarks_Kaifiyat";
pub const COL_VERIFIED: &str = "VDV_Verified_Name";

pub const USER_COLUMNS: &[&str] = &[
    COL_KHEVAT,
    COL_KHATA,
    COL_OWNER,
    COL_CULTIVATOR,
    COL_KHASRA,
    COL_LAND_TYPE,
    COL_AREA_KANAL,
    COL_AREA_MARLA,
    COL_REMARKS,
];

/// Columns the governance protocol refuses to run without.
pub const REQUIRED_COLUMNS: &[&str] = &[COL_OWNER, COL_KHASRA, COL_REMARKS];

/// Result columns appended to every exported registry row.
pub const RESULT_COLUMNS: &[&str] = &[
    "AgriStack_FID",
    "Trust_Score",
    "Governance_Channel",
    "Action_Taken",
    "Audit_Trace",
];
