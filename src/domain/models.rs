use crate::domain::constants::{CLEAN_RECORD, DEFAULT_LAND_TYPE};
use serde::{Serialize, Serializer};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Record fields the engine reads. Everything else is carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Owner,
    Cultivator,
    Khasra,
    Khevat,
    Khata,
    LandType,
    AreaKanal,
    AreaMarla,
    Remarks,
    Mutation,
    Verified,
}

impl Field {
    /// Maps a tabular header onto a known field, ignoring case, spaces and underscores.
    pub fn from_header(header: &str) -> Option<Field> {
        let key: String = header
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "ownername" | "owner" => Some(Field::Owner),
            "cultivatorname" | "cultivator" => Some(Field::Cultivator),
            "khasrano" | "khasra" => Some(Field::Khasra),
            "khevatno" | "khevat" => Some(Field::Khevat),
            "khatano" | "khata" => Some(Field::Khata),
            "landtype" => Some(Field::LandType),
            "areakanal" => Some(Field::AreaKanal),
            "areamarla" => Some(Field::AreaMarla),
            "remarkskaifiyat" | "remarks" | "kaifiyat" => Some(Field::Remarks),
            "revenuemutation" | "mutationstatus" => Some(Field::Mutation),
            "vdvverifiedname" | "verifiedname" => Some(Field::Verified),
            _ => None,
        }
    }
}

/// One Jamabandi row. Absent, blank and `NaN` cells are all `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LandRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cultivator_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub khasra_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub khevat_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub khata_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_kanal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_marla: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutation_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_name: Option<String>,
    /// Every input column in input order, known or not.
    #[serde(serialize_with = "columns_as_map")]
    pub columns: Vec<(String, String)>,
}

fn columns_as_map<S: Serializer>(columns: &[(String, String)], s: S) -> Result<S::Ok, S::Error> {
    s.collect_map(columns.iter().map(|(k, v)| (k, v)))
}

fn present(raw: &str) -> Option<String> {
    let v = raw.trim();
    if v.is_empty() || v.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(v.to_string())
    }
}

impl LandRecord {
    pub fn from_columns(columns: Vec<(String, String)>) -> Self {
        let mut record = LandRecord::default();
        for (header, value) in &columns {
            let Some(field) = Field::from_header(header) else {
                continue;
            };
            let slot = match field {
                Field::Owner => &mut record.owner_name,
                Field::Cultivator => &mut record.cultivator_name,
                Field::Khasra => &mut record.khasra_no,
                Field::Khevat => &mut record.khevat_no,
                Field::Khata => &mut record.khata_no,
                Field::LandType => &mut record.land_type,
                Field::AreaKanal => &mut record.area_kanal,
                Field::AreaMarla => &mut record.area_marla,
                Field::Remarks => &mut record.remarks,
                Field::Mutation => &mut record.mutation_status,
                Field::Verified => &mut record.verified_name,
            };
            // first non-empty column wins when a sheet carries duplicates
            if slot.is_none() {
                *slot = present(value);
            }
        }
        record.columns = columns;
        record
    }

    pub fn remarks_text(&self) -> &str {
        self.remarks.as_deref().unwrap_or("")
    }

    pub fn land_type_text(&self) -> &str {
        self.land_type.as_deref().unwrap_or(DEFAULT_LAND_TYPE)
    }

    /// Field-verified name, falling back to the recorded owner.
    pub fn resolved_verified_name(&self) -> Option<&str> {
        self.verified_name.as_deref().or(self.owner_name.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Green,
    Grey,
    Amber,
    Red,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Green => "GREEN",
            Channel::Grey => "GREY",
            Channel::Amber => "AMBER",
            Channel::Red => "RED",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LandCategory {
    Agri,
    Housing,
    General,
    Blocked,
}

impl LandCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LandCategory::Agri => "AGRI",
            LandCategory::Housing => "HOUSING",
            LandCategory::General => "GENERAL",
            LandCategory::Blocked => "BLOCKED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutationCategory {
    Active,
    BrokenChain,
    GreyCandidate,
}

impl MutationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationCategory::Active => "ACTIVE",
            MutationCategory::BrokenChain => "BROKEN_CHAIN",
            MutationCategory::GreyCandidate => "GREY_CANDIDATE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditResult {
    pub record_id: String,
    pub trust_score: f64,
    pub channel: Channel,
    pub action: &'static str,
    pub audit_trace: Vec<String>,
    pub land_category: LandCategory,
    pub mutation_category: MutationCategory,
    pub identity_score: f64,
    pub custodian: bool,
    /// A sentinel stood in for a missing owner name or plot number.
    pub degraded: bool,
    pub record: LandRecord,
}

impl AuditResult {
    pub fn trace_text(&self) -> String {
        if self.audit_trace.is_empty() {
            CLEAN_RECORD.to_string()
        } else {
            self.audit_trace.join(", ")
        }
    }
}

#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    pub total: usize,
    pub green: usize,
    pub grey: usize,
    pub amber: usize,
    pub red: usize,
    pub degraded: usize,
}

#[derive(Serialize, Debug, Clone)]
pub struct SkippedRow {
    pub line: u64,
    pub error: String,
}

#[derive(Serialize)]
pub struct AuditReport {
    pub summary: ChannelSummary,
    pub skipped_rows: Vec<SkippedRow>,
    pub results: Vec<AuditResult>,
}

#[derive(Serialize)]
pub struct SchemaReport {
    pub status: String,
    pub records: usize,
    pub columns: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Serialize)]
pub struct FidReport {
    pub name: String,
    pub khasra: String,
    pub village_code: String,
    pub device_id: String,
    pub record_id: String,
}

#[derive(Serialize)]
pub struct MatchReport {
    pub left: String,
    pub right: String,
    pub score: f64,
    pub threshold: f64,
    pub mismatch: bool,
}

#[derive(Serialize)]
pub struct ClassifyReport {
    pub land_type: String,
    pub land_category: LandCategory,
    pub land_penalty: f64,
    pub hard_block: bool,
    pub mutation_status: String,
    pub mutation_category: MutationCategory,
    pub mutation_penalty: f64,
    pub custodian: bool,
    pub legal_dispute: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn legacy_and_snake_headers_map_to_same_fields() {
        assert_eq!(Field::from_header("Remarks_Kaifiyat"), Some(Field::Remarks));
        assert_eq!(Field::from_header("remarks"), Some(Field::Remarks));
        assert_eq!(Field::from_header(" VDV Verified Name "), Some(Field::Verified));
        assert_eq!(Field::from_header("mutation_status"), Some(Field::Mutation));
        assert_eq!(Field::from_header("Village"), None);
    }

    #[test]
    fn blank_and_nan_cells_are_absent() {
        let r = LandRecord::from_columns(cols(&[
            ("Owner_Name", "  "),
            ("Khasra_No", "NaN"),
            ("Land_Type", ""),
        ]));
        assert_eq!(r.owner_name, None);
        assert_eq!(r.khasra_no, None);
        assert_eq!(r.land_type_text(), "Agricultural");
        assert_eq!(r.remarks_text(), "");
    }

    #[test]
    fn verified_name_defaults_to_owner() {
        let r = LandRecord::from_columns(cols(&[("Owner_Name", "Pawan Kumar")]));
        assert_eq!(r.resolved_verified_name(), Some("Pawan Kumar"));
    }

    #[test]
    fn unknown_columns_pass_through_in_order() {
        let r = LandRecord::from_columns(cols(&[
            ("Village", "Doda"),
            ("Owner_Name", "Harbans Lal"),
            ("Patwari", "A"),
        ]));
        let headers: Vec<&str> = r.columns.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(headers, vec!["Village", "Owner_Name", "Patwari"]);
    }

    #[test]
    fn empty_trace_renders_clean_record() {
        let result = AuditResult {
            record_id: "JK-0000000000".to_string(),
            trust_score: 1.0,
            channel: Channel::Green,
            action: "Auto-Approve KCC",
            audit_trace: vec![],
            land_category: LandCategory::Agri,
            mutation_category: MutationCategory::Active,
            identity_score: 100.0,
            custodian: false,
            degraded: false,
            record: LandRecord::default(),
        };
        assert_eq!(result.trace_text(), "Clean Record");
        assert_eq!(
            serde_json::to_value(result.channel).unwrap(),
            serde_json::json!("GREEN")
        );
        assert_eq!(
            serde_json::to_value(MutationCategory::GreyCandidate).unwrap(),
            serde_json::json!("GREY_CANDIDATE")
        );
    }
}
