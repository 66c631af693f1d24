//! Ten-row demonstration registry, as handed to village data volunteers for
//! correction. It carries deliberate OCR noise ("Srk", "Pnding", "Viijay").
//! Fixture data only; nothing in the engine depends on it.

use crate::domain::constants::{COL_VERIFIED, USER_COLUMNS};
use std::io::Write;

// khevat, khata, owner, cultivator, khasra, land type, remarks, verified name
const ROWS: &[[&str; 8]] = &[
    ["101", "15", "Gyan Chand pisar Dheru", "Khudkasht", "401", "Nahri", "Tabadilah 1057", "Gyan Chand pisar Dheru"],
    ["102", "16", "Late Ghulam Rasool", "Heir A", "405", "Agri", "VarasatPending", "Ghulam Rasool"],
    ["105", "20", "State Govt PWD", "Maqboza Dept", "500", "Gair Mumkin Srk", "Road Infra", "State Govt PWD"],
    ["110", "25", "Custodian Evacuee Property", "Refugee Alloc", "601", "Agri", "Custodian Land", "Custodian Evacuee Property"],
    ["112", "28", "Viijay Kmar pisar Sunar", "Maqboza Khud", "605", "Agri", "Baya nama 334", "Vijay Kumar pisar Sunar"],
    ["115", "30", "State Irrigation Dept", "Sarkar", "700", "Gair Mumkin Nallah", "Canal", "State Irrigation Dept"],
    ["120", "35", "Late Akbar Ali", "Sons of Akbar", "801", "Agri", "Varasat Pnding", "Akbar Ali"],
    ["125", "40", "Sardar Karnail Singh", "Khudkasht", "905", "Agri", "Clean", "Karnail Singh"],
    ["130", "45", "Pawan Kumar", "Khudkasht", "1001", "Agri", "Mutation 505", "Pawan Kumar"],
    ["135", "50", "Harbans Lal", "Khudkasht", "1100", "Gair Mumkin Makan", "Abadi Deh", "Harbans Lal"],
];

pub fn sample_headers() -> Vec<String> {
    USER_COLUMNS
        .iter()
        .chain(std::iter::once(&COL_VERIFIED))
        .map(|c| c.to_string())
        .collect()
}

/// Rows aligned with `sample_headers()`; area columns are left blank.
pub fn sample_rows() -> Vec<Vec<String>> {
    ROWS.iter()
        .map(|[khevat, khata, owner, cultivator, khasra, land, remarks, verified]| {
            [
                *khevat, *khata, *owner, *cultivator, *khasra, *land, "", "", *remarks, *verified,
            ]
            .iter()
            .map(|v| v.to_string())
            .collect()
        })
        .collect()
}

pub fn write_sample<W: Write>(writer: W) -> anyhow::Result<usize> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(sample_headers())?;
    let rows = sample_rows();
    for row in &rows {
        w.write_record(row)?;
    }
    w.flush()?;
    Ok(rows.len())
}
