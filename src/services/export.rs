use crate::domain::constants::RESULT_COLUMNS;
use crate::domain::models::AuditResult;
use std::io::Write;
use std::path::Path;

/// Input columns (minus stale result columns from an earlier run) followed by
/// the five result columns.
pub fn registry_headers(input_headers: &[String]) -> Vec<String> {
    input_headers
        .iter()
        .filter(|h| !RESULT_COLUMNS.contains(&h.as_str()))
        .cloned()
        .chain(RESULT_COLUMNS.iter().map(|c| c.to_string()))
        .collect()
}

pub fn write_registry<W: Write>(
    writer: W,
    input_headers: &[String],
    results: &[AuditResult],
) -> anyhow::Result<()> {
    let headers = registry_headers(input_headers);
    // positions of the input columns that survive into the registry
    let kept: Vec<usize> = input_headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !RESULT_COLUMNS.contains(&h.as_str()))
        .map(|(i, _)| i)
        .collect();
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(&headers)?;
    for r in results {
        let mut row: Vec<String> = kept
            .iter()
            .map(|&i| {
                r.record
                    .columns
                    .get(i)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default()
            })
            .collect();
        row.push(r.record_id.clone());
        row.push(format!("{:.2}", r.trust_score));
        row.push(r.channel.to_string());
        row.push(r.action.to_string());
        row.push(r.trace_text());
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_registry_file(
    path: &Path,
    input_headers: &[String],
    results: &[AuditResult],
) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    write_registry(file, input_headers, results)?;
    tracing::info!(path = %path.display(), rows = results.len(), "registry written");
    Ok(())
}
