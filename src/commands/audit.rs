use crate::*;

/// `audit` and `validate` both refuse input lacking a required column.
fn require_columns(headers: &[String]) -> anyhow::Result<()> {
    let missing = missing_required_columns(headers);
    if !missing.is_empty() {
        anyhow::bail!("schema mismatch, missing columns: {}", missing.join(", "));
    }
    Ok(())
}

pub fn handle_audit_commands(cli: &Cli, policy: &Policy) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Audit { input, out } => {
            let ingested = load_records(input)?;
            require_columns(&ingested.headers)?;

            let results = evaluate_batch(&ingested.records, policy);
            if let Some(path) = out {
                write_registry_file(path, &ingested.headers, &results)?;
            }
            let summary = summarize(&results);
            tracing::info!(
                total = summary.total,
                green = summary.green,
                grey = summary.grey,
                amber = summary.amber,
                red = summary.red,
                skipped = ingested.skipped.len(),
                "governance protocol complete"
            );

            if cli.json {
                print_json(AuditReport {
                    summary,
                    skipped_rows: ingested.skipped,
                    results,
                })?;
            } else {
                for r in &results {
                    println!(
                        "{}\t{}\t{:.2}\t{}\t{}",
                        r.record_id,
                        r.channel,
                        r.trust_score,
                        r.action,
                        r.trace_text()
                    );
                }
                println!(
                    "green={} grey={} amber={} red={} degraded={} skipped={}",
                    summary.green,
                    summary.grey,
                    summary.amber,
                    summary.red,
                    summary.degraded,
                    ingested.skipped.len()
                );
            }
        }
        Commands::Validate { input } => {
            let ingested = load_records(input)?;
            require_columns(&ingested.headers)?;
            let report = SchemaReport {
                status: "ok".to_string(),
                records: ingested.records.len(),
                columns: ingested.headers,
                missing: Vec::new(),
            };
            print_one(cli.json, report, |r| {
                format!("schema ok: {} records, {} columns", r.records, r.columns.len())
            })?;
        }
        Commands::Sample { out } => match out {
            Some(path) => {
                let rows = write_sample(std::fs::File::create(path)?)?;
                print_one(
                    cli.json,
                    serde_json::json!({"path": path.display().to_string(), "rows": rows}),
                    |_| format!("wrote {} sample rows to {}", rows, path.display()),
                )?;
            }
            None if cli.json => {
                print_json(serde_json::json!({
                    "headers": sample_headers(),
                    "rows": sample_rows(),
                }))?;
            }
            None => {
                write_sample(std::io::stdout().lock())?;
            }
        },
        _ => return Ok(false),
    }

    Ok(true)
}
