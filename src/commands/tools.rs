use crate::*;

pub fn handle_tool_commands(cli: &Cli, policy: &Policy) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Fid {
            name,
            khasra,
            village_code,
            device_id,
        } => {
            let village_code = village_code
                .clone()
                .unwrap_or_else(|| policy.identity.village_code.clone());
            let device_id = device_id
                .clone()
                .unwrap_or_else(|| policy.identity.device_id.clone());
            let record_id = generate_id(
                name,
                khasra,
                &village_code,
                &device_id,
                policy.identity.digest_len,
            );
            let report = FidReport {
                name: name.clone(),
                khasra: khasra.clone(),
                village_code,
                device_id,
                record_id,
            };
            print_one(cli.json, report, |r| r.record_id.clone())?;
        }
        Commands::Match { left, right } => {
            let score = similarity(Some(left.as_str()), Some(right.as_str()));
            let threshold = policy.thresholds.identity_match;
            let report = MatchReport {
                left: left.clone(),
                right: right.clone(),
                score,
                threshold,
                mismatch: score < threshold,
            };
            print_one(cli.json, report, |r| {
                let verdict = if r.mismatch { "mismatch" } else { "match" };
                format!("{:.1}\t{}", r.score, verdict)
            })?;
        }
        Commands::Classify {
            land_type,
            remarks,
            mutation_status,
        } => {
            let penalties = &policy.penalties;
            let land = classify_land(land_type, penalties);
            let status = mutation_status
                .clone()
                .unwrap_or_else(|| derive_mutation_status(remarks, &policy.mutation.default_status));
            let (mutation_category, mutation_penalty) =
                classify_mutation(&status, remarks, penalties);
            let report = ClassifyReport {
                land_type: land_type.clone(),
                land_category: land.category,
                land_penalty: land.penalty,
                hard_block: land.hard_block,
                mutation_status: status,
                mutation_category,
                mutation_penalty,
                custodian: detect_custodian(remarks, penalties).0,
                legal_dispute: detect_legal_dispute(remarks, penalties).0,
            };
            print_one(cli.json, report, |r| {
                format!(
                    "land\t{}\t{:.2}\thard_block={}\nmutation\t{}\t{:.2}\tstatus={}\ncustodian={} legal_dispute={}",
                    r.land_category.as_str(),
                    r.land_penalty,
                    r.hard_block,
                    r.mutation_category.as_str(),
                    r.mutation_penalty,
                    r.mutation_status,
                    r.custodian,
                    r.legal_dispute
                )
            })?;
        }
        Commands::Policy { command } => match command {
            PolicyCommands::Show => {
                if cli.json {
                    print_json(policy)?;
                } else {
                    print!("{}", toml::to_string_pretty(policy)?);
                }
            }
        },
        _ => return Ok(false),
    }

    Ok(true)
}
