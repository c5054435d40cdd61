use anyhow::Result;

pub async fn run(cli: &crate::cli::Cli, args: &crate::cli::ReportArgs) -> Result<()> {
    let (_, loaded) = super::load(cli, &args.inputs).await?;
    let report = loaded.map.report();

    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("[report] features:  {}", report.features);
    println!("[report] records:   {}", report.records);
    println!("[report] matched:   {}", report.matched);
    println!("[report] unmatched: {}", report.unmatched.len());
    for &id in &report.unmatched {
        match loaded.map.get(id).and_then(|region| region.canonical_id.as_ref()) {
            Some(reference) => println!("    {id} {:?}", reference.as_str()),
            None => println!("    {id} (no reference)"),
        }
    }
    if report.records_missing_id > 0 {
        println!("[report] records without identifier: {}", report.records_missing_id);
    }
    if !report.duplicate_ids.is_empty() {
        let ids = report.duplicate_ids.iter().map(|id| id.as_str()).collect::<Vec<_>>();
        println!("[report] duplicate identifiers (first kept): {}", ids.join(", "));
    }

    Ok(())
}
