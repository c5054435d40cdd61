use std::path::PathBuf;

use anyhow::{bail, Result};
use electomap::{io, CanonicalId, Filter};

pub async fn run(cli: &crate::cli::Cli, args: &crate::cli::RenderArgs) -> Result<()> {
    let out_path = args.output.clone().unwrap_or_else(|| PathBuf::from("./map.svg"));

    println!("[render] loading {} and {}", args.inputs.boundaries.display(), args.inputs.results.display());
    let (config, mut loaded) = super::load(cli, &args.inputs).await?;
    let report = loaded.map.report().clone();
    println!("[render] matched {} of {} regions", report.matched, report.features);

    let features = std::mem::take(&mut loaded.features);
    let mut session = loaded.into_session(&config);

    let filter = Filter::parse(&args.filter);
    println!("[render] applying filter {filter}");
    session.set_filter(filter);

    if let Some(highlight) = &args.highlight {
        let wanted = CanonicalId::normalize(Some(highlight.as_str()));
        let Some(region) = session.map().regions().iter()
            .find(|region| region.matched && region.canonical_id == wanted)
        else {
            bail!("[render] no matched region with identifier {highlight:?}");
        };
        let id = region.id;
        if session.hover_enter(id).is_empty() {
            println!("[render] region {highlight:?} is hidden by the filter; not highlighted");
        }
    }

    println!("[render] writing {}", out_path.display());
    let extension = out_path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("geojson") | Some("json") => io::write_geojson(&out_path, &session, &features)?,
        _ => io::write_svg(&out_path, &session, &features, &io::SvgOptions { width: args.width, ..Default::default() })?,
    }

    Ok(())
}
