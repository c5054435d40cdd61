pub mod render;
pub mod report;

use anyhow::{anyhow, Result};
use electomap::{Config, Loaded, Loader};

use crate::cli::{Cli, Inputs};

/// Read the config (if any), load both inputs and join them.
pub(crate) async fn load(cli: &Cli, inputs: &Inputs) -> Result<(Config, Loaded)> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    if let Some(field) = &cli.reference_field { config.join.reference_field = field.clone() }
    if let Some(field) = &cli.id_field { config.join.id_field = field.clone() }

    let loader = Loader::new(config.clone());
    let loaded = loader.load_files(&inputs.boundaries, &inputs.results).await?
        .ready()
        .ok_or_else(|| anyhow!("load was superseded"))?;

    Ok((config, loaded))
}
