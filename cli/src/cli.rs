use std::path::PathBuf;

/// Election choropleth CLI
#[derive(clap::Parser, Debug)]
#[command(name = "electomap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// JSON config overriding join fields and styles
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Boundary property holding the region code (overrides the config)
    #[arg(long, global = true)]
    pub reference_field: Option<String>,

    /// Results column holding the region identifier (overrides the config)
    #[arg(long, global = true)]
    pub id_field: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Join results to boundaries and write the styled map (.svg or .geojson)
    Render(RenderArgs),

    /// Join results to boundaries and print the match diagnostics
    Report(ReportArgs),
}

/// Boundary and results inputs shared by every command.
#[derive(clap::Args, Debug)]
pub struct Inputs {
    /// Boundary file: .geojson, .shp or zipped shapefile
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub boundaries: PathBuf,

    /// Results table: .csv or .json
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub results: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub inputs: Inputs,

    /// Output file, defaults to "./map.svg"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Party filter: "all" or a party code
    #[arg(short, long, default_value = "all")]
    pub filter: String,

    /// Highlight the region with this identifier, as if hovered
    #[arg(long)]
    pub highlight: Option<String>,

    /// SVG width in pixels
    #[arg(long, default_value_t = 1200.0)]
    pub width: f64,
}

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub inputs: Inputs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
