use anyhow::Result;
use bytestate_sim::{run_sweep, write_csv, SweepConfig, SweepOverrides};
use clap::Parser;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "fidelity-sweep")]
#[command(about = "Round-trip fidelity of every pipeline configuration over seeded normal features")]
struct Cli {
    /// TOML sweep config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: SweepOverrides,

    /// CSV output path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn sweep_config(&self) -> Result<SweepConfig> {
        let config = match &self.config {
            Some(path) => SweepConfig::load_from_file(path)?,
            None => SweepConfig::default(),
        };
        Ok(self.overrides.apply(config))
    }
}

fn main() -> Result<()> {
    // Structured logs on stderr; CSV may own stdout
    // try_init also forwards `log` records from bytestate_core
    tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    let cli = Cli::parse();
    let config = cli.sweep_config()?;
    info!(
        sigmas = ?config.sigmas,
        samples = config.samples,
        seed = config.seed,
        decode_clip = config.codec.decode_clip,
        tolerance = config.codec.fidelity_tolerance,
        "starting fidelity sweep"
    );

    let rows = run_sweep(&config);
    match &cli.output {
        Some(path) => {
            write_csv(&rows, File::create(path)?)?;
            info!(output_path = %path.display(), rows = rows.len(), "sweep written");
        }
        None => write_csv(&rows, io::stdout().lock())?,
    }

    let degraded = rows.iter().filter(|r| !r.fidelity_ok).count();
    info!(rows = rows.len(), degraded, "sweep complete");
    Ok(())
}
