use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use heft_core::config::Config;
use heft_core::footprint::FootprintPipeline;
use heft_core::provision::Provisioner;
use heft_pip::PipProvisioner;
use heft_report::{json, text};

#[derive(Parser)]
#[command(name = "heft")]
#[command(about = "Measure the source and native-binary footprint of a package's dependency tree")]
#[command(version)]
struct Cli {
    /// Package to provision and measure
    package: String,
    /// Config file path (defaults to .heft.toml discovered from the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
    /// Base interpreter used to create the virtualenv (overrides config)
    #[arg(long)]
    python: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    // The guard owns the disposable environment; it drops on every path out
    // of this function, including errors, so nothing survives the run.
    let scratch = tempfile::tempdir().context("failed to create scratch directory")?;

    let python = cli
        .python
        .clone()
        .unwrap_or_else(|| config.provision.python.clone());
    let provisioner = PipProvisioner::new(python);

    let env = provisioner
        .provision(&cli.package, scratch.path())
        .with_context(|| format!("failed to provision '{}'", cli.package))?;

    let pipeline = FootprintPipeline::new(&config);
    let report = pipeline.run(&provisioner, &env)?;

    match cli.format {
        OutputFormat::Text => print!("{}", text::format_report(&report, &config.report)),
        OutputFormat::Json => println!("{}", json::format_report(&report, &cli.package, false)),
    }
    Ok(())
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(p) => Config::load(p),
        None => Ok(Config::load_or_default(Path::new("."))),
    }
}
