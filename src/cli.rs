// cli.rs - Command-line interface configuration
use crate::animator::DEFAULT_MAX_DELTA;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "shoe3d", version)]
#[command(about = "Console-based 3D shoe configurator", long_about = None)]
pub struct Cli {
    /// RON file with the variants to cycle through
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Longest frame delta applied in one animation step, in seconds
    #[arg(long, default_value_t = DEFAULT_MAX_DELTA, value_parser = parse_max_delta)]
    pub max_delta: f64,

    /// Start in wireframe mode
    #[arg(long)]
    pub wireframe: bool,

    /// Start with the debug overlay enabled
    #[arg(long)]
    pub debug: bool,

    /// Write logs to this file (defaults to shoe3d.log when RUST_LOG is set)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print the active catalog as RON and exit
    #[arg(long)]
    pub dump_catalog: bool,
}

fn parse_max_delta(value: &str) -> Result<f64, String> {
    let delta: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if delta.is_finite() && delta > 0.0 {
        Ok(delta)
    } else {
        Err("max delta must be a positive number of seconds".to_string())
    }
}
