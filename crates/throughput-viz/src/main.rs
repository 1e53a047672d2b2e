// File: crates/throughput-viz/src/main.rs
// Summary: CLI entry point; with no arguments renders throughput.csv into throughput-chart.png.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use throughput_viz::config::{self, RenderConfig};
use throughput_viz::{render_with, Error};

#[derive(Debug, Parser)]
#[command(name = "throughput-viz", version, about = "Render a throughput-over-time chart from a load-test CSV")]
struct Args {
    /// CSV with `time_seconds` and `messages_per_10_seconds` columns.
    #[arg(default_value = config::DEFAULT_INPUT)]
    input: PathBuf,

    /// Destination PNG; overwritten if it exists.
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,

    #[arg(long, default_value = config::DEFAULT_TITLE)]
    title: String,

    #[arg(long, default_value = config::DEFAULT_THEME, value_parser = ["light", "dark"])]
    theme: String,

    /// Output resolution; the figure is always 12x6 inches.
    #[arg(long, default_value_t = config::DEFAULT_DPI, value_parser = parse_dpi)]
    dpi: f32,

    /// Log more to stderr (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn into_config(self) -> RenderConfig {
        RenderConfig {
            input: self.input,
            output: self.output,
            title: self.title,
            theme: self.theme,
            dpi: self.dpi,
            ..RenderConfig::default()
        }
    }
}

fn parse_dpi(s: &str) -> Result<f32, String> {
    let dpi: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if dpi.is_finite() && (10.0..=1200.0).contains(&dpi) {
        Ok(dpi)
    } else {
        Err("dpi must be between 10 and 1200".to_string())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_tracing(args.verbose);

    let config = args.into_config();
    match render_with(&config) {
        Ok(summary) => {
            println!("✓ Chart saved as {}", summary.output.display());
            println!("✅ Visualization complete!");
            ExitCode::SUCCESS
        }
        Err(Error::MissingInput { path }) => {
            println!("❌ Error: {} not found!", path.display());
            println!("   Run the load test client first to generate CSV files.");
            ExitCode::FAILURE
        }
        Err(err) => {
            println!("❌ Error creating chart: {err}");
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
