use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use repcode::config::{RunConfig, DEFAULT_SHOTS};
use repcode::drawing::draw;
use repcode::repetition::{sweep, VariantResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// An `i,j` pair selecting the error gates on code qubits 0 and 1
#[derive(Debug, Clone, Copy)]
struct VariantArg(usize, usize);

impl FromStr for VariantArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (i, j) = s
            .split_once(',')
            .ok_or_else(|| format!("expected i,j but got '{}'", s))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid index '{}': {}", v, e))
        };
        Ok(VariantArg(parse(i)?, parse(j)?))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Run the repetition-code syndrome circuits and print their counts", long_about = None)]
struct Cli {
    /// Executions per circuit
    #[arg(long, default_value_t = DEFAULT_SHOTS)]
    shots: usize,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Run only this variant, as `i,j` (0 = I, 1 = X, 2 = Z); repeatable
    #[arg(long = "variant", value_name = "I,J")]
    variants: Vec<VariantArg>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Skip the circuit diagrams in text output
    #[arg(long)]
    no_diagram: bool,

    /// Append the syndrome interpretation to each variant in text output
    #[arg(long)]
    summary: bool,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            shots: self.shots,
            seed: self.seed,
            variants: if self.variants.is_empty() {
                None
            } else {
                Some(self.variants.iter().map(|v| (v.0, v.1)).collect())
            },
        }
    }
}

fn print_text(results: &[VariantResult], diagram: bool, summary: bool) {
    for result in results {
        println!("\n\t\t\t{}\n", result.title());
        if diagram {
            println!("{}", draw(&result.circuit));
        }
        println!("{}", result.counts);
        if summary {
            print!("{}", result.report);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.run_config();
    config.validate().context("invalid run configuration")?;
    info!(?config, "starting sweep");

    let results = sweep(&config).context("simulation failed")?;

    match cli.format {
        OutputFormat::Text => print_text(&results, !cli.no_diagram, cli.summary),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&results).context("failed to encode results")?;
            println!("{}", json);
        }
    }

    Ok(())
}
