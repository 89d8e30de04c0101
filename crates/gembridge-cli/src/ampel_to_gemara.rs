//! Reverse-direction CLI: Ampel execution results JSON in, Gemara Layer 4
//! evaluation YAML out (file or stdout).

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use gembridge_app::{ConvertError, ConvertResult, read_input_file, run_reverse};

#[derive(Parser, Debug)]
#[command(
    name = "ampel-to-gemara",
    version,
    about = "Convert Ampel execution results to a Gemara Layer 4 evaluation report"
)]
struct Cli {
    /// Ampel result JSON file (bare result, result set, or attestation envelope).
    input: Utf8PathBuf,

    /// Where to write the Layer 4 YAML (default: stdout).
    output: Option<Utf8PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    match convert(&cli) {
        Ok(()) => {}
        Err(ConvertError::EmptyResult) => {
            eprintln!("warning: no evaluations found in input");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn convert(cli: &Cli) -> ConvertResult<()> {
    let text = read_input_file(&cli.input)?;
    let out = run_reverse(&text)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &out.yaml)
                .with_context(|| format!("write evaluation report: {path}"))?;
            println!("Gemara Layer 4 evaluation written to: {path}");
        }
        None => print!("{}", out.yaml),
    }
    Ok(())
}
