//! Forward-direction CLI: Gemara Layer 3 policy YAML in, Ampel PolicySet
//! JSON out.
//!
//! This binary is intentionally thin: argument parsing, file I/O, and
//! exit codes. All conversion logic lives in `gembridge-app`.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use gembridge_app::{
    ConvertResult, FORWARD_FOLLOW_UP, ForwardOutput, default_forward_output, read_input_file,
    render_forward_summary, run_forward,
};

#[derive(Parser, Debug)]
#[command(
    name = "gemara-to-ampel",
    version,
    about = "Convert a Gemara Layer 3 policy document to an Ampel PolicySet skeleton"
)]
struct Cli {
    /// Gemara Layer 3 policy YAML file.
    input: Utf8PathBuf,

    /// Where to write the Ampel PolicySet JSON (default: <input stem>.ampel.json).
    output: Option<Utf8PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_forward_output(&cli.input));

    println!("Converting Gemara Layer 3 policy to Ampel format...");
    println!("  Input:  {}", cli.input);
    println!("  Output: {output}");
    println!();

    match convert(&cli.input, &output) {
        Ok(out) => {
            print!("{}", render_forward_summary(&output, &out));
            println!();
            print!("{FORWARD_FOLLOW_UP}");
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn convert(input: &Utf8Path, output: &Utf8Path) -> ConvertResult<ForwardOutput> {
    let text = read_input_file(input)?;
    let out = run_forward(&text)?;
    std::fs::write(output, &out.json).with_context(|| format!("write policy set: {output}"))?;
    Ok(out)
}
