use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;

use asf_core::report::write_report;
use asf_core::{DecodeLimits, TreeWalker};

const SEPARATOR: &str = "--------------------------------------------------";

#[derive(ClapParser, Debug)]
#[command(version, about = "Print the header objects of an ASF file")]
struct Args {
    /// ASF file to parse
    input: PathBuf,

    /// TOML file overriding the default decode limits
    #[arg(short, long)]
    limits: Option<PathBuf>,
}

fn load_limits(path: Option<&Path>) -> Result<DecodeLimits> {
    let Some(path) = path else {
        return Ok(DecodeLimits::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading limits from {}", path.display()))?;
    let limits = DecodeLimits::from_toml_str(&text)
        .with_context(|| format!("parsing limits from {}", path.display()))?;
    log::debug!("decode limits: {limits:?}");
    Ok(limits)
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("{}", error_line(&err));
        std::process::exit(1);
    }
}

/// The whole context chain on one line.
fn error_line(err: &anyhow::Error) -> String {
    format!("error: {err:#}")
}

fn run(args: &Args) -> Result<()> {
    let limits = load_limits(args.limits.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out)?;
    writeln!(out, "ASF File Parser")?;
    writeln!(out, "Version {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out)?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "PARSING ASF FILE:")?;
    writeln!(out, "    {}", args.input.display())?;
    writeln!(out)?;
    writeln!(out, "{SEPARATOR}")?;

    let file = File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let model = TreeWalker::with_limits(BufReader::new(file), limits)
        .walk()
        .with_context(|| format!("decoding {}", args.input.display()))?;
    log::info!("decoded {} header objects", model.len());

    write_report(&mut out, &model)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_prints_a_single_line() {
        let bytes = [0u8; 40];
        let err = TreeWalker::with_limits(&bytes[..], DecodeLimits::default())
            .walk()
            .context("decoding broken.asf")
            .unwrap_err();
        let line = error_line(&err);
        assert!(!line.contains('\n'), "{line}");
        assert!(line.starts_with("error: decoding broken.asf: "), "{line}");
    }

    #[test]
    fn missing_limits_file_is_an_error() {
        assert_eq!(load_limits(None).unwrap(), DecodeLimits::default());
        assert!(load_limits(Some(Path::new("/nonexistent/limits.toml"))).is_err());
    }
}
