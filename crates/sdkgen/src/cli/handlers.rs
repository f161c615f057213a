use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ArgMatches;
use sdkgen_core::{
    config::{load_config, Config},
    scan, FailurePolicy, OutputFormat, ScanReport, Target,
};

/// Resolve configuration from every layer, then scan
pub fn dispatch(matches: &ArgMatches) -> Result<ScanReport> {
    let root = matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .context("PATH is required")?;

    let config = load_config(matches.get_one::<String>("config").map(Path::new))
        .context("Failed to load configuration")?;
    let config = apply_flags(config, matches)?;
    tracing::debug!(?config, "Resolved configuration");

    let report = match matches.get_one::<String>("output") {
        Some(output) => {
            let file = File::create(output)
                .with_context(|| format!("Failed to create output file {output}"))?;
            let mut sink = BufWriter::new(file);
            scan::run(&root, &config, &mut sink)?
        }
        None => {
            let stdout = io::stdout();
            let mut sink = stdout.lock();
            let report = scan::run(&root, &config, &mut sink)?;
            sink.flush().context("Failed to flush stdout")?;
            report
        }
    };

    if !report.is_clean() && config.policy != FailurePolicy::Silent {
        eprintln!(
            "{} of {} files failed",
            report.failures.len(),
            report.scanned
        );
    }
    Ok(report)
}

/// CLI flags are the last configuration layer
fn apply_flags(config: Config, matches: &ArgMatches) -> Result<Config> {
    let target = matches
        .get_one::<String>("target")
        .map(|t| {
            t.parse::<Target>()
                .with_context(|| format!("Unknown target: {t}"))
        })
        .transpose()?
        .unwrap_or(config.target);
    let format = matches
        .get_one::<String>("format")
        .map(|f| {
            f.parse::<OutputFormat>()
                .with_context(|| format!("Unknown format: {f}"))
        })
        .transpose()?
        .unwrap_or(config.format);
    let policy = matches
        .get_one::<String>("policy")
        .map(|p| {
            p.parse::<FailurePolicy>()
                .with_context(|| format!("Unknown policy: {p}"))
        })
        .transpose()?
        .unwrap_or(config.policy);
    let extensions = matches
        .get_many::<String>("ext")
        .map_or(config.extensions, |exts| exts.cloned().collect());

    Ok(Config {
        target,
        format,
        policy,
        extensions,
    })
}
