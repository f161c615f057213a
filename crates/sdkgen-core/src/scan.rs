//! Tree scanning
//!
//! Walks a directory of command headers, extracts each one and writes the
//! rendered output to a caller-supplied sink. A failing file is handled per
//! [`FailurePolicy`]; a single-file scan is always fail-fast.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
    config::{Config, FailurePolicy},
    extract::Extractor,
    output_format::OutputFormat,
    target::generate,
    Error, Result,
};

/// A file that could not be turned into output
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: Error,
}

/// Outcome of a scan
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Files visited
    pub scanned: usize,
    /// Files that produced output
    pub generated: usize,
    pub failures: Vec<FileFailure>,
}

impl ScanReport {
    /// True when no file failed
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Every regular file under `root` accepted by the extension filter, in path order
///
/// A file `root` yields just itself.
pub fn collect_files(root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(Error::Io {
            context: format!("Cannot scan {}", root.display()),
            message: "path does not exist".to_string(),
        });
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    Ok(WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| config.accepts(path))
        .collect())
}

/// Extract one file and render it in the configured format
pub fn render_file(extractor: &Extractor, path: &Path, config: &Config) -> Result<String> {
    let command = extractor.extract_file(path)?;
    match config.format {
        OutputFormat::Template => generate(&command, config.target),
        OutputFormat::Json => OutputFormat::json_line(&command),
    }
}

fn write_output(sink: &mut dyn Write, text: &str, format: OutputFormat) -> Result<()> {
    let written = if format.is_json() {
        writeln!(sink, "{text}")
    } else {
        writeln!(sink).and_then(|()| writeln!(sink, "{text}"))
    };
    written.map_err(|e| Error::io("Failed to write output", &e))
}

/// Scan `root` and write one rendered entry per command to `sink`
pub fn run(root: &Path, config: &Config, sink: &mut dyn Write) -> Result<ScanReport> {
    let extractor = Extractor::new()?;
    let policy = if root.is_file() {
        FailurePolicy::FailFast
    } else {
        config.policy
    };

    let files = collect_files(root, config)?;
    tracing::debug!(root = %root.display(), files = files.len(), %policy, "Scanning");

    let mut report = ScanReport::default();
    for path in files {
        report.scanned += 1;
        match render_file(&extractor, &path, config) {
            Ok(text) => {
                write_output(sink, &text, config.format)?;
                report.generated += 1;
            }
            Err(error) => match policy {
                FailurePolicy::FailFast => return Err(error),
                FailurePolicy::Warn => {
                    tracing::warn!(path = %path.display(), %error, "Skipping file");
                    report.failures.push(FileFailure { path, error });
                }
                FailurePolicy::Silent => report.failures.push(FileFailure { path, error }),
            },
        }
    }

    sink.flush()
        .map_err(|e| Error::io("Failed to flush output", &e))?;

    tracing::info!(
        scanned = report.scanned,
        generated = report.generated,
        failed = report.failures.len(),
        "Scan complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Target;

    const LISTTXS: &str = include_str!("../tests/fixtures/commands/wallet/listtxs.hpp");
    const SENDMORE: &str = include_str!("../tests/fixtures/commands/sendmore.hpp");
    const NOTIFIER: &str = include_str!("../tests/fixtures/broken/notifier.hpp");

    fn tree(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("mkdir");
            }
            std::fs::write(path, content).expect("write");
        }
        dir
    }

    fn scan(root: &Path, config: &Config) -> (Result<ScanReport>, String) {
        let mut out = Vec::new();
        let result = run(root, config, &mut out);
        (result, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn test_collect_files_any_depth_sorted() {
        let dir = tree(&[
            ("b.hpp", SENDMORE),
            ("wallet/deep/a.hpp", LISTTXS),
            ("a.hpp", LISTTXS),
        ]);
        let files = collect_files(dir.path(), &Config::default()).expect("collect");
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).expect("prefix").to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a.hpp"),
                PathBuf::from("b.hpp"),
                PathBuf::from("wallet/deep/a.hpp"),
            ]
        );
    }

    #[test]
    fn test_collect_files_applies_extension_filter() {
        let dir = tree(&[("a.hpp", LISTTXS), ("a.cpp", "int main() {}")]);
        let config = Config {
            extensions: vec!["hpp".to_string()],
            ..Config::default()
        };
        let files = collect_files(dir.path(), &config).expect("collect");
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_collect_missing_root_fails() {
        let result = collect_files(Path::new("/nonexistent/sdkgen/root"), &Config::default());
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_warn_policy_continues_past_bad_file() {
        let dir = tree(&[
            ("a_listtxs.hpp", LISTTXS),
            ("b_notifier.hpp", NOTIFIER),
            ("c_sendmore.hpp", SENDMORE),
        ]);
        let (result, out) = scan(dir.path(), &Config::default());
        let report = result.expect("scan");

        assert_eq!(report.scanned, 3);
        assert_eq!(report.generated, 2);
        assert!(!report.is_clean());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("b_notifier.hpp"));
        assert!(matches!(report.failures[0].error, Error::Extract { .. }));

        assert!(out.contains("def listtxs("));
        assert!(out.contains("def sendmore("));
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let dir = tree(&[("a_notifier.hpp", NOTIFIER), ("b_sendmore.hpp", SENDMORE)]);
        let config = Config {
            policy: FailurePolicy::FailFast,
            ..Config::default()
        };
        let (result, out) = scan(dir.path(), &config);
        let err = result.expect_err("fail fast");
        assert!(err.to_string().contains("a_notifier.hpp"));
        assert!(err.to_string().contains("notifier(on_fee)"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_file_is_always_fail_fast() {
        let dir = tree(&[("notifier.hpp", NOTIFIER)]);
        let config = Config {
            policy: FailurePolicy::Silent,
            ..Config::default()
        };
        let (result, _) = scan(&dir.path().join("notifier.hpp"), &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_silent_policy_records_failures() {
        let dir = tree(&[("notifier.hpp", NOTIFIER)]);
        let config = Config {
            policy: FailurePolicy::Silent,
            ..Config::default()
        };
        let (result, out) = scan(dir.path(), &config);
        let report = result.expect("scan");
        assert_eq!(report.failures.len(), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn test_json_format_writes_one_line_per_command() {
        let dir = tree(&[("a.hpp", LISTTXS), ("b.hpp", SENDMORE)]);
        let config = Config {
            format: OutputFormat::Json,
            ..Config::default()
        };
        let (result, out) = scan(dir.path(), &config);
        assert!(result.expect("scan").is_clean());

        let names: Vec<String> = out
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).expect("json");
                value["name"].as_str().unwrap_or_default().to_string()
            })
            .collect();
        assert_eq!(names, vec!["listtxs", "sendmore"]);
    }

    #[test]
    fn test_target_selection_reaches_generator() {
        let dir = tree(&[("sendmore.hpp", SENDMORE)]);
        let config = Config {
            target: Target::Go,
            ..Config::default()
        };
        let (result, out) = scan(dir.path(), &config);
        assert!(result.expect("scan").is_clean());
        assert!(out.contains("func (r *RPCClient) Sendmore("));
    }
}
