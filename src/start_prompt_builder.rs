//! Startup helpers for the `cosmos-prompts` binary.
//!
//! Reads a dataset (and optionally a config) from disk, transforms it, and
//! writes one JSON line per record to stdout. Logs go to stderr.

use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use serde::Serialize;

use crate::config::TransformConfig;
use crate::dataset::loader::load_dataset;
use crate::dataset::record::Record;
use crate::transform::{PromptTransformer, TransformOutput};

/// One emitted output line.
#[derive(Debug, Serialize)]
struct PromptLine<'a> {
    id: i64,
    prompt: &'a str,
    label: usize,
}

const USAGE: &str = "usage: cosmos-prompts <dataset.json> [config.json]";

/// Paths named on the command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
    /// Dataset JSON file.
    pub dataset_path: PathBuf,
    /// Optional config JSON file.
    pub config_path: Option<PathBuf>,
}

/// Parse arguments (without the program name) into an invocation.
///
/// Returns `None` when the dataset path is missing or extra arguments follow
/// the config path.
#[must_use]
pub fn parse_args<I, S>(args: I) -> Option<Invocation>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args = args.into_iter().map(|arg| PathBuf::from(arg.into()));
    let (Some(dataset_path), config_path, None) = (args.next(), args.next(), args.next()) else {
        return None;
    };
    Some(Invocation {
        dataset_path,
        config_path,
    })
}

/// Run the binary with process arguments.
///
/// # Returns
/// `ExitCode::SUCCESS` on success, `1` on failure, `2` on usage error.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    tracing::info!("Starting cosmos-prompts v{}", env!("CARGO_PKG_VERSION"));

    ExitCode::from(run_with_args(std::env::args_os().skip(1)))
}

/// Parse arguments and execute, returning the process status code.
///
/// `0` on success, `1` on failure, `2` on usage error.
#[must_use]
pub fn run_with_args<I, S>(args: I) -> u8
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let Some(invocation) = parse_args(args) else {
        tracing::error!("{USAGE}");
        return 2;
    };

    if let Err(e) = execute(&invocation.dataset_path, invocation.config_path.as_deref()) {
        tracing::error!("{e:#}");
        return 1;
    }

    0
}

/// Load, transform, and write the dataset to stdout.
///
/// # Errors
/// Returns an error if the config or dataset cannot be loaded, the transform
/// fails, or stdout cannot be written.
pub fn execute(dataset_path: &Path, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => TransformConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => TransformConfig::default(),
    };

    let dataset = load_dataset(dataset_path)
        .with_context(|| format!("failed to load dataset from {}", dataset_path.display()))?;

    let output = PromptTransformer::with_config(&dataset, config)?
        .transform_data()
        .context("failed to transform dataset")?;

    let stdout = io::stdout();
    write_output(&dataset, &output, stdout.lock()).context("failed to write output")
}

/// Write one JSON line `{"id", "prompt", "label"}` per record.
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn write_output<W: Write>(
    dataset: &[Record],
    output: &TransformOutput,
    writer: W,
) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(writer);
    for (record, (prompt, label)) in dataset.iter().zip(output.iter()) {
        let line = PromptLine {
            id: record.id,
            prompt,
            label,
        };
        serde_json::to_writer(&mut writer, &line)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
