//! Writes the job matrix to stdout and to the CI step output file.

use std::{
	fs::OpenOptions,
	io::{BufWriter, Write},
	path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::{
	job::{Arch, Job},
	matrix::Matrix,
};

/// Environment variable naming the GitHub Actions step output file.
pub const OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// An error produced while emitting the matrix.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
	/// The matrix could not be converted to JSON.
	#[error("failed to serialize job matrix: {0}")]
	Json(#[from] serde_json::Error),
	/// Writing to standard output failed.
	#[error("failed to write job matrix to standard output: {0}")]
	Stdout(#[source] std::io::Error),
	/// Appending to the step output file failed.
	#[error("failed to append job matrix to {}: {source}", path.display())]
	Output {
		/// The output file path.
		path:   PathBuf,
		/// The underlying IO error.
		#[source]
		source: std::io::Error,
	},
}

/// The `{"include": [...]}` document GitHub Actions expects for a matrix.
#[derive(Serialize)]
struct Include<'m, 'a> {
	/// The jobs.
	include: Vec<&'m Job<'a>>,
}

/// Converts a job list into a JSON value with keys sorted at every level.
///
/// `serde_json::Map` is backed by a `BTreeMap` (the `preserve_order`
/// feature is not enabled), so any value produced here serializes with
/// lexicographically ordered keys. Array order is untouched.
fn include<'m, 'a>(jobs: impl IntoIterator<Item = &'m Job<'a>>) -> Result<Value, EmitError>
where
	'a: 'm,
{
	Ok(serde_json::to_value(Include {
		include: jobs.into_iter().collect(),
	})?)
}

/// Returns the step output path from [`OUTPUT_ENV`], if set and non-empty.
pub fn output_path_from_env() -> Option<PathBuf> {
	std::env::var_os(OUTPUT_ENV)
		.filter(|p| !p.is_empty())
		.map(PathBuf::from)
}

/// Renders the `name=json` step output lines, in emission order.
fn output_lines(matrix: &Matrix<'_>) -> Result<Vec<String>, EmitError> {
	let mut lines = Arch::iter()
		.map(|arch| -> Result<String, EmitError> {
			Ok(format!(
				"matrix-{arch}={}",
				serde_json::to_string(&include(matrix.bucket(arch))?)?
			))
		})
		.collect::<Result<Vec<_>, EmitError>>()?;

	lines.push(format!(
		"matrix={}",
		serde_json::to_string(&include(matrix.flatten())?)?
	));

	Ok(lines)
}

/// Appends `lines` to the file at `path`, creating it if needed.
fn append(path: &Path, lines: &[String]) -> std::io::Result<()> {
	let mut out = BufWriter::new(OpenOptions::new().create(true).append(true).open(path)?);
	for line in lines {
		writeln!(out, "{line}")?;
	}
	out.flush()
}

/// Emits the matrix.
///
/// The combined job list is pretty-printed to `stdout`. If `output` is
/// given, the per-architecture and combined lists are additionally
/// appended to it as compact `matrix-amd64=`, `matrix-arm64=` and
/// `matrix=` lines.
///
/// Everything is serialized before anything is written.
pub fn emit(
	matrix: &Matrix<'_>,
	stdout: &mut impl Write,
	output: Option<&Path>,
) -> Result<(), EmitError> {
	let pretty = serde_json::to_string_pretty(&include(matrix.flatten())?)?;
	let lines = output.map(|_| output_lines(matrix)).transpose()?;

	writeln!(stdout, "{pretty}")
		.and_then(|()| stdout.flush())
		.map_err(EmitError::Stdout)?;

	match (output, lines) {
		(Some(path), Some(lines)) => {
			append(path, &lines).map_err(|source| {
				EmitError::Output {
					path: path.to_path_buf(),
					source,
				}
			})?;
			log::debug!(
				"appended {} step outputs to {}",
				lines.len(),
				path.display()
			);
		}
		_ => log::trace!("{OUTPUT_ENV} not set; skipping step outputs"),
	}

	Ok(())
}
