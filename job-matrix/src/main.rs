//! Generates the CI job matrix for compiler/OS/architecture fan-out.

pub(crate) mod emit;
pub(crate) mod job;
pub(crate) mod matrix;
pub(crate) mod template;

use clap::Parser;

use crate::{job::Stamp, matrix::Matrix};

/// job-matrix: CI job matrix generator
///
/// Prints the selected distributions' jobs as a GitHub Actions
/// `{"include": [...]}` matrix. When `GITHUB_OUTPUT` is set, the
/// `matrix-amd64`, `matrix-arm64` and `matrix` step outputs are also
/// appended to it.
#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
	/// Log verbosely. Specify multiple times for more verbosity.
	#[clap(long, short = 'v', action = clap::ArgAction::Count)]
	pub verbose:        u8,
	/// Include the Alpine jobs.
	#[clap(long)]
	pub include_alpine: bool,
	/// Include the Ubuntu compiler jobs.
	#[clap(long)]
	pub include_ubuntu: bool,
	/// Parameters stamped into every job.
	#[clap(flatten)]
	pub params:         JobParams,
}

/// Parameters stamped into every generated job.
#[derive(Parser, Debug)]
pub(crate) struct JobParams {
	/// Conan version constraint.
	#[clap(long, default_value = "2.18.*")]
	pub conan_version: String,
	/// CMake version constraint.
	#[clap(long, default_value = "4.0.*")]
	pub cmake_version: String,
	/// Runner for amd64 jobs.
	#[clap(long, default_value = "ubuntu-24.04")]
	pub runner_x86:    String,
	/// Runner for arm64 jobs.
	#[clap(long, default_value = "ubuntu-24.04-arm")]
	pub runner_arm:    String,
}

impl JobParams {
	/// Borrows the parameters as a [`Stamp`].
	pub fn stamp(&self) -> Stamp<'_> {
		Stamp {
			cmake_version: &self.cmake_version,
			conan_version: &self.conan_version,
			runner_x86:    &self.runner_x86,
			runner_arm:    &self.runner_arm,
		}
	}
}

/// Builds the matrix for the distributions selected in `args`.
///
/// Alpine jobs precede Ubuntu jobs in each bucket.
fn build(args: &Args) -> Matrix<'_> {
	let stamp = args.params.stamp();

	let mut jobs = Matrix::default();
	if args.include_alpine {
		jobs = jobs.merge(&matrix::alpine(&stamp, None));
	}
	if args.include_ubuntu {
		jobs = jobs.merge(&matrix::ubuntu(&stamp));
	}

	jobs
}

fn pmain() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	let verbosity = match args.verbose {
		0 => log::LevelFilter::Info,
		1 => log::LevelFilter::Debug,
		_ => log::LevelFilter::Trace,
	};

	colog::default_builder().filter_level(verbosity).try_init()?;

	let matrix = build(&args).non_empty()?;
	log::debug!(
		"{} jobs ({})",
		matrix.len(),
		matrix
			.arches()
			.map(|arch| format!("{arch}: {}", matrix.bucket(arch).len()))
			.collect::<Vec<_>>()
			.join(", ")
	);

	let output = emit::output_path_from_env();
	emit::emit(&matrix, &mut std::io::stdout().lock(), output.as_deref())?;

	Ok(())
}

fn main() {
	if let Err(e) = pmain() {
		log::error!("fatal: {}", e);
		std::process::exit(1);
	}
}
