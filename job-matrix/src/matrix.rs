//! Expands templates into per-architecture job matrices.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::{
	job::{Arch, Distribution, Job, Stamp},
	template,
};

/// An error produced while assembling the job matrix.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
	/// No distribution was selected, so no jobs exist.
	#[error(
		"no jobs were generated; pass --include-alpine and/or --include-ubuntu (is this intended?)"
	)]
	Empty,
}

/// Jobs partitioned into per-architecture include buckets.
///
/// Bucket order within a matrix follows [`Arch`]; job order within a
/// bucket is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matrix<'a> {
	/// The include buckets, keyed by architecture.
	buckets: BTreeMap<Arch, Vec<Job<'a>>>,
}

impl<'a> Matrix<'a> {
	/// Returns `true` if the matrix has no buckets at all.
	pub fn is_empty(&self) -> bool {
		self.buckets.is_empty()
	}

	/// Returns the jobs in `arch`'s bucket; missing buckets are empty.
	pub fn bucket(&self, arch: Arch) -> &[Job<'a>] {
		self.buckets
			.get(&arch)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	/// Returns the architectures that have a bucket.
	pub fn arches(&self) -> impl Iterator<Item = Arch> + '_ {
		self.buckets.keys().copied()
	}

	/// Total number of jobs across all buckets.
	pub fn len(&self) -> usize {
		self.buckets.values().map(Vec::len).sum()
	}

	/// All jobs, amd64 bucket first, then arm64.
	pub fn flatten(&self) -> Vec<&Job<'a>> {
		Arch::iter().flat_map(|arch| self.bucket(arch)).collect()
	}

	/// Combines two matrices without modifying either.
	///
	/// The result holds every bucket present in either input; each bucket
	/// is `self`'s jobs followed by `other`'s. Argument order therefore
	/// matters for the order of jobs within a bucket.
	#[must_use]
	pub fn merge(&self, other: &Self) -> Self {
		let mut buckets = self.buckets.clone();
		for (arch, jobs) in &other.buckets {
			buckets.entry(*arch).or_default().extend(jobs.iter().cloned());
		}
		Self { buckets }
	}

	/// Appends a job to the bucket for its own architecture.
	fn push(&mut self, job: Job<'a>) {
		self.buckets.entry(job.arch).or_default().push(job);
	}

	/// Ensures that non-empty output fails if nothing was selected.
	pub fn non_empty(self) -> Result<Self, MatrixError> {
		if self.is_empty() {
			Err(MatrixError::Empty)
		} else {
			Ok(self)
		}
	}
}

/// Builds the Alpine matrix: one job per architecture.
///
/// `os_version` defaults to [`template::ALPINE_DEFAULT_VERSION`].
/// Alpine jobs use the image's own toolchain, so compiler and Python
/// fields are left unset.
pub fn alpine<'a>(stamp: &Stamp<'a>, os_version: Option<&'a str>) -> Matrix<'a> {
	let os_version = os_version.unwrap_or(template::ALPINE_DEFAULT_VERSION);

	let mut matrix = Matrix::default();
	for arch in Arch::iter() {
		matrix.push(Job {
			runner: stamp.runner(arch),
			os_name: Distribution::Alpine,
			os_version,
			cmake_version: stamp.cmake_version,
			conan_version: stamp.conan_version,
			arch,
			compiler_name: None,
			compiler_version: None,
			python_version: None,
		});
	}

	log::debug!("generated {} alpine {os_version} jobs", matrix.len());
	matrix
}

/// Builds the Ubuntu matrix: one job per template row per architecture.
pub fn ubuntu<'a>(stamp: &Stamp<'a>) -> Matrix<'a> {
	let mut matrix = Matrix::default();
	for t in template::UBUNTU {
		for arch in Arch::iter() {
			matrix.push(Job {
				runner: stamp.runner(arch),
				os_name: Distribution::Ubuntu,
				os_version: t.os_version,
				cmake_version: stamp.cmake_version,
				conan_version: stamp.conan_version,
				arch,
				compiler_name: Some(t.compiler),
				compiler_version: Some(t.compiler_version),
				python_version: Some(t.python_version),
			});
		}
		log::trace!(
			"ubuntu {}: {}-{}",
			t.os_version,
			t.compiler,
			t.compiler_version
		);
	}

	log::debug!("generated {} ubuntu jobs", matrix.len());
	matrix
}
