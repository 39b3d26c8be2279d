//! Job records and the enumerations they are built from.

use serde::{Serialize, Serializer};

/// An OS distribution the matrix knows how to expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::EnumString, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Distribution {
	/// Alpine Linux; a single OS version, generic toolchain.
	Alpine,
	/// Ubuntu; one job per compiler/OS-version template row.
	Ubuntu,
}

/// A compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::EnumString, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Compiler {
	/// GNU Compiler Collection.
	Gcc,
	/// LLVM Clang.
	Clang,
}

/// A CPU architecture; each one gets its own include bucket.
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	strum::EnumString,
	strum::Display,
	strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Arch {
	/// x86_64.
	Amd64,
	/// AArch64.
	Arm64,
}

impl Arch {
	/// The container platform tag, e.g. `linux/amd64`.
	pub fn platform(self) -> &'static str {
		match self {
			Arch::Amd64 => "linux/amd64",
			Arch::Arm64 => "linux/arm64",
		}
	}

	/// The name of this architecture's include bucket, e.g. `includes_amd64`.
	pub fn bucket_name(self) -> &'static str {
		match self {
			Arch::Amd64 => "includes_amd64",
			Arch::Arm64 => "includes_arm64",
		}
	}

	/// Serializes the architecture as its platform tag.
	fn serialize_platform<S: Serializer>(arch: &Self, s: S) -> Result<S::Ok, S::Error> {
		s.serialize_str(arch.platform())
	}
}

/// A single CI job's parameters.
///
/// Every field is always serialized. Fields that do not apply to a
/// distribution are emitted as `null` rather than omitted, since the
/// consuming workflow indexes them by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Job<'a> {
	/// The runner the job executes on.
	pub runner:           &'a str,
	/// The distribution name.
	pub os_name:          Distribution,
	/// The distribution version (image tag).
	pub os_version:       &'a str,
	/// CMake version constraint.
	pub cmake_version:    &'a str,
	/// Conan version constraint.
	pub conan_version:    &'a str,
	/// Target platform.
	#[serde(rename = "platform", serialize_with = "Arch::serialize_platform")]
	pub arch:             Arch,
	/// Compiler family, if the distribution pins one.
	pub compiler_name:    Option<Compiler>,
	/// Compiler major version, if the distribution pins one.
	pub compiler_version: Option<u32>,
	/// Python version shipped with the image, if pinned.
	pub python_version:   Option<&'a str>,
}

/// Parameters stamped into every job regardless of distribution.
#[derive(Debug, Clone, Copy)]
pub struct Stamp<'a> {
	/// CMake version constraint.
	pub cmake_version: &'a str,
	/// Conan version constraint.
	pub conan_version: &'a str,
	/// Runner for amd64 jobs.
	pub runner_x86:    &'a str,
	/// Runner for arm64 jobs.
	pub runner_arm:    &'a str,
}

impl<'a> Stamp<'a> {
	/// Returns the runner that executes jobs for `arch`.
	pub fn runner(&self, arch: Arch) -> &'a str {
		match arch {
			Arch::Amd64 => self.runner_x86,
			Arch::Arm64 => self.runner_arm,
		}
	}
}
