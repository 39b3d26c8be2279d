//! Static job templates for each distribution.
//!
//! The Ubuntu table encodes which compiler majors are installable on which
//! Ubuntu image, and which Python ships with that image. It must match the
//! CI images exactly; rows are emitted in table order.

use crate::job::Compiler;

/// Alpine version used when no override is given.
pub const ALPINE_DEFAULT_VERSION: &str = "3.22";

/// One row of the Ubuntu template table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UbuntuTemplate {
	/// Compiler family.
	pub compiler:         Compiler,
	/// Compiler major version.
	pub compiler_version: u32,
	/// Ubuntu image version.
	pub os_version:       &'static str,
	/// Python version shipped with the image.
	pub python_version:   &'static str,
}

/// Shorthand for building [`UbuntuTemplate`] rows.
macro_rules! ubuntu {
	($($compiler:ident $version:literal @ $os:literal py $py:literal),* $(,)?) => {
		&[$(
			UbuntuTemplate {
				compiler:         Compiler::$compiler,
				compiler_version: $version,
				os_version:       $os,
				python_version:   $py,
			}
		),*]
	};
}

/// The Ubuntu template table.
pub const UBUNTU: &[UbuntuTemplate] = ubuntu![
	Gcc 8 @ "20.04" py "3.9",
	Gcc 9 @ "22.04" py "3.11",
	Gcc 10 @ "24.04" py "3.12",
	Gcc 11 @ "24.04" py "3.12",
	Gcc 12 @ "24.04" py "3.12",
	Gcc 13 @ "24.04" py "3.12",
	Gcc 14 @ "24.04" py "3.12",
	Gcc 15 @ "25.04" py "3.13",
	Clang 8 @ "20.04" py "3.9",
	Clang 9 @ "20.04" py "3.9",
	Clang 10 @ "20.04" py "3.9",
	Clang 11 @ "22.04" py "3.11",
	Clang 12 @ "22.04" py "3.11",
	Clang 13 @ "22.04" py "3.11",
	Clang 14 @ "24.04" py "3.12",
	Clang 15 @ "24.04" py "3.12",
	Clang 16 @ "24.04" py "3.12",
	Clang 17 @ "24.04" py "3.12",
	Clang 18 @ "24.04" py "3.12",
	Clang 19 @ "24.04" py "3.12",
	Clang 20 @ "20.04" py "3.9",
	Clang 20 @ "22.04" py "3.11",
	Clang 20 @ "24.04" py "3.12",
];
