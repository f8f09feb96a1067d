use serde::*;

/// A prerequisite that must be present in the host before its owner can run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
	pub kind: DependencyKind,
	pub id: String,
}

/// What kind of prerequisite a [`Dependency`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
	/// Another module, referenced by module id.
	Module,
	/// A bundled library, referenced by file name.
	Library,
}

/// Lookup into the running host used to answer dependency satisfaction.
///
/// Implemented over the host's module index and library path, both external
/// to this crate.
pub trait HostQuery {
	fn has_module(&self, id: &str) -> bool;
	fn has_library(&self, filename: &str) -> bool;
}

impl Dependency {
	pub fn module(id: impl Into<String>) -> Self {
		Self { kind: DependencyKind::Module, id: id.into() }
	}

	pub fn library(filename: impl Into<String>) -> Self {
		Self { kind: DependencyKind::Library, id: filename.into() }
	}

	/// Whether the prerequisite is currently present in the host.
	///
	/// Checked one level deep only; what to do about an unsatisfied
	/// dependency (queue it, warn, block) is the caller's policy.
	pub fn is_satisfied(&self, host: &dyn HostQuery) -> bool {
		match self.kind {
			DependencyKind::Module => host.has_module(&self.id),
			DependencyKind::Library => host.has_library(&self.id),
		}
	}
}

impl std::fmt::Display for Dependency {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			DependencyKind::Module => write!(f, "module {}", self.id),
			DependencyKind::Library => write!(f, "library {}", self.id),
		}
	}
}
