use serde::*;

const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// The version of an addon or module.
///
/// # Format
/// Dot separated segments, usually numeric (`1.2.1`). A segment may carry a
/// `-SNAPSHOT` suffix marking a pre-release build, which sorts below its
/// unsuffixed counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddonVersion {
	raw: String,
}

impl AddonVersion {
	pub fn new(version: impl Into<String>) -> Self {
		Self { raw: version.into() }
	}

	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Whether `self` denotes a strictly newer release than `than`.
	pub fn is_greater_than(&self, than: &AddonVersion) -> bool {
		is_greater_than(&self.raw, &than.raw)
	}
}

impl From<&str> for AddonVersion {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for AddonVersion {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl std::fmt::Display for AddonVersion {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.raw)
	}
}

/// Whether `version` denotes a strictly newer release than `than`.
///
/// Segments are consumed pairwise left to right, one from each string per
/// step, even when the two strings differ in segment count:
/// - A `-SNAPSHOT` suffix on one side whose stripped value equals the other
///   side's segment decides immediately in favour of the unsuffixed side.
/// - Segments that both parse as integers compare numerically.
/// - Anything else compares case-insensitively as text.
/// - When `than` runs out of segments first the longer `version` wins
///   (`1.2.1` > `1.2`); when `version` runs out first the answer is false.
///
/// The comparison is kept exactly as the persisted data expects it, so it is
/// not symmetric or transitive for every mixed numeric/non-numeric input.
/// Callers must not build a total order on top of it.
pub fn is_greater_than(version: &str, than: &str) -> bool {
	let mut segments = version.split('.');
	let mut than_segments = than.split('.');

	loop {
		let (segment, than_segment) = match (segments.next(), than_segments.next()) {
			(Some(segment), Some(than_segment)) => (segment, than_segment),
			/* Unread segments left on our side mean a newer release, e.g. `1.2.1` > `1.2`. */
			(Some(_), None) => return true,
			(None, _) => return false,
		};

		let than_segment = match than_segment.strip_suffix(SNAPSHOT_SUFFIX) {
			Some(stripped) => {
				/* A released segment is newer than the same segment as a snapshot. */
				if stripped == segment {
					return true
				}
				stripped
			},
			None => than_segment,
		};

		let segment = match segment.strip_suffix(SNAPSHOT_SUFFIX) {
			Some(stripped) => {
				if stripped == than_segment {
					return false
				}
				stripped
			},
			None => segment,
		};

		match (segment.parse::<u64>(), than_segment.parse::<u64>()) {
			(Ok(lhs), Ok(rhs)) => {
				if lhs != rhs {
					return lhs > rhs
				}
			},
			_ => {
				let lhs = segment.to_lowercase();
				let rhs = than_segment.to_lowercase();
				if lhs != rhs {
					return lhs > rhs
				}
			},
		}
	}
}
