//! Tag resolution and version validation
//!
//! Pure helpers: extract a tag name from the triggering ref and derive a
//! semantic version from it. No side effects.

use semver::Version;

/// Prefix a ref must carry to count as a tag push
pub const TAGS_REF_PREFIX: &str = "refs/tags/";

/// Extract the tag name from a `refs/tags/<name>` ref
///
/// Returns `None` for an absent ref or any ref outside the tags namespace
/// (branch pushes, pull request refs).
pub fn tag_from_ref(git_ref: Option<&str>) -> Option<&str> {
  git_ref?.strip_prefix(TAGS_REF_PREFIX)
}

/// Derive the version string from a tag name
///
/// Strips a single leading `v` if present and validates the remainder as a
/// semantic version. Returns the stripped string (not a canonicalized
/// rendering) so the manifest receives exactly what the tag carried.
pub fn version_from_tag(tag: &str) -> Option<&str> {
  let version = tag.strip_prefix('v').unwrap_or(tag);
  Version::parse(version).ok()?;
  Some(version)
}
