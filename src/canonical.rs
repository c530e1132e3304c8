//! Canonical URL forms used to compare redirect sources and destinations.
//!
//! Both sides of a redirect are resolved against a fixed local origin with
//! the `url` crate, so `/node/5`, `node/5` and `internal:/node/5` all end up
//! as the same `/node/5` string. Anything that cannot be resolved is
//! reported as [`MalformedPath`] rather than raised.

use std::fmt;

use thiserror::Error;
use url::Url;

const LOCAL_ORIGIN: &str = "http://localhost/";
const LOCAL_HOST: &str = "localhost";

/// Scheme prefix for destinations that point inside the site.
pub const INTERNAL_SCHEME: &str = "internal:";

/// Why a path or URI has no canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedPath {
    /// Whitespace, control characters and backslashes are not allowed.
    #[error("{input:?} contains an invalid character {found:?}")]
    InvalidCharacter {
        /// The rejected input.
        input: String,
        /// The first offending character.
        found: char,
    },
    /// Only `internal:` URIs are understood.
    #[error("{0:?} does not use the internal: scheme")]
    UnsupportedScheme(String),
    /// `internal:` must be followed by `/`, `?` or `#`.
    #[error("internal URI {0:?} must continue with '/', '?' or '#'")]
    MissingLeadingSlash(String),
    /// The `url` crate could not resolve the input.
    #[error("{input:?} cannot be resolved: {reason}")]
    Unresolvable {
        /// The rejected input.
        input: String,
        /// Resolution failure reported by the parser.
        reason: String,
    },
}

/// Outcome of canonicalizing one side of a redirect.
pub type ParseResult = Result<CanonicalUrl, MalformedPath>;

/// A site-relative URL in comparable form: `/<path>[?query][#fragment]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    /// Canonicalizes a path relative to the site root.
    ///
    /// Leading slashes are ignored, so `/old-page` and `old-page` agree.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPath`] if the path contains invalid characters or
    /// cannot be resolved.
    pub fn from_internal_path(path: &str) -> ParseResult {
        check_characters(path)?;
        resolve(path.trim_start_matches('/'), path)
    }

    /// Canonicalizes an `internal:` URI such as `internal:/node/5`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPath`] for other schemes, for a missing leading
    /// `/`, `?` or `#`, or for anything [`CanonicalUrl::from_internal_path`]
    /// would reject.
    pub fn from_uri(uri: &str) -> ParseResult {
        let rest = uri
            .strip_prefix(INTERNAL_SCHEME)
            .ok_or_else(|| MalformedPath::UnsupportedScheme(uri.to_string()))?;
        if !rest.starts_with(['/', '?', '#']) {
            return Err(MalformedPath::MissingLeadingSlash(uri.to_string()));
        }
        check_characters(rest)?;
        resolve(rest.trim_start_matches('/'), uri)
    }

    /// The canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Two sides point at the same place only when both canonicalized.
#[must_use]
pub fn same_target(a: &ParseResult, b: &ParseResult) -> bool {
    matches!((a, b), (Ok(a), Ok(b)) if a == b)
}

fn check_characters(input: &str) -> Result<(), MalformedPath> {
    match input.chars().find(|c| c.is_whitespace() || c.is_control() || *c == '\\') {
        Some(found) => Err(MalformedPath::InvalidCharacter { input: input.to_string(), found }),
        None => Ok(()),
    }
}

fn resolve(relative: &str, input: &str) -> ParseResult {
    let unresolvable =
        |reason: String| MalformedPath::Unresolvable { input: input.to_string(), reason };

    let base = Url::parse(LOCAL_ORIGIN).map_err(|e| unresolvable(e.to_string()))?;

    // A colon in the first segment would otherwise parse as a scheme.
    let first_segment = relative.split(['/', '?', '#']).next().unwrap_or_default();
    let joined = if first_segment.contains(':') {
        base.join(&format!("./{relative}"))
    } else {
        base.join(relative)
    }
    .map_err(|e| unresolvable(e.to_string()))?;

    if joined.host_str() != Some(LOCAL_HOST) {
        return Err(unresolvable("resolves outside the site".to_string()));
    }

    let mut canonical = joined.path().to_string();
    if let Some(query) = joined.query() {
        canonical.push('?');
        canonical.push_str(query);
    }
    if let Some(fragment) = joined.fragment() {
        canonical.push('#');
        canonical.push_str(fragment);
    }
    Ok(CanonicalUrl(canonical))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(path: &str) -> String {
        CanonicalUrl::from_internal_path(path).unwrap().to_string()
    }

    #[test]
    fn leading_slashes_do_not_matter() {
        assert_eq!(canonical("/node/5"), "/node/5");
        assert_eq!(canonical("node/5"), "/node/5");
        assert_eq!(canonical("///node/5"), "/node/5");
    }

    #[test]
    fn internal_uri_matches_equivalent_path() {
        let uri = CanonicalUrl::from_uri("internal:/node/5");
        let path = CanonicalUrl::from_internal_path("/node/5");
        assert!(same_target(&path, &uri));
    }

    #[test]
    fn dot_segments_are_resolved() {
        assert_eq!(canonical("blog/./2024/../archive"), "/blog/archive");
    }

    #[test]
    fn non_ascii_is_percent_encoded() {
        assert_eq!(canonical("café"), "/caf%C3%A9");
        assert_eq!(canonical("café"), canonical("caf%C3%A9"));
    }

    #[test]
    fn query_and_fragment_are_kept() {
        assert_eq!(canonical("search?q=rust#top"), "/search?q=rust#top");
        assert_eq!(CanonicalUrl::from_uri("internal:?page=1").unwrap().as_str(), "/?page=1");
    }

    #[test]
    fn colon_in_first_segment_stays_a_path() {
        assert_eq!(canonical("mailto:someone"), "/mailto:someone");
    }

    #[test]
    fn whitespace_and_backslashes_are_malformed() {
        assert!(matches!(
            CanonicalUrl::from_internal_path("old page"),
            Err(MalformedPath::InvalidCharacter { found: ' ', .. })
        ));
        assert!(matches!(
            CanonicalUrl::from_internal_path("old\\page"),
            Err(MalformedPath::InvalidCharacter { found: '\\', .. })
        ));
    }

    #[test]
    fn uri_shapes_are_checked() {
        assert!(matches!(
            CanonicalUrl::from_uri("https://example.com/node/5"),
            Err(MalformedPath::UnsupportedScheme(_))
        ));
        assert!(matches!(
            CanonicalUrl::from_uri("internal:node/5"),
            Err(MalformedPath::MissingLeadingSlash(_))
        ));
    }

    #[test]
    fn malformed_side_is_never_the_same_target() {
        let bad = CanonicalUrl::from_internal_path("bad path");
        let good = CanonicalUrl::from_internal_path("bad%20path");
        assert!(!same_target(&bad, &good));
        assert!(!same_target(&bad, &bad.clone()));
    }
}
