//! Path building infrastructure for iControl REST resources.
//!
//! The management API addresses every object through a fixed hierarchy:
//!
//! ```text
//! /<prefix>/<category>/<manager>/<resource>[/<instance>][/<sub-resource>[/<sub-instance>]][/stats]
//! ```
//!
//! This module provides the pure building blocks used by the request builder:
//!
//! - Segment validation ([`is_valid_path_segment_name`], [`is_valid_path_segment_prefix`])
//! - Path joining with clean semantics ([`join_path`], [`clean_path`])
//! - Full-path encoding for partition-qualified names ([`encode_full_path`])
//! - Percent-escaping of an assembled path ([`escape_path`])
//!
//! # Full paths
//!
//! Objects live inside partitions, so their identifier is a path such as
//! `/Common/my-pool`. Because that identifier has to fit into a single URL
//! segment, the appliance expects every `/` to be replaced by `~`:
//!
//! ```rust
//! use bigip_rest::rest::encode_full_path;
//!
//! assert_eq!(encode_full_path(["Common", "my-pool"]), "Common~my-pool");
//! assert_eq!(encode_full_path(["/Common/my-pool"]), "~Common~my-pool");
//! ```

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Names that cannot be used as a path segment.
pub const NAME_MAY_NOT_BE: &[&str] = &[".", ".."];

/// Substrings that cannot appear in a name used as a path segment.
pub const NAME_MAY_NOT_CONTAIN: &[&str] = &["/", "%"];

/// Separator used by the appliance in place of `/` inside a full path.
pub const FULL_PATH_SEPARATOR: char = '~';

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'^')
    .add(b'|')
    .add(b'\\')
    .add(b'[')
    .add(b']');

/// Validates that `name` can be safely encoded as a path segment.
///
/// Returns the list of violated rules; an empty list means the name is legal.
/// An exact match against [`NAME_MAY_NOT_BE`] short-circuits with a single
/// violation.
///
/// # Example
///
/// ```rust
/// use bigip_rest::rest::is_valid_path_segment_name;
///
/// assert!(is_valid_path_segment_name("pool").is_empty());
/// assert_eq!(is_valid_path_segment_name(".."), vec!["may not be '..'"]);
/// assert_eq!(is_valid_path_segment_name("a/b%"), vec!["may not contain '/'", "may not contain '%'"]);
/// ```
#[must_use]
pub fn is_valid_path_segment_name(name: &str) -> Vec<String> {
    if let Some(illegal) = NAME_MAY_NOT_BE.iter().find(|illegal| **illegal == name) {
        return vec![format!("may not be '{illegal}'")];
    }
    is_valid_path_segment_prefix(name)
}

/// Validates that `name` can be used as the prefix of a path segment.
///
/// Exact matches are not checked, since an arbitrary suffix might make the
/// name valid.
#[must_use]
pub fn is_valid_path_segment_prefix(name: &str) -> Vec<String> {
    NAME_MAY_NOT_CONTAIN
        .iter()
        .filter(|illegal| name.contains(**illegal))
        .map(|illegal| format!("may not contain '{illegal}'"))
        .collect()
}

/// Validates a path segment, using prefix rules when `prefix` is `true`.
#[must_use]
pub fn validate_path_segment_name(name: &str, prefix: bool) -> Vec<String> {
    if prefix {
        is_valid_path_segment_prefix(name)
    } else {
        is_valid_path_segment_name(name)
    }
}

/// Validates one raw component of a full path before it is encoded.
///
/// Each `/`-separated part may not be `.` or `..`, and the component may not
/// contain [`FULL_PATH_SEPARATOR`], which would make the encoded form
/// ambiguous.
#[must_use]
pub fn validate_full_path_component(component: &str) -> Vec<String> {
    let mut violations: Vec<String> = component
        .split('/')
        .filter_map(|part| NAME_MAY_NOT_BE.iter().find(|illegal| **illegal == part))
        .map(|illegal| format!("may not be '{illegal}'"))
        .collect();
    violations.dedup();
    if component.contains(FULL_PATH_SEPARATOR) {
        violations.push(format!("may not contain '{FULL_PATH_SEPARATOR}'"));
    }
    violations
}

/// Lexically cleans a slash-separated path.
///
/// Repeated separators collapse, `.` elements are dropped, `..` elements
/// remove the preceding element, and trailing separators are trimmed. A
/// rooted path stays rooted; an empty result becomes `"."`.
#[must_use]
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            _ => parts.push(part),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Joins path elements with `/` and cleans the result.
///
/// Empty elements are ignored; if every element is empty the result is an
/// empty string.
///
/// # Example
///
/// ```rust
/// use bigip_rest::rest::join_path;
///
/// assert_eq!(join_path(["/", "mgmt", "tm"]), "/mgmt/tm");
/// assert_eq!(join_path(["/mgmt/", "", "ltm//pool"]), "/mgmt/ltm/pool");
/// assert_eq!(join_path(["", ""]), "");
/// ```
#[must_use]
pub fn join_path<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = segments
        .into_iter()
        .map(|segment| segment.as_ref().to_string())
        .filter(|segment| !segment.is_empty())
        .collect();
    if parts.is_empty() {
        return String::new();
    }
    clean_path(&parts.join("/"))
}

/// Encodes a partition-qualified identifier into a single path segment.
///
/// The components are joined with `/` and every separator is then replaced
/// with [`FULL_PATH_SEPARATOR`].
#[must_use]
pub fn encode_full_path<I, S>(components: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    join_path(components).replace('/', &FULL_PATH_SEPARATOR.to_string())
}

/// Reverses [`encode_full_path`], turning `~Common~my-pool` back into
/// `/Common/my-pool`.
#[must_use]
pub fn decode_full_path(encoded: &str) -> String {
    encoded.replace(FULL_PATH_SEPARATOR, "/")
}

/// Percent-escapes each segment of an assembled path, keeping separators.
#[must_use]
pub fn escape_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<String>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_segments_have_no_violations() {
        for name in ["ltm", "pool", "route-domain", "my_pool.v2", "...", "a.b", "~x"] {
            assert!(
                is_valid_path_segment_name(name).is_empty(),
                "expected {name} to be legal"
            );
        }
    }

    #[test]
    fn test_reserved_names_are_rejected() {
        assert_eq!(is_valid_path_segment_name("."), vec!["may not be '.'"]);
        assert_eq!(is_valid_path_segment_name(".."), vec!["may not be '..'"]);
    }

    #[test]
    fn test_forbidden_substrings_are_rejected() {
        assert_eq!(
            is_valid_path_segment_name("a/b"),
            vec!["may not contain '/'"]
        );
        assert_eq!(
            is_valid_path_segment_name("50%"),
            vec!["may not contain '%'"]
        );
        assert_eq!(is_valid_path_segment_name("/%").len(), 2);
    }

    #[test]
    fn test_prefix_validation_skips_exact_matches() {
        assert!(is_valid_path_segment_prefix("..").is_empty());
        assert!(!is_valid_path_segment_prefix("a/").is_empty());
        assert!(validate_path_segment_name(".", true).is_empty());
        assert!(!validate_path_segment_name(".", false).is_empty());
    }

    #[test]
    fn test_full_path_component_rejects_separator_and_dots() {
        assert!(validate_full_path_component("/Common/my-pool").is_empty());
        assert_eq!(
            validate_full_path_component("Common/my~pool"),
            vec!["may not contain '~'"]
        );
        assert_eq!(
            validate_full_path_component("Common/.."),
            vec!["may not be '..'"]
        );
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path(""), ".");
        assert_eq!(clean_path("/"), "/");
        assert_eq!(clean_path("a//b/./c/"), "a/b/c");
        assert_eq!(clean_path("/a/b/../c"), "/a/c");
        assert_eq!(clean_path("/../a"), "/a");
        assert_eq!(clean_path("../a"), "../a");
        assert_eq!(clean_path("a/.."), ".");
    }

    #[test]
    fn test_join_path_skips_empty_elements() {
        assert_eq!(join_path(["/", "", "mgmt"]), "/mgmt");
        assert_eq!(join_path(["mgmt", "tm", "ltm"]), "mgmt/tm/ltm");
        assert_eq!(join_path(Vec::<String>::new()), "");
    }

    #[test]
    fn test_encode_full_path() {
        assert_eq!(encode_full_path(["Common", "my-pool"]), "Common~my-pool");
        assert_eq!(encode_full_path(["Common/my-pool"]), "Common~my-pool");
        assert_eq!(encode_full_path(["/Common/app/my-pool"]), "~Common~app~my-pool");
        assert_eq!(encode_full_path(["my-pool"]), "my-pool");
        assert_eq!(encode_full_path([""]), "");
    }

    #[test]
    fn test_encoded_pair_splits_back_into_components() {
        for (a, b) in [("Common", "my-pool"), ("tenant-1", "vs_443"), ("p", "n.v")] {
            let encoded = encode_full_path([a, b]);
            let parts: Vec<&str> = encoded.split(FULL_PATH_SEPARATOR).collect();
            assert_eq!(parts, vec![a, b]);
        }
    }

    #[test]
    fn test_decode_full_path() {
        assert_eq!(decode_full_path("~Common~my-pool"), "/Common/my-pool");
        assert_eq!(decode_full_path(&encode_full_path(["Common", "x"])), "Common/x");
    }

    #[test]
    fn test_escape_path_keeps_separators_and_tilde() {
        assert_eq!(
            escape_path("/mgmt/tm/ltm/pool/~Common~my pool"),
            "/mgmt/tm/ltm/pool/~Common~my%20pool"
        );
        assert_eq!(escape_path("/a?b#c"), "/a%3Fb%23c");
    }
}
