use crate::constants::PUBLIC_ENDPOINTS;

/// Set of path patterns that do not require authentication.
///
/// A pattern without `*` matches only the identical path. Otherwise the
/// pattern and the path are compared segment by segment:
///
/// * a segment without `*` must be equal to the path segment,
/// * a non-final segment with `*` globs exactly one path segment,
/// * a final segment with `*` globs the whole remaining path, slashes included.
///
/// Text around a `*` is always literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRules {
    patterns: Vec<String>,
}

impl PathRules {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in public endpoint list.
    pub fn public_endpoints() -> Self {
        Self::new(PUBLIC_ENDPOINTS.iter().copied())
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| matches_pattern(pattern, path))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Resolve `.` and `..` segments, including their percent-encoded forms.
///
/// Classification and forwarding both use the result, so a path can never be
/// judged public and then reach downstream as a different one. Returns `None`
/// when the path climbs above the root or contains a backslash.
pub fn normalize_path(path: &str) -> Option<String> {
    if !path.starts_with('/') || path.contains('\\') || contains_ignore_case(path, "%5c") {
        return None;
    }

    let segments: Vec<&str> = path[1..].split('/').collect();
    let last = segments.len() - 1;
    let mut resolved: Vec<&str> = Vec::with_capacity(segments.len());

    for (index, segment) in segments.into_iter().enumerate() {
        match dot_segment(segment) {
            Some(DotSegment::Current) => {}
            Some(DotSegment::Parent) => {
                resolved.pop()?;
            }
            None => {
                resolved.push(segment);
                continue;
            }
        }
        // A trailing dot segment still names a directory
        if index == last {
            resolved.push("");
        }
    }

    Some(format!("/{}", resolved.join("/")))
}

enum DotSegment {
    Current,
    Parent,
}

fn dot_segment(segment: &str) -> Option<DotSegment> {
    let decoded = segment.replace("%2e", ".").replace("%2E", ".");
    match decoded.as_str() {
        "." => Some(DotSegment::Current),
        ".." => Some(DotSegment::Parent),
        _ => None,
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_lowercase().contains(needle)
}

/// Match a request path against a single pattern.
pub fn matches_pattern(pattern: &str, path: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == path;
    }

    let segments: Vec<&str> = pattern.split('/').collect();
    let Some((last, leading)) = segments.split_last() else {
        return false;
    };

    let mut remaining = path;
    for segment in leading {
        let Some((head, tail)) = remaining.split_once('/') else {
            return false;
        };
        if !glob(segment, head) {
            return false;
        }
        remaining = tail;
    }

    glob(last, remaining)
}

/// `*` matches any run of characters; everything else is literal.
fn glob(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    let [prefix, middle @ .., suffix] = parts.as_slice() else {
        return pattern == text;
    };

    if text.len() < prefix.len() + suffix.len()
        || !text.starts_with(prefix)
        || !text.ends_with(suffix)
    {
        return false;
    }

    let mut rest = &text[prefix.len()..text.len() - suffix.len()];
    for part in middle {
        match rest.find(part) {
            Some(index) => rest = &rest[index + part.len()..],
            None => return false,
        }
    }

    true
}
