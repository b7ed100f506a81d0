//! Path locality policy
//!
//! The only boundary keeping a generated patch inside the sanctioned
//! source tree. Pure string predicates: no filesystem access and no
//! OS path resolution.

/// Whether `path` is allowed under a prefix allow-list
///
/// An empty allow-list allows everything; otherwise the path must start
/// with one of the prefixes.
#[must_use]
pub fn is_path_allowed<S: AsRef<str>>(path: &str, allowed_prefixes: &[S]) -> bool {
    allowed_prefixes.is_empty()
        || allowed_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_ref()))
}

/// Whether `path` escapes its root: a `..` segment, an absolute path or a
/// Windows drive prefix
#[must_use]
pub fn escapes_root(path: &str) -> bool {
    path.starts_with('/')
        || path.starts_with('\\')
        || path.as_bytes().get(1) == Some(&b':')
        || path.split(['/', '\\']).any(|segment| segment == "..")
}

/// Prefix allow-list plus optional traversal hardening
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathPolicy {
    allowed_prefixes: Vec<String>,
    reject_escapes: bool,
}

impl PathPolicy {
    /// Policy over the given prefixes
    #[must_use]
    pub fn new(allowed_prefixes: Vec<String>) -> Self {
        Self {
            allowed_prefixes,
            reject_escapes: false,
        }
    }

    /// Also reject paths that escape their root, even if a prefix matches
    #[inline]
    #[must_use]
    pub fn with_reject_escapes(mut self, reject: bool) -> Self {
        self.reject_escapes = reject;
        self
    }

    /// Configured prefixes
    #[inline]
    #[must_use]
    pub fn allowed_prefixes(&self) -> &[String] {
        &self.allowed_prefixes
    }

    /// Prefix check only
    #[inline]
    #[must_use]
    pub fn is_allowed(&self, path: &str) -> bool {
        is_path_allowed(path, &self.allowed_prefixes)
    }

    /// Reason the path is rejected, if it is
    #[must_use]
    pub fn violation(&self, path: &str) -> Option<String> {
        if self.reject_escapes && escapes_root(path) {
            return Some(format!("path escapes project root: {path}"));
        }
        if !self.is_allowed(path) {
            return Some(format!(
                "path not allowed: {path} (allowed prefixes: {})",
                self.allowed_prefixes.join(", ")
            ));
        }
        None
    }
}
