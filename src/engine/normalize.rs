//! Project-root path rewriting.
//!
//! Tool diagnostics embed absolute paths ("/home/dev/app/src/main/java/...")
//! on almost every interesting line. Rewriting the project-root prefix to a
//! short relative marker before any rule sees the line keeps both the rules
//! and the curated output free of that noise.

use std::path::Path;

/// The replacement written over the project-root prefix.
const MARKER: &str = ".";

/// Rewrites absolute project paths in a line to a relative marker.
///
/// Pure, stateless string substitution. Normalization is idempotent: the
/// marker never re-expands into the root, so applying it twice is the same as
/// applying it once.
#[derive(Debug, Clone)]
pub struct PathNormalizer {
    root: String,
}

impl PathNormalizer {
    /// Normalizer for the project rooted at `root`.
    ///
    /// Only an absolute root enables substitution; a relative or empty root
    /// produces a pass-through normalizer, since replacing a short relative
    /// prefix would mangle unrelated text.
    pub fn new(root: &Path) -> Self {
        let root = if root.is_absolute() {
            root.to_string_lossy().trim_end_matches(std::path::MAIN_SEPARATOR).to_string()
        } else {
            String::new()
        };
        Self { root }
    }

    /// Pass-through normalizer used when no project root is known.
    pub fn none() -> Self {
        Self { root: String::new() }
    }

    /// Replace every occurrence of the project-root prefix in `line`.
    pub fn normalize(&self, line: &str) -> String {
        if self.root.is_empty() || !line.contains(&self.root) {
            return line.to_string();
        }
        line.replace(&self.root, MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> PathNormalizer {
        PathNormalizer::new(Path::new("/home/dev/app"))
    }

    #[test]
    fn rewrites_the_root_prefix() {
        let n = normalizer();

        assert_eq!(
            n.normalize("[ERROR] /home/dev/app/src/main/java/App.java:[4,8] cannot find symbol"),
            "[ERROR] ./src/main/java/App.java:[4,8] cannot find symbol"
        );
    }

    #[test]
    fn rewrites_every_occurrence() {
        let n = normalizer();

        assert_eq!(n.normalize("/home/dev/app/a.java and /home/dev/app/b.java"), "./a.java and ./b.java");
    }

    #[test]
    fn normalization_is_idempotent() {
        let n = normalizer();
        let line = "[ERROR] /home/dev/app/src/App.java: bad";

        let once = n.normalize(line);
        assert_eq!(n.normalize(&once), once);
    }

    #[test]
    fn trailing_separator_on_the_root_is_not_significant() {
        let with = PathNormalizer::new(Path::new("/home/dev/app/"));
        let without = PathNormalizer::new(Path::new("/home/dev/app"));
        let line = "/home/dev/app/src/App.java";

        assert_eq!(with.normalize(line), without.normalize(line));
    }

    #[test]
    fn relative_root_is_pass_through() {
        let n = PathNormalizer::new(Path::new("app"));

        assert_eq!(n.normalize("app/src/App.java"), "app/src/App.java");
    }

    #[test]
    fn lines_without_the_root_are_untouched() {
        let n = normalizer();

        assert_eq!(n.normalize("[INFO] BUILD SUCCESS"), "[INFO] BUILD SUCCESS");
    }
}
