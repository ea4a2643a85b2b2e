//! mvnwatch turns the raw output of a Maven build into a curated stream:
//! noisy lines are suppressed, meaningful lines are reduced to their essential
//! content and recolored, and interesting events (such as a failed test block)
//! are surfaced to registered listeners without blocking the output path.
//!
//! The crate is organized around a single-pass line pipeline:
//!
//! ```text
//! watch (notify) ── change ──> maven::run ── raw line ──┐
//!                                                       v
//!                                     BlockDispatcher::process
//!                                       - PathNormalizer      (engine/normalize.rs)
//!                                       - RuleRegistry lookup (engine/registry.rs)
//!                                       - listener events     (engine/events.rs)
//!                                       - emit / suppress
//!                                                       │
//!                                                       v
//!                                         Option<String> -> stdout
//! ```
//!
//! [`Rule`] is the unit of classification; the ordered default table for Maven
//! output lives in [`rules::maven`]. Everything that mutates per-build state is
//! constructed fresh for every build invocation.

#[macro_use]
mod macros;

pub mod ansi;
pub mod config;
pub mod engine;
pub mod job;
pub mod logging;
pub mod maven;
pub mod rules;
pub mod watch;

pub use ansi::{Color, Palette};
pub use config::{Config, ConfigError};
pub use engine::{BlockDispatcher, EventBroadcaster, FATAL_MARKER, PathNormalizer, RuleId, RuleRegistry};
pub use job::Job;

use regex::Regex;
use thiserror::Error;

// --- Rules ------------------------------------------------------------------

/// Error raised while building a rule.
///
/// Rule construction is the only fallible step of the pipeline: a broken
/// pattern must refuse to run before the first line is processed, so every
/// constructor that compiles a regex returns this error instead of deferring
/// the failure into line dispatch.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The pattern is not valid regex syntax.
    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A coloring pattern has no capture group to extract the displayed text.
    #[error("pattern {pattern:?} has no capture group to extract the displayed text")]
    MissingCaptureGroup { pattern: String },
}

/// A classification rule for one line category of build output.
///
/// Rules are immutable once built. A rule recognizes the start and end of the
/// block it governs, decides whether a line inside its block is printed at
/// all, and reformats the lines that are printed. Single-line variants treat
/// every line as both start and end of a one-line block.
///
/// The variant set is closed on purpose: the dispatcher relies on exhaustive
/// matching over these capabilities.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Suppress any line containing a fixed substring.
    IgnoreContaining { text: String },

    /// Suppress any line matching a pattern.
    IgnoreMatching { pattern: Regex },

    /// Reduce a matching line to its first capture group, in `color`.
    SingleLine { color: Color, pattern: Regex },

    /// Govern a block spanning from a line matching `start` to a line
    /// matching `end`. Lines of the block that `start` matches are reduced to
    /// its first capture group in `color`; other lines pass through, except
    /// blank lines, which are dropped.
    MultiLine { color: Color, start: Regex, end: Regex },
}

impl Rule {
    /// Rule that suppresses every line containing `text`.
    pub fn ignore_containing(text: impl Into<String>) -> Rule {
        Rule::IgnoreContaining { text: text.into() }
    }

    /// Rule that suppresses every line matching `pattern`.
    pub fn ignore_matching(pattern: &str) -> Result<Rule, RuleError> {
        Ok(Rule::IgnoreMatching { pattern: compile(pattern)? })
    }

    /// Rule that reduces a matching line to its first capture group in `color`.
    pub fn single_line(color: Color, pattern: &str) -> Result<Rule, RuleError> {
        Ok(Rule::SingleLine { color, pattern: compile_colored(pattern)? })
    }

    /// Rule governing a multi-line block delimited by `start` and `end`.
    pub fn multi_line(color: Color, start: &str, end: &str) -> Result<Rule, RuleError> {
        Ok(Rule::MultiLine { color, start: compile_colored(start)?, end: compile(end)? })
    }

    /// Short name of the rule variant, used in listener diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::IgnoreContaining { .. } => "ignore-containing",
            Rule::IgnoreMatching { .. } => "ignore-matching",
            Rule::SingleLine { .. } => "single-line",
            Rule::MultiLine { .. } => "multi-line",
        }
    }

    /// Does this rule interpret `line` as opening its block?
    pub fn is_block_start(&self, line: &str) -> bool {
        match self {
            Rule::IgnoreContaining { text } => line.contains(text.as_str()),
            Rule::IgnoreMatching { pattern } => pattern.is_match(line),
            Rule::SingleLine { pattern, .. } => pattern.is_match(line),
            Rule::MultiLine { start, .. } => start.is_match(line),
        }
    }

    /// Does this rule interpret `line` as closing its block?
    ///
    /// Single-line variants close on the same line that opened them, so this
    /// is unconditionally true for everything but [`Rule::MultiLine`].
    pub fn is_block_end(&self, line: &str) -> bool {
        match self {
            Rule::MultiLine { end, .. } => end.is_match(line),
            _ => true,
        }
    }

    /// Should `line` be dropped from the output while this rule is current?
    pub fn should_ignore(&self, line: &str) -> bool {
        match self {
            Rule::IgnoreContaining { .. } | Rule::IgnoreMatching { .. } => true,
            Rule::SingleLine { .. } => false,
            Rule::MultiLine { .. } => line.trim().is_empty(),
        }
    }

    /// Reformat `line` for emission.
    ///
    /// Coloring variants re-run their pattern here rather than caching the
    /// match from [`Rule::is_block_start`]; interior lines of a multi-line
    /// block fall through unchanged because the start pattern does not match
    /// them.
    pub fn format(&self, line: &str, palette: &Palette) -> String {
        match self {
            Rule::IgnoreContaining { .. } | Rule::IgnoreMatching { .. } => line.to_string(),
            Rule::SingleLine { color, pattern } => extract(pattern, line, *color, palette),
            Rule::MultiLine { color, start, .. } => extract(start, line, *color, palette),
        }
    }
}

fn compile(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|source| RuleError::Pattern { pattern: pattern.to_string(), source })
}

/// Compile a pattern whose first capture group will be displayed.
fn compile_colored(pattern: &str) -> Result<Regex, RuleError> {
    let re = compile(pattern)?;
    // captures_len counts the implicit whole-match group.
    if re.captures_len() < 2 {
        return Err(RuleError::MissingCaptureGroup { pattern: pattern.to_string() });
    }
    Ok(re)
}

/// First capture group of `pattern` in `line`, painted in `color`; the line
/// unchanged when the pattern (or its group) does not participate in a match.
fn extract(pattern: &Regex, line: &str, color: Color, palette: &Palette) -> String {
    match pattern.captures(line).and_then(|caps| caps.get(1)) {
        Some(group) => palette.paint(group.as_str(), color),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Palette {
        Palette::new(false)
    }

    #[test]
    fn ignore_containing_capabilities() {
        let rule = Rule::ignore_containing("Total time:");

        assert!(rule.is_block_start("Total time: 12s"));
        assert!(!rule.is_block_start("Total: 12s"));
        assert!(rule.is_block_end("anything"));
        assert!(rule.should_ignore("Total time: 12s"));
        assert_eq!(rule.format("Total time: 12s", &plain()), "Total time: 12s");
    }

    #[test]
    fn ignore_matching_capabilities() {
        let rule = Rule::ignore_matching(r"^\[INFO\]\s*$").unwrap();

        assert!(rule.is_block_start("[INFO]"));
        assert!(rule.is_block_start("[INFO]   "));
        assert!(!rule.is_block_start("[INFO] Building app"));
        assert!(rule.is_block_end("anything"));
        assert!(rule.should_ignore("[INFO]"));
    }

    #[test]
    fn single_line_formats_first_capture_group() {
        let rule = Rule::single_line(Color::Green, r"(BUILD SUCCESS)").unwrap();

        assert!(rule.is_block_start("[INFO] BUILD SUCCESS"));
        assert!(rule.is_block_end("[INFO] BUILD SUCCESS"));
        assert!(!rule.should_ignore("[INFO] BUILD SUCCESS"));
        assert_eq!(rule.format("[INFO] BUILD SUCCESS", &plain()), "BUILD SUCCESS");
    }

    #[test]
    fn single_line_colorizes_when_palette_enabled() {
        let rule = Rule::single_line(Color::Green, r"(BUILD SUCCESS)").unwrap();
        let painted = rule.format("[INFO] BUILD SUCCESS", &Palette::new(true));

        assert_eq!(painted, "\x1b[32mBUILD SUCCESS\x1b[0m");
    }

    #[test]
    fn single_line_falls_through_when_pattern_misses() {
        let rule = Rule::single_line(Color::Red, r"\[ERROR\] (.*)").unwrap();

        assert_eq!(rule.format("no error here", &plain()), "no error here");
    }

    #[test]
    fn multi_line_capabilities() {
        let rule = Rule::multi_line(Color::Blue, r"(Results :.*)", r"(Tests run:.*)").unwrap();

        assert!(rule.is_block_start("Results :"));
        assert!(!rule.is_block_end("Results :"));
        assert!(rule.is_block_end("Tests run: 1, Failures: 0, Errors: 1, Skipped: 0"));
        assert!(rule.should_ignore("   "));
        assert!(!rule.should_ignore("Tests in error:"));
        // Interior lines fall through unchanged; the opener is reduced to its group.
        assert_eq!(rule.format("Results :", &plain()), "Results :");
        assert_eq!(rule.format("Tests in error:", &plain()), "Tests in error:");
    }

    #[test]
    fn invalid_pattern_is_rejected_at_construction() {
        assert!(matches!(Rule::ignore_matching("(unclosed"), Err(RuleError::Pattern { .. })));
        assert!(matches!(Rule::single_line(Color::Red, "(unclosed"), Err(RuleError::Pattern { .. })));
        assert!(matches!(Rule::multi_line(Color::Red, "(a)", "(unclosed"), Err(RuleError::Pattern { .. })));
    }

    #[test]
    fn coloring_pattern_without_group_is_rejected() {
        assert!(matches!(
            Rule::single_line(Color::Green, "BUILD SUCCESS"),
            Err(RuleError::MissingCaptureGroup { .. })
        ));
        assert!(matches!(
            Rule::multi_line(Color::Blue, "Results :", "Tests run:"),
            Err(RuleError::MissingCaptureGroup { .. })
        ));
    }

    #[test]
    fn group_may_not_participate_in_every_match() {
        // The group exists but does not participate when the alternation takes
        // the second branch; format must fall back to the raw line.
        let rule = Rule::single_line(Color::Yellow, r"(alpha)|beta").unwrap();

        assert!(rule.is_block_start("beta"));
        assert_eq!(rule.format("beta", &plain()), "beta");
        assert_eq!(rule.format("alpha", &plain()), "alpha");
    }
}
