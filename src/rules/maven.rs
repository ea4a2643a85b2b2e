//! The default rule table for Maven 3 output.
//!
//! The table is hard-coded, not loaded from a file; its order is the priority
//! order the registry dispatches in. Broad strokes, top to bottom:
//!
//! 1. drop the bookkeeping noise (timings, memory, artifact downloads,
//!    separators, blank INFO lines),
//! 2. shrink the build verdict to the two words that matter,
//! 3. keep the surefire results block intact for failed-test reporting,
//! 4. recolor module headers, errors and warnings.

use crate::{Color, Rule, RuleError};

/// Build the table.
///
/// Fails when a pattern is broken, which refuses the whole run before the
/// first line is processed.
pub fn rules() -> Result<Vec<Rule>, RuleError> {
    Ok(vec![
        Rule::ignore_containing("Total time:"),
        Rule::ignore_containing("Finished at:"),
        Rule::ignore_containing("Final Memory:"),
        Rule::ignore_containing("Downloading from"),
        Rule::ignore_containing("Downloaded from"),
        Rule::ignore_containing("Scanning for projects"),
        Rule::ignore_matching(r"^\[INFO\] -+$")?,
        Rule::ignore_matching(r"^\[INFO\]\s*$")?,
        Rule::single_line(Color::Green, r"(BUILD SUCCESS)")?,
        Rule::single_line(Color::Red, r"(BUILD FAILURE)")?,
        // The failed-test results block; collaborators listen on this rule.
        Rule::multi_line(Color::Blue, r"(Results :.*)", r"(Tests run:.*)")?,
        Rule::single_line(Color::Cyan, r"\[INFO\] Building (.+)")?,
        Rule::single_line(Color::Red, r"^\[ERROR\] (.*)")?,
        Rule::single_line(Color::Yellow, r"^\[WARNING\] (.*)")?,
    ])
}
