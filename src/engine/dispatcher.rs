//! The per-build line dispatcher.
//!
//! One dispatcher drives one build invocation. Each incoming line is
//! normalized, classified against the registry (or against the block that is
//! currently open), and either emitted through the return value of
//! [`BlockDispatcher::process`] or suppressed. The dispatcher owns no sink
//! and performs no I/O.
//!
//! ## State machine
//!
//! ```text
//!             dispatch hit,                   end pattern hit
//!             not end-of-block   ┌──────────────────────────────┐
//!        ┌──────────────────────>│ Active(rule)                 │
//!  ┌─────┴─────┐                 │  same rule formats interior  │──┐
//!  │ Idle      │<────────────────│  and closing lines           │  │
//!  │ (no rule) │                 └──────────────────────────────┘  │
//!  └───────────┘                                                   │
//!        │  line contains the fatal marker (checked last)          │
//!        v                                                         v
//!  ┌───────────────────────────────────────────────────────────────┐
//!  │ done: every further line is dropped without evaluation        │
//!  └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Listener notification happens at block-open only, before the emission
//! decision for the opening line; a suppressed line can still fire its event.

use super::events::EventBroadcaster;
use super::normalize::PathNormalizer;
use super::registry::{RuleId, RuleRegistry};
use crate::ansi::Palette;

/// Substring whose appearance permanently halts processing for the build.
pub const FATAL_MARKER: &str = "BUILD FAILURE";

/// Stateful, single-pass dispatcher over one build's output lines.
///
/// Construct a fresh dispatcher per build invocation; the terminal `done`
/// flag and any open block must not leak into the next build.
#[derive(Debug)]
pub struct BlockDispatcher<'a> {
    registry: &'a RuleRegistry,
    broadcaster: EventBroadcaster,
    normalizer: PathNormalizer,
    palette: Palette,
    /// Rule governing the open block, if any. `None` is the Idle state.
    current: Option<RuleId>,
    done: bool,
}

impl<'a> BlockDispatcher<'a> {
    pub fn new(
        registry: &'a RuleRegistry,
        broadcaster: EventBroadcaster,
        normalizer: PathNormalizer,
        palette: Palette,
    ) -> Self {
        Self { registry, broadcaster, normalizer, palette, current: None, done: false }
    }

    /// Classify one line and return the zero-or-one line to emit for it.
    ///
    /// Lines matching no rule pass through verbatim (after path
    /// normalization); only an explicit rule can suppress output.
    pub fn process(&mut self, line: &str) -> Option<String> {
        if self.done {
            return None;
        }

        let line = self.normalizer.normalize(line);

        let emitted = match self.current {
            None => match self.registry.dispatch(&line) {
                Some((id, rule)) => {
                    // The event fires exactly once, at block-open, whether or
                    // not the opening line itself is printed.
                    self.broadcaster.notify(id, &line);
                    let emitted = (!rule.should_ignore(&line)).then(|| rule.format(&line, &self.palette));
                    if !rule.is_block_end(&line) {
                        self.current = Some(id);
                    }
                    emitted
                }
                None => Some(line.clone()),
            },
            Some(id) => {
                let rule = self.registry.get(id);
                let emitted = (!rule.should_ignore(&line)).then(|| rule.format(&line, &self.palette));
                if rule.is_block_end(&line) {
                    self.current = None;
                }
                emitted
            }
        };

        // Checked after the emission decision so the triggering line is still
        // emitted or suppressed normally.
        if line.contains(FATAL_MARKER) {
            self.done = true;
        }

        emitted
    }

    /// True once the fatal marker has been seen; all further lines are dropped.
    pub fn is_done(&self) -> bool {
        self.done
    }
}
