//! Line classification and emission engine.
//!
//! This module is the public entry point for the curation engine. Processing a
//! build's output is a single forward pass over its lines:
//!
//! ```text
//! raw line
//!    │
//!    v
//! PathNormalizer::normalize      (normalize.rs)  absolute paths -> "."
//!    │
//!    v
//! BlockDispatcher::process       (dispatcher.rs) Idle / Active(rule) / done
//!    ├─ RuleRegistry::dispatch   (registry.rs)   first-match, priority order
//!    ├─ EventBroadcaster::notify (events.rs)     listeners fire at block-open
//!    └─ emit rule.format(line) or suppress
//! ```
//!
//! ## Responsibilities by module
//!
//! - `registry.rs`: the ordered rule table and first-match dispatch.
//! - `dispatcher.rs`: the per-build state machine; decides emission vs.
//!   suppression and stops for good at the fatal marker.
//! - `events.rs`: per-rule listener registration and synchronous delivery.
//! - `normalize.rs`: project-root path rewriting, applied before any rule
//!   sees a line.
//!
//! ## Invariants
//!
//! - At most one rule is current at a time; nested blocks are not
//!   representable.
//! - A dispatcher is built fresh per build invocation and never reused: the
//!   terminal `done` flag and any open block die with the invocation.
//! - The dispatcher performs no I/O; callers write emitted lines to the sink.

mod dispatcher;
mod events;
mod normalize;
mod registry;

pub use dispatcher::{BlockDispatcher, FATAL_MARKER};
pub use events::EventBroadcaster;
pub use normalize::PathNormalizer;
pub use registry::{RuleId, RuleRegistry};
