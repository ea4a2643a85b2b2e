//! The ordered rule table and first-match dispatch.

use crate::Rule;

/// Rule identifier (index into the registry's rule vector).
///
/// Listener registration and the dispatcher's notion of the current rule are
/// both keyed by `RuleId`, so the same rule instance governs a block from its
/// opening line to its closing line.
pub type RuleId = usize;

/// Fixed, ordered collection of rules.
///
/// Order is fixed at construction and encodes priority: [`RuleRegistry::dispatch`]
/// returns the first rule whose start condition matches, so earlier rules win
/// every tie.
#[derive(Debug)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// First rule, in registration order, that interprets `line` as the start
    /// of its block. `None` when nothing matches and the line should pass
    /// through untouched.
    pub fn dispatch(&self, line: &str) -> Option<(RuleId, &Rule)> {
        self.rules.iter().enumerate().find(|(_, rule)| rule.is_block_start(line))
    }

    /// Look up a rule by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this registry.
    pub fn get(&self, id: RuleId) -> &Rule {
        &self.rules[id]
    }

    /// Id of the first rule satisfying `pred`, in registration order.
    pub fn find(&self, pred: impl Fn(&Rule) -> bool) -> Option<RuleId> {
        self.rules.iter().position(pred)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
