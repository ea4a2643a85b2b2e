//! Per-rule listener registration and synchronous delivery.
//!
//! Some rules mark interesting moments in a build's life (a failed test
//! block, a compile error). Collaborators register a listener against a
//! specific rule instance; the dispatcher notifies it exactly once per block,
//! at the line that opened the block, before the emission decision for that
//! line. Delivery is a plain synchronous call-through on the processing
//! thread: no buffering, no reordering.

use super::registry::RuleId;
use std::collections::HashMap;
use std::fmt;

type Listener = Box<dyn FnMut(&str)>;

/// Routes block-open events to the listeners of the rule that fired.
#[derive(Default)]
pub struct EventBroadcaster {
    listeners: HashMap<RuleId, Vec<Listener>>,
}

impl fmt::Debug for EventBroadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBroadcaster").field("rules", &self.listeners.len()).finish_non_exhaustive()
    }
}

impl EventBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `listener` to the rule identified by `rule`.
    ///
    /// Registration is per rule instance, not global; a rule may carry any
    /// number of listeners, including none.
    pub fn register(&mut self, rule: RuleId, listener: impl FnMut(&str) + 'static) {
        self.listeners.entry(rule).or_default().push(Box::new(listener));
    }

    /// Deliver `line` to every listener of `rule`, in registration order.
    pub fn notify(&mut self, rule: RuleId, line: &str) {
        if let Some(listeners) = self.listeners.get_mut(&rule) {
            for listener in listeners {
                listener(line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notify_reaches_only_the_targeted_rule() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut broadcaster = EventBroadcaster::new();

        let sink = Rc::clone(&seen);
        broadcaster.register(0, move |line| sink.borrow_mut().push(format!("a:{line}")));
        let sink = Rc::clone(&seen);
        broadcaster.register(1, move |line| sink.borrow_mut().push(format!("b:{line}")));

        broadcaster.notify(0, "Results :");
        broadcaster.notify(2, "nobody listens here");

        assert_eq!(*seen.borrow(), vec!["a:Results :".to_string()]);
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut broadcaster = EventBroadcaster::new();

        for tag in ["first", "second", "third"] {
            let sink = Rc::clone(&seen);
            broadcaster.register(0, move |_| sink.borrow_mut().push(tag));
        }

        broadcaster.notify(0, "line");

        assert_eq!(*seen.borrow(), vec!["first", "second", "third"]);
    }
}
