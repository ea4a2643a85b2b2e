/// Lazily compiled regex for a pattern known good at compile time.
///
/// Only for literal patterns owned by this crate; anything configurable goes
/// through the fallible [`crate::Rule`] constructors instead.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
