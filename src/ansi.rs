//! Terminal color escapes.
//!
//! The engine treats coloring as an opaque capability: a [`Palette`] wraps a
//! substring in start/reset escapes, or passes it through untouched when
//! coloring is disabled (piped output, `--no-color`).

pub const RESET: &str = "\x1b[0m";

const WHITE: &str = "\x1b[37m";
const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Named foreground colors available to rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Blue,
    Green,
    Yellow,
    Red,
    Cyan,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Color::White => WHITE,
            Color::Blue => BLUE,
            Color::Green => GREEN,
            Color::Yellow => YELLOW,
            Color::Red => RED,
            Color::Cyan => CYAN,
        }
    }
}

/// Applies colors, or nothing at all when disabled.
#[derive(Debug, Clone)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Wrap `s` in the escapes for `color`, or return it unchanged when the
    /// palette is disabled.
    pub fn paint(&self, s: impl AsRef<str>, color: Color) -> String {
        if self.enabled { format!("{}{}{}", color.code(), s.as_ref(), RESET) } else { s.as_ref().to_string() }
    }
}
