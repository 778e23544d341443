use std::fmt::Display;

const RESET: &str = "\x1b[0m";

/// Semantic colours used in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    /// Structural markup: `*`, `[]`, `map[`, indices.
    Red,
    /// Values.
    Green,
    /// Names.
    Yellow,
    /// Type identifiers.
    Blue,
    /// Placeholders and lengths.
    Grey,
}

impl Colour {
    fn code(self) -> &'static str {
        match self {
            Colour::Red => "\x1b[31m",
            Colour::Green => "\x1b[32m",
            Colour::Yellow => "\x1b[33m",
            Colour::Blue => "\x1b[34m",
            Colour::Grey => "\x1b[90m",
        }
    }
}

/// Helper for colouring text, a no-op when colour is disabled.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, colour: Colour, text: impl Display) -> String {
        if self.enabled {
            format!("{}{}{}", colour.code(), text, RESET)
        } else {
            text.to_string()
        }
    }
}

/// Helper for consistent indentation
#[derive(Debug, Clone, Copy)]
pub struct Indenter<'a> {
    tabstop: &'a str,
}

impl<'a> Indenter<'a> {
    pub fn new(tabstop: &'a str) -> Self {
        Self { tabstop }
    }

    pub fn indent_for_depth(&self, depth: usize) -> String {
        self.tabstop.repeat(depth)
    }

    pub fn indent(&self, text: &str, depth: usize) -> String {
        format!("{}{}", self.indent_for_depth(depth), text)
    }
}
