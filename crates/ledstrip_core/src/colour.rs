use crate::error::{Result, StripError};

/// The enumerated colour set the mock strip can express.
///
/// Commands carry one of these labels, or an empty payload meaning
/// "clear the display". Anything else is rejected at the parse boundary.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Colour {
    Grey,
    Red,
    Green,
    Yellow,
    Blue,
    Purple,
    White,
}

/// Canonical list of all recognised colours.
pub const ALL_COLOURS: [Colour; 7] = [
    Colour::Grey,
    Colour::Red,
    Colour::Green,
    Colour::Yellow,
    Colour::Blue,
    Colour::Purple,
    Colour::White,
];

impl Colour {
    /// Parse a command payload.
    ///
    /// - empty payload => `None` (clear-display sentinel)
    /// - recognised label => `Some(colour)`
    /// - anything else => `StripError::InvalidColour`; there is no default
    ///   branch, out-of-set labels never render.
    pub fn parse(label: &str) -> Result<Option<Colour>> {
        if label.is_empty() {
            return Ok(None);
        }
        let colour = match label {
            "grey" => Colour::Grey,
            "red" => Colour::Red,
            "green" => Colour::Green,
            "yellow" => Colour::Yellow,
            "blue" => Colour::Blue,
            "purple" => Colour::Purple,
            "white" => Colour::White,
            other => return Err(StripError::invalid_colour(other)),
        };
        Ok(Some(colour))
    }

    /// Stable, human-readable label (the wire form of the command).
    pub const fn label(self) -> &'static str {
        match self {
            Colour::Grey => "grey",
            Colour::Red => "red",
            Colour::Green => "green",
            Colour::Yellow => "yellow",
            Colour::Blue => "blue",
            Colour::Purple => "purple",
            Colour::White => "white",
        }
    }

    /// Shell escape prefix for the rendered block.
    ///
    /// Grey has no escape code of its own; it renders as dim white.
    pub const fn ansi_prefix(self) -> &'static str {
        match self {
            Colour::Grey => "\x1b[2m\x1b[37m",
            Colour::Red => "\x1b[31m",
            Colour::Green => "\x1b[32m",
            Colour::Yellow => "\x1b[33m",
            Colour::Blue => "\x1b[34m",
            Colour::Purple => "\x1b[35m",
            Colour::White => "\x1b[37m",
        }
    }
}
