//! Pure renderer: colour label -> decorative text block.
//!
//! No state, no side effects. The service layer decides when the result is
//! actually worth publishing.

use crate::colour::Colour;

const PATTERN: &str = "*";
/// Total width of the rendered block.
const PATTERN_WIDTH: usize = 60;
/// Space between the pattern and the centred label.
const PATTERN_NAME_SPACING: usize = 4;

const BLINK: &str = "\x1b[5m";
const RESET: &str = "\x1b[0m";

/// Render the strip state for a colour command.
///
/// `None` (clear display) renders as the empty string, the idle state.
/// A colour renders as a fixed-width banner with the colour name centred,
/// wrapped in the colour's shell escape pair so a terminal feed shows the
/// strip "lit up".
pub fn render(colour: Option<Colour>) -> String {
    let Some(colour) = colour else {
        return String::new();
    };

    let block = display_block(PATTERN_WIDTH, colour.label());
    format!("{}{BLINK}{block}{RESET}", colour.ansi_prefix())
}

/// Lay out the banner: a full-width rule above and below, and a middle line
/// with the label centred between two pattern runs.
fn display_block(width: usize, label: &str) -> String {
    let label = label.replace('_', " ");

    let top_bottom = PATTERN.repeat(width / PATTERN.len());

    // Pattern run on either side of the label, after reserving the spacing.
    let mid_pattern_space = width.saturating_sub(label.len() + PATTERN_NAME_SPACING * 2) / 2;
    let mid = PATTERN.repeat(mid_pattern_space / PATTERN.len());

    // Runs rarely fill the width exactly; the leftover space is split, with
    // an odd remainder going to the right side.
    let mid_len = mid.len() * 2 + PATTERN_NAME_SPACING * 2 + label.len();
    let extra_space = width.saturating_sub(mid_len);
    let extra_left_space = extra_space / 2;
    let extra_right_space = extra_space - extra_left_space;

    let left = format!(
        "{mid}{}",
        " ".repeat(PATTERN_NAME_SPACING + extra_left_space)
    );
    let right = format!(
        "{}{mid}",
        " ".repeat(PATTERN_NAME_SPACING + extra_right_space)
    );

    format!("\n{top_bottom}\n{left}{label}{right}\n{top_bottom}")
}
