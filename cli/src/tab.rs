// Individual tab rendering with ANSI colours

use ansi_term::{Colour, Style};
use unicode_width::UnicodeWidthStr;
use view_tabs::RenderedTab;

use crate::line::LinePart;

/// Render a single tab as a LinePart, picking the label for its state and
/// painting the background with the tab colour when one is set.
pub fn render_tab(index: usize, is_active: bool, tab: &RenderedTab) -> LinePart {
    let label = if is_active {
        &tab.active_label
    } else {
        &tab.inactive_label
    };

    let tab_text = format!(" {} ", label);
    let len = UnicodeWidthStr::width(tab_text.as_str());

    let mut style = match parse_hex_colour(&tab.colour) {
        Some(background) => Style::new().on(background).fg(Colour::Black),
        None => Style::new(),
    };
    if is_active {
        style = style.bold().underline();
    }

    LinePart {
        part: style.paint(tab_text).to_string(),
        len,
        tab_index: Some(index),
    }
}

/// `"ff0000"` or `"#ff0000"` to an RGB colour. Anything else means no colour.
pub fn parse_hex_colour(colour: &str) -> Option<Colour> {
    let hex = colour.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Colour::RGB(channel(0)?, channel(2)?, channel(4)?))
}
