// Fitting tabs into a single terminal line

/// A styled piece of the tab line and the columns it occupies.
#[derive(Debug, Clone, Default)]
pub struct LinePart {
    /// ANSI-styled text
    pub part: String,
    /// Width in terminal columns, escapes excluded
    pub len: usize,
    /// View this part belongs to; overflow markers point at the outermost view
    pub tab_index: Option<usize>,
}

// " <-+N " / " +N-> "
const MARKER_WIDTH: usize = 6;

/// Lay out tabs within `max_width` columns.
/// The active tab is always kept; neighbours are added outward from it, one
/// on each side per round, until the next one would not fit. Hidden tabs are
/// summarised by a marker at either end.
pub fn build_tab_line(tabs: Vec<LinePart>, active_idx: usize, max_width: usize) -> Vec<LinePart> {
    let total: usize = tabs.iter().map(|t| t.len).sum();
    if total <= max_width || tabs.is_empty() {
        return tabs;
    }

    let active_idx = active_idx.min(tabs.len() - 1);
    let budget = max_width.saturating_sub(MARKER_WIDTH * 2);

    // Visible range is first..last (exclusive)
    let mut first = active_idx;
    let mut last = active_idx + 1;
    let mut used = tabs[active_idx].len;
    let mut left_open = true;
    let mut right_open = true;

    while left_open || right_open {
        if left_open {
            match first.checked_sub(1) {
                Some(prev) if used + tabs[prev].len <= budget => {
                    used += tabs[prev].len;
                    first = prev;
                }
                _ => left_open = false,
            }
        }
        if right_open {
            if last < tabs.len() && used + tabs[last].len <= budget {
                used += tabs[last].len;
                last += 1;
            } else {
                right_open = false;
            }
        }
    }

    let hidden_left = first;
    let hidden_right = tabs.len() - last;
    let end = tabs.len() - 1;

    let mut line = Vec::with_capacity(last - first + 2);
    if hidden_left > 0 {
        line.push(marker(format!(" <-+{} ", hidden_left), 0));
    }
    line.extend(tabs.into_iter().skip(first).take(last - first));
    if hidden_right > 0 {
        line.push(marker(format!(" +{}-> ", hidden_right), end));
    }
    line
}

fn marker(text: String, tab_index: usize) -> LinePart {
    LinePart {
        len: text.len(),
        part: text,
        tab_index: Some(tab_index),
    }
}
