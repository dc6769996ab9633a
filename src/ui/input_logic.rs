use core::ops::Range;

/// Move selection cursor one item up, stopping at the first item.
pub fn select_prev(selected: usize) -> usize {
    selected.saturating_sub(1)
}

/// Move selection cursor one item down if another item exists.
pub fn select_next(selected: usize, item_count: usize) -> usize {
    if selected + 1 < item_count {
        selected + 1
    } else {
        selected
    }
}

/// Clamp a remembered cursor into a list of `item_count` entries.
pub fn clamp_selection(selected: usize, item_count: usize) -> usize {
    selected.min(item_count.saturating_sub(1))
}

/// Indices of the `window` consecutive rows to draw, centred on the
/// selection and pushed back inside `0..item_count` at either end.
pub fn visible_window(selected: usize, item_count: usize, window: usize) -> Range<usize> {
    let window = window.min(item_count);
    let start = selected
        .saturating_sub(window / 2)
        .min(item_count - window);
    start..start + window
}
