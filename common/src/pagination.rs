//! Ellipsis-compressed page window for result navigation.

use serde::{Deserialize, Serialize};

use crate::search_const::PAGINATION_WINDOW_RADIUS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLink {
    Page(u64),
    Ellipsis,
}

/// `ceil(total_count / page_size)`, never less than 1.
pub fn total_pages(page_size: u64, total_count: u64) -> u64 {
    let page_size = page_size.max(1);
    total_count.div_ceil(page_size).max(1)
}

/// Pages to show around `current_page`: the first, the last, and every page within
/// two of the current one, with one ellipsis wherever consecutive entries skip pages.
pub fn pagination_window(current_page: u64, page_size: u64, total_count: u64) -> Vec<PageLink> {
    let last = total_pages(page_size, total_count);
    if last <= 1 {
        return vec![PageLink::Page(1)];
    }

    let mut pages = Vec::with_capacity(2 * PAGINATION_WINDOW_RADIUS as usize + 3);
    pages.push(1);
    let near_start = current_page.saturating_sub(PAGINATION_WINDOW_RADIUS).max(2);
    let near_end = current_page.saturating_add(PAGINATION_WINDOW_RADIUS).min(last - 1);
    if near_start <= near_end {
        pages.extend(near_start..=near_end);
    }
    pages.push(last);

    let mut window = Vec::with_capacity(pages.len() * 2);
    let mut previous = None;
    for page in pages {
        if let Some(previous) = previous {
            if page != previous + 1 {
                window.push(PageLink::Ellipsis);
            }
        }
        window.push(PageLink::Page(page));
        previous = Some(page);
    }
    window
}

/// Renders a window as text, with the current page in brackets: `1 … 4 [5] 6 … 20`.
pub fn render_window(window: &[PageLink], current_page: u64) -> String {
    window
        .iter()
        .map(|link| match link {
            PageLink::Page(page) if *page == current_page => format!("[{page}]"),
            PageLink::Page(page) => page.to_string(),
            PageLink::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
