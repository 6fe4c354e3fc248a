//! Pagination arithmetic (pure).
//!
//! Offsets, page counts and the compact page-number sequence rendered
//! under the results table.

/// Fixed page size for every hit search.
pub const ROWS_PER_PAGE: u32 = 10;

/// Pages always listed literally at the start of the sequence.
pub const LEADING_PAGES: u32 = 7;

/// Neighborhood around the current page that is always listed.
pub const DELTA: u32 = 2;

/// One element of the compact page sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A clickable page number (1-based).
    Page(u32),
    /// A collapsed run of omitted pages.
    Ellipsis,
}

/// `ceil(total_rows / ROWS_PER_PAGE)`. Zero rows means zero pages.
pub fn total_pages(total_rows: u64) -> u32 {
    let pages = total_rows.div_ceil(u64::from(ROWS_PER_PAGE));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Zero-based row offset of the first hit on `page`.
///
/// Page 0 is treated as page 1.
pub fn offset(page: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(ROWS_PER_PAGE)
}

/// Compact page-number sequence for the pagination bar.
///
/// Candidates are pages `1..=min(total_pages, 7)`, the last page and the
/// pages within [`DELTA`] of `current_page`. A gap of exactly 2 between
/// consecutive candidates is filled with the skipped page; any wider gap
/// collapses into one [`PageItem::Ellipsis`].
pub fn page_numbers(total_pages: u32, current_page: u32) -> Vec<PageItem> {
    if total_pages == 0 {
        return Vec::new();
    }

    let current = current_page.clamp(1, total_pages);
    let mut candidates: Vec<u32> = (1..=total_pages.min(LEADING_PAGES)).collect();
    candidates.push(total_pages);
    let window_start = current.saturating_sub(DELTA).max(1);
    let window_end = current.saturating_add(DELTA).min(total_pages);
    candidates.extend(window_start..=window_end);
    candidates.sort_unstable();
    candidates.dedup();

    let mut items = Vec::with_capacity(candidates.len() + 2);
    let mut previous: Option<u32> = None;
    for page in candidates {
        if let Some(prev) = previous {
            match page - prev {
                1 => {}
                2 => items.push(PageItem::Page(prev + 1)),
                _ => items.push(PageItem::Ellipsis),
            }
        }
        items.push(PageItem::Page(page));
        previous = Some(page);
    }
    items
}

/// 1-based inclusive bounds of the rows shown on `page`, for
/// "Showing a - b of N results". `None` when the page holds no rows.
pub fn visible_range(page: u32, total_rows: u64) -> Option<(u64, u64)> {
    let first = offset(page) + 1;
    if total_rows == 0 || first > total_rows {
        return None;
    }
    let last = (offset(page) + u64::from(ROWS_PER_PAGE)).min(total_rows);
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(95), 10);
    }

    #[test]
    fn offset_of_page_three_is_twenty() {
        assert_eq!(offset(3), 20);
    }

    #[test]
    fn offset_treats_page_zero_as_first() {
        assert_eq!(offset(0), 0);
        assert_eq!(offset(1), 0);
    }

    #[test]
    fn zero_pages_yield_empty_sequence() {
        assert!(page_numbers(0, 1).is_empty());
    }

    #[test]
    fn few_pages_are_listed_literally() {
        assert_eq!(page_numbers(3, 1), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn ninety_five_rows_collapse_gap_before_last_page() {
        let pages = page_numbers(total_pages(95), 1);
        assert_eq!(
            pages,
            vec![
                Page(1),
                Page(2),
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10),
            ]
        );
    }

    #[test]
    fn gap_of_two_inserts_skipped_page() {
        // 7 -> 9 differs by exactly 2, so 8 is listed instead of an ellipsis.
        let pages = page_numbers(9, 1);
        assert_eq!(pages, (1..=9).map(Page).collect::<Vec<_>>());
    }

    #[test]
    fn current_page_neighborhood_is_listed() {
        let pages = page_numbers(20, 12);
        assert_eq!(
            pages,
            vec![
                Page(1),
                Page(2),
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10),
                Page(11),
                Page(12),
                Page(13),
                Page(14),
                Ellipsis,
                Page(20),
            ]
        );
    }

    #[test]
    fn current_page_out_of_range_is_clamped() {
        assert_eq!(page_numbers(3, 99), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn visible_range_for_last_partial_page() {
        assert_eq!(visible_range(10, 95), Some((91, 95)));
        assert_eq!(visible_range(1, 95), Some((1, 10)));
    }

    #[test]
    fn visible_range_empty_when_no_rows() {
        assert_eq!(visible_range(1, 0), None);
        assert_eq!(visible_range(11, 95), None);
    }
}
