//! Page-window pagination: first, last and a window around the current
//! page, with one ellipsis per collapsed gap.

use std::collections::BTreeSet;

use contracts::shared::page::PageEnvelope;

/// Pages kept on each side of the current page
pub const PAGE_WINDOW_DELTA: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

impl PageItem {
    pub fn page(&self) -> Option<usize> {
        match self {
            PageItem::Page(p) => Some(*p),
            PageItem::Ellipsis => None,
        }
    }
}

/// Builds the condensed page list.
///
/// Keeps page 1, `total_pages` and every page within [`PAGE_WINDOW_DELTA`]
/// of `current_page`. Inputs are not validated: a `current_page` outside
/// `1..=total_pages` still yields a sorted list without panicking.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageItem> {
    let last = total_pages.max(1);
    let mut kept = BTreeSet::new();
    kept.insert(1);
    kept.insert(last);

    let from = current_page.saturating_sub(PAGE_WINDOW_DELTA).max(1);
    let to = current_page.saturating_add(PAGE_WINDOW_DELTA).min(last);
    for page in from..=to {
        kept.insert(page);
    }

    let mut items = Vec::with_capacity(kept.len() + 2);
    let mut previous: Option<usize> = None;
    for page in kept {
        if let Some(prev) = previous {
            if page - prev > 1 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.push(PageItem::Page(page));
        previous = Some(page);
    }
    items
}

/// Paging numbers of the current view. `current_page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
}

impl PageInfo {
    /// `requested_page` stands in when the envelope does not echo its page
    pub fn from_envelope<T>(envelope: &PageEnvelope<T>, requested_page: usize) -> Self {
        let requested = u32::try_from(requested_page).unwrap_or(u32::MAX);
        Self {
            current_page: envelope.current_page(requested) as usize,
            total_pages: envelope.pages as usize,
            total_items: usize::try_from(envelope.total).unwrap_or(usize::MAX),
            items_per_page: envelope.per_page as usize,
        }
    }

    /// The strip is only worth showing when there is somewhere to go
    pub fn has_multiple_pages(&self) -> bool {
        self.total_pages > 1
    }

    /// Previous is disabled exactly on page 1
    pub fn can_go_previous(&self) -> bool {
        self.current_page != 1
    }

    /// Next is disabled exactly on the last page
    pub fn can_go_next(&self) -> bool {
        self.current_page != self.total_pages
    }

    pub fn previous_page(&self) -> usize {
        self.current_page.saturating_sub(1)
    }

    pub fn next_page(&self) -> usize {
        self.current_page.saturating_add(1)
    }

    /// 1-based inclusive range of items on the current page, `(0, 0)` if none
    pub fn item_range(&self) -> (usize, usize) {
        if self.total_items == 0 || self.current_page == 0 {
            return (0, 0);
        }
        let start = (self.current_page - 1)
            .saturating_mul(self.items_per_page)
            .saturating_add(1);
        let end = self
            .current_page
            .saturating_mul(self.items_per_page)
            .min(self.total_items);
        (start.min(end), end)
    }

    pub fn window(&self) -> Vec<PageItem> {
        page_window(self.current_page, self.total_pages)
    }
}

/// Routes a click on a page-list item. Ellipses are inert; any page button,
/// the active one included, emits its number exactly once.
pub fn dispatch_page_click(item: PageItem, emit: impl FnOnce(usize)) {
    if let Some(page) = item.page() {
        emit(page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn test_window_in_the_middle() {
        assert_eq!(
            page_window(5, 10),
            vec![
                Page(1),
                Ellipsis,
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10)
            ]
        );
    }

    #[test]
    fn test_window_small_total_has_no_ellipsis() {
        assert_eq!(page_window(1, 3), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn test_window_at_edges() {
        assert_eq!(
            page_window(1, 10),
            vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_window(10, 10),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_single_ellipsis_regardless_of_gap_size() {
        let items = page_window(500, 1000);
        let ellipses = items.iter().filter(|i| **i == Ellipsis).count();
        assert_eq!(ellipses, 2);
        assert_eq!(items.len(), 9);
    }

    #[test]
    fn test_gap_of_exactly_one_page_is_not_collapsed() {
        // window 2..=6 reaches both ends
        assert_eq!(
            page_window(4, 7),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn test_malformed_input_does_not_panic() {
        assert_eq!(page_window(0, 0), vec![Page(1)]);
        assert_eq!(page_window(9, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_window(usize::MAX, 2), vec![Page(1), Page(2)]);
    }

    #[test]
    fn test_prev_next_boundaries() {
        let mut info = PageInfo {
            current_page: 1,
            total_pages: 4,
            total_items: 80,
            items_per_page: 20,
        };
        assert!(!info.can_go_previous());
        assert!(info.can_go_next());

        info.current_page = 4;
        assert!(info.can_go_previous());
        assert!(!info.can_go_next());

        info.current_page = 2;
        assert!(info.can_go_previous());
        assert!(info.can_go_next());
    }

    #[test]
    fn test_item_range() {
        let info = PageInfo {
            current_page: 3,
            total_pages: 3,
            total_items: 45,
            items_per_page: 20,
        };
        assert_eq!(info.item_range(), (41, 45));
        assert_eq!(PageInfo::default().item_range(), (0, 0));
    }

    #[test]
    fn test_from_envelope() {
        let env: PageEnvelope<()> = PageEnvelope {
            items: vec![],
            total: 130,
            page: Some(2),
            per_page: 20,
            pages: 7,
        };
        assert_eq!(
            PageInfo::from_envelope(&env, 5),
            PageInfo {
                current_page: 2,
                total_pages: 7,
                total_items: 130,
                items_per_page: 20,
            }
        );
    }

    #[test]
    fn test_from_envelope_without_page_uses_request() {
        let env: PageEnvelope<()> = PageEnvelope {
            items: vec![],
            total: 25,
            page: None,
            per_page: 10,
            pages: 3,
        };
        let info = PageInfo::from_envelope(&env, 3);
        assert_eq!(info.current_page, 3);
        assert_eq!(info.item_range(), (21, 25));
    }

    #[test]
    fn test_click_dispatch() {
        let mut emitted = Vec::new();
        dispatch_page_click(Page(3), |p| emitted.push(p));
        dispatch_page_click(Ellipsis, |p| emitted.push(p));
        assert_eq!(emitted, vec![3]);

        // Active page re-emits the same number: harmless for the caller.
        let mut again = Vec::new();
        dispatch_page_click(Page(5), |p| again.push(p));
        dispatch_page_click(Page(5), |p| again.push(p));
        assert_eq!(again, vec![5, 5]);
    }
}
