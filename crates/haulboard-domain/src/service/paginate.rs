//! Page slicing for list views

use std::num::NonZeroUsize;

use haulboard_types::ValidationError;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

/// Page size and 1-based current page of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub page_size: NonZeroUsize,
    pub current_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
        }
    }
}

impl PageState {
    pub fn with_page_size(page_size: usize) -> Result<Self, ValidationError> {
        let page_size = NonZeroUsize::new(page_size).ok_or(ValidationError::ZeroPageSize)?;
        Ok(Self {
            page_size,
            current_page: 1,
        })
    }
}

/// One page of a sorted, filtered record set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, R> {
    pub items: &'a [R],
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl<R> Page<'_, R> {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// `ceil(count / page_size)`, never less than 1
pub fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get()).max(1)
}

/// Clamp a requested page into `[1, total_pages]`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice out one page. Does not clamp: a page outside the range is empty.
pub fn paginate<R>(records: &[R], page_size: NonZeroUsize, current_page: usize) -> Page<'_, R> {
    let size = page_size.get();
    let items = match current_page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(size);
            let end = start.saturating_add(size).min(records.len());
            records.get(start..end).unwrap_or(&[])
        }
        None => &[],
    };

    Page {
        items,
        current_page,
        total_pages: total_pages(records.len(), page_size),
        total_items: records.len(),
        page_size: size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_twelve_items_make_two_pages() {
        let items: Vec<u32> = (1..=12).collect();
        let first = paginate(&items, size(10), 1);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.items.len(), 10);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let second = paginate(&items, size(10), 2);
        assert_eq!(second.items, &[11, 12]);
        assert!(!second.has_next());
    }

    #[test]
    fn test_empty_set_is_page_one_of_one() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, DEFAULT_PAGE_SIZE, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        let items: Vec<u32> = (1..=5).collect();
        assert!(paginate(&items, size(2), 4).items.is_empty());
        assert!(paginate(&items, size(2), 0).items.is_empty());
        assert!(paginate(&items, size(2), usize::MAX).items.is_empty());
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(3, 1), 1);
        assert_eq!(clamp_page(0, 4), 1);
        assert_eq!(clamp_page(2, 4), 2);
        assert_eq!(clamp_page(9, 0), 1);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert_eq!(
            PageState::with_page_size(0).unwrap_err(),
            ValidationError::ZeroPageSize
        );
        assert_eq!(PageState::with_page_size(25).unwrap().page_size.get(), 25);
        assert_eq!(PageState::default().page_size.get(), 10);
    }
}
