//! Page window arithmetic.

use std::ops::Range;

use serde::Serialize;

use crate::data::Dataset;
use crate::options::PageBounds;

/// The rows that make up one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    /// Zero-based page index
    pub page: usize,
    /// Rows per page
    pub page_size: usize,
    /// First row index of the page
    pub start: usize,
    /// Number of body rows the page will render
    pub count: usize,
}

impl PageWindow {
    /// Compute the window for `page` of `dataset`.
    ///
    /// Clamped windows never extend past the rows actually held. Legacy
    /// windows always span `min(page_size, total)` rows from the page offset,
    /// whether or not those rows exist, where `total` is the declared length
    /// capped at the rows actually held. A large declared length therefore
    /// never produces more blank rows than the data has rows. Offsets
    /// saturate instead of overflowing.
    pub fn compute(dataset: &Dataset, page: usize, page_size: usize, bounds: PageBounds) -> Self {
        let start = page.saturating_mul(page_size);
        let wanted = match bounds {
            PageBounds::Clamped => page_size.min(dataset.row_count().saturating_sub(start)),
            PageBounds::Legacy => page_size.min(dataset.len().min(dataset.row_count())),
        };
        let count = start.saturating_add(wanted) - start;

        PageWindow {
            page,
            page_size,
            start,
            count,
        }
    }

    /// Row indices covered by the page
    pub fn rows(&self) -> Range<usize> {
        self.start..self.start + self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of pages needed for `total` rows (at least one, so an empty
    /// dataset still has a page to show its header).
    pub fn page_count(total: usize, page_size: usize) -> usize {
        total.div_ceil(page_size.max(1)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Row;

    fn numbered(n: usize) -> Dataset {
        let rows = (0..n).map(|i| Row::new().with("n", i as i64)).collect();
        Dataset::new(vec!["n".to_string()], rows).unwrap()
    }

    #[test]
    fn test_first_page() {
        let window = PageWindow::compute(&numbered(5), 0, 100, PageBounds::Clamped);
        assert_eq!(window.rows(), 0..5);
    }

    #[test]
    fn test_page_past_end_clamped() {
        let window = PageWindow::compute(&numbered(5), 1, 100, PageBounds::Clamped);
        assert!(window.is_empty());
        assert_eq!(window.start, 100);
    }

    #[test]
    fn test_page_past_end_legacy() {
        let window = PageWindow::compute(&numbered(5), 1, 100, PageBounds::Legacy);
        assert_eq!(window.rows(), 100..105);
    }

    #[test]
    fn test_partial_last_page_agrees() {
        let data = numbered(150);
        let clamped = PageWindow::compute(&data, 1, 100, PageBounds::Clamped);
        let legacy = PageWindow::compute(&data, 1, 100, PageBounds::Legacy);
        assert_eq!(clamped.rows(), 100..150);
        assert_eq!(legacy.rows(), 100..200);
    }

    #[test]
    fn test_declared_length() {
        let data = numbered(3).with_length(50);
        assert_eq!(
            PageWindow::compute(&data, 0, 10, PageBounds::Legacy).count,
            3
        );
        assert_eq!(
            PageWindow::compute(&data, 0, 10, PageBounds::Clamped).count,
            3
        );
        assert_eq!(
            PageWindow::compute(&numbered(5).with_length(2), 1, 10, PageBounds::Legacy).rows(),
            10..12
        );
    }

    #[test]
    fn test_huge_declared_length_legacy() {
        let data = numbered(5).with_length(100_000_000);
        let window = PageWindow::compute(&data, 1, 100_000_000, PageBounds::Legacy);
        assert_eq!(window.start, 100_000_000);
        assert_eq!(window.count, 5);
    }

    #[test]
    fn test_huge_page_index_saturates() {
        let window = PageWindow::compute(&numbered(5), usize::MAX, 100, PageBounds::Legacy);
        assert_eq!(window.start, usize::MAX);
        assert_eq!(window.count, 0);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(PageWindow::page_count(0, 100), 1);
        assert_eq!(PageWindow::page_count(100, 100), 1);
        assert_eq!(PageWindow::page_count(101, 100), 2);
    }
}
