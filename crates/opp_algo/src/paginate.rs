//! Pagination Cursor.
//!
//! Pages are 1-based. `total_pages = ceil(len / size)`; an empty sequence has
//! zero pages and an empty window, with the page index parked at 1. Every page
//! request is clamped into range, so nothing here can fail.

/// One page of a ranked sequence.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub window: &'a [T],
    pub page: usize,
    pub total_pages: usize,
}

#[inline]
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 { 0 } else { len.div_ceil(page_size) }
}

/// Clamp `page` into `[1, total_pages]`; 1 when there are no pages.
#[inline]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Window `[(page-1)*size, page*size)` of `seq`, with `page` clamped first.
pub fn paginate<T>(seq: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let total = total_pages(seq.len(), page_size);
    let page = clamp_page(page, total);
    if total == 0 {
        return Page { window: &seq[..0], page, total_pages: 0 };
    }
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(seq.len());
    Page { window: &seq[start..end], page, total_pages: total }
}

/// Page index plus size, navigated against a sequence length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PageCursor {
    page: usize,
    page_size: usize,
}

impl PageCursor {
    /// A zero page size is bumped to 1.
    pub fn new(page_size: usize) -> Self {
        Self { page: 1, page_size: page_size.max(1) }
    }

    #[inline]
    pub fn page(&self) -> usize {
        self.page
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    /// Back to page 1 (the sequence identity changed).
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Jump to `page`, clamped. Returns the resulting page.
    pub fn set_page(&mut self, page: usize, len: usize) -> usize {
        self.page = clamp_page(page, self.total_pages(len));
        self.page
    }

    /// Forward one page; no-op on the last page.
    pub fn next(&mut self, len: usize) -> usize {
        if self.page < self.total_pages(len) {
            self.page += 1;
        }
        self.page
    }

    /// Back one page; no-op on page 1.
    pub fn previous(&mut self) -> usize {
        if self.page > 1 {
            self.page -= 1;
        }
        self.page
    }

    pub fn window<'a, T>(&self, seq: &'a [T]) -> Page<'a, T> {
        paginate(seq, self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_and_totals() {
        let v: Vec<u32> = (1..=13).collect();
        let p = paginate(&v, 1, 6);
        assert_eq!(p.window, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(p.total_pages, 3);
        let p = paginate(&v, 3, 6);
        assert_eq!(p.window, &[13]);
    }

    #[test]
    fn out_of_range_pages_clamp() {
        let v: Vec<u32> = (1..=7).collect();
        assert_eq!(paginate(&v, 0, 6).page, 1);
        assert_eq!(paginate(&v, 99, 6).page, 2);
        let empty: [u32; 0] = [];
        let p = paginate(&empty, 5, 6);
        assert_eq!((p.page, p.total_pages, p.window.len()), (1, 0, 0));
    }

    #[test]
    fn cursor_navigation_stops_at_bounds() {
        let mut c = PageCursor::new(6);
        assert_eq!(c.previous(), 1);
        assert_eq!(c.next(13), 2);
        assert_eq!(c.next(13), 3);
        assert_eq!(c.next(13), 3);
        assert_eq!(c.set_page(0, 13), 1);
        assert_eq!(c.set_page(7, 13), 3);
        c.reset();
        assert_eq!(c.page(), 1);
        assert_eq!(c.next(0), 1);
        assert_eq!(PageCursor::new(0).page_size(), 1);
    }
}
