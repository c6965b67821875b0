use serde::Serialize;

/// Entries per listing page
pub const PAGE_SIZE: usize = 100;

/// One page of a collection: slice bounds plus adjacency.
/// URL building is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    /// 1-indexed page number
    pub number: usize,
    pub start: usize,
    pub end: usize,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl Page {
    /// Compute page `number` of a collection of `total` items.
    /// A page past the end is valid and simply empty.
    pub fn new(total: usize, number: usize) -> Self {
        let start = number
            .saturating_sub(1)
            .saturating_mul(PAGE_SIZE)
            .min(total);
        let end = start.saturating_add(PAGE_SIZE).min(total);

        Self {
            number,
            start,
            end,
            total,
            has_prev: number > 1,
            has_next: end < total,
        }
    }

    /// The items of `items` that fall on this page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start.min(items.len());
        let end = self.end.clamp(start, items.len());
        &items[start..end]
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Parse a `page` query value; anything missing, malformed or below 1 means page 1
pub fn parse_page_number(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}
