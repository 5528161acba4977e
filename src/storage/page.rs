//! Fixed-capacity page of item ids, linked to the next page in its bucket.

use serde::{Deserialize, Serialize};

/// One page's item capacity, chosen so a page is roughly 8 KiB
/// (`1023 * 8` bytes of item ids, plus the count/link fields).
pub const PAGE_CAPACITY: usize = 1023;

/// Sentinel link value meaning "no next page".
pub const NO_LINK: i32 = -1;

/// A fixed-capacity array of item ids with a link to the next page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page {
    count: u32,
    link: i32,
    items: Vec<u64>,
}

impl Page {
    /// Creates a fresh page: `count = 0`, `link = -1`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: 0,
            link: NO_LINK,
            items: Vec::with_capacity(PAGE_CAPACITY),
        }
    }

    /// Appends `id` to this page.
    ///
    /// # Panics
    ///
    /// Panics if the page is already full; callers must check [`Page::full`]
    /// first (this mirrors the precondition in spec.md §4.3).
    pub fn add(&mut self, id: u64) {
        assert!(!self.full(), "page is full");
        self.items.push(id);
        self.count += 1;
    }

    /// A view over this page's items (first `count` entries).
    #[must_use]
    pub fn items(&self) -> &[u64] {
        &self.items
    }

    /// Number of items currently stored.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count as usize
    }

    /// Whether the page has reached [`PAGE_CAPACITY`].
    #[must_use]
    pub fn full(&self) -> bool {
        self.count as usize == PAGE_CAPACITY
    }

    /// The linked next-page index, or `None` if this page is terminal.
    #[must_use]
    pub fn next(&self) -> Option<usize> {
        if self.link == NO_LINK {
            None
        } else {
            Some(self.link as usize)
        }
    }

    /// Sets the linked next-page index.
    pub fn set_link(&mut self, next: Option<usize>) {
        self.link = match next {
            None => NO_LINK,
            Some(n) => n as i32,
        };
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
