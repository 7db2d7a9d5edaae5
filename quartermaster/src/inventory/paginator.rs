use serde::{Deserialize, Serialize};

use crate::errors::{ErrorKind, QuartermasterError, QuartermasterResult};

/// One page of results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Zero based page index.
    pub number: usize,
    pub items: Vec<T>,
    /// Number of items across all pages.
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0 && self.total_pages > 0
    }
}

/// Splits an ordered result list into fixed-size pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> QuartermasterResult<Paginator> {
        if page_size == 0 {
            log::error!("Page size must be greater than zero");
            return Err(QuartermasterError::new(
                "Page size must be greater than zero",
                ErrorKind::ValidationError,
            ));
        }
        Ok(Paginator { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages needed for `total` items; zero when there are none.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Returns page `number` of `items`. A page past the end is empty.
    pub fn page<T: Clone>(&self, items: &[T], number: usize) -> Page<T> {
        let total_items = items.len();
        let start = number.saturating_mul(self.page_size).min(total_items);
        let end = start.saturating_add(self.page_size).min(total_items);

        Page {
            number,
            items: items[start..end].to_vec(),
            total_items,
            total_pages: self.page_count(total_items),
        }
    }
}
