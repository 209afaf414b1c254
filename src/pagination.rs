//! Pagination iterator
//!
//! Paginated endpoints return a [`PaginationIterator`] instead of a
//! parsed value. The iterator is lazy: nothing is fetched until the
//! first item is consumed. Pages are prefetched transparently into an
//! in-memory queue; the total page count is learned from the first
//! response's `X-Pagination-Page-Count` header. A traversal is
//! forward-only, but [`restart`](PaginationIterator::restart) resets
//! the iterator for a fresh one.

use std::collections::VecDeque;

use serde::de::DeserializeOwned;

use crate::constants::{DEFAULT_PAGE, DEFAULT_PER_PAGE, PREFETCH_PER_PAGE};
use crate::error::Error;
use crate::executor::Executor;
use crate::parser::parse_tree;
use crate::paths::{CallContext, Path};

/// Lazy, restartable iterator over a paginated endpoint.
pub struct PaginationIterator<'a, T> {
    executor: Executor<'a>,
    path: Path,
    ctx: CallContext,

    start_page: u32,
    per_page: u32,
    /// Next page to fetch.
    page: u32,
    /// Learned from the first fetched page's headers.
    page_count: Option<u32>,

    queue: VecDeque<T>,
    yielded: usize,
    started: bool,
    exhausted: bool,
}

impl<'a, T: DeserializeOwned> PaginationIterator<'a, T> {
    pub(crate) fn new(executor: Executor<'a>, path: Path, ctx: CallContext) -> Self {
        let start_page = ctx.page_or(DEFAULT_PAGE);
        let per_page = ctx.per_page_or(DEFAULT_PER_PAGE);

        PaginationIterator {
            executor,
            path,
            ctx,
            start_page,
            per_page,
            page: start_page,
            page_count: None,
            queue: VecDeque::new(),
            yielded: 0,
            started: false,
            exhausted: false,
        }
    }

    /// Override the starting page; only effective before the first
    /// fetch.
    pub fn starting_at(mut self, page: u32) -> Self {
        if !self.started {
            self.start_page = page;
            self.page = page;
        }
        self
    }

    /// Override the page size; only effective before the first fetch.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        if !self.started {
            self.per_page = per_page;
        }
        self
    }

    /// Whether any item remains: the queue is non-empty or another page
    /// is still fetchable.
    pub fn has_next(&self) -> bool {
        if !self.queue.is_empty() {
            return true;
        }
        if self.exhausted {
            return false;
        }

        match self.page_count {
            Some(count) => self.page <= count,
            None => true,
        }
    }

    /// Consume and return up to `n` upcoming items.
    pub fn take(&mut self, n: usize) -> Result<Vec<T>, Error> {
        let mut items = Vec::with_capacity(n);

        for _ in 0..n {
            match self.next() {
                Some(Ok(item)) => items.push(item),
                Some(Err(e)) => return Err(e),
                None => break,
            }
        }

        Ok(items)
    }

    /// Consume and return one page's worth of items (the default
    /// `take` amount).
    pub fn take_page(&mut self) -> Result<Vec<T>, Error> {
        self.take(self.per_page as usize)
    }

    /// Eagerly consume every remaining item.
    pub fn take_all(&mut self) -> Result<Vec<T>, Error> {
        let mut items = Vec::new();

        while let Some(item) = self.next() {
            items.push(item?);
        }

        Ok(items)
    }

    /// Fetch every remaining page into the queue using a large batch
    /// size, skipping items already buffered or yielded, then restore
    /// the original page size. Consumption after this call issues no
    /// further network traffic.
    pub fn prefetch_all(&mut self) -> Result<(), Error> {
        if self.exhausted {
            return Ok(());
        }

        // Absolute offset of the first item we do not yet hold.
        let offset = (self.start_page as usize - 1) * self.per_page as usize
            + self.yielded
            + self.queue.len();

        let original_per_page = self.per_page;
        self.per_page = PREFETCH_PER_PAGE;
        self.page = (offset / PREFETCH_PER_PAGE as usize) as u32 + 1;
        // page geometry changed, relearn the count from headers
        self.page_count = None;

        let mut skip = offset % PREFETCH_PER_PAGE as usize;

        while !self.exhausted {
            let fetched = self.fetch_next_page()?;
            if skip > 0 {
                let skipped = skip.min(fetched);
                // newly fetched items sit at the back of the queue
                let start = self.queue.len() - fetched;
                self.queue.drain(start..start + skipped);
                skip -= skipped;
            }
        }

        self.per_page = original_per_page;
        tracing::debug!(buffered = self.queue.len(), "prefetched all remaining items");

        Ok(())
    }

    /// Reset for a fresh traversal from the starting page.
    pub fn restart(&mut self) {
        self.page = self.start_page;
        self.page_count = None;
        self.queue.clear();
        self.yielded = 0;
        self.started = false;
        self.exhausted = false;
    }

    /// Fetch the next page into the queue; returns the number of items
    /// appended and flips `exhausted` once the cursor passes the last
    /// known page.
    fn fetch_next_page(&mut self) -> Result<usize, Error> {
        if let Some(count) = self.page_count {
            if self.page > count {
                self.exhausted = true;
                return Ok(0);
            }
        }

        let response = self
            .executor
            .execute(&self.path, &self.ctx, Some((self.page, self.per_page)))?;
        self.started = true;

        let items: Vec<T> = parse_tree(&response.json, self.path.response_shape())?;
        let fetched = items.len();
        self.queue.extend(items);

        // A response without pagination headers is the only page.
        let learned = response
            .pagination
            .and_then(|meta| meta.page_count)
            .unwrap_or(self.page);
        self.page_count = Some(learned);

        self.page += 1;
        if self.page > learned {
            self.exhausted = true;
        }

        Ok(fetched)
    }
}

impl<T: DeserializeOwned> Iterator for PaginationIterator<'_, T> {
    type Item = Result<T, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.queue.pop_front() {
                self.yielded += 1;
                return Some(Ok(item));
            }

            if self.exhausted {
                return None;
            }

            match self.fetch_next_page() {
                Ok(0) => {
                    // page held no new items; loop decides via exhausted
                    if self.exhausted {
                        return None;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
