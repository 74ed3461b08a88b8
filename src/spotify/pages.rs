//! Offset based pagination over Spotify paging objects.
//!
//! A [`PageSource`] knows how to fetch one page at a given offset and owns the
//! page size. [`Paginator`] walks the pages lazily and can be restarted from
//! the first page; [`Paginator::collect_all`] is the aggregating consumer used
//! by the client.

use crate::{Result, types::Paging};

#[allow(async_fn_in_trait)]
pub trait PageSource {
    type Item;

    /// Number of items requested per page.
    fn page_size(&self) -> u64;

    async fn fetch_page(&self, offset: u64, limit: u64) -> Result<Paging<Self::Item>>;
}

pub struct Paginator<'a, S: PageSource> {
    source: &'a S,
    offset: u64,
    total: Option<u64>,
    done: bool,
}

impl<'a, S: PageSource> Paginator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            offset: 0,
            total: None,
            done: false,
        }
    }

    /// Starts over from the first page.
    pub fn restart(&mut self) {
        self.offset = 0;
        self.total = None;
        self.done = false;
    }

    /// Items handed out since the last (re)start.
    pub fn fetched(&self) -> u64 {
        self.offset
    }

    /// Total reported by the last page, if any page was fetched.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Fetches the next page, `Ok(None)` once the collection is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<S::Item>>> {
        if self.done {
            return Ok(None);
        }

        let page = self
            .source
            .fetch_page(self.offset, self.source.page_size())
            .await?;

        let count = page.items.len() as u64;
        self.offset += count;
        self.total = Some(page.total);

        let reached_total = page.total > 0 && self.offset >= page.total;
        if count == 0 || page.next.is_none() || reached_total {
            self.done = true;
        }

        if count == 0 {
            return Ok(None);
        }
        Ok(Some(page.items))
    }

    /// Aggregates every remaining page, reporting `(fetched, total)` after each.
    pub async fn collect_all(mut self, mut progress: impl FnMut(u64, u64)) -> Result<Vec<S::Item>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page);
            progress(self.offset, self.total.unwrap_or(self.offset));
        }
        Ok(items)
    }
}
