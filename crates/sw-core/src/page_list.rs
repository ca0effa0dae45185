//! Ordered, mutable page collection.
//!
//! Pages are stored by position with a key index and a request-code index
//! next to them. Every mutation validates first and then updates all maps
//! inside the same `&mut self` call, so a reader never sees them disagree.
//! Positions of removed pages are retired and cannot be handed out again.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Bound;

use thiserror::Error;
use tracing::debug;

use crate::flow::RequestCode;
use crate::ids::PageKey;
use crate::page::{Page, Position};

/// Scan origin meaning "before the first page".
pub const BEFORE_FIRST: Option<Position> = None;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageListError {
    #[error("duplicate page key: {0}")]
    DuplicateKey(PageKey),

    #[error("duplicate page position: {0}")]
    DuplicatePosition(Position),

    #[error("request code {code} already claimed by page {owner}")]
    DuplicateRequestCode { code: RequestCode, owner: PageKey },
}

#[derive(Debug, Default)]
pub struct PageList {
    pages: BTreeMap<Position, Page>,
    by_key: HashMap<PageKey, Position>,
    by_request: HashMap<RequestCode, PageKey>,
    retired: HashSet<Position>,
}

impl PageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from a static page definition, stopping at the first
    /// malformed page.
    pub fn build(pages: impl IntoIterator<Item = Page>) -> Result<Self, PageListError> {
        let mut list = Self::new();
        for page in pages {
            list.append(page)?;
        }
        Ok(list)
    }

    pub fn append(&mut self, page: Page) -> Result<(), PageListError> {
        if self.by_key.contains_key(page.key()) {
            return Err(PageListError::DuplicateKey(page.key().clone()));
        }
        let position = page.position();
        if self.pages.contains_key(&position) || self.retired.contains(&position) {
            return Err(PageListError::DuplicatePosition(position));
        }
        for code in page.request_codes() {
            if let Some(owner) = self.by_request.get(code) {
                return Err(PageListError::DuplicateRequestCode {
                    code: *code,
                    owner: owner.clone(),
                });
            }
        }

        for code in page.request_codes() {
            self.by_request.insert(*code, page.key().clone());
        }
        self.by_key.insert(page.key().clone(), position);
        debug!(key = %page.key(), position, "page appended");
        self.pages.insert(position, page);
        Ok(())
    }

    /// Removes the page with `key`; absent keys are a no-op.
    pub fn remove_by_key(&mut self, key: &PageKey) -> Option<Page> {
        let position = self.by_key.remove(key)?;
        let page = self.pages.remove(&position)?;
        self.by_request.retain(|_, owner| owner != key);
        self.retired.insert(position);
        debug!(key = %key, position, "page removed");
        Some(page)
    }

    pub fn get(&self, key: &PageKey) -> Option<&Page> {
        self.by_key.get(key).and_then(|pos| self.pages.get(pos))
    }

    pub fn get_mut(&mut self, key: &PageKey) -> Option<&mut Page> {
        let position = *self.by_key.get(key)?;
        self.pages.get_mut(&position)
    }

    pub fn get_by_position(&self, position: Position) -> Option<&Page> {
        self.pages.get(&position)
    }

    pub fn contains(&self, key: &PageKey) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Keys in position order.
    pub fn keys(&self) -> impl Iterator<Item = &PageKey> {
        self.pages.values().map(Page::key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// A position greater than every position ever used in this list.
    pub fn next_position(&self) -> Position {
        let live = self.pages.keys().next_back().copied();
        let retired = self.retired.iter().max().copied();
        live.max(retired).map_or(0, |p| p + 1)
    }

    pub fn owner_of(&self, code: RequestCode) -> Option<&PageKey> {
        self.by_request.get(&code)
    }

    /// First eligible page strictly after `from`.
    pub fn next_eligible(&self, from: Option<Position>) -> Option<&Page> {
        let lower = match from {
            Some(p) => Bound::Excluded(p),
            None => Bound::Unbounded,
        };
        self.pages
            .range((lower, Bound::Unbounded))
            .map(|(_, page)| page)
            .find(|page| page.is_eligible())
    }

    /// Last eligible page strictly before `from`.
    pub fn previous_eligible(&self, from: Position) -> Option<&Page> {
        self.pages
            .range(..from)
            .rev()
            .map(|(_, page)| page)
            .find(|page| page.is_eligible())
    }

    /// Marks every page strictly between `from` and `to` as skipped. `to` of
    /// `None` runs to the end of the list.
    pub fn mark_skipped_between(&mut self, from: Option<Position>, to: Option<Position>) {
        let lower = match from {
            Some(p) => Bound::Excluded(p),
            None => Bound::Unbounded,
        };
        let upper = match to {
            Some(p) => Bound::Excluded(p),
            None => Bound::Unbounded,
        };
        for (_, page) in self.pages.range_mut((lower, upper)) {
            debug!(key = %page.key(), "page skipped");
            page.mark_skipped();
        }
    }
}
