//! Cursor pagination for Cloud Projects list endpoints.
//!
//! List endpoints answer with `{limit, first: {href}, next: {href}, <items>}`.
//! The continuation cursor is the `token` query parameter of `next.href`;
//! its contents are opaque and are sent back verbatim on the next request.

use std::num::NonZeroU32;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ProjectsError, Result};

/// Query parameter that carries the continuation cursor.
pub const TOKEN_PARAM: &str = "token";

/// Base used to resolve `next` links that the server sends as relative paths.
const RELATIVE_LINK_BASE: &str = "http://relative.invalid/";

/// A link to another page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    /// The URL of the page.
    pub href: String,
}

impl PageLink {
    /// Create a link from an href.
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    /// The continuation cursor carried by this link, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the href cannot be parsed as a URL.
    pub fn token(&self) -> Result<Option<String>> {
        token_from_href(&self.href)
    }
}

/// Extract the continuation cursor from a `next` link href.
///
/// Relative hrefs are accepted. A missing or empty `token` parameter means
/// there are no further pages.
///
/// # Errors
///
/// Returns [`ProjectsError::UrlError`] if the href is not a valid URL.
pub fn token_from_href(href: &str) -> Result<Option<String>> {
    let url = match Url::parse(href) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_LINK_BASE)?.join(href)?,
        Err(e) => return Err(e.into()),
    };

    Ok(url
        .query_pairs()
        .find(|(key, _)| key == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty()))
}

/// A page of results from a Cloud Projects list endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page, in the order the server returned them.
    pub items: Vec<T>,
    /// The page size the server applied.
    pub limit: Option<u32>,
    /// Link to the first page.
    pub first: Option<PageLink>,
    /// Link to the following page, absent on the last page.
    pub next: Option<PageLink>,
}

impl<T> Page<T> {
    /// Create a page from items and an optional `next` link.
    #[must_use]
    pub fn new(items: Vec<T>, next: Option<PageLink>) -> Self {
        Self {
            items,
            limit: None,
            first: None,
            next,
        }
    }

    /// The continuation cursor for the following page.
    ///
    /// # Errors
    ///
    /// Returns an error if the `next` href is not a valid URL.
    pub fn next_token(&self) -> Result<Option<String>> {
        match &self.next {
            Some(link) => link.token(),
            None => Ok(None),
        }
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            limit: self.limit,
            first: self.first,
            next: self.next,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Pagination envelope shared by every list response.
///
/// Flattened into the per-endpoint response wrappers next to the item array.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageMeta {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub first: Option<PageLink>,
    #[serde(default)]
    pub next: Option<PageLink>,
}

impl PageMeta {
    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            limit: self.limit,
            first: self.first,
            next: self.next,
        }
    }
}

/// Query parameters for paginated requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Maximum number of items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Continuation cursor from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl PaginationParams {
    /// Create params that resume from a cursor.
    #[must_use]
    pub fn resume(limit: Option<u32>, token: impl Into<String>) -> Self {
        Self {
            limit,
            token: Some(token.into()),
        }
    }
}

/// One invocation of a list endpoint.
///
/// This is the only capability a [`Pager`] needs: given a page size and the
/// cursor from the previous page, fetch the next page.
#[async_trait]
pub trait ListCall: Send {
    /// The item type of the listed collection.
    type Item: Send;

    /// Fetch one page.
    ///
    /// # Errors
    ///
    /// Transport and decoding errors are returned as-is to the pager's caller.
    async fn call(&mut self, limit: Option<u32>, token: Option<String>) -> Result<Page<Self::Item>>;
}

/// Iteration state owned by a single [`Pager`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagerState {
    exhausted: bool,
    cursor: Option<String>,
}

impl PagerState {
    /// True once a page without a continuation cursor has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The cursor the next request will carry.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }
}

/// Walks a cursor-paginated list endpoint page by page.
///
/// Each `get_next` call depends on the cursor returned by the previous one,
/// so calls on one pager must be issued strictly in sequence. The pager does
/// no locking of its own; share it across tasks only behind external
/// synchronization.
///
/// # Example
///
/// ```ignore
/// let mut pager = Project::pager(&client, (), NonZeroU32::new(10));
/// while pager.has_next() {
///     for project in pager.get_next().await? {
///         println!("{}", project.id);
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Pager<C: ListCall> {
    call: C,
    limit: Option<NonZeroU32>,
    state: PagerState,
}

impl<C: ListCall> Pager<C> {
    /// Create a pager. Without a limit the server's default page size applies.
    pub fn new(call: C, limit: Option<NonZeroU32>) -> Self {
        Self {
            call,
            limit,
            state: PagerState::default(),
        }
    }

    /// True if another `get_next` call is expected to return results.
    pub fn has_next(&self) -> bool {
        !self.state.exhausted
    }

    /// Current iteration state.
    pub fn state(&self) -> &PagerState {
        &self.state
    }

    /// Fetch the next page of items.
    ///
    /// An empty page does not end iteration; only a page without a
    /// continuation cursor does.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectsError::Exhausted`] if there are no more pages, and
    /// propagates any error from the underlying list call unchanged.
    pub async fn get_next(&mut self) -> Result<Vec<C::Item>> {
        if !self.has_next() {
            return Err(ProjectsError::Exhausted);
        }

        let page = self
            .call
            .call(self.limit.map(NonZeroU32::get), self.state.cursor.clone())
            .await?;

        let cursor = page.next_token()?;
        self.state.exhausted = cursor.is_none();
        self.state.cursor = cursor;

        Ok(page.items)
    }

    /// Fetch every remaining page and concatenate the items in order.
    ///
    /// # Errors
    ///
    /// Propagates the first error from the underlying list call.
    pub async fn get_all(&mut self) -> Result<Vec<C::Item>> {
        let mut all_items = Vec::new();
        while self.has_next() {
            all_items.extend(self.get_next().await?);
        }
        Ok(all_items)
    }
}
