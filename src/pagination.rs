//! Page-by-page listing driver.
//!
//! The driver owns the page loop; callers supply how to fetch page `n` and a
//! per-page reducer, so the reducers stay pure functions over plain records.

use anyhow::Result;
use log::{debug, warn};
use std::future::Future;

/// Upper bound on pages fetched from one listing.
pub const MAX_PAGES: u32 = 1000;

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The server advertised a following page.
    pub has_next: bool,
}

/// Fetch pages starting at 1 until the server stops advertising a next
/// page, reducing each page as it arrives and concatenating the results in
/// page order.
pub async fn paginate<T, U, F, Fut, R>(mut fetch: F, mut reduce: R) -> Result<Vec<U>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
    R: FnMut(Vec<T>) -> Vec<U>,
{
    let mut collected = Vec::new();
    let mut page = 1;

    loop {
        let Page { items, has_next } = fetch(page).await?;
        debug!("Page {} returned {} entries", page, items.len());

        let reduced = reduce(items);
        if !reduced.is_empty() {
            collected.extend(reduced);
        }

        if !has_next {
            break;
        }
        if page >= MAX_PAGES {
            warn!("Stopping after {} pages; the listing may be incomplete", MAX_PAGES);
            break;
        }
        page += 1;
    }

    Ok(collected)
}
