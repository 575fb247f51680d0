//! Pure query engine over a book collection.
//!
//! Filter, search, sort, and paginate without touching storage; the store
//! calls in here under its read lock.

use std::cmp::Ordering;

use crate::models::book::{Book, BookQuery, SortKey};

/// Produce one page of an owner's records plus the total matching count.
///
/// The total reflects the owner and search filters (not the pagination), so
/// callers can compute page counts. Records of other owners are filtered
/// out before anything else; no search or sort ever exposes them.
pub fn search<'a>(records: &'a [Book], owner_id: &str, query: &BookQuery) -> (Vec<&'a Book>, usize) {
    let term = query.search.as_deref().unwrap_or("");

    let mut matching: Vec<&Book> = records
        .iter()
        .filter(|book| book.user_id == owner_id)
        .filter(|book| matches_search(book, term))
        .collect();

    let total = matching.len();

    // Stable sort: ties keep insertion order, so pagination is deterministic
    matching.sort_by(compare(query.sort_key()));

    // Saturate: page and page_size are unbounded caller input, and a huge
    // pair must land on an empty page, not wrap around
    let offset = query.page().saturating_sub(1).saturating_mul(query.page_size());
    let page = matching
        .into_iter()
        .skip(offset)
        .take(query.page_size())
        .collect();

    (page, total)
}

/// Case-insensitive substring match against title, author, or ISBN.
/// An empty term matches everything; a missing ISBN never matches.
fn matches_search(book: &Book, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    book.title.to_lowercase().contains(&term)
        || book.author.to_lowercase().contains(&term)
        || book
            .isbn
            .as_deref()
            .is_some_and(|isbn| isbn.to_lowercase().contains(&term))
}

/// Comparison function for a sort key: lexical ascending for title and
/// author (case-insensitive), descending for rating and creation date.
fn compare(key: SortKey) -> impl Fn(&&Book, &&Book) -> Ordering {
    move |a, b| match key {
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::Author => a.author.to_lowercase().cmp(&b.author.to_lowercase()),
        SortKey::Rating => b.rating.cmp(&a.rating),
        SortKey::CreatedAt => b.created_at.cmp(&a.created_at),
    }
}
