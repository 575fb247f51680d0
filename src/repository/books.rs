//! In-memory book store.
//!
//! The only component allowed to mutate the collection. A single lock
//! guards the whole list: writers hold it exclusively for the duration of a
//! mutation, readers always see a consistent snapshot. The collection is
//! bounded (25 records by default, counted across every owner), so linear
//! scans are fine.

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::book::{Book, BookDraft, BookQuery};
use crate::repository::query::search;

pub struct BookStore {
    max_books: usize,
    books: RwLock<Vec<Book>>,
}

impl BookStore {
    pub fn new(max_books: usize) -> Self {
        Self {
            max_books,
            books: RwLock::new(Vec::new()),
        }
    }

    /// Store pre-populated with the demo account's sample shelf
    pub fn with_sample_books(max_books: usize) -> Self {
        let store = Self::new(max_books);
        {
            let mut books = store.books.write();
            for (title, author, isbn, rating, comments, cover, age_days) in SAMPLE_BOOKS {
                let stamp = Utc::now() - chrono::Duration::days(*age_days);
                books.push(Book {
                    id: Uuid::new_v4().to_string(),
                    title: title.to_string(),
                    author: author.to_string(),
                    isbn: Some(isbn.to_string()),
                    rating: *rating,
                    comments: Some(comments.to_string()),
                    has_note: !comments.is_empty(),
                    cover_image_urls: vec![cover.to_string()],
                    user_id: "demo123".to_string(),
                    created_at: stamp,
                    updated_at: stamp,
                });
            }
        }
        store
    }

    /// Validate and store a new record for the given owner.
    ///
    /// The capacity check comes first and counts every owner's records, not
    /// just the caller's.
    pub fn add(&self, owner_id: &str, draft: BookDraft) -> AppResult<Book> {
        let mut books = self.books.write();

        if books.len() >= self.max_books {
            return Err(AppError::CapacityExceeded(self.max_books));
        }

        draft.validate()?;

        let now = Utc::now();
        let book = Book {
            id: Uuid::new_v4().to_string(),
            has_note: draft.has_note(),
            title: draft.title,
            author: draft.author,
            isbn: draft.isbn,
            rating: draft.rating,
            comments: draft.comments,
            cover_image_urls: draft.cover_image_urls.unwrap_or_default(),
            user_id: owner_id.to_string(),
            created_at: now,
            updated_at: now,
        };

        books.push(book.clone());
        tracing::debug!(book_id = %book.id, owner = %owner_id, "book added");
        Ok(book)
    }

    /// Fetch a record if both the id and the owner match. Another owner's
    /// record looks exactly like a missing one.
    pub fn get(&self, id: &str, owner_id: &str) -> Option<Book> {
        self.books
            .read()
            .iter()
            .find(|b| b.id == id && b.user_id == owner_id)
            .cloned()
    }

    /// One page of the owner's shelf plus the total matching count
    pub fn list(&self, owner_id: &str, query: &BookQuery) -> (Vec<Book>, usize) {
        let books = self.books.read();
        let (page, total) = search(&books, owner_id, query);
        (page.into_iter().cloned().collect(), total)
    }

    /// Replace a record's content wholesale.
    ///
    /// Identity, owner, and creation time survive; everything else comes
    /// from the draft. A missing cover-URL list keeps the existing one. The
    /// replacement is validated before the old value is superseded.
    pub fn update(&self, id: &str, owner_id: &str, draft: BookDraft) -> AppResult<Book> {
        let mut books = self.books.write();

        let index = books
            .iter()
            .position(|b| b.id == id && b.user_id == owner_id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        draft.validate()?;

        let existing = &books[index];
        let updated = Book {
            id: existing.id.clone(),
            user_id: existing.user_id.clone(),
            created_at: existing.created_at,
            has_note: draft.has_note(),
            title: draft.title,
            author: draft.author,
            isbn: draft.isbn,
            rating: draft.rating,
            comments: draft.comments,
            cover_image_urls: draft
                .cover_image_urls
                .unwrap_or_else(|| existing.cover_image_urls.clone()),
            updated_at: Utc::now(),
        };

        books[index] = updated.clone();
        tracing::debug!(book_id = %id, owner = %owner_id, "book updated");
        Ok(updated)
    }

    /// Remove a record; true if something was removed. Deleting the same id
    /// twice quietly reports false the second time.
    pub fn remove(&self, id: &str, owner_id: &str) -> bool {
        let mut books = self.books.write();
        let before = books.len();
        books.retain(|b| !(b.id == id && b.user_id == owner_id));
        books.len() != before
    }

    /// Total stored records, across all owners
    pub fn count(&self) -> usize {
        self.books.read().len()
    }
}

/// Demo shelf: title, author, ISBN, rating, comments, cover URL, age in
/// days. Seeded for the demo account at startup.
const SAMPLE_BOOKS: &[(&str, &str, &str, i32, &str, &str, i64)] = &[
    (
        "To Kill a Mockingbird",
        "Harper Lee",
        "978-0446310789",
        5,
        "A powerful story about racial injustice and moral growth. Scout's perspective makes this classic accessible and moving.",
        "https://covers.openlibrary.org/b/id/12606566-L.jpg",
        30,
    ),
    (
        "1984",
        "George Orwell",
        "978-0451524935",
        4,
        "Disturbing but essential reading about surveillance and totalitarianism. Still relevant today.",
        "https://covers.openlibrary.org/b/id/14370404-L.jpg",
        25,
    ),
    (
        "The Great Gatsby",
        "F. Scott Fitzgerald",
        "978-0743273565",
        3,
        "Beautiful prose but the characters are hard to like. The American Dream theme is well explored.",
        "https://covers.openlibrary.org/b/id/12364437-L.jpg",
        20,
    ),
    (
        "Pride and Prejudice",
        "Jane Austen",
        "978-0141439518",
        5,
        "Timeless romance with sharp social commentary. Elizabeth Bennet is one of literature's greatest heroines.",
        "https://m.media-amazon.com/images/I/712P0p5cXIL._UF894,1000_QL80_.jpg",
        15,
    ),
    (
        "The Catcher in the Rye",
        "J.D. Salinger",
        "978-0316769488",
        2,
        "Holden Caulfield is annoying but the book captures teenage alienation perfectly.",
        "https://m.media-amazon.com/images/I/8125BDk3l9L.jpg",
        10,
    ),
    (
        "Lord of the Flies",
        "William Golding",
        "978-0399501487",
        4,
        "Dark exploration of human nature and civilization. The descent into savagery is compelling and disturbing.",
        "https://covers.openlibrary.org/b/id/14854809-L.jpg",
        5,
    ),
    (
        "The Hobbit",
        "J.R.R. Tolkien",
        "978-0547928241",
        0,
        "",
        "https://covers.openlibrary.org/b/id/14627222-L.jpg",
        1,
    ),
];

#[cfg(test)]
mod book_store_tests {
    use super::*;
    use crate::models::book::BookRejection;

    fn draft(title: &str) -> BookDraft {
        BookDraft {
            title: title.to_string(),
            author: "Some Author".to_string(),
            isbn: None,
            rating: 0,
            comments: None,
            cover_image_urls: None,
        }
    }

    #[test]
    fn add_assigns_id_owner_and_timestamps() {
        let store = BookStore::new(25);
        let book = store.add("alice", draft("Dune")).expect("add failed");

        assert!(!book.id.is_empty());
        assert_eq!(book.user_id, "alice");
        assert_eq!(book.created_at, book.updated_at);
        assert_eq!(store.get(&book.id, "alice"), Some(book));
    }

    #[test]
    fn rejected_drafts_are_not_stored() {
        let store = BookStore::new(25);
        let bad = BookDraft {
            rating: 4,
            ..draft("Unloved")
        };

        let err = store.add("alice", bad).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(BookRejection::CommentsRequired)
        ));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn the_26th_add_fails_with_capacity_exceeded() {
        let store = BookStore::new(25);
        for i in 0..25 {
            store
                .add("alice", draft(&format!("Book {}", i)))
                .expect("add within capacity failed");
        }

        let err = store.add("alice", draft("One Too Many")).unwrap_err();
        assert!(matches!(err, AppError::CapacityExceeded(25)));
        assert_eq!(store.count(), 25);
    }

    #[test]
    fn the_capacity_is_shared_between_owners() {
        let store = BookStore::new(3);
        store.add("alice", draft("A1")).unwrap();
        store.add("bob", draft("B1")).unwrap();
        store.add("alice", draft("A2")).unwrap();

        let err = store.add("bob", draft("B2")).unwrap_err();
        assert!(matches!(err, AppError::CapacityExceeded(3)));
    }

    #[test]
    fn get_hides_other_owners_records() {
        let store = BookStore::new(25);
        let bobs = store.add("bob", draft("Secret Diary")).unwrap();

        assert_eq!(store.get(&bobs.id, "alice"), None);
        assert!(store.get(&bobs.id, "bob").is_some());
    }

    #[test]
    fn list_is_scoped_to_the_owner() {
        let store = BookStore::new(25);
        store.add("alice", draft("Hers")).unwrap();
        store.add("bob", draft("His")).unwrap();

        let (page, total) = store.list("alice", &BookQuery::default());
        assert_eq!(total, 1);
        assert_eq!(page[0].title, "Hers");
    }

    #[test]
    fn update_replaces_content_but_not_identity() {
        let store = BookStore::new(25);
        let original = store.add("alice", draft("Draft Title")).unwrap();

        let replacement = BookDraft {
            title: "Final Title".to_string(),
            author: "Renamed Author".to_string(),
            isbn: Some("123".to_string()),
            rating: 4,
            comments: Some("much better now".to_string()),
            cover_image_urls: Some(vec!["https://example.com/c.jpg".to_string()]),
        };
        let updated = store
            .update(&original.id, "alice", replacement)
            .expect("update failed");

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.user_id, "alice");
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.title, "Final Title");
        assert_eq!(updated.rating, 4);
        assert!(updated.has_note);
        assert!(updated.updated_at >= original.updated_at);
    }

    #[test]
    fn update_of_a_missing_or_foreign_record_is_not_found() {
        let store = BookStore::new(25);
        let bobs = store.add("bob", draft("His")).unwrap();

        let err = store.update("no-such-id", "alice", draft("x")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // Exists, but owned by someone else: indistinguishable from absence
        let err = store.update(&bobs.id, "alice", draft("x")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn invalid_update_leaves_the_record_untouched() {
        let store = BookStore::new(25);
        let book = store.add("alice", draft("Stable")).unwrap();

        let bad = BookDraft {
            comments: Some("what a horrible ending".to_string()),
            ..draft("Stable")
        };
        let err = store.update(&book.id, "alice", bad).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(BookRejection::ForbiddenWord)
        ));

        assert_eq!(store.get(&book.id, "alice"), Some(book));
    }

    #[test]
    fn has_note_is_rederived_on_update() {
        let store = BookStore::new(25);
        let with_note = BookDraft {
            comments: Some("note".to_string()),
            ..draft("Noted")
        };
        let book = store.add("alice", with_note).unwrap();
        assert!(book.has_note);

        let cleared = store
            .update(&book.id, "alice", draft("Noted"))
            .expect("update failed");
        assert!(!cleared.has_note);
        assert_eq!(cleared.comments, None);
    }

    #[test]
    fn missing_cover_urls_keep_the_existing_list_on_update() {
        let store = BookStore::new(25);
        let with_covers = BookDraft {
            cover_image_urls: Some(vec!["https://example.com/a.jpg".to_string()]),
            ..draft("Covered")
        };
        let book = store.add("alice", with_covers).unwrap();

        let updated = store.update(&book.id, "alice", draft("Covered")).unwrap();
        assert_eq!(updated.cover_image_urls, book.cover_image_urls);

        // An explicit empty list clears it
        let cleared = store
            .update(
                &book.id,
                "alice",
                BookDraft {
                    cover_image_urls: Some(vec![]),
                    ..draft("Covered")
                },
            )
            .unwrap();
        assert!(cleared.cover_image_urls.is_empty());
    }

    #[test]
    fn delete_is_idempotent() {
        let store = BookStore::new(25);
        let book = store.add("alice", draft("Ephemeral")).unwrap();

        assert!(store.remove(&book.id, "alice"));
        assert!(!store.remove(&book.id, "alice"));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn delete_does_not_cross_owners() {
        let store = BookStore::new(25);
        let bobs = store.add("bob", draft("His")).unwrap();

        assert!(!store.remove(&bobs.id, "alice"));
        assert!(store.get(&bobs.id, "bob").is_some());
    }

    #[test]
    fn sample_shelf_belongs_to_the_demo_account() {
        let store = BookStore::with_sample_books(25);
        assert_eq!(store.count(), 7);

        let (page, total) = store.list("demo123", &BookQuery::default());
        assert_eq!(total, 7);
        assert!(page.iter().all(|b| b.user_id == "demo123"));

        // The unrated sample has no note, the rated ones all do
        let hobbit = page.iter().find(|b| b.title == "The Hobbit").unwrap();
        assert_eq!(hobbit.rating, 0);
        assert!(!hobbit.has_note);
        assert!(page
            .iter()
            .filter(|b| b.rating > 0)
            .all(|b| b.has_note));
    }
}
