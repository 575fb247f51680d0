//! Library service: the collection's lifecycle as the handlers see it

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDraft, BookQuery},
    repository::BookStore,
};

#[derive(Clone)]
pub struct LibraryService {
    store: std::sync::Arc<BookStore>,
}

impl LibraryService {
    pub fn new(store: BookStore) -> Self {
        Self {
            store: std::sync::Arc::new(store),
        }
    }

    pub fn add_book(&self, owner_id: &str, draft: BookDraft) -> AppResult<Book> {
        require_owner(owner_id)?;
        self.store.add(owner_id, draft)
    }

    pub fn get_book(&self, id: &str, owner_id: &str) -> AppResult<Book> {
        require_owner(owner_id)?;
        self.store
            .get(id, owner_id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    pub fn list_books(&self, owner_id: &str, query: &BookQuery) -> AppResult<(Vec<Book>, usize)> {
        require_owner(owner_id)?;
        Ok(self.store.list(owner_id, query))
    }

    pub fn update_book(&self, id: &str, owner_id: &str, draft: BookDraft) -> AppResult<Book> {
        require_owner(owner_id)?;
        self.store.update(id, owner_id, draft)
    }

    pub fn delete_book(&self, id: &str, owner_id: &str) -> AppResult<()> {
        require_owner(owner_id)?;
        if self.store.remove(id, owner_id) {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Book {} not found", id)))
        }
    }
}

/// An authenticated request always carries an owner id; an empty one is a
/// fault in our own token handling, not a caller error.
fn require_owner(owner_id: &str) -> AppResult<()> {
    if owner_id.is_empty() {
        return Err(AppError::Internal("Empty owner id".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod library_service_tests {
    use super::*;

    fn service() -> LibraryService {
        LibraryService::new(BookStore::new(25))
    }

    fn draft(title: &str) -> BookDraft {
        BookDraft {
            title: title.to_string(),
            author: "Author".to_string(),
            ..BookDraft::default()
        }
    }

    #[test]
    fn missing_book_maps_to_not_found() {
        let library = service();
        assert!(matches!(
            library.get_book("nope", "alice").unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            library.delete_book("nope", "alice").unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn empty_owner_id_is_an_internal_fault() {
        let library = service();
        assert!(matches!(
            library.add_book("", draft("x")).unwrap_err(),
            AppError::Internal(_)
        ));
        assert!(matches!(
            library.list_books("", &BookQuery::default()).unwrap_err(),
            AppError::Internal(_)
        ));
    }

    #[test]
    fn lifecycle_round_trip() {
        let library = service();
        let book = library.add_book("alice", draft("Dune")).unwrap();
        assert_eq!(library.get_book(&book.id, "alice").unwrap(), book);

        library.delete_book(&book.id, "alice").unwrap();
        assert!(library.get_book(&book.id, "alice").is_err());
    }
}
