//! Data models for Booktrack

pub mod book;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookDraft, BookQuery, BookRejection, SortKey};
pub use user::{User, UserClaims, UserDto};
