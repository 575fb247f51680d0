//! Storage layer: the in-memory book collection and its query engine

pub mod books;
pub mod query;

pub use books::BookStore;
