//! Book record, draft content, and validation rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Maximum title length, in characters
pub const MAX_TITLE_CHARS: usize = 200;
/// Maximum author length, in characters
pub const MAX_AUTHOR_CHARS: usize = 100;
/// Maximum comments length, in characters
pub const MAX_COMMENTS_CHARS: usize = 1000;
/// Word that may never appear in comments, compared case-insensitively
pub const FORBIDDEN_WORD: &str = "horrible";

/// A stored book record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque unique id, assigned by the store at creation
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    /// 0 means "unrated", 1-5 are real ratings
    pub rating: i32,
    pub comments: Option<String>,
    /// Derived: true iff comments is non-empty; never caller-settable
    pub has_note: bool,
    pub cover_image_urls: Vec<String>,
    /// Owner identity, fixed at creation
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate book content, submitted on create and update.
///
/// Carries no identity, owner, or timestamps; the store assigns those.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    #[serde(default)]
    pub rating: i32,
    pub comments: Option<String>,
    /// On update, a missing list keeps the record's existing URLs
    pub cover_image_urls: Option<Vec<String>>,
}

/// Why a draft was refused. Messages are the user-visible reason strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookRejection {
    #[error("Rating must be between 0 (no rating) and 5")]
    RatingOutOfRange,
    #[error("Comments are required when rating is given")]
    CommentsRequired,
    #[error("Comments cannot contain the word 'horrible'")]
    ForbiddenWord,
    #[error("Title cannot exceed 200 characters")]
    TitleTooLong,
    #[error("Author name cannot exceed 100 characters")]
    AuthorTooLong,
    #[error("Comments cannot exceed 1000 characters")]
    CommentsTooLong,
}

impl BookDraft {
    /// Check the draft's content against every storage rule.
    ///
    /// Pure, first failure wins, in a fixed order: rating range, then the
    /// comment-required rule, the forbidden word, then the length caps.
    pub fn validate(&self) -> Result<(), BookRejection> {
        if self.rating < 0 || self.rating > 5 {
            return Err(BookRejection::RatingOutOfRange);
        }

        let comments = self.comments.as_deref().unwrap_or("");

        if self.rating > 0 && comments.trim().is_empty() {
            return Err(BookRejection::CommentsRequired);
        }

        if comments.to_lowercase().contains(FORBIDDEN_WORD) {
            return Err(BookRejection::ForbiddenWord);
        }

        // Lengths are counted in characters, not bytes
        if self.title.chars().count() > MAX_TITLE_CHARS {
            return Err(BookRejection::TitleTooLong);
        }

        if self.author.chars().count() > MAX_AUTHOR_CHARS {
            return Err(BookRejection::AuthorTooLong);
        }

        if comments.chars().count() > MAX_COMMENTS_CHARS {
            return Err(BookRejection::CommentsTooLong);
        }

        Ok(())
    }

    /// Derived `hasNote` flag for this content
    pub fn has_note(&self) -> bool {
        self.comments.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// Sort keys accepted by the book listing.
///
/// A closed set: anything unrecognized falls back to `Title` explicitly
/// rather than through string matching at the point of use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Title,
    Author,
    Rating,
    #[serde(rename = "createdat")]
    CreatedAt,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "author" => Ok(SortKey::Author),
            "rating" => Ok(SortKey::Rating),
            "createdat" => Ok(SortKey::CreatedAt),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

/// Query-string parameters for the book listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct BookQuery {
    /// Page number, 1-based (default: 1)
    pub page: Option<usize>,
    /// Records per page (default: 10)
    pub page_size: Option<usize>,
    /// Case-insensitive substring matched against title, author, and ISBN
    pub search: Option<String>,
    /// One of: title, author, rating, createdat
    pub sort_by: Option<String>,
}

impl BookQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(10).max(1)
    }

    /// Resolved sort key, defaulting to `Title` for missing or unknown values
    pub fn sort_key(&self) -> SortKey {
        self.sort_by
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}
