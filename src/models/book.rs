//! Book (catalog entry) model and related types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Book as returned by the catalog endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock: i32,
    /// Accepted as JSON number or numeric string
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

/// Catalog search filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl BookQuery {
    /// Build filters from raw search inputs; blank inputs are dropped
    pub fn from_inputs(title: &str, author: &str) -> Self {
        let keep = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Self {
            title: keep(title),
            author: keep(author),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }

    /// Case-insensitive containment on every present filter
    pub fn matches(&self, book: &Book) -> bool {
        let contains = |haystack: &str, needle: &Option<String>| match needle {
            Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        };
        contains(&book.title, &self.title) && contains(&book.author, &self.author)
    }
}

/// Create/update book request body
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct BookPayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 0, message = "Stock must be a valid non-negative number"))]
    pub stock: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub cover_image_url: Option<String>,
}

/// Raw admin editor inputs, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    /// Present when editing an existing book
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    pub description: String,
    pub stock: String,
    pub price: String,
    pub cover_image_url: String,
}

impl BookForm {
    /// Prefill the editor from an existing book
    pub fn from_book(book: &Book) -> Self {
        Self {
            id: Some(book.id.to_string()),
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone().unwrap_or_default(),
            stock: book.stock.to_string(),
            price: book.price.unwrap_or_default().normalize().to_string(),
            cover_image_url: book.cover_image_url.clone().unwrap_or_default(),
        }
    }

    /// Target book id, if this form edits an existing book
    pub fn book_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Validate the inputs and build the request body
    pub fn to_payload(&self) -> AppResult<BookPayload> {
        let title = self.title.trim();
        let author = self.author.trim();
        let description = self.description.trim();
        if title.is_empty() || author.is_empty() || description.is_empty() {
            return Err(AppError::Validation(
                "Please fill in all required fields (Title, Author, Description)".to_string(),
            ));
        }

        let stock = self
            .stock
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|s| *s >= 0)
            .ok_or_else(|| {
                AppError::Validation("Stock must be a valid non-negative number".to_string())
            })?;

        let price = Decimal::from_str(self.price.trim())
            .ok()
            .filter(|p| !p.is_sign_negative())
            .ok_or_else(|| {
                AppError::Validation("Price must be a valid non-negative number".to_string())
            })?;

        let cover = self.cover_image_url.trim();
        let payload = BookPayload {
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
            stock,
            price,
            cover_image_url: (!cover.is_empty()).then(|| cover.to_string()),
        };
        payload.validate()?;
        Ok(payload)
    }
}
