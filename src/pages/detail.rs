//! Book detail page

use std::fmt;

use crate::{api::ApiOutcome, format, models::book::Book, AppState};

use super::catalog::{BorrowControl, BORROW_DETAIL_LABEL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Book {
        title: String,
        byline: String,
        description: String,
        stock: i32,
        cover_url: String,
        borrow: BorrowControl,
    },
    MissingId,
    Error(String),
}

impl DetailView {
    fn from_book(book: &Book) -> Self {
        DetailView::Book {
            title: book.title.clone(),
            byline: format!("by {}", book.author),
            description: book
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "No description available.".to_string()),
            stock: book.stock,
            cover_url: format::cover_url(book.cover_image_url.as_deref()).to_string(),
            borrow: BorrowControl::for_stock(book.stock, BORROW_DETAIL_LABEL),
        }
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailView::Book { title, byline, description, stock, borrow, .. } => {
                writeln!(f, "{}", title)?;
                writeln!(f, "{}", byline)?;
                writeln!(f)?;
                writeln!(f, "{}", description)?;
                writeln!(f)?;
                writeln!(f, "Stock: {}", stock)?;
                let state = if borrow.enabled { "" } else { " (disabled)" };
                writeln!(f, "[{}]{}", borrow.label, state)
            }
            DetailView::MissingId => writeln!(f, "Error: Missing book ID in URL."),
            DetailView::Error(message) => writeln!(f, "{}", message),
        }
    }
}

pub struct DetailPage {
    state: AppState,
}

impl DetailPage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn load(&self, book_id: Option<i64>) -> DetailView {
        let Some(book_id) = book_id else {
            return DetailView::MissingId;
        };

        match self.state.services.catalog.get_book(book_id).await {
            ApiOutcome::Success(book) => DetailView::from_book(&book),
            ApiOutcome::Rejected(message) => DetailView::Error(format!(
                "Failed to load book details. {}",
                message.unwrap_or_default()
            )),
            ApiOutcome::Unauthorized => {
                DetailView::Error("Failed to load book details. Please login again".to_string())
            }
            ApiOutcome::Failed(e) => {
                tracing::error!(book_id, "Error loading book details: {}", e);
                DetailView::Error(format!("Failed to load book details. {}", e))
            }
        }
    }
}
