//! Catalog page: book grid, search and the quick borrow action

use std::fmt;

use crate::{
    api::ApiOutcome,
    format,
    models::book::{Book, BookQuery},
    ui::{ConfirmOptions, View},
    AppState,
};

pub const BORROW_LABEL: &str = "Borrow";
pub const BORROW_DETAIL_LABEL: &str = "Borrow This Book";
pub const OUT_OF_STOCK_LABEL: &str = "Out of Stock";

/// Borrow button state for a book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorrowControl {
    pub enabled: bool,
    pub label: &'static str,
}

impl BorrowControl {
    /// Disabled "Out of Stock" when nothing is left, otherwise `available_label`
    pub fn for_stock(stock: i32, available_label: &'static str) -> Self {
        if stock > 0 {
            Self { enabled: true, label: available_label }
        } else {
            Self { enabled: false, label: OUT_OF_STOCK_LABEL }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub stock: i32,
    pub description: String,
    pub cover_url: String,
    pub detail: View,
    /// Only offered to logged-in readers
    pub borrow: Option<BorrowControl>,
}

impl BookCard {
    pub fn new(book: &Book, can_borrow: bool) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            stock: book.stock,
            description: book
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "No description available".to_string()),
            cover_url: format::cover_url(book.cover_image_url.as_deref()).to_string(),
            detail: View::BookDetail(book.id),
            borrow: can_borrow.then(|| BorrowControl::for_stock(book.stock, BORROW_LABEL)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogView {
    Books(Vec<BookCard>),
    Empty,
    Error(String),
}

impl fmt::Display for CatalogView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogView::Books(cards) => {
                for card in cards {
                    writeln!(f, "#{} {}", card.id, card.title)?;
                    writeln!(f, "    Author: {}", card.author)?;
                    writeln!(f, "    Stock: {}", card.stock)?;
                    writeln!(f, "    {}", card.description)?;
                    if let Some(borrow) = &card.borrow {
                        let state = if borrow.enabled { "" } else { " (disabled)" };
                        writeln!(f, "    [{}]{}", borrow.label, state)?;
                    }
                }
                Ok(())
            }
            CatalogView::Empty => writeln!(f, "No books found"),
            CatalogView::Error(message) => writeln!(f, "{}", message),
        }
    }
}

/// Result of the quick borrow action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowOutcome {
    /// No token or no stored user; the user was sent to the login view
    LoginRequired,
    Cancelled,
    /// Request accepted; carries the reloaded listing
    Submitted(CatalogView),
    Rejected(String),
    Unauthorized,
    NetworkError,
}

pub struct CatalogPage {
    state: AppState,
}

impl CatalogPage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Load the book grid for the given filters
    pub async fn load_books(&self, query: &BookQuery) -> CatalogView {
        match self.state.services.catalog.search_books(query).await {
            ApiOutcome::Success(books) if books.is_empty() => CatalogView::Empty,
            ApiOutcome::Success(books) => {
                let can_borrow = self.state.session.is_logged_in() && !self.state.session.is_admin();
                CatalogView::Books(books.iter().map(|b| BookCard::new(b, can_borrow)).collect())
            }
            ApiOutcome::Rejected(message) => {
                CatalogView::Error(message.unwrap_or_else(|| "Failed to load books".to_string()))
            }
            ApiOutcome::Unauthorized => CatalogView::Error("Please login again".to_string()),
            ApiOutcome::Failed(e) => {
                tracing::error!("Error loading books: {}", e);
                CatalogView::Error("Network error while loading books".to_string())
            }
        }
    }

    /// Search from raw title/author inputs
    pub async fn search(&self, title: &str, author: &str) -> CatalogView {
        self.load_books(&BookQuery::from_inputs(title, author)).await
    }

    /// Confirm and submit a borrow request for one book
    pub async fn borrow_book(&self, book_id: i64) -> BorrowOutcome {
        let dialogs = &self.state.dialogs;

        if !self.state.session.is_logged_in() {
            dialogs.error("Please login first to borrow books").await;
            self.state.navigator.navigate(View::Account);
            return BorrowOutcome::LoginRequired;
        }
        // token present but the stored user is missing or unreadable
        let Some(user) = self.state.session.current_user().filter(|u| u.id != 0) else {
            dialogs
                .error("Failed to get user information, please login again")
                .await;
            self.state.navigator.navigate(View::Account);
            return BorrowOutcome::LoginRequired;
        };
        tracing::debug!(book_id, user_id = user.id, "Borrow requested from catalog");

        let confirmed = dialogs
            .confirm(
                "Are you sure you want to borrow this book?",
                "Borrow Confirmation",
                ConfirmOptions::default(),
            )
            .await;
        if !confirmed {
            return BorrowOutcome::Cancelled;
        }

        match self.state.services.borrows.request_borrow(book_id).await {
            ApiOutcome::Success(_) => {
                dialogs
                    .success("Borrow request submitted successfully! Please wait for admin approval.")
                    .await;
                BorrowOutcome::Submitted(self.load_books(&BookQuery::default()).await)
            }
            ApiOutcome::Rejected(message) => {
                let message = message.unwrap_or_else(|| "Borrow request failed".to_string());
                dialogs.error(&format!("Borrow failed: {}", message)).await;
                BorrowOutcome::Rejected(message)
            }
            ApiOutcome::Unauthorized => BorrowOutcome::Unauthorized,
            ApiOutcome::Failed(e) => {
                tracing::error!("Borrow request failed: {}", e);
                dialogs
                    .error("Network error, please check connection and try again")
                    .await;
                BorrowOutcome::NetworkError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(stock: i32) -> Book {
        Book {
            id: 3,
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            description: Some("  ".into()),
            stock,
            price: None,
            cover_image_url: None,
        }
    }

    #[test]
    fn borrow_control_follows_stock() {
        assert_eq!(
            BorrowControl::for_stock(0, BORROW_LABEL),
            BorrowControl { enabled: false, label: "Out of Stock" }
        );
        assert_eq!(
            BorrowControl::for_stock(-2, BORROW_LABEL),
            BorrowControl { enabled: false, label: "Out of Stock" }
        );
        assert_eq!(
            BorrowControl::for_stock(4, BORROW_LABEL),
            BorrowControl { enabled: true, label: "Borrow" }
        );
    }

    #[test]
    fn card_defaults() {
        let card = BookCard::new(&book(0), true);
        assert_eq!(card.description, "No description available");
        assert_eq!(card.cover_url, format::DEFAULT_COVER_URL);
        assert_eq!(card.borrow.unwrap().label, OUT_OF_STOCK_LABEL);

        let guest = BookCard::new(&book(2), false);
        assert_eq!(guest.borrow, None);
    }

    #[test]
    fn renders_disabled_control() {
        let view = CatalogView::Books(vec![BookCard::new(&book(0), true)]);
        let text = view.to_string();
        assert!(text.contains("#3 Dune"));
        assert!(text.contains("[Out of Stock] (disabled)"));
        assert_eq!(CatalogView::Empty.to_string(), "No books found\n");
    }
}
