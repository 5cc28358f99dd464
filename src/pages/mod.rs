//! Page controllers
//!
//! Each page owns a clone of the shared [`AppState`](crate::AppState) and
//! reports its results as plain view types; user-facing failures go
//! through the modal dialogs.

pub mod admin_books;
pub mod auth;
pub mod borrow;
pub mod catalog;
pub mod detail;
pub mod history;
pub mod home;
pub mod requests;
pub mod user_history;

pub use admin_books::{AdminBooksPage, BookRow, Editor};
pub use auth::{AuthPage, AuthTab, LoginOutcome};
pub use borrow::{BorrowFormPage, Feedback};
pub use catalog::{BookCard, BorrowControl, BorrowOutcome, CatalogPage, CatalogView};
pub use detail::{DetailPage, DetailView};
pub use history::{HistoryPage, HistoryRow, HistoryView};
pub use home::{HomePage, HomeView};
pub use requests::{RequestAction, RequestRow, RequestsPage, RequestsView};
pub use user_history::{UserHistoryPage, UserHistoryRow, UserHistoryView};

use crate::error::AppError;

/// Text shown to the user for an error; validation messages are shown bare
pub(crate) fn user_message(error: &AppError) -> String {
    match error {
        AppError::Validation(message) => message.clone(),
        other => other.to_string(),
    }
}
