//! Borrow form page: request a specific book, with inline feedback

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::{api::ApiOutcome, ui::View, AppState};

/// Inline status line under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

impl Feedback {
    pub fn message(&self) -> &str {
        match self {
            Feedback::Success(message) | Feedback::Error(message) => message,
        }
    }
}

pub struct BorrowFormPage {
    state: AppState,
    book_id: Option<i64>,
    book_title: String,
    redirect: Option<JoinHandle<()>>,
}

impl BorrowFormPage {
    /// Open the form; `None` when there is no stored user (redirected to login)
    pub async fn open(state: AppState, book_id: Option<i64>) -> Option<Self> {
        if state.session.current_user().is_none() {
            state.dialogs.error("Please login first to borrow books").await;
            state.navigator.navigate(View::Account);
            return None;
        }

        let book_title = match book_id {
            Some(id) => match state.services.catalog.get_book(id).await {
                ApiOutcome::Success(book) => book.title,
                ApiOutcome::Failed(e) => {
                    tracing::error!(book_id = id, "Failed to fetch book title: {}", e);
                    "Error loading book title".to_string()
                }
                _ => "Book not found".to_string(),
            },
            None => "No book ID provided".to_string(),
        };

        Some(Self {
            state,
            book_id,
            book_title,
            redirect: None,
        })
    }

    pub fn book_title(&self) -> &str {
        &self.book_title
    }

    pub async fn submit(&mut self) -> Feedback {
        let Some(book_id) = self.book_id else {
            return Feedback::Error("Missing book ID.".to_string());
        };

        match self.state.services.borrows.request_borrow(book_id).await {
            ApiOutcome::Success(_) => {
                let delay = Duration::from_millis(self.state.config.ui.redirect_delay_ms);
                let navigator = self.state.navigator.clone();
                self.redirect = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    navigator.navigate(View::Home);
                }));
                Feedback::Success(
                    "Borrow request submitted successfully! Please wait for admin approval.".to_string(),
                )
            }
            ApiOutcome::Rejected(message) => Feedback::Error(
                message.unwrap_or_else(|| "Failed to submit borrow request".to_string()),
            ),
            ApiOutcome::Unauthorized => Feedback::Error("Failed to submit borrow request".to_string()),
            ApiOutcome::Failed(e) => {
                tracing::error!(book_id, "Borrow submission failed: {}", e);
                Feedback::Error("Network error, please try again later".to_string())
            }
        }
    }

    /// Wait for the pending redirect home, if any
    pub async fn wait_redirect(&mut self) {
        if let Some(handle) = self.redirect.take() {
            if let Err(e) = handle.await {
                tracing::warn!("Redirect task failed: {}", e);
            }
        }
    }
}

impl Drop for BorrowFormPage {
    fn drop(&mut self) {
        if let Some(handle) = self.redirect.take() {
            handle.abort();
        }
    }
}
