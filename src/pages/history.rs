//! Personal borrowing history with the return action

use std::fmt;

use crate::{
    api::ApiOutcome,
    format,
    models::borrow::{BorrowRecord, BorrowStatus},
    ui::ConfirmOptions,
    AppState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub borrow_date: String,
    pub return_date: String,
    pub status: String,
    pub status_class: &'static str,
    /// Only borrowed books can be returned
    pub can_return: bool,
}

impl From<&BorrowRecord> for HistoryRow {
    fn from(record: &BorrowRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone().unwrap_or_default(),
            author: record.author.clone().unwrap_or_default(),
            borrow_date: format::format_date_or(record.borrow_date.as_deref(), "N/A"),
            return_date: format::format_date_or(record.return_date.as_deref(), "N/A"),
            status: record.borrow_status.to_string(),
            status_class: record.borrow_status.badge_class(),
            can_return: record.borrow_status == BorrowStatus::Borrowed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryView {
    Rows(Vec<HistoryRow>),
    LoginRequired,
    Empty,
    Error(String),
}

impl fmt::Display for HistoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryView::Rows(rows) => {
                for row in rows {
                    let action = if row.can_return { "[Return]" } else { "-" };
                    writeln!(
                        f,
                        "#{}  {}  {}  {}  {}  {}  {}",
                        row.id, row.title, row.author, row.borrow_date, row.return_date, row.status, action
                    )?;
                }
                Ok(())
            }
            HistoryView::LoginRequired => writeln!(f, "Please log in to view your borrowing history."),
            HistoryView::Empty => writeln!(f, "You have no borrowing history."),
            HistoryView::Error(message) => {
                writeln!(f, "Error while fetching borrow history: {}", message)
            }
        }
    }
}

pub struct HistoryPage {
    state: AppState,
}

impl HistoryPage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn load(&self) -> HistoryView {
        let Some(session) = self.state.session.get_session() else {
            return HistoryView::LoginRequired;
        };

        match self.state.services.borrows.user_history(session.user.id).await {
            ApiOutcome::Success(records) if records.is_empty() => HistoryView::Empty,
            ApiOutcome::Success(records) => {
                HistoryView::Rows(records.iter().map(HistoryRow::from).collect())
            }
            ApiOutcome::Rejected(message) => HistoryView::Error(
                message.unwrap_or_else(|| "Failed to fetch borrow history".to_string()),
            ),
            ApiOutcome::Unauthorized => HistoryView::LoginRequired,
            ApiOutcome::Failed(e) => {
                tracing::error!(user_id = session.user.id, "Error fetching borrow history: {}", e);
                HistoryView::Error(e.to_string())
            }
        }
    }

    /// Confirm and return a borrowed book; returns the reloaded history when done
    pub async fn return_book(&self, borrow_id: i64) -> Option<HistoryView> {
        let dialogs = &self.state.dialogs;
        if self.state.session.token().is_none() {
            dialogs.error("Please login first to return books").await;
            return None;
        }

        let confirmed = dialogs
            .confirm(
                "Are you sure you want to return this book?",
                "Return Confirmation",
                ConfirmOptions::default(),
            )
            .await;
        if !confirmed {
            return None;
        }

        match self.state.services.borrows.return_book(borrow_id).await {
            ApiOutcome::Success(_) => {
                tracing::info!(borrow_id, "Book returned");
                dialogs.success("Book returned successfully!").await;
                Some(self.load().await)
            }
            ApiOutcome::Rejected(message) => {
                let message =
                    message.unwrap_or_else(|| "Failed to return book, please try again".to_string());
                dialogs.error(&message).await;
                None
            }
            ApiOutcome::Unauthorized => None,
            ApiOutcome::Failed(e) => {
                tracing::error!(borrow_id, "Return failed: {}", e);
                dialogs
                    .error("Error occurred while returning book, please try again")
                    .await;
                None
            }
        }
    }
}
