//! Admin approval of pending borrow requests

use std::fmt;

use crate::{
    api::ApiOutcome,
    format,
    models::borrow::{BorrowRecord, BorrowStatus},
    ui::ConfirmOptions,
    AppState,
};

/// Decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Approve,
    Deny,
}

impl RequestAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestAction::Approve => "approve",
            RequestAction::Deny => "deny",
        }
    }

    /// Status the borrow record moves to
    pub fn target_status(&self) -> BorrowStatus {
        match self {
            RequestAction::Approve => BorrowStatus::Borrowed,
            RequestAction::Deny => BorrowStatus::Rejected,
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            RequestAction::Approve => "approved",
            RequestAction::Deny => "denied",
        }
    }
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRow {
    pub id: i64,
    pub user: String,
    pub book: String,
    pub borrow_date: String,
}

impl From<&BorrowRecord> for RequestRow {
    fn from(record: &BorrowRecord) -> Self {
        Self {
            id: record.id,
            user: record
                .username
                .clone()
                .unwrap_or_else(|| format!("User #{}", record.user_id)),
            book: record
                .title
                .clone()
                .unwrap_or_else(|| format!("Book #{}", record.book_id)),
            borrow_date: format::format_date_or(record.borrow_date.as_deref(), "N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestsView {
    Requests(Vec<RequestRow>),
    Empty,
    Error(String),
}

impl fmt::Display for RequestsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestsView::Requests(rows) => {
                for row in rows {
                    writeln!(f, "#{}  {}  {}  {}", row.id, row.user, row.book, row.borrow_date)?;
                }
                Ok(())
            }
            RequestsView::Empty => writeln!(f, "No pending requests"),
            RequestsView::Error(message) => writeln!(f, "{}", message),
        }
    }
}

pub struct RequestsPage {
    state: AppState,
}

impl RequestsPage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn load(&self) -> RequestsView {
        let view = match self.state.services.borrows.list_by_status(BorrowStatus::Requested).await {
            ApiOutcome::Success(records) if records.is_empty() => RequestsView::Empty,
            ApiOutcome::Success(records) => {
                RequestsView::Requests(records.iter().map(RequestRow::from).collect())
            }
            ApiOutcome::Rejected(message) => {
                RequestsView::Error(message.unwrap_or_else(|| "Failed to fetch requests".to_string()))
            }
            ApiOutcome::Unauthorized => RequestsView::Error("Please login again".to_string()),
            ApiOutcome::Failed(e) => RequestsView::Error(e.to_string()),
        };

        if let RequestsView::Error(message) = &view {
            tracing::error!("Failed to load requests: {}", message);
            self.state
                .dialogs
                .error(&format!("Failed to load requests: {}", message))
                .await;
        }
        view
    }

    /// Confirm and apply a decision; returns the refreshed list when applied
    pub async fn decide(&self, borrow_id: i64, action: RequestAction) -> Option<RequestsView> {
        let dialogs = &self.state.dialogs;
        let confirmed = dialogs
            .confirm(
                &format!("Are you sure you want to {} this request?", action),
                "Confirm Operation",
                ConfirmOptions::default(),
            )
            .await;
        if !confirmed {
            return None;
        }

        let outcome = self
            .state
            .services
            .borrows
            .update_status(borrow_id, action.target_status())
            .await;
        match outcome {
            ApiOutcome::Success(_) => {
                tracing::info!(borrow_id, action = action.as_str(), "Borrow request updated");
                dialogs
                    .success(&format!("Request {} successfully", action.past_tense()))
                    .await;
                Some(self.load().await)
            }
            ApiOutcome::Rejected(message) => {
                let message = message.unwrap_or_else(|| "Failed to update status.".to_string());
                dialogs.error(&format!("Failed to update request: {}", message)).await;
                None
            }
            ApiOutcome::Unauthorized => None,
            ApiOutcome::Failed(e) => {
                dialogs.error(&format!("Failed to update request: {}", e)).await;
                None
            }
        }
    }
}
