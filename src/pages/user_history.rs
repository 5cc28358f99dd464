//! Admin lookup of another user's borrowing history

use std::fmt;

use crate::{
    api::ApiOutcome,
    format,
    models::{
        borrow::{BorrowRecord, BorrowStatus},
        user::User,
    },
    AppState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHistoryRow {
    pub title: String,
    pub borrow_date: String,
    pub return_date: String,
    pub status: String,
}

impl From<&BorrowRecord> for UserHistoryRow {
    fn from(record: &BorrowRecord) -> Self {
        Self {
            title: record
                .title
                .clone()
                .unwrap_or_else(|| format!("Book #{}", record.book_id)),
            borrow_date: format::format_date_or(record.borrow_date.as_deref(), "-"),
            return_date: format::format_date_or(record.return_date.as_deref(), "-"),
            status: record.borrow_status.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHistoryView {
    /// Username, or "User" when unknown
    pub heading: String,
    pub rows: Vec<UserHistoryRow>,
}

impl fmt::Display for UserHistoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Borrowing history: {}", self.heading)?;
        if self.rows.is_empty() {
            return writeln!(f, "No borrowing history found.");
        }
        for row in &self.rows {
            writeln!(f, "{}  {}  {}  {}", row.title, row.borrow_date, row.return_date, row.status)?;
        }
        Ok(())
    }
}

/// Label of a user search result
pub fn user_label(user: &User) -> String {
    format!("{} ({})", user.username, user.email)
}

pub struct UserHistoryPage {
    state: AppState,
}

impl UserHistoryPage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Search users by keyword; `None` when the keyword is blank
    pub async fn search(&self, keyword: &str) -> Option<Vec<User>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            self.state
                .dialogs
                .warning("Please enter username or email to search")
                .await;
            return None;
        }

        let users = match self.state.services.users.search_users(keyword).await {
            ApiOutcome::Success(users) => users,
            ApiOutcome::Rejected(message) => {
                tracing::error!("Failed to fetch users: {}", message.unwrap_or_default());
                Vec::new()
            }
            ApiOutcome::Unauthorized => Vec::new(),
            ApiOutcome::Failed(e) => {
                tracing::error!("Error fetching users: {}", e);
                Vec::new()
            }
        };
        Some(users)
    }

    /// Borrowed and returned records of one user
    pub async fn history(&self, user_id: i64, username: Option<&str>) -> UserHistoryView {
        let records = match self.state.services.borrows.user_history(user_id).await {
            ApiOutcome::Success(records) => records,
            ApiOutcome::Rejected(message) => {
                tracing::error!(user_id, "Failed to fetch borrowing history: {}", message.unwrap_or_default());
                Vec::new()
            }
            ApiOutcome::Unauthorized => Vec::new(),
            ApiOutcome::Failed(e) => {
                tracing::error!(user_id, "Error fetching borrowing history: {}", e);
                Vec::new()
            }
        };

        UserHistoryView {
            heading: username
                .filter(|name| !name.is_empty())
                .unwrap_or("User")
                .to_string(),
            rows: records
                .iter()
                .filter(|r| matches!(r.borrow_status, BorrowStatus::Borrowed | BorrowStatus::Returned))
                .map(UserHistoryRow::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_text() {
        let view = UserHistoryView {
            heading: "User".into(),
            rows: Vec::new(),
        };
        assert!(view.to_string().contains("No borrowing history found."));
    }

    #[test]
    fn rows_use_dash_for_missing_dates() {
        let record = BorrowRecord {
            id: 1,
            book_id: 8,
            user_id: 3,
            borrow_date: Some("2024-02-01".into()),
            return_date: None,
            borrow_status: BorrowStatus::Borrowed,
            title: None,
            author: None,
            username: None,
        };
        let row = UserHistoryRow::from(&record);
        assert_eq!(row.title, "Book #8");
        assert_eq!(row.borrow_date, "2024/2/1");
        assert_eq!(row.return_date, "-");
    }

    #[test]
    fn search_result_label() {
        let user = User {
            id: 3,
            username: "ann".into(),
            email: "ann@example.com".into(),
            role: Default::default(),
        };
        assert_eq!(user_label(&user), "ann (ann@example.com)");
    }
}
