//! Borrow record model and related types

use serde::{Deserialize, Serialize};

/// Borrow record lifecycle status
///
/// `requested → borrowed | rejected`, `borrowed → returned`; the server
/// enforces the transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorrowStatus {
    Requested,
    Borrowed,
    Returned,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl BorrowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowStatus::Requested => "requested",
            BorrowStatus::Borrowed => "borrowed",
            BorrowStatus::Returned => "returned",
            BorrowStatus::Rejected => "rejected",
            BorrowStatus::Unknown => "unknown",
        }
    }

    /// Badge colour classes used by the history table
    pub fn badge_class(&self) -> &'static str {
        match self {
            BorrowStatus::Requested => "bg-yellow-100 text-yellow-800",
            BorrowStatus::Borrowed => "bg-blue-100 text-blue-800",
            BorrowStatus::Returned => "bg-green-100 text-green-800",
            BorrowStatus::Rejected => "bg-red-100 text-red-800",
            BorrowStatus::Unknown => "bg-gray-100 text-gray-800",
        }
    }
}

impl std::fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::capitalize(self.as_str()))
    }
}

/// Borrow record, with optional joined display fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub id: i64,
    #[serde(default)]
    pub book_id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub borrow_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    pub borrow_status: BorrowStatus,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Create borrow request
#[derive(Debug, Clone, Serialize)]
pub struct CreateBorrow {
    pub book_id: i64,
}

/// Status transition request
#[derive(Debug, Clone, Serialize)]
pub struct UpdateBorrowStatus {
    pub borrow_status: BorrowStatus,
}
