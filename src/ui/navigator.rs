//! Page navigation

use std::sync::Mutex;

use tokio::sync::watch;

/// Views of the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    /// Login / registration
    Account,
    BookDetail(i64),
    Borrow(i64),
    AdminBooks,
    ManageRequests,
    History,
    UserHistory,
}

impl View {
    /// Path of the view relative to the site root
    pub fn path(&self) -> String {
        match self {
            View::Home => "index.html".to_string(),
            View::Account => "account.html".to_string(),
            View::BookDetail(id) => format!("book-detail.html?id={}", id),
            View::Borrow(id) => format!("borrow.html?id={}", id),
            View::AdminBooks => "admin/manage-books.html".to_string(),
            View::ManageRequests => "admin/manage-requests.html".to_string(),
            View::History => "history.html".to_string(),
            View::UserHistory => "admin/user-history.html".to_string(),
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Moves the user to another view
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, view: View);
}

/// Navigator that records the visited views
pub struct HistoryNavigator {
    visited: Mutex<Vec<View>>,
    current: watch::Sender<View>,
}

impl HistoryNavigator {
    pub fn new(start: View) -> Self {
        let (current, _) = watch::channel(start.clone());
        Self {
            visited: Mutex::new(vec![start]),
            current,
        }
    }

    pub fn current(&self) -> View {
        self.current.borrow().clone()
    }

    /// Every view visited so far, oldest first
    pub fn history(&self) -> Vec<View> {
        self.visited
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    pub fn subscribe(&self) -> watch::Receiver<View> {
        self.current.subscribe()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new(View::Home)
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, view: View) {
        tracing::info!(to = %view, "Navigating");
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(view.clone());
        }
        self.current.send_replace(view);
    }
}
