//! REST endpoint map, derived from the configured base URL

use reqwest::Url;

use crate::error::{AppError, AppResult};
use crate::models::{BookQuery, BorrowStatus};

#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let base = Url::parse(base_url.trim().trim_end_matches('/'))
            .map_err(|e| AppError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::InvalidUrl(format!(
                "{}: only http and https are supported",
                base_url
            )));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn join(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        let joined = format!("{}/{}", self.base.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url
    }

    fn with_query(mut url: Url, pairs: &[(&str, &str)]) -> Url {
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    // Authentication

    pub fn login(&self) -> Url {
        self.join("auth/login")
    }

    pub fn register(&self) -> Url {
        self.join("auth/register")
    }

    // Books

    pub fn books(&self) -> Url {
        self.join("books")
    }

    /// Book listing with the present search filters
    pub fn books_search(&self, query: &BookQuery) -> Url {
        let mut pairs = Vec::new();
        if let Some(title) = &query.title {
            pairs.push(("title", title.as_str()));
        }
        if let Some(author) = &query.author {
            pairs.push(("author", author.as_str()));
        }
        Self::with_query(self.books(), &pairs)
    }

    pub fn book(&self, id: i64) -> Url {
        self.join(&format!("books/{}", id))
    }

    // Borrows

    pub fn borrows(&self) -> Url {
        self.join("borrows")
    }

    pub fn borrows_with_status(&self, status: BorrowStatus) -> Url {
        Self::with_query(self.borrows(), &[("borrow_status", status.as_str())])
    }

    pub fn user_borrows(&self, user_id: i64) -> Url {
        self.join(&format!("borrows/user/{}", user_id))
    }

    pub fn borrow_status(&self, id: i64) -> Url {
        self.join(&format!("borrows/{}/borrow_status", id))
    }

    pub fn borrow_return(&self, id: i64) -> Url {
        self.join(&format!("borrows/{}/return", id))
    }

    // Users

    pub fn users_search(&self, query: &str) -> Url {
        Self::with_query(self.join("users"), &[("query", query)])
    }

    pub fn health(&self) -> Url {
        self.join("health")
    }
}
