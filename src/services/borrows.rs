//! Borrow request lifecycle service

use serde::de::IgnoredAny;

use crate::{
    api::{ApiClient, ApiOutcome, RequestOptions},
    models::borrow::{BorrowRecord, BorrowStatus, CreateBorrow, UpdateBorrowStatus},
};

#[derive(Clone)]
pub struct BorrowService {
    client: ApiClient,
}

impl BorrowService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Ask to borrow a book; the request waits for admin approval
    pub async fn request_borrow(&self, book_id: i64) -> ApiOutcome<IgnoredAny> {
        let options = match RequestOptions::post_json(&CreateBorrow { book_id }) {
            Ok(options) => options,
            Err(e) => return ApiOutcome::Failed(e),
        };
        tracing::info!(book_id, "Submitting borrow request");
        self.client.call(self.client.endpoints().borrows(), options).await
    }

    /// Borrow records in the given status (admin)
    pub async fn list_by_status(&self, status: BorrowStatus) -> ApiOutcome<Vec<BorrowRecord>> {
        self.client
            .call_list(self.client.endpoints().borrows_with_status(status), RequestOptions::get())
            .await
    }

    /// Full borrow history of a user
    pub async fn user_history(&self, user_id: i64) -> ApiOutcome<Vec<BorrowRecord>> {
        self.client
            .call_list(self.client.endpoints().user_borrows(user_id), RequestOptions::get())
            .await
    }

    /// Request a status transition (approve → borrowed, deny → rejected)
    pub async fn update_status(&self, id: i64, status: BorrowStatus) -> ApiOutcome<IgnoredAny> {
        let body = UpdateBorrowStatus { borrow_status: status };
        let options = match RequestOptions::put_json(&body) {
            Ok(options) => options,
            Err(e) => return ApiOutcome::Failed(e),
        };
        tracing::info!(borrow_id = id, status = status.as_str(), "Updating borrow status");
        self.client.call(self.client.endpoints().borrow_status(id), options).await
    }

    pub async fn return_book(&self, id: i64) -> ApiOutcome<IgnoredAny> {
        tracing::info!(borrow_id = id, "Returning book");
        self.client
            .call(self.client.endpoints().borrow_return(id), RequestOptions::put())
            .await
    }
}
