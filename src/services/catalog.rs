//! Catalog service: book listing, detail and admin CRUD

use serde::de::IgnoredAny;

use crate::{
    api::{ApiClient, ApiOutcome, RequestOptions},
    models::book::{Book, BookPayload, BookQuery},
};

#[derive(Clone)]
pub struct CatalogService {
    client: ApiClient,
}

impl CatalogService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List books matching the filters.
    ///
    /// Filters are sent to the server and re-applied locally so the listing
    /// only ever shows matching books.
    pub async fn search_books(&self, query: &BookQuery) -> ApiOutcome<Vec<Book>> {
        let url = self.client.endpoints().books_search(query);
        self.client
            .call_list::<Book>(url, RequestOptions::get())
            .await
            .map(|books| books.into_iter().filter(|b| query.matches(b)).collect())
    }

    pub async fn get_book(&self, id: i64) -> ApiOutcome<Book> {
        self.client
            .call(self.client.endpoints().book(id), RequestOptions::get())
            .await
    }

    pub async fn create_book(&self, payload: &BookPayload) -> ApiOutcome<IgnoredAny> {
        let options = match RequestOptions::post_json(payload) {
            Ok(options) => options,
            Err(e) => return ApiOutcome::Failed(e),
        };
        tracing::info!(title = %payload.title, "Creating book");
        self.client.call(self.client.endpoints().books(), options).await
    }

    pub async fn update_book(&self, id: i64, payload: &BookPayload) -> ApiOutcome<IgnoredAny> {
        let options = match RequestOptions::put_json(payload) {
            Ok(options) => options,
            Err(e) => return ApiOutcome::Failed(e),
        };
        tracing::info!(book_id = id, "Updating book");
        self.client.call(self.client.endpoints().book(id), options).await
    }

    pub async fn delete_book(&self, id: i64) -> ApiOutcome<IgnoredAny> {
        tracing::info!(book_id = id, "Deleting book");
        self.client
            .call(self.client.endpoints().book(id), RequestOptions::delete())
            .await
    }
}
