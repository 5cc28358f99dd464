//! User search service (admin)

use crate::{
    api::{ApiClient, ApiOutcome, RequestOptions},
    models::user::User,
};

#[derive(Clone)]
pub struct UsersService {
    client: ApiClient,
}

impl UsersService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Users whose name or e-mail matches `query`
    pub async fn search_users(&self, query: &str) -> ApiOutcome<Vec<User>> {
        self.client
            .call_list(self.client.endpoints().users_search(query), RequestOptions::get())
            .await
    }
}
