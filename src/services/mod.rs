//! Typed access to the API resources

pub mod auth;
pub mod borrows;
pub mod catalog;
pub mod health;
pub mod users;

use crate::api::ApiClient;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub borrows: borrows::BorrowService,
    pub users: users::UsersService,
    pub health: health::HealthService,
}

impl Services {
    /// Create all services over the given client
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: auth::AuthService::new(client.clone()),
            catalog: catalog::CatalogService::new(client.clone()),
            borrows: borrows::BorrowService::new(client.clone()),
            users: users::UsersService::new(client.clone()),
            health: health::HealthService::new(client),
        }
    }
}
