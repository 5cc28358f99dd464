//! Home page: health check, auth gate and the catalog for logged-in users

use crate::{
    models::book::BookQuery,
    services::health::HealthStatus,
    ui::{AuthGate, NavVisibility},
    AppState,
};

use super::catalog::{CatalogPage, CatalogView};

/// Everything the home page shows after loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub health: HealthStatus,
    pub nav: NavVisibility,
    pub gate: AuthGate,
    /// Present only when logged in
    pub catalog: Option<CatalogView>,
}

pub struct HomePage {
    state: AppState,
    catalog: CatalogPage,
}

impl HomePage {
    pub fn new(state: AppState) -> Self {
        let catalog = CatalogPage::new(state.clone());
        Self { state, catalog }
    }

    pub async fn load(&self) -> HomeView {
        let health = self.state.services.health.check().await;

        let user = self.state.session.current_user();
        let nav = NavVisibility::for_user(user.as_ref());
        let gate = AuthGate::for_user(user.as_ref());

        let catalog = if gate.main_content {
            Some(self.catalog.load_books(&BookQuery::default()).await)
        } else {
            None
        };

        HomeView { health, nav, gate, catalog }
    }
}
