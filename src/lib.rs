//! BookNest Library Lending Client
//!
//! A client for the BookNest REST API: catalog browsing and search, borrow
//! requests, admin book management and borrow-request approval. Page
//! controllers share one session provider, one API client and one modal
//! dialog controller.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod pages;
pub mod services;
pub mod session;
pub mod ui;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use api::ApiClient;
use services::Services;
use session::SessionProvider;
use ui::{Dialogs, Navigator};

/// Application state shared across all page controllers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session: SessionProvider,
    pub dialogs: Arc<dyn Dialogs>,
    pub navigator: Arc<dyn Navigator>,
    pub services: Arc<Services>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        session: SessionProvider,
        dialogs: Arc<dyn Dialogs>,
        navigator: Arc<dyn Navigator>,
    ) -> AppResult<Self> {
        let client = ApiClient::new(&config.api, session.clone(), dialogs.clone(), navigator.clone())?;
        Ok(Self {
            config: Arc::new(config),
            session,
            dialogs,
            navigator,
            services: Arc::new(Services::new(client)),
        })
    }
}
