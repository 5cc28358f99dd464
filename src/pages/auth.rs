//! Login / register / logout page

use crate::{
    api::ApiOutcome,
    error::AppError,
    models::user::{LoginRequest, RegisterRequest, Role, User},
    ui::View,
    AppState,
};

/// Visible form on the account page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

/// Result of a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Session stored; carries the view navigated to
    LoggedIn(View),
    Rejected(String),
    Error(String),
}

pub struct AuthPage {
    state: AppState,
    tab: AuthTab,
}

impl AuthPage {
    pub fn new(state: AppState) -> Self {
        Self { state, tab: AuthTab::default() }
    }

    pub fn tab(&self) -> AuthTab {
        self.tab
    }

    pub fn switch_tab(&mut self, tab: AuthTab) {
        self.tab = tab;
    }

    pub async fn login(&mut self, email: &str, password: &str) -> LoginOutcome {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let dialogs = &self.state.dialogs;

        match self.state.services.auth.login(&request).await {
            ApiOutcome::Success(session) => {
                if let Err(e) = self.state.session.set_session(&session) {
                    tracing::error!("Failed to store session: {}", e);
                    dialogs.error(&format!("Login error: {}", e)).await;
                    return LoginOutcome::Error(e.to_string());
                }
                dialogs.success("Login successful!").await;

                let target = if session.user.is_admin() {
                    View::AdminBooks
                } else {
                    View::Home
                };
                self.state.navigator.navigate(target.clone());
                LoginOutcome::LoggedIn(target)
            }
            ApiOutcome::Rejected(message) => {
                let message = message.unwrap_or_else(|| "Unknown error".to_string());
                dialogs.error(&format!("Login failed: {}", message)).await;
                LoginOutcome::Rejected(message)
            }
            // login never goes through the logout path
            ApiOutcome::Unauthorized => {
                dialogs.error("Login failed: Unknown error").await;
                LoginOutcome::Rejected("Unknown error".to_string())
            }
            ApiOutcome::Failed(AppError::Validation(message)) => {
                dialogs.error(&message).await;
                LoginOutcome::Rejected(message)
            }
            ApiOutcome::Failed(e) => {
                tracing::error!("Login error: {}", e);
                dialogs.error(&format!("Login error: {}", e)).await;
                LoginOutcome::Error(e.to_string())
            }
        }
    }

    /// Returns true when the account was created
    pub async fn register(&mut self, username: &str, email: &str, password: &str, role: Role) -> bool {
        let request = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            role,
        };
        let dialogs = &self.state.dialogs;

        match self.state.services.auth.register(&request).await {
            ApiOutcome::Success(_) => {
                dialogs.success("Registration successful! Please login.").await;
                self.tab = AuthTab::Login;
                true
            }
            ApiOutcome::Rejected(message) => {
                let message = message.unwrap_or_else(|| "Unknown error".to_string());
                dialogs.error(&format!("Registration failed: {}", message)).await;
                false
            }
            ApiOutcome::Unauthorized => false,
            ApiOutcome::Failed(AppError::Validation(message)) => {
                dialogs.error(&message).await;
                false
            }
            ApiOutcome::Failed(e) => {
                tracing::error!("Registration error: {}", e);
                dialogs.error(&format!("Registration error: {}", e)).await;
                false
            }
        }
    }

    pub fn logout(&self) {
        if let Err(e) = self.state.session.clear_session() {
            tracing::warn!("Failed to clear session: {}", e);
        }
        tracing::info!("Logged out");
        self.state.navigator.navigate(View::Home);
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.session.is_logged_in()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.session.current_user()
    }

    pub fn is_admin(&self) -> bool {
        self.state.session.is_admin()
    }
}
